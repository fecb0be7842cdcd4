//! End-to-end tests for attaching and reading request props.

use pretty_assertions::assert_eq;
use reqprops::prelude::*;
use reqprops::testing::{
    assert_duplicate_key, assert_has_props, assert_missing_key, assert_props_eq, TestRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Guest,
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AuthenticateUser {
    user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AttachRole {
    role: Role,
}

fn dummy_user() -> AuthenticateUser {
    AuthenticateUser {
        user: User {
            name: "dummy".to_string(),
            id: 1,
        },
    }
}

fn role_for(_user: &User) -> Role {
    Role::Admin
}

fn authenticate(ctx: &mut RequestContext) -> Result<(), PropsError> {
    add_props(ctx, &dummy_user(), "authenticateUser")
}

fn attach_role(ctx: &mut RequestContext) -> Result<(), PropsError> {
    let AuthenticateUser { user } = get_props(ctx, "authenticateUser")?;
    add_props(ctx, &AttachRole { role: role_for(&user) }, "attachRole")
}

fn route(ctx: &RequestContext) -> Result<Response, PropsError> {
    let AuthenticateUser { user } = get_props(ctx, "authenticateUser")?;
    let AttachRole { role } = get_props(ctx, "attachRole")?;
    Ok(Response::ok(json!({ "user": user, "role": role })))
}

#[test]
fn one_middleware() {
    let mut req = RequestContext::new("GET", "/");
    add_props(&mut req, &dummy_user(), "authenticateUser").unwrap();

    let AuthenticateUser { user } = get_props(&req, "authenticateUser").unwrap();
    assert_eq!(user, dummy_user().user);

    let again: AuthenticateUser = get_props(&req, "authenticateUser").unwrap();
    assert_eq!(again, dummy_user());

    assert_missing_key(&get_props::<AuthenticateUser, _>(&req, "wrongKey"), "wrongKey");
}

#[test]
fn two_middlewares() {
    let mut req = RequestContext::new("GET", "/");
    authenticate(&mut req).unwrap();
    attach_role(&mut req).unwrap();

    let AttachRole { role } = get_props(&req, "attachRole").unwrap();
    assert_eq!(role, Role::Admin);
    assert_has_props(&req, "authenticateUser");
}

#[test]
fn same_middleware_twice_fails_and_keeps_first_value() {
    let mut req = RequestContext::new("GET", "/");
    authenticate(&mut req).unwrap();
    attach_role(&mut req).unwrap();

    let other = AuthenticateUser {
        user: User {
            name: "someone else".to_string(),
            id: 2,
        },
    };
    assert_duplicate_key(&add_props(&mut req, &other, "authenticateUser"), "authenticateUser");

    let stored: AuthenticateUser = get_props(&req, "authenticateUser").unwrap();
    assert_eq!(stored, dummy_user());
}

#[test]
fn get_all_props_returns_every_entry() {
    let mut req = RequestContext::new("GET", "/");
    authenticate(&mut req).unwrap();
    attach_role(&mut req).unwrap();

    assert_props_eq(
        &req,
        &json!({
            "authenticateUser": { "user": { "name": "dummy", "id": 1 } },
            "attachRole": { "role": "admin" },
        }),
    );
    assert_eq!(get_all_props(&req).len(), 2);
}

#[test]
fn get_all_props_on_fresh_request_is_empty() {
    let req = RequestContext::new("GET", "/");
    assert!(get_all_props(&req).is_empty());
}

#[test]
fn read_before_write_fails() {
    let req = RequestContext::new("GET", "/");
    assert_missing_key(
        &get_props::<AuthenticateUser, _>(&req, "authenticateUser"),
        "authenticateUser",
    );
}

#[test]
fn reading_with_the_wrong_type_is_a_payload_error() {
    let req = TestRequest::new()
        .with_props("attachRole", &json!({ "role": "superuser" }))
        .build();

    let err = get_props::<AttachRole, _>(&req, "attachRole").unwrap_err();
    assert_eq!(err.code(), PayloadError::CODE);

    // The raw value is still there, untouched.
    assert_eq!(
        get_raw_props(&req, "attachRole").unwrap(),
        &json!({ "role": "superuser" })
    );
}

#[test]
fn roles_round_trip() {
    for role in [Role::Guest, Role::User, Role::Admin] {
        let mut req = RequestContext::new("GET", "/");
        add_props(&mut req, &AttachRole { role }, "attachRole").unwrap();
        let read: AttachRole = get_props(&req, "attachRole").unwrap();
        assert_eq!(read.role, role);
    }
}

#[tokio::test]
async fn pipeline_with_two_middlewares() {
    let chain = MiddlewareChain::new()
        .with(FnMiddleware::new("authenticateUser", authenticate))
        .with(FnMiddleware::new("attachRole", attach_role));

    let mut req = TestRequest::new().with_header("Cookie", "session=abc").build();
    let response = chain.run(&mut req, &route).await;

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({ "user": { "name": "dummy", "id": 1 }, "role": "admin" })
    );
}

#[tokio::test]
async fn pipeline_running_a_stage_twice_is_a_500() {
    let chain = MiddlewareChain::new()
        .with(FnMiddleware::new("authenticateUser", authenticate))
        .with(FnMiddleware::new("attachRole", attach_role))
        .with(FnMiddleware::new("authenticateUser", authenticate));

    let mut req = RequestContext::new("GET", "/");
    let response = chain.run(&mut req, &route).await;

    assert_eq!(response.status, 500);
    assert_eq!(response.error_code(), Some(DuplicateKeyError::CODE));
    assert_eq!(response.body["error"]["key"], "authenticateUser");
}

#[tokio::test]
async fn pipeline_missing_stage_is_a_500() {
    let chain = MiddlewareChain::new().with(FnMiddleware::new("authenticateUser", authenticate));

    let mut req = RequestContext::new("GET", "/");
    let response = chain.run(&mut req, &route).await;

    assert_eq!(response.error_code(), Some(MissingKeyError::CODE));
    assert_eq!(response.body["error"]["key"], "attachRole");
}

#[test]
fn shared_bag_across_threads() {
    let bag = SharedPropertyBag::new();

    std::thread::scope(|scope| {
        scope.spawn(|| bag.insert("authenticateUser", &dummy_user()).unwrap());
        scope.spawn(|| bag.insert("attachRole", &AttachRole { role: Role::User }).unwrap());
    });

    let role: AttachRole = bag.get("attachRole").unwrap();
    assert_eq!(role.role, Role::User);
    assert_eq!(bag.len(), 2);
}
