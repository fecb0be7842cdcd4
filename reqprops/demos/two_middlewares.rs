//! Runs an authenticate-then-attach-role pipeline against a few requests.
//!
//! ```text
//! RUST_LOG=reqprops=debug cargo run --example two_middlewares
//! ```

use anyhow::Context;
use reqprops::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    Admin,
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthenticateUser {
    user: User,
}

#[derive(Debug, Serialize, Deserialize)]
struct AttachRole {
    role: Role,
}

/// Looks the user up from the session cookie.
fn current_user(cookie: &str) -> User {
    let name = cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == "user")
        .map_or("Dummy", |(_, v)| v);
    User {
        id: 12,
        name: name.to_string(),
    }
}

fn role_for(_user: &User) -> Role {
    Role::Admin
}

fn authenticate_user(req: &mut RequestContext) -> Result<(), PropsError> {
    let user = current_user(req.header("cookie").unwrap_or_default());
    add_props(req, &AuthenticateUser { user }, "authenticateUser")
}

fn attach_role(req: &mut RequestContext) -> Result<(), PropsError> {
    let AuthenticateUser { user } = get_props(req, "authenticateUser")?;
    add_props(req, &AttachRole { role: role_for(&user) }, "attachRole")
}

fn index(req: &RequestContext) -> Result<Response, PropsError> {
    let AuthenticateUser { user } = get_props(req, "authenticateUser")?;
    let AttachRole { role } = get_props(req, "attachRole")?;
    Ok(Response::ok(serde_json::json!({ "user": user, "role": role })))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PropsConfig::from_env();
    init_tracing(&config);

    let chain = MiddlewareChain::new()
        .with(FnMiddleware::new("authenticateUser", authenticate_user))
        .with(FnMiddleware::new("attachRole", attach_role));

    let requests = [
        RequestContext::new("GET", "/"),
        RequestContext::new("GET", "/").with_header("Cookie", "user=root"),
        RequestContext::new("GET", "/").with_header("Cookie", "theme=dark; user=alice"),
    ];

    for req in requests {
        let mut req = req.with_config(config.clone());
        let response = chain.run(&mut req, &index).await;
        let body = serde_json::to_string_pretty(&response.body).context("encoding response body")?;
        println!("{} {} -> {}\n{body}", req.method(), req.path(), response.status);
        println!("props: {}", get_all_props_value(&req));
    }

    // Running the same stage twice on one request is reported, not silently merged.
    let doubled = MiddlewareChain::new()
        .with(FnMiddleware::new("authenticateUser", authenticate_user))
        .with(FnMiddleware::new("authenticateUser", authenticate_user));
    let mut req = RequestContext::new("GET", "/").with_config(config);
    let response = doubled.run(&mut req, &index).await;
    println!(
        "doubled stage -> {} {}",
        response.status,
        response.error_code().unwrap_or("-")
    );

    Ok(())
}
