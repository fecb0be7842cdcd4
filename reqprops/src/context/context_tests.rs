//! Comprehensive tests for context module.

#[cfg(test)]
mod tests {
    use crate::context::{PropertyBag, PropsContext, RequestContext, SharedPropertyBag};
    use crate::props::{add_props, get_all_props, get_props, get_raw_props};
    use serde_json::json;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestContext::new("GET", "/");
        let b = RequestContext::new("GET", "/");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_request_with_request_id() {
        let id = uuid::Uuid::new_v4();
        let ctx = RequestContext::new("GET", "/").with_request_id(id);
        assert_eq!(ctx.id(), id);
    }

    #[test]
    fn test_received_at_is_not_in_the_future() {
        let ctx = RequestContext::new("GET", "/");
        assert!(ctx.received_at() <= chrono::Utc::now());
    }

    #[test]
    fn test_bags_are_per_request() {
        let mut a = RequestContext::new("GET", "/");
        let mut b = RequestContext::new("GET", "/");

        add_props(&mut a, &json!(1), "k").unwrap();
        add_props(&mut b, &json!(2), "k").unwrap();

        assert_eq!(get_raw_props(&a, "k").unwrap(), &json!(1));
        assert_eq!(get_raw_props(&b, "k").unwrap(), &json!(2));
    }

    #[test]
    fn test_cloned_request_has_independent_bag() {
        let mut original = RequestContext::new("GET", "/");
        add_props(&mut original, &json!(1), "a").unwrap();

        let mut copy = original.clone();
        add_props(&mut copy, &json!(2), "b").unwrap();

        assert_eq!(get_all_props(&original).len(), 1);
        assert_eq!(get_all_props(&copy).len(), 2);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut ctx = RequestContext::new("GET", "/");
        add_props(&mut ctx, &json!({"p": 1}), "a").unwrap();
        add_props(&mut ctx, &json!({"p": 2}), "b").unwrap();

        assert_eq!(get_raw_props(&ctx, "a").unwrap(), &json!({"p": 1}));
        assert_eq!(get_raw_props(&ctx, "b").unwrap(), &json!({"p": 2}));
    }

    #[test]
    fn test_bulk_read_has_exactly_written_keys() {
        let mut ctx = RequestContext::new("GET", "/");
        add_props(&mut ctx, &json!(1), "k1").unwrap();
        add_props(&mut ctx, &json!(2), "k2").unwrap();

        let all = get_all_props(&ctx);
        let mut keys: Vec<_> = all.keys().cloned().collect();
        keys.sort();

        assert_eq!(keys, vec!["k1".to_string(), "k2".to_string()]);
        assert_eq!(all["k1"], json!(1));
        assert_eq!(all["k2"], json!(2));
    }

    #[test]
    fn test_failed_write_does_not_create_entry() {
        let mut ctx = RequestContext::new("GET", "/");
        assert!(add_props(&mut ctx, &json!(1), "").is_err());

        assert!(get_all_props(&ctx).is_empty());
        assert!(ctx.props().is_none());
    }

    #[test]
    fn test_repeated_reads_are_equal() {
        let mut ctx = RequestContext::new("GET", "/");
        add_props(&mut ctx, &json!({"user": {"name": "dummy", "id": 1}}), "authenticateUser").unwrap();

        let first: serde_json::Value = get_props(&ctx, "authenticateUser").unwrap();
        let second: serde_json::Value = get_props(&ctx, "authenticateUser").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_bag_from_request_bag() {
        let mut ctx = RequestContext::new("GET", "/");
        add_props(&mut ctx, &json!(1), "a").unwrap();

        let shared = SharedPropertyBag::from_bag(ctx.props().cloned().unwrap_or_default());
        shared.insert("b", &2).unwrap();

        assert_eq!(shared.len(), 2);
        assert_eq!(ctx.props().map(PropertyBag::len), Some(1));
    }
}
