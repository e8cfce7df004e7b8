//! Resource discovery and health check.

use axum::http::StatusCode;
use gqlgate_server::ResourceList;

use crate::common::{Call, TestGateway, config, contact_upstream, json_body};

#[tokio::test]
async fn test_no_resource_lists_allow_list() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, body) = gw.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let list: ResourceList = serde_json::from_slice(&body).unwrap();
    assert_eq!(list.resources, vec!["contact".to_string()]);
}

#[tokio::test]
async fn test_discovery_still_logs_in_but_never_introspects() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, _) = gw.get("/?since=2024-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(gw.upstream.calls(), vec![Call::Login]);
}

#[tokio::test]
async fn test_empty_resource_param_is_discovery() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, body) = gw.get("/?resource=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["resources"][0], "contact");
}

#[tokio::test]
async fn test_discovery_lists_configured_order() {
    let mut config = config();
    config.resources = vec!["deal".to_string(), "contact".to_string()];
    let gw = TestGateway::new(config, contact_upstream());

    let (_, body) = gw.get("/data").await;

    let list: ResourceList = serde_json::from_slice(&body).unwrap();
    assert_eq!(list.resources, vec!["deal".to_string(), "contact".to_string()]);
}

#[tokio::test]
async fn test_healthz_needs_no_auth() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, body) = gw.get_with_auth("/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["ok"], true);
    assert!(gw.upstream.calls().is_empty());
}
