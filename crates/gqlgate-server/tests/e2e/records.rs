//! Projection, filtering and normalization of fetched records.

use axum::http::StatusCode;
use gqlgate_core::{FalsyPolicy, FieldDescriptor};
use serde_json::json;

use crate::common::{Call, FakeUpstream, TOKEN, TestGateway, config, contact_upstream, json_body};

#[tokio::test]
async fn test_contact_records_projected_and_flattened() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, body) = gw.get("/?resource=contact").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!([{ "email": "a@b.com", "avatar": "f1" }])
    );

    let query = gw.upstream.fetched_query().unwrap();
    assert_eq!(
        query,
        "query { contactsList { items { email avatar { id } } } }"
    );
    assert!(!query.contains("company"));
}

#[tokio::test]
async fn test_calls_run_in_order_with_one_token() {
    let gw = TestGateway::with_defaults(contact_upstream());

    gw.get("/data?resource=contact").await;

    let calls = gw.upstream.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::Login);
    assert_eq!(
        calls[1],
        Call::Describe {
            resource: "contact".to_string(),
            token: TOKEN.to_string(),
        }
    );
    assert!(matches!(&calls[2], Call::Fetch { token, .. } if token == TOKEN));
}

#[tokio::test]
async fn test_since_adds_updated_at_filter() {
    let gw = TestGateway::with_defaults(contact_upstream());

    let (status, _) = gw
        .get("/?resource=contact&since=2024-03-01T10:00:00%2B02:00")
        .await;

    assert_eq!(status, StatusCode::OK);
    let query = gw.upstream.fetched_query().unwrap();
    assert!(
        query.contains(r#"contactsList(filter: {updatedAt: {gte: "2024-03-01T08:00:00Z"}})"#),
        "unexpected query: {query}"
    );
}

#[tokio::test]
async fn test_date_only_since_is_midnight_utc() {
    let gw = TestGateway::with_defaults(contact_upstream());

    gw.get("/?resource=contact&since=2024-01-15").await;

    let query = gw.upstream.fetched_query().unwrap();
    assert!(query.contains(r#"gte: "2024-01-15T00:00:00Z""#));
}

#[tokio::test]
async fn test_list_relations_projected_as_ids() {
    let upstream = FakeUpstream::new(
        vec![
            FieldDescriptor::scalar("name"),
            FieldDescriptor::relation("tags", true),
        ],
        vec![json!({ "name": "Ada", "tags": [{ "id": "t1" }, { "id": "t2" }] })],
    );
    let gw = TestGateway::with_defaults(upstream);

    let (status, body) = gw.get("/?resource=contact").await;

    assert_eq!(status, StatusCode::OK);
    assert!(gw.upstream.fetched_query().unwrap().contains("name tags { id }"));
    // Arrays pass through untouched.
    assert_eq!(
        json_body(&body),
        json!([{ "name": "Ada", "tags": [{ "id": "t1" }, { "id": "t2" }] }])
    );
}

#[tokio::test]
async fn test_falsy_values_dropped_by_default() {
    let upstream = FakeUpstream::new(
        vec![
            FieldDescriptor::scalar("a"),
            FieldDescriptor::scalar("b"),
            FieldDescriptor::scalar("c"),
            FieldDescriptor::scalar("d"),
        ],
        vec![json!({ "a": null, "b": 0, "c": false, "d": "kept" })],
    );
    let gw = TestGateway::with_defaults(upstream);

    let (_, body) = gw.get("/?resource=contact").await;

    assert_eq!(json_body(&body), json!([{ "d": "kept" }]));
}

#[tokio::test]
async fn test_drop_null_policy_keeps_zero_and_false() {
    let upstream = FakeUpstream::new(
        vec![
            FieldDescriptor::scalar("a"),
            FieldDescriptor::scalar("b"),
            FieldDescriptor::scalar("c"),
        ],
        vec![json!({ "a": null, "b": 0, "c": false })],
    );
    let mut config = config();
    config.normalize = FalsyPolicy::DropNull;
    let gw = TestGateway::new(config, upstream);

    let (_, body) = gw.get("/?resource=contact").await;

    assert_eq!(json_body(&body), json!([{ "b": 0, "c": false }]));
}

#[tokio::test]
async fn test_empty_upstream_list() {
    let gw = TestGateway::with_defaults(FakeUpstream::new(
        vec![FieldDescriptor::scalar("email")],
        vec![],
    ));

    let (status, body) = gw.get("/?resource=contact").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}
