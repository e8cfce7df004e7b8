//! List query execution.

use gqlgate_core::ListQuery;
use serde_json::Value;

use crate::client::GraphQlClient;
use crate::error::UpstreamError;
use crate::session::SessionToken;

/// Run a synthesized list query and return the raw items.
pub async fn fetch_items(
    client: &GraphQlClient,
    query: &ListQuery,
    token: &SessionToken,
) -> Result<Vec<Value>, UpstreamError> {
    let data = client.execute(&query.text, Value::Null, Some(token)).await?;
    extract_items(&query.response_key, data)
}

/// Pull `data.<key>.items` out of a list response.
pub fn extract_items(key: &str, mut data: Value) -> Result<Vec<Value>, UpstreamError> {
    match data
        .get_mut(key)
        .and_then(|list| list.get_mut("items"))
        .map(Value::take)
    {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(UpstreamError::MalformedResponse(format!(
            "response has no {key}.items list"
        ))),
    }
}
