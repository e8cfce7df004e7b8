use gqlgate_core::{AuthorizedResource, FieldDescriptor, FieldKind, ResourceSchema};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::GraphQlClient;
use crate::error::UpstreamError;
use crate::session::SessionToken;

/// Field layout of one table. The table name is passed as `$name`.
pub const TABLE_FIELDS_QUERY: &str = "query TableFields($name: String!) { \
     table(name: $name) { fields { name fieldType relation { refFieldIsList } } } }";

#[derive(Debug, Deserialize)]
struct TableFieldsData {
    table: Option<TableData>,
}

#[derive(Debug, Deserialize)]
struct TableData {
    fields: Vec<FieldData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldData {
    name: String,
    field_type: String,
    #[serde(default)]
    relation: Option<RelationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelationData {
    #[serde(default)]
    ref_field_is_list: Option<bool>,
}

/// Introspect `resource` on the upstream platform.
pub async fn describe(
    client: &GraphQlClient,
    resource: &AuthorizedResource,
    token: &SessionToken,
) -> Result<ResourceSchema, UpstreamError> {
    let data = client
        .execute(
            TABLE_FIELDS_QUERY,
            json!({ "name": resource.as_str() }),
            Some(token),
        )
        .await?;

    let schema = parse_schema(resource, data)?;
    tracing::debug!(
        resource = %resource,
        fields = schema.fields.len(),
        "introspected resource"
    );
    Ok(schema)
}

/// Map the introspection `data` member onto a [`ResourceSchema`].
pub fn parse_schema(
    resource: &AuthorizedResource,
    data: Value,
) -> Result<ResourceSchema, UpstreamError> {
    let parsed: TableFieldsData = serde_json::from_value(data)
        .map_err(|e| UpstreamError::MalformedResponse(format!("introspection: {e}")))?;

    let table = parsed.table.ok_or_else(|| {
        UpstreamError::MalformedResponse(format!("upstream has no table named {resource}"))
    })?;

    let fields = table
        .fields
        .into_iter()
        .map(|field| {
            let ref_is_list = field.relation.and_then(|r| r.ref_field_is_list);
            FieldDescriptor::new(field.name, FieldKind::classify(&field.field_type, ref_is_list))
        })
        .collect();

    Ok(ResourceSchema::new(resource.as_str(), fields))
}
