//! List-query synthesis.
//!
//! A query is assembled from three pieces: the allow-listed resource name,
//! projection clauses derived from introspection, and an optional
//! `updatedAt` filter built from a validated timestamp. Field names come only
//! from the upstream schema; the caller contributes nothing but the resource
//! (already checked) and the `since` value (re-formatted before use).

use std::fmt;

use crate::authorizer::{AuthorizedResource, is_graphql_name};
use crate::date::parse_timestamp;
use crate::error::CoreError;
use crate::model::{FieldDescriptor, FieldKind, QueryFilter, ResourceSchema};

/// Selection text for one field: `name` or `name { id }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionClause(String);

impl ProjectionClause {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Projection for a single field, or `None` when the field is not fetched.
///
/// Single-valued sides of relations (`is_list == false`, including relations
/// without metadata) are skipped: following them would pull the "many" side.
pub fn projection_clause(field: &FieldDescriptor) -> Option<ProjectionClause> {
    if !is_graphql_name(&field.name) {
        tracing::warn!(field = %field.name, "skipping field with non-GraphQL name");
        return None;
    }

    match field.kind {
        FieldKind::Scalar => Some(ProjectionClause(field.name.clone())),
        FieldKind::FileRef | FieldKind::Relation { is_list: true } => {
            Some(ProjectionClause(format!("{} {{ id }}", field.name)))
        }
        FieldKind::Relation { is_list: false } => None,
    }
}

/// Projection clauses for every fetchable field, in schema order.
pub fn build_projection(schema: &ResourceSchema) -> Vec<ProjectionClause> {
    schema.fields.iter().filter_map(projection_clause).collect()
}

/// Build the optional time filter from the raw `since` parameter.
///
/// Absent or empty input means no filter.
pub fn build_filter(since: Option<&str>) -> Result<Option<QueryFilter>, CoreError> {
    let Some(raw) = since.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    parse_timestamp(raw)
        .map(|since_utc| Some(QueryFilter::new(since_utc)))
        .ok_or_else(|| CoreError::InvalidDate {
            raw: raw.to_string(),
        })
}

/// A synthesized list query and the key its items appear under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Full GraphQL document.
    pub text: String,
    /// Field of `data` holding `{ items: [...] }`, e.g. `contactsList`.
    pub response_key: String,
}

pub fn build_list_query(
    resource: &AuthorizedResource,
    projection: &[ProjectionClause],
    filter: Option<&QueryFilter>,
) -> ListQuery {
    let response_key = resource.list_field();
    let filter = filter.map(QueryFilter::clause).unwrap_or_default();
    let fields = projection
        .iter()
        .map(ProjectionClause::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let text = format!("query {{ {response_key}{filter} {{ items {{ {fields} }} }} }}");

    ListQuery { text, response_key }
}
