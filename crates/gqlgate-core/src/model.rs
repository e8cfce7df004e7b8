//! Per-request data model.
//!
//! Everything here lives for one request only. Schemas are rebuilt from
//! introspection on every call unless the adapter's cache is enabled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream type tag for file attachments.
pub const FILE_FIELD_TYPE: &str = "FILE";

/// Upstream type tag for relations.
pub const RELATION_FIELD_TYPE: &str = "RELATION";

/// Shape of a field as far as projection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Any plain value.
    Scalar,
    /// A file attachment; only its id is fetched.
    FileRef,
    /// A relation. `is_list` is true when the referenced side holds the list,
    /// which makes this side the single-valued one.
    Relation { is_list: bool },
}

impl FieldKind {
    /// Classify an upstream field from its declared type tag and relation
    /// metadata. Relations without metadata are treated as non-list.
    pub fn classify(field_type: &str, ref_field_is_list: Option<bool>) -> Self {
        match field_type {
            FILE_FIELD_TYPE => Self::FileRef,
            RELATION_FIELD_TYPE => Self::Relation {
                is_list: ref_field_is_list.unwrap_or(false),
            },
            _ => Self::Scalar,
        }
    }
}

/// One field of a resource as reported by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Scalar)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::FileRef)
    }

    pub fn relation(name: impl Into<String>, is_list: bool) -> Self {
        Self::new(name, FieldKind::Relation { is_list })
    }
}

/// Ordered field layout of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub resource: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ResourceSchema {
    pub fn new(resource: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            resource: resource.into(),
            fields,
        }
    }
}

/// Lower bound on `updatedAt` applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFilter {
    pub since_utc: DateTime<Utc>,
}

impl QueryFilter {
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn new(since_utc: DateTime<Utc>) -> Self {
        Self { since_utc }
    }

    /// `since_utc` as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn timestamp(&self) -> String {
        self.since_utc.format(Self::TIMESTAMP_FORMAT).to_string()
    }

    /// Argument list for the list field, e.g.
    /// `(filter: {updatedAt: {gte: "2024-01-15T00:00:00Z"}})`.
    pub fn clause(&self) -> String {
        format!("(filter: {{updatedAt: {{gte: \"{}\"}}}})", self.timestamp())
    }
}

/// A flattened upstream item.
///
/// Keys vary between records: fields whose value was dropped during
/// normalization are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
