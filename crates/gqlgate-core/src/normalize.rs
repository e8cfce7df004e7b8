//! Record normalization.
//!
//! Upstream items mix scalars with `{ id }` objects (files, relations).
//! Each item is flattened into a [`Record`]: objects collapse to their `id`
//! and empty values are dropped, so records do not share a fixed key set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Record;

/// Which values are dropped from normalized records.
///
/// `DropFalsy` cannot tell an absent field from `0`, `false` or `""`;
/// `DropNull` keeps those and only drops nulls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalsyPolicy {
    /// Drop `null`, `false`, `0` and `""`.
    #[default]
    DropFalsy,
    /// Drop `null` only.
    DropNull,
}

impl FalsyPolicy {
    fn drops(self, value: &Value) -> bool {
        match self {
            Self::DropFalsy => is_falsy(value),
            Self::DropNull => value.is_null(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: FalsyPolicy,
}

impl Normalizer {
    pub fn new(policy: FalsyPolicy) -> Self {
        Self { policy }
    }

    /// Flatten every item, preserving upstream order.
    pub fn normalize(&self, items: &[Value]) -> Vec<Record> {
        items.iter().map(|item| self.normalize_item(item)).collect()
    }

    /// Flatten one item. Non-object items yield an empty record.
    pub fn normalize_item(&self, item: &Value) -> Record {
        let Some(fields) = item.as_object() else {
            return Record::new();
        };

        let mut record = Record::new();
        for (key, value) in fields {
            let value = resolve(value);
            if !self.policy.drops(&value) {
                record.insert(key.clone(), value);
            }
        }
        record
    }
}

/// Objects become their `id`; everything else, arrays included, passes through.
fn resolve(value: &Value) -> Value {
    match value {
        Value::Object(obj) => obj.get("id").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
