// easylabel-core/src/filter.rs

use serde_json::Value;

use crate::document::Document;
use crate::error::{Result, StoreError};
use crate::ext_json;

/// Equality filter: a conjunction of `field == value` clauses parsed
/// from a JSON object. An empty object matches every document.
///
/// `_id` clauses are compared through the extended JSON codec, so
/// `{"_id": {"$oid": "..."}}` matches an ObjectId-keyed document.
/// Query operators (`$gt` and friends) are out of scope for this
/// store; `$`-prefixed fields are rejected outright.
#[derive(Debug, Clone)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Parse a filter from its JSON form.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| StoreError::InvalidFilter("filter must be a JSON object".to_string()))?;

        let mut clauses = Vec::with_capacity(map.len());
        for (field, expected) in map {
            if field.starts_with('$') {
                return Err(StoreError::InvalidFilter(format!(
                    "unsupported operator '{}'",
                    field
                )));
            }
            clauses.push((field.clone(), expected.clone()));
        }

        Ok(Filter { clauses })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Structural equality against the document's fields.
    pub fn matches(&self, doc: &Document) -> bool {
        for (field, expected) in &self.clauses {
            if field == "_id" {
                match ext_json::decode_id(expected) {
                    Some(ref id) if *id == doc.id => continue,
                    _ => return false,
                }
            }
            match doc.get(field) {
                Some(actual) if actual == expected => continue,
                _ => return false,
            }
        }
        true
    }
}
