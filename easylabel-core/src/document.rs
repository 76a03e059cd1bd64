// easylabel-core/src/document.rs

use serde_json::{Map, Value};
use uuid::Uuid;

/// Schema-free document: an identifier plus arbitrary key/value fields.
///
/// Field order is preserved (serde_json is built with `preserve_order`),
/// so documents render back in the shape they were stored in.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

/// Document identifier types.
///
/// `ObjectId` is the store-native identifier; it only survives
/// serialization through the extended JSON codec (see `ext_json`),
/// which tags it to keep it distinguishable from a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    Int(i64),
    String(String),
    ObjectId(String),
}

impl DocumentId {
    /// Generate a fresh ObjectId (UUID v4)
    pub fn new_object_id() -> Self {
        DocumentId::ObjectId(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentId::Int(i) => write!(f, "{}", i),
            DocumentId::String(s) => write!(f, "{}", s),
            DocumentId::ObjectId(oid) => write!(f, "{}", oid),
        }
    }
}

impl Document {
    pub fn new(id: DocumentId, fields: Map<String, Value>) -> Self {
        Document { id, fields }
    }

    /// Field lookup by name. `_id` lives in `self.id`, not in `fields`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: String, value: Value) {
        self.fields.insert(field, value);
    }

    /// Remove a field. `shift_remove` keeps the remaining fields in
    /// order; plain `remove` is a swap-remove under `preserve_order`.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}
