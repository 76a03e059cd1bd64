// easylabel-core/src/ext_json.rs
//
// Extended JSON codec. Store-native types that plain JSON cannot carry
// (object identifiers, dates) are encoded with a fixed table of
// reserved-key tags instead of being flattened to strings. Everything
// that crosses the store boundary (HTTP bodies, the on-disk files)
// goes through this module.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::document::{Document, DocumentId};
use crate::error::{Result, StoreError};

/// Tag for object identifiers: `{"$oid": "..."}`
pub const OBJECT_ID_TAG: &str = "$oid";

/// Tag for dates: `{"$date": "<RFC 3339>"}`
pub const DATE_TAG: &str = "$date";

/// Encode a document identifier. Int and String ids are plain JSON
/// scalars; ObjectIds get the `$oid` tag.
pub fn encode_id(id: &DocumentId) -> Value {
    match id {
        DocumentId::Int(i) => Value::from(*i),
        DocumentId::String(s) => Value::from(s.clone()),
        DocumentId::ObjectId(oid) => {
            let mut map = Map::new();
            map.insert(OBJECT_ID_TAG.to_string(), Value::from(oid.clone()));
            Value::Object(map)
        }
    }
}

/// Decode a document identifier from its extended JSON form.
pub fn decode_id(value: &Value) -> Option<DocumentId> {
    match value {
        Value::Number(n) => n.as_i64().map(DocumentId::Int),
        Value::String(s) => Some(DocumentId::String(s.clone())),
        Value::Object(map) if map.len() == 1 => map
            .get(OBJECT_ID_TAG)
            .and_then(Value::as_str)
            .map(|oid| DocumentId::ObjectId(oid.to_string())),
        _ => None,
    }
}

/// Encode a UTC datetime as `{"$date": "<RFC 3339>"}`.
pub fn encode_datetime(dt: &DateTime<Utc>) -> Value {
    let mut map = Map::new();
    map.insert(
        DATE_TAG.to_string(),
        Value::from(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    Value::Object(map)
}

/// Decode a `{"$date": ...}` value back to a UTC datetime.
pub fn decode_datetime(value: &Value) -> Option<DateTime<Utc>> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let raw = map.get(DATE_TAG)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a document as extended JSON, `_id` first.
pub fn to_value(doc: &Document) -> Value {
    let mut map = Map::new();
    map.insert("_id".to_string(), encode_id(&doc.id));
    for (k, v) in &doc.fields {
        map.insert(k.clone(), v.clone());
    }
    Value::Object(map)
}

/// Rebuild a document from its extended JSON form. The value must be
/// an object carrying a decodable `_id`.
pub fn document_from_value(value: &Value) -> Result<Document> {
    let map = value
        .as_object()
        .ok_or_else(|| StoreError::InvalidDocument("document must be a JSON object".to_string()))?;

    let id_value = map
        .get("_id")
        .ok_or_else(|| StoreError::InvalidDocument("document is missing _id".to_string()))?;
    let id = decode_id(id_value)
        .ok_or_else(|| StoreError::InvalidDocument(format!("unrecognized _id: {}", id_value)))?;

    let mut fields = Map::new();
    for (k, v) in map {
        if k != "_id" {
            fields.insert(k.clone(), v.clone());
        }
    }

    Ok(Document::new(id, fields))
}
