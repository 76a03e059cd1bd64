// easylabel-core/src/collection.rs
//
// A collection is an in-memory vector of documents with a JSON-lines
// file behind it (extended JSON, one document per line). Mutations
// rewrite the file atomically before returning; at this scale a full
// rewrite beats append/compaction machinery.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::document::{Document, DocumentId};
use crate::error::{Result, StoreError};
use crate::ext_json;
use crate::filter::Filter;

pub struct Collection {
    name: String,
    path: PathBuf,
    docs: RwLock<Vec<Document>>,
}

impl Collection {
    /// Open a collection file, loading every document into memory.
    /// A missing file is an empty collection.
    pub(crate) fn open(name: &str, dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}.jsonl", name));
        let mut docs = Vec::new();

        if path.exists() {
            let file = File::open(&path)?;
            for line in BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let value: Value = serde_json::from_str(&line)?;
                docs.push(ext_json::document_from_value(&value)?);
            }
        }

        debug!(collection = name, documents = docs.len(), "collection opened");

        Ok(Collection {
            name: name.to_string(),
            path,
            docs: RwLock::new(docs),
        })
    }

    /// Insert one document - returns the inserted DocumentId.
    ///
    /// A caller-supplied `_id` field is honored (duplicates rejected);
    /// otherwise a fresh ObjectId is generated.
    pub fn insert_one(&self, mut fields: Map<String, Value>) -> Result<DocumentId> {
        let id = match fields.remove("_id") {
            Some(raw) => ext_json::decode_id(&raw)
                .ok_or_else(|| StoreError::InvalidDocument(format!("unrecognized _id: {}", raw)))?,
            None => DocumentId::new_object_id(),
        };

        let mut docs = self.docs.write();
        if docs.iter().any(|d| d.id == id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        docs.push(Document::new(id.clone(), fields));
        if let Err(err) = self.persist(&docs) {
            docs.pop();
            return Err(err);
        }

        trace!(collection = %self.name, id = %id, "document inserted");
        Ok(id)
    }

    /// Find all documents matching the filter, in insertion order.
    pub fn find(&self, filter: &Value) -> Result<Vec<Value>> {
        let filter = Filter::from_value(filter)?;
        let docs = self.docs.read();
        Ok(docs
            .iter()
            .filter(|d| filter.matches(d))
            .map(ext_json::to_value)
            .collect())
    }

    /// Find the first document matching the filter. No match is `None`,
    /// not an error.
    pub fn find_one(&self, filter: &Value) -> Result<Option<Value>> {
        let filter = Filter::from_value(filter)?;
        let docs = self.docs.read();
        Ok(docs.iter().find(|d| filter.matches(d)).map(ext_json::to_value))
    }

    /// Count documents matching the filter.
    pub fn count_documents(&self, filter: &Value) -> Result<u64> {
        let filter = Filter::from_value(filter)?;
        let docs = self.docs.read();
        Ok(docs.iter().filter(|d| filter.matches(d)).count() as u64)
    }

    /// Update the first document matching the filter - returns
    /// (matched_count, modified_count).
    ///
    /// `update` is either a bare object, whose fields are merged into
    /// the document, or `$set`/`$unset` operator form. `modified` stays
    /// 0 when every field already held the written value, so repeating
    /// an update is a no-op.
    pub fn update_one(&self, filter: &Value, update: &Value) -> Result<(u64, u64)> {
        let filter = Filter::from_value(filter)?;
        let mut docs = self.docs.write();

        let pos = match docs.iter().position(|d| filter.matches(d)) {
            Some(pos) => pos,
            None => return Ok((0, 0)),
        };

        // The in-memory vector only keeps a change once the rewrite
        // has landed on disk; a failed persist restores the prior
        // document so reads never serve a write the caller saw fail.
        let mut updated = docs[pos].clone();
        let was_modified = apply_update(&mut updated, update)?;
        if was_modified {
            let prior = std::mem::replace(&mut docs[pos], updated);
            if let Err(err) = self.persist(&docs) {
                docs[pos] = prior;
                return Err(err);
            }
        }

        trace!(
            collection = %self.name,
            matched = 1u64,
            modified = was_modified as u64,
            "update_one"
        );
        Ok((1, was_modified as u64))
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Rewrite the collection file: write to a sibling temp file, then
    /// rename over the old one so readers never see a half-written file.
    fn persist(&self, docs: &[Document]) -> Result<()> {
        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut out = BufWriter::new(File::create(&tmp)?);
            for doc in docs {
                serde_json::to_writer(&mut out, &ext_json::to_value(doc))?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Apply an update payload to a document, returning whether any field
/// actually changed.
fn apply_update(document: &mut Document, update: &Value) -> Result<bool> {
    let ops = update
        .as_object()
        .ok_or_else(|| StoreError::InvalidUpdate("update must be a JSON object".to_string()))?;

    let mut was_modified = false;

    if ops.keys().any(|k| k.starts_with('$')) {
        for (op, fields) in ops {
            let field_values = fields.as_object().ok_or_else(|| {
                StoreError::InvalidUpdate(format!("{} expects an object of fields", op))
            })?;
            match op.as_str() {
                "$set" => {
                    for (field, value) in field_values {
                        was_modified |= set_field(document, field, value);
                    }
                }
                "$unset" => {
                    for field in field_values.keys() {
                        was_modified |= document.remove(field).is_some();
                    }
                }
                other => {
                    return Err(StoreError::InvalidUpdate(format!(
                        "unsupported operator '{}'",
                        other
                    )));
                }
            }
        }
    } else {
        // Bare document: merge fields, `_id` is immutable
        for (field, value) in ops {
            if field == "_id" {
                continue;
            }
            was_modified |= set_field(document, field, value);
        }
    }

    Ok(was_modified)
}

fn set_field(document: &mut Document, field: &str, value: &Value) -> bool {
    if document.get(field) == Some(value) {
        return false;
    }
    document.set(field.to_string(), value.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        let fields = match json!({ "index": 5, "label": "dog" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        Document::new(DocumentId::Int(1), fields)
    }

    #[test]
    fn test_apply_update_bare_merge() {
        let mut doc = sample();
        let modified = apply_update(&mut doc, &json!({ "label": "cat", "verified": true })).unwrap();
        assert!(modified);
        assert_eq!(doc.get("label"), Some(&json!("cat")));
        assert_eq!(doc.get("verified"), Some(&json!(true)));
        // Untouched fields survive a merge
        assert_eq!(doc.get("index"), Some(&json!(5)));
    }

    #[test]
    fn test_apply_update_is_idempotent() {
        let mut doc = sample();
        assert!(apply_update(&mut doc, &json!({ "label": "cat" })).unwrap());
        assert!(!apply_update(&mut doc, &json!({ "label": "cat" })).unwrap());
    }

    #[test]
    fn test_apply_update_set_unset() {
        let mut doc = sample();
        assert!(apply_update(&mut doc, &json!({ "$set": { "label": "cat" } })).unwrap());
        assert_eq!(doc.get("label"), Some(&json!("cat")));

        assert!(apply_update(&mut doc, &json!({ "$unset": { "label": "" } })).unwrap());
        assert!(!doc.contains("label"));

        // Unsetting a missing field modifies nothing
        assert!(!apply_update(&mut doc, &json!({ "$unset": { "label": "" } })).unwrap());
    }

    #[test]
    fn test_apply_update_ignores_id_in_merge() {
        let mut doc = sample();
        let modified = apply_update(&mut doc, &json!({ "_id": 99 })).unwrap();
        assert!(!modified);
        assert_eq!(doc.id, DocumentId::Int(1));
    }

    #[test]
    fn test_apply_update_rejects_unknown_operator() {
        let mut doc = sample();
        let err = apply_update(&mut doc, &json!({ "$inc": { "index": 1 } })).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUpdate(_)));

        let err = apply_update(&mut doc, &json!("nope")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUpdate(_)));
    }
}
