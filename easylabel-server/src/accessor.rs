//! Dataset Accessor - translates the three dataset operations into
//! document-store queries against the data and metadata collections.
//!
//! One instance is constructed at startup and shared by `Arc` across
//! request handlers; it holds no state beyond the store handle and the
//! two collection names.

use easylabel_core::Database;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};

/// Outcome of an update-by-index: how many records the index matched
/// (0 or 1) and whether the write changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

pub struct DatasetAccessor {
    db: Database,
    data_collection: String,
    metadata_collection: String,
}

impl DatasetAccessor {
    pub fn new(
        db: Database,
        data_collection: impl Into<String>,
        metadata_collection: impl Into<String>,
    ) -> Self {
        DatasetAccessor {
            db,
            data_collection: data_collection.into(),
            metadata_collection: metadata_collection.into(),
        }
    }

    /// The dataset's descriptive document. Read-only; fails when no
    /// metadata has been seeded.
    pub fn get_metadata(&self) -> Result<Value> {
        let coll = self.db.collection(&self.metadata_collection)?;
        coll.find_one(&json!({}))?.ok_or(ApiError::MetadataNotFound)
    }

    /// The record whose `index` field equals the given integer, or
    /// `None` when no record matches.
    pub fn find_by_index(&self, index: i64) -> Result<Option<Value>> {
        let coll = self.db.collection(&self.data_collection)?;
        Ok(coll.find_one(&json!({ "index": index }))?)
    }

    /// Merge the payload's fields into the record with the given
    /// `index`. Zero matches is a success with both counts 0; the
    /// caller can tell "no such index" apart from "update no-op" by
    /// `matched_count`.
    pub fn update_by_index(&self, index: i64, document: Value) -> Result<UpdateOutcome> {
        if !document.is_object() {
            return Err(ApiError::InvalidUpdate(
                "update payload must be a JSON object".to_string(),
            ));
        }

        let coll = self.db.collection(&self.data_collection)?;
        let (matched_count, modified_count) =
            coll.update_one(&json!({ "index": index }), &document)?;
        Ok(UpdateOutcome {
            matched_count,
            modified_count,
        })
    }
}
