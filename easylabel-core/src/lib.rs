// easylabel-core/src/lib.rs
// Embedded document store: schema-free documents addressed by an
// application-level index field, queried by field equality.

pub mod collection;
pub mod database;
pub mod document;
pub mod error;
pub mod ext_json;
pub mod filter;

// Public exports
pub use collection::Collection;
pub use database::Database;
pub use document::{Document, DocumentId};
pub use error::{Result, StoreError};
pub use filter::Filter;
