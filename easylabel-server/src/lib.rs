//! easylabel HTTP server - read and update labeled dataset records
//! held in the easylabel document store.

pub mod accessor;
pub mod config;
pub mod error;
pub mod routes;

// Re-export main types
pub use accessor::{DatasetAccessor, UpdateOutcome};
pub use config::Config;
pub use error::{ApiError, Result};
pub use routes::router;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "easylabel-server";
