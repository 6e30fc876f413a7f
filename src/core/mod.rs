/// Core Module
///
/// Shared infrastructure for the rest of the crate: the exception taxonomy,
/// the error type built on it, dynamic argument values, and the
/// driver-manager environment layer.

pub mod db;
pub mod error;
pub mod taxonomy;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{OdbcError, Result};
pub use taxonomy::{ExceptionKind, Taxonomy};
pub use value::Value;
