//! Custom extractors for Axum handlers.
//!
//! Every extractor here rejects with [`crate::errors::AppError`] so that
//! malformed input produces the same error body as domain failures.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
