//! ccapi Core Library
//!
//! Shared contract between the Cloud Controller v2 client and the in-memory
//! fake server: the document schema, the error taxonomy, the query filter
//! grammar and the resource kinds with their canonical paths.
//! This crate is used by both the client and the fake server.

pub mod documents;
pub mod error;
pub mod filter;
pub mod types;

// Re-export commonly used types
pub use error::*;
pub use filter::{FilterError, QueryFilter};
pub use types::*;
