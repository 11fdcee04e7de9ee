//! Store Error Taxonomy
//!
//! Errors surfaced by store operations to the transport layer. Display
//! strings double as the wire-level `error` member of API responses.
//!
//! A corrupt backing file is deliberately not represented here: loading
//! recovers from it in place (empty collection, original file preserved)
//! and reports through `tracing` rather than failing the operation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A create request did not carry every required field.
    #[error("missing fields")]
    MissingFields,

    /// No record carries the given backend identifier.
    #[error("not found")]
    NotFound,

    /// Writing the backing file failed. On create the in-memory append is
    /// rolled back; on update and delete the mutation is retained, so
    /// memory and disk may diverge until the next successful save.
    #[error("failed to save db")]
    Persistence,
}
