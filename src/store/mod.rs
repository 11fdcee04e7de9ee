//! Inventory Persistence Module
//!
//! Owns the record collection and the single JSON document that backs it.
//!
//! ## Core Concepts
//! - **Records**: open-ended JSON objects keyed by a store-assigned `__backendId`.
//! - **Durability**: every mutation rewrites the whole backing document through a
//!   write-temp-then-rename, so a concurrent or crashing reader never observes
//!   a partially written file.
//! - **Fail-soft loading**: a malformed backing file is preserved on disk for
//!   inspection and served as an empty collection instead of crashing the service.
//! - **Freshness**: listings reload from disk before answering, tolerating edits
//!   made to the backing file by other processes.

pub mod error;
pub mod ident;
pub mod persisted;
