//! Warehouse Inventory Service Library
//!
//! This library crate defines the core modules of the inventory service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of two loosely coupled subsystems:
//!
//! - **`store`**: The persistence core. Owns the in-memory record collection,
//!   mirrors it into a single JSON document on disk with atomic
//!   write-temp-then-rename saves, and guarantees that concurrent API
//!   operations observe a consistent, durable view.
//! - **`api`**: The HTTP transport adapter. Maps REST verbs and paths onto
//!   store operations and serializes results into the wire envelope.

pub mod api;
pub mod store;
