//! Inventory API Module
//!
//! The HTTP transport adapter: maps verbs and paths onto store operations
//! and serializes results into the wire envelope.
//!
//! ## Endpoints
//! - `GET    /api/items`      — list every record (reloads from disk first).
//! - `POST   /api/items`      — create a record; requires `item_id` and `item_name`.
//! - `PUT    /api/items/:id`  — shallow-merge fields onto the record with that backend id.
//! - `DELETE /api/items/:id`  — remove the record with that backend id.
//!
//! Handlers hold no state of their own; the shared store arrives through an
//! axum `Extension`.

pub mod handlers;
pub mod protocol;

#[cfg(test)]
mod tests;
