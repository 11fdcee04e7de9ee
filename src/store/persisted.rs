//! File-backed record store.
//!
//! A `PersistedStore` holds the whole inventory in memory as an ordered
//! collection of records and mirrors it into one JSON document on disk.
//! Every operation takes the same exclusive lock for its critical section;
//! disk I/O happens while the lock is held, which bounds concurrent callers
//! by write latency but rules out torn reads of the collection. No lock is
//! held across an await point.

use super::error::{Result, StoreError};
use super::ident::{now_epoch_secs, IdGenerator};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A single inventory record: an open-ended JSON object.
pub type Record = Map<String, Value>;

/// Store-assigned unique key, immutable after creation.
pub const BACKEND_ID_FIELD: &str = "__backendId";
/// Creation time in epoch seconds, assigned once if absent.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Sole member of the persisted document.
const ITEMS_FIELD: &str = "items";
/// Fields a create request must carry.
const REQUIRED_FIELDS: &[&str] = &["item_id", "item_name"];

/// On-disk shape: `{ "items": [ ... ] }`.
#[derive(Serialize)]
struct Document<'a> {
    items: &'a [Record],
}

pub struct PersistedStore {
    items: Mutex<Vec<Record>>,
    path: PathBuf,
    ids: IdGenerator,
}

impl PersistedStore {
    /// Opens the store over `path`, initializing an empty document on disk
    /// if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            items: Mutex::new(Vec::new()),
            path: path.into(),
            ids: IdGenerator::new(),
        };
        {
            let mut items = store.items.lock();
            *items = store.load_from_disk();
        }
        store
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reloads from disk, then returns a copy of the collection. Listings
    /// go through this so they observe edits made to the backing file
    /// outside this process.
    pub fn list_all(&self) -> Vec<Record> {
        let mut items = self.items.lock();
        *items = self.load_from_disk();
        items.clone()
    }

    /// Copy of the in-memory collection without touching disk.
    pub fn snapshot(&self) -> Vec<Record> {
        self.items.lock().clone()
    }

    /// Validates a create request and appends it as a new record.
    pub fn create(&self, fields: Record) -> Result<Record> {
        for field in REQUIRED_FIELDS {
            if !fields.contains_key(*field) {
                return Err(StoreError::MissingFields);
            }
        }
        self.append(fields)
    }

    /// Appends a record, assigning `__backendId` and `timestamp` when the
    /// caller did not supply them, and persists the collection. A failed
    /// save rolls the append back so memory and disk never diverge on
    /// create.
    pub fn append(&self, mut record: Record) -> Result<Record> {
        if !record.contains_key(BACKEND_ID_FIELD) {
            record.insert(
                BACKEND_ID_FIELD.to_string(),
                Value::from(self.ids.next_id()),
            );
        }
        if !record.contains_key(TIMESTAMP_FIELD) {
            record.insert(TIMESTAMP_FIELD.to_string(), Value::from(now_epoch_secs()));
        }

        let mut items = self.items.lock();
        items.push(record.clone());
        if !self.write_document(&items) {
            items.pop();
            return Err(StoreError::Persistence);
        }
        Ok(record)
    }

    /// Shallow-merges `fields` onto the record with the given backend
    /// identifier: top-level keys present in `fields` overwrite, every
    /// other field survives untouched. Nested values are replaced wholesale,
    /// not merged.
    ///
    /// On a failed save the merge is retained in memory, so the caller sees
    /// "applied, durability unknown" rather than a rollback.
    pub fn merge_update(&self, backend_id: &str, fields: Record) -> Result<()> {
        let mut items = self.items.lock();
        let record = items
            .iter_mut()
            .find(|record| has_backend_id(record, backend_id))
            .ok_or(StoreError::NotFound)?;
        for (key, value) in fields {
            record.insert(key, value);
        }
        if !self.write_document(&items) {
            return Err(StoreError::Persistence);
        }
        Ok(())
    }

    /// Removes the record with the given backend identifier and persists
    /// the collection. A failed save retains the removal in memory, as with
    /// [`merge_update`](Self::merge_update).
    pub fn delete(&self, backend_id: &str) -> Result<()> {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|record| !has_backend_id(record, backend_id));
        if items.len() == before {
            return Err(StoreError::NotFound);
        }
        if !self.write_document(&items) {
            return Err(StoreError::Persistence);
        }
        Ok(())
    }

    /// Final save attempt, used at shutdown.
    pub fn flush(&self) -> bool {
        let items = self.items.lock();
        self.write_document(&items)
    }

    /// Reads the backing document. Missing file -> initialize it durably
    /// and start empty. Unreadable or malformed file -> start empty but
    /// leave the file on disk untouched for inspection.
    fn load_from_disk(&self) -> Vec<Record> {
        if !self.path.exists() {
            if !self.write_document(&[]) {
                tracing::error!(
                    "Failed to initialize backing file {}",
                    self.path.display()
                );
            }
            return Vec::new();
        }

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(
                    "Failed to read backing file {}: {}",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };

        match parse_document(&bytes) {
            Some(items) => items,
            None => {
                tracing::warn!(
                    "Backing file {} is not a well-formed document, serving an empty collection; the file is left in place",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Serializes the collection and writes it through a sibling temp path
    /// followed by a rename, so the canonical path always holds a complete
    /// document. Returns false on any failure.
    fn write_document(&self, items: &[Record]) -> bool {
        let doc = Document { items };
        let bytes = match serde_json::to_vec_pretty(&doc) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!("Failed to serialize document: {}", err);
                return false;
            }
        };

        let tmp = temp_path(&self.path);
        if let Err(err) = fs::write(&tmp, &bytes) {
            tracing::error!("Failed to write {}: {}", tmp.display(), err);
            return false;
        }
        if let Err(err) = fs::rename(&tmp, &self.path) {
            tracing::error!(
                "Failed to rename {} over {}: {}",
                tmp.display(),
                self.path.display(),
                err
            );
            return false;
        }
        true
    }
}

/// Accepts only the required shape: an object whose `items` member is an
/// array of objects. Anything else is treated as corrupt.
fn parse_document(bytes: &[u8]) -> Option<Vec<Record>> {
    let doc: Value = serde_json::from_slice(bytes).ok()?;
    let items = doc.as_object()?.get(ITEMS_FIELD)?.as_array()?;
    items.iter().map(|item| item.as_object().cloned()).collect()
}

fn has_backend_id(record: &Record, backend_id: &str) -> bool {
    record
        .get(BACKEND_ID_FIELD)
        .and_then(Value::as_str)
        .is_some_and(|id| id == backend_id)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
