//! Local persistence for DIRS
//!
//! Provides:
//! - `KeyValueStore`, the injected get/set/delete backend seam
//! - In-memory and file-backed backends
//! - `DirsStore`, typed accessors for the five named slots

mod backend;
mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    Absent, Clock, DirsStore, FixedClock, Lookup, Slot, SystemClock, RESULTS_HISTORY_LIMIT,
};
