//! Best-effort record persistence.
//!
//! Each store owns one [`RecordStore`] holding a single collection of keyed
//! records. In-memory state upstream is authoritative; these backends are a
//! cache that is re-hydrated once at startup. Backends: JSON file with atomic
//! writes, in-memory (tests), and a null store that accepts every write and
//! loads nothing (for environments without writable storage).

pub mod error;
pub mod file;
pub mod memory;
pub mod null;
pub mod store;

pub use {
    error::{Error, Result},
    file::JsonFileStore,
    memory::MemoryStore,
    null::NullStore,
    store::{Keyed, Record, RecordStore},
};
