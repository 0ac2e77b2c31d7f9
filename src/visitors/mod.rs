// src/visitors/mod.rs
// =============================================================================
// Visitor counting.
//
// Submodules:
// - store:   the KeyValueStore trait with a file and an in-memory backend
// - counter: the count-once-per-session logic on top of two stores
//
// One process is one session: main() gives the counter a fresh MemoryStore
// as the session store and a FileStore in the data directory as the
// durable store.
// =============================================================================

mod counter;
mod store;

pub use counter::{peek, record_visit, VisitorCount};
pub use store::{FileStore, MemoryStore};
