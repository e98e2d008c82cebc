//! In-memory store
//!
//! Implements both repository traits over `BTreeMap`s behind one lock, so
//! every operation is atomic with respect to the others. Used when no
//! database is configured and by the service tests.

mod store;

pub use store::MemoryStore;
