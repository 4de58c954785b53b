pub mod context;
pub mod store;

pub use context::SessionContext;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};
