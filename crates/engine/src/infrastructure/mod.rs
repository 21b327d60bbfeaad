//! Infrastructure - storage ports and their adapters.

pub mod file_storage;
pub mod memory_storage;
pub mod ports;

pub use file_storage::FileStorage;
pub use memory_storage::InMemoryStorage;
pub use ports::{IdGenerator, StorageError, StoragePort};
