mod backend;
mod core;
mod entries;
mod keys;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use self::core::Store;
pub use entries::{QuestionId, SavedAnswer};
pub use keys::{StorageKey, StorageTier};
