use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::backend::{MemoryStorage, StorageBackend};
use super::keys::{StorageKey, StorageTier};

/// Typed JSON view over the durable and session storage tiers.
///
/// Every entry is optional. Reads fall back to the caller's default and
/// writes are fire-and-forget: storage failures are logged and swallowed so
/// that a full or blocked storage never interrupts the page.
pub struct Store {
    durable: Rc<dyn StorageBackend>,
    session: Rc<dyn StorageBackend>,
}

impl Store {
    pub fn new(durable: Rc<dyn StorageBackend>, session: Rc<dyn StorageBackend>) -> Self {
        Self { durable, session }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()), Rc::new(MemoryStorage::new()))
    }

    fn backend(&self, key: StorageKey) -> &dyn StorageBackend {
        match key.tier() {
            StorageTier::Durable => self.durable.as_ref(),
            StorageTier::Session => self.session.as_ref(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let raw = match self.backend(key).get_item(key.name()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(key = key.name(), error = %err, "Storage read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.name(), error = %err, "Stored value is not valid, using default");
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key = key.name(), error = %err, "Value could not be serialized, not stored");
                return;
            }
        };

        match self.backend(key).set_item(key.name(), &raw) {
            Ok(()) => debug!(key = key.name(), bytes = raw.len(), "Stored entry"),
            Err(err) => warn!(key = key.name(), error = %err, "Storage write failed"),
        }
    }

    pub fn remove(&self, key: StorageKey) {
        if let Err(err) = self.backend(key).remove_item(key.name()) {
            warn!(key = key.name(), error = %err, "Storage remove failed");
        }
    }

    /// Removes every enumerated key from both tiers. Items written by anything
    /// else under other names are left alone.
    pub fn clear_all(&self) {
        for key in StorageKey::ALL {
            self.remove(key);
        }
        debug!("Cleared all stored entries");
    }
}
