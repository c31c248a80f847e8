use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{AppError, AppResult};

/// Raw string storage with browser `Storage` semantics.
pub trait StorageBackend {
    fn get_item(&self, name: &str) -> AppResult<Option<String>>;
    fn set_item(&self, name: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, name: &str) -> AppResult<()>;
}

/// In-process storage. A quota and a disabled switch reproduce the failure
/// modes browsers report (full storage, storage blocked by privacy settings).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(name, value)| name.len() + value.len())
            .sum()
    }

    fn ensure_enabled(&self) -> AppResult<()> {
        if self.disabled.get() {
            Err(AppError::StorageDisabled)
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, name: &str) -> AppResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.items.borrow().get(name).cloned())
    }

    fn set_item(&self, name: &str, value: &str) -> AppResult<()> {
        self.ensure_enabled()?;
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .items
                .borrow()
                .get(name)
                .map_or(0, |old| name.len() + old.len());
            let projected = self.used_bytes() - replaced + name.len() + value.len();
            if projected > quota {
                return Err(AppError::storage_quota(name));
            }
        }
        self.items
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, name: &str) -> AppResult<()> {
        self.ensure_enabled()?;
        self.items.borrow_mut().remove(name);
        Ok(())
    }
}

/// Storage persisted as a flat JSON object, rewritten on every mutation.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens `path`; a missing file starts empty, an unreadable one is
    /// replaced on the next write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() && !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "storage path is not a regular file: {}",
                path.display()
            )));
        }

        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "Discarding corrupt storage file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(AppError::io_with_context(
                    source,
                    format!("failed to read storage: {}", path.display()),
                ));
            }
        };

        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(&*self.items.borrow())
            .map_err(|source| AppError::serialize(self.path.display().to_string(), source))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| {
                AppError::io_with_context(
                    source,
                    format!("failed to create storage dir: {}", parent.display()),
                )
            })?;
        }
        fs::write(&self.path, raw).map_err(|source| {
            AppError::io_with_context(
                source,
                format!("failed to write storage: {}", self.path.display()),
            )
        })
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, name: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(name).cloned())
    }

    fn set_item(&self, name: &str, value: &str) -> AppResult<()> {
        let previous = self
            .items
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            let mut items = self.items.borrow_mut();
            match previous {
                Some(previous) => items.insert(name.to_string(), previous),
                None => items.remove(name),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, name: &str) -> AppResult<()> {
        let Some(previous) = self.items.borrow_mut().remove(name) else {
            return Ok(());
        };
        if let Err(err) = self.flush() {
            self.items.borrow_mut().insert(name.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}
