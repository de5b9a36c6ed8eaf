use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state storage is unavailable")]
    Unavailable,
    #[error("state file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("state file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("state could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// A flat TOML table on disk, re-read on every access.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    /// A store at `path`; `None` yields a store whose every access fails
    /// with [`StoreError::Unavailable`].
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn read_table(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::Unavailable)?;
        let mut table = Self::read_table(path)?;
        Ok(table.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::Unavailable)?;
        // A corrupt file is overwritten rather than blocking every later write.
        let mut table = match Self::read_table(path) {
            Err(StoreError::Parse(e)) => {
                debug!("discarding unreadable state file {}: {e}", path.display());
                BTreeMap::new()
            }
            other => other?,
        };
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(&table)?)?;
        Ok(())
    }
}

/// In-memory store; `failing` makes every access error out.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub(crate) entries: BTreeMap<String, String>,
    pub failing: bool,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
