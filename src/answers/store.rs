use atomic_write_file::AtomicWriteFile;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    Read { key: String, message: String },
    Write { key: String, message: String },
    Remove { key: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { key, message } => write!(f, "Failed to read '{}': {}", key, message),
            StoreError::Write { key, message } => {
                write!(f, "Failed to write '{}': {}", key, message)
            }
            StoreError::Remove { key, message } => {
                write!(f, "Failed to remove '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// String-keyed, string-valued persistent storage
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was removed
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// On-disk store: one file per key under `root`, replaced atomically
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Keys must be plain names so they stay inside `root`.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let plain = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        plain.then(|| self.root.join(key))
    }
}

fn invalid_key(key: &str) -> String {
    format!("'{}' is not a valid store key", key)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let read_error = |message: String| StoreError::Read {
            key: key.to_string(),
            message,
        };
        let path = self.path_for(key).ok_or_else(|| read_error(invalid_key(key)))?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_error = |message: String| StoreError::Write {
            key: key.to_string(),
            message,
        };
        let path = self.path_for(key).ok_or_else(|| write_error(invalid_key(key)))?;

        fs::create_dir_all(&self.root)
            .map_err(|e| write_error(format!("{}: {}", self.root.display(), e)))?;

        let mut file = AtomicWriteFile::open(&path)
            .map_err(|e| write_error(format!("{}: {}", path.display(), e)))?;
        file.write_all(value.as_bytes())
            .map_err(|e| write_error(format!("{}: {}", path.display(), e)))?;
        file.commit()
            .map_err(|e| write_error(format!("{}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let remove_error = |message: String| StoreError::Remove {
            key: key.to_string(),
            message,
        };
        let path = self.path_for(key).ok_or_else(|| remove_error(invalid_key(key)))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(remove_error(format!("{}: {}", path.display(), e))),
        }
    }
}

/// In-memory store; nothing survives the process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate previously persisted data
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Memory store that refuses writes and removals of one key
#[cfg(test)]
pub(crate) struct FailOnKey {
    pub(crate) inner: MemoryStore,
    key: &'static str,
}

#[cfg(test)]
impl FailOnKey {
    pub(crate) fn new(inner: MemoryStore, key: &'static str) -> Self {
        Self { inner, key }
    }
}

#[cfg(test)]
impl KeyValueStore for FailOnKey {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == self.key {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if key == self.key {
            return Err(StoreError::Remove {
                key: key.to_string(),
                message: "permission denied".to_string(),
            });
        }
        self.inner.remove(key)
    }
}
