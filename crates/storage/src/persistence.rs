//! Data persistence layer
//!
//! This module provides versioned, checksummed storage for serializable state
//! such as the navigation layout restored after the process is killed.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Corruption detected
    #[error("Corruption detected: {0}")]
    Corruption(String),

    /// Version mismatch
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version
        expected: u32,
        /// Found version
        found: u32,
    },
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct VersionedState {
    /// Schema version
    version: u32,
    /// md5 of the serialized data
    checksum: String,
    /// The actual state data
    data: serde_json::Value,
}

impl VersionedState {
    fn new(version: u32, data: serde_json::Value) -> Result<Self> {
        let checksum = checksum(&data)?;
        Ok(Self {
            version,
            checksum,
            data,
        })
    }

    fn verify_checksum(&self) -> Result<()> {
        let computed = checksum(&self.data)?;
        if computed != self.checksum {
            return Err(PersistenceError::Corruption(format!(
                "Checksum mismatch: expected {}, got {}",
                self.checksum, computed
            )));
        }
        Ok(())
    }
}

fn checksum(data: &serde_json::Value) -> Result<String> {
    let json = serde_json::to_string(data)?;
    Ok(format!("{:x}", md5::compute(json)))
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Path to the persistence file
    pub path: PathBuf,
    /// Current schema version
    pub version: u32,
    /// Enable atomic writes with temp files
    pub atomic_writes: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("state.json"),
            version: 1,
            atomic_writes: true,
        }
    }
}

impl PersistenceConfig {
    /// Create a new configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set schema version
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Enable or disable atomic writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }
}

/// Storage backend for a single persisted value
#[async_trait]
pub trait StateStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Load the stored value, if any
    async fn load(&self) -> Result<Option<T>>;

    /// Replace the stored value
    async fn save(&self, state: &T) -> Result<()>;

    /// Remove the stored value
    async fn clear(&self) -> Result<()>;
}

/// File-backed store with a versioned, checksummed JSON envelope
#[derive(Debug)]
pub struct FileStore<T> {
    config: PersistenceConfig,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> FileStore<T> {
    /// Create a store for the configured file
    pub fn new(config: PersistenceConfig) -> Self {
        Self {
            config,
            _phantom: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Write atomically using temp file + rename
    async fn write_atomic(&self, contents: &str) -> Result<()> {
        let temp_path = self.config.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.config.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<T> StateStore<T> for FileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>> {
        let contents = match fs::read_to_string(&self.config.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let versioned: VersionedState = serde_json::from_str(&contents)?;
        versioned.verify_checksum()?;

        if versioned.version != self.config.version {
            return Err(PersistenceError::VersionMismatch {
                expected: self.config.version,
                found: versioned.version,
            });
        }

        Ok(Some(serde_json::from_value(versioned.data)?))
    }

    async fn save(&self, state: &T) -> Result<()> {
        let versioned = VersionedState::new(self.config.version, serde_json::to_value(state)?)?;
        let json = serde_json::to_string_pretty(&versioned)?;

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if self.config.atomic_writes {
            self.write_atomic(&json).await?;
        } else {
            fs::write(&self.config.path, json).await?;
        }

        debug!(path = %self.config.path.display(), "state written");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.config.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store
///
/// Values are kept serialized so loads behave like a real restore.
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: RwLock<Option<String>>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            data: RwLock::new(None),
            _phantom: PhantomData,
        }
    }
}

impl<T> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T> StateStore<T> for MemoryStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>> {
        match self.data.read().await.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, state: &T) -> Result<()> {
        let json = serde_json::to_string(state)?;
        *self.data.write().await = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.data.write().await = None;
        Ok(())
    }
}
