//5
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// The five document keys the application persists under.
pub const USERS_KEY: &str = "sentience_all_users";
pub const RECORDS_KEY: &str = "sentience_records";
pub const LAST_ANALYSIS_KEY: &str = "sentience_last_analysis";
pub const LAST_CHECKIN_KEY: &str = "sentience_last_checkin";
pub const SESSION_KEY: &str = "sentience_user";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Port over the persistent key-value medium. Values are opaque strings;
/// the typed extension traits own the JSON encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// File-backed implementation: one `<key>.json` document per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    kv: Arc<dyn KeyValueStore>,
}

impl StoreClient {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        StoreClient { kv }
    }

    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let stored = self.kv.get_item(key).await?;
        match stored {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.kv.set_item(key, raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.kv.remove_item(key).await
    }

    pub async fn raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.kv.get_item(key).await
    }
}
