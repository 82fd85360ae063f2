use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("could not write key {0} to localStorage")]
    Write(String),
    #[error("could not remove key {0} from localStorage")]
    Remove(String),
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn save_raw(key: &str, value: &str) -> Result<(), StorageError> {
    let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
    storage
        .set_item(key, value)
        .map_err(|_| StorageError::Write(key.to_string()))
}

pub fn load_raw(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn remove_raw(key: &str) -> Result<(), StorageError> {
    let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
    storage
        .remove_item(key)
        .map_err(|_| StorageError::Remove(key.to_string()))
}

/// Durable home of the bearer token between page loads
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Token persisted raw in `localStorage` under a fixed key
#[derive(Debug, Clone)]
pub struct LocalTokenStorage {
    key: String,
}

impl LocalTokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        load_raw(&self.key).filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        save_raw(&self.key, token)
    }

    fn clear(&self) -> Result<(), StorageError> {
        remove_raw(&self.key)
    }
}
