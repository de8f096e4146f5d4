//! Best-score persistence.
//!
//! The only thing a session ever persists is one integer. Failing to read it
//! means "no best recorded"; failing to write it is logged and skipped.

use log::warn;
use thiserror::Error;

#[cfg(feature = "serde")]
use std::collections::BTreeMap;
#[cfg(feature = "serde")]
use std::path::PathBuf;

pub const BEST_SCORE_KEY: &str = "best2048_5x5";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("could not parse stored score {0:?}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub trait BestScoreStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, StorageError>;

    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

pub fn load_best(store: &dyn BestScoreStore) -> u32 {
    match store.load() {
        Ok(best) => best.unwrap_or(0),
        Err(e) => {
            warn!("Could not read best score: {}", e);
            0
        }
    }
}

pub fn save_best(store: &mut dyn BestScoreStore, score: u32) {
    if let Err(e) = store.save(score) {
        warn!("Could not store best score {}: {}", score, e);
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    best: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self { best: Some(best) }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.best = Some(score);
        Ok(())
    }
}

/// A store that always fails, standing in for disabled storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl BestScoreStore for UnavailableStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn save(&mut self, _score: u32) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// JSON object on disk, one entry under [`BEST_SCORE_KEY`]. Other keys in
/// the file are preserved on write.
#[cfg(feature = "serde")]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(feature = "serde")]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, serde_json::Value>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        let entries = self.read_entries()?;

        match entries.get(BEST_SCORE_KEY) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|_| StorageError::Parse(value.to_string())),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;

        entries.insert(BEST_SCORE_KEY.to_string(), score.into());
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;

        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(feature = "wasm")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(feature = "wasm")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;

        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

#[cfg(feature = "wasm")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        let raw = Self::storage()?
            .get_item(BEST_SCORE_KEY)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?;

        match raw {
            None => Ok(None),
            Some(text) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| StorageError::Parse(text)),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(BEST_SCORE_KEY, &score.to_string())
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}
