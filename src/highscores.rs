//! Best-score storage
//!
//! A single integer under a fixed key. The session receives a store instead of
//! reaching for LocalStorage itself, so tests and the native runner can use
//! `MemoryStore`.

use thiserror::Error;

/// Storage failures. None of these are fatal to the game.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    WriteRejected(String),
    #[error("stored high score {0:?} is not a valid score")]
    Corrupt(String),
}

/// Read/write access to the persisted best score
pub trait HighScoreStore {
    /// Stored score, `Ok(None)` if nothing has been saved yet
    fn load(&self) -> Result<Option<u32>, StoreError>;
    /// Overwrite the stored score
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

/// Load the best score, falling back to 0 when missing or unreadable
pub fn load_or_default<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(Some(score)) => {
            log::info!("Loaded high score {}", score);
            score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Ignoring stored high score: {}", e);
            0
        }
    }
}

/// Parse the stored string form of a score
pub fn parse_score(raw: &str) -> Result<u32, StoreError> {
    serde_json::from_str::<u32>(raw.trim()).map_err(|_| StoreError::Corrupt(raw.to_string()))
}

/// String form written to storage
pub fn encode_score(score: u32) -> String {
    score.to_string()
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(self.key) {
            Ok(Some(raw)) => parse_score(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(self.key, &encode_score(score))
            .map_err(|e| StoreError::WriteRejected(format!("{:?}", e)))?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose backend is always broken
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Corrupt("NaN".to_string()))
        }

        fn save(&mut self, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("42").unwrap(), 42);
        assert_eq!(parse_score(" 7\n").unwrap(), 7);
        assert!(parse_score("").is_err());
        assert!(parse_score("-3").is_err());
        assert!(parse_score("abc").is_err());
        assert!(parse_score("1.5").is_err());
    }

    #[test]
    fn test_encode_parses_back() {
        assert_eq!(parse_score(&encode_score(123)).unwrap(), 123);
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(load_or_default(&MemoryStore::new()), 0);
        assert_eq!(load_or_default(&MemoryStore::with_score(9)), 9);
        assert_eq!(load_or_default(&BrokenStore), 0);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.save(3).unwrap();
        store.save(5).unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.load().unwrap(), Some(5));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn HighScoreStore> = Box::new(MemoryStore::new());
        store.save(11).unwrap();
        assert_eq!(load_or_default(&store), 11);
    }
}
