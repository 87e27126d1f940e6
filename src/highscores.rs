//! High score persistence
//!
//! A single best score stored as text under one key. Read once at startup,
//! written synchronously on every new best.

use crate::persistence::{KeyValueStore, MemoryStore};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "turkeyCatchHigh";

/// Parse a stored best score; anything missing or malformed counts as 0
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(score) = raw.parse::<u64>() {
        return score;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.floor() as u64,
        _ => {
            log::warn!("Ignoring corrupt high score {:?}", raw);
            0
        }
    }
}

/// Best score across rounds, backed by a key-value store
#[derive(Debug)]
pub struct HighScore {
    best: u64,
    store: Box<dyn KeyValueStore>,
}

impl HighScore {
    /// Load the best score from `store`, defaulting to 0
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best = parse_high_score(store.get_item(STORAGE_KEY).as_deref());
        log::info!("Loaded high score {}", best);
        Self { best, store }
    }

    /// Non-persistent high score (native runs, tests)
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished round's score
    ///
    /// Returns true if it set a new best. The value is written before
    /// returning; a failed write is logged and the in-memory best kept.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.set_item(STORAGE_KEY, &score.to_string()) {
            log::warn!("Failed to save high score {}: {}", score, e);
        } else {
            log::info!("New high score saved: {}", score);
        }
        true
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::StoreError;
    use proptest::prelude::*;

    /// Store that refuses every write
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            Some("4".to_string())
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score(None), 0);
        assert_eq!(parse_high_score(Some("")), 0);
        assert_eq!(parse_high_score(Some("17")), 17);
        assert_eq!(parse_high_score(Some(" 17\n")), 17);
        assert_eq!(parse_high_score(Some("17.0")), 17);
        assert_eq!(parse_high_score(Some("banana")), 0);
        assert_eq!(parse_high_score(Some("-3")), 0);
        assert_eq!(parse_high_score(Some("NaN")), 0);
    }

    #[test]
    fn test_load_defaults_to_zero() {
        assert_eq!(HighScore::in_memory().best(), 0);
        let corrupt = MemoryStore::with_item(STORAGE_KEY, "{oops}");
        assert_eq!(HighScore::load(Box::new(corrupt)).best(), 0);
    }

    #[test]
    fn test_submit_only_raises_and_persists() {
        let mut hs = HighScore::load(Box::new(MemoryStore::with_item(STORAGE_KEY, "10")));
        assert_eq!(hs.best(), 10);
        assert!(!hs.submit(10));
        assert!(!hs.submit(3));
        assert!(hs.submit(11));
        assert_eq!(hs.best(), 11);
        assert_eq!(hs.store().get_item(STORAGE_KEY).as_deref(), Some("11"));
    }

    #[test]
    fn test_failed_write_keeps_best_in_memory() {
        let mut hs = HighScore::load(Box::new(ReadOnlyStore));
        assert_eq!(hs.best(), 4);
        assert!(hs.submit(9));
        assert_eq!(hs.best(), 9);
    }

    proptest! {
        #[test]
        fn prop_best_is_running_max(scores in proptest::collection::vec(0u64..1000, 0..40)) {
            let mut hs = HighScore::in_memory();
            for &score in &scores {
                hs.submit(score);
            }
            let expected = scores.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(hs.best(), expected);
            let stored = parse_high_score(hs.store().get_item(STORAGE_KEY).as_deref());
            prop_assert_eq!(stored, expected);
        }
    }
}
