//! learningStore - persistent word-frequency model for category learning
//! Stores to: ./learned_words.json (see `Config::learning_file`)
//!
//! The whole document is read and rewritten on every access. A word graduates
//! into the category classifier once its count reaches `settings.threshold`.

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::fs_ops::{read_optional, write_json_file};

/// Category labels always present in a fresh store, in table order
pub const SEED_CATEGORIES: [&str; 5] = ["Work", "Study", "Home", "Health", "Fun"];

pub const DEFAULT_THRESHOLD: u64 = 5;

/// word -> occurrence count, in first-seen order
pub type WordCounts = IndexMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSettings {
    pub threshold: u64,
}

impl Default for LearningSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// On-disk learning document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningData {
    #[serde(default = "seed_categories")]
    pub learned_categories: IndexMap<String, WordCounts>,
    #[serde(default)]
    pub settings: LearningSettings,
}

fn seed_categories() -> IndexMap<String, WordCounts> {
    SEED_CATEGORIES
        .iter()
        .map(|name| (name.to_string(), WordCounts::new()))
        .collect()
}

impl Default for LearningData {
    fn default() -> Self {
        Self {
            learned_categories: seed_categories(),
            settings: LearningSettings::default(),
        }
    }
}

impl LearningData {
    pub fn threshold(&self) -> u64 {
        self.settings.threshold
    }

    /// Current count of `word` under `category` (0 when unseen)
    pub fn count(&self, category: &str, word: &str) -> u64 {
        self.learned_categories
            .get(category)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Add one occurrence of every word under `category`
    pub fn record<S: AsRef<str>>(&mut self, category: &str, words: &[S]) {
        let counts = self
            .learned_categories
            .entry(category.to_string())
            .or_default();
        for word in words {
            *counts.entry(word.as_ref().to_string()).or_insert(0) += 1;
        }
    }

    /// Learned words that currently count as classifier keywords,
    /// as (category, word, count) in store order
    pub fn active_words(&self) -> Vec<(&str, &str, u64)> {
        let threshold = self.threshold();
        self.learned_categories
            .iter()
            .flat_map(|(category, words)| {
                words
                    .iter()
                    .filter(move |(_, count)| **count >= threshold)
                    .map(move |(word, &count)| (category.as_str(), word.as_str(), count))
            })
            .collect()
    }
}

/// How a load was satisfied. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Parsed from the persisted document
    Existing,
    /// No document existed; the seed shape was written out
    Created,
    /// The document was unparsable; seed shape used in memory only
    Recovered,
}

/// Handle to wherever learning data lives
pub trait LearningStore {
    fn load(&self) -> Result<(LearningData, LoadOutcome)>;

    fn save(&self, data: &LearningData) -> Result<()>;

    /// Load, apply `f`, save. Implementations may hold a lock across the
    /// whole sequence.
    fn modify(&self, f: &mut dyn FnMut(&mut LearningData)) -> Result<LearningData> {
        let (mut data, _) = self.load()?;
        f(&mut data);
        self.save(&data)?;
        Ok(data)
    }
}

/// JSON-file backed store
pub struct FileLearningStore {
    store_path: PathBuf,
    // guards each load-modify-save sequence within this process
    lock: Mutex<()>,
}

impl FileLearningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_store(&self) -> Result<(LearningData, LoadOutcome)> {
        let Some(bytes) = read_optional(&self.store_path)? else {
            let data = LearningData::default();
            self.write_store(&data)?;
            info!(path = %self.store_path.display(), "created learning store");
            return Ok((data, LoadOutcome::Created));
        };

        match serde_json::from_slice::<LearningData>(&bytes) {
            Ok(data) => Ok((data, LoadOutcome::Existing)),
            Err(e) => {
                warn!(
                    path = %self.store_path.display(),
                    error = %e,
                    "learning store is unreadable, using defaults"
                );
                Ok((LearningData::default(), LoadOutcome::Recovered))
            }
        }
    }

    fn write_store(&self, data: &LearningData) -> Result<()> {
        write_json_file(&self.store_path, data)?;
        debug!(path = %self.store_path.display(), "saved learning store");
        Ok(())
    }
}

impl LearningStore for FileLearningStore {
    fn load(&self) -> Result<(LearningData, LoadOutcome)> {
        let _guard = self.guard();
        self.read_store()
    }

    fn save(&self, data: &LearningData) -> Result<()> {
        let _guard = self.guard();
        self.write_store(data)
    }

    fn modify(&self, f: &mut dyn FnMut(&mut LearningData)) -> Result<LearningData> {
        let _guard = self.guard();
        let (mut data, _) = self.read_store()?;
        f(&mut data);
        self.write_store(&data)?;
        Ok(data)
    }
}

/// In-memory store for tests and embedding. Starts out "missing".
#[derive(Default)]
pub struct MemoryLearningStore {
    data: Mutex<Option<LearningData>>,
}

impl MemoryLearningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: LearningData) -> Self {
        Self {
            data: Mutex::new(Some(data)),
        }
    }

    /// Current contents without triggering creation
    pub fn snapshot(&self) -> Option<LearningData> {
        self.data
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LearningStore for MemoryLearningStore {
    fn load(&self) -> Result<(LearningData, LoadOutcome)> {
        let mut slot = self.data.lock().unwrap_or_else(|p| p.into_inner());
        match slot.as_ref() {
            Some(data) => Ok((data.clone(), LoadOutcome::Existing)),
            None => {
                let data = LearningData::default();
                *slot = Some(data.clone());
                Ok((data, LoadOutcome::Created))
            }
        }
    }

    fn save(&self, data: &LearningData) -> Result<()> {
        *self.data.lock().unwrap_or_else(|p| p.into_inner()) = Some(data.clone());
        Ok(())
    }
}
