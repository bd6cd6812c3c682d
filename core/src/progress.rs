use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::*;

/// Persisted document key: difficulty token -> best score, `{}` when absent.
pub const BEST_SCORES_KEY: &str = "kbw_best_scores";

/// Persisted document key: array of unlocked rule ids, `[]` when absent.
pub const UNLOCKED_RULES_KEY: &str = "kbw_unlocked_rules";

/// Storage medium for the progress documents: a string blob per fixed key.
/// The native stand-in for browser local storage.
pub trait BlobStore {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
}

/// Ephemeral store for tests and throwaway sessions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryBlobStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One file per key under a data directory.
#[derive(Clone, Debug, PartialEq)]
pub struct DirBlobStore {
    dir: PathBuf,
}

impl DirBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BlobStore for DirBlobStore {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Cross-round persistence contract. Both documents grow monotonically: best
/// scores only increase, the unlocked set only gains members.
pub trait ProgressStore {
    /// Adds the rule id to the unlocked set if absent. Idempotent.
    fn unlock(&mut self, rule_id: &str) -> std::result::Result<(), StoreError>;

    /// Best-for-difficulty becomes `max(existing, score)`.
    fn record_score(
        &mut self,
        difficulty: Difficulty,
        score: Score,
    ) -> std::result::Result<(), StoreError>;

    fn best(&self, difficulty: Difficulty) -> std::result::Result<Option<Score>, StoreError>;

    /// Unlocked ids in unlock order.
    fn unlocked_ids(&self) -> std::result::Result<Vec<String>, StoreError>;

    /// Unlocked rules resolved via the catalog; ids no longer in the catalog
    /// are skipped.
    fn unlocked_rules(&self) -> std::result::Result<Vec<&'static Rule>, StoreError> {
        Ok(self
            .unlocked_ids()?
            .iter()
            .filter_map(|id| rule_by_id(id))
            .collect())
    }
}

/// Progress documents kept as JSON in a blob store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Progress<B: BlobStore> {
    blobs: B,
}

impl<B: BlobStore> Progress<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub fn into_inner(self) -> B {
        self.blobs
    }

    fn load_best_scores(&self) -> std::result::Result<BTreeMap<Difficulty, Score>, StoreError> {
        match self.blobs.read(BEST_SCORES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn load_unlocked(&self) -> std::result::Result<Vec<String>, StoreError> {
        match self.blobs.read(UNLOCKED_RULES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

impl Progress<DirBlobStore> {
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirBlobStore::new(dir))
    }
}

impl Progress<MemoryBlobStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBlobStore::new())
    }
}

impl<B: BlobStore> ProgressStore for Progress<B> {
    fn unlock(&mut self, rule_id: &str) -> std::result::Result<(), StoreError> {
        let mut unlocked = self.load_unlocked()?;
        if unlocked.iter().any(|id| id == rule_id) {
            return Ok(());
        }
        unlocked.push(rule_id.to_owned());
        log::debug!("unlocked rule {rule_id}");
        self.blobs
            .write(UNLOCKED_RULES_KEY, &serde_json::to_string(&unlocked)?)
    }

    fn record_score(
        &mut self,
        difficulty: Difficulty,
        score: Score,
    ) -> std::result::Result<(), StoreError> {
        let mut bests = self.load_best_scores()?;
        match bests.get(&difficulty) {
            Some(&best) if best >= score => return Ok(()),
            _ => {}
        }
        bests.insert(difficulty, score);
        log::debug!("new best score for {}: {score}", difficulty.token());
        self.blobs
            .write(BEST_SCORES_KEY, &serde_json::to_string(&bests)?)
    }

    fn best(&self, difficulty: Difficulty) -> std::result::Result<Option<Score>, StoreError> {
        Ok(self.load_best_scores()?.get(&difficulty).copied())
    }

    fn unlocked_ids(&self) -> std::result::Result<Vec<String>, StoreError> {
        self.load_unlocked()
    }
}
