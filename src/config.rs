/*! Run configuration.

Entry points receive every path they touch through a [Config]: there are no
ambient corpus or dataset locations baked into the core logic.
!*/
use std::path::{Path, PathBuf};

use crate::shard::{CorpusDir, SHARD_TOTAL};

#[derive(Debug, Clone)]
pub struct Config {
    corpus_dir: PathBuf,
    cache_path: Option<PathBuf>,
    dataset_path: Option<PathBuf>,
    shard_count: usize,
}

impl Config {
    pub fn new(
        corpus_dir: PathBuf,
        cache_path: Option<PathBuf>,
        dataset_path: Option<PathBuf>,
    ) -> Self {
        Self {
            corpus_dir,
            cache_path,
            dataset_path,
            shard_count: SHARD_TOTAL,
        }
    }

    /// Override the shard file count (the full dump has [SHARD_TOTAL]).
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Get a reference to the config's corpus directory.
    pub fn corpus_dir(&self) -> &Path {
        self.corpus_dir.as_path()
    }

    /// Get a reference to the config's summary cache path.
    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    /// Get a reference to the config's dataset path.
    pub fn dataset_path(&self) -> Option<&Path> {
        self.dataset_path.as_deref()
    }

    /// Get the config's shard count.
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Shard store over the configured corpus directory.
    pub fn store(&self) -> CorpusDir {
        CorpusDir::new(self.corpus_dir.clone(), self.shard_count)
    }
}
