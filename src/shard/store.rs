/*! Shard sources.

[ShardStore] is the seam between shard consumers and shard storage: index
building and line resolution only ever ask a store to open a shard by id.
[CorpusDir] is the on-disk store over a `wiki-NNN.jsonl` directory; tests
use in-memory stores instead.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::PathBuf;

use crate::error::Error;
use crate::shard::shard_id;

pub trait ShardStore {
    type Shard: BufRead + Seek;

    /// Open the shard stored under `id` (zero-padded, e.g. `"042"`).
    fn open(&self, id: &str) -> Result<Self::Shard, Error>;
}

/// On-disk shard store: a directory of `wiki-NNN.jsonl` files
/// numbered `001..=shard_count`.
#[derive(Debug, Clone)]
pub struct CorpusDir {
    dir: PathBuf,
    shard_count: usize,
}

impl CorpusDir {
    pub fn new(dir: PathBuf, shard_count: usize) -> Self {
        Self { dir, shard_count }
    }

    /// Get the store's shard count.
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// Path of the shard file holding shard `id`.
    pub fn shard_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("wiki-{}.jsonl", id))
    }

    /// Ids of every shard the store is expected to hold, in numeric order.
    pub fn shard_ids(&self) -> impl Iterator<Item = String> {
        (1..=self.shard_count).map(shard_id)
    }
}

impl ShardStore for CorpusDir {
    type Shard = BufReader<File>;

    fn open(&self, id: &str) -> Result<Self::Shard, Error> {
        let path = self.shard_path(id);
        if !path.is_file() {
            return Err(Error::UnknownShard(id.to_string()));
        }
        Ok(BufReader::new(File::open(path)?))
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory store for tests, with an open counter per shard.
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;

    use super::{Error, ShardStore};

    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        shards: HashMap<String, Vec<u8>>,
        opens: RefCell<HashMap<String, usize>>,
    }

    impl MemoryStore {
        pub(crate) fn insert(&mut self, id: &str, content: &str) {
            self.shards.insert(id.to_string(), content.as_bytes().to_vec());
        }

        pub(crate) fn opens(&self, id: &str) -> usize {
            self.opens.borrow().get(id).copied().unwrap_or(0)
        }
    }

    impl ShardStore for MemoryStore {
        type Shard = Cursor<Vec<u8>>;

        fn open(&self, id: &str) -> Result<Self::Shard, Error> {
            let bytes = self
                .shards
                .get(id)
                .ok_or_else(|| Error::UnknownShard(id.to_string()))?;
            *self.opens.borrow_mut().entry(id.to_string()).or_insert(0) += 1;
            Ok(Cursor::new(bytes.clone()))
        }
    }
}
