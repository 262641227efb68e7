/*! Title indexes.

One pass over the corpus produces two read-only indexes:

- [TitleIndex]: title -> [Location] (shard id + byte offset of the record),
  consumed by [crate::resolve] for seek-based line retrieval,
- [Summaries]: title -> lead text, restricted to records whose lead text is
  non-empty (empty-text records stay reachable through [TitleIndex]).

Both persist as tab-separated cache files. The scan itself performs no
writes: saving a cache is an explicit step, and it refuses to clobber an
existing file.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::Error;
use crate::shard::{shard_id, ShardReader, ShardStore};

/// Where a record lives in the corpus: shard id plus the byte offset
/// of the start of its JSON line in that shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    shard_id: String,
    offset: u64,
}

impl Location {
    pub fn new(shard_id: String, offset: u64) -> Self {
        Self { shard_id, offset }
    }

    /// Get a reference to the location's shard id.
    pub fn shard_id(&self) -> &str {
        self.shard_id.as_ref()
    }

    /// Get the location's byte offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// title -> [Location] pointer index over the whole corpus.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TitleIndex {
    entries: HashMap<String, Location>,
}

impl TitleIndex {
    pub fn get(&self, title: &str) -> Option<&Location> {
        self.entries.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save as `title<TAB>shard<TAB>offset` rows.
    ///
    /// Errors with [Error::CacheExists] if `dst` is already there.
    pub fn save(&self, dst: &Path) -> Result<(), Error> {
        let mut w = create_cache(dst)?;
        for (title, loc) in &self.entries {
            writeln!(w, "{}\t{}\t{}", title, loc.shard_id, loc.offset)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Load a previously saved pointer index.
    /// Trusted fast path: no revalidation against the shard files.
    pub fn load(src: &Path) -> Result<Self, Error> {
        let mut entries = HashMap::new();
        for line in BufReader::new(File::open(src)?).lines() {
            let line = line?;
            let mut fields = line.splitn(3, '\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(title), Some(shard), Some(offset)) => entries.insert(
                    title.to_string(),
                    Location::new(shard.to_string(), offset.parse()?),
                ),
                _ => {
                    return Err(Error::Custom(format!(
                        "malformed title index row: {:?}",
                        line
                    )))
                }
            };
        }
        Ok(Self { entries })
    }
}

/// title -> lead text summary index.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summaries {
    entries: HashMap<String, String>,
}

impl Summaries {
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save as `title<TAB>text` rows.
    ///
    /// Errors with [Error::CacheExists] if `dst` is already there.
    pub fn save(&self, dst: &Path) -> Result<(), Error> {
        let mut w = create_cache(dst)?;
        for (title, text) in &self.entries {
            writeln!(w, "{}\t{}", title, text)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Load a previously saved summary cache.
    /// Trusted fast path: no revalidation against the shard files.
    pub fn load(src: &Path) -> Result<Self, Error> {
        let mut entries = HashMap::new();
        for line in BufReader::new(File::open(src)?).lines() {
            let line = line?;
            match line.split_once('\t') {
                Some((title, text)) => entries.insert(title.to_string(), text.to_string()),
                None => {
                    return Err(Error::Custom(format!(
                        "malformed summary cache row: {:?}",
                        line
                    )))
                }
            };
        }
        Ok(Self { entries })
    }
}

fn create_cache(dst: &Path) -> Result<BufWriter<File>, Error> {
    if dst.exists() {
        return Err(Error::CacheExists(dst.to_path_buf()));
    }
    Ok(BufWriter::new(File::create(dst)?))
}

/// Scan shards `001..=shard_count` once, building both indexes.
///
/// Errors if any expected shard cannot be opened or parsed.
pub fn scan<S: ShardStore>(
    store: &S,
    shard_count: usize,
) -> Result<(TitleIndex, Summaries), Error> {
    let mut index = TitleIndex::default();
    let mut summaries = Summaries::default();

    for id in (1..=shard_count).map(shard_id) {
        let reader = ShardReader::new(store.open(&id)?);
        for entry in reader {
            let (offset, record) = entry?;
            index
                .entries
                .insert(record.title().to_string(), Location::new(id.clone(), offset));
            if !record.text().is_empty() {
                summaries
                    .entries
                    .insert(record.title().to_string(), record.text().to_string());
            }
        }
        debug!("scanned shard {} ({} titles so far)", id, index.len());
    }
    info!(
        "indexed {} titles ({} with summaries) across {} shards",
        index.len(),
        summaries.len(),
        shard_count
    );
    Ok((index, summaries))
}

/// Cached summary construction: load `cache_path` if it exists,
/// else scan the corpus and save the result there.
///
/// The branch is decided by an explicit existence check, so an unrelated
/// I/O failure while reading an existing cache propagates instead of
/// triggering a rescan.
pub fn build_or_load<S: ShardStore>(
    store: &S,
    shard_count: usize,
    cache_path: &Path,
) -> Result<Summaries, Error> {
    if cache_path.exists() {
        info!("reading summary cache from {:?}", cache_path);
        Summaries::load(cache_path)
    } else {
        info!("constructing summary cache at {:?}", cache_path);
        let (_, summaries) = scan(store, shard_count)?;
        summaries.save(cache_path)?;
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::store::memory::MemoryStore;

    fn gen_store() -> MemoryStore {
        let mut store = MemoryStore::default();
        store.insert(
            "001",
            concat!(
                r#"{"id":"Page_A","text":"summary of A","lines":"0\ta0\n1\ta1"}"#,
                "\n",
                r#"{"id":"Empty_Page","text":"","lines":""}"#,
                "\n",
            ),
        );
        store.insert(
            "002",
            concat!(r#"{"id":"Page_B","text":"summary of B","lines":"0\tb0"}"#, "\n"),
        );
        store
    }

    #[test]
    fn test_scan() {
        let store = gen_store();
        let (index, summaries) = scan(&store, 2).unwrap();

        assert_eq!(index.len(), 3);
        let loc = index.get("Page_B").unwrap();
        assert_eq!(loc.shard_id(), "002");
        assert_eq!(loc.offset(), 0);
        assert!(index.get("Page_A").unwrap().offset() == 0);
        assert!(index.get("Empty_Page").unwrap().offset() > 0);

        // empty-text records are indexed but not summarized
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries.get("Page_A"), Some("summary of A"));
        assert_eq!(summaries.get("Empty_Page"), None);
    }

    #[test]
    fn test_scan_missing_shard() {
        let store = gen_store();
        assert!(scan(&store, 3).is_err());
    }

    #[test]
    fn test_scan_idempotent() {
        let store = gen_store();
        let first = scan(&store, 2).unwrap();
        let second = scan(&store, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let store = gen_store();
        let (index, summaries) = scan(&store, 2).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("summaries.tsv");
        summaries.save(&cache).unwrap();
        match summaries.save(&cache) {
            Err(Error::CacheExists(p)) => assert_eq!(p, cache),
            other => panic!("expected CacheExists, got {:?}", other),
        }

        let offsets = dir.path().join("offsets.tsv");
        index.save(&offsets).unwrap();
        assert!(matches!(index.save(&offsets), Err(Error::CacheExists(_))));
    }

    #[test]
    fn test_cache_roundtrip() {
        let store = gen_store();
        let (index, summaries) = scan(&store, 2).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let summary_cache = dir.path().join("summaries.tsv");
        summaries.save(&summary_cache).unwrap();
        assert_eq!(Summaries::load(&summary_cache).unwrap(), summaries);

        let offset_cache = dir.path().join("offsets.tsv");
        index.save(&offset_cache).unwrap();
        assert_eq!(TitleIndex::load(&offset_cache).unwrap(), index);
    }

    #[test]
    fn test_build_or_load() {
        let store = gen_store();
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("summaries.tsv");

        // first call scans and writes the cache
        let built = build_or_load(&store, 2, &cache).unwrap();
        assert!(cache.is_file());
        assert_eq!(store.opens("001"), 1);

        // second call reads it back without touching the shards
        let loaded = build_or_load(&store, 2, &cache).unwrap();
        assert_eq!(store.opens("001"), 1);
        assert_eq!(built, loaded);
    }
}
