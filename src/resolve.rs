/*! Batched line resolution.

Given many claims that each reference evidence as (title, line number)
pairs, [resolve_lines] fetches the sentence text behind every pair while
opening each shard at most once:

- distinct titles are looked up in the [TitleIndex] and their byte offsets
  grouped per shard,
- per shard, offsets are visited deduplicated and in ascending order, so
  seeking is forward-only over a single pass,
- every numeric line of a visited record is kept, not only the requested
  ones, so callers index into the result afterward.

A requested title absent from the index is a property of the input: it is
logged and skipped. A visited record whose title was never registered is a
bookkeeping bug and fails the whole batch.
!*/
use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::{debug, warn};

use crate::error::Error;
use crate::index::TitleIndex;
use crate::shard::{ShardReader, ShardStore};

/// Evidence requests, grouped by claim id. A `None` line number is the
/// "unspecified" sentinel: the title's lines are fetched without singling
/// one out.
pub type LineRequests = HashMap<u64, Vec<(String, Option<usize>)>>;

/// title -> (line number -> sentence text), rebuilt per invocation.
pub type ResolvedLines = HashMap<String, HashMap<usize, String>>;

/// Resolve every requested title's line table, visiting each shard at
/// most once.
pub fn resolve_lines<S: ShardStore>(
    requests: &LineRequests,
    index: &TitleIndex,
    store: &S,
) -> Result<ResolvedLines, Error> {
    // step 1: distinct titles, located or reported
    let titles: HashSet<&str> = requests
        .values()
        .flatten()
        .map(|(title, _)| title.as_str())
        .collect();

    let mut registered: HashSet<&str> = HashSet::with_capacity(titles.len());
    let mut by_shard: HashMap<&str, Vec<u64>> = HashMap::new();
    for title in &titles {
        match index.get(title) {
            Some(loc) => {
                registered.insert(title);
                by_shard.entry(loc.shard_id()).or_default().push(loc.offset());
            }
            None => warn!("{} not in the title index!", title),
        }
    }
    if registered.len() < titles.len() {
        warn!("mismatch: {} / {}", titles.len() - registered.len(), titles.len());
    }

    // steps 2-5: one pass per shard, offsets sorted for forward-only seeking
    let mut resolved = ResolvedLines::with_capacity(registered.len());
    for (shard, offsets) in by_shard {
        let offsets: Vec<u64> = offsets.into_iter().sorted().dedup().collect();
        debug!("shard {}: {} records to visit", shard, offsets.len());

        let mut reader = ShardReader::new(store.open(shard)?);
        for offset in offsets {
            let record = reader.read_at(offset)?;
            if !registered.contains(record.title()) {
                return Err(Error::UnregisteredTitle(record.title().to_string()));
            }
            resolved.insert(record.title().to_string(), record.parse_lines());
        }
    }
    Ok(resolved)
}

/// Resolve the line tables of a plain list of titles (no claim grouping,
/// no specific line numbers).
pub fn resolve_titles<S: ShardStore>(
    titles: &[String],
    index: &TitleIndex,
    store: &S,
) -> Result<ResolvedLines, Error> {
    let requests: LineRequests = std::iter::once((
        0,
        titles.iter().map(|title| (title.clone(), None)).collect(),
    ))
    .collect();
    resolve_lines(&requests, index, store)
}
