//! Shard utils.
//!
//! A shard is one `wiki-NNN.jsonl` file holding a contiguous numbered slice
//! of the wiki dump, one JSON record per line.
//!
//! [reader::ShardReader] implements [Iterator] over contained [record::ShardRecord],
//! yielding byte offsets alongside records so that an index can be built.
pub mod record;
pub mod store;

mod reader;

pub use reader::ShardReader;
pub use record::ShardRecord;
pub use store::{CorpusDir, ShardStore};

/// Number of numbered shard files in the full wiki dump (`wiki-001.jsonl` to `wiki-109.jsonl`).
pub const SHARD_TOTAL: usize = 109;

/// Format a shard number as its zero-padded 3-digit id (`7` -> `"007"`).
pub fn shard_id(n: usize) -> String {
    format!("{:03}", n)
}
