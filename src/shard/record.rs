/*! Shard record and line-table parsing.
!*/
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// A single wiki document as stored in a shard.
///
/// - `id` is the page title, unique across the whole corpus,
///   with underscores in place of spaces (`Barack_Obama`).
/// - `text` is the lead text and may be empty.
/// - `lines` is a raw blob enumerating the extractable sentences:
///   newline-separated rows, each tab-separated as `linum<TAB>sentence<TAB>...`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShardRecord {
    id: String,
    text: String,
    lines: String,
}

impl ShardRecord {
    pub fn new(id: String, text: String, lines: String) -> Self {
        Self { id, text, lines }
    }

    /// Get the record's title (document id).
    pub fn title(&self) -> &str {
        self.id.as_ref()
    }

    /// Get the record's lead text.
    pub fn text(&self) -> &str {
        self.text.as_ref()
    }

    /// Get the record's raw line-table blob.
    pub fn lines(&self) -> &str {
        self.lines.as_ref()
    }

    /// Parse the line-table blob into a line number -> sentence mapping.
    ///
    /// A row is kept only if its first field is purely numeric:
    /// footer/markup rows with non-numeric leading tokens are expected
    /// structural noise and are skipped, as are rows truncated before
    /// their sentence field. Extra tab-separated fields are ignored.
    /// An empty blob yields an empty mapping.
    pub fn parse_lines(&self) -> HashMap<usize, String> {
        let mut parsed = HashMap::new();
        for row in self.lines.split('\n') {
            let mut fields = row.split('\t');
            let linum = match fields.next() {
                Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => f,
                _ => continue,
            };
            let sentence = match fields.next() {
                Some(s) => s,
                None => continue,
            };
            match linum.parse::<usize>() {
                Ok(linum) => parsed.insert(linum, sentence.to_string()),
                Err(_) => continue,
            };
        }
        parsed
    }
}
