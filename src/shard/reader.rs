/*! Offset-aware shard reading.

[ShardReader] wraps any `BufRead + Seek` source holding one JSON record per
line. Iterating yields `(byte offset, record)` pairs, where the offset points
exactly at the start of the record's line; [ShardReader::read_at] seeks back
to such an offset and parses the single record found there.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::error::Error;
use crate::shard::record::ShardRecord;

#[derive(Debug)]
pub struct ShardReader<T>
where
    T: BufRead + Seek,
{
    inner: T,
}

impl ShardReader<BufReader<File>> {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handle = File::open(src)?;
        Ok(Self::new(BufReader::new(handle)))
    }
}

impl<T> ShardReader<T>
where
    T: BufRead + Seek,
{
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Seek to `offset` and parse the single record starting there.
    ///
    /// `offset` must point at the start of a record line, typically one
    /// previously yielded by iteration.
    pub fn read_at(&mut self, offset: u64) -> Result<ShardRecord, Error> {
        self.inner.seek(SeekFrom::Start(offset))?;
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(Error::Custom(format!(
                "offset {} is past the end of the shard",
                offset
            )));
        }
        serde_json::from_str(line.trim_end()).map_err(Error::Serde)
    }
}

impl<T> Iterator for ShardReader<T>
where
    T: BufRead + Seek,
{
    type Item = Result<(u64, ShardRecord), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        // record the position before reading: it is the record's offset.
        let offset = match self.inner.stream_position() {
            Ok(offset) => offset,
            Err(e) => return Some(Err(Error::Io(e))),
        };

        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(
                serde_json::from_str(line.trim_end())
                    .map(|record| (offset, record))
                    .map_err(Error::Serde),
            ),
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn gen_shard() -> String {
        let mut ret = String::new();
        for i in 0..5 {
            ret.push_str(&format!(
                r#"{{"id":"Page_{i}","text":"text {i}","lines":"0\tsentence {i}"}}"#,
            ));
            ret.push('\n');
        }
        ret
    }

    #[test]
    fn test_iter() {
        let sr = ShardReader::new(Cursor::new(gen_shard()));
        let records: Vec<_> = sr.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].0, 0);
        assert_eq!(records[3].1.title(), "Page_3");
    }

    #[test]
    fn test_offsets_point_at_records() {
        let data = gen_shard();
        let offsets: Vec<_> = ShardReader::new(Cursor::new(data.clone()))
            .map(|r| r.unwrap())
            .collect();

        let mut sr = ShardReader::new(Cursor::new(data));
        // read back in reverse order to exercise seeking
        for (offset, record) in offsets.iter().rev() {
            let reread = sr.read_at(*offset).unwrap();
            assert_eq!(&reread, record);
        }
    }

    #[test]
    fn test_read_past_end() {
        let mut sr = ShardReader::new(Cursor::new(gen_shard()));
        assert!(sr.read_at(1 << 20).is_err());
    }

    #[test]
    fn test_malformed_line() {
        let mut sr = ShardReader::new(Cursor::new("not json\n"));
        assert!(sr.next().unwrap().is_err());
    }
}
