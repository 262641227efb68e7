//! Error enum
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    ParseInt(std::num::ParseIntError),
    Custom(String),
    /// An explicit cache save refused to overwrite an existing file.
    CacheExists(PathBuf),
    /// The shard store has no shard under the requested id.
    UnknownShard(String),
    /// A record surfaced mid-resolution whose title was never registered.
    /// This is an internal bookkeeping bug, not bad input.
    UnregisteredTitle(String),
    /// Formatter lookup on a (title, line) pair that was never resolved.
    MissingEvidence { title: String, linum: usize },
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Error {
        Error::ParseInt(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
