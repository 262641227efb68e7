pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod index;
pub mod resolve;
pub mod shard;
