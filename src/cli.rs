//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "feverio", about = "indexed retrieval for the FEVER wiki corpus.")]
/// Holds every command that is callable by the `feverio` command.
pub enum Feverio {
    #[structopt(about = "Scan the corpus and persist the title caches")]
    Index(Index),
    #[structopt(about = "Resolve and print evidence sentences for a dataset")]
    Evidence(Evidence),
}

#[derive(Debug, StructOpt)]
/// Index command and parameters.
pub struct Index {
    #[structopt(parse(from_os_str), help = "directory holding the wiki-NNN.jsonl shards")]
    pub corpus_dir: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of the title/text summary cache")]
    pub cache_path: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "offsets",
        help = "also save the title/offset pointer index here"
    )]
    pub offsets_path: Option<PathBuf>,
    #[structopt(
        long = "shards",
        default_value = "109",
        help = "number of numbered shard files"
    )]
    pub shard_count: usize,
}

#[derive(Debug, StructOpt)]
/// Evidence command and parameters.
pub struct Evidence {
    #[structopt(parse(from_os_str), help = "dataset file (one claim record per line)")]
    pub dataset: PathBuf,
    #[structopt(parse(from_os_str), help = "directory holding the wiki-NNN.jsonl shards")]
    pub corpus_dir: PathBuf,
    #[structopt(short = "n", help = "number of claims to process. Default is all.")]
    pub instances: Option<usize>,
    #[structopt(
        parse(from_os_str),
        long = "offsets",
        help = "pointer index cache: loaded if present, created otherwise"
    )]
    pub offsets_path: Option<PathBuf>,
    #[structopt(long = "prepend-title", help = "prefix each sentence with its page title")]
    pub prepend_title: bool,
    #[structopt(long = "prepend-linum", help = "prefix each sentence with its line number")]
    pub prepend_linum: bool,
    #[structopt(
        long = "shards",
        default_value = "109",
        help = "number of numbered shard files"
    )]
    pub shard_count: usize,
}
