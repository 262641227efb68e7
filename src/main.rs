//! # Feverio
//!
//! Feverio indexes the FEVER wiki dump (many `wiki-NNN.jsonl` shards) and
//! resolves claim evidence references into sentence text.
//!
//! This project can be used as a tool to build the title caches and dump
//! evidence sentences, or as a lib to integrate indexed line retrieval
//! into other projects.
//!
//! ## Getting started
//!
//! ```sh
//! feverio 0.1.0
//! indexed retrieval for the FEVER wiki corpus.
//!
//! USAGE:
//!     feverio <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     evidence    Resolve and print evidence sentences for a dataset
//!     help        Prints this message or the help of the given subcommand(s)
//!     index       Scan the corpus and persist the title caches
//! ```
//!
use std::path::Path;

use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

use feverio::config::Config;
use feverio::error::Error;
use feverio::index::{self, TitleIndex};
use feverio::resolve::{self, LineRequests};
use feverio::{dataset, format};

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Feverio::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Feverio::Index(i) => {
            let cfg = Config::new(i.corpus_dir, Some(i.cache_path), None)
                .with_shard_count(i.shard_count);
            run_index(&cfg, i.offsets_path.as_deref())?;
        }
        cli::Feverio::Evidence(e) => {
            let cfg = Config::new(e.corpus_dir, e.offsets_path, Some(e.dataset))
                .with_shard_count(e.shard_count);
            run_evidence(&cfg, e.instances, e.prepend_linum, e.prepend_title)?;
        }
    };
    Ok(())
}

/// Scan every shard once and persist the summary cache (and, optionally,
/// the pointer index). Refuses to overwrite existing cache files.
fn run_index(cfg: &Config, offsets_path: Option<&Path>) -> Result<(), Error> {
    let cache_path = cfg
        .cache_path()
        .ok_or_else(|| Error::Custom("no cache path configured".to_string()))?;
    let store = cfg.store();

    let (pointers, summaries) = index::scan(&store, cfg.shard_count())?;
    summaries.save(cache_path)?;
    info!(
        "saved summary cache ({} titles) to {:?}",
        summaries.len(),
        cache_path
    );

    if let Some(path) = offsets_path {
        pointers.save(path)?;
        info!(
            "saved pointer index ({} titles) to {:?}",
            pointers.len(),
            path
        );
    }
    Ok(())
}

/// Resolve the evidence of every loaded claim in one batch and print the
/// formatted sentences, one claim per block.
fn run_evidence(
    cfg: &Config,
    instances: Option<usize>,
    prepend_linum: bool,
    prepend_title: bool,
) -> Result<(), Error> {
    let dataset_path = cfg
        .dataset_path()
        .ok_or_else(|| Error::Custom("no dataset path configured".to_string()))?;
    let store = cfg.store();

    let claims = dataset::read_claims(dataset_path, instances)?;
    info!("loaded {} claims from {:?}", claims.len(), dataset_path);

    let index = match cfg.cache_path() {
        Some(path) if path.exists() => {
            info!("reading pointer index from {:?}", path);
            TitleIndex::load(path)?
        }
        cached => {
            let (index, _) = index::scan(&store, cfg.shard_count())?;
            if let Some(path) = cached {
                index.save(path)?;
            }
            index
        }
    };

    let requests: LineRequests = claims
        .iter()
        .map(|claim| {
            let pairs = claim
                .evidence_pairs()
                .into_iter()
                .map(|(title, linum)| (title, Some(linum)))
                .collect();
            (claim.id, pairs)
        })
        .collect();
    let resolved = resolve::resolve_lines(&requests, &index, &store)?;

    for claim in &claims {
        println!("{}\t{}", claim.id, claim.claim);
        // the formatter treats unresolved pairs as contract violations,
        // so only hand it the pairs that resolved
        let pairs: Vec<_> = claim
            .evidence_pairs()
            .into_iter()
            .filter(|(title, linum)| {
                resolved
                    .get(title)
                    .map_or(false, |lines| lines.contains_key(linum))
            })
            .collect();
        for sentence in format::format_evidence(&pairs, &resolved, prepend_linum, prepend_title)? {
            println!("\t{}", sentence);
        }
    }
    Ok(())
}
