/*! FEVER dataset reading.

Claim records come one JSON object per line. Beyond the claim text and
label, each record carries evidence groups: sets of annotations that
together support or refute the claim. Not-enough-info claims have `null`
page and line fields, which [Claim::evidence_pairs] skips.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// One evidence annotation: `[annotation id, evidence id, page, line]`,
/// any of which may be null.
pub type EvidenceEntry = (Option<u64>, Option<u64>, Option<String>, Option<usize>);

/// A claim record as found in `train.jsonl`/`dev.jsonl`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claim {
    pub id: u64,
    pub claim: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub verifiable: Option<String>,
    #[serde(default)]
    pub evidence: Vec<Vec<EvidenceEntry>>,
}

impl Claim {
    /// Distinct (title, line number) pairs across all evidence groups,
    /// in order of appearance. Entries without a page or line are skipped.
    pub fn evidence_pairs(&self) -> Vec<(String, usize)> {
        self.evidence
            .iter()
            .flatten()
            .filter_map(|(_, _, page, linum)| match (page, linum) {
                (Some(page), Some(linum)) => Some((page.clone(), *linum)),
                _ => None,
            })
            .unique()
            .collect()
    }
}

/// Read claim records from `path`, stopping after `max_instances` lines
/// when given (useful for debugging).
pub fn read_claims(path: &Path, max_instances: Option<usize>) -> Result<Vec<Claim>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut claims = Vec::new();
    for line in reader.lines() {
        claims.push(serde_json::from_str(&line?)?);
        if let Some(max) = max_instances {
            if claims.len() >= max {
                break;
            }
        }
    }
    Ok(claims)
}
