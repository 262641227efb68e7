/*! Evidence formatting.

Turns resolved (title, line number) pairs into single strings suitable for
feeding a model or a reader, optionally prefixed with `# title # linum #`
markers.
!*/
use crate::error::Error;
use crate::resolve::ResolvedLines;

const SEP: &str = "#";

/// `"Barack_Obama"` -> `"Barack Obama"` (titles use underscore-as-space
/// encoding).
fn process_title(title: &str) -> String {
    title.replace('_', " ")
}

fn maybe_prepend(title: &str, linum: usize, prepend_linum: bool, prepend_title: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if prepend_title {
        parts.push(title.to_string());
    }
    if prepend_linum {
        parts.push(linum.to_string());
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("{0} {1} {0}", SEP, parts.join(&format!(" {} ", SEP)))
    }
}

/// Look up each (title, line number) pair in `resolved` and return one
/// formatted sentence per pair, in order.
///
/// Every referenced pair must have been resolved beforehand: a miss is a
/// caller contract violation and errors with [Error::MissingEvidence],
/// there is no fallback.
pub fn format_evidence(
    evidence: &[(String, usize)],
    resolved: &ResolvedLines,
    prepend_linum: bool,
    prepend_title: bool,
) -> Result<Vec<String>, Error> {
    evidence
        .iter()
        .map(|(title, linum)| {
            let sentence = resolved
                .get(title)
                .and_then(|lines| lines.get(linum))
                .ok_or_else(|| Error::MissingEvidence {
                    title: title.clone(),
                    linum: *linum,
                })?;
            let prefix = maybe_prepend(&process_title(title), *linum, prepend_linum, prepend_title);
            Ok(format!("{} {}", prefix, sentence).trim().to_string())
        })
        .collect()
}
