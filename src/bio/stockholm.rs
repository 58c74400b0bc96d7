//! Minimal Stockholm scanning: only the `#=GS` per-sequence markup is read.

use crate::ConservationError;
use indexmap::IndexSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const SEQUENCE_MARKUP: &str = "#=GS";

/// Collect the sequence names declared by `#=GS` lines, in encounter order.
///
/// A sequence carrying several `#=GS` lines is listed once.
pub fn read_sequence_names<P: AsRef<Path>>(path: P) -> Result<IndexSet<String>, ConservationError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    scan_sequence_names(BufReader::new(file))
        .map_err(|e| match e {
            ConservationError::Parse(msg) => {
                ConservationError::Parse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
}

pub fn scan_sequence_names<R: BufRead>(reader: R) -> Result<IndexSet<String>, ConservationError> {
    let mut names = IndexSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.starts_with(SEQUENCE_MARKUP) {
            continue;
        }
        let name = line.split_whitespace().nth(1).ok_or_else(|| {
            ConservationError::Parse(format!(
                "line {}: {} markup without a sequence name",
                index + 1,
                SEQUENCE_MARKUP
            ))
        })?;
        names.insert(name.to_string());
    }

    Ok(names)
}
