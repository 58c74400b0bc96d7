//! Parser for the per-column reports of `esl-alistat --icinfo/--rinfo`.
//!
//! Both reports are fixed-width tables framed by `#` comment lines, `//`
//! terminators and `-----` rules. Every other non-blank line describes one
//! alignment column.

use crate::ConservationError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Whitespace-delimited field (0-based) holding the information content in `--icinfo` rows
pub const INFORMATION_CONTENT_FIELD: usize = 3;

/// Whitespace-delimited field (0-based) holding the gap frequency in `--rinfo` rows
pub const GAP_FREQUENCY_FIELD: usize = 5;

/// Per-column values, kept verbatim as the tool printed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnStatistics {
    pub information_content: Vec<String>,
    pub gap_frequency: Vec<String>,
}

impl ColumnStatistics {
    /// Number of information-content columns
    pub fn len(&self) -> usize {
        self.information_content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.information_content.is_empty()
    }
}

/// Whether `line` is a data row rather than header, footer, rule or blank.
pub fn is_column_row(line: &str) -> bool {
    let stripped = line.trim_start();
    !(line.starts_with('#') || line.starts_with('/') || stripped.starts_with('-') || stripped.is_empty())
}

/// Extract `field` from every data row of `reader`.
pub fn parse_column_field<R: BufRead>(reader: R, field: usize) -> Result<Vec<String>, ConservationError> {
    let mut values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if !is_column_row(&line) {
            continue;
        }
        let value = line.split_whitespace().nth(field).ok_or_else(|| {
            ConservationError::Parse(format!(
                "line {}: expected at least {} fields, found {:?}",
                index + 1,
                field + 1,
                line.trim()
            ))
        })?;
        values.push(value.to_string());
    }

    Ok(values)
}

fn read_column_field(path: &Path, field: usize) -> Result<Option<Vec<String>>, ConservationError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    parse_column_field(BufReader::new(file), field)
        .map(Some)
        .map_err(|e| match e {
            ConservationError::Parse(msg) => {
                ConservationError::Parse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
}

/// Read the information-content and residue reports.
///
/// Returns `None` when either report is missing, which happens whenever an
/// upstream stage produced no usable alignment.
pub fn read_statistics(
    information_content: &Path,
    residue_info: &Path,
) -> Result<Option<ColumnStatistics>, ConservationError> {
    let Some(information_content) = read_column_field(information_content, INFORMATION_CONTENT_FIELD)? else {
        return Ok(None);
    };
    let Some(gap_frequency) = read_column_field(residue_info, GAP_FREQUENCY_FIELD)? else {
        return Ok(None);
    };

    Ok(Some(ColumnStatistics {
        information_content,
        gap_frequency,
    }))
}
