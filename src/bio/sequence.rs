use serde::{Deserialize, Serialize};

/// A single query protein read from a FASTA file.
///
/// `header` is the first line of the file with trailing whitespace removed
/// (the leading `>` is kept), `residues` the concatenation of every following
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuerySequence {
    pub header: String,
    pub residues: String,
}

impl QuerySequence {
    pub fn new(header: String, residues: String) -> Self {
        Self { header, residues }
    }

    /// Identifier: the first whitespace-delimited token of the header, without `>`.
    pub fn id(&self) -> &str {
        self.header
            .trim_start_matches('>')
            .split_whitespace()
            .next()
            .unwrap_or("")
    }

    /// Number of residues.
    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> impl Iterator<Item = char> + '_ {
        self.residues.chars()
    }
}
