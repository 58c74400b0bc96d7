use crate::bio::sequence::QuerySequence;
use crate::ConservationError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a single-record FASTA file holding the query sequence.
pub fn read_query_fasta<P: AsRef<Path>>(path: P) -> Result<QuerySequence, ConservationError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_query(BufReader::new(file)).map_err(|e| match e {
        ConservationError::InvalidInput(msg) => {
            ConservationError::InvalidInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse a query FASTA held in memory.
pub fn parse_query_from_bytes(data: &[u8]) -> Result<QuerySequence, ConservationError> {
    parse_query(data)
}

fn parse_query<R: BufRead>(reader: R) -> Result<QuerySequence, ConservationError> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?.trim_end().to_string(),
        None => {
            return Err(ConservationError::InvalidInput(
                "FASTA file is empty".to_string(),
            ))
        }
    };
    if !header.starts_with('>') {
        return Err(ConservationError::InvalidInput(format!(
            "FASTA header must start with '>', found {:?}",
            header
        )));
    }

    let mut residues = String::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.starts_with('>') {
            // Line numbers are 1-based and the header is line 1.
            return Err(ConservationError::InvalidInput(format!(
                "expected a single FASTA record, found a second header on line {}",
                index + 2
            )));
        }
        residues.push_str(line.trim_end());
    }

    Ok(QuerySequence::new(header, residues))
}
