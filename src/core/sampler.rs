use crate::bio::stockholm::read_sequence_names;
use crate::core::paths;
use crate::ConservationError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Pick `k` distinct names uniformly without replacement.
///
/// The same `names`, `k` and `seed` always give the same selection in the
/// same order.
pub fn sample_names(names: &[String], k: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    names.choose_multiple(&mut rng, k).cloned().collect()
}

/// Write a selection file for `esl-alimanip --seq-k` when the alignment
/// holds more than `max_seqs` sequences.
///
/// Returns `None` when no threshold is set (`None` or `0`) or the alignment
/// already fits, meaning the full alignment should be used downstream.
pub fn select_sequences(
    alignment: &Path,
    max_seqs: Option<usize>,
    seed: u64,
) -> Result<Option<PathBuf>, ConservationError> {
    let max_seqs = match max_seqs {
        Some(n) if n > 0 => n,
        _ => return Ok(None),
    };

    let names: Vec<String> = read_sequence_names(alignment)?.into_iter().collect();
    if names.len() <= max_seqs {
        debug!(
            "Alignment has {} sequences, within the limit of {}",
            names.len(),
            max_seqs
        );
        return Ok(None);
    }

    let selected = sample_names(&names, max_seqs, seed);
    let selection_file = paths::selection_path(alignment);
    write_selection(&selection_file, &selected)?;

    info!(
        "Sampled {} of {} sequences into {}",
        selected.len(),
        names.len(),
        selection_file.display()
    );
    Ok(Some(selection_file))
}

fn write_selection(path: &Path, names: &[String]) -> Result<(), ConservationError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for name in names {
        writeln!(writer, "{}", name)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_SAMPLING_SEED;
    use std::collections::HashSet;
    use tempfile::TempDir;
    use test_case::test_case;

    fn write_alignment(dir: &Path, count: usize) -> PathBuf {
        let mut text = String::from("# STOCKHOLM 1.0\n\n");
        for i in 0..count {
            text.push_str(&format!("#=GS seq{i}/1-10 DE hit {i}\n"));
        }
        text.push('\n');
        for i in 0..count {
            text.push_str(&format!("seq{i}/1-10 MKV-LAAGTW\n"));
        }
        text.push_str("//\n");

        let path = dir.join("query.fasta.sto");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test_case(5, 5 ; "threshold equal to count")]
    #[test_case(5, 10 ; "threshold above count")]
    #[test_case(0, 3 ; "empty alignment")]
    fn test_no_selection_when_alignment_fits(count: usize, max_seqs: usize) {
        let dir = TempDir::new().unwrap();
        let alignment = write_alignment(dir.path(), count);

        let selection = select_sequences(&alignment, Some(max_seqs), DEFAULT_SAMPLING_SEED).unwrap();
        assert_eq!(selection, None);
        assert!(!paths::selection_path(&alignment).exists());
    }

    #[test_case(None ; "unset")]
    #[test_case(Some(0) ; "zero")]
    fn test_sampling_skipped_without_threshold(max_seqs: Option<usize>) {
        // The alignment file is never opened when sampling is off.
        let missing = Path::new("/nonexistent/query.fasta.sto");
        assert_eq!(select_sequences(missing, max_seqs, 1).unwrap(), None);
    }

    #[test]
    fn test_selects_exactly_max_distinct_names() {
        let dir = TempDir::new().unwrap();
        let alignment = write_alignment(dir.path(), 20);

        let selection = select_sequences(&alignment, Some(7), DEFAULT_SAMPLING_SEED)
            .unwrap()
            .expect("alignment exceeds threshold");
        assert_eq!(selection, dir.path().join("query.fasta.sto.ss"));

        let content = std::fs::read_to_string(&selection).unwrap();
        assert!(content.ends_with('\n'));
        let names: Vec<&str> = content.lines().collect();
        assert_eq!(names.len(), 7);

        let distinct: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(distinct.len(), 7);
        for name in names {
            let index: usize = name
                .trim_start_matches("seq")
                .trim_end_matches("/1-10")
                .parse()
                .unwrap();
            assert!(index < 20);
        }
    }

    #[test]
    fn test_selection_is_reproducible() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let a = write_alignment(first.path(), 50);
        let b = write_alignment(second.path(), 50);

        let a = select_sequences(&a, Some(10), DEFAULT_SAMPLING_SEED).unwrap().unwrap();
        let b = select_sequences(&b, Some(10), DEFAULT_SAMPLING_SEED).unwrap().unwrap();

        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    #[test]
    fn test_sample_names_depends_on_seed() {
        let names: Vec<String> = (0..100).map(|i| format!("s{i}")).collect();
        let a = sample_names(&names, 10, 666);
        let b = sample_names(&names, 10, 666);
        let c = sample_names(&names, 10, 667);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_missing_alignment_with_threshold_is_io_error() {
        let err = select_sequences(Path::new("/nonexistent/q.sto"), Some(5), 666).unwrap_err();
        assert!(matches!(err, ConservationError::Io(_)));
    }
}
