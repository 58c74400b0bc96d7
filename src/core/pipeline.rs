//! The conservation pipeline: search, optional subsampling, weighting,
//! statistics, and the per-residue feature tables.

use crate::bio::fasta::read_query_fasta;
use crate::bio::stockholm::read_sequence_names;
use crate::bio::QuerySequence;
use crate::core::config::{DEFAULT_FREQGAP_SUFFIX, DEFAULT_SAMPLING_SEED, DEFAULT_SENTINEL};
use crate::core::sampler::select_sequences;
use crate::core::stages::{self, StatisticsFiles};
use crate::core::paths;
use crate::report::{read_statistics, write_feature, ColumnStatistics};
use crate::tools::{HmmerSuite, HmmerTool, ToolExit, ToolRunner};
use crate::{ConservationError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Inputs of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub fasta_file: PathBuf,
    pub database_file: PathBuf,
    pub working_directory: PathBuf,
    pub target_file: PathBuf,
    /// Accepted for compatibility; has no effect yet
    pub msa: bool,
    /// Subsample alignments holding more sequences than this
    pub max_seqs: Option<usize>,
}

impl PipelineRequest {
    pub fn new(
        fasta_file: impl Into<PathBuf>,
        database_file: impl Into<PathBuf>,
        working_directory: impl Into<PathBuf>,
        target_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fasta_file: fasta_file.into(),
            database_file: database_file.into(),
            working_directory: working_directory.into(),
            target_file: target_file.into(),
            msa: false,
            max_seqs: None,
        }
    }

    pub fn with_max_seqs(mut self, max_seqs: Option<usize>) -> Self {
        self.max_seqs = max_seqs;
        self
    }

    pub fn with_msa(mut self, msa: bool) -> Self {
        self.msa = msa;
        self
    }
}

/// A tool that did not produce what the next stage needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    /// First tool that exited unsuccessfully, if any did
    pub tool: Option<HmmerTool>,
    pub exit: Option<ToolExit>,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.tool, self.exit.and_then(|e| e.code)) {
            (Some(tool), Some(code)) => write!(f, "{} exited with code {}", tool, code),
            (Some(tool), None) => write!(f, "{} was terminated by a signal", tool),
            (None, _) => write!(f, "all tools exited cleanly but no statistics were produced"),
        }
    }
}

/// What the statistics stage yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticsOutcome {
    /// Column statistics were recovered
    Success(ColumnStatistics),
    /// The search found no homologs, so there is nothing to score
    NoAlignment,
    /// Homologs were found but a later stage produced no statistics
    ToolFailure(ToolFailure),
}

impl StatisticsOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StatisticsOutcome::Success(_))
    }
}

/// Files touched by a run and how it ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub alignment: PathBuf,
    /// Selection file, present only when the alignment was subsampled
    pub selection: Option<PathBuf>,
    pub weighted_alignment: PathBuf,
    pub statistics: StatisticsFiles,
    pub feature_file: PathBuf,
    pub freqgap_file: PathBuf,
    pub residues: usize,
    pub outcome: StatisticsOutcome,
}

/// Orchestrates the HMMER tools for one query at a time.
///
/// Everything environment-dependent (tool prefix, seed) is fixed at
/// construction; the runner decides whether tools are real processes.
pub struct ConservationPipeline<R> {
    suite: HmmerSuite,
    runner: R,
    seed: u64,
    sentinel: String,
    freqgap_suffix: String,
}

impl<R: ToolRunner> ConservationPipeline<R> {
    pub fn new(suite: HmmerSuite, runner: R) -> Self {
        Self {
            suite,
            runner,
            seed: DEFAULT_SAMPLING_SEED,
            sentinel: DEFAULT_SENTINEL.to_string(),
            freqgap_suffix: DEFAULT_FREQGAP_SUFFIX.to_string(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_freqgap_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.freqgap_suffix = suffix.into();
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn suite(&self) -> &HmmerSuite {
        &self.suite
    }

    /// Run every stage for `request` and write both feature tables.
    pub fn run(&self, request: &PipelineRequest) -> Result<PipelineReport> {
        if request.msa {
            warn!("Option `--msa` is not yet implemented.");
        }

        let mut exits: Vec<(HmmerTool, ToolExit)> = Vec::new();

        let search = stages::generate_msa(
            &self.runner,
            &self.suite,
            &request.fasta_file,
            &request.database_file,
            &request.working_directory,
        )?;
        exits.push((HmmerTool::Phmmer, search.exit));
        let alignment = search.path;

        let selection = self.select(&alignment, request.max_seqs)?;
        let weighting_input = match &selection {
            Some(selection) => {
                let sample =
                    stages::generate_msa_sample(&self.runner, &self.suite, &alignment, selection)?;
                exits.push((HmmerTool::EslAlimanip, sample.exit));
                sample.path
            }
            None => alignment.clone(),
        };

        let weighted =
            stages::calculate_sequence_weights(&self.runner, &self.suite, &weighting_input)?;
        exits.push((HmmerTool::EslWeight, weighted.exit));

        let (statistics, alistat_exit) =
            stages::calculate_information_content(&self.runner, &self.suite, &weighted.path)?;
        exits.push((HmmerTool::EslAlistat, alistat_exit));

        let query = read_query_fasta(&request.fasta_file)?;
        debug!("Query {} has {} residues", query.id(), query.len());

        let columns = read_statistics(&statistics.information_content, &statistics.residue_info)?;
        let outcome = match columns {
            Some(columns) if !columns.is_empty() => StatisticsOutcome::Success(columns),
            _ => classify_missing_statistics(&alignment, &exits),
        };

        let freqgap_file = paths::with_suffix(&request.target_file, &self.freqgap_suffix);
        self.write_features(&query, &outcome, &request.target_file, &freqgap_file)?;

        Ok(PipelineReport {
            alignment,
            selection,
            weighted_alignment: weighted.path,
            statistics,
            feature_file: request.target_file.clone(),
            freqgap_file,
            residues: query.len(),
            outcome,
        })
    }

    fn select(&self, alignment: &Path, max_seqs: Option<usize>) -> Result<Option<PathBuf>> {
        if max_seqs.unwrap_or(0) == 0 {
            return Ok(None);
        }
        if !alignment.exists() {
            debug!(
                "No alignment at {}, skipping sequence sampling",
                alignment.display()
            );
            return Ok(None);
        }
        select_sequences(alignment, max_seqs, self.seed)
    }

    fn write_features(
        &self,
        query: &QuerySequence,
        outcome: &StatisticsOutcome,
        feature_file: &Path,
        freqgap_file: &Path,
    ) -> Result<()> {
        match outcome {
            StatisticsOutcome::Success(columns) => {
                let residues = query.len();
                if residues != columns.information_content.len()
                    || residues != columns.gap_frequency.len()
                {
                    return Err(ConservationError::LengthMismatch {
                        residues,
                        information_content: columns.information_content.len(),
                        gap_frequency: columns.gap_frequency.len(),
                    });
                }
                write_feature(feature_file, query, &columns.information_content)?;
                write_feature(freqgap_file, query, &columns.gap_frequency)?;
                info!(
                    "Wrote conservation for {} residues to {}",
                    residues,
                    feature_file.display()
                );
            }
            StatisticsOutcome::NoAlignment => {
                info!("No homologs found for {}", query.id());
                self.write_placeholders(query, feature_file, freqgap_file)?;
            }
            StatisticsOutcome::ToolFailure(failure) => {
                warn!("No conservation statistics for {}: {}", query.id(), failure);
                self.write_placeholders(query, feature_file, freqgap_file)?;
            }
        }
        Ok(())
    }

    fn write_placeholders(
        &self,
        query: &QuerySequence,
        feature_file: &Path,
        freqgap_file: &Path,
    ) -> Result<()> {
        let sentinel = vec![self.sentinel.as_str(); query.len()];
        write_feature(feature_file, query, &sentinel)?;
        write_feature(freqgap_file, query, &sentinel)?;
        info!(
            "Wrote {} placeholder values to {}",
            query.len(),
            feature_file.display()
        );
        Ok(())
    }
}

/// Decide why no statistics came out of the pipeline.
fn classify_missing_statistics(
    alignment: &Path,
    exits: &[(HmmerTool, ToolExit)],
) -> StatisticsOutcome {
    let first_failure = exits.iter().find(|(_, exit)| !exit.is_success());
    let failure = |entry: Option<&(HmmerTool, ToolExit)>| {
        StatisticsOutcome::ToolFailure(ToolFailure {
            tool: entry.map(|(tool, _)| *tool),
            exit: entry.map(|(_, exit)| *exit),
        })
    };

    if let Some((HmmerTool::Phmmer, _)) = first_failure {
        return failure(first_failure);
    }

    match read_sequence_names(alignment) {
        Ok(names) if names.is_empty() => StatisticsOutcome::NoAlignment,
        Ok(names) => {
            debug!("Alignment names {} sequences but yielded no statistics", names.len());
            failure(first_failure)
        }
        Err(ConservationError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            StatisticsOutcome::NoAlignment
        }
        Err(e) => {
            debug!("Could not read alignment {}: {}", alignment.display(), e);
            failure(first_failure)
        }
    }
}
