pub mod bio;
pub mod cli;
pub mod core;
pub mod report;
pub mod tools;

pub use crate::core::{
    config::Config,
    pipeline::{
        ConservationPipeline, PipelineReport, PipelineRequest, StatisticsOutcome, ToolFailure,
    },
};

use crate::tools::{HmmerSuite, ProcessRunner, ToolError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConservationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(
        "Length mismatch: query has {residues} residues, but statistics cover \
         {information_content} information-content and {gap_frequency} gap-frequency columns"
    )]
    LengthMismatch {
        residues: usize,
        information_content: usize,
        gap_frequency: usize,
    },

    #[error("Feature table needs one value per residue: {residues} residues, {values} values")]
    FeatureCount { residues: usize, values: usize },
}

pub type Result<T> = std::result::Result<T, ConservationError>;

/// Run the whole pipeline against the installed HMMER binaries.
///
/// `config` carries the already-resolved tool prefix and sampling seed; the
/// environment is never consulted here.
pub fn run_conservation_hmm(config: &Config, request: &PipelineRequest) -> Result<PipelineReport> {
    let suite = HmmerSuite::new(config.tools.hmmer_dir.clone());
    let pipeline = ConservationPipeline::new(suite, ProcessRunner::new())
        .with_seed(config.sampling.seed)
        .with_sentinel(config.output.sentinel.clone())
        .with_freqgap_suffix(config.output.freqgap_suffix.clone());
    pipeline.run(request)
}
