//! The external-tool stages of the pipeline.
//!
//! Each stage builds one invocation, runs it, and hands back the path its
//! output is expected at. Nothing checks that the file was actually written;
//! that is settled when the statistics are read.

use crate::core::paths;
use crate::tools::{HmmerSuite, ToolError, ToolExit, ToolInvocation, ToolRunner};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a stage left (or should have left) its output, and how its tool exited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub path: PathBuf,
    pub exit: ToolExit,
}

/// Report files requested from `esl-alistat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsFiles {
    pub information_content: PathBuf,
    pub residue_info: PathBuf,
}

fn run_stage<R: ToolRunner + ?Sized>(
    runner: &R,
    invocation: &ToolInvocation,
) -> Result<ToolExit, ToolError> {
    debug!("{}: {}", invocation.tool.role(), invocation.command_line());
    let exit = runner.run(invocation)?;
    if !exit.is_success() {
        match exit.code {
            Some(code) => warn!("{} exited with code {}", invocation.tool, code),
            None => warn!("{} was terminated by a signal", invocation.tool),
        }
    }
    Ok(exit)
}

/// Search `database` with the query and write the hit alignment to
/// `<working_dir>/<basename(fasta)>.sto`.
pub fn generate_msa<R: ToolRunner + ?Sized>(
    runner: &R,
    suite: &HmmerSuite,
    fasta: &Path,
    database: &Path,
    working_dir: &Path,
) -> Result<StageOutput, ToolError> {
    let alignment = paths::alignment_path(working_dir, fasta);
    info!("Searching {} against {}", fasta.display(), database.display());
    let exit = run_stage(runner, &suite.phmmer_search(fasta, database, &alignment))?;
    Ok(StageOutput {
        path: alignment,
        exit,
    })
}

/// Keep only the sequences named in `selection`, writing `<alignment>.sample`.
pub fn generate_msa_sample<R: ToolRunner + ?Sized>(
    runner: &R,
    suite: &HmmerSuite,
    alignment: &Path,
    selection: &Path,
) -> Result<StageOutput, ToolError> {
    let sample = paths::sample_path(alignment);
    let exit = run_stage(runner, &suite.alimanip_keep(alignment, selection, &sample))?;
    Ok(StageOutput { path: sample, exit })
}

/// Weight the sequences of `alignment`, capturing the weighted alignment in
/// `<alignment>.w`.
pub fn calculate_sequence_weights<R: ToolRunner + ?Sized>(
    runner: &R,
    suite: &HmmerSuite,
    alignment: &Path,
) -> Result<StageOutput, ToolError> {
    let weighted = paths::weighted_path(alignment);
    let exit = run_stage(runner, &suite.weight(alignment, &weighted))?;
    Ok(StageOutput {
        path: weighted,
        exit,
    })
}

/// Ask for per-column information content (`.ic`) and residue/gap
/// frequencies (`.r`) of the weighted alignment.
pub fn calculate_information_content<R: ToolRunner + ?Sized>(
    runner: &R,
    suite: &HmmerSuite,
    weighted: &Path,
) -> Result<(StatisticsFiles, ToolExit), ToolError> {
    let files = StatisticsFiles {
        information_content: paths::information_content_path(weighted),
        residue_info: paths::residue_info_path(weighted),
    };
    let exit = run_stage(
        runner,
        &suite.alistat_info(weighted, &files.information_content, &files.residue_info),
    )?;
    Ok((files, exit))
}
