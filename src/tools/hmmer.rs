//! HMMER and Easel executables used by the conservation pipeline

use crate::tools::traits::{OutputTarget, ToolInvocation};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Output sink passed to `phmmer -o`; the per-hit report is never read.
const DISCARDED_REPORT: &str = "/dev/null";

/// External programs driven by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HmmerTool {
    Phmmer,
    EslAlimanip,
    EslWeight,
    EslAlistat,
}

impl HmmerTool {
    pub const ALL: [HmmerTool; 4] = [
        HmmerTool::Phmmer,
        HmmerTool::EslAlimanip,
        HmmerTool::EslWeight,
        HmmerTool::EslAlistat,
    ];

    /// Get the binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            HmmerTool::Phmmer => "phmmer",
            HmmerTool::EslAlimanip => "esl-alimanip",
            HmmerTool::EslWeight => "esl-weight",
            HmmerTool::EslAlistat => "esl-alistat",
        }
    }

    /// Get a short description of the tool's role in the pipeline
    pub fn role(&self) -> &'static str {
        match self {
            HmmerTool::Phmmer => "homology search",
            HmmerTool::EslAlimanip => "alignment subsampling",
            HmmerTool::EslWeight => "sequence weighting",
            HmmerTool::EslAlistat => "alignment statistics",
        }
    }
}

impl std::fmt::Display for HmmerTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}

impl std::str::FromStr for HmmerTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phmmer" => Ok(HmmerTool::Phmmer),
            "esl-alimanip" | "alimanip" => Ok(HmmerTool::EslAlimanip),
            "esl-weight" | "weight" => Ok(HmmerTool::EslWeight),
            "esl-alistat" | "alistat" => Ok(HmmerTool::EslAlistat),
            _ => Err(format!("Unknown HMMER tool: {}", s)),
        }
    }
}

/// Locates the HMMER binaries and builds their command lines.
///
/// The prefix is glued in front of each binary name as-is, so
/// `/opt/hmmer/bin/` resolves `phmmer` to `/opt/hmmer/bin/phmmer` while an
/// empty prefix leaves the lookup to `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HmmerSuite {
    prefix: String,
}

impl HmmerSuite {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path (or bare name) of the executable for `tool`
    pub fn program(&self, tool: HmmerTool) -> PathBuf {
        PathBuf::from(format!("{}{}", self.prefix, tool.binary_name()))
    }

    /// `phmmer -o /dev/null -A <alignment> <query> <database>`
    pub fn phmmer_search(&self, query: &Path, database: &Path, alignment: &Path) -> ToolInvocation {
        ToolInvocation {
            tool: HmmerTool::Phmmer,
            program: self.program(HmmerTool::Phmmer),
            args: vec![
                "-o".into(),
                DISCARDED_REPORT.into(),
                "-A".into(),
                alignment.into(),
                query.into(),
                database.into(),
            ],
            stdout: OutputTarget::Inherit,
            stderr: OutputTarget::Inherit,
        }
    }

    /// `esl-alimanip -o <output> --seq-k <selection> <alignment>`
    pub fn alimanip_keep(&self, alignment: &Path, selection: &Path, output: &Path) -> ToolInvocation {
        ToolInvocation {
            tool: HmmerTool::EslAlimanip,
            program: self.program(HmmerTool::EslAlimanip),
            args: vec![
                "-o".into(),
                output.into(),
                "--seq-k".into(),
                selection.into(),
                alignment.into(),
            ],
            stdout: OutputTarget::Discard,
            stderr: OutputTarget::Inherit,
        }
    }

    /// `esl-weight <alignment> > <output>`
    pub fn weight(&self, alignment: &Path, output: &Path) -> ToolInvocation {
        ToolInvocation {
            tool: HmmerTool::EslWeight,
            program: self.program(HmmerTool::EslWeight),
            args: vec![OsString::from(alignment)],
            stdout: OutputTarget::File(output.to_path_buf()),
            stderr: OutputTarget::Discard,
        }
    }

    /// `esl-alistat --icinfo <ic> --rinfo <r> --weight <alignment>`
    pub fn alistat_info(
        &self,
        weighted_alignment: &Path,
        information_content: &Path,
        residue_info: &Path,
    ) -> ToolInvocation {
        ToolInvocation {
            tool: HmmerTool::EslAlistat,
            program: self.program(HmmerTool::EslAlistat),
            args: vec![
                "--icinfo".into(),
                information_content.into(),
                "--rinfo".into(),
                residue_info.into(),
                "--weight".into(),
                weighted_alignment.into(),
            ],
            stdout: OutputTarget::Discard,
            stderr: OutputTarget::Discard,
        }
    }
}
