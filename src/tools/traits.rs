//! Trait definitions for tool abstractions
//!
//! Every external program the pipeline needs is described as a
//! [`ToolInvocation`] and handed to a [`ToolRunner`], so the stages can be
//! driven by real processes or by a scripted stand-in in tests.

use crate::tools::hmmer::HmmerTool;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Where a child process stream goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Share the parent's stream
    Inherit,
    /// Drop everything
    Discard,
    /// Create (or truncate) a file and write the stream into it
    File(PathBuf),
}

/// A fully resolved command line for one external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: HmmerTool,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub stdout: OutputTarget,
    pub stderr: OutputTarget,
}

impl ToolInvocation {
    /// Arguments as lossy strings, for logging and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Render the command line the way a shell user would type it
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

/// How a tool process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Failures that prevent a tool from running at all
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to start {tool} ({}): {source}", .program.display())]
    Spawn {
        tool: HmmerTool,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open output file {}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Common interface for running external tools
///
/// Implementations block until the process has exited. A non-zero exit is
/// reported through [`ToolExit`], never as an error.
#[cfg_attr(test, mockall::automock)]
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit, ToolError>;
}
