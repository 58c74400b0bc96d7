//! Runs tools as real child processes

use crate::tools::traits::{OutputTarget, ToolError, ToolExit, ToolInvocation, ToolRunner};
use std::fs::File;
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Blocking [`ToolRunner`] backed by `std::process::Command`.
///
/// No timeout, no retry: each call waits for the child to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }
}

fn open_stream(target: &OutputTarget) -> Result<Stdio, ToolError> {
    match target {
        OutputTarget::Inherit => Ok(Stdio::inherit()),
        OutputTarget::Discard => Ok(Stdio::null()),
        OutputTarget::File(path) => {
            let file = File::create(path).map_err(|source| ToolError::Redirect {
                path: path.clone(),
                source,
            })?;
            Ok(Stdio::from(file))
        }
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit, ToolError> {
        debug!("Running {}", invocation.command_line());

        // Redirect files are created before the child starts.
        let stdout = open_stream(&invocation.stdout)?;
        let stderr = open_stream(&invocation.stderr)?;

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|source| ToolError::Spawn {
                tool: invocation.tool,
                program: invocation.program.clone(),
                source,
            })?;

        trace!("{} exited with {:?}", invocation.tool, status.code());
        Ok(ToolExit {
            code: status.code(),
        })
    }
}
