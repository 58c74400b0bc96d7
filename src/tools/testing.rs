//! Scripted tool runner for testing the pipeline without HMMER installed

use crate::tools::hmmer::HmmerTool;
use crate::tools::traits::{OutputTarget, ToolError, ToolExit, ToolInvocation, ToolRunner};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// What a scripted tool "prints" and how it exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedResponse {
    pub stdout: Vec<u8>,
    pub exit: ToolExit,
}

impl ScriptedResponse {
    pub fn success() -> Self {
        Self {
            stdout: Vec::new(),
            exit: ToolExit::success(),
        }
    }

    pub fn with_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            exit: ToolExit::success(),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            stdout: Vec::new(),
            exit: ToolExit::with_code(code),
        }
    }
}

type Handler = Box<dyn Fn(&ToolInvocation) -> io::Result<ScriptedResponse> + Send + Sync>;

/// A [`ToolRunner`] that answers from per-tool handlers and records every call.
///
/// Handlers write whatever files the real tool would write (the path is in the
/// invocation's arguments, see [`flag_value`]). Captured stdout is written to
/// `OutputTarget::File` targets by the runner itself, which also creates those
/// files before calling the handler, just like a real redirect. Tools without
/// a handler succeed silently.
#[derive(Default)]
pub struct ScriptedRunner {
    handlers: HashMap<HmmerTool, Handler>,
    uninstalled: HashSet<HmmerTool>,
    calls: Mutex<Vec<ToolInvocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behaviour of `tool`
    pub fn on<F>(mut self, tool: HmmerTool, handler: F) -> Self
    where
        F: Fn(&ToolInvocation) -> io::Result<ScriptedResponse> + Send + Sync + 'static,
    {
        self.handlers.insert(tool, Box::new(handler));
        self
    }

    /// Pretend `tool` is not installed: running it fails to spawn
    pub fn uninstalled(mut self, tool: HmmerTool) -> Self {
        self.uninstalled.insert(tool);
        self
    }

    /// Every invocation seen so far, in call order
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.lock_calls().clone()
    }

    /// Tools called so far, in call order
    pub fn tools_called(&self) -> Vec<HmmerTool> {
        self.lock_calls().iter().map(|inv| inv.tool).collect()
    }

    /// The most recent invocation of `tool`
    pub fn last_invocation(&self, tool: HmmerTool) -> Option<ToolInvocation> {
        self.lock_calls()
            .iter()
            .rev()
            .find(|inv| inv.tool == tool)
            .cloned()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<ToolInvocation>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit, ToolError> {
        self.lock_calls().push(invocation.clone());

        if self.uninstalled.contains(&invocation.tool) {
            return Err(ToolError::Spawn {
                tool: invocation.tool,
                program: invocation.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        for target in [&invocation.stdout, &invocation.stderr] {
            if let OutputTarget::File(path) = target {
                fs::File::create(path).map_err(|source| ToolError::Redirect {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let response = match self.handlers.get(&invocation.tool) {
            Some(handler) => handler(invocation).map_err(|source| ToolError::Spawn {
                tool: invocation.tool,
                program: invocation.program.clone(),
                source,
            })?,
            None => ScriptedResponse::success(),
        };

        if let OutputTarget::File(path) = &invocation.stdout {
            fs::write(path, &response.stdout).map_err(|source| ToolError::Redirect {
                path: path.clone(),
                source,
            })?;
        }

        Ok(response.exit)
    }
}

/// The argument following `flag`, as a path
pub fn flag_value(invocation: &ToolInvocation, flag: &str) -> Option<PathBuf> {
    invocation
        .args
        .iter()
        .position(|arg| arg == flag)
        .and_then(|i| invocation.args.get(i + 1))
        .map(PathBuf::from)
}

/// The last positional argument (the input alignment for the Easel tools)
pub fn last_argument(invocation: &ToolInvocation) -> Option<PathBuf> {
    invocation.args.last().map(PathBuf::from)
}
