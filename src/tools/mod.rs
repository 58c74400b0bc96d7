//! External HMMER/Easel tools and the interface used to run them.

pub mod hmmer;
pub mod process;
pub mod testing;
pub mod traits;

pub use hmmer::{HmmerSuite, HmmerTool};
pub use process::ProcessRunner;
pub use testing::{ScriptedResponse, ScriptedRunner};
pub use traits::{OutputTarget, ToolError, ToolExit, ToolInvocation, ToolRunner};
