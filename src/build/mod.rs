//! Running the external Meteor build
//!
//! [`BuildOrchestrator`] spawns the build tool with the terminal's own
//! stdin/stdout/stderr and classifies how it ended.

mod completion;
mod orchestrator;

pub use completion::Completion;
pub use orchestrator::{build_args, BuildOrchestrator};

use crate::config::DEFAULT_TOOL;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{tool} not in $PATH. Please make sure {tool} is installed properly.")]
    ToolNotFound { tool: String },

    #[error("Conversion failed.")]
    BuildFailed,

    #[error(transparent)]
    Spawn(#[from] std::io::Error),
}

/// Terminal classification of one orchestration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    ToolNotFound,
    /// `code` is `None` when the process was killed by a signal
    BuildFailed { code: Option<i32> },
}

impl BuildOutcome {
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => BuildOutcome::Success,
            code => BuildOutcome::BuildFailed { code },
        }
    }

    /// The exit code is dropped here; callers only learn that the build failed.
    pub fn into_result(self, tool: &str) -> Result<(), BuildError> {
        match self {
            BuildOutcome::Success => Ok(()),
            BuildOutcome::ToolNotFound => Err(BuildError::ToolNotFound {
                tool: display_name(tool),
            }),
            BuildOutcome::BuildFailed { .. } => Err(BuildError::BuildFailed),
        }
    }
}

/// Name shown to users; the default tool is spelled as the product.
fn display_name(tool: &str) -> String {
    if tool == DEFAULT_TOOL {
        "Meteor".to_string()
    } else {
        tool.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    NotStarted,
    Spawning,
    Running,
    Exited(Option<i32>),
    SpawnFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_exit_code() {
        assert_eq!(BuildOutcome::from_exit_code(Some(0)), BuildOutcome::Success);
        assert_eq!(
            BuildOutcome::from_exit_code(Some(1)),
            BuildOutcome::BuildFailed { code: Some(1) }
        );
        assert_eq!(
            BuildOutcome::from_exit_code(None),
            BuildOutcome::BuildFailed { code: None }
        );
    }

    #[test]
    fn test_build_failed_hides_exit_code() {
        let err = BuildOutcome::BuildFailed { code: Some(254) }
            .into_result("meteor")
            .unwrap_err();
        assert_eq!(err.to_string(), "Conversion failed.");
    }

    #[test]
    fn test_tool_not_found_message() {
        let err = BuildOutcome::ToolNotFound.into_result("meteor").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Meteor not in $PATH. Please make sure Meteor is installed properly."
        );
    }

    #[test]
    fn test_tool_not_found_names_custom_tool() {
        let err = BuildOutcome::ToolNotFound
            .into_result("/opt/meteor/bin/meteor")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "/opt/meteor/bin/meteor not in $PATH. Please make sure /opt/meteor/bin/meteor is installed properly."
        );
    }

    #[test]
    fn test_spawn_error_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BuildError::from(io);
        assert!(matches!(err, BuildError::Spawn(_)));
        assert_eq!(err.to_string(), "denied");
    }
}
