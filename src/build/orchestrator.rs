use super::{BuildError, BuildOutcome, BuildState, Completion};
use crate::config::Options;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Arguments for `<tool> build`. Optional flags keep a fixed order:
/// architecture, debug, server-only, verbose.
pub fn build_args(options: &Options) -> Vec<String> {
    let mut args = vec![
        "build".to_string(),
        "--server".to_string(),
        options.server.clone(),
        "--directory".to_string(),
        options.directory.display().to_string(),
    ];

    if let Some(ref arch) = options.architecture {
        args.push("--architecture".to_string());
        args.push(arch.clone());
    }

    if options.debug {
        args.push("--debug".to_string());
    }
    if options.server_only {
        args.push("--server-only".to_string());
    }
    if options.verbose {
        args.push("--verbose".to_string());
    }

    args
}

pub struct BuildOrchestrator {
    options: Options,
}

impl BuildOrchestrator {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Runs the build to completion. No timeout: a hung tool blocks forever.
    pub async fn run(&self) -> Result<(), BuildError> {
        let outcome = self.execute().await?;
        outcome.into_result(&self.options.tool)
    }

    /// Runs the build on the current tokio runtime and hands the result to
    /// `callback` exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run_with_callback<F>(self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<(), BuildError>) + Send + 'static,
    {
        let completion = Completion::new(callback);
        tokio::spawn(async move {
            let result = self.run().await;
            completion.complete(result);
        })
    }

    async fn execute(&self) -> Result<BuildOutcome, BuildError> {
        let tool = &self.options.tool;
        let args = build_args(&self.options);
        let mut state = BuildState::NotStarted;
        debug!(?state, tool = %tool, ?args, "Preparing build");

        state = BuildState::Spawning;
        debug!(?state, cwd = %self.options.input.display(), "Spawning build tool");

        let spawned = Command::new(tool)
            .args(&args)
            .current_dir(&self.options.input)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                state = BuildState::SpawnFailed;
                debug!(?state, error = %e, "Failed to spawn build tool");
                if e.kind() == ErrorKind::NotFound {
                    error!("{} was not found on $PATH", tool);
                    return Ok(BuildOutcome::ToolNotFound);
                }
                return Err(BuildError::Spawn(e));
            }
        };

        state = BuildState::Running;
        debug!(?state, pid = ?child.id(), "Build tool running");

        let status = child.wait().await?;
        state = BuildState::Exited(status.code());
        debug!(?state, "Build tool exited");

        let outcome = BuildOutcome::from_exit_code(status.code());
        match outcome {
            BuildOutcome::Success => info!("Meteor build completed"),
            BuildOutcome::BuildFailed { code } => error!(?code, "Meteor build failed"),
            BuildOutcome::ToolNotFound => {}
        }
        Ok(outcome)
    }
}
