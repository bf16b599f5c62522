//! BuildOrchestrator integration tests
//!
//! Stand-in executables (`true`, `false`, `sh`) play the part of the Meteor
//! tool so each exit path can be exercised without Meteor installed.
#![cfg(unix)]

use demeteorizer::{BuildError, BuildOrchestrator, OptionOverrides, Options};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

fn options_for(input: &Path, tool: &str) -> Options {
    Options::from_overrides(OptionOverrides {
        input: Some(input.to_path_buf()),
        tool: Some(tool.to_string()),
        ..Default::default()
    })
}

/// Runs the build through the callback API and reports the result together
/// with the number of times the callback fired.
async fn run_with_callback(options: Options) -> (Result<(), BuildError>, usize) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let (tx, rx) = oneshot::channel();

    let handle = BuildOrchestrator::new(options).run_with_callback(move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });

    handle.await.expect("build task panicked");
    let result = rx.await.expect("callback never fired");
    (result, calls.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_missing_tool_reports_path_remediation() {
    let temp_dir = TempDir::new().unwrap();
    let options = options_for(temp_dir.path(), "demeteorizer-missing-build-tool");

    let (result, calls) = run_with_callback(options).await;

    assert_eq!(calls, 1);
    match result.unwrap_err() {
        err @ BuildError::ToolNotFound { .. } => {
            let message = err.to_string();
            assert!(message.contains("not in $PATH"));
            assert!(message.contains("installed properly"));
        }
        other => panic!("Expected ToolNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_nonzero_exit_is_conversion_failure() {
    let temp_dir = TempDir::new().unwrap();

    let (result, calls) = run_with_callback(options_for(temp_dir.path(), "false")).await;

    assert_eq!(calls, 1);
    let err = result.unwrap_err();
    assert!(matches!(err, BuildError::BuildFailed));
    assert_eq!(err.to_string(), "Conversion failed.");
}

#[tokio::test]
async fn test_zero_exit_is_success() {
    let temp_dir = TempDir::new().unwrap();

    let (result, calls) = run_with_callback(options_for(temp_dir.path(), "true")).await;

    assert_eq!(calls, 1);
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_runs_in_input_directory_with_build_args() {
    let temp_dir = TempDir::new().unwrap();
    // `sh build ...` executes ./build from the working directory
    fs::write(
        temp_dir.path().join("build"),
        "printf '%s\\n' \"$@\" > args.txt\n",
    )
    .unwrap();

    let options = Options::from_overrides(OptionOverrides {
        input: Some(temp_dir.path().to_path_buf()),
        tool: Some("sh".to_string()),
        architecture: Some("arm".to_string()),
        debug: Some(true),
        ..Default::default()
    });

    BuildOrchestrator::new(options).run().await.unwrap();

    let recorded = fs::read_to_string(temp_dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = recorded.lines().collect();
    assert_eq!(
        args,
        vec![
            "--server",
            "localhost:3000",
            "--directory",
            ".demeteorized",
            "--architecture",
            "arm",
            "--debug"
        ]
    );
}

#[tokio::test]
async fn test_specific_exit_code_is_not_surfaced() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("build"), "exit 7\n").unwrap();

    let result = BuildOrchestrator::new(options_for(temp_dir.path(), "sh"))
        .run()
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Conversion failed.");
}

#[tokio::test]
async fn test_other_spawn_errors_pass_through() {
    let temp_dir = TempDir::new().unwrap();
    let tool = temp_dir.path().join("meteor");
    fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o644)).unwrap();

    let options = options_for(temp_dir.path(), tool.to_str().unwrap());
    let (result, calls) = run_with_callback(options).await;

    assert_eq!(calls, 1);
    match result.unwrap_err() {
        BuildError::Spawn(e) => {
            assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("Expected raw spawn error, got {:?}", other),
    }
}
