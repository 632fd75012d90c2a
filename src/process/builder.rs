//! Build step: run the project's build tool in the working directory.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;

use crate::config::BuildConfig;
use crate::process::output::{run_captured, CapturedOutput};

#[derive(Debug, Error)]
pub enum BuildError {
    /// The build tool could not be started at all.
    #[error("build failed: could not run {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The build tool exited unsuccessfully. `output` is its combined output.
    #[error("build failed: {output}")]
    Failed { status: ExitStatus, output: String },
}

/// Runs the configured build command once.
#[derive(Debug, Clone)]
pub struct Builder {
    program: String,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl Builder {
    pub fn new(program: impl Into<String>, args: Vec<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            work_dir: work_dir.into(),
        }
    }

    pub fn from_config(config: &BuildConfig, work_dir: &Path) -> Self {
        Self::new(config.program.clone(), config.args.clone(), work_dir)
    }

    /// Run the build. Any non-zero exit is an error carrying the output.
    pub async fn build(&self) -> Result<CapturedOutput, BuildError> {
        tracing::info!(
            program = %self.program,
            args = ?self.args,
            work_dir = %self.work_dir.display(),
            "Building"
        );

        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.work_dir);

        let output = run_captured(command)
            .await
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.success() {
            tracing::error!(status = %output.status, "Build failed");
            return Err(BuildError::Failed {
                status: output.status,
                output: output.text(),
            });
        }

        tracing::debug!(output = %output.text(), "Build output");
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, dir: &Path) -> Builder {
        Builder::new("sh", vec!["-c".into(), script.into()], dir)
    }

    #[tokio::test]
    async fn test_successful_build() {
        let dir = tempfile::tempdir().unwrap();
        let output = sh("echo compiled", dir.path()).build().await.unwrap();
        assert_eq!(output.text(), "compiled\n");
    }

    #[tokio::test]
    async fn test_build_runs_in_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        sh("touch built.marker", dir.path()).build().await.unwrap();
        assert!(dir.path().join("built.marker").exists());
    }

    #[tokio::test]
    async fn test_failed_build_carries_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = sh("echo 'naett.c:1: error' 1>&2; exit 2", dir.path())
            .build()
            .await
            .unwrap_err();

        match &err {
            BuildError::Failed { status, output } => {
                assert_eq!(status.code(), Some(2));
                assert_eq!(output, "naett.c:1: error\n");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(err.to_string(), "build failed: naett.c:1: error\n");
    }

    #[tokio::test]
    async fn test_missing_build_tool() {
        let dir = tempfile::tempdir().unwrap();
        let err = Builder::new("naett-no-such-build-tool", Vec::new(), dir.path())
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
