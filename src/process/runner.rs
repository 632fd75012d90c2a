//! Test step: run the external test executable against the test server.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;

use crate::config::RunnerConfig;
use crate::process::output::run_captured;

#[derive(Debug, Error)]
pub enum TestRunError {
    /// The executable is missing or could not be started.
    #[error("Failed to run test {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tests ran and failed. `output` is their combined output.
    #[error("Failed to run test: {output}")]
    Failed { status: ExitStatus, output: String },
}

/// Resolves and runs the external test executable.
#[derive(Debug, Clone)]
pub struct TestRunner {
    executable: PathBuf,
    work_dir: PathBuf,
}

impl TestRunner {
    /// `executable` is resolved against `work_dir` unless it is absolute.
    pub fn new(executable: impl AsRef<Path>, work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            executable: work_dir.join(executable),
            work_dir,
        }
    }

    pub fn from_config(config: &RunnerConfig, work_dir: &Path) -> Self {
        Self::new(&config.executable, work_dir)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run the tests with `base_url` as the only argument and return their
    /// combined output on success.
    pub async fn run(&self, base_url: &str) -> Result<String, TestRunError> {
        tracing::info!(
            executable = %self.executable.display(),
            base_url = %base_url,
            "Running tests"
        );

        let mut command = Command::new(&self.executable);
        command.arg(base_url).current_dir(&self.work_dir);

        let output = run_captured(command)
            .await
            .map_err(|source| TestRunError::Spawn {
                path: self.executable.clone(),
                source,
            })?;

        if !output.success() {
            tracing::error!(status = %output.status, "Tests failed");
            return Err(TestRunError::Failed {
                status: output.status,
                output: output.text(),
            });
        }

        tracing::info!("Tests passed");
        Ok(output.text())
    }
}
