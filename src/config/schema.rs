//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the test rig.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RigConfig {
    /// Directory the build runs in and the test executable is resolved
    /// against. Defaults to the process working directory.
    pub working_dir: Option<PathBuf>,

    /// Test server settings.
    pub server: ServerConfig,

    /// Build tool invocation.
    pub build: BuildConfig,

    /// External test executable.
    pub runner: RunnerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Test server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address. `[::]` also accepts IPv4 where the host is dual-stack.
    pub bind_address: String,

    /// Log method and URI of each traced request.
    pub trace_requests: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "[::]:4711".to_string(),
            trace_requests: true,
        }
    }
}

/// Build tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Program to run (looked up on `PATH`).
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            program: "make".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Test executable, relative to the working directory.
    pub executable: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("test"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
