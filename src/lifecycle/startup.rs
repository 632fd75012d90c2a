//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the working directory
//! - Build, then bind and spawn the test server, then run the tests
//! - Serve-only mode: bind and serve in the foreground until Ctrl+C
//!
//! # Design Decisions
//! - Fail fast: the first error ends the run, nothing is retried
//! - The listener is bound before the tests start, so the test executable
//!   never races the server's startup
//! - Errors are returned, `main` alone decides the exit status

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::task::JoinError;

use crate::config::{load_config, ConfigError, RigConfig};
use crate::http::{base_url, ServerBindError, TestServer};
use crate::lifecycle::signals::shutdown_on_ctrl_c;
use crate::lifecycle::Shutdown;
use crate::process::{BuildError, Builder, TestRunError, TestRunner};

/// Fatal errors of a rig run.
#[derive(Debug, Error)]
pub enum RigError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not determine working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    ServerBind(#[from] ServerBindError),

    #[error("test server stopped unexpectedly: {0}")]
    Server(#[source] io::Error),

    #[error(transparent)]
    TestRun(#[from] TestRunError),
}

/// Load the configuration file, or the defaults when no file is given.
pub fn load_rig_config(path: Option<&Path>) -> Result<RigConfig, RigError> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(RigConfig::default()),
    }
}

/// Build, serve in the background, run the tests.
///
/// Returns the test executable's combined output on success.
pub async fn run_rig(config: &RigConfig) -> Result<String, RigError> {
    let work_dir = resolve_working_dir(config)?;

    Builder::from_config(&config.build, &work_dir).build().await?;
    tracing::info!("Build succeeded");

    let server = TestServer::new(config.server.clone());
    let listener = server.bind().await?;
    let addr = listener
        .local_addr()
        .map_err(|source| ServerBindError {
            address: config.server.bind_address.clone(),
            source,
        })?;
    let url = base_url(addr);

    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let runner = TestRunner::from_config(&config.runner, &work_dir);
    let result = tokio::select! {
        result = runner.run(&url) => result.map_err(RigError::from),
        joined = &mut server_task => Err(server_exit(joined)),
    };

    shutdown.trigger();
    result
}

/// Run only the test server, in the foreground, until Ctrl+C.
pub async fn serve_only(config: &RigConfig) -> Result<(), RigError> {
    let server = TestServer::new(config.server.clone());
    let listener = server.bind().await?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(base_url = %base_url(addr), "Serving test endpoints");
    }

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(RigError::Server)
}

fn resolve_working_dir(config: &RigConfig) -> Result<PathBuf, RigError> {
    match &config.working_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().map_err(RigError::WorkingDir),
    }
}

fn server_exit(joined: Result<io::Result<()>, JoinError>) -> RigError {
    let source = match joined {
        Ok(Ok(())) => io::Error::other("server exited before the tests finished"),
        Ok(Err(e)) => e,
        Err(e) => io::Error::other(e),
    };
    tracing::error!(error = %source, "Test server stopped unexpectedly");
    RigError::Server(source)
}
