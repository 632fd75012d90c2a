//! naett test rig.
//!
//! ```text
//!   make ──▶ bind :4711 ──▶ spawn test server ──▶ ./test http://localhost:4711
//!                                 │                         │
//!                                 │   GET  /get             │
//!                                 │   POST /post            │
//!                                 │◀──GET  /redirect ───────┤
//!                                 │   ANY  /redirected      │
//!                                 │                         ▼
//!                                 └──── shutdown ◀──── output relayed, exit
//! ```
//!
//! `-serve` (or `--serve`) skips the build and test steps and serves the
//! endpoints in the foreground, for driving the client by hand.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use naett_testrig::lifecycle::{load_rig_config, run_rig, serve_only};
use naett_testrig::RigError;
use naett_testrig::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "naett-testrig")]
#[command(about = "Build naett, serve the test endpoints and run the test binary", long_about = None)]
struct Cli {
    /// Only run the test server, in the foreground
    #[arg(long)]
    serve: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Accept the single-dash `-serve` spelling.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg.to_str() == Some("-serve") {
                OsString::from("--serve")
            } else {
                arg
            }
        })
        .collect()
}

/// Write the test output through unchanged.
fn relay_output<W: Write>(writer: &mut W, output: &str) -> io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.flush()
}

/// Everything up to the exit status. `Some` carries test output to relay.
async fn run(cli: Cli) -> Result<Option<String>, RigError> {
    let config = load_rig_config(cli.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.server.bind_address,
        build = %config.build.program,
        runner = %config.runner.executable.display(),
        serve_only = cli.serve,
        "naett-testrig v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if cli.serve {
        serve_only(&config).await.map(|()| None)
    } else {
        run_rig(&config).await.map(Some)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    match run(cli).await {
        Ok(Some(output)) => match relay_output(&mut io::stdout(), &output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Could not write test output");
                eprintln!("could not write test output: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Test rig failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_go_style_serve_flag() {
        assert!(parse(&["naett-testrig", "-serve"]).serve);
        assert!(parse(&["naett-testrig", "--serve"]).serve);
        assert!(!parse(&["naett-testrig"]).serve);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_relay_output_is_verbatim() {
        let mut out = Vec::new();
        relay_output(&mut out, "All tests pass OK\n").unwrap();
        assert_eq!(out, b"All tests pass OK\n");
    }

    #[test]
    fn test_relay_output_reports_write_failure() {
        let err = relay_output(&mut BrokenPipe, "All tests pass OK\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn test_missing_config_file_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            serve: false,
            config: Some(dir.path().join("missing.toml")),
        };
        let err = run(cli).await.unwrap_err();
        assert!(matches!(err, RigError::Config(_)));
    }

    #[test]
    fn test_config_flag() {
        let cli = parse(&["naett-testrig", "-c", "rig.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("rig.toml")));
        assert!(!cli.serve);
    }
}
