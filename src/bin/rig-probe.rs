use std::process::ExitCode;

use clap::Parser;

use naett_testrig::probe::Probe;

#[derive(Parser)]
#[command(name = "rig-probe")]
#[command(about = "Check a running naett test server the way the client tests do", long_about = None)]
struct Cli {
    /// Test server base URL, e.g. http://localhost:4711
    endpoint: String,

    /// Also fire this many concurrent requests at /stress
    #[arg(long, default_value_t = 0)]
    stress: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let probe = match Probe::new(cli.endpoint) {
        Ok(probe) => probe,
        Err(e) => {
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match probe.run_all(cli.stress).await {
        Ok(_) => {
            println!("All tests pass OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
