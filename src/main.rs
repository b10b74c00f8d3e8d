//! # chartwise command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (stderr + rolling files)
//!   ├─> Create Tokio runtime
//!   └─> Run the command
//!         ├─> Ok:  pretty JSON on stdout, exit 0
//!         └─> Err: {"error", "message"} envelope on stdout, exit 1
//! ```
//!
//! ```bash
//! chartwise profile sales.csv
//! chartwise recommend sales.csv
//! chartwise chart sales.csv --type bar --x Region --y Sales --agg mean
//! chartwise chart --request request.json
//! ```

#![expect(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = chartwise::logging::init() {
        eprintln!("Logging unavailable: {e:#}");
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run_command(cli)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            match serde_json::to_string_pretty(&e.to_envelope()) {
                Ok(envelope) => println!("{envelope}"),
                Err(_) => eprintln!("{e}"),
            }
            ExitCode::FAILURE
        }
    }
}
