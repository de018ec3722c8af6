//! loadping - send ten staggered GET requests and print each outcome.

use clap::Parser;
use loadping::cli::Args;
use loadping::Dispatcher;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout only carries response lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let dispatcher = match Dispatcher::new(args.config()) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Per-request failures are already reported; they don't affect the exit code
    dispatcher.run().await;

    ExitCode::SUCCESS
}
