use anyhow::Result;
use clap::Parser;

use attendify::{cli::Cli, runtime::Orchestrator, utils::init_logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging if verbose
    if cli.verbose {
        init_logger();
    }

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(cli)?;
    orchestrator.run().await
}
