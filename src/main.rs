use clap::Parser;

use cbd_core::{Cli, CMakeCommands, DriverError, LogLevel, Logger, Orchestrator};

async fn run(cli: &Cli) -> Result<(), DriverError> {
    let cmake = CMakeCommands::locate()?;
    let targets = cbd_core::config::load_targets(cli.targets_file())?;

    let orchestrator = Orchestrator::new(targets, cmake);
    orchestrator.run(cli.phase.map(|arg| arg.phase())).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        let logger = Logger::new();
        logger.log(LogLevel::Error, &err.to_string());
        std::process::exit(err.exit_code());
    }
}
