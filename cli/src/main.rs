use clap::Parser;
use messaging_infra::commands::Commands;
use messaging_infra::error::Error;
use messaging_infra::logger;
use messaging_infra::runner::{Runnable, Runner};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Derive a runner from the command and run it
async fn run(command: impl Runnable) {
    let run = command.runner().run().await;

    if run.is_err() {
        println!(
            "{}\n{}",
            console::style("Error").red().bold(),
            run.unwrap_err()
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init();
    let cli = Cli::parse();

    // Match all commands here, in one place
    Ok(match cli.command {
        Commands::Synth(cmd) => run(cmd).await,
        Commands::Deploy(cmd) => run(cmd).await,
        Commands::Destroy(cmd) => run(cmd).await,
        Commands::Status(cmd) => run(cmd).await,
    })
}
