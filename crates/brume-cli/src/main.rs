//! Brume CLI - host front end for the brume texture processor.

mod commands;
mod script;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brume")]
#[command(author, version, about = "Granular texture reverb, off the hardware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the full engine
    Process(commands::process::ProcessArgs),

    /// Inspect or reset a persistent settings file
    Settings(commands::settings::SettingsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Settings(args) => commands::settings::run(args),
    }
}
