//! Resona CLI - room reverberation measurement from the command line.

mod commands;
mod room_file;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "resona")]
#[command(author, version, about = "Room reverberation (RT60) measurement toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the measurement sweep and inverse filter as WAV files
    Generate(commands::generate::GenerateArgs),

    /// Analyze a measurement recording against a room description
    Analyze(commands::analyze::AnalyzeArgs),

    /// Predict Sabine/Eyring reverberation from a room description
    Predict(commands::predict::PredictArgs),

    /// List the built-in absorption material presets
    Materials(commands::materials::MaterialsArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Predict(args) => commands::predict::run(args),
        Commands::Materials(args) => commands::materials::run(args),
    }
}
