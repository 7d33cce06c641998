mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scanner", about = "Camera barcode scanner")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Scanner config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a camera can be opened
    Check,
    /// List video inputs and their capabilities
    Devices,
    /// Scan until the first barcode is decoded
    Scan(commands::scan::ScanArgs),
    /// Decode barcodes from image files
    Decode(commands::decode::DecodeArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Check => commands::check::run(config),
        Commands::Devices => commands::devices::run(config),
        Commands::Scan(args) => commands::scan::run(config, args),
        Commands::Decode(args) => commands::decode::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
