//! regio CLI — memory-mapped I/O header generation from SVD descriptions.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "regio", version, about = "Memory-mapped I/O header generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the peripherals of a device
    List {
        /// Input SVD file
        svd: PathBuf,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Generate a peripheral definition header
    Generate {
        /// Input SVD file
        svd: PathBuf,
        /// Peripheral to generate
        #[arg(long)]
        peripheral: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate the interrupt vector-table setup file
    Handlers {
        /// Input SVD file
        svd: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a device description without generating anything
    Check {
        /// Input SVD file
        svd: PathBuf,
    },
    /// Generate every output listed in a regio.toml manifest
    Batch {
        /// Manifest path (default: regio.toml)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { svd, format } => commands::list::run(&svd, format.as_deref()),
        Commands::Generate {
            svd,
            peripheral,
            output,
        } => commands::generate::run(&svd, &peripheral, output.as_deref()),
        Commands::Handlers { svd, output } => commands::handlers::run(&svd, output.as_deref()),
        Commands::Check { svd } => commands::check::run(&svd),
        Commands::Batch { manifest } => commands::batch::run(manifest.as_deref()),
    }
}
