//! storefront: build, verify and export a storefront building.
//!
//! Geometry runs on the in-memory kernel. Openings are checked and recorded
//! on their walls, but the exported STL carries the walls uncut.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Build, verify and export a storefront building", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, verify all three stages and export one iteration
    Run {
        /// Building specification (.json)
        spec: PathBuf,
        /// Iteration number, used in checkpoint and export names
        #[arg(short, long, default_value_t = 1)]
        iteration: u32,
        /// Directory for checkpoint records
        #[arg(long)]
        checkpoint_dir: Option<PathBuf>,
        /// Directory for exported meshes
        #[arg(long)]
        export_dir: Option<PathBuf>,
        /// Absolute deviation that always passes
        #[arg(long)]
        floor: Option<f64>,
    },
    /// Load and validate a specification without building it
    Validate {
        /// Building specification (.json)
        spec: PathBuf,
    },
    /// Show which verification stages of an iteration are certified
    Status {
        #[arg(short, long, default_value_t = 1)]
        iteration: u32,
        #[arg(long)]
        checkpoint_dir: Option<PathBuf>,
    },
    /// Delete checkpoints of one iteration, or all of them
    Clear {
        #[arg(short, long, conflicts_with = "all")]
        iteration: Option<u32>,
        #[arg(long)]
        all: bool,
        #[arg(long)]
        checkpoint_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Run {
            spec,
            iteration,
            checkpoint_dir,
            export_dir,
            floor,
        } => {
            let config = commands::config(checkpoint_dir, export_dir, floor);
            commands::run(&spec, iteration, config)?
        }
        Commands::Validate { spec } => commands::validate(&spec)?,
        Commands::Status {
            iteration,
            checkpoint_dir,
        } => commands::status(&commands::config(checkpoint_dir, None, None), iteration)?,
        Commands::Clear {
            iteration,
            all,
            checkpoint_dir,
        } => {
            let config = commands::config(checkpoint_dir, None, None);
            match (iteration, all) {
                (Some(i), _) => commands::clear(&config, Some(i))?,
                (None, true) => commands::clear(&config, None)?,
                (None, false) => anyhow::bail!("pass --iteration N or --all"),
            }
        }
    };

    print!("{}", output);
    Ok(())
}
