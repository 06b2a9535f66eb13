use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "media-pruner")]
#[command(about = "Remove superseded versions of media files, keeping the newest N", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show what would be kept and deleted, then delete after confirmation
    Clean(TargetArgs),
    /// Show what would be kept and deleted without deleting anything
    Plan(TargetArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Directories to scan (each subdirectory is processed separately)
    #[arg(required = true)]
    pub directories: Vec<PathBuf>,

    /// Number of versions to keep (if not provided, will prompt)
    #[arg(long, short = 'n')]
    pub versions: Option<usize>,
}
