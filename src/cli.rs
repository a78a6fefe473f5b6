use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cpf-scan")]
#[command(about = "Find and validate CPF numbers in a directory tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan directories for CPF numbers and report the valid ones
    Scan(ScanArgs),
    /// Check whether the given CPF numbers are valid
    Check(CheckArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directories to scan. Falls back to `root_paths` from Config.toml
    pub roots: Vec<PathBuf>,

    /// Number of worker threads (0 = one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Do not print a line for every candidate found
    #[arg(short, long)]
    pub summary_only: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// CPF numbers, punctuated or bare
    #[arg(required = true)]
    pub ids: Vec<String>,
}
