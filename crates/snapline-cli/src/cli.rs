use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "snapline",
    about = "Snapline — line-by-line snapshot checks for text output",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check input against a recorded snapshot, recording it when missing
    Check(CheckArgs),
    /// Compare two files line by line
    Compare(CompareArgs),
    /// Print a recorded snapshot
    Show(ShowArgs),
}

/// Where snapshots are stored.
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Snapshot directory (overrides the configuration file)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Snapshot file extension (overrides the configuration file)
    #[arg(long)]
    pub extension: Option<String>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Snapshot identifier
    pub id: String,
    /// File holding the received text; reads stdin when absent or `-`
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Rewrite the snapshot instead of comparing
    #[arg(short, long)]
    pub update: bool,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference (expected) file
    pub reference: PathBuf,
    /// Received file
    pub received: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Snapshot identifier
    pub id: String,
    #[command(flatten)]
    pub store: StoreArgs,
}
