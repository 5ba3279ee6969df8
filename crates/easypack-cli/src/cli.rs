use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::{generate::GenerateArgs, init::InitArgs};

/// easypack: generate start and shutdown scripts for a packaged JVM application
///
/// Reads easypack.yaml and writes start.sh / start.bat (and optionally
/// shutdown.sh) into the output folder.
#[derive(Parser, Debug)]
#[command(name = "easypack", version, about, long_about = None)]
pub struct Cli {
    /// Increase output verbosity (show debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to easypack.yaml (default: search the current directory and its parents)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Verbosity level resolved from --verbose / --quiet flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// --quiet: only errors and essential output
    Quiet,
    /// default: normal output
    Normal,
    /// --verbose: extra debug info
    Verbose,
}

impl Cli {
    /// Resolve the verbosity level from CLI flags
    pub fn verbosity(&self) -> Verbosity {
        match (self.quiet, self.verbose) {
            (true, _) => Verbosity::Quiet,
            (_, true) => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the start (and shutdown) scripts
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Write a starter easypack.yaml
    Init(InitArgs),

    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

/// Arguments for the `completion` command
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
