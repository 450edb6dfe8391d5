//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{AnalyzeCommand, PlanCommand, RunCommand};

/// Burnish - Concurrent code-quality sweep CLI
#[derive(Debug, Parser)]
#[command(name = "burnish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full quality sweep over a file tree
    Run(RunCommand),

    /// Generate and print the task list without executing it
    Plan(PlanCommand),

    /// Analyze the quality of a single test file
    Analyze(AnalyzeCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            Commands::Run(ref cmd) => cmd.execute(self),
            Commands::Plan(ref cmd) => cmd.execute(self),
            Commands::Analyze(ref cmd) => cmd.execute(self),
        }
    }
}
