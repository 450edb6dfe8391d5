//! Run command - execute the full quality sweep

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use burnish_core::config::{self, Config};
use burnish_engine::{run_engine, EngineOptions, EngineReport};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Run the quality sweep
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Path to the project (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Number of workers (default: min(6, available parallelism))
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Explicit config file (default: search for burnish.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RunCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(workers = ?self.workers, "executing run command");

        let path = resolve_path(&self.path)?;
        let config = self.load_config(&path)?;

        let options = EngineOptions {
            workers: self.workers,
            config,
        };

        let runtime = tokio::runtime::Runtime::new()?;
        let report = runtime.block_on(run_engine(&path, options))?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_report(&report, cli.quiet, cli.verbose),
        }

        // Task failures are reported, not fatal; only engine errors
        // (already propagated above) produce a non-zero exit.
        Ok(())
    }

    fn load_config(&self, dir: &std::path::Path) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Ok(config::load_config(path)?),
            None => Ok(config::load_config_or_default(dir).0),
        }
    }
}

pub(crate) fn resolve_path(path: &std::path::Path) -> anyhow::Result<PathBuf> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !resolved.exists() {
        anyhow::bail!("Path not found: {}", resolved.display());
    }
    Ok(resolved)
}

fn print_report(report: &EngineReport, quiet: bool, verbose: bool) {
    let summary = &report.summary;

    if verbose {
        for result in &report.results {
            let status = if result.success { "ok" } else { "failed" };
            println!(
                "{:<14} {:<7} {}ms {}",
                result.kind,
                status,
                result.duration_ms,
                output::path_style().apply_to(result.file_path.display())
            );
        }
    }

    if !quiet {
        println!("{}", output::header("Quality sweep"));
        for (kind, counts) in &summary.by_kind {
            let line = format!(
                "{:<14} {} succeeded, {} failed",
                kind, counts.succeeded, counts.failed
            );
            if counts.failed > 0 {
                output::warning(&line);
            } else {
                output::info(&line);
            }
        }

        for worker in &summary.by_worker {
            println!(
                "{}",
                output::key_value(
                    &worker.id,
                    &format!(
                        "{} tasks, {}ms busy",
                        worker.completed_tasks, worker.total_processing_ms
                    ),
                )
            );
        }
    }

    // Failed results are always surfaced, even under --quiet
    for result in report.results.iter().filter(|r| !r.success) {
        let error = result.error.as_deref().unwrap_or("unknown error");
        output::error(&format!(
            "{} {}: {}",
            result.kind,
            output::path_style().apply_to(result.file_path.display()),
            error
        ));
    }

    if !quiet {
        let totals = format!(
            "{} tasks in {}ms ({:.1}/s)",
            style(summary.total_tasks).bold(),
            summary.total_duration_ms,
            summary.throughput_per_sec
        );
        if summary.failed == 0 {
            output::success(&totals);
        } else {
            output::warning(&format!("{}, {} failed", totals, summary.failed));
        }
    }
}
