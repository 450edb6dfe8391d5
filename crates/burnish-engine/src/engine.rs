//! Engine façade: walk, generate, drain, summarize

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use burnish_core::config::Config;
use burnish_core::error::Result;

use crate::generator;
use crate::handlers::{ToolHandlers, ToolSet};
use crate::pool::{PoolOptions, WorkerPool};
use crate::reporter::TracingReporter;
use crate::summary::RunSummary;
use crate::task::TaskResult;

/// Options for one engine run
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Worker count override; wins over the config value
    pub workers: Option<usize>,
    /// Loaded configuration (defaults if no file was found)
    pub config: Config,
}

/// Everything the caller needs from a finished run
#[derive(Debug, Serialize, Deserialize)]
pub struct EngineReport {
    pub results: Vec<TaskResult>,
    pub summary: RunSummary,
}

/// Run the full engine against a file tree.
///
/// Enumerator failure aborts before any task executes; individual task
/// failures are reported in the results and never fail the run.
pub async fn run_engine(root: &Path, options: EngineOptions) -> Result<EngineReport> {
    let start = Instant::now();
    let config = &options.config;

    let tasks = generator::generate_all_tasks(root, &config.walker.ignore)?;
    info!(root = %root.display(), tasks = tasks.len(), "engine run starting");

    let mut pool_options = PoolOptions::from_config(&config.engine);
    if options.workers.is_some() {
        pool_options.workers = options.workers;
    }

    let tools = ToolSet::from_config(
        &config.tools,
        Duration::from_secs(config.engine.tool_timeout_secs),
    );
    let pool = WorkerPool::new(
        pool_options,
        Arc::new(ToolHandlers::new(tools)),
        Arc::new(TracingReporter),
    );

    let run = pool.process_all_tasks(tasks).await;
    let summary = RunSummary::build(&run.results, &run.workers, start.elapsed());

    Ok(EngineReport {
        results: run.results,
        summary,
    })
}
