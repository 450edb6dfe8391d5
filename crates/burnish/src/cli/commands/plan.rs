//! Plan command - print the task list without executing it

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use burnish_core::config;
use burnish_engine::generate_all_tasks;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

use super::run::resolve_path;

/// Show which tasks a run would execute
#[derive(Debug, Args)]
pub struct PlanCommand {
    /// Path to the project (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl PlanCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(path = %self.path.display(), "executing plan command");

        let path = resolve_path(&self.path)?;
        let (config, _) = config::load_config_or_default(&path);

        let mut tasks = generate_all_tasks(&path, &config.walker.ignore)
            .map_err(burnish_core::BurnishError::from)?;
        // Present in service order: priority descending, cheap first
        tasks.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.estimated_complexity.cmp(&b.estimated_complexity))
                .then(a.file_path.cmp(&b.file_path))
        });

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
            return Ok(());
        }

        for task in &tasks {
            println!(
                "{:<14} p{} {}",
                task.kind,
                task.priority,
                output::path_style().apply_to(task.file_path.display())
            );
        }
        if !cli.quiet {
            output::success(&format!("{} tasks planned", tasks.len()));
        }

        Ok(())
    }
}
