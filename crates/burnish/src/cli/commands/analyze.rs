//! Analyze command - test-quality analysis of a single file

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use burnish_engine::handlers::test_quality::{self, IssueSeverity};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Analyze the quality of one test file
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Test file to analyze
    pub file: PathBuf,
}

impl AnalyzeCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = %self.file.display(), "executing analyze command");

        let report = test_quality::analyze_test_file(&self.file)
            .map_err(|e| anyhow::anyhow!(e))?;

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!(
            "{} {}",
            output::header("Test quality:"),
            output::path_style().apply_to(self.file.display())
        );
        println!(
            "{}",
            output::key_value("score", &format!("{}/100", report.quality_score))
        );
        println!(
            "{}",
            output::key_value(
                "tests",
                &format!(
                    "{} total, {} useful",
                    report.metrics.total_tests, report.metrics.useful_tests
                ),
            )
        );
        println!(
            "{}",
            output::key_value("assertions", &report.metrics.total_assertions.to_string())
        );

        for issue in &report.issues {
            let line = format!("line {}: {}", issue.line, issue.message);
            match issue.severity {
                IssueSeverity::Error => output::error(&line),
                IssueSeverity::Warning => output::warning(&line),
            }
        }
        if report.issues.is_empty() && !cli.quiet {
            output::success("no issues found");
        }

        Ok(())
    }
}
