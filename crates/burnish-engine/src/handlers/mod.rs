//! Task handlers: one operation per task kind
//!
//! Handlers are stateless per task; format/lint/typecheck shell out to the
//! configured external tool, test-quality is a pure static analyzer. A
//! handler error is a `String` that the worker downgrades to a failed
//! result — it never aborts the worker.

pub mod format;
pub mod lint;
pub mod test_quality;
pub mod typecheck;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::warn;

use burnish_core::config::ToolsConfig;

use crate::task::{Task, TaskKind};

pub use format::FormatOutcome;
pub use lint::LintOutcome;
pub use test_quality::{IssueRule, IssueSeverity, QualityIssue, TestMetrics, TestQualityReport};
pub use typecheck::TypecheckOutcome;

/// Handler-specific structured outcome carried by a successful result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPayload {
    Format(FormatOutcome),
    Lint(LintOutcome),
    Typecheck(TypecheckOutcome),
    TestQuality(TestQualityReport),
}

/// Executes one task; the seam the pool dispatches through
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, task: &Task) -> Result<TaskPayload, String>;
}

/// An external tool command: argv prefix plus a resolved binary path
#[derive(Debug, Clone)]
pub struct Tool {
    argv: Vec<String>,
    resolved: Option<PathBuf>,
}

impl Tool {
    /// Resolve the binary once; a missing tool is reported at execution
    /// time as a task failure, not an engine error.
    pub fn resolve(argv: &[String]) -> Self {
        let resolved = argv.first().and_then(|bin| match which::which(bin) {
            Ok(path) => Some(path),
            Err(_) => {
                warn!(tool = %bin, "tool not found on PATH");
                None
            }
        });
        Self {
            argv: argv.to_vec(),
            resolved,
        }
    }

    /// Display name for error messages
    pub fn name(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("<unset>")
    }

    /// Run the tool against a single file, capturing combined output.
    pub async fn run(&self, file: &Path, timeout: Duration) -> Result<ToolOutput, String> {
        let program = self
            .resolved
            .as_ref()
            .ok_or_else(|| format!("{} not found on PATH", self.name()))?;

        let mut command = Command::new(program);
        command
            .args(&self.argv[1..])
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| format!("{} timed out after {}s", self.name(), timeout.as_secs()))?
            .map_err(|e| format!("failed to spawn {}: {}", self.name(), e))?;

        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Captured outcome of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, line by line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().chain(self.stderr.lines())
    }
}

/// The resolved tool commands for one engine run
#[derive(Debug, Clone)]
pub struct ToolSet {
    pub formatter: Tool,
    pub linter: Tool,
    pub typechecker: Tool,
    pub timeout: Duration,
}

impl ToolSet {
    pub fn from_config(tools: &ToolsConfig, timeout: Duration) -> Self {
        Self {
            formatter: Tool::resolve(&tools.formatter),
            linter: Tool::resolve(&tools.linter),
            typechecker: Tool::resolve(&tools.typechecker),
            timeout,
        }
    }
}

/// Production handler: dispatches on task kind to the matching operation
pub struct ToolHandlers {
    tools: ToolSet,
}

impl ToolHandlers {
    pub fn new(tools: ToolSet) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl TaskHandler for ToolHandlers {
    async fn handle(&self, task: &Task) -> Result<TaskPayload, String> {
        match task.kind {
            TaskKind::Format => format::run(&self.tools, &task.file_path)
                .await
                .map(TaskPayload::Format),
            TaskKind::Lint => lint::run(&self.tools, &task.file_path)
                .await
                .map(TaskPayload::Lint),
            TaskKind::Typecheck => typecheck::run(&self.tools, &task.file_path)
                .await
                .map(TaskPayload::Typecheck),
            TaskKind::TestQuality => {
                test_quality::analyze_test_file(&task.file_path).map(TaskPayload::TestQuality)
            }
        }
    }
}
