//! Lint handler: run the external linter with auto-fix on one file

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolSet;

/// Outcome of linting a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintOutcome {
    /// Output lines reporting errors
    pub errors: Vec<String>,
    /// Output lines reporting warnings
    pub warnings: Vec<String>,
    /// Whether auto-fix rewrote the file
    pub fixed: bool,
}

/// Invoke the linter with auto-fix and parse its textual output.
///
/// Exit code 1 conventionally means "problems found" (eslint), which is
/// still a completed lint run; only spawn failures, timeouts, and higher
/// exit codes fail the task.
pub async fn run(tools: &ToolSet, file: &Path) -> Result<LintOutcome, String> {
    let before = tokio::fs::read(file)
        .await
        .map_err(|e| format!("failed to read {}: {}", file.display(), e))?;

    let output = tools.linter.run(file, tools.timeout).await?;
    if output.exit_code > 1 {
        return Err(format!(
            "{} exited with code {}: {}",
            tools.linter.name(),
            output.exit_code,
            output.stderr.trim()
        ));
    }

    let (errors, warnings) = classify_output(output.lines());

    let after = tokio::fs::read(file)
        .await
        .map_err(|e| format!("failed to re-read {}: {}", file.display(), e))?;
    let fixed = before != after;

    debug!(
        file = %file.display(),
        errors = errors.len(),
        warnings = warnings.len(),
        fixed,
        "linted"
    );
    Ok(LintOutcome {
        errors,
        warnings,
        fixed,
    })
}

/// Split tool output lines into error and warning lists
pub fn classify_output<'a>(lines: impl Iterator<Item = &'a str>) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_lowercase();
        if lower.contains("error") {
            errors.push(trimmed.to_string());
        } else if lower.contains("warning") {
            warnings.push(trimmed.to_string());
        }
    }
    (errors, warnings)
}
