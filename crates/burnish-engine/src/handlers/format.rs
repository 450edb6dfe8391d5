//! Format handler: run the external formatter on one file

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolSet;

/// Outcome of formatting a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOutcome {
    /// Whether the formatter rewrote the file's content
    pub changed: bool,
}

/// Invoke the formatter in write mode and report whether content changed.
pub async fn run(tools: &ToolSet, file: &Path) -> Result<FormatOutcome, String> {
    let before = tokio::fs::read(file)
        .await
        .map_err(|e| format!("failed to read {}: {}", file.display(), e))?;

    let output = tools.formatter.run(file, tools.timeout).await?;
    if !output.success() {
        return Err(format!(
            "{} exited with code {}: {}",
            tools.formatter.name(),
            output.exit_code,
            output.stderr.trim()
        ));
    }

    let after = tokio::fs::read(file)
        .await
        .map_err(|e| format!("failed to re-read {}: {}", file.display(), e))?;

    let changed = before != after;
    debug!(file = %file.display(), changed, "formatted");
    Ok(FormatOutcome { changed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    use burnish_core::config::ToolsConfig;

    fn tools_with_formatter(argv: Vec<String>) -> ToolSet {
        let config = ToolsConfig {
            formatter: argv,
            ..ToolsConfig::default()
        };
        ToolSet::from_config(&config, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_unchanged_file_reports_no_change() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        std::fs::write(&file, "const a = 1;\n").unwrap();

        // `true` exits 0 without touching the file
        let tools = tools_with_formatter(vec!["true".to_string()]);
        let outcome = run(&tools, &file).await.unwrap();
        assert!(!outcome.changed);
    }

    #[tokio::test]
    async fn test_failing_formatter_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        std::fs::write(&file, "const a = 1;\n").unwrap();

        let tools = tools_with_formatter(vec!["false".to_string()]);
        let err = run(&tools, &file).await.unwrap_err();
        assert!(err.contains("exited with code"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let tools = tools_with_formatter(vec!["true".to_string()]);
        let err = run(&tools, &temp.path().join("missing.ts")).await.unwrap_err();
        assert!(err.contains("failed to read"));
    }
}
