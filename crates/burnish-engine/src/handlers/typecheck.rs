//! Typecheck handler: run the external type checker on one file

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolSet;

/// Fixed table mapping diagnostic substrings to human-readable suggestions
const SUGGESTION_TABLE: &[(&str, &str)] = &[
    (
        "has no exported member",
        "Check the import name against the module's actual exports",
    ),
    (
        "Property does not exist",
        "Verify the property name or extend the type definition",
    ),
    (
        "is not assignable",
        "Align the value's type with the declared type",
    ),
    (
        "possibly undefined",
        "Guard the value with an undefined check or optional chaining",
    ),
    (
        "Cannot find module",
        "Install the missing dependency or fix the import path",
    ),
    (
        "implicitly has an 'any' type",
        "Add an explicit type annotation",
    ),
];

/// Outcome of type-checking a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypecheckOutcome {
    /// Diagnostic lines referencing the checked file
    pub diagnostics: Vec<String>,
    /// Deduplicated suggestions derived from the diagnostics
    pub suggestions: Vec<String>,
    /// No diagnostics reported for the file
    pub clean: bool,
}

/// Invoke the type checker in no-emit mode and parse the diagnostics
/// referencing this file.
///
/// A non-zero exit is how the checker reports diagnostics, so any exit
/// code yields a completed result; only spawn failures and timeouts fail
/// the task.
pub async fn run(tools: &ToolSet, file: &Path) -> Result<TypecheckOutcome, String> {
    let output = tools.typechecker.run(file, tools.timeout).await?;

    let diagnostics = relevant_diagnostics(output.lines(), file);
    let suggestions = suggestions_for(&diagnostics);
    let clean = diagnostics.is_empty();

    debug!(
        file = %file.display(),
        diagnostics = diagnostics.len(),
        clean,
        "type-checked"
    );
    Ok(TypecheckOutcome {
        diagnostics,
        suggestions,
        clean,
    })
}

/// Keep lines that carry a diagnostic code and reference the target file
pub fn relevant_diagnostics<'a>(
    lines: impl Iterator<Item = &'a str>,
    file: &Path,
) -> Vec<String> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    lines
        .filter(|line| line.contains("error TS") && references_file(line, file_name))
        .map(|line| line.trim().to_string())
        .collect()
}

/// The location segment before `(` must end at a path boundary with the
/// file name, so `app.ts` does not claim diagnostics for `webapp.ts`.
fn references_file(line: &str, file_name: &str) -> bool {
    if file_name.is_empty() {
        return false;
    }
    let location = line.split('(').next().unwrap_or(line).trim();
    location == file_name
        || location.ends_with(&format!("/{}", file_name))
        || location.ends_with(&format!("\\{}", file_name))
}

/// Map diagnostics against the fixed substring table, deduplicated and in
/// table order of first match.
pub fn suggestions_for(diagnostics: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for diagnostic in diagnostics {
        for (needle, suggestion) in SUGGESTION_TABLE {
            if diagnostic.contains(needle) && seen.insert(*suggestion) {
                suggestions.push((*suggestion).to_string());
            }
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_diagnostics_filters_other_files() {
        let output = "\
src/app.ts(3,5): error TS2339: Property does not exist on type 'User'.
src/other.ts(1,1): error TS2304: Cannot find name 'x'.
src/app.ts(9,1): warning: something benign
Found 2 errors.";
        let diags = relevant_diagnostics(output.lines(), Path::new("src/app.ts"));
        assert_eq!(diags.len(), 1);
        assert!(diags[0].contains("TS2339"));
    }

    #[test]
    fn test_similar_file_name_not_claimed() {
        let output = "\
src/webapp.ts(1,1): error TS2322: Type 'string' is not assignable to type 'number'.
src/app.ts(2,2): error TS2322: Type 'string' is not assignable to type 'number'.";
        let diags = relevant_diagnostics(output.lines(), Path::new("src/app.ts"));
        assert_eq!(diags.len(), 1);
        assert!(diags[0].starts_with("src/app.ts"));
    }

    #[test]
    fn test_bare_file_name_matches() {
        let output = "app.ts(1,1): error TS2304: Cannot find name 'x'.";
        let diags = relevant_diagnostics(output.lines(), Path::new("app.ts"));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_suggestions_deduplicated() {
        let diags = vec![
            "app.ts(1,1): error TS2339: Property does not exist on type 'A'.".to_string(),
            "app.ts(2,1): error TS2339: Property does not exist on type 'B'.".to_string(),
            "app.ts(3,1): error TS2307: Cannot find module './missing'.".to_string(),
        ];
        let suggestions = suggestions_for(&diags);
        assert_eq!(
            suggestions,
            vec![
                "Verify the property name or extend the type definition",
                "Install the missing dependency or fix the import path",
            ]
        );
    }

    #[test]
    fn test_unknown_diagnostic_yields_no_suggestion() {
        let diags = vec!["app.ts(1,1): error TS1005: ';' expected.".to_string()];
        assert!(suggestions_for(&diags).is_empty());
    }

    #[test]
    fn test_clean_output() {
        let diags = relevant_diagnostics("".lines(), Path::new("a.ts"));
        assert!(diags.is_empty());
        assert!(suggestions_for(&diags).is_empty());
    }
}
