//! Task generation: classify enumerated files into quality tasks

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use burnish_core::error::WalkError;
use burnish_core::walker;

use crate::task::{Task, TaskKind};

/// Extensions in the lintable source family
const LINTABLE_EXTS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Extensions carrying static type information
const TYPED_EXTS: &[&str] = &["ts", "tsx"];

/// Non-source extensions the formatter still covers
const FORMAT_ONLY_EXTS: &[&str] = &["json", "css", "scss", "md", "html", "yml", "yaml"];

/// Walk the tree under `root` and produce the full task list.
///
/// Enumerator failure aborts generation before any task exists; an empty
/// tree yields an empty list, which is not an error.
pub fn generate_all_tasks(root: &Path, extra_ignores: &[String]) -> Result<Vec<Task>, WalkError> {
    let files = walker::list_files(root, extra_ignores)?;

    let mut tasks = Vec::new();
    let mut seen: HashSet<(TaskKind, PathBuf)> = HashSet::new();
    for file in &files {
        for task in tasks_for_file(file) {
            // The generator must never emit the same (kind, path) pair twice
            if seen.insert((task.kind, task.file_path.clone())) {
                tasks.push(task);
            }
        }
    }

    info!(
        root = %root.display(),
        files = files.len(),
        tasks = tasks.len(),
        "generated task list"
    );
    Ok(tasks)
}

/// Classify a single file into zero or more tasks
pub fn tasks_for_file(path: &Path) -> Vec<Task> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Vec::new();
    };

    let lintable = LINTABLE_EXTS.contains(&ext);
    let formattable = lintable || FORMAT_ONLY_EXTS.contains(&ext);
    if !formattable {
        debug!(path = %path.display(), "file not eligible for any task");
        return Vec::new();
    }

    let mut tasks = vec![Task::new(TaskKind::Format, path)];
    if lintable {
        tasks.push(Task::new(TaskKind::Lint, path));
    }
    if TYPED_EXTS.contains(&ext) {
        tasks.push(Task::new(TaskKind::Typecheck, path));
    }
    if lintable && is_test_file(path) {
        tasks.push(Task::new(TaskKind::TestQuality, path));
    }
    tasks
}

/// Check whether a file follows a test naming convention: a `.test.*` /
/// `.spec.*` suffix, or residing under a `tests` / `__tests__` directory.
pub fn is_test_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.contains(".test.") || name.contains(".spec.") {
        return true;
    }
    path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("tests") | Some("__tests__")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn kinds(tasks: &[Task]) -> Vec<TaskKind> {
        tasks.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_plain_source_file() {
        let tasks = tasks_for_file(Path::new("src/a.ts"));
        assert_eq!(
            kinds(&tasks),
            vec![TaskKind::Format, TaskKind::Lint, TaskKind::Typecheck]
        );
    }

    #[test]
    fn test_test_file_gets_all_four() {
        let tasks = tasks_for_file(Path::new("src/b.test.ts"));
        assert_eq!(
            kinds(&tasks),
            vec![
                TaskKind::Format,
                TaskKind::Lint,
                TaskKind::Typecheck,
                TaskKind::TestQuality
            ]
        );
    }

    #[test]
    fn test_config_file_format_only() {
        let tasks = tasks_for_file(Path::new("c.json"));
        assert_eq!(kinds(&tasks), vec![TaskKind::Format]);
    }

    #[test]
    fn test_untyped_source_has_no_typecheck() {
        let tasks = tasks_for_file(Path::new("lib/util.js"));
        assert_eq!(kinds(&tasks), vec![TaskKind::Format, TaskKind::Lint]);
    }

    #[test]
    fn test_ineligible_file() {
        assert!(tasks_for_file(Path::new("logo.png")).is_empty());
        assert!(tasks_for_file(Path::new("Makefile")).is_empty());
    }

    #[test]
    fn test_tests_directory_convention() {
        assert!(is_test_file(Path::new("src/__tests__/app.ts")));
        assert!(is_test_file(Path::new("tests/integration.js")));
        assert!(is_test_file(Path::new("src/app.spec.tsx")));
        assert!(!is_test_file(Path::new("src/app.ts")));
    }

    #[test]
    fn test_concrete_scenario_eight_tasks() {
        let temp = TempDir::new().unwrap();
        for name in ["a.ts", "b.test.ts", "c.json"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }

        let tasks = generate_all_tasks(temp.path(), &[]).unwrap();
        assert_eq!(tasks.len(), 8);

        let count = |kind: TaskKind| tasks.iter().filter(|t| t.kind == kind).count();
        assert_eq!(count(TaskKind::Format), 3);
        assert_eq!(count(TaskKind::Lint), 2);
        assert_eq!(count(TaskKind::Typecheck), 2);
        assert_eq!(count(TaskKind::TestQuality), 1);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        for name in ["src/a.ts", "src/a.test.ts", "readme.md"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }

        let ids = |tasks: &[Task]| {
            let mut ids: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
            ids.sort();
            ids
        };

        let first = generate_all_tasks(temp.path(), &[]).unwrap();
        let second = generate_all_tasks(temp.path(), &[]).unwrap();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_no_duplicate_kind_path_pairs() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.test.ts"), "").unwrap();

        let tasks = generate_all_tasks(temp.path(), &[]).unwrap();
        let mut pairs: Vec<(TaskKind, PathBuf)> = tasks
            .iter()
            .map(|t| (t.kind, t.file_path.clone()))
            .collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), before);
    }

    #[test]
    fn test_generator_propagates_walk_error() {
        let err = generate_all_tasks(Path::new("/nonexistent/burnish"), &[]).unwrap_err();
        assert!(matches!(err, WalkError::RootNotFound(_)));
    }
}
