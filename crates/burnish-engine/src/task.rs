//! Task model: kinds, tasks, results, worker state

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::handlers::TaskPayload;

/// The four code-quality operations
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Format,
    Lint,
    Typecheck,
    TestQuality,
}

impl TaskKind {
    /// Stable string form, used in task ids and report keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Lint => "lint",
            Self::Typecheck => "typecheck",
            Self::TestQuality => "test-quality",
        }
    }

    /// Scheduling priority; higher values are serviced first
    pub fn priority(&self) -> u8 {
        match self {
            Self::Format => 1,
            Self::Lint => 2,
            Self::Typecheck => 3,
            Self::TestQuality => 4,
        }
    }

    /// Relative cost estimate, used only to break priority ties
    /// (cheaper tasks of equal priority run first)
    pub fn estimated_complexity(&self) -> u8 {
        match self {
            Self::Format => 1,
            Self::Lint => 2,
            Self::Typecheck => 3,
            Self::TestQuality => 4,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable unit of work: one operation on one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique id, derived from kind and path
    pub id: String,
    /// Operation to perform
    pub kind: TaskKind,
    /// Target file
    pub file_path: PathBuf,
    /// Higher values are serviced first
    pub priority: u8,
    /// Tie-break among equal priorities, ascending
    pub estimated_complexity: u8,
}

impl Task {
    /// Create a task for a file; priority and complexity follow the kind
    pub fn new(kind: TaskKind, file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        Self {
            id: format!("{}-{}", kind.as_str(), file_path.display()),
            kind,
            file_path,
            priority: kind.priority(),
            estimated_complexity: kind.estimated_complexity(),
        }
    }
}

/// The recorded outcome of executing one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: String,
    pub worker_id: String,
    pub file_path: PathBuf,
    pub kind: TaskKind,
    pub success: bool,
    /// Handler-specific structured outcome; present on success
    pub payload: Option<TaskPayload>,
    /// Present iff `success == false`
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl TaskResult {
    /// Build a successful result
    pub fn succeeded(task: &Task, worker_id: &str, payload: TaskPayload, duration: Duration) -> Self {
        Self {
            task_id: task.id.clone(),
            worker_id: worker_id.to_string(),
            file_path: task.file_path.clone(),
            kind: task.kind,
            success: true,
            payload: Some(payload),
            error: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// Build a failed result; the failure never propagates past the worker
    pub fn failed(task: &Task, worker_id: &str, error: String, duration: Duration) -> Self {
        Self {
            task_id: task.id.clone(),
            worker_id: worker_id.to_string(),
            file_path: task.file_path.clone(),
            kind: task.kind,
            success: false,
            payload: None,
            error: Some(error),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Per-worker counters, owned by the worker's loop and snapshot after
/// the pool drains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerState {
    pub id: String,
    pub busy: bool,
    pub current_task: Option<String>,
    pub completed_tasks: usize,
    pub total_processing_ms: u64,
}

impl WorkerState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            busy: false,
            current_task: None,
            completed_tasks: 0,
            total_processing_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::format::FormatOutcome;

    #[test]
    fn test_task_id_derivation() {
        let task = Task::new(TaskKind::Lint, "src/app.ts");
        assert_eq!(task.id, "lint-src/app.ts");
        assert_eq!(task.priority, 2);
        assert_eq!(task.estimated_complexity, 2);
    }

    #[test]
    fn test_kind_priorities_ascend_with_cost() {
        assert_eq!(TaskKind::Format.priority(), 1);
        assert_eq!(TaskKind::Lint.priority(), 2);
        assert_eq!(TaskKind::Typecheck.priority(), 3);
        assert_eq!(TaskKind::TestQuality.priority(), 4);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TaskKind::TestQuality.to_string(), "test-quality");
    }

    #[test]
    fn test_failed_result_carries_error() {
        let task = Task::new(TaskKind::Format, "a.ts");
        let result = TaskResult::failed(&task, "worker-1", "boom".into(), Duration::from_millis(3));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_succeeded_result_has_no_error() {
        let task = Task::new(TaskKind::Format, "a.ts");
        let result = TaskResult::succeeded(
            &task,
            "worker-1",
            TaskPayload::Format(FormatOutcome { changed: true }),
            Duration::from_millis(5),
        );
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.duration_ms, 5);
    }
}
