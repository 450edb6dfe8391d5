//! Task execution reporting

use std::sync::Mutex;
use std::time::Duration;

use crate::task::TaskKind;

/// Events emitted during an engine run
#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// The pool is starting
    RunStarted { total: usize, workers: usize },
    /// A worker picked up a task
    Started {
        task_id: String,
        kind: TaskKind,
        worker_id: String,
    },
    /// A task completed successfully
    Completed {
        task_id: String,
        worker_id: String,
        duration: Duration,
    },
    /// A task failed; the run continues
    Failed {
        task_id: String,
        worker_id: String,
        duration: Duration,
        error: String,
    },
    /// A worker observed the stop flag and exited its loop
    WorkerStopped {
        worker_id: String,
        completed: usize,
    },
    /// All tasks have a result
    RunCompleted {
        total: usize,
        succeeded: usize,
        failed: usize,
        duration: Duration,
    },
}

/// Trait for reporting engine progress
pub trait TaskReporter: Send + Sync {
    /// Handle a task event
    fn report(&self, event: &TaskEvent);
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TaskReporter for TracingReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::RunStarted { total, workers } => {
                tracing::info!("Starting run: {} tasks across {} workers", total, workers);
            }
            TaskEvent::Started {
                task_id,
                kind,
                worker_id,
            } => {
                tracing::debug!("[{}] starting {} ({})", worker_id, task_id, kind);
            }
            TaskEvent::Completed {
                task_id,
                worker_id,
                duration,
            } => {
                tracing::debug!(
                    "[{}] {} completed in {}ms",
                    worker_id,
                    task_id,
                    duration.as_millis()
                );
            }
            TaskEvent::Failed {
                task_id,
                worker_id,
                duration,
                error,
            } => {
                tracing::warn!(
                    "[{}] {} failed after {}ms: {}",
                    worker_id,
                    task_id,
                    duration.as_millis(),
                    error
                );
            }
            TaskEvent::WorkerStopped {
                worker_id,
                completed,
            } => {
                tracing::debug!("{} stopped after {} tasks", worker_id, completed);
            }
            TaskEvent::RunCompleted {
                total,
                succeeded,
                failed,
                duration,
            } => {
                tracing::info!(
                    "Run complete: {}/{} succeeded, {} failed ({:.1}s)",
                    succeeded,
                    total,
                    failed,
                    duration.as_secs_f64()
                );
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<TaskEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TaskReporter for CollectingReporter {
    fn report(&self, event: &TaskEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
