//! Worker pool: the concurrency core
//!
//! A fixed set of workers pulls from the shared queue until every task has
//! a result. Shared state is limited to the queue, the results vector, and
//! two atomics; workers never share their own counters.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::error;

use burnish_core::config::EngineConfig;

use crate::handlers::TaskHandler;
use crate::queue::TaskQueue;
use crate::reporter::{TaskEvent, TaskReporter};
use crate::task::{Task, TaskResult, WorkerState};

/// Options for the worker pool
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Worker count override; defaults to min(6, available parallelism)
    pub workers: Option<usize>,
    /// Sleep when a worker finds the queue empty
    pub idle_poll: Duration,
    /// Completion watcher poll interval
    pub watch_poll: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            workers: None,
            idle_poll: Duration::from_millis(100),
            watch_poll: Duration::from_millis(50),
        }
    }
}

impl PoolOptions {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            workers: config.workers,
            idle_poll: Duration::from_millis(config.idle_poll_ms),
            watch_poll: Duration::from_millis(config.watch_poll_ms),
        }
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Default worker count: min(6, available parallelism)
pub fn default_worker_count() -> usize {
    available_parallelism().min(6)
}

/// Outcome of a drained pool: every submitted task has exactly one result
#[derive(Debug)]
pub struct PoolRun {
    /// Results sorted by file path (then kind) for deterministic output
    pub results: Vec<TaskResult>,
    /// Post-shutdown snapshots of each worker's counters
    pub workers: Vec<WorkerState>,
}

/// Fixed-size pool of workers draining a shared task queue
pub struct WorkerPool {
    options: PoolOptions,
    handler: Arc<dyn TaskHandler>,
    reporter: Arc<dyn TaskReporter>,
}

impl WorkerPool {
    pub fn new(
        options: PoolOptions,
        handler: Arc<dyn TaskHandler>,
        reporter: Arc<dyn TaskReporter>,
    ) -> Self {
        Self {
            options,
            handler,
            reporter,
        }
    }

    /// Execute every task and return once all results exist.
    ///
    /// Invariants: each task is dequeued exactly once; `completed` equals
    /// the results length after every publish; no task is abandoned once a
    /// worker starts it.
    pub async fn process_all_tasks(&self, tasks: Vec<Task>) -> PoolRun {
        let start = Instant::now();
        let total = tasks.len();

        if total == 0 {
            self.reporter.report(&TaskEvent::RunCompleted {
                total: 0,
                succeeded: 0,
                failed: 0,
                duration: start.elapsed(),
            });
            return PoolRun {
                results: Vec::new(),
                workers: Vec::new(),
            };
        }

        let worker_count = self
            .options
            .workers
            .unwrap_or_else(default_worker_count)
            .clamp(1, total);

        self.reporter.report(&TaskEvent::RunStarted {
            total,
            workers: worker_count,
        });

        let queue = Arc::new(TaskQueue::new(tasks));
        let results: Arc<Mutex<Vec<TaskResult>>> = Arc::new(Mutex::new(Vec::with_capacity(total)));
        let completed = Arc::new(AtomicUsize::new(0));
        let running = Arc::new(AtomicBool::new(true));

        let mut handles = Vec::with_capacity(worker_count);
        for n in 0..worker_count {
            handles.push(tokio::spawn(worker_loop(
                format!("worker-{}", n + 1),
                queue.clone(),
                results.clone(),
                completed.clone(),
                running.clone(),
                self.handler.clone(),
                self.reporter.clone(),
                self.options.idle_poll,
            )));
        }

        // Completion watcher: flip the stop flag once every task has a
        // result. Workers mid-task finish their unit before observing it.
        let watch_poll = self.options.watch_poll;
        let watcher = {
            let completed = completed.clone();
            let running = running.clone();
            tokio::spawn(async move {
                loop {
                    if completed.load(Ordering::SeqCst) >= total {
                        running.store(false, Ordering::SeqCst);
                        break;
                    }
                    tokio::time::sleep(watch_poll).await;
                }
            })
        };
        let _ = watcher.await;

        let mut workers = Vec::with_capacity(worker_count);
        for handle in handles {
            match handle.await {
                Ok(state) => workers.push(state),
                Err(e) => error!("worker panicked: {}", e),
            }
        }

        let mut final_results: Vec<TaskResult> = std::mem::take(&mut *results.lock().unwrap());
        final_results.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then(a.kind.cmp(&b.kind))
                .then(a.task_id.cmp(&b.task_id))
        });

        let succeeded = final_results.iter().filter(|r| r.success).count();
        self.reporter.report(&TaskEvent::RunCompleted {
            total,
            succeeded,
            failed: final_results.len() - succeeded,
            duration: start.elapsed(),
        });

        PoolRun {
            results: final_results,
            workers,
        }
    }
}

/// One worker's pull-execute-publish loop
#[allow(clippy::too_many_arguments)]
async fn worker_loop(
    worker_id: String,
    queue: Arc<TaskQueue>,
    results: Arc<Mutex<Vec<TaskResult>>>,
    completed: Arc<AtomicUsize>,
    running: Arc<AtomicBool>,
    handler: Arc<dyn TaskHandler>,
    reporter: Arc<dyn TaskReporter>,
    idle_poll: Duration,
) -> WorkerState {
    let mut state = WorkerState::new(worker_id);

    while running.load(Ordering::SeqCst) {
        let Some(task) = queue.pop() else {
            // Queue empty but other workers may still be in flight;
            // bounded sleep instead of busy-spinning.
            state.busy = false;
            tokio::time::sleep(idle_poll).await;
            continue;
        };

        state.busy = true;
        state.current_task = Some(task.id.clone());
        reporter.report(&TaskEvent::Started {
            task_id: task.id.clone(),
            kind: task.kind,
            worker_id: state.id.clone(),
        });

        let task_start = Instant::now();
        // The handler runs in its own spawned task so a panic surfaces as
        // a JoinError here instead of killing this worker's loop.
        let outcome = {
            let handler = handler.clone();
            let task = task.clone();
            match tokio::spawn(async move { handler.handle(&task).await }).await {
                Ok(outcome) => outcome,
                Err(e) => Err(format!("handler panicked: {}", e)),
            }
        };
        let duration = task_start.elapsed();

        // A failing handler is downgraded to a failed result; it never
        // aborts this worker or the run.
        let result = match outcome {
            Ok(payload) => {
                reporter.report(&TaskEvent::Completed {
                    task_id: task.id.clone(),
                    worker_id: state.id.clone(),
                    duration,
                });
                TaskResult::succeeded(&task, &state.id, payload, duration)
            }
            Err(error) => {
                reporter.report(&TaskEvent::Failed {
                    task_id: task.id.clone(),
                    worker_id: state.id.clone(),
                    duration,
                    error: error.clone(),
                });
                TaskResult::failed(&task, &state.id, error, duration)
            }
        };

        results.lock().unwrap().push(result);
        completed.fetch_add(1, Ordering::SeqCst);
        state.completed_tasks += 1;
        state.total_processing_ms += duration.as_millis() as u64;
        state.current_task = None;
        state.busy = false;
    }

    reporter.report(&TaskEvent::WorkerStopped {
        worker_id: state.id.clone(),
        completed: state.completed_tasks,
    });
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::handlers::{format::FormatOutcome, TaskPayload};
    use crate::reporter::CollectingReporter;
    use crate::task::TaskKind;

    struct AlwaysOk;

    #[async_trait]
    impl TaskHandler for AlwaysOk {
        async fn handle(&self, _task: &Task) -> Result<TaskPayload, String> {
            Ok(TaskPayload::Format(FormatOutcome { changed: false }))
        }
    }

    #[test]
    fn test_default_worker_count_bounds() {
        let count = default_worker_count();
        assert!(count >= 1);
        assert!(count <= 6);
    }

    #[tokio::test]
    async fn test_zero_tasks_returns_immediately() {
        let reporter = Arc::new(CollectingReporter::default());
        let pool = WorkerPool::new(PoolOptions::default(), Arc::new(AlwaysOk), reporter.clone());

        let run = pool.process_all_tasks(Vec::new()).await;
        assert!(run.results.is_empty());
        assert!(run.workers.is_empty());
        assert_eq!(reporter.events().len(), 1);
    }

    #[tokio::test]
    async fn test_worker_count_clamped_to_task_count() {
        let reporter = Arc::new(CollectingReporter::default());
        let options = PoolOptions {
            workers: Some(16),
            ..Default::default()
        };
        let pool = WorkerPool::new(options, Arc::new(AlwaysOk), reporter);

        let tasks = vec![
            Task::new(TaskKind::Format, "a.ts"),
            Task::new(TaskKind::Format, "b.ts"),
        ];
        let run = pool.process_all_tasks(tasks).await;
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.workers.len(), 2);
    }

    #[tokio::test]
    async fn test_results_sorted_by_file_path() {
        let pool = WorkerPool::new(
            PoolOptions::default(),
            Arc::new(AlwaysOk),
            Arc::new(CollectingReporter::default()),
        );

        let tasks = vec![
            Task::new(TaskKind::Format, "c.ts"),
            Task::new(TaskKind::Format, "a.ts"),
            Task::new(TaskKind::Format, "b.ts"),
        ];
        let run = pool.process_all_tasks(tasks).await;
        let paths: Vec<&str> = run
            .results
            .iter()
            .filter_map(|r| r.file_path.to_str())
            .collect();
        assert_eq!(paths, vec!["a.ts", "b.ts", "c.ts"]);
    }
}
