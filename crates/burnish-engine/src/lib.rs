//! Burnish Engine - Concurrent code-quality task distribution
//!
//! This crate turns a file tree into a prioritized backlog of code-quality
//! tasks (format, lint, typecheck, test-quality) and drains it through a
//! fixed-size pool of workers pulling from a shared queue.

pub mod engine;
pub mod generator;
pub mod handlers;
pub mod pool;
pub mod queue;
pub mod reporter;
pub mod summary;
pub mod task;

pub use engine::{run_engine, EngineOptions, EngineReport};
pub use generator::{generate_all_tasks, tasks_for_file};
pub use handlers::{TaskHandler, TaskPayload, Tool, ToolHandlers, ToolSet};
pub use pool::{PoolOptions, PoolRun, WorkerPool};
pub use queue::TaskQueue;
pub use reporter::{CollectingReporter, TaskEvent, TaskReporter, TracingReporter};
pub use summary::{KindSummary, RunSummary, WorkerSummary};
pub use task::{Task, TaskKind, TaskResult, WorkerState};
