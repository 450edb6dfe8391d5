//! Run summary: per-kind and per-worker aggregation

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::task::{TaskResult, WorkerState};

/// Success/failure counts for one task kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl KindSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Reporting row for one worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSummary {
    pub id: String,
    pub completed_tasks: usize,
    pub total_processing_ms: u64,
}

/// Aggregate view over a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Keyed by the kind's string form; BTreeMap keeps output ordering stable
    pub by_kind: BTreeMap<String, KindSummary>,
    pub by_worker: Vec<WorkerSummary>,
    pub total_tasks: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
    pub throughput_per_sec: f64,
}

impl RunSummary {
    /// Build the summary from the final result set and worker snapshots.
    /// An empty run yields an empty summary, not an error.
    pub fn build(
        results: &[TaskResult],
        workers: &[WorkerState],
        total_duration: Duration,
    ) -> Self {
        let mut by_kind: BTreeMap<String, KindSummary> = BTreeMap::new();
        let mut succeeded = 0;
        let mut failed = 0;

        for result in results {
            let entry = by_kind.entry(result.kind.as_str().to_string()).or_default();
            if result.success {
                entry.succeeded += 1;
                succeeded += 1;
            } else {
                entry.failed += 1;
                failed += 1;
            }
        }

        let mut by_worker: Vec<WorkerSummary> = workers
            .iter()
            .map(|w| WorkerSummary {
                id: w.id.clone(),
                completed_tasks: w.completed_tasks,
                total_processing_ms: w.total_processing_ms,
            })
            .collect();
        by_worker.sort_by(|a, b| a.id.cmp(&b.id));

        let secs = total_duration.as_secs_f64();
        let throughput_per_sec = if secs > 0.0 {
            results.len() as f64 / secs
        } else {
            0.0
        };

        Self {
            by_kind,
            by_worker,
            total_tasks: results.len(),
            succeeded,
            failed,
            total_duration_ms: total_duration.as_millis() as u64,
            throughput_per_sec,
        }
    }
}
