//! Shared task backlog with exclusive atomic pop
//!
//! The queue is sorted once at construction; workers pop from the tail,
//! so the lock is held only for the pop itself. Exactly-once dequeue is
//! guaranteed by the mutex: a task removed from the vector cannot be
//! observed by any other worker.

use std::cmp::Reverse;
use std::sync::Mutex;

use crate::task::Task;

/// Ordered, thread-safe backlog of pending tasks
#[derive(Debug)]
pub struct TaskQueue {
    inner: Mutex<Vec<Task>>,
}

impl TaskQueue {
    /// Build a queue from a task list, sorting by priority descending and
    /// estimated complexity ascending among equals.
    pub fn new(mut tasks: Vec<Task>) -> Self {
        // Ascending sort with pop-from-tail: the tail must hold the
        // highest priority, cheapest task.
        tasks.sort_by_key(|t| (t.priority, Reverse(t.estimated_complexity)));
        Self {
            inner: Mutex::new(tasks),
        }
    }

    /// Pop the highest-priority remaining task, if any
    pub fn pop(&self) -> Option<Task> {
        self.inner.lock().unwrap().pop()
    }

    /// Number of tasks still queued
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
