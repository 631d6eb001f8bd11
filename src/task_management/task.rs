//! # Task System Core Trait
//!
//! A `Task` is a self-contained unit of work shipped to a worker thread. Its
//! result is sent back to the thread that owns the
//! [`TaskManager`](super::TaskManager).
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The returned value is collected by `process_completed_tasks()` or
//!    `wait_for_all()` on the owning thread

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own everything they need (shared read-only data behind an
/// `Arc`), so that no locking is needed while they run.
pub trait Task<R>: Send {
    /// Performs the work and returns its result.
    ///
    /// Runs on a worker thread. A panic here takes the worker down with it;
    /// the manager then reports fewer results than tasks.
    fn process(&self) -> R;
}
