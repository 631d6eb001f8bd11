//! # Task Management System
//!
//! A small fixed pool of worker threads for CPU-bound work such as chunk
//! generation.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: owns the workers, distributes tasks and collects results
//! - `Task`: a unit of work that is executed on a worker thread
//! - `TaskChannel`: the task and result channels of one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager hands them to worker channels round-robin, with at most
//!    `MAX_TASKS_IN_FLIGHT` per worker; the rest wait in a queue
//! 3. Workers process tasks and send the results back
//! 4. Results are drained on the owning thread by `process_completed_tasks()`,
//!    or `wait_for_all()` blocks until every published task has finished
//!
//! ## Example Usage
//! ```rust,ignore
//! let mut task_manager = TaskManager::new(4);
//! for task in tasks {
//!     task_manager.publish_task(Box::new(task));
//! }
//! let results = task_manager.wait_for_all();
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info};
use task::Task;

/// How long `wait_for_all` blocks on one worker before polling the others again.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A communication channel between the owning thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks from the owning thread to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Number of tasks the worker has not answered yet
/// - `alive`: Cleared once the worker has hung up (it panicked)
/// - `_worker`: Handle to the worker thread
#[derive(Debug)]
pub struct TaskChannel<R> {
    task_sender: Sender<Box<dyn Task<R>>>,
    result_receiver: Receiver<R>,
    num_tasks_in_flight: usize,
    alive: bool,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating the worker threads
/// - Distributing tasks across available workers
/// - Queuing tasks when all workers are busy
/// - Collecting task results
///
/// Dropping the manager closes the task channels, which ends the workers.
pub struct TaskManager<R> {
    channels: Vec<TaskChannel<R>>,
    queued_tasks: VecDeque<Box<dyn Task<R>>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl<R: Send + 'static> TaskManager<R> {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        info!(
            "Starting {} workers, available parallelism: {:?}",
            num_workers,
            thread::available_parallelism()
        );

        for _ in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task<R>>>();
            let (result_tx, result_rx) = channel::<R>();

            let worker = thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            });

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                alive: true,
                _worker: worker,
            });
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Number of worker threads still running.
    pub fn live_workers(&self) -> usize {
        self.channels.iter().filter(|channel| channel.alive).count()
    }

    /// Number of tasks published but not yet answered, queued ones included.
    pub fn pending_tasks(&self) -> usize {
        self.queued_tasks.len()
            + self
                .channels
                .iter()
                .map(|channel| channel.num_tasks_in_flight)
                .sum::<usize>()
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was handed to the worker
    /// - `Err(task)` if the worker has hung up, so the task can be requeued
    fn try_send_task(
        &mut self,
        task: Box<dyn Task<R>>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task<R>>> {
        let channel = &mut self.channels[channel_idx];
        match channel.task_sender.send(task) {
            Ok(_) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                channel.alive = false;
                Err(task.0)
            }
        }
    }

    /// Finds a live worker channel that can accept a new task.
    ///
    /// Round-robin, starting from the channel after the last one used.
    fn find_available_channel(&self) -> Option<usize> {
        if self.channels.is_empty() {
            return None;
        }

        let start_channel = self.current_channel;
        let mut current = start_channel;

        loop {
            let channel = &self.channels[current];
            if channel.alive && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT {
                return Some(current);
            }
            current = (current + 1) % self.channels.len();
            if current == start_channel {
                return None;
            }
        }
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on a worker
    /// - `false` if the task was queued because all workers are busy
    pub fn publish_task(&mut self, task: Box<dyn Task<R>>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to workers until the queue is empty or every worker is busy.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                // The channel is now marked dead; try the next one.
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Collects every result that is ready, without blocking.
    ///
    /// Queued tasks are scheduled onto the workers that became free.
    pub fn process_completed_tasks(&mut self) -> Vec<R> {
        let mut results = Vec::new();
        for channel in &mut self.channels {
            Self::drain_channel(channel, &mut results);
        }
        self.process_queued_tasks();
        results
    }

    /// Blocks until every published task has been processed.
    ///
    /// # Returns
    /// The results in completion order. Tasks lost to a dead worker, or left
    /// queued when no worker remains, have no result.
    pub fn wait_for_all(&mut self) -> Vec<R> {
        let mut results = Vec::new();

        loop {
            results.extend(self.process_completed_tasks());

            if self.live_workers() == 0 && !self.queued_tasks.is_empty() {
                error!(
                    "No workers left, dropping {} queued tasks",
                    self.queued_tasks.len()
                );
                self.queued_tasks.clear();
            }
            if self.pending_tasks() == 0 {
                return results;
            }

            // Block briefly on one busy worker so the loop does not spin.
            if let Some(channel) = self
                .channels
                .iter_mut()
                .find(|channel| channel.num_tasks_in_flight > 0)
            {
                match channel.result_receiver.recv_timeout(WAIT_POLL_INTERVAL) {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        results.push(result);
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => Self::mark_lost(channel),
                }
            }
        }
    }

    fn drain_channel(channel: &mut TaskChannel<R>, results: &mut Vec<R>) {
        loop {
            match channel.result_receiver.try_recv() {
                Ok(result) => {
                    channel.num_tasks_in_flight -= 1;
                    results.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    Self::mark_lost(channel);
                    break;
                }
            }
        }
    }

    fn mark_lost(channel: &mut TaskChannel<R>) {
        if channel.num_tasks_in_flight > 0 {
            error!(
                "Worker hung up with {} task(s) in flight",
                channel.num_tasks_in_flight
            );
        }
        channel.alive = false;
        channel.num_tasks_in_flight = 0;
    }
}
