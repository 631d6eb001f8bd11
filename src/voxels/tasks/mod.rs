//! # Voxel Task System
//!
//! Tasks related to terrain generation, run on the
//! [`TaskManager`](crate::task_management::TaskManager) worker pool.

pub mod chunk_generation_task;
