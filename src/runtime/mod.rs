//! Async plumbing shared by the archive engine
//!
//! The job queue is the only structure the workers share: a bounded tokio
//! channel whose receiver is handed to every worker behind an async mutex.

pub mod job_queue;

pub use job_queue::{JobReceiver, JobSender, job_queue};
