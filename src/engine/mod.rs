// Tue Feb 03 2026 - Alex

pub mod scheduler;
pub mod task;
pub mod worker;

pub use scheduler::{PoolState, SchedulerStats, Spawner, TaskScheduler};
pub use task::{Task, TaskOutcome};
pub use worker::Worker;
