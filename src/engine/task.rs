// Tue Feb 03 2026 - Alex

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

pub type Job<'env> = Box<dyn FnOnce() + Send + 'env>;

/// A unit of work for the [`TaskScheduler`](crate::engine::TaskScheduler).
///
/// Tasks may borrow anything that outlives the scope the pool runs in. They have
/// no way to report failure back to the submitter: a panic is caught at the
/// worker boundary and only surfaces in the log and the scheduler stats.
pub struct Task<'env> {
    id: u64,
    name: Option<String>,
    job: Job<'env>,
}

impl<'env> Task<'env> {
    pub fn new<F>(job: F) -> Self
    where
        F: FnOnce() + Send + 'env,
    {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: None,
            job: Box::new(job),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn execute(self) -> TaskOutcome {
        match panic::catch_unwind(AssertUnwindSafe(self.job)) {
            Ok(()) => TaskOutcome::Completed,
            Err(payload) => TaskOutcome::Panicked(panic_message(payload.as_ref())),
        }
    }
}

/// The task's name, or `#<id>` for unnamed tasks.
impl fmt::Display for Task<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "#{}", self.id),
        }
    }
}

impl fmt::Debug for Task<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Panicked(String),
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
