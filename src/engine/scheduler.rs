// Tue Feb 03 2026 - Alex

use crate::engine::task::{Task, TaskOutcome};
use crate::engine::worker::Worker;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// No workers. Submitted tasks wait in the queue until the next start.
    Idle,
    Running,
    /// Graceful shutdown: workers exit once the queue is empty and no task is in flight.
    Draining,
    /// Forced shutdown: in-flight tasks finish, queued tasks are discarded.
    Stopping,
}

pub(crate) struct Queue<'env> {
    pub(crate) tasks: Vec<Task<'env>>,
    pub(crate) state: PoolState,
    pub(crate) active: usize,
}

#[derive(Default)]
pub(crate) struct StatCounters {
    submitted: AtomicUsize,
    completed: AtomicUsize,
    panicked: AtomicUsize,
    discarded: AtomicUsize,
}

impl StatCounters {
    pub(crate) fn record_completion(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_panic(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SchedulerStats {
        SchedulerStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

pub(crate) struct Shared<'env> {
    pub(crate) queue: Mutex<Queue<'env>>,
    pub(crate) signal: Condvar,
    pub(crate) stats: StatCounters,
}

impl<'env> Shared<'env> {
    fn new() -> Self {
        Self {
            queue: Mutex::new(Queue {
                tasks: Vec::new(),
                state: PoolState::Idle,
                active: 0,
            }),
            signal: Condvar::new(),
            stats: StatCounters::default(),
        }
    }

    fn push(&self, task: Task<'env>) {
        {
            let mut queue = self.queue.lock();
            if queue.state == PoolState::Stopping {
                log::warn!("Task {} submitted during forced shutdown, dropping it", task);
                self.stats.discarded.fetch_add(1, Ordering::Relaxed);
                return;
            }
            queue.tasks.push(task);
        }
        self.stats.submitted.fetch_add(1, Ordering::Relaxed);
        self.signal.notify_one();
    }
}

/// Fixed-size pool of scoped worker threads draining a shared LIFO queue.
///
/// Workers are spawned inside a [`std::thread::Scope`], so tasks may borrow
/// anything that lives for `'env`. Idle workers sleep on a condition variable
/// until work arrives or the pool is stopped.
///
/// ```ignore
/// std::thread::scope(|scope| {
///     let mut pool = TaskScheduler::new();
///     pool.start(scope, 4);
///     pool.submit(|| do_work(&data));
///     pool.stop(false);
/// });
/// ```
pub struct TaskScheduler<'scope, 'env: 'scope> {
    shared: Arc<Shared<'env>>,
    workers: Vec<Worker<'scope>>,
}

impl<'scope, 'env> TaskScheduler<'scope, 'env> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            workers: Vec::new(),
        }
    }

    /// Spawns `thread_count` workers. Does nothing if the pool is already running.
    pub fn start(&mut self, scope: &'scope Scope<'scope, 'env>, thread_count: usize) {
        {
            let mut queue = self.shared.queue.lock();
            if queue.state != PoolState::Idle {
                return;
            }
            queue.state = PoolState::Running;
        }

        let thread_count = thread_count.max(1);
        self.workers.reserve(thread_count);
        for id in 0..thread_count {
            if let Some(worker) = Worker::spawn(id, scope, self.shared.clone()) {
                self.workers.push(worker);
            }
        }

        log::debug!("Task scheduler started with {} workers", self.workers.len());
    }

    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'env,
    {
        self.shared.push(Task::new(job));
    }

    /// Like [`TaskScheduler::submit`], for tasks built with a name for the log.
    pub fn submit_task(&self, task: Task<'env>) {
        self.shared.push(task);
    }

    /// A cloneable handle that running tasks can use to queue more work.
    pub fn spawner(&self) -> Spawner<'env> {
        Spawner {
            shared: self.shared.clone(),
        }
    }

    /// Stops the pool and joins every worker.
    ///
    /// With `force == false` the queue is drained first, including tasks queued by
    /// running tasks. With `force == true` only in-flight tasks finish and whatever
    /// is still queued is discarded. Afterwards the pool is idle and can be restarted.
    pub fn stop(&mut self, force: bool) {
        {
            let mut queue = self.shared.queue.lock();
            if queue.state == PoolState::Running {
                queue.state = if force {
                    PoolState::Stopping
                } else {
                    PoolState::Draining
                };
            }
        }
        self.shared.signal.notify_all();

        for worker in &mut self.workers {
            worker.join();
        }
        self.workers.clear();

        let leftover = {
            let mut queue = self.shared.queue.lock();
            queue.state = PoolState::Idle;
            std::mem::take(&mut queue.tasks)
        };

        if leftover.is_empty() {
            return;
        }

        if force {
            log::debug!("Discarding {} queued tasks", leftover.len());
            self.shared
                .stats
                .discarded
                .fetch_add(leftover.len(), Ordering::Relaxed);
        } else {
            // Only reachable when no worker could be spawned.
            log::debug!("Running {} queued tasks on the calling thread", leftover.len());
            self.run_inline(leftover);
        }
    }

    fn run_inline(&self, mut tasks: Vec<Task<'env>>) {
        loop {
            while let Some(task) = tasks.pop() {
                let label = task.to_string();
                match task.execute() {
                    TaskOutcome::Completed => self.shared.stats.record_completion(),
                    TaskOutcome::Panicked(message) => {
                        log::error!("Task {} panicked: {}", label, message);
                        self.shared.stats.record_panic();
                    }
                }
            }
            tasks = std::mem::take(&mut self.shared.queue.lock().tasks);
            if tasks.is_empty() {
                break;
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.shared.queue.lock().tasks.len()
    }

    pub fn is_running(&self) -> bool {
        self.shared.queue.lock().state == PoolState::Running
    }

    pub fn state(&self) -> PoolState {
        self.shared.queue.lock().state
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.shared.stats.snapshot()
    }
}

impl Default for TaskScheduler<'_, '_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskScheduler<'_, '_> {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.stop(false);
        }
    }
}

#[derive(Clone)]
pub struct Spawner<'env> {
    shared: Arc<Shared<'env>>,
}

impl<'env> Spawner<'env> {
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'env,
    {
        self.shared.push(Task::new(job));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub submitted: usize,
    pub completed: usize,
    pub panicked: usize,
    pub discarded: usize,
}

impl SchedulerStats {
    pub fn success_rate(&self) -> f64 {
        let finished = self.completed + self.panicked;
        if finished == 0 {
            0.0
        } else {
            self.completed as f64 / finished as f64
        }
    }
}
