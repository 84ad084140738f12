// Tue Feb 03 2026 - Alex

use crate::engine::scheduler::{PoolState, Shared};
use crate::engine::task::TaskOutcome;
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};

pub struct Worker<'scope> {
    id: usize,
    thread_handle: Option<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope> Worker<'scope> {
    pub(crate) fn spawn<'env>(
        id: usize,
        scope: &'scope Scope<'scope, 'env>,
        shared: Arc<Shared<'env>>,
    ) -> Option<Self> {
        let spawned = thread::Builder::new()
            .name(format!("sigscan-worker-{}", id))
            .spawn_scoped(scope, move || Worker::worker_loop(id, &shared));

        match spawned {
            Ok(handle) => Some(Self {
                id,
                thread_handle: Some(handle),
            }),
            Err(e) => {
                log::error!("Failed to spawn worker {}: {}", id, e);
                None
            }
        }
    }

    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Worker {} terminated abnormally", self.id);
            }
        }
    }

    fn worker_loop(id: usize, shared: &Shared<'_>) {
        log::trace!("Worker {} started", id);

        loop {
            let task = {
                let mut queue = shared.queue.lock();
                loop {
                    if matches!(queue.state, PoolState::Stopping | PoolState::Idle) {
                        log::trace!("Worker {} exiting", id);
                        return;
                    }
                    if let Some(task) = queue.tasks.pop() {
                        queue.active += 1;
                        break task;
                    }
                    if queue.state == PoolState::Draining && queue.active == 0 {
                        shared.signal.notify_all();
                        log::trace!("Worker {} drained", id);
                        return;
                    }
                    shared.signal.wait(&mut queue);
                }
            };

            let label = task.to_string();
            log::trace!("Worker {} running task {}", id, label);
            match task.execute() {
                TaskOutcome::Completed => shared.stats.record_completion(),
                TaskOutcome::Panicked(message) => {
                    log::error!("Task {} panicked on worker {}: {}", label, id, message);
                    shared.stats.record_panic();
                }
            }

            let mut queue = shared.queue.lock();
            queue.active -= 1;
            if queue.active == 0 && queue.tasks.is_empty() {
                shared.signal.notify_all();
            }
        }
    }
}
