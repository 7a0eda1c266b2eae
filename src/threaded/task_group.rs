//! Wait-group barrier for task-based kernels.
//!
//! A kernel registers every task it spawns with [`TaskGroup::register`] and
//! then calls [`TaskGroup::wait`]; `wait` returns only once every
//! [`TaskGuard`] has been dropped. Guards are dropped on unwind as well, so
//! a panicking task still releases the barrier.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long a blocked waiter sleeps before re-checking the counter when it
/// sits on a pool thread and found nothing to run.
const IDLE_BACKOFF: Duration = Duration::from_micros(50);

#[derive(Debug, Default)]
pub struct TaskGroup {
    pending: Mutex<usize>,
    done: Condvar,
    registered: AtomicUsize,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one outstanding task. The task is complete when the
    /// returned guard is dropped.
    pub fn register(&self) -> TaskGuard<'_> {
        *lock(&self.pending) += 1;
        self.registered.fetch_add(1, Ordering::Relaxed);
        TaskGuard { group: self }
    }

    /// Number of tasks still running.
    pub fn pending(&self) -> usize {
        *lock(&self.pending)
    }

    /// Total tasks ever registered with this group.
    pub fn registered(&self) -> usize {
        self.registered.load(Ordering::Relaxed)
    }

    /// Blocks until no task is outstanding.
    ///
    /// On a rayon worker thread the waiter keeps executing queued jobs
    /// instead of sleeping, otherwise a pool of one thread could never run
    /// the tasks it is waiting for.
    pub fn wait(&self) {
        let on_worker = rayon::current_thread_index().is_some();
        loop {
            if on_worker {
                if self.pending() == 0 {
                    return;
                }
                if let Some(rayon::Yield::Executed) = rayon::yield_now() {
                    continue;
                }
                let pending = lock(&self.pending);
                if *pending == 0 {
                    return;
                }
                let _ = self
                    .done
                    .wait_timeout(pending, IDLE_BACKOFF)
                    .unwrap_or_else(PoisonError::into_inner);
            } else {
                let pending = lock(&self.pending);
                let _guard = self
                    .done
                    .wait_while(pending, |n| *n > 0)
                    .unwrap_or_else(PoisonError::into_inner);
                return;
            }
        }
    }

    fn finish_one(&self) {
        let mut pending = lock(&self.pending);
        *pending -= 1;
        if *pending == 0 {
            self.done.notify_all();
        }
    }
}

/// Completion token for one task of a [`TaskGroup`].
#[derive(Debug)]
pub struct TaskGuard<'g> {
    group: &'g TaskGroup,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.group.finish_one();
    }
}

fn lock(m: &Mutex<usize>) -> MutexGuard<'_, usize> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
