//! Row dispatch over the shared worker pool.
//!
//! Every kernel describes its work as "compute output row `i` into this
//! slice" and hands that closure to [`Executor::for_each_row`]. The executor
//! decides, per [`Strategy`], how rows are grouped into work units and how
//! those units reach the pool. Each unit owns a disjoint slice of the
//! destination buffer, so no locking is needed and results never depend on
//! scheduling.

use std::sync::Arc;
use std::thread;

use log::{info, trace};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use super::strategy::Strategy;
use super::task_group::TaskGroup;

/// Tasks cut per worker under [`Strategy::Tasks`].
const TASKS_PER_WORKER: usize = 4;

/// How many workers a kernel call may engage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    /// The full parallel width.
    Full,
    /// `min(width, available_processors / 2)`. Used by memory-bound
    /// element-wise kernels.
    Capped,
}

/// Strategy plus the process-wide worker pool, threaded into every kernel.
///
/// Cloning is cheap and shares the pool.
#[derive(Clone, Debug)]
pub struct Executor {
    strategy: Strategy,
    width: usize,
    half_processors: usize,
    pool: Arc<ThreadPool>,
}

impl Executor {
    /// Starts a pool of `width` worker threads.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn new(strategy: Strategy, width: usize) -> Result<Self, ThreadPoolBuildError> {
        assert!(width >= 1, "parallel width must be at least 1");
        let pool = ThreadPoolBuilder::new()
            .num_threads(width)
            .thread_name(|i| format!("matexpr-worker-{i}"))
            .build()?;
        info!("started {width} worker threads, strategy `{strategy}`");
        Ok(Self::with_pool(strategy, Arc::new(pool)))
    }

    /// Wraps an existing pool; the width is the pool's thread count.
    pub fn with_pool(strategy: Strategy, pool: Arc<ThreadPool>) -> Self {
        let half_processors = thread::available_parallelism()
            .map(|n| n.get() / 2)
            .unwrap_or(1)
            .max(1);
        Self {
            strategy,
            width: pool.current_num_threads(),
            half_processors,
            pool,
        }
    }

    /// Same pool, different strategy.
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    pub fn workers(&self, occupancy: Occupancy) -> usize {
        match occupancy {
            Occupancy::Full => self.width,
            Occupancy::Capped => self.width.min(self.half_processors),
        }
    }

    /// Calls `f(row, out_row)` once for every row of the `order × order`
    /// buffer `out`, and returns only after every call has finished.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != order * order`.
    pub fn for_each_row<F>(&self, out: &mut [f64], order: usize, occupancy: Occupancy, f: F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        assert_eq!(out.len(), order * order, "expected {order}x{order} buffer");
        if order == 0 {
            return;
        }
        let workers = self.workers(occupancy).min(order);
        trace!(
            "dispatch order={order} workers={workers} strategy={}",
            self.strategy
        );

        match self.strategy {
            Strategy::Simple => self.data_parallel(out, order, workers, &f),
            Strategy::Tasks => self.task_based(out, order, workers, &f),
            Strategy::Sections => self.sections(out, order, workers, &f),
        }
    }

    /// One contiguous block of rows per worker.
    fn data_parallel<F>(&self, out: &mut [f64], order: usize, workers: usize, f: &F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        use rayon::prelude::*;

        let rows_per_unit = order.div_ceil(workers);
        self.pool.install(|| {
            out.par_chunks_mut(rows_per_unit * order)
                .enumerate()
                .for_each(|(unit, block)| run_block(unit * rows_per_unit, block, order, f));
        });
    }

    /// Small row tasks, each registered in a [`TaskGroup`] and spawned into
    /// the pool. The group is the barrier: `wait` returns only after every
    /// task has dropped its guard. The scope around it only lets tasks
    /// borrow disjoint row blocks of `out`.
    fn task_based<F>(&self, out: &mut [f64], order: usize, workers: usize, f: &F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        let grain = order.div_ceil(workers * TASKS_PER_WORKER).max(1);
        let blocks: Vec<&mut [f64]> = out.chunks_mut(grain * order).collect();
        let group = TaskGroup::new();

        self.pool.in_place_scope(|scope| {
            for (task, block) in blocks.into_iter().enumerate() {
                let guard = group.register();
                scope.spawn(move |_| {
                    let _guard = guard;
                    run_block(task * grain, block, order, f);
                });
            }
            group.wait();
            debug_assert_eq!(group.pending(), 0, "task group released early");
        });
        trace!("task group joined after {} tasks", group.registered());
    }

    /// Recursive fork-join halving of the row range until a section holds
    /// at most `order / workers` rows.
    fn sections<F>(&self, out: &mut [f64], order: usize, workers: usize, f: &F)
    where
        F: Fn(usize, &mut [f64]) + Sync,
    {
        let grain = order.div_ceil(workers);
        self.pool.install(|| bisect(out, 0, order, grain, f));
    }
}

fn bisect<F>(block: &mut [f64], first_row: usize, order: usize, grain: usize, f: &F)
where
    F: Fn(usize, &mut [f64]) + Sync,
{
    let rows = block.len() / order;
    if rows <= grain {
        run_block(first_row, block, order, f);
        return;
    }
    let mid = rows / 2;
    let (upper, lower) = block.split_at_mut(mid * order);
    rayon::join(
        || bisect(upper, first_row, order, grain, f),
        || bisect(lower, first_row + mid, order, grain, f),
    );
}

fn run_block<F>(first_row: usize, block: &mut [f64], order: usize, f: &F)
where
    F: Fn(usize, &mut [f64]),
{
    for (offset, row) in block.chunks_mut(order).enumerate() {
        f(first_row + offset, row);
    }
}
