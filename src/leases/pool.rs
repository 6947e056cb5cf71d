//! Fixed-size worker pool for independent WAPI reads

use crate::config::validation::validate_threads;
use crate::error::LeaseError;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 5;

/// Default number of HTTP sessions shared by the workers
pub const DEFAULT_SESSIONS: usize = 1;

/// A dedicated `rayon` pool with exactly `threads` workers
///
/// The pool is private to the caller so that the global rayon pool size
/// never leaks into the request concurrency.
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
    progress: bool,
}

impl WorkerPool {
    /// Build a pool of `threads` workers
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `threads` is zero or the pool cannot be built
    pub fn new(threads: usize) -> Result<Self> {
        let threads = validate_threads(threads)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("wapi-worker-{index}"))
            .build()
            .map_err(|e| LeaseError::configuration(format!("Failed to start worker pool: {e}")))?;

        Ok(Self {
            pool,
            threads,
            progress: false,
        })
    }

    /// Show a progress bar on stderr while mapping (builder pattern)
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Number of workers
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Apply `task` to every item on the pool
    ///
    /// `task` receives the item's position, which callers use to spread items
    /// over sessions. Results come back in item order.
    pub fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Send + Sync,
    {
        let progress = self.progress_bar(items.len());

        let results = self.pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .map(|(index, item)| {
                    let result = task(index, item);
                    progress.inc(1);
                    result
                })
                .collect()
        });

        progress.finish_and_clear();
        results
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} leases")
        {
            bar.set_style(style);
        }
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn rejects_zero_threads() {
        assert!(WorkerPool::new(0).is_err());
    }

    #[test]
    fn map_preserves_order() {
        let pool = WorkerPool::new(4).unwrap();
        let items: Vec<u32> = (0..100).collect();

        let results = pool.map(&items, |index, item| (index, item * 2));

        for (position, (index, doubled)) in results.into_iter().enumerate() {
            assert_eq!(position, index);
            assert_eq!(doubled, position as u32 * 2);
        }
    }

    #[test]
    fn map_never_exceeds_pool_size() {
        let pool = WorkerPool::new(3).unwrap();
        let items: Vec<u32> = (0..60).collect();
        let names = Mutex::new(HashSet::new());

        pool.map(&items, |_, _| {
            let name = std::thread::current().name().map(str::to_owned);
            names.lock().unwrap().insert(name);
        });

        let names = names.into_inner().unwrap();
        assert!(!names.is_empty());
        assert!(names.len() <= pool.threads());
        assert!(
            names
                .iter()
                .all(|name| name.as_deref().is_some_and(|n| n.starts_with("wapi-worker-")))
        );
    }
}
