//! Bounded worker pool for first-match searches over an indexed space.
//!
//! Workers pull fixed-size chunks of indices. A match lowers a shared
//! `best` index; workers drop any index at or beyond it, so the overshoot
//! after a hit is bounded by one comparison per worker. The lowest matching
//! index always wins, which makes the parallel result identical to a
//! sequential scan.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use crate::errors::CrackError;

const DEFAULT_CHUNK_SIZE: u64 = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { index: u64, tested: u64 },
    Exhausted { tested: u64 },
    Cancelled { tested: u64 },
}

impl SearchOutcome {
    pub fn index(&self) -> Option<u64> {
        match self {
            SearchOutcome::Found { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn tested(&self) -> u64 {
        match self {
            SearchOutcome::Found { tested, .. }
            | SearchOutcome::Exhausted { tested }
            | SearchOutcome::Cancelled { tested } => *tested,
        }
    }
}

pub struct SearchPool {
    pool: rayon::ThreadPool,
    chunk_size: u64,
    cancel: CancellationToken,
}

impl SearchPool {
    /// `threads == 0` lets rayon pick one worker per core.
    pub fn new(threads: usize) -> Result<Self, CrackError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("cryptbreak-search-{}", i))
            .build()
            .map_err(|e| CrackError::Internal(format!("Failed to build worker pool: {}", e)))?;
        Ok(Self {
            pool,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Replace the pool's cancel token with an external one so callers can
    /// enforce their own wall-clock limits.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Find the lowest index in `0..len` for which `test` returns true.
    pub fn find_first<F>(&self, len: u64, test: F) -> SearchOutcome
    where
        F: Fn(u64) -> bool + Sync,
    {
        let best = AtomicU64::new(u64::MAX);
        let tested = AtomicU64::new(0);
        let chunk_size = self.chunk_size;
        let chunks = len.div_ceil(chunk_size);
        let cancel = &self.cancel;

        self.pool.install(|| {
            (0..chunks).into_par_iter().for_each(|chunk| {
                let start = chunk * chunk_size;
                let end = (start + chunk_size).min(len);
                let mut local = 0u64;
                for index in start..end {
                    if index >= best.load(Ordering::Acquire) || cancel.is_cancelled() {
                        break;
                    }
                    local += 1;
                    if test(index) {
                        best.fetch_min(index, Ordering::AcqRel);
                        break;
                    }
                }
                tested.fetch_add(local, Ordering::Relaxed);
            });
        });

        let tested = tested.load(Ordering::Relaxed);
        let best = best.load(Ordering::Acquire);
        debug!(len, tested, threads = self.threads(), "Search finished");

        if best != u64::MAX {
            SearchOutcome::Found { index: best, tested }
        } else if cancel.is_cancelled() {
            SearchOutcome::Cancelled { tested }
        } else {
            SearchOutcome::Exhausted { tested }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_lowest_matching_index() {
        let pool = SearchPool::new(4).unwrap().with_chunk_size(3);
        // Every multiple of 7 above 20 matches; 21 must win over later hits.
        let outcome = pool.find_first(1000, |i| i > 20 && i % 7 == 0);
        assert_eq!(outcome.index(), Some(21));
    }

    #[test]
    fn test_matches_sequential_scan_for_many_hits() {
        let pool = SearchPool::new(8).unwrap().with_chunk_size(1);
        for target in [0u64, 1, 17, 499] {
            let outcome = pool.find_first(500, |i| i >= target);
            assert_eq!(outcome.index(), Some(target));
        }
    }

    #[test]
    fn test_exhausted_tests_everything() {
        let pool = SearchPool::new(2).unwrap().with_chunk_size(10);
        let outcome = pool.find_first(95, |_| false);
        assert_eq!(outcome, SearchOutcome::Exhausted { tested: 95 });
    }

    #[test]
    fn test_empty_space() {
        let pool = SearchPool::new(1).unwrap();
        assert_eq!(pool.find_first(0, |_| true), SearchOutcome::Exhausted { tested: 0 });
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let pool = SearchPool::new(2).unwrap().with_cancel_token(token);
        let outcome = pool.find_first(10_000, |_| false);
        assert_eq!(outcome, SearchOutcome::Cancelled { tested: 0 });
    }

    #[test]
    fn test_single_thread_pool() {
        let pool = SearchPool::new(1).unwrap();
        assert_eq!(pool.threads(), 1);
        assert_eq!(pool.find_first(10, |i| i == 9).index(), Some(9));
    }
}
