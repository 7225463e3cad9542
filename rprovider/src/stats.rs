//! Per-provider usage counters and point-in-time snapshots.
//!
//! Counters are mutated only by the orchestrator, immediately after each
//! attempt, and are never reset except at process start. Mutation is
//! per-provider (atomics plus a small timestamp lock), so concurrent requests
//! against different providers never serialize on each other.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

#[derive(Debug, Default)]
pub struct UsageStats {
    success: AtomicU64,
    failure: AtomicU64,
    last_used: Mutex<Option<SystemTime>>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
        self.stamp();
    }

    pub fn record_failure(&self) {
        self.failure.fetch_add(1, Ordering::Relaxed);
        self.stamp();
    }

    pub fn success_count(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure.load(Ordering::Relaxed)
    }

    pub fn last_used(&self) -> Option<SystemTime> {
        *self
            .last_used
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn snapshot(&self, name: impl Into<String>) -> UsageSnapshot {
        UsageSnapshot {
            name: name.into(),
            success_count: self.success_count(),
            failure_count: self.failure_count(),
            last_used: self.last_used(),
        }
    }

    fn stamp(&self) {
        let mut guard = self
            .last_used
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(SystemTime::now());
    }
}

/// A consistent per-provider view of the counters at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub name: String,
    pub success_count: u64,
    pub failure_count: u64,
    pub last_used: Option<SystemTime>,
}

impl UsageSnapshot {
    pub fn total_attempts(&self) -> u64 {
        self.success_count + self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_with_no_timestamp() {
        let stats = UsageStats::new();
        assert_eq!(stats.success_count(), 0);
        assert_eq!(stats.failure_count(), 0);
        assert!(stats.last_used().is_none());
    }

    #[test]
    fn recording_increments_and_stamps() {
        let stats = UsageStats::new();
        stats.record_success();
        stats.record_failure();
        stats.record_failure();

        assert_eq!(stats.success_count(), 1);
        assert_eq!(stats.failure_count(), 2);
        assert!(stats.last_used().is_some());

        let snapshot = stats.snapshot("p1");
        assert_eq!(snapshot.name, "p1");
        assert_eq!(snapshot.total_attempts(), 3);
    }

    #[test]
    fn counters_are_monotonic_under_concurrent_recording() {
        use std::sync::Arc;

        let stats = Arc::new(UsageStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.record_success();
                    stats.record_failure();
                }
            }));
        }

        for handle in handles {
            handle.join().expect("recording thread");
        }

        assert_eq!(stats.success_count(), 800);
        assert_eq!(stats.failure_count(), 800);
    }
}
