//! Tracing run notifier

use rig_application::RunNotifier;
use rig_domain::{Description, Error};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info, warn};

/// Counts of one or more class runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Test methods started
    pub started: usize,
    /// Test methods that finished without failure or skip
    pub passed: usize,
    /// Test methods that failed
    pub failed: usize,
    /// Test methods skipped through the skip signal
    pub skipped: usize,
    /// Failures reported against a whole class
    pub class_failures: usize,
    /// Skips reported against a whole class
    pub class_skips: usize,
}

impl RunSummary {
    /// No method or class failed
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.class_failures == 0
    }
}

/// Logs every run event and keeps counts
#[derive(Debug, Default)]
pub struct TracingRunNotifier {
    started: AtomicUsize,
    finished: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    class_failures: AtomicUsize,
    class_skips: AtomicUsize,
}

impl TracingRunNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts so far
    pub fn summary(&self) -> RunSummary {
        let finished = self.finished.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let skipped = self.skipped.load(Ordering::Relaxed);
        RunSummary {
            started: self.started.load(Ordering::Relaxed),
            passed: finished.saturating_sub(failed + skipped),
            failed,
            skipped,
            class_failures: self.class_failures.load(Ordering::Relaxed),
            class_skips: self.class_skips.load(Ordering::Relaxed),
        }
    }
}

impl RunNotifier for TracingRunNotifier {
    fn test_started(&self, description: &Description) {
        self.started.fetch_add(1, Ordering::Relaxed);
        debug!(test = %description, "Test started");
    }

    fn test_finished(&self, description: &Description) {
        self.finished.fetch_add(1, Ordering::Relaxed);
        debug!(test = %description, "Test finished");
    }

    fn test_failure(&self, description: &Description, error: &Error) {
        if description.is_test() {
            self.failed.fetch_add(1, Ordering::Relaxed);
            warn!(test = %description, error = %error, "Test failed");
        } else {
            self.class_failures.fetch_add(1, Ordering::Relaxed);
            error!(class = %description, error = %error, "Test class failed");
        }
    }

    fn test_assumption_failed(&self, description: &Description, reason: &str) {
        if description.is_test() {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            info!(test = %description, reason = reason, "Test skipped");
        } else {
            self.class_skips.fetch_add(1, Ordering::Relaxed);
            info!(class = %description, reason = reason, "Test class skipped");
        }
    }
}
