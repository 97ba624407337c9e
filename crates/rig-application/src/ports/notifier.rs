//! Run notifier port

use rig_domain::{Description, Error};

/// Receives the outcome of each test run by the host engine
///
/// Bound in the root scope of every class run.
pub trait RunNotifier: Send + Sync {
    fn test_started(&self, description: &Description);

    fn test_finished(&self, description: &Description);

    /// The test, or the class block for a class description, failed
    fn test_failure(&self, description: &Description, error: &Error);

    /// The test was skipped through the skip signal
    fn test_assumption_failed(&self, description: &Description, reason: &str);
}
