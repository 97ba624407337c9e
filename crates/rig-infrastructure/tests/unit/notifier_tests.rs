//! Run notifier tests

use rig_application::RunNotifier;
use rig_domain::{Description, Error};
use rig_infrastructure::{RunSummary, TracingRunNotifier};

fn method(name: &str) -> Description {
    Description::for_method("suite::CacheTest", name)
}

#[test]
fn test_summary_counts_outcomes() {
    let notifier = TracingRunNotifier::new();
    for name in ["hits", "misses", "evicts"] {
        notifier.test_started(&method(name));
    }
    notifier.test_failure(&method("misses"), &Error::generic("boom"));
    notifier.test_assumption_failed(&method("evicts"), "no eviction policy");
    for name in ["hits", "misses", "evicts"] {
        notifier.test_finished(&method(name));
    }

    let summary = notifier.summary();

    assert_eq!(
        summary,
        RunSummary {
            started: 3,
            passed: 1,
            failed: 1,
            skipped: 1,
            class_failures: 0,
            class_skips: 0,
        }
    );
    assert!(!summary.is_success());
}

/// Failures against the class description are counted apart from methods
#[test]
fn test_class_failure_counted_separately() {
    let notifier = TracingRunNotifier::new();

    notifier.test_failure(
        &Description::for_class("suite::CacheTest"),
        &Error::internal("stop failed"),
    );

    let summary = notifier.summary();
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.class_failures, 1);
    assert!(!summary.is_success());
}

/// Skips against the class description leave method counts alone
#[test]
fn test_class_skip_counted_separately() {
    let notifier = TracingRunNotifier::new();
    for name in ["hits", "misses"] {
        notifier.test_started(&method(name));
        notifier.test_finished(&method(name));
    }

    notifier.test_assumption_failed(
        &Description::for_class("suite::CacheTest"),
        "cache backend unavailable",
    );

    let summary = notifier.summary();
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.class_skips, 1);
    assert!(summary.is_success());
}

#[test]
fn test_empty_summary_is_success() {
    assert!(TracingRunNotifier::new().summary().is_success());
    assert_eq!(RunSummary::default(), TracingRunNotifier::default().summary());
}
