//! Tests for invoke-all-aggregate dispatch

use crate::support::{IdleTest, Planned, calls_to, plan};
use rig_application::{AnnotationIndex, FeatureId, FeatureRegistry, GraphResolver, invoke_features};
use rig_domain::{Error, Phase};

recording_feature!(A);
recording_feature!(B requires [A]);
recording_feature!(C requires [B]);
recording_feature!(Unused);

fn registry() -> FeatureRegistry {
    let index = AnnotationIndex::new();
    let graph = GraphResolver::new(&index)
        .resolve_roots(&[FeatureId::of::<C>()])
        .expect("no cycle");
    FeatureRegistry::instantiate(&graph).expect("constructible")
}

/// Every feature is invoked even when one in the middle fails
#[test]
fn test_failure_does_not_stop_dispatch() {
    let registry = registry();
    plan("B.test_created", Planned::Fail);

    let error = invoke_features(Phase::TestCreated, registry.entries(), |f| {
        f.test_created(&IdleTest)
    })
    .expect_err("B fails");

    assert_eq!(calls_to("test_created"), vec!["A", "B", "C"]);
    let Error::Aggregated(aggregate) = &error else {
        panic!("expected aggregate, got {error:?}");
    };
    assert_eq!(aggregate.phase(), Phase::TestCreated);
    assert_eq!(aggregate.len(), 1);
    assert!(aggregate.features()[0].ends_with("::B"));
    assert!(error.to_string().contains("B.test_created failed"));
}

/// Every failure is kept, in visiting order
#[test]
fn test_all_failures_are_aggregated() {
    let registry = registry();
    plan("A.test_created", Planned::Fail);
    plan("C.test_created", Planned::Fail);

    let error = invoke_features(Phase::TestCreated, registry.entries(), |f| {
        f.test_created(&IdleTest)
    })
    .expect_err("A and C fail");

    let Error::Aggregated(aggregate) = &error else {
        panic!("expected aggregate, got {error:?}");
    };
    assert_eq!(aggregate.len(), 2);
    assert!(aggregate.features()[0].ends_with("::A"));
    assert!(aggregate.features()[1].ends_with("::C"));
}

/// Exit phases visit dependents first
#[test]
fn test_reverse_phase_order() {
    let registry = registry();

    invoke_features(Phase::Stop, registry.entries(), |f| f.test_created(&IdleTest))
        .expect("no failure");

    assert_eq!(calls_to("test_created"), vec!["C", "B", "A"]);
}

/// The skip signal stops the dispatch and is returned unwrapped
#[test]
fn test_skip_short_circuits() {
    let registry = registry();
    plan("A.test_created", Planned::Skip);

    let error = invoke_features(Phase::BeforeRun, registry.entries(), |f| {
        f.test_created(&IdleTest)
    })
    .expect_err("A skips");

    assert!(error.is_skip());
    assert_eq!(calls_to("test_created"), vec!["A"]);
}

/// A skip after a failure still wins over the collected failures
#[test]
fn test_skip_after_failure() {
    let registry = registry();
    plan("A.test_created", Planned::Fail);
    plan("B.test_created", Planned::Skip);

    let error = invoke_features(Phase::BeforeRun, registry.entries(), |f| {
        f.test_created(&IdleTest)
    })
    .expect_err("B skips");

    assert!(error.is_skip());
    assert_eq!(calls_to("test_created"), vec!["A", "B"]);
}

#[test]
fn test_no_features_is_ok() {
    let result = invoke_features(Phase::Start, &[], |_| Err(Error::generic("never called")));
    assert!(result.is_ok());
}

/// Instances are found by identity; features outside the graph are absent
#[test]
fn test_registry_lookup_by_id() {
    let registry = registry();

    let b = registry.lookup(&FeatureId::of::<B>()).expect("resolved");
    assert!(b.downcast_arc::<B>().is_ok());
    assert!(registry.lookup(&FeatureId::of::<Unused>()).is_none());
    assert_eq!(registry.len(), 3);
}
