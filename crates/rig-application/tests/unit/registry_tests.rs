//! Tests for name-based feature registration

use rig_application::{
    FEATURE_REGISTRY, FeatureEntry, FeatureId, list_features, resolve_feature, resolve_features,
};
use rig_domain::Error;

recording_feature!(Recorder);
recording_feature!(Reporter requires [Recorder]);

#[linkme::distributed_slice(FEATURE_REGISTRY)]
static RECORDER_FEATURE: FeatureEntry = FeatureEntry {
    name: "recorder",
    description: "Records lifecycle hooks",
    feature: FeatureId::of::<Recorder>,
};

#[linkme::distributed_slice(FEATURE_REGISTRY)]
static REPORTER_FEATURE: FeatureEntry = FeatureEntry {
    name: "reporter",
    description: "Reports recorded hooks",
    feature: FeatureId::of::<Reporter>,
};

#[test]
fn test_resolve_registered_feature() {
    let feature = resolve_feature("recorder").expect("registered");
    assert_eq!(feature, FeatureId::of::<Recorder>());
}

#[test]
fn test_resolve_keeps_order() {
    let features = resolve_features(&["reporter", "recorder"]).expect("registered");
    assert_eq!(
        features,
        vec![FeatureId::of::<Reporter>(), FeatureId::of::<Recorder>()]
    );
}

/// Unknown names list what is available
#[test]
fn test_unknown_feature() {
    let error = resolve_feature("does-not-exist").expect_err("unknown");

    let Error::UnknownFeature { name, available } = &error else {
        panic!("expected unknown feature, got {error:?}");
    };
    assert_eq!(name, "does-not-exist");
    assert!(available.contains(&"recorder"));
    assert!(available.contains(&"reporter"));
}

#[test]
fn test_list_features_is_sorted() {
    let features = list_features();
    let names: Vec<&str> = features.iter().map(|(name, _)| *name).collect();

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(features.contains(&("recorder", "Records lifecycle hooks")));
}
