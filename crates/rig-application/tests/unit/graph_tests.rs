//! Tests for feature graph resolution and the annotation index

use rig_application::{
    AnnotationIndex, DeclareFeatures, FeatureId, Features, GraphResolver, Injectable,
    TestClass, TestClassDescriptor, TestInstance, TestMethod,
};
use rig_domain::{Annotated, Annotations, Error, Result, TypeKey};

recording_feature!(Y);
recording_feature!(X requires [Y]);
recording_feature!(Base);
recording_feature!(Left requires [Base]);
recording_feature!(Right requires [Base]);
recording_feature!(Top requires [Left, Right]);
recording_feature!(Loner);

// Cycle: P → Q → R → P
recording_feature!(P requires [Q]);
recording_feature!(Q requires [R]);
recording_feature!(R requires [P]);
recording_feature!(Narcissus requires [Narcissus]);

fn id<F: rig_application::FeatureType>() -> FeatureId {
    FeatureId::of::<F>()
}

struct ParentTest;
impl Annotated for ParentTest {
    fn annotations() -> Annotations {
        Annotations::new().requires([id::<Loner>()])
    }
}

struct ChildTest;
impl Injectable for ChildTest {}
impl TestInstance for ChildTest {}
impl Annotated for ChildTest {
    fn annotations() -> Annotations {
        Annotations::new()
            .requires([id::<X>()])
            .inherit(TypeKey::of::<ParentTest>())
    }
}
impl TestClass for ChildTest {
    fn create() -> Result<Self> {
        Ok(ChildTest)
    }
    fn methods() -> Vec<TestMethod> {
        Vec::new()
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// A feature is placed after the features it requires
#[test]
fn test_dependency_comes_first() {
    let index = AnnotationIndex::new();
    let graph = GraphResolver::new(&index)
        .resolve_roots(&[id::<X>()])
        .expect("no cycle");

    assert_eq!(graph.ids(), &[id::<Y>(), id::<X>()]);
    assert!(graph.position(&id::<Y>()) < graph.position(&id::<X>()));
}

/// A shared dependency appears once, before both dependents
#[test]
fn test_diamond_is_deduplicated() {
    let index = AnnotationIndex::new();
    let graph = GraphResolver::new(&index)
        .resolve_roots(&[id::<Top>()])
        .expect("no cycle");

    assert_eq!(graph.names(), vec!["Base", "Left", "Right", "Top"]);
    assert_eq!(graph.len(), 4);
    assert_eq!(
        graph.reversed(),
        vec![id::<Top>(), id::<Right>(), id::<Left>(), id::<Base>()]
    );
}

/// Requirements of a test class include the ones it inherits
#[test]
fn test_inherited_requirements() {
    let index = AnnotationIndex::new();
    let descriptor = TestClassDescriptor::of::<ChildTest>();
    let graph = GraphResolver::new(&index)
        .resolve(descriptor.key())
        .expect("no cycle");

    assert_eq!(graph.names(), vec!["Y", "X", "Loner"]);
    assert!(!graph.contains(&id::<Top>()));
}

/// Resolving twice yields the same order
#[test]
fn test_resolution_is_deterministic() {
    let index = AnnotationIndex::new();
    let resolver = GraphResolver::new(&index);
    let first = resolver.resolve_roots(&[id::<Top>(), id::<X>()]).expect("no cycle");
    let second = resolver.resolve_roots(&[id::<Top>(), id::<X>()]).expect("no cycle");

    assert_eq!(first, second);
}

/// A root listed twice is resolved once
#[test]
fn test_repeated_root() {
    let index = AnnotationIndex::new();
    let graph = GraphResolver::new(&index)
        .resolve_roots(&[id::<Y>(), id::<X>(), id::<Y>()])
        .expect("no cycle");

    assert_eq!(graph.names(), vec!["Y", "X"]);
}

#[test]
fn test_no_requirements_is_empty_graph() {
    let index = AnnotationIndex::new();
    let graph = GraphResolver::new(&index).resolve_roots(&[]).expect("empty");
    assert!(graph.is_empty());
}

// ============================================================================
// Cycles
// ============================================================================

/// A transitive cycle names the feature found on the active path
#[test]
fn test_cycle_is_detected() {
    let index = AnnotationIndex::new();
    let error = GraphResolver::new(&index)
        .resolve_roots(&[id::<P>()])
        .expect_err("cycle");

    let Error::CycleDetected { feature } = &error else {
        panic!("expected cycle, got {error:?}");
    };
    assert!(feature.ends_with("::P"), "unexpected feature {feature}");
    assert!(error.to_string().contains("Cycle detected in features dependencies"));
}

#[test]
fn test_self_requirement_is_a_cycle() {
    let index = AnnotationIndex::new();
    let result = GraphResolver::new(&index).resolve_roots(&[id::<Narcissus>()]);
    assert!(matches!(result, Err(Error::CycleDetected { .. })));
}

// ============================================================================
// Annotation index
// ============================================================================

/// Each type is scanned once, however often it is resolved
#[test]
fn test_scans_are_memoized() {
    let index = AnnotationIndex::new();
    let resolver = GraphResolver::new(&index);

    resolver.resolve_roots(&[id::<Top>()]).expect("no cycle");
    let after_first = index.scan_count();
    resolver.resolve_roots(&[id::<Top>()]).expect("no cycle");

    assert_eq!(after_first, 4);
    assert_eq!(index.scan_count(), after_first);
    assert_eq!(index.len(), 4);
}

/// Own declarations come before inherited ones
#[test]
fn test_inherited_declarations_follow_own() {
    let index = AnnotationIndex::new();
    let key = TypeKey::of::<ChildTest>();

    let declared: Vec<Vec<&str>> = index
        .annotations::<Features>(&key)
        .iter()
        .map(|features| features.ids().iter().map(FeatureId::short_name).collect())
        .collect();

    assert_eq!(declared, vec![vec!["X"], vec!["Loner"]]);
    assert_eq!(
        index.scan(&key).hierarchy(),
        vec![TypeKey::of::<ChildTest>(), TypeKey::of::<ParentTest>()]
    );
}
