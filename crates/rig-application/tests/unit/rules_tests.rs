//! Tests for rule collection and application

use crate::support::{IdleTest, RecordingNotifier, journal, record};
use rig_application::{
    DeclareFeatures, Feature, FeatureId, FeatureType, FeaturesRunner, Inject, Injectable,
    RuleMember, RunNotifier, Scope, Statement, TestClass, TestClassDescriptor, TestInstance,
    TestMethod, TestRule, apply_rules,
};
use rig_domain::{Annotated, Annotations, Description, Error, Result};
use std::sync::Arc;

/// Records around the wrapped statement
struct Around(&'static str);

impl Injectable for Around {}

impl TestRule for Around {
    fn apply<'a>(&'a self, base: Statement<'a>, _description: &Description) -> Statement<'a> {
        Box::new(move || {
            record(format!("{}.before", self.0));
            let outcome = base();
            record(format!("{}.after", self.0));
            outcome
        })
    }
}

/// A produced rule that needs the run notifier
#[derive(Default)]
struct NotifyingRule {
    notifier: Inject<dyn RunNotifier>,
}

impl Injectable for NotifyingRule {
    fn inject_members(&self, scope: &Scope) -> Result<()> {
        self.notifier.resolve(scope)
    }
}

impl TestRule for NotifyingRule {
    fn apply<'a>(&'a self, base: Statement<'a>, _description: &Description) -> Statement<'a> {
        Box::new(move || {
            record(format!("notifier injected: {}", self.notifier.is_injected()));
            base()
        })
    }
}

/// Contributes class and method rules, methods declared before fields
pub struct RuleFeature;
impl Annotated for RuleFeature {}
impl Injectable for RuleFeature {}
impl FeatureType for RuleFeature {
    fn construct() -> Result<Self> {
        Ok(Self)
    }
    fn class_rule_members() -> Vec<RuleMember> {
        vec![
            RuleMember::method("class_method", || Ok(Arc::new(Around("feature.class_method")))),
            RuleMember::field("class_field", Around("feature.class_field")),
        ]
    }
}
impl Feature for RuleFeature {
    fn rule_members(&self) -> Vec<RuleMember> {
        vec![
            RuleMember::method("notifying", || Ok(Arc::new(NotifyingRule::default()))),
            RuleMember::field("field", Around("feature.field")),
        ]
    }
}

pub struct RuledTest;
impl Annotated for RuledTest {
    fn annotations() -> Annotations {
        Annotations::new().requires([FeatureId::of::<RuleFeature>()])
    }
}
impl Injectable for RuledTest {}
impl TestInstance for RuledTest {
    fn rule_members(&self) -> Vec<RuleMember> {
        vec![RuleMember::field("own", Around("test.own"))]
    }
}
impl TestClass for RuledTest {
    fn create() -> Result<Self> {
        Ok(Self)
    }
    fn methods() -> Vec<TestMethod> {
        Vec::new()
    }
    fn class_rule_members() -> Vec<RuleMember> {
        vec![RuleMember::field("own_class", Around("test.own_class"))]
    }
}

pub struct BrokenRuleTest;
impl Annotated for BrokenRuleTest {}
impl Injectable for BrokenRuleTest {}
impl TestInstance for BrokenRuleTest {
    fn rule_members(&self) -> Vec<RuleMember> {
        vec![RuleMember::method("broken", || Err(Error::generic("cannot build rule")))]
    }
}
impl TestClass for BrokenRuleTest {
    fn create() -> Result<Self> {
        Ok(Self)
    }
    fn methods() -> Vec<TestMethod> {
        Vec::new()
    }
}

fn run_rules(rules: &[Arc<dyn TestRule>]) {
    let description = Description::for_class("rules");
    let body: Statement<'_> = Box::new(|| {
        record("body");
        Ok(())
    });
    let statement = apply_rules(rules, body, &description);
    statement().expect("statement succeeds");
}

fn runner_with_scope<T: TestClass>() -> Arc<FeaturesRunner> {
    let runner = FeaturesRunner::new(TestClassDescriptor::of::<T>()).expect("runner builds");
    runner.create_root_scope(Arc::new(RecordingNotifier::default()));
    runner
}

// ============================================================================
// Application order
// ============================================================================

/// The first rule is the outermost wrapper
#[test]
fn test_first_rule_is_outermost() {
    let rules: Vec<Arc<dyn TestRule>> = vec![Arc::new(Around("outer")), Arc::new(Around("inner"))];
    run_rules(&rules);

    assert_eq!(
        journal(),
        vec!["outer.before", "inner.before", "body", "inner.after", "outer.after"]
    );
}

// ============================================================================
// Collection order
// ============================================================================

/// Features first, then the test class; fields before methods within each
#[test]
fn test_class_rule_order() {
    let runner = runner_with_scope::<RuledTest>();
    let rules = runner.class_rules().expect("rules collect");
    assert_eq!(rules.len(), 3);

    run_rules(&rules);
    let before: Vec<String> = journal()
        .into_iter()
        .filter(|entry| entry.ends_with(".before"))
        .collect();
    assert_eq!(
        before,
        vec![
            "feature.class_field.before",
            "feature.class_method.before",
            "test.own_class.before",
        ]
    );
}

/// Method rules come from live features, then the instance; produced rules are injected
#[test]
fn test_method_rule_order_and_injection() {
    let runner = runner_with_scope::<RuledTest>();
    runner.initialize().expect("initialize");
    let rules = runner.method_rules(&RuledTest).expect("rules collect");
    assert_eq!(rules.len(), 3);

    run_rules(&rules);
    let entries: Vec<String> = journal()
        .into_iter()
        .filter(|entry| !entry.ends_with(".after"))
        .collect();
    assert_eq!(
        entries,
        vec![
            "feature.field.before",
            "notifier injected: true",
            "test.own.before",
            "body"
        ]
    );
}

/// Features that were not instantiated contribute no method rules
#[test]
fn test_method_rules_without_live_features() {
    let runner = runner_with_scope::<RuledTest>();
    let rules = runner.method_rules(&IdleTest).expect("rules collect");
    assert!(rules.is_empty());
}

// ============================================================================
// Production failures
// ============================================================================

/// A failing rule method is reported with its owner and name
#[test]
fn test_rule_production_failure() {
    let runner = runner_with_scope::<BrokenRuleTest>();
    let error = runner
        .method_rules(&BrokenRuleTest)
        .err()
        .expect("production fails");

    let Error::RuleProduction { member, .. } = &error else {
        panic!("expected rule production error, got {error:?}");
    };
    assert_eq!(member, "BrokenRuleTest::broken");
    assert!(error.to_string().contains("Errors in rules factory"));
}

/// Rules cannot be collected before a scope exists
#[test]
fn test_rules_require_scope() {
    let runner =
        FeaturesRunner::new(TestClassDescriptor::of::<RuledTest>()).expect("runner builds");
    assert!(runner.class_rules().is_err());
}
