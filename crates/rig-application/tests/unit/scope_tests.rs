//! Tests for feature bindings and injection through a class run

use rig_application::{
    Binder, DeclareFeatures, Feature, FeatureId, FeatureType, FeaturesRunner, Inject, Injectable,
    ResourceLocator, RunNotifier, RunnerRef, Scope, TestClass, TestClassDescriptor,
    TestInstance, TestMethod,
};
use rig_domain::{Annotated, Annotations, Error, Result};
use std::sync::Arc;

use crate::support::RecordingNotifier;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> &'static str;
}

struct Hello(&'static str);
impl Greeter for Hello {
    fn greet(&self) -> &'static str {
        self.0
    }
}

/// Binds the base greeter
pub struct BaseGreeting;
impl Annotated for BaseGreeting {}
impl Injectable for BaseGreeting {}
impl FeatureType for BaseGreeting {
    fn construct() -> Result<Self> {
        Ok(Self)
    }
}
impl Feature for BaseGreeting {
    fn configure(&self, _: &FeaturesRunner, binder: &mut Binder) -> Result<()> {
        binder.bind_arc::<dyn Greeter>(Arc::new(Hello("base")));
        Ok(())
    }
}

/// Requires the base feature and overrides its greeter
pub struct DerivedGreeting {
    greeter: Inject<dyn Greeter>,
    notifier: Inject<dyn RunNotifier>,
}
impl Annotated for DerivedGreeting {
    fn annotations() -> Annotations {
        Annotations::new().requires([FeatureId::of::<BaseGreeting>()])
    }
}
impl Injectable for DerivedGreeting {
    fn inject_members(&self, scope: &Scope) -> Result<()> {
        self.greeter.resolve(scope)?;
        self.notifier.resolve(scope)
    }
}
impl FeatureType for DerivedGreeting {
    fn construct() -> Result<Self> {
        Ok(Self {
            greeter: Inject::new(),
            notifier: Inject::new(),
        })
    }
}
impl Feature for DerivedGreeting {
    fn configure(&self, _: &FeaturesRunner, binder: &mut Binder) -> Result<()> {
        binder.bind_arc::<dyn Greeter>(Arc::new(Hello("derived")));
        Ok(())
    }
}

/// Test class reading the greeter and the run context
pub struct GreetingTest {
    greeter: Inject<dyn Greeter>,
    runner: Inject<RunnerRef>,
    locator: Inject<dyn ResourceLocator>,
}
impl Annotated for GreetingTest {
    fn annotations() -> Annotations {
        Annotations::new().requires([FeatureId::of::<DerivedGreeting>()])
    }
}
impl Injectable for GreetingTest {
    fn inject_members(&self, scope: &Scope) -> Result<()> {
        self.greeter.resolve(scope)?;
        self.runner.resolve(scope)?;
        self.locator.resolve(scope)
    }
}
impl TestInstance for GreetingTest {}
impl TestClass for GreetingTest {
    fn create() -> Result<Self> {
        Ok(Self {
            greeter: Inject::new(),
            runner: Inject::new(),
            locator: Inject::new(),
        })
    }
    fn methods() -> Vec<TestMethod> {
        vec![TestMethod::new("greets", |test: &GreetingTest| {
            assert_eq!(test.greeter.get()?.greet(), "derived");
            Ok(())
        })]
    }
}

fn configured_runner() -> Arc<FeaturesRunner> {
    let runner =
        FeaturesRunner::new(TestClassDescriptor::of::<GreetingTest>()).expect("runner builds");
    runner.create_root_scope(Arc::new(RecordingNotifier::default()));
    runner.initialize().expect("initialize");
    runner.start().expect("start");
    runner.configure_bindings().expect("configure");
    runner
}

/// A feature later in resolution order overrides what its dependency bound
#[test]
fn test_dependent_binding_wins() {
    let runner = configured_runner();
    let scope = runner.scope().expect("child scope");

    assert_eq!(scope.require::<dyn Greeter>().expect("bound").greet(), "derived");
}

/// Features are injected from the child scope, root bindings included
#[test]
fn test_features_are_injected() {
    let runner = configured_runner();
    let feature = runner.feature::<DerivedGreeting>().expect("live feature");

    assert_eq!(feature.greeter.get().expect("injected").greet(), "derived");
    assert!(feature.notifier.is_injected());
}

/// The instance under test sees the run context of the root scope
#[test]
fn test_instance_under_test_is_injected() {
    let runner = configured_runner();
    runner.before_run().expect("before run");
    let test = runner.create_test().expect("instance");
    runner.before_setup().expect("before setup");

    let test = test.downcast_arc::<GreetingTest>().ok().expect("test type");
    let handle = test.runner.get().expect("runner handle");
    assert!(Arc::ptr_eq(&handle.get().expect("runner alive"), &runner));
    assert_eq!(
        test.locator.get().expect("locator").basepath(),
        runner.target_test_basepath()
    );
}

/// The child scope is layered on the root scope
#[test]
fn test_child_scope_chain() {
    let runner = configured_runner();
    let child = runner.scope().expect("child scope");

    assert_eq!(child.depth(), 2);
    let root = child.parent().expect("root scope");
    assert!(root.get::<dyn Greeter>().is_none());
    assert!(root.contains::<dyn RunNotifier>());
    assert!(child.contains::<RunnerRef>());
}

/// Configuring bindings before the root scope exists is an error
#[test]
fn test_configure_requires_root_scope() {
    let runner =
        FeaturesRunner::new(TestClassDescriptor::of::<GreetingTest>()).expect("runner builds");
    runner.initialize().expect("initialize");
    runner.start().expect("start");

    let error = runner.configure_bindings().expect_err("no root scope");
    assert!(matches!(error, Error::Internal { .. }));
}
