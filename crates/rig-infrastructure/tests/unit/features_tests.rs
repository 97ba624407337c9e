//! Built-in feature tests

use rig_application::{
    Binder, ClassRunner, DeclareFeatures, Feature, FeatureId, FeatureType, FeaturesRunner,
    Inject, Injectable, Scope, TestClass, TestClassDescriptor, TestInstance, TestMethod,
    list_features, resolve_feature,
};
use rig_domain::{Annotated, Annotations, Error, Result};
use rig_infrastructure::features::{TestWorkspace, TracingFeature, WorkspaceFeature};
use rig_infrastructure::{ErrorContext, TracingRunNotifier};
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

thread_local! {
    static WORKSPACES: RefCell<Vec<PathBuf>> = const { RefCell::new(Vec::new()) };
}

/// Writes into the run workspace
pub struct WorkspaceTest {
    workspace: Inject<TestWorkspace>,
}

impl Annotated for WorkspaceTest {
    fn annotations() -> Annotations {
        Annotations::new().requires([FeatureId::of::<WorkspaceFeature>()])
    }
}

impl Injectable for WorkspaceTest {
    fn inject_members(&self, scope: &Scope) -> Result<()> {
        self.workspace.resolve(scope)
    }
}

impl TestInstance for WorkspaceTest {}

impl TestClass for WorkspaceTest {
    fn create() -> Result<Self> {
        Ok(Self {
            workspace: Inject::new(),
        })
    }

    fn methods() -> Vec<TestMethod> {
        let writes = |test: &WorkspaceTest| -> Result<()> {
            let workspace = test.workspace.get()?;
            std::fs::write(workspace.join("out.txt"), "written")
                .io_context("Failed to write into the test workspace")?;
            WORKSPACES.with(|seen| seen.borrow_mut().push(workspace.path().to_path_buf()));
            Ok(())
        };
        vec![
            TestMethod::new("writes_first", writes),
            TestMethod::new("writes_second", writes),
        ]
    }
}

fn workspace_runner() -> Arc<FeaturesRunner> {
    FeaturesRunner::new(TestClassDescriptor::of::<WorkspaceTest>()).expect("runner builds")
}

/// The workspace feature pulls in the tracing feature first
#[test]
fn test_workspace_requires_tracing() {
    let runner = workspace_runner();
    assert_eq!(runner.graph().names(), vec!["TracingFeature", "WorkspaceFeature"]);
}

/// Every method of a run shares one workspace, removed on stop
#[test]
fn test_workspace_lifecycle_through_class_run() {
    let notifier = Arc::new(TracingRunNotifier::new());

    ClassRunner::new(workspace_runner())
        .run(notifier.clone())
        .expect("class run succeeds");

    let seen = WORKSPACES.with(|seen| seen.borrow().clone());
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert!(!seen[0].exists(), "workspace removed on stop");
    assert_eq!(notifier.summary().passed, 2);
}

#[test]
fn test_workspace_start_and_stop() {
    let runner = workspace_runner();
    let feature = WorkspaceFeature::construct().expect("construct");
    assert!(feature.path().is_none());

    feature.start(&runner).expect("start");
    let path = feature.path().expect("workspace created");
    assert!(path.is_dir());
    assert!(
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("rig-workspace-"))
    );

    feature.stop(&runner).expect("stop");
    assert!(!path.exists());
    assert!(feature.path().is_none());
    feature.stop(&runner).expect("second stop is a no-op");
}

/// Binding the workspace needs a started feature
#[test]
fn test_configure_before_start_fails() {
    let runner = workspace_runner();
    let feature = WorkspaceFeature::construct().expect("construct");

    let error = feature
        .configure(&runner, &mut Binder::new())
        .expect_err("not started");

    assert!(matches!(error, Error::Internal { .. }));
}

#[test]
fn test_tracing_feature_times_the_run() {
    let runner = workspace_runner();
    runner.create_root_scope(Arc::new(TracingRunNotifier::new()));
    runner.initialize().expect("initialize");

    let tracing = runner.feature::<TracingFeature>().expect("live feature");
    assert!(tracing.elapsed_ms().is_some());

    runner.stop().expect("stop");
    assert!(runner.feature::<TracingFeature>().is_none());
}

#[test]
fn test_builtin_features_registered() {
    assert_eq!(
        resolve_feature("tracing").expect("registered"),
        FeatureId::of::<TracingFeature>()
    );
    assert_eq!(
        resolve_feature("workspace").expect("registered"),
        FeatureId::of::<WorkspaceFeature>()
    );

    let names: Vec<&str> = list_features().into_iter().map(|(name, _)| name).collect();
    assert!(names.contains(&"tracing"));
    assert!(names.contains(&"workspace"));
}
