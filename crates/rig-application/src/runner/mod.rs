//! Features Runner
//!
//! Orchestrates one class run: resolves the features the test class
//! requires, instantiates them, maintains the injection scopes and
//! dispatches every lifecycle phase.
//!
//! ```text
//! create_root_scope
//! initialize → start → configure_bindings → before_run
//!     for each method:
//!         create_test → before_setup → (set_up)
//!         before_method_run → (body) → after_method_run
//!         (tear_down) → after_teardown
//! after_run → stop
//! ```
//!
//! Host engines usually drive a runner through the statement wrappers in
//! [`statements`] rather than calling the phases directly.

mod lifecycle;
pub mod statements;

use crate::di::Scope;
use crate::ports::feature::{Feature, FeatureId};
use crate::ports::locator::{FixedResourceLocator, ResourceLocator};
use crate::ports::rule::TestRule;
use crate::ports::test_class::{TestClassDescriptor, TestInstance, TestMethod};
use crate::services::annotation_index::AnnotationIndex;
use crate::services::feature_registry::{FeatureRegistry, RegisteredFeature};
use crate::services::graph::{FeatureGraph, GraphResolver};
use crate::services::rules::RuleCollector;
use rig_domain::error::{Error, Result};
use rig_domain::{Configuration, RunState};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::info;

/// Handle on the runner of the current class run, bound in the root scope
#[derive(Clone, Debug)]
pub struct RunnerRef(Weak<FeaturesRunner>);

impl RunnerRef {
    /// The runner, while the class run is alive
    pub fn get(&self) -> Option<Arc<FeaturesRunner>> {
        self.0.upgrade()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Orchestrator of one class run
pub struct FeaturesRunner {
    test_class: TestClassDescriptor,
    index: Arc<AnnotationIndex>,
    locator: Arc<dyn ResourceLocator>,
    graph: FeatureGraph,
    features: RwLock<FeatureRegistry>,
    scope: RwLock<Option<Arc<Scope>>>,
    under_test: RwLock<Option<Arc<dyn TestInstance>>>,
    state: RwLock<RunState>,
    this: Weak<FeaturesRunner>,
}

/// Builder for [`FeaturesRunner`]
pub struct RunnerBuilder {
    test_class: TestClassDescriptor,
    index: Option<Arc<AnnotationIndex>>,
    locator: Option<Arc<dyn ResourceLocator>>,
    extra_features: Vec<FeatureId>,
}

impl RunnerBuilder {
    pub fn new(test_class: TestClassDescriptor) -> Self {
        Self {
            test_class,
            index: None,
            locator: None,
            extra_features: Vec::new(),
        }
    }

    /// Share an annotation index between runners
    #[must_use]
    pub fn with_index(mut self, index: Arc<AnnotationIndex>) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_locator(mut self, locator: Arc<dyn ResourceLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Require a feature on top of what the test class declares
    #[must_use]
    pub fn with_feature(mut self, feature: FeatureId) -> Self {
        self.extra_features.push(feature);
        self
    }

    #[must_use]
    pub fn with_features<I: IntoIterator<Item = FeatureId>>(mut self, features: I) -> Self {
        self.extra_features.extend(features);
        self
    }

    /// Resolve the feature graph and create the runner
    ///
    /// Fails with [`Error::CycleDetected`] when the requirements loop.
    pub fn build(self) -> Result<Arc<FeaturesRunner>> {
        let index = self.index.unwrap_or_default();
        let locator: Arc<dyn ResourceLocator> = match self.locator {
            Some(locator) => locator,
            None => Arc::new(FixedResourceLocator::current_dir()),
        };

        let resolver = GraphResolver::new(&index);
        let mut roots = resolver.requirements(self.test_class.key());
        roots.extend(self.extra_features);
        let graph = resolver.resolve_roots(&roots)?;

        info!(
            test_class = self.test_class.short_name(),
            features = ?graph.names(),
            "Resolved features for test class"
        );

        let test_class = self.test_class;
        Ok(Arc::new_cyclic(|this| FeaturesRunner {
            test_class,
            index,
            locator,
            graph,
            features: RwLock::new(FeatureRegistry::default()),
            scope: RwLock::new(None),
            under_test: RwLock::new(None),
            state: RwLock::new(RunState::default()),
            this: this.clone(),
        }))
    }
}

impl FeaturesRunner {
    pub fn builder(test_class: TestClassDescriptor) -> RunnerBuilder {
        RunnerBuilder::new(test_class)
    }

    /// Runner with a private index and the working-directory locator
    pub fn new(test_class: TestClassDescriptor) -> Result<Arc<Self>> {
        RunnerBuilder::new(test_class).build()
    }

    pub fn test_class(&self) -> &TestClassDescriptor {
        &self.test_class
    }

    /// Resolved features, dependency first
    pub fn graph(&self) -> &FeatureGraph {
        &self.graph
    }

    pub fn state(&self) -> RunState {
        *read(&self.state)
    }

    /// The scope lookups currently start from
    pub fn scope(&self) -> Option<Arc<Scope>> {
        read(&self.scope).clone()
    }

    fn require_scope(&self) -> Result<Arc<Scope>> {
        self.scope()
            .ok_or_else(|| Error::internal("root scope has not been created"))
    }

    /// The current instance under test
    pub fn under_test(&self) -> Option<Arc<dyn TestInstance>> {
        read(&self.under_test).clone()
    }

    /// The live instance of exactly type `F`
    pub fn feature<F: Feature>(&self) -> Option<Arc<F>> {
        read(&self.features).get::<F>()
    }

    /// The live instance registered under `id`
    pub fn lookup(&self, id: &FeatureId) -> Option<Arc<dyn Feature>> {
        read(&self.features).lookup(id)
    }

    /// Live feature instances, in resolution order
    pub fn features(&self) -> Vec<Arc<dyn Feature>> {
        read(&self.features).instances()
    }

    fn features_snapshot(&self) -> Vec<RegisteredFeature> {
        read(&self.features).entries().to_vec()
    }

    /// Merged configuration of type `C`, or `None` when nothing declares one
    ///
    /// The test class (and its ancestors) takes precedence over the features,
    /// which are consulted from the last resolved to the first.
    pub fn find_config<C: Configuration>(&self) -> Option<C> {
        let sources = std::iter::once(*self.test_class.key())
            .chain(self.graph.iter().rev().map(|id| *id.key()));
        let configs: Vec<Arc<C>> = sources
            .filter_map(|key| self.index.annotation::<C>(&key))
            .collect();
        let (last, rest) = configs.split_last()?;
        Some(
            rest.iter()
                .rev()
                .fold(C::clone(last), |merged, config| config.merge(&merged)),
        )
    }

    /// Merged configuration of type `C`, the default when nothing declares one
    pub fn config<C: Configuration>(&self) -> C {
        self.find_config::<C>().unwrap_or_default()
    }

    /// Configuration of type `C` declared on `method`, else the class-level one
    pub fn method_config<C: Configuration>(&self, method: &TestMethod) -> C {
        match method.annotations().get::<C>() {
            Some(config) => config.merge(&self.config::<C>()),
            None => self.config::<C>(),
        }
    }

    /// Directory test resources are resolved against
    pub fn target_test_basepath(&self) -> &Path {
        self.locator.basepath()
    }

    /// Path of the named test resource when it exists
    pub fn target_test_resource(&self, name: &str) -> Result<Option<PathBuf>> {
        self.locator.target_test_resource(name)
    }

    /// Class-level rules, produced ones injected from the current scope
    pub fn class_rules(&self) -> Result<Vec<Arc<dyn TestRule>>> {
        let scope = self.require_scope()?;
        RuleCollector::new(&scope).collect_class_level(&self.graph, &self.test_class)
    }

    /// Method-level rules for `test`, produced ones injected from the current scope
    pub fn method_rules(&self, test: &dyn TestInstance) -> Result<Vec<Arc<dyn TestRule>>> {
        let scope = self.require_scope()?;
        RuleCollector::new(&scope).collect_method_level(
            &self.features_snapshot(),
            &self.test_class,
            test,
        )
    }
}

impl fmt::Display for FeaturesRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeaturesRunner [test={}]", self.test_class.name())
    }
}

impl fmt::Debug for FeaturesRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturesRunner")
            .field("test_class", &self.test_class)
            .field("graph", &self.graph)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
