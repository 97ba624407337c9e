//! Lifecycle phases of a class run
//!
//! Each entry point checks the run state first and fails with
//! [`Error::InvalidState`] when called out of order. Entry phases advance
//! the state only when the dispatch succeeded; exit phases always advance.

use super::{FeaturesRunner, RunnerRef, write};
use crate::di::{Binder, Scope};
use crate::ports::feature::Feature;
use crate::ports::locator::ResourceLocator;
use crate::ports::notifier::RunNotifier;
use crate::ports::test_class::{TestInstance, TestMethod};
use crate::services::dispatch::invoke_features;
use crate::services::feature_registry::FeatureRegistry;
use rig_domain::error::{Error, Result};
use rig_domain::{MethodStage, Phase, RunState};
use std::sync::Arc;
use tracing::{debug, info};

impl FeaturesRunner {
    fn enter(&self, phase: Phase) -> Result<()> {
        let state = self.state();
        if state.accepts(phase) {
            Ok(())
        } else {
            Err(Error::InvalidState { phase, state })
        }
    }

    fn advance(&self, phase: Phase) {
        let mut state = write(&self.state);
        *state = state.after(phase);
    }

    /// Advance past `phase` unless an entry phase failed
    fn complete(&self, phase: Phase, outcome: Result<()>) -> Result<()> {
        if outcome.is_ok() || phase.is_exit() {
            self.advance(phase);
        }
        outcome
    }

    fn dispatch<F>(&self, phase: Phase, call: F) -> Result<()>
    where
        F: FnMut(&dyn Feature) -> Result<()>,
    {
        // Hooks run without any runner lock held
        let features = self.features_snapshot();
        invoke_features(phase, &features, call)
    }

    /// Create the root scope of the run
    ///
    /// Binds the runner handle, `notifier` and the resource locator. Calling
    /// it again replaces the whole scope chain.
    pub fn create_root_scope(&self, notifier: Arc<dyn RunNotifier>) -> Arc<Scope> {
        let mut binder = Binder::new();
        binder
            .bind(RunnerRef(self.this.clone()))
            .bind_arc::<dyn RunNotifier>(notifier)
            .bind_arc::<dyn ResourceLocator>(Arc::clone(&self.locator));
        let root = Scope::root(binder);
        *write(&self.scope) = Some(Arc::clone(&root));
        root
    }

    /// Instantiate every resolved feature, then dispatch `initialize`
    ///
    /// Construction failures abort at once; hook failures are aggregated.
    pub fn initialize(&self) -> Result<()> {
        self.enter(Phase::Initialize)?;
        let registry = FeatureRegistry::instantiate(&self.graph)?;
        *write(&self.features) = registry;
        self.dispatch(Phase::Initialize, |f| f.initialize(self))?;
        self.advance(Phase::Initialize);
        info!(runner = %self, features = self.graph.len(), "Features initialized");
        Ok(())
    }

    pub fn start(&self) -> Result<()> {
        self.enter(Phase::Start)?;
        let outcome = self.dispatch(Phase::Start, |f| f.start(self));
        self.complete(Phase::Start, outcome)
    }

    /// Build the child scope from the bindings of every feature
    ///
    /// Features bind in resolution order; the first failing feature aborts
    /// the phase. Every feature is then injected from the child scope.
    pub fn configure_bindings(&self) -> Result<()> {
        self.enter(Phase::ConfigureBindings)?;
        let root = Scope::root_of(&self.require_scope()?);
        let features = self.features_snapshot();

        let mut binder = Binder::new();
        for entry in &features {
            entry.instance().configure(self, &mut binder)?;
        }
        let child = Scope::child(&root, binder);
        for entry in &features {
            child.inject_members(entry.instance().as_ref())?;
        }

        *write(&self.scope) = Some(child);
        self.advance(Phase::ConfigureBindings);
        debug!(runner = %self, "Feature bindings configured");
        Ok(())
    }

    pub fn before_run(&self) -> Result<()> {
        self.enter(Phase::BeforeRun)?;
        let outcome = self.dispatch(Phase::BeforeRun, |f| f.before_run(self));
        self.complete(Phase::BeforeRun, outcome)
    }

    /// Create the instance under test for the next method
    pub fn create_test(&self) -> Result<Arc<dyn TestInstance>> {
        let test = self.test_class.create_instance()?;
        *write(&self.under_test) = Some(Arc::clone(&test));
        Ok(test)
    }

    /// Dispatch `before_setup`, inject the instance under test, then
    /// dispatch `test_created`
    pub fn before_setup(&self) -> Result<()> {
        self.enter(Phase::BeforeSetup)?;
        self.dispatch(Phase::BeforeSetup, |f| f.before_setup(self))?;
        let test = self
            .under_test()
            .ok_or_else(|| Error::internal("no instance under test has been created"))?;
        self.require_scope()?.inject_members(test.as_ref())?;
        self.dispatch(Phase::TestCreated, |f| f.test_created(test.as_ref()))
    }

    /// Dispatch `before_method_run`, then inject `test`
    pub fn before_method_run(&self, method: &TestMethod, test: &dyn TestInstance) -> Result<()> {
        self.enter(Phase::BeforeMethodRun)?;
        *write(&self.state) = RunState::Running(MethodStage::BeforeMethod);
        self.dispatch(Phase::BeforeMethodRun, |f| {
            f.before_method_run(self, method, test)
        })?;
        self.require_scope()?.inject_members(test)?;
        self.advance(Phase::BeforeMethodRun);
        Ok(())
    }

    pub fn after_method_run(&self, method: &TestMethod, test: &dyn TestInstance) -> Result<()> {
        self.enter(Phase::AfterMethodRun)?;
        let outcome = self.dispatch(Phase::AfterMethodRun, |f| {
            f.after_method_run(self, method, test)
        });
        self.complete(Phase::AfterMethodRun, outcome)
    }

    pub fn after_teardown(&self) -> Result<()> {
        self.enter(Phase::AfterTeardown)?;
        let outcome = self.dispatch(Phase::AfterTeardown, |f| f.after_teardown(self));
        self.complete(Phase::AfterTeardown, outcome)
    }

    /// Revert to the root scope, then dispatch `after_run`
    pub fn after_run(&self) -> Result<()> {
        self.enter(Phase::AfterRun)?;
        if let Some(current) = self.scope() {
            *write(&self.scope) = Some(Scope::root_of(&current));
        }
        let outcome = self.dispatch(Phase::AfterRun, |f| f.after_run(self));
        self.complete(Phase::AfterRun, outcome)
    }

    /// Dispatch `stop` and release every feature
    ///
    /// The run ends `Stopped` whatever the hooks return.
    pub fn stop(&self) -> Result<()> {
        self.enter(Phase::Stop)?;
        let outcome = self.dispatch(Phase::Stop, |f| f.stop(self));
        write(&self.features).clear();
        *write(&self.under_test) = None;
        info!(runner = %self, failed = outcome.is_err(), "Class run stopped");
        self.complete(Phase::Stop, outcome)
    }
}
