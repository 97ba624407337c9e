//! Lifecycle tracing feature

use crate::constants::TRACING_FEATURE_NAME;
use crate::utils::TimedOperation;
use rig_application::{
    FEATURE_REGISTRY, Feature, FeatureEntry, FeatureId, FeatureType, FeaturesRunner, Injectable,
    TestInstance, TestMethod,
};
use rig_domain::{Annotated, Result};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Logs each lifecycle hook of a class run
#[derive(Debug, Default)]
pub struct TracingFeature {
    timer: Mutex<Option<TimedOperation>>,
}

impl TracingFeature {
    /// Milliseconds since `initialize`, if the run was initialized
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|timer| timer.elapsed_ms())
    }
}

impl Annotated for TracingFeature {}

impl Injectable for TracingFeature {}

impl FeatureType for TracingFeature {
    fn construct() -> Result<Self> {
        Ok(Self::default())
    }
}

impl Feature for TracingFeature {
    fn initialize(&self, runner: &FeaturesRunner) -> Result<()> {
        *self.timer.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(TimedOperation::start());
        info!(
            runner = %runner,
            features = ?runner.graph().names(),
            "Class run initialized"
        );
        Ok(())
    }

    fn start(&self, runner: &FeaturesRunner) -> Result<()> {
        debug!(runner = %runner, "start");
        Ok(())
    }

    fn before_run(&self, runner: &FeaturesRunner) -> Result<()> {
        debug!(runner = %runner, "before_run");
        Ok(())
    }

    fn before_setup(&self, runner: &FeaturesRunner) -> Result<()> {
        debug!(runner = %runner, "before_setup");
        Ok(())
    }

    fn test_created(&self, _test: &dyn TestInstance) -> Result<()> {
        debug!("test_created");
        Ok(())
    }

    fn before_method_run(
        &self,
        runner: &FeaturesRunner,
        method: &TestMethod,
        _test: &dyn TestInstance,
    ) -> Result<()> {
        debug!(runner = %runner, method = method.name(), "before_method_run");
        Ok(())
    }

    fn after_method_run(
        &self,
        runner: &FeaturesRunner,
        method: &TestMethod,
        _test: &dyn TestInstance,
    ) -> Result<()> {
        debug!(runner = %runner, method = method.name(), "after_method_run");
        Ok(())
    }

    fn after_teardown(&self, runner: &FeaturesRunner) -> Result<()> {
        debug!(runner = %runner, "after_teardown");
        Ok(())
    }

    fn after_run(&self, runner: &FeaturesRunner) -> Result<()> {
        debug!(runner = %runner, "after_run");
        Ok(())
    }

    fn stop(&self, runner: &FeaturesRunner) -> Result<()> {
        info!(
            runner = %runner,
            duration_ms = self.elapsed_ms().unwrap_or_default(),
            "Class run stopped"
        );
        Ok(())
    }
}

#[linkme::distributed_slice(FEATURE_REGISTRY)]
static TRACING_FEATURE: FeatureEntry = FeatureEntry {
    name: TRACING_FEATURE_NAME,
    description: "Logs every lifecycle hook and the class run duration",
    feature: FeatureId::of::<TracingFeature>,
};
