//! Bootstrap - composition root for class runs
//!
//! Turns an [`AppConfig`] into runners: the configured features are resolved
//! through the feature registry and added to every test class, resources are
//! located on disk and run events go to the tracing notifier.
//!
//! ```text
//! AppConfig → resolve_features (linkme registry) ─┐
//!           → TargetResourceLocator ──────────────┼─► RunnerBuilder → ClassRunner
//!             shared AnnotationIndex ─────────────┘                       │
//!                                                         TracingRunNotifier → RunSummary
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let bootstrap = Bootstrap::from_loader(&ConfigLoader::new())?;
//! let summary = bootstrap.run(TestClassDescriptor::of::<CacheTest>())?;
//! assert!(summary.is_success());
//! ```

use crate::config::{AppConfig, ConfigLoader};
use crate::locator::TargetResourceLocator;
use crate::notifier::{RunSummary, TracingRunNotifier};
use crate::utils::TimedOperation;
use rig_application::{
    AnnotationIndex, ClassRunner, FeatureGraph, FeatureId, FeaturesRunner, GraphResolver,
    ResourceLocator, RunNotifier, TestClassDescriptor, resolve_features,
};
use rig_domain::error::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Composition root built from configuration
pub struct Bootstrap {
    config: Arc<AppConfig>,
    index: Arc<AnnotationIndex>,
    locator: Arc<dyn ResourceLocator>,
}

impl Bootstrap {
    pub fn new(config: AppConfig) -> Self {
        let locator: Arc<dyn ResourceLocator> =
            Arc::new(TargetResourceLocator::from_config(&config.runner.resources));
        Self {
            config: Arc::new(config),
            index: Arc::new(AnnotationIndex::new()),
            locator,
        }
    }

    /// Load configuration and build the composition root
    pub fn from_loader(loader: &ConfigLoader) -> Result<Self> {
        Ok(Self::new(loader.load()?))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Annotation index shared by every runner of this bootstrap
    pub fn index(&self) -> &Arc<AnnotationIndex> {
        &self.index
    }

    pub fn locator(&self) -> Arc<dyn ResourceLocator> {
        Arc::clone(&self.locator)
    }

    /// Features enabled by configuration, in configured order
    pub fn configured_features(&self) -> Result<Vec<FeatureId>> {
        resolve_features(&self.config.runner.features)
    }

    /// Resolve registered features by name into a dependency-ordered graph
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<FeatureGraph> {
        let roots = resolve_features(names)?;
        GraphResolver::new(&self.index).resolve_roots(&roots)
    }

    /// Build a runner for `test_class` with the configured features
    pub fn runner(&self, test_class: TestClassDescriptor) -> Result<Arc<FeaturesRunner>> {
        FeaturesRunner::builder(test_class)
            .with_index(Arc::clone(&self.index))
            .with_locator(self.locator())
            .with_features(self.configured_features()?)
            .build()
    }

    /// Run one test class
    pub fn run(&self, test_class: TestClassDescriptor) -> Result<RunSummary> {
        self.run_all(&[test_class])
    }

    /// Run test classes one after the other and sum their outcomes
    ///
    /// A class that fails as a whole is counted in
    /// [`RunSummary::class_failures`] (or [`RunSummary::class_skips`] when it
    /// was skipped) and the next class still runs. Errors
    /// building a runner (unknown feature, dependency cycle) stop at once.
    pub fn run_all(&self, test_classes: &[TestClassDescriptor]) -> Result<RunSummary> {
        let timer = TimedOperation::start();
        let notifier = Arc::new(TracingRunNotifier::new());

        for test_class in test_classes {
            let runner = self.runner(*test_class)?;
            let shared: Arc<dyn RunNotifier> = notifier.clone();
            match ClassRunner::new(runner).run(shared) {
                Err(error) if error.is_skip() => {
                    info!(
                        test_class = test_class.short_name(),
                        error = %error,
                        "Test class skipped"
                    );
                }
                Err(error) => {
                    warn!(
                        test_class = test_class.short_name(),
                        error = %error,
                        "Test class failed"
                    );
                }
                Ok(()) => {}
            }
        }

        let summary = notifier.summary();
        info!(
            classes = test_classes.len(),
            started = summary.started,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            class_failures = summary.class_failures,
            class_skips = summary.class_skips,
            duration_ms = timer.elapsed_ms(),
            "Test run complete"
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("config", &self.config)
            .field("basepath", &self.locator.basepath())
            .finish_non_exhaustive()
    }
}
