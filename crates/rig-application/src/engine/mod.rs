//! Reference host engine
//!
//! Runs a test class through a [`FeaturesRunner`] the way a block-based
//! test engine would:
//!
//! ```text
//! class rules( after_classes( before_classes( for each method:
//!     method rules( afters( befores( invoker ))) )))
//! ```
//!
//! Method outcomes go to the [`RunNotifier`]; a method failure never stops
//! the run. Class-level failures are reported against the class
//! description and returned.

use crate::ports::notifier::RunNotifier;
use crate::ports::rule::{Statement, apply_rules};
use crate::ports::test_class::TestMethod;
use crate::runner::FeaturesRunner;
use rig_domain::Description;
use rig_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Drives one class run
pub struct ClassRunner {
    runner: Arc<FeaturesRunner>,
}

impl ClassRunner {
    pub fn new(runner: Arc<FeaturesRunner>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &Arc<FeaturesRunner> {
        &self.runner
    }

    /// Run every test method of the class
    pub fn run(&self, notifier: Arc<dyn RunNotifier>) -> Result<()> {
        let runner = self.runner.as_ref();
        let class = Description::for_class(runner.test_class().name());
        info!(runner = %runner, "Running test class");

        runner.create_root_scope(Arc::clone(&notifier));
        let outcome = runner.class_rules().and_then(|rules| {
            let children: Statement<'_> = Box::new(|| {
                self.run_children(notifier.as_ref());
                Ok(())
            });
            let block = runner.with_after_classes(runner.with_before_classes(children));
            let statement = apply_rules(&rules, block, &class);
            statement()
        });

        if let Err(error) = &outcome {
            report(notifier.as_ref(), &class, error);
        }
        outcome
    }

    fn run_children(&self, notifier: &dyn RunNotifier) {
        let runner = self.runner.as_ref();
        for method in runner.test_class().methods() {
            let description = Description::for_method(runner.test_class().name(), method.name());
            notifier.test_started(&description);
            if let Err(error) = self.method_block(&method, &description) {
                report(notifier, &description, &error);
            }
            notifier.test_finished(&description);
        }
    }

    fn method_block(&self, method: &TestMethod, description: &Description) -> Result<()> {
        let runner = self.runner.as_ref();
        let test = runner.create_test()?;
        let rules = runner.method_rules(test.as_ref())?;
        debug!(test = %description, rules = rules.len(), "Running test method");

        let invoker = runner.method_invoker(method, test.as_ref());
        let block = runner.with_afters(test.as_ref(), runner.with_befores(test.as_ref(), invoker));
        let statement = apply_rules(&rules, block, description);
        statement()
    }
}

fn report(notifier: &dyn RunNotifier, description: &Description, error: &Error) {
    match error {
        Error::AssumptionViolated { reason } => {
            notifier.test_assumption_failed(description, reason);
        }
        other => notifier.test_failure(description, other),
    }
}
