//! Statement wrappers for host engines
//!
//! A host engine builds its class and method blocks from these wrappers:
//!
//! ```text
//! with_after_classes(with_before_classes(children))
//! with_afters(with_befores(method_invoker(method)))
//! ```
//!
//! The `after` wrappers are guaranteed-run blocks: their exit phases run
//! whatever the wrapped statement returned, and the failures are merged
//! with [`merge_outcomes`].

use super::FeaturesRunner;
use crate::ports::rule::Statement;
use crate::ports::test_class::{TestInstance, TestMethod};
use rig_domain::Phase;
use rig_domain::error::merge_outcomes;

impl FeaturesRunner {
    /// Initialize, start, configure bindings and dispatch `before_run`
    /// before `next`
    pub fn with_before_classes<'a>(&'a self, next: Statement<'a>) -> Statement<'a> {
        Box::new(move || {
            self.initialize()?;
            self.start()?;
            self.configure_bindings()?;
            self.before_run()?;
            next()
        })
    }

    /// Run `previous`, then `after_run` when bindings were configured, then
    /// always `stop`
    pub fn with_after_classes<'a>(&'a self, previous: Statement<'a>) -> Statement<'a> {
        Box::new(move || {
            let outcome = previous();
            let after_run = if self.state().accepts(Phase::AfterRun) {
                self.after_run()
            } else {
                Ok(())
            };
            let stop = if self.state().accepts(Phase::Stop) {
                self.stop()
            } else {
                Ok(())
            };
            merge_outcomes([outcome, after_run, stop])
        })
    }

    /// Dispatch `before_setup` and run the instance's own setup before `next`
    pub fn with_befores<'a>(
        &'a self,
        test: &'a dyn TestInstance,
        next: Statement<'a>,
    ) -> Statement<'a> {
        Box::new(move || {
            self.before_setup()?;
            test.set_up()?;
            next()
        })
    }

    /// Run `method` on `test` between `before_method_run` and
    /// `after_method_run`; the latter always runs
    pub fn method_invoker<'a>(
        &'a self,
        method: &'a TestMethod,
        test: &'a dyn TestInstance,
    ) -> Statement<'a> {
        Box::new(move || {
            let outcome = self
                .before_method_run(method, test)
                .and_then(|()| method.invoke(test));
            let after = self.after_method_run(method, test);
            merge_outcomes([outcome, after])
        })
    }

    /// Run `previous`, then always the instance's teardown and
    /// `after_teardown`
    pub fn with_afters<'a>(
        &'a self,
        test: &'a dyn TestInstance,
        previous: Statement<'a>,
    ) -> Statement<'a> {
        Box::new(move || {
            let outcome = previous();
            let tear_down = test.tear_down();
            let after = self.after_teardown();
            merge_outcomes([outcome, tear_down, after])
        })
    }
}
