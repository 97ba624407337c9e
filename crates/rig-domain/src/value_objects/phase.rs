//! Lifecycle phases
//!
//! The phase set is fixed. Entry phases walk the features in resolution
//! order, exit phases walk them in reverse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction in which a phase visits the resolved features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchOrder {
    /// Dependencies first
    Forward,
    /// Dependents first
    Reverse,
}

/// One named point of the class-run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Features are instantiated and initialized
    Initialize,
    /// Features start
    Start,
    /// Features contribute bindings to the child scope
    ConfigureBindings,
    /// Once, before any test method
    BeforeRun,
    /// Before each test instance's own setup
    BeforeSetup,
    /// Right after the instance under test was injected
    TestCreated,
    /// Before each test method
    BeforeMethodRun,
    /// After each test method, even when it failed
    AfterMethodRun,
    /// After each test instance's teardown, even when it failed
    AfterTeardown,
    /// Once, after all test methods
    AfterRun,
    /// Terminal phase
    Stop,
}

impl Phase {
    /// Every phase, in lifecycle order
    pub const ALL: [Phase; 11] = [
        Phase::Initialize,
        Phase::Start,
        Phase::ConfigureBindings,
        Phase::BeforeRun,
        Phase::BeforeSetup,
        Phase::TestCreated,
        Phase::BeforeMethodRun,
        Phase::AfterMethodRun,
        Phase::AfterTeardown,
        Phase::AfterRun,
        Phase::Stop,
    ];

    /// Order in which features receive this phase's hook
    pub fn order(self) -> DispatchOrder {
        match self {
            Phase::AfterTeardown | Phase::AfterRun | Phase::Stop => DispatchOrder::Reverse,
            _ => DispatchOrder::Forward,
        }
    }

    /// Exit phases run inside guaranteed-run blocks
    pub fn is_exit(self) -> bool {
        matches!(
            self,
            Phase::AfterMethodRun | Phase::AfterTeardown | Phase::AfterRun | Phase::Stop
        )
    }

    /// Stable lowercase name used in logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Initialize => "initialize",
            Phase::Start => "start",
            Phase::ConfigureBindings => "configure_bindings",
            Phase::BeforeRun => "before_run",
            Phase::BeforeSetup => "before_setup",
            Phase::TestCreated => "test_created",
            Phase::BeforeMethodRun => "before_method_run",
            Phase::AfterMethodRun => "after_method_run",
            Phase::AfterTeardown => "after_teardown",
            Phase::AfterRun => "after_run",
            Phase::Stop => "stop",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
