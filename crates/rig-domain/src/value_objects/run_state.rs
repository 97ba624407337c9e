//! Class-run state machine
//!
//! ```text
//! Created → Initialized → Started → BindingsConfigured
//!     → Running(Idle → BeforeMethod → Executing → AfterMethod → Idle)*
//!     → Finished → Stopped
//! ```
//!
//! `Stopped` is terminal. `Stop` is accepted from every other state so that
//! resources are always released, even when setup never completed.

use super::phase::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the current test method stands while the run is `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodStage {
    /// Between methods
    #[default]
    Idle,
    /// `before_method_run` is being dispatched
    BeforeMethod,
    /// The test method body runs
    Executing,
    /// `after_method_run` was dispatched
    AfterMethod,
}

/// State of one class run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Features resolved, nothing instantiated yet
    #[default]
    Created,
    /// Features instantiated and initialized
    Initialized,
    /// Features started
    Started,
    /// Child scope built from feature bindings
    BindingsConfigured,
    /// Test methods are being run
    Running(MethodStage),
    /// `after_run` was dispatched
    Finished,
    /// Terminal
    Stopped,
}

impl RunState {
    /// Whether `phase` may be dispatched from this state
    pub fn accepts(self, phase: Phase) -> bool {
        match phase {
            Phase::Initialize => self == RunState::Created,
            Phase::Start => self == RunState::Initialized,
            Phase::ConfigureBindings => self == RunState::Started,
            Phase::BeforeRun => self == RunState::BindingsConfigured,
            Phase::BeforeMethodRun => matches!(
                self,
                RunState::Running(MethodStage::Idle | MethodStage::AfterMethod)
            ),
            Phase::BeforeSetup
            | Phase::TestCreated
            | Phase::AfterMethodRun
            | Phase::AfterTeardown => matches!(self, RunState::Running(_)),
            Phase::AfterRun => {
                matches!(self, RunState::BindingsConfigured | RunState::Running(_))
            }
            Phase::Stop => self != RunState::Stopped,
        }
    }

    /// State reached once `phase` has been dispatched
    pub fn after(self, phase: Phase) -> RunState {
        match phase {
            Phase::Initialize => RunState::Initialized,
            Phase::Start => RunState::Started,
            Phase::ConfigureBindings => RunState::BindingsConfigured,
            Phase::BeforeRun => RunState::Running(MethodStage::Idle),
            Phase::BeforeMethodRun => RunState::Running(MethodStage::Executing),
            Phase::AfterMethodRun => RunState::Running(MethodStage::AfterMethod),
            Phase::AfterTeardown => RunState::Running(MethodStage::Idle),
            Phase::BeforeSetup | Phase::TestCreated => self,
            Phase::AfterRun => RunState::Finished,
            Phase::Stop => RunState::Stopped,
        }
    }

    /// Whether the run reached its terminal state
    pub fn is_terminal(self) -> bool {
        self == RunState::Stopped
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running(stage) => write!(f, "Running({stage:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}
