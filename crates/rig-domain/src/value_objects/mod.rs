//! Domain Value Objects
//!
//! Immutable values describing where a class run stands and what it runs.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Phase`] | One point of the fixed lifecycle sequence |
//! | [`RunState`] | State machine of a single class run |
//! | [`TypeKey`] | Stable identity of an annotated type |
//! | [`Description`] | Human readable name of a class or method under test |

/// Test descriptions reported to notifiers and rules
pub mod description;
/// Lifecycle phases and dispatch order
pub mod phase;
/// Class-run state machine
pub mod run_state;
/// Type identity for features and test classes
pub mod type_key;

pub use description::Description;
pub use phase::{DispatchOrder, Phase};
pub use run_state::{MethodStage, RunState};
pub use type_key::TypeKey;
