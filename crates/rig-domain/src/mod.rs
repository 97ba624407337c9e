//! # Domain Layer
//!
//! Core types shared by every layer of rig: the error taxonomy of a class
//! run, the fixed lifecycle phases, the run-state machine and the static
//! declarations ("annotations") attached to feature and test types.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and aggregated phase failures |
//! | [`annotations`] | Type-erased declaration bags and the configuration merge contract |
//! | [`value_objects`] | Phases, run state, type identity and test descriptions |

pub mod annotations;
pub mod error;
pub mod value_objects;

pub use annotations::{Annotated, Annotations, Configuration};
pub use error::{AggregatedFailure, Error, FeatureFailure, Result, merge_outcomes};
pub use value_objects::{Description, DispatchOrder, MethodStage, Phase, RunState, TypeKey};
