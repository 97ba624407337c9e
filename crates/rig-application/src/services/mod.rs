//! Application Services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`AnnotationIndex`] | Memoized scan of type declarations, inherited ones included |
//! | [`GraphResolver`] | Dependency-first ordering of required features |
//! | [`FeatureRegistry`] | One live instance per resolved feature |
//! | [`invoke_features`] | Invoke-all-aggregate phase dispatch |
//! | [`RuleCollector`] | Class and method rule collection |

pub mod annotation_index;
pub mod dispatch;
pub mod feature_registry;
pub mod graph;
pub mod rules;

pub use annotation_index::{AnnotationIndex, ScannedType};
pub use dispatch::invoke_features;
pub use feature_registry::{FeatureRegistry, RegisteredFeature};
pub use graph::{FeatureGraph, GraphResolver, ResolutionStatus};
pub use rules::RuleCollector;
