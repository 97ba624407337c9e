//! Ports
//!
//! Contracts between the orchestrator and the code it drives.
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Feature`] | Pluggable lifecycle participant |
//! | [`TestClass`] / [`TestInstance`] | The class under test and its instances |
//! | [`TestRule`] | Statement wrapper contributed by features or tests |
//! | [`RunNotifier`] | Receives per-test outcomes from the host engine |
//! | [`ResourceLocator`] | Resolves test resources on disk |
//! | [`registry`] | Name-based feature registration |

pub mod feature;
pub mod locator;
pub mod notifier;
pub mod registry;
pub mod rule;
pub mod test_class;

pub use feature::{DeclareFeatures, Feature, FeatureId, FeatureType, Features};
pub use locator::{FixedResourceLocator, ResourceLocator};
pub use notifier::RunNotifier;
pub use registry::{
    FEATURE_REGISTRY, FeatureEntry, list_features, resolve_feature, resolve_features,
};
pub use rule::{RuleMember, Statement, TestRule, apply_rules};
pub use test_class::{TestClass, TestClassDescriptor, TestInstance, TestMethod};
