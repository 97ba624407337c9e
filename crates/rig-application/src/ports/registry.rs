//! Feature Registry
//!
//! Features register under a name so that configuration and the CLI can
//! enable them without naming their types.
//!
//! ```ignore
//! #[linkme::distributed_slice(FEATURE_REGISTRY)]
//! static DATABASE_FEATURE: FeatureEntry = FeatureEntry {
//!     name: "database",
//!     description: "Pooled database connections",
//!     feature: FeatureId::of::<DatabaseFeature>,
//! };
//! ```

use crate::ports::feature::FeatureId;
use rig_domain::error::{Error, Result};

/// Registry entry for a named feature
pub struct FeatureEntry {
    /// Unique feature name (e.g., "tracing", "workspace")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Identity of the feature type
    pub feature: fn() -> FeatureId,
}

// Auto-collection via linkme distributed slices - features submit entries at compile time
#[linkme::distributed_slice]
pub static FEATURE_REGISTRY: [FeatureEntry] = [..];

/// Resolve a registered feature by name
pub fn resolve_feature(name: &str) -> Result<FeatureId> {
    FEATURE_REGISTRY
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| (entry.feature)())
        .ok_or_else(|| Error::UnknownFeature {
            name: name.to_string(),
            available: FEATURE_REGISTRY.iter().map(|e| e.name).collect(),
        })
}

/// Resolve several registered features, keeping their order
pub fn resolve_features<S: AsRef<str>>(names: &[S]) -> Result<Vec<FeatureId>> {
    names
        .iter()
        .map(|name| resolve_feature(name.as_ref()))
        .collect()
}

/// List all registered features
///
/// Returns (name, description) tuples, sorted by name.
pub fn list_features() -> Vec<(&'static str, &'static str)> {
    let mut features: Vec<(&'static str, &'static str)> = FEATURE_REGISTRY
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    features.sort_unstable_by_key(|(name, _)| *name);
    features
}
