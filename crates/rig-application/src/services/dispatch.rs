//! Invoke-all-aggregate dispatch
//!
//! Every feature receives the hook even when an earlier one failed. The
//! failures are returned together once all features were visited. The skip
//! signal is the exception: it stops the dispatch at once and is returned
//! as is.

use crate::ports::feature::Feature;
use crate::services::feature_registry::RegisteredFeature;
use rig_domain::error::{AggregatedFailure, FeatureFailure, Result};
use rig_domain::{DispatchOrder, Phase};
use tracing::{debug, info, warn};

/// Call `call` on each feature, in the order `phase` dictates
pub fn invoke_features<F>(phase: Phase, features: &[RegisteredFeature], mut call: F) -> Result<()>
where
    F: FnMut(&dyn Feature) -> Result<()>,
{
    let ordered: Box<dyn Iterator<Item = &RegisteredFeature> + '_> = match phase.order() {
        DispatchOrder::Forward => Box::new(features.iter()),
        DispatchOrder::Reverse => Box::new(features.iter().rev()),
    };

    let mut failures = Vec::new();
    for entry in ordered {
        let feature = entry.id();
        debug!(
            phase = %phase,
            feature = feature.short_name(),
            "Invoking feature hook"
        );
        match call(entry.instance().as_ref()) {
            Ok(()) => {}
            Err(error) if error.is_skip() => {
                info!(
                    phase = %phase,
                    feature = feature.short_name(),
                    reason = %error,
                    "Feature requested skip"
                );
                return Err(error);
            }
            Err(error) => {
                warn!(
                    phase = %phase,
                    feature = feature.short_name(),
                    error = %error,
                    "Feature hook failed"
                );
                failures.push(FeatureFailure {
                    feature: feature.name().to_string(),
                    cause: error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(AggregatedFailure::new(phase, failures).into())
    }
}
