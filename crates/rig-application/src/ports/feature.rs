//! Feature contract
//!
//! A feature is a pluggable participant of a class run. It declares the
//! features it requires, receives a hook call at every lifecycle phase and
//! can contribute bindings and rules.
//!
//! ```ignore
//! struct DatabaseFeature { clock: Inject<dyn Clock> }
//!
//! impl Annotated for DatabaseFeature {
//!     fn annotations() -> Annotations {
//!         Annotations::new().requires([FeatureId::of::<ClockFeature>()])
//!     }
//! }
//!
//! impl FeatureType for DatabaseFeature {
//!     fn construct() -> Result<Self> { Ok(Self { clock: Inject::new() }) }
//! }
//!
//! impl Feature for DatabaseFeature {
//!     fn start(&self, _runner: &FeaturesRunner) -> Result<()> { /* open pool */ Ok(()) }
//! }
//! ```

use crate::di::{Binder, Injectable};
use crate::ports::rule::RuleMember;
use crate::ports::test_class::{TestInstance, TestMethod};
use crate::runner::FeaturesRunner;
use downcast_rs::{DowncastSync, impl_downcast};
use rig_domain::{Annotated, Annotations, Result, TypeKey};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Lifecycle participant
///
/// Every hook defaults to doing nothing. Hooks take `&self`: a feature
/// keeps mutable state behind its own synchronization.
///
/// Returning [`rig_domain::Error::skip`] from a hook skips the rest of the
/// phase; any other error is collected and the phase continues with the
/// next feature.
pub trait Feature: Injectable + DowncastSync {
    /// First hook after instantiation, in resolution order
    fn initialize(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    fn start(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    /// Contribute bindings to the child scope
    ///
    /// Features are visited in resolution order, so a feature overrides
    /// the bindings of the features it requires.
    fn configure(&self, _runner: &FeaturesRunner, _binder: &mut Binder) -> Result<()> {
        Ok(())
    }

    fn before_run(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    fn before_setup(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    /// The instance under test was just injected
    fn test_created(&self, _test: &dyn TestInstance) -> Result<()> {
        Ok(())
    }

    fn before_method_run(
        &self,
        _runner: &FeaturesRunner,
        _method: &TestMethod,
        _test: &dyn TestInstance,
    ) -> Result<()> {
        Ok(())
    }

    fn after_method_run(
        &self,
        _runner: &FeaturesRunner,
        _method: &TestMethod,
        _test: &dyn TestInstance,
    ) -> Result<()> {
        Ok(())
    }

    fn after_teardown(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    fn after_run(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    /// Last hook of a run; always dispatched, in reverse resolution order
    fn stop(&self, _runner: &FeaturesRunner) -> Result<()> {
        Ok(())
    }

    /// Method-level rule members of this instance
    fn rule_members(&self) -> Vec<RuleMember> {
        Vec::new()
    }
}

impl_downcast!(sync Feature);

/// A concrete feature type the runner can instantiate
pub trait FeatureType: Feature + Annotated + Sized {
    /// Build a fresh instance; called once per class run
    fn construct() -> Result<Self>;

    /// Class-level rule members, evaluated before any instance exists
    fn class_rule_members() -> Vec<RuleMember> {
        Vec::new()
    }
}

/// Identity of a feature type, usable without an instance
#[derive(Clone, Copy)]
pub struct FeatureId {
    key: TypeKey,
    construct: fn() -> Result<Arc<dyn Feature>>,
    class_rules: fn() -> Vec<RuleMember>,
}

fn construct_feature<F: FeatureType>() -> Result<Arc<dyn Feature>> {
    let feature: Arc<dyn Feature> = Arc::new(F::construct()?);
    Ok(feature)
}

impl FeatureId {
    pub fn of<F: FeatureType>() -> Self {
        Self {
            key: TypeKey::of::<F>(),
            construct: construct_feature::<F>,
            class_rules: F::class_rule_members,
        }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn type_id(&self) -> TypeId {
        self.key.id()
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn short_name(&self) -> &'static str {
        self.key.short_name()
    }

    /// Build a new instance of the feature
    pub fn construct(&self) -> Result<Arc<dyn Feature>> {
        (self.construct)()
    }

    pub fn class_rule_members(&self) -> Vec<RuleMember> {
        (self.class_rules)()
    }
}

impl PartialEq for FeatureId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FeatureId {}

impl Hash for FeatureId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FeatureId").field(&self.key.name()).finish()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Declaration listing required features
///
/// Repeatable and inherited: every `Features` value found on a type and its
/// parents contributes, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Features(Vec<FeatureId>);

impl Features {
    pub fn of<I: IntoIterator<Item = FeatureId>>(features: I) -> Self {
        Self(features.into_iter().collect())
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.0
    }
}

/// Shorthand for attaching a [`Features`] declaration
pub trait DeclareFeatures {
    #[must_use]
    fn requires<I: IntoIterator<Item = FeatureId>>(self, features: I) -> Self;
}

impl DeclareFeatures for Annotations {
    fn requires<I: IntoIterator<Item = FeatureId>>(self, features: I) -> Self {
        self.with(Features::of(features))
    }
}
