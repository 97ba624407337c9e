//! Rules and statements
//!
//! A statement is a deferred unit of work. Rules wrap statements; when
//! several rules apply, the first one collected is the outermost wrapper.

use crate::di::Injectable;
use rig_domain::{Description, Result};
use std::fmt;
use std::sync::Arc;

/// Deferred unit of work, evaluated at most once
pub type Statement<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// Wraps a statement with extra behavior
pub trait TestRule: Injectable + Send + Sync {
    fn apply<'a>(&'a self, base: Statement<'a>, description: &Description) -> Statement<'a>;
}

type RuleProducer = Box<dyn FnOnce() -> Result<Arc<dyn TestRule>> + Send>;

/// A rule-supplying member of a feature or test
///
/// Field members hand out an existing rule. Method members produce one on
/// demand; the produced rule is injected from the current scope.
pub enum RuleMember {
    Field {
        name: &'static str,
        rule: Arc<dyn TestRule>,
    },
    Method {
        name: &'static str,
        produce: RuleProducer,
    },
}

impl RuleMember {
    pub fn field<R: TestRule + 'static>(name: &'static str, rule: R) -> Self {
        Self::Field {
            name,
            rule: Arc::new(rule),
        }
    }

    pub fn method<F>(name: &'static str, produce: F) -> Self
    where
        F: FnOnce() -> Result<Arc<dyn TestRule>> + Send + 'static,
    {
        Self::Method {
            name,
            produce: Box::new(produce),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Field { name, .. } | Self::Method { name, .. } => name,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }
}

impl fmt::Debug for RuleMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_field() { "Field" } else { "Method" };
        f.debug_struct("RuleMember")
            .field("kind", &kind)
            .field("name", &self.name())
            .finish()
    }
}

/// Wrap `base` with `rules`, the first rule outermost
pub fn apply_rules<'a>(
    rules: &'a [Arc<dyn TestRule>],
    base: Statement<'a>,
    description: &Description,
) -> Statement<'a> {
    rules
        .iter()
        .rev()
        .fold(base, |statement, rule| rule.apply(statement, description))
}
