//! Rule collection
//!
//! Within one owner, field members come before method members. Class-level
//! owners are the resolved features in order, then the test class.
//! Method-level owners are the live features in order, then the test
//! instance.

use crate::di::Scope;
use crate::ports::rule::{RuleMember, TestRule};
use crate::ports::test_class::{TestClassDescriptor, TestInstance};
use crate::services::feature_registry::RegisteredFeature;
use crate::services::graph::FeatureGraph;
use rig_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Collects rules and injects produced ones from `scope`
pub struct RuleCollector<'a> {
    scope: &'a Scope,
}

impl<'a> RuleCollector<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        Self { scope }
    }

    /// Class rules: static members of every resolved feature, then of the test class
    pub fn collect_class_level(
        &self,
        graph: &FeatureGraph,
        test_class: &TestClassDescriptor,
    ) -> Result<Vec<Arc<dyn TestRule>>> {
        let mut rules = Vec::new();
        for id in graph {
            self.evaluate(id.short_name(), id.class_rule_members(), &mut rules)?;
        }
        self.evaluate(
            test_class.short_name(),
            test_class.class_rule_members(),
            &mut rules,
        )?;
        Ok(rules)
    }

    /// Method rules: members of every live feature, then of the test instance
    pub fn collect_method_level(
        &self,
        features: &[RegisteredFeature],
        test_class: &TestClassDescriptor,
        test: &dyn TestInstance,
    ) -> Result<Vec<Arc<dyn TestRule>>> {
        let mut rules = Vec::new();
        for entry in features {
            self.evaluate(
                entry.id().short_name(),
                entry.instance().rule_members(),
                &mut rules,
            )?;
        }
        self.evaluate(test_class.short_name(), test.rule_members(), &mut rules)?;
        Ok(rules)
    }

    fn evaluate(
        &self,
        owner: &str,
        members: Vec<RuleMember>,
        rules: &mut Vec<Arc<dyn TestRule>>,
    ) -> Result<()> {
        let (fields, methods): (Vec<_>, Vec<_>) =
            members.into_iter().partition(RuleMember::is_field);

        for member in fields.into_iter().chain(methods) {
            match member {
                RuleMember::Field { rule, .. } => rules.push(rule),
                RuleMember::Method { name, produce } => {
                    let member = format!("{owner}::{name}");
                    let rule = produce()
                        .and_then(|rule| {
                            self.scope.inject_members(rule.as_ref())?;
                            Ok(rule)
                        })
                        .map_err(|e| Error::rule_production(member.as_str(), e))?;
                    debug!(member = %member, "Produced rule");
                    rules.push(rule);
                }
            }
        }
        Ok(())
    }
}
