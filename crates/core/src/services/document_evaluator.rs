//! Build evaluators

use crate::interfaces::{BuildContext, BuildEvaluator};
use crate::project::{ProjectDocument, TargetDefinition};
use crate::types::{Condition, EvaluatedItem, expand};
use std::collections::BTreeMap;

/// Evaluator for a project with no targets at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvaluator;

impl BuildEvaluator for NullEvaluator {
    fn has_target(&self, _target: &str) -> bool {
        false
    }

    fn build_target(&self, _context: &BuildContext<'_>, _target: &str) -> bool {
        false
    }

    fn items(&self, _context: &BuildContext<'_>, _item_type: &str) -> Vec<EvaluatedItem> {
        Vec::new()
    }
}

/// Evaluates the targets declared in a [`ProjectDocument`].
///
/// Running a target only checks its `fails` flag; the items of type
/// `<Target>Output` are the target's items with properties expanded.
#[derive(Debug, Clone, Default)]
pub struct DocumentEvaluator {
    targets: BTreeMap<String, TargetDefinition>,
}

impl DocumentEvaluator {
    pub fn new(targets: BTreeMap<String, TargetDefinition>) -> Self {
        Self { targets }
    }

    pub fn from_document(document: &ProjectDocument) -> Self {
        Self::new(document.targets.clone())
    }

    fn target(&self, name: &str) -> Option<&TargetDefinition> {
        self.targets
            .iter()
            .find(|(target, _)| target.eq_ignore_ascii_case(name))
            .map(|(_, definition)| definition)
    }
}

impl BuildEvaluator for DocumentEvaluator {
    fn has_target(&self, target: &str) -> bool {
        self.target(target).is_some()
    }

    fn build_target(&self, context: &BuildContext<'_>, target: &str) -> bool {
        match self.target(target) {
            Some(definition) => {
                tracing::debug!(
                    "Running target {} in {}",
                    target,
                    context.project_home.display()
                );
                !definition.fails
            }
            None => {
                tracing::warn!("Target {} is not defined", target);
                false
            }
        }
    }

    fn items(&self, context: &BuildContext<'_>, item_type: &str) -> Vec<EvaluatedItem> {
        let Some(definition) = item_type
            .strip_suffix("Output")
            .and_then(|target| self.target(target))
        else {
            return Vec::new();
        };

        definition
            .items
            .iter()
            .filter(|item| Condition::parse(&item.condition).evaluate(context.properties))
            .map(|item| EvaluatedItem {
                include: expand(&item.include, context.properties),
                metadata: item
                    .metadata
                    .iter()
                    .map(|(name, value)| (name.clone(), expand(value, context.properties)))
                    .collect(),
            })
            .filter(|item| !item.include.is_empty())
            .collect()
    }
}
