//! Build evaluation interface
//!
//! The build engine is a black box to the configuration engine: it can tell
//! whether a target exists, run it, and list the items of a given type.

use crate::project::PropertySnapshot;
use crate::types::{ConfigName, EvaluatedItem};
use std::path::Path;

/// What an evaluator sees of the project while a configuration is selected
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// The configuration the build context is switched to, if any
    pub selector: Option<&'a ConfigName>,
    /// Properties evaluated for that configuration
    pub properties: &'a PropertySnapshot,
    /// Directory containing the project file
    pub project_home: &'a Path,
}

/// Result of running a target and reading back its `<Target>Output` items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetEvaluation {
    pub success: bool,
    pub items: Vec<EvaluatedItem>,
}

impl TargetEvaluation {
    pub fn failed() -> Self {
        Self {
            success: false,
            items: Vec::new(),
        }
    }
}

/// Trait for the external build engine
pub trait BuildEvaluator: Send + Sync {
    /// Whether the project defines the target
    fn has_target(&self, target: &str) -> bool;

    /// Run a target; false on failure
    fn build_target(&self, context: &BuildContext<'_>, target: &str) -> bool;

    /// Evaluated items of the given item type
    fn items(&self, context: &BuildContext<'_>, item_type: &str) -> Vec<EvaluatedItem>;

    /// Run `target` if it exists, then read the `<target>Output` items.
    ///
    /// A failing target yields an unsuccessful, empty evaluation.
    fn evaluate_target(&self, context: &BuildContext<'_>, target: &str) -> TargetEvaluation {
        if self.has_target(target) && !self.build_target(context, target) {
            return TargetEvaluation::failed();
        }

        TargetEvaluation {
            success: true,
            items: self.items(context, &format!("{target}Output")),
        }
    }
}
