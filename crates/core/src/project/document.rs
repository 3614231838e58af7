//! JSON project document
//!
//! The on-disk form of a project: property groups plus the targets a
//! [`DocumentEvaluator`](crate::services::DocumentEvaluator) can run.

use super::model::ProjectModel;
use crate::error::{Error, Result};
use crate::types::PropertyGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub property_groups: Vec<PropertyGroup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub targets: BTreeMap<String, TargetDefinition>,
}

/// A target and the items it outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDefinition {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    /// Makes the target fail when run
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fails: bool,
}

/// An unevaluated item: `include` and metadata may reference `$(Name)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub include: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ItemDefinition {
    pub fn new(include: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }
}

impl ProjectDocument {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let document = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse project {}: {e}", path.display()))
        })?;
        Ok(document)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn model(&self) -> ProjectModel {
        ProjectModel::new(self.property_groups.clone())
    }

    /// Replace the property groups with the model's current state
    pub fn update_from(&mut self, model: &ProjectModel) {
        self.property_groups = model.property_groups().to_vec();
    }
}
