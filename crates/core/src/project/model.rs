//! The in-memory project: ordered property groups and their evaluation

use crate::types::{
    CONFIGURATION, Condition, ConfigName, PLATFORM, PropertyGroup, PropertyLookup, expand,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Ordered property groups, as written in the project file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    #[serde(default)]
    property_groups: Vec<PropertyGroup>,
}

impl ProjectModel {
    pub fn new(property_groups: Vec<PropertyGroup>) -> Self {
        Self { property_groups }
    }

    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    pub fn property_groups_mut(&mut self) -> &mut Vec<PropertyGroup> {
        &mut self.property_groups
    }

    /// Append a group at the end of the project
    pub fn add_property_group(&mut self, group: PropertyGroup) -> &mut PropertyGroup {
        self.property_groups.push(group);
        let last = self.property_groups.len() - 1;
        &mut self.property_groups[last]
    }

    /// Evaluate every active property with `selector` supplying the globals.
    ///
    /// Groups and properties are visited in document order; the last active
    /// definition of a name wins. `Configuration` and `Platform` come from the
    /// selector and cannot be overridden by the project.
    pub fn evaluate(&self, selector: Option<&ConfigName>) -> PropertySnapshot {
        let mut snapshot = PropertySnapshot::default();
        if let Some(selector) = selector {
            snapshot.set_global(CONFIGURATION, selector.configuration());
            if let Some(platform) = selector.platform() {
                snapshot.set_global(PLATFORM, platform);
            }
        }

        for group in &self.property_groups {
            if !Condition::parse(&group.condition).evaluate(&snapshot) {
                continue;
            }

            for property in &group.properties {
                if !Condition::parse(&property.condition).evaluate(&snapshot) {
                    continue;
                }
                let value = expand(&property.value, &snapshot);
                snapshot.define(&property.name, value);
            }
        }

        snapshot
    }

    /// Distinct values `property` is compared against in group conditions.
    ///
    /// Values are deduplicated ignoring case; the first spelling is kept.
    pub fn conditioned_values(&self, property: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut values = Vec::new();

        for group in &self.property_groups {
            for (name, value) in Condition::parse(&group.condition).conditioned_values() {
                if !name.eq_ignore_ascii_case(property) || value.is_empty() {
                    continue;
                }
                if seen.insert(value.to_ascii_lowercase()) {
                    values.push(value);
                }
            }
        }

        values
    }

    /// Set an unconditioned, project-wide property.
    ///
    /// Overwrites the last unconditioned definition if there is one, else
    /// appends to the first unconditioned group (creating it at the front).
    pub fn set_property(&mut self, name: &str, value: &str) {
        let existing = self
            .property_groups
            .iter_mut()
            .rev()
            .filter(|group| group.condition.trim().is_empty())
            .flat_map(|group| group.properties.iter_mut().rev())
            .find(|property| property.is_named(name) && property.condition.is_empty());

        if let Some(property) = existing {
            property.value = value.to_string();
            return;
        }

        match self
            .property_groups
            .iter_mut()
            .find(|group| group.condition.trim().is_empty())
        {
            Some(group) => {
                group.add_property(name, value);
            }
            None => self
                .property_groups
                .insert(0, PropertyGroup::default().with_property(name, value)),
        }
    }

    /// Set `name` in the first group whose condition matches `condition`,
    /// creating that group at the end if none exists.
    pub fn set_property_under_condition(&mut self, name: &str, value: &str, condition: &str) {
        if condition.trim().is_empty() {
            self.set_property(name, value);
            return;
        }

        match self
            .property_groups
            .iter_mut()
            .find(|group| group.has_condition(condition))
        {
            Some(group) => group.set_property(name, value),
            None => {
                self.add_property_group(PropertyGroup::new(condition))
                    .set_property(name, value);
            }
        }
    }
}

/// Properties evaluated for one configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySnapshot {
    // lowercased name -> (name as written, value)
    values: BTreeMap<String, (String, String)>,
    globals: BTreeSet<String>,
}

impl PropertySnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_ascii_lowercase())
    }

    /// `(name, value)` pairs ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn set_global(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        self.values
            .insert(key.clone(), (name.to_string(), value.to_string()));
        self.globals.insert(key);
    }

    fn define(&mut self, name: &str, value: String) {
        let key = name.to_ascii_lowercase();
        if self.globals.contains(&key) {
            return;
        }
        self.values.insert(key, (name.to_string(), value));
    }
}

impl PropertyLookup for PropertySnapshot {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}
