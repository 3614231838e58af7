//! Build properties, property groups and `$(Name)` expansion

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PROPERTY_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\)").expect("property reference pattern")
});

/// Read access to a set of evaluated properties
pub trait PropertyLookup {
    /// Look up a property by name (case-insensitive)
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// Replace every `$(Name)` reference with the property's value.
///
/// Undefined properties expand to the empty string.
pub fn expand(input: &str, properties: &dyn PropertyLookup) -> String {
    if !input.contains("$(") {
        return input.to_string();
    }

    PROPERTY_REFERENCE
        .replace_all(input, |caps: &regex::Captures| {
            properties.lookup(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// If `text` is exactly one `$(Name)` reference, return `Name`
pub(crate) fn sole_reference(text: &str) -> Option<&str> {
    let caps = PROPERTY_REFERENCE.captures(text.trim())?;
    let whole = caps.get(0)?;
    if whole.as_str().len() != text.trim().len() {
        return None;
    }
    caps.get(1).map(|name| name.as_str())
}

/// A single property definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            condition: String::new(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A set of properties gated by one condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl PropertyGroup {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Whether the trimmed condition equals `condition` (trimmed), ignoring case
    pub fn has_condition(&self, condition: &str) -> bool {
        let own = self.condition.trim();
        !own.is_empty() && own.eq_ignore_ascii_case(condition.trim())
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Property {
        self.properties.push(Property::new(name, value));
        let last = self.properties.len() - 1;
        &mut self.properties[last]
    }

    /// Remove every property with the given name
    pub fn remove_properties(&mut self, name: &str) {
        self.properties.retain(|property| !property.is_named(name));
    }

    /// Overwrite the last unconditioned definition of `name`, or append a new one
    pub fn set_property(&mut self, name: &str, value: &str) {
        if let Some(property) = self
            .properties
            .iter_mut()
            .rev()
            .find(|property| property.is_named(name) && property.condition.is_empty())
        {
            property.value = value.to_string();
            return;
        }

        self.add_property(name, value);
    }
}
