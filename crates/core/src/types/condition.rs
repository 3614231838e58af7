//! Property-group conditions
//!
//! Supports the forms a project system writes itself: an empty condition
//! and a single `'<left>' == '<right>'` (or `!=`) comparison.

use super::property::{PropertyLookup, expand, sole_reference};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*'([^']*)'\s*(==|!=)\s*'([^']*)'\s*$").expect("condition pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// No condition, always active
    Always,
    /// `'left' == 'right'` or `'left' != 'right'`
    Compare {
        left: String,
        right: String,
        equal: bool,
    },
    /// Anything else; never active
    Unsupported(String),
}

impl Condition {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Condition::Always;
        }

        match COMPARISON.captures(trimmed) {
            Some(caps) => Condition::Compare {
                left: caps[1].to_string(),
                right: caps[3].to_string(),
                equal: &caps[2] == "==",
            },
            None => Condition::Unsupported(trimmed.to_string()),
        }
    }

    /// Evaluate against the properties defined so far
    pub fn evaluate(&self, properties: &dyn PropertyLookup) -> bool {
        match self {
            Condition::Always => true,
            Condition::Compare { left, right, equal } => {
                let left = expand(left, properties);
                let right = expand(right, properties);
                left.eq_ignore_ascii_case(&right) == *equal
            }
            Condition::Unsupported(text) => {
                tracing::warn!("Unsupported condition treated as false: {}", text);
                false
            }
        }
    }

    /// The `(property, value)` pairs this condition tests for equality.
    ///
    /// `'$(Configuration)|$(Platform)' == 'Debug|x86'` yields
    /// `[("Configuration", "Debug"), ("Platform", "x86")]`.
    pub fn conditioned_values(&self) -> Vec<(String, String)> {
        let Condition::Compare {
            left,
            right,
            equal: true,
        } = self
        else {
            return Vec::new();
        };

        let names: Vec<&str> = left.split('|').collect();
        let values: Vec<&str> = right.split('|').collect();
        if names.len() != values.len() {
            return Vec::new();
        }

        names
            .iter()
            .zip(values.iter())
            .filter_map(|(name, value)| {
                sole_reference(name).map(|name| (name.to_string(), value.trim().to_string()))
            })
            .collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => Ok(()),
            Condition::Compare { left, right, equal } => {
                let op = if *equal { "==" } else { "!=" };
                write!(f, "'{}' {} '{}'", left, op, right)
            }
            Condition::Unsupported(text) => write!(f, "{}", text),
        }
    }
}
