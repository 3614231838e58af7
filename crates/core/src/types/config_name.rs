//! Configuration identity: `Config` or `Config|Platform`

use crate::error::{Error, Result};
use std::fmt;

/// The `Configuration` global property
pub const CONFIGURATION: &str = "Configuration";
/// The `Platform` global property
pub const PLATFORM: &str = "Platform";

/// Condition text selecting a configuration by name
pub fn configuration_condition(name: &str) -> String {
    format!(" '$({CONFIGURATION})' == '{name}' ")
}

/// Condition text selecting a configuration/platform pair
pub fn configuration_platform_condition(name: &str, platform: &str) -> String {
    format!(" '$({CONFIGURATION})|$({PLATFORM})' == '{name}|{platform}' ")
}

/// A named configuration, optionally paired with a platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigName {
    configuration: String,
    platform: Option<String>,
}

impl ConfigName {
    pub fn new(configuration: impl Into<String>, platform: Option<String>) -> Self {
        Self {
            configuration: configuration.into(),
            platform: platform.filter(|p| !p.is_empty()),
        }
    }

    /// Parse `Config` or `Config|Platform`
    pub fn parse(text: &str) -> Result<Self> {
        if !text.contains('|') {
            return Ok(Self::new(text, None));
        }

        match text.split('|').collect::<Vec<_>>().as_slice() {
            [configuration, platform] => Ok(Self::new(*configuration, Some(platform.to_string()))),
            _ => Err(Error::InvalidConfigurationName(text.to_string())),
        }
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn set_configuration(&mut self, name: impl Into<String>) {
        self.configuration = name.into();
    }

    /// The condition under which per-configuration properties are written
    pub fn condition(&self) -> String {
        configuration_condition(&self.configuration)
    }
}

impl fmt::Display for ConfigName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.platform {
            Some(platform) => write!(f, "{}|{}", self.configuration, platform),
            None => write!(f, "{}", self.configuration),
        }
    }
}
