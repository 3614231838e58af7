//! Capability traits implemented by a configuration

use crate::configuration::BuildableProjectConfig;
use crate::error::Result;
use crate::output::OutputGroup;
use std::sync::Arc;

/// Read-only view of one configuration
pub trait ConfigurationQuery {
    /// Configuration name without the platform
    fn config_name(&self) -> String;

    fn platform_name(&self) -> Option<String>;

    /// `Config|Platform`
    fn display_name(&self) -> String;

    /// Evaluated property value; `reset_cache` forces a fresh evaluation
    fn get_property(&self, name: &str, reset_cache: bool) -> Option<String>;

    fn output_groups(&self) -> Vec<Arc<OutputGroup>>;

    /// Case-insensitive lookup by canonical group name
    fn open_output_group(&self, name: &str) -> Option<Arc<OutputGroup>> {
        self.output_groups()
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(name))
    }

    /// Heuristic: the configuration produces an `.exe` or names a start program
    fn debug_launch_eligible(&self) -> bool;
}

/// Write access to one configuration's properties
pub trait ConfigurationEditor {
    fn set_property(&self, name: &str, value: &str) -> Result<()>;
}

/// Build-facing view of one configuration
pub trait BuildableConfiguration {
    fn is_up_to_date(&self) -> bool;

    /// None when the project has no compile target
    fn buildable(&self) -> Option<Arc<BuildableProjectConfig>>;
}
