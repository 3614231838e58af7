//! Notification interfaces exposed to host glue

use crate::error::Result;

/// Observer of structural configuration changes.
///
/// Delivery is synchronous and in registration order; an error from one
/// listener stops delivery to the rest and is returned to the caller.
pub trait ConfigurationEvents: Send + Sync {
    fn on_configuration_added(&self, name: &str) -> Result<()>;

    fn on_configuration_deleted(&self, name: &str) -> Result<()>;

    fn on_configuration_renamed(&self, old_name: &str, new_name: &str) -> Result<()>;

    fn on_platform_added(&self, _platform: &str) -> Result<()> {
        Ok(())
    }

    fn on_platform_deleted(&self, _platform: &str) -> Result<()> {
        Ok(())
    }
}

/// A project property changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChanged {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: String,
}

/// Observer of project property changes
pub trait PropertyChangeListener: Send + Sync {
    fn on_property_changed(&self, event: &PropertyChanged);
}

/// Observer of builds started through a buildable configuration
pub trait BuildStatusCallback: Send + Sync {
    /// Return false to cancel the build before it starts
    fn build_begin(&self) -> bool {
        true
    }

    fn build_end(&self, success: bool);
}
