pub mod condition;
pub mod config_name;
pub mod item;
pub mod property;

// Re-export commonly used types
pub use condition::Condition;
pub use config_name::{
    CONFIGURATION, ConfigName, PLATFORM, configuration_condition,
    configuration_platform_condition,
};
pub use item::EvaluatedItem;
pub use property::{Property, PropertyGroup, PropertyLookup, expand};
