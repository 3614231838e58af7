//! The catalog of a project's configurations
//!
//! Every structural change is a rewrite of the project's property groups:
//! a configuration exists exactly as long as some group condition selects it.

use crate::configuration::ProjectConfig;
use crate::error::{Error, Result};
use crate::interfaces::{BuildableConfiguration, ConfigurationEvents};
use crate::project::Project;
use crate::types::{
    CONFIGURATION, Condition, PLATFORM, PropertyGroup, configuration_condition,
    configuration_platform_condition,
};
use crate::utils::paths::normalize_directory_path;
use crate::utils::{Cookie, EventSinks};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const OUTPUT_PATH: &str = "OutputPath";

/// A property written into every newly synthesized configuration group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfigProperty {
    pub name: String,
    /// Condition placed on the property itself; empty for none
    pub condition: String,
    pub value: String,
}

impl NewConfigProperty {
    pub fn new(
        name: impl Into<String>,
        condition: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
            value: value.into(),
        }
    }
}

/// Which structural edits the set supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCapabilities {
    pub add_configurations: bool,
    pub delete_configurations: bool,
    pub rename_configurations: bool,
    pub add_platforms: bool,
    pub delete_platforms: bool,
}

pub struct ConfigurationSet {
    project: Arc<Project>,
    configurations: Mutex<HashMap<String, Arc<ProjectConfig>>>,
    new_config_properties: RwLock<Vec<NewConfigProperty>>,
    sinks: Mutex<EventSinks<Arc<dyn ConfigurationEvents>>>,
}

impl std::fmt::Debug for ConfigurationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationSet")
            .field("project", &self.project.name())
            .field(
                "configurations",
                &self.configurations.lock().keys().cloned().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl ConfigurationSet {
    pub fn new(project: Arc<Project>) -> Self {
        Self {
            project,
            configurations: Mutex::new(HashMap::new()),
            new_config_properties: RwLock::new(Vec::new()),
            sinks: Mutex::new(EventSinks::new()),
        }
    }

    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    pub fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            add_configurations: true,
            delete_configurations: true,
            rename_configurations: true,
            add_platforms: false,
            delete_platforms: false,
        }
    }

    pub fn new_config_properties(&self) -> Vec<NewConfigProperty> {
        self.new_config_properties.read().clone()
    }

    pub fn set_new_config_properties(&self, properties: Vec<NewConfigProperty>) {
        *self.new_config_properties.write() = properties;
    }

    pub fn configuration_names(&self) -> Vec<String> {
        self.project.configuration_names()
    }

    pub fn platform_names(&self) -> Vec<String> {
        self.project.platform_names()
    }

    pub fn supported_platform_names(&self) -> Vec<String> {
        self.project.supported_platform_names()
    }

    /// The instance for `name`, created on first request and kept afterwards
    pub fn configuration(&self, name: &str) -> Result<Arc<ProjectConfig>> {
        let mut configurations = self.configurations.lock();
        if let Some(config) = configurations.get(name) {
            return Ok(Arc::clone(config));
        }

        let config = ProjectConfig::new(Arc::clone(&self.project), name)?;
        configurations.insert(name.to_string(), Arc::clone(&config));
        Ok(config)
    }

    /// One instance per listed configuration name
    pub fn configurations(&self) -> Result<Vec<Arc<ProjectConfig>>> {
        self.configuration_names()
            .iter()
            .map(|name| self.configuration(name))
            .collect()
    }

    pub fn is_up_to_date(&self, name: &str) -> Result<bool> {
        Ok(self.configuration(name)?.is_up_to_date())
    }

    /// Add `name`, copying the group of `clone_from` when there is one.
    ///
    /// The new group always gets a fresh `OutputPath` under the output base path.
    pub fn add_configuration(&self, name: &str, clone_from: Option<&str>) -> Result<()> {
        validate_name(name)?;
        self.project.query_edit_project_file()?;

        {
            let mut model = self.project.model_mut();
            let source = clone_from.and_then(|clone_from| {
                let condition = configuration_condition(clone_from);
                model
                    .property_groups()
                    .iter()
                    .rev()
                    .find(|group| group.has_condition(&condition))
                    .cloned()
            });

            let mut group = match source {
                Some(mut group) => {
                    group.remove_properties(OUTPUT_PATH);
                    group
                }
                None => {
                    let mut group = PropertyGroup::default();
                    for seed in self.new_config_properties.read().iter() {
                        group.add_property(&seed.name, &seed.value).condition =
                            seed.condition.clone();
                    }
                    group
                }
            };

            let base = &self.project.settings().output_base_relative_path;
            let output_path = Path::new(base).join(name);
            if let Some(output_path) = normalize_directory_path(&output_path.to_string_lossy()) {
                group.add_property(OUTPUT_PATH, output_path);
            }
            group.condition = configuration_condition(name);
            model.add_property_group(group);
        }

        info!("Added configuration {}", name);
        self.notify(|sink| sink.on_configuration_added(name))
    }

    /// Remove every group selecting `name`; a missing or absent name is a no-op
    pub fn delete_configuration(&self, name: Option<&str>) -> Result<()> {
        self.project.query_edit_project_file()?;
        let Some(name) = name else {
            return Ok(());
        };

        let exists = self
            .configuration_names()
            .iter()
            .any(|config| config.eq_ignore_ascii_case(name));
        if !exists {
            debug!("Configuration {} not present, nothing to delete", name);
            return Ok(());
        }

        self.project
            .model_mut()
            .property_groups_mut()
            .retain(|group| selected_platform(&group.condition, name).is_none());

        if let Some(config) = self.configurations.lock().remove(name) {
            config.detach();
        }

        info!("Deleted configuration {}", name);
        self.notify(|sink| sink.on_configuration_deleted(name))
    }

    /// Point every group selecting `old_name` at `new_name`, keeping the instance
    pub fn rename_configuration(&self, old_name: &str, new_name: &str) -> Result<()> {
        validate_name(new_name)?;
        self.project.query_edit_project_file()?;

        let mut renamed = 0;
        for group in self.project.model_mut().property_groups_mut() {
            match selected_platform(&group.condition, old_name) {
                Some(None) => group.condition = configuration_condition(new_name),
                Some(Some(platform)) => {
                    group.condition = configuration_platform_condition(new_name, &platform)
                }
                None => continue,
            }
            renamed += 1;
        }

        if renamed == 0 {
            return Err(Error::ConfigurationNotFound(old_name.to_string()));
        }

        {
            let mut configurations = self.configurations.lock();
            if let Some(config) = configurations.remove(old_name) {
                config.rename(new_name);
                configurations.insert(new_name.to_string(), config);
            }
        }

        info!("Renamed configuration {} to {}", old_name, new_name);
        self.notify(|sink| sink.on_configuration_renamed(old_name, new_name))
    }

    pub fn add_platform(&self, platform: &str) -> Result<()> {
        Err(Error::NotSupported(format!("adding platform {platform}")))
    }

    pub fn delete_platform(&self, platform: &str) -> Result<()> {
        Err(Error::NotSupported(format!("deleting platform {platform}")))
    }

    pub fn advise_events(&self, sink: Arc<dyn ConfigurationEvents>) -> Cookie {
        self.sinks.lock().add(sink)
    }

    pub fn unadvise_events(&self, cookie: Cookie) -> bool {
        self.sinks.lock().remove(cookie)
    }

    fn notify(&self, deliver: impl Fn(&dyn ConfigurationEvents) -> Result<()>) -> Result<()> {
        let sinks = self.sinks.lock().snapshot();
        for sink in &sinks {
            deliver(sink.as_ref())?;
        }
        Ok(())
    }
}

/// A name must survive being quoted into a condition and joined onto the output path
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['|', '\'']) {
        return Err(Error::InvalidConfigurationName(name.to_string()));
    }
    Ok(())
}

/// If `condition` selects `configuration`, the platform it also selects (if any).
///
/// Both `'$(Configuration)' == 'Name'` and
/// `'$(Configuration)|$(Platform)' == 'Name|Platform'` count as selecting
/// `Name`, so delete and rename also cover the per-platform groups.
fn selected_platform(condition: &str, configuration: &str) -> Option<Option<String>> {
    let values = Condition::parse(condition).conditioned_values();
    match values.as_slice() {
        [(name, value)]
            if name.eq_ignore_ascii_case(CONFIGURATION)
                && value.eq_ignore_ascii_case(configuration) =>
        {
            Some(None)
        }
        [(name, value), (platform_name, platform)]
            if name.eq_ignore_ascii_case(CONFIGURATION)
                && value.eq_ignore_ascii_case(configuration)
                && platform_name.eq_ignore_ascii_case(PLATFORM) =>
        {
            Some(Some(platform.clone()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{ConfigurationEditor, ConfigurationQuery, ProjectEditor};
    use crate::project::ProjectModel;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<String>>,
        fail: bool,
    }

    impl EventLog {
        fn record(&self, event: String) -> Result<()> {
            self.events.lock().push(event);
            if self.fail {
                return Err(Error::ListenerFailed("rejected".to_string()));
            }
            Ok(())
        }
    }

    impl ConfigurationEvents for EventLog {
        fn on_configuration_added(&self, name: &str) -> Result<()> {
            self.record(format!("added {name}"))
        }

        fn on_configuration_deleted(&self, name: &str) -> Result<()> {
            self.record(format!("deleted {name}"))
        }

        fn on_configuration_renamed(&self, old_name: &str, new_name: &str) -> Result<()> {
            self.record(format!("renamed {old_name} {new_name}"))
        }
    }

    struct Gate(AtomicBool);

    impl ProjectEditor for Gate {
        fn checkout_for_edit(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn set() -> ConfigurationSet {
        let project = Project::builder("/work/App")
            .model(ProjectModel::new(vec![
                PropertyGroup::default().with_property("AssemblyName", "App"),
                PropertyGroup::new(configuration_condition("Debug"))
                    .with_property("OutputPath", "bin/Debug/")
                    .with_property("Optimize", "false"),
                PropertyGroup::new(configuration_condition("Release"))
                    .with_property("OutputPath", "bin/Release/")
                    .with_property("Optimize", "true"),
                PropertyGroup::new(configuration_platform_condition("Debug", "x64"))
                    .with_property("PlatformTarget", "x64"),
            ]))
            .build();
        ConfigurationSet::new(project)
    }

    #[test]
    fn test_list_names() {
        let set = set();
        assert_eq!(set.configuration_names(), vec!["Debug", "Release"]);
        assert_eq!(set.platform_names(), vec!["x64"]);
        assert!(set.capabilities().rename_configurations);
        assert!(!set.capabilities().add_platforms);
    }

    #[test]
    fn test_add_with_seeds() {
        let set = set();
        set.set_new_config_properties(vec![
            NewConfigProperty::new("Optimize", "", "false"),
            NewConfigProperty::new("DebugType", "'$(Platform)' == 'x64'", "full"),
        ]);
        set.add_configuration("Test", None).unwrap();

        let model = set.project().model();
        let group = model.property_groups().last().unwrap();
        assert!(group.has_condition(&configuration_condition("Test")));
        assert_eq!(group.properties.len(), 3);
        assert_eq!(group.properties[1].condition, "'$(Platform)' == 'x64'");
        assert_eq!(group.properties[2].name, OUTPUT_PATH);
        assert_eq!(
            group.properties[2].value,
            format!("bin{0}Test{0}", std::path::MAIN_SEPARATOR)
        );
    }

    #[test]
    fn test_add_clone_from_unknown_falls_back_to_seeds() {
        let set = set();
        set.add_configuration("Fresh", Some("Nope")).unwrap();
        let config = set.configuration("Fresh").unwrap();
        assert_eq!(config.get_property("Optimize", false), None);
        assert!(config.get_property(OUTPUT_PATH, false).is_some());
    }

    #[test]
    fn test_add_rejects_bad_names() {
        let set = set();
        assert!(matches!(
            set.add_configuration("a|b", None),
            Err(Error::InvalidConfigurationName(_))
        ));
        assert!(matches!(
            set.add_configuration("", None),
            Err(Error::InvalidConfigurationName(_))
        ));
        for name in ["It's", ".", ".."] {
            assert!(matches!(
                set.add_configuration(name, None),
                Err(Error::InvalidConfigurationName(_))
            ));
            assert!(matches!(
                set.rename_configuration("Debug", name),
                Err(Error::InvalidConfigurationName(_))
            ));
        }
        assert_eq!(set.configuration_names(), vec!["Debug", "Release"]);
        assert_eq!(set.project().model().property_groups().len(), 4);
    }

    #[test]
    fn test_any_cpu_is_spelled_with_a_space() {
        let project = Project::builder("/work/App")
            .model(ProjectModel::new(vec![
                PropertyGroup::new(configuration_platform_condition("Debug", "anycpu")),
                PropertyGroup::new(configuration_platform_condition("Release", "x64")),
            ]))
            .build();
        let set = ConfigurationSet::new(project);
        assert_eq!(set.platform_names(), vec!["Any CPU", "x64"]);
    }

    #[test]
    fn test_edit_gate_blocks_structural_changes() {
        let project = Project::builder("/work/App")
            .editor(Arc::new(Gate(AtomicBool::new(false))))
            .build();
        let set = ConfigurationSet::new(project);

        assert!(matches!(set.add_configuration("Debug", None), Err(Error::EditNotAllowed)));
        assert!(matches!(set.delete_configuration(Some("Debug")), Err(Error::EditNotAllowed)));
        assert!(matches!(
            set.rename_configuration("Debug", "Other"),
            Err(Error::EditNotAllowed)
        ));
        assert!(set.project().model().property_groups().is_empty());
    }

    #[test]
    fn test_delete_removes_platform_groups_and_detaches() {
        let set = set();
        let debug = set.configuration("Debug").unwrap();
        set.delete_configuration(Some("debug")).unwrap();

        assert_eq!(set.configuration_names(), vec!["Release"]);
        assert!(set.platform_names().contains(&"x86".to_string()));
        // the instance is keyed by "Debug", not "debug"
        assert!(!debug.is_detached());

        let debug = set.configuration("Release").unwrap();
        set.delete_configuration(Some("Release")).unwrap();
        assert!(debug.is_detached());
        assert!(matches!(
            debug.set_property("Foo", "Bar"),
            Err(Error::ConfigurationNotFound(_))
        ));
    }

    #[test]
    fn test_rename_rewrites_both_condition_forms() {
        let set = set();
        set.rename_configuration("Debug", "Staging").unwrap();

        assert_eq!(set.configuration_names(), vec!["Staging", "Release"]);
        let model = set.project().model();
        assert!(
            model.property_groups()[3]
                .has_condition(&configuration_platform_condition("Staging", "x64"))
        );
    }

    #[test]
    fn test_rename_unknown_configuration_fails() {
        let set = set();
        assert!(matches!(
            set.rename_configuration("Nope", "Other"),
            Err(Error::ConfigurationNotFound(_))
        ));
    }

    #[test]
    fn test_notifications_in_order_and_fail_fast() {
        let set = set();
        let first = Arc::new(EventLog {
            fail: true,
            ..Default::default()
        });
        let second = Arc::new(EventLog::default());
        set.advise_events(first.clone());
        let cookie = set.advise_events(second.clone());

        let err = set.add_configuration("Test", None).unwrap_err();
        assert!(matches!(err, Error::ListenerFailed(_)));
        assert_eq!(*first.events.lock(), vec!["added Test"]);
        assert!(second.events.lock().is_empty());
        assert!(set.configuration_names().contains(&"Test".to_string()));

        assert!(set.unadvise_events(cookie));
        assert!(!set.unadvise_events(cookie));
    }

    #[test]
    fn test_platform_edits_not_supported() {
        let set = set();
        assert!(matches!(set.add_platform("ARM64"), Err(Error::NotSupported(_))));
        assert!(matches!(set.delete_platform("x64"), Err(Error::NotSupported(_))));
    }
}
