//! One resolved configuration of a project

pub mod buildable;

pub use buildable::{BuildReadiness, BuildableProjectConfig};

use crate::cache::SnapshotCache;
use crate::error::{Error, Result};
use crate::interfaces::{BuildableConfiguration, ConfigurationEditor, ConfigurationQuery};
use crate::output::OutputGroup;
use crate::project::{Project, PropertySnapshot};
use crate::staleness::StalenessChecker;
use crate::types::ConfigName;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

pub const START_PROGRAM: &str = "StartProgram";

/// A configuration instance: cached evaluated properties plus output groups.
///
/// Instances are created and owned by a
/// [`ConfigurationSet`](crate::config::ConfigurationSet); a rename keeps the
/// same instance under the new name.
pub struct ProjectConfig {
    project: Arc<Project>,
    this: Weak<ProjectConfig>,
    name: RwLock<ConfigName>,
    snapshot: SnapshotCache,
    output_groups: Mutex<Option<Vec<Arc<OutputGroup>>>>,
    buildable: Mutex<Option<Arc<BuildableProjectConfig>>>,
    detached: AtomicBool,
}

impl std::fmt::Debug for ProjectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectConfig")
            .field("name", &*self.name.read())
            .field("detached", &self.is_detached())
            .finish_non_exhaustive()
    }
}

impl ProjectConfig {
    pub(crate) fn new(project: Arc<Project>, name: &str) -> Result<Arc<Self>> {
        let name = ConfigName::parse(name)?;
        Ok(Arc::new_cyclic(|this| Self {
            project,
            this: this.clone(),
            name: RwLock::new(name),
            snapshot: SnapshotCache::new(),
            output_groups: Mutex::new(None),
            buildable: Mutex::new(None),
            detached: AtomicBool::new(false),
        }))
    }

    pub fn project(&self) -> &Arc<Project> {
        &self.project
    }

    pub fn name(&self) -> ConfigName {
        self.name.read().clone()
    }

    pub fn canonical_name(&self) -> String {
        self.config_name()
    }

    pub fn is_debug_only(&self) -> bool {
        self.config_name() == "Debug"
    }

    pub fn is_release_only(&self) -> bool {
        self.config_name() == "Release"
    }

    /// Whether the configuration was deleted from its set
    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    pub(crate) fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
        self.invalidate();
    }

    pub(crate) fn rename(&self, new_name: &str) {
        self.name.write().set_configuration(new_name);
        self.invalidate();
    }

    /// Drop the cached snapshot and the output groups' computed outputs
    pub fn invalidate(&self) {
        self.snapshot.invalidate();
        if let Some(groups) = self.output_groups.lock().as_ref() {
            for group in groups {
                group.invalidate();
            }
        }
    }

    /// All evaluated properties, cached until the next write
    pub fn properties(&self, reset_cache: bool) -> Arc<PropertySnapshot> {
        let selector = self.name();
        self.snapshot.get_or_evaluate(reset_cache, || {
            debug!("Evaluating properties for {}", selector);
            self.project
                .with_configuration(&selector, |context| context.properties.clone())
        })
    }

    pub fn is_cached(&self) -> bool {
        self.snapshot.is_cached()
    }
}

impl ConfigurationQuery for ProjectConfig {
    fn config_name(&self) -> String {
        self.name.read().configuration().to_string()
    }

    fn platform_name(&self) -> Option<String> {
        self.name.read().platform().map(str::to_string)
    }

    fn display_name(&self) -> String {
        let name = self.name();
        let platform = name
            .platform()
            .map(str::to_string)
            .or_else(|| self.project.platform_names().into_iter().next());
        match platform {
            Some(platform) => format!("{}|{}", name.configuration(), platform),
            None => name.configuration().to_string(),
        }
    }

    fn get_property(&self, name: &str, reset_cache: bool) -> Option<String> {
        self.properties(reset_cache).get(name).map(str::to_string)
    }

    fn output_groups(&self) -> Vec<Arc<OutputGroup>> {
        let mut groups = self.output_groups.lock();
        groups
            .get_or_insert_with(|| {
                if !self.project.is_buildable() {
                    return Vec::new();
                }
                self.project
                    .settings()
                    .output_groups
                    .iter()
                    .map(|spec| OutputGroup::new(&spec.name, &spec.target, self.this.clone()))
                    .collect()
            })
            .clone()
    }

    fn debug_launch_eligible(&self) -> bool {
        let assembly = self.project.assembly_name(&self.name());
        if assembly.to_ascii_lowercase().ends_with(".exe") {
            return true;
        }

        self.get_property(START_PROGRAM, true)
            .is_some_and(|program| !program.is_empty())
    }
}

impl ConfigurationEditor for ProjectConfig {
    fn set_property(&self, name: &str, value: &str) -> Result<()> {
        let config_name = self.config_name();
        let listed = self
            .project
            .configuration_names()
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(&config_name));
        if self.is_detached() || !listed {
            return Err(Error::ConfigurationNotFound(config_name));
        }

        self.project.query_edit_project_file()?;
        let condition = self.name.read().condition();
        self.project
            .set_property_under_condition(name, value, &condition);
        self.snapshot.invalidate();
        Ok(())
    }
}

impl BuildableConfiguration for ProjectConfig {
    fn is_up_to_date(&self) -> bool {
        let groups = self.output_groups();
        let settings = self.project.settings();
        StalenessChecker::new(self.project.file_system().as_ref(), &settings.input_group)
            .is_up_to_date(&groups)
    }

    fn buildable(&self) -> Option<Arc<BuildableProjectConfig>> {
        if !self.project.is_buildable() {
            return None;
        }

        let mut buildable = self.buildable.lock();
        Some(Arc::clone(buildable.get_or_insert_with(|| {
            Arc::new(BuildableProjectConfig::new(self.this.clone()))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ItemDefinition, ProjectModel, TargetDefinition};
    use crate::services::DocumentEvaluator;
    use crate::types::{PropertyGroup, configuration_condition};
    use std::collections::BTreeMap;

    fn project(targets: BTreeMap<String, TargetDefinition>) -> Arc<Project> {
        Project::builder("/work/App")
            .model(ProjectModel::new(vec![
                PropertyGroup::default()
                    .with_property("OutputType", "Library")
                    .with_property("OutDir", "bin/$(Configuration)/"),
                PropertyGroup::new(configuration_condition("Debug"))
                    .with_property("DefineConstants", "DEBUG"),
            ]))
            .evaluator(Arc::new(DocumentEvaluator::new(targets)))
            .build()
    }

    fn buildable_targets() -> BTreeMap<String, TargetDefinition> {
        BTreeMap::from([
            ("CoreCompile".to_string(), TargetDefinition::default()),
            (
                "BuiltProjectOutputGroup".to_string(),
                TargetDefinition {
                    items: vec![
                        ItemDefinition::new("$(OutDir)App.pdb"),
                        ItemDefinition::new("$(OutDir)App.dll").with_metadata("IsKeyOutput", "true"),
                    ],
                    fails: false,
                },
            ),
            (
                "DebugSymbolsProjectOutputGroup".to_string(),
                TargetDefinition {
                    fails: true,
                    ..Default::default()
                },
            ),
        ])
    }

    #[test]
    fn test_names() {
        let config = ProjectConfig::new(project(BTreeMap::new()), "Debug|x64").unwrap();
        assert_eq!(config.config_name(), "Debug");
        assert_eq!(config.platform_name().as_deref(), Some("x64"));
        assert_eq!(config.display_name(), "Debug|x64");
        assert!(config.is_debug_only());
        assert!(!config.is_release_only());

        let bare = ProjectConfig::new(project(BTreeMap::new()), "Release").unwrap();
        assert_eq!(bare.display_name(), "Release|x86");

        let err = ProjectConfig::new(project(BTreeMap::new()), "a|b|c").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigurationName(_)));
    }

    #[test]
    fn test_get_property_caches_until_write() {
        let config = ProjectConfig::new(project(BTreeMap::new()), "Debug").unwrap();
        assert!(!config.is_cached());
        assert_eq!(config.get_property("DefineConstants", false).as_deref(), Some("DEBUG"));
        assert!(config.is_cached());

        config.set_property("DefineConstants", "TRACE").unwrap();
        assert!(!config.is_cached());
        assert_eq!(config.get_property("DefineConstants", false).as_deref(), Some("TRACE"));
        assert_eq!(config.get_property("DefineConstants", true).as_deref(), Some("TRACE"));
    }

    #[test]
    fn test_detached_instance_rejects_writes() {
        let config = ProjectConfig::new(project(BTreeMap::new()), "Debug").unwrap();
        config.detach();
        let err = config.set_property("Foo", "Bar").unwrap_err();
        assert!(matches!(err, Error::ConfigurationNotFound(_)));
    }

    #[test]
    fn test_set_property_on_unlisted_configuration() {
        let project = project(BTreeMap::new());
        let config = ProjectConfig::new(Arc::clone(&project), "Nope").unwrap();
        let err = config.set_property("Foo", "Bar").unwrap_err();
        assert!(matches!(err, Error::ConfigurationNotFound(name) if name == "Nope"));
        assert_eq!(project.configuration_names(), vec!["Debug"]);

        let debug = ProjectConfig::new(project, "debug").unwrap();
        debug.set_property("Foo", "Bar").unwrap();
    }

    #[test]
    fn test_output_groups_require_compile_target() {
        let config = ProjectConfig::new(project(BTreeMap::new()), "Debug").unwrap();
        assert!(config.output_groups().is_empty());
        assert!(config.buildable().is_none());
        assert!(config.is_up_to_date());

        let config = ProjectConfig::new(project(buildable_targets()), "Debug").unwrap();
        let groups = config.output_groups();
        assert_eq!(groups.len(), 7);
        assert!(Arc::ptr_eq(&groups[0], &config.output_groups()[0]));
        assert!(config.buildable().is_some());
    }

    #[test]
    fn test_output_group_refresh_and_key_output() {
        let config = ProjectConfig::new(project(buildable_targets()), "Debug").unwrap();
        let built = config.open_output_group("built").unwrap();

        let outputs = built.outputs();
        assert_eq!(outputs.len(), 2);
        assert_eq!(
            built.key_output().unwrap().canonical_name(),
            std::path::Path::new("/work/App/bin/Debug/App.dll")
        );
        assert!(built.is_subscribed());

        let symbols = config.open_output_group("Symbols").unwrap();
        assert!(symbols.outputs().is_empty());
        assert!(symbols.key_output().is_none());
        assert!(!symbols.is_subscribed());
    }

    #[test]
    fn test_output_group_invalidates_once_per_refresh() {
        let config = ProjectConfig::new(project(buildable_targets()), "Debug").unwrap();
        let built = config.open_output_group("Built").unwrap();
        built.refresh();
        assert!(built.is_refreshed());

        config.set_property("OutDir", "out/").unwrap();
        assert!(!built.is_refreshed());
        assert!(!built.is_subscribed());

        assert_eq!(
            built.key_output().unwrap().canonical_name(),
            std::path::Path::new("/work/App/out/App.dll")
        );
        assert!(built.is_subscribed());
    }

    #[test]
    fn test_debug_launch_eligible() {
        let config = ProjectConfig::new(project(BTreeMap::new()), "Debug").unwrap();
        assert!(!config.debug_launch_eligible());

        config.set_property("StartProgram", "host.exe").unwrap();
        assert!(config.debug_launch_eligible());

        let release = ProjectConfig::new(Arc::clone(config.project()), "Release").unwrap();
        release.project().set_property("OutputType", "Exe").unwrap();
        assert!(release.debug_launch_eligible());
    }
}
