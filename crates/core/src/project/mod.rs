//! The project a configuration set belongs to
//!
//! [`Project`] owns the property model and the host services, and is the
//! single place property changes are announced from.

pub mod document;
pub mod model;

pub use document::{ItemDefinition, ProjectDocument, TargetDefinition};
pub use model::{ProjectModel, PropertySnapshot};

use crate::config::EngineSettings;
use crate::error::{Error, Result};
use crate::interfaces::{
    BuildContext, BuildEvaluator, FileSystem, ProjectEditor, PropertyChangeListener,
    PropertyChanged,
};
use crate::services::{AlwaysEditable, NullEvaluator, OsFileSystem};
use crate::types::{CONFIGURATION, ConfigName, PLATFORM};
use crate::utils::{Cookie, EventSinks};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Property naming the platforms the project can target, comma separated
pub const AVAILABLE_PLATFORMS: &str = "AvailablePlatforms";

pub struct Project {
    name: String,
    home: PathBuf,
    settings: EngineSettings,
    model: RwLock<ProjectModel>,
    editor: Arc<dyn ProjectEditor>,
    evaluator: Arc<dyn BuildEvaluator>,
    file_system: Arc<dyn FileSystem>,
    active_configuration: RwLock<Option<ConfigName>>,
    current_configuration: RwLock<Option<ConfigName>>,
    property_listeners: Mutex<EventSinks<Weak<dyn PropertyChangeListener>>>,
    build_in_progress: AtomicBool,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("home", &self.home)
            .field("active_configuration", &*self.active_configuration.read())
            .finish_non_exhaustive()
    }
}

impl Project {
    pub fn builder(home: impl Into<PathBuf>) -> ProjectBuilder {
        ProjectBuilder::new(home)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory containing the project file
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn evaluator(&self) -> &Arc<dyn BuildEvaluator> {
        &self.evaluator
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.file_system
    }

    pub fn model(&self) -> RwLockReadGuard<'_, ProjectModel> {
        self.model.read()
    }

    pub(crate) fn model_mut(&self) -> RwLockWriteGuard<'_, ProjectModel> {
        self.model.write()
    }

    /// Ask the editor gate for permission to change the project file
    pub fn query_edit_project_file(&self) -> Result<()> {
        if self.editor.checkout_for_edit() {
            Ok(())
        } else {
            warn!("Project {} could not be checked out for editing", self.name);
            Err(Error::EditNotAllowed)
        }
    }

    pub fn active_configuration(&self) -> Option<ConfigName> {
        self.active_configuration.read().clone()
    }

    pub fn set_active_configuration(&self, selector: Option<ConfigName>) {
        *self.active_configuration.write() = selector;
    }

    /// The configuration the build context is currently switched to
    pub fn current_configuration(&self) -> Option<ConfigName> {
        self.current_configuration.read().clone()
    }

    /// Switch the build context to `selector`
    pub fn set_configuration(&self, selector: &ConfigName) {
        debug!("Switching {} to configuration {}", self.name, selector);
        *self.current_configuration.write() = Some(selector.clone());
    }

    /// Switch the build context back to the active configuration
    pub fn restore_configuration(&self) {
        *self.current_configuration.write() = self.active_configuration();
    }

    /// Evaluate properties for `selector`
    pub fn evaluate(&self, selector: Option<&ConfigName>) -> PropertySnapshot {
        self.model.read().evaluate(selector)
    }

    /// Run `f` with the build context switched to `selector`, then switch back
    pub fn with_configuration<R>(
        &self,
        selector: &ConfigName,
        f: impl FnOnce(&BuildContext<'_>) -> R,
    ) -> R {
        self.set_configuration(selector);
        let properties = self.evaluate(Some(selector));
        let context = BuildContext {
            selector: Some(selector),
            properties: &properties,
            project_home: &self.home,
        };
        let result = f(&context);
        self.restore_configuration();
        result
    }

    /// Project-level property, evaluated under the current configuration
    pub fn property(&self, name: &str) -> Option<String> {
        let selector = self
            .current_configuration()
            .or_else(|| self.active_configuration());
        self.evaluate(selector.as_ref())
            .get(name)
            .map(str::to_string)
    }

    /// Set an unconditioned project property and announce the change
    pub fn set_property(&self, name: &str, value: &str) -> Result<()> {
        self.query_edit_project_file()?;
        let old_value = self.property(name);
        self.model.write().set_property(name, value);
        info!("Set project property {} = {}", name, value);
        self.notify_property_changed(name, old_value, value);
        Ok(())
    }

    /// Set a property under `condition` and announce the change.
    ///
    /// The caller is responsible for the edit check.
    pub(crate) fn set_property_under_condition(&self, name: &str, value: &str, condition: &str) {
        self.model
            .write()
            .set_property_under_condition(name, value, condition);
        info!("Set property {} = {} under [{}]", name, value, condition.trim());
        self.notify_property_changed(name, None, value);
    }

    pub fn advise_property_changed(&self, listener: Weak<dyn PropertyChangeListener>) -> Cookie {
        self.property_listeners.lock().add(listener)
    }

    pub fn unadvise_property_changed(&self, cookie: Cookie) -> bool {
        self.property_listeners.lock().remove(cookie)
    }

    pub fn notify_property_changed(&self, name: &str, old_value: Option<String>, new_value: &str) {
        let event = PropertyChanged {
            name: name.to_string(),
            old_value,
            new_value: new_value.to_string(),
        };

        let listeners = self.property_listeners.lock().snapshot();
        for listener in listeners.iter().filter_map(Weak::upgrade) {
            listener.on_property_changed(&event);
        }
    }

    /// Distinct values `property` is compared against in group conditions
    pub fn conditioned_values(&self, property: &str) -> Vec<String> {
        self.model.read().conditioned_values(property)
    }

    pub fn configuration_names(&self) -> Vec<String> {
        self.conditioned_values(CONFIGURATION)
    }

    /// Platforms the project conditions on, or the default set if none
    pub fn platform_names(&self) -> Vec<String> {
        let platforms = self.conditioned_values(PLATFORM);
        if platforms.is_empty() {
            return self.settings.default_platforms.clone();
        }

        platforms
            .into_iter()
            .map(|platform| {
                if platform.eq_ignore_ascii_case("AnyCPU") {
                    "Any CPU".to_string()
                } else {
                    platform
                }
            })
            .collect()
    }

    /// Platforms listed in the `AvailablePlatforms` property
    pub fn supported_platform_names(&self) -> Vec<String> {
        self.property(AVAILABLE_PLATFORMS)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|platform| !platform.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_target(&self, target: &str) -> bool {
        self.evaluator.has_target(target)
    }

    /// A project is buildable when it defines the compile target
    pub fn is_buildable(&self) -> bool {
        self.has_target(&self.settings.compile_target)
    }

    /// `AssemblyName` (or the project name) plus `.dll` or `.exe`
    pub fn assembly_name(&self, selector: &ConfigName) -> String {
        let properties = self.evaluate(Some(selector));
        let base = properties
            .get("AssemblyName")
            .filter(|name| !name.is_empty())
            .unwrap_or(self.name.as_str());
        let extension = match properties.get("OutputType") {
            Some(kind) if kind.eq_ignore_ascii_case("library") => ".dll",
            _ => ".exe",
        };
        format!("{base}{extension}")
    }

    pub fn build_in_progress(&self) -> bool {
        self.build_in_progress.load(Ordering::SeqCst)
    }

    /// Run `target` under `selector`; false if it fails or a build is already running
    pub fn build(&self, selector: &ConfigName, target: &str) -> bool {
        if self
            .build_in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Build of {} requested while another build is running", target);
            return false;
        }

        info!("Building {} for {}", target, selector);
        let success =
            self.with_configuration(selector, |context| self.evaluator.build_target(context, target));
        self.build_in_progress.store(false, Ordering::SeqCst);

        if !success {
            warn!("Target {} failed for {}", target, selector);
        }
        success
    }
}

pub struct ProjectBuilder {
    home: PathBuf,
    name: Option<String>,
    settings: EngineSettings,
    model: ProjectModel,
    editor: Arc<dyn ProjectEditor>,
    evaluator: Arc<dyn BuildEvaluator>,
    file_system: Arc<dyn FileSystem>,
    active_configuration: Option<ConfigName>,
}

impl ProjectBuilder {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            name: None,
            settings: EngineSettings::default(),
            model: ProjectModel::default(),
            editor: Arc::new(AlwaysEditable),
            evaluator: Arc::new(NullEvaluator),
            file_system: Arc::new(OsFileSystem),
            active_configuration: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn model(mut self, model: ProjectModel) -> Self {
        self.model = model;
        self
    }

    pub fn editor(mut self, editor: Arc<dyn ProjectEditor>) -> Self {
        self.editor = editor;
        self
    }

    pub fn evaluator(mut self, evaluator: Arc<dyn BuildEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = file_system;
        self
    }

    pub fn active_configuration(mut self, selector: ConfigName) -> Self {
        self.active_configuration = Some(selector);
        self
    }

    pub fn build(self) -> Arc<Project> {
        let name = self.name.unwrap_or_else(|| {
            self.home
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Arc::new(Project {
            name,
            home: self.home,
            settings: self.settings,
            model: RwLock::new(self.model),
            editor: self.editor,
            evaluator: self.evaluator,
            file_system: self.file_system,
            current_configuration: RwLock::new(self.active_configuration.clone()),
            active_configuration: RwLock::new(self.active_configuration),
            property_listeners: Mutex::new(EventSinks::new()),
            build_in_progress: AtomicBool::new(false),
        })
    }
}
