use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`EngineSettings::find_settings_file`]
pub const SETTINGS_FILE_NAME: &str = ".projcfg.json";

/// A named output group and the target that produces its items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGroupSpec {
    pub name: String,
    pub target: String,
}

impl OutputGroupSpec {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Engine constants, overridable per project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineSettings {
    /// Directory new configurations put their `OutputPath` under
    pub output_base_relative_path: String,
    /// The output group whose items are build inputs
    pub input_group: String,
    /// Target whose presence makes a project buildable
    pub compile_target: String,
    pub build_target: String,
    pub rebuild_target: String,
    pub clean_target: String,
    /// Reported when the project conditions on no platform at all
    pub default_platforms: Vec<String>,
    pub output_groups: Vec<OutputGroupSpec>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            output_base_relative_path: "bin".to_string(),
            input_group: "SourceFiles".to_string(),
            compile_target: "CoreCompile".to_string(),
            build_target: "Build".to_string(),
            rebuild_target: "Rebuild".to_string(),
            clean_target: "Clean".to_string(),
            default_platforms: ["x86", "Any CPU", "x64", "ARM"]
                .map(String::from)
                .to_vec(),
            output_groups: vec![
                OutputGroupSpec::new("Built", "BuiltProjectOutputGroup"),
                OutputGroupSpec::new("ContentFiles", "ContentFilesProjectOutputGroup"),
                OutputGroupSpec::new("LocalizedResourceDlls", "SatelliteDllsProjectOutputGroup"),
                OutputGroupSpec::new("Documentation", "DocumentationProjectOutputGroup"),
                OutputGroupSpec::new("Symbols", "DebugSymbolsProjectOutputGroup"),
                OutputGroupSpec::new("SourceFiles", "SourceFilesProjectOutputGroup"),
                OutputGroupSpec::new("XmlSerializer", "SGenFilesOutputGroup"),
            ],
        }
    }
}

impl EngineSettings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse settings: {e}")))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for a settings file
    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let settings_path = current.join(SETTINGS_FILE_NAME);
            if settings_path.is_file() {
                return Some(settings_path);
            }

            current = current.parent()?;
        }
    }

    /// Settings for a project living in `project_home`, or the defaults
    pub fn discover(project_home: &Path) -> Result<Self> {
        match Self::find_settings_file(project_home) {
            Some(path) => {
                tracing::debug!("Loading engine settings from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn is_input_group(&self, group_name: &str) -> bool {
        group_name == self.input_group
    }

    pub fn output_group(&self, name: &str) -> Option<&OutputGroupSpec> {
        self.output_groups
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }
}
