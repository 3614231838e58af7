//! Build outputs and output groups

pub mod group;

pub use group::OutputGroup;

use crate::types::EvaluatedItem;
use crate::utils::paths::{absolute_file_path, file_url, relative_file_path};
use std::path::{Path, PathBuf};

pub const FULL_PATH: &str = "FullPath";
pub const IS_KEY_OUTPUT: &str = "IsKeyOutput";
pub const SOURCE_FILE: &str = "SourceFile";
pub const FINAL_OUTPUT_PATH: &str = "FinalOutputPath";
pub const TARGET_PATH: &str = "TargetPath";

/// One file produced (or consumed) by a build target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    canonical_name: PathBuf,
    project_home: PathBuf,
    item: EvaluatedItem,
}

impl Output {
    pub fn new(project_home: &Path, item: EvaluatedItem) -> Self {
        let path = item
            .metadata_value(FULL_PATH)
            .filter(|path| !path.is_empty())
            .unwrap_or(item.include.as_str());
        let canonical_name = absolute_file_path(project_home, path);
        Self {
            canonical_name,
            project_home: project_home.to_path_buf(),
            item,
        }
    }

    /// Absolute, normalized path of the file
    pub fn canonical_name(&self) -> &Path {
        &self.canonical_name
    }

    pub fn item(&self) -> &EvaluatedItem {
        &self.item
    }

    /// Metadata value; empty values read as absent
    pub fn metadata(&self, name: &str) -> Option<&str> {
        self.item
            .metadata_value(name)
            .filter(|value| !value.is_empty())
    }

    pub fn is_key_output(&self) -> bool {
        self.metadata(IS_KEY_OUTPUT)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// The input this output was produced from, resolved against the project home
    pub fn source_file(&self) -> Option<PathBuf> {
        self.metadata(SOURCE_FILE)
            .map(|path| absolute_file_path(&self.project_home, path))
    }

    pub fn deploy_source_url(&self) -> String {
        match self.metadata(FINAL_OUTPUT_PATH) {
            Some(path) if path.starts_with("file:///") => path.to_string(),
            Some(path) => format!("file:///{}", path.replace('\\', "/").trim_start_matches('/')),
            None => file_url(&self.canonical_name),
        }
    }

    pub fn root_relative_url(&self) -> String {
        if let Some(target) = self.metadata(TARGET_PATH) {
            return target.to_string();
        }

        relative_file_path(&self.project_home, &self.canonical_name)
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
