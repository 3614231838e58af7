use anyhow::{Context, Result};
use projcfg_core::{
    ConfigurationSet, DocumentEvaluator, EngineSettings, FileProjectEditor, Project,
    ProjectDocument,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A project document opened from disk, with its engine objects
pub struct ProjectWorkspace {
    path: PathBuf,
    document: ProjectDocument,
    configurations: ConfigurationSet,
}

impl ProjectWorkspace {
    pub fn open(path: &Path) -> Result<Self> {
        let document = ProjectDocument::load_from_file(path)
            .with_context(|| format!("Failed to load project {}", path.display()))?;

        let home = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            Some(parent) if parent.is_absolute() => parent.to_path_buf(),
            Some(parent) => std::env::current_dir()?.join(parent),
            None => std::env::current_dir()?,
        };
        let settings =
            EngineSettings::discover(&home).context("Failed to load engine settings")?;
        debug!("Opened project {} in {}", path.display(), home.display());

        let name = document.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let project = Project::builder(home)
            .name(name)
            .settings(settings)
            .model(document.model())
            .editor(Arc::new(FileProjectEditor::new(path)))
            .evaluator(Arc::new(DocumentEvaluator::from_document(&document)))
            .build();

        Ok(Self {
            path: path.to_path_buf(),
            document,
            configurations: ConfigurationSet::new(project),
        })
    }

    pub fn configurations(&self) -> &ConfigurationSet {
        &self.configurations
    }

    pub fn project(&self) -> &Arc<Project> {
        self.configurations.project()
    }

    /// Write the current property groups back to the document
    pub fn save(&mut self) -> Result<()> {
        let model = self.configurations.project().model().clone();
        self.document.update_from(&model);
        self.document
            .save_to_file(&self.path)
            .with_context(|| format!("Failed to save project {}", self.path.display()))
    }
}
