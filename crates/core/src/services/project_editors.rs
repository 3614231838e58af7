//! Editor gates

use crate::interfaces::ProjectEditor;
use std::path::PathBuf;

/// Grants every edit
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEditable;

impl ProjectEditor for AlwaysEditable {
    fn checkout_for_edit(&self) -> bool {
        true
    }
}

/// Grants edits while the project file is writable (or not yet created)
#[derive(Debug, Clone)]
pub struct FileProjectEditor {
    path: PathBuf,
}

impl FileProjectEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectEditor for FileProjectEditor {
    fn checkout_for_edit(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(metadata) => !metadata.permissions().readonly(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!("Cannot check out {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_editor_respects_read_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.json");
        let editor = FileProjectEditor::new(&path);
        assert!(editor.checkout_for_edit());

        std::fs::write(&path, "{}").unwrap();
        assert!(editor.checkout_for_edit());

        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        std::fs::set_permissions(&path, permissions).unwrap();
        assert!(!editor.checkout_for_edit());
    }
}
