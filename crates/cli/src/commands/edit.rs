use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::utils::ProjectWorkspace;

pub fn add_command(project: &Path, name: &str, clone_from: Option<&str>) -> Result<()> {
    let mut workspace = ProjectWorkspace::open(project)?;
    debug!("Adding configuration {} (clone of {:?})", name, clone_from);

    workspace
        .configurations()
        .add_configuration(name, clone_from)
        .with_context(|| format!("Failed to add configuration {name}"))?;
    workspace.save()?;

    match clone_from {
        Some(source) => println!("Added configuration {name} (cloned from {source})"),
        None => println!("Added configuration {name}"),
    }
    Ok(())
}

pub fn delete_command(project: &Path, name: &str) -> Result<()> {
    let mut workspace = ProjectWorkspace::open(project)?;

    workspace
        .configurations()
        .delete_configuration(Some(name))
        .with_context(|| format!("Failed to delete configuration {name}"))?;
    workspace.save()?;

    println!("Deleted configuration {name}");
    Ok(())
}

pub fn rename_command(project: &Path, old_name: &str, new_name: &str) -> Result<()> {
    let mut workspace = ProjectWorkspace::open(project)?;

    workspace
        .configurations()
        .rename_configuration(old_name, new_name)
        .with_context(|| format!("Failed to rename configuration {old_name}"))?;
    workspace.save()?;

    println!("Renamed configuration {old_name} to {new_name}");
    Ok(())
}
