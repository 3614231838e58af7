use anyhow::{Context, Result, bail};
use projcfg_core::{ConfigurationEditor, ConfigurationQuery};
use std::path::Path;

use crate::utils::ProjectWorkspace;

pub fn get_command(project: &Path, configuration: &str, property: &str) -> Result<()> {
    let workspace = ProjectWorkspace::open(project)?;
    let config = workspace.configurations().configuration(configuration)?;

    match config.get_property(property, false) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => bail!("Property {property} is not defined for {configuration}"),
    }
}

pub fn set_command(project: &Path, configuration: &str, property: &str, value: &str) -> Result<()> {
    let mut workspace = ProjectWorkspace::open(project)?;
    let config = workspace.configurations().configuration(configuration)?;

    config
        .set_property(property, value)
        .with_context(|| format!("Failed to set {property} for {configuration}"))?;
    workspace.save()?;

    println!("Set {property} = {value} for {configuration}");
    Ok(())
}
