use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::utils::ProjectWorkspace;

#[derive(Debug, Serialize)]
struct ListReport {
    configurations: Vec<String>,
    platforms: Vec<String>,
    supported_platforms: Vec<String>,
}

pub fn list_command(project: &Path, json: bool) -> Result<()> {
    let workspace = ProjectWorkspace::open(project)?;
    let set = workspace.configurations();

    if json {
        let report = ListReport {
            configurations: set.configuration_names(),
            platforms: set.platform_names(),
            supported_platforms: set.supported_platform_names(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for name in set.configuration_names() {
        println!("{name}");
    }
    Ok(())
}

pub fn platforms_command(project: &Path) -> Result<()> {
    let workspace = ProjectWorkspace::open(project)?;
    for platform in workspace.configurations().platform_names() {
        println!("{platform}");
    }
    Ok(())
}
