use anyhow::Result;
use projcfg_core::ConfigurationQuery;
use std::path::Path;

use crate::display::print_output_group;
use crate::utils::ProjectWorkspace;

pub fn outputs_command(project: &Path, configuration: &str) -> Result<()> {
    let workspace = ProjectWorkspace::open(project)?;
    let config = workspace.configurations().configuration(configuration)?;

    let groups = config.output_groups();
    if groups.is_empty() {
        println!("{} has no output groups (no compile target)", config.display_name());
        return Ok(());
    }

    for group in &groups {
        print_output_group(group);
    }
    Ok(())
}
