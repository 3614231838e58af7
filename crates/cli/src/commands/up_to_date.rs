use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::utils::ProjectWorkspace;

pub fn up_to_date_command(project: &Path, configuration: &str) -> Result<()> {
    let workspace = ProjectWorkspace::open(project)?;
    let up_to_date = workspace.configurations().is_up_to_date(configuration)?;
    debug!("{} up to date: {}", configuration, up_to_date);

    if up_to_date {
        println!("{configuration} is up to date");
    } else {
        println!("{configuration} needs a rebuild");
        std::process::exit(1);
    }
    Ok(())
}
