use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    add_command, delete_command, get_command, list_command, outputs_command, platforms_command,
    rename_command, set_command, up_to_date_command,
};

#[derive(Parser, Debug)]
#[command(name = "projcfg")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Path to the project document
    #[arg(short, long, global = true, default_value = "project.json")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configuration names
    #[command(visible_alias = "ls")]
    List {
        /// Print configurations and platforms as JSON
        #[arg(long)]
        json: bool,
    },
    /// List platform names
    Platforms,
    /// Add a configuration, optionally cloning an existing one
    Add {
        name: String,

        /// Configuration to copy properties from
        #[arg(long)]
        clone: Option<String>,
    },
    /// Delete a configuration
    Delete { name: String },
    /// Rename a configuration
    Rename { old_name: String, new_name: String },
    /// Print an evaluated property of a configuration
    Get {
        configuration: String,
        property: String,
    },
    /// Set a property for a configuration
    Set {
        configuration: String,
        property: String,
        value: String,
    },
    /// Show the output groups of a configuration
    Outputs { configuration: String },
    /// Check whether a configuration needs a rebuild (exit code 1 if so)
    UpToDate { configuration: String },
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let project = self.project;
        match self.command {
            Commands::List { json } => list_command(&project, json),
            Commands::Platforms => platforms_command(&project),
            Commands::Add { name, clone } => add_command(&project, &name, clone.as_deref()),
            Commands::Delete { name } => delete_command(&project, &name),
            Commands::Rename { old_name, new_name } => {
                rename_command(&project, &old_name, &new_name)
            }
            Commands::Get {
                configuration,
                property,
            } => get_command(&project, &configuration, &property),
            Commands::Set {
                configuration,
                property,
                value,
            } => set_command(&project, &configuration, &property, &value),
            Commands::Outputs { configuration } => outputs_command(&project, &configuration),
            Commands::UpToDate { configuration } => up_to_date_command(&project, &configuration),
        }
    }
}
