//! Up-to-date check over a configuration's output groups
//!
//! The verdict is a two-phase approximation: outputs are checked one by one
//! (existence, `SourceFile` freshness), then the earliest output time is
//! compared against the latest input time. Missing or unreadable outputs
//! force a rebuild; missing or unreadable inputs are ignored.

use crate::interfaces::FileSystem;
use crate::output::Output;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// A named collection of outputs the checker can enumerate
pub trait GroupOutputs {
    fn group_name(&self) -> &str;

    fn enumerate_outputs(&self) -> Vec<Output>;
}

impl<T: GroupOutputs + ?Sized> GroupOutputs for Arc<T> {
    fn group_name(&self) -> &str {
        (**self).group_name()
    }

    fn enumerate_outputs(&self) -> Vec<Output> {
        (**self).enumerate_outputs()
    }
}

pub struct StalenessChecker<'a> {
    file_system: &'a dyn FileSystem,
    input_group: &'a str,
}

impl<'a> StalenessChecker<'a> {
    pub fn new(file_system: &'a dyn FileSystem, input_group: &'a str) -> Self {
        Self {
            file_system,
            input_group,
        }
    }

    pub fn is_input_group(&self, group_name: &str) -> bool {
        group_name == self.input_group
    }

    pub fn is_up_to_date<G: GroupOutputs>(&self, groups: &[G]) -> bool {
        let (input_groups, output_groups): (Vec<&G>, Vec<&G>) = groups
            .iter()
            .partition(|group| self.is_input_group(group.group_name()));

        let inputs: Vec<Output> = input_groups
            .iter()
            .flat_map(|group| group.enumerate_outputs())
            .collect();
        let input_paths: HashSet<String> = inputs
            .iter()
            .map(|input| path_key(input.canonical_name()))
            .collect();

        let mut earliest_output: Option<SystemTime> = None;
        let mut must_rebuild = false;

        'outputs: for group in &output_groups {
            for output in group.enumerate_outputs() {
                let path = output.canonical_name();
                let Some(output_time) = self.file_time(path) else {
                    debug!("Output {} is missing or unreadable", path.display());
                    must_rebuild = true;
                    break 'outputs;
                };

                if let Some(source) = output.source_file().filter(|s| self.file_system.is_file(s)) {
                    if let Some(source_time) = self.file_time(&source) {
                        if source_time > output_time {
                            debug!(
                                "Source {} is newer than output {}",
                                source.display(),
                                path.display()
                            );
                            must_rebuild = true;
                            break 'outputs;
                        }
                    }
                    continue;
                }

                if input_paths.contains(&path_key(path)) {
                    debug!("Output {} is also an input, skipping", path.display());
                    continue;
                }

                debug!("Output {} modified at {:?}", path.display(), output_time);
                earliest_output = Some(earliest_output.map_or(output_time, |t| t.min(output_time)));
            }
        }

        if must_rebuild {
            info!("Rebuild required");
            return false;
        }

        let mut latest_input: Option<SystemTime> = None;
        for input in &inputs {
            let path = input.canonical_name();
            let Some(input_time) = self.file_time(path) else {
                debug!("Input {} is missing or unreadable, skipping", path.display());
                continue;
            };

            debug!("Input {} modified at {:?}", path.display(), input_time);
            let latest = latest_input.map_or(input_time, |t| t.max(input_time));
            latest_input = Some(latest);
            if earliest_output.is_some_and(|earliest| latest > earliest) {
                break;
            }
        }

        // No outputs means "latest possible", no inputs "earliest possible".
        let up_to_date = match (earliest_output, latest_input) {
            (Some(earliest), Some(latest)) => earliest >= latest,
            _ => true,
        };

        if up_to_date {
            info!("Up to date");
        } else {
            info!("Rebuild required: an input is newer than the earliest output");
        }
        up_to_date
    }

    /// Modification time of an existing file; None when missing or unreadable
    fn file_time(&self, path: &Path) -> Option<SystemTime> {
        if !self.file_system.is_file(path) {
            return None;
        }

        match self.file_system.modified_time(path) {
            Ok(time) => Some(time),
            Err(e) => {
                warn!("Cannot read modification time of {}: {}", path.display(), e);
                None
            }
        }
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}
