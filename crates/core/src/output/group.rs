//! Output groups
//!
//! A group lazily runs its target the first time its outputs are asked for
//! and then subscribes to project property changes. The first change clears
//! the group and drops the subscription; the next access refreshes again.

use super::Output;
use crate::configuration::ProjectConfig;
use crate::interfaces::{PropertyChangeListener, PropertyChanged};
use crate::staleness::GroupOutputs;
use crate::utils::Cookie;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::debug;

#[derive(Debug, Default)]
struct GroupState {
    outputs: Vec<Output>,
    key_output: Option<Output>,
    refreshed: bool,
    subscription: Option<Cookie>,
}

pub struct OutputGroup {
    name: String,
    target_name: String,
    config: Weak<ProjectConfig>,
    this: Weak<OutputGroup>,
    state: Mutex<GroupState>,
}

impl std::fmt::Debug for OutputGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputGroup")
            .field("name", &self.name)
            .field("target_name", &self.target_name)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl OutputGroup {
    pub(crate) fn new(
        name: impl Into<String>,
        target_name: impl Into<String>,
        config: Weak<ProjectConfig>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            name: name.into(),
            target_name: target_name.into(),
            config,
            this: this.clone(),
            state: Mutex::new(GroupState::default()),
        })
    }

    /// Canonical group name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.name
    }

    pub fn project_config(&self) -> Option<Arc<ProjectConfig>> {
        self.config.upgrade()
    }

    /// Evaluated project property, under the project's current configuration
    pub fn property(&self, name: &str) -> Option<String> {
        self.project_config()?.project().property(name)
    }

    /// Whether the outputs are computed and not invalidated since
    pub fn is_refreshed(&self) -> bool {
        self.state.lock().refreshed
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.lock().subscription.is_some()
    }

    /// Outputs, refreshing first when needed
    pub fn outputs(&self) -> Vec<Output> {
        if !self.is_refreshed() {
            self.refresh();
        }
        self.state.lock().outputs.clone()
    }

    /// The output flagged `IsKeyOutput`, else the first output
    pub fn key_output(&self) -> Option<Output> {
        if !self.is_refreshed() {
            self.refresh();
        }
        self.state.lock().key_output.clone()
    }

    /// Run the group's target under its configuration and read back the items
    pub fn refresh(&self) {
        let Some(config) = self.config.upgrade() else {
            self.clear();
            return;
        };
        let project = Arc::clone(config.project());
        let selector = config.name();

        // Evaluate without holding the state lock.
        let evaluation = project.with_configuration(&selector, |context| {
            project.evaluator().evaluate_target(context, &self.target_name)
        });

        if !evaluation.success {
            debug!("Failed to build target {}", self.target_name);
            self.clear();
            return;
        }

        let outputs: Vec<Output> = evaluation
            .items
            .into_iter()
            .map(|item| Output::new(project.home(), item))
            .collect();
        let key_output = outputs
            .iter()
            .find(|output| output.is_key_output())
            .or_else(|| outputs.first())
            .cloned();

        let mut state = self.state.lock();
        state.outputs = outputs;
        state.key_output = key_output;
        state.refreshed = true;
        if state.subscription.is_none() {
            let listener: Weak<dyn PropertyChangeListener> = self.this.clone();
            state.subscription = Some(project.advise_property_changed(listener));
        }
    }

    /// Forget the computed outputs and stop listening for changes
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.key_output = None;
        state.refreshed = false;
        if let Some(cookie) = state.subscription.take() {
            if let Some(config) = self.config.upgrade() {
                config.project().unadvise_property_changed(cookie);
            }
        }
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.outputs.clear();
        state.key_output = None;
        state.refreshed = false;
    }
}

impl PropertyChangeListener for OutputGroup {
    fn on_property_changed(&self, event: &PropertyChanged) {
        debug!(
            "Output group {} invalidated by change to {}",
            self.name, event.name
        );
        self.invalidate();
    }
}

impl GroupOutputs for OutputGroup {
    fn group_name(&self) -> &str {
        &self.name
    }

    fn enumerate_outputs(&self) -> Vec<Output> {
        self.outputs()
    }
}
