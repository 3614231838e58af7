//! Build entry points for a configuration

use super::ProjectConfig;
use crate::error::{Error, Result};
use crate::interfaces::{BuildStatusCallback, BuildableConfiguration};
use crate::utils::{Cookie, EventSinks};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::info;

/// Answer to a `query_start_*` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReadiness {
    pub supported: bool,
    pub ready: bool,
}

pub struct BuildableProjectConfig {
    config: Weak<ProjectConfig>,
    callbacks: Mutex<EventSinks<Arc<dyn BuildStatusCallback>>>,
}

impl BuildableProjectConfig {
    pub(crate) fn new(config: Weak<ProjectConfig>) -> Self {
        Self {
            config,
            callbacks: Mutex::new(EventSinks::new()),
        }
    }

    pub fn project_config(&self) -> Option<Arc<ProjectConfig>> {
        self.config.upgrade()
    }

    pub fn advise_build_status(&self, callback: Arc<dyn BuildStatusCallback>) -> Cookie {
        self.callbacks.lock().add(callback)
    }

    pub fn unadvise_build_status(&self, cookie: Cookie) -> bool {
        self.callbacks.lock().remove(cookie)
    }

    pub fn query_start_build(&self) -> BuildReadiness {
        self.readiness()
    }

    pub fn query_start_clean(&self) -> BuildReadiness {
        self.readiness()
    }

    pub fn query_start_up_to_date_check(&self) -> BuildReadiness {
        self.readiness()
    }

    /// True when no build is running
    pub fn query_status(&self) -> bool {
        !self.is_busy()
    }

    pub fn start_build(&self, rebuild: bool) -> Result<bool> {
        let config = self.config()?;
        let settings = config.project().settings();
        let target = if rebuild {
            &settings.rebuild_target
        } else {
            &settings.build_target
        };
        self.run(&config, target)
    }

    pub fn start_clean(&self) -> Result<bool> {
        let config = self.config()?;
        let target = &config.project().settings().clean_target;
        self.run(&config, target)
    }

    pub fn start_up_to_date_check(&self) -> Result<bool> {
        Ok(self.config()?.is_up_to_date())
    }

    fn config(&self) -> Result<Arc<ProjectConfig>> {
        self.config
            .upgrade()
            .ok_or_else(|| Error::ConfigurationNotFound("configuration was dropped".to_string()))
    }

    fn is_busy(&self) -> bool {
        self.config
            .upgrade()
            .is_some_and(|config| config.project().build_in_progress())
    }

    fn readiness(&self) -> BuildReadiness {
        BuildReadiness {
            supported: true,
            ready: !self.is_busy(),
        }
    }

    fn run(&self, config: &ProjectConfig, target: &str) -> Result<bool> {
        let callbacks = self.callbacks.lock().snapshot();
        if !callbacks.iter().all(|callback| callback.build_begin()) {
            info!("Build of {} cancelled", target);
            return Ok(false);
        }

        let success = config.project().build(&config.name(), target);
        for callback in &callbacks {
            callback.build_end(success);
        }
        Ok(success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Project, TargetDefinition};
    use crate::services::DocumentEvaluator;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Recorder {
        cancel: bool,
        ended: Mutex<Vec<bool>>,
    }

    impl BuildStatusCallback for Recorder {
        fn build_begin(&self) -> bool {
            !self.cancel
        }

        fn build_end(&self, success: bool) {
            self.ended.lock().push(success);
        }
    }

    fn config() -> Arc<ProjectConfig> {
        let targets = BTreeMap::from([
            ("CoreCompile".to_string(), TargetDefinition::default()),
            ("Build".to_string(), TargetDefinition::default()),
            (
                "Rebuild".to_string(),
                TargetDefinition {
                    fails: true,
                    ..Default::default()
                },
            ),
        ]);
        let project = Project::builder("/work/App")
            .evaluator(Arc::new(DocumentEvaluator::new(targets)))
            .build();
        ProjectConfig::new(project, "Debug").unwrap()
    }

    #[test]
    fn test_build_notifies_callbacks() {
        let config = config();
        let buildable = config.buildable().unwrap();
        let recorder = Arc::new(Recorder::default());
        let cookie = buildable.advise_build_status(recorder.clone());

        assert_eq!(
            buildable.query_start_build(),
            BuildReadiness {
                supported: true,
                ready: true
            }
        );
        assert!(buildable.start_build(false).unwrap());
        assert!(!buildable.start_build(true).unwrap());
        assert!(!buildable.start_clean().unwrap());
        assert_eq!(*recorder.ended.lock(), vec![true, false, false]);

        assert!(buildable.unadvise_build_status(cookie));
        buildable.start_build(false).unwrap();
        assert_eq!(recorder.ended.lock().len(), 3);
        assert!(buildable.query_status());
    }

    #[test]
    fn test_cancelled_build_does_not_run() {
        let config = config();
        let buildable = config.buildable().unwrap();
        let recorder = Arc::new(Recorder {
            cancel: true,
            ..Default::default()
        });
        buildable.advise_build_status(recorder.clone());

        assert!(!buildable.start_build(false).unwrap());
        assert!(recorder.ended.lock().is_empty());
    }

    #[test]
    fn test_up_to_date_check_without_outputs() {
        let config = config();
        let buildable = config.buildable().unwrap();
        assert!(buildable.start_up_to_date_check().unwrap());
        assert!(buildable.query_start_clean().ready);
        assert!(buildable.query_start_up_to_date_check().supported);
    }
}
