use std::path::{Path, PathBuf};

use log::{info, warn};
use snafu::{ensure, Snafu};

use crate::{
    catalog::models::{DriverSpec, QueueDefinition},
    trigger::runner::TriggerRunner,
};

/// Picks the driver a queue is registered with, installing a missing
/// vendor driver through its trigger. The install is attempted once; a
/// successful trigger is trusted without checking the disk again.
pub struct DriverResolver<'a> {
    runner: &'a TriggerRunner<'a>,
    default_driver: &'a Path,
}

impl<'a> DriverResolver<'a> {
    pub fn new(runner: &'a TriggerRunner<'a>, default_driver: &'a Path) -> Self {
        Self { runner, default_driver }
    }

    pub fn resolve(&self, queue: &QueueDefinition) -> Result<PathBuf, DriverError> {
        let (path, trigger) = match &queue.driver {
            DriverSpec::Generic => {
                info!("{} uses a generic driver", queue.display_name);
                return Ok(self.default_driver.to_path_buf());
            }
            DriverSpec::Vendor { path, trigger } => (path, trigger),
        };

        info!("Queue {} requires a vendor driver", queue.display_name);
        if !path.exists() {
            warn!("The driver was not found at {}", path.display());
            info!("Attempting to install drivers via policy trigger {trigger}");
            ensure!(self.runner.run(trigger, false).is_success(), InstallFailedSnafu {
                queue: &queue.display_name,
                trigger,
            });
        }

        Ok(path.clone())
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
pub enum DriverError {
    #[snafu(display("Driver for {queue} could not be installed via trigger {trigger}"))]
    InstallFailed { queue: String, trigger: String },
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use crate::{catalog::loading::parse_catalog, testing::{FakeAgent, FakePrompt}};

    use super::*;

    fn vendor_queue(driver: &str) -> QueueDefinition {
        let content = format!(
            r#"{{ "q": {{ "DisplayName": "Q", "URI": "lpd://h/q", "Location": "", "Driver": "{driver}", "DriverTrigger": "q-driver" }} }}"#
        );
        parse_catalog(&content).unwrap().by_display_name("Q").unwrap().clone()
    }

    #[test]
    fn generic_queue_uses_default_driver() {
        let agent = FakeAgent::unlaunchable();
        let prompt = FakePrompt::installed();
        let runner = TriggerRunner::new(&agent, &prompt);
        let resolver = DriverResolver::new(&runner, Path::new("/generic.ppd"));

        let queue = parse_catalog(r#"{ "q": { "DisplayName": "Q", "URI": "lpd://h/q", "Location": "" } }"#).unwrap();
        let driver = resolver.resolve(queue.by_display_name("Q").unwrap()).unwrap();

        assert_eq!(driver, PathBuf::from("/generic.ppd"));
        assert!(agent.triggers.borrow().is_empty());
    }

    #[test]
    fn present_vendor_driver_is_used_as_is() {
        let ppd = NamedTempFile::new().unwrap();
        let agent = FakeAgent::unlaunchable();
        let prompt = FakePrompt::installed();
        let runner = TriggerRunner::new(&agent, &prompt);
        let resolver = DriverResolver::new(&runner, Path::new("/generic.ppd"));

        let driver = resolver.resolve(&vendor_queue(&ppd.path().display().to_string())).unwrap();

        assert_eq!(driver, ppd.path());
        assert!(agent.triggers.borrow().is_empty());
    }

    #[test]
    fn missing_vendor_driver_is_installed_and_trusted() {
        let agent = FakeAgent::replying("Executing Policy Xerox Drivers...\nSubmitting log to https://jss.example.com/");
        let prompt = FakePrompt::installed();
        let runner = TriggerRunner::new(&agent, &prompt);
        let resolver = DriverResolver::new(&runner, Path::new("/generic.ppd"));

        let driver = resolver.resolve(&vendor_queue("/opt/drv/x.ppd")).unwrap();

        assert_eq!(driver, PathBuf::from("/opt/drv/x.ppd"));
        assert_eq!(*agent.triggers.borrow(), vec!["q-driver"]);
        assert_eq!(prompt.progress_shown.get(), 1);
    }

    #[test]
    fn failed_install_is_an_error() {
        let agent = FakeAgent::replying("No policies were found for the \"q-driver\" trigger.");
        let prompt = FakePrompt::installed();
        let runner = TriggerRunner::new(&agent, &prompt);
        let resolver = DriverResolver::new(&runner, Path::new("/generic.ppd"));

        let err = resolver.resolve(&vendor_queue("/opt/drv/x.ppd")).unwrap_err();

        assert!(matches!(err, DriverError::InstallFailed { ref trigger, .. } if trigger == "q-driver"));
        assert_eq!(agent.triggers.borrow().len(), 1);
    }
}
