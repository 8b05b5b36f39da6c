use std::{path::PathBuf, process::Command};

use log::info;
use snafu::{ensure, ResultExt, Snafu};

use super::models::{InstalledQueueSet, QueueRegistration};

/// Query and registration primitives of the local print spooler.
pub trait Spooler {
    fn installed_queues(&self) -> Result<InstalledQueueSet, SpoolerError>;

    fn register(&self, registration: &QueueRegistration) -> Result<(), SpoolerError>;
}

/// CUPS administered through `lpstat` and `lpadmin`.
pub struct LpSpooler {
    lpstat: PathBuf,
    lpadmin: PathBuf,
}

impl LpSpooler {
    pub fn new(lpstat: PathBuf, lpadmin: PathBuf) -> Self {
        Self { lpstat, lpadmin }
    }
}

impl Spooler for LpSpooler {
    fn installed_queues(&self) -> Result<InstalledQueueSet, SpoolerError> {
        info!("Gathering list of currently mapped queues");
        let output = Command::new(&self.lpstat).arg("-p").output().context(LaunchSnafu { program: &self.lpstat })?;

        // lpstat exits non-zero when no destinations exist.
        if !output.status.success() {
            info!("No current print queues found");
            return Ok(InstalledQueueSet::default());
        }

        Ok(InstalledQueueSet::from_lpstat(&String::from_utf8_lossy(&output.stdout)))
    }

    fn register(&self, registration: &QueueRegistration) -> Result<(), SpoolerError> {
        let args = registration.args();
        info!("Executing command: {} {}", self.lpadmin.display(), args.join(" "));

        let output = Command::new(&self.lpadmin).args(&args).output().context(LaunchSnafu { program: &self.lpadmin })?;
        ensure!(output.status.success(), RejectedSnafu {
            program: &self.lpadmin,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });

        Ok(())
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SpoolerError {
    #[snafu(display("Could not launch {}", program.display()))]
    Launch { program: PathBuf, source: std::io::Error },

    #[snafu(display("{} exited with status {code:?}: {stderr}", program.display()))]
    Rejected { program: PathBuf, code: Option<i32>, stderr: String },
}
