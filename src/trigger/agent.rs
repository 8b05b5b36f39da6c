use std::{path::PathBuf, process::Command};

use log::debug;
use snafu::{ResultExt, Snafu};

/// Executes named deployment actions ("policy triggers").
pub trait DeploymentAgent {
    /// Runs `trigger` to completion and returns its stdout and stderr, concatenated.
    fn execute(&self, trigger: &str) -> Result<String, AgentError>;
}

pub struct JamfAgent {
    path: PathBuf,
}

impl JamfAgent {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DeploymentAgent for JamfAgent {
    fn execute(&self, trigger: &str) -> Result<String, AgentError> {
        debug!("Running {} policy -event {trigger}", self.path.display());
        let output = Command::new(&self.path)
            .args(["policy", "-event", trigger])
            .output()
            .context(LaunchSnafu { program: &self.path })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AgentError {
    #[snafu(display("Could not launch {}", program.display()))]
    Launch { program: PathBuf, source: std::io::Error },
}
