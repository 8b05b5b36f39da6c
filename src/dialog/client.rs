use std::{path::PathBuf, process::{Child, Command, Stdio}};

use log::info;
use snafu::{ResultExt, Snafu};

use super::models::{Selection, CANCEL_BUTTON, CONFIRM_BUTTON};

const SELECT_TITLE: &str = "Select Print Queue";
const SELECT_TEXT: &str = "Choose a print queue to add to your computer:";
const PROGRESS_TITLE: &str = "Please wait...";
const PROGRESS_TEXT: &str = "Installing software...";

/// Modal prompts shown to the operator.
pub trait PromptService {
    /// Whether the prompt tool is present on this host.
    fn is_installed(&self) -> bool;

    fn show_message(&self, heading: &str, text: &str) -> Result<(), PromptError>;

    /// Shows an indeterminate progress bar until the returned guard is dropped.
    fn start_progress(&self) -> Result<ProgressIndicator, PromptError>;

    fn select(&self, items: &[String]) -> Result<Selection, PromptError>;
}

/// A running progress bar. Dropping it tears the bar down.
pub struct ProgressIndicator {
    child: Option<Child>,
}

impl ProgressIndicator {
    pub fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    /// An indicator with no display process behind it.
    pub fn detached() -> Self {
        Self { child: None }
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

pub struct CocoaDialog {
    path: PathBuf,
    window_title: String,
    brand_icon: String,
}

impl CocoaDialog {
    pub fn new(path: PathBuf, window_title: String, brand_icon: String) -> Self {
        Self { path, window_title, brand_icon }
    }
}

impl PromptService for CocoaDialog {
    fn is_installed(&self) -> bool {
        self.path.exists()
    }

    fn show_message(&self, heading: &str, text: &str) -> Result<(), PromptError> {
        Command::new(&self.path)
            .args(["ok-msgbox",
                "--title", self.window_title.as_str(),
                "--text", heading,
                "--informative-text", text,
                "--icon-file", self.brand_icon.as_str(),
                "--float", "--no-cancel"])
            .output()
            .context(LaunchSnafu { program: &self.path })?;
        Ok(())
    }

    fn start_progress(&self) -> Result<ProgressIndicator, PromptError> {
        let child = Command::new(&self.path)
            .args(["progressbar", "--title", PROGRESS_TITLE, "--text", PROGRESS_TEXT, "--float", "--indeterminate"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(LaunchSnafu { program: &self.path })?;
        Ok(ProgressIndicator::new(child))
    }

    fn select(&self, items: &[String]) -> Result<Selection, PromptError> {
        info!("Prompting user to select desired queue");
        let output = Command::new(&self.path)
            .args(["dropdown", "--string-output", "--float",
                "--icon", "gear",
                "--title", SELECT_TITLE,
                "--text", SELECT_TEXT,
                "--button1", CONFIRM_BUTTON,
                "--button2", CANCEL_BUTTON,
                "--items"])
            .args(items)
            .output()
            .context(LaunchSnafu { program: &self.path })?;

        Selection::from_dropdown_output(&String::from_utf8_lossy(&output.stdout))
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PromptError {
    #[snafu(display("Could not launch {}", program.display()))]
    Launch { program: PathBuf, source: std::io::Error },

    #[snafu(display("Unexpected prompt response: {output:?}"))]
    MalformedOutput { output: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_dialog() -> CocoaDialog {
        CocoaDialog::new(PathBuf::from("/nonexistent/cocoaDialog"), "Printers".to_string(), String::new())
    }

    #[test]
    fn missing_tool_is_not_installed() {
        assert!(!missing_dialog().is_installed());
    }

    #[test]
    fn missing_tool_fails_to_launch() {
        assert!(matches!(missing_dialog().show_message("Error", "text"), Err(PromptError::Launch { .. })));
        assert!(matches!(missing_dialog().start_progress(), Err(PromptError::Launch { .. })));
        assert!(matches!(missing_dialog().select(&["HP-Color".to_string()]), Err(PromptError::Launch { .. })));
    }

    #[test]
    fn detached_indicator_drops_cleanly() {
        drop(ProgressIndicator::detached());
    }
}
