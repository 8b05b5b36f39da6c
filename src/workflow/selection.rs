use log::{info, warn};
use snafu::{ensure, ResultExt};

use crate::{
    dialog::{client::PromptService, models::Selection},
    eligibility::EligibleQueueList,
    trigger::runner::TriggerRunner,
};

use super::error::{DependencyMissingSnafu, InvalidPreselectionSnafu, PromptSnafu, UnknownQueueSnafu, WorkflowError};

/// Decides which eligible queue gets installed.
pub struct SelectionProvider<'a> {
    prompt: &'a dyn PromptService,
    runner: &'a TriggerRunner<'a>,
    prompt_name: String,
    install_trigger: &'a str,
}

impl<'a> SelectionProvider<'a> {
    pub fn new(prompt: &'a dyn PromptService, runner: &'a TriggerRunner<'a>, prompt_name: String, install_trigger: &'a str) -> Self {
        Self { prompt, runner, prompt_name, install_trigger }
    }

    /// A pre-selected queue must be eligible; there is no fallback to
    /// prompting. Without one, the operator chooses interactively.
    pub fn select(&self, eligible: &EligibleQueueList, preselected: Option<&str>) -> Result<Selection, WorkflowError> {
        if let Some(queue) = preselected {
            ensure!(eligible.contains(queue), InvalidPreselectionSnafu { queue });
            info!("Using pre-selected queue {queue}");
            return Ok(Selection::Chosen(queue.to_string()));
        }

        self.ensure_prompt_installed()?;

        let selection = self.prompt.select(eligible.as_slice()).context(PromptSnafu)?;
        match &selection {
            Selection::Chosen(queue) => {
                ensure!(eligible.contains(queue), UnknownQueueSnafu { queue });
                info!("User selected queue {queue}");
            }
            Selection::Cancelled => info!("User canceled queue selection"),
        }

        Ok(selection)
    }

    fn ensure_prompt_installed(&self) -> Result<(), WorkflowError> {
        if self.prompt.is_installed() {
            return Ok(());
        }

        warn!("{} not found, installing it via policy trigger {}", self.prompt_name, self.install_trigger);
        ensure!(self.runner.run(self.install_trigger, true).is_success(), DependencyMissingSnafu {
            dependency: &self.prompt_name,
        });
        Ok(())
    }
}
