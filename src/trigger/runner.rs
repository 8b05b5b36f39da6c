use log::{error, info, warn};

use crate::dialog::client::PromptService;

use super::agent::DeploymentAgent;

/// Printed by the agent when no policy is scoped to the trigger.
pub const NO_POLICY_MARKER: &str = "No policies were found for the";
/// Printed by the agent once a policy ran and its log was submitted.
pub const SUBMITTED_MARKER: &str = "Submitting log to";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Success,
    NotFound,
    /// Neither marker was seen, or the agent could not be run at all.
    Unknown,
}

impl TriggerOutcome {
    pub fn classify(output: &str) -> Self {
        if output.contains(NO_POLICY_MARKER) {
            TriggerOutcome::NotFound
        } else if output.contains(SUBMITTED_MARKER) {
            TriggerOutcome::Success
        } else {
            TriggerOutcome::Unknown
        }
    }

    pub fn is_success(self) -> bool {
        self == TriggerOutcome::Success
    }
}

/// Runs deployment triggers, optionally behind a progress bar.
pub struct TriggerRunner<'a> {
    agent: &'a dyn DeploymentAgent,
    prompt: &'a dyn PromptService,
}

impl<'a> TriggerRunner<'a> {
    pub fn new(agent: &'a dyn DeploymentAgent, prompt: &'a dyn PromptService) -> Self {
        Self { agent, prompt }
    }

    pub fn run(&self, trigger: &str, quiet: bool) -> TriggerOutcome {
        let progress = if quiet {
            None
        } else {
            self.prompt.start_progress()
                .inspect_err(|e| warn!("Could not show progress indicator: {e}"))
                .ok()
        };

        let result = self.agent.execute(trigger);
        drop(progress);

        let outcome = match result {
            Ok(output) => TriggerOutcome::classify(&output),
            Err(e) => {
                error!("Could not run policy trigger {trigger}: {e}");
                TriggerOutcome::Unknown
            }
        };

        match outcome {
            TriggerOutcome::Success => info!("Successfully ran policy via trigger {trigger}"),
            TriggerOutcome::NotFound => error!("Unable to run policy via trigger {trigger}"),
            TriggerOutcome::Unknown => warn!("Policy trigger {trigger} gave no recognised result, treating it as failed"),
        }

        outcome
    }
}
