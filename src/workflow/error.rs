use snafu::Snafu;

use crate::{
    config::models::Messages,
    cups_client::client::SpoolerError,
    dialog::client::PromptError,
    directory::client::DirectoryError,
    driver::DriverError,
};

/// Every way a run can end without installing a queue, cancellation aside.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum WorkflowError {
    #[snafu(display("Required tool {dependency} is missing and could not be installed"))]
    DependencyMissing { dependency: String },

    #[snafu(display("No currently-unmapped queues are available"))]
    NoEligibleQueues,

    #[snafu(display("Pre-selected queue {queue} is not available"))]
    InvalidPreselection { queue: String },

    #[snafu(display("Could not look up the user's directory groups"))]
    DirectoryLookup { source: DirectoryError },

    #[snafu(display("Could not list the currently mapped queues"))]
    InstalledQueues { source: SpoolerError },

    #[snafu(display("Could not prompt for a queue"))]
    Prompt { source: PromptError },

    #[snafu(display("Selected queue {queue} is not available"))]
    UnknownQueue { queue: String },

    #[snafu(display("Could not provide a driver"))]
    DriverInstall { source: DriverError },

    #[snafu(display("There was a problem mapping queue {queue}"))]
    Registration { queue: String, source: SpoolerError },
}

impl WorkflowError {
    /// Running out of queues is a normal way for a run to end.
    pub fn exit_code(&self) -> u8 {
        match self {
            WorkflowError::NoEligibleQueues => 0,
            _ => 1,
        }
    }

    /// Text for the operator. `None` when the prompt tool itself is what is missing.
    pub fn operator_message(&self, messages: &Messages) -> Option<String> {
        let message = match self {
            WorkflowError::DependencyMissing { .. } => return None,
            WorkflowError::NoEligibleQueues => messages.error_no_queues_available.clone(),
            WorkflowError::InvalidPreselection { queue } => Messages::render(&messages.error_preselected_queue, queue),
            WorkflowError::DirectoryLookup { .. } => messages.error_directory.clone(),
            WorkflowError::DriverInstall { .. } => messages.error_driver_failure.clone(),
            WorkflowError::Registration { .. } => messages.error_unable_map_queue.clone(),
            WorkflowError::InstalledQueues { .. }
            | WorkflowError::Prompt { .. }
            | WorkflowError::UnknownQueue { .. } => messages.error_undefined.clone(),
        };
        Some(message)
    }
}
