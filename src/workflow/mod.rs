pub mod error;
pub mod selection;

use log::{error, info, warn};
use snafu::{ensure, OptionExt, ResultExt};

use crate::{
    catalog::{loading::CatalogError, models::QueueCatalog},
    config::models::{Messages, Settings},
    cups_client::{client::Spooler, models::QueueRegistration},
    dialog::{client::PromptService, models::Selection},
    directory::{client::Directory, groups::GroupResolver},
    driver::DriverResolver,
    eligibility::{AttributeFilter, EligibleQueueList},
    trigger::{agent::DeploymentAgent, runner::TriggerRunner},
};

use error::{
    DirectoryLookupSnafu, DriverInstallSnafu, InstalledQueuesSnafu, NoEligibleQueuesSnafu, RegistrationSnafu,
    UnknownQueueSnafu, WorkflowError,
};
use selection::SelectionProvider;

/// What the operator asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    pub username: Option<String>,
    pub preselected: Option<String>,
    pub filter: Option<AttributeFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed { queue: String },
    Cancelled,
}

/// The external services a run talks to.
pub struct Collaborators<'a> {
    pub spooler: &'a dyn Spooler,
    pub directory: &'a dyn Directory,
    pub prompt: &'a dyn PromptService,
    pub agent: &'a dyn DeploymentAgent,
}

pub struct Workflow<'a> {
    settings: &'a Settings,
    catalog: &'a QueueCatalog,
    services: Collaborators<'a>,
}

impl<'a> Workflow<'a> {
    pub fn new(settings: &'a Settings, catalog: &'a QueueCatalog, services: Collaborators<'a>) -> Self {
        Self { settings, catalog, services }
    }

    /// Runs every stage to completion. Any terminal outcome has been
    /// logged and shown to the operator by the time this returns.
    pub fn run(&self, request: &InstallRequest) -> Result<Outcome, WorkflowError> {
        let result = self.execute(request);

        match &result {
            Ok(Outcome::Installed { queue }) => {
                info!("Queue {queue} successfully mapped");
                self.notify("Success!", &Messages::render(&self.settings.messages.success_queue_added, queue));
            }
            Ok(Outcome::Cancelled) => info!("Nothing installed"),
            Err(e) => self.report(e),
        }

        result
    }

    fn execute(&self, request: &InstallRequest) -> Result<Outcome, WorkflowError> {
        let user = GroupResolver::new(self.services.directory, self.settings.ldap.group_name_format())
            .resolve(request.username.as_deref())
            .context(DirectoryLookupSnafu)?;
        info!("Resolved {} groups for {:?} (credential: {})", user.groups.len(), user.username, user.has_credential);

        let installed = self.services.spooler.installed_queues().context(InstalledQueuesSnafu)?;
        if installed.is_empty() {
            info!("No queues currently mapped");
        } else {
            info!("{} queues currently mapped", installed.len());
        }

        let eligible = EligibleQueueList::compute(self.catalog, &installed, request.filter.as_ref(), &user);
        ensure!(!eligible.is_empty(), NoEligibleQueuesSnafu);

        let runner = TriggerRunner::new(self.services.agent, self.services.prompt);
        let selector = SelectionProvider::new(
            self.services.prompt,
            &runner,
            self.settings.dialog.path.display().to_string(),
            &self.settings.dialog.install_trigger,
        );
        let selected = match selector.select(&eligible, request.preselected.as_deref())? {
            Selection::Chosen(queue) => queue,
            Selection::Cancelled => return Ok(Outcome::Cancelled),
        };

        let queue = self.catalog.by_display_name(&selected).context(UnknownQueueSnafu { queue: &selected })?;
        let driver = DriverResolver::new(&runner, &self.settings.default_driver)
            .resolve(queue)
            .context(DriverInstallSnafu)?;

        let registration = QueueRegistration {
            name: queue.display_name.clone(),
            location: queue.location.clone(),
            uri: queue.uri.clone(),
            driver,
            options: queue.options.clone(),
        };
        self.services.spooler.register(&registration).context(RegistrationSnafu { queue: &queue.display_name })?;

        Ok(Outcome::Installed { queue: selected })
    }

    fn report(&self, e: &WorkflowError) {
        match e.exit_code() {
            0 => warn!("{e}"),
            _ => {
                error!("{}", snafu::Report::from_error(e));
                error!("An error occurred which requires exiting this program.");
            }
        }

        if let Some(message) = e.operator_message(&self.settings.messages) {
            self.notify(&self.settings.dialog.window_title, &message);
        }
    }

    fn notify(&self, heading: &str, text: &str) {
        notify(self.services.prompt, heading, text);
    }
}

/// Loads the configured queue catalog. The operator is told when it cannot be loaded.
pub fn load_catalog(settings: &Settings, prompt: &dyn PromptService) -> Result<QueueCatalog, CatalogError> {
    crate::catalog::loading::load_catalog(&settings.catalog.path).inspect_err(|e| {
        error!("{}", snafu::Report::from_error(e));
        notify(prompt, &settings.dialog.window_title, &settings.messages.error_undefined);
    })
}

fn notify(prompt: &dyn PromptService, heading: &str, text: &str) {
    if let Err(e) = prompt.show_message(heading, text) {
        warn!("Could not show message to the user: {e}");
    }
}
