//! In-memory stand-ins for the external collaborators.

use std::{cell::{Cell, RefCell}, collections::VecDeque, path::PathBuf};

use crate::{
    cups_client::{client::{Spooler, SpoolerError}, models::{InstalledQueueSet, QueueRegistration}},
    dialog::{client::{PromptError, PromptService, ProgressIndicator}, models::Selection},
    directory::client::{Directory, DirectoryError},
    trigger::agent::{AgentError, DeploymentAgent},
};

pub struct FakeDirectory {
    credential: bool,
    responses: RefCell<VecDeque<Result<Vec<String>, DirectoryError>>>,
    pub searches: RefCell<Vec<(String, String)>>,
}

impl FakeDirectory {
    pub fn with_credential() -> Self {
        Self { credential: true, responses: Default::default(), searches: Default::default() }
    }

    pub fn without_credential() -> Self {
        Self { credential: false, ..Self::with_credential() }
    }

    pub fn respond(self, response: Result<Vec<String>, DirectoryError>) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }
}

impl Directory for FakeDirectory {
    fn has_credential(&self) -> bool {
        self.credential
    }

    fn search(&self, filter: &str, attribute: &str) -> Result<Vec<String>, DirectoryError> {
        self.searches.borrow_mut().push((filter.to_string(), attribute.to_string()));
        self.responses.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

pub struct FakeSpooler {
    installed: Vec<String>,
    reject: bool,
    pub registrations: RefCell<Vec<QueueRegistration>>,
}

impl FakeSpooler {
    pub fn with_installed(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            reject: false,
            registrations: Default::default(),
        }
    }

    pub fn rejecting(self) -> Self {
        Self { reject: true, ..self }
    }
}

impl Spooler for FakeSpooler {
    fn installed_queues(&self) -> Result<InstalledQueueSet, SpoolerError> {
        Ok(self.installed.iter().cloned().collect())
    }

    fn register(&self, registration: &QueueRegistration) -> Result<(), SpoolerError> {
        self.registrations.borrow_mut().push(registration.clone());
        match self.reject {
            true => Err(SpoolerError::Rejected { program: PathBuf::from("lpadmin"), code: Some(1), stderr: "lpadmin: Bad device-uri".to_string() }),
            false => Ok(()),
        }
    }
}

pub struct FakePrompt {
    installed: bool,
    selection: RefCell<Option<Result<Selection, PromptError>>>,
    pub messages: RefCell<Vec<(String, String)>>,
    pub offered: RefCell<Vec<Vec<String>>>,
    pub progress_shown: Cell<usize>,
}

impl FakePrompt {
    pub fn installed() -> Self {
        Self {
            installed: true,
            selection: RefCell::new(None),
            messages: Default::default(),
            offered: Default::default(),
            progress_shown: Cell::new(0),
        }
    }

    pub fn missing() -> Self {
        Self { installed: false, ..Self::installed() }
    }

    pub fn selecting(self, selection: Result<Selection, PromptError>) -> Self {
        *self.selection.borrow_mut() = Some(selection);
        self
    }
}

impl PromptService for FakePrompt {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn show_message(&self, heading: &str, text: &str) -> Result<(), PromptError> {
        self.messages.borrow_mut().push((heading.to_string(), text.to_string()));
        Ok(())
    }

    fn start_progress(&self) -> Result<ProgressIndicator, PromptError> {
        self.progress_shown.set(self.progress_shown.get() + 1);
        Ok(ProgressIndicator::detached())
    }

    fn select(&self, items: &[String]) -> Result<Selection, PromptError> {
        self.offered.borrow_mut().push(items.to_vec());
        self.selection.borrow_mut().take().unwrap_or(Ok(Selection::Cancelled))
    }
}

pub struct FakeAgent {
    output: Option<String>,
    pub triggers: RefCell<Vec<String>>,
}

impl FakeAgent {
    pub fn replying(output: &str) -> Self {
        Self { output: Some(output.to_string()), triggers: Default::default() }
    }

    pub fn unlaunchable() -> Self {
        Self { output: None, triggers: Default::default() }
    }
}

impl DeploymentAgent for FakeAgent {
    fn execute(&self, trigger: &str) -> Result<String, AgentError> {
        self.triggers.borrow_mut().push(trigger.to_string());
        self.output.clone().ok_or_else(|| AgentError::Launch {
            program: PathBuf::from("jamf"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
