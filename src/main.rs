use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::{debug, error, warn};

mod catalog;
mod cli;
mod config;
mod cups_client;
mod dialog;
mod directory;
mod driver;
mod eligibility;
mod trigger;
mod workflow;

#[cfg(test)]
mod testing;

fn main() -> ExitCode {
    colog::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:?}");
            error!("An error occurred which requires exiting this program.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    debug!("Invoked on {:?} (mount point {:?})", cli.hostname, cli.mount_point);

    let settings = config::loading::load_config().context("Could not load settings")?;
    let prompt = dialog::client::CocoaDialog::new(
        settings.dialog.path.clone(),
        settings.dialog.window_title.clone(),
        settings.dialog.brand_icon.clone(),
    );
    let catalog = workflow::load_catalog(&settings, &prompt).context("Could not load the queue catalog")?;
    if catalog.is_empty() {
        warn!("The queue catalog at {} defines no queues", settings.catalog.path.display());
    }

    let tools = &settings.tools;
    let spooler = cups_client::client::LpSpooler::new(tools.lpstat.clone(), tools.lpadmin.clone());
    let directory = directory::client::LdapDirectory::new(
        tools.klist.clone(),
        tools.ldapsearch.clone(),
        settings.ldap.server.clone(),
        settings.ldap.search_base.clone(),
    );
    let agent = trigger::agent::JamfAgent::new(tools.jamf.clone());

    let services = workflow::Collaborators {
        spooler: &spooler,
        directory: &directory,
        prompt: &prompt,
        agent: &agent,
    };

    Ok(match workflow::Workflow::new(&settings, &catalog, services).run(&cli.into_request()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code()),
    })
}
