use std::{path::PathBuf, process::Command};

use log::debug;
use snafu::{ResultExt, Snafu};

/// `ldapsearch` exit code for a rejected bind.
const AUTH_ERROR_CODE: i32 = 254;

/// Directory searches, available only while a credential is held.
pub trait Directory {
    fn has_credential(&self) -> bool;

    /// Runs `filter` against the search base and returns the raw
    /// `attribute: value` lines of the result.
    fn search(&self, filter: &str, attribute: &str) -> Result<Vec<String>, DirectoryError>;
}

/// Active Directory reached through `ldapsearch` with a Kerberos ticket.
pub struct LdapDirectory {
    klist: PathBuf,
    ldapsearch: PathBuf,
    server: String,
    search_base: String,
}

impl LdapDirectory {
    pub fn new(klist: PathBuf, ldapsearch: PathBuf, server: String, search_base: String) -> Self {
        Self { klist, ldapsearch, server, search_base }
    }
}

impl Directory for LdapDirectory {
    fn has_credential(&self) -> bool {
        Command::new(&self.klist).arg("-s").status().map(|status| status.success()).unwrap_or(false)
    }

    fn search(&self, filter: &str, attribute: &str) -> Result<Vec<String>, DirectoryError> {
        debug!("Searching {} for {filter}", self.server);
        let output = Command::new(&self.ldapsearch)
            .args(["-LLL", "-o", "ldif-wrap=no", "-H", self.server.as_str(), "-b", self.search_base.as_str(), filter, attribute])
            .output()
            .context(LaunchSnafu { program: &self.ldapsearch })?;

        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect()),
            Some(AUTH_ERROR_CODE) => UnauthorizedSnafu { code: AUTH_ERROR_CODE }.fail(),
            code => LookupSnafu { code }.fail(),
        }
    }
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DirectoryError {
    #[snafu(display("Directory refused the credential (error code: {code})"))]
    Unauthorized { code: i32 },

    #[snafu(display("Directory search failed (error code: {code:?})"))]
    Lookup { code: Option<i32> },

    #[snafu(display("Could not launch {}", program.display()))]
    Launch { program: PathBuf, source: std::io::Error },
}

impl DirectoryError {
    pub fn is_authorization(&self) -> bool {
        matches!(self, DirectoryError::Unauthorized { .. })
    }
}
