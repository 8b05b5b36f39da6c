use base64::{engine::general_purpose::STANDARD, Engine};
use log::{error, info, warn};

use super::client::{Directory, DirectoryError};

/// Matching rule OID for transitive group membership (LDAP_MATCHING_RULE_IN_CHAIN).
const IN_CHAIN_RULE: &str = "1.2.840.113556.1.4.1941";

/// The operator and the directory groups they belong to, resolved once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    pub username: Option<String>,
    pub has_credential: bool,
    pub groups: Vec<String>,
}

impl UserContext {
    /// A user whose groups could not be looked up.
    pub fn anonymous(username: Option<&str>) -> Self {
        Self { username: username.map(str::to_string), has_credential: false, groups: Vec::new() }
    }

    /// A user holding a credential whose groups could not be resolved.
    pub fn without_groups(username: Option<&str>) -> Self {
        Self { username: username.map(str::to_string), has_credential: true, groups: Vec::new() }
    }

    pub fn with_groups(username: &str, groups: Vec<String>) -> Self {
        Self { username: Some(username.to_string()), has_credential: true, groups }
    }

    pub fn is_member(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

pub struct GroupResolver<'a> {
    directory: &'a dyn Directory,
    group_name_format: Option<&'a str>,
}

impl<'a> GroupResolver<'a> {
    pub fn new(directory: &'a dyn Directory, group_name_format: Option<&'a str>) -> Self {
        Self { directory, group_name_format }
    }

    /// Resolves all groups `username` is a member of, nested ones included.
    /// Without a credential or a known user the group list is empty.
    pub fn resolve(&self, username: Option<&str>) -> Result<UserContext, DirectoryError> {
        info!("Generating list of user's AD groups");

        if !self.directory.has_credential() {
            warn!("Kerberos ticket not found. AD group filtering disabled.");
            return Ok(UserContext::anonymous(username));
        }

        let Some(username) = username else {
            warn!("No username supplied. AD group filtering disabled.");
            return Ok(UserContext::without_groups(None));
        };

        let user_filter = format!(
            "(&(objectCategory=Person)(objectClass=User)(sAMAccountName={}))",
            escape_filter_value(username)
        );
        let dn_lines = self.search(&user_filter, "dn")?;
        let Some(user_dn) = attribute_values(&dn_lines, "dn").into_iter().next() else {
            warn!("User {username} was not found in the directory. AD group filtering disabled.");
            return Ok(UserContext::without_groups(Some(username)));
        };

        let mut group_filter = format!("(member:{IN_CHAIN_RULE}:={})", escape_filter_value(&user_dn));
        if let Some(format) = self.group_name_format {
            group_filter = format!("(&{group_filter}(cn={format}))");
        }

        let groups = attribute_values(&self.search(&group_filter, "cn")?, "cn");
        info!("User {username} is a member of {} groups", groups.len());

        Ok(UserContext::with_groups(username, groups))
    }

    fn search(&self, filter: &str, attribute: &str) -> Result<Vec<String>, DirectoryError> {
        self.directory.search(filter, attribute).inspect_err(|e| {
            if e.is_authorization() {
                error!(target: "directory::auth", "Encountered an authentication error while searching ldap: {e}");
            } else {
                error!(target: "directory", "Unknown error searching ldap: {e}");
            }
        })
    }
}

/// Values of the given attribute in LDIF output. Values that are not plain
/// ASCII arrive base64 encoded as `attribute:: <data>`.
fn attribute_values(lines: &[String], attribute: &str) -> Vec<String> {
    let plain = format!("{attribute}: ");
    let encoded = format!("{attribute}:: ");

    lines.iter()
        .filter_map(|line| {
            if let Some(value) = line.strip_prefix(plain.as_str()) {
                return Some(value.trim().to_string());
            }

            let data = line.strip_prefix(encoded.as_str())?.trim();
            match STANDARD.decode(data).map(String::from_utf8) {
                Ok(Ok(value)) => Some(value.trim().to_string()),
                _ => {
                    warn!("Skipping undecodable {attribute} value {data:?}");
                    None
                }
            }
        })
        .filter(|value| !value.is_empty())
        .collect()
}

/// Escapes a value for use inside an LDAP search filter (RFC 4515).
fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\\' => escaped.push_str("\\5c"),
            '\0' => escaped.push_str("\\00"),
            c => escaped.push(c),
        }
    }
    escaped
}
