use std::path::PathBuf;

use serde_derive::Deserialize;

// When changing anything here, make sure to add
// #[serde(alias = "ihavenounderscores")]
// where needed, so it can be read from the ENV vars.
// Settings files must use the underscore-free keys as well,
// otherwise they collide with the built-in defaults.

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tools {
    pub lpstat: PathBuf,
    pub lpadmin: PathBuf,
    pub jamf: PathBuf,
    pub klist: PathBuf,
    pub ldapsearch: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dialog {
    pub path: PathBuf,
    #[serde(alias = "installtrigger")]
    pub install_trigger: String,
    #[serde(alias = "windowtitle")]
    pub window_title: String,
    #[serde(alias = "brandicon")]
    pub brand_icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ldap {
    pub server: String,
    #[serde(alias = "searchbase")]
    pub search_base: String,
    /// `cn` pattern the group search is narrowed to. Empty disables narrowing.
    #[serde(alias = "groupnameformat")]
    pub group_name_format: String,
}

impl Ldap {
    pub fn group_name_format(&self) -> Option<&str> {
        Some(self.group_name_format.as_str()).filter(|f| !f.is_empty())
    }
}

/// Operator-facing texts. `{queue}` is replaced with the queue's DisplayName.
#[derive(Debug, Clone, Deserialize)]
pub struct Messages {
    #[serde(alias = "errorundefined")]
    pub error_undefined: String,
    #[serde(alias = "errornoqueuesavailable")]
    pub error_no_queues_available: String,
    #[serde(alias = "errorpreselectedqueue")]
    pub error_preselected_queue: String,
    #[serde(alias = "errordriverfailure")]
    pub error_driver_failure: String,
    #[serde(alias = "errorunablemapqueue")]
    pub error_unable_map_queue: String,
    #[serde(alias = "errordirectory")]
    pub error_directory: String,
    #[serde(alias = "successqueueadded")]
    pub success_queue_added: String,
}

impl Messages {
    pub fn render(template: &str, queue: &str) -> String {
        template.replace("{queue}", queue)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub catalog: Catalog,
    #[serde(alias = "defaultdriver")]
    pub default_driver: PathBuf,
    pub tools: Tools,
    pub dialog: Dialog,
    pub ldap: Ldap,
    pub messages: Messages,
}
