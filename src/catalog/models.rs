use std::{collections::BTreeMap, path::{Path, PathBuf}};

use serde_derive::Deserialize;
use serde_json::Value;

// //////////// //
// Catalog file //
// //////////// //

/// A queue entry as it appears in the catalog file. Validated into a
/// [`QueueDefinition`] by the loader.
#[derive(Debug, Deserialize)]
pub struct RawQueueDefinition {
    #[serde(rename = "DisplayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "CUPSName", default)]
    pub cups_name: Option<String>,
    #[serde(rename = "URI", default)]
    pub uri: Option<String>,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "Driver", default)]
    pub driver: Option<String>,
    #[serde(rename = "DriverTrigger", default)]
    pub driver_trigger: Option<String>,
    #[serde(rename = "Options", default)]
    pub options: Option<BTreeMap<String, Value>>,
    #[serde(rename = "ADFilterGroup", default)]
    pub ad_filter_group: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

// ///////////////// //
// Validated catalog //
// ///////////////// //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverSpec {
    /// The configured generic driver is used.
    Generic,
    /// A vendor driver, installable through `trigger` when missing on disk.
    Vendor { path: PathBuf, trigger: String },
}

#[derive(Debug, Clone)]
pub struct QueueDefinition {
    pub identifier: String,
    pub display_name: String,
    pub cups_name: Option<String>,
    pub uri: String,
    pub location: String,
    pub driver: DriverSpec,
    pub options: BTreeMap<String, String>,
    pub ad_filter_group: Option<String>,
    /// Catalog keys with no dedicated field, kept for attribute filtering.
    pub attributes: BTreeMap<String, Value>,
}

impl QueueDefinition {
    /// Looks up an attribute by its catalog key. Absent and empty values
    /// are both reported as `None`.
    pub fn attribute(&self, key: &str) -> Option<String> {
        let value = match key {
            "DisplayName" => Some(self.display_name.clone()),
            "CUPSName" => self.cups_name.clone(),
            "URI" => Some(self.uri.clone()),
            "Location" => Some(self.location.clone()),
            "Driver" => self.vendor_driver().map(|path| path.display().to_string()),
            "DriverTrigger" => match &self.driver {
                DriverSpec::Vendor { trigger, .. } => Some(trigger.clone()),
                DriverSpec::Generic => None,
            },
            "ADFilterGroup" => self.ad_filter_group.clone(),
            "Options" => None,
            other => self.attributes.get(other).and_then(|value| match value {
                Value::Null | Value::Bool(false) => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        };

        value.filter(|v| !v.is_empty())
    }

    pub fn vendor_driver(&self) -> Option<&Path> {
        match &self.driver {
            DriverSpec::Vendor { path, .. } => Some(path),
            DriverSpec::Generic => None,
        }
    }
}

/// All installable queues, keyed by catalog identifier.
#[derive(Debug, Clone, Default)]
pub struct QueueCatalog {
    queues: BTreeMap<String, QueueDefinition>,
}

impl QueueCatalog {
    pub(super) fn new(queues: BTreeMap<String, QueueDefinition>) -> Self {
        Self { queues }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueDefinition> {
        self.queues.values()
    }

    pub fn by_display_name(&self, display_name: &str) -> Option<&QueueDefinition> {
        self.queues.values().find(|q| q.display_name == display_name)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
