use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};

use log::{info, warn};
use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu};

use super::models::{DriverSpec, QueueCatalog, QueueDefinition, RawQueueDefinition};

pub fn load_catalog(path: &Path) -> Result<QueueCatalog, CatalogError> {
    let content = fs::read_to_string(path).context(ReadSnafu { path })?;
    let catalog = parse_catalog(&content)?;
    info!("Loaded {} queue definitions from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn parse_catalog(content: &str) -> Result<QueueCatalog, CatalogError> {
    let raw: BTreeMap<String, RawQueueDefinition> = serde_json::from_str(content).context(ParseSnafu)?;

    let mut queues = BTreeMap::new();
    let mut owners: BTreeMap<String, String> = BTreeMap::new();
    for (identifier, raw_queue) in raw {
        let queue = validate(identifier, raw_queue)?;

        if let Some(first) = owners.get(&queue.display_name) {
            return DuplicateDisplayNameSnafu {
                display_name: queue.display_name.clone(),
                first: first.clone(),
                second: queue.identifier.clone(),
            }.fail();
        }
        owners.insert(queue.display_name.clone(), queue.identifier.clone());
        queues.insert(queue.identifier.clone(), queue);
    }

    Ok(QueueCatalog::new(queues))
}

fn validate(identifier: String, raw: RawQueueDefinition) -> Result<QueueDefinition, CatalogError> {
    let display_name = non_empty(raw.display_name).context(MissingFieldSnafu { queue: &identifier, field: "DisplayName" })?;
    let uri = non_empty(raw.uri).context(MissingFieldSnafu { queue: &identifier, field: "URI" })?;
    let location = raw.location.context(MissingFieldSnafu { queue: &identifier, field: "Location" })?;

    url::Url::parse(&uri).context(InvalidUriSnafu { queue: &identifier, uri: &uri })?;

    let trigger = non_empty(raw.driver_trigger);
    let driver = match non_empty(raw.driver) {
        Some(path) => {
            let trigger = trigger.context(MissingDriverTriggerSnafu { queue: &identifier })?;
            DriverSpec::Vendor { path: PathBuf::from(path), trigger }
        }
        None => {
            if let Some(trigger) = trigger {
                warn!("Queue {identifier} uses the generic driver, ignoring DriverTrigger {trigger}");
            }
            DriverSpec::Generic
        }
    };

    let options = raw.options.unwrap_or_default().into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();

    Ok(QueueDefinition {
        identifier,
        display_name,
        cups_name: non_empty(raw.cups_name),
        uri,
        location,
        driver,
        options,
        ad_filter_group: non_empty(raw.ad_filter_group),
        attributes: raw.attributes,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ////// //
// Errors //
// ////// //

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CatalogError {
    #[snafu(display("Could not read queue catalog {}", path.display()))]
    Read { path: PathBuf, source: std::io::Error },

    #[snafu(display("Could not parse queue catalog"))]
    Parse { source: serde_json::Error },

    #[snafu(display("Queue {queue} is missing required field {field}"))]
    MissingField { queue: String, field: &'static str },

    #[snafu(display("Queue {queue} has an invalid URI '{uri}'"))]
    InvalidUri { queue: String, uri: String, source: url::ParseError },

    #[snafu(display("Queue {queue} requires a vendor driver but has no DriverTrigger"))]
    MissingDriverTrigger { queue: String },

    #[snafu(display("DisplayName '{display_name}' is used by both {first} and {second}"))]
    DuplicateDisplayName { display_name: String, first: String, second: String },
}
