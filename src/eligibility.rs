use log::debug;

use crate::{
    catalog::models::{QueueCatalog, QueueDefinition},
    cups_client::models::InstalledQueueSet,
    directory::groups::UserContext,
};

/// Restricts eligible queues to those whose `key` attribute contains `value`.
/// Queues without the attribute are never excluded by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    pub key: String,
    pub value: String,
}

impl AttributeFilter {
    pub fn retains(&self, queue: &QueueDefinition) -> bool {
        match queue.attribute(&self.key) {
            Some(attribute) => attribute.contains(&self.value),
            None => true,
        }
    }
}

/// DisplayNames the operator may install, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleQueueList(Vec<String>);

impl EligibleQueueList {
    pub fn compute(
        catalog: &QueueCatalog,
        installed: &InstalledQueueSet,
        filter: Option<&AttributeFilter>,
        user: &UserContext,
    ) -> Self {
        let mut names: Vec<String> = catalog.iter()
            .filter(|queue| {
                if installed.contains(&queue.display_name) {
                    debug!("Skipping {}: already installed", queue.display_name);
                    return false;
                }
                if queue.cups_name.as_deref().is_some_and(|name| installed.contains(name)) {
                    debug!("Skipping {}: installed under its CUPS name", queue.display_name);
                    return false;
                }
                if filter.is_some_and(|filter| !filter.retains(queue)) {
                    debug!("Skipping {}: does not match the attribute filter", queue.display_name);
                    return false;
                }
                if queue.ad_filter_group.as_deref().is_some_and(|group| !user.is_member(group)) {
                    debug!("Skipping {}: user is not in its filter group", queue.display_name);
                    return false;
                }
                true
            })
            .map(|queue| queue.display_name.clone())
            .collect();

        names.sort();
        Self(names)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.0.iter().any(|name| name == display_name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
