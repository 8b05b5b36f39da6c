use std::{collections::{BTreeMap, BTreeSet}, path::PathBuf};

/// Queue names the local spooler currently knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledQueueSet(BTreeSet<String>);

impl InstalledQueueSet {
    /// Parses `lpstat -p` output. Every record names its queue in the
    /// second whitespace-delimited token (`printer <name> is idle. ...`).
    /// Indented continuation lines carry no queue name.
    pub fn from_lpstat(output: &str) -> Self {
        output.lines()
            .filter(|line| !line.starts_with(char::is_whitespace))
            .filter_map(|line| line.split_whitespace().nth(1))
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for InstalledQueueSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything `lpadmin` needs to register a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRegistration {
    pub name: String,
    pub location: String,
    pub uri: String,
    pub driver: PathBuf,
    /// Ordered by key so the generated command line is stable.
    pub options: BTreeMap<String, String>,
}

impl QueueRegistration {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(), self.name.clone(),
            "-L".to_string(), self.location.clone(),
            "-E".to_string(),
            "-v".to_string(), self.uri.clone(),
            "-P".to_string(), self.driver.display().to_string(),
        ];

        for (key, value) in &self.options {
            args.push("-o".to_string());
            args.push(format!("{key}={value}"));
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lpstat_records() {
        let output = "printer HP-BW is idle.  enabled since Tue Oct 14 09:12:01 2026\n\
                      printer Xerox_Lobby disabled since Mon Oct 13 17:00:00 2026 -\n\
                      \treason unknown\n\
                      \n";
        let installed = InstalledQueueSet::from_lpstat(output);

        assert!(installed.contains("HP-BW"));
        assert!(installed.contains("Xerox_Lobby"));
        assert!(!installed.contains("printer"));
        assert!(!installed.contains("unknown"));
        assert_eq!(installed.len(), 2);
    }

    #[test]
    fn empty_lpstat_output_yields_empty_set() {
        assert!(InstalledQueueSet::from_lpstat("").is_empty());
    }

    #[test]
    fn registration_args_are_stable() {
        let registration = QueueRegistration {
            name: "HP-Color".to_string(),
            location: "Room 101".to_string(),
            uri: "lpd://print.example.com/hp-color".to_string(),
            driver: PathBuf::from("/opt/drv/x.ppd"),
            options: BTreeMap::from([
                ("sides".to_string(), "two-sided-long-edge".to_string()),
                ("Duplex".to_string(), "DuplexNoTumble".to_string()),
            ]),
        };

        assert_eq!(registration.args(), vec![
            "-p", "HP-Color",
            "-L", "Room 101",
            "-E",
            "-v", "lpd://print.example.com/hp-color",
            "-P", "/opt/drv/x.ppd",
            "-o", "Duplex=DuplexNoTumble",
            "-o", "sides=two-sided-long-edge",
        ]);
    }
}
