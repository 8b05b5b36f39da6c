use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use log::info;

use super::models::Settings;

const DEFAULT_SETTINGS_FILE: &str = "/etc/printer-installer/settings";
const SETTINGS_FILE_VAR: &str = "PRINSTALL_SETTINGS";

pub fn load_config() -> Result<Settings, ConfigError> {
    // As Rust has no native support for .env files,
    // we use the dotenv_flow crate to import to actual ENV vars.
    if let Ok(dotenv_path) = dotenv_flow::dotenv_flow() {
        info!("Loaded dotenv file: {:?}", dotenv_path);
    }

    let settings_file = std::env::var(SETTINGS_FILE_VAR).unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());

    with_defaults(Config::builder())?
        .add_source(File::with_name(&settings_file).required(false))
        .add_source(Environment::default()
            .prefix("PRINSTALL")
            .separator("_")
            .prefix_separator("_"))
        .build()?
        .try_deserialize()
}

pub fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("catalog.path", "/etc/printer-installer/queues.json")?
        .set_default("defaultdriver", "/System/Library/Frameworks/ApplicationServices.framework/Versions/A/Frameworks/PrintCore.framework/Resources/Generic.ppd")?
        .set_default("tools.lpstat", "/usr/bin/lpstat")?
        .set_default("tools.lpadmin", "/usr/sbin/lpadmin")?
        .set_default("tools.jamf", "/usr/local/bin/jamf")?
        .set_default("tools.klist", "/usr/bin/klist")?
        .set_default("tools.ldapsearch", "/usr/bin/ldapsearch")?
        .set_default("dialog.path", "/Applications/Utilities/cocoaDialog.app/Contents/MacOS/cocoaDialog")?
        .set_default("dialog.installtrigger", "cocoadialog")?
        .set_default("dialog.windowtitle", "Printer Installer")?
        .set_default("dialog.brandicon", "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/GenericNetworkIcon.icns")?
        .set_default("ldap.server", "ldap://localhost")?
        .set_default("ldap.searchbase", "")?
        .set_default("ldap.groupnameformat", "")?
        .set_default("messages.errorundefined", "An unexpected error occurred. Please contact your IT department.")?
        .set_default("messages.errornoqueuesavailable", "There are no additional printers available to add to your computer.")?
        .set_default("messages.errorpreselectedqueue", "The printer {queue} is not available to add to your computer.")?
        .set_default("messages.errordriverfailure", "The driver for this printer could not be installed. Please contact your IT department.")?
        .set_default("messages.errorunablemapqueue", "The printer could not be added to your computer. Please contact your IT department.")?
        .set_default("messages.errordirectory", "Your group memberships could not be looked up. Please contact your IT department.")?
        .set_default("messages.successqueueadded", "The printer {queue} was added to your computer.")
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn defaults_deserialize_into_settings() {
        let settings: Settings = with_defaults(Config::builder()).unwrap().build().unwrap().try_deserialize().unwrap();

        assert_eq!(settings.tools.lpadmin.to_str(), Some("/usr/sbin/lpadmin"));
        assert_eq!(settings.dialog.install_trigger, "cocoadialog");
        assert_eq!(settings.ldap.group_name_format(), None);
        assert!(settings.messages.success_queue_added.contains("{queue}"));
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let toml = r#"
            defaultdriver = "/opt/generic.ppd"

            [ldap]
            server = "ldaps://dc.example.com"
            groupnameformat = "PRN-*"

            [catalog]
            path = "/srv/queues.json"
        "#;

        let settings: Settings = with_defaults(Config::builder())
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.default_driver.to_str(), Some("/opt/generic.ppd"));
        assert_eq!(settings.ldap.server, "ldaps://dc.example.com");
        assert_eq!(settings.ldap.group_name_format(), Some("PRN-*"));
        assert_eq!(settings.catalog.path.to_str(), Some("/srv/queues.json"));
        assert_eq!(settings.tools.jamf.to_str(), Some("/usr/local/bin/jamf"));
    }
}
