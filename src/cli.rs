use clap::Parser;

use crate::{eligibility::AttributeFilter, workflow::InstallRequest};

// ///////////// //
// CLI interface //
// ///////////// //

/// printer-installer - Adds a print queue to this computer after letting the user
/// pick one of the queues available to them.
///
/// All arguments are positional and optional, as passed by the deployment agent.
/// Empty arguments count as absent, and values may start with a hyphen.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target drive mount point.
    #[arg(allow_hyphen_values = true)]
    pub mount_point: Option<String>,
    /// Computer hostname.
    #[arg(allow_hyphen_values = true)]
    pub hostname: Option<String>,
    /// Name of the user running the installer.
    #[arg(allow_hyphen_values = true)]
    pub username: Option<String>,
    /// DisplayName of an available queue to install without prompting.
    #[arg(allow_hyphen_values = true)]
    pub preselected_queue: Option<String>,
    /// Catalog attribute to filter the available queues on.
    #[arg(allow_hyphen_values = true)]
    pub filter_key: Option<String>,
    /// Text the filter attribute must contain.
    #[arg(allow_hyphen_values = true)]
    pub filter_value: Option<String>,
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    #[allow(unused)]
    pub extra: Vec<String>,
}

impl Cli {
    pub fn into_request(self) -> InstallRequest {
        let filter = present(self.filter_key).map(|key| AttributeFilter {
            key,
            value: present(self.filter_value).unwrap_or_default(),
        });

        InstallRequest {
            username: present(self.username),
            preselected: present(self.preselected_queue),
            filter,
        }
    }
}

fn present(arg: Option<String>) -> Option<String> {
    arg.filter(|a| !a.is_empty())
}
