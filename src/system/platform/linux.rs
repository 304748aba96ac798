use chrono::Local;
use tracing::debug;

use super::{PlatformExtensions, run_command};
use crate::system::provider::ProviderResult;
use crate::system::services::{
    ServiceRecord, apply_main_pids, parse_systemctl_main_pids, parse_systemctl_units,
};
use crate::system::sessions::{UserSession, parse_who};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn user_sessions() -> ProviderResult<Vec<UserSession>> {
        let output = run_command("who", &[], "user sessions")?;
        Ok(parse_who(&output, Local::now().naive_local()))
    }

    fn services() -> ProviderResult<Vec<ServiceRecord>> {
        let units = run_command(
            "systemctl",
            &[
                "list-units",
                "--type=service",
                "--all",
                "--no-legend",
                "--plain",
                "--no-pager",
            ],
            "services",
        )?;
        let mut services = parse_systemctl_units(&units);
        if services.is_empty() {
            return Ok(services);
        }

        // PIDs are best effort; the listing alone is a complete answer.
        let mut args = vec!["show", "--property=Id", "--property=MainPID", "--no-pager"];
        args.extend(services.iter().map(|s| s.name.as_str()));
        match run_command("systemctl", &args, "services") {
            Ok(show) => {
                let pids = parse_systemctl_main_pids(&show);
                apply_main_pids(&mut services, &pids);
            }
            Err(err) => debug!(%err, "could not resolve service PIDs"),
        }
        Ok(services)
    }
}
