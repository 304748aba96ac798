use std::io::ErrorKind;
use std::process::Command;

use tracing::debug;

use super::provider::{ProviderError, ProviderResult};
use super::services::ServiceRecord;
use super::sessions::UserSession;

pub trait PlatformExtensions {
    fn user_sessions() -> ProviderResult<Vec<UserSession>>;
    fn services() -> ProviderResult<Vec<ServiceRecord>>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod other;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use other as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn user_sessions() -> ProviderResult<Vec<UserSession>> {
    platform_impl::Platform::user_sessions()
}

pub fn services() -> ProviderResult<Vec<ServiceRecord>> {
    platform_impl::Platform::services()
}

/// Runs a helper program and returns its stdout. A missing program means the
/// platform cannot provide `what`.
#[allow(dead_code)] // unused on platforms that report everything as unsupported
fn run_command(program: &str, args: &[&str], what: &'static str) -> ProviderResult<String> {
    let command = if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    };
    debug!(%command, "running helper");

    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ProviderError::Unsupported(what));
        }
        Err(source) => return Err(ProviderError::Command { command, source }),
    };
    if !output.status.success() {
        return Err(ProviderError::CommandFailed {
            command,
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
