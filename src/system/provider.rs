use std::collections::BTreeMap;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

use super::process::{ProcessHandle, ProcessSample};
use super::services::ServiceRecord;
use super::sessions::UserSession;
use super::snapshot::{DiskIo, MemoryStats, NetworkIo};

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The handle outlived its process.
    #[error("process {0} no longer exists")]
    NoSuchProcess(u32),

    #[error("{0} not supported on this platform")]
    Unsupported(&'static str),

    #[error("failed to run `{command}`: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("{call} failed: {source}")]
    Os {
        call: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Read contract the report needs from the operating system.
///
/// Process handles come from [`enumerate_processes`](Self::enumerate_processes)
/// and may go stale at any time; reads through a stale handle return
/// [`ProviderError::NoSuchProcess`].
pub trait MetricsProvider {
    /// Measures system-wide CPU usage over `window`, blocking for that long.
    fn global_cpu_percent(&mut self, window: Duration) -> ProviderResult<f32>;

    fn memory_stats(&mut self) -> ProviderResult<MemoryStats>;

    fn per_disk_io_counters(&mut self) -> ProviderResult<BTreeMap<String, DiskIo>>;

    fn network_io_counters(&mut self) -> ProviderResult<NetworkIo>;

    fn enumerate_processes(&mut self) -> Vec<ProcessHandle>;

    /// Starts a CPU measurement window for one process. Never blocks.
    fn begin_cpu_measurement(&mut self, handle: &ProcessHandle) -> ProviderResult<()>;

    fn read_process(&mut self, handle: &ProcessHandle) -> ProviderResult<ProcessSample>;

    fn enumerate_user_sessions(&mut self) -> ProviderResult<Vec<UserSession>>;

    fn enumerate_services(&mut self) -> ProviderResult<Vec<ServiceRecord>>;
}
