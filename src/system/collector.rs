use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{
    Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, Pid, ProcessRefreshKind, ProcessStatus,
    ProcessesToUpdate, System, UpdateKind, Users,
};
use tracing::debug;

use super::platform;
use super::process::{ProcessHandle, ProcessSample};
use super::provider::{MetricsProvider, ProviderError, ProviderResult};
use super::services::ServiceRecord;
use super::sessions::UserSession;
use super::snapshot::{DiskIo, MemoryStats, NetworkIo, disk_io_rows};

/// [`MetricsProvider`] backed by `sysinfo`, with user sessions and services
/// coming from the platform adapters.
pub struct SysinfoProvider {
    sys: System,
    users: Users,
}

impl SysinfoProvider {
    /// Fails when `sysinfo` has no backend for the host OS.
    pub fn new() -> Result<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(eyre!(
                "system information is not available on {}",
                std::env::consts::OS
            ));
        }
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        Ok(SysinfoProvider {
            sys,
            users: Users::new_with_refreshed_list(),
        })
    }

    fn process_refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .with_user(UpdateKind::OnlyIfNotSet)
    }
}

impl MetricsProvider for SysinfoProvider {
    fn global_cpu_percent(&mut self, window: Duration) -> ProviderResult<f32> {
        self.sys.refresh_cpu_usage();
        thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_usage();
        Ok(self.sys.global_cpu_usage())
    }

    fn memory_stats(&mut self) -> ProviderResult<MemoryStats> {
        self.sys.refresh_memory();
        Ok(MemoryStats::from_totals(
            self.sys.total_memory(),
            self.sys.available_memory(),
            self.sys.used_memory(),
        ))
    }

    fn per_disk_io_counters(&mut self) -> ProviderResult<BTreeMap<String, DiskIo>> {
        let disks = Disks::new_with_refreshed_list();
        Ok(disk_io_rows(disks.list().iter().map(|disk| {
            let usage = disk.usage();
            (
                disk.name().to_string_lossy().into_owned(),
                disk.mount_point().to_string_lossy().into_owned(),
                DiskIo {
                    read_bytes: usage.total_read_bytes,
                    write_bytes: usage.total_written_bytes,
                },
            )
        })))
    }

    fn network_io_counters(&mut self) -> ProviderResult<NetworkIo> {
        let networks = Networks::new_with_refreshed_list();
        Ok(networks
            .list()
            .values()
            .fold(NetworkIo::default(), |acc, data| NetworkIo {
                bytes_sent: acc.bytes_sent + data.total_transmitted(),
                bytes_recv: acc.bytes_recv + data.total_received(),
            }))
    }

    /// Refreshes the whole process table. The refresh also records the CPU
    /// baseline that the next enumeration measures against.
    fn enumerate_processes(&mut self) -> Vec<ProcessHandle> {
        let refreshed = self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            Self::process_refresh_kind(),
        );
        debug!(refreshed, "process table refreshed");
        let mut handles: Vec<ProcessHandle> = self
            .sys
            .processes()
            .keys()
            .map(|pid| ProcessHandle::new(pid.as_u32()))
            .collect();
        handles.sort_unstable_by_key(ProcessHandle::pid);
        handles
    }

    fn begin_cpu_measurement(&mut self, handle: &ProcessHandle) -> ProviderResult<()> {
        // The baseline was taken by `enumerate_processes`; only liveness is left to check.
        match self.sys.process(Pid::from_u32(handle.pid())) {
            Some(_) => Ok(()),
            None => Err(ProviderError::NoSuchProcess(handle.pid())),
        }
    }

    fn read_process(&mut self, handle: &ProcessHandle) -> ProviderResult<ProcessSample> {
        let process = self
            .sys
            .process(Pid::from_u32(handle.pid()))
            .ok_or(ProviderError::NoSuchProcess(handle.pid()))?;

        let name = process.name().to_string_lossy().into_owned();
        let username = process
            .user_id()
            .and_then(|uid| self.users.get_user_by_id(uid))
            .map(|user| user.name().to_string());

        Ok(ProcessSample {
            pid: handle.pid(),
            name: (!name.is_empty()).then_some(name),
            username,
            status: Some(status_label(process.status()).to_string()),
            cpu_percent: process.cpu_usage(),
            memory_resident_bytes: process.memory(),
        })
    }

    fn enumerate_user_sessions(&mut self) -> ProviderResult<Vec<UserSession>> {
        platform::user_sessions()
    }

    fn enumerate_services(&mut self) -> ProviderResult<Vec<ServiceRecord>> {
        platform::services()
    }
}

pub fn status_label(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run => "running",
        ProcessStatus::Sleep => "sleeping",
        ProcessStatus::Idle => "idle",
        ProcessStatus::Stop => "stopped",
        ProcessStatus::Zombie => "zombie",
        ProcessStatus::Tracing => "tracing-stop",
        ProcessStatus::Dead => "dead",
        ProcessStatus::Wakekill => "wake-kill",
        ProcessStatus::Waking => "waking",
        ProcessStatus::Parked => "parked",
        ProcessStatus::LockBlocked => "locked",
        ProcessStatus::UninterruptibleDiskSleep => "disk-sleep",
        _ => "unknown",
    }
}
