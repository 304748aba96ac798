#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tasksnap::system::process::{ProcessHandle, ProcessSample};
use tasksnap::system::provider::{MetricsProvider, ProviderError, ProviderResult};
use tasksnap::system::services::ServiceRecord;
use tasksnap::system::sessions::UserSession;
use tasksnap::system::snapshot::{DiskIo, MemoryStats, NetworkIo};

/// Scripted provider: returns fixed data and records how it was driven.
pub struct FakeProvider {
    pub cpu_percent: f32,
    pub memory: MemoryStats,
    pub disks: BTreeMap<String, DiskIo>,
    pub network: NetworkIo,
    pub processes: Vec<ProcessSample>,
    /// Listed on enumeration, gone by the time measurement starts.
    pub exit_before_begin: Vec<u32>,
    /// Listed on enumeration, gone by the time the row is read.
    pub exit_before_read: Vec<u32>,
    /// `None` reports user sessions as unsupported.
    pub sessions: Option<Vec<UserSession>>,
    /// `None` reports services as unsupported.
    pub services: Option<Vec<ServiceRecord>>,
    pub cpu_windows: Vec<Duration>,
    pub begun: Vec<u32>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        FakeProvider {
            cpu_percent: 0.0,
            memory: MemoryStats::default(),
            disks: BTreeMap::new(),
            network: NetworkIo::default(),
            processes: Vec::new(),
            exit_before_begin: Vec::new(),
            exit_before_read: Vec::new(),
            sessions: Some(Vec::new()),
            services: Some(Vec::new()),
            cpu_windows: Vec::new(),
            begun: Vec::new(),
        }
    }
}

impl MetricsProvider for FakeProvider {
    fn global_cpu_percent(&mut self, window: Duration) -> ProviderResult<f32> {
        self.cpu_windows.push(window);
        Ok(self.cpu_percent)
    }

    fn memory_stats(&mut self) -> ProviderResult<MemoryStats> {
        Ok(self.memory)
    }

    fn per_disk_io_counters(&mut self) -> ProviderResult<BTreeMap<String, DiskIo>> {
        Ok(self.disks.clone())
    }

    fn network_io_counters(&mut self) -> ProviderResult<NetworkIo> {
        Ok(self.network)
    }

    fn enumerate_processes(&mut self) -> Vec<ProcessHandle> {
        self.processes
            .iter()
            .map(|p| ProcessHandle::new(p.pid))
            .collect()
    }

    fn begin_cpu_measurement(&mut self, handle: &ProcessHandle) -> ProviderResult<()> {
        if self.exit_before_begin.contains(&handle.pid()) {
            return Err(ProviderError::NoSuchProcess(handle.pid()));
        }
        self.begun.push(handle.pid());
        Ok(())
    }

    fn read_process(&mut self, handle: &ProcessHandle) -> ProviderResult<ProcessSample> {
        if self.exit_before_read.contains(&handle.pid()) {
            return Err(ProviderError::NoSuchProcess(handle.pid()));
        }
        self.processes
            .iter()
            .find(|p| p.pid == handle.pid())
            .cloned()
            .ok_or(ProviderError::NoSuchProcess(handle.pid()))
    }

    fn enumerate_user_sessions(&mut self) -> ProviderResult<Vec<UserSession>> {
        self.sessions
            .clone()
            .ok_or(ProviderError::Unsupported("user sessions"))
    }

    fn enumerate_services(&mut self) -> ProviderResult<Vec<ServiceRecord>> {
        self.services
            .clone()
            .ok_or(ProviderError::Unsupported("services"))
    }
}

pub fn process(pid: u32, name: &str, cpu: f32, rss: u64) -> ProcessSample {
    ProcessSample {
        pid,
        name: Some(name.to_string()),
        username: Some("tester".to_string()),
        status: Some("running".to_string()),
        cpu_percent: cpu,
        memory_resident_bytes: rss,
    }
}

pub fn service(name: &str, display_name: &str, status: &str, pid: Option<u32>) -> ServiceRecord {
    ServiceRecord {
        name: name.to_string(),
        display_name: display_name.to_string(),
        status: status.to_string(),
        pid,
    }
}

pub fn started_at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .expect("valid timestamp")
}

pub fn session(name: &str, host: Option<&str>, terminal: Option<&str>) -> UserSession {
    UserSession {
        name: name.to_string(),
        host: host.map(str::to_string),
        terminal: terminal.map(str::to_string),
        started: started_at(2026, 10, 19, 9, 12),
    }
}

pub fn render(provider: &mut FakeProvider, options: tasksnap::report::ReportOptions) -> String {
    let mut out = Vec::new();
    tasksnap::report::Report::new(provider, options)
        .write_to(&mut out)
        .expect("report writes to memory");
    String::from_utf8(out).expect("report is utf-8")
}
