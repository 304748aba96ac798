use crate::format::format_binary_size;

/// Reference to a process seen during enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessHandle {
    pid: u32,
}

impl ProcessHandle {
    pub fn new(pid: u32) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

/// Raw per-process read; any field the provider could not resolve is `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: Option<String>,
    pub username: Option<String>,
    pub status: Option<String>,
    pub cpu_percent: f32,
    pub memory_resident_bytes: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub username: String,
    pub status: String,
    pub cpu_percent: f32,
    pub memory_resident_bytes: u64,
}

impl ProcessRecord {
    pub fn memory_display(&self) -> String {
        format_binary_size(self.memory_resident_bytes)
    }

    /// Details-view description; processes carry no richer text than their name.
    pub fn description(&self) -> &str {
        &self.name
    }
}

impl From<ProcessSample> for ProcessRecord {
    fn from(sample: ProcessSample) -> Self {
        let cpu_percent = if sample.cpu_percent.is_finite() {
            sample.cpu_percent.max(0.0)
        } else {
            0.0
        };
        ProcessRecord {
            pid: sample.pid,
            name: sample.name.unwrap_or_default(),
            username: sample.username.unwrap_or_default(),
            status: sample.status.unwrap_or_default(),
            cpu_percent,
            memory_resident_bytes: sample.memory_resident_bytes,
        }
    }
}
