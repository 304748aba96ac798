use std::time::Duration;

use tracing::{debug, debug_span};

use crate::system::process::ProcessRecord;
use crate::system::provider::{MetricsProvider, ProviderError, ProviderResult};
use crate::system::snapshot::PerformanceSnapshot;

pub const DEFAULT_WARMUP: Duration = Duration::from_millis(500);
pub const DEFAULT_CPU_WINDOW: Duration = Duration::from_secs(1);

/// Two-phase sampling pass.
///
/// A process's first CPU reading is always zero, so every process gets a
/// measurement window opened first, then the provider blocks for `warmup`,
/// then the table is read again. Processes that exit at any point in between
/// are dropped. The result is unordered.
pub fn sample_processes<P>(provider: &mut P, warmup: Duration) -> Vec<ProcessRecord>
where
    P: MetricsProvider + ?Sized,
{
    let _span = debug_span!("sampler.processes").entered();

    for handle in provider.enumerate_processes() {
        match provider.begin_cpu_measurement(&handle) {
            Ok(()) => {}
            Err(ProviderError::NoSuchProcess(pid)) => {
                debug!(pid, "process exited before measurement")
            }
            Err(err) => debug!(pid = handle.pid(), %err, "could not start CPU measurement"),
        }
    }

    if let Err(err) = provider.global_cpu_percent(warmup) {
        debug!(%err, "warm-up CPU read failed");
    }

    let handles = provider.enumerate_processes();
    let mut records = Vec::with_capacity(handles.len());
    for handle in handles {
        match provider.read_process(&handle) {
            Ok(sample) => records.push(ProcessRecord::from(sample)),
            Err(ProviderError::NoSuchProcess(pid)) => debug!(pid, "process exited during sampling"),
            Err(err) => debug!(pid = handle.pid(), %err, "dropping unreadable process"),
        }
    }
    debug!(count = records.len(), "sampling pass complete");
    records
}

/// One combined read of CPU, memory, disk and network counters.
pub fn sample_performance<P>(
    provider: &mut P,
    cpu_window: Duration,
) -> ProviderResult<PerformanceSnapshot>
where
    P: MetricsProvider + ?Sized,
{
    let _span = debug_span!("sampler.performance").entered();
    Ok(PerformanceSnapshot {
        cpu_percent: provider.global_cpu_percent(cpu_window)?,
        memory: provider.memory_stats()?,
        per_disk_io: provider.per_disk_io_counters()?,
        network_io: provider.network_io_counters()?,
    })
}
