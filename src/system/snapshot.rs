use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryStats {
    pub percent: f32,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemoryStats {
    /// `percent` counts everything that is not available, not only `used_bytes`.
    pub fn from_totals(total_bytes: u64, available_bytes: u64, used_bytes: u64) -> Self {
        let percent = if total_bytes == 0 {
            0.0
        } else {
            (total_bytes.saturating_sub(available_bytes) as f64 / total_bytes as f64 * 100.0)
                as f32
        };
        MemoryStats {
            percent,
            used_bytes,
            total_bytes,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskIo {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkIo {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Builds the per-disk rows from `(device, mount point, counters)` entries,
/// one entry per mounted filesystem. A device mounted again with the same
/// counters is listed once; a name reused with different counters (several
/// `tmpfs` or `overlay` mounts) gets its own `name (mount point)` row.
pub fn disk_io_rows<I>(entries: I) -> BTreeMap<String, DiskIo>
where
    I: IntoIterator<Item = (String, String, DiskIo)>,
{
    let mut rows = BTreeMap::new();
    for (name, mount_point, io) in entries {
        match rows.get(&name).copied() {
            None => {
                rows.insert(name, io);
            }
            Some(existing) if existing == io => {}
            Some(_) => {
                rows.entry(format!("{name} ({mount_point})")).or_insert(io);
            }
        }
    }
    rows
}

pub struct PerformanceSnapshot {
    pub cpu_percent: f32,
    pub memory: MemoryStats,
    pub per_disk_io: BTreeMap<String, DiskIo>,
    pub network_io: NetworkIo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_percent_uses_available() {
        let stats = MemoryStats::from_totals(1000, 250, 600);
        assert!((stats.percent - 75.0).abs() < f32::EPSILON);
        assert_eq!(stats.used_bytes, 600);
        assert_eq!(stats.total_bytes, 1000);
    }

    #[test]
    fn zero_total_memory_is_zero_percent() {
        let stats = MemoryStats::from_totals(0, 0, 0);
        assert_eq!(stats.percent, 0.0);
    }

    fn io(read_bytes: u64, write_bytes: u64) -> DiskIo {
        DiskIo {
            read_bytes,
            write_bytes,
        }
    }

    #[test]
    fn repeated_mounts_of_one_device_collapse() {
        let rows = disk_io_rows([
            ("sda1".to_string(), "/".to_string(), io(10, 20)),
            ("sda1".to_string(), "/var/lib/docker".to_string(), io(10, 20)),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["sda1"], io(10, 20));
    }

    #[test]
    fn distinct_filesystems_sharing_a_name_keep_their_rows() {
        let rows = disk_io_rows([
            ("tmpfs".to_string(), "/run".to_string(), io(1, 2)),
            ("tmpfs".to_string(), "/dev/shm".to_string(), io(3, 4)),
            ("sda1".to_string(), "/".to_string(), io(5, 6)),
        ]);
        let names: Vec<&str> = rows.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["sda1", "tmpfs", "tmpfs (/dev/shm)"]);
        assert_eq!(rows["tmpfs (/dev/shm)"], io(3, 4));
    }
}
