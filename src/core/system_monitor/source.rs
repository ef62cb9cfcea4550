//! Host metric readings.
//!
//! `MetricSource` is the only way the sampler talks to the operating system.
//! Every read is a poll; nothing is pushed.

use std::path::{Path, PathBuf};

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::{EkkoError, Result};

use super::metrics::{percent_of, DiskStats, MemoryStats, NetCounters};

/// Instantaneous OS resource readings.
pub trait MetricSource {
    /// Global CPU usage since the previous call.
    fn cpu_percent(&mut self) -> Result<f32>;

    fn memory_stats(&mut self) -> Result<MemoryStats>;

    /// Usage of the filesystem holding `path`. Fails with `EkkoError::Path`
    /// if the path is missing or unreadable.
    fn disk_stats(&mut self, path: &Path) -> Result<DiskStats>;

    /// Cumulative counters. Non-decreasing except across an interface reset.
    fn network_counters(&mut self) -> Result<NetCounters>;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn cpu_percent(&mut self) -> Result<f32> {
        (**self).cpu_percent()
    }

    fn memory_stats(&mut self) -> Result<MemoryStats> {
        (**self).memory_stats()
    }

    fn disk_stats(&mut self, path: &Path) -> Result<DiskStats> {
        (**self).disk_stats(path)
    }

    fn network_counters(&mut self) -> Result<NetCounters> {
        (**self).network_counters()
    }
}

/// `MetricSource` backed by `sysinfo`.
pub struct SysinfoSource {
    system: System,
    disks: Disks,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        Self {
            system: System::new_with_specifics(refresh_kind),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// Build a source and check that the host can actually serve readings.
    ///
    /// Used once at startup; failure here aborts the process.
    pub fn probe() -> Result<Self> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(EkkoError::source_unavailable(format!(
                "sysinfo does not support this platform ({})",
                std::env::consts::OS
            )));
        }

        let mut source = Self::new();
        let memory = source
            .memory_stats()
            .map_err(|e| EkkoError::source_unavailable(e.to_string()))?;
        if source.system.cpus().is_empty() {
            return Err(EkkoError::source_unavailable("no CPUs reported by the host"));
        }

        log::debug!(
            "Metric source ready: {} CPUs, {} bytes RAM, {} disks, {} interfaces",
            source.system.cpus().len(),
            memory.total,
            source.disks.list().len(),
            source.networks.len()
        );

        Ok(source)
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysinfoSource {
    fn cpu_percent(&mut self) -> Result<f32> {
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(EkkoError::metric_collection("no CPU data available"));
        }

        Ok(self.system.global_cpu_usage())
    }

    fn memory_stats(&mut self) -> Result<MemoryStats> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(EkkoError::metric_collection("host reported 0 bytes of memory"));
        }
        let available = self.system.available_memory();

        Ok(MemoryStats {
            total,
            available,
            percent: percent_of(total.saturating_sub(available), total),
        })
    }

    fn disk_stats(&mut self, path: &Path) -> Result<DiskStats> {
        let canonical = path
            .canonicalize()
            .map_err(|e| EkkoError::path(format!("{}: {}", path.display(), e)))?;

        self.disks.refresh(true);

        let disk = self
            .disks
            .list()
            .iter()
            .filter(|disk| canonical.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .ok_or_else(|| {
                EkkoError::path(format!("{}: not on any mounted disk", path.display()))
            })?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());

        Ok(DiskStats {
            total,
            used,
            percent: percent_of(used, total),
        })
    }

    fn network_counters(&mut self) -> Result<NetCounters> {
        self.networks.refresh(true);

        Ok(self
            .networks
            .values()
            .fold(NetCounters::default(), |acc, data| NetCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
            }))
    }
}

/// Scripted source for tests and demos.
///
/// Each read returns the configured value, or the configured failure.
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub cpu: Option<f32>,
    pub memory: Option<MemoryStats>,
    /// Disk readings are served only for this path.
    pub disk_path: PathBuf,
    pub disk: DiskStats,
    pub network: Option<NetCounters>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            cpu: Some(12.5),
            memory: Some(MemoryStats {
                total: 8 * 1024 * 1024 * 1024,
                available: 6 * 1024 * 1024 * 1024,
                percent: 25.0,
            }),
            disk_path: PathBuf::from("/"),
            disk: DiskStats {
                total: 100 * 1024 * 1024 * 1024,
                used: 40 * 1024 * 1024 * 1024,
                percent: 40.0,
            },
            network: Some(NetCounters::default()),
        }
    }
}

impl FakeSource {
    pub fn set_network(&mut self, bytes_sent: u64, bytes_recv: u64) {
        self.network = Some(NetCounters {
            bytes_sent,
            bytes_recv,
        });
    }
}

impl MetricSource for FakeSource {
    fn cpu_percent(&mut self) -> Result<f32> {
        self.cpu
            .ok_or_else(|| EkkoError::metric_collection("cpu reading failed"))
    }

    fn memory_stats(&mut self) -> Result<MemoryStats> {
        self.memory
            .ok_or_else(|| EkkoError::metric_collection("memory reading failed"))
    }

    fn disk_stats(&mut self, path: &Path) -> Result<DiskStats> {
        if path == self.disk_path {
            Ok(self.disk)
        } else {
            Err(EkkoError::path(format!("{}: no such path", path.display())))
        }
    }

    fn network_counters(&mut self) -> Result<NetCounters> {
        self.network
            .ok_or_else(|| EkkoError::metric_collection("network counters unavailable"))
    }
}
