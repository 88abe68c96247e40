//! Data types produced once per tick by a metrics provider.
//! Everything except the timestamp and process table may be missing on a given host.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::error::SampleFieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

impl Usage {
    /// Used share of total in 0..=100, or None when total is zero.
    pub fn percent(&self) -> Option<f32> {
        if self.total == 0 {
            return None;
        }
        Some((self.used as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0) as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetCounters {
    // cumulative totals across all interfaces; consumers diff to get rates
    pub sent: u64,
    pub received: u64,
}

/// One mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskInfo {
    /// Device name as the platform reports it, e.g. "/dev/nvme0n1p2".
    pub name: String,
    pub mount: PathBuf,
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_usage: f32,
    pub mem_bytes: u64,
}

/// A row of the process table as enumerated by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEntry {
    Alive(ProcessInfo),
    /// Listed during enumeration but gone (or a zombie) by the time details were read.
    Exited { pid: u32 },
}

impl ProcessEntry {
    pub fn alive(&self) -> Option<&ProcessInfo> {
        match self {
            ProcessEntry::Alive(p) => Some(p),
            ProcessEntry::Exited { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sample {
    pub taken_at: Instant,
    pub hostname: Option<String>,
    pub uptime: Option<Duration>,
    /// Aggregate across cores, 0..=100.
    pub cpu_percent: Option<f32>,
    pub cpu_temp_c: Option<f32>,
    pub memory: Option<Usage>,
    /// Usage of the configured mount point.
    pub disk: Option<Usage>,
    /// Every mounted filesystem with a nonzero size, in platform order.
    pub disks: Vec<DiskInfo>,
    pub network: Option<NetCounters>,
    pub processes: Vec<ProcessEntry>,
    /// Fields that could not be read this tick.
    pub degraded: Vec<SampleFieldError>,
}

impl Sample {
    /// An empty sample taken at `taken_at`; providers fill in what they can.
    pub fn empty(taken_at: Instant) -> Self {
        Self {
            taken_at,
            hostname: None,
            uptime: None,
            cpu_percent: None,
            cpu_temp_c: None,
            memory: None,
            disk: None,
            disks: Vec::new(),
            network: None,
            processes: Vec::new(),
            degraded: Vec::new(),
        }
    }

    /// True when not a single metric could be read.
    pub fn is_blank(&self) -> bool {
        self.hostname.is_none()
            && self.uptime.is_none()
            && self.cpu_percent.is_none()
            && self.memory.is_none()
            && self.disk.is_none()
            && self.disks.is_empty()
            && self.network.is_none()
            && self.processes.is_empty()
    }
}
