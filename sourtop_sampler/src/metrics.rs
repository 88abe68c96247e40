//! Metrics collection using sysinfo.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    ProcessStatus, ProcessesToUpdate, RefreshKind, System,
};
use tracing::debug;

use crate::error::{Field, SampleFieldError, SamplerError};
use crate::provider::MetricsProvider;
use crate::types::{DiskInfo, NetCounters, ProcessEntry, ProcessInfo, Sample, Usage};

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Mount point whose usage is reported as "disk".
    pub mount_point: PathBuf,
    /// Read temperature sensors. Hosts without sensors just report none.
    pub temperature: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            mount_point: PathBuf::from("/"),
            temperature: true,
        }
    }
}

/// Keeps sysinfo handles alive across ticks so CPU and network deltas stay meaningful.
pub struct SysinfoProvider {
    sys: System,
    networks: Networks,
    disks: Disks,
    components: Option<Components>,
    config: SamplerConfig,
}

impl SysinfoProvider {
    pub fn new(config: SamplerConfig) -> Result<Self, SamplerError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SamplerError::Unsupported);
        }
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything())
            .with_processes(process_refresh_kind());

        let sys = System::new_with_specifics(refresh_kind);
        let networks = Networks::new_with_refreshed_list();
        let disks = Disks::new_with_refreshed_list();
        let components = config
            .temperature
            .then(Components::new_with_refreshed_list);

        Ok(Self {
            sys,
            networks,
            disks,
            components,
            config,
        })
    }

    fn refresh(&mut self) -> Result<(), SamplerError> {
        let Self {
            sys,
            networks,
            disks,
            components,
            ..
        } = self;
        catch_unwind(AssertUnwindSafe(|| {
            sys.refresh_cpu_usage();
            sys.refresh_memory();
            sys.refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());
            networks.refresh(true);
            disks.refresh(true);
            if let Some(c) = components.as_mut() {
                c.refresh(false);
            }
        }))
        .map_err(|e| SamplerError::RefreshPanicked(panic_message(e.as_ref())))
    }
}

impl MetricsProvider for SysinfoProvider {
    fn sample(&mut self) -> Result<Sample, SamplerError> {
        self.refresh()?;

        let mut s = Sample::empty(Instant::now());
        let mut degraded = Vec::new();

        s.hostname = System::host_name();
        if s.hostname.is_none() {
            degraded.push(SampleFieldError::new(Field::Hostname, "not reported"));
        }

        s.uptime = match System::uptime() {
            0 => {
                degraded.push(SampleFieldError::new(Field::Uptime, "not reported"));
                None
            }
            secs => Some(Duration::from_secs(secs)),
        };

        s.cpu_percent = if self.sys.cpus().is_empty() {
            degraded.push(SampleFieldError::new(Field::Cpu, "no cpus listed"));
            None
        } else {
            Some(self.sys.global_cpu_usage().clamp(0.0, 100.0))
        };

        let mem_total = self.sys.total_memory();
        s.memory = if mem_total == 0 {
            degraded.push(SampleFieldError::new(Field::Memory, "total memory is zero"));
            None
        } else {
            Some(Usage {
                used: mem_total.saturating_sub(self.sys.available_memory()),
                total: mem_total,
            })
        };

        s.disk = usage_for_mount(
            self.disks
                .list()
                .iter()
                .map(|d| (d.mount_point(), d.total_space(), d.available_space())),
            &self.config.mount_point,
        );
        if s.disk.is_none() {
            degraded.push(SampleFieldError::new(
                Field::Disk,
                format!("mount point {} not found", self.config.mount_point.display()),
            ));
        }

        s.disks = collect_disks(self.disks.list().iter().map(|d| {
            (
                d.name().to_string_lossy().into_owned(),
                d.mount_point(),
                d.total_space(),
                d.available_space(),
            )
        }));
        if s.disks.is_empty() {
            degraded.push(SampleFieldError::new(Field::Disks, "no mounted filesystems"));
        }

        s.network = if self.networks.list().is_empty() {
            degraded.push(SampleFieldError::new(Field::Network, "no interfaces"));
            None
        } else {
            Some(
                self.networks
                    .iter()
                    .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                        sent: acc.sent.saturating_add(data.total_transmitted()),
                        received: acc.received.saturating_add(data.total_received()),
                    }),
            )
        };

        if let Some(components) = self.components.as_ref() {
            s.cpu_temp_c = best_cpu_temp(components);
            if s.cpu_temp_c.is_none() {
                degraded.push(SampleFieldError::new(Field::CpuTemp, "no cpu sensor"));
            }
        }

        s.processes = collect_processes(&self.sys);
        if s.processes.is_empty() {
            degraded.push(SampleFieldError::new(Field::Processes, "process table empty"));
        }

        for e in &degraded {
            debug!(field = %e.field, reason = %e.reason, "sample field degraded");
        }
        s.degraded = degraded;

        if s.is_blank() {
            return Err(SamplerError::Unavailable("no metric could be read".into()));
        }
        Ok(s)
    }
}

fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing().with_cpu().with_memory()
}

fn collect_processes(sys: &System) -> Vec<ProcessEntry> {
    // sysinfo reports per-process cpu on a per-core scale; normalize to the aggregate 0..100
    let n_cpus = sys.cpus().len().max(1) as f32;
    sys.processes()
        .values()
        .map(|p| {
            let pid = p.pid().as_u32();
            match p.status() {
                ProcessStatus::Zombie | ProcessStatus::Dead => ProcessEntry::Exited { pid },
                _ => ProcessEntry::Alive(ProcessInfo {
                    pid,
                    name: p.name().to_string_lossy().into_owned(),
                    cpu_usage: (p.cpu_usage() / n_cpus).clamp(0.0, 100.0),
                    mem_bytes: p.memory(),
                }),
            }
        })
        .collect()
}

fn best_cpu_temp(components: &Components) -> Option<f32> {
    components
        .iter()
        .filter(|c| {
            let label = c.label().to_lowercase();
            label.contains("cpu")
                || label.contains("package")
                || label.contains("tctl")
                || label.contains("tdie")
        })
        .filter_map(|c| c.temperature())
        .filter(|t| t.is_finite())
        .max_by(|a, b| a.total_cmp(b))
}

// Stacked mounts list the same path more than once; the last one is what's visible.
fn usage_for_mount<'a>(
    disks: impl IntoIterator<Item = (&'a Path, u64, u64)>,
    mount: &Path,
) -> Option<Usage> {
    disks
        .into_iter()
        .filter(|(mp, _, _)| *mp == mount)
        .last()
        .map(|(_, total, available)| Usage {
            used: total.saturating_sub(available),
            total,
        })
}

// Same stacking rule as the usage bar: a repeated mount point replaces the earlier entry in place.
fn collect_disks<'a>(
    disks: impl IntoIterator<Item = (String, &'a Path, u64, u64)>,
) -> Vec<DiskInfo> {
    let mut out: Vec<DiskInfo> = Vec::new();
    for (name, mount, total, available) in disks {
        if total == 0 {
            continue;
        }
        let info = DiskInfo {
            name,
            mount: mount.to_path_buf(),
            used: total.saturating_sub(available),
            total,
        };
        match out.iter_mut().find(|d| d.mount == info.mount) {
            Some(slot) => *slot = info,
            None => out.push(info),
        }
    }
    out
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}
