//! Frame composition: turns one sample plus derived metrics into an immutable, render-ready frame.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Deserialize;

use sourtop_sampler::{DiskInfo, ProcessInfo, Sample, Usage};

use crate::error::ConfigError;
use crate::rate::NetRates;

pub const UNAVAILABLE: &str = "unavailable";

/// Process names are cut to this many characters.
pub const NAME_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Normal,
    Elevated,
    Critical,
}

/// Color bands for usage bars, in percent. `elevated <= critical` keeps the mapping monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub elevated: f32,
    pub critical: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            elevated: 50.0,
            critical: 80.0,
        }
    }
}

impl Thresholds {
    pub fn level(&self, pct: f32) -> Level {
        if pct < self.elevated {
            Level::Normal
        } else if pct < self.critical {
            Level::Elevated
        } else {
            Level::Critical
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f32| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(self.elevated) || !in_range(self.critical) {
            return Err(ConfigError::Invalid {
                key: "thresholds",
                reason: "bands must be within 0..=100".into(),
            });
        }
        if self.elevated > self.critical {
            return Err(ConfigError::Invalid {
                key: "thresholds",
                reason: format!(
                    "elevated ({}) is above critical ({})",
                    self.elevated, self.critical
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarReading {
    pub percent: f32,
    pub level: Level,
    /// Filled cells out of `width`.
    pub filled: usize,
    pub width: usize,
    /// e.g. "3.2GB / 15.5GB"
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageBar {
    pub label: &'static str,
    pub reading: Option<BarReading>,
}

impl UsageBar {
    pub fn unavailable(label: &'static str) -> Self {
        Self {
            label,
            reading: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.reading.is_some()
    }

    /// Fixed-width text bar, e.g. "█████░░░░░".
    pub fn cells(&self) -> Option<String> {
        self.reading.as_ref().map(|r| {
            let filled = r.filled.min(r.width);
            let mut s = "█".repeat(filled);
            s.push_str(&"░".repeat(r.width - filled));
            s
        })
    }

    /// Right-hand readout: "42%  (used / total)" or "unavailable".
    pub fn readout(&self) -> String {
        match &self.reading {
            Some(r) => match &r.detail {
                Some(d) => format!("{:>3.0}%  ({d})", r.percent),
                None => format!("{:>3.0}%", r.percent),
            },
            None => UNAVAILABLE.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Kilo,
    Mega,
    Giga,
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RateUnit::Kilo => "KB/s",
            RateUnit::Mega => "MB/s",
            RateUnit::Giga => "GB/s",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRate {
    pub value: f64,
    pub unit: RateUnit,
}

impl fmt::Display for ScaledRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

/// Largest 1024-based unit whose value is at least 1; KB/s is the floor.
pub fn scale_rate(bytes_per_sec: f64) -> ScaledRate {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let b = if bytes_per_sec.is_finite() {
        bytes_per_sec.max(0.0)
    } else {
        0.0
    };
    if b >= GB {
        ScaledRate {
            value: b / GB,
            unit: RateUnit::Giga,
        }
    } else if b >= MB {
        ScaledRate {
            value: b / MB,
            unit: RateUnit::Mega,
        }
    } else {
        ScaledRate {
            value: b / KB,
            unit: RateUnit::Kilo,
        }
    }
}

/// Byte count with a binary-prefixed unit and one decimal: "512B", "3.2GB", "1.50TB".
pub fn human(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut v = bytes as f64 / 1024.0;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == UNITS.len() - 1 {
        format!("{v:.2}{}", UNITS[unit])
    } else {
        format!("{v:.1}{}", UNITS[unit])
    }
}

/// "0:01:07", "1 day, 3:04:05", "12 days, 0:00:09"
pub fn format_uptime(d: Duration) -> String {
    let secs = d.as_secs();
    let days = secs / 86_400;
    let h = (secs % 86_400) / 3_600;
    let m = (secs % 3_600) / 60;
    let s = secs % 60;
    match days {
        0 => format!("{h}:{m:02}:{s:02}"),
        1 => format!("1 day, {h}:{m:02}:{s:02}"),
        n => format!("{n} days, {h}:{m:02}:{s:02}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub mem_percent: Option<f32>,
}

/// One line of the disks table.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskRow {
    pub device: String,
    pub mount: String,
    pub used: u64,
    pub free: u64,
    pub total: u64,
    pub percent: f32,
    pub level: Level,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub tick: u64,
    pub captured_at: DateTime<Local>,
    pub hostname: Option<String>,
    pub uptime: Option<String>,
    pub cpu_temp_c: Option<f32>,
    pub cpu: UsageBar,
    pub memory: UsageBar,
    pub disk: UsageBar,
    /// Every mounted filesystem; the configured one is also `disk`.
    pub disks: Vec<DiskRow>,
    pub upload: Option<ScaledRate>,
    pub download: Option<ScaledRate>,
    /// Ordered by CPU descending.
    pub processes: Vec<ProcessRow>,
    pub process_count: Option<usize>,
    pub top_n: usize,
    /// Shown under the header, e.g. when the whole sample failed.
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FrameComposer {
    pub thresholds: Thresholds,
    pub bar_width: usize,
    pub top_n: usize,
}

impl FrameComposer {
    pub fn new(thresholds: Thresholds, bar_width: usize, top_n: usize) -> Self {
        Self {
            thresholds,
            bar_width: bar_width.max(1),
            top_n,
        }
    }

    pub fn compose(
        &self,
        tick: u64,
        sample: &Sample,
        rates: Option<NetRates>,
        ranked: &[ProcessInfo],
    ) -> Frame {
        let mem_total = sample.memory.map(|m| m.total).filter(|t| *t > 0);
        let processes = ranked
            .iter()
            .map(|p| ProcessRow {
                pid: p.pid,
                name: p.name.chars().take(NAME_WIDTH).collect(),
                cpu_percent: p.cpu_usage,
                mem_percent: mem_total.map(|t| (p.mem_bytes as f64 / t as f64 * 100.0) as f32),
            })
            .collect();
        let alive = sample.processes.iter().filter(|p| p.alive().is_some()).count();

        Frame {
            tick,
            captured_at: Local::now(),
            hostname: sample.hostname.clone(),
            uptime: sample.uptime.map(format_uptime),
            cpu_temp_c: sample.cpu_temp_c,
            cpu: self.bar("CPU", sample.cpu_percent, None),
            memory: self.usage_bar("Memory", sample.memory),
            disk: self.usage_bar("Disk", sample.disk),
            disks: sample.disks.iter().map(|d| self.disk_row(d)).collect(),
            upload: rates.map(|r| scale_rate(r.sent_per_sec)),
            download: rates.map(|r| scale_rate(r.recv_per_sec)),
            processes,
            process_count: (!sample.processes.is_empty()).then_some(alive),
            top_n: self.top_n,
            notice: None,
        }
    }

    /// Frame for a tick whose sample failed outright.
    pub fn unavailable(&self, tick: u64, reason: &str) -> Frame {
        Frame {
            tick,
            captured_at: Local::now(),
            hostname: None,
            uptime: None,
            cpu_temp_c: None,
            cpu: UsageBar::unavailable("CPU"),
            memory: UsageBar::unavailable("Memory"),
            disk: UsageBar::unavailable("Disk"),
            disks: Vec::new(),
            upload: None,
            download: None,
            processes: Vec::new(),
            process_count: None,
            top_n: self.top_n,
            notice: Some(format!("sample {UNAVAILABLE}: {reason}")),
        }
    }

    fn disk_row(&self, d: &DiskInfo) -> DiskRow {
        let usage = Usage {
            used: d.used,
            total: d.total,
        };
        let percent = usage.percent().unwrap_or(0.0);
        DiskRow {
            device: d.name.clone(),
            mount: d.mount.display().to_string(),
            used: d.used,
            free: d.total.saturating_sub(d.used),
            total: d.total,
            percent,
            level: self.thresholds.level(percent),
        }
    }

    fn usage_bar(&self, label: &'static str, usage: Option<Usage>) -> UsageBar {
        let Some(u) = usage else {
            return UsageBar::unavailable(label);
        };
        let detail = format!("{} / {}", human(u.used), human(u.total));
        self.bar(label, u.percent(), Some(detail))
    }

    fn bar(&self, label: &'static str, pct: Option<f32>, detail: Option<String>) -> UsageBar {
        let reading = pct.filter(|p| p.is_finite()).map(|p| {
            let percent = p.clamp(0.0, 100.0);
            let filled = ((percent as f64 / 100.0) * self.bar_width as f64).round() as usize;
            BarReading {
                percent,
                level: self.thresholds.level(percent),
                filled: filled.min(self.bar_width),
                width: self.bar_width,
                detail,
            }
        });
        UsageBar { label, reading }
    }
}
