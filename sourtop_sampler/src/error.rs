//! Sampler error taxonomy.

use std::fmt;

use thiserror::Error;

/// Whole-sample failures. A single missing metric is a [`SampleFieldError`] instead.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("platform is not supported by the metrics provider")]
    Unsupported,
    #[error("metrics provider unavailable: {0}")]
    Unavailable(String),
    #[error("metrics refresh panicked: {0}")]
    RefreshPanicked(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hostname,
    Uptime,
    Cpu,
    CpuTemp,
    Memory,
    Disk,
    Disks,
    Network,
    Processes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Hostname => "hostname",
            Field::Uptime => "uptime",
            Field::Cpu => "cpu",
            Field::CpuTemp => "cpu temperature",
            Field::Memory => "memory",
            Field::Disk => "disk",
            Field::Disks => "disks",
            Field::Network => "network",
            Field::Processes => "processes",
        };
        f.write_str(s)
    }
}

/// One metric unavailable for one tick; the rest of the sample is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} unavailable: {reason}")]
pub struct SampleFieldError {
    pub field: Field,
    pub reason: String,
}

impl SampleFieldError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
