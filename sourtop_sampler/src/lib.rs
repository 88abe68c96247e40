//! Host metric sampling for sourtop.
//!
//! The TUI only depends on the [`MetricsProvider`] capability; [`SysinfoProvider`]
//! is the production implementation backed by `sysinfo`.

pub mod error;
pub mod metrics;
pub mod provider;
pub mod types;

pub use error::{Field, SampleFieldError, SamplerError};
pub use metrics::{SamplerConfig, SysinfoProvider};
pub use provider::MetricsProvider;
pub use types::{DiskInfo, NetCounters, ProcessEntry, ProcessInfo, Sample, Usage};
