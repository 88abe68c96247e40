//! The capability surface the monitor loop depends on.

use crate::error::SamplerError;
use crate::types::Sample;

pub trait MetricsProvider {
    /// Take one snapshot. Missing metrics degrade to `None` fields; `Err` means
    /// nothing usable could be read this tick.
    fn sample(&mut self) -> Result<Sample, SamplerError>;
}

impl<P: MetricsProvider + ?Sized> MetricsProvider for Box<P> {
    fn sample(&mut self) -> Result<Sample, SamplerError> {
        (**self).sample()
    }
}
