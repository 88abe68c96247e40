//! Per-second network rates from cumulative counters.

use std::time::Instant;

use sourtop_sampler::Sample;

/// Smallest elapsed time used as a divisor, in seconds.
pub const EPSILON_SECS: f64 = 1e-6;

/// Counters and timestamp of the immediately preceding tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateState {
    pub sent: u64,
    pub received: u64,
    pub at: Instant,
}

/// Bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetRates {
    pub sent_per_sec: f64,
    pub recv_per_sec: f64,
}

/// Rates for `current` against `previous`. None when the sample carries no counters.
/// First tick (no previous) yields zeros; a counter that went backwards yields zero for that direction.
pub fn rate(current: &Sample, previous: Option<&RateState>) -> Option<NetRates> {
    let now = current.network?;
    let Some(prev) = previous else {
        return Some(NetRates::default());
    };
    let dt = current
        .taken_at
        .saturating_duration_since(prev.at)
        .as_secs_f64()
        .max(EPSILON_SECS);
    Some(NetRates {
        sent_per_sec: now.sent.saturating_sub(prev.sent) as f64 / dt,
        recv_per_sec: now.received.saturating_sub(prev.received) as f64 / dt,
    })
}

/// Owns the single previous-sample state; each update replaces it.
#[derive(Debug, Default)]
pub struct RateCalculator {
    state: Option<RateState>,
}

impl RateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&RateState> {
        self.state.as_ref()
    }

    /// Forget the previous tick; the next update is treated as a first tick.
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn update(&mut self, current: &Sample) -> Option<NetRates> {
        let rates = rate(current, self.state.as_ref());
        // Without counters there is nothing to diff against next tick either.
        self.state = current.network.map(|n| RateState {
            sent: n.sent,
            received: n.received,
            at: current.taken_at,
        });
        rates
    }
}
