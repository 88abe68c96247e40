//! Loop controller: tick cadence, sampling, frame composition, rendering and cancellation.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use sourtop_sampler::MetricsProvider;

use crate::config::Config;
use crate::error::{AppError, StartupError};
use crate::frame::{Frame, FrameComposer};
use crate::rank::rank;
use crate::rate::RateCalculator;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct App {
    state: LoopState,
    ticks: u64,
    period: Duration,
    top_n: usize,

    // Previous network counters; the only state carried between ticks
    rates: RateCalculator,
    composer: FrameComposer,

    max_render_failures: u32,
    render_failures: u32,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            state: LoopState::Idle,
            ticks: 0,
            period: config.interval(),
            top_n: config.top_n,
            rates: RateCalculator::new(),
            composer: FrameComposer::new(config.thresholds, config.bar_width, config.top_n),
            max_render_failures: config.max_render_failures,
            render_failures: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Ticks started so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Take one sample before the terminal is touched. A provider that cannot produce
    /// even that is a startup failure, not a dashboard full of "unavailable".
    /// The result only proves the provider works; rates still start from zero on the first tick.
    pub fn prime<P>(&self, provider: &mut P) -> Result<(), StartupError>
    where
        P: MetricsProvider + ?Sized,
    {
        let sample = provider.sample().map_err(StartupError::Provider)?;
        debug!(degraded = sample.degraded.len(), "provider primed");
        Ok(())
    }

    /// Run until `stop` turns true. The renderer is restored exactly once before returning,
    /// whether the loop was cancelled or failed.
    pub async fn run<P, R>(
        &mut self,
        provider: &mut P,
        renderer: &mut R,
        stop: watch::Receiver<bool>,
    ) -> Result<(), AppError>
    where
        P: MetricsProvider + ?Sized,
        R: Renderer + ?Sized,
    {
        self.state = LoopState::Running;
        info!(period_ms = self.period.as_millis() as u64, "monitor loop started");

        let res = self.event_loop(provider, renderer, stop).await;
        self.state = LoopState::Stopped;

        // Teardown
        let restored = renderer.restore();
        info!(ticks = self.ticks, ok = res.is_ok(), "monitor loop stopped");
        match (res, restored) {
            (Err(e), Err(re)) => {
                warn!("terminal restore failed: {re}");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), Err(re)) => Err(AppError::Render(re)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    async fn event_loop<P, R>(
        &mut self,
        provider: &mut P,
        renderer: &mut R,
        mut stop: watch::Receiver<bool>,
    ) -> Result<(), AppError>
    where
        P: MetricsProvider + ?Sized,
        R: Renderer + ?Sized,
    {
        // Fixed schedule from the first tick, so render time does not push later ticks back.
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancelled(&mut stop) => break,
                _ = ticker.tick() => {}
            }
            self.tick(provider, renderer)?;
        }
        Ok(())
    }

    /// One sample -> derive -> compose -> render pass.
    pub fn tick<P, R>(&mut self, provider: &mut P, renderer: &mut R) -> Result<(), AppError>
    where
        P: MetricsProvider + ?Sized,
        R: Renderer + ?Sized,
    {
        self.ticks += 1;
        let frame = self.next_frame(provider);

        match renderer.render(&frame) {
            Ok(()) => {
                self.render_failures = 0;
                Ok(())
            }
            Err(e) if e.is_transient() => {
                self.render_failures += 1;
                warn!(tick = self.ticks, failures = self.render_failures, "{e}");
                if self.render_failures > self.max_render_failures {
                    return Err(AppError::TooManyRenderFailures(self.render_failures, e));
                }
                Ok(())
            }
            Err(e) => Err(AppError::Render(e)),
        }
    }

    fn next_frame<P>(&mut self, provider: &mut P) -> Frame
    where
        P: MetricsProvider + ?Sized,
    {
        match provider.sample() {
            Ok(sample) => {
                let rates = self.rates.update(&sample);
                let ranked = rank(&sample.processes, self.top_n);
                debug!(
                    tick = self.ticks,
                    degraded = sample.degraded.len(),
                    "sampled"
                );
                self.composer.compose(self.ticks, &sample, rates, &ranked)
            }
            Err(e) => {
                warn!(tick = self.ticks, "sample failed: {e}");
                // The next rate must be against the tick right before it, and this one has none.
                self.rates.reset();
                self.composer.unavailable(self.ticks, &e.to_string())
            }
        }
    }
}

/// Resolves once `stop` reads true. A dropped sender can never cancel, so that waits forever.
async fn cancelled(stop: &mut watch::Receiver<bool>) {
    let raised = stop.wait_for(|v| *v).await.is_ok();
    if !raised {
        std::future::pending::<()>().await;
    }
}
