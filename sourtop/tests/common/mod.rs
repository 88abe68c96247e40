//! Fakes shared by the integration tests: a scripted metrics provider and a recording renderer.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use sourtop::error::RenderError;
use sourtop::frame::Frame;
use sourtop::render::Renderer;
use sourtop::sampler::{
    DiskInfo, MetricsProvider, NetCounters, ProcessEntry, ProcessInfo, Sample, SamplerError, Usage,
};
use tokio::sync::watch;

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn proc(pid: u32, name: &str, cpu: f32) -> ProcessEntry {
    ProcessEntry::Alive(ProcessInfo {
        pid,
        name: name.to_string(),
        cpu_usage: cpu,
        mem_bytes: 256 * 1024 * 1024,
    })
}

/// A fully populated sample `secs` after `base`.
pub fn sample_at(base: Instant, secs: u64, sent: u64, received: u64) -> Sample {
    let mut s = Sample::empty(base + Duration::from_secs(secs));
    s.hostname = Some("testhost".into());
    s.uptime = Some(Duration::from_secs(3_600 + secs));
    s.cpu_percent = Some(42.0);
    s.memory = Some(Usage {
        used: 4 * GIB,
        total: 16 * GIB,
    });
    s.disk = Some(Usage {
        used: 90 * GIB,
        total: 100 * GIB,
    });
    s.disks = vec![
        DiskInfo {
            name: "/dev/sda1".into(),
            mount: "/".into(),
            used: 90 * GIB,
            total: 100 * GIB,
        },
        DiskInfo {
            name: "/dev/sdb1".into(),
            mount: "/home".into(),
            used: 100 * GIB,
            total: 400 * GIB,
        },
    ];
    s.network = Some(NetCounters { sent, received });
    s.processes = vec![
        proc(1, "init", 0.1),
        proc(200, "compiler", 75.0),
        proc(300, "browser", 12.5),
        ProcessEntry::Exited { pid: 400 },
    ];
    s
}

/// Hands out scripted results in order; repeats the last one when the script runs out.
pub struct ScriptedProvider {
    script: VecDeque<Result<Sample, SamplerError>>,
    last: Option<Sample>,
    pub calls: usize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Sample, SamplerError>>) -> Self {
        Self {
            script: script.into(),
            last: None,
            calls: 0,
        }
    }
}

impl MetricsProvider for ScriptedProvider {
    fn sample(&mut self) -> Result<Sample, SamplerError> {
        self.calls += 1;
        match self.script.pop_front() {
            Some(Ok(s)) => {
                self.last = Some(s.clone());
                Ok(s)
            }
            Some(Err(e)) => Err(e),
            None => self
                .last
                .clone()
                .ok_or_else(|| SamplerError::Unavailable("script exhausted".into())),
        }
    }
}

pub enum Failure {
    Transient,
    SurfaceLost,
}

/// Records frames and cleanup calls; can raise the stop signal after N frames.
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
    pub restores: usize,
    pub render_calls: usize,
    stop_after: Option<(usize, watch::Sender<bool>)>,
    fail: Option<Failure>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            restores: 0,
            render_calls: 0,
            stop_after: None,
            fail: None,
        }
    }

    pub fn stop_after(mut self, frames: usize, tx: watch::Sender<bool>) -> Self {
        self.stop_after = Some((frames, tx));
        self
    }

    pub fn failing(mut self, f: Failure) -> Self {
        self.fail = Some(f);
        self
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        self.render_calls += 1;
        match self.fail {
            Some(Failure::Transient) => {
                return Err(RenderError::Transient(std::io::Error::other("flaky tty")))
            }
            Some(Failure::SurfaceLost) => {
                return Err(RenderError::SurfaceLost(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "tty gone",
                )))
            }
            None => {}
        }
        self.frames.push(frame.clone());
        if let Some((n, tx)) = &self.stop_after {
            if self.frames.len() >= *n {
                tx.send_replace(true);
            }
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        self.restores += 1;
        Ok(())
    }
}
