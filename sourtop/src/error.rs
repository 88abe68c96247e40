//! Error taxonomy for the monitor: fatal startup, per-frame render, and config problems.
//! A single failed sample is not an error here; the loop shows it and moves on.

use std::io;

use sourtop_sampler::SamplerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("metrics provider failed to initialize: {0}")]
    Provider(#[source] SamplerError),
    #[error("terminal could not be initialized: {0}")]
    Terminal(#[source] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// Drawing failed but the surface is still there; the frame is skipped.
    #[error("frame skipped: {0}")]
    Transient(#[source] io::Error),
    /// The terminal is gone; nothing further can be drawn.
    #[error("terminal surface lost: {0}")]
    SurfaceLost(#[source] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::WriteZero => RenderError::SurfaceLost(e),
            _ => RenderError::Transient(e),
        }
    }
}

impl RenderError {
    pub fn is_transient(&self) -> bool {
        matches!(self, RenderError::Transient(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Why the loop ended with an error. Cancellation is not represented here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("rendering failed: {0}")]
    Render(#[source] RenderError),
    #[error("giving up after {0} consecutive render failures")]
    TooManyRenderFailures(u32, #[source] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_terminal_kinds_are_fatal() {
        for kind in [
            io::ErrorKind::BrokenPipe,
            io::ErrorKind::NotConnected,
            io::ErrorKind::UnexpectedEof,
            io::ErrorKind::WriteZero,
        ] {
            let e = RenderError::from(io::Error::from(kind));
            assert!(matches!(e, RenderError::SurfaceLost(_)), "{kind:?}");
            assert!(!e.is_transient());
        }
    }

    #[test]
    fn other_io_errors_skip_the_frame() {
        for kind in [
            io::ErrorKind::Other,
            io::ErrorKind::Interrupted,
            io::ErrorKind::WouldBlock,
        ] {
            assert!(RenderError::from(io::Error::from(kind)).is_transient(), "{kind:?}");
        }
    }
}
