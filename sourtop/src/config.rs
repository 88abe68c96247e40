//! Runtime configuration: defaults, an optional read-only JSON file, env overrides, CLI flags.
//! File lives under XDG config dir: $XDG_CONFIG_HOME/sourtop/config.json (fallback ~/.config/sourtop/config.json)

use serde::Deserialize;
use std::{fs, io, path::PathBuf, time::Duration};

use sourtop_sampler::SamplerConfig;

use crate::error::ConfigError;
use crate::frame::Thresholds;
use crate::rank::DEFAULT_TOP_N;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interval_ms: u64,
    pub mount_point: PathBuf,
    pub top_n: usize,
    pub thresholds: Thresholds,
    pub bar_width: usize,
    pub max_render_failures: u32,
    pub temperature: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            mount_point: PathBuf::from("/"),
            top_n: DEFAULT_TOP_N,
            thresholds: Thresholds::default(),
            bar_width: 30,
            max_render_failures: 5,
            temperature: true,
            log_file: None,
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sourtop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sourtop")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl Config {
    /// Load `path`, or defaults when the file does not exist.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Apply SOURTOP_* environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|k| std::env::var(k).ok())
    }

    pub fn apply_vars<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("SOURTOP_INTERVAL_MS") {
            self.interval_ms = parse_num("SOURTOP_INTERVAL_MS", &v)?;
        }
        if let Some(v) = get("SOURTOP_MOUNT") {
            if !v.is_empty() {
                self.mount_point = PathBuf::from(v);
            }
        }
        if let Some(v) = get("SOURTOP_TOP_N") {
            self.top_n = parse_num("SOURTOP_TOP_N", &v)?;
        }
        if let Some(v) = get("SOURTOP_TEMP") {
            self.temperature = v != "0";
        }
        if let Some(v) = get("SOURTOP_LOG_FILE") {
            if !v.is_empty() {
                self.log_file = Some(PathBuf::from(v));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms < 100 {
            return Err(ConfigError::Invalid {
                key: "interval_ms",
                reason: format!("{} is below the 100 ms minimum", self.interval_ms),
            });
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid {
                key: "top_n",
                reason: "must be at least 1".into(),
            });
        }
        if self.bar_width == 0 {
            return Err(ConfigError::Invalid {
                key: "bar_width",
                reason: "must be at least 1".into(),
            });
        }
        self.thresholds.validate()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn sampler(&self) -> SamplerConfig {
        SamplerConfig {
            mount_point: self.mount_point.clone(),
            temperature: self.temperature,
        }
    }
}

fn parse_num<T: std::str::FromStr>(key: &'static str, v: &str) -> Result<T, ConfigError> {
    v.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        reason: format!("'{v}' is not a number"),
    })
}
