//! Command-line parsing. No arguments is the normal launch; flags only override config.

use std::{io, path::PathBuf};

use crate::config::{config_path, Config};
use crate::error::ConfigError;

#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    pub interval_ms: Option<u64>,
    pub mount: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub config: Option<PathBuf>,
    pub help: bool,
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--interval MS|-i MS] [--mount PATH|-m PATH] [--top N|-n N] [--config PATH|-c PATH]\n\
         Runs until 'q', Esc or Ctrl+C."
    )
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "sourtop".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value and --flag value are both accepted
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            inline
                .clone()
                .or_else(|| it.next())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("{name} needs a value. {}", usage(&prog)))
        };
        match flag.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--interval" | "-i" => {
                let v = value("--interval")?;
                parsed.interval_ms = Some(
                    v.parse()
                        .map_err(|_| format!("invalid interval '{v}'. {}", usage(&prog)))?,
                );
            }
            "--mount" | "-m" => parsed.mount = Some(PathBuf::from(value("--mount")?)),
            "--top" | "-n" => {
                let v = value("--top")?;
                parsed.top_n = Some(
                    v.parse()
                        .map_err(|_| format!("invalid process count '{v}'. {}", usage(&prog)))?,
                );
            }
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value("--config")?)),
            _ => return Err(format!("Unexpected argument '{arg}'. {}", usage(&prog))),
        }
    }
    Ok(parsed)
}

impl ParsedArgs {
    /// Defaults <- config file <- SOURTOP_* env <- flags, then validated.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        self.resolve_with(|k| std::env::var(k).ok())
    }

    pub fn resolve_with<F>(&self, env: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An explicitly named file has to exist; the default location is optional.
        if let Some(p) = &self.config {
            if !p.exists() {
                return Err(ConfigError::Read {
                    path: p.display().to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
                });
            }
        }
        let path = self.config.clone().unwrap_or_else(config_path);
        let mut c = Config::load(&path)?;
        c.apply_vars(env)?;
        if let Some(v) = self.interval_ms {
            c.interval_ms = v;
        }
        if let Some(m) = &self.mount {
            c.mount_point = m.clone();
        }
        if let Some(n) = self.top_n {
            c.top_n = n;
        }
        c.validate()?;
        Ok(c)
    }
}
