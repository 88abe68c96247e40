//! Entry point for the sourtop TUI. Parses args, builds the provider and renderer, runs the App.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;

use sourtop::app::App;
use sourtop::cli::{parse_args, usage, ParsedArgs};
use sourtop::error::StartupError;
use sourtop::render::TerminalRenderer;
use sourtop::sampler::SysinfoProvider;
use sourtop::{input, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    if parsed.help {
        println!("{}", usage("sourtop"));
        return ExitCode::SUCCESS;
    }

    match run(parsed).await {
        Ok(()) => {
            println!("Exiting sourtop...");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("sourtop: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(parsed: ParsedArgs) -> anyhow::Result<()> {
    let config = parsed.resolve().map_err(StartupError::from)?;
    if let Some(path) = config.log_file.as_deref() {
        logging::init(Some(path))
            .with_context(|| format!("cannot open log file {}", path.display()))?;
    }

    let mut provider = SysinfoProvider::new(config.sampler()).map_err(StartupError::Provider)?;
    let mut app = App::new(&config);
    app.prime(&mut provider)?;
    let mut renderer = TerminalRenderer::new()?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let stop_tx = Arc::new(stop_tx);
    let keys = input::spawn_key_watcher(stop_tx.clone());
    let signals = input::spawn_signal_watcher(stop_tx.clone());

    let res = app.run(&mut provider, &mut renderer, stop_rx).await;

    // Wind down the watchers; the key thread notices within one poll interval.
    stop_tx.send_replace(true);
    signals.abort();
    let _ = keys.await;
    drop(renderer);

    res.context("monitor loop failed")
}
