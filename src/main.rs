use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use tracing::info;

use zcash_alert::alert::{Alerter, default_player};
use zcash_alert::config::fetch_config;
use zcash_alert::fetcher::AvgPriceClient;
use zcash_alert::monitor::{self, Exit, Monitor};
use zcash_alert::tui::{App, Events, Renderer};
use zcash_alert::{AlertError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match watch().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn watch() -> Result<()> {
    let config = fetch_config()?;
    init_tracing(config.log_file.as_deref())?;

    let client = AvgPriceClient::new(&config.market)?;
    let alerter = Alerter::new(
        config.alert.trigger,
        default_player(config.alert.sound_file.clone()),
    );
    let mut monitor = Monitor::new(
        config.market.ticker.as_str(),
        config.market.fiat.as_str(),
        client,
        alerter,
    );
    let mut app = App::new(&config);

    let mut renderer = Renderer::new()?;
    let mut events = Events::new();
    let exit = monitor::run(
        &mut monitor,
        &mut app,
        &mut renderer,
        &mut events,
        config.interval,
    )
    .await;
    renderer.restore()?;

    match exit {
        Exit::Interrupted => {
            info!("interrupted by user");
            println!("\nExiting.");
            Ok(())
        }
        Exit::Network(e) => {
            println!("{e}");
            Ok(())
        }
        Exit::Terminal(e) => Err(e),
    }
}

/// Sends tracing output to `path`; stdout belongs to the price view.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AlertError::Config(format!("cannot open log file {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
