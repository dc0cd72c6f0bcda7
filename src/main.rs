use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

mod config;
mod controller;
mod icons;
mod indicator;
mod mode;
mod settings;

use crate::config::load_config;
use crate::controller::ToggleController;
use crate::indicator::{IndicatorConfig, IndicatorEvent, IndicatorHandle, IndicatorUpdate};
use crate::settings::GsettingsStore;

/// Bridges the indicator update stream to stdout, one icon path per line,
/// so a bar's listening module can render it. Exits on `Destroy`.
async fn publish_updates(mut updates: mpsc::UnboundedReceiver<IndicatorUpdate>) {
    while let Some(update) = updates.recv().await {
        match update {
            IndicatorUpdate::SetIcon(path) => println!("{}", path.display()),
            IndicatorUpdate::Destroy => {
                debug!("Indicator destroyed, stopping update publisher");
                break;
            }
        }
    }
}

/// Reads activation events from stdin: a line reading `touch` is a touch
/// activation, any other line a primary-button press. The channel closes
/// when stdin does.
async fn read_events(events: mpsc::UnboundedSender<IndicatorEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let event = if line.trim() == "touch" {
            IndicatorEvent::Touch
        } else {
            IndicatorEvent::ButtonPress
        };
        if events.send(event).is_err() {
            break;
        }
    }
    debug!("Event input closed");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting screenshare-toggle");

    let config_path = std::env::var("SCREENSHARE_TOGGLE_CONFIG")
        .ok()
        .map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    info!("Schema: {}", config.schema);
    info!("Icons directory: {}", config.icons_dir.display());

    // Fatal when the schema is not installed; nothing to recover here.
    let store = Arc::new(GsettingsStore::open(&config.schema).await?);

    let (indicator, updates) = IndicatorHandle::new(IndicatorConfig {
        title: config.indicator_title(),
    });
    tokio::spawn(publish_updates(updates));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_events(event_tx));

    let mut controller = ToggleController::new(config);
    controller.activate(store, indicator).await?;

    info!("Indicator published, waiting for activation events");

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                match event {
                    Some(event) => {
                        debug!("Activation event: {:?}", event);
                        if let Err(e) = controller.on_activation_event().await {
                            // A failed settings write is not retried.
                            error!("Toggle failed: {}", e);
                            controller.deactivate();
                            return Err(e.into());
                        }
                    }
                    None => {
                        warn!("Event source closed, shutting down");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    controller.deactivate();
    Ok(())
}
