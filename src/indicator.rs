//! Channel-based indicator interface.
//!
//! The actual status-area rendering is owned by the host shell. This module
//! defines the message vocabulary the toggle controller uses to drive its
//! status item, independent of the bar backend: the controller holds an
//! [`IndicatorHandle`] and pushes [`IndicatorUpdate`]s; the host consumes
//! them and feeds [`IndicatorEvent`]s back into the application event loop.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::debug;

/// Configuration for the published status item.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// Name under which the item is published in the status area.
    pub title: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            title: "Screen Share Toggle Indicator".into(),
        }
    }
}

/// Events delivered by the status-area host.
///
/// Primary-button presses and touch activations are distinct at the host
/// boundary but are routed to the same handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    ButtonPress,
    Touch,
}

/// Updates sent to the status-area host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorUpdate {
    /// Display the icon at this path.
    SetIcon(PathBuf),
    /// Remove the status item; no further updates follow.
    Destroy,
}

/// Handle for driving the status item.
///
/// Dropping the handle without calling [`destroy`](Self::destroy) closes the
/// channel but does not tell the host to remove the item.
#[derive(Debug)]
pub struct IndicatorHandle {
    title: String,
    update_tx: mpsc::UnboundedSender<IndicatorUpdate>,
}

impl IndicatorHandle {
    /// Creates a handle and the receiver the host side consumes.
    pub fn new(config: IndicatorConfig) -> (Self, mpsc::UnboundedReceiver<IndicatorUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                title: config.title,
                update_tx,
            },
            update_rx,
        )
    }

    /// Name under which the item is published.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Displays the icon at `path`.
    pub fn set_icon(&self, path: PathBuf) {
        debug!("'{}': set icon {}", self.title, path.display());
        let _ = self.update_tx.send(IndicatorUpdate::SetIcon(path));
    }

    /// Tells the host to remove the status item.
    pub fn destroy(&self) {
        debug!("'{}': destroy", self.title);
        let _ = self.update_tx.send(IndicatorUpdate::Destroy);
    }
}
