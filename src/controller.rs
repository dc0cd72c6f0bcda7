use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::icons;
use crate::indicator::IndicatorHandle;
use crate::mode::ScreenShareMode;
use crate::settings::{SettingsError, SettingsStore, ENABLE_KEY, SCREEN_SHARE_MODE_KEY};

/// Errors from toggle controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The controller was used before activation or after deactivation.
    #[error("toggle controller is not active")]
    NotActive,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// The status-bar toggle controller.
///
/// Holds the settings-store and indicator handles between [`activate`] and
/// [`deactivate`](Self::deactivate), reads the current screen-share mode on
/// every activation event, and writes the opposite mode back.
///
/// The toggle decision is always computed from a fresh read of the store,
/// never from the last icon shown, so a mode change made by another actor
/// between clicks is honored.
///
/// [`activate`]: Self::activate
pub struct ToggleController {
    config: Config,
    settings: Option<Arc<dyn SettingsStore>>,
    indicator: Option<IndicatorHandle>,
}

impl ToggleController {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            settings: None,
            indicator: None,
        }
    }

    /// Whether the controller currently holds its collaborator handles.
    pub fn is_active(&self) -> bool {
        self.settings.is_some()
    }

    /// Takes ownership of the collaborator handles and publishes the initial
    /// icon from the current mode. Read-only: no value is written back at
    /// startup, even when the stored value is unrecognized.
    ///
    /// # Errors
    ///
    /// Fails only if the initial read from the settings store fails.
    pub async fn activate(
        &mut self,
        settings: Arc<dyn SettingsStore>,
        indicator: IndicatorHandle,
    ) -> Result<(), ControllerError> {
        info!("Enabling {}", self.config.name);

        let current = settings.get_string(SCREEN_SHARE_MODE_KEY).await?;
        let icon = icons::icon_for_setting(&current);
        debug!("Initial mode value '{}', icon {:?}", current, icon);
        indicator.set_icon(self.config.icon_path(icon));

        self.settings = Some(settings);
        self.indicator = Some(indicator);
        Ok(())
    }

    /// Destroys the indicator and releases both handles. The controller
    /// cannot be used again without another [`activate`](Self::activate).
    pub fn deactivate(&mut self) {
        info!("Disabling {}", self.config.name);

        if let Some(indicator) = self.indicator.take() {
            indicator.destroy();
        }
        self.settings = None;
    }

    /// Handler for primary-button and touch activation events.
    ///
    /// Re-reads the mode from the store and switches to the opposite one.
    /// An unrecognized stored value is logged and left untouched: no write,
    /// no flush, no icon change.
    pub async fn on_activation_event(&self) -> Result<(), ControllerError> {
        let settings = self.settings.as_ref().ok_or(ControllerError::NotActive)?;

        let current = settings.get_string(SCREEN_SHARE_MODE_KEY).await?;
        match ScreenShareMode::from_setting(&current) {
            Some(mode) => self.switch_to(mode.opposite()).await,
            None => {
                warn!("Unknown screen-share-mode value: {}", current);
                Ok(())
            }
        }
    }

    /// Writes `mode` back, flushes the store, then updates the icon. The
    /// flush happens before the icon update so the persisted value and the
    /// displayed icon cannot disagree after a successful switch.
    async fn switch_to(&self, mode: ScreenShareMode) -> Result<(), ControllerError> {
        let settings = self.settings.as_ref().ok_or(ControllerError::NotActive)?;
        let indicator = self.indicator.as_ref().ok_or(ControllerError::NotActive)?;

        settings
            .set_string(SCREEN_SHARE_MODE_KEY, mode.as_setting())
            .await?;
        settings.sync().await?;

        debug!("Switched screen-share mode to {}", mode.as_setting());
        indicator.set_icon(self.config.icon_path(mode.icon()));
        Ok(())
    }

    /// Forces consumers of the `enable` flag to observe a false→true edge.
    ///
    /// The remote-desktop backend only re-reads the share mode when the
    /// enable flag rises, not when the mode changes on its own. When the
    /// flag is currently false this is a no-op. Not called from the click
    /// path.
    pub async fn restart_mirroring_if_needed(&self) -> Result<(), ControllerError> {
        let settings = self.settings.as_ref().ok_or(ControllerError::NotActive)?;

        if !settings.get_boolean(ENABLE_KEY).await? {
            return Ok(());
        }

        settings.set_boolean(ENABLE_KEY, false).await?;
        settings.sync().await?;
        settings.set_boolean(ENABLE_KEY, true).await?;
        settings.sync().await?;

        debug!("Cycled '{}' to restart mirroring", ENABLE_KEY);
        Ok(())
    }
}
