pub mod config;
pub mod controller;
pub mod icons;
pub mod indicator;
pub mod mode;
pub mod settings;

#[cfg(test)]
pub mod toggle_integration_tests;

pub use config::{load_config, Config};
pub use controller::{ControllerError, ToggleController};
pub use icons::{icon_for_setting, resolve_icon_path, Icon};
pub use indicator::{IndicatorConfig, IndicatorEvent, IndicatorHandle, IndicatorUpdate};
pub use mode::{ScreenShareMode, EXTEND, MIRROR_PRIMARY};
pub use settings::{
    GsettingsStore, MemorySettings, SettingsError, SettingsStore, ENABLE_KEY, RDP_SCHEMA,
    SCREEN_SHARE_MODE_KEY,
};
