//! Integration tests for the screen-share toggle.
//!
//! These exercise the controller against the in-memory settings store and
//! the indicator channel end to end: activation, click handling, the
//! edge-trigger restart helper, and deactivation.

use crate::config::Config;
use crate::controller::{ControllerError, ToggleController};
use crate::indicator::{IndicatorConfig, IndicatorHandle, IndicatorUpdate};
use crate::mode::{ScreenShareMode, EXTEND, MIRROR_PRIMARY};
use crate::settings::{
    MemorySettings, SettingsStore, ENABLE_KEY, SCREEN_SHARE_MODE_KEY,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn create_store(mode: &str, enabled: bool) -> Arc<MemorySettings> {
        Arc::new(
            MemorySettings::new()
                .with_string(SCREEN_SHARE_MODE_KEY, mode)
                .with_boolean(ENABLE_KEY, enabled),
        )
    }

    async fn activate(
        store: &Arc<MemorySettings>,
    ) -> (ToggleController, UnboundedReceiver<IndicatorUpdate>) {
        let config = Config {
            icons_dir: PathBuf::from("/usr/share/screenshare-toggle/icons"),
            ..Config::default()
        };
        let (indicator, updates) = IndicatorHandle::new(IndicatorConfig {
            title: config.indicator_title(),
        });
        let mut controller = ToggleController::new(config);
        controller.activate(store.clone(), indicator).await.unwrap();
        (controller, updates)
    }

    fn drain_icons(updates: &mut UnboundedReceiver<IndicatorUpdate>) -> Vec<String> {
        let mut icons = Vec::new();
        while let Ok(update) = updates.try_recv() {
            if let IndicatorUpdate::SetIcon(path) = update {
                icons.push(
                    path.file_name()
                        .unwrap()
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }
        icons
    }

    #[tokio::test]
    async fn test_full_click_cycle() {
        let store = create_store(MIRROR_PRIMARY, false);
        let (controller, mut updates) = activate(&store).await;

        // Initial icon from the stored mode, no writes at startup.
        assert_eq!(drain_icons(&mut updates), vec!["mirror.svg"]);
        assert_eq!(store.write_count(), 0);

        // First click: mirror -> extend, one write, one flush.
        controller.on_activation_event().await.unwrap();
        assert_eq!(store.get_string(SCREEN_SHARE_MODE_KEY).await.unwrap(), EXTEND);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.sync_count(), 1);
        assert_eq!(drain_icons(&mut updates), vec!["extend.svg"]);

        // Second click returns to mirror: the round-trip law.
        controller.on_activation_event().await.unwrap();
        assert_eq!(
            store.get_string(SCREEN_SHARE_MODE_KEY).await.unwrap(),
            MIRROR_PRIMARY
        );
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.sync_count(), 2);
        assert_eq!(drain_icons(&mut updates), vec!["mirror.svg"]);
    }

    #[tokio::test]
    async fn test_unknown_value_keeps_stale_display() {
        let store = create_store(MIRROR_PRIMARY, false);
        let (controller, mut updates) = activate(&store).await;
        assert_eq!(drain_icons(&mut updates), vec!["mirror.svg"]);

        // Another actor writes a value this controller does not understand.
        store
            .set_string(SCREEN_SHARE_MODE_KEY, "vnc-shared")
            .await
            .unwrap();
        let writes_before = store.write_count();

        controller.on_activation_event().await.unwrap();

        // Clicking did nothing: no write, no flush, icon still mirror.
        assert_eq!(store.write_count(), writes_before);
        assert_eq!(store.sync_count(), 0);
        assert!(drain_icons(&mut updates).is_empty());
        assert_eq!(
            store.get_string(SCREEN_SHARE_MODE_KEY).await.unwrap(),
            "vnc-shared"
        );
    }

    #[tokio::test]
    async fn test_external_change_between_clicks_is_honored() {
        let store = create_store(EXTEND, false);
        let (controller, mut updates) = activate(&store).await;
        assert_eq!(drain_icons(&mut updates), vec!["extend.svg"]);

        controller.on_activation_event().await.unwrap();
        assert_eq!(drain_icons(&mut updates), vec!["mirror.svg"]);

        // External actor switches back to extend before the next click.
        store
            .set_string(SCREEN_SHARE_MODE_KEY, EXTEND)
            .await
            .unwrap();

        controller.on_activation_event().await.unwrap();
        assert_eq!(
            store.get_string(SCREEN_SHARE_MODE_KEY).await.unwrap(),
            MIRROR_PRIMARY
        );
        assert_eq!(drain_icons(&mut updates), vec!["mirror.svg"]);
    }

    #[tokio::test]
    async fn test_restart_mirroring_edge_trigger() {
        let store = create_store(EXTEND, true);
        let (controller, _updates) = activate(&store).await;

        controller.restart_mirroring_if_needed().await.unwrap();
        assert!(store.get_boolean(ENABLE_KEY).await.unwrap());
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.sync_count(), 2);

        // Disabled backend: the helper must not touch the store at all.
        store.set_boolean(ENABLE_KEY, false).await.unwrap();
        let writes_before = store.write_count();
        let syncs_before = store.sync_count();

        controller.restart_mirroring_if_needed().await.unwrap();
        assert_eq!(store.write_count(), writes_before);
        assert_eq!(store.sync_count(), syncs_before);
        assert!(!store.get_boolean(ENABLE_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn test_restart_helper_is_not_wired_to_clicks() {
        let store = create_store(MIRROR_PRIMARY, true);
        let (controller, _updates) = activate(&store).await;

        controller.on_activation_event().await.unwrap();

        // Only the mode write and its flush; the enable flag was not cycled.
        assert!(store.get_boolean(ENABLE_KEY).await.unwrap());
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.sync_count(), 1);
    }

    #[tokio::test]
    async fn test_deactivate_then_reactivate() {
        let store = create_store(EXTEND, false);
        let (mut controller, mut updates) = activate(&store).await;
        drain_icons(&mut updates);

        controller.deactivate();
        assert_eq!(updates.try_recv().unwrap(), IndicatorUpdate::Destroy);
        assert!(matches!(
            controller.on_activation_event().await.unwrap_err(),
            ControllerError::NotActive
        ));

        // A fresh activation brings the controller back with current state.
        let (indicator, mut updates) = IndicatorHandle::new(IndicatorConfig::default());
        controller.activate(store.clone(), indicator).await.unwrap();
        assert_eq!(drain_icons(&mut updates), vec!["extend.svg"]);
        controller.on_activation_event().await.unwrap();
        assert_eq!(
            store.get_string(SCREEN_SHARE_MODE_KEY).await.unwrap(),
            MIRROR_PRIMARY
        );
    }

    #[test]
    fn test_mode_and_icon_tables_agree() {
        for (value, icon) in [(MIRROR_PRIMARY, "mirror.svg"), (EXTEND, "extend.svg")] {
            let mode = ScreenShareMode::from_setting(value).unwrap();
            assert_eq!(mode.icon().file_name(), icon);
            assert_eq!(crate::icons::icon_for_setting(value), mode.icon());
        }
    }
}
