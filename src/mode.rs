use crate::icons::Icon;

/// Setting value for mirroring the primary display.
pub const MIRROR_PRIMARY: &str = "mirror-primary";
/// Setting value for extending onto a separate virtual display.
pub const EXTEND: &str = "extend";

/// The persisted screen-sharing orientation.
///
/// Exactly two values are valid; anything else read from the settings store
/// is treated as unknown (`from_setting` returns `None`) and never acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenShareMode {
    Mirror,
    Extend,
}

impl ScreenShareMode {
    /// Parses the raw setting string. Returns `None` for unrecognized values.
    pub fn from_setting(value: &str) -> Option<ScreenShareMode> {
        match value {
            MIRROR_PRIMARY => Some(ScreenShareMode::Mirror),
            EXTEND => Some(ScreenShareMode::Extend),
            _ => None,
        }
    }

    /// The string written back to the settings store for this mode.
    pub fn as_setting(self) -> &'static str {
        match self {
            ScreenShareMode::Mirror => MIRROR_PRIMARY,
            ScreenShareMode::Extend => EXTEND,
        }
    }

    /// Returns the opposite mode for toggling.
    pub fn opposite(self) -> ScreenShareMode {
        match self {
            ScreenShareMode::Mirror => ScreenShareMode::Extend,
            ScreenShareMode::Extend => ScreenShareMode::Mirror,
        }
    }

    /// The icon displayed for this mode.
    pub fn icon(self) -> Icon {
        match self {
            ScreenShareMode::Mirror => Icon::Mirror,
            ScreenShareMode::Extend => Icon::Extend,
        }
    }
}
