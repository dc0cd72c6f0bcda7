use std::path::{Path, PathBuf};

use crate::mode::MIRROR_PRIMARY;

/// The two icons the indicator can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Extend,
    Mirror,
}

impl Icon {
    /// File name of this icon under the configured icons directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Icon::Extend => "extend.svg",
            Icon::Mirror => "mirror.svg",
        }
    }
}

/// Derives the icon from a raw setting string.
///
/// Only `mirror-primary` maps to the mirror icon; everything else, including
/// unrecognized values, falls back to the extend icon. Used for the initial
/// icon at activation, where an unknown value must still display something.
pub fn icon_for_setting(value: &str) -> Icon {
    if value == MIRROR_PRIMARY {
        Icon::Mirror
    } else {
        Icon::Extend
    }
}

/// Resolves an icon to its file path under `icons_dir`.
pub fn resolve_icon_path(icons_dir: &Path, icon: Icon) -> PathBuf {
    icons_dir.join(icon.file_name())
}
