//! Icon model and path resolution.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pixel sizes a flag icon is registered for.
pub const FLAG_SIZES: [u32; 4] = [16, 32, 48, 128];

/// The icon that should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Neutral icon used when no country is known.
    Default,
    /// Flag of the given country (code is lowercase).
    Flag(String),
}

impl Icon {
    /// Picks the icon for a country code.
    ///
    /// An empty code yields [`Icon::Default`]; any other code is lowercased.
    #[must_use]
    pub fn for_country(code: &str) -> Self {
        if code.is_empty() {
            Self::Default
        } else {
            Self::Flag(code.to_lowercase())
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Flag(code) => write!(f, "flag:{code}"),
        }
    }
}

/// A resolved icon reference handed to an [`IconSink`](super::IconSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconRef {
    /// A single image used at every size.
    Default(PathBuf),
    /// One image path per pixel size.
    Sized(Vec<(u32, PathBuf)>),
}

impl IconRef {
    /// Returns the path registered for `size`, if any.
    ///
    /// For [`IconRef::Default`] the single path is returned for every size.
    #[must_use]
    pub fn path_for(&self, size: u32) -> Option<&PathBuf> {
        match self {
            Self::Default(path) => Some(path),
            Self::Sized(paths) => paths.iter().find(|(s, _)| *s == size).map(|(_, p)| p),
        }
    }
}

/// Where icon images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTheme {
    /// Directory holding `<code>.png` flag images
    pub flags_dir: PathBuf,
    /// Image used when no country is known
    pub default_icon: PathBuf,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            flags_dir: PathBuf::from("flags"),
            default_icon: PathBuf::from("icon.png"),
        }
    }
}

impl IconTheme {
    /// Creates a theme from a flags directory and a default icon path.
    #[must_use]
    pub fn new(flags_dir: impl Into<PathBuf>, default_icon: impl Into<PathBuf>) -> Self {
        Self {
            flags_dir: flags_dir.into(),
            default_icon: default_icon.into(),
        }
    }

    /// Returns the flag image path for a country code.
    #[must_use]
    pub fn flag_path(&self, code: &str) -> PathBuf {
        self.flags_dir.join(format!("{}.png", code.to_lowercase()))
    }

    /// Resolves an icon to concrete image paths.
    #[must_use]
    pub fn resolve(&self, icon: &Icon) -> IconRef {
        match icon {
            Icon::Default => IconRef::Default(self.default_icon.clone()),
            Icon::Flag(code) => {
                let path = self.flag_path(code);
                IconRef::Sized(FLAG_SIZES.iter().map(|&s| (s, path.clone())).collect())
            }
        }
    }
}
