//! Per-session display preferences

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// The other theme
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Base font size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// 16px base
    #[default]
    Normal,
    /// 18px base
    Large,
}

impl FontSize {
    /// The other size
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            FontSize::Normal => FontSize::Large,
            FontSize::Large => FontSize::Normal,
        }
    }

    /// Root font size in pixels
    #[inline]
    #[must_use]
    pub const fn pixels(self) -> u8 {
        match self {
            FontSize::Normal => 16,
            FontSize::Large => 18,
        }
    }
}
