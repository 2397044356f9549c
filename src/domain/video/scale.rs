// SPDX-License-Identifier: MPL-2.0
//! Scale policies and render surface kinds.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the source video maps onto the available display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Largest aspect-preserving rectangle inside the container (letterbox).
    #[default]
    Fit,
    /// Smallest aspect-preserving rectangle covering the container (crop).
    Fill,
    /// Content size (SAR corrected), shrunk like `Fit` when it overflows.
    Wrap,
    /// Container size, aspect ratio ignored.
    Match,
    /// Fit with the aspect ratio forced to 16:9.
    #[serde(rename = "16_9")]
    Forced16By9,
    /// Fit with the aspect ratio forced to 4:3.
    #[serde(rename = "4_3")]
    Forced4By3,
}

impl ScaleMode {
    pub const ALL: [Self; 6] = [
        Self::Fit,
        Self::Fill,
        Self::Wrap,
        Self::Match,
        Self::Forced16By9,
        Self::Forced4By3,
    ];

    /// The hard-set `(num, den)` aspect ratio of the forced modes.
    #[must_use]
    pub fn forced_aspect(self) -> Option<(u32, u32)> {
        match self {
            Self::Forced16By9 => Some((16, 9)),
            Self::Forced4By3 => Some((4, 3)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Wrap => "wrap",
            Self::Match => "match",
            Self::Forced16By9 => "16_9",
            Self::Forced4By3 => "4_3",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([':', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown scale mode '{s}'")))
    }
}

/// Which drawing-surface technology backs the view.
///
/// Switching kinds always builds a fresh surface binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// No surface; video is not shown.
    None,
    /// A dedicated compositor surface.
    #[default]
    Surface,
    /// A texture drawn inside the view hierarchy.
    Texture,
}

impl RenderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Surface => "surface",
            Self::Texture => "texture",
        }
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "surface" => Ok(Self::Surface),
            "texture" => Ok(Self::Texture),
            other => Err(Error::InvalidArgument(format!(
                "unknown render kind '{other}'"
            ))),
        }
    }
}
