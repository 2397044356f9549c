// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for controller and poster values,
//! ensuring they are always within valid ranges.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// ControllerTimeout
// =============================================================================

/// Controller auto-hide timeout bounds, in milliseconds.
pub mod controller_timeout_bounds {
    /// Timeout value meaning "never hide automatically".
    pub const DISABLED_MS: u32 = 0;
    /// Longest accepted timeout (10 minutes).
    pub const MAX_MS: u32 = 600_000;
    /// Default timeout.
    pub const DEFAULT_MS: u32 = 5_000;
}

/// How long the playback controller stays visible after being shown.
///
/// Zero disables auto-hide. Larger values are clamped to
/// [`controller_timeout_bounds::MAX_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTimeout(u32);

impl ControllerTimeout {
    /// Auto-hide disabled.
    pub const DISABLED: Self = Self(controller_timeout_bounds::DISABLED_MS);

    #[must_use]
    pub fn from_millis(ms: u32) -> Self {
        Self(ms.min(controller_timeout_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u32 {
        self.0
    }

    /// Returns the countdown length, or `None` when auto-hide is disabled.
    #[must_use]
    pub fn as_duration(self) -> Option<Duration> {
        if self.is_disabled() {
            None
        } else {
            Some(Duration::from_millis(u64::from(self.0)))
        }
    }

    #[must_use]
    pub fn is_disabled(self) -> bool {
        self.0 == controller_timeout_bounds::DISABLED_MS
    }
}

impl Default for ControllerTimeout {
    fn default() -> Self {
        Self(controller_timeout_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// ScreenMode
// =============================================================================

/// Layout mode of the hosting screen, forwarded to the controller so it can
/// adapt its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenMode {
    /// Portrait, view embedded in the page.
    #[default]
    PortraitInset,
    /// Portrait, view covering the screen.
    PortraitFullscreen,
    /// Landscape, view covering the screen.
    LandscapeFullscreen,
}

impl ScreenMode {
    #[must_use]
    pub fn is_fullscreen(self) -> bool {
        !matches!(self, Self::PortraitInset)
    }
}
