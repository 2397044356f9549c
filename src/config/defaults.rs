// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the view configuration.
//!
//! # Categories
//!
//! - **Poster**: Poster fade animation
//! - **Surface**: Delayed background opening
//! - **Controller**: Auto-hide timeout

use crate::domain::ui::newtypes::controller_timeout_bounds;

// ==========================================================================
// Poster Defaults
// ==========================================================================

/// Duration of the animated poster fade-out when playback starts.
pub const DEFAULT_POSTER_FADE_MS: u32 = 650;

/// Longest accepted poster fade.
pub const MAX_POSTER_FADE_MS: u32 = 10_000;

// ==========================================================================
// Surface Defaults
// ==========================================================================

/// Delay between playback starting and the surface background turning
/// transparent, so the first decoded frame is on screen before it shows.
pub const DEFAULT_SURFACE_OPEN_DELAY_MS: u32 = 500;

/// Longest accepted surface-open delay.
pub const MAX_SURFACE_OPEN_DELAY_MS: u32 = 10_000;

// ==========================================================================
// Controller Defaults
// ==========================================================================

/// Controller auto-hide timeout (0 disables auto-hide).
pub const DEFAULT_CONTROLLER_TIMEOUT_MS: u32 = controller_timeout_bounds::DEFAULT_MS;

// ==========================================================================
// Compile-time validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_POSTER_FADE_MS <= MAX_POSTER_FADE_MS);
    assert!(DEFAULT_SURFACE_OPEN_DELAY_MS > 0);
    assert!(DEFAULT_SURFACE_OPEN_DELAY_MS <= MAX_SURFACE_OPEN_DELAY_MS);
    assert!(DEFAULT_CONTROLLER_TIMEOUT_MS <= controller_timeout_bounds::MAX_MS);
};
