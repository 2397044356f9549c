// SPDX-License-Identifier: MPL-2.0
//! Video presentation domain types.
//!
//! This module contains video-related value objects and enums that are
//! independent of any surface or player implementation.

pub mod playback;
pub mod scale;
pub mod size;

// Re-export commonly used types
pub use playback::{PlaybackState, StateMask};
pub use scale::{RenderKind, ScaleMode};
pub use size::{SampleAspectRatio, VideoSize};
