// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types for video presentation.
//!
//! Nothing here knows about players, surfaces or timers; the types only carry
//! data and the rules that keep that data valid.
//!
//! # Modules
//!
//! - [`ui`]: Controller value objects ([`ControllerTimeout`](ui::ControllerTimeout),
//!   [`ScreenMode`](ui::ScreenMode))
//! - [`video`]: Video types ([`VideoSize`](video::VideoSize),
//!   [`PlaybackState`](video::PlaybackState), [`ScaleMode`](video::ScaleMode),
//!   [`RenderKind`](video::RenderKind))

pub mod ui;
pub mod video;
