// SPDX-License-Identifier: MPL-2.0
//! Observer traits for the view's fan-out.

use crate::domain::video::{PlaybackState, VideoSize};

/// Receives playback-state and volume changes relayed by the view.
pub trait VideoStateListener {
    fn on_state_changed(&self, old: PlaybackState, new: PlaybackState);

    fn on_volume_changed(&self, _start: i32, _end: i32) {}
}

/// Receives every video size report, including unknown (zero) sizes.
pub trait VideoSizeListener {
    fn on_video_size_changed(&self, size: VideoSize);
}
