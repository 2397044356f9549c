// SPDX-License-Identifier: MPL-2.0
//! Poster and controller port definitions.

use super::player::Player;
use crate::domain::ui::{ControllerTimeout, ScreenMode};
use std::rc::Rc;
use std::time::Instant;

/// Port for the poster image shown before playback and after completion.
///
/// A duration of 0 means "switch immediately, no animation".
pub trait PosterDisplay {
    fn fade_in(&mut self, duration_ms: u32);

    fn fade_out(&mut self, duration_ms: u32);
}

/// Port for the playback controller overlay.
///
/// Timed behavior is cooperative: the view forwards its own clock through
/// [`poll_timeout`](Self::poll_timeout) and asks for
/// [`next_deadline`](Self::next_deadline) when scheduling wake-ups.
/// [`AutoHideController`](crate::presentation::AutoHideController) is the
/// reference implementation.
pub trait ControllerOverlay {
    /// Hands the controller the player it operates, or `None`.
    fn set_player(&mut self, player: Option<Rc<dyn Player>>);

    /// Shows the controller and restarts the auto-hide countdown.
    fn show(&mut self, now: Instant);

    /// Hides immediately and cancels the countdown.
    fn hide(&mut self);

    /// Restarts the countdown without hiding.
    fn hide_after_timeout(&mut self, now: Instant);

    fn set_auto_hide_timeout(&mut self, timeout: ControllerTimeout);

    fn auto_hide_timeout(&self) -> ControllerTimeout;

    fn is_visible(&self) -> bool;

    fn set_screen_mode(&mut self, _mode: ScreenMode) {}

    /// Fires the auto-hide countdown if it is due.
    fn poll_timeout(&mut self, _now: Instant) {}

    /// When the countdown will fire, if one is pending.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Drops any pending countdown without changing visibility.
    fn cancel_timers(&mut self) {}
}
