// SPDX-License-Identifier: MPL-2.0
//! Reference playback controller with auto-hide.
//!
//! Keeps visibility and the hide countdown; drawing the buttons is left to the
//! host, which reads [`AutoHideController::is_visible`] when it renders.

use crate::application::port::{ControllerOverlay, Player};
use crate::domain::ui::{ControllerTimeout, ScreenMode};
use std::rc::{Rc, Weak};
use std::time::Instant;

/// Controller visibility state with a cancellable hide countdown.
#[derive(Debug, Default)]
pub struct AutoHideController {
    visible: bool,
    timeout: ControllerTimeout,
    hide_at: Option<Instant>,
    player: Option<Weak<dyn Player>>,
    screen_mode: ScreenMode,
}

impl AutoHideController {
    #[must_use]
    pub fn new(timeout: ControllerTimeout) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// The player currently handed to the controller, if still alive.
    #[must_use]
    pub fn player(&self) -> Option<Rc<dyn Player>> {
        self.player.as_ref().and_then(Weak::upgrade)
    }

    #[must_use]
    pub fn screen_mode(&self) -> ScreenMode {
        self.screen_mode
    }

    fn restart_countdown(&mut self, now: Instant) {
        self.hide_at = self.timeout.as_duration().map(|timeout| now + timeout);
    }
}

impl ControllerOverlay for AutoHideController {
    fn set_player(&mut self, player: Option<Rc<dyn Player>>) {
        self.player = player.as_ref().map(Rc::downgrade);
    }

    fn show(&mut self, now: Instant) {
        self.visible = true;
        self.restart_countdown(now);
    }

    fn hide(&mut self) {
        self.hide_at = None;
        self.visible = false;
    }

    fn hide_after_timeout(&mut self, now: Instant) {
        if self.visible {
            self.restart_countdown(now);
        }
    }

    fn set_auto_hide_timeout(&mut self, timeout: ControllerTimeout) {
        self.timeout = timeout;
        if timeout.is_disabled() {
            self.hide_at = None;
        }
    }

    fn auto_hide_timeout(&self) -> ControllerTimeout {
        self.timeout
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_screen_mode(&mut self, mode: ScreenMode) {
        self.screen_mode = mode;
    }

    fn poll_timeout(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| at <= now) {
            self.hide();
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    fn cancel_timers(&mut self) {
        self.hide_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakePlayer;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn show_starts_countdown() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::new(ControllerTimeout::from_millis(3000));
        controller.show(t0);

        assert!(controller.is_visible());
        assert_eq!(controller.next_deadline(), Some(t0 + ms(3000)));

        controller.poll_timeout(t0 + ms(2999));
        assert!(controller.is_visible());
        controller.poll_timeout(t0 + ms(3000));
        assert!(!controller.is_visible());
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn show_again_cancels_previous_countdown() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::new(ControllerTimeout::from_millis(1000));
        controller.show(t0);
        controller.show(t0 + ms(800));

        controller.poll_timeout(t0 + ms(1000));
        assert!(controller.is_visible());
        controller.poll_timeout(t0 + ms(1800));
        assert!(!controller.is_visible());
    }

    #[test]
    fn hide_after_timeout_resets_without_hiding() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::new(ControllerTimeout::from_millis(1000));
        controller.show(t0);
        controller.hide_after_timeout(t0 + ms(900));

        assert!(controller.is_visible());
        assert_eq!(controller.next_deadline(), Some(t0 + ms(1900)));
    }

    #[test]
    fn hide_after_timeout_ignored_while_hidden() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::default();
        controller.hide_after_timeout(t0);
        assert!(controller.next_deadline().is_none());
        assert!(!controller.is_visible());
    }

    #[test]
    fn explicit_hide_cancels_countdown() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::default();
        controller.show(t0);
        controller.hide();

        assert!(!controller.is_visible());
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn disabled_timeout_keeps_controller_visible() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::new(ControllerTimeout::DISABLED);
        controller.show(t0);
        controller.poll_timeout(t0 + Duration::from_secs(3600));
        assert!(controller.is_visible());
    }

    #[test]
    fn cancel_timers_keeps_visibility() {
        let t0 = Instant::now();
        let mut controller = AutoHideController::default();
        controller.show(t0);
        controller.cancel_timers();
        controller.poll_timeout(t0 + Duration::from_secs(60));
        assert!(controller.is_visible());
    }

    #[test]
    fn player_reference_is_weak() {
        let mut controller = AutoHideController::default();
        let player: Rc<dyn Player> = Rc::new(FakePlayer::default());
        controller.set_player(Some(Rc::clone(&player)));
        assert!(controller.player().is_some());

        drop(player);
        assert!(controller.player().is_none());
    }
}
