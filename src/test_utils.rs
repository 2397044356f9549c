// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float assertions and recording fakes for the ports.
//!
//! Every fake hands out a cloneable probe (or is itself a cheap shared
//! handle) so a test can keep observing a collaborator after the view has
//! taken ownership of it.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::application::event::{EventSink, SinkId, SurfaceHolder, SurfaceId};
use crate::application::port::{
    ControllerOverlay, Player, PosterDisplay, RenderSurface, SurfaceBackground, SurfaceHost,
    VideoSizeListener, VideoStateListener,
};
use crate::domain::ui::{ControllerTimeout, ScreenMode};
use crate::domain::video::{
    PlaybackState, RenderKind, SampleAspectRatio, ScaleMode, StateMask, VideoSize,
};
use crate::presentation::{AutoHideController, MeasureHelper};
use image_rs::{Rgba, RgbaImage};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;

// ==========================================================================
// Player
// ==========================================================================

/// Player that records registrations and can emit events to them.
#[derive(Default)]
pub struct FakePlayer {
    state: Cell<PlaybackState>,
    target: Cell<Option<SurfaceHolder>>,
    display_calls: Cell<usize>,
    state_sinks: RefCell<Vec<EventSink>>,
    size_sinks: RefCell<Vec<EventSink>>,
    removals: Cell<usize>,
}

impl FakePlayer {
    pub fn in_state(state: PlaybackState) -> Self {
        let player = Self::default();
        player.state.set(state);
        player
    }

    pub fn display_target(&self) -> Option<SurfaceHolder> {
        self.target.get()
    }

    pub fn display_calls(&self) -> usize {
        self.display_calls.get()
    }

    pub fn state_sinks(&self) -> Vec<EventSink> {
        self.state_sinks.borrow().clone()
    }

    pub fn size_sinks(&self) -> Vec<EventSink> {
        self.size_sinks.borrow().clone()
    }

    /// Number of listener removals received, state and size combined.
    pub fn removals(&self) -> usize {
        self.removals.get()
    }

    /// Moves to `new` and reports the transition to every state sink.
    pub fn transition(&self, new: PlaybackState) {
        let old = self.state.replace(new);
        for sink in self.state_sinks.borrow().iter() {
            sink.state_changed(old, new);
        }
    }

    pub fn report_size(&self, size: VideoSize) {
        for sink in self.size_sinks.borrow().iter() {
            sink.video_size_changed(size);
        }
    }

    pub fn report_volume(&self, start: i32, end: i32) {
        for sink in self.state_sinks.borrow().iter() {
            sink.volume_changed(start, end);
        }
    }
}

impl Player for FakePlayer {
    fn set_display_target(&self, target: Option<SurfaceHolder>) {
        self.display_calls.set(self.display_calls.get() + 1);
        self.target.set(target);
    }

    fn add_state_listener(&self, sink: EventSink) {
        let mut sinks = self.state_sinks.borrow_mut();
        if !sinks.iter().any(|s| s.id() == sink.id()) {
            sinks.push(sink);
        }
    }

    fn remove_state_listener(&self, sink: SinkId) {
        self.removals.set(self.removals.get() + 1);
        self.state_sinks.borrow_mut().retain(|s| s.id() != sink);
    }

    fn add_size_listener(&self, sink: EventSink) {
        let mut sinks = self.size_sinks.borrow_mut();
        if !sinks.iter().any(|s| s.id() == sink.id()) {
            sinks.push(sink);
        }
    }

    fn remove_size_listener(&self, sink: SinkId) {
        self.removals.set(self.removals.get() + 1);
        self.size_sinks.borrow_mut().retain(|s| s.id() != sink);
    }

    fn is_in_state(&self, mask: StateMask) -> bool {
        mask.contains(self.state.get())
    }
}

// ==========================================================================
// Surface
// ==========================================================================

/// Everything a [`FakeSurface`] was told.
#[derive(Debug, Clone, Default)]
pub struct SurfaceState {
    pub mode: Option<ScaleMode>,
    pub mode_calls: usize,
    pub content: Option<(u32, u32)>,
    pub sar: Option<SampleAspectRatio>,
    pub backgrounds: Vec<SurfaceBackground>,
    pub callbacks: Vec<EventSink>,
    pub measure: MeasureHelper,
}

/// Surface recording every call into a shared [`SurfaceState`].
pub struct FakeSurface {
    id: SurfaceId,
    kind: RenderKind,
    supports_background: bool,
    state: Rc<RefCell<SurfaceState>>,
}

/// Observer side of a [`FakeSurface`].
#[derive(Clone)]
pub struct SurfaceProbe {
    id: SurfaceId,
    state: Rc<RefCell<SurfaceState>>,
}

impl FakeSurface {
    pub fn new() -> (Self, SurfaceProbe) {
        Self::with_kind(RenderKind::Surface, true)
    }

    pub fn with_kind(kind: RenderKind, supports_background: bool) -> (Self, SurfaceProbe) {
        let id = SurfaceId::next();
        let state = Rc::new(RefCell::new(SurfaceState::default()));
        let probe = SurfaceProbe {
            id,
            state: Rc::clone(&state),
        };
        (
            Self {
                id,
                kind,
                supports_background,
                state,
            },
            probe,
        )
    }
}

impl SurfaceProbe {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// The holder this surface reports in its lifecycle events.
    pub fn holder(&self) -> SurfaceHolder {
        SurfaceHolder::new(self.id, self.id.value() * 100)
    }

    pub fn state(&self) -> SurfaceState {
        self.state.borrow().clone()
    }

    pub fn last_background(&self) -> Option<SurfaceBackground> {
        self.state.borrow().backgrounds.last().copied()
    }

    /// Reports `Created` through every registered lifecycle sink.
    pub fn emit_created(&self, width: u32, height: u32) {
        for sink in self.state.borrow().callbacks.iter() {
            sink.surface_created(self.holder(), width, height);
        }
    }

    pub fn emit_destroyed(&self) {
        for sink in self.state.borrow().callbacks.iter() {
            sink.surface_destroyed(self.holder());
        }
    }
}

impl RenderSurface for FakeSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> RenderKind {
        self.kind
    }

    fn add_lifecycle_callback(&mut self, sink: EventSink) {
        self.state.borrow_mut().callbacks.push(sink);
    }

    fn remove_lifecycle_callback(&mut self, sink: SinkId) {
        self.state.borrow_mut().callbacks.retain(|s| s.id() != sink);
    }

    fn set_scale_mode(&mut self, mode: ScaleMode) {
        let mut state = self.state.borrow_mut();
        state.mode = Some(mode);
        state.mode_calls += 1;
        state.measure.set_scale_mode(mode);
    }

    fn set_content_size(&mut self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        state.content = Some((width, height));
        state.measure.set_video_size(width, height);
    }

    fn set_sample_aspect_ratio(&mut self, sar: SampleAspectRatio) {
        let mut state = self.state.borrow_mut();
        state.sar = Some(sar);
        state.measure.set_sample_aspect_ratio(sar);
    }

    fn set_background(&mut self, background: SurfaceBackground) {
        self.state.borrow_mut().backgrounds.push(background);
    }

    fn supports_background(&self) -> bool {
        self.supports_background
    }

    fn capture_snapshot(&self) -> Option<RgbaImage> {
        let (width, height) = self.state.borrow().content?;
        Some(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }
}

/// Host that builds [`FakeSurface`]s and tracks the display tree.
#[derive(Clone, Default)]
pub struct FakeHost {
    inner: Rc<RefCell<HostState>>,
}

#[derive(Default)]
struct HostState {
    views: Vec<SurfaceId>,
    created: Vec<SurfaceProbe>,
    no_background: bool,
}

impl FakeHost {
    /// Host whose surfaces cannot draw a background.
    pub fn without_background() -> Self {
        let host = Self::default();
        host.inner.borrow_mut().no_background = true;
        host
    }

    pub fn views(&self) -> Vec<SurfaceId> {
        self.inner.borrow().views.clone()
    }

    pub fn created(&self) -> Vec<SurfaceProbe> {
        self.inner.borrow().created.clone()
    }

    pub fn last_surface(&self) -> Option<SurfaceProbe> {
        self.inner.borrow().created.last().cloned()
    }
}

impl SurfaceHost for FakeHost {
    fn create_surface(&mut self, kind: RenderKind) -> Option<Box<dyn RenderSurface>> {
        if kind == RenderKind::None {
            return None;
        }
        let mut inner = self.inner.borrow_mut();
        let (surface, probe) = FakeSurface::with_kind(kind, !inner.no_background);
        inner.created.push(probe);
        Some(Box::new(surface))
    }

    fn insert_view(&mut self, surface: SurfaceId) {
        self.inner.borrow_mut().views.push(surface);
    }

    fn remove_view(&mut self, surface: SurfaceId) {
        self.inner.borrow_mut().views.retain(|id| *id != surface);
    }
}

// ==========================================================================
// Poster and controller
// ==========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterCall {
    FadeIn(u32),
    FadeOut(u32),
}

#[derive(Clone, Default)]
pub struct FakePoster {
    calls: Rc<RefCell<Vec<PosterCall>>>,
}

impl FakePoster {
    pub fn calls(&self) -> Vec<PosterCall> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Option<PosterCall> {
        self.calls.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PosterDisplay for FakePoster {
    fn fade_in(&mut self, duration_ms: u32) {
        self.calls.borrow_mut().push(PosterCall::FadeIn(duration_ms));
    }

    fn fade_out(&mut self, duration_ms: u32) {
        self.calls.borrow_mut().push(PosterCall::FadeOut(duration_ms));
    }
}

/// Shared [`AutoHideController`] that also records the players it was given.
#[derive(Clone, Default)]
pub struct FakeController {
    inner: Rc<RefCell<AutoHideController>>,
    players: Rc<RefCell<Vec<bool>>>,
}

impl FakeController {
    /// One entry per `set_player` call: true for a player, false for none.
    pub fn players(&self) -> Vec<bool> {
        self.players.borrow().clone()
    }

    pub fn has_player(&self) -> bool {
        self.inner.borrow().player().is_some()
    }

    pub fn screen_mode(&self) -> ScreenMode {
        self.inner.borrow().screen_mode()
    }

    pub fn visible(&self) -> bool {
        self.inner.borrow().is_visible()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.borrow().next_deadline()
    }
}

impl ControllerOverlay for FakeController {
    fn set_player(&mut self, player: Option<Rc<dyn Player>>) {
        self.players.borrow_mut().push(player.is_some());
        self.inner.borrow_mut().set_player(player);
    }

    fn show(&mut self, now: Instant) {
        self.inner.borrow_mut().show(now);
    }

    fn hide(&mut self) {
        self.inner.borrow_mut().hide();
    }

    fn hide_after_timeout(&mut self, now: Instant) {
        self.inner.borrow_mut().hide_after_timeout(now);
    }

    fn set_auto_hide_timeout(&mut self, timeout: ControllerTimeout) {
        self.inner.borrow_mut().set_auto_hide_timeout(timeout);
    }

    fn auto_hide_timeout(&self) -> ControllerTimeout {
        self.inner.borrow().auto_hide_timeout()
    }

    fn is_visible(&self) -> bool {
        self.inner.borrow().is_visible()
    }

    fn set_screen_mode(&mut self, mode: ScreenMode) {
        self.inner.borrow_mut().set_screen_mode(mode);
    }

    fn poll_timeout(&mut self, now: Instant) {
        self.inner.borrow_mut().poll_timeout(now);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.inner.borrow().next_deadline()
    }

    fn cancel_timers(&mut self) {
        self.inner.borrow_mut().cancel_timers();
    }
}

// ==========================================================================
// Listeners
// ==========================================================================

#[derive(Default)]
pub struct RecordingStateListener {
    pub states: RefCell<Vec<(PlaybackState, PlaybackState)>>,
    pub volumes: RefCell<Vec<(i32, i32)>>,
}

impl VideoStateListener for RecordingStateListener {
    fn on_state_changed(&self, old: PlaybackState, new: PlaybackState) {
        self.states.borrow_mut().push((old, new));
    }

    fn on_volume_changed(&self, start: i32, end: i32) {
        self.volumes.borrow_mut().push((start, end));
    }
}

#[derive(Default)]
pub struct RecordingSizeListener {
    pub sizes: RefCell<Vec<VideoSize>>,
}

impl VideoSizeListener for RecordingSizeListener {
    fn on_video_size_changed(&self, size: VideoSize) {
        self.sizes.borrow_mut().push(size);
    }
}
