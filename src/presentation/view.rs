// SPDX-License-Identifier: MPL-2.0
//! The video view: presentation state machine and public surface.
//!
//! [`VideoView`] owns one [`SurfaceBinding`], the poster and controller
//! collaborators, two listener sets and a queue of deferred actions. It reacts
//! to player and surface events delivered through its event channel.
//!
//! # Driving the view
//!
//! The view never blocks and never spawns. The host calls, on its UI thread:
//!
//! - [`VideoView::pump`] to drain events queued by the player and surfaces
//! - [`VideoView::tick`] to run deferred actions and controller timeouts
//! - [`VideoView::next_deadline`] to know when the next `tick` is needed
//!
//! # State reactions
//!
//! | New state   | Poster            | Surface background          | Controller         |
//! |-------------|-------------------|-----------------------------|--------------------|
//! | `Preparing` |                   | opaque, immediately         |                    |
//! | `Playing`   | fade out          | transparent after a delay   | shown if default   |
//! | `Pausing`   | fade out          | transparent after a delay   |                    |
//! | `Completed` | fade in, instant  |                             |                    |
//! | `Error`     |                   | transparent after a delay   |                    |

use super::binding::SurfaceBinding;
use super::deferred::DeferredQueue;
use super::listeners::ListenerSet;
use crate::application::event::{Envelope, EventChannel, PlayerEvent, ViewEvent};
use crate::application::port::{
    ControllerOverlay, Player, PosterDisplay, RenderSurface, SurfaceBackground, SurfaceHost,
    VideoSizeListener, VideoStateListener,
};
use crate::config::ViewConfig;
use crate::domain::ui::newtypes::controller_timeout_bounds;
use crate::domain::ui::{ControllerTimeout, ScreenMode};
use crate::domain::video::{PlaybackState, RenderKind, ScaleMode, StateMask, VideoSize};
use image_rs::RgbaImage;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// The collaborators a view drives. Only the host is mandatory.
pub struct Collaborators {
    pub host: Box<dyn SurfaceHost>,
    pub poster: Option<Box<dyn PosterDisplay>>,
    pub controller: Option<Box<dyn ControllerOverlay>>,
}

impl Collaborators {
    #[must_use]
    pub fn new(host: Box<dyn SurfaceHost>) -> Self {
        Self {
            host,
            poster: None,
            controller: None,
        }
    }

    #[must_use]
    pub fn with_poster(mut self, poster: Box<dyn PosterDisplay>) -> Self {
        self.poster = Some(poster);
        self
    }

    #[must_use]
    pub fn with_controller(mut self, controller: Box<dyn ControllerOverlay>) -> Self {
        self.controller = Some(controller);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    OpenSurface,
}

/// Presentation layer binding a player to a render surface.
pub struct VideoView {
    instance: u64,
    config: ViewConfig,
    screen_mode: ScreenMode,
    video: VideoSize,
    host: Box<dyn SurfaceHost>,
    poster: Option<Box<dyn PosterDisplay>>,
    controller: Option<Box<dyn ControllerOverlay>>,
    channel: EventChannel,
    binding: SurfaceBinding,
    state_listeners: ListenerSet<dyn VideoStateListener>,
    size_listeners: ListenerSet<dyn VideoSizeListener>,
    deferred: DeferredQueue<DeferredAction>,
    attached_to_window: bool,
    torn_down: bool,
}

impl VideoView {
    /// Builds the view and its initial surface of `config.render_kind`.
    #[must_use]
    pub fn new(config: ViewConfig, collaborators: Collaborators) -> Self {
        let channel = EventChannel::new();
        let binding = SurfaceBinding::new(channel.sink());
        let Collaborators {
            host,
            poster,
            controller,
        } = collaborators;

        let mut view = Self {
            instance: INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed),
            config,
            screen_mode: ScreenMode::default(),
            video: VideoSize::default(),
            host,
            poster,
            controller,
            channel,
            binding,
            state_listeners: ListenerSet::new(),
            size_listeners: ListenerSet::new(),
            deferred: DeferredQueue::new(),
            attached_to_window: true,
            torn_down: false,
        };

        let timeout = ControllerTimeout::from_millis(view.config.controller_timeout_ms);
        if let Some(controller) = view.controller.as_mut() {
            controller.set_auto_hide_timeout(timeout);
            controller.hide();
        }
        if !view.config.show_poster {
            if let Some(poster) = view.poster.as_mut() {
                poster.fade_out(0);
            }
        }
        view.install_surface(view.config.render_kind);

        tracing::info!(
            instance = view.instance,
            render_kind = %view.config.render_kind,
            scale_mode = %view.config.scale_mode,
            "video view created"
        );
        view
    }

    /// Diagnostic id of this view, unique within the process.
    #[must_use]
    pub fn instance_id(&self) -> u64 {
        self.instance
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn scale_mode(&self) -> ScaleMode {
        self.config.scale_mode
    }

    #[must_use]
    pub fn render_kind(&self) -> RenderKind {
        self.config.render_kind
    }

    /// Last size reported by the player.
    #[must_use]
    pub fn video_size(&self) -> VideoSize {
        self.video
    }

    #[must_use]
    pub fn surface(&self) -> Option<&dyn RenderSurface> {
        self.binding.surface()
    }

    #[must_use]
    pub fn player(&self) -> Option<Rc<dyn Player>> {
        self.binding.player()
    }

    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        if self.config.scale_mode == mode {
            return;
        }
        self.config.scale_mode = mode;
        if let Some(surface) = self.binding.surface_mut() {
            surface.set_scale_mode(mode);
        }
        tracing::debug!(instance = self.instance, %mode, "scale mode changed");
    }

    /// Switches surface technology. The old surface is released and a new one
    /// built; pending deferred actions are cancelled.
    pub fn set_render_kind(&mut self, kind: RenderKind) {
        if self.config.render_kind == kind || self.torn_down {
            return;
        }
        self.config.render_kind = kind;
        self.install_surface(kind);
    }

    /// Attaches `player`, or detaches the current one with `None`.
    ///
    /// Attaching the player that is already attached does nothing.
    pub fn set_player(&mut self, player: Option<Rc<dyn Player>>, now: Instant) {
        if self.torn_down
            || !self
                .binding
                .attach_player(player.clone(), self.attached_to_window)
        {
            return;
        }
        if self.config.use_controller {
            if let Some(controller) = self.controller.as_mut() {
                controller.set_player(player.clone());
            }
        }

        let Some(player) = player else {
            tracing::debug!(instance = self.instance, "player detached");
            self.hide_controller();
            return;
        };

        tracing::debug!(instance = self.instance, "player attached");
        if player.is_in_state(StateMask::PREPARED) {
            let fade = self.config.poster_fade();
            if let Some(poster) = self.poster.as_mut() {
                poster.fade_out(fade);
            }
        }
        if self.config.default_show_controller {
            self.show_controller(now);
        }
    }

    // ==========================================================================
    // Listeners
    // ==========================================================================

    pub fn add_state_listener(&self, listener: Rc<dyn VideoStateListener>) -> bool {
        self.state_listeners.add(listener)
    }

    pub fn remove_state_listener(&self, listener: &Rc<dyn VideoStateListener>) -> bool {
        self.state_listeners.remove(listener)
    }

    pub fn add_size_listener(&self, listener: Rc<dyn VideoSizeListener>) -> bool {
        self.size_listeners.add(listener)
    }

    pub fn remove_size_listener(&self, listener: &Rc<dyn VideoSizeListener>) -> bool {
        self.size_listeners.remove(listener)
    }

    /// Shared handle to the state listener set, for registration from
    /// inside a listener callback.
    #[must_use]
    pub fn state_listeners(&self) -> ListenerSet<dyn VideoStateListener> {
        self.state_listeners.clone()
    }

    // ==========================================================================
    // Controller
    // ==========================================================================

    /// Shows the controller. Needs `use_controller` and an attached player.
    pub fn show_controller(&mut self, now: Instant) {
        if !self.config.use_controller || self.binding.player().is_none() {
            return;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.show(now);
        }
    }

    pub fn hide_controller(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.hide();
        }
    }

    /// Restarts the auto-hide countdown, typically after a user interaction.
    pub fn hide_controller_after_timeout(&mut self, now: Instant) {
        if let Some(controller) = self.controller.as_mut() {
            controller.hide_after_timeout(now);
        }
    }

    #[must_use]
    pub fn is_controller_visible(&self) -> bool {
        self.controller.as_ref().is_some_and(|c| c.is_visible())
    }

    /// Enables or disables the controller. Without a controller this does
    /// nothing and the flag keeps its value.
    pub fn set_use_controller(&mut self, use_controller: bool) {
        if self.config.use_controller == use_controller {
            return;
        }
        let player = self.binding.player();
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        self.config.use_controller = use_controller;
        if use_controller {
            controller.set_player(player);
        } else {
            controller.hide();
            controller.set_player(None);
        }
    }

    pub fn set_default_show_controller(&mut self, show: bool) {
        self.config.default_show_controller = show;
    }

    /// The controller's auto-hide timeout, or the default without controller.
    #[must_use]
    pub fn controller_timeout_ms(&self) -> u32 {
        self.controller.as_ref().map_or(controller_timeout_bounds::DEFAULT_MS, |c| {
            c.auto_hide_timeout().as_millis()
        })
    }

    pub fn set_controller_timeout_ms(&mut self, millis: u32) {
        let timeout = ControllerTimeout::from_millis(millis);
        self.config.controller_timeout_ms = timeout.as_millis();
        if let Some(controller) = self.controller.as_mut() {
            controller.set_auto_hide_timeout(timeout);
        }
    }

    #[must_use]
    pub fn screen_mode(&self) -> ScreenMode {
        self.screen_mode
    }

    pub fn set_screen_mode(&mut self, mode: ScreenMode) {
        if self.screen_mode == mode {
            return;
        }
        self.screen_mode = mode;
        if let Some(controller) = self.controller.as_mut() {
            controller.set_screen_mode(mode);
        }
    }

    // ==========================================================================
    // Poster
    // ==========================================================================

    /// Turning the poster off hides it at once; turning it on shows it unless
    /// the attached player is already past preparation.
    pub fn set_show_poster(&mut self, show: bool) {
        if self.config.show_poster == show {
            return;
        }
        self.config.show_poster = show;
        let prepared = self
            .binding
            .player()
            .is_some_and(|p| p.is_in_state(StateMask::PREPARED));
        if let Some(poster) = self.poster.as_mut() {
            if !show {
                poster.fade_out(0);
            } else if !prepared {
                poster.fade_in(0);
            }
        }
    }

    pub fn set_poster_fade_ms(&mut self, millis: u32) {
        self.config.poster_fade_ms = millis;
    }

    /// Grabs the frame currently on the surface.
    #[must_use]
    pub fn capture_snapshot(&self) -> Option<RgbaImage> {
        self.binding.surface()?.capture_snapshot()
    }

    // ==========================================================================
    // Event loop
    // ==========================================================================

    /// Drains every queued collaborator event. Returns how many were handled.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut handled = 0;
        while let Some(envelope) = self.channel.try_recv() {
            self.handle(envelope, now);
            handled += 1;
        }
        handled
    }

    /// Applies one collaborator event.
    ///
    /// Player events are only accepted from the sink handed to the current
    /// player; surface events are checked against the installed surface.
    pub fn handle(&mut self, envelope: Envelope, now: Instant) {
        if self.torn_down {
            return;
        }
        match envelope.event {
            ViewEvent::Surface(event) => {
                self.binding.handle_lifecycle(&event);
            }
            ViewEvent::Player(event) => {
                if self.binding.player_sink_id() != Some(envelope.sink) {
                    tracing::debug!(
                        instance = self.instance,
                        ?event,
                        "dropping event from a detached player"
                    );
                    return;
                }
                match event {
                    PlayerEvent::StateChanged { old, new } => self.on_state_changed(old, new, now),
                    PlayerEvent::VolumeChanged { start, end } => {
                        self.state_listeners
                            .dispatch(|l| l.on_volume_changed(start, end));
                    }
                    PlayerEvent::VideoSizeChanged(size) => self.on_video_size_changed(size),
                }
            }
        }
    }

    /// Runs deferred actions due at `now` and the controller's countdown.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        for action in self.deferred.take_due(now) {
            match action {
                DeferredAction::OpenSurface => {
                    self.set_surface_background(SurfaceBackground::Transparent);
                }
            }
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.poll_timeout(now);
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let controller = self.controller.as_ref().and_then(|c| c.next_deadline());
        match (self.deferred.next_deadline(), controller) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Number of surface-open actions still pending.
    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.deferred.len()
    }

    // ==========================================================================
    // Window lifecycle
    // ==========================================================================

    pub fn on_attached_to_window(&mut self) {
        if self.attached_to_window || self.torn_down {
            return;
        }
        self.attached_to_window = true;
        self.binding.register_player();
        if self.config.use_controller {
            let player = self.binding.player();
            if let Some(controller) = self.controller.as_mut() {
                controller.set_player(player);
            }
        }
        tracing::debug!(instance = self.instance, "attached to window");
    }

    pub fn on_detached_from_window(&mut self) {
        if !self.attached_to_window {
            return;
        }
        self.attached_to_window = false;
        self.binding.release_player();
        if let Some(controller) = self.controller.as_mut() {
            controller.set_player(None);
        }
        tracing::debug!(instance = self.instance, "detached from window");
    }

    /// Cancels deferred work and releases the player and surface.
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let cancelled = self.deferred.cancel_all();
        if let Some(controller) = self.controller.as_mut() {
            controller.cancel_timers();
            controller.set_player(None);
        }
        self.binding.teardown(self.host.as_mut());
        tracing::debug!(instance = self.instance, cancelled, "video view torn down");
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    fn install_surface(&mut self, kind: RenderKind) {
        let cancelled = self.deferred.cancel_all();
        let surface = self.host.create_surface(kind);
        if surface.is_none() && kind != RenderKind::None {
            tracing::warn!(instance = self.instance, %kind, "host could not build surface");
        }
        self.binding.attach_surface(
            surface,
            self.host.as_mut(),
            self.config.scale_mode,
            self.video,
        );
        tracing::debug!(instance = self.instance, %kind, cancelled, "surface installed");
    }

    fn on_state_changed(&mut self, old: PlaybackState, new: PlaybackState, now: Instant) {
        tracing::debug!(instance = self.instance, %old, %new, "playback state changed");
        match new {
            PlaybackState::Preparing => {
                self.set_surface_background(SurfaceBackground::Opaque);
            }
            PlaybackState::Playing => {
                self.fade_out_poster();
                self.schedule_open_surface(now);
                if self.config.default_show_controller {
                    self.show_controller(now);
                }
            }
            PlaybackState::Pausing => {
                self.fade_out_poster();
                self.schedule_open_surface(now);
            }
            PlaybackState::Completed => {
                if let Some(poster) = self.poster.as_mut() {
                    poster.fade_in(0);
                }
            }
            PlaybackState::Error => self.schedule_open_surface(now),
            PlaybackState::Idle | PlaybackState::Prepared => {}
        }
        self.state_listeners.dispatch(|l| l.on_state_changed(old, new));
    }

    fn on_video_size_changed(&mut self, size: VideoSize) {
        tracing::debug!(instance = self.instance, %size, "video size changed");
        self.video = size;
        if !size.is_unknown() {
            if let Some(surface) = self.binding.surface_mut() {
                surface.set_content_size(size.width, size.height);
                surface.set_sample_aspect_ratio(size.sar);
            }
        }
        self.size_listeners.dispatch(|l| l.on_video_size_changed(size));
    }

    fn fade_out_poster(&mut self) {
        let fade = self.config.poster_fade();
        if let Some(poster) = self.poster.as_mut() {
            poster.fade_out(fade);
        }
    }

    // Repeated scheduling stacks; opening twice is harmless.
    fn schedule_open_surface(&mut self, now: Instant) {
        let delay = self.config.surface_open_delay();
        self.deferred
            .schedule_after(now, delay, DeferredAction::OpenSurface);
    }

    fn set_surface_background(&mut self, background: SurfaceBackground) {
        if let Some(surface) = self.binding.surface_mut() {
            if surface.supports_background() {
                surface.set_background(background);
            }
        }
    }
}

impl Drop for VideoView {
    fn drop(&mut self) {
        self.teardown();
        tracing::debug!(instance = self.instance, "video view dropped");
    }
}

impl std::fmt::Debug for VideoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoView")
            .field("instance", &self.instance)
            .field("config", &self.config)
            .field("video", &self.video)
            .field("binding", &self.binding)
            .field("pending_actions", &self.deferred.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
