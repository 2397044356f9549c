// SPDX-License-Identifier: MPL-2.0
//! Binding between one render surface and at most one player.
//!
//! The binding keeps a single invariant: the active player's display target is
//! either nothing or the holder of the surface currently installed. Surface
//! lifecycle events are checked against the installed surface's identity;
//! events for a surface that was already replaced are logged and dropped.

use crate::application::event::{EventSink, SinkId, SurfaceEvent, SurfaceHolder};
use crate::application::port::{Player, RenderSurface, SurfaceHost};
use crate::domain::video::{ScaleMode, VideoSize};
use std::rc::{Rc, Weak};

/// What a lifecycle event did to the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// A new holder was recorded (and bound to the player, if any).
    Bound,
    /// The event was accepted but changed nothing.
    Unchanged,
    /// The holder was cleared and the player detached from it.
    Unbound,
    /// The event referred to a surface that is no longer installed.
    Stale,
}

pub struct SurfaceBinding {
    surface: Option<Box<dyn RenderSurface>>,
    surface_sink: EventSink,
    holder: Option<SurfaceHolder>,
    player: Option<Weak<dyn Player>>,
    player_sink: Option<EventSink>,
    listening: bool,
}

impl SurfaceBinding {
    /// Creates an empty binding. Lifecycle callbacks of every surface it
    /// installs report through `sink`; each attached player gets a fork of it.
    #[must_use]
    pub fn new(sink: EventSink) -> Self {
        Self {
            surface: None,
            surface_sink: sink,
            holder: None,
            player: None,
            player_sink: None,
            listening: false,
        }
    }

    #[must_use]
    pub fn surface(&self) -> Option<&dyn RenderSurface> {
        self.surface.as_deref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut (dyn RenderSurface + 'static)> {
        self.surface.as_deref_mut()
    }

    /// The drawable recorded from the last accepted `Created` event.
    #[must_use]
    pub fn holder(&self) -> Option<SurfaceHolder> {
        self.holder
    }

    /// The attached player, if it is still alive.
    #[must_use]
    pub fn player(&self) -> Option<Rc<dyn Player>> {
        self.player.as_ref().and_then(Weak::upgrade)
    }

    /// Sink id the attached player reports through.
    #[must_use]
    pub fn player_sink_id(&self) -> Option<SinkId> {
        self.player_sink.as_ref().map(EventSink::id)
    }

    /// Replaces the installed surface.
    ///
    /// The previous surface is fully released first: the player stops drawing
    /// into it, its lifecycle callback is unregistered and it leaves the
    /// display tree. `None` only detaches.
    pub fn attach_surface(
        &mut self,
        surface: Option<Box<dyn RenderSurface>>,
        host: &mut dyn SurfaceHost,
        mode: ScaleMode,
        video: VideoSize,
    ) {
        if let Some(mut previous) = self.surface.take() {
            if let Some(player) = self.player() {
                player.set_display_target(None);
            }
            previous.remove_lifecycle_callback(self.surface_sink.id());
            host.remove_view(previous.id());
            self.holder = None;
            tracing::debug!(surface = previous.id().value(), "render surface detached");
        }

        let Some(mut surface) = surface else {
            return;
        };

        surface.set_scale_mode(mode);
        if !video.is_unknown() {
            surface.set_content_size(video.width, video.height);
        }
        if video.sar.is_valid() {
            surface.set_sample_aspect_ratio(video.sar);
        }
        surface.add_lifecycle_callback(self.surface_sink.clone());
        host.insert_view(surface.id());
        tracing::debug!(
            surface = surface.id().value(),
            kind = %surface.kind(),
            "render surface attached"
        );
        self.surface = Some(surface);
    }

    /// Applies a surface lifecycle event, rejecting stale ones.
    pub fn handle_lifecycle(&mut self, event: &SurfaceEvent) -> LifecycleOutcome {
        let holder = event.holder();
        let current = self.surface.as_ref().map(|s| s.id());
        if current != Some(holder.surface()) {
            tracing::warn!(
                event_surface = holder.surface().value(),
                current_surface = ?current.map(|id| id.value()),
                ?event,
                "ignoring lifecycle event for a replaced surface"
            );
            return LifecycleOutcome::Stale;
        }

        match *event {
            SurfaceEvent::Created { width, height, .. } => {
                tracing::debug!(width, height, "surface created");
                self.holder = Some(holder);
                if let Some(player) = self.player() {
                    player.set_display_target(Some(holder));
                }
                LifecycleOutcome::Bound
            }
            SurfaceEvent::Changed {
                format,
                width,
                height,
                ..
            } => {
                tracing::debug!(format, width, height, "surface changed");
                LifecycleOutcome::Unchanged
            }
            SurfaceEvent::Destroyed { .. } => {
                tracing::debug!("surface destroyed");
                self.holder = None;
                if let Some(player) = self.player() {
                    player.set_display_target(None);
                }
                LifecycleOutcome::Unbound
            }
        }
    }

    /// Swaps the attached player. Returns false when `player` is already the
    /// attached one, in which case nothing is touched.
    ///
    /// With `register` false the player is only recorded; its listeners and
    /// display target wait for [`register_player`](Self::register_player).
    pub fn attach_player(&mut self, player: Option<Rc<dyn Player>>, register: bool) -> bool {
        if self.is_attached(player.as_ref()) {
            return false;
        }

        self.release_player();
        self.player = None;
        self.player_sink = None;

        let Some(player) = player else {
            return true;
        };

        self.player = Some(Rc::downgrade(&player));
        self.player_sink = Some(self.surface_sink.fork());
        if register {
            self.register_player();
        }
        true
    }

    /// Pushes the current holder to the player and registers for its events.
    /// Does nothing if already registered.
    pub fn register_player(&mut self) {
        if self.listening {
            return;
        }
        let (Some(player), Some(sink)) = (self.player(), self.player_sink.clone()) else {
            return;
        };
        if let Some(holder) = self.holder {
            player.set_display_target(Some(holder));
        }
        player.add_size_listener(sink.clone());
        player.add_state_listener(sink);
        self.listening = true;
    }

    /// Unregisters from the player and clears its display target, keeping the
    /// reference so [`register_player`](Self::register_player) can restore it.
    pub fn release_player(&mut self) {
        let Some(player) = self.player() else {
            self.listening = false;
            return;
        };
        if self.listening {
            if let Some(id) = self.player_sink_id() {
                player.remove_size_listener(id);
                player.remove_state_listener(id);
            }
            self.listening = false;
        }
        player.set_display_target(None);
    }

    /// Releases the player and the surface.
    pub fn teardown(&mut self, host: &mut dyn SurfaceHost) {
        self.attach_player(None, false);
        self.attach_surface(None, host, ScaleMode::default(), VideoSize::default());
    }

    fn is_attached(&self, player: Option<&Rc<dyn Player>>) -> bool {
        match (&self.player, player) {
            (None, None) => true,
            (Some(current), Some(candidate)) => {
                std::ptr::addr_eq(current.as_ptr(), Rc::as_ptr(candidate))
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for SurfaceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceBinding")
            .field("surface", &self.surface.as_ref().map(|s| s.id()))
            .field("holder", &self.holder)
            .field("has_player", &self.player().is_some())
            .field("listening", &self.listening)
            .finish()
    }
}
