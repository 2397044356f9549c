// SPDX-License-Identifier: MPL-2.0
//! Events delivered to the video view by its collaborators.
//!
//! Players and render surfaces may report from other threads (decoder
//! callbacks, compositor threads). They never touch the view directly:
//! they push a [`ViewEvent`] into an [`EventSink`], and the host drains the
//! queue on the UI thread with `VideoView::pump`.
//!
//! Every sink carries a [`SinkId`]. The view hands a fresh sink to each player
//! it attaches, so events still queued from a player that was swapped out can
//! be recognised and dropped.

use crate::domain::video::{PlaybackState, VideoSize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Identifies one registration handed to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(u64);

impl SinkId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of a render surface instance.
///
/// Surface implementations allocate one with [`SurfaceId::next`] when they are
/// created; the id never changes for the lifetime of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocates a process-wide unique surface id.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A drawable target produced by a render surface once it is ready.
///
/// `surface` names the surface that produced the holder and is what stale
/// lifecycle events are checked against. `token` is the opaque native handle
/// the player writes frames into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHolder {
    surface: SurfaceId,
    token: u64,
}

impl SurfaceHolder {
    #[must_use]
    pub fn new(surface: SurfaceId, token: u64) -> Self {
        Self { surface, token }
    }

    /// The surface that owns this holder.
    #[must_use]
    pub fn surface(self) -> SurfaceId {
        self.surface
    }

    #[must_use]
    pub fn token(self) -> u64 {
        self.token
    }
}

/// Events reported by the attached player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    StateChanged {
        old: PlaybackState,
        new: PlaybackState,
    },
    VolumeChanged {
        start: i32,
        end: i32,
    },
    VideoSizeChanged(VideoSize),
}

/// Lifecycle of a render surface's drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created {
        holder: SurfaceHolder,
        width: u32,
        height: u32,
    },
    Changed {
        holder: SurfaceHolder,
        format: u32,
        width: u32,
        height: u32,
    },
    Destroyed {
        holder: SurfaceHolder,
    },
}

impl SurfaceEvent {
    /// The holder the event refers to.
    #[must_use]
    pub fn holder(&self) -> SurfaceHolder {
        match self {
            Self::Created { holder, .. }
            | Self::Changed { holder, .. }
            | Self::Destroyed { holder } => *holder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    Player(PlayerEvent),
    Surface(SurfaceEvent),
}

impl From<PlayerEvent> for ViewEvent {
    fn from(event: PlayerEvent) -> Self {
        Self::Player(event)
    }
}

impl From<SurfaceEvent> for ViewEvent {
    fn from(event: SurfaceEvent) -> Self {
        Self::Surface(event)
    }
}

/// A queued event tagged with the sink it came through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub sink: SinkId,
    pub event: ViewEvent,
}

/// Cloneable, thread-safe handle collaborators use to report events.
#[derive(Clone)]
pub struct EventSink {
    id: SinkId,
    tx: mpsc::UnboundedSender<Envelope>,
}

impl EventSink {
    #[must_use]
    pub fn id(&self) -> SinkId {
        self.id
    }

    /// Returns a new sink on the same queue with a fresh id.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            id: SinkId::next(),
            tx: self.tx.clone(),
        }
    }

    /// Queues an event. Returns false once the receiving view is gone.
    pub fn send(&self, event: impl Into<ViewEvent>) -> bool {
        self.tx
            .send(Envelope {
                sink: self.id,
                event: event.into(),
            })
            .is_ok()
    }

    pub fn state_changed(&self, old: PlaybackState, new: PlaybackState) -> bool {
        self.send(PlayerEvent::StateChanged { old, new })
    }

    pub fn volume_changed(&self, start: i32, end: i32) -> bool {
        self.send(PlayerEvent::VolumeChanged { start, end })
    }

    pub fn video_size_changed(&self, size: VideoSize) -> bool {
        self.send(PlayerEvent::VideoSizeChanged(size))
    }

    pub fn surface_created(&self, holder: SurfaceHolder, width: u32, height: u32) -> bool {
        self.send(SurfaceEvent::Created {
            holder,
            width,
            height,
        })
    }

    pub fn surface_changed(
        &self,
        holder: SurfaceHolder,
        format: u32,
        width: u32,
        height: u32,
    ) -> bool {
        self.send(SurfaceEvent::Changed {
            holder,
            format,
            width,
            height,
        })
    }

    pub fn surface_destroyed(&self, holder: SurfaceHolder) -> bool {
        self.send(SurfaceEvent::Destroyed { holder })
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("id", &self.id)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Receiving end of the event queue, owned by the view.
#[derive(Debug)]
pub struct EventChannel {
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl EventChannel {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Creates a sink with a fresh id feeding this channel.
    #[must_use]
    pub fn sink(&self) -> EventSink {
        EventSink {
            id: SinkId::next(),
            tx: self.tx.clone(),
        }
    }

    /// Takes the next queued event without blocking.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
