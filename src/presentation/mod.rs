// SPDX-License-Identifier: MPL-2.0
//! Presentation core: geometry, surface binding, listener fan-out and the
//! playback-driven state machine of [`VideoView`].
//!
//! Everything here runs on one thread. Collaborators talk back through
//! [`EventSink`](crate::application::event::EventSink)s, which the view
//! drains in [`VideoView::pump`].

pub mod binding;
pub mod controller;
pub mod deferred;
pub mod format;
pub mod geometry;
pub mod listeners;
pub mod view;

pub use binding::{LifecycleOutcome, SurfaceBinding};
pub use controller::AutoHideController;
pub use deferred::DeferredQueue;
pub use format::format_duration;
pub use geometry::{compute, compute_for, MeasureHelper, Placement};
pub use listeners::ListenerSet;
pub use view::{Collaborators, VideoView};
