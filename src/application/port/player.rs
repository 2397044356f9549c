// SPDX-License-Identifier: MPL-2.0
//! Player port definition.

use crate::application::event::{EventSink, SinkId, SurfaceHolder};
use crate::domain::video::StateMask;

/// Port for the media player whose decoded frames the view displays.
///
/// The view keeps only a weak reference to the player; the host owns it.
/// Registration methods are keyed by [`SinkId`] so the view can unregister
/// exactly what it registered.
///
/// # Contract
///
/// - `set_display_target(None)` must stop the player from writing into any
///   previously given holder.
/// - Adding a sink that is already registered is a no-op.
/// - State and size events are reported through the registered sinks with
///   [`EventSink::state_changed`], [`EventSink::volume_changed`] and
///   [`EventSink::video_size_changed`].
pub trait Player {
    /// Sets (or clears) the drawable the player renders into.
    fn set_display_target(&self, target: Option<SurfaceHolder>);

    fn add_state_listener(&self, sink: EventSink);

    fn remove_state_listener(&self, sink: SinkId);

    fn add_size_listener(&self, sink: EventSink);

    fn remove_size_listener(&self, sink: SinkId);

    /// Returns true when the player's current state is one of `mask`.
    fn is_in_state(&self, mask: StateMask) -> bool;
}
