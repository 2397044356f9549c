// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the view's collaborators.
//!
//! The view never decodes, draws or animates anything itself. Hosts plug in
//! their player, surface technology, poster image and controller overlay by
//! implementing these traits.
//!
//! # Available Ports
//!
//! - [`player`]: The media player whose frames are displayed
//! - [`surface`]: Drawing surfaces and the container that holds them
//! - [`overlay`]: Poster image and playback controller
//! - [`listener`]: Observers of the view's state and size fan-out
//!
//! # Design Notes
//!
//! - Everything runs on one UI thread, so ports take `&self`/`&mut self`
//!   without `Send` bounds
//! - Callbacks from collaborators go through [`EventSink`](super::event::EventSink)
//!   rather than closures, so stale registrations can be identified
//! - No method returns an error: a failing collaborator degrades to "no video"

pub mod listener;
pub mod overlay;
pub mod player;
pub mod surface;

// Re-export main types for convenience
pub use listener::{VideoSizeListener, VideoStateListener};
pub use overlay::{ControllerOverlay, PosterDisplay};
pub use player::Player;
pub use surface::{RenderSurface, SurfaceBackground, SurfaceHost};
