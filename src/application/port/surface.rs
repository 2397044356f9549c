// SPDX-License-Identifier: MPL-2.0
//! Render surface port definitions.
//!
//! A [`RenderSurface`] is one drawing-surface instance (compositor surface,
//! texture, ...). The [`SurfaceHost`] is the container the view lives in: it
//! builds surfaces of a requested kind and owns the display tree they are
//! inserted into.
//!
//! # Lifecycle
//!
//! 1. The host builds a surface with [`SurfaceHost::create_surface`]
//! 2. The view configures it (scale mode, content size, SAR), registers its
//!    lifecycle sink and inserts it into the display tree
//! 3. When the native drawable becomes available the surface reports
//!    [`EventSink::surface_created`]; when it goes away,
//!    [`EventSink::surface_destroyed`]
//! 4. On replacement the view unregisters the sink and removes the surface
//!    from the tree before dropping it

use crate::application::event::{EventSink, SinkId, SurfaceId};
use crate::domain::video::{RenderKind, SampleAspectRatio, ScaleMode};
use image_rs::RgbaImage;

/// Background painted behind the video content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceBackground {
    /// Solid black, hides whatever the surface currently shows.
    Opaque,
    /// Lets decoded frames show through.
    Transparent,
}

/// Port for one drawing surface instance.
///
/// Implementations measure themselves with
/// [`presentation::geometry`](crate::presentation::geometry) whenever the
/// scale mode, content size or SAR changes.
pub trait RenderSurface {
    /// Identity of this surface; also used as its display-tree key.
    fn id(&self) -> SurfaceId;

    fn kind(&self) -> RenderKind;

    fn add_lifecycle_callback(&mut self, sink: EventSink);

    fn remove_lifecycle_callback(&mut self, sink: SinkId);

    fn set_scale_mode(&mut self, mode: ScaleMode);

    fn set_content_size(&mut self, width: u32, height: u32);

    fn set_sample_aspect_ratio(&mut self, sar: SampleAspectRatio);

    fn set_background(&mut self, background: SurfaceBackground);

    /// Whether [`set_background`](Self::set_background) has any effect.
    ///
    /// Texture-backed surfaces on some hosts cannot draw a background.
    fn supports_background(&self) -> bool {
        true
    }

    /// Grabs the currently displayed frame, if the surface can.
    fn capture_snapshot(&self) -> Option<RgbaImage>;
}

/// Port for the container hosting the view.
pub trait SurfaceHost {
    /// Builds a surface of the given kind. Returns `None` for
    /// [`RenderKind::None`] or when the kind is unavailable.
    fn create_surface(&mut self, kind: RenderKind) -> Option<Box<dyn RenderSurface>>;

    /// Inserts the surface's view into the display tree, centered.
    fn insert_view(&mut self, surface: SurfaceId);

    /// Removes the surface's view from the display tree.
    fn remove_view(&mut self, surface: SurfaceId);
}
