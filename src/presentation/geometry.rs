// SPDX-License-Identifier: MPL-2.0
//! Scale geometry: how big the video is drawn inside its container.
//!
//! [`compute`] is a pure function of content size, sample aspect ratio,
//! container size and [`ScaleMode`]. Render surfaces call it (usually through
//! [`MeasureHelper`]) whenever any of those inputs change. Aspect ratios are
//! compared with exact integer cross-multiplication so identical inputs always
//! produce identical rectangles.

use crate::domain::video::{SampleAspectRatio, ScaleMode, VideoSize};

/// Computes the displayed `(width, height)` of the video.
///
/// - Content with a non-positive dimension yields the container size (no
///   geometry available yet).
/// - A non-positive SAR term falls back to `content_w / content_h`.
/// - [`ScaleMode::Fill`] may exceed the container; clipping is the caller's job.
#[must_use]
pub fn compute(
    content_w: i32,
    content_h: i32,
    sar_num: i32,
    sar_den: i32,
    container_w: i32,
    container_h: i32,
    mode: ScaleMode,
) -> (i32, i32) {
    if content_w <= 0 || content_h <= 0 {
        return (container_w, container_h);
    }

    match mode {
        ScaleMode::Match => (container_w, container_h),
        ScaleMode::Wrap => {
            let aspect = Ratio::effective(content_w, content_h, sar_num, sar_den);
            let natural = (aspect.width_for(content_h), content_h);
            let fits = natural.0 <= container_w && natural.1 <= container_h;
            if container_w <= 0 || container_h <= 0 || fits {
                natural
            } else {
                aspect.fit_inside(container_w, container_h)
            }
        }
        ScaleMode::Fit | ScaleMode::Fill | ScaleMode::Forced16By9 | ScaleMode::Forced4By3 => {
            let aspect = mode.forced_aspect().map_or_else(
                || Ratio::effective(content_w, content_h, sar_num, sar_den),
                |(num, den)| Ratio::new(i128::from(num), i128::from(den)),
            );

            if container_w <= 0 || container_h <= 0 {
                // Unmeasured container: keep the content height, correct the width.
                return (aspect.width_for(content_h), content_h);
            }

            if mode == ScaleMode::Fill {
                aspect.cover(container_w, container_h)
            } else {
                aspect.fit_inside(container_w, container_h)
            }
        }
    }
}

/// Convenience wrapper taking domain types.
#[must_use]
pub fn compute_for(video: VideoSize, container_w: i32, container_h: i32, mode: ScaleMode) -> (i32, i32) {
    compute(
        to_i32(video.width),
        to_i32(video.height),
        to_i32(video.sar.num),
        to_i32(video.sar.den),
        container_w,
        container_h,
        mode,
    )
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Exact display aspect ratio `num / den`, both positive.
#[derive(Debug, Clone, Copy)]
struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    fn new(num: i128, den: i128) -> Self {
        Self { num, den }
    }

    fn effective(content_w: i32, content_h: i32, sar_num: i32, sar_den: i32) -> Self {
        if sar_num > 0 && sar_den > 0 {
            Self::new(
                i128::from(content_w) * i128::from(sar_num),
                i128::from(content_h) * i128::from(sar_den),
            )
        } else {
            Self::new(i128::from(content_w), i128::from(content_h))
        }
    }

    /// True when this ratio is strictly wider than `w / h`.
    fn is_wider_than(self, w: i32, h: i32) -> bool {
        self.num * i128::from(h) > i128::from(w) * self.den
    }

    fn height_for(self, width: i32) -> i32 {
        round_div(i128::from(width) * self.den, self.num)
    }

    fn width_for(self, height: i32) -> i32 {
        round_div(i128::from(height) * self.num, self.den)
    }

    /// Largest rectangle of this ratio inside the container.
    fn fit_inside(self, container_w: i32, container_h: i32) -> (i32, i32) {
        if self.is_wider_than(container_w, container_h) {
            (container_w, self.height_for(container_w))
        } else {
            (self.width_for(container_h), container_h)
        }
    }

    /// Smallest rectangle of this ratio covering the container.
    fn cover(self, container_w: i32, container_h: i32) -> (i32, i32) {
        if self.is_wider_than(container_w, container_h) {
            (self.width_for(container_h), container_h)
        } else {
            (container_w, self.height_for(container_w))
        }
    }
}

/// Rounds `n / d` half away from zero; `d` is positive.
fn round_div(n: i128, d: i128) -> i32 {
    let q = if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    };
    i32::try_from(q).unwrap_or(if q > 0 { i32::MAX } else { i32::MIN })
}

/// Where the video rectangle sits inside its container.
///
/// Offsets are negative when the video overflows the container (fill mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    /// Centers a `width x height` rectangle inside the container.
    #[must_use]
    pub fn centered(container_w: i32, container_h: i32, width: i32, height: i32) -> Self {
        Self {
            x: (container_w - width) / 2,
            y: (container_h - height) / 2,
            width,
            height,
        }
    }

    /// Horizontal bar width on each side (0 when the video covers the width).
    #[must_use]
    pub fn pillarbox(&self) -> i32 {
        self.x.max(0)
    }

    /// Vertical bar height above and below (0 when the video covers the height).
    #[must_use]
    pub fn letterbox(&self) -> i32 {
        self.y.max(0)
    }
}

/// Caches the last measurement of a surface.
///
/// Surfaces feed it every input change; [`measure`](Self::measure) only
/// recomputes when an input actually differs from the previous pass, and
/// setters report whether anything changed.
#[derive(Debug, Clone, Default)]
pub struct MeasureHelper {
    video: VideoSize,
    mode: ScaleMode,
    last: Option<Measurement>,
    recomputations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measurement {
    container: (i32, i32),
    result: (i32, i32),
}

impl MeasureHelper {
    #[must_use]
    pub fn new(mode: ScaleMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    #[must_use]
    pub fn video(&self) -> VideoSize {
        self.video
    }

    pub fn set_scale_mode(&mut self, mode: ScaleMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.last = None;
        true
    }

    pub fn set_video_size(&mut self, width: u32, height: u32) -> bool {
        if self.video.width == width && self.video.height == height {
            return false;
        }
        self.video.width = width;
        self.video.height = height;
        self.last = None;
        true
    }

    pub fn set_sample_aspect_ratio(&mut self, sar: SampleAspectRatio) -> bool {
        if self.video.sar == sar {
            return false;
        }
        self.video.sar = sar;
        self.last = None;
        true
    }

    /// Returns the displayed size for the given container.
    pub fn measure(&mut self, container_w: i32, container_h: i32) -> (i32, i32) {
        if let Some(last) = self.last {
            if last.container == (container_w, container_h) {
                return last.result;
            }
        }
        let result = compute_for(self.video, container_w, container_h, self.mode);
        self.recomputations += 1;
        self.last = Some(Measurement {
            container: (container_w, container_h),
            result,
        });
        result
    }

    /// Last computed size, if any input has not changed since.
    #[must_use]
    pub fn measured(&self) -> Option<(i32, i32)> {
        self.last.map(|m| m.result)
    }

    /// How many times geometry was actually recomputed.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
