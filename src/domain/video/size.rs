// SPDX-License-Identifier: MPL-2.0
//! Video dimensions as reported by the player.
//!
//! A [`VideoSize`] is always replaced wholesale when the player reports a new
//! size, so observers never see a half-updated value.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Sample (pixel) aspect ratio, `num:den`.
///
/// Both terms must be non-zero for the ratio to be meaningful; anything else is
/// treated as square pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleAspectRatio {
    pub num: u32,
    pub den: u32,
}

impl SampleAspectRatio {
    /// Square pixels.
    pub const SQUARE: Self = Self { num: 1, den: 1 };

    #[must_use]
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Returns true when both terms are non-zero.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.num > 0 && self.den > 0
    }

    /// Returns the ratio as a float, or 1.0 for an invalid ratio.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        if self.is_valid() {
            f64::from(self.num) / f64::from(self.den)
        } else {
            1.0
        }
    }
}

impl Default for SampleAspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for SampleAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

/// Decoded video dimensions plus sample aspect ratio.
///
/// `width`/`height` are zero only while the size is still unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
    pub sar: SampleAspectRatio,
}

impl VideoSize {
    /// Creates a size with square pixels.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sar: SampleAspectRatio::SQUARE,
        }
    }

    #[must_use]
    pub const fn with_sar(width: u32, height: u32, sar: SampleAspectRatio) -> Self {
        Self { width, height, sar }
    }

    /// Returns true while the player has not reported usable dimensions.
    #[must_use]
    pub fn is_unknown(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Display aspect ratio taking the sample aspect ratio into account.
    #[must_use]
    pub fn display_aspect(self) -> Option<f64> {
        if self.is_unknown() {
            return None;
        }
        Some(f64::from(self.width) * self.sar.as_f64() / f64::from(self.height))
    }
}

impl fmt::Display for VideoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} [SAR {}]", self.width, self.height, self.sar)
    }
}

/// Splits `"<a><sep><b>"` into two unsigned integers.
fn parse_pair(s: &str, separators: &[char], what: &str) -> Result<(u32, u32), Error> {
    let invalid = || Error::InvalidArgument(format!("invalid {what} '{s}'"));
    let (a, b) = s.trim().split_once(separators).ok_or_else(invalid)?;
    let a = a.trim().parse().map_err(|_| invalid())?;
    let b = b.trim().parse().map_err(|_| invalid())?;
    Ok((a, b))
}

impl FromStr for SampleAspectRatio {
    type Err = Error;

    /// Parses `"num:den"` (or `"num/den"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = parse_pair(s, &[':', '/'], "sample aspect ratio")?;
        Ok(Self::new(num, den))
    }
}

impl FromStr for VideoSize {
    type Err = Error;

    /// Parses `"WIDTHxHEIGHT"` with square pixels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_pair(s, &['x', 'X'], "size")?;
        Ok(Self::new(width, height))
    }
}
