// SPDX-License-Identifier: MPL-2.0
//! Playback states as reported by the player.
//!
//! The player owns the state; the view only observes transitions.

use std::fmt;

/// Represents the current playback state of the attached player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// Media is being opened.
    Preparing,
    /// Media is ready but has not started.
    Prepared,
    /// Frames are being rendered.
    Playing,
    /// Playback is paused.
    Pausing,
    /// Playback reached the end of the stream.
    Completed,
    /// The player failed.
    Error,
}

impl PlaybackState {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::Preparing,
        Self::Prepared,
        Self::Playing,
        Self::Pausing,
        Self::Completed,
        Self::Error,
    ];

    /// Returns the single-state mask for this state.
    #[must_use]
    pub fn mask(self) -> StateMask {
        StateMask(1 << self as u8)
    }

    /// Returns true once the media has been prepared and before it is reset.
    #[must_use]
    pub fn is_prepared(self) -> bool {
        StateMask::PREPARED.contains(self)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Prepared => "prepared",
            Self::Playing => "playing",
            Self::Pausing => "pausing",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A set of playback states, used to ask a player whether it is in any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateMask(u8);

impl StateMask {
    pub const NONE: Self = Self(0);

    /// States in which the media has been prepared and can render frames.
    pub const PREPARED: Self = Self(
        1 << PlaybackState::Prepared as u8
            | 1 << PlaybackState::Playing as u8
            | 1 << PlaybackState::Pausing as u8
            | 1 << PlaybackState::Completed as u8,
    );

    #[must_use]
    pub fn contains(self, state: PlaybackState) -> bool {
        self.0 & state.mask().0 != 0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<PlaybackState> for StateMask {
    fn from(state: PlaybackState) -> Self {
        state.mask()
    }
}

impl std::ops::BitOr for StateMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOr for PlaybackState {
    type Output = StateMask;

    fn bitor(self, rhs: Self) -> StateMask {
        self.mask().union(rhs.mask())
    }
}
