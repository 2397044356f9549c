// SPDX-License-Identifier: MPL-2.0
//! `player_view` is the presentation layer of a video player.
//!
//! It binds a player's decoded-frame output to an on-screen render surface,
//! keeps the displayed geometry right as the video size and sample aspect
//! ratio change, and drives poster and controller visibility from playback
//! state transitions. Decoding and drawing are left to the host, which plugs
//! in through the traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/player_view/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod presentation;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use presentation::{format_duration, Collaborators, VideoView};
