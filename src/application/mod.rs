// SPDX-License-Identifier: MPL-2.0
//! Application layer - collaborator contracts and event plumbing.
//!
//! - [`port`]: Trait definitions for the player, render surfaces, poster and
//!   controller the video view drives
//! - [`event`]: Events collaborators report back, and the queue they travel on
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Hosts implement the ports for their toolkit and player
//! - The presentation layer only talks to collaborators through these ports

pub mod event;
pub mod port;
