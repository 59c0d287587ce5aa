// SPDX-License-Identifier: MPL-2.0
//! Video playback for the case-study view.
//!
//! A project's video plays either through a directly controllable media
//! element or through a remote embed driven over a message bridge. The
//! [`PlaybackController`] hides the difference from the view.

pub mod bridge;
pub mod controller;
pub mod direct;
pub mod time_units;

pub use bridge::{
    BridgeError, EmbedCommand, EmbedEvent, EmbedPlayerState, EmbedPort, MessageBus,
    RemoteEmbedBridge,
};
pub use controller::{PlaybackController, PlaybackPhase, PlaybackState};
pub use direct::{HeadlessElement, MediaElement};
pub use time_units::format_timestamp;
