// SPDX-License-Identifier: MPL-2.0
//! `showcase_player` drives the media of a portfolio case-study page.
//!
//! A project's free-form video reference is classified into a direct media
//! resource or a remote embed, and a single playback controller presents both
//! through one set of controls. The crate also provides the gallery overlay,
//! keyboard routing, fullscreen coordination and the auto-hiding transport
//! controls of the detail view.

#![doc(html_root_url = "https://docs.rs/showcase_player/0.1.0")]

pub mod config;
pub mod error;
pub mod gallery;
pub mod media;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
