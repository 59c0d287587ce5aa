// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! The case-study view follows the Elm-style "state down, messages up"
//! pattern: the host feeds [`case_study::Message`]s in and carries out the
//! returned [`case_study::Effect`]s.
//!
//! - [`case_study`] - Detail view composition root (mount/unmount)
//! - [`input`] - Keyboard routing with gallery-first priority
//! - [`fullscreen`] - Fullscreen requests and drift correction
//! - [`state`] - Reusable state (transport controls auto-hide)

pub mod case_study;
pub mod fullscreen;
pub mod input;
pub mod state;
