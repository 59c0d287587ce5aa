// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! State that the case-study view owns but that is independent of the
//! playback backend.

pub mod controls_visibility;

pub use controls_visibility::{ControlVisibilityTimer, Expiry, HideDelay};
