// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Controls**: Transport-control auto-hide timeout
//! - **Embed**: Remote embed start-up behaviour
//! - **Playback**: Mute and seek defaults
//! - **Gallery**: Thumbnail preview size

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default auto-hide delay for transport controls (in seconds).
pub const DEFAULT_CONTROLS_HIDE_SECS: u32 = 3;

/// Minimum controls hide delay (in seconds).
pub const MIN_CONTROLS_HIDE_SECS: u32 = 1;

/// Maximum controls hide delay (in seconds).
pub const MAX_CONTROLS_HIDE_SECS: u32 = 30;

/// Interval of the tick subscription that drives timers (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;

// ==========================================================================
// Embed Defaults
// ==========================================================================

/// Delay before the first `playVideo` command is posted to a remote embed.
///
/// The embed surface ignores commands until its own player has initialized.
pub const DEFAULT_EMBED_STARTUP_DELAY_MS: u64 = 1000;

/// Minimum embed start-up delay (in milliseconds).
pub const MIN_EMBED_STARTUP_DELAY_MS: u64 = 0;

/// Maximum embed start-up delay (in milliseconds).
pub const MAX_EMBED_STARTUP_DELAY_MS: u64 = 10_000;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Whether playback starts muted. Browsers only autoplay muted media.
pub const DEFAULT_START_MUTED: bool = true;

/// Default step for relative seeks (rewind/forward buttons), in seconds.
pub const DEFAULT_SEEK_STEP_SECS: f64 = 10.0;

/// Minimum seek step (in seconds).
pub const MIN_SEEK_STEP_SECS: f64 = 1.0;

/// Maximum seek step (in seconds).
pub const MAX_SEEK_STEP_SECS: f64 = 60.0;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Number of gallery images offered as thumbnails beside the synopsis.
pub const GALLERY_PREVIEW_COUNT: usize = 3;
