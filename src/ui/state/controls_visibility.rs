// SPDX-License-Identifier: MPL-2.0
//! Auto-hide of the on-screen transport controls.
//!
//! The timer is single-shot and re-armed by pointer activity. It never runs
//! on its own: the owner feeds it `tick` instants (from a periodic
//! subscription) and the expiry guard is evaluated once, when the deadline
//! is first reached. Paused content keeps its controls visible indefinitely.

use crate::config::{DEFAULT_CONTROLS_HIDE_SECS, MAX_CONTROLS_HIDE_SECS, MIN_CONTROLS_HIDE_SECS};
use std::time::{Duration, Instant};

/// Inactivity delay before the controls hide, in whole seconds.
///
/// Always within 1–30 seconds.
///
/// # Example
///
/// ```
/// use showcase_player::ui::state::HideDelay;
///
/// assert_eq!(HideDelay::default().secs(), 3);
/// assert_eq!(HideDelay::new(90).secs(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u32);

impl HideDelay {
    /// Creates a delay, clamping to the valid range.
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(MIN_CONTROLS_HIDE_SECS, MAX_CONTROLS_HIDE_SECS))
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(DEFAULT_CONTROLS_HIDE_SECS)
    }
}

/// What a tick did to the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// No deadline was reached on this tick.
    Pending,
    /// The deadline was reached while playing; controls are now hidden.
    Hidden,
    /// The deadline was reached while paused; controls stay visible.
    KeptVisible,
}

/// Single-shot, reset-on-activity visibility timer.
#[derive(Debug, Clone)]
pub struct ControlVisibilityTimer {
    delay: HideDelay,
    visible: bool,
    last_activity: Option<Instant>,
    /// Armed deadline. `None` once fired or cancelled.
    deadline: Option<Instant>,
}

impl ControlVisibilityTimer {
    /// Controls start visible with no countdown running.
    pub fn new(delay: HideDelay) -> Self {
        Self {
            delay,
            visible: true,
            last_activity: None,
            deadline: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    /// Returns true while a countdown is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn delay(&self) -> HideDelay {
        self.delay
    }

    /// Pointer activity: show the controls and restart the countdown.
    pub fn on_activity(&mut self, now: Instant) {
        self.visible = true;
        self.last_activity = Some(now);
        self.deadline = Some(now + self.delay.as_duration());
    }

    /// Advances the timer to `now`.
    ///
    /// `is_playing` is only consulted if the deadline is reached on this
    /// call; the countdown is then disarmed whatever the outcome.
    pub fn tick(&mut self, now: Instant, is_playing: bool) -> Expiry {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if is_playing {
                    self.visible = false;
                    Expiry::Hidden
                } else {
                    Expiry::KeptVisible
                }
            }
            _ => Expiry::Pending,
        }
    }

    /// Disarms the countdown. Calling it again is harmless.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for ControlVisibilityTimer {
    fn default() -> Self {
        Self::new(HideDelay::default())
    }
}
