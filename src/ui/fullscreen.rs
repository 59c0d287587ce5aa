// SPDX-License-Identifier: MPL-2.0
//! Fullscreen coordination for the player surface.
//!
//! The view never switches the window mode itself. It asks the host for a
//! mode change and only believes it once the host reports the mode it
//! actually ended up in, so a refused or failed request leaves the surface
//! windowed. The host may also leave fullscreen on its own (the window
//! manager handling Escape, for instance) and reports that the same way.

use crate::error::PlaybackError;

/// Tracks the confirmed fullscreen state and any request in flight.
#[derive(Debug, Clone, Default)]
pub struct FullscreenCoordinator {
    is_fullscreen: bool,
    requested: Option<bool>,
}

impl FullscreenCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirmed state, as last reported by the host.
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Records a toggle request and returns the desired state: enter if the
    /// surface is windowed, otherwise exit.
    pub fn request_toggle(&mut self) -> bool {
        let desired = !self.is_fullscreen;
        self.requested = Some(desired);
        log::debug!(
            "Requesting {} fullscreen",
            if desired { "enter" } else { "exit" }
        );
        desired
    }

    /// Applies the mode the host reports.
    pub fn sync(&mut self, actual: bool) {
        match self.requested.take() {
            Some(desired) if desired != actual => {
                log::warn!("Fullscreen request not honored, staying at {}", actual);
            }
            None if self.is_fullscreen != actual => {
                log::debug!("Fullscreen changed by the host to {}", actual);
            }
            _ => {}
        }
        self.is_fullscreen = actual;
    }

    /// Drops the pending request after the host reported a failure. The
    /// confirmed state is kept.
    pub fn reject(&mut self, err: &PlaybackError) {
        if self.requested.take().is_some() {
            log::warn!("{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_request_alternates_with_confirmations() {
        let mut coordinator = FullscreenCoordinator::new();
        assert!(!coordinator.is_fullscreen());

        assert!(coordinator.request_toggle());
        assert!(!coordinator.is_fullscreen(), "state moves on confirmation only");

        coordinator.sync(true);
        assert!(coordinator.is_fullscreen());

        assert!(!coordinator.request_toggle());
        coordinator.sync(false);
        assert!(!coordinator.is_fullscreen());
    }

    #[test]
    fn refused_request_stays_windowed() {
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.request_toggle();

        coordinator.reject(&PlaybackError::FullscreenRejected("denied".to_string()));

        assert!(!coordinator.is_fullscreen());
        assert!(coordinator.request_toggle(), "next toggle still asks to enter");
    }

    #[test]
    fn unanswered_request_is_overridden_by_host_report() {
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.request_toggle();

        coordinator.sync(false);
        assert!(!coordinator.is_fullscreen());
        assert!(coordinator.request_toggle());
    }

    #[test]
    fn sync_follows_host_initiated_changes() {
        let mut coordinator = FullscreenCoordinator::new();

        coordinator.sync(true);
        assert!(coordinator.is_fullscreen());

        coordinator.sync(false);
        assert!(!coordinator.is_fullscreen());
    }
}
