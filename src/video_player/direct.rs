// SPDX-License-Identifier: MPL-2.0
//! Directly controllable media elements.
//!
//! A direct resource is played by an element the host owns (a `<video>` tag,
//! a native decoder, ...). Every call is synchronous and the element is the
//! source of truth for its own paused/muted state.

use crate::error::PlaybackError;

/// A media element that plays a direct resource.
pub trait MediaElement: std::fmt::Debug {
    /// Starts playback. Fails if the environment refuses to play, e.g. an
    /// autoplay attempt without a prior user gesture.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Total duration in seconds. NaN or 0 until metadata has loaded.
    fn duration(&self) -> f64;
}

/// Element without any output, tracking state only.
///
/// Used by the command-line front end and as a stand-in in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessElement {
    url: String,
    paused: bool,
    muted: bool,
    position_secs: f64,
    duration_secs: f64,
    /// Number of upcoming `play()` calls that will be refused.
    refused_plays: u32,
}

impl HeadlessElement {
    pub fn new(url: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            url: url.into(),
            paused: true,
            muted: false,
            position_secs: 0.0,
            duration_secs,
            refused_plays: 0,
        }
    }

    /// Makes the next `play()` fail the way a browser refuses autoplay.
    #[must_use]
    pub fn refusing_autoplay(mut self) -> Self {
        self.refused_plays = 1;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MediaElement for HeadlessElement {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.refused_plays > 0 {
            self.refused_plays -= 1;
            return Err(PlaybackError::AutoplayRejected(
                "play() was refused without a user gesture".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.position_secs
    }

    fn set_current_time(&mut self, secs: f64) {
        self.position_secs = secs;
    }

    fn duration(&self) -> f64 {
        self.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_element_is_paused_at_start() {
        let element = HeadlessElement::new("clip.mp4", 30.0);
        assert!(element.is_paused());
        assert_eq!(element.current_time(), 0.0);
        assert_eq!(element.url(), "clip.mp4");
    }

    #[test]
    fn refused_play_only_fails_once() {
        let mut element = HeadlessElement::new("clip.mp4", 30.0).refusing_autoplay();

        assert!(matches!(
            element.play(),
            Err(PlaybackError::AutoplayRejected(_))
        ));
        assert!(element.is_paused());

        assert!(element.play().is_ok());
        assert!(!element.is_paused());
    }
}
