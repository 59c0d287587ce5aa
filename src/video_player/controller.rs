// SPDX-License-Identifier: MPL-2.0
//! Unified playback controller.
//!
//! One controller per mounted view, bound to exactly one backend chosen from
//! the project's [`PlaybackSource`]. The backend never changes for the
//! lifetime of the controller.
//!
//! A direct element is the source of truth for its own state: every intent is
//! applied to it synchronously and the cached [`PlaybackState`] is read back.
//! A remote embed cannot be queried, so intents update the cache
//! optimistically and post a command through the bridge; inbound provider
//! notifications later overwrite the cache in arrival order.

use super::bridge::{EmbedCommand, EmbedEvent, EmbedPlayerState, EmbedPort, RemoteEmbedBridge};
use super::direct::MediaElement;
use super::time_units::{format_timestamp, progress_fraction};
use crate::error::PlaybackError;
use crate::media::PlaybackSource;
use std::time::{Duration, Instant};

/// Snapshot of what the controls display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_muted: bool,
    /// Always within `[0, 1]`. Stays 0 for remote embeds.
    pub progress_fraction: f64,
    /// Stays 0 for remote embeds and until a direct element knows its length.
    pub duration_secs: f64,
    pub is_fullscreen: bool,
}

/// Coarse lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No video; nothing to control.
    Idle,
    Playing,
    Paused,
}

#[derive(Debug)]
struct RemoteBackend {
    bridge: RemoteEmbedBridge,
    /// When the deferred first `playVideo` goes out. `None` once sent.
    autoplay_due: Option<Instant>,
}

#[derive(Debug)]
enum Backend {
    Direct(Box<dyn MediaElement>),
    Remote(RemoteBackend),
    Idle,
}

/// Playback controller for a single mounted source.
#[derive(Debug)]
pub struct PlaybackController {
    source: PlaybackSource,
    backend: Backend,
    state: PlaybackState,
}

impl PlaybackController {
    /// Controller for a project without video.
    pub fn idle() -> Self {
        Self {
            source: PlaybackSource::NoVideo,
            backend: Backend::Idle,
            state: PlaybackState::default(),
        }
    }

    /// Binds a direct element and attempts autoplay.
    ///
    /// The element is muted first when `start_muted` is set. A refused
    /// autoplay leaves the controller paused.
    pub fn direct(
        url: impl Into<String>,
        mut element: Box<dyn MediaElement>,
        start_muted: bool,
    ) -> Self {
        let url = url.into();
        element.set_muted(start_muted);
        if let Err(err) = element.play() {
            log::warn!("Autoplay of {} failed, staying paused: {}", url, err);
        }

        let mut controller = Self {
            source: PlaybackSource::DirectResource { url },
            backend: Backend::Direct(element),
            state: PlaybackState::default(),
        };
        controller.on_time_update();
        controller
    }

    /// Binds a remote embed.
    ///
    /// The embed is created with autoplay requested, so the controller
    /// assumes it is playing. The first explicit `playVideo` is deferred by
    /// `startup_delay` to give the surface time to initialize.
    pub fn remote(
        canonical_id: impl Into<String>,
        bridge: RemoteEmbedBridge,
        start_muted: bool,
        startup_delay: Duration,
        now: Instant,
    ) -> Self {
        Self {
            source: PlaybackSource::RemoteEmbed {
                canonical_id: canonical_id.into(),
            },
            backend: Backend::Remote(RemoteBackend {
                bridge,
                autoplay_due: Some(now + startup_delay),
            }),
            state: PlaybackState {
                is_playing: true,
                is_muted: start_muted,
                ..PlaybackState::default()
            },
        }
    }

    pub fn source(&self) -> &PlaybackSource {
        &self.source
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn phase(&self) -> PlaybackPhase {
        match self.backend {
            Backend::Idle => PlaybackPhase::Idle,
            _ if self.state.is_playing => PlaybackPhase::Playing,
            _ => PlaybackPhase::Paused,
        }
    }

    /// Returns true while the deferred first `playVideo` has not gone out.
    pub fn autoplay_pending(&self) -> bool {
        matches!(
            &self.backend,
            Backend::Remote(RemoteBackend {
                autoplay_due: Some(_),
                ..
            })
        )
    }

    /// Returns true if the remote surface's outbound port is attached.
    pub fn embed_ready(&self) -> bool {
        match &self.backend {
            Backend::Remote(remote) => remote.bridge.is_ready(),
            _ => false,
        }
    }

    pub fn toggle_play(&mut self) {
        match &mut self.backend {
            Backend::Direct(element) => {
                if element.is_paused() {
                    if let Err(err) = element.play() {
                        log::warn!("Play request refused: {}", err);
                    }
                } else {
                    element.pause();
                }
                self.state.is_playing = !element.is_paused();
            }
            Backend::Remote(remote) => {
                self.state.is_playing = !self.state.is_playing;
                let command = if self.state.is_playing {
                    EmbedCommand::PlayVideo
                } else {
                    EmbedCommand::PauseVideo
                };
                post(&remote.bridge, command);
            }
            Backend::Idle => {}
        }
    }

    pub fn toggle_mute(&mut self) {
        match &mut self.backend {
            Backend::Direct(element) => {
                let muted = !element.is_muted();
                element.set_muted(muted);
                self.state.is_muted = element.is_muted();
            }
            Backend::Remote(remote) => {
                self.state.is_muted = !self.state.is_muted;
                let command = if self.state.is_muted {
                    EmbedCommand::Mute
                } else {
                    EmbedCommand::UnMute
                };
                post(&remote.bridge, command);
            }
            Backend::Idle => {}
        }
    }

    /// Moves the playhead by `delta_secs`, clamped to the media bounds.
    ///
    /// Only direct elements can seek, and only once their duration is known.
    pub fn seek_relative(&mut self, delta_secs: f64) {
        if !delta_secs.is_finite() {
            return;
        }
        let Backend::Direct(element) = &mut self.backend else {
            return;
        };
        let duration = element.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let target = (element.current_time() + delta_secs).clamp(0.0, duration);
        element.set_current_time(target);
        self.on_time_update();
    }

    /// Seeks to a fraction of the duration, clamped to `[0, 1]`.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let Backend::Direct(element) = &mut self.backend else {
            return;
        };
        let duration = element.duration();
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        element.set_current_time(fraction.clamp(0.0, 1.0) * duration);
        self.on_time_update();
    }

    /// Re-reads position, duration and play state from a direct element.
    pub fn on_time_update(&mut self) {
        let Backend::Direct(element) = &self.backend else {
            return;
        };
        let duration = element.duration();
        self.state.duration_secs = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.state.progress_fraction = progress_fraction(element.current_time(), duration);
        self.state.is_playing = !element.is_paused();
        self.state.is_muted = element.is_muted();
    }

    /// A direct element reached its end.
    pub fn on_ended(&mut self) {
        if matches!(self.backend, Backend::Direct(_)) {
            self.on_time_update();
            self.state.is_playing = false;
        }
    }

    /// A direct element reported a failure.
    ///
    /// The element is stopped and the cache re-read from it, so the view
    /// falls back to its paused state with the poster still shown.
    pub fn on_media_error(&mut self, err: &PlaybackError) {
        let Backend::Direct(element) = &mut self.backend else {
            log::debug!("ignoring media error for {:?}: {}", self.source, err);
            return;
        };
        log::warn!("Playback of {:?} failed: {}", self.source, err);
        if !element.is_paused() {
            element.pause();
        }
        self.on_time_update();
    }

    /// Reconciles the cache with a provider notification.
    ///
    /// The last notification applied wins over any optimistic update.
    pub fn apply_embed_event(&mut self, event: EmbedEvent) {
        if !matches!(self.backend, Backend::Remote(_)) {
            return;
        }
        match event {
            EmbedEvent::StateChange(EmbedPlayerState::Playing) => self.state.is_playing = true,
            EmbedEvent::StateChange(EmbedPlayerState::Paused) => self.state.is_playing = false,
            EmbedEvent::StateChange(other) => {
                log::trace!("ignoring embed state {:?}", other);
            }
            EmbedEvent::Ready => log::debug!("Embed player reported ready"),
        }
    }

    /// Hands the embed surface's outbound port to the bridge.
    pub fn attach_embed_surface(&mut self, port: EmbedPort) {
        match &mut self.backend {
            Backend::Remote(remote) => remote.bridge.attach_surface(port),
            _ => log::debug!("ignoring embed surface for a non-remote source"),
        }
    }

    /// Advances time-driven work to `now`.
    ///
    /// Remote: sends the deferred first `playVideo` once due, unless the
    /// user paused in the meantime, then drains inbound notifications.
    /// Direct: refreshes progress from the element.
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.backend, Backend::Direct(_)) {
            self.on_time_update();
            return;
        }
        let Backend::Remote(remote) = &mut self.backend else {
            return;
        };
        if remote.autoplay_due.is_some_and(|due| now >= due) {
            remote.autoplay_due = None;
            if self.state.is_playing {
                post(&remote.bridge, EmbedCommand::PlayVideo);
            }
        }
        let events = remote.bridge.poll_events();
        for event in events {
            self.apply_embed_event(event);
        }
    }

    pub fn set_fullscreen(&mut self, is_fullscreen: bool) {
        self.state.is_fullscreen = is_fullscreen;
    }

    /// `current / duration` label for a direct element.
    pub fn time_label(&self) -> Option<String> {
        let Backend::Direct(element) = &self.backend else {
            return None;
        };
        Some(format!(
            "{} / {}",
            format_timestamp(element.current_time()),
            format_timestamp(element.duration())
        ))
    }

    /// Releases the backend: detaches the bridge or pauses the element.
    /// Idempotent.
    pub fn detach(&mut self) {
        match &mut self.backend {
            Backend::Remote(remote) => {
                remote.autoplay_due = None;
                remote.bridge.detach();
            }
            Backend::Direct(element) => {
                if !element.is_paused() {
                    element.pause();
                }
                self.state.is_playing = false;
            }
            Backend::Idle => {}
        }
    }
}

/// Posts a command, accepting that it may be dropped.
fn post(bridge: &RemoteEmbedBridge, command: EmbedCommand) {
    if let Err(err) = bridge.send_command(command) {
        log::debug!("Dropped embed command {}: {}", command.func(), err);
    }
}
