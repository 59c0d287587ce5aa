// SPDX-License-Identifier: MPL-2.0
//! Case-study detail view.
//!
//! Composition root for one mounted project: it owns the playback
//! controller, the controls timer, the gallery overlay, the keyboard router
//! and the fullscreen coordinator, and tears them all down on unmount.
//!
//! The host supplies the environment through [`MediaHost`] at mount time and
//! drives the view with [`Message`]s. Time only advances through
//! [`Message::Tick`], delivered by [`State::subscription`] while something is
//! waiting on the clock. Window-level changes go back to the host as
//! [`Effect`]s; the host reports their outcome with another message.

use crate::config::{PlayerConfig, TICK_INTERVAL_MS};
use crate::error::PlaybackError;
use crate::gallery::GalleryNavigator;
use crate::media::{PlaybackSource, ProjectMedia};
use crate::ui::fullscreen::FullscreenCoordinator;
use crate::ui::input::{GalleryAction, InputRouter, PlayerAction, Route};
use crate::ui::state::{ControlVisibilityTimer, Expiry};
use crate::video_player::{
    EmbedPort, HeadlessElement, MediaElement, MessageBus, PlaybackController, PlaybackPhase,
    PlaybackState, RemoteEmbedBridge,
};
use iced::keyboard::{self, key};
use iced::{event, mouse, time, Subscription};
use std::time::{Duration, Instant};

/// Environment services the view needs at mount.
pub trait MediaHost {
    /// Creates the element that plays a direct resource, showing `poster`
    /// until the first frame is available.
    fn open_direct(&mut self, url: &str, poster: &str) -> Box<dyn MediaElement>;
}

/// Host without any output, used by the command-line front end.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    duration_secs: f64,
    refuse_autoplay: bool,
    refuse_fullscreen: bool,
    fullscreen: bool,
}

impl HeadlessHost {
    /// Direct resources opened by this host report `duration_secs`.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            refuse_autoplay: false,
            refuse_fullscreen: false,
            fullscreen: false,
        }
    }

    #[must_use]
    pub fn refusing_autoplay(mut self) -> Self {
        self.refuse_autoplay = true;
        self
    }

    #[must_use]
    pub fn refusing_fullscreen(mut self) -> Self {
        self.refuse_fullscreen = true;
        self
    }

    /// Carries out `effect` and returns the report a windowed host would
    /// send back, if any.
    pub fn apply(&mut self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::EnterFullscreen if self.refuse_fullscreen => Some(Message::HostError(
                "Fullscreen request denied by host".to_string(),
            )),
            Effect::EnterFullscreen => {
                self.fullscreen = true;
                Some(Message::FullscreenChanged(true))
            }
            Effect::ExitFullscreen => {
                self.fullscreen = false;
                Some(Message::FullscreenChanged(false))
            }
            Effect::None | Effect::NavigateBack => None,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(f64::NAN)
    }
}

impl MediaHost for HeadlessHost {
    fn open_direct(&mut self, url: &str, _poster: &str) -> Box<dyn MediaElement> {
        let element = HeadlessElement::new(url, self.duration_secs);
        if self.refuse_autoplay {
            Box::new(element.refusing_autoplay())
        } else {
            Box::new(element)
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Native event forwarded by the subscription.
    RawEvent(iced::Event),
    Tick(Instant),
    TogglePlayback,
    ToggleMute,
    ToggleFullscreen,
    /// Scrub bar position in `[0, 1]`.
    SeekToFraction(f64),
    SeekBackward,
    SeekForward,
    PointerActivity,
    /// Click on the player surface itself.
    SurfaceClicked,
    /// Thumbnail click.
    OpenGallery(usize),
    /// Close button or backdrop click.
    CloseGallery,
    NextImage,
    PreviousImage,
    /// The remote embed surface finished loading.
    EmbedSurfaceReady(EmbedPort),
    /// Position or duration of the direct element changed.
    MediaTimeUpdate,
    MediaEnded,
    /// The window is now in (true) or out of fullscreen, whether after a
    /// request or on the host's own initiative.
    FullscreenChanged(bool),
    /// A media surface or the host reported a failure in its own words.
    HostError(String),
    Back,
}

/// Effects the host must carry out.
///
/// Fullscreen effects map to `window::set_mode` with `Mode::Fullscreen` or
/// `Mode::Windowed`. The host answers with [`Message::FullscreenChanged`],
/// or with [`Message::HostError`] when the change failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    NavigateBack,
    EnterFullscreen,
    ExitFullscreen,
}

/// A mounted case-study view.
#[derive(Debug)]
pub struct State {
    project: ProjectMedia,
    playback: PlaybackController,
    controls: ControlVisibilityTimer,
    gallery: GalleryNavigator,
    router: InputRouter,
    fullscreen: FullscreenCoordinator,
    seek_step_secs: f64,
    start_muted: bool,
    mounted: bool,
}

impl State {
    /// Mounts the view for `project`.
    ///
    /// The project's video reference is classified once; the resulting
    /// backend is kept until unmount. Autoplay is attempted for any video.
    pub fn mount(
        project: ProjectMedia,
        config: &PlayerConfig,
        host: &mut dyn MediaHost,
        bus: &MessageBus,
        now: Instant,
    ) -> Self {
        let start_muted = config.start_muted();
        let playback = match project.playback_source() {
            PlaybackSource::DirectResource { url } => {
                let element = host.open_direct(&url, &project.cover_image_url);
                PlaybackController::direct(url, element, start_muted)
            }
            PlaybackSource::RemoteEmbed { canonical_id } => PlaybackController::remote(
                canonical_id,
                RemoteEmbedBridge::new(bus),
                start_muted,
                config.embed_startup_delay(),
                now,
            ),
            PlaybackSource::NoVideo => PlaybackController::idle(),
        };

        log::info!(
            "Mounted case study \"{}\" ({:?})",
            project.title,
            playback.source()
        );

        let gallery = GalleryNavigator::new(project.gallery_images.clone());
        Self {
            project,
            playback,
            controls: ControlVisibilityTimer::new(config.hide_delay()),
            gallery,
            router: InputRouter::new(),
            fullscreen: FullscreenCoordinator::new(),
            seek_step_secs: config.seek_step_secs(),
            start_muted,
            mounted: true,
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        if !self.mounted {
            log::debug!("ignoring {:?} after unmount", message);
            return Effect::None;
        }

        match message {
            Message::RawEvent(event) => return self.handle_raw_event(event),
            Message::Tick(now) => self.tick(now),
            Message::TogglePlayback => self.playback.toggle_play(),
            Message::ToggleMute => self.playback.toggle_mute(),
            Message::ToggleFullscreen => return self.toggle_fullscreen(),
            Message::SeekToFraction(fraction) => self.playback.seek_to_fraction(fraction),
            Message::SeekBackward => self.playback.seek_relative(-self.seek_step_secs),
            Message::SeekForward => self.playback.seek_relative(self.seek_step_secs),
            Message::PointerActivity => self.on_pointer_activity(Instant::now()),
            Message::SurfaceClicked => {
                self.playback.toggle_play();
                self.on_pointer_activity(Instant::now());
            }
            Message::OpenGallery(index) => self.gallery.open(index),
            Message::CloseGallery => self.gallery.close(),
            Message::NextImage => self.gallery.next(),
            Message::PreviousImage => self.gallery.previous(),
            Message::EmbedSurfaceReady(port) => self.playback.attach_embed_surface(port),
            Message::MediaTimeUpdate => self.playback.on_time_update(),
            Message::MediaEnded => self.playback.on_ended(),
            Message::FullscreenChanged(actual) => {
                self.fullscreen.sync(actual);
                self.playback.set_fullscreen(actual);
            }
            Message::HostError(raw) => self.on_host_error(&raw),
            Message::Back => return Effect::NavigateBack,
        }
        Effect::None
    }

    fn handle_raw_event(&mut self, event: iced::Event) -> Effect {
        match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key, physical_key, ..
            }) => self.handle_key(&key, &physical_key).1,
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                self.on_pointer_activity(Instant::now());
                Effect::None
            }
            _ => Effect::None,
        }
    }

    /// Routes a key press and applies the resulting intent.
    pub fn handle_key(
        &mut self,
        key: &keyboard::Key,
        physical_key: &key::Physical,
    ) -> (Route, Effect) {
        let route = self.router.route(key, physical_key, self.gallery.is_open());
        let effect = match route {
            Route::Gallery(GalleryAction::Close) => {
                self.gallery.close();
                Effect::None
            }
            Route::Gallery(GalleryAction::Next) => {
                self.gallery.next();
                Effect::None
            }
            Route::Gallery(GalleryAction::Previous) => {
                self.gallery.previous();
                Effect::None
            }
            Route::Player(PlayerAction::TogglePlay) => {
                self.playback.toggle_play();
                Effect::None
            }
            Route::Player(PlayerAction::ToggleFullscreen) => self.toggle_fullscreen(),
            Route::Swallowed | Route::Ignored => Effect::None,
        };
        (route, effect)
    }

    /// Pointer movement over the player: shows the controls and restarts
    /// the hide countdown.
    pub fn on_pointer_activity(&mut self, now: Instant) {
        if self.mounted {
            self.controls.on_activity(now);
        }
    }

    fn tick(&mut self, now: Instant) {
        self.playback.tick(now);
        if self.controls.tick(now, self.playback.is_playing()) == Expiry::Hidden {
            log::trace!("controls hidden after inactivity");
        }
    }

    /// Asks the host to switch the player surface in or out of fullscreen.
    fn toggle_fullscreen(&mut self) -> Effect {
        if self.fullscreen.request_toggle() {
            Effect::EnterFullscreen
        } else {
            Effect::ExitFullscreen
        }
    }

    fn on_host_error(&mut self, raw: &str) {
        let err = PlaybackError::from_message(raw);
        match err {
            PlaybackError::FullscreenRejected(_) => self.fullscreen.reject(&err),
            PlaybackError::AutoplayRejected(_) | PlaybackError::MediaUnavailable(_) => {
                self.playback.on_media_error(&err)
            }
            PlaybackError::Other(_) => log::warn!("Host reported: {}", err),
        }
    }

    /// Native events and clock ticks the view currently needs.
    pub fn subscription(&self) -> Subscription<Message> {
        if !self.mounted {
            return Subscription::none();
        }

        let events = event::listen_with(|event, status, _window| {
            let wanted = match &event {
                iced::Event::Keyboard(keyboard::Event::KeyPressed { .. }) => {
                    matches!(status, event::Status::Ignored)
                }
                iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => true,
                _ => false,
            };
            wanted.then_some(Message::RawEvent(event))
        });

        if self.needs_ticks() {
            Subscription::batch([
                events,
                time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick),
            ])
        } else {
            events
        }
    }

    /// Returns true while a deadline is pending or inbound embed
    /// notifications may arrive.
    pub fn needs_ticks(&self) -> bool {
        if !self.mounted {
            return false;
        }
        let source = self.playback.source();
        self.controls.is_armed()
            || self.playback.autoplay_pending()
            || source.is_remote()
            || (source.is_direct() && self.playback.is_playing())
    }

    /// Tears the view down: disarms the controls timer, detaches the
    /// keyboard router and releases the playback backend. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.controls.cancel();
        self.router.detach();
        self.playback.detach();
        self.gallery.close();
        log::info!("Unmounted case study \"{}\"", self.project.title);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn title(&self) -> &str {
        &self.project.title
    }

    /// Cover image, shown when there is no video and as the player poster.
    pub fn poster(&self) -> &str {
        &self.project.cover_image_url
    }

    pub fn source(&self) -> &PlaybackSource {
        self.playback.source()
    }

    /// Address used to create the remote embed surface.
    pub fn embed_url(&self) -> Option<String> {
        self.playback.source().embed_url(self.start_muted)
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.playback.phase()
    }

    pub fn time_label(&self) -> Option<String> {
        self.playback.time_label()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn controls(&self) -> &ControlVisibilityTimer {
        &self.controls
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Whether the large centered play button is shown.
    pub fn show_play_overlay(&self) -> bool {
        self.playback.phase() == PlaybackPhase::Paused
    }

    pub fn gallery(&self) -> &GalleryNavigator {
        &self.gallery
    }

    pub fn thumbnails(&self) -> &[String] {
        self.gallery.thumbnails()
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.unmount();
    }
}
