// SPDX-License-Identifier: MPL-2.0
//! Keyboard routing for the case-study view.
//!
//! A single router with a fixed priority: while the gallery overlay is open
//! it owns the keyboard and swallows every key it does not handle; otherwise
//! the player gets the play/pause and fullscreen shortcuts. Nothing else is
//! bound.
//!
//! The fullscreen shortcut is bound to the physical F key so it stays where
//! it is on every keyboard layout.

use iced::keyboard::{
    self,
    key::{self, Named},
};

/// Gallery overlay intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Close,
    Next,
    Previous,
}

/// Player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePlay,
    ToggleFullscreen,
}

/// Where a key press went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Gallery(GalleryAction),
    Player(PlayerAction),
    /// Consumed by the open gallery without any effect.
    Swallowed,
    /// Not handled; the host's default behavior applies.
    Ignored,
}

impl Route {
    /// Returns true if the host's default action for the key (page scroll on
    /// Space, for instance) must be suppressed.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Route::Player(_))
    }

    pub fn is_handled(self) -> bool {
        !matches!(self, Route::Ignored)
    }
}

/// Keyboard router, attached for the lifetime of a mounted view.
#[derive(Debug, Clone)]
pub struct InputRouter {
    attached: bool,
}

impl InputRouter {
    /// Creates an attached router.
    pub fn new() -> Self {
        Self { attached: true }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Detaches the router. Idempotent; a detached router ignores every key.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Routes a key press given whether the gallery overlay is open.
    pub fn route(
        &self,
        key: &keyboard::Key,
        physical_key: &key::Physical,
        gallery_open: bool,
    ) -> Route {
        if !self.attached {
            return Route::Ignored;
        }

        if gallery_open {
            return match key {
                keyboard::Key::Named(Named::Escape) => Route::Gallery(GalleryAction::Close),
                keyboard::Key::Named(Named::ArrowRight) => Route::Gallery(GalleryAction::Next),
                keyboard::Key::Named(Named::ArrowLeft) => Route::Gallery(GalleryAction::Previous),
                _ => Route::Swallowed,
            };
        }

        if matches!(physical_key, key::Physical::Code(key::Code::KeyF)) {
            return Route::Player(PlayerAction::ToggleFullscreen);
        }

        match key {
            keyboard::Key::Named(Named::Space) => Route::Player(PlayerAction::TogglePlay),
            _ => Route::Ignored,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(named: Named) -> (keyboard::Key, key::Physical) {
        let code = match named {
            Named::Space => key::Code::Space,
            Named::Escape => key::Code::Escape,
            Named::ArrowRight => key::Code::ArrowRight,
            Named::ArrowLeft => key::Code::ArrowLeft,
            _ => key::Code::Enter,
        };
        (keyboard::Key::Named(named), key::Physical::Code(code))
    }

    fn character(c: &str, code: key::Code) -> (keyboard::Key, key::Physical) {
        (keyboard::Key::Character(c.into()), key::Physical::Code(code))
    }

    fn press_route(
        router: &InputRouter,
        press: &(keyboard::Key, key::Physical),
        gallery_open: bool,
    ) -> Route {
        router.route(&press.0, &press.1, gallery_open)
    }

    #[test]
    fn space_toggles_play_and_suppresses_scroll() {
        let router = InputRouter::new();
        let route = press_route(&router, &named(Named::Space), false);

        assert_eq!(route, Route::Player(PlayerAction::TogglePlay));
        assert!(route.suppresses_default());
    }

    #[test]
    fn f_toggles_fullscreen_in_either_case() {
        let router = InputRouter::new();
        for c in ["f", "F"] {
            let route = press_route(&router, &character(c, key::Code::KeyF), false);
            assert_eq!(route, Route::Player(PlayerAction::ToggleFullscreen));
            assert!(route.suppresses_default());
        }
    }

    #[test]
    fn fullscreen_follows_the_physical_key_on_any_layout() {
        let router = InputRouter::new();

        // Cyrillic layout: the F key types "а".
        assert_eq!(
            press_route(&router, &character("а", key::Code::KeyF), false),
            Route::Player(PlayerAction::ToggleFullscreen)
        );

        // A remapped layout typing "f" from another key position.
        assert_eq!(
            press_route(&router, &character("f", key::Code::KeyG), false),
            Route::Ignored
        );
    }

    #[test]
    fn other_keys_are_ignored_when_gallery_closed() {
        let router = InputRouter::new();
        for press in [
            named(Named::Escape),
            named(Named::ArrowRight),
            named(Named::ArrowLeft),
            named(Named::Enter),
            character("g", key::Code::KeyG),
        ] {
            let route = press_route(&router, &press, false);
            assert_eq!(route, Route::Ignored);
            assert!(!route.suppresses_default());
        }
    }

    #[test]
    fn open_gallery_takes_priority() {
        let router = InputRouter::new();

        assert_eq!(
            press_route(&router, &named(Named::Escape), true),
            Route::Gallery(GalleryAction::Close)
        );
        assert_eq!(
            press_route(&router, &named(Named::ArrowRight), true),
            Route::Gallery(GalleryAction::Next)
        );
        assert_eq!(
            press_route(&router, &named(Named::ArrowLeft), true),
            Route::Gallery(GalleryAction::Previous)
        );
    }

    #[test]
    fn open_gallery_swallows_player_shortcuts() {
        let router = InputRouter::new();

        for press in [
            named(Named::Space),
            character("f", key::Code::KeyF),
            character("x", key::Code::KeyX),
        ] {
            let route = press_route(&router, &press, true);
            assert_eq!(route, Route::Swallowed);
            assert!(route.is_handled());
            assert!(!route.suppresses_default());
        }
    }

    #[test]
    fn detached_router_routes_nothing() {
        let mut router = InputRouter::new();
        router.detach();
        router.detach();

        assert!(!router.is_attached());
        assert_eq!(press_route(&router, &named(Named::Space), false), Route::Ignored);
        assert_eq!(press_route(&router, &named(Named::Escape), true), Route::Ignored);
        assert_eq!(
            press_route(&router, &character("f", key::Code::KeyF), false),
            Route::Ignored
        );

        router.attach();
        assert_eq!(
            press_route(&router, &named(Named::Space), false),
            Route::Player(PlayerAction::TogglePlay)
        );
    }
}
