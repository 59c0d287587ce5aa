// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Project(String),
}

/// Failures reported by a playback surface.
///
/// None of these is ever surfaced as a blocking error: the view logs them and
/// degrades to a reduced but usable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The environment refused automatic playback (e.g. no user gesture yet).
    AutoplayRejected(String),

    /// The environment refused to enter or leave fullscreen.
    FullscreenRejected(String),

    /// The media resource could not be loaded or is not playable.
    MediaUnavailable(String),

    /// Generic error with raw message
    Other(String),
}

impl PlaybackError {
    /// Attempts to categorize a raw message reported by a media surface.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("notallowed")
            || msg_lower.contains("not allowed")
            || msg_lower.contains("user gesture")
            || msg_lower.contains("autoplay")
        {
            return PlaybackError::AutoplayRejected(msg.to_string());
        }

        if msg_lower.contains("fullscreen") {
            return PlaybackError::FullscreenRejected(msg.to_string());
        }

        if msg_lower.contains("notsupported")
            || msg_lower.contains("not supported")
            || msg_lower.contains("no supported source")
            || msg_lower.contains("network")
            || msg_lower.contains("404")
        {
            return PlaybackError::MediaUnavailable(msg.to_string());
        }

        PlaybackError::Other(msg.to_string())
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::AutoplayRejected(msg) => write!(f, "Autoplay rejected: {}", msg),
            PlaybackError::FullscreenRejected(msg) => {
                write!(f, "Fullscreen request rejected: {}", msg)
            }
            PlaybackError::MediaUnavailable(msg) => write!(f, "Media unavailable: {}", msg),
            PlaybackError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Project(e) => write!(f, "Project Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Project(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn json_error_becomes_project_variant() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: Error = json_error.into();
        assert!(matches!(err, Error::Project(_)));
    }

    #[test]
    fn playback_error_from_message_autoplay() {
        let err = PlaybackError::from_message(
            "NotAllowedError: play() failed because the user didn't interact with the document first",
        );
        assert!(matches!(err, PlaybackError::AutoplayRejected(_)));
    }

    #[test]
    fn playback_error_from_message_fullscreen() {
        let err = PlaybackError::from_message("Fullscreen request denied");
        assert!(matches!(err, PlaybackError::FullscreenRejected(_)));
    }

    #[test]
    fn playback_error_from_message_unavailable() {
        let err = PlaybackError::from_message("NotSupportedError: no supported source was found");
        assert!(matches!(err, PlaybackError::MediaUnavailable(_)));
    }

    #[test]
    fn playback_error_from_message_falls_back_to_other() {
        let err = PlaybackError::from_message("something odd");
        assert_eq!(err, PlaybackError::Other("something odd".to_string()));
    }

    #[test]
    fn playback_error_displays_category() {
        let err = PlaybackError::MediaUnavailable("404".into());
        assert_eq!(format!("{}", err), "Media unavailable: 404");
    }
}
