// SPDX-License-Identifier: MPL-2.0
//! Classification of free-form video references.
//!
//! A project's video reference is either an address on the remote embed
//! provider (rendered by the provider's own player and driven over a message
//! channel) or anything else, which is handed verbatim to a local media
//! element. Classification never fails and never touches the network.

use regex::Regex;
use std::sync::LazyLock;

/// Length of a canonical embed identifier.
pub const CANONICAL_ID_LEN: usize = 11;

/// Base address of the provider's embeddable player.
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Recognized address shapes: short link, `/v/`, `/u/x/`, `/embed/`,
/// `watch?v=` and a trailing `&v=` query parameter. The identifier is the
/// second capture.
static EMBED_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("embed address regex should compile")
});

/// Which backend plays a project's video. Fixed for the lifetime of a mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaybackSource {
    /// A media URL the player element loads and controls directly.
    DirectResource { url: String },
    /// A video hosted by the embed provider, addressed by its canonical id.
    RemoteEmbed { canonical_id: String },
    /// The project has no video; the cover image is shown instead.
    NoVideo,
}

impl PlaybackSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteEmbed { .. })
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Self::DirectResource { .. })
    }

    /// Address of the embeddable player for a remote source.
    ///
    /// The provider only autoplays muted, so `muted` should follow the
    /// player's initial mute state. Looping a single video requires the id to
    /// be repeated as a one-item playlist.
    pub fn embed_url(&self, muted: bool) -> Option<String> {
        match self {
            Self::RemoteEmbed { canonical_id } => Some(format!(
                "{EMBED_BASE_URL}{id}?enablejsapi=1&autoplay=1&mute={mute}&controls=0&rel=0\
                 &modestbranding=1&loop=1&playlist={id}&iv_load_policy=3",
                id = canonical_id,
                mute = u8::from(muted),
            )),
            _ => None,
        }
    }
}

/// Classifies a video reference.
///
/// # Examples
///
/// ```
/// use showcase_player::media::source::{resolve, PlaybackSource};
///
/// assert_eq!(
///     resolve(Some("https://youtu.be/dQw4w9WgXcQ")),
///     PlaybackSource::RemoteEmbed { canonical_id: "dQw4w9WgXcQ".into() }
/// );
/// assert_eq!(resolve(Some("")), PlaybackSource::NoVideo);
/// ```
pub fn resolve(reference: Option<&str>) -> PlaybackSource {
    let reference = match reference {
        Some(r) if !r.is_empty() => r,
        _ => return PlaybackSource::NoVideo,
    };

    match extract_canonical_id(reference) {
        Some(canonical_id) => PlaybackSource::RemoteEmbed {
            canonical_id: canonical_id.to_string(),
        },
        None => PlaybackSource::DirectResource {
            url: reference.to_string(),
        },
    }
}

/// Extracts the canonical id if the reference matches a recognized embed
/// address and the id segment is exactly [`CANONICAL_ID_LEN`] characters.
pub fn extract_canonical_id(reference: &str) -> Option<&str> {
    let captures = EMBED_ADDRESS_PATTERN.captures(reference)?;
    let id = captures.get(2)?.as_str();
    (id.chars().count() == CANONICAL_ID_LEN).then_some(id)
}
