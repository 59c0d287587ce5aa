// SPDX-License-Identifier: MPL-2.0
//! Project media records and video source classification.
//!
//! A [`ProjectMedia`] is the read-only slice of a portfolio project that the
//! case-study view needs. The content store owns the full record; this crate
//! never mutates it.

pub mod source;

pub use source::{resolve, PlaybackSource};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Media fields of a project, supplied once when the detail view mounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMedia {
    pub title: String,

    /// Free-form video reference: an embed address, a media URL, or nothing.
    #[serde(default, alias = "heroVideo", skip_serializing_if = "Option::is_none")]
    pub video_reference: Option<String>,

    /// Poster for the player and fallback background when there is no video.
    #[serde(default, alias = "imageUrl")]
    pub cover_image_url: String,

    #[serde(default, alias = "gallery")]
    pub gallery_images: Vec<String>,
}

impl ProjectMedia {
    /// Classifies this project's video reference.
    pub fn playback_source(&self) -> PlaybackSource {
        source::resolve(self.video_reference.as_deref())
    }

    /// Parses a project record exported by the content store.
    ///
    /// Unknown fields (description, tags, ...) are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
