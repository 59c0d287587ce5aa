// SPDX-License-Identifier: MPL-2.0
//! Gallery overlay navigation.
//!
//! The navigator owns the project's gallery list and which image, if any, the
//! full-screen overlay is showing. Navigation wraps around in both
//! directions.

use crate::config::GALLERY_PREVIEW_COUNT;

/// Navigates the gallery overlay of one project.
///
/// `open_index`, when set, always indexes into `images`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryNavigator {
    images: Vec<String>,
    open_index: Option<usize>,
}

impl GalleryNavigator {
    /// Creates a closed navigator over `images`.
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            open_index: None,
        }
    }

    /// Opens the overlay at `index`.
    ///
    /// Out-of-range indices (including any index on an empty gallery) are
    /// ignored and leave the overlay as it was.
    pub fn open(&mut self, index: usize) {
        if index < self.images.len() {
            self.open_index = Some(index);
        } else {
            log::debug!(
                "ignoring gallery index {} of {} images",
                index,
                self.images.len()
            );
        }
    }

    /// Shows the next image, wrapping to the first after the last.
    pub fn next(&mut self) {
        if let Some(index) = self.open_index {
            self.open_index = Some((index + 1) % self.images.len());
        }
    }

    /// Shows the previous image, wrapping to the last before the first.
    pub fn previous(&mut self) {
        if let Some(index) = self.open_index {
            let len = self.images.len();
            self.open_index = Some((index + len - 1) % len);
        }
    }

    pub fn close(&mut self) {
        self.open_index = None;
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.open_index
    }

    /// URL of the image the overlay shows.
    pub fn current_image(&self) -> Option<&str> {
        self.open_index
            .and_then(|index| self.images.get(index))
            .map(String::as_str)
    }

    /// One-based position label, e.g. `2 / 5`.
    pub fn counter_label(&self) -> Option<String> {
        self.open_index
            .map(|index| format!("{} / {}", index + 1, self.images.len()))
    }

    /// Images offered as thumbnails in the page body.
    pub fn thumbnails(&self) -> &[String] {
        let count = self.images.len().min(GALLERY_PREVIEW_COUNT);
        &self.images[..count]
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(count: usize) -> GalleryNavigator {
        GalleryNavigator::new((0..count).map(|i| format!("img{i}.jpg")).collect())
    }

    #[test]
    fn new_navigator_is_closed() {
        let nav = gallery(3);
        assert!(!nav.is_open());
        assert_eq!(nav.current_index(), None);
        assert_eq!(nav.current_image(), None);
        assert_eq!(nav.counter_label(), None);
    }

    #[test]
    fn open_selects_image() {
        let mut nav = gallery(3);
        nav.open(1);

        assert_eq!(nav.current_index(), Some(1));
        assert_eq!(nav.current_image(), Some("img1.jpg"));
        assert_eq!(nav.counter_label().as_deref(), Some("2 / 3"));
    }

    #[test]
    fn open_out_of_range_is_ignored() {
        let mut nav = gallery(3);
        nav.open(3);
        assert!(!nav.is_open());

        nav.open(0);
        nav.open(10);
        assert_eq!(nav.current_index(), Some(0));
    }

    #[test]
    fn empty_gallery_never_opens() {
        let mut nav = gallery(0);
        nav.open(0);
        nav.next();
        nav.previous();

        assert!(nav.is_empty());
        assert!(!nav.is_open());
        assert!(nav.thumbnails().is_empty());
    }

    #[test]
    fn next_wraps_to_first() {
        let mut nav = gallery(5);
        nav.open(4);
        nav.next();
        assert_eq!(nav.current_index(), Some(0));
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut nav = gallery(5);
        nav.open(0);
        nav.previous();
        assert_eq!(nav.current_index(), Some(4));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut nav = gallery(4);
        nav.open(2);
        for _ in 0..4 {
            nav.next();
        }
        assert_eq!(nav.current_index(), Some(2));
        for _ in 0..4 {
            nav.previous();
        }
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn single_image_wraps_to_itself() {
        let mut nav = gallery(1);
        nav.open(0);
        nav.next();
        nav.previous();
        assert_eq!(nav.current_index(), Some(0));
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let mut nav = gallery(3);
        nav.next();
        nav.previous();
        assert!(!nav.is_open());
    }

    #[test]
    fn close_clears_selection() {
        let mut nav = gallery(3);
        nav.open(2);
        nav.close();
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn thumbnails_are_limited_to_preview_count() {
        assert_eq!(gallery(2).thumbnails().len(), 2);
        assert_eq!(gallery(8).thumbnails().len(), GALLERY_PREVIEW_COUNT);
        assert_eq!(gallery(8).len(), 8);
    }
}
