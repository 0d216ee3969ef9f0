// SPDX-License-Identifier: MPL-2.0
//! Gallery filter: the visible photo sequence and the selected index.
//!
//! This is the single writer of the selection. The lightbox never moves the
//! index itself; it emits effects that the app applies here, so the grid and
//! the lightbox always agree on which photo is current.

use crate::domain::{Catalog, CategoryFilter, PhotoRecord};
use std::fmt;
use std::sync::Arc;

/// Navigation direction through the filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryError {
    /// `open` was called with an index outside the filtered sequence.
    IndexOutOfRange { index: usize, len: usize },
}

impl GalleryError {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            GalleryError::IndexOutOfRange { .. } => "gallery-error-out-of-range",
        }
    }
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::IndexOutOfRange { index, len } => {
                write!(f, "Photo index {} is out of range (len {})", index, len)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryFilter {
    catalog: Arc<Catalog>,
    category: CategoryFilter,
    /// Catalog indices of the visible photos, in catalog order.
    sequence: Vec<usize>,
    selected: Option<usize>,
}

impl GalleryFilter {
    /// Creates a filter showing every photo, with nothing selected.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let mut filter = Self {
            catalog,
            category: CategoryFilter::All,
            sequence: Vec::new(),
            selected: None,
        };
        filter.recompute();
        filter
    }

    /// Switches category, recomputing the sequence and clearing the selection.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.recompute();
    }

    /// Selects the photo at `index` in the filtered sequence.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::IndexOutOfRange`] if `index >= len()`; the
    /// selection is left unchanged.
    pub fn open(&mut self, index: usize) -> Result<(), GalleryError> {
        let len = self.len();
        if index >= len {
            return Err(GalleryError::IndexOutOfRange { index, len });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Moves the selection one step, wrapping around. No-op without selection.
    pub fn step(&mut self, direction: Direction) {
        let len = self.len();
        if len == 0 {
            return;
        }
        if let Some(index) = self.selected {
            self.selected = Some(match direction {
                Direction::Next => (index + 1) % len,
                Direction::Previous => (index + len - 1) % len,
            });
        }
    }

    pub fn next(&mut self) {
        self.step(Direction::Next);
    }

    pub fn prev(&mut self) {
        self.step(Direction::Previous);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Visible photos, in catalog order.
    pub fn filtered(&self) -> impl Iterator<Item = &PhotoRecord> + '_ {
        self.sequence.iter().map(|&i| &self.catalog.photos()[i])
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.sequence
            .get(index)
            .map(|&i| &self.catalog.photos()[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_photo(&self) -> Option<&PhotoRecord> {
        self.selected.and_then(|index| self.get(index))
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    fn recompute(&mut self) {
        let category = self.category;
        self.sequence = self
            .catalog
            .photos()
            .iter()
            .enumerate()
            .filter(|(_, photo)| category.matches(photo))
            .map(|(i, _)| i)
            .collect();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::PhotoCategory;

    fn gallery() -> GalleryFilter {
        let catalog = Config::default().catalog().expect("built-in catalog");
        GalleryFilter::new(Arc::new(catalog))
    }

    fn ids(gallery: &GalleryFilter) -> Vec<u32> {
        gallery.filtered().map(|p| p.id).collect()
    }

    #[test]
    fn all_shows_every_photo_in_catalog_order() {
        let gallery = gallery();
        assert_eq!(ids(&gallery), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn category_keeps_catalog_order() {
        let mut gallery = gallery();
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Ceremony));
        assert_eq!(ids(&gallery), vec![2, 5, 7, 11]);
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Reception));
        assert_eq!(ids(&gallery), vec![3, 6, 9, 12]);
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Portraits));
        assert_eq!(ids(&gallery), vec![1, 4, 8, 10]);
    }

    #[test]
    fn set_category_clears_selection() {
        let mut gallery = gallery();
        gallery.open(3).unwrap();
        gallery.set_category(CategoryFilter::All);
        assert_eq!(gallery.selected_index(), None);
    }

    #[test]
    fn open_out_of_range_leaves_selection() {
        let mut gallery = gallery();
        gallery.open(1).unwrap();
        assert_eq!(
            gallery.open(12),
            Err(GalleryError::IndexOutOfRange { index: 12, len: 12 })
        );
        assert_eq!(gallery.selected_index(), Some(1));
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut gallery = gallery();
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Reception));
        gallery.open(3).unwrap();
        gallery.next();
        assert_eq!(gallery.selected_index(), Some(0));
        gallery.prev();
        assert_eq!(gallery.selected_index(), Some(3));
    }

    #[test]
    fn prev_undoes_next_everywhere() {
        let mut gallery = gallery();
        for i in 0..gallery.len() {
            gallery.open(i).unwrap();
            gallery.next();
            gallery.prev();
            assert_eq!(gallery.selected_index(), Some(i));
        }
    }

    #[test]
    fn navigation_without_selection_is_noop() {
        let mut gallery = gallery();
        gallery.next();
        gallery.prev();
        assert_eq!(gallery.selected_index(), None);
        assert!(gallery.selected_photo().is_none());
    }

    #[test]
    fn selected_photo_follows_index() {
        let mut gallery = gallery();
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Ceremony));
        gallery.open(2).unwrap();
        assert_eq!(gallery.selected_photo().map(|p| p.id), Some(7));
        gallery.close();
        assert!(gallery.selected_photo().is_none());
    }

    #[test]
    fn empty_sequence_rejects_open() {
        let catalog = Catalog::new(
            Config::default().catalog().unwrap().event().clone(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        let mut gallery = GalleryFilter::new(Arc::new(catalog));
        assert!(gallery.is_empty());
        assert!(gallery.open(0).is_err());
        gallery.next();
        assert_eq!(gallery.selected_index(), None);
    }
}
