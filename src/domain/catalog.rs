// SPDX-License-Identifier: MPL-2.0
//! Album content catalog.
//!
//! The catalog is the static set of records the album shows: the event
//! headline, the story moments and the categorized photos. It is built once
//! at startup (from the configuration) and shared read-only afterwards.

use crate::error::CatalogError;
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Photo Category
// =============================================================================

/// Category a photo belongs to.
///
/// "All" is deliberately not a category: it is a [`CategoryFilter`] selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoCategory {
    Ceremony,
    Reception,
    Portraits,
}

impl PhotoCategory {
    /// All categories in display order.
    pub const ALL: [PhotoCategory; 3] = [
        PhotoCategory::Ceremony,
        PhotoCategory::Reception,
        PhotoCategory::Portraits,
    ];

    /// Returns the i18n key of the category label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            PhotoCategory::Ceremony => "gallery-filter-ceremony",
            PhotoCategory::Reception => "gallery-filter-reception",
            PhotoCategory::Portraits => "gallery-filter-portraits",
        }
    }
}

impl fmt::Display for PhotoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotoCategory::Ceremony => "Ceremony",
            PhotoCategory::Reception => "Reception",
            PhotoCategory::Portraits => "Portraits",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Selector driving the gallery grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every photo, in catalog order.
    #[default]
    All,
    /// Only photos of one category.
    Only(PhotoCategory),
}

impl CategoryFilter {
    /// Filter buttons in display order.
    pub const CHOICES: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(PhotoCategory::Ceremony),
        CategoryFilter::Only(PhotoCategory::Reception),
        CategoryFilter::Only(PhotoCategory::Portraits),
    ];

    /// Returns `true` if the photo passes this filter.
    #[must_use]
    pub fn matches(self, photo: &PhotoRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => photo.category == category,
        }
    }

    /// Returns the i18n key of the filter button label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            CategoryFilter::All => "gallery-filter-all",
            CategoryFilter::Only(category) => category.i18n_key(),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One photo of the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: u32,
    pub image_url: String,
    pub category: PhotoCategory,
    pub alt: String,
}

/// One card of the story carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRecord {
    pub id: u32,
    pub image_url: String,
    pub caption: String,
}

/// Headline shown in the hero section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDetails {
    pub first_name: String,
    pub second_name: String,
    pub date: String,
}

/// Immutable album content for one session.
///
/// The default catalog is empty; it is the last resort when even the
/// built-in content fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    event: EventDetails,
    stories: Vec<StoryRecord>,
    photos: Vec<PhotoRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and records without a locator.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, scanning stories then photos.
    pub fn new(
        event: EventDetails,
        stories: Vec<StoryRecord>,
        photos: Vec<PhotoRecord>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for story in &stories {
            if story.image_url.trim().is_empty() {
                return Err(CatalogError::MissingImageUrl(story.id));
            }
            if !seen.insert(story.id) {
                return Err(CatalogError::DuplicateStoryId(story.id));
            }
        }

        seen.clear();
        for photo in &photos {
            if photo.image_url.trim().is_empty() {
                return Err(CatalogError::MissingImageUrl(photo.id));
            }
            if !seen.insert(photo.id) {
                return Err(CatalogError::DuplicatePhotoId(photo.id));
            }
        }

        Ok(Self {
            event,
            stories,
            photos,
        })
    }

    #[must_use]
    pub fn event(&self) -> &EventDetails {
        &self.event
    }

    #[must_use]
    pub fn stories(&self) -> &[StoryRecord] {
        &self.stories
    }

    #[must_use]
    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }
}
