// SPDX-License-Identifier: MPL-2.0
//! Lazy-loading state of one gallery tile.
//!
//! A tile starts hidden, switches to pending the first time it comes near the
//! viewport, and becomes loaded when its full image arrives. Visibility is
//! observed only until that first transition.

use super::locator::{self, AspectRatio};
use super::ImageData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Not yet near the viewport; nothing requested.
    NotVisible,
    /// Requested; the placeholder and a spinner are shown.
    Pending,
    /// Full image available.
    Loaded,
}

#[derive(Debug, Clone)]
pub struct TileLoader {
    url: String,
    low_res_url: String,
    aspect_ratio: AspectRatio,
    state: TileState,
    observing: bool,
    placeholder: Option<ImageData>,
    image: Option<ImageData>,
}

impl TileLoader {
    /// Creates a loader for `url`.
    ///
    /// With `observe_visibility == false` the tile skips the hidden state and
    /// is pending from the start.
    #[must_use]
    pub fn new(url: impl Into<String>, observe_visibility: bool) -> Self {
        let url = url.into();
        let state = if observe_visibility {
            TileState::NotVisible
        } else {
            TileState::Pending
        };
        Self {
            low_res_url: locator::low_res_url(&url),
            aspect_ratio: locator::aspect_ratio(&url),
            url,
            state,
            observing: observe_visibility,
            placeholder: None,
            image: None,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Placeholder locator, empty when the locator has no dimensions.
    #[must_use]
    pub fn low_res_url(&self) -> &str {
        &self.low_res_url
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[must_use]
    pub fn state(&self) -> TileState {
        self.state
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Records that the tile came within the proximity threshold.
    ///
    /// Returns `true` only for the call that moved the tile to pending; the
    /// caller starts the fetches then.
    pub fn mark_visible(&mut self) -> bool {
        if !self.observing {
            return false;
        }
        self.observing = false;
        if self.state == TileState::NotVisible {
            self.state = TileState::Pending;
            true
        } else {
            false
        }
    }

    /// Stores the blurred placeholder. Ignored once the full image is shown.
    pub fn set_placeholder(&mut self, image: ImageData) {
        if self.state != TileState::Loaded {
            self.placeholder = Some(image);
        }
    }

    /// Stores the full image. Only a pending tile accepts it.
    pub fn mark_loaded(&mut self, image: ImageData) -> bool {
        if self.state != TileState::Pending {
            return false;
        }
        self.state = TileState::Loaded;
        self.placeholder = None;
        self.image = Some(image);
        true
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&ImageData> {
        self.placeholder.as_ref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }
}
