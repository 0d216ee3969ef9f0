// SPDX-License-Identifier: MPL-2.0
//! Bookkeeping of every image the album page shows.
//!
//! The loader owns the tile state machines, the decoded cache and the hero
//! and story images. It never performs I/O: it answers with the
//! [`FetchRequest`]s the caller must start, and is told about completions
//! through [`MediaLoader::fetched`].

use super::cache::{ImageCache, Lookup};
use super::image::{ImageData, ImageKind};
use super::tile::{TileLoader, TileState};
use crate::domain::{CacheCapacity, Catalog, PhotoRecord};
use std::collections::HashMap;

/// An HTTP fetch the caller has to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub kind: ImageKind,
}

pub struct MediaLoader {
    cache: ImageCache,
    tiles: HashMap<u32, TileLoader>,
    hero_url: String,
    hero: Option<ImageData>,
    story_urls: Vec<(u32, String)>,
    stories: HashMap<u32, ImageData>,
}

impl MediaLoader {
    /// Creates one tile per catalog photo.
    ///
    /// With `observe_visibility == false` tiles are pending from the start
    /// and [`initial_requests`](Self::initial_requests) includes them.
    #[must_use]
    pub fn new(
        catalog: &Catalog,
        hero_url: impl Into<String>,
        observe_visibility: bool,
        capacity: CacheCapacity,
    ) -> Self {
        let tiles = catalog
            .photos()
            .iter()
            .map(|photo| (photo.id, TileLoader::new(&photo.image_url, observe_visibility)))
            .collect();
        let story_urls = catalog
            .stories()
            .iter()
            .map(|story| (story.id, story.image_url.clone()))
            .collect();

        Self {
            cache: ImageCache::new(capacity),
            tiles,
            hero_url: hero_url.into(),
            hero: None,
            story_urls,
            stories: HashMap::new(),
        }
    }

    /// Fetches needed as soon as the page is shown: hero, stories and any
    /// tile that does not wait for visibility.
    pub fn initial_requests(&mut self) -> Vec<FetchRequest> {
        let mut urls = vec![self.hero_url.clone()];
        urls.extend(self.story_urls.iter().map(|(_, url)| url.clone()));

        let mut requests: Vec<FetchRequest> = urls
            .iter()
            .filter_map(|url| self.request(url, ImageKind::Full))
            .collect();

        let pending: Vec<u32> = self
            .tiles
            .iter()
            .filter(|(_, tile)| tile.state() == TileState::Pending)
            .map(|(id, _)| *id)
            .collect();
        for id in pending {
            requests.extend(self.tile_requests(id));
        }
        requests
    }

    /// Records that the tile of photo `id` came near the viewport.
    ///
    /// Only the first report starts fetches; later ones return nothing.
    pub fn tile_visible(&mut self, id: u32) -> Vec<FetchRequest> {
        let Some(tile) = self.tiles.get_mut(&id) else {
            return Vec::new();
        };
        if !tile.mark_visible() {
            return Vec::new();
        }
        self.tile_requests(id)
    }

    fn tile_requests(&mut self, id: u32) -> Vec<FetchRequest> {
        let Some(tile) = self.tiles.get(&id) else {
            return Vec::new();
        };
        let full = tile.url().to_string();
        let low_res = tile.low_res_url().to_string();

        let mut requests = Vec::with_capacity(2);
        if !low_res.is_empty() {
            requests.extend(self.request(&low_res, ImageKind::Placeholder));
        }
        requests.extend(self.request(&full, ImageKind::Full));
        requests
    }

    /// Asks the cache for `url`.
    ///
    /// A cached image is stored right away and no request is returned; an
    /// in-flight locator also returns nothing since its completion will be
    /// delivered anyway.
    pub fn request(&mut self, url: &str, kind: ImageKind) -> Option<FetchRequest> {
        match self.cache.request(url) {
            Lookup::Hit(image) => {
                self.store(url, kind, &image);
                None
            }
            Lookup::Fetch => Some(FetchRequest {
                url: url.to_string(),
                kind,
            }),
            Lookup::InFlight => None,
        }
    }

    /// Requests the full image of `photo` unless it is already available.
    pub fn request_full(&mut self, photo: &PhotoRecord) -> Option<FetchRequest> {
        if self.image_for(photo).is_some() {
            return None;
        }
        self.request(&photo.image_url, ImageKind::Full)
    }

    /// Stores a finished fetch. Failures release the locator for a later
    /// retry and leave every tile as it was.
    ///
    /// Returns the image when it was stored, so the caller can forward it.
    pub fn fetched(
        &mut self,
        url: &str,
        kind: ImageKind,
        result: crate::error::Result<ImageData>,
    ) -> Option<ImageData> {
        match result {
            Ok(image) => {
                self.cache.complete(url, image.clone());
                self.store(url, kind, &image);
                Some(image)
            }
            Err(_) => {
                self.cache.abandon(url);
                None
            }
        }
    }

    fn store(&mut self, url: &str, kind: ImageKind, image: &ImageData) {
        match kind {
            ImageKind::Placeholder => {
                for tile in self.tiles.values_mut().filter(|t| t.low_res_url() == url) {
                    tile.set_placeholder(image.clone());
                }
            }
            ImageKind::Full => {
                for tile in self.tiles.values_mut().filter(|t| t.url() == url) {
                    tile.mark_loaded(image.clone());
                }
                if self.hero_url == url {
                    self.hero = Some(image.clone());
                }
                for (id, _) in self.story_urls.iter().filter(|(_, u)| u == url) {
                    self.stories.insert(*id, image.clone());
                }
            }
        }
    }

    /// Full image of `photo` if a tile or the cache holds it.
    #[must_use]
    pub fn image_for(&self, photo: &PhotoRecord) -> Option<ImageData> {
        self.tiles
            .get(&photo.id)
            .and_then(TileLoader::image)
            .or_else(|| self.cache.peek(&photo.image_url))
            .cloned()
    }

    #[must_use]
    pub fn tiles(&self) -> &HashMap<u32, TileLoader> {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, id: u32) -> Option<&TileLoader> {
        self.tiles.get(&id)
    }

    #[must_use]
    pub fn hero(&self) -> Option<&ImageData> {
        self.hero.as_ref()
    }

    #[must_use]
    pub fn stories(&self) -> &HashMap<u32, ImageData> {
        &self.stories
    }

    /// Whether any visible spinner is still waiting for an image.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.stories.len() < self.story_urls.len()
            || self
                .tiles
                .values()
                .any(|tile| tile.state() == TileState::Pending)
    }
}
