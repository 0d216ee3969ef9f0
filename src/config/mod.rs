// SPDX-License-Identifier: MPL-2.0
//! This module handles the album configuration: the event headline, media
//! locators, the gate secret, gallery tuning and the full content catalog,
//! all read once from an `album.toml` file at startup.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[event]` - Names and date shown in the hero section
//! - `[media]` - Hero, film, ceremony and download locators
//! - `[gate]` - The demo password
//! - `[gallery]` - Lazy-loading and cache tuning
//! - `[[stories]]` / `[[photos]]` - The catalog
//!
//! Every section is optional: missing keys fall back to the built-in album.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config <file>` on the command line
//! 3. `album.toml` in `EVERLASTING_MOMENTS_CONFIG_DIR`
//! 4. `album.toml` in the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use everlasting_moments::config;
//!
//! let (config, _warning) = config::load_with_override(None);
//! let catalog = config.catalog().expect("built-in catalog is valid");
//! assert!(!catalog.photos().is_empty());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{
    CacheCapacity, Catalog, EventDetails, PhotoCategory, PhotoRecord, ProximityThreshold,
    StoryRecord,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "album.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "EverlastingMoments";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "EVERLASTING_MOMENTS_CONFIG_DIR";

/// Warning key pushed when a config file exists but cannot be used.
pub const CONFIG_LOAD_WARNING_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Hero headline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EventConfig {
    pub first_name: String,
    pub second_name: String,
    pub date: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            first_name: "Olivia".to_string(),
            second_name: "James".to_string(),
            date: "October 26, 2024".to_string(),
        }
    }
}

/// Locators of the non-gallery media.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaConfig {
    /// Full-resolution hero background.
    pub hero_image_url: String,
    /// The film shown in the video section.
    pub film_url: String,
    /// "Full ceremony & speeches" link.
    pub ceremony_url: String,
    /// Album archive offered by the download section.
    pub download_url: String,
    /// Suggested file name for the archive.
    pub download_file_name: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            hero_image_url: "https://picsum.photos/1920/1080?random=0".to_string(),
            film_url: "https://videogam.net/videos/intro_promo.mp4".to_string(),
            ceremony_url: "#".to_string(),
            download_url: "#".to_string(),
            download_file_name: DEFAULT_DOWNLOAD_FILE_NAME.to_string(),
        }
    }
}

/// Gate settings. The secret is stored in plaintext (demo gate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub secret: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_GATE_SECRET.to_string(),
        }
    }
}

/// Gallery tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Look-ahead distance (px) for lazy loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_threshold_px: Option<f32>,

    /// Whether tiles wait to be near the viewport before loading.
    /// When `false`, every tile starts loading immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observe_visibility: Option<bool>,

    /// Number of decoded images kept in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_cache_capacity: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_px: Some(DEFAULT_PROXIMITY_THRESHOLD_PX),
            observe_visibility: Some(true),
            image_cache_capacity: Some(DEFAULT_IMAGE_CACHE_CAPACITY),
        }
    }
}

impl GalleryConfig {
    #[must_use]
    pub fn proximity_threshold(&self) -> ProximityThreshold {
        self.proximity_threshold_px
            .map(ProximityThreshold::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn cache_capacity(&self) -> CacheCapacity {
        self.image_cache_capacity
            .map(CacheCapacity::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn observes_visibility(&self) -> bool {
        self.observe_visibility.unwrap_or(true)
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryEntry {
    Ceremony,
    Reception,
    Portraits,
}

impl From<CategoryEntry> for PhotoCategory {
    fn from(entry: CategoryEntry) -> Self {
        match entry {
            CategoryEntry::Ceremony => PhotoCategory::Ceremony,
            CategoryEntry::Reception => PhotoCategory::Reception,
            CategoryEntry::Portraits => PhotoCategory::Portraits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryEntry {
    pub id: u32,
    pub image_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoEntry {
    pub id: u32,
    pub image_url: String,
    pub category: CategoryEntry,
    pub alt: String,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Album configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub event: EventConfig,
    pub media: MediaConfig,
    pub gate: GateConfig,
    pub gallery: GalleryConfig,
    pub stories: Vec<StoryEntry>,
    pub photos: Vec<PhotoEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            event: EventConfig::default(),
            media: MediaConfig::default(),
            gate: GateConfig::default(),
            gallery: GalleryConfig::default(),
            stories: default_stories(),
            photos: default_photos(),
        }
    }
}

impl Config {
    /// Builds the immutable catalog described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] when ids are duplicated or a locator is empty.
    pub fn catalog(&self) -> Result<Catalog> {
        let event = EventDetails {
            first_name: self.event.first_name.clone(),
            second_name: self.event.second_name.clone(),
            date: self.event.date.clone(),
        };
        let stories = self
            .stories
            .iter()
            .map(|entry| StoryRecord {
                id: entry.id,
                image_url: entry.image_url.clone(),
                caption: entry.caption.clone(),
            })
            .collect();
        let photos = self
            .photos
            .iter()
            .map(|entry| PhotoRecord {
                id: entry.id,
                image_url: entry.image_url.clone(),
                category: entry.category.into(),
                alt: entry.alt.clone(),
            })
            .collect();

        Catalog::new(event, stories, photos).map_err(Error::from)
    }
}

// =============================================================================
// Built-in Album
// =============================================================================

fn default_stories() -> Vec<StoryEntry> {
    const CAPTIONS: [&str; 5] = [
        "The first look. A moment of pure anticipation and overwhelming joy captured forever.",
        "Vows exchanged under the golden sun, promising a lifetime of adventure together.",
        "That just-married feeling. The walk back down the aisle was a blur of smiles and cheers.",
        "Dancing under the stars, surrounded by everyone we love. A perfect end to a perfect day.",
        "Cutting the cake, a sweet beginning to our new chapter as husband and wife.",
    ];

    (1u32..)
        .zip(CAPTIONS)
        .map(|(id, caption)| StoryEntry {
            id,
            image_url: format!("https://picsum.photos/800/1200?random={id}"),
            caption: caption.to_string(),
        })
        .collect()
}

fn default_photos() -> Vec<PhotoEntry> {
    use CategoryEntry::{Ceremony, Portraits, Reception};

    const PHOTOS: [(CategoryEntry, &str, &str); 12] = [
        (Portraits, "600/800", "Bride and groom portrait"),
        (Ceremony, "800/600", "Wedding ceremony vows"),
        (Reception, "800/600", "Wedding reception dancing"),
        (Portraits, "600/800", "Groom looking at bride"),
        (Ceremony, "800/600", "Walking down the aisle"),
        (Reception, "800/600", "Wedding cake cutting"),
        (Ceremony, "800/600", "Guests at the ceremony"),
        (Portraits, "600/800", "Bride smiling"),
        (Reception, "800/600", "Toasting at the reception"),
        (Portraits, "600/800", "Couple embracing"),
        (Ceremony, "800/600", "Ring exchange"),
        (Reception, "800/600", "First dance"),
    ];

    (1u32..)
        .zip(PHOTOS)
        .map(|(id, (category, size, alt))| PhotoEntry {
            id,
            image_url: format!("https://picsum.photos/{size}?random={}", id + 10),
            category,
            alt: alt.to_string(),
        })
        .collect()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory from the environment or the platform.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config file path, honoring an explicit file first.
#[must_use]
pub fn config_path_with_override(config_file: Option<PathBuf>) -> Option<PathBuf> {
    config_file.or_else(|| {
        config_dir().map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
    })
}

// =============================================================================
// Load / Save Functions
// =============================================================================

/// Loads the configuration from the resolved file.
///
/// Returns a tuple of (config, optional_warning_key). A missing file is not an
/// error: the built-in album is used. A file that exists but cannot be read
/// or parsed also yields the built-in album, plus a warning key.
pub fn load_with_override(config_file: Option<PathBuf>) -> (Config, Option<&'static str>) {
    if let Some(path) = config_path_with_override(config_file) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(_) => (Config::default(), Some(CONFIG_LOAD_WARNING_KEY)),
            };
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Config`].
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_catalog_matches_built_in_album() {
        let catalog = Config::default().catalog().expect("valid built-in catalog");
        assert_eq!(catalog.stories().len(), 5);
        assert_eq!(catalog.photos().len(), 12);
        assert_eq!(
            catalog.photos()[0].image_url,
            "https://picsum.photos/600/800?random=11"
        );
        assert_eq!(catalog.photos()[11].alt, "First dance");
        assert_eq!(
            catalog.stories()[4].image_url,
            "https://picsum.photos/800/1200?random=5"
        );
    }

    #[test]
    fn built_in_album_has_four_photos_per_category() {
        let catalog = Config::default().catalog().unwrap();
        for category in PhotoCategory::ALL {
            let count = catalog
                .photos()
                .iter()
                .filter(|p| p.category == category)
                .count();
            assert_eq!(count, 4, "{category}");
        }
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [gate]
            secret = "abc123"

            [gallery]
            observe_visibility = false
            "#,
        )
        .unwrap();

        assert_eq!(config.gate.secret, "abc123");
        assert!(!config.gallery.observes_visibility());
        assert_eq!(config.event, EventConfig::default());
        assert_eq!(config.photos.len(), 12);
    }

    #[test]
    fn photos_section_replaces_built_in_catalog() {
        let config: Config = toml::from_str(
            r#"
            [[photos]]
            id = 7
            image_url = "https://example.org/img/1200/900"
            category = "reception"
            alt = "Late night"
            "#,
        )
        .unwrap();

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.photos().len(), 1);
        assert_eq!(catalog.photos()[0].category, PhotoCategory::Reception);
    }

    #[test]
    fn gallery_values_are_clamped() {
        let gallery = GalleryConfig {
            proximity_threshold_px: Some(-10.0),
            observe_visibility: None,
            image_cache_capacity: Some(1),
        };
        assert_eq!(gallery.proximity_threshold().value(), 0.0);
        assert_eq!(gallery.cache_capacity().value(), MIN_IMAGE_CACHE_CAPACITY);
        assert!(gallery.observes_visibility());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        save_to_path(&config, &path).expect("save");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_file_falls_back_with_warning() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "photos = 3").unwrap();

        let path = dir.path().join(CONFIG_FILE);
        let (config, warning) = load_with_override(Some(path));
        assert_eq!(config, Config::default());
        assert_eq!(warning, Some(CONFIG_LOAD_WARNING_KEY));
    }

    #[test]
    fn missing_file_uses_defaults_silently() {
        let dir = tempdir().expect("temp dir");
        let (config, warning) = load_with_override(Some(dir.path().join(CONFIG_FILE)));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }
}
