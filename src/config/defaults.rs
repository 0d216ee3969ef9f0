// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Lightbox scale bounds and step factors
//! - **Gestures**: Swipe and direction-lock thresholds
//! - **Timing**: Fade, cross-fade and close durations
//! - **Gallery**: Lazy-loading proximity and image cache
//! - **Diagnostics**: Event buffer capacity

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Lightbox scale when an image is shown unzoomed.
pub const MIN_ZOOM_SCALE: f32 = 1.0;

/// Largest lightbox scale reachable by wheel, pinch or buttons.
pub const MAX_ZOOM_SCALE: f32 = 4.0;

/// Relative scale change per wheel notch (10%).
pub const WHEEL_ZOOM_INTENSITY: f32 = 0.1;

/// Multiplier applied by the zoom in/out buttons.
pub const BUTTON_ZOOM_FACTOR: f32 = 1.5;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Finger travel (px) after which a swipe locks onto an axis.
pub const SWIPE_DIRECTION_LOCK_PX: f32 = 10.0;

/// Downward travel (px) past which releasing closes the lightbox.
pub const SWIPE_CLOSE_THRESHOLD_PX: f32 = 100.0;

/// Horizontal travel (px) at which releasing navigates.
pub const SWIPE_NAVIGATE_THRESHOLD_PX: f32 = 50.0;

/// Swipe distance over which the backdrop fades toward its floor.
pub const SWIPE_BACKDROP_FADE_PX: f32 = 500.0;

/// Backdrop opacity of an open lightbox.
pub const BACKDROP_ALPHA: f32 = 0.8;

/// Lowest fraction of `BACKDROP_ALPHA` kept while swiping down.
pub const BACKDROP_MIN_FRACTION: f32 = 0.4;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Delay before an opening lightbox becomes visible.
pub const LIGHTBOX_FADE_IN: Duration = Duration::from_millis(10);

/// Cross-fade delay between the old and the new image.
pub const LIGHTBOX_NAVIGATION_FADE: Duration = Duration::from_millis(150);

/// Fade-out duration of a closing lightbox.
pub const LIGHTBOX_CLOSE_FADE: Duration = Duration::from_millis(300);

/// Duration of the swipe snap-back animation.
pub const LIGHTBOX_SNAP_BACK: Duration = Duration::from_millis(300);

/// Fade-in of the hero background once it has loaded.
pub const HERO_FADE_IN: Duration = Duration::from_millis(1000);

/// Simulated latency before the album download starts.
pub const DOWNLOAD_PREPARE_DELAY: Duration = Duration::from_millis(2500);

/// Spinner animation frame interval.
pub const SPINNER_TICK: Duration = Duration::from_millis(16);

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Distance (px) from the viewport at which a tile starts loading.
pub const DEFAULT_PROXIMITY_THRESHOLD_PX: f32 = 200.0;

/// Smallest configurable proximity threshold.
pub const MIN_PROXIMITY_THRESHOLD_PX: f32 = 0.0;

/// Largest configurable proximity threshold.
pub const MAX_PROXIMITY_THRESHOLD_PX: f32 = 4000.0;

/// Divisor applied to locator dimensions for blur-up placeholders.
pub const LOW_RES_DIVISOR: u32 = 20;

/// Minimum edge (px) of a blur-up placeholder.
pub const LOW_RES_MIN_EDGE: u32 = 20;

/// Gaussian sigma used to blur placeholders.
pub const PLACEHOLDER_BLUR_SIGMA: f32 = 2.0;

/// Number of decoded images kept in memory.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 64;

/// Smallest configurable image cache.
pub const MIN_IMAGE_CACHE_CAPACITY: usize = 8;

/// Largest configurable image cache.
pub const MAX_IMAGE_CACHE_CAPACITY: usize = 512;

/// Suggested file name for the album archive.
pub const DEFAULT_DOWNLOAD_FILE_NAME: &str = "everlasting-moments-album.zip";

/// Demo gate secret shipped with the built-in album.
pub const DEFAULT_GATE_SECRET: &str = "password123";

// ==========================================================================
// Film Playback Defaults
// ==========================================================================

/// Volume the film starts at (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Silent.
pub const MIN_VOLUME: f32 = 0.0;

/// Full device volume; the film is never amplified.
pub const MAX_VOLUME: f32 = 1.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
