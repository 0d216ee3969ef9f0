// SPDX-License-Identifier: MPL-2.0
//! Domain newtypes.
//!
//! Type-safe wrappers for bounded values. Every constructor clamps, so a
//! value that exists is always valid and call sites never re-check ranges.

// =============================================================================
// Zoom Scale Bounds
// =============================================================================

/// Lightbox scale bounds (1× to 4×).
pub mod zoom_bounds {
    /// Unzoomed scale.
    pub const MIN: f32 = 1.0;
    /// Largest scale.
    pub const MAX: f32 = 4.0;
}

// =============================================================================
// ZoomScale
// =============================================================================

/// Lightbox scale factor, guaranteed to be within `[1, 4]`.
///
/// Non-finite inputs collapse to the unzoomed scale so that degenerate
/// gesture math (e.g. a pinch that starts with both fingers on the same
/// point) can never leak `NaN` into the view.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// The unzoomed scale.
    pub const IDENTITY: Self = Self(zoom_bounds::MIN);

    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
        } else {
            Self::IDENTITY
        }
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the image is shown at its fitted size.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }

    /// Multiplies the scale, clamping the result.
    #[must_use]
    pub fn multiplied(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// ProximityThreshold
// =============================================================================

/// Proximity threshold bounds in logical pixels.
pub mod proximity_bounds {
    /// Tiles load only once they actually intersect the viewport.
    pub const MIN: f32 = 0.0;
    /// Upper bound to keep "lazy" loading lazy.
    pub const MAX: f32 = 4000.0;
    /// Default look-ahead distance.
    pub const DEFAULT: f32 = 200.0;
}

/// Distance from the viewport at which a gallery tile starts loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityThreshold(f32);

impl ProximityThreshold {
    /// Creates a new threshold, clamping to valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(proximity_bounds::MIN, proximity_bounds::MAX))
        } else {
            Self::default()
        }
    }

    /// Returns the value in pixels.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ProximityThreshold {
    fn default() -> Self {
        Self(proximity_bounds::DEFAULT)
    }
}

// =============================================================================
// CacheCapacity
// =============================================================================

/// Image cache capacity bounds (decoded images).
pub mod cache_capacity_bounds {
    /// Minimum cache capacity.
    pub const MIN: usize = 8;
    /// Maximum cache capacity.
    pub const MAX: usize = 512;
    /// Default cache capacity.
    pub const DEFAULT: usize = 64;
}

/// Number of decoded images kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheCapacity(usize);

impl CacheCapacity {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(cache_capacity_bounds::MIN, cache_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for CacheCapacity {
    fn default() -> Self {
        Self(cache_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Diagnostic buffer capacity bounds (100 to 10000 events).
pub mod buffer_capacity_bounds {
    /// Minimum buffer capacity.
    pub const MIN: usize = 100;
    /// Maximum buffer capacity.
    pub const MAX: usize = 10_000;
    /// Default buffer capacity.
    pub const DEFAULT: usize = 1000;
}

/// Capacity of the diagnostic event ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, DEFAULT_IMAGE_CACHE_CAPACITY,
        DEFAULT_PROXIMITY_THRESHOLD_PX, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        MAX_IMAGE_CACHE_CAPACITY, MAX_PROXIMITY_THRESHOLD_PX, MAX_ZOOM_SCALE,
        MIN_DIAGNOSTICS_BUFFER_CAPACITY, MIN_IMAGE_CACHE_CAPACITY, MIN_ZOOM_SCALE,
    };

    // Verify domain bounds match config constants
    #[test]
    fn domain_bounds_match_config() {
        assert_eq!(zoom_bounds::MIN, MIN_ZOOM_SCALE);
        assert_eq!(zoom_bounds::MAX, MAX_ZOOM_SCALE);
        assert_eq!(proximity_bounds::DEFAULT, DEFAULT_PROXIMITY_THRESHOLD_PX);
        assert_eq!(proximity_bounds::MAX, MAX_PROXIMITY_THRESHOLD_PX);
        assert_eq!(cache_capacity_bounds::MIN, MIN_IMAGE_CACHE_CAPACITY);
        assert_eq!(cache_capacity_bounds::MAX, MAX_IMAGE_CACHE_CAPACITY);
        assert_eq!(cache_capacity_bounds::DEFAULT, DEFAULT_IMAGE_CACHE_CAPACITY);
        assert_eq!(buffer_capacity_bounds::MIN, MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(buffer_capacity_bounds::MAX, MAX_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            buffer_capacity_bounds::DEFAULT,
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn zoom_scale_clamps_to_valid_range() {
        assert_eq!(ZoomScale::new(0.2).value(), 1.0);
        assert_eq!(ZoomScale::new(9.0).value(), 4.0);
        assert_eq!(ZoomScale::new(2.5).value(), 2.5);
    }

    #[test]
    fn zoom_scale_rejects_non_finite() {
        assert!(ZoomScale::new(f32::NAN).is_identity());
        assert!(ZoomScale::new(f32::INFINITY).is_identity());
    }

    #[test]
    fn zoom_scale_multiplication_is_clamped() {
        let scale = ZoomScale::new(3.0).multiplied(1.5);
        assert!(scale.is_max());
        let scale = ZoomScale::new(1.2).multiplied(1.0 / 1.5);
        assert!(scale.is_identity());
    }

    #[test]
    fn proximity_threshold_clamps() {
        assert_eq!(ProximityThreshold::new(-5.0).value(), 0.0);
        assert_eq!(ProximityThreshold::new(1e9).value(), proximity_bounds::MAX);
        assert_eq!(ProximityThreshold::new(f32::NAN), ProximityThreshold::default());
    }

    #[test]
    fn capacities_clamp() {
        assert_eq!(CacheCapacity::new(0).value(), cache_capacity_bounds::MIN);
        assert_eq!(BufferCapacity::new(0).value(), buffer_capacity_bounds::MIN);
        assert_eq!(
            BufferCapacity::new(100_000).value(),
            buffer_capacity_bounds::MAX
        );
    }
}
