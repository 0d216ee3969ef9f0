// SPDX-License-Identifier: MPL-2.0
//! Volume level of the film soundtrack.

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};

/// Volume level, always within `MIN_VOLUME..=MAX_VOLUME`.
///
/// # Example
///
/// ```
/// use everlasting_moments::video_player::Volume;
///
/// assert_eq!(Volume::new(0.5).value(), 0.5);
/// assert_eq!(Volume::new(2.0).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a volume level, clamping to the valid range. NaN is silent.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true below the audible threshold.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 < 0.001
    }

    /// Gain applied to samples. The slider is perceptually linear, so the
    /// gain is its square.
    #[must_use]
    pub fn gain(self) -> f32 {
        self.0 * self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}
