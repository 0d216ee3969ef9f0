// SPDX-License-Identifier: MPL-2.0
//! Lightbox transform state
//!
//! Scale and pan offset of the displayed image. The offset is the
//! translation of the image centre from the container centre.
//!
//! Invariant: at the unzoomed scale the offset is zero and no pan is active.

use super::viewport::ViewportGeometry;
use crate::config::{BUTTON_ZOOM_FACTOR, WHEEL_ZOOM_INTENSITY};
use crate::domain::ZoomScale;
use iced::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerTransform {
    scale: ZoomScale,
    offset: Vector,
    panning: bool,
}

impl ViewerTransform {
    #[must_use]
    pub fn scale(&self) -> ZoomScale {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        !self.scale.is_identity()
    }

    /// Back to scale 1, centred, not panning.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies one wheel notch around `cursor` (relative to the container centre).
    ///
    /// `direction > 0` zooms in, `direction < 0` zooms out.
    pub fn wheel(&mut self, direction: f32, cursor: Vector, geometry: Option<&ViewportGeometry>) {
        if direction == 0.0 || !direction.is_finite() {
            return;
        }
        let factor = 1.0 + direction.signum() * WHEEL_ZOOM_INTENSITY;
        self.zoom_around(self.scale.multiplied(factor), cursor, geometry);
    }

    /// Multiplies the scale by the button factor.
    pub fn zoom_in(&mut self, geometry: Option<&ViewportGeometry>) {
        self.set_scale(self.scale.multiplied(BUTTON_ZOOM_FACTOR), geometry);
    }

    /// Divides the scale by the button factor.
    pub fn zoom_out(&mut self, geometry: Option<&ViewportGeometry>) {
        self.set_scale(self.scale.multiplied(1.0 / BUTTON_ZOOM_FACTOR), geometry);
    }

    /// Sets the scale, keeping the current offset as far as the new bounds allow.
    pub fn set_scale(&mut self, scale: ZoomScale, geometry: Option<&ViewportGeometry>) {
        self.scale = scale;
        self.offset = clamp(self.offset, scale, geometry);
        self.normalize();
    }

    /// Zooms so that the point under `cursor` stays under it.
    ///
    /// `new = old + (cursor - old) * (1 - new_scale / old_scale)`, then clamped.
    pub fn zoom_around(
        &mut self,
        scale: ZoomScale,
        cursor: Vector,
        geometry: Option<&ViewportGeometry>,
    ) {
        let old = self.scale.value();
        let new = scale.value();
        let cursor = if cursor.x.is_finite() && cursor.y.is_finite() {
            cursor
        } else {
            Vector::ZERO
        };

        let shifted = self.offset + (cursor - self.offset) * (1.0 - new / old);
        self.scale = scale;
        self.offset = clamp(shifted, scale, geometry);
        self.normalize();
    }

    /// Marks a pan as started. Ignored at the unzoomed scale.
    pub fn begin_pan(&mut self) -> bool {
        self.panning = self.is_zoomed();
        self.panning
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    /// Moves the image to `offset`, clamped. No-op without usable geometry.
    pub fn pan_to(&mut self, offset: Vector, geometry: Option<&ViewportGeometry>) {
        if !self.panning {
            return;
        }
        let Some(geometry) = geometry else {
            return;
        };
        if !(offset.x.is_finite() && offset.y.is_finite()) {
            return;
        }
        self.offset = geometry.clamp_offset(offset, self.scale.value());
    }

    fn normalize(&mut self) {
        if self.scale.is_identity() {
            self.offset = Vector::ZERO;
            self.panning = false;
        }
    }
}

/// Clamps into the bounds; without geometry the offset cannot be validated
/// and collapses to the centre.
fn clamp(offset: Vector, scale: ZoomScale, geometry: Option<&ViewportGeometry>) -> Vector {
    match geometry {
        Some(geometry) if offset.x.is_finite() && offset.y.is_finite() => {
            geometry.clamp_offset(offset, scale.value())
        }
        _ => Vector::ZERO,
    }
}
