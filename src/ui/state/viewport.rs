// SPDX-License-Identifier: MPL-2.0
//! Lightbox viewport geometry
//!
//! The image container is a centred box inside the window; the image is
//! contain-fitted into it and then scaled. Everything here is total: zero
//! sizes give zero bounds and non-finite input yields `None`, never `NaN`.

use iced::{Point, Rectangle, Size, Vector};

/// Gap kept between the window edge and the image container.
pub const CONTAINER_PADDING: f32 = 16.0;

/// Widest image container, in logical pixels.
pub const CONTAINER_MAX_WIDTH: f32 = 896.0;

/// Tallest image container, as a fraction of the window height.
pub const CONTAINER_MAX_HEIGHT_FRACTION: f32 = 0.9;

/// Geometry the lightbox needs to bound panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Image container, in window coordinates.
    pub container: Rectangle,
    /// Intrinsic size of the displayed image.
    pub image: Size,
}

impl ViewportGeometry {
    /// Builds the geometry for a window, or `None` if any input is non-finite.
    #[must_use]
    pub fn new(window: Size, image: Size) -> Option<Self> {
        if !is_finite_size(window) || !is_finite_size(image) {
            return None;
        }
        Some(Self {
            container: container_rect(window),
            image,
        })
    }

    /// Image size after contain-fitting into the container (scale 1).
    #[must_use]
    pub fn fitted_size(&self) -> Size {
        fitted_size(self.container.size(), self.image)
    }

    /// Largest offset magnitude per axis at `scale`.
    #[must_use]
    pub fn pan_bounds(&self, scale: f32) -> Vector {
        pan_bounds(self.container.size(), self.image, scale)
    }

    /// Clamps `offset` into the pan bounds for `scale`.
    #[must_use]
    pub fn clamp_offset(&self, offset: Vector, scale: f32) -> Vector {
        let bounds = self.pan_bounds(scale);
        Vector::new(
            offset.x.clamp(-bounds.x, bounds.x),
            offset.y.clamp(-bounds.y, bounds.y),
        )
    }

    /// Returns whether `point` (window coordinates) is inside the container.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.container.contains(point)
    }

    /// Vector from the container centre to `point`.
    #[must_use]
    pub fn from_center(&self, point: Point) -> Vector {
        point - self.container.center()
    }
}

/// Centred container rect for a window.
#[must_use]
pub fn container_rect(window: Size) -> Rectangle {
    let width = (window.width - 2.0 * CONTAINER_PADDING)
        .min(CONTAINER_MAX_WIDTH)
        .max(0.0);
    let height = (window.height - 2.0 * CONTAINER_PADDING)
        .min(window.height * CONTAINER_MAX_HEIGHT_FRACTION)
        .max(0.0);

    Rectangle {
        x: ((window.width - width) / 2.0).max(0.0),
        y: ((window.height - height) / 2.0).max(0.0),
        width,
        height,
    }
}

/// Contain-fit of `image` into `container`.
#[must_use]
pub fn fitted_size(container: Size, image: Size) -> Size {
    if !has_area(container) || !has_area(image) {
        return Size::ZERO;
    }
    let ratio = (container.width / image.width).min(container.height / image.height);
    Size::new(image.width * ratio, image.height * ratio)
}

/// `max(0, (scaled - container) / 2)` per axis.
#[must_use]
pub fn pan_bounds(container: Size, image: Size, scale: f32) -> Vector {
    if !scale.is_finite() {
        return Vector::ZERO;
    }
    let fitted = fitted_size(container, image);
    Vector::new(
        ((fitted.width * scale - container.width) / 2.0).max(0.0),
        ((fitted.height * scale - container.height) / 2.0).max(0.0),
    )
}

fn is_finite_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite()
}

fn has_area(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ViewportGeometry {
        // 928 x 1000 window → 896 x 900 container (max width, 90% height)
        ViewportGeometry::new(Size::new(928.0, 1000.0), Size::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn container_is_centred_and_capped() {
        let rect = container_rect(Size::new(1600.0, 1000.0));
        assert_eq!(rect.width, CONTAINER_MAX_WIDTH);
        assert_eq!(rect.height, 900.0);
        assert_eq!(rect.x, (1600.0 - 896.0) / 2.0);
        assert_eq!(rect.y, 50.0);
    }

    #[test]
    fn small_window_keeps_padding() {
        let rect = container_rect(Size::new(300.0, 100.0));
        assert_eq!(rect.width, 268.0);
        assert_eq!(rect.height, 68.0);
        assert_eq!(rect.x, 16.0);
    }

    #[test]
    fn tiny_window_collapses_to_zero() {
        let rect = container_rect(Size::new(10.0, 10.0));
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn fitted_size_contains_image() {
        let fitted = geometry().fitted_size();
        assert!((fitted.width - 896.0).abs() < 1e-3);
        assert!((fitted.height - 672.0).abs() < 1e-3);
    }

    #[test]
    fn pan_bounds_are_zero_at_identity() {
        assert_eq!(geometry().pan_bounds(1.0), Vector::ZERO);
    }

    #[test]
    fn pan_bounds_grow_with_scale() {
        let bounds = geometry().pan_bounds(2.0);
        assert!((bounds.x - 448.0).abs() < 1e-3);
        assert!((bounds.y - 222.0).abs() < 1e-3);
    }

    #[test]
    fn zero_sizes_give_zero_bounds() {
        assert_eq!(pan_bounds(Size::ZERO, Size::new(800.0, 600.0), 4.0), Vector::ZERO);
        assert_eq!(pan_bounds(Size::new(800.0, 600.0), Size::ZERO, 4.0), Vector::ZERO);
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        assert!(ViewportGeometry::new(Size::new(f32::NAN, 10.0), Size::new(1.0, 1.0)).is_none());
        assert!(
            ViewportGeometry::new(Size::new(10.0, 10.0), Size::new(f32::INFINITY, 1.0)).is_none()
        );
        assert_eq!(
            pan_bounds(Size::new(10.0, 10.0), Size::new(1.0, 1.0), f32::NAN),
            Vector::ZERO
        );
    }

    #[test]
    fn clamp_offset_respects_bounds() {
        let clamped = geometry().clamp_offset(Vector::new(1000.0, -1000.0), 2.0);
        assert!((clamped.x - 448.0).abs() < 1e-3);
        assert!((clamped.y + 222.0).abs() < 1e-3);
    }
}
