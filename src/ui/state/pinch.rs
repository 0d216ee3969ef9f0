// SPDX-License-Identifier: MPL-2.0
//! Two-finger pinch zoom.
//!
//! The scale follows the ratio of the current finger distance to the distance
//! when the pinch started, applied to the scale at that moment. It does not
//! compound between move events.

use crate::domain::ZoomScale;
use iced::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    initial_distance: f32,
    initial_scale: ZoomScale,
}

impl PinchState {
    /// Starts a pinch. Returns `None` if the fingers are on the same point.
    #[must_use]
    pub fn begin(a: Point, b: Point, scale: ZoomScale) -> Option<Self> {
        let initial_distance = a.distance(b);
        if initial_distance.is_finite() && initial_distance > f32::EPSILON {
            Some(Self {
                initial_distance,
                initial_scale: scale,
            })
        } else {
            None
        }
    }

    /// Scale for the current finger positions, clamped.
    #[must_use]
    pub fn scale_for(&self, a: Point, b: Point) -> ZoomScale {
        let ratio = a.distance(b) / self.initial_distance;
        ZoomScale::new(self.initial_scale.value() * ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_fingers_do_not_start() {
        let p = Point::new(10.0, 10.0);
        assert!(PinchState::begin(p, p, ZoomScale::IDENTITY).is_none());
    }

    #[test]
    fn spreading_fingers_zooms_in() {
        let pinch = PinchState::begin(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ZoomScale::IDENTITY,
        )
        .unwrap();
        let scale = pinch.scale_for(Point::new(0.0, 0.0), Point::new(250.0, 0.0));
        assert!((scale.value() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn ratio_applies_to_initial_scale_without_compounding() {
        let pinch = PinchState::begin(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ZoomScale::new(2.0),
        )
        .unwrap();
        let first = pinch.scale_for(Point::new(0.0, 0.0), Point::new(150.0, 0.0));
        let again = pinch.scale_for(Point::new(0.0, 0.0), Point::new(150.0, 0.0));
        assert_eq!(first, again);
        assert!((first.value() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn result_is_clamped() {
        let pinch = PinchState::begin(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            ZoomScale::new(2.0),
        )
        .unwrap();
        assert!(pinch
            .scale_for(Point::new(0.0, 0.0), Point::new(1000.0, 0.0))
            .is_max());
        assert!(pinch
            .scale_for(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
            .is_identity());
        assert!(pinch
            .scale_for(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
            .is_identity());
    }
}
