// SPDX-License-Identifier: MPL-2.0
//! Single-finger swipe gesture at the unzoomed scale.
//!
//! The gesture locks onto an axis once the finger has travelled past the
//! direction lock. A vertical swipe drags the image down (never up) and
//! closes the lightbox past the close threshold; a horizontal swipe
//! navigates on release past the navigation threshold.

use crate::application::Direction;
use crate::config::{
    BACKDROP_ALPHA, BACKDROP_MIN_FRACTION, SWIPE_BACKDROP_FADE_PX, SWIPE_CLOSE_THRESHOLD_PX,
    SWIPE_DIRECTION_LOCK_PX, SWIPE_NAVIGATE_THRESHOLD_PX,
};
use iced::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

/// What the lightbox should do when the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeRelease {
    /// Nothing happens.
    None,
    /// Vertical swipe released short of the threshold; animate back to 0.
    SnapBack,
    /// Vertical swipe released past the threshold.
    Close,
    /// Horizontal swipe released past the threshold.
    Navigate(Direction),
}

#[derive(Debug, Clone, Default)]
pub struct SwipeState {
    start: Option<Point>,
    axis: Option<SwipeAxis>,
    horizontal_delta: f32,
    vertical_offset: f32,
    snapping: bool,
}

impl SwipeState {
    /// Starts tracking a finger.
    pub fn begin(&mut self, position: Point) {
        self.start = Some(position);
        self.axis = None;
        self.horizontal_delta = 0.0;
        self.vertical_offset = 0.0;
        self.snapping = false;
    }

    /// Follows the finger. Ignored when no gesture is active.
    pub fn update(&mut self, position: Point) {
        let Some(start) = self.start else {
            return;
        };
        let dx = position.x - start.x;
        let dy = position.y - start.y;
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }

        if self.axis.is_none()
            && (dx.abs() > SWIPE_DIRECTION_LOCK_PX || dy.abs() > SWIPE_DIRECTION_LOCK_PX)
        {
            self.axis = Some(if dy.abs() > dx.abs() {
                SwipeAxis::Vertical
            } else {
                SwipeAxis::Horizontal
            });
        }

        match self.axis {
            Some(SwipeAxis::Vertical) => self.vertical_offset = dy.max(0.0),
            Some(SwipeAxis::Horizontal) => self.horizontal_delta = dx,
            None => {}
        }
    }

    /// Ends the gesture at `end`, where the finger lifted, and reports the
    /// outcome.
    pub fn release(&mut self, end: Point) -> SwipeRelease {
        if self.start.is_none() {
            return SwipeRelease::None;
        }
        self.update(end);
        self.start = None;
        let outcome = match self.axis.take() {
            Some(SwipeAxis::Vertical) if self.vertical_offset > SWIPE_CLOSE_THRESHOLD_PX => {
                SwipeRelease::Close
            }
            Some(SwipeAxis::Vertical) => {
                self.snap_back();
                SwipeRelease::SnapBack
            }
            Some(SwipeAxis::Horizontal)
                if self.horizontal_delta.abs() >= SWIPE_NAVIGATE_THRESHOLD_PX =>
            {
                SwipeRelease::Navigate(if self.horizontal_delta < 0.0 {
                    Direction::Next
                } else {
                    Direction::Previous
                })
            }
            Some(SwipeAxis::Horizontal) | None => SwipeRelease::None,
        };
        self.horizontal_delta = 0.0;
        outcome
    }

    /// Drops the gesture without acting on it (a second finger arrived).
    ///
    /// Returns `true` if a snap-back animation started.
    pub fn abandon(&mut self) -> bool {
        let was_dragged = self.vertical_offset > 0.0;
        self.start = None;
        self.axis = None;
        self.horizontal_delta = 0.0;
        if was_dragged {
            self.snap_back();
        }
        was_dragged
    }

    /// Ends the snap-back animation.
    pub fn finish_snap(&mut self) {
        self.snapping = false;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    #[must_use]
    pub fn axis(&self) -> Option<SwipeAxis> {
        self.axis
    }

    /// Downward drag distance, always `>= 0`.
    #[must_use]
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.snapping
    }

    fn snap_back(&mut self) {
        self.vertical_offset = 0.0;
        self.snapping = true;
    }
}

/// Backdrop opacity for a given downward swipe distance.
#[must_use]
pub fn backdrop_alpha(vertical_offset: f32) -> f32 {
    let fade = 1.0 - vertical_offset.max(0.0) / SWIPE_BACKDROP_FADE_PX;
    BACKDROP_ALPHA * fade.max(BACKDROP_MIN_FRACTION)
}
