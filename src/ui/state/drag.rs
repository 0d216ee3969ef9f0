// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning a zoomed image.

use iced::{Point, Vector};

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Pointer position minus image offset, captured when the drag started.
    anchor: Option<Vector>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, offset: Vector) {
        self.anchor = Some(Vector::new(position.x - offset.x, position.y - offset.y));
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Offset that keeps the grabbed point under the pointer (unclamped).
    #[must_use]
    pub fn calculate_offset(&self, current_position: Point) -> Option<Vector> {
        let anchor = self.anchor?;
        Some(Vector::new(
            current_position.x - anchor.x,
            current_position.y - anchor.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let state = DragState::default();
        assert!(!state.is_dragging());
        assert!(state.calculate_offset(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn stop_drag_clears_state() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0), Vector::new(20.0, 10.0));
        state.stop();
        assert!(!state.is_dragging());
    }

    #[test]
    fn calculate_offset_follows_pointer() {
        let mut state = DragState::default();
        state.start(Point::new(200.0, 150.0), Vector::new(50.0, 30.0));

        // Pointer moved left/up by 20 pixels; the image follows.
        let new_offset = state.calculate_offset(Point::new(180.0, 130.0));
        assert_eq!(new_offset, Some(Vector::new(30.0, 10.0)));
    }

    #[test]
    fn no_movement_keeps_offset() {
        let mut state = DragState::default();
        state.start(Point::new(10.0, 10.0), Vector::new(-5.0, 7.0));
        assert_eq!(
            state.calculate_offset(Point::new(10.0, 10.0)),
            Some(Vector::new(-5.0, 7.0))
        );
    }
}
