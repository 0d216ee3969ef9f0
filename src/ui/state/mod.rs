// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Gesture and transform state of the lightbox, kept apart from the widget
//! code so the math can be tested without a window.

pub mod drag;
pub mod pinch;
pub mod scroll_lock;
pub mod swipe;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::DragState;
pub use pinch::PinchState;
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use swipe::{backdrop_alpha, SwipeAxis, SwipeRelease, SwipeState};
pub use viewport::ViewportGeometry;
pub use zoom::ViewerTransform;
