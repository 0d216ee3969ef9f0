// SPDX-License-Identifier: MPL-2.0
//! Modal photo viewer with zoom, pan, swipe and pinch.
//!
//! [`component`] holds the state machine, [`view`] renders it, [`timers`]
//! hands out cancellable timer tokens and [`fade`] interpolates opacity.

pub mod component;
pub mod fade;
pub mod timers;
pub mod view;

pub use component::{Effect, Message, Phase, State};
pub use fade::Fade;
pub use timers::{TimerKind, TimerToken, TokenSource};
pub use view::{view, ViewContext};
