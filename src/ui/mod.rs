// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`gate_screen`] - Password prompt shown before anything else
//! - [`album`] - Hero, film, stories, gallery and download sections
//! - [`lightbox`] - Modal photo viewer with zoom, pan, swipe and navigation
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable gesture and transform state (zoom, viewport, drag, swipe, pinch)
//! - [`widgets`] - Custom Iced widgets (spinner, transformed image, scroll guard)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`notifications`] - Toast notification system for user feedback

pub mod album;
pub mod design_tokens;
pub mod gate_screen;
pub mod lightbox;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod widgets;
