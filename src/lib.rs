// SPDX-License-Identifier: MPL-2.0
//! `everlasting_moments` is a private, password-gated photo album for a
//! single event, built with the Iced GUI framework.
//!
//! It offers a hero headline, a film section, a story carousel, a filterable
//! lazy-loading photo grid and a lightbox with zoom, pan, swipe and pinch
//! gestures. Text is localized with Fluent and the album content is read
//! from a TOML file.

#![doc(html_root_url = "https://docs.rs/everlasting_moments/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;
pub mod video_player;
