// SPDX-License-Identifier: MPL-2.0
//! Styles for content drawn over images and the lightbox backdrop.

use crate::ui::design_tokens::{opacity, palette::WHITE};
use iced::widget::text;
use iced::{Color, Theme};

/// White text on a dark overlay, faded by the lightbox opacity.
pub fn hint_text(alpha: f32) -> impl Fn(&Theme) -> text::Style {
    move |_theme: &Theme| text::Style {
        color: Some(Color {
            a: opacity::OVERLAY_HOVER * alpha.clamp(0.0, 1.0),
            ..WHITE
        }),
    }
}
