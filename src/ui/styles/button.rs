// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Gold call-to-action (unlock, relive the story, download).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => palette::GOLD_DARK,
        button::Status::Active => palette::GOLD,
        button::Status::Disabled => Color {
            a: opacity::DISABLED,
            ..palette::GOLD
        },
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: match status {
            button::Status::Hovered => shadow::LG,
            _ => shadow::MD,
        },
        snap: true,
    }
}

/// Active gallery filter.
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::GOLD_DARK,
        _ => palette::GOLD,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::GOLD,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::MD,
        snap: true,
    }
}

/// Inactive gallery filter.
pub fn unselected(_theme: &Theme, status: button::Status) -> button::Style {
    let (text_color, border_color) = match status {
        button::Status::Hovered => (palette::GOLD_DARK, palette::GOLD),
        _ => (palette::DARK, palette::GRAY_200),
    };
    button::Style {
        background: Some(Background::Color(WHITE)),
        text_color,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Bare glyph on a dark overlay: white, gold when hovered, dimmed when disabled.
pub fn overlay_icon(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::GOLD,
        button::Status::Active => WHITE,
        button::Status::Disabled => Color {
            a: opacity::DISABLED,
            ..WHITE
        },
    };
    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Round translucent button (lightbox previous/next, film play).
pub fn overlay(
    text_color: Color,
    alpha_normal: f32,
    alpha_hover: f32,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered | button::Status::Pressed => alpha_hover,
            _ => alpha_normal,
        };

        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..BLACK })),
            text_color,
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Text link with no chrome.
pub fn link(_theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: match status {
            button::Status::Hovered | button::Status::Pressed => palette::GOLD_DARK,
            _ => palette::GOLD,
        },
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Gallery tile; the image is the whole surface.
pub fn tile(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: palette::DARK,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
