// SPDX-License-Identifier: MPL-2.0
//! Filterable photo grid.
//!
//! Tiles reserve their space from the aspect ratio in the locator, so the
//! grid does not shift while images arrive. Each tile still being observed
//! is wrapped in a sensor that reports when it comes within the proximity
//! threshold of the viewport.

use super::Message;
use crate::application::GalleryFilter;
use crate::domain::{CategoryFilter, PhotoRecord};
use crate::i18n::fluent::I18n;
use crate::media::{TileLoader, TileState};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, center, container, image, sensor, text, Column, Row, Space, Stack};
use iced::{ContentFit, Element, Length, Theme};
use std::collections::HashMap;

/// Gap between tiles, both axes.
const GAP: f32 = spacing::MD;

/// Number of grid columns for a window width: 2 below 640 px, 3 below
/// 1024 px, 4 otherwise.
#[must_use]
pub fn columns_for_width(width: f32) -> usize {
    if width < 640.0 {
        2
    } else if width < 1024.0 {
        3
    } else {
        4
    }
}

/// Width of one tile for a window width.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Column count is at most 4
pub fn tile_width(window_width: f32) -> f32 {
    let columns = columns_for_width(window_width) as f32;
    let content = (window_width - 2.0 * spacing::LG).clamp(0.0, sizing::CONTENT_MAX_WIDTH);
    ((content - GAP * (columns - 1.0)) / columns).max(0.0)
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a GalleryFilter,
    pub tiles: &'a HashMap<u32, TileLoader>,
    pub proximity: f32,
    pub window_width: f32,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(text(ctx.i18n.tr("gallery-title")).size(typography::TITLE_LG))
        .push(
            text(ctx.i18n.tr("gallery-description"))
                .size(typography::BODY)
                .color(palette::GRAY_400)
                .align_x(Horizontal::Center),
        );

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::XXL)
        .align_x(Horizontal::Center)
        .push(header)
        .push(filters(&ctx))
        .push(grid(&ctx));

    container(content)
        .width(Length::Fill)
        .padding([spacing::SECTION, spacing::LG])
        .style(styles::container::light_section)
        .into()
}

fn filters<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let active = ctx.gallery.category();
    CategoryFilter::CHOICES
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, &choice| {
            let style: fn(&Theme, button::Status) -> button::Style = if choice == active {
                styles::button::selected
            } else {
                styles::button::unselected
            };
            row.push(
                button(text(ctx.i18n.tr(choice.i18n_key())).size(typography::BODY))
                    .padding([spacing::XS, spacing::LG])
                    .style(style)
                    .on_press(Message::FilterSelected(choice)),
            )
        })
        .into()
}

fn grid<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    if ctx.gallery.is_empty() {
        return text(ctx.i18n.tr("gallery-empty"))
            .size(typography::BODY)
            .color(palette::GRAY_400)
            .into();
    }

    let columns = columns_for_width(ctx.window_width);
    let width = tile_width(ctx.window_width);
    let photos: Vec<&PhotoRecord> = ctx.gallery.filtered().collect();

    let rows = photos
        .chunks(columns)
        .enumerate()
        .map(|(row_index, chunk)| -> Element<'a, Message> {
            chunk
                .iter()
                .enumerate()
                .fold(
                    Row::new().spacing(GAP).align_y(Vertical::Top),
                    |row, (column, photo)| {
                        let index = row_index * columns + column;
                        row.push(tile(ctx, index, *photo, width))
                    },
                )
                .into()
        });

    Column::with_children(rows).spacing(GAP).into()
}

fn tile<'a>(
    ctx: &ViewContext<'a>,
    index: usize,
    photo: &'a PhotoRecord,
    width: f32,
) -> Element<'a, Message> {
    let loader = ctx.tiles.get(&photo.id);
    let height = loader.map_or(width, |loader| loader.aspect_ratio().height_for(width));

    let content: Element<'a, Message> = match loader {
        Some(loader) if loader.state() == TileState::Loaded => loader.image().map_or_else(
            || Space::new().width(Length::Fill).height(Length::Fill).into(),
            |data| {
                image(data.handle.clone())
                    .content_fit(ContentFit::Cover)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            },
        ),
        Some(loader) if loader.state() == TileState::Pending => {
            let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);
            if let Some(placeholder) = loader.placeholder() {
                layers = layers.push(
                    image(placeholder.handle.clone())
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fill)
                        .height(Length::Fill),
                );
            }
            layers
                .push(center(
                    AnimatedSpinner::new(palette::GOLD, ctx.spinner_rotation)
                        .size(sizing::ICON_LG)
                        .into_element(),
                ))
                .into()
        }
        _ => Space::new().width(Length::Fill).height(Length::Fill).into(),
    };

    let framed = button(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .clip(true)
            .style(styles::container::media_frame),
    )
    .padding(0)
    .width(Length::Fixed(width))
    .height(Length::Fixed(height))
    .style(styles::button::tile)
    .on_press(Message::OpenPhoto(index));

    match loader {
        Some(loader) if loader.is_observing() => {
            let id = photo.id;
            sensor(framed)
                .anticipate(ctx.proximity)
                .on_show(move |_| Message::TileVisible(id))
                .into()
        }
        _ => framed.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_breakpoints() {
        assert_eq!(columns_for_width(320.0), 2);
        assert_eq!(columns_for_width(639.9), 2);
        assert_eq!(columns_for_width(640.0), 3);
        assert_eq!(columns_for_width(1023.0), 3);
        assert_eq!(columns_for_width(1024.0), 4);
        assert_eq!(columns_for_width(2560.0), 4);
    }

    #[test]
    fn tiles_fill_the_content_width() {
        // 800 px window: 752 px content, 3 columns, two 16 px gaps.
        let width = tile_width(800.0);
        assert!((width - 240.0).abs() < 1e-3);
    }

    #[test]
    fn wide_windows_are_capped_at_content_width() {
        // 1152 px content, 4 columns, three 16 px gaps.
        let width = tile_width(3000.0);
        assert!((width - 276.0).abs() < 1e-3);
    }

    #[test]
    fn tile_width_never_negative() {
        assert_eq!(tile_width(0.0), 0.0);
    }
}
