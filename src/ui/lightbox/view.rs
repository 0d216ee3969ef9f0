// SPDX-License-Identifier: MPL-2.0
//! Lightbox rendering: backdrop, transformed image, controls and hint.

use super::component::{Message, State};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{AnimatedSpinner, TransformedImage};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, center, container, row, text, Column, Container, Row, Space, Stack};
use iced::{Color, Element, Length, Size, Vector};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub spinner_rotation: f32,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let backdrop = container(Space::new().width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::backdrop(state.backdrop_alpha()));

    let container_size = state
        .geometry()
        .map_or(Size::new(0.0, 0.0), |geometry| geometry.container.size());

    let image_layer = center(
        container(image(state, &ctx))
            .width(Length::Fixed(container_size.width))
            .height(Length::Fixed(container_size.height))
            .clip(true),
    );

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(image_layer)
        .push(navigation(state))
        .push(toolbar(state))
        .push(hint(state, ctx.i18n))
        .into()
}

fn image<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let Some(data) = state.image() else {
        return center(
            AnimatedSpinner::new(
                Color {
                    a: state.overlay_opacity(),
                    ..palette::WHITE
                },
                ctx.spinner_rotation,
            )
            .into_element(),
        )
        .into();
    };

    let transform = state.transform();
    let offset = transform.offset() + Vector::new(0.0, state.swipe().vertical_offset());
    TransformedImage::new(data.handle.clone(), state.image_size())
        .scale(transform.scale().value())
        .offset(offset)
        .opacity(state.image_opacity())
        .panning(transform.is_panning())
        .into_element()
}

fn glyph(symbol: &str) -> iced::widget::Text<'_> {
    text(symbol)
        .size(typography::TITLE_MD)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
}

/// Zoom controls on the top left, close on the top right.
fn toolbar(state: &State) -> Element<'_, Message> {
    let scale = state.transform().scale();

    let zoom_in = button(glyph("+"))
        .style(styles::button::overlay_icon)
        .padding(spacing::XS)
        .on_press_maybe((!scale.is_max()).then_some(Message::ZoomIn));
    let zoom_out = button(glyph("−"))
        .style(styles::button::overlay_icon)
        .padding(spacing::XS)
        .on_press_maybe((!scale.is_identity()).then_some(Message::ZoomOut));

    let mut zoom_controls = row![zoom_in, zoom_out].spacing(spacing::XS);
    if state.transform().is_zoomed() {
        zoom_controls = zoom_controls.push(
            button(glyph("⟲"))
                .style(styles::button::overlay_icon)
                .padding(spacing::XS)
                .on_press(Message::ResetZoom),
        );
    }

    let close = button(glyph("×").size(typography::TITLE_LG))
        .style(styles::button::overlay_icon)
        .padding(spacing::XS)
        .on_press(Message::Close);

    Row::new()
        .width(Length::Fill)
        .padding(spacing::MD)
        .align_y(Vertical::Top)
        .push(zoom_controls)
        .push(Space::new().width(Length::Fill))
        .push(close)
        .into()
}

/// Previous/next buttons at mid height, hidden while zoomed.
fn navigation(state: &State) -> Element<'_, Message> {
    if state.transform().is_zoomed() {
        return Space::new().into();
    }

    let nav_button = |symbol: &'static str, message: Message| {
        button(glyph(symbol))
            .width(Length::Fixed(sizing::LIGHTBOX_NAV_BUTTON))
            .height(Length::Fixed(sizing::LIGHTBOX_NAV_BUTTON))
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_SUBTLE,
                opacity::OVERLAY_MEDIUM,
            ))
            .on_press(message)
    };

    Container::new(
        Row::new()
            .width(Length::Fill)
            .padding(spacing::MD)
            .align_y(Vertical::Center)
            .push(nav_button("‹", Message::Previous))
            .push(Space::new().width(Length::Fill))
            .push(nav_button("›", Message::Next)),
    )
    .height(Length::Fill)
    .align_y(Vertical::Center)
    .into()
}

fn hint<'a>(state: &State, i18n: &I18n) -> Element<'a, Message> {
    Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_x(Horizontal::Center)
        .push(Space::new().height(Length::Fill))
        .push(
            text(i18n.tr("lightbox-hint"))
                .size(typography::BODY_SM)
                .style(styles::overlay::hint_text(state.overlay_opacity())),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::lightbox::TokenSource;
    use crate::ui::state::ScrollLock;

    #[test]
    fn view_builds_while_the_image_loads() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        let lock = ScrollLock::new();
        let (state, _effect) =
            State::open(&lock, &TokenSource::new(), "photo.jpg", "A photo", None, None);
        let _element = view(
            &state,
            ViewContext {
                i18n: &i18n,
                spinner_rotation: 0.0,
            },
        );
    }
}
