// SPDX-License-Identifier: MPL-2.0
//! Full-width opening section with the couple's names.

use super::Message;
use crate::domain::EventDetails;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Horizontal;
use iced::widget::{button, center, container, image, text, Column, Space, Stack};
use iced::{ContentFit, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub event: &'a EventDetails,
    pub image: Option<&'a ImageData>,
    /// Current value of the background fade-in.
    pub opacity: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let background: Element<'_, Message> = match ctx.image {
        Some(data) => image(data.handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .opacity(ctx.opacity)
            .into(),
        None => Space::new().width(Length::Fill).height(Length::Fill).into(),
    };

    let scrim = container(Space::new().width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::hero_scrim);

    let names = ctx.i18n.tr_with_args(
        "hero-names",
        &[
            ("first", ctx.event.first_name.as_str()),
            ("second", ctx.event.second_name.as_str()),
        ],
    );

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .push(
            text(names)
                .size(typography::DISPLAY)
                .color(palette::WHITE)
                .align_x(Horizontal::Center),
        )
        .push(
            text(ctx.event.date.as_str())
                .size(typography::TITLE_SM)
                .color(palette::GOLD),
        )
        .push(
            button(text(ctx.i18n.tr("hero-cta")).size(typography::BODY_LG))
                .padding([spacing::SM, spacing::XL])
                .style(styles::button::primary)
                .on_press(Message::ReliveStory),
        );

    container(
        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(background)
            .push(scrim)
            .push(center(content).padding(spacing::LG)),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::HERO_MIN_HEIGHT))
    .clip(true)
    .style(styles::container::dark_section)
    .into()
}
