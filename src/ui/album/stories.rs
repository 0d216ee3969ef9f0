// SPDX-License-Identifier: MPL-2.0
//! Horizontal carousel of story moments.

use super::Message;
use crate::domain::StoryRecord;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment::Horizontal;
use iced::widget::{center, container, image, scrollable, text, Column, Row};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::{ContentFit, Element, Length};
use std::collections::HashMap;

/// Height of the picture inside a card; the caption takes the rest.
const PICTURE_HEIGHT: f32 = 320.0;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub stories: &'a [StoryRecord],
    pub images: &'a HashMap<u32, ImageData>,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let cards = ctx
        .stories
        .iter()
        .fold(Row::new().spacing(spacing::LG).padding([spacing::MD, spacing::XXL]), |row, story| {
            row.push(card(story, ctx.images.get(&story.id), ctx.spinner_rotation))
        });

    let carousel = scrollable(cards)
        .direction(Direction::Horizontal(Scrollbar::new()))
        .width(Length::Fill);

    let header = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .width(Length::Fill)
        .push(text(ctx.i18n.tr("stories-title")).size(typography::TITLE_LG))
        .push(
            text(ctx.i18n.tr("stories-description"))
                .size(typography::BODY)
                .color(palette::GRAY_400)
                .align_x(Horizontal::Center),
        );

    container(
        Column::new()
            .spacing(spacing::XXL)
            .push(container(header).padding([0.0, spacing::LG]))
            .push(carousel),
    )
    .width(Length::Fill)
    .padding([spacing::SECTION, 0.0])
    .into()
}

fn card<'a>(
    story: &'a StoryRecord,
    image_data: Option<&'a ImageData>,
    spinner_rotation: f32,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match image_data {
        Some(data) => image(data.handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => center(
            AnimatedSpinner::new(palette::GOLD, spinner_rotation)
                .size(sizing::ICON_LG)
                .into_element(),
        )
        .into(),
    };

    let body = Column::new()
        .push(
            container(picture)
                .width(Length::Fill)
                .height(Length::Fixed(PICTURE_HEIGHT))
                .clip(true)
                .style(styles::container::media_frame),
        )
        .push(
            container(
                text(story.caption.as_str())
                    .size(typography::BODY_SM)
                    .color(palette::GRAY_700),
            )
            .padding(spacing::MD),
        );

    container(body)
        .width(Length::Fixed(sizing::STORY_CARD_WIDTH))
        .height(Length::Fixed(sizing::STORY_CARD_HEIGHT))
        .clip(true)
        .style(styles::container::card)
        .into()
}
