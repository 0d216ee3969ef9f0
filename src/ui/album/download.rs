// SPDX-License-Identifier: MPL-2.0
//! Bulk download section and page footer.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, text, Column, Row};
use iced::{Color, Element, Length};

pub fn view(i18n: &I18n, busy: bool, spinner_rotation: f32) -> Element<'_, Message> {
    let label: Element<'_, Message> = if busy {
        Row::new()
            .spacing(spacing::SM)
            .align_y(Vertical::Center)
            .push(
                AnimatedSpinner::new(palette::WHITE, spinner_rotation)
                    .size(sizing::ICON_MD)
                    .into_element(),
            )
            .push(text(i18n.tr("download-busy")).size(typography::BODY_LG))
            .into()
    } else {
        text(i18n.tr("download-button"))
            .size(typography::BODY_LG)
            .into()
    };

    // Disabled while busy; the action itself also refuses a second request.
    let action = button(label)
        .padding([spacing::MD, spacing::XXL])
        .style(styles::button::primary)
        .on_press_maybe((!busy).then_some(Message::Download));

    let footer = text(i18n.tr("footer-private"))
        .size(typography::CAPTION)
        .color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::WHITE
        });

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .push(text(i18n.tr("download-title")).size(typography::TITLE_LG))
        .push(
            text(i18n.tr("download-description"))
                .size(typography::BODY)
                .color(Color {
                    a: opacity::OVERLAY_HOVER,
                    ..palette::WHITE
                })
                .align_x(Horizontal::Center),
        )
        .push(action)
        .push(container(footer).padding([spacing::XXL, 0.0]));

    container(content)
        .width(Length::Fill)
        .padding([spacing::SECTION, spacing::LG])
        .style(styles::container::dark_section)
        .into()
}
