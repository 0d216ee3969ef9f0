// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Container, Row, Space};
use iced::{alignment, Element, Length};

pub struct Toast;

impl Toast {
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let accent = notification.severity().color();

        let args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let message = i18n.tr_with_args(notification.message_key(), &args);

        let mut body = Column::new()
            .spacing(spacing::XXS)
            .width(Length::Fill)
            .push(text(message).size(typography::BODY_SM));
        if let Some(detail) = notification.detail() {
            body = body.push(
                text(detail)
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            );
        }

        let glyph = text(notification.severity().glyph())
            .size(typography::BODY_LG)
            .color(accent)
            .width(Length::Fixed(sizing::ICON_MD))
            .align_x(alignment::Horizontal::Center);

        let dismiss = button(text("×").size(typography::BODY_LG))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(styles::button::link);

        Container::new(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(glyph)
                .push(body)
                .push(dismiss),
        )
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(styles::container::toast(accent))
        .into()
    }

    /// Visible toasts stacked at the bottom centre of the window.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        if manager.visible_count() == 0 {
            return Space::new().into();
        }

        let toasts = Column::with_children(
            manager
                .visible()
                .map(|notification| Self::view(notification, i18n)),
        )
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center);

        container(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::LG)
            .into()
    }
}
