// SPDX-License-Identifier: MPL-2.0
//! Password screen shown before the album.

use crate::domain::{Gate, GateError, Unlock};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Horizontal;
use iced::widget::{button, container, text, text_input, Column, Id};
use iced::{Element, Length};

/// Identifier of the password field, used to focus it on startup.
pub const PASSWORD_INPUT_ID: &str = "gate-password";

#[derive(Debug, Default)]
pub struct State {
    input: String,
    error: Option<GateError>,
}

impl State {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn error(&self) -> Option<GateError> {
        self.error
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Submit,
}

/// Outcome reported to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Unlocked,
    Rejected,
}

pub fn update(state: &mut State, gate: &mut Gate, message: Message) -> Event {
    match message {
        Message::InputChanged(value) => {
            state.input = value;
            Event::None
        }
        Message::Submit => match gate.attempt(&state.input) {
            Ok(Unlock::Unlocked | Unlock::AlreadyUnlocked) => {
                state.error = None;
                state.input.clear();
                Event::Unlocked
            }
            Err(error) => {
                state.error = Some(error);
                Event::Rejected
            }
        },
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let password = text_input(&i18n.tr("gate-password-placeholder"), ctx.state.input())
        .id(Id::new(PASSWORD_INPUT_ID))
        .secure(true)
        .on_input(Message::InputChanged)
        .on_submit(Message::Submit)
        .padding(spacing::SM)
        .size(typography::BODY_LG)
        .align_x(Horizontal::Center);

    let submit = button(
        text(i18n.tr("gate-submit"))
            .size(typography::BODY)
            .width(Length::Fill)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::button::primary)
    .on_press(Message::Submit);

    let mut card = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(text(i18n.tr("gate-title")).size(typography::TITLE_MD))
        .push(
            text(i18n.tr("gate-subtitle"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .push(password)
        .push(submit);

    if let Some(error) = ctx.state.error() {
        card = card.push(
            text(i18n.tr(error.i18n_key()))
                .size(typography::BODY_SM)
                .color(palette::ERROR_500),
        );
    }

    container(
        container(card)
            .width(Length::Fixed(sizing::GATE_CARD_WIDTH))
            .padding(spacing::XL)
            .style(styles::container::card),
    )
    .center(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::page)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(state: &mut State, gate: &mut Gate, input: &str) -> Event {
        update(state, gate, Message::InputChanged(input.to_string()));
        update(state, gate, Message::Submit)
    }

    #[test]
    fn wrong_password_shows_error_and_keeps_input() {
        let mut gate = Gate::new("abc123");
        let mut state = State::default();
        assert_eq!(submit(&mut state, &mut gate, "ABC123"), Event::Rejected);
        assert_eq!(state.error(), Some(GateError::Incorrect));
        assert_eq!(state.input(), "ABC123");
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn correct_password_clears_error_and_input() {
        let mut gate = Gate::new("abc123");
        let mut state = State::default();
        submit(&mut state, &mut gate, "nope");
        assert_eq!(submit(&mut state, &mut gate, "abc123"), Event::Unlocked);
        assert_eq!(state.error(), None);
        assert!(state.input().is_empty());
        assert!(gate.is_authenticated());
    }

    #[test]
    fn typing_does_not_attempt() {
        let mut gate = Gate::new("abc123");
        let mut state = State::default();
        let event = update(
            &mut state,
            &mut gate,
            Message::InputChanged("abc123".to_string()),
        );
        assert_eq!(event, Event::None);
        assert!(!gate.is_authenticated());
    }
}
