// SPDX-License-Identifier: MPL-2.0
//! Film section.
//!
//! The 16:9 panel shows a play button until the first frame arrives, then
//! the decoded film with a transport bar underneath. The ceremony link
//! still goes to the clipboard.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use crate::video_player::{FilmPlayer, PlaybackState};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, center, container, image, slider, text, Column, Row, Stack};
use iced::{ContentFit, Element, Length, Size};

/// Widest the film panel grows.
const PANEL_MAX_WIDTH: f32 = 896.0;

/// Timeline slider step in seconds.
const SLIDER_STEP_SECS: f64 = 0.001;

const VOLUME_SLIDER_WIDTH: f32 = 80.0;

/// Messages emitted by the film panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlayback,
    /// The timeline is being dragged (seconds). No seek yet.
    SeekPreview(f64),
    /// The timeline was released.
    SeekCommit,
    SetVolume(f32),
    ToggleMute,
}

/// Size of the 16:9 film panel for a window of the given width.
#[must_use]
pub fn panel_size(window_width: f32) -> Size {
    let width = (window_width - 2.0 * spacing::LG).clamp(0.0, PANEL_MAX_WIDTH);
    Size::new(width, width * 9.0 / 16.0)
}

/// Formats a position as `MM:SS`, or `HH:MM:SS` past the hour.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Contextual data needed to render the film section.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub player: &'a FilmPlayer,
    pub window_width: f32,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, super::Message> {
    let size = panel_size(ctx.window_width);
    let i18n = ctx.i18n;

    let screen: Element<'_, Message> = match (ctx.player.state(), ctx.player.frame()) {
        (PlaybackState::Error { message }, _) => center(
            Column::new()
                .spacing(spacing::SM)
                .align_x(Horizontal::Center)
                .push(
                    text(i18n.tr("film-error"))
                        .size(typography::BODY)
                        .color(palette::WHITE),
                )
                .push(
                    text(message.as_str())
                        .size(typography::CAPTION)
                        .color(palette::GRAY_200),
                )
                .push(play_button(i18n.tr("film-retry"))),
        )
        .into(),
        (PlaybackState::Loading, None) => center(
            AnimatedSpinner::new(palette::WHITE, ctx.spinner_rotation)
                .size(sizing::ICON_XL)
                .into_element(),
        )
        .into(),
        (_, Some(frame)) => {
            let picture = image(frame.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill);
            if ctx.player.state().is_playing() {
                picture.into()
            } else {
                Stack::new()
                    .push(picture)
                    .push(center(play_button(i18n.tr("film-play"))))
                    .into()
            }
        }
        (_, None) => center(play_button(i18n.tr("film-play"))).into(),
    };

    let panel = container(screen)
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height))
        .style(styles::container::film_panel);

    let mut player = Column::new()
        .width(Length::Fixed(size.width))
        .spacing(spacing::XS)
        .push(panel);
    if ctx.player.frame().is_some() {
        player = player.push(controls(i18n, ctx.player));
    }
    let player: Element<'_, super::Message> =
        Element::from(player).map(super::Message::Film);

    let ceremony = Row::new()
        .spacing(spacing::XXS)
        .align_y(Vertical::Center)
        .push(
            text(i18n.tr("film-ceremony-prefix"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        )
        .push(
            button(text(i18n.tr("film-ceremony-link")).size(typography::BODY_SM))
                .padding(0)
                .style(styles::button::link)
                .on_press(super::Message::CopyCeremonyLink),
        )
        .push(text(".").size(typography::BODY_SM).color(palette::GRAY_400));

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .push(text(i18n.tr("film-title")).size(typography::TITLE_LG))
        .push(
            text(i18n.tr("film-description"))
                .size(typography::BODY)
                .color(palette::GRAY_400)
                .align_x(Horizontal::Center),
        )
        .push(player)
        .push(ceremony);

    container(content)
        .width(Length::Fill)
        .padding([spacing::SECTION, spacing::LG])
        .style(styles::container::light_section)
        .into()
}

fn play_button<'a>(label: String) -> Element<'a, Message> {
    button(
        text(format!("▶  {label}"))
            .size(typography::BODY_LG)
            .color(palette::WHITE),
    )
    .padding([spacing::SM, spacing::LG])
    .style(styles::button::overlay_icon)
    .on_press(Message::TogglePlayback)
    .into()
}

/// Transport bar: play/pause, timeline, time, mute and volume.
fn controls<'a>(i18n: &I18n, player: &FilmPlayer) -> Element<'a, Message> {
    let playing = player.state().is_playing();
    let toggle_label = if playing {
        i18n.tr("film-pause")
    } else {
        format!("▶  {}", i18n.tr("film-play"))
    };
    let toggle = button(text(toggle_label).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::primary)
        .on_press(Message::TogglePlayback);

    let duration = player.duration();
    let position = player.display_position();
    let timeline = slider(0.0..=duration, position.min(duration), Message::SeekPreview)
        .on_release(Message::SeekCommit)
        .step(SLIDER_STEP_SECS)
        .width(Length::Fill);

    let time = text(format!("{} / {}", format_time(position), format_time(duration)))
        .size(typography::CAPTION)
        .color(palette::GRAY_700);

    let muted = player.is_muted() || player.volume().is_silent();
    let mute_label = if player.is_muted() {
        i18n.tr("film-unmute")
    } else {
        i18n.tr("film-mute")
    };
    let mute = button(text(mute_label).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(if muted {
            styles::button::selected
        } else {
            styles::button::unselected
        })
        .on_press(Message::ToggleMute);

    let volume = slider(0.0..=1.0, player.volume().value(), Message::SetVolume)
        .step(0.01)
        .width(Length::Fixed(VOLUME_SLIDER_WIDTH));

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(toggle)
        .push(timeline)
        .push(time)
        .push(mute)
        .push(volume)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_keeps_sixteen_by_nine() {
        let size = panel_size(640.0);
        assert!((size.width - 592.0).abs() < f32::EPSILON);
        assert!((size.height - 333.0).abs() < f32::EPSILON);
    }

    #[test]
    fn panel_width_is_capped() {
        let size = panel_size(1920.0);
        assert!((size.width - PANEL_MAX_WIDTH).abs() < f32::EPSILON);
        assert!((size.height - 504.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tiny_window_collapses_to_zero() {
        assert_eq!(panel_size(10.0), Size::new(0.0, 0.0));
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(125.9), "02:05");
    }

    #[test]
    fn format_time_adds_hours_past_the_hour() {
        assert_eq!(format_time(3665.0), "01:01:05");
    }

    #[test]
    fn format_time_clamps_negative_positions() {
        assert_eq!(format_time(-10.0), "00:00");
    }
}
