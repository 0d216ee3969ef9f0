// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state.

use super::{Message, Screen};
use crate::application::GalleryFilter;
use crate::domain::Catalog;
use crate::i18n::fluent::I18n;
use crate::media::MediaLoader;
use crate::ui::album;
use crate::ui::gate_screen;
use crate::ui::lightbox;
use crate::ui::notifications::{Manager, Toast};
use crate::ui::widgets::scroll_guard;
use crate::video_player::FilmPlayer;
use iced::widget::{Container, Stack};
use iced::{Element, Length};
use std::sync::Arc;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub gate_state: &'a gate_screen::State,
    pub catalog: &'a Arc<Catalog>,
    pub gallery: &'a GalleryFilter,
    pub media: &'a MediaLoader,
    pub hero_opacity: f32,
    pub film: &'a FilmPlayer,
    pub lightbox: Option<&'a lightbox::State>,
    pub scroll_locked: bool,
    pub proximity: f32,
    pub download_busy: bool,
    pub window_width: f32,
    pub spinner_rotation: f32,
    pub notifications: &'a Manager,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Gate => gate_screen::view(gate_screen::ViewContext {
            i18n: ctx.i18n,
            state: ctx.gate_state,
        })
        .map(Message::Gate),
        Screen::Album => view_album(&ctx),
    };

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(
            Container::new(current_view)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(toasts)
        .into()
}

fn view_album<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let catalog = ctx.catalog;

    let page = album::view(album::ViewContext {
        i18n: ctx.i18n,
        event: catalog.event(),
        stories: catalog.stories(),
        story_images: ctx.media.stories(),
        hero_image: ctx.media.hero(),
        hero_opacity: ctx.hero_opacity,
        film: ctx.film,
        gallery: ctx.gallery,
        tiles: ctx.media.tiles(),
        proximity: ctx.proximity,
        download_busy: ctx.download_busy,
        window_width: ctx.window_width,
        spinner_rotation: ctx.spinner_rotation,
    })
    .map(Message::Album);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(scroll_guard(page, ctx.scroll_locked));

    if let Some(state) = ctx.lightbox {
        layers = layers.push(
            lightbox::view(
                state,
                lightbox::ViewContext {
                    i18n: ctx.i18n,
                    spinner_rotation: ctx.spinner_rotation,
                },
            )
            .map(Message::Lightbox),
        );
    }

    layers.into()
}
