// SPDX-License-Identifier: MPL-2.0
//! The album page shown once the gate is open.
//!
//! The page is one vertical scrollable made of five sections: hero, film,
//! stories, gallery and download. Sections only render state owned by the
//! app and report user intent through [`Message`].

pub mod download;
pub mod film;
pub mod gallery;
pub mod hero;
pub mod stories;

use crate::application::GalleryFilter;
use crate::domain::{CategoryFilter, EventDetails, StoryRecord};
use crate::i18n::fluent::I18n;
use crate::media::{ImageData, TileLoader};
use crate::ui::styles;
use crate::video_player::FilmPlayer;
use iced::widget::{container, scrollable, sensor, Column, Id};
use iced::{Element, Length};
use std::collections::HashMap;

/// Identifier of the page scrollable, used to jump to the gallery.
pub const PAGE_SCROLL_ID: &str = "album-page";

/// Sections placed above the gallery, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Film,
    Stories,
}

impl Section {
    const fn slot(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::Film => 1,
            Section::Stories => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Hero call to action: bring the gallery into view.
    ReliveStory,
    Film(film::Message),
    /// Put the ceremony recording's locator on the clipboard.
    CopyCeremonyLink,
    FilterSelected(CategoryFilter),
    /// A tile of the filtered sequence was activated.
    OpenPhoto(usize),
    /// The tile of the photo with this id came near the viewport.
    TileVisible(u32),
    SectionMeasured(Section, f32),
    Download,
}

/// Rendered heights of the sections above the gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionHeights([f32; 3]);

impl SectionHeights {
    pub fn record(&mut self, section: Section, height: f32) {
        self.0[section.slot()] = height.max(0.0);
    }

    /// Vertical scroll offset at which the gallery section starts.
    #[must_use]
    pub fn gallery_offset(&self) -> f32 {
        self.0.iter().sum()
    }
}

/// Contextual data needed to render the album page.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub event: &'a EventDetails,
    pub stories: &'a [StoryRecord],
    pub story_images: &'a HashMap<u32, ImageData>,
    pub hero_image: Option<&'a ImageData>,
    pub hero_opacity: f32,
    pub film: &'a FilmPlayer,
    pub gallery: &'a GalleryFilter,
    pub tiles: &'a HashMap<u32, TileLoader>,
    pub proximity: f32,
    pub download_busy: bool,
    pub window_width: f32,
    pub spinner_rotation: f32,
}

#[must_use]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let hero = measured(
        Section::Hero,
        hero::view(hero::ViewContext {
            i18n: ctx.i18n,
            event: ctx.event,
            image: ctx.hero_image,
            opacity: ctx.hero_opacity,
        }),
    );
    let film = measured(
        Section::Film,
        film::view(film::ViewContext {
            i18n: ctx.i18n,
            player: ctx.film,
            window_width: ctx.window_width,
            spinner_rotation: ctx.spinner_rotation,
        }),
    );
    let stories = measured(
        Section::Stories,
        stories::view(stories::ViewContext {
            i18n: ctx.i18n,
            stories: ctx.stories,
            images: ctx.story_images,
            spinner_rotation: ctx.spinner_rotation,
        }),
    );
    let gallery = gallery::view(gallery::ViewContext {
        i18n: ctx.i18n,
        gallery: ctx.gallery,
        tiles: ctx.tiles,
        proximity: ctx.proximity,
        window_width: ctx.window_width,
        spinner_rotation: ctx.spinner_rotation,
    });
    let download = download::view(ctx.i18n, ctx.download_busy, ctx.spinner_rotation);

    let page = Column::new()
        .width(Length::Fill)
        .push(hero)
        .push(film)
        .push(stories)
        .push(gallery)
        .push(download);

    container(
        scrollable(page)
            .id(Id::new(PAGE_SCROLL_ID))
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(styles::container::page)
    .into()
}

fn measured<'a>(section: Section, content: Element<'a, Message>) -> Element<'a, Message> {
    sensor(content)
        .on_show(move |size| Message::SectionMeasured(section, size.height))
        .on_resize(move |size| Message::SectionMeasured(section, size.height))
        .into()
}
