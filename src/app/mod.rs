// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gate, the album
//! page and the lightbox.
//!
//! The `App` struct wires together the domains (gate, gallery filter, media
//! loader, download workflow, localization) and translates messages into
//! side effects like HTTP fetches, timers, dialogs and clipboard writes.
//! Policy decisions (window size, fallback content, what is logged) live
//! close to the main update loop so user-facing behavior is easy to audit.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::application::{DownloadAction, GalleryFilter};
use crate::config::{self, Config, HERO_FADE_IN};
use crate::diagnostics::DiagnosticsCollector;
use crate::domain::{Catalog, Gate};
use crate::i18n::fluent::I18n;
use crate::media::{fetch, MediaLoader};
use crate::ui::album::SectionHeights;
use crate::ui::gate_screen::{self, PASSWORD_INPUT_ID};
use crate::ui::lightbox::{self, Fade, TokenSource};
use crate::ui::notifications::{self, Notification};
use crate::ui::state::ScrollLock;
use crate::video_player::{self, FilmPlayer};
use iced::widget::{operation, Id};
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    gate: Gate,
    gate_state: gate_screen::State,
    gallery: GalleryFilter,
    media: MediaLoader,
    client: reqwest::Client,
    hero_fade: Fade,
    film: FilmPlayer,
    section_heights: SectionHeights,
    lightbox: Option<lightbox::State>,
    /// Timer tokens stay unique across lightbox sessions.
    timer_tokens: TokenSource,
    scroll_lock: ScrollLock,
    download: DownloadAction,
    window_size: Size,
    spinner_rotation: f32,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("category", &self.gallery.category())
            .field("lightbox", &self.lightbox)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 1280.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

/// Builds the window settings.
#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration and content, and focuses the password field.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_path.clone());
        let app = Self::with_config(config, flags.lang, config_warning);
        let focus = operation::focus(Id::new(PASSWORD_INPUT_ID));
        (app, focus)
    }

    /// Builds the initial state from an already loaded configuration.
    ///
    /// An invalid catalog falls back to the built-in content and a warning
    /// toast is queued.
    #[must_use]
    pub fn with_config(
        config: Config,
        lang: Option<String>,
        config_warning: Option<&'static str>,
    ) -> Self {
        let i18n = I18n::new(lang, &config);
        let diagnostics = DiagnosticsCollector::default();
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(diagnostics.handle());

        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let catalog = match config.catalog() {
            Ok(catalog) => catalog,
            Err(error) => {
                notifications.push(
                    Notification::warning("notification-catalog-invalid")
                        .with_detail(error.to_string()),
                );
                Config::default().catalog().unwrap_or_default()
            }
        };
        let catalog = Arc::new(catalog);

        let media = MediaLoader::new(
            &catalog,
            config.media.hero_image_url.clone(),
            config.gallery.observes_visibility(),
            config.gallery.cache_capacity(),
        );

        Self {
            i18n,
            screen: Screen::Gate,
            gate: Gate::new(config.gate.secret.clone()),
            gate_state: gate_screen::State::default(),
            gallery: GalleryFilter::new(catalog),
            media,
            client: fetch::client(),
            hero_fade: Fade::settled(0.0, Instant::now()).over(HERO_FADE_IN),
            film: FilmPlayer::new(config.media.film_url.clone()),
            section_heights: SectionHeights::default(),
            lightbox: None,
            timer_tokens: TokenSource::new(),
            scroll_lock: ScrollLock::new(),
            download: DownloadAction::new(),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            spinner_rotation: 0.0,
            notifications,
            diagnostics,
            config,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.lightbox.is_some());
        let tick_sub = subscription::create_tick_subscription(
            self.is_loading(),
            self.is_animating(),
            self.notifications.has_notifications(),
        );

        let film_sub = self
            .film
            .source()
            .map_or_else(Subscription::none, |source| {
                video_player::film_playback(source).map(Message::Playback)
            });

        Subscription::batch([event_sub, tick_sub, film_sub])
    }

    /// Whether a spinner is on screen.
    fn is_loading(&self) -> bool {
        match self.screen {
            Screen::Gate => false,
            Screen::Album => {
                self.media.is_loading()
                    || self.download.is_busy()
                    || self.film.is_loading()
                    || self
                        .lightbox
                        .as_ref()
                        .is_some_and(|lightbox| lightbox.image().is_none())
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.hero_fade.is_running(Instant::now())
            || self
                .lightbox
                .as_ref()
                .is_some_and(lightbox::State::is_animating)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Gate(gate_message) => self.handle_gate_message(gate_message),
            Message::Album(album_message) => self.handle_album_message(album_message),
            Message::Lightbox(lightbox_message) => self.handle_lightbox_message(lightbox_message),
            Message::Playback(playback_message) => {
                self.handle_playback_message(playback_message);
                Task::none()
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::ImageFetched { url, kind, result } => {
                self.handle_image_fetched(&url, kind, result);
                Task::none()
            }
            Message::DownloadPrepared => self.handle_download_prepared(),
            Message::DownloadDestination(path) => self.handle_download_destination(path),
            Message::DownloadFinished(outcome) => {
                self.handle_download_finished(outcome);
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.handle(lightbox::Message::WindowResized(size));
                }
                Task::none()
            }
            Message::SpinnerTick => {
                self.spinner_rotation =
                    crate::ui::widgets::animated_spinner::advance(self.spinner_rotation);
                Task::none()
            }
            Message::AnimationFrame(now) => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.handle(lightbox::Message::AnimationFrame(now));
                }
                Task::none()
            }
            Message::Tick(now) => {
                self.notifications.tick(now);
                Task::none()
            }
            Message::ExportDiagnostics => self.handle_export_diagnostics(),
        };

        self.diagnostics.process_pending();
        task
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            gate_state: &self.gate_state,
            catalog: self.gallery.catalog(),
            gallery: &self.gallery,
            media: &self.media,
            hero_opacity: self.hero_fade.value(Instant::now()),
            film: &self.film,
            lightbox: self.lightbox.as_ref(),
            scroll_locked: self.scroll_lock.is_locked(),
            proximity: self.config.gallery.proximity_threshold().value(),
            download_busy: self.download.is_busy(),
            window_width: self.window_size.width,
            spinner_rotation: self.spinner_rotation,
            notifications: &self.notifications,
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryFilter {
        &self.gallery
    }

    #[must_use]
    pub fn lightbox(&self) -> Option<&lightbox::State> {
        self.lightbox.as_ref()
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn film(&self) -> &FilmPlayer {
        &self.film
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        self.gallery.catalog()
    }
}
