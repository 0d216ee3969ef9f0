// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Every handler mutates `App` synchronously and returns the asynchronous
//! work (fetches, timers, dialogs, transfers) as a [`Task`].

use super::{App, Message, Screen};
use crate::application::{Direction, DownloadOutcome};
use crate::config::DOWNLOAD_PREPARE_DELAY;
use crate::diagnostics::UserAction;
use crate::error::Error;
use crate::media::{fetch, FetchRequest, ImageData, ImageKind};
use crate::ui::album::{self, film, PAGE_SCROLL_ID};
use crate::ui::gate_screen;
use crate::ui::lightbox::{self, Effect};
use crate::ui::notifications::Notification;
use crate::video_player::PlaybackMessage;
use iced::widget::{operation, scrollable::AbsoluteOffset, Id};
use iced::{clipboard, Task};
use std::path::PathBuf;
use std::time::Instant;

impl App {
    pub(super) fn handle_gate_message(&mut self, message: gate_screen::Message) -> Task<Message> {
        match gate_screen::update(&mut self.gate_state, &mut self.gate, message) {
            gate_screen::Event::None => Task::none(),
            gate_screen::Event::Rejected => {
                self.diagnostics
                    .log_action(UserAction::GateAttempt { success: false });
                Task::none()
            }
            gate_screen::Event::Unlocked => {
                self.diagnostics
                    .log_action(UserAction::GateAttempt { success: true });
                self.screen = Screen::Album;
                let requests = self.media.initial_requests();
                self.fetch_all(requests)
            }
        }
    }

    pub(super) fn handle_album_message(&mut self, message: album::Message) -> Task<Message> {
        match message {
            album::Message::ReliveStory => operation::scroll_to(
                Id::new(PAGE_SCROLL_ID),
                AbsoluteOffset {
                    x: 0.0,
                    y: self.section_heights.gallery_offset(),
                },
            ),
            album::Message::Film(film_message) => {
                self.handle_film_message(film_message);
                Task::none()
            }
            album::Message::CopyCeremonyLink => {
                self.diagnostics.log_action(UserAction::CopyLink);
                self.notifications
                    .push(Notification::info("notification-link-copied"));
                clipboard::write(self.config.media.ceremony_url.clone())
            }
            album::Message::FilterSelected(category) => {
                self.diagnostics.log_action(UserAction::FilterGallery {
                    filter: format!("{category:?}").to_lowercase(),
                });
                // A filter change ends any open session.
                self.lightbox = None;
                self.gallery.set_category(category);
                Task::none()
            }
            album::Message::OpenPhoto(index) => self.open_lightbox(index),
            album::Message::TileVisible(id) => {
                let requests = self.media.tile_visible(id);
                self.fetch_all(requests)
            }
            album::Message::SectionMeasured(section, height) => {
                self.section_heights.record(section, height);
                Task::none()
            }
            album::Message::Download => {
                if !self.download.request() {
                    return Task::none();
                }
                self.diagnostics.log_action(UserAction::StartDownload);
                Task::perform(tokio::time::sleep(DOWNLOAD_PREPARE_DELAY), |()| {
                    Message::DownloadPrepared
                })
            }
        }
    }

    fn open_lightbox(&mut self, index: usize) -> Task<Message> {
        if self.lightbox.is_some() {
            return Task::none();
        }
        if let Err(error) = self.gallery.open(index) {
            self.notifications
                .push(Notification::error(error.i18n_key()).with_detail(error.to_string()));
            return Task::none();
        }
        let Some(photo) = self.gallery.selected_photo().cloned() else {
            return Task::none();
        };

        self.diagnostics
            .log_action(UserAction::OpenLightbox { index });

        let (state, effect) = lightbox::State::open(
            &self.scroll_lock,
            &self.timer_tokens,
            &photo.image_url,
            &photo.alt,
            self.media.image_for(&photo),
            Some(self.window_size),
        );
        self.lightbox = Some(state);

        let request = self.media.request_full(&photo);
        let fetch = self.fetch_all(request);
        Task::batch([self.apply_lightbox_effect(effect), fetch])
    }

    pub(super) fn handle_lightbox_message(&mut self, message: lightbox::Message) -> Task<Message> {
        let Some(state) = self.lightbox.as_mut() else {
            return Task::none();
        };

        let action = match &message {
            lightbox::Message::Next | lightbox::Message::ArrowRight => {
                Some(UserAction::NavigateNext)
            }
            lightbox::Message::Previous | lightbox::Message::ArrowLeft => {
                Some(UserAction::NavigatePrevious)
            }
            lightbox::Message::Close | lightbox::Message::Escape => {
                Some(UserAction::CloseLightbox)
            }
            lightbox::Message::ZoomIn => Some(UserAction::ZoomIn),
            lightbox::Message::ZoomOut => Some(UserAction::ZoomOut),
            lightbox::Message::ResetZoom => Some(UserAction::ResetZoom),
            _ => None,
        };

        let effect = state.handle(message);
        if let Some(action) = action {
            self.diagnostics.log_action(action);
        }
        self.apply_lightbox_effect(effect)
    }

    fn apply_lightbox_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::Schedule { token, kind, after } => {
                Task::perform(tokio::time::sleep(after), move |()| {
                    Message::Lightbox(lightbox::Message::TimerFired { token, kind })
                })
            }
            Effect::Advance(direction) => self.advance_lightbox(direction),
            Effect::Closed => {
                self.lightbox = None;
                self.gallery.close();
                Task::none()
            }
        }
    }

    fn advance_lightbox(&mut self, direction: Direction) -> Task<Message> {
        self.gallery.step(direction);
        let Some(photo) = self.gallery.selected_photo().cloned() else {
            return Task::none();
        };
        let image = self.media.image_for(&photo);
        if let Some(state) = self.lightbox.as_mut() {
            state.show(&photo.image_url, &photo.alt, image);
        }
        let request = self.media.request_full(&photo);
        self.fetch_all(request)
    }

    fn handle_film_message(&mut self, message: film::Message) {
        match message {
            film::Message::TogglePlayback => {
                let action = if self.film.state().is_playing() {
                    UserAction::PauseFilm
                } else {
                    UserAction::PlayFilm
                };
                self.diagnostics.log_action(action);
                self.film.toggle();
            }
            film::Message::SeekPreview(position_secs) => self.film.seek_preview(position_secs),
            film::Message::SeekCommit => {
                self.diagnostics.log_action(UserAction::SeekFilm {
                    position_secs: self.film.display_position(),
                });
                self.film.seek_commit();
            }
            film::Message::SetVolume(volume) => self.film.set_volume(volume),
            film::Message::ToggleMute => self.film.toggle_mute(),
        }
    }

    pub(super) fn handle_playback_message(&mut self, message: PlaybackMessage) {
        if let PlaybackMessage::Error(error) = &message {
            self.diagnostics
                .handle()
                .log_error(format!("film playback failed: {error}"));
            eprintln!("Film playback failed: {error}");
        }
        self.film.handle(message);
    }

    pub(super) fn handle_image_fetched(
        &mut self,
        url: &str,
        kind: ImageKind,
        result: Result<ImageData, Error>,
    ) {
        if let Err(error) = &result {
            self.diagnostics
                .handle()
                .log_warning(format!("fetch of {url} failed: {error}"));
            eprintln!("Failed to load image {url}: {error}");
        }

        let hero_was_missing = self.media.hero().is_none();
        let Some(image) = self.media.fetched(url, kind, result) else {
            return;
        };

        if kind == ImageKind::Full {
            if let Some(state) = self.lightbox.as_mut() {
                state.image_loaded(url, image);
            }
        }
        if hero_was_missing && self.media.hero().is_some() {
            self.hero_fade.retarget(1.0, Instant::now());
        }
    }

    pub(super) fn handle_download_prepared(&mut self) -> Task<Message> {
        if !self.download.prepared() {
            return Task::none();
        }
        let title = self.i18n.tr("download-dialog-title");
        let file_name = self.config.media.download_file_name.clone();

        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title(title)
                    .set_file_name(file_name)
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::DownloadDestination,
        )
    }

    pub(super) fn handle_download_destination(
        &mut self,
        destination: Option<PathBuf>,
    ) -> Task<Message> {
        let Some(path) = destination else {
            return Task::done(Message::DownloadFinished(DownloadOutcome::Cancelled));
        };
        let client = self.client.clone();
        let url = self.config.media.download_url.clone();

        Task::perform(fetch::download_to_file(client, url, path), |result| {
            Message::DownloadFinished(match result {
                Ok(bytes) => DownloadOutcome::Saved { bytes },
                Err(error) => DownloadOutcome::Failed(error.to_string()),
            })
        })
    }

    pub(super) fn handle_download_finished(&mut self, outcome: DownloadOutcome) {
        if !self.download.finish() {
            return;
        }
        match outcome {
            DownloadOutcome::Saved { bytes } => self.notifications.push(
                Notification::success("notification-download-success")
                    .with_arg("size", format_size(bytes)),
            ),
            DownloadOutcome::Failed(reason) => self.notifications.push(
                Notification::error("notification-download-error").with_detail(reason),
            ),
            DownloadOutcome::Cancelled => {
                self.diagnostics.handle().log_state("download cancelled");
            }
        }
    }

    pub(super) fn handle_export_diagnostics(&mut self) -> Task<Message> {
        self.diagnostics.log_action(UserAction::ExportDiagnostics);
        self.diagnostics.process_pending();

        match self.diagnostics.export_json() {
            Ok(json) => {
                self.notifications
                    .push(Notification::success("notification-diagnostics-copied"));
                clipboard::write(json)
            }
            Err(error) => {
                self.notifications.push(
                    Notification::error("notification-diagnostics-error")
                        .with_detail(error.to_string()),
                );
                Task::none()
            }
        }
    }

    fn fetch_all(&self, requests: impl IntoIterator<Item = FetchRequest>) -> Task<Message> {
        Task::batch(requests.into_iter().map(|FetchRequest { url, kind }| {
            let client = self.client.clone();
            let target = url.clone();
            Task::perform(fetch::fetch_image(client, target, kind), move |result| {
                Message::ImageFetched { url, kind, result }
            })
        }))
    }
}

/// Formats a byte count for display (e.g. `1.5 MB`).
pub(super) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sizes_are_whole_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn larger_sizes_use_one_decimal() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
