// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::DownloadOutcome;
use crate::error::Error;
use crate::media::{ImageData, ImageKind};
use crate::ui::album;
use crate::ui::gate_screen;
use crate::ui::lightbox;
use crate::ui::notifications;
use crate::video_player::PlaybackMessage;
use iced::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gate(gate_screen::Message),
    Album(album::Message),
    Lightbox(lightbox::Message),
    Notification(notifications::NotificationMessage),
    /// Event from the film playback session.
    Playback(PlaybackMessage),
    /// A fetch started by the media loader finished.
    ImageFetched {
        url: String,
        kind: ImageKind,
        result: Result<ImageData, Error>,
    },
    /// The simulated preparation delay of the download elapsed.
    DownloadPrepared,
    /// Result from the save dialog.
    DownloadDestination(Option<PathBuf>),
    DownloadFinished(DownloadOutcome),
    WindowResized(Size),
    /// Advance the loading spinners.
    SpinnerTick,
    /// Display refresh while a fade is running.
    AnimationFrame(Instant),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
    /// Copy the diagnostics report to the clipboard (Ctrl+Shift+D).
    ExportDiagnostics,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional configuration file, taking precedence over
    /// `EVERLASTING_MOMENTS_CONFIG_DIR` and the platform directory.
    pub config_path: Option<PathBuf>,
}
