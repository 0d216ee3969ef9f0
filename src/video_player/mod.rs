// SPDX-License-Identifier: MPL-2.0
//! Film playback for the album's film panel.
//!
//! FFmpeg decodes video frames and the soundtrack on blocking threads, cpal
//! plays the soundtrack, and an Iced subscription ties both to the UI.

mod audio;
mod audio_output;
mod decoder;
mod state;
mod subscription;
mod volume;

pub use state::{FilmPlayer, PlaybackState};
pub use subscription::{film_playback, CommandSender, FilmSource, PlaybackMessage, PlayerCommand};
pub use volume::Volume;
