// SPDX-License-Identifier: MPL-2.0
//! Iced subscription that runs the film decoders.
//!
//! The subscription owns both decoders and the audio output. It hands the UI
//! a [`CommandSender`] first, then forwards decoded frames and playback
//! events as [`PlaybackMessage`]s.

use super::audio::{AudioDecoder, AudioDecoderEvent};
use super::audio_output::AudioOutput;
use super::decoder::{DecoderCommand, DecoderEvent, VideoDecoder};
use super::Volume;
use iced::futures::SinkExt;
use iced::widget::image;
use iced::{stream, Subscription};
use std::fmt;
use tokio::sync::mpsc;

/// Identifies one playback session.
///
/// A new session id restarts the subscription, and with it the decoders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilmSource {
    pub session: u64,
    pub locator: String,
}

/// Commands the UI sends to a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Seek { target_secs: f64 },
    SetVolume(Volume),
    SetMuted(bool),
}

/// Cloneable handle for commanding a running session.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl CommandSender {
    /// Returns false once the session has ended.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    #[cfg(test)]
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<PlayerCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Messages produced by a playback session.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// The session is ready for commands.
    Started(CommandSender),
    /// The film opened. Duration is `0.0` when unknown.
    Opened { duration_secs: f64 },
    Frame { handle: image::Handle, pts_secs: f64 },
    EndOfStream,
    Error(String),
}

/// Runs the playback session for `source`.
pub fn film_playback(source: FilmSource) -> Subscription<PlaybackMessage> {
    Subscription::run_with(source, |source| {
        let locator = source.locator.clone();
        stream::channel(32, move |mut output: iced::futures::channel::mpsc::Sender<PlaybackMessage>| async move {
            let (command_tx, mut command_rx) = mpsc::unbounded_channel();
            let mut video = VideoDecoder::spawn(locator.clone());

            let audio_output = match tokio::task::spawn_blocking(|| {
                AudioOutput::new(Volume::default())
            })
            .await
            {
                Ok(Ok(audio_output)) => Some(audio_output),
                Ok(Err(e)) => {
                    eprintln!("Film audio disabled: {e}");
                    None
                }
                Err(e) => {
                    eprintln!("Film audio disabled: {e}");
                    None
                }
            };
            let mut audio = audio_output
                .as_ref()
                .map(|out| AudioDecoder::spawn(locator, out.config()));

            let _ = output
                .send(PlaybackMessage::Started(CommandSender { tx: command_tx }))
                .await;

            loop {
                tokio::select! {
                    command = command_rx.recv() => {
                        let Some(command) = command else { break };
                        if let Some(out) = audio_output.as_ref() {
                            apply_to_output(out, command);
                        }
                        if let Some(decoder_command) = decoder_command(command) {
                            if let Some(audio) = audio.as_ref() {
                                let _ = audio.send_command(decoder_command);
                            }
                            if let Err(e) = video.send_command(decoder_command) {
                                let _ = output.send(PlaybackMessage::Error(e.to_string())).await;
                            }
                        }
                    }

                    event = video.recv_event() => {
                        let Some(event) = event else { break };
                        let message = match event {
                            DecoderEvent::Opened { duration_secs } => {
                                PlaybackMessage::Opened { duration_secs }
                            }
                            DecoderEvent::FrameReady(frame) => PlaybackMessage::Frame {
                                handle: image::Handle::from_rgba(frame.width, frame.height, frame.rgba),
                                pts_secs: frame.pts_secs,
                            },
                            DecoderEvent::EndOfStream => {
                                if let Some(out) = audio_output.as_ref() {
                                    out.pause();
                                }
                                PlaybackMessage::EndOfStream
                            }
                            DecoderEvent::Error(message) => PlaybackMessage::Error(message),
                        };
                        let _ = output.send(message).await;
                    }

                    Some(event) = async {
                        match audio.as_mut() {
                            Some(audio) => audio.recv_event().await,
                            None => std::future::pending::<Option<AudioDecoderEvent>>().await,
                        }
                    } => {
                        match event {
                            AudioDecoderEvent::BufferReady(samples) => {
                                if let Some(out) = audio_output.as_ref() {
                                    out.play(&samples);
                                }
                            }
                            AudioDecoderEvent::EndOfStream => {}
                            AudioDecoderEvent::Error(message) => {
                                eprintln!("Film audio error: {message}");
                            }
                        }
                    }
                }
            }

            // Keep the subscription alive but idle until it is dropped.
            std::future::pending::<()>().await;
        })
    })
}

/// Applies the output-side part of a command.
fn apply_to_output(out: &AudioOutput, command: PlayerCommand) {
    match command {
        PlayerCommand::Play => out.resume(),
        PlayerCommand::Pause => out.pause(),
        PlayerCommand::Seek { .. } => out.clear(),
        PlayerCommand::SetVolume(volume) => out.set_volume(volume),
        PlayerCommand::SetMuted(muted) => out.set_muted(muted),
    }
}

/// The decoder-side part of a command, if any.
fn decoder_command(command: PlayerCommand) -> Option<DecoderCommand> {
    match command {
        PlayerCommand::Play => Some(DecoderCommand::Play),
        PlayerCommand::Pause => Some(DecoderCommand::Pause),
        PlayerCommand::Seek { target_secs } => Some(DecoderCommand::Seek { target_secs }),
        PlayerCommand::SetVolume(_) | PlayerCommand::SetMuted(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_commands_reach_the_decoders() {
        assert_eq!(decoder_command(PlayerCommand::Play), Some(DecoderCommand::Play));
        assert_eq!(
            decoder_command(PlayerCommand::Seek { target_secs: 4.0 }),
            Some(DecoderCommand::Seek { target_secs: 4.0 })
        );
    }

    #[test]
    fn mixer_commands_stay_on_the_output() {
        assert_eq!(decoder_command(PlayerCommand::SetMuted(true)), None);
        assert_eq!(decoder_command(PlayerCommand::SetVolume(Volume::new(0.3))), None);
    }

    #[test]
    fn sender_reports_a_closed_session() {
        let (sender, receiver) = CommandSender::channel();
        assert!(sender.send(PlayerCommand::Play));
        drop(receiver);
        assert!(!sender.send(PlayerCommand::Pause));
        assert!(format!("{sender:?}").contains("closed: true"));
    }

    #[test]
    fn sessions_are_told_apart() {
        let first = FilmSource {
            session: 1,
            locator: "film.mp4".into(),
        };
        let second = FilmSource {
            session: 2,
            ..first.clone()
        };
        assert_ne!(first, second);
    }
}
