// SPDX-License-Identifier: MPL-2.0
//! Playback state of the film panel.
//!
//! [`FilmPlayer`] is plain state: it records what the user asked for, sends
//! commands to the running session and folds [`PlaybackMessage`]s back in.
//! The decoders themselves live in the subscription returned by
//! [`FilmPlayer::source`].

use super::subscription::{CommandSender, FilmSource, PlaybackMessage, PlayerCommand};
use super::Volume;
use iced::widget::image;

/// Where the film is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// Nothing decoded yet, the poster is shown.
    Idle,
    /// A session is opening the film.
    Loading,
    Playing { position_secs: f64 },
    Paused { position_secs: f64 },
    /// The last frame was shown. Play starts over.
    Ended,
    Error { message: String },
}

impl PlaybackState {
    #[must_use]
    pub fn position(&self) -> Option<f64> {
        match self {
            Self::Playing { position_secs } | Self::Paused { position_secs } => {
                Some(*position_secs)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// The film panel's player.
#[derive(Debug)]
pub struct FilmPlayer {
    locator: String,
    /// Increments on every fresh start; `0` before the first.
    session: u64,
    active: bool,
    state: PlaybackState,
    duration_secs: f64,
    frame: Option<image::Handle>,
    /// Timeline position while the slider is dragged.
    seek_preview: Option<f64>,
    volume: Volume,
    muted: bool,
    sender: Option<CommandSender>,
}

impl FilmPlayer {
    #[must_use]
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            session: 0,
            active: false,
            state: PlaybackState::Idle,
            duration_secs: 0.0,
            frame: None,
            seek_preview: None,
            volume: Volume::default(),
            muted: false,
            sender: None,
        }
    }

    /// The running session, if any. Feed it to [`super::film_playback`].
    #[must_use]
    pub fn source(&self) -> Option<FilmSource> {
        self.active.then(|| FilmSource {
            session: self.session,
            locator: self.locator.clone(),
        })
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> Option<&image::Handle> {
        self.frame.as_ref()
    }

    /// Duration in seconds, `0.0` until known.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration_secs
    }

    /// Position shown on the timeline, following a drag in progress.
    #[must_use]
    pub fn display_position(&self) -> f64 {
        self.seek_preview
            .or_else(|| self.state.position())
            .unwrap_or(match self.state {
                PlaybackState::Ended => self.duration_secs,
                _ => 0.0,
            })
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == PlaybackState::Loading
    }

    /// Play or pause, starting a session when none runs.
    pub fn toggle(&mut self) {
        match self.state.clone() {
            PlaybackState::Idle | PlaybackState::Error { .. } => self.start(),
            PlaybackState::Loading => {}
            PlaybackState::Playing { position_secs } => {
                self.send(PlayerCommand::Pause);
                self.state = PlaybackState::Paused { position_secs };
            }
            PlaybackState::Paused { position_secs } => {
                self.send(PlayerCommand::Play);
                self.state = PlaybackState::Playing { position_secs };
            }
            PlaybackState::Ended => {
                if self.sender.is_some() {
                    self.send(PlayerCommand::Seek { target_secs: 0.0 });
                    self.send(PlayerCommand::Play);
                    self.state = PlaybackState::Playing { position_secs: 0.0 };
                } else {
                    self.start();
                }
            }
        }
    }

    /// Folds one session message into the state.
    pub fn handle(&mut self, message: PlaybackMessage) {
        if !self.active {
            return;
        }
        match message {
            PlaybackMessage::Started(sender) => {
                self.sender = Some(sender);
                self.send(PlayerCommand::SetVolume(self.volume));
                self.send(PlayerCommand::SetMuted(self.muted));
                self.send(PlayerCommand::Play);
            }
            PlaybackMessage::Opened { duration_secs } => {
                self.duration_secs = duration_secs.max(0.0);
            }
            PlaybackMessage::Frame { handle, pts_secs } => {
                self.frame = Some(handle);
                self.state = match self.state {
                    PlaybackState::Paused { .. } => PlaybackState::Paused {
                        position_secs: pts_secs,
                    },
                    _ => PlaybackState::Playing {
                        position_secs: pts_secs,
                    },
                };
            }
            PlaybackMessage::EndOfStream => {
                self.state = PlaybackState::Ended;
            }
            PlaybackMessage::Error(message) => {
                self.stop();
                self.state = PlaybackState::Error { message };
            }
        }
    }

    /// Moves the timeline thumb without seeking yet.
    pub fn seek_preview(&mut self, position_secs: f64) {
        self.seek_preview = Some(self.clamp_position(position_secs));
    }

    /// Seeks to the previewed position once the slider is released.
    pub fn seek_commit(&mut self) {
        let Some(target_secs) = self.seek_preview.take() else {
            return;
        };
        if self.sender.is_none() {
            return;
        }
        self.send(PlayerCommand::Seek { target_secs });
        self.state = match self.state {
            PlaybackState::Playing { .. } => PlaybackState::Playing {
                position_secs: target_secs,
            },
            _ => PlaybackState::Paused {
                position_secs: target_secs,
            },
        };
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = Volume::new(volume);
        self.send(PlayerCommand::SetVolume(self.volume));
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.send(PlayerCommand::SetMuted(self.muted));
    }

    fn start(&mut self) {
        self.session += 1;
        self.active = true;
        self.sender = None;
        self.seek_preview = None;
        self.state = PlaybackState::Loading;
    }

    fn stop(&mut self) {
        self.active = false;
        self.sender = None;
        self.seek_preview = None;
    }

    fn send(&mut self, command: PlayerCommand) {
        if let Some(sender) = self.sender.as_ref() {
            if !sender.send(command) {
                self.sender = None;
            }
        }
    }

    fn clamp_position(&self, position_secs: f64) -> f64 {
        if self.duration_secs > 0.0 {
            position_secs.clamp(0.0, self.duration_secs)
        } else {
            position_secs.max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    const FILM: &str = "https://example.com/film.mp4";

    fn frame(pts_secs: f64) -> PlaybackMessage {
        PlaybackMessage::Frame {
            handle: image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            pts_secs,
        }
    }

    fn drain(rx: &mut UnboundedReceiver<PlayerCommand>) -> Vec<PlayerCommand> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    /// A player whose session is open and showing a frame at `pts_secs`.
    fn playing_at(pts_secs: f64) -> (FilmPlayer, UnboundedReceiver<PlayerCommand>) {
        let mut player = FilmPlayer::new(FILM);
        player.toggle();
        let (sender, mut rx) = CommandSender::channel();
        player.handle(PlaybackMessage::Started(sender));
        player.handle(PlaybackMessage::Opened {
            duration_secs: 60.0,
        });
        player.handle(frame(pts_secs));
        drain(&mut rx);
        (player, rx)
    }

    #[test]
    fn idle_player_has_no_session() {
        let player = FilmPlayer::new(FILM);
        assert_eq!(player.state(), &PlaybackState::Idle);
        assert!(player.source().is_none());
        assert!(player.frame().is_none());
    }

    #[test]
    fn first_toggle_opens_a_session() {
        let mut player = FilmPlayer::new(FILM);
        player.toggle();
        assert!(player.is_loading());
        let source = player.source().expect("session");
        assert_eq!(source.session, 1);
        assert_eq!(source.locator, FILM);
    }

    #[test]
    fn started_session_receives_mixer_then_play() {
        let mut player = FilmPlayer::new(FILM);
        player.set_volume(0.4);
        player.toggle_mute();
        player.toggle();
        let (sender, mut rx) = CommandSender::channel();
        player.handle(PlaybackMessage::Started(sender));
        assert_eq!(
            drain(&mut rx),
            vec![
                PlayerCommand::SetVolume(Volume::new(0.4)),
                PlayerCommand::SetMuted(true),
                PlayerCommand::Play,
            ]
        );
    }

    #[test]
    fn first_frame_starts_playing() {
        let (player, _rx) = playing_at(0.04);
        assert_eq!(
            player.state(),
            &PlaybackState::Playing {
                position_secs: 0.04
            }
        );
        assert!(player.frame().is_some());
        assert!((player.duration() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let (mut player, mut rx) = playing_at(5.0);
        player.toggle();
        assert_eq!(
            player.state(),
            &PlaybackState::Paused { position_secs: 5.0 }
        );
        player.toggle();
        assert!(player.state().is_playing());
        assert_eq!(drain(&mut rx), vec![PlayerCommand::Pause, PlayerCommand::Play]);
    }

    #[test]
    fn seek_waits_for_slider_release() {
        let (mut player, mut rx) = playing_at(5.0);
        player.seek_preview(30.0);
        assert!(drain(&mut rx).is_empty());
        assert!((player.display_position() - 30.0).abs() < f64::EPSILON);

        player.seek_commit();
        assert_eq!(
            drain(&mut rx),
            vec![PlayerCommand::Seek { target_secs: 30.0 }]
        );
        assert_eq!(
            player.state(),
            &PlaybackState::Playing {
                position_secs: 30.0
            }
        );
    }

    #[test]
    fn seek_preview_is_clamped_to_the_film() {
        let (mut player, _rx) = playing_at(1.0);
        player.seek_preview(500.0);
        assert!((player.display_position() - 60.0).abs() < f64::EPSILON);
        player.seek_preview(-2.0);
        assert!(player.display_position().abs() < f64::EPSILON);
    }

    #[test]
    fn paused_seek_stays_paused() {
        let (mut player, _rx) = playing_at(5.0);
        player.toggle();
        player.seek_preview(10.0);
        player.seek_commit();
        player.handle(frame(10.0));
        assert_eq!(
            player.state(),
            &PlaybackState::Paused {
                position_secs: 10.0
            }
        );
    }

    #[test]
    fn ended_film_replays_from_the_start() {
        let (mut player, mut rx) = playing_at(59.9);
        player.handle(PlaybackMessage::EndOfStream);
        assert_eq!(player.state(), &PlaybackState::Ended);
        assert!((player.display_position() - 60.0).abs() < f64::EPSILON);

        player.toggle();
        assert_eq!(
            drain(&mut rx),
            vec![PlayerCommand::Seek { target_secs: 0.0 }, PlayerCommand::Play]
        );
        assert_eq!(player.source().map(|s| s.session), Some(1));
    }

    #[test]
    fn error_ends_the_session_and_retry_opens_a_new_one() {
        let (mut player, _rx) = playing_at(2.0);
        player.handle(PlaybackMessage::Error("connection reset".into()));
        assert!(player.source().is_none());
        assert_eq!(
            player.state(),
            &PlaybackState::Error {
                message: "connection reset".into()
            }
        );

        player.toggle();
        assert_eq!(player.source().map(|s| s.session), Some(2));
    }

    #[test]
    fn messages_without_a_session_are_ignored() {
        let mut player = FilmPlayer::new(FILM);
        player.handle(frame(3.0));
        assert_eq!(player.state(), &PlaybackState::Idle);
        assert!(player.frame().is_none());
    }

    #[test]
    fn mixer_changes_reach_a_running_session() {
        let (mut player, mut rx) = playing_at(1.0);
        player.set_volume(2.0);
        player.toggle_mute();
        assert_eq!(
            drain(&mut rx),
            vec![
                PlayerCommand::SetVolume(Volume::new(1.0)),
                PlayerCommand::SetMuted(true),
            ]
        );
        assert!(player.is_muted());
    }
}
