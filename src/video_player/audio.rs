// SPDX-License-Identifier: MPL-2.0
//! Soundtrack decoding with FFmpeg.
//!
//! Samples are resampled to the output device's rate and channel count and
//! queued slightly ahead of the wall clock so the device never starves.

use super::audio_output::AudioOutputConfig;
use super::decoder::{init_ffmpeg, DecoderCommand};
use crate::error::{Error, Result};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Audio is queued this far ahead of its presentation time.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

/// FFmpeg seek timestamps are in microseconds.
const AV_TIME_BASE: f64 = 1_000_000.0;

/// Events sent from the audio decoder thread.
#[derive(Debug, Clone)]
pub enum AudioDecoderEvent {
    /// Interleaved `f32` samples in the output format.
    BufferReady(Vec<f32>),
    EndOfStream,
    Error(String),
}

/// Handle to a running soundtrack decoder thread.
///
/// The decoder shares [`DecoderCommand`] with the video decoder so one
/// command can drive both.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<AudioDecoderEvent>,
}

impl AudioDecoder {
    /// Spawns a decoder for the soundtrack of `locator`.
    ///
    /// A film without audio ends the thread quietly; [`Self::recv_event`]
    /// then returns `None`.
    #[must_use]
    pub fn spawn(locator: String, output: AudioOutputConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(8);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = decoder_loop(&locator, output, command_rx, &event_tx) {
                let _ = event_tx.blocking_send(AudioDecoderEvent::Error(e.to_string()));
            }
        });

        Self {
            command_tx,
            event_rx,
        }
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Audio decoder is not running".into()))
    }

    pub async fn recv_event(&mut self) -> Option<AudioDecoderEvent> {
        self.event_rx.recv().await
    }
}

#[allow(clippy::too_many_lines)] // Single decode state machine
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn decoder_loop(
    locator: &str,
    output: AudioOutputConfig,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<AudioDecoderEvent>,
) -> Result<()> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&locator)
        .map_err(|e| Error::Io(format!("Failed to open film: {e}")))?;

    let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
        return Ok(());
    };
    let audio_stream_index = input.index();
    let time_base = input.time_base();
    let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .audio()
        .map_err(|e| Error::Io(format!("Failed to create audio decoder: {e}")))?;

    let output_layout = match output.channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        // Anything wider is downmixed to stereo.
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };
    let output_channels: u16 = if output.channels == 1 { 1 } else { 2 };

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        output_layout,
        output.sample_rate,
    )
    .map_err(|e| Error::Io(format!("Failed to create resampler: {e}")))?;

    let mut is_playing = false;
    let mut playback_start: Option<Instant> = None;
    let mut first_pts: Option<f64> = None;
    // Frames ending before this are skipped after a seek.
    let mut seek_target: Option<f64> = None;

    loop {
        match command_rx.try_recv() {
            Ok(DecoderCommand::Play) => {
                is_playing = true;
                playback_start = Some(Instant::now());
                first_pts = None;
            }
            Ok(DecoderCommand::Pause) => {
                is_playing = false;
                playback_start = None;
                first_pts = None;
            }
            Ok(DecoderCommand::Seek { target_secs }) => {
                let timestamp = (target_secs.max(0.0) * AV_TIME_BASE) as i64;
                if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                    let _ = event_tx
                        .blocking_send(AudioDecoderEvent::Error(format!("Audio seek failed: {e}")));
                } else {
                    decoder.flush();
                    seek_target = Some(target_secs);
                    playback_start = Some(Instant::now());
                    first_pts = None;
                }
            }
            Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !is_playing {
            std::thread::sleep(Duration::from_millis(10));
            continue;
        }

        let mut frame_decoded = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }
            if decoder.send_packet(&packet).is_err() {
                continue;
            }

            let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
            if decoder.receive_frame(&mut decoded_frame).is_err() {
                continue;
            }
            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = resampler.run(&decoded_frame, &mut resampled) {
                let _ = event_tx
                    .blocking_send(AudioDecoderEvent::Error(format!("Resampling failed: {e}")));
                continue;
            }

            let samples = packed_f32(resampled.data(0), resampled.samples(), output_channels);
            let pts_secs = decoded_frame
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * time_base_f64);
            let frame_secs = samples.len() as f64
                / (f64::from(output.sample_rate) * f64::from(output_channels));

            if let Some(target) = seek_target {
                if pts_secs + frame_secs < target {
                    continue;
                }
                first_pts = Some(target);
                seek_target = None;
            }

            if let Some(start) = playback_start {
                let first = *first_pts.get_or_insert(pts_secs);
                let delay = pts_secs - first - AUDIO_LOOKAHEAD_SECS;
                if delay > 0.0 {
                    let target = start + Duration::from_secs_f64(delay);
                    let now = Instant::now();
                    if target > now {
                        std::thread::sleep(target - now);
                    }
                }
            }

            if event_tx
                .blocking_send(AudioDecoderEvent::BufferReady(samples))
                .is_err()
            {
                return Ok(());
            }
            frame_decoded = true;
            break;
        }

        if !frame_decoded {
            if event_tx.blocking_send(AudioDecoderEvent::EndOfStream).is_err() {
                return Ok(());
            }
            is_playing = false;
            playback_start = None;
            first_pts = None;
        }
    }

    Ok(())
}

/// Reads interleaved native-endian `f32` samples from a packed plane.
fn packed_f32(data: &[u8], frames: usize, channels: u16) -> Vec<f32> {
    let count = frames * usize::from(channels);
    data.chunks_exact(4)
        .take(count)
        .map(|bytes| f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_samples_are_read_in_order() {
        let mut data = Vec::new();
        for sample in [0.5_f32, -0.25, 1.0, 0.0] {
            data.extend_from_slice(&sample.to_ne_bytes());
        }
        assert_eq!(packed_f32(&data, 2, 2), vec![0.5, -0.25, 1.0, 0.0]);
    }

    #[test]
    fn packed_samples_ignore_plane_padding() {
        let mut data = Vec::new();
        for sample in [0.5_f32, 0.75, 9.0, 9.0] {
            data.extend_from_slice(&sample.to_ne_bytes());
        }
        assert_eq!(packed_f32(&data, 2, 1), vec![0.5, 0.75]);
    }

    #[tokio::test]
    async fn unreachable_film_reports_an_error() {
        let output = AudioOutputConfig {
            sample_rate: 48_000,
            channels: 2,
        };
        let mut decoder = AudioDecoder::spawn("/nonexistent/film.mp4".to_string(), output);
        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should answer");
        assert!(matches!(event, Some(AudioDecoderEvent::Error(_))));
    }
}
