// SPDX-License-Identifier: MPL-2.0
//! Video frame decoder using FFmpeg.
//!
//! Decoding runs on a blocking thread and talks to the async side through
//! Tokio channels. FFmpeg opens the film locator directly, so remote
//! locators stream over the network without a local copy.

use crate::error::{Error, Result};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// FFmpeg timestamps for seeking are in microseconds.
const AV_TIME_BASE: f64 = 1_000_000.0;

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg and its network layer once per process.
pub(crate) fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }
        ffmpeg_next::format::network::init();
        // SAFETY: av_log_set_level only stores the global log threshold.
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// One decoded frame, already converted to RGBA.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Tightly packed RGBA pixels (width × height × 4 bytes).
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to the decoder thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderCommand {
    /// Start or resume paced decoding.
    Play,
    /// Stop sending frames, keep the position.
    Pause,
    /// Jump to a timestamp. A paused decoder shows one frame there.
    Seek { target_secs: f64 },
}

/// Events sent from the decoder thread.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// The stream opened; duration is `0.0` when the container does not say.
    Opened { duration_secs: f64 },
    FrameReady(DecodedFrame),
    EndOfStream,
    Error(String),
}

/// Handle to a running video decoder thread.
///
/// Dropping the handle closes the command channel, which ends the thread.
pub struct VideoDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl VideoDecoder {
    /// Spawns a decoder for `locator`. Opening failures arrive as
    /// [`DecoderEvent::Error`].
    #[must_use]
    pub fn spawn(locator: String) -> Self {
        // Events are bounded so a paused UI applies backpressure.
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = decoder_loop(&locator, command_rx, &event_tx) {
                let _ = event_tx.blocking_send(DecoderEvent::Error(e.to_string()));
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
            .map_err(|_| Error::Io("Video decoder is not running".into()))
    }

    /// Returns `None` once the decoder thread has ended.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }
}

#[allow(clippy::cast_possible_truncation)] // Seek targets are far below i64::MAX µs
fn seek_timestamp(target_secs: f64) -> i64 {
    (target_secs.max(0.0) * AV_TIME_BASE) as i64
}

#[allow(clippy::too_many_lines)] // Single decode state machine
#[allow(clippy::cast_precision_loss)] // i64 timestamps fit f64 for any real film
fn decoder_loop(
    locator: &str,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<DecoderEvent>,
) -> Result<()> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&locator)
        .map_err(|e| Error::Io(format!("Failed to open film: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| Error::Io("No video stream found".to_string()))?;
    let video_stream_index = input.index();
    let time_base = input.time_base();
    let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| Error::Io(format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| Error::Io(format!("Failed to create scaler: {e}")))?;

    let duration_secs = if ictx.duration() > 0 {
        ictx.duration() as f64 / AV_TIME_BASE
    } else {
        0.0
    };
    if event_tx
        .blocking_send(DecoderEvent::Opened { duration_secs })
        .is_err()
    {
        return Ok(());
    }

    let mut is_playing = false;
    let mut playback_start: Option<Instant> = None;
    let mut first_pts: Option<f64> = None;
    let mut current_pts_secs = 0.0;
    // Decode one frame after a seek while paused.
    let mut decode_single_frame = false;

    loop {
        match command_rx.try_recv() {
            Ok(DecoderCommand::Play) => {
                if !is_playing && current_pts_secs > 0.0 {
                    let timestamp = seek_timestamp(current_pts_secs);
                    if ictx.seek(timestamp, ..timestamp).is_ok() {
                        decoder.flush();
                    }
                }
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
                let timestamp = seek_timestamp(target_secs);
                if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                    let _ = event_tx.blocking_send(DecoderEvent::Error(format!("Seek failed: {e}")));
                } else {
                    decoder.flush();
                    current_pts_secs = target_secs;
                    playback_start = Some(Instant::now());
                    first_pts = None;
                    decode_single_frame = !is_playing;
                }
            }
            Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !is_playing && !decode_single_frame {
            std::thread::sleep(Duration::from_millis(10));
            continue;
        }

        let mut frame_decoded = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != video_stream_index {
                continue;
            }
            if decoder.send_packet(&packet).is_err() {
                continue;
            }

            let mut decoded_frame = ffmpeg_next::frame::Video::empty();
            if decoder.receive_frame(&mut decoded_frame).is_err() {
                continue;
            }
            let mut rgba_frame = ffmpeg_next::frame::Video::empty();
            if let Err(e) = scaler.run(&decoded_frame, &mut rgba_frame) {
                let _ =
                    event_tx.blocking_send(DecoderEvent::Error(format!("Scaling failed: {e}")));
                continue;
            }

            let pts_secs = decoded_frame
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * time_base_f64);

            // Pace frames against the wall clock from the last (re)start.
            if let Some(start) = playback_start {
                let first = *first_pts.get_or_insert(pts_secs);
                let delay = (pts_secs - first).max(0.0);
                let target = start + Duration::from_secs_f64(delay);
                let now = Instant::now();
                if target > now {
                    std::thread::sleep(target - now);
                }
            }

            current_pts_secs = pts_secs;
            let frame = DecodedFrame {
                rgba: extract_rgba(&rgba_frame),
                width,
                height,
                pts_secs,
            };
            if event_tx
                .blocking_send(DecoderEvent::FrameReady(frame))
                .is_err()
            {
                return Ok(());
            }

            frame_decoded = true;
            decode_single_frame = false;
            break;
        }

        if !frame_decoded {
            if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                return Ok(());
            }
            is_playing = false;
            playback_start = None;
            first_pts = None;
            decode_single_frame = false;
        }
    }

    Ok(())
}

/// Copies the RGBA plane row by row, dropping the stride padding.
fn extract_rgba(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    pack_rows(
        frame.data(0),
        frame.stride(0),
        frame.width() as usize,
        frame.height() as usize,
    )
}

fn pack_rows(data: &[u8], stride: usize, width: usize, height: usize) -> Vec<u8> {
    let row_bytes = width * 4;
    let mut rgba = Vec::with_capacity(row_bytes * height);
    for row in 0..height {
        let start = row * stride;
        match data.get(start..start + row_bytes) {
            Some(bytes) => rgba.extend_from_slice(bytes),
            None => break,
        }
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_rows_drops_stride_padding() {
        // 1×2 image, stride 8: each row carries 4 bytes of padding.
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(pack_rows(&data, 8, 1, 2), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn pack_rows_stops_at_short_buffer() {
        let data = [1, 2, 3, 4];
        assert_eq!(pack_rows(&data, 4, 1, 3), vec![1, 2, 3, 4]);
    }

    #[test]
    fn seek_timestamp_is_microseconds() {
        assert_eq!(seek_timestamp(1.5), 1_500_000);
        assert_eq!(seek_timestamp(-3.0), 0);
    }

    #[tokio::test]
    async fn unreachable_film_reports_an_error() {
        let mut decoder = VideoDecoder::spawn("/nonexistent/film.mp4".to_string());
        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should answer");
        assert!(matches!(event, Some(DecoderEvent::Error(_))));
    }
}
