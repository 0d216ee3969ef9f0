// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The cpal stream lives on its own thread for its whole life; the handle
//! only shares the sample queue and a few atomics with the device callback.

use super::Volume;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{mpsc, Arc, Mutex};

/// Sample format and channel count the decoder must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

/// State read by the device callback.
struct SharedState {
    /// Perceptual gain stored as `f32` bits.
    gain_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
    buffer: Mutex<VecDeque<f32>>,
    /// About one second of interleaved samples.
    capacity: usize,
}

impl SharedState {
    fn new(volume: Volume, capacity: usize) -> Self {
        Self {
            gain_bits: AtomicU32::new(volume.gain().to_bits()),
            muted: AtomicBool::new(false),
            paused: AtomicBool::new(true),
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn gain(&self) -> f32 {
        f32::from_bits(self.gain_bits.load(Ordering::Relaxed))
    }

    /// Queues samples, dropping what does not fit.
    fn push(&self, samples: &[f32]) {
        if let Ok(mut buffer) = self.buffer.lock() {
            let room = self.capacity.saturating_sub(buffer.len());
            buffer.extend(samples.iter().take(room));
        }
    }

    fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    /// Fills one device buffer. Silence when paused, muted or starved.
    fn fill(&self, out: &mut [f32]) {
        let silent = self.muted.load(Ordering::Relaxed) || self.paused.load(Ordering::Relaxed);
        let Ok(mut buffer) = self.buffer.lock() else {
            out.fill(0.0);
            return;
        };
        if silent {
            out.fill(0.0);
            return;
        }
        let gain = self.gain();
        for sample in out.iter_mut() {
            // Just below 1.0 so integer formats do not overflow.
            *sample = buffer
                .pop_front()
                .map_or(0.0, |s| (s * gain).clamp(-1.0, 0.999_999_9));
        }
    }
}

/// Handle to the system's default output device.
///
/// Dropping the handle stops the stream and ends its thread.
pub struct AudioOutput {
    shared: Arc<SharedState>,
    config: AudioOutputConfig,
    /// Dropped with the handle, which releases the stream thread.
    _stop: mpsc::Sender<()>,
}

impl AudioOutput {
    /// Opens the default output device, paused.
    ///
    /// # Errors
    ///
    /// Returns an error if no output device exists or the stream cannot
    /// be built or started.
    pub fn new(volume: Volume) -> Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(AudioOutputConfig, Arc<SharedState>)>>();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        std::thread::Builder::new()
            .name("film-audio".into())
            .spawn(move || match open_stream(volume) {
                Ok((stream, config, shared)) => {
                    if ready_tx.send(Ok((config, shared))).is_ok() {
                        // Blocks until the handle is dropped.
                        let _ = stop_rx.recv();
                    }
                    drop(stream);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(|e| Error::Io(format!("Failed to spawn audio thread: {e}")))?;

        let (config, shared) = ready_rx
            .recv()
            .map_err(|_| Error::Io("Audio thread ended before the stream opened".into()))??;

        Ok(Self {
            shared,
            config,
            _stop: stop_tx,
        })
    }

    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    /// Queues interleaved samples in the output format.
    pub fn play(&self, samples: &[f32]) {
        self.shared.push(samples);
    }

    pub fn pause(&self) {
        self.shared.paused.store(true, Ordering::Relaxed);
    }

    pub fn resume(&self) {
        self.shared.paused.store(false, Ordering::Relaxed);
    }

    /// Drops queued samples, for seeks.
    pub fn clear(&self) {
        self.shared.clear();
    }

    pub fn set_volume(&self, volume: Volume) {
        self.shared
            .gain_bits
            .store(volume.gain().to_bits(), Ordering::Relaxed);
    }

    pub fn set_muted(&self, muted: bool) {
        self.shared.muted.store(muted, Ordering::Relaxed);
    }
}

type OpenedStream = (cpal::Stream, AudioOutputConfig, Arc<SharedState>);

fn open_stream(volume: Volume) -> Result<OpenedStream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;
    let supported_config = device
        .default_output_config()
        .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

    let config = AudioOutputConfig {
        sample_rate: supported_config.sample_rate().0,
        channels: supported_config.channels(),
    };
    let capacity = config.sample_rate as usize * usize::from(config.channels);
    let shared = Arc::new(SharedState::new(volume, capacity));

    let stream_config: cpal::StreamConfig = supported_config.clone().into();
    let stream = match supported_config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, &shared)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, &shared)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, &shared)?,
        _ => return Err(Error::Io("Unsupported audio sample format".to_string())),
    };
    stream
        .play()
        .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

    Ok((stream, config, shared))
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: &Arc<SharedState>,
) -> Result<cpal::Stream> {
    let shared = Arc::clone(shared);
    let mut scratch: Vec<f32> = Vec::new();
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                shared.fill(&mut scratch);
                for (out, sample) in data.iter_mut().zip(&scratch) {
                    *out = T::from_sample(*sample);
                }
            },
            |err| {
                eprintln!("Audio output error: {err}");
            },
            None,
        )
        .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(capacity: usize) -> SharedState {
        let state = SharedState::new(Volume::new(1.0), capacity);
        state.paused.store(false, Ordering::Relaxed);
        state
    }

    #[test]
    fn starts_paused_and_silent() {
        let state = SharedState::new(Volume::new(1.0), 8);
        state.push(&[0.5, 0.5]);
        let mut out = [1.0; 2];
        state.fill(&mut out);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn fill_drains_queue_then_pads_with_silence() {
        let state = playing(8);
        state.push(&[0.25, -0.25]);
        let mut out = [1.0; 4];
        state.fill(&mut out);
        assert_eq!(out, [0.25, -0.25, 0.0, 0.0]);
    }

    #[test]
    fn queue_is_capped() {
        let state = playing(3);
        state.push(&[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(state.buffer.lock().map(|b| b.len()).unwrap_or(0), 3);
    }

    #[test]
    fn muting_keeps_samples_queued() {
        let state = playing(4);
        state.push(&[0.5]);
        state.muted.store(true, Ordering::Relaxed);
        let mut out = [1.0];
        state.fill(&mut out);
        assert_eq!(out, [0.0]);
        assert_eq!(state.buffer.lock().map(|b| b.len()).unwrap_or(0), 1);
    }

    #[test]
    fn gain_follows_the_perceptual_curve() {
        let state = SharedState::new(Volume::new(0.5), 4);
        state.paused.store(false, Ordering::Relaxed);
        state.push(&[1.0]);
        let mut out = [0.0];
        state.fill(&mut out);
        assert!((out[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn clear_discards_pending_samples() {
        let state = playing(4);
        state.push(&[0.5, 0.5]);
        state.clear();
        let mut out = [1.0];
        state.fill(&mut out);
        assert_eq!(out, [0.0]);
    }
}
