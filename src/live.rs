use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, SampleRate, StreamConfig};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use assert_no_alloc::*;

use crate::sink::AudioSink;
use crate::{Error, Result};

#[cfg(debug_assertions)] // required when disable_release is set (default)
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

fn device_error(e: impl std::fmt::Display) -> Error {
    Error::Playback(e.to_string())
}

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocks until the callback has played every frame or the stream reports
/// an error, whichever comes first.
fn wait_until_drained(drained: &AtomicBool, failure: &Mutex<Option<String>>) -> Result<()> {
    loop {
        let failed = failure
            .lock()
            .map_err(|_| Error::Playback("stream error slot poisoned".to_string()))?
            .take();
        if let Some(message) = failed {
            return Err(Error::Playback(message));
        }
        if drained.load(Ordering::Acquire) {
            return Ok(());
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Plays PCM on the default output device.
pub struct CpalSink {
    device: Device,
    device_channels: u16,
}

impl CpalSink {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Playback("no output device available".to_string()))?;

        let device_channels = device.default_output_config().map_err(device_error)?.channels();
        tracing::debug!(
            device = %device.name().unwrap_or_default(),
            channels = device_channels,
            "opened output device"
        );

        Ok(CpalSink {
            device,
            device_channels,
        })
    }
}

impl AudioSink for CpalSink {
    fn play(&mut self, pcm: &[i16], channels: u16, sample_rate: u32) -> Result<()> {
        if channels == 0 {
            return Err(Error::InvalidArgument("channel count must be positive".to_string()));
        }
        let config = StreamConfig {
            channels: self.device_channels,
            sample_rate: SampleRate(sample_rate),
            buffer_size: BufferSize::Default,
        };

        let samples: Arc<[i16]> = pcm.into();
        let frames = samples.len() / channels as usize;
        let position = Arc::new(AtomicUsize::new(0));
        let drained = Arc::new(AtomicBool::new(frames == 0));

        let source_channels = channels as usize;
        let out_channels = self.device_channels as usize;
        let callback_samples = Arc::clone(&samples);
        let callback_position = Arc::clone(&position);
        let callback_drained = Arc::clone(&drained);
        let failure = Arc::new(Mutex::new(None::<String>));
        let error_failure = Arc::clone(&failure);

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    assert_no_alloc(|| {
                        let mut frame_index = callback_position.load(Ordering::Relaxed);
                        for frame in data.chunks_mut(out_channels) {
                            for (c, out) in frame.iter_mut().enumerate() {
                                *out = if frame_index < frames {
                                    let s = callback_samples
                                        [frame_index * source_channels + c % source_channels];
                                    s as f32 / 32768.0
                                } else {
                                    0.0
                                };
                            }
                            frame_index += 1;
                        }
                        callback_position.store(frame_index, Ordering::Relaxed);
                        if frame_index >= frames {
                            callback_drained.store(true, Ordering::Release);
                        }
                    })
                },
                move |err| {
                    tracing::error!(%err, "audio stream error");
                    if let Ok(mut slot) = error_failure.lock() {
                        slot.get_or_insert_with(|| err.to_string());
                    }
                },
                None,
            )
            .map_err(device_error)?;

        stream.play().map_err(device_error)?;
        tracing::info!(
            seconds = frames as f32 / sample_rate as f32,
            "playing"
        );

        wait_until_drained(&drained, &failure)?;
        // Let the device flush its last buffer before the stream is dropped.
        std::thread::sleep(Duration::from_millis(200));
        Ok(())
    }
}
