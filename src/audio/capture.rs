use crate::{Result, SoundbiteError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Microphone capture stream.
///
/// Samples are downmixed to mono and accumulated until the stream is
/// stopped; the caller drains them with [`CaptureStream::finish`].
pub struct CaptureStream {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    is_capturing: Arc<Mutex<bool>>,
    buffer: Arc<Mutex<Vec<f32>>>,
}

impl CaptureStream {
    /// Create a capture stream on the default input device.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| SoundbiteError::AudioDeviceError("No input device available".into()))?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config = device
            .default_input_config()
            .map_err(|e| {
                SoundbiteError::AudioDeviceError(format!("Failed to get input config: {}", e))
            })?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            is_capturing: Arc::new(Mutex::new(false)),
            buffer: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Sample rate of the input device
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Start capturing microphone audio.
    pub fn start(&mut self) -> Result<()> {
        if *self.is_capturing.lock() {
            warn!("Already capturing");
            return Ok(());
        }

        self.buffer.lock().clear();

        let channels = self.config.channels as usize;
        let is_capturing = Arc::clone(&self.is_capturing);
        let buffer = Arc::clone(&self.buffer);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if !*is_capturing.lock() {
                        return;
                    }

                    let mut buf = buffer.lock();
                    if channels == 1 {
                        buf.extend_from_slice(data);
                    } else {
                        // Average all channels to create mono
                        buf.extend(
                            data.chunks(channels)
                                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                        );
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                SoundbiteError::CaptureError(format!("Failed to build input stream: {}", e))
            })?;

        stream
            .play()
            .map_err(|e| {
                SoundbiteError::CaptureError(format!("Failed to start input stream: {}", e))
            })?;

        *self.is_capturing.lock() = true;
        self.stream = Some(stream);

        info!("Started microphone capture");
        Ok(())
    }

    /// Stop capturing and drain the accumulated mono samples.
    pub fn finish(&mut self) -> Vec<f32> {
        *self.is_capturing.lock() = false;

        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Stopped microphone capture");
        }

        std::mem::take(&mut *self.buffer.lock())
    }

    /// Check if currently capturing
    pub fn is_capturing(&self) -> bool {
        *self.is_capturing.lock()
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_stream_creation() {
        // This test might fail in CI environments without audio devices
        if let Ok(stream) = CaptureStream::new() {
            assert!(stream.sample_rate() > 0);
            assert!(!stream.is_capturing());
        }
    }

    #[test]
    fn test_capture_state() {
        if let Ok(mut stream) = CaptureStream::new() {
            if stream.start().is_ok() {
                assert!(stream.is_capturing());

                let _ = stream.finish();
                assert!(!stream.is_capturing());
            }
        }
    }
}
