//! Real audio device backed by cpal (capture) and rodio (playback)

use crate::audio::capture::CaptureStream;
use crate::audio::device::{
    AudioDevice, AudioMode, CaptureHandle, Permission, PlaybackHandle, SoundSource,
};
use crate::audio::playback::PlaybackEngine;
use crate::audio::wav;
use crate::{Result, SoundbiteError};
use chrono::Local;
use cpal::traits::HostTrait;
use crossbeam_channel::Sender;
use std::path::PathBuf;
use tracing::{info, warn};

/// The audio capability as implemented on desktop hosts.
///
/// Desktop platforms surface microphone permission as device availability,
/// so `request_permission` reports `Granted` iff a default input device
/// exists. Finished captures are written as timestamped WAV files in the
/// OS temp directory; the files are the only thing that outlives a session.
pub struct SystemAudioDevice {
    capture: Option<(CaptureHandle, CaptureStream)>,
    playback: Option<PlaybackEngine>,
    next_capture_id: u64,
    mode: Option<AudioMode>,
}

impl SystemAudioDevice {
    pub fn new() -> Self {
        Self {
            capture: None,
            playback: None,
            next_capture_id: 0,
            mode: None,
        }
    }

    fn playback_engine(&mut self) -> Result<&mut PlaybackEngine> {
        if self.playback.is_none() {
            self.playback = Some(PlaybackEngine::new()?);
        }
        Ok(self.playback.as_mut().expect("engine initialized above"))
    }

    fn artifact_path(capture_id: u64) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        std::env::temp_dir().join(format!("soundbite-{}-{}.wav", stamp, capture_id))
    }
}

impl Default for SystemAudioDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDevice for SystemAudioDevice {
    fn request_permission(&mut self) -> Result<Permission> {
        let host = cpal::default_host();
        if host.default_input_device().is_some() {
            Ok(Permission::Granted)
        } else {
            warn!("No input device; treating as permission denied");
            Ok(Permission::Denied)
        }
    }

    fn configure_mode(&mut self, mode: AudioMode) -> Result<()> {
        if !mode.allow_recording {
            return Err(SoundbiteError::AudioDeviceError(
                "Audio mode forbids recording".into(),
            ));
        }
        self.mode = Some(mode);
        Ok(())
    }

    fn begin_capture(&mut self) -> Result<CaptureHandle> {
        if self.mode.is_none() {
            return Err(SoundbiteError::AudioDeviceError(
                "Audio mode not configured".into(),
            ));
        }
        if self.capture.is_some() {
            return Err(SoundbiteError::CaptureError("Capture already active".into()));
        }

        let mut stream = CaptureStream::new()?;
        stream.start()?;

        self.next_capture_id += 1;
        let handle = CaptureHandle(self.next_capture_id);
        self.capture = Some((handle, stream));
        Ok(handle)
    }

    fn end_capture(&mut self, handle: CaptureHandle) -> Result<PathBuf> {
        let (active, mut stream) = self
            .capture
            .take()
            .ok_or_else(|| SoundbiteError::CaptureError("No active capture".into()))?;

        if active != handle {
            self.capture = Some((active, stream));
            return Err(SoundbiteError::CaptureError(format!(
                "Unknown capture handle {:?}",
                handle
            )));
        }

        let sample_rate = stream.sample_rate();
        let samples = stream.finish();
        let path = Self::artifact_path(handle.0);
        wav::write_wav(&path, &samples, sample_rate, 1)?;

        info!(
            "Recording stopped and stored at {} ({} samples)",
            path.display(),
            samples.len()
        );
        Ok(path)
    }

    fn load(&mut self, source: &SoundSource) -> Result<PlaybackHandle> {
        self.playback_engine()?.load(source)
    }

    fn play(&mut self, handle: PlaybackHandle, finished_tx: Sender<PlaybackHandle>) -> Result<()> {
        self.playback_engine()?.play(handle, finished_tx)
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<()> {
        self.playback_engine()?.stop(handle)
    }

    fn unload(&mut self, handle: PlaybackHandle) {
        if let Some(engine) = self.playback.as_mut() {
            engine.unload(handle);
        }
    }
}
