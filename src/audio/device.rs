//! Audio capability interface
//!
//! The screen controller talks to the microphone and the speaker through
//! this trait only. The real implementation (`SystemAudioDevice`) sits
//! behind the `audio-io` feature; tests substitute their own.

use crate::Result;
use crossbeam_channel::Sender;
use std::borrow::Cow;
use std::path::PathBuf;

/// Opaque reference to an in-progress microphone capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureHandle(pub u64);

/// Opaque reference to a loaded, playable sound resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(pub u64);

/// Outcome of a microphone permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Audio session configuration applied before capture begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    /// Whether microphone capture is allowed at all.
    pub allow_recording: bool,
    /// Capture even when the host is in silent/do-not-disturb mode.
    pub silent_mode_capture: bool,
    /// Keep the session alive when the app loses foreground focus.
    pub stay_active_in_background: bool,
}

impl AudioMode {
    /// The mode used for every recording session: capture allowed,
    /// silent-mode capture permitted, background continuation on.
    pub fn recording() -> Self {
        Self {
            allow_recording: true,
            silent_mode_capture: true,
            stay_active_in_background: true,
        }
    }
}

/// A playable sound: a file on disk or embedded bytes.
#[derive(Debug, Clone)]
pub enum SoundSource {
    File(PathBuf),
    Bytes(Cow<'static, [u8]>),
}

impl From<PathBuf> for SoundSource {
    fn from(path: PathBuf) -> Self {
        SoundSource::File(path)
    }
}

/// The audio device capability.
///
/// Handles are owned exclusively by the caller while live. `end_capture`
/// and `unload` consume their handle; using a handle after releasing it
/// is a caller bug and implementations report it as an error.
///
/// Natural end of playback is signalled by posting the playback handle on
/// the `finished_tx` channel passed to [`AudioDevice::play`]; the caller
/// drains that channel on its own schedule.
pub trait AudioDevice {
    /// Ask the host for microphone access.
    fn request_permission(&mut self) -> Result<Permission>;

    /// Configure the audio session. Called after permission is granted,
    /// before capture begins.
    fn configure_mode(&mut self, mode: AudioMode) -> Result<()>;

    /// Start capturing from the microphone.
    fn begin_capture(&mut self) -> Result<CaptureHandle>;

    /// Finalize a capture and return the location of the recorded file.
    fn end_capture(&mut self, handle: CaptureHandle) -> Result<PathBuf>;

    /// Load a sound so it can be played.
    fn load(&mut self, source: &SoundSource) -> Result<PlaybackHandle>;

    /// Start playing a loaded sound. The handle is posted on
    /// `finished_tx` when playback ends naturally.
    fn play(&mut self, handle: PlaybackHandle, finished_tx: Sender<PlaybackHandle>) -> Result<()>;

    /// Stop a playing sound. The handle stays loaded until `unload`.
    fn stop(&mut self, handle: PlaybackHandle) -> Result<()>;

    /// Release a loaded sound. Safe to call after natural completion.
    fn unload(&mut self, handle: PlaybackHandle);
}
