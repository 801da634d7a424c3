//! Mock capabilities shared by the integration tests.

#![allow(dead_code)]

use crossbeam_channel::Sender;
use soundbite::audio::{
    AudioDevice, AudioMode, CaptureHandle, Permission, PlaybackHandle, SoundSource,
};
use soundbite::sharing::{ShareOptions, ShareTarget};
use soundbite::{Result, SoundbiteError};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Every call the controller makes on the audio device, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    RequestPermission,
    ConfigureMode(AudioMode),
    BeginCapture,
    EndCapture(CaptureHandle),
    /// Load of a file source carries its path; byte sources carry None.
    Load(Option<PathBuf>),
    Play(PlaybackHandle),
    Stop(PlaybackHandle),
    Unload(PlaybackHandle),
}

/// Scriptable audio device that records the call sequence.
pub struct MockAudioDevice {
    pub permission: Permission,
    pub fail_begin_capture: bool,
    calls: Vec<DeviceCall>,
    next_id: u64,
    active_capture: Option<CaptureHandle>,
    loaded: Vec<PlaybackHandle>,
    playing: RefCell<Option<(PlaybackHandle, Sender<PlaybackHandle>)>>,
}

impl MockAudioDevice {
    pub fn new() -> Self {
        Self {
            permission: Permission::Granted,
            fail_begin_capture: false,
            calls: Vec::new(),
            next_id: 0,
            active_capture: None,
            loaded: Vec::new(),
            playing: RefCell::new(None),
        }
    }

    pub fn denying() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn loaded_handles(&self) -> &[PlaybackHandle] {
        &self.loaded
    }

    pub fn unload_count(&self, handle: PlaybackHandle) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == DeviceCall::Unload(handle))
            .count()
    }

    /// Simulate the currently playing sound reaching its natural end.
    pub fn finish_playback(&self) {
        if let Some((handle, tx)) = self.playing.borrow_mut().take() {
            tx.send(handle).expect("finished channel closed");
        }
    }
}

impl AudioDevice for MockAudioDevice {
    fn request_permission(&mut self) -> Result<Permission> {
        self.calls.push(DeviceCall::RequestPermission);
        Ok(self.permission)
    }

    fn configure_mode(&mut self, mode: AudioMode) -> Result<()> {
        self.calls.push(DeviceCall::ConfigureMode(mode));
        Ok(())
    }

    fn begin_capture(&mut self) -> Result<CaptureHandle> {
        self.calls.push(DeviceCall::BeginCapture);
        if self.fail_begin_capture {
            return Err(SoundbiteError::CaptureError("mock capture failure".into()));
        }
        assert!(
            self.active_capture.is_none(),
            "controller started a capture while one was active"
        );
        self.next_id += 1;
        let handle = CaptureHandle(self.next_id);
        self.active_capture = Some(handle);
        Ok(handle)
    }

    fn end_capture(&mut self, handle: CaptureHandle) -> Result<PathBuf> {
        self.calls.push(DeviceCall::EndCapture(handle));
        assert_eq!(
            self.active_capture.take(),
            Some(handle),
            "controller finalized a capture it does not own"
        );
        Ok(PathBuf::from(format!("/tmp/mock-recording-{}.wav", handle.0)))
    }

    fn load(&mut self, source: &SoundSource) -> Result<PlaybackHandle> {
        let path = match source {
            SoundSource::File(p) => Some(p.clone()),
            SoundSource::Bytes(_) => None,
        };
        self.calls.push(DeviceCall::Load(path));
        self.next_id += 1;
        let handle = PlaybackHandle(self.next_id);
        self.loaded.push(handle);
        Ok(handle)
    }

    fn play(&mut self, handle: PlaybackHandle, finished_tx: Sender<PlaybackHandle>) -> Result<()> {
        self.calls.push(DeviceCall::Play(handle));
        *self.playing.borrow_mut() = Some((handle, finished_tx));
        Ok(())
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<()> {
        self.calls.push(DeviceCall::Stop(handle));
        // A stopped sink still drains, so the watcher fires afterwards;
        // the sender stays so finish_playback can emit the stale event.
        Ok(())
    }

    fn unload(&mut self, handle: PlaybackHandle) {
        self.calls.push(DeviceCall::Unload(handle));
        self.loaded.retain(|h| *h != handle);
    }
}

/// Scriptable share target.
pub struct MockShare {
    pub available: bool,
    pub shares: Vec<(PathBuf, String)>,
}

impl MockShare {
    pub fn new() -> Self {
        Self {
            available: true,
            shares: Vec::new(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            shares: Vec::new(),
        }
    }
}

impl ShareTarget for MockShare {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&mut self, uri: &Path, options: &ShareOptions) -> Result<()> {
        self.shares
            .push((uri.to_path_buf(), options.dialog_title.clone()));
        Ok(())
    }
}
