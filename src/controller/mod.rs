//! Screen controller
//!
//! Owns all mutable screen state and validates every user-triggered
//! transition. The UI dispatches [`Intent`]s and renders the
//! [`ScreenSnapshot`] projection; nothing else writes the state.

pub mod banner;

pub use banner::Banner;

use crate::audio::device::{AudioDevice, AudioMode, CaptureHandle, Permission, PlaybackHandle, SoundSource};
use crate::sharing::{ShareOptions, ShareTarget};
use crate::SoundbiteError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Log a capability fault at a severity matching its recoverability.
/// Recoverable faults clear on retry and stay at warn.
fn log_fault(action: &str, e: &SoundbiteError) {
    if e.is_recoverable() {
        warn!("{}: {} (retry may succeed)", action, e);
    } else {
        error!("{}: {}", action, e);
    }
}

/// Banner shown when microphone permission is refused.
pub const MSG_PERMISSION: &str = "Please give Audio Recording permission to proceed";
/// Banner shown when play is tapped with nothing recorded.
pub const MSG_RECORD_FIRST: &str = "Please record first!";
/// Banner shown when the host cannot share.
pub const MSG_SHARE_UNAVAILABLE: &str = "Share hindered!!!";
/// Banner shown when share is tapped with nothing recorded.
pub const MSG_RECORD_TO_SHARE: &str = "Please record to share audio!";
/// Title passed to the host share dialog.
pub const SHARE_DIALOG_TITLE: &str = "Share Your Record!";

/// Top-level phase of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing active
    Idle,
    /// Microphone capture running
    Recording,
    /// Capture finalize in flight; stop requests are ignored here
    Stopping,
    /// A sound is playing
    Playing,
}

/// User taps, as the UI reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ToggleRecording,
    TogglePlayback,
    Share,
}

/// An in-progress microphone capture.
#[derive(Debug)]
struct RecordingSession {
    handle: CaptureHandle,
    /// Session ID for log correlation.
    id: Uuid,
    started_at: Instant,
}

/// The sound currently loaded for playback.
#[derive(Debug)]
struct PlaybackSession {
    handle: PlaybackHandle,
}

/// The most recently completed recording. `is_recorded` is true exactly
/// when a location is present; both live in one `Option` so they cannot
/// disagree.
#[derive(Debug, Clone, Default)]
pub struct Artifact {
    location: Option<PathBuf>,
}

impl Artifact {
    pub fn is_recorded(&self) -> bool {
        self.location.is_some()
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

/// Immutable view of the screen state, rendered by the UI.
#[derive(Debug, Clone)]
pub struct ScreenSnapshot {
    pub phase: Phase,
    pub is_recorded: bool,
    pub artifact_location: Option<PathBuf>,
    pub banner_visible: bool,
    pub banner_text: String,
}

/// The view-state machine coordinating record / play / share.
///
/// At most one recording session and one playback session exist at any
/// time; the phase variable doubles as the mutual-exclusion mechanism.
/// Handles are released on every exit path, including teardown.
pub struct ScreenController<D: AudioDevice, S: ShareTarget> {
    device: D,
    share_target: S,
    phase: Phase,
    recording: Option<RecordingSession>,
    playback: Option<PlaybackSession>,
    artifact: Artifact,
    banner: Banner,
    finished_tx: Sender<PlaybackHandle>,
    finished_rx: Receiver<PlaybackHandle>,
}

impl<D: AudioDevice, S: ShareTarget> ScreenController<D, S> {
    pub fn new(device: D, share_target: S) -> Self {
        let (finished_tx, finished_rx) = unbounded();
        Self {
            device,
            share_target,
            phase: Phase::Idle,
            recording: None,
            playback: None,
            artifact: Artifact::default(),
            banner: Banner::new(),
            finished_tx,
            finished_rx,
        }
    }

    /// Route a user tap to the matching transition.
    pub fn dispatch(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::ToggleRecording => {
                if self.phase == Phase::Recording {
                    self.stop_recording();
                } else {
                    self.start_recording(now);
                }
            }
            Intent::TogglePlayback => {
                if self.phase == Phase::Playing {
                    self.stop_playback();
                } else {
                    self.play(None, now);
                }
            }
            Intent::Share => self.share(now),
        }
    }

    /// Start a recording session. Valid from Idle or Playing; starting a
    /// recording always wins over ongoing playback.
    pub fn start_recording(&mut self, now: Instant) {
        match self.phase {
            Phase::Recording | Phase::Stopping => return,
            Phase::Playing => self.stop_playback(),
            Phase::Idle => {}
        }

        if let Err(e) = self.try_start_recording(now) {
            // No session was created; the user can retry.
            log_fault("Failed to start recording", &e);
            self.recording = None;
            self.phase = Phase::Idle;
        }
    }

    fn try_start_recording(&mut self, now: Instant) -> crate::Result<()> {
        debug!("Requesting microphone permission");
        match self.device.request_permission()? {
            Permission::Denied => {
                self.banner.raise(MSG_PERMISSION, now);
                Ok(())
            }
            Permission::Granted => {
                self.device.configure_mode(AudioMode::recording())?;
                let handle = self.device.begin_capture()?;
                let session = RecordingSession {
                    handle,
                    id: Uuid::new_v4(),
                    started_at: now,
                };
                info!("Recording started (session {})", session.id);
                self.recording = Some(session);
                self.phase = Phase::Recording;
                Ok(())
            }
        }
    }

    /// Stop the active recording and finalize the artifact. Returns the
    /// recording location so an interrupting play can chain onto it.
    pub fn stop_recording(&mut self) -> Option<PathBuf> {
        if self.phase != Phase::Recording {
            return None;
        }
        let session = self.recording.take()?;

        // Two-phase stop: the session is released and the phase marked
        // before finalize, so a re-entrant stop finds nothing to act on.
        self.phase = Phase::Stopping;
        info!(
            "Stopping recording (session {}, {:.1}s)",
            session.id,
            session.started_at.elapsed().as_secs_f32()
        );

        let result = self.device.end_capture(session.handle);
        self.phase = Phase::Idle;

        match result {
            Ok(location) => {
                self.artifact.location = Some(location.clone());
                Some(location)
            }
            Err(e) => {
                log_fault("Failed to stop recording", &e);
                None
            }
        }
    }

    /// Play `source`, or the recorded artifact when none is given. Tapping
    /// play while recording stops the recording and plays what was just
    /// captured, overriding any explicit source.
    pub fn play(&mut self, source: Option<SoundSource>, now: Instant) {
        match self.phase {
            Phase::Playing | Phase::Stopping => return,
            Phase::Recording => {
                // The fresh recording overrides any explicit source; if
                // finalize faulted, fall back to the previous artifact.
                let chained = self
                    .stop_recording()
                    .map(SoundSource::from)
                    .or_else(|| self.artifact.location.clone().map(SoundSource::from));
                self.start_playback_of(chained, now);
            }
            Phase::Idle => {
                let effective =
                    source.or_else(|| self.artifact.location.clone().map(SoundSource::from));
                self.start_playback_of(effective, now);
            }
        }
    }

    fn start_playback_of(&mut self, source: Option<SoundSource>, now: Instant) {
        let Some(source) = source else {
            debug!("Play requested without a recording");
            self.banner.raise(MSG_RECORD_FIRST, now);
            return;
        };

        if let Err(e) = self.try_play(&source) {
            log_fault("Failed to play sound", &e);
            self.playback = None;
            self.phase = Phase::Idle;
        }
    }

    fn try_play(&mut self, source: &SoundSource) -> crate::Result<()> {
        debug!("Loading sound");
        let handle = self.device.load(source)?;

        if let Err(e) = self.device.play(handle, self.finished_tx.clone()) {
            self.device.unload(handle);
            return Err(e);
        }

        info!("Playing sound");
        self.playback = Some(PlaybackSession { handle });
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Stop playback and release the loaded sound.
    pub fn stop_playback(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        if let Some(session) = self.playback.take() {
            info!("Stopping playback");
            if let Err(e) = self.device.stop(session.handle) {
                log_fault("Failed to stop playback", &e);
            }
            self.device.unload(session.handle);
        }
        self.phase = Phase::Idle;
    }

    /// Share the recorded artifact. Never changes the phase.
    pub fn share(&mut self, now: Instant) {
        if !self.share_target.is_available() {
            self.banner.raise(MSG_SHARE_UNAVAILABLE, now);
            return;
        }

        let Some(location) = self.artifact.location.clone() else {
            debug!("Share requested without a recording");
            self.banner.raise(MSG_RECORD_TO_SHARE, now);
            return;
        };

        let options = ShareOptions {
            dialog_title: SHARE_DIALOG_TITLE.to_string(),
        };
        if let Err(e) = self.share_target.share(&location, &options) {
            log_fault("Share failed", &e);
        }
    }

    /// Frame-driven upkeep: handle naturally finished playback and
    /// dismiss a stale banner.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(handle) = self.finished_rx.try_recv() {
            let current = self.playback.as_ref().map(|s| s.handle);
            if current == Some(handle) {
                info!("Playback finished");
                self.playback = None;
                self.device.unload(handle);
                self.phase = Phase::Idle;
            } else {
                // A manual stop already released this handle.
                debug!("Ignoring finished event for released handle {:?}", handle);
            }
        }

        debug_assert!(
            self.recording.is_none() || self.playback.is_none(),
            "recording and playback sessions must never coexist"
        );

        self.banner.tick(now);
    }

    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot {
            phase: self.phase,
            is_recorded: self.artifact.is_recorded(),
            artifact_location: self.artifact.location.clone(),
            banner_visible: self.banner.visible(),
            banner_text: self.banner.text().to_string(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn share_target(&self) -> &S {
        &self.share_target
    }
}

impl<D: AudioDevice, S: ShareTarget> Drop for ScreenController<D, S> {
    fn drop(&mut self) {
        // Handles must be released on every exit path, teardown included.
        if self.phase == Phase::Playing {
            self.stop_playback();
        }
        if self.phase == Phase::Recording {
            self.stop_recording();
        }
    }
}
