pub mod audio;
pub mod controller;
pub mod sharing;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SoundbiteError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Capture error: {0}")]
    CaptureError(String),

    #[error("Playback error: {0}")]
    PlaybackError(String),

    #[error("Share error: {0}")]
    ShareError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for SoundbiteError {
    fn from(e: std::io::Error) -> Self {
        SoundbiteError::IOError(e.to_string())
    }
}

impl From<hound::Error> for SoundbiteError {
    fn from(e: hound::Error) -> Self {
        SoundbiteError::IOError(e.to_string())
    }
}

impl SoundbiteError {
    /// Check if this error is recoverable by retrying the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            SoundbiteError::AudioDeviceError(_) => false,
            // These are typically transient
            SoundbiteError::CaptureError(_) => true,
            SoundbiteError::PlaybackError(_) => true,
            SoundbiteError::ShareError(_) => true,
            SoundbiteError::IOError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SoundbiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_faults_are_recoverable() {
        assert!(SoundbiteError::CaptureError("stream died".into()).is_recoverable());
        assert!(SoundbiteError::PlaybackError("decode failed".into()).is_recoverable());
        assert!(SoundbiteError::ShareError("opener exited".into()).is_recoverable());
    }

    #[test]
    fn test_device_and_io_faults_are_not_recoverable() {
        assert!(!SoundbiteError::AudioDeviceError("no microphone".into()).is_recoverable());
        assert!(!SoundbiteError::IOError("disk full".into()).is_recoverable());
    }
}
