pub mod device;
pub mod wav;

#[cfg(feature = "audio-io")]
pub mod capture;
#[cfg(feature = "audio-io")]
pub mod playback;
#[cfg(feature = "audio-io")]
pub mod system;

pub use device::{
    AudioDevice, AudioMode, CaptureHandle, Permission, PlaybackHandle, SoundSource,
};
pub use wav::{read_wav, write_wav};

#[cfg(feature = "audio-io")]
pub use capture::CaptureStream;
#[cfg(feature = "audio-io")]
pub use playback::PlaybackEngine;
#[cfg(feature = "audio-io")]
pub use system::SystemAudioDevice;
