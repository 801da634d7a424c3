use crate::audio::device::{PlaybackHandle, SoundSource};
use crate::{Result, SoundbiteError};
use crossbeam_channel::Sender;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use tracing::{debug, info};

/// Sound playback engine backed by rodio.
///
/// Each loaded sound gets its own paused `Sink`; starting playback spawns a
/// watcher thread that posts the handle on the finished channel once the
/// sink drains. A manual stop also drains the sink, so a watcher may post a
/// handle that was already released; receivers must ignore unknown handles.
pub struct PlaybackEngine {
    // Held so the output device stays open; dropping it kills all sinks.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sinks: HashMap<PlaybackHandle, Arc<Sink>>,
    next_id: u64,
}

impl PlaybackEngine {
    /// Create a playback engine on the default output device.
    pub fn new() -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            SoundbiteError::AudioDeviceError(format!("No output device available: {}", e))
        })?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sinks: HashMap::new(),
            next_id: 0,
        })
    }

    /// Decode a sound and prepare a paused sink for it.
    pub fn load(&mut self, source: &SoundSource) -> Result<PlaybackHandle> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundbiteError::PlaybackError(format!("Failed to create sink: {}", e)))?;
        sink.pause();

        match source {
            SoundSource::File(path) => {
                let file = File::open(path).map_err(|e| {
                    SoundbiteError::PlaybackError(format!("Failed to open {}: {}", path.display(), e))
                })?;
                let decoder = Decoder::new(BufReader::new(file)).map_err(|e| {
                    SoundbiteError::PlaybackError(format!("Failed to decode {}: {}", path.display(), e))
                })?;
                sink.append(decoder);
            }
            SoundSource::Bytes(bytes) => {
                let decoder = Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| {
                    SoundbiteError::PlaybackError(format!("Failed to decode sound bytes: {}", e))
                })?;
                sink.append(decoder);
            }
        }

        self.next_id += 1;
        let handle = PlaybackHandle(self.next_id);
        self.sinks.insert(handle, Arc::new(sink));

        info!("Loaded sound as {:?}", handle);
        Ok(handle)
    }

    /// Start playing a loaded sound and watch for its natural end.
    pub fn play(&mut self, handle: PlaybackHandle, finished_tx: Sender<PlaybackHandle>) -> Result<()> {
        let sink = self
            .sinks
            .get(&handle)
            .ok_or_else(|| SoundbiteError::PlaybackError(format!("Unknown handle {:?}", handle)))?;

        sink.play();
        info!("Playing {:?}", handle);

        let sink = Arc::clone(sink);
        std::thread::spawn(move || {
            sink.sleep_until_end();
            if finished_tx.send(handle).is_err() {
                debug!("Finished-channel receiver gone for {:?}", handle);
            }
        });

        Ok(())
    }

    /// Stop a playing sound. The sink stays registered until `unload`.
    pub fn stop(&mut self, handle: PlaybackHandle) -> Result<()> {
        let sink = self
            .sinks
            .get(&handle)
            .ok_or_else(|| SoundbiteError::PlaybackError(format!("Unknown handle {:?}", handle)))?;

        sink.stop();
        info!("Stopped {:?}", handle);
        Ok(())
    }

    /// Release a loaded sound.
    pub fn unload(&mut self, handle: PlaybackHandle) {
        if self.sinks.remove(&handle).is_some() {
            info!("Unloaded {:?}", handle);
        } else {
            debug!("Unload of unknown handle {:?}", handle);
        }
    }
}
