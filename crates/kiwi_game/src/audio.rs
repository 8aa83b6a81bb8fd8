//! Background-music loop on top of rodio.
//!
//! Audio is best effort: a missing output device or music file leaves the
//! game silent and logs a warning.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::assets::{read_asset, AssetError};

/// Gain of the menu music loop.
pub const MUSIC_GAIN_DB: f32 = -10.0;

/// Encoded audio kept in memory so the loop can be restarted without disk I/O.
#[derive(Clone)]
pub struct AudioClip {
    pub path: String,
    bytes: Arc<[u8]>,
}

impl AudioClip {
    fn cursor(&self) -> Cursor<Arc<[u8]>> {
        Cursor::new(Arc::clone(&self.bytes))
    }
}

pub fn load_audio(path: &str) -> Result<AudioClip, AssetError> {
    let bytes: Arc<[u8]> = read_asset(path)?.into();
    let clip = AudioClip {
        path: path.to_string(),
        bytes,
    };
    // Probe once so a corrupt file is reported at load time, not on play.
    Decoder::new(clip.cursor()).map_err(|e| AssetError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(clip)
}

pub fn db_to_amplitude(gain_db: f32) -> f32 {
    10f32.powf(gain_db / 20.0)
}

pub struct MusicPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl MusicPlayer {
    pub fn new() -> Result<Self, String> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| format!("Failed to open audio output: {e}"))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }

    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }

    /// Start `clip` looping forever at `gain_db`. No-op while already playing.
    pub fn start_loop(&mut self, clip: &AudioClip, gain_db: f32) -> Result<(), String> {
        if self.is_playing() {
            return Ok(());
        }
        let source = Decoder::new_looped(clip.cursor())
            .map_err(|e| format!("Failed to decode '{}': {e}", clip.path))?;
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| format!("Failed to create audio sink: {e}"))?;
        sink.set_volume(db_to_amplitude(gain_db));
        sink.append(source);
        self.sink = Some(sink);
        log::info!("Music loop started: {}", clip.path);
        Ok(())
    }

    pub fn stop_loop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            log::info!("Music loop stopped");
        }
    }
}

/// The game's single music track and the device it plays on. Either may be
/// absent, in which case playback requests are ignored.
pub struct BackgroundMusic {
    player: Option<MusicPlayer>,
    clip: Option<AudioClip>,
}

impl BackgroundMusic {
    pub fn new(music_path: &str) -> Self {
        let player = match MusicPlayer::new() {
            Ok(player) => Some(player),
            Err(err) => {
                log::warn!("{err}. Continuing without sound.");
                None
            }
        };
        let clip = match load_audio(music_path) {
            Ok(clip) => Some(clip),
            Err(err) => {
                log::warn!("Background music unavailable: {err}");
                None
            }
        };
        Self { player, clip }
    }

    pub fn set_playing(&mut self, playing: bool) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if !playing {
            player.stop_loop();
            return;
        }
        let Some(clip) = &self.clip else {
            return;
        };
        if let Err(err) = player.start_loop(clip, MUSIC_GAIN_DB) {
            log::warn!("{err}");
        }
    }
}
