//! Sound clips, read once at startup and decoded by the sound engine on play
//!
//! Clips are kept as the raw file bytes (WAV); rodio decodes a fresh source
//! from them every time a cue starts. Every clip is test-decoded on read so
//! a corrupt file fails at startup, with or without an audio device.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::Decoder;

use super::AssetLoadError;

/// Raw encoded audio for one cue
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub name: String,
    pub data: Arc<Vec<u8>>,
}

impl SoundClip {
    pub fn read(path: &Path) -> Result<Self, AssetLoadError> {
        let data = std::fs::read(path).map_err(|source| AssetLoadError::Sound {
            path: path.to_path_buf(),
            source,
        })?;
        if data.is_empty() {
            return Err(AssetLoadError::EmptySound(path.to_path_buf()));
        }
        Decoder::new(Cursor::new(data.clone())).map_err(|source| AssetLoadError::SoundDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            data: Arc::new(data),
        })
    }
}

/// 16-bit mono PCM WAV holding a few silent samples
#[cfg(test)]
pub fn silent_wav() -> Vec<u8> {
    let samples = 8u32;
    let data_len = samples * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&8000u32.to_le_bytes()); // sample rate
    wav.extend_from_slice(&16000u32.to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}
