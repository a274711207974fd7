//! Sound engine — audio playback via rodio
//!
//! Three looping channels (background music, traffic noise, game-over
//! music) that can be paused and resumed, plus fire-and-forget one-shots.
//! A cue that owns a channel replaces whatever that channel was playing.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::assets::sound::SoundClip;
use crate::game::platform::Cue;

const CHANNELS: usize = 3;

/// Central sound engine — manages output stream and active playback channels
pub struct SoundEngine {
    /// rodio output stream (must be kept alive)
    _stream: OutputStream,
    /// Handle for creating new sinks
    handle: OutputStreamHandle,
    channels: [Option<Sink>; CHANNELS],
    /// One-shot sound effects (kept alive until finished)
    sfx_sinks: Vec<Sink>,
}

impl SoundEngine {
    /// Create a new sound engine. Returns None if audio device unavailable.
    pub fn new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized");
                Some(Self {
                    _stream: stream,
                    handle,
                    channels: [None, None, None],
                    sfx_sinks: Vec::new(),
                })
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio, continuing silently: {}", e);
                None
            }
        }
    }

    /// Start `clip` for `cue`: looped on the cue's channel, or as a one-shot
    pub fn play(&mut self, cue: Cue, clip: &SoundClip) {
        let source = match Decoder::new(Cursor::new(clip.data.to_vec())) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("Failed to decode sound '{}': {}", clip.name, e);
                return;
            }
        };
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::warn!("Failed to create sink for '{}': {}", clip.name, e);
                return;
            }
        };

        if cue.looping() {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        match cue.channel() {
            Some(ch) => {
                if let Some(old) = self.channels[ch].replace(sink) {
                    old.stop();
                }
                tracing::debug!("Channel {}: '{}'", ch, clip.name);
            }
            None => {
                self.sfx_sinks.push(sink);
                tracing::debug!("One-shot '{}'", clip.name);
            }
        }
        self.gc();
    }

    /// Stop a channel cue. One-shots run to completion and ignore this.
    pub fn stop(&mut self, cue: Cue) {
        if let Some(sink) = cue.channel().and_then(|ch| self.channels[ch].take()) {
            sink.stop();
        }
    }

    pub fn pause(&mut self, cue: Cue) {
        if let Some(sink) = self.channel(cue) {
            sink.pause();
        }
    }

    pub fn resume(&mut self, cue: Cue) {
        if let Some(sink) = self.channel(cue) {
            sink.play();
        }
    }

    fn channel(&self, cue: Cue) -> Option<&Sink> {
        cue.channel().and_then(|ch| self.channels[ch].as_ref())
    }

    /// Stop all sounds (channels + SFX)
    pub fn stop_all(&mut self) {
        for sink in self.channels.iter_mut().filter_map(Option::take) {
            sink.stop();
        }
        for sink in self.sfx_sinks.drain(..) {
            sink.stop();
        }
    }

    /// Drop finished one-shot sinks
    pub fn gc(&mut self) {
        self.sfx_sinks.retain(|s| !s.empty());
    }
}

impl Drop for SoundEngine {
    fn drop(&mut self) {
        self.stop_all();
    }
}
