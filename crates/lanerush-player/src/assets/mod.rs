//! Game data on disk and the asset store
//!
//! Layout under the game root:
//!   data/levels/  — level files, played in filename order
//!   data/assets/  — background, HUD and screen images
//!   data/sounds/  — one WAV per audio cue
//!
//! Image paths inside level files are resolved against the game root.

pub mod bitmap;
pub mod sound;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::game::platform::{Cue, Sprite, SpriteId};
use bitmap::DecodedBitmap;
use sound::SoundClip;

pub const LEVELS_DIR: &str = "data/levels";
pub const SOUNDS_DIR: &str = "data/sounds";

#[derive(Error, Debug)]
pub enum AssetLoadError {
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read sound {path}: {source}")]
    Sound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sound file is empty: {0}")]
    EmptySound(PathBuf),

    #[error("Failed to decode sound {path}: {source}")]
    SoundDecode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Central asset store — decoded images (by id) and preloaded sound clips
pub struct AssetStore {
    /// Base path to game data
    pub game_dir: PathBuf,
    images: Vec<DecodedBitmap>,
    image_ids: HashMap<PathBuf, SpriteId>,
    clips: HashMap<Cue, SoundClip>,
}

impl AssetStore {
    /// Read every cue's sound clip. Images are decoded lazily on first use.
    pub fn load(game_dir: &Path) -> Result<Self, AssetLoadError> {
        let mut clips = HashMap::new();
        for cue in Cue::ALL {
            let path = game_dir.join(SOUNDS_DIR).join(cue.file_name());
            let clip = SoundClip::read(&path)?;
            tracing::debug!("Sound {:?}: {} ({} bytes)", cue, path.display(), clip.data.len());
            clips.insert(cue, clip);
        }

        Ok(Self {
            game_dir: game_dir.to_path_buf(),
            images: Vec::new(),
            image_ids: HashMap::new(),
            clips,
        })
    }

    /// Resolve a game-relative path (absolute paths pass through)
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.game_dir.join(p)
        }
    }

    /// Decode an image once and hand out its id on every later request
    pub fn load_image(&mut self, path: &str) -> Result<Sprite, AssetLoadError> {
        let full = self.resolve(path);
        if let Some(&id) = self.image_ids.get(&full) {
            let bmp = &self.images[id.0];
            return Ok(Sprite::new(id, bmp.width, bmp.height));
        }

        let bmp = DecodedBitmap::open(&full)?;
        tracing::debug!("Image {}: {}×{}", full.display(), bmp.width, bmp.height);
        let id = SpriteId(self.images.len());
        let sprite = Sprite::new(id, bmp.width, bmp.height);
        self.images.push(bmp);
        self.image_ids.insert(full, id);
        Ok(sprite)
    }

    pub fn bitmap(&self, id: SpriteId) -> Option<&DecodedBitmap> {
        self.images.get(id.0)
    }

    pub fn clip(&self, cue: Cue) -> Option<&SoundClip> {
        self.clips.get(&cue)
    }

    pub fn total_clips(&self) -> usize {
        self.clips.len()
    }
}
