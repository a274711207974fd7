//! Headless platform and clock for tests

use std::collections::{HashMap, VecDeque};

use lanerush_common::Rect;

use super::platform::{
    Audio, Canvas, Cue, InputFrame, Input, Opacity, Pacer, Sprite, SpriteId, TextSize,
};
use crate::assets::AssetLoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioOp {
    Play,
    Stop,
    Pause,
    Resume,
}

/// Records draw calls and audio, replays scripted input.
///
/// `inputs` feeds gameplay frames. Once a `game_over_sprite` blit is seen
/// and until the next fill, `menu_inputs` is used instead, so a test can
/// script the game-over choice without counting frames.
pub struct FakePlatform {
    pub image_sizes: HashMap<String, (u32, u32)>,
    pub missing_images: Vec<String>,
    pub loaded: Vec<String>,
    pub texts: Vec<String>,
    pub blits: Vec<(SpriteId, i32, i32, Opacity)>,
    pub audio: Vec<(AudioOp, Cue)>,
    pub presents: usize,
    pub polls: usize,
    pub inputs: VecDeque<InputFrame>,
    pub menu_inputs: VecDeque<InputFrame>,
    pub game_over_sprite: Option<String>,
    on_menu: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            image_sizes: HashMap::new(),
            missing_images: Vec::new(),
            loaded: Vec::new(),
            texts: Vec::new(),
            blits: Vec::new(),
            audio: Vec::new(),
            presents: 0,
            polls: 0,
            inputs: VecDeque::new(),
            menu_inputs: VecDeque::new(),
            game_over_sprite: None,
            on_menu: false,
        }
    }

    fn sprite_id(&self, path: &str) -> Option<SpriteId> {
        self.loaded.iter().position(|p| p == path).map(SpriteId)
    }

    pub fn count_text(&self, text: &str) -> usize {
        self.texts.iter().filter(|t| t.as_str() == text).count()
    }

    pub fn count_audio(&self, op: AudioOp, cue: Cue) -> usize {
        self.audio.iter().filter(|&&(o, c)| o == op && c == cue).count()
    }

    pub fn count_blits_of(&self, path: &str) -> usize {
        self.opacities_of(path).len()
    }

    /// Opacity of every blit of `path`, in draw order
    pub fn opacities_of(&self, path: &str) -> Vec<Opacity> {
        match self.sprite_id(path) {
            Some(id) => self.blits.iter().filter(|b| b.0 == id).map(|b| b.3).collect(),
            None => Vec::new(),
        }
    }
}

impl Canvas for FakePlatform {
    fn load_image(&mut self, path: &str) -> Result<Sprite, AssetLoadError> {
        if self.missing_images.iter().any(|p| p == path) {
            return Err(AssetLoadError::Image {
                path: path.into(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "missing",
                )),
            });
        }
        let (w, h) = self.image_sizes.get(path).copied().unwrap_or((40, 60));
        let id = match self.sprite_id(path) {
            Some(id) => id,
            None => {
                self.loaded.push(path.to_string());
                SpriteId(self.loaded.len() - 1)
            }
        };
        Ok(Sprite::new(id, w, h))
    }

    fn fill(&mut self, _color: u32) {
        self.on_menu = false;
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, opacity: Opacity) {
        if let Some(name) = &self.game_over_sprite {
            if self.sprite_id(name) == Some(sprite.id) {
                self.on_menu = true;
            }
        }
        self.blits.push((sprite.id, x, y, opacity));
    }

    fn fill_rect(&mut self, _rect: Rect, _color: u32) {}

    fn outline_rect(&mut self, _rect: Rect, _thickness: i32, _color: u32) {}

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _size: TextSize, _color: u32) {
        self.texts.push(text.to_string());
    }

    fn draw_text_centered(&mut self, text: &str, _cx: i32, _cy: i32, _size: TextSize, _color: u32) {
        self.texts.push(text.to_string());
    }

    fn line_height(&self, size: TextSize) -> i32 {
        match size {
            TextSize::Small => 24,
            TextSize::Large => 56,
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

impl Audio for FakePlatform {
    fn play(&mut self, cue: Cue) {
        self.audio.push((AudioOp::Play, cue));
    }

    fn stop(&mut self, cue: Cue) {
        self.audio.push((AudioOp::Stop, cue));
    }

    fn pause(&mut self, cue: Cue) {
        self.audio.push((AudioOp::Pause, cue));
    }

    fn resume(&mut self, cue: Cue) {
        self.audio.push((AudioOp::Resume, cue));
    }
}

impl Input for FakePlatform {
    fn poll(&mut self) -> InputFrame {
        self.polls += 1;
        if self.on_menu {
            // An unscripted menu would wait forever; close the window instead
            return self.menu_inputs.pop_front().unwrap_or(InputFrame {
                quit: true,
                ..Default::default()
            });
        }
        self.inputs.pop_front().unwrap_or_default()
    }
}

/// Pacer that never sleeps
#[derive(Debug, Default)]
pub struct FakeClock {
    pub ticks: usize,
    pub holds: Vec<u64>,
}

impl Pacer for FakeClock {
    fn tick(&mut self) -> u64 {
        self.ticks += 1;
        16
    }

    fn hold(&mut self, ms: u64) {
        self.holds.push(ms);
    }
}
