//! Host services the gameplay core runs on
//!
//! The engine implements these over minifb + rodio; tests implement them
//! headless. Nothing in `game` talks to a window or an audio device directly.

use lanerush_common::{Rect, Size};

use crate::assets::AssetLoadError;

pub const WHITE: u32 = 0xFFFFFFFF;
pub const BLACK: u32 = 0xFF000000;
pub const LIGHT_GREEN: u32 = 0xFF90EE90;
pub const RED: u32 = 0xFFFF0000;

/// Handle to a decoded image owned by the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub usize);

/// An image handle plus its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub id: SpriteId,
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    pub const fn new(id: SpriteId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }
}

/// Draw opacity. The player car dims while invincible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opacity {
    #[default]
    Opaque,
    Dim,
}

impl Opacity {
    pub const fn alpha(self) -> u8 {
        match self {
            Opacity::Opaque => 255,
            Opacity::Dim => 64,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Opacity::Opaque => Opacity::Dim,
            Opacity::Dim => Opacity::Opaque,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// HUD and buttons
    Small,
    /// Banners
    Large,
}

/// Named audio cues and the mixer channel each one owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Background,
    CarsMotion,
    GameOver,
    Collision,
    Bonus,
    LevelCompleted,
    Win,
}

impl Cue {
    pub const ALL: [Cue; 7] = [
        Cue::Background,
        Cue::CarsMotion,
        Cue::GameOver,
        Cue::Collision,
        Cue::Bonus,
        Cue::LevelCompleted,
        Cue::Win,
    ];

    /// Dedicated channel, or None for one-shots mixed independently
    pub const fn channel(self) -> Option<usize> {
        match self {
            Cue::Background => Some(0),
            Cue::CarsMotion => Some(1),
            Cue::GameOver => Some(2),
            Cue::Collision | Cue::Bonus | Cue::LevelCompleted | Cue::Win => None,
        }
    }

    /// Channel cues loop forever, one-shots play once
    pub const fn looping(self) -> bool {
        self.channel().is_some()
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Cue::Background => "background.wav",
            Cue::CarsMotion => "cars_motion.wav",
            Cue::GameOver => "game_over.wav",
            Cue::Collision => "collision.wav",
            Cue::Bonus => "bonus.wav",
            Cue::LevelCompleted => "level_completed.wav",
            Cue::Win => "winner.wav",
        }
    }
}

/// Held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything input-related that happened since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Window closed
    pub quit: bool,
    pub keys: Directions,
    /// Left mouse press, in canvas coordinates
    pub click: Option<(i32, i32)>,
    /// Enter
    pub confirm: bool,
    /// Escape
    pub cancel: bool,
}

pub trait Canvas {
    /// Decode (or fetch from cache) the image at a game-relative path
    fn load_image(&mut self, path: &str) -> Result<Sprite, AssetLoadError>;
    fn fill(&mut self, color: u32);
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, opacity: Opacity);
    fn fill_rect(&mut self, rect: Rect, color: u32);
    fn outline_rect(&mut self, rect: Rect, thickness: i32, color: u32);
    /// Text with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: TextSize, color: u32);
    /// Text centered on (cx, cy)
    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, size: TextSize, color: u32);
    fn line_height(&self, size: TextSize) -> i32;
    /// Flip the finished frame to the display
    fn present(&mut self) -> anyhow::Result<()>;
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
    fn pause(&mut self, cue: Cue);
    fn resume(&mut self, cue: Cue);
}

pub trait Input {
    fn poll(&mut self) -> InputFrame;
}

/// Frame pacing and blocking display holds
pub trait Pacer {
    /// Sleep until the next frame is due; returns milliseconds since the previous tick
    fn tick(&mut self) -> u64;
    /// Block for a fixed real-time duration
    fn hold(&mut self, ms: u64);
}

pub trait Platform: Canvas + Audio + Input {}

impl<T: Canvas + Audio + Input> Platform for T {}
