//! Game engine — minifb window, software renderer, input and audio host
//!
//! `Engine` implements the platform traits the gameplay core runs on.
//! The window is opened at the configured resolution and presented 1:1.

pub mod clock;
pub mod font;
pub mod framebuffer;
pub mod sound_engine;

use anyhow::Result;
use lanerush_common::{GameConfig, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::assets::{AssetLoadError, AssetStore};
use crate::game::platform::{
    Audio, Canvas, Cue, Directions, Input, InputFrame, Opacity, Sprite, TextSize,
};
pub use clock::FrameClock;
pub use framebuffer::FrameBuffer;
use sound_engine::SoundEngine;

const fn text_scale(size: TextSize) -> i32 {
    match size {
        TextSize::Small => 2,
        TextSize::Large => 6,
    }
}

/// Window, framebuffer and audio output for one game session
pub struct Engine {
    window: Window,
    frame: FrameBuffer,
    assets: AssetStore,
    /// None when no audio device is available; every cue is then a no-op
    sound: Option<SoundEngine>,
    prev_mouse_down: bool,
    /// present() already processed window events for the next poll
    pumped: bool,
}

impl Engine {
    pub fn new(config: &GameConfig, assets: AssetStore) -> Result<Self> {
        let size = config.screen_size();
        let (w, h) = (size.width.max(1) as usize, size.height.max(1) as usize);

        let window = Window::new(&config.window_title, w, h, WindowOptions::default())
            .map_err(|e| anyhow::anyhow!("Window creation failed: {}", e))?;
        tracing::info!("Window opened: {}×{} \"{}\"", w, h, config.window_title);

        Ok(Self {
            window,
            frame: FrameBuffer::new(w, h),
            assets,
            sound: SoundEngine::new(),
            prev_mouse_down: false,
            pumped: false,
        })
    }
}

impl Canvas for Engine {
    fn load_image(&mut self, path: &str) -> Result<Sprite, AssetLoadError> {
        self.assets.load_image(path)
    }

    fn fill(&mut self, color: u32) {
        self.frame.clear(color);
    }

    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, opacity: Opacity) {
        match self.assets.bitmap(sprite.id) {
            Some(bmp) => self.frame.blit(bmp, x, y, opacity.alpha()),
            None => tracing::warn!("Blit of unknown sprite {:?}", sprite.id),
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        self.frame.fill_rect(rect.x, rect.y, rect.width, rect.height, color);
    }

    fn outline_rect(&mut self, rect: Rect, thickness: i32, color: u32) {
        self.frame
            .outline_rect(rect.x, rect.y, rect.width, rect.height, thickness, color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: TextSize, color: u32) {
        font::draw_text(&mut self.frame, x, y, text, text_scale(size), color);
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, size: TextSize, color: u32) {
        font::draw_text_centered(&mut self.frame, cx, cy, text, text_scale(size), color);
    }

    fn line_height(&self, size: TextSize) -> i32 {
        font::line_height(text_scale(size))
    }

    fn present(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.frame.pixels, self.frame.width, self.frame.height)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
        self.pumped = true;
        if let Some(sound) = self.sound.as_mut() {
            sound.gc();
        }
        Ok(())
    }
}

impl Audio for Engine {
    fn play(&mut self, cue: Cue) {
        if let (Some(sound), Some(clip)) = (self.sound.as_mut(), self.assets.clip(cue)) {
            sound.play(cue, clip);
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Some(sound) = self.sound.as_mut() {
            sound.stop(cue);
        }
    }

    fn pause(&mut self, cue: Cue) {
        if let Some(sound) = self.sound.as_mut() {
            sound.pause(cue);
        }
    }

    fn resume(&mut self, cue: Cue) {
        if let Some(sound) = self.sound.as_mut() {
            sound.resume(cue);
        }
    }
}

impl Input for Engine {
    fn poll(&mut self) -> InputFrame {
        // Pumping twice per frame would swallow key-press edges
        if !std::mem::take(&mut self.pumped) {
            self.window.update();
        }

        if !self.window.is_open() {
            return InputFrame {
                quit: true,
                ..Default::default()
            };
        }

        let mouse_down = self.window.get_mouse_down(MouseButton::Left);
        let click = if mouse_down && !self.prev_mouse_down {
            self.window
                .get_mouse_pos(MouseMode::Discard)
                .map(|(x, y)| (x as i32, y as i32))
        } else {
            None
        };
        self.prev_mouse_down = mouse_down;

        InputFrame {
            quit: false,
            keys: Directions {
                up: self.window.is_key_down(Key::Up),
                down: self.window.is_key_down(Key::Down),
                left: self.window.is_key_down(Key::Left),
                right: self.window.is_key_down(Key::Right),
            },
            click,
            confirm: self.window.is_key_pressed(Key::Enter, KeyRepeat::No),
            cancel: self.window.is_key_pressed(Key::Escape, KeyRepeat::No),
        }
    }
}
