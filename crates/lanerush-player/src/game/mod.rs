//! Game flow — level loading, the per-frame loop, and run progression
//!
//! State machine per run:
//!   LoadingLevel  — parse level N, reset timer, "Level N" banner, motion loop
//!   Playing       — input → collisions → (lives left?) → update → draw → timer
//!   LevelComplete — "Level N Completed" banner, then next level or Won
//!   GameOver      — Start / Exit menu; Start resets to level 1 with fresh lives
//!   Won           — win screen, run ends
//!
//! A window-close (quit) ends the run from Playing or GameOver. Display
//! holds block and do not look at input.

pub mod collision;
pub mod entities;
pub mod level;
pub mod platform;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use lanerush_common::{FrameRate, GameConfig, Rect, Size};
use rand::rngs::StdRng;

use crate::assets::AssetLoadError;
use collision::ContactEvent;
use entities::{PlayerCar, PlayerTuning};
use level::{Level, LevelManifest};
use platform::{
    Cue, InputFrame, Opacity, Pacer, Platform, Sprite, TextSize, BLACK, LIGHT_GREEN, RED, WHITE,
};

pub const BACKGROUND_IMAGE: &str = "data/assets/background.png";
pub const COLLISION_IMAGE: &str = "data/assets/collision.png";
pub const HEART_IMAGE: &str = "data/assets/heart.png";
pub const WIN_IMAGE: &str = "data/assets/win_screen.jpg";
pub const GAME_OVER_IMAGE: &str = "data/assets/game_over.jpg";

/// Horizontal spacing of the life hearts in the HUD
const HEART_SPACING: i32 = 40;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every level cleared
    Won,
    /// Exit chosen on the game-over screen
    Exited,
    /// Window closed
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    LoadingLevel,
    Playing,
    LevelComplete,
    GameOver,
    Won,
}

/// Result of one Playing frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameResult {
    Continue,
    TimeUp,
    OutOfLives,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Start,
    Exit,
    Quit,
}

/// Progress through the level sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// 1-based index of the level being played
    pub level_index: usize,
    /// Lives brought in from the previous level; None on a fresh game
    pub carried_lives: Option<u32>,
}

impl RunState {
    pub fn fresh() -> Self {
        Self {
            level_index: 1,
            carried_lives: None,
        }
    }
}

/// Images used outside of levels
struct Artwork {
    background: Sprite,
    collision: Sprite,
    heart: Sprite,
    win: Sprite,
    game_over: Sprite,
}

impl Artwork {
    fn load<P: Platform>(platform: &mut P) -> Result<Self, AssetLoadError> {
        Ok(Self {
            background: platform.load_image(BACKGROUND_IMAGE)?,
            collision: platform.load_image(COLLISION_IMAGE)?,
            heart: platform.load_image(HEART_IMAGE)?,
            win: platform.load_image(WIN_IMAGE)?,
            game_over: platform.load_image(GAME_OVER_IMAGE)?,
        })
    }
}

/// Start / Exit buttons of the game-over screen
fn menu_buttons(bounds: Size) -> (Rect, Rect) {
    let x = bounds.width / 2 - 120;
    let y = bounds.height / 2;
    (Rect::new(x, y + 50, 240, 50), Rect::new(x, y + 120, 240, 50))
}

/// Owns the active level and drives the whole run
pub struct Game<P: Platform, C: Pacer> {
    pub(crate) platform: P,
    pub(crate) clock: C,
    config: GameConfig,
    rate: FrameRate,
    tuning: PlayerTuning,
    bounds: Size,
    manifest: LevelManifest,
    artwork: Artwork,
    rng: StdRng,
    pub(crate) run: RunState,
    pub(crate) level: Option<Level>,
}

impl<P: Platform, C: Pacer> Game<P, C> {
    pub fn new(
        mut platform: P,
        clock: C,
        config: GameConfig,
        manifest: LevelManifest,
        rng: StdRng,
    ) -> Result<Self, AssetLoadError> {
        let artwork = Artwork::load(&mut platform)?;
        let rate = config.frame_rate();
        Ok(Self {
            platform,
            clock,
            tuning: PlayerTuning::from_config(&config, &rate),
            bounds: config.screen_size(),
            rate,
            config,
            manifest,
            artwork,
            rng,
            run: RunState::fresh(),
            level: None,
        })
    }

    /// Play until the run is won, exited or the window closes
    pub fn run(&mut self) -> Result<Outcome> {
        if self.manifest.is_empty() {
            anyhow::bail!("No levels to play");
        }
        tracing::info!("Run started: {} level(s)", self.manifest.len());
        self.platform.play(Cue::Background);

        let mut state = FlowState::LoadingLevel;
        loop {
            state = match state {
                FlowState::LoadingLevel => {
                    self.load_current_level()?;
                    FlowState::Playing
                }
                FlowState::Playing => match self.play_frame()? {
                    FrameResult::Continue => FlowState::Playing,
                    FrameResult::TimeUp => FlowState::LevelComplete,
                    FrameResult::OutOfLives => FlowState::GameOver,
                    FrameResult::Quit => return Ok(Outcome::Quit),
                },
                FlowState::LevelComplete => {
                    self.show_level_completed()?;
                    if self.advance_level() {
                        FlowState::LoadingLevel
                    } else {
                        FlowState::Won
                    }
                }
                FlowState::GameOver => match self.game_over_menu()? {
                    MenuChoice::Start => {
                        self.reset_run();
                        FlowState::LoadingLevel
                    }
                    MenuChoice::Exit => return Ok(Outcome::Exited),
                    MenuChoice::Quit => return Ok(Outcome::Quit),
                },
                FlowState::Won => {
                    self.show_win()?;
                    return Ok(Outcome::Won);
                }
            };
        }
    }

    fn load_current_level(&mut self) -> Result<()> {
        let index = self.run.level_index;
        let path = self
            .manifest
            .get(index)
            .with_context(|| format!("No level file for level {}", index))?
            .to_path_buf();
        let timer = self
            .rate
            .seconds_to_frames(self.config.level_time_secs as f64);

        let mut level = Level::load(
            index,
            &path,
            &mut self.platform,
            &self.tuning,
            &mut self.rng,
            timer,
        )
        .with_context(|| format!("Failed to load level {} ({})", index, path.display()))?;

        if let (Some(lives), Some(player)) = (self.run.carried_lives, level.player_mut()) {
            player.set_lives(lives);
        }
        tracing::info!(
            "Level {} loaded: {} entities, {} frames, {} lives",
            index,
            level.entities.len(),
            timer,
            level.player_lives()
        );
        self.level = Some(level);

        self.platform.fill(BLACK);
        self.banner(&[format!("Level {}", index)], WHITE)?;
        self.platform.play(Cue::CarsMotion);
        Ok(())
    }

    fn play_frame(&mut self) -> Result<FrameResult> {
        let Some(level) = self.level.as_mut() else {
            anyhow::bail!("No level loaded");
        };
        if level.is_time_up() {
            return Ok(FrameResult::TimeUp);
        }

        let input: InputFrame = self.platform.poll();
        if input.quit {
            tracing::info!("Quit during level {}", level.index);
            return Ok(FrameResult::Quit);
        }

        if let Some(player) = level.player_mut() {
            player.handle_input(input.keys, self.bounds);
        }

        let events = collision::resolve(&mut level.entities);
        if level.player().map_or(true, PlayerCar::is_out_of_lives) {
            // Still show the final crash before the game-over screen
            self.present_contacts(&events)?;
            tracing::info!("Out of lives on level {}", self.run.level_index);
            return Ok(FrameResult::OutOfLives);
        }
        self.present_contacts(&events)?;

        let Some(level) = self.level.as_mut() else {
            anyhow::bail!("No level loaded");
        };
        level.update(self.bounds, &mut self.rng);
        self.draw_level()?;

        let Some(level) = self.level.as_mut() else {
            anyhow::bail!("No level loaded");
        };
        level.count_down();
        self.clock.tick();

        Ok(if level.is_time_up() {
            FrameResult::TimeUp
        } else {
            FrameResult::Continue
        })
    }

    /// Crash indicator and sounds for this frame's contacts
    fn present_contacts(&mut self, events: &[ContactEvent]) -> Result<()> {
        for event in events {
            match *event {
                ContactEvent::Hit { x, y } => {
                    self.platform
                        .blit(&self.artwork.collision, x, y, Opacity::Opaque);
                    self.platform.present()?;
                    self.platform.pause(Cue::CarsMotion);
                    self.platform.play(Cue::Collision);
                    self.clock.hold(self.config.collision_hold_ms);
                    self.platform.resume(Cue::CarsMotion);
                }
                ContactEvent::BonusCollected { .. } => {
                    self.platform.play(Cue::Bonus);
                }
            }
        }
        Ok(())
    }

    fn draw_level(&mut self) -> Result<()> {
        let Some(level) = self.level.as_ref() else {
            return Ok(());
        };
        let platform = &mut self.platform;

        platform.blit(&self.artwork.background, 0, 0, Opacity::Opaque);
        for entity in &level.entities {
            let rect = entity.rect();
            platform.blit(&entity.body().sprite, rect.x, rect.y, entity.opacity());
        }

        let seconds = self.rate.frames_to_seconds(level.timer);
        platform.draw_text(
            &format!("Time: {}", seconds),
            self.bounds.width - 120,
            25,
            TextSize::Small,
            WHITE,
        );
        for i in 0..level.player_lives() as i32 {
            platform.blit(&self.artwork.heart, 10 + i * HEART_SPACING, 10, Opacity::Opaque);
        }

        platform.present()
    }

    /// Centered lines, presented and held
    fn banner(&mut self, lines: &[String], color: u32) -> Result<()> {
        let line_height = self.platform.line_height(TextSize::Large);
        let cx = self.bounds.width / 2;
        let cy = self.bounds.height / 2;
        for (i, line) in lines.iter().enumerate() {
            self.platform.draw_text_centered(
                line,
                cx,
                cy + i as i32 * line_height,
                TextSize::Large,
                color,
            );
        }
        self.platform.present()?;
        self.clock.hold(self.config.banner_hold_ms);
        Ok(())
    }

    fn show_level_completed(&mut self) -> Result<()> {
        let index = self.run.level_index;
        tracing::info!("Level {} completed", index);
        self.platform.stop(Cue::CarsMotion);
        self.platform.play(Cue::LevelCompleted);
        self.banner(
            &[format!("Level {}", index), "Completed".to_string()],
            LIGHT_GREEN,
        )
    }

    /// Move to the next level, carrying lives. False when none remain.
    fn advance_level(&mut self) -> bool {
        self.run.carried_lives = self.level.as_ref().map(Level::player_lives);
        self.run.level_index += 1;
        self.run.level_index <= self.manifest.len()
    }

    fn reset_run(&mut self) {
        tracing::info!("New game");
        self.run = RunState::fresh();
        self.level = None;
        self.platform.play(Cue::Background);
    }

    fn show_win(&mut self) -> Result<()> {
        tracing::info!("All levels completed");
        self.platform.stop(Cue::Background);
        self.platform.stop(Cue::CarsMotion);
        self.platform.play(Cue::Win);
        self.platform.blit(&self.artwork.win, 0, 0, Opacity::Opaque);
        self.platform.present()?;
        self.clock.hold(self.config.win_hold_ms);
        Ok(())
    }

    fn draw_game_over(&mut self) -> Result<()> {
        let (start, exit) = menu_buttons(self.bounds);
        let platform = &mut self.platform;

        platform.blit(&self.artwork.game_over, 0, 0, Opacity::Opaque);
        for (rect, label) in [(start, "START NEW GAME"), (exit, "EXIT")] {
            platform.fill_rect(rect, RED);
            platform.outline_rect(rect, 2, WHITE);
            let (cx, cy) = rect.center();
            platform.draw_text_centered(label, cx, cy, TextSize::Small, WHITE);
        }
        platform.present()
    }

    /// Show the game-over screen and wait for Start, Exit or quit
    fn game_over_menu(&mut self) -> Result<MenuChoice> {
        self.platform.stop(Cue::Background);
        self.platform.stop(Cue::CarsMotion);
        self.platform.play(Cue::GameOver);
        self.draw_game_over()?;

        let (start, exit) = menu_buttons(self.bounds);
        loop {
            let input = self.platform.poll();
            if input.quit {
                return Ok(MenuChoice::Quit);
            }
            let clicked = |rect: Rect| input.click.is_some_and(|(x, y)| rect.contains_point(x, y));

            if input.confirm || clicked(start) {
                self.platform.stop(Cue::GameOver);
                return Ok(MenuChoice::Start);
            }
            if input.cancel || clicked(exit) {
                tracing::info!("Exit chosen on game-over screen");
                return Ok(MenuChoice::Exit);
            }
            self.clock.tick();
        }
    }
}
