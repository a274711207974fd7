//! Entity model — the player car and everything scrolling down the road
//!
//! Every moving entity advances `y += speed` once per frame. Traffic, road
//! obstacles and bonus items wrap back above the screen at a random x once
//! their top edge passes the bottom of the canvas. The player car does not
//! drift; it moves only from keyboard input.

use std::ops::RangeInclusive;

use lanerush_common::{FrameRate, GameConfig, Rect, Size};
use rand::Rng;

use super::platform::{Directions, Opacity, Sprite};

/// Speed range for obstacle cars and road obstacles, rolled once per entity
pub const HAZARD_SPEED: RangeInclusive<i32> = 3..=7;
pub const BONUS_SPEED: i32 = 1;

/// Position, size and speed shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub speed: i32,
    pub sprite: Sprite,
}

impl Body {
    /// Body sized to its sprite with its center at (x, y)
    pub fn centered(x: i32, y: i32, speed: i32, sprite: Sprite) -> Self {
        Self {
            rect: Rect::centered_at(x, y, sprite.size()),
            speed,
            sprite,
        }
    }

    fn advance(&mut self) {
        self.rect.y = self.rect.y.saturating_add(self.speed);
    }
}

/// Per-run constants for the player car, derived from the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTuning {
    pub speed: i32,
    pub total_lives: u32,
    pub invincibility_frames: u32,
    pub blink_interval: u32,
}

impl PlayerTuning {
    pub fn from_config(config: &GameConfig, rate: &FrameRate) -> Self {
        Self {
            speed: config.player_speed,
            total_lives: config.total_lives,
            invincibility_frames: rate.seconds_to_frames(config.invincibility_secs),
            // Never zero: used as a modulus
            blink_interval: rate.seconds_to_frames(config.blink_interval_secs).max(1),
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::from_config(&GameConfig::default(), &FrameRate::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCar {
    pub body: Body,
    pub total_lives: u32,
    /// Always within 0..=total_lives
    pub current_lives: u32,
    pub invincible: bool,
    pub invincible_frames: u32,
    pub blink_counter: u32,
    pub opacity: Opacity,
    invincibility_frames: u32,
    blink_interval: u32,
}

impl PlayerCar {
    pub fn new(x: i32, y: i32, sprite: Sprite, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::centered(x, y, tuning.speed, sprite),
            total_lives: tuning.total_lives,
            current_lives: tuning.total_lives,
            invincible: false,
            invincible_frames: 0,
            blink_counter: 0,
            opacity: Opacity::Opaque,
            invincibility_frames: tuning.invincibility_frames,
            blink_interval: tuning.blink_interval,
        }
    }

    /// Move by `speed` on each held axis, but only while the car is not yet
    /// touching that canvas edge. Diagonals are full speed on both axes.
    pub fn handle_input(&mut self, keys: Directions, bounds: Size) {
        let speed = self.body.speed;
        let rect = &mut self.body.rect;
        if keys.up && rect.top() > 0 {
            rect.y -= speed;
        }
        if keys.down && rect.bottom() < bounds.height {
            rect.y += speed;
        }
        if keys.left && rect.left() > 0 {
            rect.x -= speed;
        }
        if keys.right && rect.right() < bounds.width {
            rect.x += speed;
        }
    }

    /// Count down invincibility and blink while it lasts
    pub fn update(&mut self) {
        if !self.invincible {
            self.opacity = Opacity::Opaque;
            return;
        }

        self.invincible_frames = self.invincible_frames.saturating_sub(1);
        self.blink_counter += 1;
        if self.blink_counter % self.blink_interval == 0 {
            self.opacity = self.opacity.toggled();
        }

        if self.invincible_frames == 0 {
            self.invincible = false;
            self.opacity = Opacity::Opaque;
        }
    }

    pub fn activate_invincibility(&mut self) {
        self.invincible = true;
        self.invincible_frames = self.invincibility_frames;
        self.blink_counter = 0;
        self.opacity = Opacity::Dim;
    }

    pub fn lose_life(&mut self) {
        self.current_lives = self.current_lives.saturating_sub(1);
    }

    /// Add a life unless already full. Returns whether a life was added.
    pub fn gain_life(&mut self) -> bool {
        if self.current_lives < self.total_lives {
            self.current_lives += 1;
            true
        } else {
            false
        }
    }

    /// Carry a life count over from a previous level, capped at the maximum
    pub fn set_lives(&mut self, lives: u32) {
        self.current_lives = lives.min(self.total_lives);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.current_lives == 0
    }
}

/// Entities that scroll down the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrifterKind {
    /// Traffic. Hazard.
    ObstacleCar,
    /// Static road obstacle. Hazard.
    Obstacle,
    /// Restores a life on pickup
    Bonus,
}

impl DrifterKind {
    pub const fn is_hazard(self) -> bool {
        matches!(self, DrifterKind::ObstacleCar | DrifterKind::Obstacle)
    }

    /// Band above the canvas a wrapped entity reappears in
    fn respawn_band(self, height: i32) -> (i32, i32) {
        let (a, b) = match self {
            DrifterKind::ObstacleCar => (-height, -100),
            DrifterKind::Obstacle => (-100, -50),
            DrifterKind::Bonus => (-height, -height),
        };
        (a.min(b), a.max(b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drifter {
    pub kind: DrifterKind,
    pub body: Body,
}

impl Drifter {
    pub fn obstacle_car(x: i32, y: i32, speed: i32, sprite: Sprite) -> Self {
        Self {
            kind: DrifterKind::ObstacleCar,
            body: Body::centered(x, y, speed, sprite),
        }
    }

    pub fn obstacle<R: Rng>(x: i32, y: i32, sprite: Sprite, rng: &mut R) -> Self {
        Self {
            kind: DrifterKind::Obstacle,
            body: Body::centered(x, y, rng.gen_range(HAZARD_SPEED), sprite),
        }
    }

    pub fn bonus(x: i32, y: i32, sprite: Sprite) -> Self {
        Self {
            kind: DrifterKind::Bonus,
            body: Body::centered(x, y, BONUS_SPEED, sprite),
        }
    }

    /// Scroll down; wrap above the canvas once fully past the bottom edge.
    /// Speed is kept across wraps.
    pub fn update<R: Rng>(&mut self, bounds: Size, rng: &mut R) {
        self.body.advance();
        if self.body.rect.top() > bounds.height {
            self.respawn(bounds, rng);
        }
    }

    fn respawn<R: Rng>(&mut self, bounds: Size, rng: &mut R) {
        let rect = &mut self.body.rect;
        let max_x = (bounds.width - rect.width).max(0);
        let (lo, hi) = self.kind.respawn_band(rect.height);
        rect.x = rng.gen_range(0..=max_x);
        rect.y = rng.gen_range(lo..=hi);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Player(PlayerCar),
    Drifter(Drifter),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Drifter(d) => &d.body,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body().rect
    }

    pub fn opacity(&self) -> Opacity {
        match self {
            Entity::Player(p) => p.opacity,
            Entity::Drifter(_) => Opacity::Opaque,
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, Entity::Drifter(d) if d.kind.is_hazard())
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, Entity::Drifter(d) if d.kind == DrifterKind::Bonus)
    }

    pub fn update<R: Rng>(&mut self, bounds: Size, rng: &mut R) {
        match self {
            Entity::Player(p) => p.update(),
            Entity::Drifter(d) => d.update(bounds, rng),
        }
    }
}
