//! Level files and the active level
//!
//! Format, one entity per line, blank lines ignored:
//!
//! ```text
//! player_car   400 500 data/assets/player_car.png
//! obstacle_car 200 -50 data/assets/obstacle_car.png
//! obstacle     600 -300 data/assets/cone.png
//! bonus        300 -700 data/assets/bonus.png
//! ```
//!
//! `x`/`y` is the sprite center. Unknown entity types are skipped so newer
//! level files still load. Levels play in filename order.

use std::path::{Path, PathBuf};

use lanerush_common::Size;
use rand::Rng;
use thiserror::Error;

use super::entities::{Drifter, Entity, PlayerCar, PlayerTuning, HAZARD_SPEED};
use super::platform::Canvas;
use crate::assets::AssetLoadError;

#[derive(Error, Debug)]
pub enum LevelLoadError {
    #[error("Failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected `<type> <x> <y> <image>`, found {found} token(s)")]
    TooFewTokens { line: usize, found: usize },

    #[error("line {line}: coordinate `{value}` is not an integer")]
    BadCoordinate { line: usize, value: String },

    #[error("line {line}: coordinate {value} is outside ±{max}", max = MAX_COORDINATE)]
    CoordinateOutOfRange { line: usize, value: i64 },

    #[error("No level files in {0}")]
    NoLevels(PathBuf),

    #[error("Level {0} has no player_car")]
    NoPlayer(usize),

    #[error(transparent)]
    Asset(#[from] AssetLoadError),
}

/// Entity type tag in the first column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityTag {
    PlayerCar,
    ObstacleCar,
    Obstacle,
    Bonus,
}

impl EntityTag {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "player_car" => Some(EntityTag::PlayerCar),
            "obstacle_car" => Some(EntityTag::ObstacleCar),
            "obstacle" => Some(EntityTag::Obstacle),
            "bonus" => Some(EntityTag::Bonus),
            _ => None,
        }
    }
}

/// Largest accepted |x| or |y|. Keeps sprite edges and per-frame motion far
/// from i32 overflow.
const MAX_COORDINATE: i32 = 1_000_000;

fn parse_coordinate(token: &str, line: usize) -> Result<i32, LevelLoadError> {
    let value: i64 = token.parse().map_err(|_| LevelLoadError::BadCoordinate {
        line,
        value: token.to_string(),
    })?;
    if value.unsigned_abs() > MAX_COORDINATE as u64 {
        return Err(LevelLoadError::CoordinateOutOfRange { line, value });
    }
    Ok(value as i32)
}

/// Parse level text into entities, in file order. Images are loaded through
/// the canvas so every entity gets its sprite's bounding box.
pub fn parse_level<C, R>(
    source: &str,
    canvas: &mut C,
    tuning: &PlayerTuning,
    rng: &mut R,
) -> Result<Vec<Entity>, LevelLoadError>
where
    C: Canvas + ?Sized,
    R: Rng,
{
    let mut entities = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(LevelLoadError::TooFewTokens {
                line: line_no,
                found: tokens.len(),
            });
        }
        let x = parse_coordinate(tokens[1], line_no)?;
        let y = parse_coordinate(tokens[2], line_no)?;
        let image_path = tokens[3];

        let Some(tag) = EntityTag::parse(tokens[0]) else {
            tracing::debug!("line {}: skipping unknown entity type '{}'", line_no, tokens[0]);
            continue;
        };

        let sprite = canvas.load_image(image_path)?;
        let entity = match tag {
            EntityTag::PlayerCar => Entity::Player(PlayerCar::new(x, y, sprite, tuning)),
            EntityTag::ObstacleCar => {
                let speed = rng.gen_range(HAZARD_SPEED);
                Entity::Drifter(Drifter::obstacle_car(x, y, speed, sprite))
            }
            EntityTag::Obstacle => Entity::Drifter(Drifter::obstacle(x, y, sprite, rng)),
            EntityTag::Bonus => Entity::Drifter(Drifter::bonus(x, y, sprite)),
        };
        entities.push(entity);
    }

    Ok(entities)
}

/// Ordered list of level files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelManifest {
    files: Vec<PathBuf>,
}

impl LevelManifest {
    /// Every regular, non-hidden file in `dir`, sorted by filename
    pub fn discover(dir: &Path) -> Result<Self, LevelLoadError> {
        let io_err = |source| LevelLoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() {
                continue;
            }
            let hidden = path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true);
            if !hidden {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(LevelLoadError::NoLevels(dir.to_path_buf()));
        }
        let manifest = Self::from_files(files);
        tracing::info!("Found {} level(s) in {}", manifest.len(), dir.display());
        Ok(manifest)
    }

    pub fn from_files(mut files: Vec<PathBuf>) -> Self {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Level file by 1-based index
    pub fn get(&self, index: usize) -> Option<&Path> {
        index
            .checked_sub(1)
            .and_then(|i| self.files.get(i))
            .map(PathBuf::as_path)
    }
}

/// The level being played: its entities and countdown
#[derive(Debug, Clone)]
pub struct Level {
    /// 1-based
    pub index: usize,
    pub entities: Vec<Entity>,
    /// Frames left
    pub timer: u32,
}

impl Level {
    pub fn new(index: usize, entities: Vec<Entity>, timer: u32) -> Result<Self, LevelLoadError> {
        if !entities.iter().any(|e| matches!(e, Entity::Player(_))) {
            return Err(LevelLoadError::NoPlayer(index));
        }
        Ok(Self {
            index,
            entities,
            timer,
        })
    }

    /// Read and parse a level file
    pub fn load<C, R>(
        index: usize,
        path: &Path,
        canvas: &mut C,
        tuning: &PlayerTuning,
        rng: &mut R,
        timer: u32,
    ) -> Result<Self, LevelLoadError>
    where
        C: Canvas + ?Sized,
        R: Rng,
    {
        let text = std::fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entities = parse_level(&text, canvas, tuning, rng)?;
        tracing::debug!("Level {}: {} entities from {}", index, entities.len(), path.display());
        Self::new(index, entities, timer)
    }

    /// The first player car in the level
    pub fn player(&self) -> Option<&PlayerCar> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            Entity::Drifter(_) => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerCar> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            Entity::Drifter(_) => None,
        })
    }

    pub fn player_lives(&self) -> u32 {
        self.player().map_or(0, |p| p.current_lives)
    }

    /// Advance every entity one frame
    pub fn update<R: Rng>(&mut self, bounds: Size, rng: &mut R) {
        for entity in &mut self.entities {
            entity.update(bounds, rng);
        }
    }

    pub fn count_down(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    pub fn is_time_up(&self) -> bool {
        self.timer == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::FakePlatform;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(source: &str) -> Result<Vec<Entity>, LevelLoadError> {
        let mut canvas = FakePlatform::new();
        let mut rng = StdRng::seed_from_u64(42);
        parse_level(source, &mut canvas, &PlayerTuning::default(), &mut rng)
    }

    #[test]
    fn parses_known_types_and_skips_unknown() {
        let entities =
            parse("player_car 100 200 car.png\nobstacle_car 50 0 ocar.png\nbadtype 1 2 x.png\n")
                .unwrap();
        assert_eq!(entities.len(), 2);

        match &entities[0] {
            Entity::Player(p) => {
                assert_eq!(p.body.rect.center(), (100, 200));
                assert_eq!(p.body.speed, 5);
                assert_eq!(p.current_lives, 3);
            }
            other => panic!("expected player, got {:?}", other),
        }
        match &entities[1] {
            Entity::Drifter(d) => {
                assert_eq!(d.body.rect.center(), (50, 0));
                assert!(HAZARD_SPEED.contains(&d.body.speed));
            }
            other => panic!("expected obstacle car, got {:?}", other),
        }
    }

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let entities = parse("\n   \n  bonus 10 20 b.png  \n\nobstacle 5 5 o.png\n").unwrap();
        assert_eq!(entities.len(), 2);
        assert!(entities[0].is_bonus());
        assert!(entities[1].is_hazard());
    }

    #[test]
    fn short_line_is_rejected_with_line_number() {
        let err = parse("player_car 1 2 car.png\nobstacle 1 2\n").unwrap_err();
        assert!(matches!(err, LevelLoadError::TooFewTokens { line: 2, found: 3 }));
    }

    #[test]
    fn non_integer_coordinate_is_rejected() {
        let err = parse("player_car 1.5 2 car.png\n").unwrap_err();
        match err {
            LevelLoadError::BadCoordinate { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn huge_coordinates_are_rejected() {
        let err = parse("player_car 400 500 car.png\nobstacle_car 0 2147483647 x.png\n").unwrap_err();
        assert!(matches!(
            err,
            LevelLoadError::CoordinateOutOfRange { line: 2, value: 2147483647 }
        ));

        let err = parse("bonus -99999999999 0 b.png\n").unwrap_err();
        assert!(matches!(err, LevelLoadError::CoordinateOutOfRange { line: 1, .. }));
    }

    #[test]
    fn coordinates_at_the_limit_load() {
        let entities = parse("player_car -1000000 1000000 car.png\n").unwrap();
        assert_eq!(entities[0].body().rect.center(), (-MAX_COORDINATE, MAX_COORDINATE));
    }

    #[test]
    fn unknown_type_still_needs_valid_coordinates() {
        let err = parse("decoration x 2 tree.png\n").unwrap_err();
        assert!(matches!(err, LevelLoadError::BadCoordinate { .. }));
    }

    #[test]
    fn missing_image_is_an_asset_error() {
        let mut canvas = FakePlatform::new();
        canvas.missing_images.push("gone.png".to_string());
        let mut rng = StdRng::seed_from_u64(0);
        let err = parse_level("bonus 1 1 gone.png", &mut canvas, &PlayerTuning::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, LevelLoadError::Asset(_)));
    }

    #[test]
    fn level_requires_a_player() {
        let entities = parse("bonus 1 1 b.png\n").unwrap();
        assert!(matches!(Level::new(4, entities, 900), Err(LevelLoadError::NoPlayer(4))));
    }

    #[test]
    fn manifest_orders_by_filename() {
        let manifest = LevelManifest::from_files(vec![
            PathBuf::from("levels/level_3.txt"),
            PathBuf::from("levels/level_1.txt"),
            PathBuf::from("levels/level_2.txt"),
        ]);
        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.get(1), Some(Path::new("levels/level_1.txt")));
        assert_eq!(manifest.get(3), Some(Path::new("levels/level_3.txt")));
        assert_eq!(manifest.get(0), None);
        assert_eq!(manifest.get(4), None);
    }

    #[test]
    fn discover_skips_hidden_files_and_directories() {
        let dir = std::env::temp_dir().join(format!("lanerush-levels-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("drafts")).unwrap();
        std::fs::write(dir.join("b_level"), "player_car 1 1 p.png").unwrap();
        std::fs::write(dir.join("a_level"), "player_car 1 1 p.png").unwrap();
        std::fs::write(dir.join(".DS_Store"), "").unwrap();

        let manifest = LevelManifest::discover(&dir).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(1).and_then(|p| p.file_name()), Some(std::ffi::OsStr::new("a_level")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn discover_empty_directory_fails() {
        let dir = std::env::temp_dir().join(format!("lanerush-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(LevelManifest::discover(&dir), Err(LevelLoadError::NoLevels(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_level_file_is_an_io_error() {
        let mut canvas = FakePlatform::new();
        let mut rng = StdRng::seed_from_u64(0);
        let err = Level::load(
            1,
            Path::new("/nonexistent/lanerush/level_1"),
            &mut canvas,
            &PlayerTuning::default(),
            &mut rng,
            900,
        )
        .unwrap_err();
        assert!(matches!(err, LevelLoadError::Io { .. }));
    }

    #[test]
    fn timer_counts_down_to_zero() {
        let entities = parse("player_car 1 1 p.png").unwrap();
        let mut level = Level::new(1, entities, 2).unwrap();
        level.count_down();
        assert!(!level.is_time_up());
        level.count_down();
        level.count_down();
        assert!(level.is_time_up());
        assert_eq!(level.timer, 0);
    }
}
