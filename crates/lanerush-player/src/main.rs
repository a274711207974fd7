/// LaneRush — top-down arcade racer
///
/// Architecture:
///   assets/   — level/image/sound files on disk, decoded and cached
///   engine/   — minifb window, software renderer, rodio audio, frame clock
///   game/     — entities, collisions, levels and the run state machine

mod assets;
mod engine;
mod game;

use anyhow::{Context, Result};
use lanerush_common::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use game::level::LevelManifest;
use game::{Game, Outcome};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lanerush=debug".parse()?))
        .init();

    tracing::info!("LaneRush v{}", env!("CARGO_PKG_VERSION"));

    let game_dir = find_game_dir()?;
    tracing::info!("Game data: {}", game_dir.display());

    let config = GameConfig::load(&game_dir)
        .with_context(|| format!("Invalid {}", lanerush_common::CONFIG_FILE_NAME))?;

    let manifest = LevelManifest::discover(&game_dir.join(assets::LEVELS_DIR))?;
    tracing::info!("Found {} level(s)", manifest.len());

    let asset_store = assets::AssetStore::load(&game_dir)?;
    tracing::info!("Loaded {} sound clips", asset_store.total_clips());

    let engine = engine::Engine::new(&config, asset_store)?;
    let clock = engine::FrameClock::new(config.frame_rate());
    let mut game = Game::new(engine, clock, config, manifest, StdRng::from_entropy())
        .context("Failed to load screen artwork")?;

    match game.run()? {
        Outcome::Won => tracing::info!("Run won"),
        Outcome::Exited => tracing::info!("Exited from game-over screen"),
        Outcome::Quit => tracing::info!("Window closed"),
    }
    Ok(())
}

/// Locate the game root. Priority:
/// 1. Command-line argument
/// 2. Current directory, if it has a level directory
/// 3. Directory of the executable
fn find_game_dir() -> Result<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(&arg);
        if path.is_dir() {
            return Ok(path);
        }
        tracing::warn!("Specified path not found: {}", arg);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if is_game_dir(&cwd) {
        return Ok(cwd);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    if let Some(dir) = exe_dir.filter(|d| is_game_dir(d)) {
        return Ok(dir);
    }

    anyhow::bail!(
        "Game data not found!\n\n\
         Run from a folder containing {}/ or pass it as argument:  lanerush <game-folder>",
        assets::LEVELS_DIR
    )
}

fn is_game_dir(dir: &Path) -> bool {
    dir.join(assets::LEVELS_DIR).is_dir()
}
