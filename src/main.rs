use std::path::Path;

use spacer::config::{GameConfig, CONFIG_FILE};
use spacer::io::TerminalIO;
use spacer::persistence::{JsonSaveStore, JsonWorldSource, WorldDataSource};
use spacer::services::game::Game;
use spacer::GameEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with the game text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let source: Box<dyn WorldDataSource> = match &config.world_file {
        Some(path) => Box::new(JsonWorldSource::from_file(path)?),
        None => Box::new(JsonWorldSource::builtin()),
    };
    let saves = JsonSaveStore::open(&config.save_directory)?;
    info!(
        saves = %saves.directory().display(),
        seed = config.seed,
        "starting game"
    );

    let engine = GameEngine::new(config, source, Box::new(saves));
    let mut game = Game::new(engine, Box::new(TerminalIO), Box::new(TerminalIO));
    game.run()?;
    Ok(())
}
