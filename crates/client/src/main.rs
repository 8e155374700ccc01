//! Dungeon terminal client.
//!
//! Composition root: reads configuration, installs logging, generates the
//! level, and hands the world to the core engine together with the terminal
//! key map, event source, and render surface.
use anyhow::{Context, Result};
use dungeon_client::{ClientConfig, KeyMap, TerminalEvents, TerminalGuard, TerminalSurface};
use dungeon_client::{logging, terminal};
use game_content::{LayoutGenerator, LayoutLoader, TemplateLoader};
use game_core::{Engine, LevelGenerator, World};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::info!(?config, "starting dungeon client");

    let mut generator = match &config.layout {
        Some(path) => LayoutGenerator::new(LayoutLoader::load(path)?),
        None => LayoutGenerator::default(),
    };
    if let Some(path) = &config.templates {
        generator = generator.with_catalog(TemplateLoader::load(path)?);
    }
    let mut world = World::new();
    let level = generator
        .generate(&mut world, &config.level_request())
        .with_context(|| format!("failed to generate layout '{}'", generator.layout().name))?;

    let mut engine = Engine::new(world, level.player, KeyMap::default(), config.game_config())?;

    let terminal = terminal::init()?;
    let _terminal_guard = TerminalGuard;
    let mut surface = TerminalSurface::new(terminal, config.view_size);

    engine.run(&mut TerminalEvents, &mut surface)?;

    tracing::info!("client shutdown complete");
    Ok(())
}
