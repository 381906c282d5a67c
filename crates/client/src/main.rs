//! Thornvale client binary.
//!
//! The composition root: loads content and the save slot, assembles the
//! scene controller, registers presentation listeners on the event bus, and
//! hands control to the fixed-timestep loop. Runs with no flags; exits 0 on
//! a normal quit.

mod input;
mod present;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use thornvale_content::{ConfigLoader, EnemyCatalog, ItemCatalog, TileMapDocument};
use thornvale_core::GameData;
use thornvale_runtime::{GameContent, SaveRepository, SceneController};

use crate::input::CrosstermInput;
use crate::present::NarrationListener;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let content_dir = locate_content_dir()?;
    tracing::info!(dir = %content_dir.display(), "loading content");

    let settings = ConfigLoader::load(&content_dir.join("settings.toml"))?;
    let map = TileMapDocument::load(&content_dir.join(&settings.starting_map))?;
    let enemies = EnemyCatalog::load(&content_dir.join("enemies.ron"))?;
    let items = ItemCatalog::load(&content_dir.join("items.ron"))?;

    let save_dir = SaveRepository::default_dir().unwrap_or_else(|| PathBuf::from("saves"));
    let save = SaveRepository::new(&save_dir)?;
    let data = match save.load(&settings.save_slot)? {
        Some(data) => {
            tracing::info!(slot = %settings.save_slot, "resuming saved game");
            data
        }
        None => {
            tracing::info!("starting a new game");
            GameData::new_game()
        }
    };

    let content = Arc::new(GameContent {
        map,
        enemies,
        items,
    });
    let mut controller = SceneController::new(data, content, &settings, save);
    controller
        .bus_mut()
        .subscribe_all(Box::new(NarrationListener::new()));

    let mut input = CrosstermInput::new().context("terminal input setup")?;
    controller.run(&mut input)?;
    Ok(())
}

/// Content lives beside the binary in `content/`; during development fall
/// back to the workspace copy.
fn locate_content_dir() -> Result<PathBuf> {
    let local = PathBuf::from("content");
    if local.is_dir() {
        return Ok(local);
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content");
    if workspace.is_dir() {
        return Ok(workspace);
    }
    anyhow::bail!("no content directory found (looked in ./content and the workspace)")
}
