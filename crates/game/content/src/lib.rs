//! Content loading for Thornvale: tile maps and data catalogs.
//!
//! The map side parses the TMX format into a [`tmx::TileMapDocument`] (GID
//! registry, layers, object groups) and derives collision rectangles from
//! blocker objects via [`rects::merge_cells`]. The catalog side reads enemy
//! archetypes and item tables from RON and runtime settings from TOML, the
//! same split the rest of the game expects: maps describe *where*, catalogs
//! describe *what*.

pub mod error;
pub mod loaders;
pub mod rects;
pub mod tmx;

pub use error::MapError;
pub use loaders::{ConfigLoader, EnemyCatalog, ItemCatalog, RuntimeSettings};
pub use rects::{Rect, merge_cells};
pub use tmx::{
    GidRegistry, MapObject, ObjectGroup, PropertyValue, TileLayer, TileMapDocument, TileRef,
    Tileset, TransformFlags, decode_cell,
};
