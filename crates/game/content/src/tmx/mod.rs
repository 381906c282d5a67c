//! TMX tile-map document model.
//!
//! The TMX format stores each cell as a 32-bit value whose high bits carry
//! flip/rotation flags. Because the same on-disk tile flipped differently is
//! a visually distinct cell, the document runs every (raw id, flags) pair
//! through a [`GidRegistry`] that allocates one map-local GID per distinct
//! combination; layers store only allocated GIDs.

mod document;
mod gid;
mod objects;

pub use document::{TileLayer, TileMapDocument, TileRef, Tileset};
pub use gid::{GidRegistry, TransformFlags, decode_cell};
pub use objects::{MapObject, ObjectGroup, PropertyValue};
