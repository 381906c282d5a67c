//! Raw-cell decoding and GID allocation.

use std::collections::HashMap;

bitflags::bitflags! {
    /// Tile transform flags stored in the high bits of a raw TMX cell.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TransformFlags: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL   = 1 << 1;
        /// Diagonal flip, which TMX uses to express rotation.
        const DIAGONAL   = 1 << 2;
    }
}

const FLIP_HORIZONTAL: u32 = 0x8000_0000;
const FLIP_VERTICAL: u32 = 0x4000_0000;
const FLIP_DIAGONAL: u32 = 0x2000_0000;
/// All bits reserved for flags, including the hex-rotation bit this engine
/// does not interpret.
const FLAG_MASK: u32 = 0xF000_0000;

/// Splits a raw cell value into the on-disk gid and its transform flags.
pub fn decode_cell(raw: u32) -> (u32, TransformFlags) {
    let mut flags = TransformFlags::empty();
    if raw & FLIP_HORIZONTAL != 0 {
        flags |= TransformFlags::HORIZONTAL;
    }
    if raw & FLIP_VERTICAL != 0 {
        flags |= TransformFlags::VERTICAL;
    }
    if raw & FLIP_DIAGONAL != 0 {
        flags |= TransformFlags::DIAGONAL;
    }
    (raw & !FLAG_MASK, flags)
}

/// Allocates map-local GIDs for (raw gid, transform flags) pairs.
///
/// Allocation is lazy and idempotent: the first time a pair is seen it
/// receives the next id in a monotonically increasing sequence starting at
/// 1, and every later registration of the same pair returns that same id.
/// Raw gid 0 (the empty cell) always maps to 0 without allocating.
///
/// Distinct flags for the same raw gid always allocate distinct ids; the
/// mapping is many-to-one only in the direction of many identical
/// registrations collapsing onto one allocation.
#[derive(Clone, Debug, Default)]
pub struct GidRegistry {
    forward: HashMap<(u32, TransformFlags), u32>,
    reverse: Vec<(u32, TransformFlags)>,
}

impl GidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the allocated gid for the pair, allocating on first sight.
    pub fn register(&mut self, raw_gid: u32, flags: TransformFlags) -> u32 {
        if raw_gid == 0 {
            return 0;
        }
        if let Some(&gid) = self.forward.get(&(raw_gid, flags)) {
            return gid;
        }
        self.reverse.push((raw_gid, flags));
        let gid = self.reverse.len() as u32;
        self.forward.insert((raw_gid, flags), gid);
        gid
    }

    /// The pair an allocated gid stands for. Gid 0 is the empty cell and has
    /// no source.
    pub fn source(&self, gid: u32) -> Option<(u32, TransformFlags)> {
        self.reverse.get((gid as usize).checked_sub(1)?).copied()
    }

    /// Number of allocated gids (excluding the empty cell).
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_per_pair() {
        let mut registry = GidRegistry::new();
        let a = registry.register(17, TransformFlags::HORIZONTAL);
        let b = registry.register(17, TransformFlags::HORIZONTAL);
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_flags_allocate_distinct_gids() {
        let mut registry = GidRegistry::new();
        let plain = registry.register(17, TransformFlags::empty());
        let flipped = registry.register(17, TransformFlags::HORIZONTAL);
        let rotated = registry.register(
            17,
            TransformFlags::HORIZONTAL | TransformFlags::DIAGONAL,
        );
        assert_ne!(plain, flipped);
        assert_ne!(flipped, rotated);
        assert_eq!(registry.source(flipped), Some((17, TransformFlags::HORIZONTAL)));
    }

    #[test]
    fn zero_always_maps_to_zero_without_allocation() {
        let mut registry = GidRegistry::new();
        assert_eq!(registry.register(0, TransformFlags::empty()), 0);
        assert_eq!(registry.register(0, TransformFlags::VERTICAL), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn allocation_is_monotonic() {
        let mut registry = GidRegistry::new();
        let first = registry.register(5, TransformFlags::empty());
        let second = registry.register(9, TransformFlags::empty());
        let third = registry.register(5, TransformFlags::VERTICAL);
        assert!(first < second && second < third);
    }

    #[test]
    fn decode_extracts_all_three_flag_bits() {
        let raw = 42 | 0x8000_0000 | 0x2000_0000;
        let (gid, flags) = decode_cell(raw);
        assert_eq!(gid, 42);
        assert_eq!(flags, TransformFlags::HORIZONTAL | TransformFlags::DIAGONAL);

        let (gid, flags) = decode_cell(7);
        assert_eq!((gid, flags), (7, TransformFlags::empty()));
    }
}
