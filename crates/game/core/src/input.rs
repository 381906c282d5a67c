//! Frame-local input snapshot.
//!
//! The platform layer samples the keyboard once per tick, before any scene
//! update runs, and hands the result to the active scene as an immutable
//! snapshot. Scenes never poll the device themselves; within one tick every
//! consumer observes the same input state.

/// Logical keys the game reacts to. Physical bindings live in the platform
/// layer; the rules only ever see these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Quit,
}

const KEY_COUNT: usize = 7;

const fn key_index(key: LogicalKey) -> usize {
    match key {
        LogicalKey::Up => 0,
        LogicalKey::Down => 1,
        LogicalKey::Left => 2,
        LogicalKey::Right => 3,
        LogicalKey::Confirm => 4,
        LogicalKey::Cancel => 5,
        LogicalKey::Quit => 6,
    }
}

/// Read-only mapping from logical key to pressed-state for one tick.
///
/// The platform adapter reports a key as pressed on the tick its key-down
/// event arrived, so menu confirmation reads as an edge rather than a held
/// level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pressed: [bool; KEY_COUNT],
}

impl InputSnapshot {
    /// A snapshot with nothing pressed.
    pub const EMPTY: Self = Self {
        pressed: [false; KEY_COUNT],
    };

    /// Builds a snapshot with exactly the given keys pressed.
    pub fn with(keys: &[LogicalKey]) -> Self {
        let mut snapshot = Self::EMPTY;
        for &key in keys {
            snapshot.press(key);
        }
        snapshot
    }

    /// Marks a key as pressed while the snapshot is being assembled.
    pub fn press(&mut self, key: LogicalKey) {
        self.pressed[key_index(key)] = true;
    }

    /// Whether `key` is pressed in this frame.
    pub fn pressed(&self, key: LogicalKey) -> bool {
        self.pressed[key_index(key)]
    }

    /// Whether any key at all is pressed.
    pub fn any(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }
}
