//! Crossterm keyboard adapter.
//!
//! Drains all pending terminal events once per frame, before any scene
//! update, and folds them into one [`InputSnapshot`]. A key appears in the
//! snapshot only on the frame its key-down event arrived, which gives menus
//! edge-triggered confirmation for free.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, poll, read};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use thornvale_core::{InputSnapshot, LogicalKey};
use thornvale_runtime::InputSource;

/// Puts the terminal in raw mode for the lifetime of the input source and
/// restores it on drop, panics included.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Keyboard input source backed by crossterm.
pub struct CrosstermInput {
    _raw: RawModeGuard,
}

impl CrosstermInput {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            _raw: RawModeGuard::new()?,
        })
    }
}

impl InputSource for CrosstermInput {
    fn sample(&mut self) -> io::Result<InputSnapshot> {
        let mut snapshot = InputSnapshot::EMPTY;
        // Zero-timeout poll: drain whatever arrived since last frame and
        // return immediately. The loop never blocks.
        while poll(Duration::ZERO)? {
            let Event::Key(key) = read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                snapshot.press(LogicalKey::Quit);
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('w') => snapshot.press(LogicalKey::Up),
                KeyCode::Down | KeyCode::Char('s') => snapshot.press(LogicalKey::Down),
                KeyCode::Left | KeyCode::Char('a') => snapshot.press(LogicalKey::Left),
                KeyCode::Right | KeyCode::Char('d') => snapshot.press(LogicalKey::Right),
                KeyCode::Enter | KeyCode::Char(' ') => snapshot.press(LogicalKey::Confirm),
                KeyCode::Esc | KeyCode::Backspace => snapshot.press(LogicalKey::Cancel),
                KeyCode::Char('q') => snapshot.press(LogicalKey::Quit),
                _ => {}
            }
        }
        Ok(snapshot)
    }
}
