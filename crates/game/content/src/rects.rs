//! Greedy rectangle decomposition of occupied grid cells.
//!
//! Collision and interest regions come out of the map as individual blocked
//! cells; colliders want a short list of rectangles instead. The
//! decomposition below is greedy: always correct (full cover, no overlap),
//! not guaranteed minimal.

use std::collections::BTreeSet;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < (self.x + self.width as i32) as f32
            && py < (self.y + self.height as i32) as f32
    }
}

/// Merges occupied cells into covering pixel rectangles.
///
/// Repeatedly seeds a rectangle at the lexicographically smallest remaining
/// cell, grows it down its column while cells remain occupied, then widens
/// it column by column while every cell of the new column is occupied, and
/// removes what it covered. Each cell is covered exactly once.
pub fn merge_cells(
    occupied: &BTreeSet<(i32, i32)>,
    cell_width: u32,
    cell_height: u32,
) -> Vec<Rect> {
    let mut remaining = occupied.clone();
    let mut rects = Vec::new();

    while let Some(&(x0, y0)) = remaining.iter().next() {
        // Grow down the seed column.
        let mut height = 1;
        while remaining.contains(&(x0, y0 + height)) {
            height += 1;
        }

        // Widen while the entire next column is present.
        let mut width = 1;
        'widen: loop {
            let x = x0 + width;
            for dy in 0..height {
                if !remaining.contains(&(x, y0 + dy)) {
                    break 'widen;
                }
            }
            width += 1;
        }

        for dx in 0..width {
            for dy in 0..height {
                remaining.remove(&(x0 + dx, y0 + dy));
            }
        }
        rects.push(Rect::new(
            x0 * cell_width as i32,
            y0 * cell_height as i32,
            width as u32 * cell_width,
            height as u32 * cell_height,
        ));
    }

    rects
}
