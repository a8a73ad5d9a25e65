//! Roulette-table geometry: a zero column followed by 12 columns of three rows.
//!
//! Column 0 is the zero pocket and spans every row. Column `c >= 1` holds
//! `3c` on row 0, `3c - 1` on row 1 and `3c - 2` on row 2.

use ratatui::layout::Rect;
use spin_core::Pocket;

use super::App;

pub const ROWS: u16 = 3;
pub const COLS: u16 = 13;
/// Terminal columns per cell, padding included.
pub const CELL_W: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCursor {
    pub row: u16,
    pub col: u16,
}

impl Default for GridCursor {
    fn default() -> Self {
        Self { row: 1, col: 0 }
    }
}

/// Value shown at a cell. Callers stay inside `ROWS x COLS`.
pub fn value_at(row: u16, col: u16) -> i64 {
    if col == 0 {
        0
    } else {
        3 * col as i64 - row as i64
    }
}

pub fn coords_of(p: Pocket) -> (u16, u16) {
    let n = p.value() as u16;
    if n == 0 {
        return (1, 0);
    }
    let col = (n + 2) / 3;
    (3 * col - n, col)
}

/// Map a terminal position inside the grid's inner area to the value under it.
pub fn hit(inner: Rect, x: u16, y: u16) -> Option<i64> {
    if x < inner.x || y < inner.y {
        return None;
    }
    let col = (x - inner.x) / CELL_W;
    let row = y - inner.y;
    if row >= ROWS || col >= COLS || y >= inner.y + inner.height || x >= inner.x + inner.width {
        return None;
    }
    Some(value_at(row, col))
}

impl App {
    pub fn grid_move(&mut self, drow: i16, dcol: i16) {
        let c = &mut self.grid_cursor;
        c.row = (c.row as i16 + drow).clamp(0, ROWS as i16 - 1) as u16;
        c.col = (c.col as i16 + dcol).clamp(0, COLS as i16 - 1) as u16;
    }

    pub fn grid_selected(&self) -> i64 {
        value_at(self.grid_cursor.row, self.grid_cursor.col)
    }

    pub fn grid_inner(&self) -> Option<Rect> {
        self.grid_area.map(|a| Rect {
            x: a.x.saturating_add(1),
            y: a.y.saturating_add(1),
            width: a.width.saturating_sub(2),
            height: a.height.saturating_sub(2),
        })
    }
}
