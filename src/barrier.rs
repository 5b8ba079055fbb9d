//! Barrier construction.
//!
//! A barrier is a 12×20 grid of 6-pixel blocks with the top four rows and the
//! four outermost columns on each side left empty, giving a squat shield.

use crate::entities::{Barrier, BarrierBlock, BLOCK_SIZE};

pub const STENCIL_ROWS: i32 = 12;
pub const STENCIL_COLS: i32 = 20;
pub const BARRIER_COUNT: i32 = 4;

/// Distance of every barrier's anchor above the bottom of the screen.
const BARRIER_OFFSET_FROM_BOTTOM: i32 = 200;
/// Left shift applied to each evenly spaced anchor.
const BARRIER_ANCHOR_SHIFT: i32 = 60;

/// Whether the stencil has a block at `(row, col)`.
pub fn stencil_includes(row: i32, col: i32) -> bool {
    !(row < 4 || col < 4 || col > 15)
}

/// Build one barrier with its top-left stencil cell at `(x, y)`.
///
/// Blocks are emitted row-major, so the same anchor always produces the same
/// blocks in the same order.
pub fn build_barrier(x: i32, y: i32) -> Barrier {
    let blocks = (0..STENCIL_ROWS)
        .flat_map(|row| (0..STENCIL_COLS).map(move |col| (row, col)))
        .filter(|&(row, col)| stencil_includes(row, col))
        .map(|(row, col)| BarrierBlock::new(x + col * BLOCK_SIZE, y + row * BLOCK_SIZE))
        .collect();
    Barrier { blocks }
}

/// Anchors of the four barriers, evenly spaced across the screen.
pub fn barrier_anchors(screen_width: i32, screen_height: i32) -> Vec<(i32, i32)> {
    let gap = screen_width / (BARRIER_COUNT + 1);
    let y = screen_height - BARRIER_OFFSET_FROM_BOTTOM;
    (0..BARRIER_COUNT)
        .map(|i| (gap * (i + 1) - BARRIER_ANCHOR_SHIFT, y))
        .collect()
}

pub fn layout_barriers(screen_width: i32, screen_height: i32) -> Vec<Barrier> {
    barrier_anchors(screen_width, screen_height)
        .into_iter()
        .map(|(x, y)| build_barrier(x, y))
        .collect()
}
