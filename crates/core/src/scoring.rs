//! Scoring module - line-clear points, drop points and level progression
//!
//! Rules:
//! - Line clears score `lines * 100 * level`, using the level in force before
//!   the clear is counted.
//! - Soft drop scores 1 point per row, hard drop 2 points per row.
//! - Level is `total_lines / 10 + 1`.
//! - Gravity interval is `max(100, 1000 - (level - 1) * 100)` milliseconds.

use crate::types::{
    BASE_TICK_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_CLEAR_POINTS, MIN_TICK_MS,
    SOFT_DROP_POINTS, TICK_STEP_MS,
};

/// Points for clearing `lines` rows in one lock at `level`.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(LINE_CLEAR_POINTS)
        .saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds
pub fn tick_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(TICK_STEP_MS);
    BASE_TICK_MS.saturating_sub(reduction).max(MIN_TICK_MS)
}
