//! Read-only views of a session, handed to renderers and the event log.

use serde::{Deserialize, Serialize};

use crate::game_state::ActivePiece;
use crate::pieces::{base_shape, Shape};
use crate::types::{Cell, Phase, PieceColor, PieceKind, BASE_TICK_MS, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Absolute board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

/// Preview of the next piece, always in its base rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: PieceColor,
}

impl NextSnapshot {
    pub fn of(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: base_shape(kind),
            color: kind.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells only, row 0 at the top. The active piece is not merged in.
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub tick_interval_ms: u32,
    pub phase: Phase,
    pub game_over: bool,
    pub piece_id: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Color at (x, y) with the active piece drawn over the locked cells.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if let Some(active) = &self.active {
            if active.cells().any(|c| c == (x, y)) {
                return Some(active.color);
            }
        }
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![vec![None; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            next: NextSnapshot::of(PieceKind::I),
            score: 0,
            lines: 0,
            level: 1,
            tick_interval_ms: BASE_TICK_MS,
            phase: Phase::NoPiece,
            game_over: false,
            piece_id: 0,
            episode_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_overlays_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(PieceColor::Red);
        snap.active = Some(ActiveSnapshot::from(ActivePiece::spawn(PieceKind::O, 10)));

        assert_eq!(snap.cell_at(0, 19), Some(PieceColor::Red));
        assert_eq!(snap.cell_at(4, 0), Some(PieceColor::Yellow));
        assert_eq!(snap.cell_at(6, 0), None);
        assert_eq!(snap.cell_at(-1, 0), None);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snap = GameSnapshot::default();
        let json = serde_json::to_value(&snap).unwrap();

        assert_eq!(json["phase"], "no_piece");
        assert_eq!(json["next"]["kind"], "i");
        assert_eq!(json["board"].as_array().unwrap().len(), 20);
    }
}
