use crate::grid::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type TileId = u64;

/// A numbered tile on the board.
///
/// Tiles are never mutated in place by a move: every move produces a new
/// collection. `is_new` and `is_merged` are animation hints only and are
/// cleared before the next move begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: usize,
    pub col: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_new: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_merged: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            id,
            value,
            row,
            col,
            is_new: false,
            is_merged: false,
        }
    }

    pub fn spawned(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            is_new: true,
            ..Self::new(id, value, row, col)
        }
    }

    pub fn merged(id: TileId, value: u32, row: usize, col: usize) -> Self {
        Self {
            is_merged: true,
            ..Self::new(id, value, row, col)
        }
    }

    pub fn position(&self) -> Position {
        (self.row, self.col)
    }

    pub fn without_flags(self) -> Self {
        Self {
            is_new: false,
            is_merged: false,
            ..self
        }
    }
}

/// Hands out tile identifiers for one session.
///
/// Owned by the [`Engine`](crate::engine::Engine) rather than kept as
/// process-wide state, so separate sessions and test runs never share ids.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: TileId,
}

impl IdCounter {
    pub const START: TileId = 1;

    pub fn new() -> Self {
        Self { next: Self::START }
    }

    pub fn reset(&mut self) {
        self.next = Self::START;
    }

    pub fn next_id(&mut self) -> TileId {
        let id = self.next;

        self.next += 1;

        id
    }

    /// Moves the counter past `id` so it is never handed out again.
    pub fn advance_past(&mut self, id: TileId) {
        self.next = self.next.max(id.saturating_add(1));
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a copy of `tiles` with the animation flags cleared. Ids, values
/// and positions are left untouched.
pub fn clear_animation_flags(tiles: &[Tile]) -> Vec<Tile> {
    tiles.iter().map(|tile| tile.without_flags()).collect()
}
