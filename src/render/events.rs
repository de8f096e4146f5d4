use crate::grid::Direction;

/// Events emitted during a session that renderers can handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh board was dealt
    Started,

    /// Tiles slid and the next tile has been spawned
    Moved { direction: Direction, score_gained: u32 },

    /// Nothing would move in that direction
    Unchanged(Direction),

    Undone,

    /// Win threshold reached for the first time
    Won,

    /// No moves left
    Lost,

    /// Player asked to stop
    Quit,
}
