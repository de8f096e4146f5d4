use core::str::FromStr;

use crate::grid::Direction;

/// Shortest swipe, in pixels along the dominant axis, that counts as a move.
pub const MIN_SWIPE: f64 = 30.0;

/// Browser key names (`KeyboardEvent.key`) for arrows and WASD.
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" => Some(Direction::Left),
        "ArrowRight" | "d" => Some(Direction::Right),
        "ArrowUp" | "w" => Some(Direction::Up),
        "ArrowDown" | "s" => Some(Direction::Down),
        _ => None,
    }
}

/// Direction of a touch gesture from its start/end delta. Screen y grows
/// downward.
pub fn swipe_direction(dx: f64, dy: f64) -> Option<Direction> {
    let (abs_dx, abs_dy) = (dx.abs(), dy.abs());

    if abs_dx.max(abs_dy) < MIN_SWIPE {
        return None;
    }

    if abs_dx > abs_dy {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    NewGame,
    Continue,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(direction) = key_direction(trimmed) {
            return Ok(Command::Move(direction));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "u" | "undo" => Ok(Command::Undo),
            "n" | "new" => Ok(Command::NewGame),
            "c" | "continue" => Ok(Command::Continue),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<Direction>()
                .map(Command::Move)
                .map_err(|_| format!("unknown command: {}", trimmed)),
        }
    }
}
