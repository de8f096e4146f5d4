use super::{GameEvent, Renderer};
use crate::engine::tiles_to_grid;
use crate::game::GameState;

use std::io::{self, Write};

/// Plain-text board for terminals. The most recently spawned tile is marked
/// with `*`.
pub struct TextRenderer<W: Write> {
    out: W,
    size: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, size: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_board(state: &GameState, size: usize) -> String {
    let grid = tiles_to_grid(&state.tiles, size);
    let largest = state.tiles.iter().map(|t| t.value).max().unwrap_or(0);
    let width = largest.to_string().len().max(4) + 2;
    let border = format!("+{}\n", format!("{}+", "-".repeat(width)).repeat(size));

    let mut output = format!("Score: {}   Best: {}\n", state.score, state.best);

    output.push_str(&border);

    for row in 0..size {
        output.push('|');

        for col in 0..size {
            let value = grid[(row, col)];
            let spawned = state
                .tiles
                .iter()
                .any(|t| t.is_new && t.position() == (row, col));

            let cell = match (value, spawned) {
                (0, _) => String::new(),
                (v, true) => format!("{}*", v),
                (v, false) => format!("{} ", v),
            };

            output.push_str(&format!("{:>width$}|", cell, width = width));
        }

        output.push('\n');
        output.push_str(&border);
    }

    output
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = io::Error;

    fn initialize(&mut self, size: usize) -> Result<(), Self::Error> {
        self.size = size;
        Ok(())
    }

    fn handle_event(&mut self, event: &GameEvent) -> Result<(), Self::Error> {
        match event {
            GameEvent::Started => writeln!(self.out, "New game. Arrows/WASD or up/down/left/right, u = undo, n = new, q = quit."),
            GameEvent::Moved { score_gained, .. } if *score_gained > 0 => {
                writeln!(self.out, "+{}", score_gained)
            }
            GameEvent::Moved { .. } => Ok(()),
            GameEvent::Unchanged(direction) => writeln!(self.out, "Nothing moves {}.", direction),
            GameEvent::Undone => writeln!(self.out, "Undone."),
            GameEvent::Won => writeln!(self.out, "You win! Type c to keep going or n for a new game."),
            GameEvent::Lost => writeln!(self.out, "Game over. Type n for a new game or u to undo."),
            GameEvent::Quit => writeln!(self.out, "Bye."),
        }
    }

    fn update(&mut self, state: &GameState) -> Result<(), Self::Error> {
        write!(self.out, "{}", format_board(state, self.size))?;
        self.out.flush()
    }

    fn finalize(&mut self, state: &GameState) -> Result<(), Self::Error> {
        writeln!(self.out, "Final score {} (best {})", state.score, state.best)?;
        self.out.flush()
    }
}
