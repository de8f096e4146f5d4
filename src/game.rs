//! One play session on top of the engine.
//!
//! A move is split in two steps so a front end can animate the slide before
//! the next tile appears: [`Game::move_tiles`] commits the slide and marks a
//! move in flight, [`Game::finish_move`] spawns the new tile and checks for
//! a win or loss. No other move is accepted in between.

use log::{debug, info};

use crate::engine::{BoardError, Engine};
use crate::grid::Direction;
use crate::storage::{load_best, save_best, BestScoreStore};
use crate::tile::{clear_animation_flags, Tile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    Idle,
    InProgress,
    /// Win notice showing. Dismissed with [`Game::continue_after_win`].
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The previous move has not been finished yet.
    Busy,
    NotInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Rejected(Rejection),
    /// Nothing would slide or merge; the board is left as it was.
    Unchanged,
    Moved { score_gained: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameState {
    pub tiles: Vec<Tile>,
    pub score: u32,
    pub best: u32,
    pub won: bool,
    pub over: bool,
}

#[derive(Debug, Clone)]
struct Snapshot {
    tiles: Vec<Tile>,
    score: u32,
}

pub struct Game {
    engine: Engine,
    store: Box<dyn BestScoreStore>,
    tiles: Vec<Tile>,
    score: u32,
    best: u32,
    phase: Phase,
    reached_win: bool,
    previous: Option<Snapshot>,
    moving: bool,
}

impl Game {
    pub fn new(engine: Engine, store: Box<dyn BestScoreStore>) -> Self {
        let best = load_best(store.as_ref());

        Self {
            engine,
            store,
            tiles: Vec::new(),
            score: 0,
            best,
            phase: Phase::Idle,
            reached_win: false,
            previous: None,
            moving: false,
        }
    }

    pub fn new_game(&mut self) {
        self.tiles = self.engine.create_initial_tiles();
        self.score = 0;
        self.phase = Phase::InProgress;
        self.reached_win = false;
        self.previous = None;
        self.moving = false;

        info!("New {0}x{0} game, best {1}", self.engine.size(), self.best);
    }

    /// Resumes play from a known board, e.g. a saved position. The board is
    /// checked first and left untouched on error. Spawned tiles get ids above
    /// the highest restored id. A board that already holds the win value
    /// does not raise the win notice again.
    pub fn restore(&mut self, tiles: Vec<Tile>, score: u32) -> Result<(), BoardError> {
        self.engine.adopt(&tiles)?;

        self.reached_win = self.engine.has_won(&tiles);
        self.phase = if self.engine.can_move(&tiles) {
            Phase::InProgress
        } else {
            Phase::Lost
        };
        self.tiles = tiles;
        self.score = score;
        self.previous = None;
        self.moving = false;

        if self.score > self.best {
            self.best = self.score;
            save_best(self.store.as_mut(), self.best);
        }

        debug!("Restored {} tiles, score {}", self.tiles.len(), self.score);

        Ok(())
    }

    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        if self.moving {
            return MoveOutcome::Rejected(Rejection::Busy);
        }

        if self.phase != Phase::InProgress {
            return MoveOutcome::Rejected(Rejection::NotInProgress);
        }

        let result = self.engine.move_tiles(&self.tiles, direction);

        if !result.moved {
            return MoveOutcome::Unchanged;
        }

        let previous_tiles = std::mem::replace(&mut self.tiles, result.tiles);

        self.previous = Some(Snapshot {
            tiles: previous_tiles,
            score: self.score,
        });
        self.score = self.score.saturating_add(result.score_gained);
        self.moving = true;

        if self.score > self.best {
            self.best = self.score;
            save_best(self.store.as_mut(), self.best);
        }

        MoveOutcome::Moved {
            score_gained: result.score_gained,
        }
    }

    /// Completes the move in flight. Returns the spawned tile, if any.
    pub fn finish_move(&mut self) -> Option<Tile> {
        if !self.moving {
            return None;
        }

        self.moving = false;

        let mut tiles = clear_animation_flags(&self.tiles);
        let spawned = self.engine.add_random_tile(&tiles);

        tiles.extend(spawned);
        self.tiles = tiles;

        let first_win = !self.reached_win && self.engine.has_won(&self.tiles);

        if first_win {
            self.reached_win = true;
            info!("Reached {} with score {}", self.engine.config().win_value(), self.score);
        }

        if !self.engine.can_move(&self.tiles) {
            self.phase = Phase::Lost;
            info!("No moves left, final score {}", self.score);
        } else if first_win {
            self.phase = Phase::Won;
        }

        spawned
    }

    /// Steps back one move. Only the most recent move can be undone.
    pub fn undo(&mut self) -> bool {
        if self.moving {
            return false;
        }

        let Some(snapshot) = self.previous.take() else {
            return false;
        };

        debug!("Undo to score {}", snapshot.score);

        self.tiles = snapshot.tiles;
        self.score = snapshot.score;

        if matches!(self.phase, Phase::Won | Phase::Lost) {
            self.phase = Phase::InProgress;
        }

        true
    }

    pub fn continue_after_win(&mut self) -> bool {
        if self.phase != Phase::Won {
            return false;
        }

        self.phase = Phase::InProgress;

        true
    }

    pub fn state(&self) -> GameState {
        GameState {
            tiles: self.tiles.clone(),
            score: self.score,
            best: self.best,
            won: self.phase == Phase::Won,
            over: self.phase == Phase::Lost,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reached_win(&self) -> bool {
        self.reached_win
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn can_undo(&self) -> bool {
        self.previous.is_some() && !self.moving
    }
}
