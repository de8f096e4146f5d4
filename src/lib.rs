//! Sliding-tile puzzle engine: a 2048 variant on a square grid.
//!
//! [`engine`] holds the move algorithm and terminal-state checks, [`game`]
//! the session around it (score, best score, one-level undo, win/loss).
//! The terminal front end lives in `app` behind the `cli` feature; the browser binding in `web`
//! behind the `wasm` feature.

pub mod config;
pub mod engine;
pub mod game;
pub mod grid;
pub mod input;
pub mod line;
pub mod render;
pub mod storage;
pub mod tile;

#[cfg(feature = "cli")]
pub mod app;

#[cfg(feature = "wasm")]
pub mod web;

pub use config::{ConfigError, EngineConfig};
pub use engine::{can_move, has_won, BoardError, Engine, MoveResult};
pub use game::{Game, GameState, MoveOutcome, Phase};
pub use grid::{Direction, Grid, Position};
pub use tile::{clear_animation_flags, Tile, TileId};
