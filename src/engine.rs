//! The move engine.
//!
//! Everything that decides what a move does lives here as plain functions
//! over tile slices. [`Engine`] adds the two pieces of session state a game
//! needs on top of that: the tile id counter and the spawn RNG.

use std::collections::HashSet;

use enum_map::EnumMap;
use log::{debug, trace, warn};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::grid::{Direction, Grid, Position};
use crate::line::{collapse_line, Collapse};
use crate::tile::{IdCounter, Tile, TileId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tiles placed by [`Engine::create_initial_tiles`].
pub const INITIAL_TILES: usize = 2;

/// Chance that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MoveResult {
    pub tiles: Vec<Tile>,
    pub score_gained: u32,
    pub moved: bool,
}

#[derive(Debug, Clone)]
pub struct LinePlan {
    /// Grid cells of the line in traversal order, move points toward index 0.
    pub cells: Vec<Position>,
    pub collapse: Collapse,
}

/// Values-only outcome of a move, before tile identities are assigned.
#[derive(Debug, Clone)]
pub struct MovePlan {
    pub direction: Direction,
    pub lines: Vec<LinePlan>,
    pub score: u32,
    pub moved: bool,
}

impl MovePlan {
    pub fn merges(&self) -> usize {
        self.lines.iter().map(|line| line.collapse.merges()).sum()
    }

    /// Merge products in grid coordinates.
    pub fn merge_sites(&self) -> Vec<Position> {
        self.lines
            .iter()
            .flat_map(|line| line.collapse.merged_at.iter().map(|&i| line.cells[i]))
            .collect()
    }

    pub fn to_grid(&self, size: usize) -> Grid<u32> {
        let mut grid = Grid::new(size, size, &mut |_, _| 0);

        for line in &self.lines {
            for (&cell, &value) in line.cells.iter().zip(&line.collapse.values) {
                grid[cell] = value;
            }
        }

        grid
    }
}

pub fn tiles_to_grid(tiles: &[Tile], size: usize) -> Grid<u32> {
    let mut grid = Grid::new(size, size, &mut |_, _| 0);

    for tile in tiles {
        debug_assert_eq!(grid[tile.position()], 0, "two tiles share {:?}", tile.position());
        grid[tile.position()] = tile.value;
    }

    grid
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("tile {id} at ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds {
        id: TileId,
        row: usize,
        col: usize,
        size: usize,
    },
    #[error("tiles {first} and {second} share ({row}, {col})")]
    Overlap {
        first: TileId,
        second: TileId,
        row: usize,
        col: usize,
    },
    #[error("tile id {0} is used twice")]
    DuplicateId(TileId),
    #[error("tile {id} has value {value}, expected a power of two of at least 2")]
    InvalidValue { id: TileId, value: u32 },
}

/// Checks a board that did not come from this engine: every tile on the
/// grid, one tile per cell, unique ids and real tile values.
pub fn check_board(tiles: &[Tile], size: usize) -> Result<(), BoardError> {
    let mut cells: Grid<Option<TileId>> = Grid::new(size, size, &mut |_, _| None);
    let mut ids = HashSet::with_capacity(tiles.len());

    for tile in tiles {
        if tile.value < 2 || !tile.value.is_power_of_two() {
            return Err(BoardError::InvalidValue {
                id: tile.id,
                value: tile.value,
            });
        }

        if !ids.insert(tile.id) {
            return Err(BoardError::DuplicateId(tile.id));
        }

        let cell = cells.get_mut(tile.row, tile.col).ok_or(BoardError::OutOfBounds {
            id: tile.id,
            row: tile.row,
            col: tile.col,
            size,
        })?;

        if let Some(first) = cell.replace(tile.id) {
            return Err(BoardError::Overlap {
                first,
                second: tile.id,
                row: tile.row,
                col: tile.col,
            });
        }
    }

    Ok(())
}

/// Empty cells in row-major order.
pub fn empty_cells(grid: &Grid<u32>) -> Vec<Position> {
    grid.iter()
        .filter(|&(_, _, &value)| value == 0)
        .map(|(row, col, _)| (row, col))
        .collect()
}

pub fn random_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(TWO_PROBABILITY) {
        2
    } else {
        4
    }
}

/// Collapses every line of the board in `direction`.
pub fn plan_move(tiles: &[Tile], size: usize, direction: Direction) -> MovePlan {
    let grid = tiles_to_grid(tiles, size);
    let mut lines = Vec::with_capacity(size);
    let mut score: u32 = 0;
    let mut moved = false;

    for line in 0..size {
        let cells = direction.line_cells(size, line);
        let values: Vec<u32> = cells.iter().map(|&cell| grid[cell]).collect();
        let collapse = collapse_line(&values);

        trace!("{} line {}: {:?} -> {:?}", direction, line, values, collapse.values);

        moved |= collapse.values != values;
        score = score.saturating_add(collapse.score);
        lines.push(LinePlan { cells, collapse });
    }

    MovePlan {
        direction,
        lines,
        score,
        moved,
    }
}

/// True while an empty cell or a mergeable neighbour pair exists.
pub fn can_move(tiles: &[Tile], size: usize) -> bool {
    let grid = tiles_to_grid(tiles, size);

    grid.iter().any(|(row, col, &value)| {
        value == 0
            || grid.get_neighbor(row, col, Direction::Right) == Some(&value)
            || grid.get_neighbor(row, col, Direction::Down) == Some(&value)
    })
}

pub fn has_won(tiles: &[Tile], win_value: u32) -> bool {
    tiles.iter().any(|tile| tile.value >= win_value)
}

pub struct Engine {
    config: EngineConfig,
    ids: IdCounter,
    rng: XorShiftRng,
    seed: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_seed(config, OsRng.gen())
    }

    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            ids: IdCounter::new(),
            rng: XorShiftRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> usize {
        self.config.size()
    }

    /// Starts a fresh board with two random tiles and restarts tile ids at 1.
    pub fn create_initial_tiles(&mut self) -> Vec<Tile> {
        self.ids.reset();

        let mut tiles = Vec::with_capacity(INITIAL_TILES);

        for _ in 0..INITIAL_TILES {
            match self.add_random_tile(&tiles) {
                Some(tile) => tiles.push(tile),
                None => break,
            }
        }

        tiles
    }

    /// Spawns a 2 or 4 into a random empty cell. `None` when the board is full.
    pub fn add_random_tile(&mut self, tiles: &[Tile]) -> Option<Tile> {
        let cells = empty_cells(&tiles_to_grid(tiles, self.size()));
        let &(row, col) = cells.choose(&mut self.rng)?;
        let value = random_value(&mut self.rng);

        Some(Tile::spawned(self.ids.next_id(), value, row, col))
    }

    /// Takes over a board built elsewhere. Fresh ids continue after the
    /// highest id on it.
    pub fn adopt(&mut self, tiles: &[Tile]) -> Result<(), BoardError> {
        check_board(tiles, self.size())?;

        if let Some(max) = tiles.iter().map(|tile| tile.id).max() {
            self.ids.advance_past(max);
        }

        Ok(())
    }

    pub fn move_tiles(&mut self, tiles: &[Tile], direction: Direction) -> MoveResult {
        let plan = plan_move(tiles, self.size(), direction);

        if !plan.moved {
            debug!("{} rejected: nothing moves", direction);

            return MoveResult {
                tiles: tiles.to_vec(),
                score_gained: 0,
                moved: false,
            };
        }

        debug!(
            "{}: {} merges, +{} points",
            direction,
            plan.merges(),
            plan.score
        );

        MoveResult {
            tiles: self.reconcile(tiles, &plan),
            score_gained: plan.score,
            moved: true,
        }
    }

    pub fn can_move(&self, tiles: &[Tile]) -> bool {
        can_move(tiles, self.size())
    }

    pub fn has_won(&self, tiles: &[Tile]) -> bool {
        has_won(tiles, self.config.win_value())
    }

    pub fn legal_moves(&self, tiles: &[Tile]) -> EnumMap<Direction, bool> {
        EnumMap::from_fn(|direction| plan_move(tiles, self.size(), direction).moved)
    }

    /// Carries tile ids over to the post-move board.
    ///
    /// Walking each line in traversal order, a plain result cell takes the
    /// next old tile and a merge cell takes the next two, keeping the id of
    /// the first one.
    fn reconcile(&mut self, tiles: &[Tile], plan: &MovePlan) -> Vec<Tile> {
        let size = self.size();
        let mut occupants: Grid<Option<&Tile>> = Grid::new(size, size, &mut |_, _| None);

        for tile in tiles {
            occupants[tile.position()] = Some(tile);
        }

        let mut output = Vec::with_capacity(tiles.len());

        for line in &plan.lines {
            let mut old = line.cells.iter().filter_map(|&cell| occupants[cell]);

            for (index, &(row, col)) in line.cells.iter().enumerate() {
                let value = line.collapse.values[index];

                if value == 0 {
                    continue;
                }

                let merged = line.collapse.is_merge_site(index);
                let first = old.next();

                if merged {
                    let second = old.next();

                    debug_assert_eq!(first.map(|t| t.value * 2), Some(value));
                    debug_assert_eq!(second.map(|t| t.value * 2), Some(value));
                } else {
                    debug_assert_eq!(first.map(|t| t.value), Some(value));
                }

                let id = match first {
                    Some(tile) => tile.id,
                    None => {
                        warn!("no source tile for ({}, {}), minting a new id", row, col);
                        self.ids.next_id()
                    }
                };

                output.push(if merged {
                    Tile::merged(id, value, row, col)
                } else {
                    Tile::new(id, value, row, col)
                });
            }

            debug_assert!(old.next().is_none(), "unconsumed tiles on a line");
        }

        output
    }
}
