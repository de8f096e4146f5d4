use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use slide_merge::{
    config::EngineConfig,
    engine::BoardError,
    game::{Game, MoveOutcome, Phase, Rejection},
    grid::Direction,
    storage::{BestScoreStore, MemoryStore, StorageError, UnavailableStore},
    tile::Tile,
    Engine,
};

const TEST_SEED: u64 = 42;

/// Store whose contents stay visible to the test after boxing.
#[derive(Clone, Default)]
struct SharedStore(Rc<Cell<Option<u32>>>);

impl BestScoreStore for SharedStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        Ok(self.0.get())
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.0.set(Some(score));
        Ok(())
    }
}

fn create_test_game(size: usize, win_value: u32) -> Game {
    let engine = Engine::with_seed(EngineConfig::new(size, win_value).unwrap(), TEST_SEED);

    Game::new(engine, Box::new(MemoryStore::new()))
}

fn tiles_from_rows(rows: &[&[u32]]) -> Vec<Tile> {
    let mut tiles = Vec::new();

    for (row, values) in rows.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            if value != 0 {
                tiles.push(Tile::new(tiles.len() as u64 + 1, value, row, col));
            }
        }
    }

    tiles
}

/// Plays the first direction that changes the board.
fn play_any(game: &mut Game) -> Direction {
    for direction in Direction::ALL {
        if let MoveOutcome::Moved { .. } = game.move_tiles(direction) {
            return direction;
        }
    }

    panic!("no legal move");
}

#[test]
fn test_session_starts_idle() {
    let mut game = create_test_game(5, 2048);

    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.tiles().is_empty());
    assert_eq!(
        game.move_tiles(Direction::Left),
        MoveOutcome::Rejected(Rejection::NotInProgress)
    );
}

#[test]
fn test_new_game_deals_two_tiles() {
    let mut game = create_test_game(5, 2048);

    game.new_game();

    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.tiles().len(), 2);
    assert_eq!(game.score(), 0);
    assert!(!game.can_undo());
}

#[test]
fn test_move_waits_for_finish() {
    let mut game = create_test_game(5, 2048);
    game.new_game();

    let direction = play_any(&mut game);

    assert!(game.is_moving());
    assert_eq!(
        game.move_tiles(direction.invert()),
        MoveOutcome::Rejected(Rejection::Busy)
    );

    let before = game.tiles().len();
    let spawned = game.finish_move().expect("board has room");

    assert!(!game.is_moving());
    assert!(spawned.is_new);
    assert_eq!(game.tiles().len(), before + 1);
    assert_eq!(game.tiles().iter().filter(|t| t.is_new).count(), 1);
    assert!(game.tiles().iter().all(|t| !t.is_merged));

    // nothing left to finish
    assert_eq!(game.finish_move(), None);
}

#[test]
fn test_unchanged_move_is_not_committed() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[2, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 10).unwrap();

    assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::Unchanged);
    assert!(!game.is_moving());
    assert!(!game.can_undo());
    assert_eq!(game.score(), 10);
}

#[test]
fn test_score_accumulates() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[2, 2, 4, 4], &[0; 4], &[0; 4], &[0; 4]]), 100).unwrap();

    assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::Moved { score_gained: 12 });
    assert_eq!(game.score(), 112);
}

#[test]
fn test_undo_restores_one_move() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    let start = tiles_from_rows(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
    game.restore(start.clone(), 0).unwrap();

    game.move_tiles(Direction::Left);

    // not while the move is in flight
    assert!(!game.undo());

    game.finish_move();
    assert_eq!(game.score(), 4);
    assert!(game.can_undo());
    assert!(game.undo());
    assert_eq!(game.tiles(), &start[..]);
    assert_eq!(game.score(), 0);

    // only one level
    assert!(!game.undo());
}

#[test]
fn test_undo_keeps_best_score() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[8, 8, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 0).unwrap();

    game.move_tiles(Direction::Left);
    game.finish_move();
    game.undo();

    assert_eq!(game.score(), 0);
    assert_eq!(game.best(), 16);
}

#[test]
fn test_best_score_is_persisted_when_beaten() {
    let store = SharedStore::default();
    store.0.set(Some(2));

    let engine = Engine::with_seed(EngineConfig::new(4, 2048).unwrap(), TEST_SEED);
    let mut game = Game::new(engine, Box::new(store.clone()));
    assert_eq!(game.best(), 2);

    game.new_game();
    game.restore(tiles_from_rows(&[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 0).unwrap();
    game.move_tiles(Direction::Left);

    assert_eq!(game.best(), 8);
    assert_eq!(store.0.get(), Some(8));
}

#[test]
fn test_best_score_not_written_below_record() {
    let store = SharedStore::default();
    store.0.set(Some(1000));

    let engine = Engine::with_seed(EngineConfig::new(4, 2048).unwrap(), TEST_SEED);
    let mut game = Game::new(engine, Box::new(store.clone()));

    game.new_game();
    game.restore(tiles_from_rows(&[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 0).unwrap();
    game.move_tiles(Direction::Left);

    assert_eq!(game.best(), 1000);
    assert_eq!(store.0.get(), Some(1000));
}

#[test]
fn test_unavailable_storage_is_not_fatal() {
    let engine = Engine::with_seed(EngineConfig::new(4, 2048).unwrap(), TEST_SEED);
    let mut game = Game::new(engine, Box::new(UnavailableStore));

    assert_eq!(game.best(), 0);

    game.new_game();
    game.restore(tiles_from_rows(&[&[4, 4, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 0).unwrap();

    assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::Moved { score_gained: 8 });
    assert_eq!(game.best(), 8);
}

#[test]
fn test_win_notice_is_raised_once() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[1024, 1024, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), 0).unwrap();

    game.move_tiles(Direction::Left);
    game.finish_move();

    assert_eq!(game.phase(), Phase::Won);
    assert!(game.state().won);
    assert_eq!(
        game.move_tiles(Direction::Right),
        MoveOutcome::Rejected(Rejection::NotInProgress)
    );

    assert!(game.continue_after_win());
    assert_eq!(game.phase(), Phase::InProgress);
    assert!(!game.continue_after_win());

    // keep playing past the threshold without a second notice
    play_any(&mut game);
    game.finish_move();
    assert_ne!(game.phase(), Phase::Won);
    assert!(game.reached_win());
}

#[test]
fn test_loss_is_detected_after_spawn() {
    let mut game = create_test_game(2, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[8, 16], &[0, 32]]), 0).unwrap();

    assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::Moved { score_gained: 0 });
    game.finish_move();

    assert_eq!(game.phase(), Phase::Lost);
    assert!(game.state().over);
    assert_eq!(
        game.move_tiles(Direction::Up),
        MoveOutcome::Rejected(Rejection::NotInProgress)
    );
}

#[test]
fn test_undo_leaves_lost_state() {
    let mut game = create_test_game(2, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[8, 16], &[0, 32]]), 0).unwrap();

    game.move_tiles(Direction::Left);
    game.finish_move();
    assert_eq!(game.phase(), Phase::Lost);

    assert!(game.undo());
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.tiles().len(), 3);
}

#[test]
fn test_loss_wins_over_simultaneous_first_win() {
    let mut game = create_test_game(2, 64);
    game.new_game();
    game.restore(tiles_from_rows(&[&[32, 32], &[8, 16]]), 0).unwrap();

    game.move_tiles(Direction::Left);
    game.finish_move();

    assert_eq!(game.phase(), Phase::Lost);
    assert!(game.reached_win());
    assert!(!game.state().won);
}

#[test]
fn test_restore_on_dead_board() {
    let mut game = create_test_game(2, 2048);
    game.restore(tiles_from_rows(&[&[2, 4], &[4, 2]]), 50).unwrap();

    assert_eq!(game.phase(), Phase::Lost);
    assert_eq!(game.best(), 50);
}

#[test]
fn test_new_game_resets_session() {
    let mut game = create_test_game(2, 2048);
    game.restore(tiles_from_rows(&[&[2, 4], &[4, 2]]), 50).unwrap();

    game.new_game();

    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.score(), 0);
    assert_eq!(game.best(), 50);
    assert_eq!(game.tiles().iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_spawn_after_restore_gets_fresh_id() {
    let mut game = create_test_game(4, 2048);
    game.new_game();

    let tiles = vec![
        Tile::new(1, 2, 0, 0),
        Tile::new(2, 4, 1, 0),
        Tile::new(3, 8, 2, 0),
        Tile::new(4, 16, 3, 0),
    ];
    game.restore(tiles, 0).unwrap();

    assert_eq!(game.move_tiles(Direction::Right), MoveOutcome::Moved { score_gained: 0 });
    let spawned = game.finish_move().expect("board has room");

    let ids: HashSet<u64> = game.tiles().iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), game.tiles().len());
    assert_eq!(spawned.id, 5);
}

#[test]
fn test_restore_rejects_bad_boards() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    let before = game.tiles().to_vec();

    assert_eq!(
        game.restore(vec![Tile::new(1, 2, 0, 4)], 0),
        Err(BoardError::OutOfBounds { id: 1, row: 0, col: 4, size: 4 })
    );
    assert_eq!(
        game.restore(vec![Tile::new(1, 2, 1, 1), Tile::new(2, 4, 1, 1)], 0),
        Err(BoardError::Overlap { first: 1, second: 2, row: 1, col: 1 })
    );
    assert_eq!(
        game.restore(vec![Tile::new(7, 2, 0, 0), Tile::new(7, 4, 0, 1)], 0),
        Err(BoardError::DuplicateId(7))
    );
    assert_eq!(
        game.restore(vec![Tile::new(1, 3, 0, 0)], 0),
        Err(BoardError::InvalidValue { id: 1, value: 3 })
    );

    // the running game is untouched
    assert_eq!(game.tiles(), &before[..]);
    assert_eq!(game.phase(), Phase::InProgress);
}

#[test]
fn test_score_saturates() {
    let mut game = create_test_game(4, 2048);
    game.new_game();
    game.restore(tiles_from_rows(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]), u32::MAX - 1).unwrap();

    assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::Moved { score_gained: 4 });
    assert_eq!(game.score(), u32::MAX);
}
