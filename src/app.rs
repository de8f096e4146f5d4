use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::game::{Game, GameState, MoveOutcome, Phase, Rejection};
use crate::input::Command;
use crate::render::{GameEvent, Renderer, TextRenderer};
use crate::storage::{BestScoreStore, JsonFileStore, MemoryStore};

use log::{debug, info, warn};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub seed: Option<u64>,
    pub best_file: Option<PathBuf>,
}

pub struct TerminalApp {
    config: AppConfig,
}

impl TerminalApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<GameState, Box<dyn Error>> {
        let stdin = io::stdin();

        self.run_with(stdin.lock(), io::stdout())
    }

    /// Plays one session reading commands line by line from `input`.
    pub fn run_with<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<GameState, Box<dyn Error>> {
        let engine = match self.config.seed {
            Some(seed) => Engine::with_seed(self.config.engine, seed),
            None => Engine::new(self.config.engine),
        };

        info!("Using seed: {}", engine.seed());

        let store: Box<dyn BestScoreStore> = match &self.config.best_file {
            Some(path) => Box::new(JsonFileStore::new(path.clone())),
            None => Box::new(MemoryStore::new()),
        };

        let mut game = Game::new(engine, store);
        let mut renderer = TextRenderer::new(output);

        renderer.initialize(self.config.engine.size())?;

        game.new_game();
        renderer.handle_event(&GameEvent::Started)?;
        renderer.update(&game.state())?;

        for line in input.lines() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            for event in Self::apply(&mut game, command) {
                renderer.handle_event(&event)?;
            }

            renderer.update(&game.state())?;
        }

        let state = game.state();

        renderer.handle_event(&GameEvent::Quit)?;
        renderer.finalize(&state)?;

        Ok(state)
    }

    fn apply(game: &mut Game, command: Command) -> Vec<GameEvent> {
        let phase_before = game.phase();
        let mut events = Vec::new();

        match command {
            Command::Move(direction) => match game.move_tiles(direction) {
                MoveOutcome::Moved { score_gained } => {
                    // no slide animation in a terminal
                    game.finish_move();
                    events.push(GameEvent::Moved {
                        direction,
                        score_gained,
                    });
                }
                MoveOutcome::Unchanged => events.push(GameEvent::Unchanged(direction)),
                MoveOutcome::Rejected(Rejection::NotInProgress) => match game.phase() {
                    Phase::Won => events.push(GameEvent::Won),
                    Phase::Lost => events.push(GameEvent::Lost),
                    _ => {}
                },
                MoveOutcome::Rejected(reason) => debug!("{} rejected: {:?}", direction, reason),
            },
            Command::Undo => {
                if game.undo() {
                    events.push(GameEvent::Undone);
                }
            }
            Command::NewGame => {
                game.new_game();
                events.push(GameEvent::Started);
            }
            Command::Continue => {
                game.continue_after_win();
            }
            Command::Quit => {}
        }

        if game.phase() != phase_before {
            match game.phase() {
                Phase::Won => events.push(GameEvent::Won),
                Phase::Lost => events.push(GameEvent::Lost),
                _ => {}
            }
        }

        events
    }
}
