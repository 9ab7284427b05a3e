//! A game session: one engine, its score book and the game phase.
//!
//! `Session` processes `PlayerCommand`s and produces `GameStateSnapshot`s.
//! It is the caller the grid engine expects: it spawns a tile only after a
//! slide that moved something, tracks the best score and rounds played, and
//! flags the stuck board.

use std::path::PathBuf;

use log::{debug, info, warn};

use twofold_core::commands::PlayerCommand;
use twofold_core::enums::{Direction, GamePhase};
use twofold_core::error::EngineError;
use twofold_core::events::GameEvent;
use twofold_core::state::GameStateSnapshot;
use twofold_engine::{EngineConfig, GridEngine};

use crate::persistence::PersistenceError;
use crate::score_book::ScoreBook;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Configuration for a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    /// Score file. `None` keeps best score and rounds in memory only.
    pub save_path: Option<PathBuf>,
}

pub struct Session {
    engine: GridEngine,
    book: ScoreBook,
    phase: GamePhase,
    events: Vec<GameEvent>,
}

impl Session {
    /// Open the score book, build the engine and deal the starting tiles.
    /// The session starts in `GamePhase::Ready`.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let book = ScoreBook::open(config.save_path)?;
        let engine = GridEngine::new(config.engine)?;
        let mut session = Self {
            engine,
            book,
            phase: GamePhase::Ready,
            events: Vec::new(),
        };
        session.deal()?;
        Ok(session)
    }

    /// Process one command and return the resulting snapshot.
    pub fn apply(&mut self, command: PlayerCommand) -> GameStateSnapshot {
        match command {
            PlayerCommand::Slide { direction } => self.slide(direction),
            PlayerCommand::NewGame => {
                persist_or_warn(self.book.start_new_game());
                self.restart();
            }
            PlayerCommand::ResetGame => {
                persist_or_warn(self.book.reset_all());
                self.restart();
            }
            PlayerCommand::Quit => self.finish(),
        }
        self.snapshot()
    }

    /// Count the current round as played. Call when the player leaves.
    pub fn finish(&mut self) {
        persist_or_warn(self.book.record_round_played());
    }

    /// Current state, draining events produced since the last snapshot.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let grid = self.engine.snapshot_grid();
        GameStateSnapshot {
            phase: self.phase,
            rows: grid.rows(),
            cols: grid.cols(),
            grid: grid.to_rows(),
            score: self.book.view(),
            terminal: self.engine.is_terminal(),
            events: std::mem::take(&mut self.events),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn score_book(&self) -> &ScoreBook {
        &self.book
    }

    /// Install an explicit board, e.g. to replay a position.
    pub fn load_grid(&mut self, rows: &[Vec<u32>]) -> Result<(), SessionError> {
        self.engine.load_grid(rows)?;
        self.phase = if self.engine.is_terminal() {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        };
        Ok(())
    }

    fn slide(&mut self, direction: Direction) {
        if self.phase == GamePhase::GameOver {
            debug!("ignoring {direction}: game over");
            return;
        }

        let outcome = self.engine.resolve_move(direction);
        if !outcome.moved {
            return;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Slid {
            direction,
            score_delta: outcome.score_delta,
        });

        self.book.set_score(self.engine.current_score());
        match self.book.check_highscore() {
            Ok(true) => self.events.push(GameEvent::NewBestScore {
                score: self.book.best(),
            }),
            Ok(false) => {}
            Err(e) => warn!("failed to save score record: {e}"),
        }

        match self.engine.spawn_tile(false) {
            Ok(tile) => self.events.push(GameEvent::TileSpawned {
                row: tile.row,
                col: tile.col,
                value: tile.value,
            }),
            // A board that just moved always has a free cell.
            Err(e) => warn!("spawn after {direction} failed: {e}"),
        }

        if self.engine.is_terminal() {
            self.phase = GamePhase::GameOver;
            info!("game over with score {}", self.book.score());
            self.events.push(GameEvent::GameOver {
                score: self.book.score(),
            });
        }
    }

    fn restart(&mut self) {
        if let Err(e) = self.deal() {
            warn!("failed to deal a new board: {e}");
        }
        self.phase = GamePhase::Playing;
    }

    /// Fresh board with the starting tiles.
    fn deal(&mut self) -> Result<(), EngineError> {
        let dealt = self.engine.reset()?;
        self.book.set_score(0);
        info!("round {} dealt", self.book.played_round());
        self.events.push(GameEvent::RoundStarted {
            played_round: self.book.played_round(),
        });
        self.events
            .extend(dealt.into_iter().map(|tile| GameEvent::TileSpawned {
                row: tile.row,
                col: tile.col,
                value: tile.value,
            }));
        Ok(())
    }
}

fn persist_or_warn(result: Result<(), PersistenceError>) {
    if let Err(e) = result {
        warn!("failed to save score record: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::persistence;
    use twofold_core::state::ScoreView;

    fn session() -> Session {
        Session::new(SessionConfig::default()).unwrap()
    }

    fn slide(direction: Direction) -> PlayerCommand {
        PlayerCommand::Slide { direction }
    }

    #[test]
    fn new_session_is_ready_with_two_tiles() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Ready);
        let snap = s.snapshot();
        assert_eq!((snap.rows, snap.cols), (4, 4));
        let tiles: Vec<u32> = snap.grid.iter().flatten().copied().filter(|&v| v != 0).collect();
        assert_eq!(tiles, vec![2, 2]);
        assert!(matches!(
            snap.events[0],
            GameEvent::RoundStarted { played_round: 0 }
        ));
        assert_eq!(snap.events.len(), 3);

        // Events are drained.
        assert!(s.snapshot().events.is_empty());
    }

    #[test]
    fn slide_spawns_and_scores() {
        let mut s = session();
        s.load_grid(&[
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        s.snapshot();

        let snap = s.apply(slide(Direction::Left));
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.grid[0][0], 4);
        assert_eq!(snap.score.score, 4);
        assert_eq!(snap.score.best, 4);
        let tiles = snap.grid.iter().flatten().filter(|&&v| v != 0).count();
        assert_eq!(tiles, 2, "merged tile plus one spawn");
        assert!(snap.events.contains(&GameEvent::Slid {
            direction: Direction::Left,
            score_delta: 4
        }));
        assert!(snap.events.contains(&GameEvent::NewBestScore { score: 4 }));
        assert!(snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::TileSpawned { .. })));
    }

    #[test]
    fn noop_slide_does_not_spawn() {
        let mut s = session();
        s.load_grid(&[vec![2, 4], vec![0, 0]]).unwrap();
        let snap = s.apply(slide(Direction::Up));
        assert_eq!(snap.grid, vec![vec![2, 4], vec![0, 0]]);
        assert!(snap.events.is_empty());
    }

    #[test]
    fn slide_into_stuck_board_ends_game() {
        let mut s = session();
        s.load_grid(&[
            vec![0, 2, 4, 8],
            vec![4, 2, 4, 16],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ])
        .unwrap();
        assert_eq!(s.phase(), GamePhase::Playing);
        let snap = s.apply(slide(Direction::Left));
        // Row 0 becomes [2, 4, 8, x]; the spawned x is 2 or 4 and sits
        // between an 8 and a 16, so nothing can merge.
        assert_eq!(&snap.grid[0][..3], &[2, 4, 8]);
        assert!(snap.terminal);
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(snap.events.contains(&GameEvent::GameOver { score: 0 }));

        // Slides are ignored once the game is over.
        let after = s.apply(slide(Direction::Right));
        assert_eq!(after.grid, snap.grid);
        assert!(after.events.is_empty());
    }

    #[test]
    fn new_game_advances_round_and_keeps_best() {
        let mut s = session();
        s.load_grid(&[vec![8, 8, 0, 0]]).unwrap();
        s.apply(slide(Direction::Left));
        assert_eq!(s.score_book().best(), 16);

        let snap = s.apply(PlayerCommand::NewGame);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score.score, 0);
        assert_eq!(snap.score.best, 16);
        assert_eq!(snap.score.played_round, 1);
        assert_eq!((snap.rows, snap.cols), (1, 4));
        assert!(snap
            .events
            .contains(&GameEvent::RoundStarted { played_round: 1 }));
    }

    #[test]
    fn reset_wipes_everything() {
        let mut s = session();
        s.load_grid(&[vec![8, 8, 0, 0]]).unwrap();
        s.apply(slide(Direction::Left));
        s.apply(PlayerCommand::NewGame);

        let snap = s.apply(PlayerCommand::ResetGame);
        assert_eq!(snap.score, ScoreView::default());
        let tiles = snap.grid.iter().flatten().filter(|&&v| v != 0).count();
        assert_eq!(tiles, 2);
    }

    #[test]
    fn quit_counts_the_round() {
        let mut s = session();
        let snap = s.apply(PlayerCommand::Quit);
        assert_eq!(snap.score.played_round, 1);
    }

    #[test]
    fn session_persists_between_runs() {
        let dir = std::env::temp_dir().join("twofold_test_session_persist");
        let _ = fs::remove_dir_all(&dir);
        let config = SessionConfig {
            save_path: Some(persistence::score_path(&dir)),
            ..Default::default()
        };

        {
            let mut s = Session::new(config.clone()).unwrap();
            s.load_grid(&[vec![32, 32, 0, 0]]).unwrap();
            s.apply(slide(Direction::Left));
            s.apply(PlayerCommand::Quit);
        }

        let s = Session::new(config).unwrap();
        assert_eq!(s.score_book().best(), 64);
        assert_eq!(s.score_book().played_round(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn same_seed_same_session() {
        let config = SessionConfig {
            engine: EngineConfig {
                seed: 99,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut a = Session::new(config.clone()).unwrap();
        let mut b = Session::new(config).unwrap();
        for dir in Direction::ALL.iter().cycle().take(40) {
            assert_eq!(a.apply(slide(*dir)), b.apply(slide(*dir)));
        }
    }

    #[test]
    fn invalid_dimensions_fail_to_start() {
        let config = SessionConfig {
            engine: EngineConfig {
                rows: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            Session::new(config),
            Err(SessionError::Engine(EngineError::InvalidDimensions { .. }))
        ));
    }
}
