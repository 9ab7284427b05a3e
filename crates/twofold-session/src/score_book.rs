//! Running score, best score and round counter, with write-through to an
//! optional score file.

use std::path::PathBuf;

use log::info;

use twofold_core::state::ScoreView;

use crate::persistence::{self, PersistenceError, ScoreRecord};

#[derive(Debug, Clone)]
pub struct ScoreBook {
    score: u64,
    best: u64,
    played_round: u64,
    /// Score file. `None` keeps everything in memory.
    path: Option<PathBuf>,
}

impl ScoreBook {
    /// Open a book backed by `path`, loading any stored record.
    pub fn open(path: Option<PathBuf>) -> Result<Self, PersistenceError> {
        let record = match &path {
            Some(p) => persistence::load_record(p)?,
            None => ScoreRecord::default(),
        };
        Ok(Self {
            score: 0,
            best: record.best_score,
            played_round: record.played_round,
            path,
        })
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn played_round(&self) -> u64 {
        self.played_round
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            best: self.best,
            played_round: self.played_round,
        }
    }

    pub fn record(&self) -> ScoreRecord {
        ScoreRecord {
            best_score: self.best,
            played_round: self.played_round,
        }
    }

    /// Mirror the engine's running score.
    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    /// Promote the running score to best when it matches or beats it, and
    /// persist. Returns whether the best score strictly increased.
    pub fn check_highscore(&mut self) -> Result<bool, PersistenceError> {
        if self.score < self.best {
            return Ok(false);
        }
        let improved = self.score > self.best;
        self.best = self.score;
        self.save()?;
        if improved {
            info!("new best score: {}", self.best);
        }
        Ok(improved)
    }

    /// Count the current round as played.
    pub fn record_round_played(&mut self) -> Result<(), PersistenceError> {
        self.played_round += 1;
        info!("rounds played: {}", self.played_round);
        self.save()
    }

    /// Next round: advance the counter and zero the running score.
    pub fn start_new_game(&mut self) -> Result<(), PersistenceError> {
        self.played_round += 1;
        self.score = 0;
        self.save()
    }

    /// Zero score, best score and round counter.
    pub fn reset_all(&mut self) -> Result<(), PersistenceError> {
        self.score = 0;
        self.best = 0;
        self.played_round = 0;
        self.save()
    }

    fn save(&self) -> Result<(), PersistenceError> {
        match &self.path {
            Some(path) => persistence::save_record(path, &self.record()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn in_memory_book_starts_at_zero() {
        let book = ScoreBook::open(None).unwrap();
        assert_eq!(book.view(), ScoreView::default());
    }

    #[test]
    fn highscore_follows_running_score() {
        let mut book = ScoreBook::open(None).unwrap();
        book.set_score(16);
        assert!(book.check_highscore().unwrap());
        assert_eq!(book.best(), 16);

        // Equal score keeps the best but is not an improvement.
        assert!(!book.check_highscore().unwrap());

        book.start_new_game().unwrap();
        assert_eq!(book.score(), 0);
        book.set_score(8);
        assert!(!book.check_highscore().unwrap());
        assert_eq!(book.best(), 16);
    }

    #[test]
    fn new_game_and_reset_bookkeeping() {
        let mut book = ScoreBook::open(None).unwrap();
        book.start_new_game().unwrap();
        book.start_new_game().unwrap();
        book.record_round_played().unwrap();
        assert_eq!(book.played_round(), 3);

        book.set_score(100);
        book.check_highscore().unwrap();
        book.reset_all().unwrap();
        assert_eq!(book.view(), ScoreView::default());
    }

    #[test]
    fn book_writes_through_to_file() {
        let dir = std::env::temp_dir().join("twofold_test_book_file");
        let _ = fs::remove_dir_all(&dir);
        let path = persistence::score_path(&dir);

        let mut book = ScoreBook::open(Some(path.clone())).unwrap();
        book.set_score(64);
        book.check_highscore().unwrap();
        book.start_new_game().unwrap();

        let reopened = ScoreBook::open(Some(path)).unwrap();
        assert_eq!(reopened.best(), 64);
        assert_eq!(reopened.played_round(), 1);
        assert_eq!(reopened.score(), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
