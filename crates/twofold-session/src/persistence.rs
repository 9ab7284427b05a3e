//! Score record persistence: `{"best_score": .., "played_round": ..}` on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use twofold_core::constants::SCORE_FILE_NAME;

/// What survives between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub best_score: u64,
    #[serde(default)]
    pub played_round: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default score file location inside `dir`.
pub fn score_path(dir: &Path) -> PathBuf {
    dir.join(SCORE_FILE_NAME)
}

/// Load the record at `path`. A missing file yields the zero record.
pub fn load_record(path: &Path) -> Result<ScoreRecord, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no score record at {}, starting fresh", path.display());
            return Ok(ScoreRecord::default());
        }
        Err(e) => return Err(e.into()),
    };
    let record: ScoreRecord = serde_json::from_str(&json)?;
    info!(
        "loaded score record: best {} after {} rounds",
        record.best_score, record.played_round
    );
    Ok(record)
}

/// Overwrite the record at `path`, creating parent directories as needed.
pub fn save_record(path: &Path, record: &ScoreRecord) -> Result<(), PersistenceError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string(record)?;
    fs::write(path, json)?;
    Ok(())
}
