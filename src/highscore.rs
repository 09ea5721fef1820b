//! High-score leaderboard
//!
//! Kept outside the engine: the driver reads the final score, level and
//! lines off a finished `GameState` and records them here. The table is a
//! JSON file in the platform data directory.

use crate::error::StorageError;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Entries kept in the table
pub const MAX_HIGH_SCORE_ENTRIES: usize = 10;
/// Longer names are cut to this many characters
pub const MAX_PLAYER_NAME_LENGTH: usize = 20;

const HIGH_SCORE_FILE: &str = "highscores.json";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub player_name: String,
    /// Date as YYYY-MM-DD
    pub date: String,
    pub level: u32,
    pub lines: u32,
}

impl HighScoreEntry {
    /// An entry dated today
    pub fn new(player_name: &str, score: u64, level: u32, lines: u32) -> Self {
        Self {
            score,
            player_name: player_name.to_string(),
            date: today(),
            level,
            lines,
        }
    }
}

/// Best scores first, at most [`MAX_HIGH_SCORE_ENTRIES`] long
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry, keeping the table sorted and trimmed.
    /// Ties keep the older entry ahead.
    pub fn insert(&mut self, mut entry: HighScoreEntry) {
        entry.player_name = sanitize_player_name(&entry.player_name);
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORE_ENTRIES);
    }

    /// Whether `score` would make it onto the table
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.len() < MAX_HIGH_SCORE_ENTRIES
            || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Highest entry recorded under `player_name`
    pub fn best_for_player(&self, player_name: &str) -> Option<&HighScoreEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.player_name == player_name)
            .max_by_key(|entry| entry.score)
    }

    /// Entries recorded on `date` (YYYY-MM-DD)
    pub fn by_date(&self, date: &str) -> Vec<&HighScoreEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.date == date)
            .collect()
    }

    /// Keep table invariants after loading something hand-edited
    fn normalize(mut self) -> Self {
        let entries = std::mem::take(&mut self.entries);
        for entry in entries {
            self.insert(entry);
        }
        self
    }
}

/// Cut a name to [`MAX_PLAYER_NAME_LENGTH`] characters
pub fn sanitize_player_name(name: &str) -> String {
    name.chars().take(MAX_PLAYER_NAME_LENGTH).collect()
}

/// JSON file holding a [`HighScoreTable`]
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = Settings::data_dir().ok_or(StorageError::NoConfigDir)?;
        Ok(Self::new(dir.join(HIGH_SCORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table. A missing or unreadable file is an empty table.
    pub fn load(&self) -> HighScoreTable {
        match self.try_load() {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("ignoring high scores: {}", e);
                HighScoreTable::new()
            }
        }
    }

    /// Read the table, reporting why it could not be read
    pub fn try_load(&self) -> Result<HighScoreTable, StorageError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HighScoreTable::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let table: HighScoreTable = serde_json::from_str(&data)?;
        Ok(table.normalize())
    }

    pub fn save(&self, table: &HighScoreTable) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        let data = serde_json::to_string_pretty(table)?;
        fs::write(&self.path, data).map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }

    /// Load, insert, save. Returns the updated table.
    pub fn record(&self, entry: HighScoreEntry) -> Result<HighScoreTable, StorageError> {
        let mut table = self.load();
        table.insert(entry);
        self.save(&table)?;
        Ok(table)
    }

    /// Delete the file. Already gone counts as cleared.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }
}

/// Today's UTC date as YYYY-MM-DD
pub fn today() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    date_from_unix_days((secs / 86_400) as i64)
}

/// Civil date for a count of days since 1970-01-01
fn date_from_unix_days(days: i64) -> String {
    // Shift the epoch to 0000-03-01 so leap days fall at the end of a year
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
