pub mod in_memory;
pub mod json_file;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::player::Player;

pub use self::in_memory::InMemoryStorage;
pub use self::json_file::JsonFileStorage;

/// Local key-value store for the roster and the game history.
///
/// Implementations report failures as [`Error::Persistence`]; the game actor logs them
/// and keeps playing in memory.
pub trait Storage: Send {
    /// Stored players come back with a score of zero.
    fn load_roster(&self) -> Result<Option<Vec<Player>>, Error>;

    /// Only ids and names are stored, never scores.
    fn save_roster(&mut self, players: &[Player]) -> Result<(), Error>;

    /// Keeps only the most recent entries, dropping the oldest first.
    fn append_history(&mut self, entry: GameHistoryEntry) -> Result<(), Error>;

    fn load_history(&self) -> Result<Vec<GameHistoryEntry>, Error>;

    fn clear_history(&mut self) -> Result<(), Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        PlayerRecord {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        Player::new(&record.id, &record.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub players: Vec<Player>,
    pub total_words: u32,
    /// Seconds between the start of the game and its reset.
    pub duration: u64,
}

impl GameHistoryEntry {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        players: Vec<Player>,
        total_words: u32,
    ) -> Self {
        let duration = (finished_at - started_at).num_seconds().max(0) as u64;
        GameHistoryEntry {
            id: finished_at.timestamp_millis().to_string(),
            date: finished_at,
            players,
            total_words,
            duration,
        }
    }
}

fn cap_history(history: &mut Vec<GameHistoryEntry>, limit: usize) {
    if history.len() > limit {
        history.drain(..history.len() - limit);
    }
}
