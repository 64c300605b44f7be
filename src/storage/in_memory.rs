use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Error;
use crate::player::Player;
use crate::storage::{cap_history, GameHistoryEntry, PlayerRecord, Storage};

#[derive(Debug, Default)]
struct Records {
    roster: Option<Vec<PlayerRecord>>,
    history: Vec<GameHistoryEntry>,
}

/// Process-local store. Clones share the same records.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    records: Arc<Mutex<Records>>,
    history_limit: usize,
}

impl InMemoryStorage {
    pub fn new(history_limit: usize) -> Self {
        InMemoryStorage {
            records: Arc::default(),
            history_limit,
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, Records>, Error> {
        self.records
            .lock()
            .map_err(|error| {
                Error::Persistence(format!("The in-memory store is poisoned. Error: '{error}'."))
            })
    }
}

impl Storage for InMemoryStorage {
    fn load_roster(&self) -> Result<Option<Vec<Player>>, Error> {
        Ok(self
            .records()?
            .roster
            .clone()
            .map(|records| records.into_iter().map(Player::from).collect()))
    }

    fn save_roster(&mut self, players: &[Player]) -> Result<(), Error> {
        self.records()?.roster = Some(players.iter().map(PlayerRecord::from).collect());
        Ok(())
    }

    fn append_history(&mut self, entry: GameHistoryEntry) -> Result<(), Error> {
        let history_limit = self.history_limit;
        let mut records = self.records()?;
        records.history.push(entry);
        cap_history(&mut records.history, history_limit);
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<GameHistoryEntry>, Error> {
        Ok(self.records()?.history.clone())
    }

    fn clear_history(&mut self) -> Result<(), Error> {
        self.records()?.history.clear();
        Ok(())
    }
}
