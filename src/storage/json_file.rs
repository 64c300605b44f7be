use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::player::Player;
use crate::storage::{cap_history, GameHistoryEntry, PlayerRecord, Storage};

/// Stores each record as a whole JSON document inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    directory: PathBuf,
    history_limit: usize,
}

impl JsonFileStorage {
    const PLAYERS_FILE: &'static str = "players.json";
    const HISTORY_FILE: &'static str = "history.json";

    pub fn new(directory: impl Into<PathBuf>, history_limit: usize) -> Result<Self, Error> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|error| {
            Error::Persistence(format!(
                "Could not create the storage directory. Directory: '{}', Error: '{error}'.",
                directory.display()
            ))
        })?;
        Ok(JsonFileStorage {
            directory,
            history_limit,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>, Error> {
        let path = self.directory.join(file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(Error::Persistence(format!(
                    "Could not read the stored record. File: '{}', Error: '{error}'.",
                    path.display()
                )))
            }
        };
        serde_json::from_str(&content).map(Some).map_err(|error| {
            Error::Persistence(format!(
                "The stored record is corrupted. File: '{}', Error: '{error}'.",
                path.display()
            ))
        })
    }

    /// Writes next to the target and renames over it, so readers never see half a document.
    fn write<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<(), Error> {
        let path = self.directory.join(file_name);
        let temporary_path = self.directory.join(format!("{file_name}.tmp"));
        let content = serde_json::to_string(value).map_err(|error| {
            Error::Persistence(format!(
                "Could not serialize the record. File: '{}', Error: '{error}'.",
                path.display()
            ))
        })?;
        fs::write(&temporary_path, content)
            .and_then(|_| fs::rename(&temporary_path, &path))
            .map_err(|error| {
                Error::Persistence(format!(
                    "Could not write the record. File: '{}', Error: '{error}'.",
                    path.display()
                ))
            })
    }

    fn remove(&self, file_name: &str) -> Result<(), Error> {
        let path = self.directory.join(file_name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Persistence(format!(
                "Could not remove the record. File: '{}', Error: '{error}'.",
                path.display()
            ))),
        }
    }
}

impl Storage for JsonFileStorage {
    fn load_roster(&self) -> Result<Option<Vec<Player>>, Error> {
        Ok(self
            .read::<Vec<PlayerRecord>>(JsonFileStorage::PLAYERS_FILE)?
            .map(|records| records.into_iter().map(Player::from).collect()))
    }

    fn save_roster(&mut self, players: &[Player]) -> Result<(), Error> {
        let records: Vec<PlayerRecord> = players.iter().map(PlayerRecord::from).collect();
        self.write(JsonFileStorage::PLAYERS_FILE, &records)
    }

    fn append_history(&mut self, entry: GameHistoryEntry) -> Result<(), Error> {
        // An unreadable history is replaced instead of blocking every later game
        let mut history = self.load_history().unwrap_or_else(|error| {
            log::warn!("Stored history is unreadable, starting a new one. Error: '{error}'.");
            Vec::new()
        });
        history.push(entry);
        cap_history(&mut history, self.history_limit);
        self.write(JsonFileStorage::HISTORY_FILE, &history)
    }

    fn load_history(&self) -> Result<Vec<GameHistoryEntry>, Error> {
        Ok(self
            .read(JsonFileStorage::HISTORY_FILE)?
            .unwrap_or_default())
    }

    fn clear_history(&mut self) -> Result<(), Error> {
        self.remove(JsonFileStorage::HISTORY_FILE)
    }
}
