use std::sync::Arc;

use crate::config::{Config, GameSettings, StorageSettings};
use crate::game::actor::GameActor;
use crate::game::actor_client::GameClient;
use crate::game::Game;
use crate::storage::{InMemoryStorage, JsonFileStorage, Storage};
use crate::words::{WordList, WordSource};

pub fn spawn_game(config: &Config) -> GameClient {
    let storage = create_storage(&config.storage);
    let words = load_words(&config.game);
    spawn_game_with(&config.game, words, storage)
}

pub fn spawn_game_with(
    settings: &GameSettings,
    words: Arc<dyn WordSource>,
    storage: Box<dyn Storage>,
) -> GameClient {
    let players = storage.load_roster().unwrap_or_else(|error| {
        log::error!("Could not load the saved roster, using the default one. Error: '{error}'.");
        None
    });
    let game = Game::new(settings, words, players.unwrap_or_default());

    GameActor::spawn(
        game,
        storage,
        settings.tick_interval(),
        settings.next_turn_delay(),
    )
}

pub fn create_storage(settings: &StorageSettings) -> Box<dyn Storage> {
    match JsonFileStorage::new(&settings.directory, settings.history_limit) {
        Ok(storage) => Box::new(storage),
        Err(error) => {
            log::warn!(
                "Storage is unavailable, the game will only be kept in memory. Error: '{error}'."
            );
            Box::new(InMemoryStorage::new(settings.history_limit))
        }
    }
}

pub fn load_words(settings: &GameSettings) -> Arc<dyn WordSource> {
    match &settings.words_file {
        Some(words_file) => match WordList::from_file(words_file) {
            Ok(words) => Arc::new(words),
            Err(error) => {
                log::error!(
                    "Custom words could not be loaded, defaulting to the built-in list of words. Error: '{error}'."
                );
                Arc::new(WordList::spanish())
            }
        },
        None => Arc::new(WordList::spanish()),
    }
}
