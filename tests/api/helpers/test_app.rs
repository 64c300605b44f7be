use std::sync::Arc;
use std::time::Duration;

use atrapapalabra::config::GameSettings;
use atrapapalabra::game::actor_client::GameClient;
use atrapapalabra::game::GameView;
use atrapapalabra::player::Player;
use atrapapalabra::startup;
use atrapapalabra::storage::{InMemoryStorage, Storage};
use atrapapalabra::words::{Category, WordList};
use once_cell::sync::Lazy;

// Set TEST_LOG to see the game logs, the logger can only be installed once per binary
static LOGGER: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        std_logger::Config::logfmt().init();
    }
});

pub struct TestApp {
    pub game: GameClient,
    pub storage: InMemoryStorage,
}

impl TestApp {
    pub fn spawn_app() -> TestApp {
        TestApp::spawn_with_memory(InMemoryStorage::new(50))
    }

    pub fn spawn_with_players(names: &[&str]) -> TestApp {
        let mut storage = InMemoryStorage::new(50);
        let players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(index, name)| Player::new(&(index + 1).to_string(), name))
            .collect();
        storage
            .save_roster(&players)
            .expect("Failed to save the test roster.");
        TestApp::spawn_with_memory(storage)
    }

    pub fn spawn_with_memory(storage: InMemoryStorage) -> TestApp {
        TestApp {
            game: spawn_game(Box::new(storage.clone())),
            storage,
        }
    }

    pub async fn state(&self) -> GameView {
        self.game
            .state()
            .await
            .expect("Failed to get the game state.")
    }

    pub async fn guess(&self, times: usize) {
        for _ in 0..times {
            self.game
                .guess_correct()
                .await
                .expect("Failed to guess a word.");
        }
    }
}

pub fn spawn_game(storage: Box<dyn Storage>) -> GameClient {
    Lazy::force(&LOGGER);
    startup::spawn_game_with(&GameSettings::default(), Arc::new(test_words()), storage)
}

fn test_words() -> WordList {
    WordList::new(vec![Category {
        name: "Test".to_string(),
        words: (1..=10).map(|number| format!("palabra{number}")).collect(),
    }])
    .expect("Failed to build the test words.")
}

pub async fn sleep_millis(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
