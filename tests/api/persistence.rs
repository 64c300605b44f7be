use atrapapalabra::error::Error;
use atrapapalabra::game::game_fsm::GameFsmState;
use atrapapalabra::player::Player;
use atrapapalabra::storage::{GameHistoryEntry, JsonFileStorage, Storage};

use crate::helpers::{spawn_game, TestApp};

struct FailingStorage;

impl Storage for FailingStorage {
    fn load_roster(&self) -> Result<Option<Vec<Player>>, Error> {
        Err(Error::Persistence("disk unavailable".to_string()))
    }

    fn save_roster(&mut self, _players: &[Player]) -> Result<(), Error> {
        Err(Error::Persistence("disk unavailable".to_string()))
    }

    fn append_history(&mut self, _entry: GameHistoryEntry) -> Result<(), Error> {
        Err(Error::Persistence("disk unavailable".to_string()))
    }

    fn load_history(&self) -> Result<Vec<GameHistoryEntry>, Error> {
        Err(Error::Persistence("disk unavailable".to_string()))
    }

    fn clear_history(&mut self) -> Result<(), Error> {
        Err(Error::Persistence("disk unavailable".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn reset_records_the_finished_game() {
    let app = TestApp::spawn_with_players(&["Ana", "Luis"]);
    app.game.start().await.expect("Failed to start the game.");
    app.guess(2).await;
    app.game.pass_turn().await.expect("Failed to pass the turn.");

    app.game.reset().await.expect("Failed to reset the game.");

    let history = app.game.history().await.expect("Failed to get the history.");
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.total_words, 2);
    assert_eq!(entry.players.len(), 2);
    assert_eq!(entry.players[0].name, "Ana");
    assert_eq!(entry.players[0].score, 2);
    assert_eq!(entry.players[1].score, 0);
    assert_eq!(
        app.storage.load_history().expect("Failed to load the history."),
        history
    );
}

#[tokio::test(start_paused = true)]
async fn a_game_without_guesses_is_not_recorded() {
    let app = TestApp::spawn_app();
    app.game.start().await.expect("Failed to start the game.");
    app.game.skip().await.expect("Failed to skip the word.");

    app.game.reset().await.expect("Failed to reset the game.");
    app.game.reset().await.expect("Failed to reset an idle game.");

    assert!(app
        .game
        .history()
        .await
        .expect("Failed to get the history.")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn the_history_keeps_the_fifty_most_recent_games() {
    let app = TestApp::spawn_app();

    for guesses in 1..=51 {
        app.game.start().await.expect("Failed to start the game.");
        app.guess(guesses % 5 + 1).await;
        app.game.reset().await.expect("Failed to reset the game.");
    }

    let history = app.game.history().await.expect("Failed to get the history.");
    assert_eq!(history.len(), 50);
    let total_words: Vec<u32> = history.iter().map(|entry| entry.total_words).collect();
    let expected: Vec<u32> = (2..=51).map(|guesses| (guesses % 5 + 1) as u32).collect();
    assert_eq!(total_words, expected);
}

#[tokio::test(start_paused = true)]
async fn the_history_can_be_cleared() {
    let app = TestApp::spawn_app();
    app.game.start().await.expect("Failed to start the game.");
    app.guess(1).await;
    app.game.reset().await.expect("Failed to reset the game.");

    app.game
        .clear_history()
        .await
        .expect("Failed to clear the history.");

    assert!(app
        .game
        .history()
        .await
        .expect("Failed to get the history.")
        .is_empty());
}

#[tokio::test(start_paused = true)]
async fn roster_edits_are_saved() {
    let app = TestApp::spawn_app();

    let player_id = app.game.add_player().await.expect("Failed to add a player.");
    app.game
        .rename_player(&player_id, "Marta")
        .await
        .expect("Failed to rename the player.");
    app.game
        .remove_player("1")
        .await
        .expect("Failed to remove the player.");

    let roster = app
        .storage
        .load_roster()
        .expect("Failed to load the roster.")
        .expect("The roster was never saved.");
    let names: Vec<&str> = roster.iter().map(|player| player.name.as_str()).collect();
    assert_eq!(names, vec!["Jugador 2", "Marta"]);
    assert_eq!(roster[1].id, player_id);
}

#[tokio::test(start_paused = true)]
async fn a_saved_roster_comes_back_without_scores() {
    let directory = tempfile::tempdir().expect("Failed to create a temporary directory.");
    std::fs::write(
        directory.path().join("players.json"),
        r#"[{"id":"a","name":"Ana","score":5},{"id":"b","name":"Luis","score":3},{"id":"c","name":"Eva","score":1}]"#,
    )
    .expect("Failed to write the saved roster.");
    let storage =
        JsonFileStorage::new(directory.path(), 50).expect("Failed to open the storage.");

    let game = spawn_game(Box::new(storage));

    let view = game.state().await.expect("Failed to get the game state.");
    let names: Vec<&str> = view.players.iter().map(|player| player.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Luis", "Eva"]);
    assert!(view.players.iter().all(|player| player.score == 0));
}

#[tokio::test(start_paused = true)]
async fn a_short_saved_roster_keeps_its_names() {
    let app = TestApp::spawn_with_players(&["Ana"]);

    let view = app.state().await;

    assert_eq!(view.players.len(), 2);
    assert_eq!(view.players[0].id, "1");
    assert_eq!(view.players[0].name, "Ana");
    assert_eq!(view.players[1].name, "Jugador 2");
}

#[tokio::test(start_paused = true)]
async fn a_failing_storage_never_stops_the_game() {
    let game = spawn_game(Box::new(FailingStorage));

    game.start().await.expect("Failed to start the game.");
    game.guess_correct().await.expect("Failed to guess a word.");
    game.add_player().await.expect("Failed to add a player.");
    game.reset().await.expect("Failed to reset the game.");
    game.clear_history()
        .await
        .expect("Failed to clear the history.");

    assert!(game
        .history()
        .await
        .expect("Failed to get the history.")
        .is_empty());
    let view = game.state().await.expect("Failed to get the game state.");
    assert_eq!(view.state, GameFsmState::Idle);
    assert_eq!(view.players.len(), 3);
}
