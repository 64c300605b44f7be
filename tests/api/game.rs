use atrapapalabra::error::domain_error::DomainError;
use atrapapalabra::error::Error;
use atrapapalabra::game::actor::GameWideEvent;
use atrapapalabra::game::game_fsm::{GameFsmInput, GameFsmState};
use atrapapalabra::game::key_press::{Key, KeyPress};

use crate::helpers::{sleep_millis, TestApp};

#[tokio::test(start_paused = true)]
async fn time_up_passes_the_turn_and_credits_the_player() {
    let app = TestApp::spawn_with_players(&["Ana", "Luis"]);

    app.game.start().await.expect("Failed to start the game.");
    app.guess(2).await;
    sleep_millis(60_500).await;

    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::PassingDevice);
    assert_eq!(view.players[0].score, 2);
    assert_eq!(view.players[1].score, 0);
    assert_eq!(view.current_player_index, 1);
    assert_eq!(view.time_remaining, 60);
    assert_eq!(view.words_guessed, 0);
    assert_eq!(view.total_words_guessed, 2);
    assert!(!view.current_word.is_empty());
}

#[tokio::test(start_paused = true)]
async fn the_clock_does_not_run_while_paused() {
    let app = TestApp::spawn_app();

    app.game.start().await.expect("Failed to start the game.");
    sleep_millis(10_500).await;
    assert_eq!(app.state().await.time_remaining, 50);

    app.game.pause().await.expect("Failed to pause the game.");
    sleep_millis(30_000).await;
    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::Paused);
    assert_eq!(view.time_remaining, 50);

    app.game.resume().await.expect("Failed to resume the game.");
    sleep_millis(2_500).await;
    assert_eq!(app.state().await.time_remaining, 48);
}

#[tokio::test(start_paused = true)]
async fn the_next_turn_waits_for_the_device_to_be_passed() {
    let app = TestApp::spawn_app();

    app.game.start().await.expect("Failed to start the game.");
    app.game.pass_turn().await.expect("Failed to pass the turn.");
    sleep_millis(5_000).await;
    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::PassingDevice);
    assert_eq!(view.time_remaining, 60);

    app.game
        .confirm_next_turn()
        .await
        .expect("Failed to confirm the next turn.");
    sleep_millis(1_050).await;
    assert_eq!(app.state().await.time_remaining, 60);
    sleep_millis(100).await;
    assert_eq!(app.state().await.time_remaining, 59);
}

#[tokio::test(start_paused = true)]
async fn a_manual_pass_stops_the_previous_countdown() {
    let app = TestApp::spawn_app();

    app.game.start().await.expect("Failed to start the game.");
    sleep_millis(30_500).await;
    app.game.pass_turn().await.expect("Failed to pass the turn.");
    app.game
        .confirm_next_turn()
        .await
        .expect("Failed to confirm the next turn.");
    sleep_millis(10_500).await;

    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::Playing);
    assert_eq!(view.current_player_index, 1);
    assert_eq!(view.time_remaining, 50);
}

#[tokio::test(start_paused = true)]
async fn a_late_manual_pass_after_time_up_is_rejected() {
    let app = TestApp::spawn_with_players(&["Ana", "Luis"]);

    app.game.start().await.expect("Failed to start the game.");
    app.guess(1).await;
    sleep_millis(60_500).await;

    let result = app.game.pass_turn().await;

    assert_eq!(
        result,
        Err(Error::Domain(DomainError::ActionNotAllowed(
            GameFsmInput::PassTurn,
            GameFsmState::PassingDevice
        )))
    );
    let view = app.state().await;
    assert_eq!(view.players[0].score, 1);
    assert_eq!(view.current_player_index, 1);
}

#[tokio::test(start_paused = true)]
async fn actions_outside_a_running_turn_are_rejected() {
    let app = TestApp::spawn_app();

    let result = app.game.guess_correct().await;

    assert_eq!(
        result,
        Err(Error::Domain(DomainError::ActionNotAllowed(
            GameFsmInput::GuessCorrect,
            GameFsmState::Idle
        )))
    );
    assert!(result.is_err_and(|error| error.is_ignorable()));
    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::Idle);
    assert_eq!(view.total_words_guessed, 0);
}

#[tokio::test(start_paused = true)]
async fn the_spacebar_guesses_unless_typing_a_name() {
    let app = TestApp::spawn_app();
    app.game.start().await.expect("Failed to start the game.");

    app.game
        .press_key(KeyPress::space())
        .await
        .expect("Failed to press the spacebar.");
    app.game
        .press_key(KeyPress {
            key: Key::Space,
            target_is_text_input: true,
        })
        .await
        .expect("Failed to type a space.");
    app.game
        .press_key(KeyPress {
            key: Key::Other,
            target_is_text_input: false,
        })
        .await
        .expect("Failed to press another key.");

    assert_eq!(app.state().await.words_guessed, 1);
}

#[tokio::test(start_paused = true)]
async fn skipping_keeps_the_score_and_changes_the_word() {
    let app = TestApp::spawn_app();
    app.game.start().await.expect("Failed to start the game.");
    let word = app.state().await.current_word;

    app.game.skip().await.expect("Failed to skip the word.");

    let view = app.state().await;
    assert_ne!(view.current_word, word);
    assert_eq!(view.words_guessed, 0);
    assert_eq!(view.total_words_guessed, 0);
}

#[tokio::test(start_paused = true)]
async fn the_active_player_cannot_be_removed_mid_turn() {
    let app = TestApp::spawn_with_players(&["Ana", "Luis", "Eva"]);
    app.game.start().await.expect("Failed to start the game.");

    let result = app.game.remove_player("1").await;

    assert_eq!(
        result,
        Err(Error::Domain(DomainError::CannotRemoveActivePlayer(
            "1".to_string()
        )))
    );
    app.game
        .remove_player("3")
        .await
        .expect("Failed to remove a waiting player.");
    let view = app.state().await;
    assert_eq!(view.players.len(), 2);
    assert_eq!(view.current_player_index, 0);
}

#[tokio::test(start_paused = true)]
async fn the_roster_never_drops_below_two_players() {
    let app = TestApp::spawn_app();

    let result = app.game.remove_player("1").await;

    assert_eq!(
        result,
        Err(Error::Domain(DomainError::NotEnoughPlayers(2, 2)))
    );
    assert_eq!(app.state().await.players.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn players_can_be_added_and_renamed() {
    let app = TestApp::spawn_app();

    let player_id = app.game.add_player().await.expect("Failed to add a player.");
    app.game
        .rename_player(&player_id, "  Marta ")
        .await
        .expect("Failed to rename the player.");

    let view = app.state().await;
    assert_eq!(view.players.len(), 3);
    assert_eq!(view.players[2].id, player_id);
    assert_eq!(view.players[2].name, "Marta");
    assert_eq!(
        app.game.rename_player(&player_id, "   ").await,
        Err(Error::Domain(DomainError::EmptyPlayerName(player_id.clone())))
    );
}

#[tokio::test(start_paused = true)]
async fn reset_goes_back_to_idle_and_clears_the_scores() {
    let app = TestApp::spawn_app();
    app.game.start().await.expect("Failed to start the game.");
    app.guess(3).await;
    app.game.pass_turn().await.expect("Failed to pass the turn.");

    app.game.reset().await.expect("Failed to reset the game.");
    sleep_millis(5_000).await;

    let view = app.state().await;
    assert_eq!(view.state, GameFsmState::Idle);
    assert!(view.players.iter().all(|player| player.score == 0));
    assert_eq!(view.current_player_index, 0);
    assert_eq!(view.time_remaining, 60);
    assert_eq!(view.total_words_guessed, 0);
    assert!(view.current_word.is_empty());
    app.game.start().await.expect("Failed to start a new game.");
}

#[tokio::test(start_paused = true)]
async fn subscribers_follow_the_countdown() {
    let app = TestApp::spawn_app();
    let (view, mut receiver) = app
        .game
        .subscribe()
        .await
        .expect("Failed to subscribe to the game.");
    assert_eq!(view.state, GameFsmState::Idle);

    app.game.start().await.expect("Failed to start the game.");

    let mut time_remaining = Vec::new();
    while time_remaining.last() != Some(&59) {
        let GameWideEvent::GameState { view } = receiver
            .next()
            .await
            .expect("Failed to receive a snapshot.");
        if view.state == GameFsmState::Playing {
            time_remaining.push(view.time_remaining);
        }
    }
    assert_eq!(time_remaining, vec![60, 59]);
}
