use std::fmt::{Display, Formatter};
use std::time::Duration;

use tokio::select;
use tokio::sync::broadcast::error::SendError;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};

use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::countdown::Countdown;
use crate::game::game_fsm::GameFsmState;
use crate::game::key_press::KeyPress;
use crate::game::{Game, GameView};
use crate::metrics::{ACTIVE_GAMES, GAMES_RECORDED, TURNS_PASSED, WORDS_GUESSED, WORDS_SKIPPED};
use crate::storage::{GameHistoryEntry, Storage};

pub struct GameActor {
    game: Game,
    storage: Box<dyn Storage>,
    game_rx: Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    countdown: Countdown,
    next_turn_delay: Duration,
}

impl GameActor {
    /// Runs the Game Actor in background and returns a Client to communicate with it
    pub fn spawn(
        game: Game,
        storage: Box<dyn Storage>,
        tick_interval: Duration,
        next_turn_delay: Duration,
    ) -> GameClient {
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);

        tokio::spawn(
            GameActor {
                game,
                storage,
                game_rx,
                broadcast_tx,
                countdown: Countdown::new(tick_interval),
                next_turn_delay,
            }
            .start(),
        );

        GameClient { game_tx }
    }

    async fn start(mut self) {
        ACTIVE_GAMES.inc();

        loop {
            let state_before = self.game.state().clone();
            select! {
                command = self.game_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        log::info!("Game channel has been dropped. Stopping game actor.");
                        break;
                    }
                },
                _ = self.countdown.tick() => {
                    if let Err(error) = self.game.tick() {
                        log::error!(
                            "Countdown ticked outside of a running turn. Error: '{error}'."
                        );
                    }
                }
            }
            self.sync_countdown(&state_before);
            let _ = self.send_game_state();
        }

        ACTIVE_GAMES.dec();
    }

    fn handle_command(&mut self, command: GameCommand) {
        let (result, response_tx) = match command {
            GameCommand::Start { response_tx } => {
                (self.game.start().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::GuessCorrect { response_tx } => {
                let result = self.game.guess_correct().map(|_| {
                    WORDS_GUESSED.inc();
                    GameEvent::Ok
                });
                (result, response_tx)
            }
            GameCommand::Skip { response_tx } => {
                let result = self.game.skip().map(|_| {
                    WORDS_SKIPPED.inc();
                    GameEvent::Ok
                });
                (result, response_tx)
            }
            GameCommand::Pause { response_tx } => {
                (self.game.pause().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::Resume { response_tx } => {
                (self.game.resume().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::PassTurn { response_tx } => {
                (self.game.pass_turn().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::ConfirmNextTurn { response_tx } => {
                (self.game.confirm_start().map(|_| GameEvent::Ok), response_tx)
            }
            GameCommand::PressKey {
                key_press,
                response_tx,
            } => {
                let words_guessed = self.game.words_guessed();
                let result = self.game.press_key(key_press).map(|_| {
                    if self.game.words_guessed() > words_guessed {
                        WORDS_GUESSED.inc();
                    }
                    GameEvent::Ok
                });
                (result, response_tx)
            }
            GameCommand::Reset { response_tx } => {
                if let Some(entry) = self.game.reset() {
                    self.record_history(entry);
                }
                self.save_roster();
                (Ok(GameEvent::Ok), response_tx)
            }
            GameCommand::AddPlayer { response_tx } => {
                let player = self.game.add_player();
                self.save_roster();
                (
                    Ok(GameEvent::PlayerAdded {
                        player_id: player.id,
                    }),
                    response_tx,
                )
            }
            GameCommand::RemovePlayer {
                player_id,
                response_tx,
            } => {
                let result = self.game.remove_player(&player_id).map(|_| GameEvent::Ok);
                if result.is_ok() {
                    self.save_roster();
                }
                (result, response_tx)
            }
            GameCommand::RenamePlayer {
                player_id,
                name,
                response_tx,
            } => {
                let result = self.game.rename_player(&player_id, &name).map(|_| GameEvent::Ok);
                if result.is_ok() {
                    self.save_roster();
                }
                (result, response_tx)
            }
            GameCommand::GetState { response_tx } => (
                Ok(GameEvent::State {
                    view: self.game.view(),
                }),
                response_tx,
            ),
            GameCommand::Subscribe { response_tx } => (
                Ok(GameEvent::Subscribed {
                    broadcast_rx: self.broadcast_tx.subscribe(),
                    view: self.game.view(),
                }),
                response_tx,
            ),
            GameCommand::GetHistory { response_tx } => {
                let entries = self.storage.load_history().unwrap_or_else(|error| {
                    log::error!("Could not load the game history. Error: '{error}'.");
                    Vec::default()
                });
                (Ok(GameEvent::History { entries }), response_tx)
            }
            GameCommand::ClearHistory { response_tx } => {
                if let Err(error) = self.storage.clear_history() {
                    log::error!("Could not clear the game history. Error: '{error}'.");
                }
                (Ok(GameEvent::Ok), response_tx)
            }
        };

        let event = match result {
            Ok(event) => event,
            Err(error) => GameEvent::Error { error },
        };
        if let Err(event) = response_tx.send(event) {
            log::debug!("Sent '{event}' but the response channel is closed.");
        }
    }

    /// Any state change drops the running countdown; a running turn gets a fresh one.
    fn sync_countdown(&mut self, state_before: &GameFsmState) {
        let state = self.game.state();
        if state == state_before {
            return;
        }
        self.countdown.cancel();

        if state_before == &GameFsmState::Playing && state == &GameFsmState::PassingDevice {
            TURNS_PASSED.inc();
        }
        if state == &GameFsmState::Playing {
            let delay = if state_before == &GameFsmState::PassingDevice {
                self.next_turn_delay
            } else {
                Duration::ZERO
            };
            self.countdown.arm(delay);
        }
    }

    fn record_history(&mut self, entry: GameHistoryEntry) {
        match self.storage.append_history(entry) {
            Ok(()) => {
                GAMES_RECORDED.inc();
                log::info!("Game recorded in the history.");
            }
            Err(error) => {
                log::error!("Could not record the game in the history. Error: '{error}'.")
            }
        }
    }

    fn save_roster(&mut self) {
        if let Err(error) = self.storage.save_roster(self.game.players()) {
            log::error!("Could not save the roster. Error: '{error}'.");
        }
    }

    fn send_game_state(&self) -> Result<usize, SendError<GameWideEvent>> {
        self.broadcast_tx.send(GameWideEvent::GameState {
            view: self.game.view(),
        })
    }
}

pub(crate) enum GameCommand {
    Start {
        response_tx: OneshotSender<GameEvent>,
    },
    GuessCorrect {
        response_tx: OneshotSender<GameEvent>,
    },
    Skip {
        response_tx: OneshotSender<GameEvent>,
    },
    Pause {
        response_tx: OneshotSender<GameEvent>,
    },
    Resume {
        response_tx: OneshotSender<GameEvent>,
    },
    PassTurn {
        response_tx: OneshotSender<GameEvent>,
    },
    ConfirmNextTurn {
        response_tx: OneshotSender<GameEvent>,
    },
    PressKey {
        key_press: KeyPress,
        response_tx: OneshotSender<GameEvent>,
    },
    Reset {
        response_tx: OneshotSender<GameEvent>,
    },
    AddPlayer {
        response_tx: OneshotSender<GameEvent>,
    },
    RemovePlayer {
        player_id: String,
        response_tx: OneshotSender<GameEvent>,
    },
    RenamePlayer {
        player_id: String,
        name: String,
        response_tx: OneshotSender<GameEvent>,
    },
    GetState {
        response_tx: OneshotSender<GameEvent>,
    },
    Subscribe {
        response_tx: OneshotSender<GameEvent>,
    },
    GetHistory {
        response_tx: OneshotSender<GameEvent>,
    },
    ClearHistory {
        response_tx: OneshotSender<GameEvent>,
    },
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    Ok,
    PlayerAdded {
        player_id: String,
    },
    State {
        view: GameView,
    },
    Subscribed {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
        view: GameView,
    },
    History {
        entries: Vec<GameHistoryEntry>,
    },
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::PlayerAdded { player_id } =>
                    format!("GameEvent::PlayerAdded(player_id: {player_id})"),
                GameEvent::State { .. } => "GameEvent::State".to_string(),
                GameEvent::Subscribed { .. } => "GameEvent::Subscribed".to_string(),
                GameEvent::History { entries } =>
                    format!("GameEvent::History(entries: {})", entries.len()),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug)]
pub enum GameWideEvent {
    GameState { view: GameView },
}
