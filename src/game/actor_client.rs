use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::error::RecvError;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent, GameWideEvent};
use crate::game::key_press::KeyPress;
use crate::game::GameView;
use crate::storage::GameHistoryEntry;

#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    pub async fn start(&self) -> Result<(), Error> {
        self.send_action(|response_tx| GameCommand::Start { response_tx }, "Start")
            .await
    }

    pub async fn guess_correct(&self) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::GuessCorrect { response_tx },
            "GuessCorrect",
        )
        .await
    }

    pub async fn skip(&self) -> Result<(), Error> {
        self.send_action(|response_tx| GameCommand::Skip { response_tx }, "Skip")
            .await
    }

    pub async fn pause(&self) -> Result<(), Error> {
        self.send_action(|response_tx| GameCommand::Pause { response_tx }, "Pause")
            .await
    }

    pub async fn resume(&self) -> Result<(), Error> {
        self.send_action(|response_tx| GameCommand::Resume { response_tx }, "Resume")
            .await
    }

    pub async fn pass_turn(&self) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::PassTurn { response_tx },
            "PassTurn",
        )
        .await
    }

    pub async fn confirm_next_turn(&self) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::ConfirmNextTurn { response_tx },
            "ConfirmNextTurn",
        )
        .await
    }

    pub async fn press_key(&self, key_press: KeyPress) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::PressKey {
                key_press,
                response_tx,
            },
            "PressKey",
        )
        .await
    }

    pub async fn reset(&self) -> Result<(), Error> {
        self.send_action(|response_tx| GameCommand::Reset { response_tx }, "Reset")
            .await
    }

    /// Returns the id of the new player.
    pub async fn add_player(&self) -> Result<String, Error> {
        match self
            .send_command(|response_tx| GameCommand::AddPlayer { response_tx }, "AddPlayer")
            .await
        {
            Ok(GameEvent::PlayerAdded { player_id }) => Ok(player_id),
            event => Err(GameClient::handle_event_error(event)),
        }
    }

    pub async fn remove_player(&self, player_id: &str) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::RemovePlayer {
                player_id: player_id.to_string(),
                response_tx,
            },
            "RemovePlayer",
        )
        .await
    }

    pub async fn rename_player(&self, player_id: &str, name: &str) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::RenamePlayer {
                player_id: player_id.to_string(),
                name: name.to_string(),
                response_tx,
            },
            "RenamePlayer",
        )
        .await
    }

    pub async fn state(&self) -> Result<GameView, Error> {
        match self
            .send_command(|response_tx| GameCommand::GetState { response_tx }, "GetState")
            .await
        {
            Ok(GameEvent::State { view }) => Ok(view),
            event => Err(GameClient::handle_event_error(event)),
        }
    }

    /// Current snapshot plus a receiver for every later one.
    pub async fn subscribe(&self) -> Result<(GameView, GameWideEventReceiver), Error> {
        match self
            .send_command(|response_tx| GameCommand::Subscribe { response_tx }, "Subscribe")
            .await
        {
            Ok(GameEvent::Subscribed { broadcast_rx, view }) => {
                Ok((view, GameWideEventReceiver { broadcast_rx }))
            }
            event => Err(GameClient::handle_event_error(event)),
        }
    }

    pub async fn history(&self) -> Result<Vec<GameHistoryEntry>, Error> {
        match self
            .send_command(
                |response_tx| GameCommand::GetHistory { response_tx },
                "GetHistory",
            )
            .await
        {
            Ok(GameEvent::History { entries }) => Ok(entries),
            event => Err(GameClient::handle_event_error(event)),
        }
    }

    pub async fn clear_history(&self) -> Result<(), Error> {
        self.send_action(
            |response_tx| GameCommand::ClearHistory { response_tx },
            "ClearHistory",
        )
        .await
    }

    async fn send_action<F>(&self, command: F, command_name: &str) -> Result<(), Error>
    where
        F: FnOnce(OneshotSender<GameEvent>) -> GameCommand,
    {
        match self.send_command(command, command_name).await {
            Ok(GameEvent::Ok) => Ok(()),
            event => Err(GameClient::handle_event_error(event)),
        }
    }

    async fn send_command<F>(
        &self,
        command: F,
        command_name: &str,
    ) -> Result<GameEvent, Error>
    where
        F: FnOnce(OneshotSender<GameEvent>) -> GameCommand,
    {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.game_tx.send(command(tx)).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send GameCommand::{command_name} but GameActor is not listening. Error: '{error}'."
            ))
        })?;

        rx.await.map_err(|error: RecvError| {
            Error::log_and_create_internal(&format!(
                "Sent GameCommand::{command_name} to the Game, but the Game channel died. Error: '{error}'."
            ))
        })
    }

    fn handle_event_error(event: Result<GameEvent, Error>) -> Error {
        match event {
            Ok(GameEvent::Error { error }) => error,
            Ok(unexpected_event) => Error::log_and_create_internal(&format!(
                "Received an unexpected GameEvent. GameEvent: '{unexpected_event}'."
            )),
            Err(error) => error,
        }
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Ok(event),
                // Snapshots supersede each other, a slow reader only needs the latest one
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("Skipped {skipped} game snapshots.");
                }
                Err(error) => {
                    return Err(Error::log_and_create_internal(&format!(
                        "The broadcast channel with the Game has been closed. Error: {error}."
                    )))
                }
            }
        }
    }
}
