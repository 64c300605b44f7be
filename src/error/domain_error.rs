use thiserror::Error;

use crate::game::game_fsm::{GameFsmInput, GameFsmState};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The action is not allowed in the current state. Action: '{0:?}', State: '{1:?}'.")]
    ActionNotAllowed(GameFsmInput, GameFsmState),
    #[error("The roster cannot shrink below the minimum. ActualPlayers: '{0}', MinimumPlayers: '{1}'.")]
    NotEnoughPlayers(usize, usize),
    #[error("The player does not exist. PlayerId: '{0}'.")]
    PlayerDoesNotExist(String),
    #[error("A player cannot be renamed to an empty name. PlayerId: '{0}'.")]
    EmptyPlayerName(String),
    #[error("The player whose turn is running cannot be removed. PlayerId: '{0}'.")]
    CannotRemoveActivePlayer(String),
    #[error("A word list needs at least one word.")]
    EmptyWordList,
}
