use rand::distributions::{Alphanumeric, DistString};

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::player::Player;

/// Ordered players, turn order follows the sequence and wraps around.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    minimum_players: usize,
}

impl Roster {
    const ID_LENGTH: usize = 8;
    /// Fewer than two players leaves nobody to pass the device to.
    const MINIMUM_PLAYERS: usize = 2;

    /// Saved players are kept, a short roster is padded with default players.
    pub fn new(players: Vec<Player>, minimum_players: usize) -> Self {
        let minimum_players = minimum_players.max(Roster::MINIMUM_PLAYERS);
        if players.is_empty() {
            return Roster {
                players: Roster::default_players(minimum_players),
                minimum_players,
            };
        }

        let mut roster = Roster {
            players,
            minimum_players,
        };
        if roster.len() < minimum_players {
            log::warn!(
                "Roster has fewer players than the minimum, adding default players. ActualPlayers: '{}', MinimumPlayers: '{}'.",
                roster.len(),
                minimum_players
            );
            while roster.len() < minimum_players {
                roster.add();
            }
        }
        roster
    }

    fn default_players(amount: usize) -> Vec<Player> {
        (1..=amount)
            .map(|number| Player::new(&number.to_string(), &Roster::default_name(number)))
            .collect()
    }

    fn default_name(number: usize) -> String {
        format!("Jugador {number}")
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn position(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|player| player.id == player_id)
    }

    pub fn add(&mut self) -> &Player {
        let id = self.create_unique_player_id();
        let name = Roster::default_name(self.players.len() + 1);
        self.players.push(Player::new(&id, &name));
        &self.players[self.players.len() - 1]
    }

    /// Removes the player and returns the index it occupied.
    pub fn remove(&mut self, player_id: &str) -> Result<usize, Error> {
        let index = self
            .position(player_id)
            .ok_or_else(|| DomainError::PlayerDoesNotExist(player_id.to_string()))?;
        if self.players.len() <= self.minimum_players {
            return Err(Error::Domain(DomainError::NotEnoughPlayers(
                self.players.len(),
                self.minimum_players,
            )));
        }
        self.players.remove(index);
        Ok(index)
    }

    pub fn rename(&mut self, player_id: &str, name: &str) -> Result<(), Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Domain(DomainError::EmptyPlayerName(
                player_id.to_string(),
            )));
        }
        let player = self
            .players
            .iter_mut()
            .find(|player| player.id == player_id)
            .ok_or_else(|| DomainError::PlayerDoesNotExist(player_id.to_string()))?;
        player.name = name.to_string();
        Ok(())
    }

    pub fn credit(&mut self, index: usize, points: u32) {
        if let Some(player) = self.players.get_mut(index) {
            player.score += points;
        }
    }

    pub fn reset_scores(&mut self) {
        for player in self.players.iter_mut() {
            player.score = 0;
        }
    }

    fn create_unique_player_id(&self) -> String {
        loop {
            let id = Alphanumeric.sample_string(&mut rand::thread_rng(), Roster::ID_LENGTH);
            if self.position(&id).is_none() {
                return id;
            }
        }
    }
}
