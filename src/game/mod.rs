pub mod actor;
pub mod actor_client;
pub mod countdown;
pub mod game_fsm;
pub mod key_press;
pub mod used_words;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_fsm::StateMachine;

use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::key_press::KeyPress;
use crate::game::used_words::UsedWords;
use crate::player::Player;
use crate::roster::Roster;
use crate::storage::GameHistoryEntry;
use crate::words::{WordList, WordSource};

/// The turn engine. Owns the round state and is the only thing allowed to mutate it.
pub struct Game {
    fsm: StateMachine<GameFsm>,
    roster: Roster,
    words: Arc<dyn WordSource>,
    used_words: UsedWords,
    rng: StdRng,
    turn_duration: u32,
    current_player_index: usize,
    current_word: String,
    time_remaining: u32,
    words_guessed: u32,
    total_words_guessed: u32,
    started_at: Option<DateTime<Utc>>,
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub state: GameFsmState,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub current_word: String,
    pub time_remaining: u32,
    pub words_guessed: u32,
    pub total_words_guessed: u32,
}

impl GameView {
    pub fn is_playing(&self) -> bool {
        matches!(self.state, GameFsmState::Playing | GameFsmState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameFsmState::Paused
    }

    pub fn is_passing_device(&self) -> bool {
        self.state == GameFsmState::PassingDevice
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }
}

impl Game {
    pub fn new(settings: &GameSettings, words: Arc<dyn WordSource>, players: Vec<Player>) -> Self {
        Game::with_rng(settings, words, players, StdRng::from_entropy())
    }

    pub fn with_rng(
        settings: &GameSettings,
        words: Arc<dyn WordSource>,
        players: Vec<Player>,
        rng: StdRng,
    ) -> Self {
        let words: Arc<dyn WordSource> = if words.all_words().is_empty() {
            log::error!("Game created without words, defaulting to the built-in list of words.");
            Arc::new(WordList::spanish())
        } else {
            words
        };
        let turn_duration = settings.turn_duration_seconds.max(1);

        Self {
            fsm: StateMachine::new(),
            roster: Roster::new(players, settings.minimum_players),
            words,
            used_words: UsedWords::default(),
            rng,
            turn_duration,
            current_player_index: 0,
            current_word: String::new(),
            time_remaining: turn_duration,
            words_guessed: 0,
            total_words_guessed: 0,
            started_at: None,
        }
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn words_guessed(&self) -> u32 {
        self.words_guessed
    }

    pub fn used_words(&self) -> &[String] {
        self.used_words.served()
    }

    pub fn view(&self) -> GameView {
        GameView {
            state: self.state().clone(),
            players: self.players().to_vec(),
            current_player_index: self.current_player_index,
            current_word: self.current_word.clone(),
            time_remaining: self.time_remaining,
            words_guessed: self.words_guessed,
            total_words_guessed: self.total_words_guessed,
        }
    }

    pub fn start(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::Start)?;
        self.used_words.clear();
        self.current_word = self.draw_word();
        self.started_at = Some(Utc::now());
        self.total_words_guessed = 0;
        self.current_player_index = 0;
        self.time_remaining = self.turn_duration;
        self.words_guessed = 0;
        log::info!(
            "Game started. Players: '{}', FirstPlayer: '{}'.",
            self.roster.len(),
            self.current_player_name()
        );
        Ok(())
    }

    pub fn guess_correct(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::GuessCorrect)?;
        self.current_word = self.draw_word();
        self.words_guessed += 1;
        self.total_words_guessed += 1;
        Ok(())
    }

    /// The skipped word stays used, it will not come back this session.
    pub fn skip(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::Skip)?;
        self.current_word = self.draw_word();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::Pause)
    }

    pub fn resume(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::Resume)
    }

    pub fn pass_turn(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::PassTurn)?;
        self.finish_turn()
    }

    /// One second of the running turn. Reaching zero passes the turn right away.
    pub fn tick(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::Tick)?;
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.process_event(&GameFsmInput::TimeUp)?;
            return self.finish_turn();
        }
        Ok(())
    }

    pub fn confirm_start(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::ConfirmStart)?;
        self.time_remaining = self.turn_duration;
        log::info!("Turn started. Player: '{}'.", self.current_player_name());
        Ok(())
    }

    pub fn press_key(&mut self, key_press: KeyPress) -> Result<(), Error> {
        if key_press.is_guess() && self.state() == &GameFsmState::Playing {
            self.guess_correct()
        } else {
            Ok(())
        }
    }

    /// Back to idle from any state. Returns the history entry of the game that just ended,
    /// if it had any progress worth recording.
    pub fn reset(&mut self) -> Option<GameHistoryEntry> {
        let finished_at = Utc::now();
        let entry = match self.started_at {
            Some(started_at) if self.total_words_guessed > 0 => Some(GameHistoryEntry::new(
                started_at,
                finished_at,
                self.players().to_vec(),
                self.total_words_guessed,
            )),
            _ => None,
        };

        self.fsm = StateMachine::new();
        self.started_at = None;
        self.total_words_guessed = 0;
        self.used_words.clear();
        self.roster.reset_scores();
        self.current_player_index = 0;
        self.current_word = String::new();
        self.time_remaining = self.turn_duration;
        self.words_guessed = 0;
        log::info!("Game reset. Recorded: '{}'.", entry.is_some());
        entry
    }

    pub fn add_player(&mut self) -> Player {
        self.roster.add().clone()
    }

    pub fn remove_player(&mut self, player_id: &str) -> Result<(), Error> {
        let is_turn_running = matches!(
            self.state(),
            GameFsmState::Playing | GameFsmState::Paused | GameFsmState::PassingTurn
        );
        if is_turn_running && self.roster.position(player_id) == Some(self.current_player_index) {
            return Err(Error::Domain(DomainError::CannotRemoveActivePlayer(
                player_id.to_string(),
            )));
        }

        let removed_index = self.roster.remove(player_id)?;
        if removed_index < self.current_player_index {
            self.current_player_index -= 1;
        }
        if self.current_player_index >= self.roster.len() {
            self.current_player_index = 0;
        }
        Ok(())
    }

    pub fn rename_player(&mut self, player_id: &str, name: &str) -> Result<(), Error> {
        self.roster.rename(player_id, name)
    }

    fn finish_turn(&mut self) -> Result<(), Error> {
        let words_guessed = self.words_guessed;
        if words_guessed > 0 {
            self.roster.credit(self.current_player_index, words_guessed);
        }
        log::info!(
            "Turn passed. Player: '{}', WordsGuessed: '{}'.",
            self.current_player_name(),
            words_guessed
        );

        self.current_player_index = (self.current_player_index + 1) % self.roster.len();
        self.current_word = self.draw_word();
        self.time_remaining = self.turn_duration;
        self.words_guessed = 0;
        self.process_event(&GameFsmInput::TurnPassed)
    }

    fn draw_word(&mut self) -> String {
        self.used_words
            .draw(self.words.all_words(), &mut self.rng)
            .unwrap_or_default()
    }

    fn current_player_name(&self) -> &str {
        self.roster
            .get(self.current_player_index)
            .map(|player| player.name.as_str())
            .unwrap_or_default()
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => Ok(()),
            Err(_) => {
                log::debug!(
                    "Ignoring action. State: '{}', Action: '{:?}'.",
                    self.fsm.state(),
                    event
                );
                Err(Error::Domain(DomainError::ActionNotAllowed(
                    event.clone(),
                    self.fsm.state().clone(),
                )))
            }
        }
    }
}
