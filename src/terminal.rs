use std::fmt::Write;

use atrapapalabra::error::Error;
use atrapapalabra::game::actor::GameWideEvent;
use atrapapalabra::game::actor_client::{GameClient, GameWideEventReceiver};
use atrapapalabra::game::game_fsm::GameFsmState;
use atrapapalabra::game::key_press::KeyPress;
use atrapapalabra::game::GameView;
use atrapapalabra::storage::GameHistoryEntry;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "[Enter] acierto  s comenzar  x saltar  p pausar  r reanudar  t pasar turno  \
c comenzar turno  q reiniciar  + jugador  - <id> quitar  n <id> <nombre> renombrar  \
h historial  hc borrar historial  exit salir";

#[derive(Debug, PartialEq)]
pub enum TerminalCommand {
    PressSpace,
    Start,
    Skip,
    Pause,
    Resume,
    PassTurn,
    ConfirmNextTurn,
    Reset,
    AddPlayer,
    RemovePlayer(String),
    RenamePlayer(String, String),
    History,
    ClearHistory,
    Exit,
}

/// An empty line stands in for the spacebar.
pub fn parse_line(line: &str) -> Option<TerminalCommand> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };
    match (command, argument) {
        ("", _) => Some(TerminalCommand::PressSpace),
        ("s", "") => Some(TerminalCommand::Start),
        ("x", "") => Some(TerminalCommand::Skip),
        ("p", "") => Some(TerminalCommand::Pause),
        ("r", "") => Some(TerminalCommand::Resume),
        ("t", "") => Some(TerminalCommand::PassTurn),
        ("c", "") => Some(TerminalCommand::ConfirmNextTurn),
        ("q", "") => Some(TerminalCommand::Reset),
        ("+", "") => Some(TerminalCommand::AddPlayer),
        ("-", player_id) if !player_id.is_empty() => {
            Some(TerminalCommand::RemovePlayer(player_id.to_string()))
        }
        ("n", argument) => argument.split_once(char::is_whitespace).map(|(player_id, name)| {
            TerminalCommand::RenamePlayer(player_id.to_string(), name.trim().to_string())
        }),
        ("h", "") => Some(TerminalCommand::History),
        ("hc", "") => Some(TerminalCommand::ClearHistory),
        ("exit", "") => Some(TerminalCommand::Exit),
        _ => None,
    }
}

pub async fn run(game: GameClient) -> Result<(), Error> {
    let (view, receiver) = game.subscribe().await?;
    println!("{}", render(&view));
    println!("{HELP}");
    let printer = tokio::spawn(print_snapshots(view, receiver));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = lines.next_line().await.map_err(|error| {
            Error::log_and_create_internal(&format!("Could not read from stdin. Error: '{error}'."))
        })?;
        let Some(line) = line else { break };
        let result = match parse_line(&line) {
            Some(TerminalCommand::PressSpace) => game.press_key(KeyPress::space()).await,
            Some(TerminalCommand::Start) => game.start().await,
            Some(TerminalCommand::Skip) => game.skip().await,
            Some(TerminalCommand::Pause) => game.pause().await,
            Some(TerminalCommand::Resume) => game.resume().await,
            Some(TerminalCommand::PassTurn) => game.pass_turn().await,
            Some(TerminalCommand::ConfirmNextTurn) => game.confirm_next_turn().await,
            Some(TerminalCommand::Reset) => game.reset().await,
            Some(TerminalCommand::AddPlayer) => game.add_player().await.map(|_| ()),
            Some(TerminalCommand::RemovePlayer(player_id)) => game.remove_player(&player_id).await,
            Some(TerminalCommand::RenamePlayer(player_id, name)) => {
                game.rename_player(&player_id, &name).await
            }
            Some(TerminalCommand::History) => game.history().await.map(|entries| {
                println!("{}", render_history(&entries));
            }),
            Some(TerminalCommand::ClearHistory) => game.clear_history().await,
            Some(TerminalCommand::Exit) => break,
            None => {
                println!("{HELP}");
                Ok(())
            }
        };
        match result {
            Ok(()) => {}
            Err(error) if error.is_ignorable() => log::debug!("Action ignored. Error: '{error}'."),
            Err(error) => return Err(error),
        }
    }

    printer.abort();
    Ok(())
}

async fn print_snapshots(mut previous: GameView, mut receiver: GameWideEventReceiver) {
    while let Ok(GameWideEvent::GameState { view }) = receiver.next().await {
        if should_render(&previous, &view) {
            println!("{}", render(&view));
        }
        previous = view;
    }
}

/// The clock alone only redraws every ten seconds and during the last five.
pub fn should_render(previous: &GameView, view: &GameView) -> bool {
    let clock_only = GameView {
        time_remaining: view.time_remaining,
        ..previous.clone()
    };
    if &clock_only != view {
        return true;
    }
    view.time_remaining != previous.time_remaining
        && (view.time_remaining % 10 == 0 || view.time_remaining <= 5)
}

pub fn render(view: &GameView) -> String {
    let mut screen = String::new();
    let current_player = view
        .current_player()
        .map(|player| player.name.as_str())
        .unwrap_or_default();

    let _ = writeln!(screen, "----------------------------------------");
    let _ = writeln!(screen, "Turno de: {current_player}");
    match view.state {
        GameFsmState::PassingDevice => {
            let _ = writeln!(screen, "⏸️  Pasa el dispositivo. [c] Comenzar turno");
        }
        GameFsmState::Paused => {
            let _ = writeln!(
                screen,
                "⏸️  Pausado. Tiempo restante: {}s. [r] Reanudar",
                view.time_remaining
            );
        }
        GameFsmState::Playing => {
            let _ = writeln!(screen, "⏱️  {}s", view.time_remaining);
            let _ = writeln!(screen, ">>> {} <<<", view.current_word.to_uppercase());
            let _ = writeln!(screen, "Palabras adivinadas: {}", view.words_guessed);
        }
        GameFsmState::Idle | GameFsmState::PassingTurn => {
            let _ = writeln!(screen, "Presiona [s] para comenzar");
        }
    }
    let _ = writeln!(screen, "Jugadores:");
    for (index, player) in view.players.iter().enumerate() {
        let marker = if index == view.current_player_index { '>' } else { ' ' };
        let _ = writeln!(
            screen,
            "{marker} {} ({}) {} pts",
            player.name, player.id, player.score
        );
    }
    screen
}

pub fn render_history(entries: &[GameHistoryEntry]) -> String {
    if entries.is_empty() {
        return "Sin partidas guardadas".to_string();
    }
    let mut screen = String::new();
    for entry in entries.iter().rev() {
        let players = entry
            .players
            .iter()
            .map(|player| format!("{} {}", player.name, player.score))
            .collect::<Vec<String>>()
            .join(", ");
        let _ = writeln!(
            screen,
            "{} | {} palabras | {}s | {players}",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.total_words,
            entry.duration
        );
    }
    screen
}
