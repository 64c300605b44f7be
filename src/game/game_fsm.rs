use std::fmt;

use rust_fsm::state_machine;

/*
 * Idle
 * Playing <-> Paused
 *    Guess correct / Skip keep the turn running
 *    Pass turn or time up -> PassingTurn (credit score, advance player)
 * PassingDevice
 *    Confirm start -> Playing
 * Reset (any state) rebuilds the machine at Idle
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(Idle)

    Idle => {
        Start => Playing
    },
    Playing => {
        Tick => Playing,
        GuessCorrect => Playing,
        Skip => Playing,
        Pause => Paused,
        PassTurn => PassingTurn,
        TimeUp => PassingTurn,
    },
    Paused => {
        Resume => Playing
    },
    PassingTurn => {
        TurnPassed => PassingDevice
    },
    PassingDevice => {
        ConfirmStart => Playing
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
