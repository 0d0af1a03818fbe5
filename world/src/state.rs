//! Game state machine: playing, paused, game over and victory.

use maze_chase_core::GameState;

/// Occurrences that may move the game between states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// The player pressed the pause key.
    TogglePause,
    /// The last life was lost.
    LivesExhausted,
    /// The score reached the victory threshold.
    PelletsExhausted,
}

/// Holds the current [`GameState`] and applies the transition table.
///
/// `Playing` and `Paused` toggle back and forth; `GameOver` and `Victory`
/// are only reachable from `Playing` and never left.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StateMachine {
    state: GameState,
}

impl StateMachine {
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    /// Applies `trigger`, returning the `(from, to)` pair when the state changed.
    pub(crate) fn fire(&mut self, trigger: Trigger) -> Option<(GameState, GameState)> {
        let from = self.state;
        let to = match (from, trigger) {
            (GameState::Playing, Trigger::TogglePause) => GameState::Paused,
            (GameState::Paused, Trigger::TogglePause) => GameState::Playing,
            (GameState::Playing, Trigger::LivesExhausted) => GameState::GameOver,
            (GameState::Playing, Trigger::PelletsExhausted) => GameState::Victory,
            _ => return None,
        };

        self.state = to;
        Some((from, to))
    }
}
