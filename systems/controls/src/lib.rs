#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input boundary that turns raw key intents into world commands.

use maze_chase_core::{Command, InputEvent, Velocity};
use tracing::debug;

/// Whether the run loop should keep going after a batch of inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep simulating.
    #[default]
    Continue,
    /// The player asked to leave.
    Quit,
}

/// Pure system that translates [`InputEvent`]s into [`Command`]s.
#[derive(Debug, Default)]
pub struct Controls {
    quit_requested: bool,
}

impl Controls {
    /// Translates `inputs` in order, appending the resulting commands to `out`.
    ///
    /// Once a quit was requested every later call reports [`ControlFlow::Quit`]
    /// and emits nothing.
    pub fn handle(&mut self, inputs: &[InputEvent], out: &mut Vec<Command>) -> ControlFlow {
        for input in inputs {
            if self.quit_requested {
                break;
            }

            match *input {
                InputEvent::Move(direction) => out.push(Command::SetPlayerVelocity {
                    velocity: Velocity::from_direction(direction),
                }),
                InputEvent::StopMove(direction) => out.push(Command::StopPlayerAxis {
                    axis: direction.axis(),
                }),
                InputEvent::TogglePause => out.push(Command::TogglePause),
                InputEvent::Quit => {
                    debug!("quit requested");
                    self.quit_requested = true;
                }
            }
        }

        if self.quit_requested {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    }

    /// Reports whether a quit input has been seen.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Axis, Direction};

    #[test]
    fn press_sets_unit_velocity() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        let flow = controls.handle(&[InputEvent::Move(Direction::Above)], &mut commands);

        assert_eq!(flow, ControlFlow::Continue);
        assert_eq!(
            commands,
            vec![Command::SetPlayerVelocity {
                velocity: Velocity::from_direction(Direction::Above),
            }]
        );
    }

    #[test]
    fn release_clears_the_key_axis() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        let _ = controls.handle(
            &[
                InputEvent::StopMove(Direction::Left),
                InputEvent::StopMove(Direction::Below),
            ],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![
                Command::StopPlayerAxis { axis: Axis::Column },
                Command::StopPlayerAxis { axis: Axis::Row },
            ]
        );
    }

    #[test]
    fn quit_stops_translation() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        let flow = controls.handle(
            &[
                InputEvent::TogglePause,
                InputEvent::Quit,
                InputEvent::Move(Direction::Right),
            ],
            &mut commands,
        );

        assert_eq!(flow, ControlFlow::Quit);
        assert_eq!(commands, vec![Command::TogglePause]);
        assert!(controls.should_quit());

        let flow = controls.handle(&[InputEvent::TogglePause], &mut commands);
        assert_eq!(flow, ControlFlow::Quit);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn empty_batch_continues() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        assert_eq!(controls.handle(&[], &mut commands), ControlFlow::Continue);
        assert!(commands.is_empty());
        assert!(!controls.should_quit());
    }
}
