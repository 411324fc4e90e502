#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating edge-triggered input into world commands.
//!
//! The translation is phase-aware: the same key means different things in
//! different phases, and presses that have no meaning in the current phase
//! are dropped here rather than burdening the world with rejections.

use maze_race_core::{Command, Direction, Phase};
use maze_race_world::query::TurnSnapshot;

/// One frame of edge-triggered player input.
///
/// Each flag reports a fresh press this frame, never a held key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Move-up press.
    pub up: bool,
    /// Move-down press.
    pub down: bool,
    /// Move-left press.
    pub left: bool,
    /// Move-right press.
    pub right: bool,
    /// Open-the-action-menu press.
    pub action_menu: bool,
    /// Confirm press.
    pub confirm: bool,
    /// Cancel press.
    pub cancel: bool,
    /// End-turn press.
    pub end_turn: bool,
    /// Numeric press, already mapped to its digit.
    pub action_digit: Option<u8>,
    /// Restart press.
    pub restart: bool,
}

/// Stateless phase-aware input translator.
#[derive(Debug, Default)]
pub struct PlayerInput;

impl PlayerInput {
    /// Maps the frame's presses onto commands valid for the current phase.
    pub fn handle(&self, turn: &TurnSnapshot, frame: &InputFrame, out_commands: &mut Vec<Command>) {
        match turn.phase {
            Phase::AwaitingMove => {
                if let Some(direction) = pressed_direction(frame) {
                    out_commands.push(Command::MovePlayer { direction });
                }
            }
            Phase::AwaitingAction => {
                if frame.action_menu {
                    out_commands.push(Command::OpenActionMenu);
                } else if frame.end_turn {
                    out_commands.push(Command::EndTurn);
                }
            }
            Phase::SelectingAction => {
                if let Some(number) = frame.action_digit {
                    out_commands.push(Command::SelectAction { number });
                } else if frame.cancel {
                    out_commands.push(Command::CancelAction);
                }
            }
            Phase::ConfirmingRotation { .. } => {
                if frame.confirm {
                    out_commands.push(Command::ConfirmRotation);
                } else if frame.cancel {
                    out_commands.push(Command::CancelAction);
                }
            }
            Phase::AwaitingEndTurn => {
                if frame.end_turn {
                    out_commands.push(Command::EndTurn);
                }
            }
            Phase::GameOver { .. } => {
                if frame.restart {
                    out_commands.push(Command::Restart);
                }
            }
            // Movement interpolation, trivia, and NPC processing accept no
            // direct player input.
            Phase::AwaitingTrivia | Phase::NpcTurn => {}
        }
    }
}

fn pressed_direction(frame: &InputFrame) -> Option<Direction> {
    if frame.up {
        Some(Direction::North)
    } else if frame.down {
        Some(Direction::South)
    } else if frame.left {
        Some(Direction::West)
    } else if frame.right {
        Some(Direction::East)
    } else {
        None
    }
}
