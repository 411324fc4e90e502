//! Phase-by-phase coverage of the input-to-command mapping.

use maze_race_core::{Command, Direction, Phase, RotationDirection, TurnOwner, Winner};
use maze_race_system_player_input::{InputFrame, PlayerInput};
use maze_race_world::query::TurnSnapshot;

fn player_turn(phase: Phase) -> TurnSnapshot {
    TurnSnapshot {
        owner: TurnOwner::Player,
        phase,
    }
}

fn translate(phase: Phase, frame: InputFrame) -> Vec<Command> {
    let mut commands = Vec::new();
    PlayerInput.handle(&player_turn(phase), &frame, &mut commands);
    commands
}

#[test]
fn directional_presses_move_the_player() {
    let commands = translate(
        Phase::AwaitingMove,
        InputFrame {
            right: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(
        commands,
        vec![Command::MovePlayer {
            direction: Direction::East
        }]
    );
}

#[test]
fn movement_phase_ignores_menu_presses() {
    let commands = translate(
        Phase::AwaitingMove,
        InputFrame {
            action_menu: true,
            confirm: true,
            end_turn: true,
            ..InputFrame::default()
        },
    );
    assert!(
        commands.is_empty(),
        "only directional presses matter before the move, got {commands:?}"
    );
}

#[test]
fn action_phase_opens_the_menu_or_ends_the_turn() {
    let open = translate(
        Phase::AwaitingAction,
        InputFrame {
            action_menu: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(open, vec![Command::OpenActionMenu]);

    let pass = translate(
        Phase::AwaitingAction,
        InputFrame {
            end_turn: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(pass, vec![Command::EndTurn]);
}

#[test]
fn menu_digits_select_and_cancel_backs_out() {
    let select = translate(
        Phase::SelectingAction,
        InputFrame {
            action_digit: Some(2),
            ..InputFrame::default()
        },
    );
    assert_eq!(select, vec![Command::SelectAction { number: 2 }]);

    let back = translate(
        Phase::SelectingAction,
        InputFrame {
            cancel: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(back, vec![Command::CancelAction]);
}

#[test]
fn staged_rotation_confirms_or_cancels() {
    let phase = Phase::ConfirmingRotation {
        direction: RotationDirection::Left,
    };
    let confirm = translate(
        phase,
        InputFrame {
            confirm: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(confirm, vec![Command::ConfirmRotation]);

    let cancel = translate(
        phase,
        InputFrame {
            cancel: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(cancel, vec![Command::CancelAction]);
}

#[test]
fn spent_turn_only_accepts_end_turn() {
    let commands = translate(
        Phase::AwaitingEndTurn,
        InputFrame {
            up: true,
            action_menu: true,
            action_digit: Some(1),
            end_turn: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(commands, vec![Command::EndTurn]);
}

#[test]
fn npc_turn_and_trivia_accept_nothing() {
    for phase in [Phase::NpcTurn, Phase::AwaitingTrivia] {
        let commands = translate(
            phase,
            InputFrame {
                up: true,
                down: true,
                confirm: true,
                cancel: true,
                end_turn: true,
                restart: true,
                action_digit: Some(1),
                ..InputFrame::default()
            },
        );
        assert!(commands.is_empty(), "{phase:?} must drop all input");
    }
}

#[test]
fn game_over_only_accepts_restart() {
    let phase = Phase::GameOver {
        winner: Winner::Player,
    };
    let restart = translate(
        phase,
        InputFrame {
            restart: true,
            ..InputFrame::default()
        },
    );
    assert_eq!(restart, vec![Command::Restart]);

    let ignored = translate(
        phase,
        InputFrame {
            up: true,
            end_turn: true,
            ..InputFrame::default()
        },
    );
    assert!(ignored.is_empty());
}
