#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Race session.
//!
//! An autopilot stands in for the human player so the full turn cycle can be
//! exercised from a terminal: it walks the shortest path toward the goal,
//! occasionally spends a rotation action, and answers trivia questions when
//! the detour is enabled. Generated mazes can also be exported to and
//! imported from single-line layout strings.

mod layout_transfer;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use maze_race_core::{
    Command, Direction, Event, GridPos, MazeConfig, Phase, TurnOwner, Winner, ALL_DIRECTIONS,
};
use maze_race_rendering::{
    menu_line, owner_label, phase_prompt, ActionMessage, Color, EntityVisual, Scene, StatusLine,
    TileVisual,
};
use maze_race_system_bootstrap::Bootstrap;
use maze_race_system_npc_policy::NpcPolicy;
use maze_race_system_player_input::{InputFrame, PlayerInput};
use maze_race_world::{apply, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use layout_transfer::MazeLayoutSnapshot;

/// Ticks a transient announcement stays visible in the status line.
const MESSAGE_TICKS: u32 = 60;

/// Command-line options controlling the session.
#[derive(Debug, Parser)]
#[command(name = "maze-race", about = "Race NPCs through a rotating maze")]
struct Args {
    /// Requested maze size; the generated grid doubles it per axis.
    #[arg(long, default_value_t = 10)]
    size: u32,
    /// Seed for maze generation and every in-game random draw.
    #[arg(long)]
    seed: Option<u64>,
    /// Completed player/NPC rounds before the session is called a draw.
    #[arg(long, default_value_t = 200)]
    max_turns: u32,
    /// Detour each player arrival through a trivia question.
    #[arg(long)]
    trivia: bool,
    /// Print the generated maze as a layout string and exit.
    #[arg(long)]
    export_layout: bool,
    /// Decode the given layout string, draw it, and exit.
    #[arg(long, value_name = "LAYOUT")]
    import_layout: Option<String>,
}

/// Entry point for the Maze Race command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(layout) = &args.import_layout {
        let snapshot =
            MazeLayoutSnapshot::decode(layout).context("failed to decode layout string")?;
        println!("{}", imported_scene(&snapshot).ascii_map());
        return Ok(());
    }

    ensure!(args.size >= 5, "maze size must be at least 5");
    let config = MazeConfig {
        width: args.size,
        height: args.size,
        seed: args.seed.unwrap_or(MazeConfig::default().seed),
        trivia_enabled: args.trivia,
    };

    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::Configure { config }, &mut events);
    println!("{}", Bootstrap.welcome_banner(&world));
    for event in events.drain(..) {
        narrate(&event);
    }

    if args.export_layout {
        println!("{}", export_layout(&world).encode());
        return Ok(());
    }

    run_session(&mut world, config.seed, args.max_turns);
    Ok(())
}

/// Drives the world tick by tick until a winner emerges or the turn limit
/// is exhausted.
fn run_session(world: &mut World, seed: u64, max_turns: u32) {
    let mut autopilot = Autopilot::from_seed(seed ^ 0x9e37_79b9_97f4_a7c5);
    let mut policy = NpcPolicy::from_seed(seed.rotate_left(17));
    let mut message: Option<ActionMessage> = None;
    let mut rounds: u32 = 0;
    let tick_budget = u64::from(max_turns).saturating_mul(500);

    for _ in 0..tick_budget {
        let mut commands = Vec::new();
        autopilot.decide(world, &mut commands);
        policy.handle(
            &query::turn(world),
            &query::npcs(world),
            |cell| query::maze(world).is_valid_move(cell),
            &mut commands,
        );

        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        apply(world, Command::Tick, &mut events);

        if let Some(active) = &mut message {
            active.tick();
        }
        for event in &events {
            narrate(event);
            if let Some(text) = announce(event) {
                message = Some(ActionMessage::new(text, MESSAGE_TICKS));
            }
            if matches!(
                event,
                Event::TurnPassed {
                    owner: TurnOwner::Player
                }
            ) {
                rounds += 1;
            }
        }

        if let Phase::GameOver { winner } = query::turn(world).phase {
            println!("{}", compose_scene(world, &message).ascii_map());
            println!("{}", winner_line(winner));
            return;
        }
        if rounds >= max_turns {
            println!("{}", compose_scene(world, &message).ascii_map());
            println!("Turn limit reached after {rounds} rounds; calling it a draw.");
            return;
        }
    }
    println!("Tick budget exhausted; aborting the session.");
}

/// Scripted stand-in for the human player.
///
/// Decisions are expressed as one [`InputFrame`] per tick and routed through
/// the same phase-aware translation real input would take. The trivia verdict
/// is the one exception: the detour waits on an external collaborator, so the
/// autopilot answers with a direct command.
#[derive(Debug)]
struct Autopilot {
    rng: ChaCha8Rng,
    input: PlayerInput,
}

impl Autopilot {
    fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            input: PlayerInput,
        }
    }

    fn decide(&mut self, world: &World, out_commands: &mut Vec<Command>) {
        let turn = query::turn(world);
        let mut frame = InputFrame::default();
        match turn.phase {
            Phase::AwaitingMove => {
                if turn.owner != TurnOwner::Player || query::player(world).moving {
                    return;
                }
                let Some(direction) = next_step_toward_goal(world) else {
                    return;
                };
                match direction {
                    Direction::North => frame.up = true,
                    Direction::South => frame.down = true,
                    Direction::West => frame.left = true,
                    Direction::East => frame.right = true,
                }
            }
            Phase::AwaitingTrivia => {
                out_commands.push(Command::ResolveTrivia {
                    correct: self.rng.gen_bool(0.75),
                });
                return;
            }
            Phase::AwaitingAction => {
                let rotation_worthwhile = !query::available_actions(world).is_empty()
                    && self.rng.gen_bool(1.0 / 3.0);
                if rotation_worthwhile {
                    frame.action_menu = true;
                } else {
                    frame.end_turn = true;
                }
            }
            Phase::SelectingAction => frame.action_digit = Some(1),
            Phase::ConfirmingRotation { .. } => frame.confirm = true,
            Phase::AwaitingEndTurn => frame.end_turn = true,
            Phase::NpcTurn | Phase::GameOver { .. } => return,
        }
        self.input.handle(&turn, &frame, out_commands);
    }
}

/// First step of a shortest walkable path from the player to the goal.
fn next_step_toward_goal(world: &World) -> Option<Direction> {
    let maze = query::maze(world);
    let start = query::player(world).cell;
    let goal = maze.goal();
    if start == goal {
        return None;
    }

    let columns = maze.columns();
    let rows = maze.rows();
    let slot = |cell: GridPos| (cell.y() * columns + cell.x()) as usize;
    let mut first_step: Vec<Option<Direction>> = vec![None; (columns * rows) as usize];
    let mut visited = vec![false; (columns * rows) as usize];
    visited[slot(start)] = true;
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for direction in ALL_DIRECTIONS {
            let next = current.offset_by(direction);
            if !maze.is_valid_move(next) || visited[slot(next)] {
                continue;
            }
            visited[slot(next)] = true;
            first_step[slot(next)] = first_step[slot(current)].or(Some(direction));
            if next == goal {
                return first_step[slot(next)];
            }
            queue.push_back(next);
        }
    }
    None
}

/// Prints a narration line for events worth reporting on a terminal.
fn narrate(event: &Event) {
    match event {
        Event::MazeConfigured {
            columns,
            rows,
            goal,
        } => println!(
            "Generated a {columns}x{rows} maze; the goal waits at ({}, {}).",
            goal.x(),
            goal.y()
        ),
        Event::TurnPassed { owner } => println!("-- {} --", owner_label(*owner)),
        Event::PlayerArrived { cell } => {
            println!("Player reached ({}, {}).", cell.x(), cell.y());
        }
        Event::NpcArrived { npc, cell } => {
            println!("NPC {} reached ({}, {}).", npc.get(), cell.x(), cell.y());
        }
        Event::NpcForfeited { npc } => println!("NPC {} is boxed in and waits.", npc.get()),
        Event::RotationApplied { row, direction } => {
            println!("Row {row} rotated {direction:?}.");
        }
        Event::RotationRejected { row, direction } => {
            println!("Rotating row {row} {direction:?} would crush a racer; cancelled.");
        }
        Event::TriviaRequested => println!("A trivia question blocks the hallway!"),
        Event::TriviaResolved { correct } => {
            if *correct {
                println!("Correct answer; the hallway opens.");
            } else {
                println!("Wrong answer, but the race goes on.");
            }
        }
        Event::GameWon { winner } => println!("{}", winner_line(*winner)),
        _ => {}
    }
}

/// Text for events that should linger in the status line.
fn announce(event: &Event) -> Option<String> {
    match event {
        Event::RotationApplied { row, direction } => {
            Some(format!("Rotated row {row} {direction:?}"))
        }
        Event::RotationRejected { row, .. } => Some(format!("Row {row} rotation blocked")),
        Event::GameWon { winner } => Some(winner_line(*winner)),
        _ => None,
    }
}

fn winner_line(winner: Winner) -> String {
    match winner {
        Winner::Player => "Player wins the race!".to_owned(),
        Winner::Npc(npc) => format!("NPC {} wins the race!", npc.get()),
    }
}

/// Builds the presentation scene from world queries.
fn compose_scene(world: &World, message: &Option<ActionMessage>) -> Scene {
    let maze = query::maze(world);
    let tiles = maze
        .iter()
        .map(|(cell, tile)| TileVisual {
            cell,
            kind: tile.kind(),
            highlighted: tile.highlighted(),
        })
        .collect();

    let mut entities: Vec<EntityVisual> = query::npcs(world)
        .iter()
        .map(|npc| EntityVisual {
            cell: npc.cell,
            position: npc.position.into(),
            color: npc.color.into(),
            glyph: char::from_digit(npc.id.get(), 10).unwrap_or('n'),
        })
        .collect();
    let player = query::player(world);
    entities.push(EntityVisual {
        cell: player.cell,
        position: player.position.into(),
        color: Color::from_rgb_u8(0x00, 0x00, 0xff),
        glyph: 'P',
    });

    let turn = query::turn(world);
    let menu = if turn.phase == Phase::SelectingAction {
        query::available_actions(world)
            .iter()
            .enumerate()
            .map(|(index, spec)| menu_line(index + 1, spec.name(), spec.description()))
            .collect()
    } else {
        Vec::new()
    };

    Scene {
        columns: maze.columns(),
        rows: maze.rows(),
        tiles,
        entities,
        status: StatusLine {
            owner: owner_label(turn.owner),
            prompt: phase_prompt(turn.phase),
            message: message
                .as_ref()
                .and_then(|active| active.text())
                .map(str::to_owned),
        },
        menu,
    }
}

/// Captures the current maze as a shareable layout snapshot.
fn export_layout(world: &World) -> MazeLayoutSnapshot {
    let maze = query::maze(world);
    MazeLayoutSnapshot {
        columns: maze.columns() as u32,
        rows: maze.rows() as u32,
        goal: maze.goal(),
        tiles: maze.iter().map(|(_, tile)| tile.kind()).collect(),
    }
}

/// Rebuilds a drawable scene from an imported layout snapshot.
fn imported_scene(snapshot: &MazeLayoutSnapshot) -> Scene {
    let columns = snapshot.columns as i32;
    let tiles = snapshot
        .tiles
        .iter()
        .enumerate()
        .map(|(index, kind)| TileVisual {
            cell: GridPos::new(index as i32 % columns, index as i32 / columns),
            kind: *kind,
            highlighted: false,
        })
        .collect();
    Scene {
        columns,
        rows: snapshot.rows as i32,
        tiles,
        entities: Vec::new(),
        status: StatusLine::default(),
        menu: Vec::new(),
    }
}
