#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure decision system that drives NPC racers.
//!
//! The policy never touches world state. Each invocation inspects read-only
//! snapshots and emits at most one command: a step for the first NPC that
//! still owes a move, or a forfeit when every shuffled direction is blocked.

use maze_race_core::{Command, GridPos, Phase, ALL_DIRECTIONS};
use maze_race_world::query::{NpcView, TurnSnapshot};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Randomized movement policy shared by every NPC.
#[derive(Debug)]
pub struct NpcPolicy {
    rng: ChaCha8Rng,
}

impl NpcPolicy {
    /// Creates a policy whose direction shuffles replay for a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Decides the next NPC move, if any is due.
    ///
    /// NPCs act one at a time in identifier order; while one is mid-move the
    /// policy stays silent so the board settles between decisions.
    pub fn handle(
        &mut self,
        turn: &TurnSnapshot,
        npcs: &NpcView,
        is_valid_move: impl Fn(GridPos) -> bool,
        out_commands: &mut Vec<Command>,
    ) {
        if turn.phase != Phase::NpcTurn || npcs.any_moving() {
            return;
        }
        let Some(npc) = npcs.iter().find(|snapshot| !snapshot.has_moved) else {
            return;
        };

        let mut directions = ALL_DIRECTIONS;
        directions.shuffle(&mut self.rng);
        for direction in directions {
            if is_valid_move(npc.cell.offset_by(direction)) {
                out_commands.push(Command::StepNpc {
                    npc: npc.id,
                    direction,
                });
                return;
            }
        }
        out_commands.push(Command::SkipNpc { npc: npc.id });
    }
}
