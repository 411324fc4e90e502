#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Maze Race.
//!
//! The world owns the maze grid, the player and NPC movement models, the
//! action book, and the turn/phase machine. Adapters and systems never
//! mutate it directly: they submit [`Command`] values through [`apply`] and
//! observe the resulting [`Event`] stream, reading state back through the
//! [`query`] module.

mod actions;
mod entities;
mod generator;
mod maze;

pub use actions::{ActionBook, ActionSpec, ROTATE_COOLDOWN_TICKS};
pub use entities::Mover;
pub use maze::{MazeState, Tile};

use entities::Npc;
use maze_race_core::{
    Command, Direction, EntityColor, Event, GridPos, MazeConfig, NpcId, Phase, RotationDirection,
    TurnOwner, Winner, WELCOME_BANNER,
};

/// Render-space units an entity covers per axis per tick while moving.
pub const MOVE_SPEED: f32 = 5.0;

/// Grid cell the player always starts from.
pub const PLAYER_START: GridPos = GridPos::new(1, 1);

const NPC_STARTS: [GridPos; 2] = [GridPos::new(3, 3), GridPos::new(5, 5)];

const NPC_COLORS: [EntityColor; 2] = [
    EntityColor::from_rgb(0xff, 0x00, 0x00),
    EntityColor::from_rgb(0x00, 0xff, 0x00),
];

/// Multiplier of the successor-seed generator used on restart.
const RESEED_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Represents the authoritative Maze Race world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: MazeConfig,
    maze: MazeState,
    player: Mover,
    npcs: Vec<Npc>,
    actions: ActionBook,
    owner: TurnOwner,
    phase: Phase,
    tick_index: u64,
}

impl World {
    /// Creates a world from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MazeConfig::default())
    }

    /// Creates a world from an explicit configuration.
    #[must_use]
    pub fn with_config(config: MazeConfig) -> Self {
        let maze = MazeState::generate(&config);
        Self {
            banner: WELCOME_BANNER,
            config,
            maze,
            player: Mover::at_cell(PLAYER_START),
            npcs: spawn_npcs(),
            actions: ActionBook::new(),
            owner: TurnOwner::Player,
            phase: Phase::AwaitingMove,
            tick_index: 0,
        }
    }

    fn rebuild(&mut self, out_events: &mut Vec<Event>) {
        self.maze = MazeState::generate(&self.config);
        self.player = Mover::at_cell(PLAYER_START);
        self.npcs = spawn_npcs();
        self.actions = ActionBook::new();
        self.owner = TurnOwner::Player;
        self.phase = Phase::AwaitingMove;
        self.tick_index = 0;
        out_events.push(Event::MazeConfigured {
            columns: self.maze.columns(),
            rows: self.maze.rows(),
            goal: self.maze.goal(),
        });
        out_events.push(Event::PhaseChanged { phase: self.phase });
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            self.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
    }

    /// Records the first winner; later arrivals never overwrite it.
    fn win(&mut self, winner: Winner, out_events: &mut Vec<Event>) {
        if matches!(self.phase, Phase::GameOver { .. }) {
            return;
        }
        out_events.push(Event::GameWon { winner });
        self.set_phase(Phase::GameOver { winner }, out_events);
    }

    fn end_turn(&mut self, out_events: &mut Vec<Event>) {
        match self.owner {
            TurnOwner::Player => {
                self.owner = TurnOwner::Npcs;
                for npc in &mut self.npcs {
                    npc.has_moved = false;
                }
                out_events.push(Event::TurnPassed {
                    owner: TurnOwner::Npcs,
                });
                self.set_phase(Phase::NpcTurn, out_events);
            }
            TurnOwner::Npcs => {
                self.owner = TurnOwner::Player;
                out_events.push(Event::TurnPassed {
                    owner: TurnOwner::Player,
                });
                self.set_phase(Phase::AwaitingMove, out_events);
            }
        }
    }

    fn occupied_cells(&self) -> Vec<GridPos> {
        let mut cells = vec![self.player.grid()];
        cells.extend(self.npcs.iter().map(|npc| npc.mover.grid()));
        cells
    }

    fn npc_index(&self, npc: NpcId) -> Option<usize> {
        self.npcs.iter().position(|candidate| candidate.id == npc)
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);

        // Cooldowns count down on every tick regardless of owner or phase.
        self.actions.update_cooldowns();

        if self.player.advance(MOVE_SPEED) {
            let cell = self.player.grid();
            out_events.push(Event::PlayerArrived { cell });
            if self.maze.is_goal(cell) {
                self.win(Winner::Player, out_events);
            } else if self.owner == TurnOwner::Player && self.phase == Phase::AwaitingMove {
                if self.config.trivia_enabled {
                    out_events.push(Event::TriviaRequested);
                    self.set_phase(Phase::AwaitingTrivia, out_events);
                } else {
                    self.set_phase(Phase::AwaitingAction, out_events);
                }
            }
        }

        let mut arrivals = Vec::new();
        for npc in &mut self.npcs {
            if npc.mover.advance(MOVE_SPEED) {
                arrivals.push((npc.id, npc.mover.grid()));
            }
        }
        // The player's arrival was resolved first, so simultaneous goal
        // arrivals deterministically favor the player, then lower NPC ids.
        for (npc, cell) in arrivals {
            out_events.push(Event::NpcArrived { npc, cell });
            if self.maze.is_goal(cell) {
                self.win(Winner::Npc(npc), out_events);
            }
        }

        if self.phase == Phase::NpcTurn
            && self.npcs.iter().all(|npc| !npc.mover.is_moving())
            && self.npcs.iter().all(|npc| npc.has_moved)
        {
            self.end_turn(out_events);
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.owner != TurnOwner::Player
            || self.phase != Phase::AwaitingMove
            || self.player.is_moving()
        {
            return;
        }
        let from = self.player.grid();
        let destination = from.offset_by(direction);
        if self.maze.is_valid_move(destination) && self.player.begin_move(destination) {
            out_events.push(Event::PlayerMoveStarted {
                from,
                to: destination,
            });
        }
    }

    fn select_action(&mut self, number: u8, out_events: &mut Vec<Event>) {
        if self.phase != Phase::SelectingAction {
            return;
        }
        let Some(spec) = self.actions.by_number(number) else {
            return;
        };
        let direction = match spec.kind() {
            maze_race_core::ActionKind::RotateRowLeft => RotationDirection::Left,
            maze_race_core::ActionKind::RotateRowRight => RotationDirection::Right,
        };
        let player = self.player.grid();
        self.maze.highlight_row(player);
        out_events.push(Event::RowHighlighted { row: player.y() });
        self.set_phase(Phase::ConfirmingRotation { direction }, out_events);
    }

    fn confirm_rotation(&mut self, out_events: &mut Vec<Event>) {
        let Phase::ConfirmingRotation { direction } = self.phase else {
            return;
        };
        let player = self.player.grid();
        let row = player.y();
        let occupied = self.occupied_cells();
        if self.maze.check_rotate_collision(player, direction, &occupied) {
            self.maze.clear_highlights();
            out_events.push(Event::RotationRejected { row, direction });
            self.set_phase(Phase::AwaitingAction, out_events);
            return;
        }
        self.maze.perform_rotate(player, direction);
        self.actions.use_action(direction.action());
        out_events.push(Event::RotationApplied { row, direction });
        out_events.push(Event::ActionUsed {
            kind: direction.action(),
        });
        self.set_phase(Phase::AwaitingEndTurn, out_events);
    }

    fn cancel_action(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::SelectingAction => self.set_phase(Phase::AwaitingAction, out_events),
            Phase::ConfirmingRotation { .. } => {
                self.maze.clear_highlights();
                self.set_phase(Phase::AwaitingAction, out_events);
            }
            _ => {}
        }
    }

    fn step_npc(&mut self, npc: NpcId, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase != Phase::NpcTurn {
            return;
        }
        let Some(index) = self.npc_index(npc) else {
            return;
        };
        if self.npcs[index].has_moved || self.npcs[index].mover.is_moving() {
            return;
        }
        let from = self.npcs[index].mover.grid();
        let destination = from.offset_by(direction);
        if self.maze.is_valid_move(destination) {
            let _ = self.npcs[index].mover.begin_move(destination);
            self.npcs[index].has_moved = true;
            out_events.push(Event::NpcMoveStarted {
                npc,
                from,
                to: destination,
            });
        } else {
            // Liveness over fairness: an impossible step still spends the
            // NPC's move so the turn always terminates.
            self.npcs[index].has_moved = true;
            out_events.push(Event::NpcForfeited { npc });
        }
    }

    fn skip_npc(&mut self, npc: NpcId, out_events: &mut Vec<Event>) {
        if self.phase != Phase::NpcTurn {
            return;
        }
        let Some(index) = self.npc_index(npc) else {
            return;
        };
        if !self.npcs[index].has_moved {
            self.npcs[index].has_moved = true;
            out_events.push(Event::NpcForfeited { npc });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_npcs() -> Vec<Npc> {
    NPC_STARTS
        .iter()
        .zip(NPC_COLORS.iter())
        .enumerate()
        .map(|(index, (start, color))| Npc::at_cell(NpcId::new(index as u32), *start, *color))
        .collect()
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { config } => {
            world.config = config;
            world.rebuild(out_events);
        }
        Command::Tick => world.tick(out_events),
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::OpenActionMenu => {
            if world.phase == Phase::AwaitingAction {
                world.set_phase(Phase::SelectingAction, out_events);
            }
        }
        Command::SelectAction { number } => world.select_action(number, out_events),
        Command::ConfirmRotation => world.confirm_rotation(out_events),
        Command::CancelAction => world.cancel_action(out_events),
        Command::EndTurn => {
            if world.owner == TurnOwner::Player
                && matches!(world.phase, Phase::AwaitingAction | Phase::AwaitingEndTurn)
            {
                world.end_turn(out_events);
            }
        }
        Command::StepNpc { npc, direction } => world.step_npc(npc, direction, out_events),
        Command::SkipNpc { npc } => world.skip_npc(npc, out_events),
        Command::ResolveTrivia { correct } => {
            if world.phase == Phase::AwaitingTrivia {
                out_events.push(Event::TriviaResolved { correct });
                world.set_phase(Phase::AwaitingAction, out_events);
            }
        }
        Command::Restart => {
            if matches!(world.phase, Phase::GameOver { .. }) {
                world.config.seed = next_seed(world.config.seed);
                world.rebuild(out_events);
            }
        }
    }
}

/// Successor seed derived on restart so every rematch gets a fresh maze
/// while staying reproducible from the original seed.
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(RESEED_MULTIPLIER).wrapping_add(1)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{ActionSpec, MazeState, World};
    use maze_race_core::{ActionKind, EntityColor, GridPos, MazeConfig, NpcId, Phase, TurnOwner};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the current maze was generated from.
    #[must_use]
    pub fn config(world: &World) -> MazeConfig {
        world.config
    }

    /// Read-only access to the maze grid surface.
    #[must_use]
    pub fn maze(world: &World) -> &MazeState {
        &world.maze
    }

    /// Number of ticks applied since the last rebuild.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's movement state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.grid(),
            position: world.player.position(),
            moving: world.player.is_moving(),
        }
    }

    /// Captures a read-only view of every NPC in identifier order.
    #[must_use]
    pub fn npcs(world: &World) -> NpcView {
        let mut snapshots: Vec<NpcSnapshot> = world
            .npcs
            .iter()
            .map(|npc| NpcSnapshot {
                id: npc.id,
                cell: npc.mover.grid(),
                position: npc.mover.position(),
                moving: npc.mover.is_moving(),
                has_moved: npc.has_moved,
                color: npc.color,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        NpcView { snapshots }
    }

    /// Captures the coordinator's owner and phase.
    #[must_use]
    pub fn turn(world: &World) -> TurnSnapshot {
        TurnSnapshot {
            owner: world.owner,
            phase: world.phase,
        }
    }

    /// Currently selectable actions in stable catalog order.
    #[must_use]
    pub fn available_actions(world: &World) -> Vec<ActionSpec> {
        world.actions.available()
    }

    /// Remaining cooldown ticks for the given action.
    #[must_use]
    pub fn action_cooldown(world: &World, kind: ActionKind) -> u32 {
        world.actions.cooldown_remaining(kind)
    }

    /// Cells occupied by the player and every NPC.
    #[must_use]
    pub fn occupied_cells(world: &World) -> Vec<GridPos> {
        world.occupied_cells()
    }

    /// Immutable representation of the player's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Logical grid cell the player occupies.
        pub cell: GridPos,
        /// Continuous render-space position.
        pub position: (f32, f32),
        /// Whether a move interpolation is in progress.
        pub moving: bool,
    }

    /// Immutable representation of a single NPC's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct NpcSnapshot {
        /// Unique identifier assigned to the NPC.
        pub id: NpcId,
        /// Logical grid cell the NPC occupies.
        pub cell: GridPos,
        /// Continuous render-space position.
        pub position: (f32, f32),
        /// Whether a move interpolation is in progress.
        pub moving: bool,
        /// Whether the NPC already spent its move this turn.
        pub has_moved: bool,
        /// Appearance assigned to the NPC.
        pub color: EntityColor,
    }

    /// Read-only snapshot describing all NPCs.
    #[derive(Clone, Debug, Default)]
    pub struct NpcView {
        snapshots: Vec<NpcSnapshot>,
    }

    impl NpcView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &NpcSnapshot> {
            self.snapshots.iter()
        }

        /// Whether any NPC is currently mid-move.
        #[must_use]
        pub fn any_moving(&self) -> bool {
            self.snapshots.iter().any(|snapshot| snapshot.moving)
        }

        /// Whether every NPC has spent its move this turn.
        #[must_use]
        pub fn all_moved(&self) -> bool {
            self.snapshots.iter().all(|snapshot| snapshot.has_moved)
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<NpcSnapshot> {
            self.snapshots
        }
    }

    /// Immutable owner/phase pair captured from the coordinator.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TurnSnapshot {
        /// Side that currently holds the turn.
        pub owner: TurnOwner,
        /// Coordinator sub-state within the turn.
        pub phase: Phase,
    }
}
