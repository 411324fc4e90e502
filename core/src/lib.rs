#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Race engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Race.";

/// Side length of a single square tile expressed in render-space units.
pub const TILE_LENGTH: f32 = 30.0;

/// Position of a single grid cell expressed as signed column and row indices.
///
/// Signed coordinates let neighbor arithmetic underflow past the grid border
/// without wrapping; the maze queries treat every out-of-bounds position as
/// wall-like rather than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two grid positions.
    #[must_use]
    pub fn manhattan_distance(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighboring cell one step away in the given direction.
    #[must_use]
    pub const fn offset_by(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal movement directions available to the player and NPCs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

/// All cardinal directions in a fixed, deterministic order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Column and row delta produced by one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Direction of a row rotation within the maze interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Tiles shift toward decreasing column indices.
    Left,
    /// Tiles shift toward increasing column indices.
    Right,
}

impl RotationDirection {
    /// Column delta applied to every rotated tile.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// The catalog action that commits a rotation in this direction.
    #[must_use]
    pub const fn action(self) -> ActionKind {
        match self {
            Self::Left => ActionKind::RotateRowLeft,
            Self::Right => ActionKind::RotateRowRight,
        }
    }
}

/// Stable identity of a tile, assigned once at grid-creation time.
///
/// A tile keeps its identifier when a row rotation migrates it to another
/// cell, so content hooks attached to the tile travel with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of tiles that can occupy a maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable corridor tile.
    Floor,
    /// Impassable wall tile.
    Wall,
    /// The single winning tile of the maze.
    Goal,
    /// Reserved for future content; never produced by the generator.
    SpecialTrigger,
    /// Reserved for future content; never produced by the generator.
    Trap,
}

/// Unique identifier assigned to a non-player character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visual appearance applied to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EntityColor {
    /// Creates a new entity color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Selectable per-turn special actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Rotate the player's current row one column to the left.
    RotateRowLeft,
    /// Rotate the player's current row one column to the right.
    RotateRowRight,
}

/// Side that currently acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnOwner {
    /// The human-controlled player holds the turn.
    Player,
    /// The NPC collective holds the turn.
    Npcs,
}

/// Winner recorded when the game reaches its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// The player reached the goal first.
    Player,
    /// The identified NPC reached the goal first.
    Npc(NpcId),
}

/// Coordinator sub-state within a turn.
///
/// Phase data rides inside the variant that needs it: the pending rotation
/// direction lives in [`Phase::ConfirmingRotation`] instead of a side-channel
/// flag, so a stale "rotate pending" bit can never leak across turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a directional move from the current owner.
    AwaitingMove,
    /// Waiting for the external trivia collaborator to resolve a question.
    AwaitingTrivia,
    /// The player may open the action menu or end the turn directly.
    AwaitingAction,
    /// The action menu is open and awaits a numeric selection.
    SelectingAction,
    /// A rotation is staged and highlighted, awaiting confirm or cancel.
    ConfirmingRotation {
        /// Direction the staged rotation would shift the row.
        direction: RotationDirection,
    },
    /// The turn is spent; only an explicit end-turn input advances.
    AwaitingEndTurn,
    /// NPCs take their moves one at a time.
    NpcTurn,
    /// Terminal state; all further transitions are frozen until restart.
    GameOver {
        /// Side that reached the goal first.
        winner: Winner,
    },
}

/// Configuration used to build or rebuild the world.
///
/// `width` and `height` are the requested sizes; the generator doubles both
/// before carving, preserving the source convention that a "10x10" request
/// yields a 20x20 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Requested tile columns, pre-doubling.
    pub width: u32,
    /// Requested tile rows, pre-doubling.
    pub height: u32,
    /// Seed for every random draw made during generation.
    pub seed: u64,
    /// Whether player arrivals detour through the trivia phase.
    pub trivia_enabled: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 0x6d61_7a65_7261_6365,
            trivia_enabled: false,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the entire world from the provided configuration.
    Configure {
        /// Configuration to rebuild from.
        config: MazeConfig,
    },
    /// Advances the simulation by one tick.
    Tick,
    /// Requests that the player start a move in the given direction.
    MovePlayer {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Opens the action selection menu.
    OpenActionMenu,
    /// Selects an action by its 1-based index into the available list.
    SelectAction {
        /// 1-based position within the currently available actions.
        number: u8,
    },
    /// Commits the staged rotation after collision checking.
    ConfirmRotation,
    /// Abandons the menu or a staged rotation with no partial effects.
    CancelAction,
    /// Ends the player's turn and hands control to the NPCs.
    EndTurn,
    /// Requests that an NPC start a move in the given direction.
    StepNpc {
        /// Identifier of the NPC attempting to move.
        npc: NpcId,
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Marks an NPC as moved without a step; it forfeits this turn.
    SkipNpc {
        /// Identifier of the NPC forfeiting its move.
        npc: NpcId,
    },
    /// Reports the trivia collaborator's verdict, unblocking the detour.
    ResolveTrivia {
        /// Whether the answer was judged correct.
        correct: bool,
    },
    /// Rebuilds the whole world from a successor seed after a win.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a maze was generated and the world reset around it.
    MazeConfigured {
        /// Number of columns in the generated grid, post-doubling.
        columns: i32,
        /// Number of rows in the generated grid, post-doubling.
        rows: i32,
        /// Cell holding the goal tile.
        goal: GridPos,
    },
    /// Announces that the coordinator entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Announces that turn ownership flipped.
    TurnPassed {
        /// Side that now holds the turn.
        owner: TurnOwner,
    },
    /// Confirms that the player started moving between two cells.
    PlayerMoveStarted {
        /// Cell the player occupied before the move began.
        from: GridPos,
        /// Cell the player now logically occupies.
        to: GridPos,
    },
    /// Reports that the player's interpolation reached its destination.
    PlayerArrived {
        /// Cell the player settled on.
        cell: GridPos,
    },
    /// Confirms that an NPC started moving between two cells.
    NpcMoveStarted {
        /// Identifier of the moving NPC.
        npc: NpcId,
        /// Cell the NPC occupied before the move began.
        from: GridPos,
        /// Cell the NPC now logically occupies.
        to: GridPos,
    },
    /// Reports that an NPC forfeited its move this turn.
    NpcForfeited {
        /// Identifier of the forfeiting NPC.
        npc: NpcId,
    },
    /// Reports that an NPC's interpolation reached its destination.
    NpcArrived {
        /// Identifier of the arriving NPC.
        npc: NpcId,
        /// Cell the NPC settled on.
        cell: GridPos,
    },
    /// Announces that a row was highlighted as a rotation preview.
    RowHighlighted {
        /// Row index that would be affected by the staged rotation.
        row: i32,
    },
    /// Confirms that a row rotation was committed.
    RotationApplied {
        /// Row index that was rotated.
        row: i32,
        /// Direction the row shifted.
        direction: RotationDirection,
    },
    /// Reports that a staged rotation was rejected by the collision check.
    RotationRejected {
        /// Row index of the rejected rotation.
        row: i32,
        /// Direction of the rejected rotation.
        direction: RotationDirection,
    },
    /// Confirms that an action was consumed and its cooldown reset.
    ActionUsed {
        /// Action that was spent.
        kind: ActionKind,
    },
    /// Requests a question from the external trivia collaborator.
    TriviaRequested,
    /// Acknowledges the trivia collaborator's verdict.
    TriviaResolved {
        /// Whether the answer was judged correct.
        correct: bool,
    },
    /// Announces the terminal winner; no further transitions follow.
    GameWon {
        /// Side that reached the goal first.
        winner: Winner,
    },
}
