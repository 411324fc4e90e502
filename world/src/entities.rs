//! Smooth-movement state machines for the player and NPCs.
//!
//! An entity's logical grid cell updates the instant a move is initiated;
//! the continuous render-space position trails behind and catches up, so the
//! two can disagree for the duration of one move's interpolation.

use maze_race_core::{EntityColor, GridPos, NpcId, TILE_LENGTH};

/// Idle/Moving interpolation state shared by every entity.
#[derive(Clone, Copy, Debug)]
pub struct Mover {
    grid: GridPos,
    x: f32,
    y: f32,
    dest_x: f32,
    dest_y: f32,
    moving: bool,
}

impl Mover {
    /// Creates an idle mover resting exactly on the given cell.
    #[must_use]
    pub fn at_cell(cell: GridPos) -> Self {
        let x = cell.x() as f32 * TILE_LENGTH;
        let y = cell.y() as f32 * TILE_LENGTH;
        Self {
            grid: cell,
            x,
            y,
            dest_x: x,
            dest_y: y,
            moving: false,
        }
    }

    /// Logical, authoritative grid cell.
    #[must_use]
    pub const fn grid(&self) -> GridPos {
        self.grid
    }

    /// Continuous render-space position.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Whether an interpolation toward a destination is in progress.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Starts a move toward the given cell.
    ///
    /// Rejected (returns false, state untouched) while a move is already in
    /// progress. On acceptance the grid cell updates immediately.
    pub fn begin_move(&mut self, cell: GridPos) -> bool {
        if self.moving {
            return false;
        }
        self.grid = cell;
        self.dest_x = cell.x() as f32 * TILE_LENGTH;
        self.dest_y = cell.y() as f32 * TILE_LENGTH;
        self.moving = true;
        true
    }

    /// Advances the continuous position by at most `move_speed` per axis.
    ///
    /// Returns true exactly on the tick the mover snaps onto its destination
    /// and transitions back to idle.
    pub fn advance(&mut self, move_speed: f32) -> bool {
        if !self.moving {
            return false;
        }
        let dx = self.dest_x - self.x;
        let dy = self.dest_y - self.y;
        if dx.abs() < move_speed && dy.abs() < move_speed {
            self.x = self.dest_x;
            self.y = self.dest_y;
            self.moving = false;
            return true;
        }
        if dx != 0.0 {
            self.x += move_speed.copysign(dx);
        }
        if dy != 0.0 {
            self.y += move_speed.copysign(dy);
        }
        false
    }
}

/// A non-player character racing the player toward the goal.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Npc {
    pub(crate) id: NpcId,
    pub(crate) mover: Mover,
    pub(crate) color: EntityColor,
    pub(crate) has_moved: bool,
}

impl Npc {
    pub(crate) fn at_cell(id: NpcId, cell: GridPos, color: EntityColor) -> Self {
        Self {
            id,
            mover: Mover::at_cell(cell),
            color,
            has_moved: false,
        }
    }
}
