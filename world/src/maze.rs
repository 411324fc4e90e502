//! Mutable maze grid: tile arena, query surface, highlighting, and the
//! wraparound row rotation with its collision pre-check.
//!
//! Tiles are records in an arena indexed by [`TileId`]; the grid itself is an
//! array of arena indices. Rotating a row therefore swaps indices between
//! cells in O(1) per column while every tile keeps its identity and content
//! hook.

use maze_race_core::{GridPos, RotationDirection, TileId, TileKind};

/// A single tile record stored in the maze arena.
#[derive(Clone, Debug)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
    highlighted: bool,
    flavor_image: Option<String>,
}

impl Tile {
    fn new(id: TileId, kind: TileKind) -> Self {
        Self {
            id,
            kind,
            highlighted: false,
            flavor_image: None,
        }
    }

    /// Stable identity assigned at grid-creation time.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Current tile type.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Whether the tile is marked by a pending-rotation preview.
    #[must_use]
    pub const fn highlighted(&self) -> bool {
        self.highlighted
    }

    /// Content hook naming the tile's flavor image, if one was assigned.
    #[must_use]
    pub fn flavor_image(&self) -> Option<&str> {
        self.flavor_image.as_deref()
    }
}

/// Authoritative grid of tiles with cached goal position.
#[derive(Clone, Debug)]
pub struct MazeState {
    columns: i32,
    rows: i32,
    tiles: Vec<Tile>,
    cells: Vec<usize>,
    goal: GridPos,
}

impl MazeState {
    /// Creates a grid of the given dimensions with every cell a wall.
    ///
    /// Tile identifiers are assigned row-major as `y * columns + x`.
    #[must_use]
    pub fn new(columns: i32, rows: i32) -> Self {
        let capacity = (columns.max(0) as usize) * (rows.max(0) as usize);
        let tiles: Vec<Tile> = (0..capacity)
            .map(|slot| Tile::new(TileId::new(slot as u32), TileKind::Wall))
            .collect();
        let cells: Vec<usize> = (0..capacity).collect();
        Self {
            columns,
            rows,
            tiles,
            cells,
            goal: GridPos::new(-1, -1),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Cell holding the goal tile, cached on assignment.
    #[must_use]
    pub const fn goal(&self) -> GridPos {
        self.goal
    }

    fn index(&self, cell: GridPos) -> Option<usize> {
        if cell.x() >= 0 && cell.x() < self.columns && cell.y() >= 0 && cell.y() < self.rows {
            Some(cell.y() as usize * self.columns as usize + cell.x() as usize)
        } else {
            None
        }
    }

    /// Returns the tile occupying the given cell, if the cell is in bounds.
    #[must_use]
    pub fn tile(&self, cell: GridPos) -> Option<&Tile> {
        self.index(cell).map(|slot| &self.tiles[self.cells[slot]])
    }

    fn tile_mut(&mut self, cell: GridPos) -> Option<&mut Tile> {
        self.index(cell)
            .map(|slot| &mut self.tiles[self.cells[slot]])
    }

    /// Sets the type of the tile at the given cell; out of bounds is a no-op.
    ///
    /// Assigning [`TileKind::Goal`] refreshes the cached goal position.
    pub fn set_kind(&mut self, cell: GridPos, kind: TileKind) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.kind = kind;
            if kind == TileKind::Goal {
                self.goal = cell;
            }
        }
    }

    pub(crate) fn set_flavor_image(&mut self, cell: GridPos, path: String) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.flavor_image = Some(path);
        }
    }

    /// Reports whether the cell holds a wall; out of bounds counts as wall.
    #[must_use]
    pub fn is_wall(&self, cell: GridPos) -> bool {
        self.tile(cell)
            .map_or(true, |tile| tile.kind == TileKind::Wall)
    }

    /// Reports whether the cell holds the goal; out of bounds never does.
    #[must_use]
    pub fn is_goal(&self, cell: GridPos) -> bool {
        self.tile(cell)
            .is_some_and(|tile| tile.kind == TileKind::Goal)
    }

    /// Reports whether an entity may stand on the cell.
    #[must_use]
    pub fn is_valid_move(&self, cell: GridPos) -> bool {
        self.tile(cell)
            .is_some_and(|tile| tile.kind != TileKind::Wall)
    }

    /// Iterates every cell with its tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Tile)> {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(slot, &index)| {
            let cell = GridPos::new((slot as i32) % columns, (slot as i32) / columns);
            (cell, &self.tiles[index])
        })
    }

    /// Marks the rotation preview for the player's row.
    ///
    /// Clears all existing highlights, then highlights every interior column
    /// of row `player.y()` except the player's own column. Display-only.
    pub fn highlight_row(&mut self, player: GridPos) {
        self.clear_highlights();
        if player.y() < 0 || player.y() >= self.rows {
            return;
        }
        for x in 1..self.columns - 1 {
            if x == player.x() {
                continue;
            }
            if let Some(tile) = self.tile_mut(GridPos::new(x, player.y())) {
                tile.highlighted = true;
            }
        }
    }

    /// Removes the preview flag from every tile.
    pub fn clear_highlights(&mut self) {
        for tile in &mut self.tiles {
            tile.highlighted = false;
        }
    }

    /// Destination column for a rotated tile, wrapping within the interior
    /// and stepping over the player's column so it is never written.
    fn wrapped_destination(
        &self,
        column: i32,
        player_column: i32,
        direction: RotationDirection,
    ) -> i32 {
        let wrap = |value: i32| -> i32 {
            if value < 1 {
                self.columns - 2
            } else if value > self.columns - 2 {
                1
            } else {
                value
            }
        };
        let mut destination = wrap(column + direction.step());
        if destination == player_column {
            destination = wrap(destination + direction.step());
        }
        destination
    }

    /// Read-only simulation of a rotation against live entity positions.
    ///
    /// Returns true when some wall tile's post-rotation destination is an
    /// occupied cell. Evaluated against the current grid: the rule depends
    /// only on source tile type and destination occupancy.
    #[must_use]
    pub fn check_rotate_collision(
        &self,
        player: GridPos,
        direction: RotationDirection,
        occupied: &[GridPos],
    ) -> bool {
        if player.y() < 0 || player.y() >= self.rows {
            return false;
        }
        for x in 1..self.columns - 1 {
            if x == player.x() {
                continue;
            }
            let source = GridPos::new(x, player.y());
            if !self.is_wall(source) {
                continue;
            }
            let destination = GridPos::new(
                self.wrapped_destination(x, player.x(), direction),
                player.y(),
            );
            if occupied.contains(&destination) {
                return true;
            }
        }
        false
    }

    /// Physically permutes the interior tiles of the player's row.
    ///
    /// Every interior column except the player's moves one wrapped step in
    /// `direction`; tile objects move with their identity and content hook.
    /// The player's column is neither source nor destination. Clears all
    /// highlights afterward.
    pub fn perform_rotate(&mut self, player: GridPos, direction: RotationDirection) {
        if player.y() < 0 || player.y() >= self.rows {
            return;
        }
        let row_base = player.y() as usize * self.columns as usize;
        let snapshot: Vec<usize> =
            self.cells[row_base..row_base + self.columns as usize].to_vec();
        for x in 1..self.columns - 1 {
            if x == player.x() {
                continue;
            }
            let destination = self.wrapped_destination(x, player.x(), direction);
            self.cells[row_base + destination as usize] = snapshot[x as usize];
        }
        if self.goal.y() == player.y() && self.goal.x() != player.x() {
            self.refresh_goal_cache(player.y());
        }
        self.clear_highlights();
    }

    fn refresh_goal_cache(&mut self, row: i32) {
        for x in 0..self.columns {
            let cell = GridPos::new(x, row);
            if self.is_goal(cell) {
                self.goal = cell;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_maze(columns: i32, rows: i32) -> MazeState {
        let mut maze = MazeState::new(columns, rows);
        for y in 1..rows - 1 {
            for x in 1..columns - 1 {
                maze.set_kind(GridPos::new(x, y), TileKind::Floor);
            }
        }
        maze
    }

    #[test]
    fn out_of_bounds_queries_degrade_to_safe_defaults() {
        let maze = open_maze(8, 8);
        let outside = GridPos::new(-1, 3);
        assert!(maze.is_wall(outside));
        assert!(!maze.is_goal(outside));
        assert!(!maze.is_valid_move(outside));
        assert!(maze.tile(outside).is_none());
    }

    #[test]
    fn set_goal_updates_cached_position() {
        let mut maze = open_maze(8, 8);
        maze.set_kind(GridPos::new(5, 6), TileKind::Goal);
        assert_eq!(maze.goal(), GridPos::new(5, 6));
        assert!(maze.is_goal(GridPos::new(5, 6)));
    }

    #[test]
    fn highlight_marks_interior_row_except_player() {
        let mut maze = open_maze(8, 8);
        let player = GridPos::new(3, 2);
        maze.highlight_row(player);
        for x in 0..8 {
            let cell = GridPos::new(x, 2);
            let expected = x >= 1 && x <= 6 && x != 3;
            assert_eq!(
                maze.tile(cell).expect("in bounds").highlighted(),
                expected,
                "column {x}"
            );
        }
        maze.highlight_row(GridPos::new(4, 5));
        assert!(!maze.tile(GridPos::new(1, 2)).expect("in bounds").highlighted());
    }

    #[test]
    fn rotation_is_a_permutation_of_interior_tiles() {
        let mut maze = open_maze(10, 10);
        let player = GridPos::new(4, 3);
        let before: Vec<TileId> = (0..10)
            .map(|x| maze.tile(GridPos::new(x, 3)).expect("in bounds").id())
            .collect();

        maze.perform_rotate(player, RotationDirection::Right);

        let after: Vec<TileId> = (0..10)
            .map(|x| maze.tile(GridPos::new(x, 3)).expect("in bounds").id())
            .collect();

        // Border columns and the player's column stay fixed.
        assert_eq!(before[0], after[0]);
        assert_eq!(before[9], after[9]);
        assert_eq!(before[4], after[4]);

        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        assert_eq!(sorted_before, sorted_after, "no tile created or destroyed");
        assert_ne!(before, after, "interior tiles actually moved");
    }

    #[test]
    fn rotation_skips_player_column_as_destination() {
        let mut maze = open_maze(8, 8);
        let player = GridPos::new(3, 4);
        // Tag the tile just left of the player; rotating right it must land
        // at column 4, stepping over the player's column 3.
        maze.set_kind(GridPos::new(2, 4), TileKind::Trap);
        maze.perform_rotate(player, RotationDirection::Right);
        assert_eq!(
            maze.tile(GridPos::new(4, 4)).expect("in bounds").kind(),
            TileKind::Trap
        );
        assert_ne!(
            maze.tile(GridPos::new(3, 4)).expect("in bounds").kind(),
            TileKind::Trap
        );
    }

    #[test]
    fn rotation_wraps_interior_columns() {
        let mut maze = open_maze(8, 8);
        let player = GridPos::new(3, 4);
        maze.set_kind(GridPos::new(6, 4), TileKind::Trap);
        maze.perform_rotate(player, RotationDirection::Right);
        assert_eq!(
            maze.tile(GridPos::new(1, 4)).expect("in bounds").kind(),
            TileKind::Trap
        );
    }

    #[test]
    fn collision_check_matches_simulated_rotation() {
        let mut maze = open_maze(10, 10);
        let player = GridPos::new(4, 5);
        maze.set_kind(GridPos::new(6, 5), TileKind::Wall);

        // Wall at column 6 rotates right to column 7.
        let blocked = vec![GridPos::new(7, 5)];
        assert!(maze.check_rotate_collision(player, RotationDirection::Right, &blocked));

        let clear = vec![GridPos::new(8, 5)];
        assert!(!maze.check_rotate_collision(player, RotationDirection::Right, &clear));

        // A floor tile landing on an occupant is not a collision.
        let on_floor_path = vec![GridPos::new(3, 5)];
        assert!(!maze.check_rotate_collision(player, RotationDirection::Right, &on_floor_path));
    }

    #[test]
    fn passed_precheck_never_leaves_wall_under_occupant() {
        let mut maze = open_maze(10, 10);
        let player = GridPos::new(2, 5);
        maze.set_kind(GridPos::new(5, 5), TileKind::Wall);
        maze.set_kind(GridPos::new(7, 5), TileKind::Wall);
        let occupied = vec![player, GridPos::new(3, 5), GridPos::new(1, 5)];

        assert!(!maze.check_rotate_collision(player, RotationDirection::Left, &occupied));
        maze.perform_rotate(player, RotationDirection::Left);
        for cell in &occupied {
            assert!(
                !maze.is_wall(*cell),
                "wall landed under occupant at {cell:?}"
            );
        }
    }

    #[test]
    fn rotation_clears_highlights() {
        let mut maze = open_maze(8, 8);
        let player = GridPos::new(3, 4);
        maze.highlight_row(player);
        maze.perform_rotate(player, RotationDirection::Left);
        assert!(maze.iter().all(|(_, tile)| !tile.highlighted()));
    }

    #[test]
    fn goal_cache_follows_rotated_goal_tile() {
        let mut maze = open_maze(10, 10);
        let player = GridPos::new(2, 5);
        maze.set_kind(GridPos::new(6, 5), TileKind::Goal);
        maze.perform_rotate(player, RotationDirection::Right);
        assert_eq!(maze.goal(), GridPos::new(7, 5));
        assert!(maze.is_goal(GridPos::new(7, 5)));
    }
}
