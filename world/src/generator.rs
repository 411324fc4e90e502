//! Seeded maze generation: recursive-backtracker carving, loop injection,
//! goal placement, and constructive reachability repair.
//!
//! Every random draw routes through one `ChaCha8Rng` seeded from the
//! configuration, so a fixed seed always reproduces the same maze.

use maze_race_core::{GridPos, MazeConfig, TileKind, ALL_DIRECTIONS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::maze::MazeState;

/// Smallest requested dimension the carve stride and goal-quadrant math
/// stay meaningful for (pre-doubling).
const MIN_REQUESTED_SIZE: u32 = 3;

/// Cells forced to floor after generation so the player and both NPCs
/// always start on walkable ground.
pub(crate) const RESERVED_STARTS: [GridPos; 3] =
    [GridPos::new(1, 1), GridPos::new(3, 3), GridPos::new(5, 5)];

impl MazeState {
    /// Generates a maze from the configuration, deterministically per seed.
    ///
    /// The requested dimensions are doubled before carving.
    #[must_use]
    pub fn generate(config: &MazeConfig) -> Self {
        let columns = (config.width.max(MIN_REQUESTED_SIZE) * 2) as i32;
        let rows = (config.height.max(MIN_REQUESTED_SIZE) * 2) as i32;
        let mut maze = MazeState::new(columns, rows);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        carve_pathways(&mut maze, GridPos::new(1, 1), &mut rng);
        inject_loops(&mut maze, &mut rng);

        let goal = choose_goal(&maze, &mut rng);
        maze.set_kind(goal, TileKind::Goal);
        ensure_path_to_goal(&mut maze, GridPos::new(1, 1), goal, &mut rng);

        for start in RESERVED_STARTS {
            maze.set_kind(start, TileKind::Floor);
        }

        assign_flavor_images(&mut maze);
        maze
    }
}

/// Recursive-backtracker carve over the stride-2 lattice reachable from
/// `start`, producing a spanning, loop-free corridor network.
fn carve_pathways(maze: &mut MazeState, start: GridPos, rng: &mut ChaCha8Rng) {
    let columns = maze.columns();
    let rows = maze.rows();
    let mut visited = vec![false; (columns * rows) as usize];
    let mut mark_visited = |visited: &mut Vec<bool>, cell: GridPos| {
        visited[(cell.y() * columns + cell.x()) as usize] = true;
    };

    let mut stack = vec![start];
    maze.set_kind(start, TileKind::Floor);
    mark_visited(&mut visited, start);

    while let Some(&current) = stack.last() {
        let candidates: Vec<_> = ALL_DIRECTIONS
            .iter()
            .filter(|direction| {
                let next = current.offset_by(**direction).offset_by(**direction);
                next.x() >= 1
                    && next.x() < columns - 1
                    && next.y() >= 1
                    && next.y() < rows - 1
                    && !visited[(next.y() * columns + next.x()) as usize]
            })
            .copied()
            .collect();

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let direction = candidates[rng.gen_range(0..candidates.len())];
        let between = current.offset_by(direction);
        let next = between.offset_by(direction);
        maze.set_kind(between, TileKind::Floor);
        maze.set_kind(next, TileKind::Floor);
        mark_visited(&mut visited, next);
        stack.push(next);
    }
}

/// Attempts `(columns + rows) / 3` interior wall removals, converting a wall
/// only when at least two orthogonal neighbors are already floor. This
/// deliberately creates cycles without punching disconnected holes.
fn inject_loops(maze: &mut MazeState, rng: &mut ChaCha8Rng) {
    let columns = maze.columns();
    let rows = maze.rows();
    let attempts = (columns + rows) / 3;

    for _ in 0..attempts {
        let candidate = loop {
            let cell = GridPos::new(rng.gen_range(1..columns - 1), rng.gen_range(1..rows - 1));
            if maze.is_wall(cell) {
                break cell;
            }
        };

        let floor_neighbors = ALL_DIRECTIONS
            .iter()
            .filter(|direction| {
                maze.tile(candidate.offset_by(**direction))
                    .is_some_and(|tile| tile.kind() == TileKind::Floor)
            })
            .count();

        if floor_neighbors >= 2 {
            maze.set_kind(candidate, TileKind::Floor);
        }
    }
}

/// Rejection-samples a goal cell in the bottom-right quadrant, re-rolling
/// until the Manhattan distance from (1,1) reaches `(columns + rows) / 3`.
fn choose_goal(maze: &MazeState, rng: &mut ChaCha8Rng) -> GridPos {
    let columns = maze.columns();
    let rows = maze.rows();
    let start = GridPos::new(1, 1);
    loop {
        let goal = GridPos::new(
            columns - 2 - rng.gen_range(0..columns / 4),
            rows - 2 - rng.gen_range(0..rows / 4),
        );
        if start.manhattan_distance(goal) as i32 >= (columns + rows) / 3 {
            return goal;
        }
    }
}

/// Verifies goal reachability with a breadth-first search and, when the
/// carve left the goal cut off, greedily carves a randomized stairstep path
/// toward it. The carve already spans the interior, so this fires rarely.
fn ensure_path_to_goal(maze: &mut MazeState, start: GridPos, goal: GridPos, rng: &mut ChaCha8Rng) {
    if has_path(maze, start, goal) {
        return;
    }

    let mut current = start;
    while current != goal {
        let move_x = rng.gen_bool(0.5);
        if move_x && current.x() != goal.x() {
            let dx = if current.x() > goal.x() { -1 } else { 1 };
            current = GridPos::new(current.x() + dx, current.y());
        } else if current.y() != goal.y() {
            let dy = if current.y() > goal.y() { -1 } else { 1 };
            current = GridPos::new(current.x(), current.y() + dy);
        } else {
            continue;
        }
        if !maze.is_goal(current) {
            maze.set_kind(current, TileKind::Floor);
        }
    }
}

/// Breadth-first search over non-wall tiles.
pub(crate) fn has_path(maze: &MazeState, start: GridPos, goal: GridPos) -> bool {
    let columns = maze.columns();
    let rows = maze.rows();
    let mut visited = vec![false; (columns * rows) as usize];
    let mut queue = std::collections::VecDeque::from([start]);
    visited[(start.y() * columns + start.x()) as usize] = true;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return true;
        }
        for direction in ALL_DIRECTIONS {
            let next = current.offset_by(direction);
            if next.x() < 0 || next.x() >= columns || next.y() < 0 || next.y() >= rows {
                continue;
            }
            let slot = (next.y() * columns + next.x()) as usize;
            if visited[slot] || maze.is_wall(next) {
                continue;
            }
            visited[slot] = true;
            queue.push_back(next);
        }
    }
    false
}

/// Assigns the content hook for non-wall tiles by identifier parity.
fn assign_flavor_images(maze: &mut MazeState) {
    let assignments: Vec<(GridPos, String)> = maze
        .iter()
        .filter(|(_, tile)| tile.kind() != TileKind::Wall)
        .map(|(cell, tile)| {
            let path = if tile.id().get() % 2 == 0 {
                "assets/hallway/1.jpg"
            } else {
                "assets/hallway/2.jpg"
            };
            (cell, path.to_owned())
        })
        .collect();
    for (cell, path) in assignments {
        maze.set_flavor_image(cell, path);
    }
}
