//! Structural guarantees of generated mazes across seeds and sizes.

use maze_race_core::{GridPos, MazeConfig, RotationDirection, TileKind, ALL_DIRECTIONS};
use maze_race_world::MazeState;
use std::collections::VecDeque;

const START: GridPos = GridPos::new(1, 1);

fn reachable(maze: &MazeState, start: GridPos, target: GridPos) -> bool {
    let columns = maze.columns();
    let rows = maze.rows();
    let mut visited = vec![false; (columns * rows) as usize];
    visited[(start.y() * columns + start.x()) as usize] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == target {
            return true;
        }
        for direction in ALL_DIRECTIONS {
            let next = current.offset_by(direction);
            if next.x() < 0 || next.x() >= columns || next.y() < 0 || next.y() >= rows {
                continue;
            }
            let slot = (next.y() * columns + next.x()) as usize;
            if !visited[slot] && !maze.is_wall(next) {
                visited[slot] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

#[test]
fn goal_is_reachable_for_many_seeds_and_sizes() {
    for size in [5, 8, 10] {
        for seed in 0..20 {
            let maze = MazeState::generate(&MazeConfig {
                width: size,
                height: size,
                seed,
                trivia_enabled: false,
            });
            assert!(
                reachable(&maze, START, maze.goal()),
                "goal unreachable for size {size}, seed {seed}"
            );
        }
    }
}

#[test]
fn border_is_solid_wall() {
    let maze = MazeState::generate(&MazeConfig {
        seed: 13,
        ..MazeConfig::default()
    });
    let columns = maze.columns();
    let rows = maze.rows();
    for x in 0..columns {
        assert!(maze.is_wall(GridPos::new(x, 0)));
        assert!(maze.is_wall(GridPos::new(x, rows - 1)));
    }
    for y in 0..rows {
        assert!(maze.is_wall(GridPos::new(0, y)));
        assert!(maze.is_wall(GridPos::new(columns - 1, y)));
    }
}

#[test]
fn racer_start_cells_are_walkable() {
    for seed in 0..10 {
        let maze = MazeState::generate(&MazeConfig {
            seed,
            ..MazeConfig::default()
        });
        for start in [GridPos::new(1, 1), GridPos::new(3, 3), GridPos::new(5, 5)] {
            assert!(
                maze.is_valid_move(start),
                "start {start:?} blocked for seed {seed}"
            );
        }
    }
}

#[test]
fn goal_sits_deep_in_the_far_quadrant() {
    for seed in 0..10 {
        let maze = MazeState::generate(&MazeConfig {
            seed,
            ..MazeConfig::default()
        });
        let columns = maze.columns();
        let rows = maze.rows();
        let goal = maze.goal();

        assert!(goal.x() > columns - 2 - columns / 4 - 1 && goal.x() <= columns - 2);
        assert!(goal.y() > rows - 2 - rows / 4 - 1 && goal.y() <= rows - 2);
        assert!(START.manhattan_distance(goal) as i32 >= (columns + rows) / 3);
        assert_eq!(
            maze.tile(goal).map(|tile| tile.kind()),
            Some(TileKind::Goal)
        );
    }
}

#[test]
fn fixed_seed_layout_never_drifts() {
    // Regression pin: two fresh generations from one seed agree tile by tile.
    let config = MazeConfig {
        seed: 0xdead_beef,
        ..MazeConfig::default()
    };
    let first = MazeState::generate(&config);
    let second = MazeState::generate(&config);
    assert_eq!(first.goal(), second.goal());
    for ((cell_a, tile_a), (cell_b, tile_b)) in first.iter().zip(second.iter()) {
        assert_eq!(cell_a, cell_b);
        assert_eq!(tile_a.id(), tile_b.id());
        assert_eq!(tile_a.kind(), tile_b.kind());
        assert_eq!(tile_a.flavor_image(), tile_b.flavor_image());
    }
}

#[test]
fn rotations_never_disturb_the_border() {
    let mut maze = MazeState::generate(&MazeConfig {
        seed: 7,
        ..MazeConfig::default()
    });
    let columns = maze.columns();
    let rows = maze.rows();

    for row in 1..rows - 1 {
        let player = GridPos::new(1, row);
        maze.perform_rotate(player, RotationDirection::Left);
        maze.perform_rotate(player, RotationDirection::Right);
        assert!(maze.is_wall(GridPos::new(0, row)), "west border broke");
        assert!(
            maze.is_wall(GridPos::new(columns - 1, row)),
            "east border broke"
        );
    }
}

#[test]
fn rotations_preserve_goal_reachability_tracking() {
    let mut maze = MazeState::generate(&MazeConfig {
        seed: 21,
        ..MazeConfig::default()
    });
    let goal_row = maze.goal().y();
    let player = GridPos::new(1, goal_row);

    maze.perform_rotate(player, RotationDirection::Right);
    let goal = maze.goal();
    assert_eq!(
        maze.tile(goal).map(|tile| tile.kind()),
        Some(TileKind::Goal),
        "goal cache must follow the goal tile through a rotation"
    );
}
