#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Race experience.

use maze_race_core::MazeConfig;
use maze_race_world::{query, MazeState, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the race starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the maze surface required for rendering.
    #[must_use]
    pub fn maze<'world>(&self, world: &'world World) -> &'world MazeState {
        query::maze(world)
    }

    /// Configuration the current maze was generated from.
    #[must_use]
    pub fn config(&self, world: &World) -> MazeConfig {
        query::config(world)
    }
}
