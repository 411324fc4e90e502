#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Maze Race adapters.
//!
//! Adapters compose a [`Scene`] from world queries and hand it to whatever
//! surface they drive; this crate owns the visual vocabulary and the phase
//! prompt strings so every surface narrates the race the same way.

use glam::Vec2;
use maze_race_core::{EntityColor, GridPos, Phase, TileKind, TurnOwner};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<EntityColor> for Color {
    fn from(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// One maze tile prepared for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileVisual {
    /// Grid cell the tile occupies.
    pub cell: GridPos,
    /// Walkability class of the tile.
    pub kind: TileKind,
    /// Whether the tile belongs to a highlighted rotation preview.
    pub highlighted: bool,
}

impl TileVisual {
    /// Glyph used when the tile is drawn on a character surface.
    #[must_use]
    pub fn glyph(&self) -> char {
        if self.highlighted {
            return '*';
        }
        match self.kind {
            TileKind::Wall => '#',
            TileKind::Goal => 'G',
            TileKind::Floor | TileKind::SpecialTrigger | TileKind::Trap => '.',
        }
    }
}

/// One racer prepared for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityVisual {
    /// Logical cell the entity occupies.
    pub cell: GridPos,
    /// Continuous render-space position, trailing the cell mid-move.
    pub position: Vec2,
    /// Fill color of the entity.
    pub color: Color,
    /// Glyph used on character surfaces.
    pub glyph: char,
}

/// Status banner summarizing whose turn it is and what input is expected.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StatusLine {
    /// Label of the side holding the turn.
    pub owner: &'static str,
    /// Prompt describing the inputs currently accepted.
    pub prompt: &'static str,
    /// Transient announcement, when one is active.
    pub message: Option<String>,
}

/// Scene description combining the maze grid, racers and status text.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Scene {
    /// Number of grid columns.
    pub columns: i32,
    /// Number of grid rows.
    pub rows: i32,
    /// Every tile of the grid in row-major order.
    pub tiles: Vec<TileVisual>,
    /// Racers layered on top of the grid, player last.
    pub entities: Vec<EntityVisual>,
    /// Status banner below the grid.
    pub status: StatusLine,
    /// Open action menu lines, empty while the menu is closed.
    pub menu: Vec<String>,
}

impl Scene {
    /// Renders the grid onto a character canvas, entities over tiles.
    #[must_use]
    pub fn ascii_map(&self) -> String {
        let columns = self.columns.max(0) as usize;
        let rows = self.rows.max(0) as usize;
        let mut canvas = vec![vec![' '; columns]; rows];
        for tile in &self.tiles {
            if let Some(slot) = cell_slot(&mut canvas, tile.cell) {
                *slot = tile.glyph();
            }
        }
        for entity in &self.entities {
            if let Some(slot) = cell_slot(&mut canvas, entity.cell) {
                *slot = entity.glyph;
            }
        }
        let mut out = String::with_capacity(rows * (columns + 1));
        for row in canvas {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

fn cell_slot(canvas: &mut [Vec<char>], cell: GridPos) -> Option<&mut char> {
    let row = usize::try_from(cell.y()).ok()?;
    let column = usize::try_from(cell.x()).ok()?;
    canvas.get_mut(row)?.get_mut(column)
}

/// Announcement that stays on screen for a fixed number of ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMessage {
    text: String,
    remaining_ticks: u32,
}

impl ActionMessage {
    /// Creates an announcement visible for `ticks` update cycles.
    #[must_use]
    pub fn new(text: impl Into<String>, ticks: u32) -> Self {
        Self {
            text: text.into(),
            remaining_ticks: ticks,
        }
    }

    /// Counts the announcement down by one tick.
    pub fn tick(&mut self) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
    }

    /// The announcement text while it is still visible.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        (self.remaining_ticks > 0).then_some(self.text.as_str())
    }
}

/// Formats one numbered entry of the action selection menu.
#[must_use]
pub fn menu_line(number: usize, name: &str, description: &str) -> String {
    format!("{number}: {name} - {description}")
}

/// Input prompt matching the coordinator's current phase.
#[must_use]
pub fn phase_prompt(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingMove => "Arrow Keys: Move",
        Phase::AwaitingTrivia => "Answer the trivia question",
        Phase::AwaitingAction => "A: Show Actions, Space: End Turn",
        Phase::SelectingAction => "Enter 1-9 to select action",
        Phase::ConfirmingRotation { .. } => "Enter: Confirm, C: Cancel",
        Phase::AwaitingEndTurn => "Space: End Turn",
        Phase::NpcTurn => "NPCs are moving...",
        Phase::GameOver { .. } => "R: Restart",
    }
}

/// Display label of the side holding the turn.
#[must_use]
pub fn owner_label(owner: TurnOwner) -> &'static str {
    match owner {
        TurnOwner::Player => "Player's Turn",
        TurnOwner::Npcs => "NPC's Turn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_overrides_the_tile_glyph() {
        let tile = TileVisual {
            cell: GridPos::new(0, 0),
            kind: TileKind::Wall,
            highlighted: true,
        };
        assert_eq!(tile.glyph(), '*');
    }

    #[test]
    fn ascii_map_layers_entities_over_tiles() {
        let scene = Scene {
            columns: 3,
            rows: 1,
            tiles: vec![
                TileVisual {
                    cell: GridPos::new(0, 0),
                    kind: TileKind::Wall,
                    highlighted: false,
                },
                TileVisual {
                    cell: GridPos::new(1, 0),
                    kind: TileKind::Floor,
                    highlighted: false,
                },
                TileVisual {
                    cell: GridPos::new(2, 0),
                    kind: TileKind::Goal,
                    highlighted: false,
                },
            ],
            entities: vec![EntityVisual {
                cell: GridPos::new(1, 0),
                position: Vec2::ZERO,
                color: Color::from_rgb_u8(0, 0, 255),
                glyph: 'P',
            }],
            status: StatusLine::default(),
            menu: Vec::new(),
        };
        assert_eq!(scene.ascii_map(), "#PG\n");
    }

    #[test]
    fn ascii_map_ignores_out_of_bounds_cells() {
        let scene = Scene {
            columns: 1,
            rows: 1,
            tiles: vec![TileVisual {
                cell: GridPos::new(5, -2),
                kind: TileKind::Floor,
                highlighted: false,
            }],
            entities: Vec::new(),
            status: StatusLine::default(),
            menu: Vec::new(),
        };
        assert_eq!(scene.ascii_map(), " \n");
    }

    #[test]
    fn action_message_expires_after_its_ticks() {
        let mut message = ActionMessage::new("Rotated row 4", 2);
        assert_eq!(message.text(), Some("Rotated row 4"));
        message.tick();
        assert_eq!(message.text(), Some("Rotated row 4"));
        message.tick();
        assert_eq!(message.text(), None);
        message.tick();
        assert_eq!(message.text(), None);
    }

    #[test]
    fn every_phase_has_a_prompt() {
        assert_eq!(phase_prompt(Phase::AwaitingMove), "Arrow Keys: Move");
        assert_eq!(phase_prompt(Phase::NpcTurn), "NPCs are moving...");
        assert_eq!(owner_label(TurnOwner::Player), "Player's Turn");
        assert_eq!(owner_label(TurnOwner::Npcs), "NPC's Turn");
    }
}
