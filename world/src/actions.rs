//! Catalog of selectable per-turn actions and their cooldown countdowns.

use maze_race_core::ActionKind;

/// Ticks an action stays unavailable after use.
pub const ROTATE_COOLDOWN_TICKS: u32 = 120;

/// Immutable description of one catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    kind: ActionKind,
    name: &'static str,
    description: &'static str,
    cooldown: u32,
}

impl ActionSpec {
    /// The action this entry commits.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Short display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description for the selection menu.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Full cooldown duration in ticks.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }
}

const CATALOG: [ActionSpec; 2] = [
    ActionSpec {
        kind: ActionKind::RotateRowLeft,
        name: "Rotate Row Left",
        description: "Rotate the current row to the left",
        cooldown: ROTATE_COOLDOWN_TICKS,
    },
    ActionSpec {
        kind: ActionKind::RotateRowRight,
        name: "Rotate Row Right",
        description: "Rotate the current row to the right",
        cooldown: ROTATE_COOLDOWN_TICKS,
    },
];

/// Fixed action catalog with one independent countdown per entry.
#[derive(Clone, Debug)]
pub struct ActionBook {
    entries: Vec<(ActionSpec, u32)>,
}

impl ActionBook {
    /// Creates the default catalog with every cooldown expired.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: CATALOG.iter().map(|spec| (*spec, 0)).collect(),
        }
    }

    /// Decrements every nonzero countdown by one. Runs once per tick
    /// regardless of turn owner or phase.
    pub fn update_cooldowns(&mut self) {
        for (_, remaining) in &mut self.entries {
            *remaining = remaining.saturating_sub(1);
        }
    }

    /// Whether the action's countdown reached zero.
    #[must_use]
    pub fn is_available(&self, kind: ActionKind) -> bool {
        self.entries
            .iter()
            .any(|(spec, remaining)| spec.kind() == kind && *remaining == 0)
    }

    /// Resets the action's countdown to its full cooldown.
    pub fn use_action(&mut self, kind: ActionKind) {
        for (spec, remaining) in &mut self.entries {
            if spec.kind() == kind {
                *remaining = spec.cooldown();
                return;
            }
        }
    }

    /// Currently selectable actions in stable catalog order.
    #[must_use]
    pub fn available(&self) -> Vec<ActionSpec> {
        self.entries
            .iter()
            .filter(|(_, remaining)| *remaining == 0)
            .map(|(spec, _)| *spec)
            .collect()
    }

    /// Looks up an action by its 1-based index into the *available* list.
    ///
    /// The same numeral can name different actions as cooldowns shift; this
    /// mirrors how the selection menu numbers its entries.
    #[must_use]
    pub fn by_number(&self, number: u8) -> Option<ActionSpec> {
        if number == 0 {
            return None;
        }
        self.available().get(number as usize - 1).copied()
    }

    /// Remaining countdown for the given action.
    #[must_use]
    pub fn cooldown_remaining(&self, kind: ActionKind) -> u32 {
        self.entries
            .iter()
            .find(|(spec, _)| spec.kind() == kind)
            .map_or(0, |(_, remaining)| *remaining)
    }
}

impl Default for ActionBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_catalog_is_fully_available() {
        let book = ActionBook::new();
        assert!(book.is_available(ActionKind::RotateRowLeft));
        assert!(book.is_available(ActionKind::RotateRowRight));
        assert_eq!(book.available().len(), 2);
    }

    #[test]
    fn using_an_action_starts_its_countdown() {
        let mut book = ActionBook::new();
        book.use_action(ActionKind::RotateRowLeft);
        assert!(!book.is_available(ActionKind::RotateRowLeft));
        assert!(book.is_available(ActionKind::RotateRowRight));
        assert_eq!(
            book.cooldown_remaining(ActionKind::RotateRowLeft),
            ROTATE_COOLDOWN_TICKS
        );
    }

    #[test]
    fn action_reappears_after_full_cooldown() {
        let mut book = ActionBook::new();
        book.use_action(ActionKind::RotateRowRight);
        for _ in 0..ROTATE_COOLDOWN_TICKS - 1 {
            book.update_cooldowns();
            assert!(!book.is_available(ActionKind::RotateRowRight));
        }
        book.update_cooldowns();
        assert!(book.is_available(ActionKind::RotateRowRight));
    }

    #[test]
    fn numbering_indexes_the_available_list() {
        let mut book = ActionBook::new();
        assert_eq!(
            book.by_number(2).map(|spec| spec.kind()),
            Some(ActionKind::RotateRowRight)
        );

        // With the left rotation cooling down, numeral 1 shifts meaning.
        book.use_action(ActionKind::RotateRowLeft);
        assert_eq!(
            book.by_number(1).map(|spec| spec.kind()),
            Some(ActionKind::RotateRowRight)
        );
        assert_eq!(book.by_number(2), None);
        assert_eq!(book.by_number(0), None);
    }
}
