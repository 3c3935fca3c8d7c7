//! Previous-tick health per unit.

use std::collections::HashMap;

use crate::snapshot::{GameState, UnitId, UnitSnapshot};

/// Last-seen health keyed by unit identity.
///
/// Holds at most one entry per identity. Entries for units missing from a
/// snapshot are dropped by [`MemoryTracker::purge`], so nothing outlives its
/// unit by more than one tick.
#[derive(Debug, Clone, Default)]
pub struct MemoryTracker {
    last_health: HashMap<UnitId, u32>,
}

impl MemoryTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the unit's current health and report whether it went down.
    ///
    /// A unit seen for the first time has not lost health.
    pub fn record_and_compare(&mut self, unit: &UnitSnapshot) -> bool {
        let previous = self.last_health.insert(unit.id, unit.health);
        previous.is_some_and(|health| health > unit.health)
    }

    /// Drop entries for units absent from the complete snapshot.
    ///
    /// Returns how many entries were removed.
    pub fn purge(&mut self, state: &GameState) -> usize {
        let before = self.last_health.len();
        self.last_health.retain(|id, _| state.contains(*id));
        before - self.last_health.len()
    }

    /// Remembered health for a unit.
    #[must_use]
    pub fn last_health(&self, id: UnitId) -> Option<u32> {
        self.last_health.get(&id).copied()
    }

    /// Number of remembered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_health.len()
    }

    /// Whether nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_health.is_empty()
    }
}
