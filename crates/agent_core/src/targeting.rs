//! Per-tick target claims.
//!
//! Warriors resolve their targets one after another within a tick. Once an
//! opponent has been picked by one warrior, later warriors that can also see
//! it pick it too, so a squad concentrates fire instead of spreading across
//! whatever happens to be first in each unit's sensor list. This biases
//! toward reinforcement; it does not limit attackers per target.

use std::collections::HashSet;

use crate::snapshot::{UnitId, UnitSnapshot, VisibleOpponent};

/// Opponents already chosen by a friendly warrior this tick.
#[derive(Debug, Clone, Default)]
pub struct TargetClaims {
    claimed: HashSet<UnitId>,
}

impl TargetClaims {
    /// Start a fresh tick with no claims.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a target for `unit` and claim it.
    ///
    /// Prefers the first visible opponent some other warrior already claimed,
    /// falling back to the first opponent in sensor order. Returns `None` when
    /// nothing is visible.
    pub fn resolve<'a>(&mut self, unit: &'a UnitSnapshot) -> Option<&'a VisibleOpponent> {
        let candidates = &unit.opponents_in_view;
        let chosen = candidates
            .iter()
            .find(|opponent| self.claimed.contains(&opponent.id))
            .or_else(|| candidates.first())?;
        self.claimed.insert(chosen.id);
        Some(chosen)
    }

    /// Whether an opponent is claimed.
    #[must_use]
    pub fn is_claimed(&self, id: UnitId) -> bool {
        self.claimed.contains(&id)
    }

    /// Number of distinct claimed opponents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Whether nothing has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
