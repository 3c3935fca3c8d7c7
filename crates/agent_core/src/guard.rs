//! Corner guard roster.
//!
//! A small number of warriors are assigned, first come first served, to hold
//! the home corner while watching the opposite one. An assignment is
//! permanent for the life of the unit and is released the tick the unit no
//! longer appears in the snapshot.

use crate::snapshot::{GameState, UnitId};

/// Warriors currently on guard duty, in assignment order.
#[derive(Debug, Clone)]
pub struct GuardRoster {
    guards: Vec<UnitId>,
    capacity: usize,
}

impl GuardRoster {
    /// Create an empty roster with room for `capacity` guards.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            guards: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Whether the unit is on guard duty.
    #[must_use]
    pub fn is_guard(&self, id: UnitId) -> bool {
        self.guards.contains(&id)
    }

    /// Whether another guard can be assigned.
    #[must_use]
    pub fn has_vacancy(&self) -> bool {
        self.guards.len() < self.capacity
    }

    /// Assign the unit if it is not a guard yet and a slot is free.
    ///
    /// Returns `true` when the unit is a guard after the call.
    pub fn try_assign(&mut self, id: UnitId) -> bool {
        if self.is_guard(id) {
            return true;
        }
        if !self.has_vacancy() {
            return false;
        }
        self.guards.push(id);
        tracing::info!(
            unit = id,
            guards = self.guards.len(),
            "Assigned corner guard"
        );
        true
    }

    /// Release guards whose unit is absent from the snapshot.
    ///
    /// Returns how many were released.
    pub fn release_missing(&mut self, state: &GameState) -> usize {
        let before = self.guards.len();
        self.guards.retain(|id| state.contains(*id));
        let released = before - self.guards.len();
        if released > 0 {
            tracing::debug!(
                released,
                remaining = self.guards.len(),
                "Released dead guards"
            );
        }
        released
    }

    /// Current guards.
    #[must_use]
    pub fn guards(&self) -> &[UnitId] {
        &self.guards
    }

    /// Number of current guards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether nobody is on guard.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_respects_capacity() {
        let mut roster = GuardRoster::new(2);
        assert!(roster.try_assign(1));
        assert!(roster.try_assign(2));
        assert!(!roster.try_assign(3));
        assert_eq!(roster.guards(), &[1, 2]);
    }

    #[test]
    fn test_reassigning_existing_guard_is_noop() {
        let mut roster = GuardRoster::new(2);
        roster.try_assign(1);
        assert!(roster.try_assign(1));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_release_frees_slot() {
        let mut roster = GuardRoster::new(1);
        roster.try_assign(5);
        let state = GameState::default();
        assert_eq!(roster.release_missing(&state), 1);
        assert!(roster.has_vacancy());
        assert!(roster.try_assign(6));
    }
}
