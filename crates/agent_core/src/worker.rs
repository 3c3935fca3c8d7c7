//! Worker handler.
//!
//! Workers carry no state of their own. Each tick is a fresh pick, first
//! match wins:
//! 1. Flee home when an enemy warrior is aiming at us or we just lost health
//! 2. Collect the first resource in view
//! 3. Wander to a random passable cell when idle

use crate::commands::ActionSink;
use crate::math::angle_to_point;
use crate::policy::TickContext;
use crate::snapshot::{Role, UnitSnapshot, VisibleOpponent};
use crate::speech;

/// What a worker did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerAction {
    /// Ran for the spawn point.
    Flee,
    /// Headed for a resource.
    Collect,
    /// Sent to a random cell.
    Wander,
    /// Kept following its current path.
    Busy,
}

/// First enemy warrior whose facing points at `unit` within `cone` degrees.
#[must_use]
pub fn threatening_opponent(unit: &UnitSnapshot, cone: f32) -> Option<&VisibleOpponent> {
    unit.opponents_in_view.iter().find(|opponent| {
        opponent.role == Role::Warrior
            && angle_to_point(opponent.position, opponent.facing, unit.position).abs() < cone
    })
}

/// Decide and issue this tick's commands for a worker.
pub fn handle_worker(
    ctx: &mut TickContext<'_>,
    unit: &UnitSnapshot,
    health_dropped: bool,
    sink: &mut dyn ActionSink,
) -> WorkerAction {
    let threat = threatening_opponent(unit, ctx.config.threat_cone);
    if threat.is_some() || health_dropped {
        tracing::debug!(
            unit = unit.id,
            threat = threat.map(|o| o.id),
            health_dropped,
            "Worker fleeing"
        );
        if health_dropped {
            sink.say(unit.id, &speech::damage_callout(unit.health));
        }
        sink.say(unit.id, speech::pick(ctx.rng, speech::FLEE_LINES));
        let home = ctx.env.spawn_point;
        sink.navigate_to(unit.id, home.x, home.y, true);
        return WorkerAction::Flee;
    }

    if let Some(resource) = unit.resources_in_view.first() {
        let target = resource.position;
        tracing::debug!(
            unit = unit.id,
            x = target.x,
            y = target.y,
            "Worker collecting"
        );
        sink.navigate_to(unit.id, target.x, target.y, false);
        return WorkerAction::Collect;
    }

    if !unit.is_navigating() {
        wander(ctx, unit, sink);
        return WorkerAction::Wander;
    }

    WorkerAction::Busy
}

/// Send a unit to a random passable cell, or home if none turns up.
pub fn wander(ctx: &mut TickContext<'_>, unit: &UnitSnapshot, sink: &mut dyn ActionSink) {
    let attempts = ctx.config.max_search_attempts;
    match ctx.env.obstacles.random_passable_cell(ctx.rng, attempts) {
        Some((x, y)) => {
            tracing::debug!(unit = unit.id, x, y, "Wandering");
            sink.navigate_to(unit.id, x as f32, y as f32, false);
        }
        None => {
            tracing::warn!(
                unit = unit.id,
                attempts,
                "No passable cell found, returning to spawn"
            );
            let home = ctx.env.spawn_point;
            sink.navigate_to(unit.id, home.x, home.y, false);
        }
    }
}
