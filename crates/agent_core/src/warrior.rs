//! Warrior handler.
//!
//! With an opponent in view a warrior stops, turns onto its target and fires
//! once aimed and clear of friendly units. Without one it either holds a
//! corner as a guard or escorts the nearest worker.

use rand::Rng;

use crate::commands::{ActionSink, Rotation};
use crate::guard::GuardRoster;
use crate::math::{angle_to_point, Vec2};
use crate::policy::TickContext;
use crate::snapshot::{Role, UnitId, UnitSnapshot, VisibleOpponent};
use crate::speech;
use crate::targeting::TargetClaims;
use crate::worker::wander;

/// What a guard did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStep {
    /// Walking back to the home corner.
    Returning,
    /// Turning toward the watch corner.
    Turning,
    /// In position and facing out.
    Holding,
    /// Still moving, nothing to change.
    EnRoute,
}

/// What a warrior did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarriorAction {
    /// Took damage, spun away.
    Evade,
    /// Turning onto the target.
    Aim(Rotation),
    /// Fired at the target.
    Fire,
    /// Aimed but the weapon is cooling down or a friendly unit is in the way.
    HoldFire,
    /// Guard duty.
    Guard(GuardStep),
    /// Escorting a worker.
    Follow(UnitId),
    /// No worker to escort.
    Wander,
    /// No worker to escort, kept following its current path.
    Busy,
}

impl WarriorAction {
    /// Whether the warrior is engaging an opponent.
    #[must_use]
    pub const fn is_engaging(self) -> bool {
        matches!(
            self,
            Self::Evade | Self::Aim(_) | Self::Fire | Self::HoldFire
        )
    }
}

/// Decide and issue this tick's commands for a warrior.
pub fn handle_warrior(
    ctx: &mut TickContext<'_>,
    unit: &UnitSnapshot,
    health_dropped: bool,
    claims: &mut TargetClaims,
    guards: &mut GuardRoster,
    sink: &mut dyn ActionSink,
) -> WarriorAction {
    match claims.resolve(unit) {
        Some(target) => engage(ctx, unit, target, health_dropped, sink),
        None => patrol(ctx, unit, guards, sink),
    }
}

fn engage(
    ctx: &mut TickContext<'_>,
    unit: &UnitSnapshot,
    target: &VisibleOpponent,
    health_dropped: bool,
    sink: &mut dyn ActionSink,
) -> WarriorAction {
    sink.stop_navigation(unit.id);

    if health_dropped {
        tracing::debug!(unit = unit.id, health = unit.health, "Warrior hit, evading");
        sink.say(unit.id, &speech::damage_callout(unit.health));
        sink.set_rotation(unit.id, Rotation::Right);
        return WarriorAction::Evade;
    }

    let config = ctx.config;
    let aim = angle_to_point(unit.position, unit.facing, target.position);
    let looking = angle_to_point(target.position, target.facing, unit.position);
    let exposed = looking.abs() <= config.exposed_cone;

    let rotation = if aim < -config.aim_tolerance {
        Some(if exposed {
            Rotation::SlowRight
        } else {
            Rotation::Right
        })
    } else if aim > config.aim_tolerance {
        Some(if exposed {
            Rotation::SlowLeft
        } else {
            Rotation::Left
        })
    } else {
        None
    };

    if let Some(rotation) = rotation {
        tracing::debug!(unit = unit.id, target = target.id, aim, looking, ?rotation, "Aiming");
        sink.set_rotation(unit.id, rotation);
        return WarriorAction::Aim(rotation);
    }

    if unit.rotation != Rotation::None {
        sink.set_rotation(unit.id, Rotation::None);
    }

    if unit.weapon_ready && line_of_fire_clear(ctx, unit) {
        tracing::debug!(unit = unit.id, target = target.id, aim, "Firing");
        sink.say(unit.id, speech::pick(ctx.rng, speech::SHOOT_LINES));
        sink.shoot(unit.id);
        WarriorAction::Fire
    } else {
        WarriorAction::HoldFire
    }
}

/// Every other own unit sits outside the friendly-fire cone.
fn line_of_fire_clear(ctx: &TickContext<'_>, unit: &UnitSnapshot) -> bool {
    let cone = ctx.config.friendly_fire_cone;
    ctx.state
        .units
        .iter()
        .filter(|other| other.id != unit.id)
        .all(|other| angle_to_point(unit.position, unit.facing, other.position).abs() > cone)
}

fn patrol(
    ctx: &mut TickContext<'_>,
    unit: &UnitSnapshot,
    guards: &mut GuardRoster,
    sink: &mut dyn ActionSink,
) -> WarriorAction {
    if guards.try_assign(unit.id) {
        return WarriorAction::Guard(stand_guard(ctx, unit, sink));
    }

    match nearest_worker(ctx, unit) {
        Some(worker) => {
            let post = escort_post(ctx, worker.position);
            tracing::debug!(
                unit = unit.id,
                worker = worker.id,
                x = post.x,
                y = post.y,
                "Escorting worker"
            );
            sink.navigate_to(unit.id, post.x, post.y, false);
            WarriorAction::Follow(worker.id)
        }
        None if unit.is_navigating() => WarriorAction::Busy,
        None => {
            wander(ctx, unit, sink);
            WarriorAction::Wander
        }
    }
}

fn stand_guard(
    ctx: &mut TickContext<'_>,
    unit: &UnitSnapshot,
    sink: &mut dyn ActionSink,
) -> GuardStep {
    let env = ctx.env;
    let config = ctx.config;

    let distance = unit.position.distance(env.home_corner());
    if distance > config.guard_post_distance && unit.is_stationary() {
        let inset = ctx.rng.gen_range(0..=config.guard_post_jitter);
        let (x, y) = env.home_corner_inset(inset);
        tracing::debug!(unit = unit.id, x, y, distance, "Guard returning to post");
        sink.navigate_to(unit.id, x as f32, y as f32, false);
        return GuardStep::Returning;
    }

    let watch = angle_to_point(unit.position, unit.facing, env.watch_corner());
    if watch.abs() > config.guard_facing_tolerance {
        if !unit.is_stationary() {
            return GuardStep::EnRoute;
        }
        let rotation = if watch > 0.0 {
            Rotation::Left
        } else {
            Rotation::Right
        };
        sink.set_rotation(unit.id, rotation);
        return GuardStep::Turning;
    }

    sink.stop_navigation(unit.id);
    sink.set_rotation(unit.id, Rotation::None);
    GuardStep::Holding
}

/// Closest own worker by straight-line distance.
fn nearest_worker<'a>(ctx: &TickContext<'a>, unit: &UnitSnapshot) -> Option<&'a UnitSnapshot> {
    ctx.state
        .units
        .iter()
        .filter(|other| other.role == Role::Worker && other.id != unit.id)
        .min_by(|a, b| {
            let dist_a = a.position.distance_squared(unit.position);
            let dist_b = b.position.distance_squared(unit.position);
            dist_a.total_cmp(&dist_b)
        })
}

/// Escort position beside a worker, or the spawn point if it is unusable.
fn escort_post(ctx: &TickContext<'_>, worker: Vec2) -> Vec2 {
    let offset = ctx.config.follow_offset;
    let env = ctx.env;
    let shift = |value: f32, limit: u32| {
        if value + offset > limit.saturating_sub(1) as f32 {
            value - offset
        } else {
            value + offset
        }
    };
    let post = Vec2::new(shift(worker.x, env.width()), shift(worker.y, env.height()));
    if env.obstacles.is_passable_at(post) {
        post
    } else {
        env.spawn_point
    }
}
