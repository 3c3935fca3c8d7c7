//! End-to-end behavior of the tick policy.
//!
//! Each test drives `TickPolicy::tick` with hand-built snapshots and checks
//! the commands that come out of the sink.

use agent_core::prelude::*;
use agent_core::targeting::TargetClaims;
use agent_test_utils::fixtures::{
    commands_for, enemy_warrior, open_environment, resource, spawns, state, warrior, worker,
    UnitExt,
};

fn policy() -> TickPolicy {
    TickPolicy::with_defaults(open_environment(64)).unwrap()
}

fn run(policy: &mut TickPolicy, snapshot: &GameState) -> Vec<Command> {
    let mut sink = CommandBuffer::new();
    policy.tick(snapshot, &mut sink);
    sink.drain()
}

#[test]
fn memory_keeps_one_entry_per_unit_and_forgets_the_dead() {
    let mut policy = policy();
    let alive = vec![worker(1, 20.0, 20.0).navigating_to(21.0, 21.0)];

    for tick in 0..5 {
        run(&mut policy, &state(tick, 0, alive.clone()));
        assert_eq!(policy.memory().len(), 1);
        assert_eq!(policy.memory().last_health(1), Some(100));
    }

    run(&mut policy, &state(5, 0, Vec::new()));
    assert_eq!(policy.memory().last_health(1), None);
    assert!(policy.memory().is_empty());
}

#[test]
fn health_drop_is_reported_once() {
    let mut memory = MemoryTracker::new();
    let unit = warrior(7, 10.0, 10.0);

    assert!(!memory.record_and_compare(&unit.clone().with_health(80)));
    assert!(memory.record_and_compare(&unit.clone().with_health(60)));
    assert!(!memory.record_and_compare(&unit.with_health(60)));
}

#[test]
fn damaged_worker_flees_only_on_the_tick_it_was_hit() {
    let mut policy = policy();
    let busy = worker(1, 30.0, 30.0).navigating_to(31.0, 31.0);

    let healthy = state(0, 0, vec![busy.clone().with_health(80)]);
    let first = run(&mut policy, &healthy);
    assert!(commands_for(&first, 1).is_empty());

    let wounded = state(1, 0, vec![busy.clone().with_health(60)]);
    let hit = run(&mut policy, &wounded);
    assert!(hit.contains(&Command::NavigateTo {
        unit: 1,
        x: 4.0,
        y: 4.0,
        flee: true
    }));
    assert!(hit.contains(&Command::Say {
        unit: 1,
        text: "Health is 60".to_string()
    }));

    let after = run(&mut policy, &state(2, 0, vec![busy.with_health(60)]));
    assert!(commands_for(&after, 1).is_empty());
}

#[test]
fn flee_overrides_collect() {
    let mut policy = policy();
    // Enemy warrior to the east, facing west at the worker
    let threatened = worker(1, 20.0, 20.0)
        .seeing_resource(resource(22.0, 20.0))
        .seeing(enemy_warrior(90, 30.0, 20.0, 180.0));

    let commands = run(&mut policy, &state(0, 0, vec![threatened]));
    let navigations: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c, Command::NavigateTo { .. }))
        .collect();

    assert_eq!(
        navigations,
        vec![&Command::NavigateTo {
            unit: 1,
            x: 4.0,
            y: 4.0,
            flee: true
        }]
    );
}

#[test]
fn worker_ignores_enemy_warrior_looking_elsewhere() {
    let mut policy = policy();
    let calm = worker(1, 20.0, 20.0)
        .seeing_resource(resource(22.0, 20.0))
        .seeing(enemy_warrior(90, 30.0, 20.0, 90.0));

    let commands = run(&mut policy, &state(0, 0, vec![calm]));
    assert_eq!(
        commands,
        vec![Command::NavigateTo {
            unit: 1,
            x: 22.0,
            y: 20.0,
            flee: false
        }]
    );
}

#[test]
fn second_warrior_reinforces_the_claimed_target() {
    let a = enemy_warrior(100, 30.0, 20.0, 90.0);
    let b = enemy_warrior(200, 10.0, 40.0, 0.0);

    let first = warrior(1, 10.0, 0.0).seeing(a.clone()).seeing(b.clone());
    let second = warrior(2, 10.0, 20.0).seeing(b).seeing(a);

    let mut claims = TargetClaims::new();
    assert_eq!(claims.resolve(&first).map(|o| o.id), Some(100));
    assert_eq!(claims.resolve(&second).map(|o| o.id), Some(100));

    // Through the policy: the second warrior is already lined up on A and
    // fires instead of turning toward B, which it sees first.
    let mut policy = policy();
    let commands = run(&mut policy, &state(0, 0, vec![first, second]));
    assert!(commands.contains(&Command::Shoot { unit: 2 }));
    assert!(!commands_for(&commands, 2)
        .iter()
        .any(|c| matches!(c, Command::SetRotation { .. })));
}

#[test]
fn aim_converges_then_fires() {
    let mut policy = policy();
    let me = warrior(1, 10.0, 10.0);
    let bearing = 40f32.to_radians();
    // Target 20 cells away at +40°, facing directly away from us
    let target = enemy_warrior(
        50,
        10.0 + 20.0 * bearing.cos(),
        10.0 + 20.0 * bearing.sin(),
        40.0,
    );

    let mut facing = 0.0f32;
    let mut last_aim = f32::MAX;
    let mut fired = false;

    for tick in 0..20 {
        let unit = me.clone().turned(facing).seeing(target.clone());
        let aim = agent_core::math::angle_to_point(unit.position, unit.facing, target.position);
        assert!(aim.abs() < last_aim, "aim {aim} worse than {last_aim}");
        last_aim = aim.abs();

        let commands = run(&mut policy, &state(tick, 0, vec![unit]));
        if commands.contains(&Command::Shoot { unit: 1 }) {
            assert!(aim.abs() <= 5.0);
            fired = true;
            break;
        }

        for command in &commands {
            if let Command::SetRotation { rotation, .. } = command {
                facing += match rotation {
                    Rotation::Left => 10.0,
                    Rotation::SlowLeft => 2.0,
                    Rotation::Right => -10.0,
                    Rotation::SlowRight => -2.0,
                    Rotation::None => 0.0,
                };
            }
        }
    }

    assert!(fired, "warrior never fired");
}

#[test]
fn reloading_warrior_waits_for_its_weapon() {
    let mut policy = policy();
    let target = enemy_warrior(50, 20.0, 10.0, 180.0);
    let reloading = warrior(1, 10.0, 10.0)
        .weapon_ready(false)
        .seeing(target.clone());

    let commands = run(&mut policy, &state(0, 0, vec![reloading.clone()]));
    assert!(!commands.contains(&Command::Shoot { unit: 1 }));

    let loaded = reloading.weapon_ready(true);
    let commands = run(&mut policy, &state(1, 0, vec![loaded]));
    assert!(commands.contains(&Command::Shoot { unit: 1 }));
}

#[test]
fn guards_are_capped_and_kept_until_death() {
    let mut policy = policy();
    let squad = vec![
        warrior(1, 30.0, 30.0),
        warrior(2, 31.0, 30.0),
        warrior(3, 32.0, 30.0),
        worker(4, 40.0, 40.0).navigating_to(41.0, 41.0),
    ];

    run(&mut policy, &state(0, 0, squad.clone()));
    assert_eq!(policy.guards().guards(), &[1, 2]);

    run(&mut policy, &state(1, 0, squad.clone()));
    assert_eq!(policy.guards().guards(), &[1, 2]);

    // Guard 1 dies, warrior 3 takes the free slot
    let survivors: Vec<_> = squad.into_iter().filter(|u| u.id != 1).collect();
    run(&mut policy, &state(2, 0, survivors));
    assert_eq!(policy.guards().guards(), &[2, 3]);
}

#[test]
fn third_warrior_escorts_nearest_worker() {
    let mut policy = policy();
    let snapshot = state(
        0,
        0,
        vec![
            warrior(1, 30.0, 30.0),
            warrior(2, 31.0, 30.0),
            warrior(3, 10.0, 10.0),
            worker(4, 50.0, 50.0).navigating_to(51.0, 51.0),
            worker(5, 12.0, 12.0).navigating_to(13.0, 13.0),
        ],
    );
    let commands = run(&mut policy, &snapshot);
    assert_eq!(
        commands_for(&commands, 3),
        vec![Command::NavigateTo {
            unit: 3,
            x: 15.0,
            y: 15.0,
            flee: false
        }]
    );
}

#[test]
fn warrior_with_nothing_to_do_keeps_its_wander_path() {
    let mut policy = policy();
    let squad = vec![
        warrior(1, 30.0, 30.0),
        warrior(2, 31.0, 30.0),
        warrior(3, 10.0, 10.0).navigating_to(40.0, 40.0),
    ];

    for tick in 0..2 {
        let commands = run(&mut policy, &state(tick, 0, squad.clone()));
        let issued = commands_for(&commands, 3);
        assert!(issued.is_empty(), "tick {tick}: {issued:?}");
    }
}

#[test]
fn at_most_one_spawn_per_tick() {
    let mut policy = policy();
    let snapshot = state(
        0,
        10_000,
        vec![
            worker(1, 20.0, 20.0).navigating_to(21.0, 21.0),
            warrior(2, 20.0, 22.0),
            warrior(3, 20.0, 24.0),
        ],
    );
    let commands = run(&mut policy, &snapshot);
    assert_eq!(spawns(&commands), vec![Role::Worker]);
}
