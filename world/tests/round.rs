use std::time::Duration;

use glam::Vec2;
use slingshot_core::{Command, Event, RoundOutcome, RoundParams, RoundSpec, TargetId};
use slingshot_world::{apply, query, RoundWorld, SlingshotPhase};

fn configure(world: &mut RoundWorld, max_shots: u32, target_count: u32) {
    let params = RoundParams {
        max_shots,
        ..RoundParams::default()
    };
    let targets = (0..target_count).map(TargetId::new).collect();
    let mut events = Vec::new();
    apply(
        world,
        Command::ConfigureRound {
            spec: RoundSpec::new(params, targets),
        },
        &mut events,
    );
    assert!(
        events
            .iter()
            .any(|event| matches!(event, Event::RoundConfigured { .. })),
        "configuration should be accepted"
    );
}

fn press_drag_release(world: &mut RoundWorld, drag_to: Vec2, events: &mut Vec<Event>) {
    let zone_center = query::params(world).zone_center;
    apply(
        world,
        Command::PressPointer {
            position: zone_center,
        },
        events,
    );
    apply(world, Command::DragPointer { position: drag_to }, events);
    apply(world, Command::ReleasePointer, events);
}

fn tick(world: &mut RoundWorld, dt: Duration, events: &mut Vec<Event>) {
    apply(world, Command::Tick { dt }, events);
}

#[test]
fn exhausting_the_budget_with_targets_standing_loses_after_the_grace_period() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 2);
    let mut events = Vec::new();

    for _ in 0..3 {
        press_drag_release(&mut world, Vec2::new(-2.0, -1.0), &mut events);
        tick(&mut world, Duration::from_secs(2), &mut events);
    }
    assert!(!query::can_fire(&world));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::GraceStarted { .. })));

    events.clear();
    tick(&mut world, Duration::from_secs(3), &mut events);
    assert!(events.contains(&Event::RoundEnded {
        outcome: RoundOutcome::Lost
    }));
    assert_eq!(query::outcome(&world), RoundOutcome::Lost);
}

#[test]
fn destroying_every_target_wins_immediately_with_budget_to_spare() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 2);
    let mut events = Vec::new();

    press_drag_release(&mut world, Vec2::new(-2.0, -1.0), &mut events);

    events.clear();
    apply(
        &mut world,
        Command::DestroyTarget {
            id: TargetId::new(0),
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::DestroyTarget {
            id: TargetId::new(1),
        },
        &mut events,
    );

    assert!(events.contains(&Event::RoundEnded {
        outcome: RoundOutcome::Won
    }));
    assert_eq!(query::outcome(&world), RoundOutcome::Won);
    assert!(query::shots_remaining(&world) > 0);
}

#[test]
fn win_during_the_grace_period_preempts_the_loss_judgement() {
    let mut world = RoundWorld::new();
    configure(&mut world, 1, 1);
    let mut events = Vec::new();

    press_drag_release(&mut world, Vec2::new(-2.0, 0.0), &mut events);
    assert!(query::aim_view(&world).grace_pending);

    apply(
        &mut world,
        Command::DestroyTarget {
            id: TargetId::new(0),
        },
        &mut events,
    );
    assert_eq!(query::outcome(&world), RoundOutcome::Won);

    events.clear();
    tick(&mut world, Duration::from_secs(10), &mut events);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::RoundEnded { .. })),
        "the cancelled grace timer must not judge the round again"
    );
}

#[test]
fn raw_drag_beyond_the_limit_is_clamped_before_direction_is_computed() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    let params = *query::params(&world);
    apply(
        &mut world,
        Command::PressPointer {
            position: params.zone_center,
        },
        &mut events,
    );

    events.clear();
    apply(
        &mut world,
        Command::DragPointer {
            position: params.anchor + Vec2::new(0.0, -5.0),
        },
        &mut events,
    );

    let draw_point = events
        .iter()
        .find_map(|event| match event {
            Event::LinesMoved { draw_point } => Some(*draw_point),
            _ => None,
        })
        .expect("drag should move the draw lines");
    assert!((draw_point.distance(params.anchor) - params.max_drag_distance).abs() < 1e-5);

    let view = query::aim_view(&world);
    assert!((view.launch_direction.length() - 1.0).abs() < 1e-5);
    let toward_anchor = (params.anchor - view.clamped_drag_point).normalize();
    assert!(view.launch_direction.distance(toward_anchor) < 1e-5);
}

#[test]
fn launch_reports_direction_and_configured_force() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    let params = *query::params(&world);
    press_drag_release(&mut world, params.anchor + Vec2::new(-1.0, 0.0), &mut events);

    let (direction, force) = events
        .iter()
        .find_map(|event| match event {
            Event::ProjectileLaunched {
                direction, force, ..
            } => Some((*direction, *force)),
            _ => None,
        })
        .expect("the release should launch");
    assert!((direction - Vec2::new(1.0, 0.0)).length() < 1e-5);
    assert!((force - params.shot_force).abs() < f32::EPSILON);
    assert_eq!(query::shots_used(&world), 1);
}

#[test]
fn a_new_projectile_is_staged_after_the_respawn_delay() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    press_drag_release(&mut world, Vec2::new(-2.0, -1.0), &mut events);
    assert_eq!(query::aim_view(&world).phase, SlingshotPhase::Idle);
    assert!(query::aim_view(&world).respawn_pending);

    events.clear();
    tick(&mut world, Duration::from_secs(1), &mut events);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::ProjectileStaged { .. })),
        "respawn should wait the full delay"
    );

    tick(&mut world, Duration::from_secs(1), &mut events);
    let staged = events
        .iter()
        .find_map(|event| match event {
            Event::ProjectileStaged { id, .. } => Some(*id),
            _ => None,
        })
        .expect("respawn delay should stage a projectile");
    assert_eq!(staged.get(), 1, "the second projectile of the round");
    assert_eq!(query::aim_view(&world).phase, SlingshotPhase::Staged);
}

#[test]
fn no_respawn_is_scheduled_after_the_final_shot() {
    let mut world = RoundWorld::new();
    configure(&mut world, 1, 1);
    let mut events = Vec::new();

    press_drag_release(&mut world, Vec2::new(-2.0, -1.0), &mut events);
    assert!(!query::aim_view(&world).respawn_pending);

    events.clear();
    tick(&mut world, Duration::from_secs(2), &mut events);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::ProjectileStaged { .. })));
}

#[test]
fn destroying_an_absent_target_changes_nothing() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::DestroyTarget {
            id: TargetId::new(99),
        },
        &mut events,
    );
    assert!(events.is_empty());
    assert_eq!(query::targets_remaining(&world), vec![TargetId::new(0)]);
}

#[test]
fn dragging_without_a_press_is_ignored() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::DragPointer {
            position: Vec2::new(-2.0, 0.0),
        },
        &mut events,
    );
    apply(&mut world, Command::ReleasePointer, &mut events);

    assert!(events.is_empty());
    assert_eq!(query::shots_used(&world), 0);
    assert_eq!(query::aim_view(&world).phase, SlingshotPhase::Staged);
}

#[test]
fn press_outside_the_interaction_zone_is_ignored() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    let params = *query::params(&world);
    apply(
        &mut world,
        Command::PressPointer {
            position: params.zone_center + Vec2::new(params.zone_radius + 0.5, 0.0),
        },
        &mut events,
    );
    assert!(events.is_empty());
    assert_eq!(query::aim_view(&world).phase, SlingshotPhase::Staged);
}

#[test]
fn projectile_follows_the_clamped_drag_point_with_an_offset() {
    let mut world = RoundWorld::new();
    configure(&mut world, 3, 1);
    let mut events = Vec::new();

    let params = *query::params(&world);
    apply(
        &mut world,
        Command::PressPointer {
            position: params.zone_center,
        },
        &mut events,
    );

    events.clear();
    apply(
        &mut world,
        Command::DragPointer {
            position: params.anchor + Vec2::new(-3.0, 0.0),
        },
        &mut events,
    );

    let (position, facing) = events
        .iter()
        .find_map(|event| match event {
            Event::ProjectileMoved {
                position, facing, ..
            } => Some((*position, *facing)),
            _ => None,
        })
        .expect("the projectile should follow the drag");

    let clamped = params.anchor + Vec2::new(-3.0, 0.0);
    let expected = clamped + Vec2::new(1.0, 0.0) * params.projectile_offset;
    assert!((position - expected).length() < 1e-5);
    assert!((facing - Vec2::new(1.0, 0.0)).length() < 1e-5);
}

#[test]
fn a_pathological_elastic_divider_does_not_abort_the_release() {
    let mut world = RoundWorld::new();
    let params = RoundParams {
        elastic_divider: 1e-40,
        ..RoundParams::default()
    };
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureRound {
            spec: RoundSpec::new(params, vec![TargetId::new(0)]),
        },
        &mut events,
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::RoundConfigured { .. })));

    events.clear();
    press_drag_release(&mut world, Vec2::new(-2.0, -1.0), &mut events);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileLaunched { .. })));

    tick(&mut world, Duration::from_secs(2), &mut events);
    assert_eq!(query::aim_view(&world).phase, SlingshotPhase::Staged);
}
