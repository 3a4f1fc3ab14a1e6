#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives scripted slingshot campaigns.
//!
//! The driver owns the round loop and the fixed dispatch order: sample
//! input, apply the resulting commands plus one clock tick, resolve impacts
//! for anything launched, then let the director react to the round's
//! judgement. Pointer input comes from a seeded autoplayer and projectile
//! flight from a toy straight-line resolver, so whole campaigns replay
//! deterministically from a seed.

mod autoplay;
mod ballistics;
mod plan;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use slingshot_core::{Command, Event, TargetId};
use slingshot_system_director::{Config, Director};
use slingshot_world::{apply, query, RoundWorld};
use tracing::{debug, info, trace};

use autoplay::Autoplay;
use plan::CampaignPlan;

/// Command-line options accepted by the slingshot driver.
#[derive(Debug, Parser)]
#[command(name = "slingshot", about = "Drives scripted slingshot rounds to completion")]
struct Args {
    /// Path to a JSON campaign plan; a plan is generated when omitted.
    #[arg(long)]
    plan: Option<PathBuf>,
    /// Number of rounds to generate when no plan file is supplied.
    #[arg(long, default_value_t = 3)]
    rounds: u32,
    /// Seed shared by the generated plan and the scripted player.
    #[arg(long, default_value_t = 24243)]
    seed: u64,
    /// Fixed tick length in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Hard cap on simulated ticks before the driver gives up.
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let plan = match &args.plan {
        Some(path) => CampaignPlan::load(path)?,
        None => CampaignPlan::generated(args.rounds, args.seed),
    };

    let run = run_campaign(
        &plan,
        args.seed,
        Duration::from_millis(args.tick_ms),
        args.max_ticks,
    );
    info!(
        ticks = run.ticks,
        events = run.events.len(),
        complete = run.complete,
        "campaign finished"
    );
    Ok(())
}

/// Result of driving one campaign to completion or the tick cap.
struct CampaignRun {
    complete: bool,
    ticks: u64,
    events: Vec<Event>,
}

fn run_campaign(plan: &CampaignPlan, seed: u64, dt: Duration, max_ticks: u64) -> CampaignRun {
    let mut world = RoundWorld::new();
    let mut director = Director::new(Config::new(plan.round_specs()));
    let mut autoplay = Autoplay::new(seed);

    let mut commands = Vec::new();
    director.start(&mut commands);

    let mut log = Vec::new();
    let mut ticks = 0;
    while !director.campaign_complete() && ticks < max_ticks {
        let view = query::aim_view(&world);
        let params = *query::params(&world);
        let standing = standing_targets(plan, &director, &world);
        let aim_at = standing.first().map(|(_, position)| *position);
        autoplay.sample(&view, &params, aim_at, &mut commands);
        commands.push(Command::Tick { dt });

        let mut events = Vec::new();
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }

        for event in &events {
            if let Event::ProjectileLaunched {
                direction, force, ..
            } = event
            {
                for id in ballistics::impacts(params.anchor, *direction, *force, &standing) {
                    commands.push(Command::DestroyTarget { id });
                }
            }
        }

        director.handle(&events, &mut commands);
        report(&events, &director);
        log.extend(events);
        ticks += 1;
    }

    CampaignRun {
        complete: director.campaign_complete(),
        ticks,
        events: log,
    }
}

/// Placed targets of the current round that are still standing.
fn standing_targets(
    plan: &CampaignPlan,
    director: &Director,
    world: &RoundWorld,
) -> Vec<(TargetId, Vec2)> {
    let remaining = query::targets_remaining(world);
    plan.placements(director.current_round())
        .iter()
        .filter(|placement| remaining.contains(&placement.id))
        .map(|placement| (placement.id, placement.position))
        .collect()
}

fn report(events: &[Event], director: &Director) {
    for event in events {
        match event {
            Event::RoundConfigured { max_shots, targets } => {
                info!(
                    round = director.current_round() + 1,
                    max_shots, targets, "round configured"
                );
            }
            Event::RoundConfigRejected { reason } => {
                info!(%reason, "round configuration rejected");
            }
            Event::ProjectileLaunched {
                id,
                direction,
                force,
            } => {
                info!(
                    projectile = id.get(),
                    direction = ?direction,
                    force,
                    "projectile launched"
                );
            }
            Event::ShotConsumed { used, remaining } => {
                info!(used, remaining, "shot consumed");
            }
            Event::GraceStarted { wait } => {
                debug!(wait = ?wait, "budget exhausted, grace period running");
            }
            Event::TargetDestroyed { id, remaining } => {
                info!(target = id.get(), remaining, "target destroyed");
            }
            Event::RoundEnded { outcome } => {
                info!(outcome = ?outcome, "round ended");
            }
            Event::DragStarted { id } => {
                debug!(projectile = id.get(), "drag started");
            }
            Event::ProjectileStaged { id, .. } => {
                debug!(projectile = id.get(), "projectile staged");
            }
            Event::LinesMoved { .. } | Event::ProjectileMoved { .. } => {
                trace!(event = ?event, "render sync");
            }
            Event::TimeAdvanced { .. } => {}
        }
    }
}
