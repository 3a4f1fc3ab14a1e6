#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state for the slingshot simulation.
//!
//! The world owns two components with strictly separated state: the shot
//! budget tracker (allowance, target roster, round judgement) and the
//! slingshot state machine (drag geometry, staged projectile, respawn and
//! release animation). Adapters mutate the world exclusively through
//! [`apply`] and observe it through broadcast [`slingshot_core::Event`]
//! values plus the read-only [`query`] functions.

use slingshot_core::{Command, Event, ParamsError, RoundSpec, TransitionError};

mod budget;
mod slingshot;

pub use slingshot::SlingshotPhase;

use budget::ShotBudgetTracker;
use slingshot::SlingshotStateMachine;

/// Represents the authoritative state of one playable round.
#[derive(Debug)]
pub struct RoundWorld {
    spec: RoundSpec,
    budget: ShotBudgetTracker,
    slingshot: SlingshotStateMachine,
}

impl RoundWorld {
    /// Creates a world ready for its first [`Command::ConfigureRound`].
    ///
    /// The world boots with a minimal placeholder round so queries are
    /// answerable before an adapter supplies a real spec.
    #[must_use]
    pub fn new() -> Self {
        let spec = RoundSpec::new(
            slingshot_core::RoundParams::default(),
            vec![slingshot_core::TargetId::new(0)],
        );
        let mut world = Self {
            budget: ShotBudgetTracker::new(
                spec.params.max_shots,
                spec.params.grace_period,
                &spec.targets,
            ),
            slingshot: SlingshotStateMachine::new(spec.params),
            spec,
        };
        let mut boot_events = Vec::new();
        world.slingshot.spawn_projectile(&mut boot_events);
        world
    }

    /// Rebuilds both components from the stored spec.
    ///
    /// Replacing the components discards every pending timer and in-flight
    /// animation, so nothing armed in the previous round can fire into the
    /// reset state.
    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.budget = ShotBudgetTracker::new(
            self.spec.params.max_shots,
            self.spec.params.grace_period,
            &self.spec.targets,
        );
        self.slingshot = SlingshotStateMachine::new(self.spec.params);
        out_events.push(Event::RoundConfigured {
            max_shots: self.spec.params.max_shots,
            targets: self.spec.targets.len() as u32,
        });
        self.slingshot.spawn_projectile(out_events);
    }

    fn guard_active(&self) -> Result<(), TransitionError> {
        if self.budget.outcome().is_terminal() {
            Err(TransitionError::RoundOver)
        } else {
            Ok(())
        }
    }

    fn press_pointer(
        &mut self,
        position: glam::Vec2,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        self.guard_active()?;
        self.slingshot.begin_drag(position, out_events)
    }

    fn drag_pointer(
        &mut self,
        position: glam::Vec2,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        self.guard_active()?;
        self.slingshot.update_drag(position, out_events)
    }

    fn release_pointer(&mut self, out_events: &mut Vec<Event>) -> Result<(), TransitionError> {
        self.guard_active()?;
        self.slingshot.release(&mut self.budget, out_events)
    }
}

impl Default for RoundWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Pointer commands delivered in an invalid phase, outside the interaction
/// zone, or after the round has ended are benign no-ops: input ordering is
/// not under this core's control.
pub fn apply(world: &mut RoundWorld, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureRound { spec } => {
            if let Err(reason) = spec.params.validate() {
                out_events.push(Event::RoundConfigRejected { reason });
                return;
            }
            if spec.targets.is_empty() {
                out_events.push(Event::RoundConfigRejected {
                    reason: ParamsError::NoTargets,
                });
                return;
            }
            world.spec = spec;
            world.reset(out_events);
        }
        Command::RestartRound => {
            world.reset(out_events);
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            if !world.budget.outcome().is_terminal() {
                world.slingshot.tick(dt, out_events);
            }
            world.budget.tick(dt, out_events);
        }
        Command::PressPointer { position } => {
            let _ = world.press_pointer(position, out_events);
        }
        Command::DragPointer { position } => {
            let _ = world.drag_pointer(position, out_events);
        }
        Command::ReleasePointer => {
            let _ = world.release_pointer(out_events);
        }
        Command::DestroyTarget { id } => {
            world.budget.remove_target(id, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use slingshot_core::{ProjectileId, RoundOutcome, RoundParams, TargetId};

    use super::{RoundWorld, SlingshotPhase};

    /// Current judgement of the round.
    #[must_use]
    pub fn outcome(world: &RoundWorld) -> RoundOutcome {
        world.budget.outcome()
    }

    /// Reports whether another shot may currently be fired.
    #[must_use]
    pub fn can_fire(world: &RoundWorld) -> bool {
        world.budget.can_fire()
    }

    /// Shots deducted from the allowance so far.
    #[must_use]
    pub fn shots_used(world: &RoundWorld) -> u32 {
        world.budget.used_shots()
    }

    /// Shots still available in the round's allowance.
    #[must_use]
    pub fn shots_remaining(world: &RoundWorld) -> u32 {
        world.budget.max_shots() - world.budget.used_shots()
    }

    /// Targets still standing, in identifier order.
    #[must_use]
    pub fn targets_remaining(world: &RoundWorld) -> Vec<TargetId> {
        world.budget.remaining_targets().collect()
    }

    /// Tunables the current round was configured with.
    #[must_use]
    pub fn params(world: &RoundWorld) -> &RoundParams {
        &world.spec.params
    }

    /// Captures a read-only snapshot of the slingshot for presentation.
    #[must_use]
    pub fn aim_view(world: &RoundWorld) -> AimSnapshot {
        let aim = world.slingshot.aim();
        AimSnapshot {
            phase: world.slingshot.phase(),
            staged: world.slingshot.staged(),
            raw_drag_point: aim.raw_drag_point,
            clamped_drag_point: aim.clamped_drag_point,
            launch_direction: aim.launch_direction,
            draw_point: world.slingshot.draw_point(),
            respawn_pending: world.slingshot.respawn_pending(),
            grace_pending: world.budget.grace_pending(),
        }
    }

    /// Immutable representation of the slingshot used for queries.
    #[derive(Clone, Copy, Debug)]
    pub struct AimSnapshot {
        /// Phase of the aim/draw/release cycle.
        pub phase: SlingshotPhase,
        /// Projectile currently resting on the slingshot, if any.
        pub staged: Option<ProjectileId>,
        /// Pointer position as last reported, before clamping.
        pub raw_drag_point: Vec2,
        /// Drag point after clamping to the maximum drag distance.
        pub clamped_drag_point: Vec2,
        /// Unit launch direction toward the anchor, zero at rest.
        pub launch_direction: Vec2,
        /// Point both draw lines are currently rendered from.
        pub draw_point: Vec2,
        /// Indicates whether a projectile respawn is pending.
        pub respawn_pending: bool,
        /// Indicates whether the loss judgement timer is pending.
        pub grace_pending: bool,
    }
}
