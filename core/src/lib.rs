#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the slingshot round simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative round world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and presentation adapters to react to deterministically. All simulated
//! time flows through [`Command::Tick`]; delayed work is expressed with
//! [`DelayTimer`] values advanced by ticks rather than background threads.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier assigned to a destructible target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u32);

impl TargetId {
    /// Creates a new target identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a staged or launched projectile.
///
/// Identifiers are allocated by the world, monotonically within a round, so
/// events referring to an in-flight projectile stay unambiguous even after a
/// new projectile has been staged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Terminal judgement of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The round is still being played.
    InProgress,
    /// Every target was destroyed before the round was judged lost.
    Won,
    /// The shot budget ran out with targets still standing.
    Lost,
}

impl RoundOutcome {
    /// Reports whether the outcome can no longer change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reasons a shot registration may be refused by the budget tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum BudgetError {
    /// Every shot in the round's allowance has already been used.
    #[error("shot budget exhausted")]
    Exhausted,
}

/// Reasons a slingshot operation may be refused in the current phase.
///
/// Input delivery order is outside this core's control, so callers treat
/// these as benign no-ops rather than faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum TransitionError {
    /// The pointer press landed outside the interaction zone.
    #[error("pointer press outside the interaction zone")]
    OutsideZone,
    /// No projectile is currently staged on the slingshot.
    #[error("no projectile staged")]
    NotStaged,
    /// The operation requires an active drag and none is in progress.
    #[error("no drag in progress")]
    NotDragging,
    /// The round has already ended and the slingshot is disabled.
    #[error("round already ended")]
    RoundOver,
}

/// Reasons a round configuration request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ParamsError {
    /// A round must allow at least one shot.
    #[error("max_shots must be at least 1")]
    NoShots,
    /// The drag clamp radius must be a positive finite distance.
    #[error("max_drag_distance must be positive and finite")]
    BadDragDistance,
    /// The elastic divider scales animation time and must be positive.
    #[error("elastic_divider must be positive and finite")]
    BadElasticDivider,
    /// The interaction zone radius must be a positive finite distance.
    #[error("zone_radius must be positive and finite")]
    BadZoneRadius,
    /// A round needs at least one target to destroy.
    #[error("target roster is empty")]
    NoTargets,
}

/// Easing curves available to the elastic release animation.
///
/// Every variant maps the normalized progress `t` in `0.0..=1.0` onto an
/// eased progress in the same range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EasingCurve {
    /// Progress passes through unchanged.
    Linear,
    /// Hermite smoothstep, gentle at both ends.
    #[default]
    SmoothStep,
    /// Cubic ease-out, fast start with a soft landing.
    EaseOutCubic,
}

impl EasingCurve {
    /// Evaluates the curve at normalized progress `t`, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOutCubic => {
                let inverted = 1.0 - t;
                1.0 - inverted * inverted * inverted
            }
        }
    }
}

/// Cancellable single-shot timer advanced by simulation ticks.
///
/// The owner arms the timer, feeds it elapsed time from [`Command::Tick`],
/// and observes a single firing edge. Restarting a round cancels the timer
/// in place so a stale delay can never fire into freshly reset state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelayTimer {
    remaining: Option<Duration>,
}

impl DelayTimer {
    /// Creates a timer with no pending delay.
    #[must_use]
    pub const fn idle() -> Self {
        Self { remaining: None }
    }

    /// Arms the timer to fire once after `delay` of simulated time.
    pub fn arm(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    /// Discards any pending delay without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Reports whether a delay is currently pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advances the timer by `dt`, returning `true` on the firing edge.
    ///
    /// A fired timer disarms itself; subsequent calls return `false` until
    /// the timer is armed again.
    #[must_use]
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) => {
                let left = remaining.saturating_sub(dt);
                if left.is_zero() {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

/// Static per-round tunables supplied at configuration time.
///
/// Defaults describe a playable three-shot round around the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundParams {
    /// Number of shots the player may fire during the round.
    pub max_shots: u32,
    /// Grace period between shot exhaustion and the loss judgement.
    pub grace_period: Duration,
    /// Maximum distance the drag point may travel from the anchor.
    pub max_drag_distance: f32,
    /// Force magnitude handed to the projectile on launch.
    pub shot_force: f32,
    /// Delay between a launch and the next projectile being staged.
    pub respawn_delay: Duration,
    /// Divides the drag distance to obtain the nominal animation time.
    pub elastic_divider: f32,
    /// Hard cap on how long the release animation may run.
    pub max_animation_time: Duration,
    /// Curve shaping the draw point's return toward the anchor.
    pub easing: EasingCurve,
    /// Distance the projectile sits beyond the drag point along the aim.
    pub projectile_offset: f32,
    /// World position the drag is measured against.
    pub anchor: Vec2,
    /// World position the draw lines rest at while nothing is drawn.
    pub idle_point: Vec2,
    /// Center of the circular zone a drag must start inside.
    pub zone_center: Vec2,
    /// Radius of the circular interaction zone.
    pub zone_radius: f32,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            max_shots: 3,
            grace_period: Duration::from_secs(3),
            max_drag_distance: 3.5,
            shot_force: 10.0,
            respawn_delay: Duration::from_secs(2),
            elastic_divider: 1.2,
            max_animation_time: Duration::from_secs(1),
            easing: EasingCurve::default(),
            projectile_offset: 2.0,
            anchor: Vec2::ZERO,
            idle_point: Vec2::new(-1.0, -0.5),
            zone_center: Vec2::ZERO,
            zone_radius: 1.5,
        }
    }
}

impl RoundParams {
    /// Validates the tunables, reporting the first violated constraint.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.max_shots == 0 {
            return Err(ParamsError::NoShots);
        }
        if !(self.max_drag_distance.is_finite() && self.max_drag_distance > 0.0) {
            return Err(ParamsError::BadDragDistance);
        }
        if !(self.elastic_divider.is_finite() && self.elastic_divider > 0.0) {
            return Err(ParamsError::BadElasticDivider);
        }
        if !(self.zone_radius.is_finite() && self.zone_radius > 0.0) {
            return Err(ParamsError::BadZoneRadius);
        }
        Ok(())
    }
}

/// Complete description of one round: tunables plus the initial roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSpec {
    /// Tunables applied when the round is configured.
    pub params: RoundParams,
    /// Targets that must all be destroyed to win the round.
    pub targets: Vec<TargetId>,
}

impl RoundSpec {
    /// Creates a round description from tunables and an initial roster.
    #[must_use]
    pub fn new(params: RoundParams, targets: Vec<TargetId>) -> Self {
        Self { params, targets }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the world and begins a fresh round from the provided spec.
    ConfigureRound {
        /// Tunables and initial roster describing the round.
        spec: RoundSpec,
    },
    /// Restarts the current round from the spec it was configured with.
    RestartRound,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time elapsed since the previous tick.
        dt: Duration,
    },
    /// Reports that the pointer was pressed at a world position.
    PressPointer {
        /// Pointer position in world coordinates.
        position: Vec2,
    },
    /// Reports the pointer's world position while it is held.
    DragPointer {
        /// Pointer position in world coordinates.
        position: Vec2,
    },
    /// Reports that the pointer was released.
    ReleasePointer,
    /// Reports that an external collaborator destroyed a target.
    DestroyTarget {
        /// Identifier of the destroyed target.
        id: TargetId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a round was configured and is ready to play.
    RoundConfigured {
        /// Shots available for the round.
        max_shots: u32,
        /// Number of targets that must be destroyed.
        targets: u32,
    },
    /// Reports that a round configuration request was rejected.
    RoundConfigRejected {
        /// Specific constraint the configuration violated.
        reason: ParamsError,
    },
    /// Announces that a drag engaged the staged projectile.
    ///
    /// Presentation adapters play the pull cue and switch the camera to
    /// follow the projectile on this event.
    DragStarted {
        /// Projectile now following the drag.
        id: ProjectileId,
    },
    /// Reports the new position of the moving end of both draw lines.
    LinesMoved {
        /// Point both draw lines are rendered from.
        draw_point: Vec2,
    },
    /// Reports that the staged projectile was repositioned.
    ProjectileMoved {
        /// Projectile that moved.
        id: ProjectileId,
        /// New world position of the projectile.
        position: Vec2,
        /// Unit direction the projectile is oriented along.
        facing: Vec2,
    },
    /// Confirms that the staged projectile was launched.
    ///
    /// Presentation adapters play the release cue; the physics collaborator
    /// takes over the projectile from this point on.
    ProjectileLaunched {
        /// Projectile handed to the physics collaborator.
        id: ProjectileId,
        /// Unit direction of the launch.
        direction: Vec2,
        /// Force magnitude applied along the direction.
        force: f32,
    },
    /// Confirms that a shot was deducted from the round's budget.
    ShotConsumed {
        /// Shots used so far, including this one.
        used: u32,
        /// Shots still available.
        remaining: u32,
    },
    /// Announces that the budget is exhausted and the grace period began.
    GraceStarted {
        /// Delay before the round is judged.
        wait: Duration,
    },
    /// Confirms that a new projectile is staged on the slingshot.
    ///
    /// Presentation adapters return the camera to its idle framing here.
    ProjectileStaged {
        /// Projectile resting on the slingshot.
        id: ProjectileId,
        /// World position of the staged projectile.
        position: Vec2,
        /// Unit direction the projectile is oriented along.
        facing: Vec2,
    },
    /// Confirms that a target left the roster.
    TargetDestroyed {
        /// Target that was destroyed.
        id: TargetId,
        /// Number of targets still standing.
        remaining: u32,
    },
    /// Announces the terminal judgement of the round.
    RoundEnded {
        /// Final outcome, either `Won` or `Lost`.
        outcome: RoundOutcome,
    },
}
