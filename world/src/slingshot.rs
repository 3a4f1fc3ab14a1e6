//! Aim, draw, release and respawn cycle for the staged projectile.

use std::time::Duration;

use glam::Vec2;
use slingshot_core::{
    DelayTimer, EasingCurve, Event, ProjectileId, RoundParams, TransitionError,
};

use crate::budget::ShotBudgetTracker;

/// Phase of the slingshot cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlingshotPhase {
    /// No projectile is staged; a respawn may be pending.
    Idle,
    /// A projectile rests on the slingshot awaiting a drag.
    Staged,
    /// The pointer is engaged and the projectile follows the drag.
    Dragging,
}

/// Drag geometry recomputed on every pointer move.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AimState {
    /// Pointer position as reported, before clamping.
    pub(crate) raw_drag_point: Vec2,
    /// Drag point after clamping to the maximum drag distance.
    pub(crate) clamped_drag_point: Vec2,
    /// Unit vector from the clamped point toward the anchor; zero while the
    /// clamped point coincides with the anchor.
    pub(crate) launch_direction: Vec2,
}

impl AimState {
    fn at_rest(anchor: Vec2) -> Self {
        Self {
            raw_drag_point: anchor,
            clamped_drag_point: anchor,
            launch_direction: Vec2::ZERO,
        }
    }
}

/// Interpolation of the draw point back toward the anchor after a launch.
///
/// The easing curve is evaluated over the full nominal duration even when
/// the hard cap cuts the animation short, so a capped animation leaves the
/// draw point partway home.
#[derive(Clone, Copy, Debug)]
struct ElasticReturn {
    from: Vec2,
    nominal: Duration,
    elapsed: Duration,
}

impl ElasticReturn {
    fn step(
        &mut self,
        dt: Duration,
        anchor: Vec2,
        easing: EasingCurve,
        cap: Duration,
    ) -> (Vec2, bool) {
        self.elapsed = self.elapsed.saturating_add(dt);
        let progress = self.elapsed.as_secs_f32() / self.nominal.as_secs_f32();
        let eased = easing.evaluate(progress);
        let point = self.from.lerp(anchor, eased);
        let finished = self.elapsed >= self.nominal.min(cap);
        (point, finished)
    }
}

/// State machine governing the single projectile staged on the slingshot.
///
/// Holds the drag geometry, the draw-line point, the respawn delay and the
/// release animation. The shot budget is consulted through an explicitly
/// injected [`ShotBudgetTracker`]; the machine never owns budget state.
#[derive(Debug)]
pub(crate) struct SlingshotStateMachine {
    params: RoundParams,
    phase: SlingshotPhase,
    staged: Option<ProjectileId>,
    aim: AimState,
    draw_point: Vec2,
    respawn: DelayTimer,
    elastic: Option<ElasticReturn>,
    next_projectile: u32,
}

impl SlingshotStateMachine {
    /// Creates an idle machine; call [`Self::spawn_projectile`] to stage.
    pub(crate) fn new(params: RoundParams) -> Self {
        Self {
            params,
            phase: SlingshotPhase::Idle,
            staged: None,
            aim: AimState::at_rest(params.anchor),
            draw_point: params.idle_point,
            respawn: DelayTimer::idle(),
            elastic: None,
            next_projectile: 0,
        }
    }

    /// Direction and position a freshly staged projectile rests at.
    fn spawn_pose(&self) -> (Vec2, Vec2) {
        let facing = (self.params.anchor - self.params.idle_point).normalize_or_zero();
        let position = self.params.idle_point + facing * self.params.projectile_offset;
        (position, facing)
    }

    /// Stages a new projectile at the idle pose and resets the aim.
    ///
    /// Any in-flight release animation is discarded and the draw lines are
    /// re-seated at the idle point.
    pub(crate) fn spawn_projectile(&mut self, out_events: &mut Vec<Event>) {
        self.elastic = None;
        self.draw_point = self.params.idle_point;
        out_events.push(Event::LinesMoved {
            draw_point: self.draw_point,
        });

        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile += 1;

        let (position, facing) = self.spawn_pose();
        self.staged = Some(id);
        self.aim = AimState::at_rest(self.params.anchor);
        self.phase = SlingshotPhase::Staged;
        out_events.push(Event::ProjectileStaged {
            id,
            position,
            facing,
        });
    }

    /// Engages the staged projectile when the press lands inside the zone.
    pub(crate) fn begin_drag(
        &mut self,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        if !position.is_finite()
            || position.distance(self.params.zone_center) > self.params.zone_radius
        {
            return Err(TransitionError::OutsideZone);
        }
        let Some(id) = self.staged else {
            return Err(TransitionError::NotStaged);
        };
        if self.phase != SlingshotPhase::Staged {
            return Err(TransitionError::NotStaged);
        }

        self.phase = SlingshotPhase::Dragging;
        out_events.push(Event::DragStarted { id });
        Ok(())
    }

    /// Recomputes the drag geometry and repositions the projectile.
    ///
    /// Idempotent for a fixed pointer position: the clamp, the launch
    /// direction, the projectile pose and the draw lines are all pure
    /// functions of the current drag point.
    pub(crate) fn update_drag(
        &mut self,
        position: Vec2,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        if self.phase != SlingshotPhase::Dragging {
            return Err(TransitionError::NotDragging);
        }
        let Some(id) = self.staged else {
            return Err(TransitionError::NotStaged);
        };
        // A NaN or infinite pointer sample keeps the previous aim.
        if !position.is_finite() {
            return Ok(());
        }

        let anchor = self.params.anchor;
        let pull = position - anchor;
        let clamped = anchor + pull.clamp_length_max(self.params.max_drag_distance);
        let direction = (anchor - clamped).normalize_or_zero();

        self.aim = AimState {
            raw_drag_point: position,
            clamped_drag_point: clamped,
            launch_direction: direction,
        };
        self.draw_point = clamped;
        out_events.push(Event::LinesMoved { draw_point: clamped });

        let projectile_position = clamped + direction * self.params.projectile_offset;
        out_events.push(Event::ProjectileMoved {
            id,
            position: projectile_position,
            facing: direction,
        });
        Ok(())
    }

    /// Releases the drag, launching the projectile when the budget allows.
    ///
    /// A release with the budget exhausted snaps the projectile back to its
    /// staged pose without launching or consuming anything. A successful
    /// launch registers the shot, starts the elastic return animation and
    /// schedules a respawn iff budget remains.
    pub(crate) fn release(
        &mut self,
        budget: &mut ShotBudgetTracker,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        if self.phase != SlingshotPhase::Dragging {
            return Err(TransitionError::NotDragging);
        }
        let Some(id) = self.staged else {
            return Err(TransitionError::NotStaged);
        };

        if !budget.can_fire() {
            self.snap_back(id, out_events);
            return Ok(());
        }

        let direction = self.aim.launch_direction;
        self.staged = None;
        self.phase = SlingshotPhase::Idle;
        out_events.push(Event::ProjectileLaunched {
            id,
            direction,
            force: self.params.shot_force,
        });

        let registered = budget.register_shot_used(out_events);
        debug_assert!(registered.is_ok(), "can_fire was checked before release");

        self.start_elastic_return(out_events);

        if budget.can_fire() {
            self.respawn.arm(self.params.respawn_delay);
        }
        Ok(())
    }

    /// Re-seats the projectile at its spawn pose after a refused release.
    fn snap_back(&mut self, id: ProjectileId, out_events: &mut Vec<Event>) {
        self.phase = SlingshotPhase::Staged;
        self.aim = AimState::at_rest(self.params.anchor);
        self.draw_point = self.params.idle_point;
        out_events.push(Event::LinesMoved {
            draw_point: self.draw_point,
        });

        let (position, facing) = self.spawn_pose();
        out_events.push(Event::ProjectileMoved {
            id,
            position,
            facing,
        });
    }

    fn start_elastic_return(&mut self, out_events: &mut Vec<Event>) {
        let from = self.draw_point;
        let distance = from.distance(self.params.anchor);
        let seconds = distance / self.params.elastic_divider;
        if !(seconds > 0.0) {
            self.draw_point = self.params.anchor;
            out_events.push(Event::LinesMoved {
                draw_point: self.draw_point,
            });
            return;
        }

        // A tiny divider pushes the quotient past Duration's range; the
        // animation still ends at the cap, so the nominal length is pinned
        // to the longest representable one.
        let nominal = Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX);
        self.elastic = Some(ElasticReturn {
            from,
            nominal,
            elapsed: Duration::ZERO,
        });
    }

    /// Advances the release animation and the respawn delay.
    pub(crate) fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if let Some(animation) = &mut self.elastic {
            let (point, finished) = animation.step(
                dt,
                self.params.anchor,
                self.params.easing,
                self.params.max_animation_time,
            );
            self.draw_point = point;
            out_events.push(Event::LinesMoved { draw_point: point });
            if finished {
                self.elastic = None;
            }
        }

        if self.respawn.advance(dt) {
            self.spawn_projectile(out_events);
        }
    }

    /// Current phase of the slingshot cycle.
    pub(crate) fn phase(&self) -> SlingshotPhase {
        self.phase
    }

    /// Identifier of the staged projectile, if any.
    pub(crate) fn staged(&self) -> Option<ProjectileId> {
        self.staged
    }

    /// Current drag geometry.
    pub(crate) fn aim(&self) -> AimState {
        self.aim
    }

    /// Point both draw lines are currently rendered from.
    pub(crate) fn draw_point(&self) -> Vec2 {
        self.draw_point
    }

    /// Reports whether a respawn delay is currently pending.
    pub(crate) fn respawn_pending(&self) -> bool {
        self.respawn.is_armed()
    }
}
