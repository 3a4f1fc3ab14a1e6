//! Shot budget and target roster bookkeeping for a single round.

use std::collections::BTreeSet;
use std::time::Duration;

use slingshot_core::{BudgetError, DelayTimer, Event, RoundOutcome, TargetId};

/// Tracks shots used against the round's allowance and the targets that
/// remain standing, and judges the round once either side runs out.
///
/// The loss judgement is deferred by a grace period so consequences of
/// already-launched projectiles can still clear the roster; an emptied
/// roster wins immediately and preempts the pending check.
#[derive(Debug)]
pub(crate) struct ShotBudgetTracker {
    max_shots: u32,
    used_shots: u32,
    roster: BTreeSet<TargetId>,
    grace_period: Duration,
    grace: DelayTimer,
    outcome: RoundOutcome,
}

impl ShotBudgetTracker {
    /// Creates a tracker with a full budget and the provided roster.
    pub(crate) fn new(max_shots: u32, grace_period: Duration, targets: &[TargetId]) -> Self {
        Self {
            max_shots,
            used_shots: 0,
            roster: targets.iter().copied().collect(),
            grace_period,
            grace: DelayTimer::idle(),
            outcome: RoundOutcome::InProgress,
        }
    }

    /// Reports whether another shot may be fired. No side effects.
    pub(crate) fn can_fire(&self) -> bool {
        self.used_shots < self.max_shots
    }

    /// Deducts one shot from the allowance.
    ///
    /// Arms the grace-period timer when the deduction exhausts the budget.
    /// The timer is armed on that edge only, so at most one judgement is
    /// ever pending per round.
    pub(crate) fn register_shot_used(
        &mut self,
        out_events: &mut Vec<Event>,
    ) -> Result<(), BudgetError> {
        if !self.can_fire() {
            return Err(BudgetError::Exhausted);
        }

        self.used_shots += 1;
        out_events.push(Event::ShotConsumed {
            used: self.used_shots,
            remaining: self.max_shots - self.used_shots,
        });

        if self.used_shots == self.max_shots {
            self.grace.arm(self.grace_period);
            out_events.push(Event::GraceStarted {
                wait: self.grace_period,
            });
        }

        Ok(())
    }

    /// Removes a target from the roster; removing an absent id is a no-op.
    ///
    /// An emptied roster wins the round immediately, cancelling any pending
    /// grace-period judgement. A terminal outcome is never re-announced.
    pub(crate) fn remove_target(&mut self, id: TargetId, out_events: &mut Vec<Event>) {
        if !self.roster.remove(&id) {
            return;
        }

        out_events.push(Event::TargetDestroyed {
            id,
            remaining: self.roster.len() as u32,
        });

        if self.roster.is_empty() && !self.outcome.is_terminal() {
            self.grace.cancel();
            self.outcome = RoundOutcome::Won;
            out_events.push(Event::RoundEnded {
                outcome: RoundOutcome::Won,
            });
        }
    }

    /// Advances the grace-period timer, judging the round on its edge.
    pub(crate) fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.grace.advance(dt) && !self.outcome.is_terminal() {
            self.outcome = if self.roster.is_empty() {
                RoundOutcome::Won
            } else {
                RoundOutcome::Lost
            };
            out_events.push(Event::RoundEnded {
                outcome: self.outcome,
            });
        }
    }

    /// Current judgement of the round.
    pub(crate) fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Shots deducted so far.
    pub(crate) fn used_shots(&self) -> u32 {
        self.used_shots
    }

    /// Shots the round allows in total.
    pub(crate) fn max_shots(&self) -> u32 {
        self.max_shots
    }

    /// Targets still standing, in identifier order.
    pub(crate) fn remaining_targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.roster.iter().copied()
    }

    /// Reports whether the loss judgement is currently pending.
    pub(crate) fn grace_pending(&self) -> bool {
        self.grace.is_armed()
    }
}
