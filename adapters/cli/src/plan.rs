//! Campaign plan loading and generation for the command-line driver.
//!
//! A plan pairs each round's tunables with world positions for its targets;
//! the positions belong to the driver's toy range, not to the simulation
//! core, which only ever sees target identifiers.

use std::{fs, path::Path};

use anyhow::{bail, Context};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use slingshot_core::{RoundParams, RoundSpec, TargetId};

/// Ordered rounds making up one scripted campaign.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct CampaignPlan {
    /// Rounds played in order; winning the last completes the campaign.
    pub(crate) rounds: Vec<RoundPlan>,
}

/// One round of the plan: tunables plus placed targets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct RoundPlan {
    /// Tunables forwarded to the simulation when the round is configured.
    #[serde(default)]
    pub(crate) params: RoundParams,
    /// Targets standing on the range at round start.
    pub(crate) targets: Vec<TargetPlacement>,
}

/// A destructible target and where it stands on the range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub(crate) struct TargetPlacement {
    /// Identifier reported to the simulation core.
    pub(crate) id: TargetId,
    /// World position used by the driver's impact resolver.
    pub(crate) position: Vec2,
}

impl CampaignPlan {
    /// Loads a plan from a JSON file.
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading campaign plan from {}", path.display()))?;
        let plan: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing campaign plan {}", path.display()))?;
        if plan.rounds.is_empty() {
            bail!("campaign plan contains no rounds");
        }
        Ok(plan)
    }

    /// Generates a deterministic plan with targets placed downrange.
    pub(crate) fn generated(round_count: u32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut next_target = 0;
        let rounds = (0..round_count.max(1))
            .map(|round| {
                let target_count = 2 + round.min(2);
                let params = RoundParams {
                    // One spare shot keeps a generated round winnable even
                    // when every hit destroys a single target.
                    max_shots: target_count + 1,
                    ..RoundParams::default()
                };
                let targets = (0..target_count)
                    .map(|_| {
                        let id = TargetId::new(next_target);
                        next_target += 1;
                        TargetPlacement {
                            id,
                            position: Vec2::new(
                                rng.gen_range(4.0..9.0),
                                rng.gen_range(-1.0..2.0),
                            ),
                        }
                    })
                    .collect();
                RoundPlan { params, targets }
            })
            .collect();
        Self { rounds }
    }

    /// Round specs in play order, as the director consumes them.
    pub(crate) fn round_specs(&self) -> Vec<RoundSpec> {
        self.rounds
            .iter()
            .map(|round| {
                RoundSpec::new(
                    round.params,
                    round.targets.iter().map(|target| target.id).collect(),
                )
            })
            .collect()
    }

    /// Target placements of the given round.
    pub(crate) fn placements(&self, round: usize) -> &[TargetPlacement] {
        self.rounds
            .get(round)
            .map(|round| round.targets.as_slice())
            .unwrap_or(&[])
    }
}
