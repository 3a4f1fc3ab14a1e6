//! Deterministic scripted pointer input standing in for a player.
//!
//! Each frame the autoplayer inspects the slingshot snapshot and emits the
//! pointer commands of an unhurried gesture: press inside the interaction
//! zone, pull back toward a jittered point opposite the chosen target over
//! several frames, then release. All randomness flows from a seeded
//! generator so identical seeds replay identical campaigns.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slingshot_core::{Command, RoundParams};
use slingshot_world::{query::AimSnapshot, SlingshotPhase};

/// Frames spent pulling before the gesture releases.
const DRAG_FRAMES: u32 = 10;

/// Scripted player producing pointer commands from aim snapshots.
#[derive(Debug)]
pub(crate) struct Autoplay {
    rng: ChaCha8Rng,
    gesture: Option<Gesture>,
}

#[derive(Debug)]
struct Gesture {
    pull: Vec2,
    step: u32,
}

impl Autoplay {
    /// Creates a player whose jitter derives from the provided seed.
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            gesture: None,
        }
    }

    /// Emits this frame's pointer commands, if the slingshot is actionable.
    pub(crate) fn sample(
        &mut self,
        view: &AimSnapshot,
        params: &RoundParams,
        aim_at: Option<Vec2>,
        out: &mut Vec<Command>,
    ) {
        match view.phase {
            SlingshotPhase::Staged => {
                // A lingering gesture here means the previous press was
                // ignored; start over.
                self.gesture = None;

                let Some(target) = aim_at else {
                    return;
                };
                let direction = (target - params.anchor).normalize_or_zero();
                if direction == Vec2::ZERO {
                    return;
                }

                let strength = self.rng.gen_range(0.7..=1.0) * params.max_drag_distance;
                let side = Vec2::new(-direction.y, direction.x)
                    * self.rng.gen_range(-0.2..=0.2);
                let pull = params.anchor - direction * strength + side;

                out.push(Command::PressPointer {
                    position: params.zone_center,
                });
                self.gesture = Some(Gesture { pull, step: 0 });
            }
            SlingshotPhase::Dragging => {
                let Some(gesture) = &mut self.gesture else {
                    return;
                };
                gesture.step += 1;
                let progress = (gesture.step as f32 / DRAG_FRAMES as f32).min(1.0);
                out.push(Command::DragPointer {
                    position: params.anchor.lerp(gesture.pull, progress),
                });
                if gesture.step >= DRAG_FRAMES {
                    out.push(Command::ReleasePointer);
                    self.gesture = None;
                }
            }
            SlingshotPhase::Idle => {
                self.gesture = None;
            }
        }
    }
}
