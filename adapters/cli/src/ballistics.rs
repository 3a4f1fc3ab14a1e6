//! Toy straight-line impact resolver standing in for a physics engine.
//!
//! The simulation core hands launched projectiles to an external physics
//! collaborator; for the command-line driver that collaborator is this
//! resolver, which flies the projectile along its launch direction and
//! reports the targets it passes close enough to destroy.

use glam::Vec2;
use slingshot_core::TargetId;

/// Lateral distance within which a passing projectile destroys a target.
const HIT_RADIUS: f32 = 0.75;

/// Targets struck by a straight flight from `origin` along `direction`.
///
/// The launch force bounds the flight range in world units; targets behind
/// the origin or beyond the range survive.
pub(crate) fn impacts(
    origin: Vec2,
    direction: Vec2,
    force: f32,
    targets: &[(TargetId, Vec2)],
) -> Vec<TargetId> {
    if direction.length_squared() < f32::EPSILON {
        return Vec::new();
    }

    targets
        .iter()
        .filter_map(|(id, position)| {
            let to_target = *position - origin;
            let along = to_target.dot(direction);
            if along < 0.0 || along > force {
                return None;
            }
            let lateral = (to_target - direction * along).length();
            (lateral <= HIT_RADIUS).then_some(*id)
        })
        .collect()
}
