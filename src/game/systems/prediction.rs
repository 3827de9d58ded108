//! Threat prediction for the predictive AI
//!
//! Projectiles are treated as straight-line movers. Homing bends the real path
//! a little, which the short horizon keeps tolerable.

use rand::Rng;

use crate::game::constants::{ai, player};
use crate::game::systems::arena::Arena;
use crate::game::systems::player::Player;
use crate::game::systems::projectile::Projectile;
use crate::util::vec2::Vec2;

/// An incoming projectile and when it lands
#[derive(Debug, Clone, Copy)]
pub struct Threat<'a> {
    pub projectile: &'a Projectile,
    pub time_to_impact: f32,
}

/// Earliest strictly positive time at which a point starting at `position`
/// moving at `velocity` per tick meets the circle of `combined_radius` around
/// `target`.
///
/// A point already inside the circle reports the tick it would leave it. A
/// stationary point or one whose path never meets the circle ahead of it
/// returns `None`.
pub fn solve_intercept(position: Vec2, velocity: Vec2, target: Vec2, combined_radius: f32) -> Option<f32> {
    let a = velocity.length_sq();
    if a <= f32::EPSILON {
        return None;
    }

    let offset = position - target;
    let b = 2.0 * velocity.dot(offset);
    let c = offset.length_sq() - combined_radius * combined_radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = (-b - root) / (2.0 * a);
    let far = (-b + root) / (2.0 * a);

    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Soonest opposing projectile predicted to hit `me` within the horizon
pub fn find_threat<'a>(me: &Player, projectiles: &'a [Projectile]) -> Option<Threat<'a>> {
    projectiles
        .iter()
        .filter(|p| p.owner != me.slot && !p.expired)
        .filter_map(|p| {
            let combined = player::RADIUS + p.radius;
            solve_intercept(p.position, p.velocity(), me.position, combined)
                .filter(|t| *t < ai::THREAT_HORIZON)
                .map(|time_to_impact| Threat {
                    projectile: p,
                    time_to_impact,
                })
        })
        .min_by(|a, b| a.time_to_impact.total_cmp(&b.time_to_impact))
}

/// Any opposing projectile inside the proximity radius
pub fn projectile_nearby(me: &Player, projectiles: &[Projectile]) -> bool {
    let limit = ai::PROXIMITY_RADIUS * ai::PROXIMITY_RADIUS;
    projectiles
        .iter()
        .any(|p| p.owner != me.slot && me.position.distance_sq_to(p.position) < limit)
}

/// Sidestep perpendicular to the threat's heading.
///
/// Near the wall the side facing the arena center is taken; elsewhere the
/// side is a coin flip.
pub fn evasion_direction<R: Rng>(threat: &Threat<'_>, position: Vec2, arena: &Arena, rng: &mut R) -> Vec2 {
    let mut side = Vec2::from_angle(threat.projectile.angle).perpendicular();

    if arena.distance_from_center(position) > arena.radius() * ai::CENTER_BIAS_FRACTION {
        if side.dot(arena.center() - position) < 0.0 {
            side = -side;
        }
    } else if rng.gen_bool(0.5) {
        side = -side;
    }
    side
}
