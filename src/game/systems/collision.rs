//! Projectile versus player resolution
//!
//! Each live projectile resolves against at most one player per tick. A
//! shielded defender turns the projectile around and takes ownership of it;
//! otherwise the defender takes heat-scaled damage and the projectile is
//! consumed.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::game::constants::heat_damage_multiplier;
use crate::game::state::{EntityId, PlayerSlot};
use crate::game::systems::player::Player;
use crate::game::systems::projectile::Projectile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    Hit {
        projectile: EntityId,
        attacker: PlayerSlot,
        defender: PlayerSlot,
        /// Damage after the defender's heat scaling
        damage: f32,
        /// Hyper gauge credited to the attacker
        reward: f32,
    },
    Reflected {
        projectile: EntityId,
        new_owner: PlayerSlot,
    },
}

/// Resolve all projectile hits for this tick and drop consumed projectiles
pub fn resolve(players: &mut [Player; 2], projectiles: &mut Vec<Projectile>) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for projectile in projectiles.iter_mut().filter(|p| !p.expired) {
        let defender = projectile.owner.opponent();
        let (hit, shielded, heat) = {
            let target = &players[defender.index()];
            (target.collides_with(projectile), target.is_shielding(), target.heat)
        };
        if !hit {
            continue;
        }

        if shielded {
            projectile.reflect(defender);
            trace!(id = projectile.id, owner = ?defender, "Projectile reflected");
            events.push(CollisionEvent::Reflected {
                projectile: projectile.id,
                new_owner: defender,
            });
            continue;
        }

        let attacker = projectile.owner;
        let damage = projectile.damage * heat_damage_multiplier(heat);
        players[defender.index()].take_damage(damage);

        let owner = &mut players[attacker.index()];
        let reward = projectile.on_hit(owner);
        owner.stats.hits_landed += 1;
        owner.stats.damage_dealt += damage;

        trace!(id = projectile.id, ?attacker, damage, "Projectile hit");
        events.push(CollisionEvent::Hit {
            projectile: projectile.id,
            attacker,
            defender,
            damage,
            reward,
        });
    }

    projectiles.retain(|p| !p.expired);
    events
}
