//! Projectile kinematics
//!
//! Three closed kinds share one body: beam, ballistic and melee differ only in
//! their starting stats, and melee additionally re-anchors to its owner every
//! tick instead of flying free.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::game::constants::projectile::*;
use crate::game::state::{EntityId, PlayerSlot};
use crate::game::systems::arena::Arena;
use crate::game::systems::player::Player;
use crate::util::vec2::{wrap_angle, Vec2};

/// Projectile kind and its per-kind payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fast thin beam; `length` is the drawn length of the beam
    Beam { length: f32 },
    /// Slower, larger round
    Ballistic,
    /// Short-lived hitbox held in front of the owner
    Melee,
}

impl ProjectileKind {
    pub const BEAM: ProjectileKind = ProjectileKind::Beam {
        length: BEAM_LENGTH,
    };

    pub fn base_speed(&self) -> f32 {
        match self {
            ProjectileKind::Beam { .. } => BEAM_SPEED,
            ProjectileKind::Ballistic => BALLISTIC_SPEED,
            ProjectileKind::Melee => MELEE_SPEED,
        }
    }

    pub fn base_radius(&self) -> f32 {
        match self {
            ProjectileKind::Beam { .. } => BEAM_RADIUS,
            ProjectileKind::Ballistic => BALLISTIC_RADIUS,
            ProjectileKind::Melee => MELEE_RADIUS,
        }
    }

    pub fn base_lifetime(&self) -> i32 {
        match self {
            ProjectileKind::Melee => MELEE_LIFETIME,
            _ => DEFAULT_LIFETIME,
        }
    }

    /// Homing strength, `None` for kinds that never home
    pub fn homing_strength(&self) -> Option<f32> {
        match self {
            ProjectileKind::Beam { .. } => Some(BEAM_HOMING),
            ProjectileKind::Ballistic => Some(BALLISTIC_HOMING),
            ProjectileKind::Melee => None,
        }
    }

    /// Hyper gauge granted to the owner when this kind lands a hit
    pub fn hit_reward(&self) -> f32 {
        match self {
            ProjectileKind::Beam { .. } => BEAM_HIT_REWARD,
            ProjectileKind::Ballistic => BALLISTIC_HIT_REWARD,
            ProjectileKind::Melee => MELEE_HIT_REWARD,
        }
    }
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Assigned by the orchestrator when the projectile is inserted
    pub id: EntityId,
    pub kind: ProjectileKind,
    /// Attribution only; never used to mutate the owner's lifetime
    pub owner: PlayerSlot,
    pub position: Vec2,
    /// Heading in radians
    pub angle: f32,
    /// Distance travelled per tick
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
    /// Remaining ticks
    pub lifetime: i32,
    pub homing: bool,
    pub homing_strength: f32,
    pub expired: bool,
}

impl Projectile {
    /// Create a projectile of `kind` fired from `origin` along `angle`
    pub fn new(kind: ProjectileKind, owner: PlayerSlot, origin: Vec2, angle: f32, damage: f32) -> Self {
        let position = match kind {
            ProjectileKind::Melee => origin + Vec2::from_angle(angle) * MELEE_REACH,
            _ => origin,
        };
        let homing_strength = kind.homing_strength();

        Self {
            id: 0,
            kind,
            owner,
            position,
            angle,
            speed: kind.base_speed(),
            damage,
            radius: kind.base_radius(),
            lifetime: kind.base_lifetime(),
            homing: homing_strength.is_some(),
            homing_strength: homing_strength.unwrap_or(0.0),
            expired: false,
        }
    }

    /// Velocity per tick
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.speed
    }

    /// Drawn beam length, if this is a beam
    pub fn visual_length(&self) -> Option<f32> {
        match self.kind {
            ProjectileKind::Beam { length } => Some(length),
            _ => None,
        }
    }

    /// Advance one tick.
    ///
    /// Homing turns the heading by a fraction of the wrapped angle to the
    /// player that does not own this projectile. The projectile expires when its
    /// lifetime runs out or it leaves the arena circle.
    pub fn update(&mut self, arena: &Arena, players: &[Player; 2]) {
        if self.expired {
            return;
        }

        if self.homing {
            let target = players[self.owner.opponent().index()].position;
            self.steer_toward(target);
        }

        self.position += self.velocity();

        self.lifetime -= 1;
        if self.lifetime <= 0 || !arena.is_inside(self.position) {
            self.expired = true;
        }

        if self.kind == ProjectileKind::Melee && !self.expired {
            let owner = players[self.owner.index()].position;
            self.position = owner + Vec2::from_angle(self.angle) * MELEE_REACH;
        }
    }

    /// Bounded turn toward `target`
    pub fn steer_toward(&mut self, target: Vec2) {
        let bearing = self.position.angle_to_point(target);
        let diff = wrap_angle(bearing - self.angle);
        self.angle += diff * self.homing_strength;
    }

    /// Consume the projectile on a hit and credit its owner's hyper gauge.
    /// Returns the gauge granted.
    pub fn on_hit(&mut self, owner: &mut Player) -> f32 {
        self.expired = true;
        let reward = self.kind.hit_reward();
        owner.add_hyper(reward);
        reward
    }

    /// Turn the projectile around and hand it to `new_owner`.
    /// Lifetime, radius and speed are kept.
    pub fn reflect(&mut self, new_owner: PlayerSlot) {
        self.angle = (self.angle + PI).rem_euclid(TAU);
        self.owner = new_owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::hyper;

    const EPSILON: f32 = 1e-4;

    fn players_at(p1: Vec2, p2: Vec2) -> [Player; 2] {
        [Player::new(PlayerSlot::One, p1), Player::new(PlayerSlot::Two, p2)]
    }

    fn center() -> Vec2 {
        Arena::default().center()
    }

    #[test]
    fn test_kind_stats() {
        let beam = Projectile::new(ProjectileKind::BEAM, PlayerSlot::One, center(), 0.0, 20.0);
        assert_eq!(beam.speed, BEAM_SPEED);
        assert_eq!(beam.radius, BEAM_RADIUS);
        assert_eq!(beam.lifetime, DEFAULT_LIFETIME);
        assert!(beam.homing);
        assert_eq!(beam.visual_length(), Some(BEAM_LENGTH));

        let melee = Projectile::new(ProjectileKind::Melee, PlayerSlot::One, center(), 0.0, 60.0);
        assert!(!melee.homing);
        assert_eq!(melee.lifetime, MELEE_LIFETIME);
        assert!(melee.position.approx_eq(center() + Vec2::new(MELEE_REACH, 0.0), EPSILON));
        assert_eq!(melee.visual_length(), None);
    }

    #[test]
    fn test_straight_flight_without_homing() {
        let arena = Arena::default();
        let c = center();
        let players = players_at(c, c + Vec2::new(0.0, 100.0));
        let mut p = Projectile::new(ProjectileKind::Ballistic, PlayerSlot::One, c, 0.0, 40.0);
        p.homing = false;

        p.update(&arena, &players);

        assert!(p.position.approx_eq(c + Vec2::new(BALLISTIC_SPEED, 0.0), EPSILON));
        assert_eq!(p.lifetime, DEFAULT_LIFETIME - 1);
        assert!(!p.expired);
    }

    #[test]
    fn test_homing_turn_is_bounded_fraction() {
        let arena = Arena::default();
        let c = center();
        // Target straight "below" the projectile: bearing +PI/2 from heading 0
        let players = players_at(c + Vec2::new(-50.0, 0.0), c + Vec2::new(0.0, 100.0));
        let mut p = Projectile::new(ProjectileKind::BEAM, PlayerSlot::One, c, 0.0, 20.0);

        p.update(&arena, &players);

        let expected = (PI / 2.0) * BEAM_HOMING;
        assert!((p.angle - expected).abs() < EPSILON);
    }

    #[test]
    fn test_homing_targets_non_owner() {
        let arena = Arena::default();
        let c = center();
        // P2 owns it, so it should bend toward P1 (above), not P2 (below)
        let players = players_at(c + Vec2::new(0.0, -100.0), c + Vec2::new(0.0, 100.0));
        let mut p = Projectile::new(ProjectileKind::Ballistic, PlayerSlot::Two, c, 0.0, 40.0);

        p.update(&arena, &players);

        assert!(p.angle < 0.0);
    }

    #[test]
    fn test_homing_takes_short_way_round() {
        let c = center();
        let mut p = Projectile::new(ProjectileKind::BEAM, PlayerSlot::One, c, 3.0, 20.0);
        // Target just past PI on the other side; raw diff ~ -6, wrapped ~ +0.28
        p.steer_toward(c + Vec2::from_angle(-3.0) * 50.0);
        assert!(p.angle > 3.0);
    }

    #[test]
    fn test_expires_on_lifetime() {
        let arena = Arena::default();
        let c = center();
        let players = players_at(c, c + Vec2::new(50.0, 50.0));
        let mut p = Projectile::new(ProjectileKind::BEAM, PlayerSlot::One, c, 0.0, 20.0);
        p.speed = 0.0;
        p.lifetime = 2;

        p.update(&arena, &players);
        assert!(!p.expired);
        p.update(&arena, &players);
        assert!(p.expired);
    }

    #[test]
    fn test_expires_leaving_arena() {
        let arena = Arena::default();
        let c = center();
        let players = players_at(c, c + Vec2::new(0.0, 100.0));
        let start = c + Vec2::new(arena.radius() - 2.0, 0.0);
        let mut p = Projectile::new(ProjectileKind::Ballistic, PlayerSlot::One, start, 0.0, 40.0);
        p.homing = false;

        p.update(&arena, &players);

        assert!(p.expired);
    }

    #[test]
    fn test_melee_follows_owner() {
        let arena = Arena::default();
        let c = center();
        let mut players = players_at(c, c + Vec2::new(100.0, 0.0));
        let mut p = Projectile::new(ProjectileKind::Melee, PlayerSlot::One, c, 0.0, 60.0);

        players[0].position = c + Vec2::new(0.0, 30.0);
        p.update(&arena, &players);

        let expected = players[0].position + Vec2::new(MELEE_REACH, 0.0);
        assert!(p.position.approx_eq(expected, EPSILON));
    }

    #[test]
    fn test_melee_short_lifetime() {
        let arena = Arena::default();
        let c = center();
        let players = players_at(c, c + Vec2::new(100.0, 0.0));
        let mut p = Projectile::new(ProjectileKind::Melee, PlayerSlot::One, c, 0.0, 60.0);
        for _ in 0..MELEE_LIFETIME {
            p.update(&arena, &players);
        }
        assert!(p.expired);
    }

    #[test]
    fn test_on_hit_rewards_owner_by_kind() {
        let c = center();
        for (kind, reward) in [
            (ProjectileKind::BEAM, BEAM_HIT_REWARD),
            (ProjectileKind::Ballistic, BALLISTIC_HIT_REWARD),
            (ProjectileKind::Melee, MELEE_HIT_REWARD),
        ] {
            let mut owner = Player::new(PlayerSlot::One, c);
            let mut p = Projectile::new(kind, PlayerSlot::One, c, 0.0, 10.0);
            let granted = p.on_hit(&mut owner);
            assert!(p.expired);
            assert_eq!(granted, reward);
            assert_eq!(owner.hyper_gauge, reward);
        }
    }

    #[test]
    fn test_on_hit_reward_clamped() {
        let c = center();
        let mut owner = Player::new(PlayerSlot::One, c);
        owner.hyper_gauge = hyper::MAX - 1.0;
        let mut p = Projectile::new(ProjectileKind::Melee, PlayerSlot::One, c, 0.0, 10.0);
        p.on_hit(&mut owner);
        assert_eq!(owner.hyper_gauge, hyper::MAX);
    }

    #[test]
    fn test_reflect_flips_heading_and_owner_only() {
        let c = center();
        let mut p = Projectile::new(ProjectileKind::Ballistic, PlayerSlot::One, c, 0.5, 40.0);
        p.lifetime = 17;

        p.reflect(PlayerSlot::Two);

        assert_eq!(p.owner, PlayerSlot::Two);
        assert!((p.angle - (0.5 + PI)).abs() < EPSILON);
        assert_eq!(p.lifetime, 17);
        assert_eq!(p.speed, BALLISTIC_SPEED);
        assert_eq!(p.radius, BALLISTIC_RADIUS);
        assert!(!p.expired);
    }
}
