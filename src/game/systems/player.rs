//! Combatant state machine
//!
//! `Player::update` consumes one tick of intent and runs the rules in a fixed
//! order: facing, overheat, dash, movement, motion heat, cooldowns, burst, heat
//! decay, hyper, shield and finally weapons. Later steps read what earlier
//! steps wrote, so the order is part of the contract.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::game::constants::{self, burst, dash, heat, hyper, player, shield, weapon};
use crate::game::effects::Effect;
use crate::game::intent::Intent;
use crate::game::state::PlayerSlot;
use crate::game::systems::arena::Arena;
use crate::game::systems::burst::{BurstFire, BurstPattern, BurstShot};
use crate::game::systems::projectile::{Projectile, ProjectileKind};
use crate::util::vec2::Vec2;

/// Per-weapon cooldowns in ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponCooldowns {
    /// Weapon A; hyper shots share this slot
    pub beam: u32,
    /// Weapon B, standard or spread
    pub ballistic: u32,
    pub melee: u32,
}

impl WeaponCooldowns {
    fn tick(&mut self) {
        self.beam = self.beam.saturating_sub(1);
        self.ballistic = self.ballistic.saturating_sub(1);
        self.melee = self.melee.saturating_sub(1);
    }
}

/// Running combat totals for the match summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub shots_fired: u32,
    pub hits_landed: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

/// Everything a player spawned this tick
#[derive(Debug, Default)]
pub struct Spawns {
    pub projectiles: SmallVec<[Projectile; 4]>,
    pub effects: SmallVec<[Effect; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub slot: PlayerSlot,
    pub position: Vec2,
    spawn_position: Vec2,
    /// Always points at the opponent
    pub facing_angle: f32,

    pub health: f32,
    pub heat: f32,
    pub hyper_gauge: f32,

    pub is_dashing: bool,
    pub is_overheated: bool,
    pub is_shield_active: bool,
    pub is_hyper_active: bool,
    /// Set once the hyper laser has fired in the current hyper window
    pub has_fired_hyper_laser: bool,

    /// Unit heading of the current dash
    pub dash_direction: Vec2,
    pub dash_cooldown: u32,
    dash_ring_counter: u32,
    pub shield_timer: u32,
    pub hyper_timer: u32,
    pub cooldowns: WeaponCooldowns,
    pub burst: BurstFire,

    pub stats: CombatStats,
}

impl Player {
    pub fn new(slot: PlayerSlot, position: Vec2) -> Self {
        Self {
            slot,
            position,
            spawn_position: position,
            facing_angle: 0.0,
            health: player::MAX_HEALTH,
            heat: 0.0,
            hyper_gauge: player::STARTING_HYPER,
            is_dashing: false,
            is_overheated: false,
            is_shield_active: false,
            is_hyper_active: false,
            has_fired_hyper_laser: false,
            dash_direction: Vec2::ZERO,
            dash_cooldown: 0,
            dash_ring_counter: 0,
            shield_timer: 0,
            hyper_timer: 0,
            cooldowns: WeaponCooldowns::default(),
            burst: BurstFire::default(),
            stats: CombatStats::default(),
        }
    }

    /// Spawn point for `slot` in `arena`: P1 left of center, P2 right
    pub fn spawn_point(slot: PlayerSlot, arena: &Arena) -> Vec2 {
        let offset = match slot {
            PlayerSlot::One => -player::SPAWN_OFFSET,
            PlayerSlot::Two => player::SPAWN_OFFSET,
        };
        arena.center() + Vec2::new(offset, 0.0)
    }

    /// Restore start-of-round state at the original spawn point
    pub fn reset(&mut self) {
        *self = Self::new(self.slot, self.spawn_position);
    }

    /// Adjust heat by `delta`, clamped to `[0, heat::MAX]`
    pub fn add_heat(&mut self, delta: f32) {
        self.heat = (self.heat + delta).clamp(0.0, heat::MAX);
    }

    /// Adjust the hyper gauge by `delta`, clamped to `[0, hyper::MAX]`
    pub fn add_hyper(&mut self, delta: f32) {
        self.hyper_gauge = (self.hyper_gauge + delta).clamp(0.0, hyper::MAX);
    }

    #[inline]
    pub fn is_shielding(&self) -> bool {
        self.is_shield_active
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Circle overlap with a projectile
    pub fn collides_with(&self, projectile: &Projectile) -> bool {
        let reach = player::RADIUS + projectile.radius;
        self.position.distance_sq_to(projectile.position) < reach * reach
    }

    /// Apply `amount` damage. No-op while shielded. A fifth of the damage
    /// converts into hyper gauge.
    pub fn take_damage(&mut self, amount: f32) {
        if self.is_shield_active {
            return;
        }
        self.health = (self.health - amount).clamp(0.0, player::MAX_HEALTH);
        self.add_hyper(amount * hyper::DAMAGE_TAKEN_RATIO);
        self.stats.damage_taken += amount;
    }

    /// Run one tick for this player
    pub fn update(&mut self, intent: &Intent, arena: &Arena, opponent: &Player) -> Spawns {
        let mut spawns = Spawns::default();

        self.facing_angle = self.position.angle_to_point(opponent.position);
        let input = intent.movement();
        let previous = self.position;

        // Heat carried in from last tick's shots can already sit at the cap
        self.resolve_overheat();
        self.update_dash(intent, input, &mut spawns);
        self.integrate_motion(input, arena);
        if !self.is_overheated {
            self.add_heat(constants::motion_heat(self.position.distance_to(previous)));
        }

        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.cooldowns.tick();

        if !self.is_shield_active {
            if let Some(shot) = self.burst.advance() {
                self.fire_burst_shot(shot, &mut spawns);
            }
        }

        if !self.is_dashing {
            self.add_heat(-heat::DECAY_PER_TICK);
        }
        self.resolve_overheat();

        self.update_hyper(intent, arena, &mut spawns);
        self.update_shield(intent, &mut spawns);
        self.fire_weapons(intent, opponent, &mut spawns);
        // Shots fired above may have pushed heat to the cap
        self.resolve_overheat();

        spawns
    }

    /// Enter overheat at the cap (ending any dash), leave it at the recovery mark
    fn resolve_overheat(&mut self) {
        if self.heat >= heat::MAX {
            if !self.is_overheated {
                debug!(slot = ?self.slot, "Overheated");
            }
            self.is_overheated = true;
            self.is_dashing = false;
        } else if self.is_overheated && self.heat <= heat::OVERHEAT_RECOVERY {
            debug!(slot = ?self.slot, heat = self.heat, "Overheat cleared");
            self.is_overheated = false;
        }
    }

    fn update_dash(&mut self, intent: &Intent, input: Vec2, spawns: &mut Spawns) {
        if !intent.dash {
            self.is_dashing = false;
            return;
        }

        if !self.is_dashing {
            let can_start = self.dash_cooldown == 0
                && input != Vec2::ZERO
                && !self.is_overheated
                && self.heat < heat::DASH_START_LIMIT;
            if can_start {
                self.is_dashing = true;
                self.dash_direction = input;
                self.dash_ring_counter = 0;
                self.add_heat(heat::DASH_START_SURCHARGE);
                spawns
                    .effects
                    .push(Effect::dash_ring(self.slot, self.position, self.dash_direction));
                debug!(slot = ?self.slot, heat = self.heat, "Dash started");
            }
            return;
        }

        if input != Vec2::ZERO {
            self.dash_direction = self.dash_direction.lerp(input, dash::TURN_RATE).normalize();
            self.dash_ring_counter += 1;
            if self.dash_ring_counter >= dash::RING_INTERVAL {
                self.dash_ring_counter = 0;
                spawns
                    .effects
                    .push(Effect::dash_ring(self.slot, self.position, self.dash_direction));
            }
        }
    }

    fn integrate_motion(&mut self, input: Vec2, arena: &Arena) {
        let step = if self.is_dashing {
            self.dash_direction * player::DASH_SPEED
        } else {
            input * player::SPEED
        };
        self.position = arena.constrain_position(self.position + step);
        if self.is_dashing {
            self.dash_cooldown = dash::COOLDOWN;
        }
    }

    fn update_hyper(&mut self, intent: &Intent, arena: &Arena, spawns: &mut Spawns) {
        if self.is_hyper_active {
            self.hyper_timer = self.hyper_timer.saturating_sub(1);
            self.add_hyper(-hyper::DRAIN_PER_TICK);
            if self.hyper_gauge <= 0.0 || self.hyper_timer == 0 {
                self.is_hyper_active = false;
                self.hyper_timer = 0;
                debug!(slot = ?self.slot, "Hyper ended");
            }
        }

        if self.is_dashing && arena.is_near_border(self.position) {
            self.add_hyper(-hyper::BORDER_DASH_DRAIN);
        }

        if intent.hyper && !self.is_hyper_active && self.hyper_gauge >= hyper::ACTIVATION_COST {
            self.add_hyper(-hyper::ACTIVATION_COST);
            self.is_hyper_active = true;
            self.hyper_timer = hyper::DURATION;
            self.has_fired_hyper_laser = false;
            spawns.effects.push(Effect::hyper_flash(self.slot, self.position));
            debug!(slot = ?self.slot, gauge = self.hyper_gauge, "Hyper activated");
        }
    }

    fn update_shield(&mut self, intent: &Intent, spawns: &mut Spawns) {
        if intent.shield && self.shield_timer == 0 && self.hyper_gauge >= hyper::GATE {
            self.add_hyper(-shield::COST);
            self.shield_timer = shield::DURATION;
            self.is_shield_active = true;
            self.burst.cancel();
            spawns.effects.push(Effect::shield_aura(self.slot, self.position));
            debug!(slot = ?self.slot, "Shield raised");
        }

        if self.shield_timer > 0 {
            self.shield_timer -= 1;
            if self.shield_timer == 0 {
                self.is_shield_active = false;
            }
        }
    }

    fn fire_weapons(&mut self, intent: &Intent, opponent: &Player, spawns: &mut Spawns) {
        if self.is_shield_active {
            return;
        }
        let aim = self.position.angle_to_point(opponent.position);

        if self.is_hyper_active && intent.hyper && self.cooldowns.beam == 0 {
            self.fire_hyper_shot(aim, spawns);
        } else if intent.weapon_a && self.cooldowns.beam == 0 {
            let shot = self.make_projectile(ProjectileKind::BEAM, aim, weapon::BEAM_DAMAGE);
            spawns.projectiles.push(shot);
            self.cooldowns.beam = weapon::BEAM_COOLDOWN;
        }

        if intent.weapon_b && self.cooldowns.ballistic == 0 && self.burst.is_idle() {
            if intent.special && self.hyper_gauge >= weapon::SPREAD_COST {
                self.add_hyper(-weapon::SPREAD_COST);
                self.burst.trigger(BurstPattern::Spread, aim);
                self.cooldowns.ballistic = weapon::SPREAD_COOLDOWN;
            } else {
                self.burst.trigger(BurstPattern::Ballistic, aim);
                self.cooldowns.ballistic = weapon::BALLISTIC_COOLDOWN;
            }
            if let Some(shot) = self.burst.advance() {
                self.fire_burst_shot(shot, spawns);
            }
        } else if intent.special && !intent.weapon_b && self.cooldowns.melee == 0 {
            let strike = self.make_projectile(ProjectileKind::Melee, aim, weapon::MELEE_DAMAGE);
            spawns.projectiles.push(strike);
            self.cooldowns.melee = weapon::MELEE_COOLDOWN;
        }
    }

    fn fire_hyper_shot(&mut self, aim: f32, spawns: &mut Spawns) {
        if self.has_fired_hyper_laser {
            let shot = self.make_projectile(ProjectileKind::BEAM, aim, weapon::BEAM_DAMAGE);
            spawns.projectiles.push(shot);
            self.cooldowns.beam = weapon::BEAM_COOLDOWN;
            return;
        }

        let kind = ProjectileKind::Beam {
            length: weapon::HYPER_LASER_LENGTH,
        };
        let mut laser = self.make_projectile(kind, aim, weapon::HYPER_LASER_DAMAGE);
        laser.radius = weapon::HYPER_LASER_RADIUS;
        laser.speed *= weapon::HYPER_LASER_SPEED_FACTOR;
        spawns.projectiles.push(laser);

        self.add_hyper(-weapon::HYPER_LASER_COST);
        self.has_fired_hyper_laser = true;
        self.cooldowns.beam = weapon::HYPER_LASER_COOLDOWN;
        debug!(slot = ?self.slot, "Hyper laser fired");
    }

    fn fire_burst_shot(&mut self, shot: BurstShot, spawns: &mut Spawns) {
        let (kind, damage) = match shot.pattern {
            BurstPattern::Ballistic => (
                ProjectileKind::Ballistic,
                weapon::BALLISTIC_DAMAGE * burst::BALLISTIC_DAMAGE_FACTOR,
            ),
            BurstPattern::Spread => (ProjectileKind::BEAM, weapon::SPREAD_DAMAGE),
        };
        for angle in shot.angles() {
            let mut projectile = self.make_projectile(kind, angle, damage);
            projectile.speed *= burst::SPEED_FACTOR;
            projectile.lifetime *= burst::LIFETIME_FACTOR;
            spawns.projectiles.push(projectile);
        }
    }

    /// Build a projectile from this player and pay the per-shot heat and gauge
    fn make_projectile(&mut self, kind: ProjectileKind, angle: f32, base_damage: f32) -> Projectile {
        let multiplier = if self.is_hyper_active {
            hyper::DAMAGE_MULTIPLIER
        } else {
            1.0
        };
        self.add_heat(heat::PER_SHOT);
        self.add_hyper(hyper::PER_SHOT);
        self.stats.shots_fired += 1;
        Projectile::new(kind, self.slot, self.position, angle, base_damage * multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::projectile as proj;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-4;

    fn setup() -> (Arena, Player, Player) {
        let arena = Arena::default();
        let me = Player::new(PlayerSlot::One, Player::spawn_point(PlayerSlot::One, &arena));
        let opponent = Player::new(PlayerSlot::Two, Player::spawn_point(PlayerSlot::Two, &arena));
        (arena, me, opponent)
    }

    fn dash_right() -> Intent {
        Intent {
            right: true,
            dash: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_points_face_each_other() {
        let (arena, mut me, opponent) = setup();
        assert!(me.position.x < arena.center().x);
        assert!(opponent.position.x > arena.center().x);
        me.update(&Intent::idle(), &arena, &opponent);
        assert!(me.facing_angle.abs() < EPSILON);
    }

    #[test]
    fn test_walk_moves_at_base_speed_without_heat() {
        let (arena, mut me, opponent) = setup();
        let start = me.position;
        me.update(&Intent::toward(Vec2::UP), &arena, &opponent);
        assert!(me.position.approx_eq(start + Vec2::new(0.0, -player::SPEED), EPSILON));
        assert_eq!(me.heat, 0.0);
    }

    #[test]
    fn test_dash_start_costs_surcharge_and_motion_heat() {
        let (arena, mut me, opponent) = setup();
        let start = me.position;
        let spawns = me.update(&dash_right(), &arena, &opponent);

        assert!(me.is_dashing);
        assert!(me.position.approx_eq(start + Vec2::new(player::DASH_SPEED, 0.0), EPSILON));
        // surcharge + full motion heat, no decay while dashing
        let expected = heat::DASH_START_SURCHARGE + heat::MOTION_MAX_PER_TICK;
        assert!((me.heat - expected).abs() < EPSILON);
        assert_eq!(spawns.effects.len(), 1);
        assert_eq!(me.dash_cooldown, dash::COOLDOWN - 1);
    }

    #[test]
    fn test_dash_requires_movement_input() {
        let (arena, mut me, opponent) = setup();
        let intent = Intent {
            dash: true,
            ..Default::default()
        };
        me.update(&intent, &arena, &opponent);
        assert!(!me.is_dashing);
    }

    #[test]
    fn test_dash_start_heat_boundary() {
        let (arena, mut me, opponent) = setup();
        me.heat = 199.0;
        me.update(&dash_right(), &arena, &opponent);
        assert!(me.is_dashing);

        let (arena, mut me, opponent) = setup();
        me.heat = 200.0;
        me.update(&dash_right(), &arena, &opponent);
        assert!(!me.is_dashing);
    }

    #[test]
    fn test_dash_continues_until_heat_cap() {
        let (arena, mut me, opponent) = setup();
        me.is_dashing = true;
        me.dash_direction = Vec2::RIGHT;
        me.heat = 290.0;
        me.update(&dash_right(), &arena, &opponent);
        assert!(me.is_dashing);
        assert!(!me.is_overheated);

        // Still dashes this tick, then the motion heat hits the cap
        me.heat = 299.0;
        let before = me.position;
        me.update(&dash_right(), &arena, &opponent);
        assert!((me.position.x - before.x - player::DASH_SPEED).abs() < EPSILON);
        assert!(!me.is_dashing);
        assert!(me.is_overheated);
        assert_eq!(me.heat, heat::MAX);
    }

    #[test]
    fn test_heat_at_cap_forces_overheat_before_moving() {
        let (arena, mut me, opponent) = setup();
        me.is_dashing = true;
        me.dash_direction = Vec2::RIGHT;
        me.heat = 300.0;
        let start = me.position;
        me.update(&dash_right(), &arena, &opponent);
        assert!(me.is_overheated);
        assert!(!me.is_dashing);
        // walked, did not dash
        assert!((me.position.x - start.x - player::SPEED).abs() < EPSILON);
    }

    #[test]
    fn test_overheated_player_cannot_start_dash() {
        let (arena, mut me, opponent) = setup();
        me.is_overheated = true;
        me.heat = 150.0;
        let start = me.position;
        let spawns = me.update(&dash_right(), &arena, &opponent);
        assert!(!me.is_dashing);
        assert!(spawns.effects.is_empty());
        // walked, no surcharge, decay still runs
        assert!((me.position.x - start.x - player::SPEED).abs() < EPSILON);
        assert!((me.heat - (150.0 - heat::DECAY_PER_TICK)).abs() < EPSILON);
    }

    #[test]
    fn test_holding_dash_through_overheat_still_cools_down() {
        let (arena, mut me, opponent) = setup();
        me.heat = heat::MAX;
        me.update(&Intent::idle(), &arena, &opponent);
        assert!(me.is_overheated);
        while me.heat >= heat::DASH_START_LIMIT {
            me.update(&Intent::idle(), &arena, &opponent);
        }
        assert!(me.is_overheated);

        let directions = [Vec2::RIGHT, Vec2::DOWN, Vec2::LEFT, Vec2::UP];
        let mut ticks = 0;
        while me.is_overheated {
            let intent = Intent {
                dash: true,
                ..Intent::toward(directions[ticks % directions.len()])
            };
            me.update(&intent, &arena, &opponent);
            assert!(!me.is_dashing);
            ticks += 1;
            assert!(ticks < 600, "overheat never cleared");
        }
        assert!(me.heat <= heat::OVERHEAT_RECOVERY);

        // once cleared, dash works again
        me.update(&dash_right(), &arena, &opponent);
        assert!(me.is_dashing);
    }

    #[test]
    fn test_overheat_hysteresis() {
        let (arena, mut me, opponent) = setup();
        me.is_overheated = true;
        me.heat = 122.0;
        me.update(&Intent::idle(), &arena, &opponent);
        assert!(me.is_overheated);
        assert_eq!(me.heat, 121.0);
        me.update(&Intent::idle(), &arena, &opponent);
        assert_eq!(me.heat, heat::OVERHEAT_RECOVERY);
        assert!(!me.is_overheated);
    }

    #[test]
    fn test_dash_stops_on_release() {
        let (arena, mut me, opponent) = setup();
        me.update(&dash_right(), &arena, &opponent);
        me.update(&Intent::toward(Vec2::RIGHT), &arena, &opponent);
        assert!(!me.is_dashing);
        // cooldown blocks an immediate restart
        assert!(me.dash_cooldown > 0);
        me.update(&dash_right(), &arena, &opponent);
        assert!(!me.is_dashing);
    }

    #[test]
    fn test_dash_steering_turns_gradually() {
        let (arena, mut me, opponent) = setup();
        me.update(&dash_right(), &arena, &opponent);
        let steer = Intent {
            down: true,
            dash: true,
            ..Default::default()
        };
        me.update(&steer, &arena, &opponent);
        let expected = Vec2::RIGHT.lerp(Vec2::DOWN, dash::TURN_RATE).normalize();
        assert!(me.dash_direction.approx_eq(expected, EPSILON));
        assert!((me.dash_direction.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_dash_ring_every_interval() {
        let (arena, mut me, opponent) = setup();
        let mut rings = me.update(&dash_right(), &arena, &opponent).effects.len();
        for _ in 0..dash::RING_INTERVAL {
            rings += me.update(&dash_right(), &arena, &opponent).effects.len();
        }
        assert_eq!(rings, 2);
    }

    #[test]
    fn test_stays_inside_arena() {
        let (arena, mut me, opponent) = setup();
        let intent = Intent::toward(Vec2::LEFT);
        for _ in 0..200 {
            me.update(&intent, &arena, &opponent);
            assert!(arena.is_inside(me.position));
        }
    }

    #[test]
    fn test_weapon_a_fires_beam_with_costs() {
        let (arena, mut me, opponent) = setup();
        let intent = Intent {
            weapon_a: true,
            ..Default::default()
        };
        let spawns = me.update(&intent, &arena, &opponent);

        assert_eq!(spawns.projectiles.len(), 1);
        let beam = &spawns.projectiles[0];
        assert!(matches!(beam.kind, ProjectileKind::Beam { .. }));
        assert_eq!(beam.damage, weapon::BEAM_DAMAGE);
        assert_eq!(beam.owner, PlayerSlot::One);
        assert!(beam.angle.abs() < EPSILON);
        assert_eq!(me.heat, heat::PER_SHOT);
        assert_eq!(me.hyper_gauge, hyper::PER_SHOT);
        assert_eq!(me.cooldowns.beam, weapon::BEAM_COOLDOWN);

        let again = me.update(&intent, &arena, &opponent);
        assert!(again.projectiles.is_empty());
    }

    #[test]
    fn test_weapon_cooldowns_are_independent() {
        let (arena, mut me, opponent) = setup();
        let both = Intent {
            weapon_a: true,
            weapon_b: true,
            ..Default::default()
        };
        let spawns = me.update(&both, &arena, &opponent);
        assert_eq!(spawns.projectiles.len(), 2);
        assert_eq!(me.cooldowns.beam, weapon::BEAM_COOLDOWN);
        assert_eq!(me.cooldowns.ballistic, weapon::BALLISTIC_COOLDOWN);
    }

    #[test]
    fn test_weapon_b_burst_over_ticks() {
        let (arena, mut me, opponent) = setup();
        let fire = Intent {
            weapon_b: true,
            ..Default::default()
        };
        let mut shots = me.update(&fire, &arena, &opponent).projectiles.to_vec();
        for _ in 0..30 {
            shots.extend(me.update(&Intent::idle(), &arena, &opponent).projectiles);
        }
        assert_eq!(shots.len(), burst::TOTAL as usize);
        for shot in &shots {
            assert_eq!(shot.kind, ProjectileKind::Ballistic);
            assert_eq!(shot.damage, weapon::BALLISTIC_DAMAGE * burst::BALLISTIC_DAMAGE_FACTOR);
            assert_eq!(shot.speed, proj::BALLISTIC_SPEED * burst::SPEED_FACTOR);
            assert_eq!(shot.lifetime, proj::DEFAULT_LIFETIME * burst::LIFETIME_FACTOR);
        }
    }

    #[test]
    fn test_spread_burst_needs_gauge() {
        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = 120.0;
        let spread = Intent {
            weapon_b: true,
            special: true,
            ..Default::default()
        };
        let spawns = me.update(&spread, &arena, &opponent);
        assert_eq!(spawns.projectiles.len(), 2);
        assert!(spawns.projectiles.iter().all(|p| p.damage == weapon::SPREAD_DAMAGE));
        // 120 - 100 + 2 shots * 15
        assert!((me.hyper_gauge - 50.0).abs() < EPSILON);
        assert_eq!(me.cooldowns.ballistic, weapon::SPREAD_COOLDOWN);
        assert_eq!(me.cooldowns.melee, 0);
    }

    #[test]
    fn test_special_without_gauge_falls_back_to_standard_burst() {
        let (arena, mut me, opponent) = setup();
        let spread = Intent {
            weapon_b: true,
            special: true,
            ..Default::default()
        };
        let spawns = me.update(&spread, &arena, &opponent);
        assert_eq!(spawns.projectiles.len(), 1);
        assert_eq!(spawns.projectiles[0].kind, ProjectileKind::Ballistic);
    }

    #[test]
    fn test_special_alone_is_melee() {
        let (arena, mut me, opponent) = setup();
        let strike = Intent {
            special: true,
            ..Default::default()
        };
        let spawns = me.update(&strike, &arena, &opponent);
        assert_eq!(spawns.projectiles.len(), 1);
        assert_eq!(spawns.projectiles[0].kind, ProjectileKind::Melee);
        assert_eq!(me.cooldowns.melee, weapon::MELEE_COOLDOWN);
    }

    #[test]
    fn test_shield_activation_and_lifetime() {
        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = 150.0;
        let raise = Intent {
            shield: true,
            weapon_a: true,
            ..Default::default()
        };
        let spawns = me.update(&raise, &arena, &opponent);
        assert!(me.is_shield_active);
        assert!(spawns.projectiles.is_empty());
        assert_eq!(spawns.effects.len(), 1);
        assert_eq!(me.hyper_gauge, 50.0);

        let mut ticks = 1;
        while me.is_shield_active {
            me.update(&Intent::idle(), &arena, &opponent);
            ticks += 1;
            assert!(ticks <= shield::DURATION);
        }
        assert_eq!(ticks, shield::DURATION);
    }

    #[test]
    fn test_shield_gate_and_cancels_burst() {
        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = 99.0;
        me.update(
            &Intent {
                shield: true,
                ..Default::default()
            },
            &arena,
            &opponent,
        );
        assert!(!me.is_shield_active);

        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = 200.0;
        me.update(
            &Intent {
                weapon_b: true,
                ..Default::default()
            },
            &arena,
            &opponent,
        );
        assert!(!me.burst.is_idle());
        me.update(
            &Intent {
                shield: true,
                ..Default::default()
            },
            &arena,
            &opponent,
        );
        assert!(me.burst.is_idle());
    }

    #[test]
    fn test_shield_blocks_damage() {
        let (_, mut me, _) = setup();
        me.is_shield_active = true;
        me.take_damage(100.0);
        assert_eq!(me.health, player::MAX_HEALTH);
        assert_eq!(me.hyper_gauge, 0.0);
    }

    #[test]
    fn test_damage_converts_to_gauge() {
        let (_, mut me, _) = setup();
        me.take_damage(100.0);
        assert_eq!(me.health, player::MAX_HEALTH - 100.0);
        assert!((me.hyper_gauge - 20.0).abs() < EPSILON);
        me.take_damage(5000.0);
        assert_eq!(me.health, 0.0);
        assert!(!me.is_alive());
    }

    #[test]
    fn test_hyper_laser_then_doubled_beams() {
        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = 100.0;
        let hyper_intent = Intent {
            hyper: true,
            ..Default::default()
        };

        let spawns = me.update(&hyper_intent, &arena, &opponent);
        assert!(me.is_hyper_active);
        assert_eq!(spawns.projectiles.len(), 1);
        let laser = &spawns.projectiles[0];
        assert_eq!(laser.damage, weapon::HYPER_LASER_DAMAGE * hyper::DAMAGE_MULTIPLIER);
        assert_eq!(laser.radius, weapon::HYPER_LASER_RADIUS);
        assert_eq!(laser.visual_length(), Some(weapon::HYPER_LASER_LENGTH));
        assert_eq!(laser.speed, proj::BEAM_SPEED * weapon::HYPER_LASER_SPEED_FACTOR);
        assert!(me.has_fired_hyper_laser);
        // 100 - 50 activation + 15 shot - 10 laser
        assert!((me.hyper_gauge - 55.0).abs() < EPSILON);
        assert_eq!(me.cooldowns.beam, weapon::HYPER_LASER_COOLDOWN);

        let mut next = Vec::new();
        for _ in 0..weapon::HYPER_LASER_COOLDOWN {
            next.extend(me.update(&hyper_intent, &arena, &opponent).projectiles);
        }
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].damage, weapon::BEAM_DAMAGE * hyper::DAMAGE_MULTIPLIER);
        assert_eq!(next[0].radius, proj::BEAM_RADIUS);
    }

    #[test]
    fn test_hyper_ends_after_duration() {
        let (arena, mut me, opponent) = setup();
        me.hyper_gauge = hyper::MAX;
        me.update(
            &Intent {
                hyper: true,
                ..Default::default()
            },
            &arena,
            &opponent,
        );
        assert!(me.is_hyper_active);
        for _ in 0..hyper::DURATION {
            me.update(&Intent::idle(), &arena, &opponent);
        }
        assert!(!me.is_hyper_active);
    }

    #[test]
    fn test_hyper_ends_when_gauge_empty() {
        let (arena, mut me, opponent) = setup();
        me.is_hyper_active = true;
        me.hyper_timer = hyper::DURATION;
        me.hyper_gauge = 1.0;
        me.update(&Intent::idle(), &arena, &opponent);
        assert!(!me.is_hyper_active);
        assert_eq!(me.hyper_gauge, 0.0);
    }

    #[test]
    fn test_border_dash_drains_gauge() {
        let (arena, mut me, opponent) = setup();
        me.position = arena.center() + Vec2::new(0.0, arena.warning_radius() + 5.0);
        me.hyper_gauge = 50.0;
        me.update(&dash_right(), &arena, &opponent);
        assert!(me.is_dashing);
        assert!((me.hyper_gauge - (50.0 - hyper::BORDER_DASH_DRAIN)).abs() < EPSILON);
    }

    #[test]
    fn test_collides_with() {
        let (_, me, _) = setup();
        let mut p = Projectile::new(ProjectileKind::BEAM, PlayerSlot::Two, me.position, 0.0, 1.0);
        assert!(me.collides_with(&p));
        p.position = me.position + Vec2::new(player::RADIUS + proj::BEAM_RADIUS, 0.0);
        assert!(!me.collides_with(&p));
    }

    #[test]
    fn test_reset_restores_spawn() {
        let (arena, mut me, opponent) = setup();
        let spawn = me.position;
        for _ in 0..10 {
            me.update(&dash_right(), &arena, &opponent);
        }
        me.take_damage(300.0);
        me.reset();
        assert_eq!(me.position, spawn);
        assert_eq!(me.health, player::MAX_HEALTH);
        assert_eq!(me.heat, 0.0);
        assert_eq!(me.stats, CombatStats::default());
    }

    fn arb_intent() -> impl Strategy<Value = Intent> {
        any::<[bool; 10]>().prop_map(Intent::from_flags)
    }

    proptest! {
        #[test]
        fn prop_gauges_stay_in_range(intents in proptest::collection::vec(arb_intent(), 1..300)) {
            let (arena, mut me, opponent) = setup();
            me.hyper_gauge = 150.0;
            for intent in &intents {
                me.update(intent, &arena, &opponent);
                prop_assert!(me.heat >= 0.0 && me.heat <= heat::MAX);
                prop_assert!(me.hyper_gauge >= 0.0 && me.hyper_gauge <= hyper::MAX);
                prop_assert!(me.health >= 0.0 && me.health <= player::MAX_HEALTH);
                prop_assert!(arena.is_inside(me.position));
                prop_assert!(!(me.is_dashing && me.heat >= heat::MAX));
                prop_assert!(!(me.is_dashing && me.is_overheated));
            }
        }
    }
}
