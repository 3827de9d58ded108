//! AI opponents
//!
//! Two policies produce an `Intent` each tick. The simple policy is a fixed
//! rule table keyed on distance and frame count. The predictive policy dodges
//! incoming fire and otherwise follows a movement style it resamples once a
//! second.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::game::constants::{ai::*, hyper};
use crate::game::intent::Intent;
use crate::game::state::{GameState, PlayerSlot};
use crate::game::systems::arena::Arena;
use crate::game::systems::player::Player;
use crate::game::systems::projectile::Projectile;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPolicy {
    Simple,
    Predictive,
}

/// What the AI can see for one decision
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub me: &'a Player,
    pub opponent: &'a Player,
    pub projectiles: &'a [Projectile],
    pub arena: &'a Arena,
    pub frame: u64,
}

impl<'a> Observation<'a> {
    pub fn from_state(state: &'a GameState, slot: PlayerSlot) -> Self {
        Self {
            me: state.player(slot),
            opponent: state.player(slot.opponent()),
            projectiles: &state.projectiles,
            arena: &state.arena,
            frame: state.tick,
        }
    }
}

/// Movement styles the predictive policy rotates through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementStyle {
    /// Close in when far, back off when near
    Range,
    Strafe { clockwise: bool },
    SeekCenter,
    Wander,
}

pub struct AiController {
    pub policy: AiPolicy,
    rng: StdRng,
    move_timer: u32,
    style: MovementStyle,
    /// Movement and dash flags carried between resamples
    plan: Intent,
}

impl AiController {
    pub fn new(policy: AiPolicy) -> Self {
        Self::with_rng(policy, StdRng::from_entropy())
    }

    /// Deterministic controller for replays and tests
    pub fn with_seed(policy: AiPolicy, seed: u64) -> Self {
        Self::with_rng(policy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(policy: AiPolicy, rng: StdRng) -> Self {
        Self {
            policy,
            rng,
            move_timer: MOVE_INTERVAL,
            style: MovementStyle::Range,
            plan: Intent::idle(),
        }
    }

    pub fn style(&self) -> MovementStyle {
        self.style
    }

    /// Forget the carried plan so the next decision resamples
    pub fn reset(&mut self) {
        self.move_timer = MOVE_INTERVAL;
        self.plan = Intent::idle();
    }

    pub fn decide(&mut self, view: &Observation<'_>) -> Intent {
        match self.policy {
            AiPolicy::Simple => simple_intent(view),
            AiPolicy::Predictive => self.decide_predictive(view),
        }
    }

    #[cfg(not(feature = "predictive_ai"))]
    fn decide_predictive(&mut self, view: &Observation<'_>) -> Intent {
        simple_intent(view)
    }

    #[cfg(feature = "predictive_ai")]
    fn decide_predictive(&mut self, view: &Observation<'_>) -> Intent {
        use crate::game::systems::prediction;

        self.move_timer += 1;

        if let Some(threat) = prediction::find_threat(view.me, view.projectiles) {
            let dodge = prediction::evasion_direction(&threat, view.me.position, view.arena, &mut self.rng);
            let mut intent = Intent::toward(dodge);
            intent.dash = true;
            self.plan = intent;
            self.move_timer = 0;

            if threat.time_to_impact < SHIELD_REACTION_TIME && self.rng.gen_bool(EMERGENCY_SHIELD_CHANCE) {
                intent.shield = true;
            }
            trace!(slot = ?view.me.slot, tti = threat.time_to_impact, "Evading");
            return intent;
        }

        if self.move_timer >= MOVE_INTERVAL {
            self.move_timer = 0;
            self.style = self.sample_style();
            self.plan = Intent::toward(self.style_direction(view));
            self.plan.dash = self.rng.gen_bool(STYLE_DASH_CHANCE);
            trace!(slot = ?view.me.slot, style = ?self.style, "Movement resampled");
        }

        let mut intent = self.plan;
        intent.weapon_a = self.rng.gen_bool(WEAPON_A_CHANCE);
        intent.weapon_b = self.rng.gen_bool(WEAPON_B_CHANCE);
        intent.special = self.rng.gen_bool(SPECIAL_CHANCE);

        let shield_chance = if prediction::projectile_nearby(view.me, view.projectiles) {
            SHIELD_CHANCE_NEAR
        } else {
            SHIELD_CHANCE_IDLE
        };
        intent.shield = self.rng.gen_bool(shield_chance);
        intent.hyper = view.me.hyper_gauge >= hyper::GATE && self.rng.gen_bool(HYPER_CHANCE);
        intent
    }

    fn sample_style(&mut self) -> MovementStyle {
        match self.rng.gen_range(0..=10) {
            0..=5 => MovementStyle::Range,
            6..=7 => MovementStyle::Strafe {
                clockwise: self.rng.gen_bool(0.5),
            },
            8 => MovementStyle::SeekCenter,
            _ => MovementStyle::Wander,
        }
    }

    fn style_direction(&mut self, view: &Observation<'_>) -> Vec2 {
        let to_opponent = view.opponent.position - view.me.position;
        match self.style {
            MovementStyle::Range => {
                if to_opponent.length() > ENGAGE_DISTANCE {
                    to_opponent
                } else {
                    -to_opponent
                }
            }
            MovementStyle::Strafe { clockwise } => {
                let tangent = to_opponent.perpendicular();
                if clockwise {
                    -tangent
                } else {
                    tangent
                }
            }
            MovementStyle::SeekCenter => view.arena.center() - view.me.position,
            MovementStyle::Wander => self.random_direction(),
        }
    }

    /// Random mix of one vertical and one horizontal choice, never standing still
    fn random_direction(&mut self) -> Vec2 {
        let axis = |rng: &mut StdRng| match rng.gen_range(0..3) {
            0 => -1.0,
            1 => 1.0,
            _ => 0.0,
        };
        let dir = Vec2::new(axis(&mut self.rng), axis(&mut self.rng));
        if dir != Vec2::ZERO {
            return dir;
        }
        match self.rng.gen_range(0..4) {
            0 => Vec2::UP,
            1 => Vec2::DOWN,
            2 => Vec2::LEFT,
            _ => Vec2::RIGHT,
        }
    }
}

/// Fixed rule table: approach and fire slowly when far. When near, back off
/// and fire faster, with periodic bursts, dashes and hyper attempts.
pub fn simple_intent(view: &Observation<'_>) -> Intent {
    let to_opponent = view.opponent.position - view.me.position;
    let frame = view.frame;
    let far = to_opponent.length() > ENGAGE_DISTANCE;

    // Always holds one key per axis, approaching when far and retreating when near
    let toward_x = to_opponent.x > 0.0;
    let toward_y = to_opponent.y > 0.0;
    let (right, down) = if far { (toward_x, toward_y) } else { (!toward_x, !toward_y) };
    let fire_period = if far {
        SIMPLE_FAR_FIRE_PERIOD
    } else {
        SIMPLE_NEAR_FIRE_PERIOD
    };

    Intent {
        up: !down,
        down,
        left: !right,
        right,
        weapon_a: frame % fire_period == 0,
        weapon_b: !far && frame % SIMPLE_BURST_PERIOD == 0,
        hyper: !far && view.me.hyper_gauge >= hyper::GATE && frame % SIMPLE_HYPER_PERIOD == 0,
        dash: !far && frame % SIMPLE_DASH_PERIOD == 0,
        special: false,
        shield: false,
    }
}
