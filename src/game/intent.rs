//! Per-tick intent record consumed by `Player::update`
//!
//! Produced by the input-mapping layer for humans and by `AiController` for
//! bots. Callers must supply a full record every tick.

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

const STEER_DEAD_ZONE: f32 = 1e-3;

/// Ten boolean intents for one player for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub weapon_a: bool,
    pub weapon_b: bool,
    pub hyper: bool,
    pub dash: bool,
    pub special: bool,
    pub shield: bool,
}

impl Intent {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Movement direction as a unit vector, or zero when no direction is held.
    /// Opposing keys cancel; diagonals are normalized so they move at axis speed.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize()
    }

    #[inline]
    pub fn has_movement(&self) -> bool {
        self.movement() != Vec2::ZERO
    }

    /// Set the four direction flags from the signs of a steering vector.
    /// Components under `STEER_DEAD_ZONE` of the unit direction are ignored.
    pub fn steer(&mut self, direction: Vec2) {
        let dir = direction.normalize();
        self.right = dir.x > STEER_DEAD_ZONE;
        self.left = dir.x < -STEER_DEAD_ZONE;
        self.down = dir.y > STEER_DEAD_ZONE;
        self.up = dir.y < -STEER_DEAD_ZONE;
    }

    /// Build a movement-only intent from a steering vector
    pub fn toward(direction: Vec2) -> Self {
        let mut intent = Self::default();
        intent.steer(direction);
        intent
    }

    /// Flags as an array in canonical field order
    pub fn to_flags(&self) -> [bool; 10] {
        [
            self.up,
            self.down,
            self.left,
            self.right,
            self.weapon_a,
            self.weapon_b,
            self.hyper,
            self.dash,
            self.special,
            self.shield,
        ]
    }

    /// Inverse of `to_flags`
    pub fn from_flags(flags: [bool; 10]) -> Self {
        let [up, down, left, right, weapon_a, weapon_b, hyper, dash, special, shield] = flags;
        Self {
            up,
            down,
            left,
            right,
            weapon_a,
            weapon_b,
            hyper,
            dash,
            special,
            shield,
        }
    }
}
