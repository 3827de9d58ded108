//! Short-lived visual effects
//!
//! Effects carry no gameplay weight. They exist so a renderer can draw dash
//! trails, shield auras and the hyper flash without peeking at player timers.

use serde::{Deserialize, Serialize};

use crate::game::constants::{dash, effect, shield};
use crate::game::state::{EntityId, PlayerSlot};
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Ring left behind while dashing; stays where it was dropped
    DashRing { direction: Vec2 },
    /// Follows its owner for the shield's lifetime
    ShieldAura,
    /// Follows its owner when hyper mode starts
    HyperFlash,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub id: EntityId,
    pub owner: PlayerSlot,
    pub kind: EffectKind,
    pub position: Vec2,
    /// Ticks left
    pub remaining: u32,
    pub duration: u32,
}

impl Effect {
    fn new(owner: PlayerSlot, kind: EffectKind, position: Vec2, duration: u32) -> Self {
        Self {
            id: 0,
            owner,
            kind,
            position,
            remaining: duration,
            duration,
        }
    }

    pub fn dash_ring(owner: PlayerSlot, position: Vec2, direction: Vec2) -> Self {
        Self::new(owner, EffectKind::DashRing { direction }, position, dash::RING_DURATION)
    }

    pub fn shield_aura(owner: PlayerSlot, position: Vec2) -> Self {
        Self::new(owner, EffectKind::ShieldAura, position, shield::DURATION)
    }

    pub fn hyper_flash(owner: PlayerSlot, position: Vec2) -> Self {
        Self::new(owner, EffectKind::HyperFlash, position, effect::HYPER_FLASH_DURATION)
    }

    /// Age one tick; attached effects snap to their owner's position
    pub fn update(&mut self, owner_position: Vec2) {
        self.remaining = self.remaining.saturating_sub(1);
        if !matches!(self.kind, EffectKind::DashRing { .. }) {
            self.position = owner_position;
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Elapsed fraction in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        1.0 - self.remaining as f32 / self.duration as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_ring_stays_put() {
        let mut ring = Effect::dash_ring(PlayerSlot::One, Vec2::new(10.0, 10.0), Vec2::RIGHT);
        ring.update(Vec2::new(50.0, 50.0));
        assert_eq!(ring.position, Vec2::new(10.0, 10.0));
        assert_eq!(ring.remaining, dash::RING_DURATION - 1);
    }

    #[test]
    fn test_aura_follows_owner_and_expires() {
        let mut aura = Effect::shield_aura(PlayerSlot::Two, Vec2::ZERO);
        for _ in 0..shield::DURATION {
            assert!(!aura.is_expired());
            aura.update(Vec2::new(5.0, 0.0));
        }
        assert!(aura.is_expired());
        assert_eq!(aura.position, Vec2::new(5.0, 0.0));
        assert_eq!(aura.progress(), 1.0);
    }
}
