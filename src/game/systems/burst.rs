//! Burst fire sequencing
//!
//! A burst is a fan of `burst::TOTAL` shots spaced `burst::DELAY` ticks apart.
//! The first shot leaves on the trigger tick.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::game::constants::burst::*;

/// What each burst shot spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstPattern {
    /// One ballistic round per shot
    Ballistic,
    /// Two beams per shot, the second offset by half a fan step
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BurstState {
    Idle,
    /// Triggered, first shot pending
    Charging { pattern: BurstPattern, base_angle: f32 },
    Firing {
        pattern: BurstPattern,
        base_angle: f32,
        fired: u8,
        timer: u8,
    },
}

/// One shot of a burst, ready for the player to spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstShot {
    pub pattern: BurstPattern,
    pub index: u8,
    pub base_angle: f32,
}

impl BurstShot {
    /// Fan offset of this shot, centered on the aim angle
    pub fn offset(&self) -> f32 {
        let center = (TOTAL as f32 - 1.0) / 2.0;
        (self.index as f32 - center) * SPREAD_STEP
    }

    /// Headings of the projectiles this shot spawns
    pub fn angles(&self) -> SmallVec<[f32; 2]> {
        let angle = self.base_angle + self.offset();
        match self.pattern {
            BurstPattern::Ballistic => smallvec![angle],
            BurstPattern::Spread => smallvec![angle, angle + SECOND_LOBE_OFFSET],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstFire {
    state: BurstState,
}

impl Default for BurstFire {
    fn default() -> Self {
        Self {
            state: BurstState::Idle,
        }
    }
}

impl BurstFire {
    pub fn state(&self) -> BurstState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, BurstState::Idle)
    }

    /// Arm a burst aimed at `base_angle`. Ignored unless idle.
    pub fn trigger(&mut self, pattern: BurstPattern, base_angle: f32) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = BurstState::Charging { pattern, base_angle };
        true
    }

    /// Step one tick, returning the shot due this tick if any
    pub fn advance(&mut self) -> Option<BurstShot> {
        match self.state {
            BurstState::Idle => None,
            BurstState::Charging { pattern, base_angle } => {
                self.state = if TOTAL > 1 {
                    BurstState::Firing {
                        pattern,
                        base_angle,
                        fired: 1,
                        timer: DELAY,
                    }
                } else {
                    BurstState::Idle
                };
                Some(BurstShot {
                    pattern,
                    index: 0,
                    base_angle,
                })
            }
            BurstState::Firing {
                pattern,
                base_angle,
                fired,
                timer,
            } => {
                let timer = timer.saturating_sub(1);
                if timer > 0 {
                    self.state = BurstState::Firing {
                        pattern,
                        base_angle,
                        fired,
                        timer,
                    };
                    return None;
                }
                let next = fired + 1;
                self.state = if next >= TOTAL {
                    BurstState::Idle
                } else {
                    BurstState::Firing {
                        pattern,
                        base_angle,
                        fired: next,
                        timer: DELAY,
                    }
                };
                Some(BurstShot {
                    pattern,
                    index: fired,
                    base_angle,
                })
            }
        }
    }

    /// Drop any remaining shots
    pub fn cancel(&mut self) {
        self.state = BurstState::Idle;
    }
}
