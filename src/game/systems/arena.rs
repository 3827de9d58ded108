//! Circular arena geometry
//!
//! Containment, border-warning and clamping tests for the playfield. The only
//! mutable state is the cosmetic border pulse read by the renderer.

use serde::{Deserialize, Serialize};

use crate::game::constants::arena::*;
use crate::util::vec2::Vec2;

/// Errors building an arena
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArenaError {
    #[error("Arena radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("Warning margin {margin} must lie strictly between 0 and radius {radius}")]
    InvalidWarningMargin { margin: f32, radius: f32 },
}

/// The circular playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ArenaRepr")]
pub struct Arena {
    center: Vec2,
    radius: f32,
    warning_radius: f32,
    /// Border brightness (cosmetic)
    pub border_pulse: f32,
    pulse_rising: bool,
}

impl Arena {
    pub fn new(center: Vec2, radius: f32, warning_margin: f32) -> Result<Self, ArenaError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ArenaError::InvalidRadius(radius));
        }
        if !(warning_margin > 0.0 && warning_margin < radius) {
            return Err(ArenaError::InvalidWarningMargin {
                margin: warning_margin,
                radius,
            });
        }
        Ok(Self {
            center,
            radius,
            warning_radius: radius - warning_margin,
            border_pulse: PULSE_MAX,
            pulse_rising: false,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn warning_radius(&self) -> f32 {
        self.warning_radius
    }

    /// Distance of a point from the arena center
    #[inline]
    pub fn distance_from_center(&self, point: Vec2) -> f32 {
        point.distance_to(self.center)
    }

    /// Strictly inside the outer circle
    pub fn is_inside(&self, point: Vec2) -> bool {
        self.distance_from_center(point) < self.radius
    }

    /// Inside the warning band `[warning_radius, radius)`
    pub fn is_near_border(&self, point: Vec2) -> bool {
        let distance = self.distance_from_center(point);
        distance >= self.warning_radius && distance < self.radius
    }

    /// Pull a point at or beyond the outer circle back to `radius - 1` on the
    /// same bearing. Points already inside are returned unchanged.
    pub fn constrain_position(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        if offset.length() < self.radius {
            return point;
        }
        let bearing = offset.angle();
        self.center + Vec2::from_angle(bearing) * (self.radius - CLAMP_INSET)
    }

    /// Advance the border pulse one tick
    pub fn update(&mut self) {
        if self.pulse_rising {
            self.border_pulse += PULSE_STEP;
            if self.border_pulse >= PULSE_MAX {
                self.border_pulse = PULSE_MAX;
                self.pulse_rising = false;
            }
        } else {
            self.border_pulse -= PULSE_STEP;
            if self.border_pulse <= PULSE_MIN {
                self.border_pulse = PULSE_MIN;
                self.pulse_rising = true;
            }
        }
    }
}

/// Unchecked wire shape; deserialized arenas go through `Arena::new`
#[derive(Deserialize)]
struct ArenaRepr {
    center: Vec2,
    radius: f32,
    warning_radius: f32,
    border_pulse: f32,
    pulse_rising: bool,
}

impl TryFrom<ArenaRepr> for Arena {
    type Error = ArenaError;

    fn try_from(repr: ArenaRepr) -> Result<Self, Self::Error> {
        let mut arena = Arena::new(repr.center, repr.radius, repr.radius - repr.warning_radius)?;
        arena.border_pulse = repr.border_pulse.clamp(PULSE_MIN, PULSE_MAX);
        arena.pulse_rising = repr.pulse_rising;
        Ok(arena)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            center: Vec2::new(CENTER_X, CENTER_Y),
            radius: RADIUS,
            warning_radius: RADIUS - WARNING_MARGIN,
            border_pulse: PULSE_MAX,
            pulse_rising: false,
        }
    }
}
