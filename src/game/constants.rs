/// Simulation timing - fixed 60 Hz, all durations below are in ticks (frames)
pub mod sim {
    /// Simulation tick rate in Hz
    pub const TICK_RATE: u32 = 60;
    /// Delta time per tick in seconds (informational; the core steps in whole frames)
    pub const DT: f32 = 1.0 / 60.0;
}

/// Circular arena geometry
pub mod arena {
    /// Arena center in screen coordinates (1280x720 playfield)
    pub const CENTER_X: f32 = 640.0;
    pub const CENTER_Y: f32 = 360.0;
    /// Outer radius of the playable circle
    pub const RADIUS: f32 = 300.0;
    /// Width of the border-warning band inside the outer radius
    pub const WARNING_MARGIN: f32 = 20.0;
    /// Points outside the arena are pulled back to `RADIUS - CLAMP_INSET`
    pub const CLAMP_INSET: f32 = 1.0;

    // Border pulse (cosmetic only)
    pub const PULSE_MIN: f32 = 100.0;
    pub const PULSE_MAX: f32 = 255.0;
    pub const PULSE_STEP: f32 = 5.0;
}

/// Player body, motion and gauge limits
pub mod player {
    /// Collision radius
    pub const RADIUS: f32 = 15.0;
    /// Horizontal spawn offset from arena center (P1 left, P2 right)
    pub const SPAWN_OFFSET: f32 = 100.0;
    pub const MAX_HEALTH: f32 = 1000.0;
    /// Base movement speed per tick
    pub const SPEED: f32 = 5.0;
    /// Dash movement speed per tick
    pub const DASH_SPEED: f32 = 9.0;
    /// Hyper gauge a player starts (and resets) with
    pub const STARTING_HYPER: f32 = 0.0;
}

/// Heat gauge
pub mod heat {
    /// Hard ceiling; reaching it forces overheat and ends any dash
    pub const MAX: f32 = 300.0;
    /// A dash may only start below this heat
    pub const DASH_START_LIMIT: f32 = 200.0;
    /// Overheat clears only once heat has decayed to this value or lower
    pub const OVERHEAT_RECOVERY: f32 = 120.0;
    /// Decay per tick while not dashing
    pub const DECAY_PER_TICK: f32 = 1.0;
    /// Heat per tick when moving at full dash speed (scaled down for slower motion)
    pub const MOTION_MAX_PER_TICK: f32 = 4.0;
    /// One-off surcharge applied when a dash starts
    pub const DASH_START_SURCHARGE: f32 = 20.0;
    /// Heat added by every projectile fired
    pub const PER_SHOT: f32 = 10.0;
    /// Damage taken is scaled by `1 + heat / DAMAGE_SCALE`
    pub const DAMAGE_SCALE: f32 = 100.0;
}

/// Hyper gauge and hyper mode
pub mod hyper {
    pub const MAX: f32 = 300.0;
    /// Gauge consumed when hyper mode starts
    pub const ACTIVATION_COST: f32 = 50.0;
    /// Hyper mode length
    pub const DURATION: u32 = 180;
    /// Gauge drained per tick while hyper mode is active
    pub const DRAIN_PER_TICK: f32 = 1.0;
    /// Additional drain per tick while dashing inside the warning band
    pub const BORDER_DASH_DRAIN: f32 = 2.0;
    /// Damage multiplier for every shot fired while hyper mode is active
    pub const DAMAGE_MULTIPLIER: f32 = 2.0;
    /// Gauge gained by every projectile fired
    pub const PER_SHOT: f32 = 15.0;
    /// Fraction of damage taken that converts into gauge
    pub const DAMAGE_TAKEN_RATIO: f32 = 0.2;
    /// Minimum gauge for the gauge-gated actions (shield, special spread, AI hyper)
    pub const GATE: f32 = 100.0;
}

/// Dash
pub mod dash {
    /// Cooldown re-armed on every dashing tick
    pub const COOLDOWN: u32 = 5;
    /// Fraction of the way the dash direction turns toward the input each tick
    pub const TURN_RATE: f32 = 0.15;
    /// Ticks between trail rings while steering a dash
    pub const RING_INTERVAL: u32 = 4;
    /// Trail ring lifetime
    pub const RING_DURATION: u32 = 30;
}

/// Shield
pub mod shield {
    /// Active time, which also gates re-activation
    pub const DURATION: u32 = 50;
    /// Gauge consumed on activation
    pub const COST: f32 = 100.0;
}

/// Weapon stats: base damage and cooldown in ticks
pub mod weapon {
    /// Weapon A - beam rifle
    pub const BEAM_DAMAGE: f32 = 20.0;
    pub const BEAM_COOLDOWN: u32 = 30;

    /// Weapon B - ballistic burst
    pub const BALLISTIC_DAMAGE: f32 = 40.0;
    pub const BALLISTIC_COOLDOWN: u32 = 60;

    /// Special alone - melee strike
    pub const MELEE_DAMAGE: f32 = 60.0;
    pub const MELEE_COOLDOWN: u32 = 20;

    /// Weapon B + special - spread burst of beams
    pub const SPREAD_DAMAGE: f32 = 10.0;
    pub const SPREAD_COOLDOWN: u32 = 15;
    /// Gauge cost, twice the hyper activation cost
    pub const SPREAD_COST: f32 = 100.0;

    /// Hyper laser - first attack of a hyper window
    pub const HYPER_LASER_DAMAGE: f32 = 50.0;
    pub const HYPER_LASER_COOLDOWN: u32 = 40;
    pub const HYPER_LASER_RADIUS: f32 = 30.0;
    pub const HYPER_LASER_LENGTH: f32 = 200.0;
    /// Fraction of beam speed the laser travels at
    pub const HYPER_LASER_SPEED_FACTOR: f32 = 0.5;
    /// Extra gauge spent when the laser fires
    pub const HYPER_LASER_COST: f32 = 10.0;
}

/// Burst fire pattern shared by weapon B and the special spread
pub mod burst {
    use std::f32::consts::PI;

    /// Shots per burst
    pub const TOTAL: u8 = 5;
    /// Ticks between burst shots
    pub const DELAY: u8 = 5;
    /// Angular step between consecutive shots
    pub const SPREAD_STEP: f32 = PI / 8.0;
    /// Offset of the second lobe of the special spread
    pub const SECOND_LOBE_OFFSET: f32 = PI / 16.0;
    /// Burst projectiles travel at this fraction of their kind's speed
    pub const SPEED_FACTOR: f32 = 0.5;
    /// Burst projectiles live this many times longer than their kind's default
    pub const LIFETIME_FACTOR: i32 = 4;
    /// Ballistic burst shots deal this fraction of the weapon damage
    pub const BALLISTIC_DAMAGE_FACTOR: f32 = 0.5;
}

/// Per-kind projectile kinematics
pub mod projectile {
    pub const BEAM_SPEED: f32 = 15.0;
    pub const BEAM_RADIUS: f32 = 3.0;
    pub const BEAM_LENGTH: f32 = 20.0;
    pub const BEAM_HOMING: f32 = 0.02;
    pub const BEAM_HIT_REWARD: f32 = 3.0;

    pub const BALLISTIC_SPEED: f32 = 8.0;
    pub const BALLISTIC_RADIUS: f32 = 6.0;
    pub const BALLISTIC_HOMING: f32 = 0.03;
    pub const BALLISTIC_HIT_REWARD: f32 = 7.0;

    pub const MELEE_SPEED: f32 = 12.0;
    pub const MELEE_RADIUS: f32 = 15.0;
    pub const MELEE_LIFETIME: i32 = 10;
    /// Distance the melee hitbox sits in front of its owner
    pub const MELEE_REACH: f32 = 20.0;
    pub const MELEE_HIT_REWARD: f32 = 15.0;

    /// Lifetime for ranged kinds
    pub const DEFAULT_LIFETIME: i32 = 60;
}

/// Visual effect lifetimes
pub mod effect {
    pub const HYPER_FLASH_DURATION: u32 = 120;
}

/// AI controller tuning
pub mod ai {
    /// Ticks between movement-style resamples (one second)
    pub const MOVE_INTERVAL: u32 = 60;
    /// Near/far threshold for approach versus retreat
    pub const ENGAGE_DISTANCE: f32 = 150.0;
    /// Only threats that land within this many ticks are considered
    pub const THREAT_HORIZON: f32 = 60.0;
    /// Below this time-to-impact the AI may raise its shield
    pub const SHIELD_REACTION_TIME: f32 = 15.0;
    pub const EMERGENCY_SHIELD_CHANCE: f64 = 0.7;
    /// Beyond this fraction of the arena radius evasion bends toward center
    pub const CENTER_BIAS_FRACTION: f32 = 0.7;
    /// Radius that counts as "projectile nearby" for shield decisions
    pub const PROXIMITY_RADIUS: f32 = 70.0;

    pub const WEAPON_A_CHANCE: f64 = 0.4;
    pub const WEAPON_B_CHANCE: f64 = 0.3;
    pub const SPECIAL_CHANCE: f64 = 0.1;
    pub const SHIELD_CHANCE_NEAR: f64 = 0.7;
    pub const SHIELD_CHANCE_IDLE: f64 = 0.1;
    pub const HYPER_CHANCE: f64 = 0.3;
    pub const STYLE_DASH_CHANCE: f64 = 0.4;

    // Simple policy frame periods
    pub const SIMPLE_FAR_FIRE_PERIOD: u64 = 60;
    pub const SIMPLE_NEAR_FIRE_PERIOD: u64 = 30;
    pub const SIMPLE_BURST_PERIOD: u64 = 90;
    pub const SIMPLE_DASH_PERIOD: u64 = 120;
    pub const SIMPLE_HYPER_PERIOD: u64 = 180;
}

/// Match flow
pub mod game {
    /// Auto-battle duration options, in seconds
    pub const SHORT_MATCH_SECONDS: u64 = 5;
    pub const STANDARD_MATCH_SECONDS: u64 = 30;
}

/// Heat-scaled damage multiplier for a defender
#[inline]
pub fn heat_damage_multiplier(defender_heat: f32) -> f32 {
    1.0 + defender_heat / heat::DAMAGE_SCALE
}

/// Heat produced by one tick of motion covering `distance`
///
/// Zero at or below base speed, rising linearly to the per-tick cap at dash speed.
#[inline]
pub fn motion_heat(distance: f32) -> f32 {
    if distance <= player::SPEED {
        return 0.0;
    }
    let excess = (distance - player::SPEED) / (player::DASH_SPEED - player::SPEED);
    excess.min(1.0) * heat::MOTION_MAX_PER_TICK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_band_inside_arena() {
        assert!(arena::RADIUS - arena::WARNING_MARGIN < arena::RADIUS);
        assert!(arena::WARNING_MARGIN > 0.0);
    }

    #[test]
    fn test_heat_thresholds_ordered() {
        assert!(heat::OVERHEAT_RECOVERY < heat::DASH_START_LIMIT);
        assert!(heat::DASH_START_LIMIT < heat::MAX);
    }

    #[test]
    fn test_heat_damage_multiplier() {
        assert!((heat_damage_multiplier(0.0) - 1.0).abs() < 1e-6);
        assert!((heat_damage_multiplier(150.0) - 2.5).abs() < 1e-6);
        assert!((heat_damage_multiplier(heat::MAX) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_motion_heat_scaling() {
        assert_eq!(motion_heat(0.0), 0.0);
        assert_eq!(motion_heat(player::SPEED), 0.0);
        assert!((motion_heat(7.0) - 2.0).abs() < 1e-6);
        assert!((motion_heat(player::DASH_SPEED) - heat::MOTION_MAX_PER_TICK).abs() < 1e-6);
        // Capped even if displacement somehow exceeds dash speed
        assert!((motion_heat(50.0) - heat::MOTION_MAX_PER_TICK).abs() < 1e-6);
    }

    #[test]
    fn test_burst_fan_is_centered() {
        let half = (burst::TOTAL as f32 - 1.0) / 2.0;
        let first = (0.0 - half) * burst::SPREAD_STEP;
        let last = (burst::TOTAL as f32 - 1.0 - half) * burst::SPREAD_STEP;
        assert!((first + last).abs() < 1e-6);
    }

    #[test]
    fn test_hit_rewards_ordered() {
        assert!(projectile::BEAM_HIT_REWARD < projectile::BALLISTIC_HIT_REWARD);
        assert!(projectile::BALLISTIC_HIT_REWARD < projectile::MELEE_HIT_REWARD);
    }
}
