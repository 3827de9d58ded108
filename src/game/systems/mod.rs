pub mod ai;
pub mod arena;
pub mod burst;
pub mod collision;
pub mod player;
#[cfg(feature = "predictive_ai")]
pub mod prediction;
pub mod projectile;
