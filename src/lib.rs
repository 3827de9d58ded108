//! Tofu Arena
//!
//! Combat core for a two-player arena shooter: a fixed-step simulation of
//! movement, heat, hyper gauge, shields, weapons and projectiles, plus the AI
//! opponents that drive it.
//!
//! # Features
//!
//! - `predictive_ai` - Threat-predicting AI policy (enabled by default). Without
//!   it the predictive policy falls back to the simple rule table.

pub mod config;
pub mod game;
pub mod input;
pub mod util;
