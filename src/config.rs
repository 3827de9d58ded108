use crate::game::constants::{game, sim};
use crate::game::state::MatchMode;
use crate::game::systems::ai::{AiController, AiPolicy};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Match duration must be at least one second")]
    ZeroDuration,
    #[error("Auto matches need an AI in both slots")]
    AutoNeedsAi,
}

/// How long a match runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDuration {
    Seconds(u64),
    /// Until someone is knocked out
    Knockout,
}

impl MatchDuration {
    /// Tick limit, `None` for knockout-only matches
    pub fn tick_limit(self) -> Option<u64> {
        match self {
            MatchDuration::Seconds(secs) => Some(secs * sim::TICK_RATE as u64),
            MatchDuration::Knockout => None,
        }
    }
}

/// Match configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub mode: MatchMode,
    pub duration: MatchDuration,
    /// Controller for each slot; `None` is a human slot, idle when headless
    pub ai: [Option<AiPolicy>; 2],
    /// Fixed seed for reproducible AI decisions
    pub ai_seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Auto,
            duration: MatchDuration::Seconds(game::STANDARD_MATCH_SECONDS),
            ai: [Some(AiPolicy::Predictive), Some(AiPolicy::Predictive)],
            ai_seed: None,
        }
    }
}

impl MatchConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("MATCH_MODE") {
            match parse_mode(&mode) {
                Some(parsed) => config.mode = parsed,
                None => tracing::warn!("Invalid MATCH_MODE '{}', using default", mode),
            }
        }

        if let Ok(duration) = std::env::var("MATCH_DURATION") {
            match parse_duration(&duration) {
                Some(parsed) => config.duration = parsed,
                None => tracing::warn!(
                    "MATCH_DURATION must be {}, {} or ko, got '{}'; using default",
                    game::SHORT_MATCH_SECONDS,
                    game::STANDARD_MATCH_SECONDS,
                    duration
                ),
            }
        }

        for (slot, var) in ["P1_AI", "P2_AI"].into_iter().enumerate() {
            if let Ok(value) = std::env::var(var) {
                match parse_ai(&value) {
                    Some(parsed) => config.ai[slot] = parsed,
                    None => tracing::warn!("Invalid {} '{}', using default", var, value),
                }
            }
        }

        if let Ok(seed) = std::env::var("AI_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.ai_seed = Some(parsed);
            } else {
                tracing::warn!("Invalid AI_SEED '{}', using random seed", seed);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration == MatchDuration::Seconds(0) {
            return Err(ConfigError::ZeroDuration);
        }
        if self.mode == MatchMode::Auto && self.ai.iter().any(Option::is_none) {
            return Err(ConfigError::AutoNeedsAi);
        }
        Ok(())
    }

    pub fn tick_limit(&self) -> Option<u64> {
        self.duration.tick_limit()
    }

    /// One controller per AI slot. With a fixed seed, P1 uses `seed` and P2
    /// `seed + 1`. Slots without an AI get `None`.
    pub fn build_controllers(&self) -> [Option<AiController>; 2] {
        [0u64, 1].map(|offset| {
            self.ai[offset as usize].map(|policy| match self.ai_seed {
                Some(seed) => AiController::with_seed(policy, seed.wrapping_add(offset)),
                None => AiController::new(policy),
            })
        })
    }
}

fn parse_mode(value: &str) -> Option<MatchMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "versus" => Some(MatchMode::Versus),
        "training" => Some(MatchMode::Training),
        "auto" => Some(MatchMode::Auto),
        _ => None,
    }
}

fn parse_duration(value: &str) -> Option<MatchDuration> {
    let value = value.trim().to_ascii_lowercase();
    if value == "ko" {
        return Some(MatchDuration::Knockout);
    }
    match value.parse::<u64>().ok()? {
        secs @ (game::SHORT_MATCH_SECONDS | game::STANDARD_MATCH_SECONDS) => Some(MatchDuration::Seconds(secs)),
        _ => None,
    }
}

/// `Some(None)` is an explicit "no AI"
fn parse_ai(value: &str) -> Option<Option<AiPolicy>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "predictive" => Some(Some(AiPolicy::Predictive)),
        "simple" => Some(Some(AiPolicy::Simple)),
        "none" => Some(None),
        _ => None,
    }
}
