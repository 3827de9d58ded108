use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tofu_arena::config::MatchConfig;
use tofu_arena::game::intent::Intent;
use tofu_arena::game::match_result::{check_match_end, determine_result};
use tofu_arena::game::state::{GameState, MatchPhase, PlayerSlot};
use tofu_arena::game::systems::ai::Observation;
use tofu_arena::game::systems::arena::Arena;

/// Safety stop for knockout-only matches between two evasive AIs
const KNOCKOUT_TICK_CAP: u64 = 60 * 60 * 10;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Tofu Arena v{}", env!("CARGO_PKG_VERSION"));

    let config = MatchConfig::load_or_default();
    config.validate()?;
    info!(
        "Match: mode={:?}, duration={:?}, ai={:?}, seed={:?}",
        config.mode, config.duration, config.ai, config.ai_seed
    );

    let mut state = GameState::new(Arena::default(), config.mode);
    let mut controllers = config.build_controllers();
    for slot in PlayerSlot::BOTH {
        if controllers[slot.index()].is_none() {
            warn!("P{} has no AI and no keyboard here; it will stand idle", slot.number());
        }
    }
    let tick_limit = config.tick_limit().or(Some(KNOCKOUT_TICK_CAP));

    let reason = loop {
        if let Some(reason) = check_match_end(&state, tick_limit) {
            break reason;
        }

        let mut intents = [Intent::idle(); 2];
        for slot in PlayerSlot::BOTH {
            let i = slot.index();
            intents[i] = match controllers[i].as_mut() {
                Some(ai) => ai.decide(&Observation::from_state(&state, slot)),
                None => Intent::idle(),
            };
        }

        state.tick(intents);
    };

    state.phase = MatchPhase::Ended;
    let result = determine_result(&state, reason);
    info!(
        "Match over after {} ticks: {:?}, winner={:?}",
        result.ticks, result.reason, result.winner
    );
    info!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
