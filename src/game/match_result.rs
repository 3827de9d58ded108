//! Match end detection and result summary

use serde::{Deserialize, Serialize};

use crate::game::state::{GameState, MatchMode, MatchPhase, PlayerSlot};
use crate::game::systems::player::Player;

/// Reason why match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEndReason {
    /// One player's health reached zero
    Knockout { winner: PlayerSlot },
    /// Both players went down on the same tick
    DoubleKnockout,
    /// Tick limit reached
    TimeLimit,
}

/// Final numbers for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub slot: PlayerSlot,
    pub health: f32,
    pub heat: f32,
    pub hyper_gauge: f32,
    pub shots_fired: u32,
    pub hits_landed: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
}

/// Match result information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<PlayerSlot>,
    pub reason: MatchEndReason,
    pub mode: MatchMode,
    pub ticks: u64,
    pub players: [PlayerSummary; 2],
}

/// Check if match should end.
///
/// Training matches ignore knockouts since health refills. `tick_limit` of
/// `None` plays until knockout.
pub fn check_match_end(state: &GameState, tick_limit: Option<u64>) -> Option<MatchEndReason> {
    if state.phase != MatchPhase::Playing {
        return None;
    }

    if state.mode != MatchMode::Training {
        let [one, two] = &state.players;
        match (one.is_alive(), two.is_alive()) {
            (false, false) => return Some(MatchEndReason::DoubleKnockout),
            (false, true) => return Some(MatchEndReason::Knockout { winner: PlayerSlot::Two }),
            (true, false) => return Some(MatchEndReason::Knockout { winner: PlayerSlot::One }),
            (true, true) => {}
        }
    }

    match tick_limit {
        Some(limit) if state.tick >= limit => Some(MatchEndReason::TimeLimit),
        _ => None,
    }
}

/// Determine match result from game state.
///
/// On time out the healthier player wins; equal health is a draw.
pub fn determine_result(state: &GameState, reason: MatchEndReason) -> MatchResult {
    let winner = match reason {
        MatchEndReason::Knockout { winner } => Some(winner),
        MatchEndReason::DoubleKnockout => None,
        MatchEndReason::TimeLimit => {
            let [one, two] = &state.players;
            match one.health.partial_cmp(&two.health) {
                Some(std::cmp::Ordering::Greater) => Some(PlayerSlot::One),
                Some(std::cmp::Ordering::Less) => Some(PlayerSlot::Two),
                _ => None,
            }
        }
    };

    MatchResult {
        winner,
        reason,
        mode: state.mode,
        ticks: state.tick,
        players: [summarize(&state.players[0]), summarize(&state.players[1])],
    }
}

fn summarize(player: &Player) -> PlayerSummary {
    PlayerSummary {
        slot: player.slot,
        health: player.health,
        heat: player.heat,
        hyper_gauge: player.hyper_gauge,
        shots_fired: player.stats.shots_fired,
        hits_landed: player.stats.hits_landed,
        damage_dealt: player.stats.damage_dealt,
        damage_taken: player.stats.damage_taken,
    }
}
