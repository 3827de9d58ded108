//! Game state definitions and the per-tick orchestrator
//!
//! Owns the arena, both combatants, every live projectile and effect. One call
//! to `GameState::tick` advances the whole simulation by one frame.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::effects::Effect;
use crate::game::intent::Intent;
use crate::game::systems::arena::Arena;
use crate::game::systems::collision::{self, CollisionEvent};
use crate::game::systems::player::Player;
use crate::game::systems::projectile::Projectile;

/// Entity identifier for projectiles and effects
pub type EntityId = u64;

/// Which side a combatant plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// One-based player number for display
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// How the match is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Two players, knockouts end the match
    Versus,
    /// Health refills at zero; only the clock ends the match
    Training,
    /// Both sides AI-driven
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Playing,
    Ended,
}

/// What happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub collisions: Vec<CollisionEvent>,
    pub projectiles_spawned: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tick: u64,
    pub mode: MatchMode,
    pub phase: MatchPhase,
    pub arena: Arena,
    pub players: [Player; 2],
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<Effect>,
    next_entity_id: EntityId,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Arena::default(), MatchMode::default())
    }
}

impl GameState {
    pub fn new(arena: Arena, mode: MatchMode) -> Self {
        let players = PlayerSlot::BOTH.map(|slot| Player::new(slot, Player::spawn_point(slot, &arena)));
        Self {
            tick: 0,
            mode,
            phase: MatchPhase::Playing,
            arena,
            players,
            projectiles: Vec::with_capacity(64),
            effects: Vec::with_capacity(16),
            next_entity_id: 1,
        }
    }

    /// Generate a new unique entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    #[inline]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot.index()]
    }

    /// Insert a projectile, assigning its id
    pub fn add_projectile(&mut self, mut projectile: Projectile) -> EntityId {
        let id = self.next_entity_id();
        projectile.id = id;
        self.projectiles.push(projectile);
        id
    }

    pub fn add_effect(&mut self, mut effect: Effect) -> EntityId {
        let id = self.next_entity_id();
        effect.id = id;
        self.effects.push(effect);
        id
    }

    /// Advance one frame.
    ///
    /// Players update in slot order, so player two reacts to player one's
    /// position from this tick. Projectiles spawned this tick move and may hit
    /// on the same tick.
    pub fn tick(&mut self, intents: [Intent; 2]) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == MatchPhase::Ended {
            return report;
        }
        self.tick += 1;
        self.arena.update();

        for slot in PlayerSlot::BOTH {
            let [one, two] = &mut self.players;
            let (me, opponent) = match slot {
                PlayerSlot::One => (one, &*two),
                PlayerSlot::Two => (two, &*one),
            };
            let spawns = me.update(&intents[slot.index()], &self.arena, opponent);

            report.projectiles_spawned += spawns.projectiles.len();
            for projectile in spawns.projectiles {
                self.add_projectile(projectile);
            }
            for effect in spawns.effects {
                self.add_effect(effect);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.update(&self.arena, &self.players);
        }
        self.projectiles.retain(|p| !p.expired);

        for effect in &mut self.effects {
            effect.update(self.players[effect.owner.index()].position);
        }
        self.effects.retain(|e| !e.is_expired());

        report.collisions = collision::resolve(&mut self.players, &mut self.projectiles);

        if self.mode == MatchMode::Training {
            for player in &mut self.players {
                if !player.is_alive() {
                    debug!(slot = ?player.slot, "Training refill");
                    player.health = crate::game::constants::player::MAX_HEALTH;
                }
            }
        }

        report
    }

    /// Put both players back on their spawns and clear the field
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.projectiles.clear();
        self.effects.clear();
        self.tick = 0;
        self.phase = MatchPhase::Playing;
        info!(mode = ?self.mode, "Round reset");
    }
}
