//! Keyboard bindings
//!
//! Maps key names to actions for one player. A match owns one `KeyBindings`
//! per human player and turns the set of held keys into an `Intent` each tick.
//! The simulation never sees key names.

use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::game::intent::Intent;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("Unknown action '{0}'")]
    UnknownAction(String),
    #[error("Key '{0}' is empty")]
    EmptyKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    WeaponA,
    WeaponB,
    Hyper,
    Dash,
    Special,
    Shield,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::WeaponA,
        Action::WeaponB,
        Action::Hyper,
        Action::Dash,
        Action::Special,
        Action::Shield,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::WeaponA => "weapon_a",
            Action::WeaponB => "weapon_b",
            Action::Hyper => "hyper",
            Action::Dash => "dash",
            Action::Special => "special",
            Action::Shield => "shield",
        }
    }

    /// Raise this action's flag on `intent`
    pub fn apply(self, intent: &mut Intent) {
        let flag = match self {
            Action::Up => &mut intent.up,
            Action::Down => &mut intent.down,
            Action::Left => &mut intent.left,
            Action::Right => &mut intent.right,
            Action::WeaponA => &mut intent.weapon_a,
            Action::WeaponB => &mut intent.weapon_b,
            Action::Hyper => &mut intent.hyper,
            Action::Dash => &mut intent.dash,
            Action::Special => &mut intent.special,
            Action::Shield => &mut intent.shield,
        };
        *flag = true;
    }
}

impl FromStr for Action {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| BindingError::UnknownAction(s.to_string()))
    }
}

/// Key name to action table for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: HashMap<String, Action>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrow keys plus the Z-row cluster
    pub fn player_one() -> Self {
        Self::from_pairs(&[
            ("Up", Action::Up),
            ("Down", Action::Down),
            ("Left", Action::Left),
            ("Right", Action::Right),
            ("Z", Action::WeaponA),
            ("X", Action::WeaponB),
            ("C", Action::Hyper),
            ("LShift", Action::Dash),
            ("V", Action::Special),
            ("B", Action::Shield),
        ])
    }

    /// WASD plus the number-row cluster
    pub fn player_two() -> Self {
        Self::from_pairs(&[
            ("W", Action::Up),
            ("S", Action::Down),
            ("A", Action::Left),
            ("D", Action::Right),
            ("1", Action::WeaponA),
            ("2", Action::WeaponB),
            ("3", Action::Hyper),
            ("Space", Action::Dash),
            ("4", Action::Special),
            ("5", Action::Shield),
        ])
    }

    fn from_pairs(pairs: &[(&str, Action)]) -> Self {
        let keys = pairs.iter().map(|(k, a)| (k.to_string(), *a)).collect();
        Self { keys }
    }

    /// Bind `key` to `action`, replacing whatever it was bound to
    pub fn bind(&mut self, key: &str, action: Action) -> Result<Option<Action>, BindingError> {
        if key.trim().is_empty() {
            return Err(BindingError::EmptyKey(key.to_string()));
        }
        Ok(self.keys.insert(key.to_string(), action))
    }

    /// Bind from an action name such as `"weapon_a"`
    pub fn bind_named(&mut self, key: &str, action: &str) -> Result<Option<Action>, BindingError> {
        let action = action.parse()?;
        self.bind(key, action)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.keys.remove(key)
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }

    /// Every key bound to `action`, sorted
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .keys
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Build this tick's intent from the keys currently held. Unbound keys
    /// are ignored.
    pub fn intent_from_keys<'a, I>(&self, pressed: I) -> Intent
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut intent = Intent::idle();
        for action in pressed.into_iter().filter_map(|k| self.action_for(k)) {
            action.apply(&mut intent);
        }
        intent
    }
}

/// Bindings for both sides of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBindings {
    pub player_one: KeyBindings,
    pub player_two: KeyBindings,
}

impl Default for MatchBindings {
    fn default() -> Self {
        Self {
            player_one: KeyBindings::player_one(),
            player_two: KeyBindings::player_two(),
        }
    }
}
