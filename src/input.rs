//! Key name to action mapping
//!
//! Hosts forward raw keydown names (`"ArrowLeft"`, `"z"`, `" "`, ...) and get
//! back gameplay actions. Phase gating happens in the simulation, not here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::CoilRange;

/// High-level gameplay commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Cast(CoilRange),
    Ultimate,
    Pause,
    /// Start from the title screen, or restart after game over
    Start,
}

/// Key bindings, keyed by lowercase key name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, Action>",
    into = "HashMap<String, Action>"
)]
pub struct KeyBindings {
    bindings: HashMap<String, Action>,
}

impl From<HashMap<String, Action>> for KeyBindings {
    fn from(raw: HashMap<String, Action>) -> Self {
        Self {
            bindings: raw
                .into_iter()
                .map(|(key, action)| (normalize_key(&key), action))
                .collect(),
        }
    }
}

impl From<KeyBindings> for HashMap<String, Action> {
    fn from(keys: KeyBindings) -> Self {
        keys.bindings
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        bindings.bind("ArrowLeft", Action::MoveLeft);
        bindings.bind("ArrowRight", Action::MoveRight);
        bindings.bind("ArrowUp", Action::Jump);
        bindings.bind("z", Action::Cast(CoilRange::Close));
        bindings.bind("x", Action::Cast(CoilRange::Medium));
        bindings.bind("c", Action::Cast(CoilRange::Far));
        bindings.bind(" ", Action::Ultimate);
        bindings.bind("p", Action::Pause);
        bindings.bind("Enter", Action::Start);
        bindings
    }
}

impl KeyBindings {
    /// Bind `key` to `action`, replacing any previous binding for that key
    pub fn bind(&mut self, key: &str, action: Action) {
        self.bindings.insert(normalize_key(key), action);
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.bindings.remove(&normalize_key(key))
    }

    /// Action for a keydown, if the key is bound. Letter keys match either case.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(&normalize_key(key)).copied()
    }

    /// Keys currently bound to `action`
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|&(_, a)| *a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

fn normalize_key(key: &str) -> String {
    // Named keys ("ArrowLeft", "Enter") are matched case-insensitively too
    key.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_cover_every_action() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(keys.action_for("ArrowUp"), Some(Action::Jump));
        assert_eq!(keys.action_for(" "), Some(Action::Ultimate));
        assert_eq!(keys.action_for("Enter"), Some(Action::Start));
        assert_eq!(keys.action_for("q"), None);
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("Z"), Some(Action::Cast(CoilRange::Close)));
        assert_eq!(keys.action_for("x"), Some(Action::Cast(CoilRange::Medium)));
        assert_eq!(keys.action_for("P"), Some(Action::Pause));
    }

    #[test]
    fn test_rebinding_replaces_key() {
        let mut keys = KeyBindings::default();
        keys.bind("z", Action::Jump);
        assert_eq!(keys.action_for("z"), Some(Action::Jump));
        assert_eq!(keys.keys_for(Action::Jump), vec!["arrowup", "z"]);
        assert_eq!(keys.unbind("Z"), Some(Action::Jump));
        assert_eq!(keys.action_for("z"), None);
    }

    #[test]
    fn test_loaded_bindings_are_normalized() {
        let keys: KeyBindings = serde_json::from_str(r#"{ "ArrowDown": "Jump" }"#).unwrap();
        assert_eq!(keys.action_for("arrowdown"), Some(Action::Jump));
        assert_eq!(keys.action_for("ArrowDown"), Some(Action::Jump));
    }
}
