//! Rage key bindings
//!
//! Rage is requested on the release edge of the activation key; holding the
//! modifier key at that moment selects super rage.

use bevy::prelude::*;
use std::collections::HashMap;

/// All actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RageAction {
    ActivateRage,
    SuperRageModifier,
}

impl RageAction {
    pub fn description(&self) -> &'static str {
        match self {
            RageAction::ActivateRage => "Activate Rage",
            RageAction::SuperRageModifier => "Super Rage (hold)",
        }
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource)]
pub struct Keybindings {
    bindings: HashMap<RageAction, KeyCode>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// `B` activates, `Left Alt` selects super rage
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(RageAction::ActivateRage, KeyCode::KeyB);
        bindings.insert(RageAction::SuperRageModifier, KeyCode::AltLeft);
        Self { bindings }
    }

    pub fn get(&self, action: RageAction) -> Option<KeyCode> {
        self.bindings.get(&action).copied()
    }

    /// Check if an action is currently held
    pub fn action_pressed(&self, action: RageAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|key| keyboard.pressed(key))
    }

    /// Check if an action was released this frame
    pub fn action_just_released(&self, action: RageAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|key| keyboard.just_released(key))
    }
}
