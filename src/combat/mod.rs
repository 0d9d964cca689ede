//! Rage combat system
//!
//! Implements the timed area-of-effect rage buff:
//! - Attribute override sessions that survive simulation resets
//! - The rage controller state machine, countdown and cooldown
//! - Damage and shield modifiers for enraged combatants
//! - Status logging

use bevy::prelude::*;

pub mod attributes;
pub mod battle;
pub mod components;
pub mod controller;
pub mod events;
pub mod log;
pub mod modifiers;
pub mod session;
pub mod systems;

use crate::keybindings::Keybindings;
use crate::settings::RageSettings;
use components::GameRng;
use controller::RageController;
use events::*;
use systems::*;

/// System set containing every rage system, in frame order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RageSystems;

/// Plugin for the rage effect
///
/// Settings are resolved at build time: `None` substitutes zeroed settings
/// and records a status message.
pub struct RagePlugin {
    pub settings: Option<RageSettings>,
}

impl Plugin for RagePlugin {
    fn build(&self, app: &mut App) {
        let mut log = log::RageLog::default();
        let settings = RageSettings::resolve(self.settings.clone(), &mut log);

        app
            // Battle events
            .add_event::<RageRequested>()
            .add_event::<WieldedItemChanged>()
            .add_event::<MountStateChanged>()
            .add_event::<AttributesReset>()
            .add_event::<AgentHit>()
            .add_event::<ScoreHit>()
            .add_event::<RageYell>()
            // Resources
            .insert_resource(log)
            .insert_resource(Rage(RageController::new(settings)))
            .init_resource::<Keybindings>()
            .init_resource::<GameRng>()
            // Systems
            .add_systems(
                Update,
                (
                    update_rage_clock,
                    read_rage_input,
                    rebuild_driven_attributes,
                    route_attribute_resets,
                    handle_rage_requests,
                    apply_agent_hits,
                    apply_score_hits,
                    tick_rage,
                    count_rage_yells,
                )
                    .chain()
                    .in_set(RageSystems),
            );
    }
}
