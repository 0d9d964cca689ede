//! Battle events
//!
//! Engine callbacks delivered to the rage systems as Bevy events.

use bevy::prelude::*;

use super::modifiers::BodyPart;

/// Activation request from the input surface or a script
#[derive(Event, Debug, Clone, Copy)]
pub struct RageRequested {
    /// Whether the super-mode modifier was held at the time of the request
    pub super_rage: bool,
}

/// A combatant switched its wielded item
#[derive(Event, Debug, Clone, Copy)]
pub struct WieldedItemChanged {
    pub combatant: Entity,
}

/// A combatant mounted or dismounted
#[derive(Event, Debug, Clone, Copy)]
pub struct MountStateChanged {
    pub combatant: Entity,
    pub mounted: bool,
}

/// Why the battle rebuilt a combatant's driven attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    WieldedItemChange,
    MountStateChange,
}

/// The battle rebuilt a watched combatant's driven attributes
#[derive(Event, Debug, Clone, Copy)]
pub struct AttributesReset {
    pub combatant: Entity,
    pub cause: ResetCause,
}

/// A hit dealt damage
#[derive(Event, Debug, Clone, Copy)]
pub struct AgentHit {
    /// Entity dealing the damage (None for environmental damage)
    pub attacker: Option<Entity>,
    /// Entity receiving the damage
    pub victim: Entity,
    pub damage: i32,
}

/// A hit was scored against a body region
#[derive(Event, Debug, Clone, Copy)]
pub struct ScoreHit {
    pub attacker: Option<Entity>,
    pub victim: Entity,
    pub damage: f32,
    pub body_part: BodyPart,
}

/// A combatant let out a battle cry
#[derive(Event, Debug, Clone, Copy)]
pub struct RageYell {
    pub combatant: Entity,
}
