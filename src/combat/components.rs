//! Battle components and resources
//!
//! The ECS side of the battle: the state the rage systems read and write
//! through the `Battle` adapter.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::attributes::AttributeBundle;
use super::battle::Campaign;

/// Core combatant state
#[derive(Component, Debug, Clone)]
pub struct Combatant {
    /// Display name used in logs
    pub name: String,
    /// Team identifier (1 or 2)
    pub team: u8,
    pub current_health: f32,
    pub max_health: f32,
    pub morale: f32,
    pub mounted: bool,
    /// Whether attribute resets of this combatant are delivered to the rage controller
    pub resets_watched: bool,
    /// How many times driven attributes were pushed back into the simulation
    pub attribute_updates: u32,
    /// Battle cries so far
    pub yells: u32,
}

impl Combatant {
    pub fn new(name: impl Into<String>, team: u8, health: f32, morale: f32) -> Self {
        Self {
            name: name.into(),
            team,
            current_health: health,
            max_health: health,
            morale,
            mounted: false,
            resets_watched: false,
            attribute_updates: 0,
            yells: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }
}

/// Live driven attributes, rewritten by the simulation on equipment and mount changes
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct DrivenAttributes(pub AttributeBundle);

/// What the simulation rebuilds driven attributes from
#[derive(Component, Debug, Clone, Deref)]
pub struct BaseAttributes(pub AttributeBundle);

/// Wielded off-hand item (shield)
#[derive(Component, Debug, Clone, Copy)]
pub struct OffHandItem {
    pub hit_points: i16,
}

/// Marks the combatant whose key press activates rage
#[derive(Component, Debug, Clone, Copy)]
pub struct RageLeader;

/// Campaign party of the rage leader. Absent in custom battles.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CampaignParty {
    pub influence: f32,
    pub leadership: f32,
}

impl Campaign for CampaignParty {
    fn influence(&self) -> f32 {
        self.influence
    }

    fn spend_influence(&mut self, amount: f32) {
        self.influence -= amount;
    }

    fn leadership(&self) -> f32 {
        self.leadership
    }
}

/// Game-wide random number generator
///
/// Seed it for reproducible battle cries in headless runs.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
