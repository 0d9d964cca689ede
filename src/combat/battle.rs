//! Battle collaborator boundary
//!
//! The rage controller never owns combatants. Everything it needs from the
//! running simulation goes through [`Battle`], and everything it needs from
//! the campaign layer (influence, leadership) goes through [`Campaign`].
//! The ECS adapter in `systems` implements `Battle` over Bevy queries; tests
//! use an in-memory implementation.

use std::fmt::Debug;
use std::hash::Hash;

use bevy::math::Vec2;

use super::attributes::AttributeBundle;

/// Entity queries and accessors of the running battle
///
/// Accessors return `None` when the combatant no longer exists.
pub trait Battle {
    /// Handle used to refer to a combatant
    type Id: Copy + Eq + Hash + Debug;

    /// Whether the combatant exists and is alive
    fn is_active(&self, id: Self::Id) -> bool;

    /// Ground-plane position
    fn position(&self, id: Self::Id) -> Option<Vec2>;

    fn team(&self, id: Self::Id) -> Option<u8>;

    /// Living combatants of `team` within `radius` of `center`, the caller included
    fn nearby_allies(&self, center: Vec2, radius: f32, team: u8) -> Vec<Self::Id>;

    /// Live driven attributes
    fn attributes(&self, id: Self::Id) -> Option<&AttributeBundle>;

    fn attributes_mut(&mut self, id: Self::Id) -> Option<&mut AttributeBundle>;

    /// Push the live attributes back into the simulation
    fn update_driven_attributes(&mut self, id: Self::Id);

    fn morale(&self, id: Self::Id) -> Option<f32>;

    fn set_morale(&mut self, id: Self::Id, morale: f32);

    fn health(&self, id: Self::Id) -> Option<f32>;

    fn set_health(&mut self, id: Self::Id, health: f32);

    /// Durability of the wielded off-hand item, if one is equipped
    fn offhand_hit_points(&self, id: Self::Id) -> Option<i16>;

    fn set_offhand_hit_points(&mut self, id: Self::Id, hit_points: i16);

    /// Start delivering wielded-item and mount-state resets for `id`
    fn watch_attribute_resets(&mut self, id: Self::Id);

    fn unwatch_attribute_resets(&mut self, id: Self::Id);

    /// Trigger a battle cry
    fn yell(&mut self, id: Self::Id);

    /// Add `amount` to the combatant's morale
    fn add_morale(&mut self, id: Self::Id, amount: f32) {
        if let Some(morale) = self.morale(id) {
            self.set_morale(id, morale + amount);
        }
    }
}

/// Campaign-side party state. Absent in custom battles, where rage is free.
pub trait Campaign {
    /// Influence held by the party leader's clan
    fn influence(&self) -> f32;

    fn spend_influence(&mut self, amount: f32);

    /// Leadership skill of the party leader
    fn leadership(&self) -> f32;
}
