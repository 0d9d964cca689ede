//! Combat-event modifiers
//!
//! Secondary rage effects applied from hit callbacks. They only look up the
//! active sessions; they never create or end one.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::battle::Battle;
use super::controller::RageController;

/// Morale an enraged victim gains per hit taken
pub const VICTIM_MORALE_PER_HIT: f32 = 5.0;

/// Morale an enraged attacker gains per hit landed
pub const ATTACKER_MORALE_PER_HIT: f32 = 2.0;

/// Extra shield damage per point of hit damage from an enraged attacker
pub const SHIELD_DAMAGE_FACTOR: f32 = 4.0;

/// Body region struck by a scored hit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyPart {
    /// No specific body part: the hit landed on a shield
    None,
    Head,
    Neck,
    Chest,
    Abdomen,
    ShoulderLeft,
    ShoulderRight,
    ArmLeft,
    ArmRight,
    Legs,
}

impl<Id: Copy + Eq + std::hash::Hash + std::fmt::Debug> RageController<Id> {
    /// Damage callback, invoked after the battle already applied `damage`.
    ///
    /// An enraged victim gets half of the damage back and some morale; an
    /// enraged attacker only gains morale. Returns the damage that finally
    /// stuck to the victim.
    pub fn on_agent_hit<B>(&self, battle: &mut B, victim: Id, attacker: Option<Id>, damage: i32) -> i32
    where
        B: Battle<Id = Id>,
    {
        let mut effective = damage;

        if self.is_enraged(victim) {
            let refund = damage / 2;
            if let Some(health) = battle.health(victim) {
                battle.set_health(victim, health + refund as f32);
            }
            battle.add_morale(victim, VICTIM_MORALE_PER_HIT);
            effective -= refund;
        }

        if let Some(attacker) = attacker.filter(|&a| self.is_enraged(a)) {
            battle.add_morale(attacker, ATTACKER_MORALE_PER_HIT);
        }

        effective
    }

    /// Score callback. An enraged attacker hitting a shield wears the
    /// victim's off-hand item down by four times the hit damage.
    ///
    /// Returns the new off-hand durability when it changed.
    pub fn on_score_hit<B>(
        &self,
        battle: &mut B,
        victim: Id,
        attacker: Option<Id>,
        damage: f32,
        body_part: BodyPart,
    ) -> Option<i16>
    where
        B: Battle<Id = Id>,
    {
        if body_part != BodyPart::None {
            return None;
        }
        let attacker = attacker.filter(|&a| self.is_enraged(a))?;
        let hit_points = battle.offhand_hit_points(victim)?;

        let remaining = (hit_points as f32 - damage * SHIELD_DAMAGE_FACTOR)
            .clamp(0.0, i16::MAX as f32) as i16;
        battle.set_offhand_hit_points(victim, remaining);
        debug!(
            "Enraged {:?} hit the shield of {:?}: {} -> {}",
            attacker, victim, hit_points, remaining
        );
        Some(remaining)
    }
}
