//! Driven attribute bundle
//!
//! The bundle mirrors the battle engine's "driven properties" record: every
//! numeric field that governs how a combatant moves, fights and aims. The
//! engine owns the field set, so the list below is maintained by hand and
//! `AttributeField::ALL` must be extended together with the struct.

use serde::{Deserialize, Serialize};

/// Snapshot of every driven attribute of a single combatant
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeBundle {
    // === Movement ===
    pub max_speed_multiplier: f32,
    pub combat_max_speed_multiplier: f32,
    pub top_speed_reach_duration: f32,
    pub mount_speed: f32,
    pub mount_maneuver: f32,
    pub mount_charge_damage: f32,
    pub mount_dash_accelerator_multiplier: f32,

    // === Melee ===
    pub swing_speed_multiplier: f32,
    pub handling_multiplier: f32,
    pub thrust_or_ranged_ready_speed_multiplier: f32,
    pub shield_bash_stun_duration_multiplier: f32,
    pub kick_stun_duration_multiplier: f32,
    pub attribute_shield_missile_collision_body_size_adder: f32,

    // === Ranged ===
    pub bipedal_ranged_ready_speed_multiplier: f32,
    pub bipedal_ranged_reload_speed_multiplier: f32,
    pub reload_speed: f32,
    pub reload_movement_penalty_factor: f32,
    pub weapon_best_accuracy_wait_time: f32,
    pub weapon_max_movement_accuracy_penalty: f32,
    pub weapon_max_unsteady_accuracy_penalty: f32,
    pub weapon_inaccuracy: f32,
    pub longest_ranged_weapon_inaccuracy: f32,
    pub weapon_rotational_accuracy_penalty_in_radians: f32,

    // === Character attributes ===
    pub attribute_courage: f32,
    pub attribute_riding: f32,
    pub attribute_horse_archery: f32,
    pub attribute_shield: f32,

    // === Armor ===
    pub armor_head: f32,
    pub armor_torso: f32,
    pub armor_legs: f32,
    pub armor_arms: f32,

    // === AI ===
    pub ai_shoot_freq: f32,
    pub ai_wait_before_shoot_factor: f32,
    pub ai_ranged_error: f32,
}

impl Default for AttributeBundle {
    /// A plain infantryman with no equipment bonuses
    fn default() -> Self {
        Self {
            max_speed_multiplier: 1.0,
            combat_max_speed_multiplier: 0.9,
            top_speed_reach_duration: 2.5,
            mount_speed: 0.0,
            mount_maneuver: 0.0,
            mount_charge_damage: 0.0,
            mount_dash_accelerator_multiplier: 1.0,

            swing_speed_multiplier: 1.0,
            handling_multiplier: 1.0,
            thrust_or_ranged_ready_speed_multiplier: 1.0,
            shield_bash_stun_duration_multiplier: 1.0,
            kick_stun_duration_multiplier: 1.0,
            attribute_shield_missile_collision_body_size_adder: 0.3,

            bipedal_ranged_ready_speed_multiplier: 1.0,
            bipedal_ranged_reload_speed_multiplier: 1.0,
            reload_speed: 1.0,
            reload_movement_penalty_factor: 1.0,
            weapon_best_accuracy_wait_time: 1.5,
            weapon_max_movement_accuracy_penalty: 0.2,
            weapon_max_unsteady_accuracy_penalty: 0.3,
            weapon_inaccuracy: 0.05,
            longest_ranged_weapon_inaccuracy: 0.05,
            weapon_rotational_accuracy_penalty_in_radians: 0.1,

            attribute_courage: 1.0,
            attribute_riding: 0.5,
            attribute_horse_archery: 0.5,
            attribute_shield: 0.5,

            armor_head: 10.0,
            armor_torso: 20.0,
            armor_legs: 8.0,
            armor_arms: 5.0,

            ai_shoot_freq: 0.5,
            ai_wait_before_shoot_factor: 0.6,
            ai_ranged_error: 0.2,
        }
    }
}

/// Name of a single field of [`AttributeBundle`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeField {
    MaxSpeedMultiplier,
    CombatMaxSpeedMultiplier,
    TopSpeedReachDuration,
    MountSpeed,
    MountManeuver,
    MountChargeDamage,
    MountDashAcceleratorMultiplier,
    SwingSpeedMultiplier,
    HandlingMultiplier,
    ThrustOrRangedReadySpeedMultiplier,
    ShieldBashStunDurationMultiplier,
    KickStunDurationMultiplier,
    AttributeShieldMissileCollisionBodySizeAdder,
    BipedalRangedReadySpeedMultiplier,
    BipedalRangedReloadSpeedMultiplier,
    ReloadSpeed,
    ReloadMovementPenaltyFactor,
    WeaponBestAccuracyWaitTime,
    WeaponMaxMovementAccuracyPenalty,
    WeaponMaxUnsteadyAccuracyPenalty,
    WeaponInaccuracy,
    LongestRangedWeaponInaccuracy,
    WeaponRotationalAccuracyPenaltyInRadians,
    AttributeCourage,
    AttributeRiding,
    AttributeHorseArchery,
    AttributeShield,
    ArmorHead,
    ArmorTorso,
    ArmorLegs,
    ArmorArms,
    AiShootFreq,
    AiWaitBeforeShootFactor,
    AiRangedError,
}

impl AttributeField {
    /// Every field, in declaration order
    pub const ALL: [AttributeField; 34] = [
        AttributeField::MaxSpeedMultiplier,
        AttributeField::CombatMaxSpeedMultiplier,
        AttributeField::TopSpeedReachDuration,
        AttributeField::MountSpeed,
        AttributeField::MountManeuver,
        AttributeField::MountChargeDamage,
        AttributeField::MountDashAcceleratorMultiplier,
        AttributeField::SwingSpeedMultiplier,
        AttributeField::HandlingMultiplier,
        AttributeField::ThrustOrRangedReadySpeedMultiplier,
        AttributeField::ShieldBashStunDurationMultiplier,
        AttributeField::KickStunDurationMultiplier,
        AttributeField::AttributeShieldMissileCollisionBodySizeAdder,
        AttributeField::BipedalRangedReadySpeedMultiplier,
        AttributeField::BipedalRangedReloadSpeedMultiplier,
        AttributeField::ReloadSpeed,
        AttributeField::ReloadMovementPenaltyFactor,
        AttributeField::WeaponBestAccuracyWaitTime,
        AttributeField::WeaponMaxMovementAccuracyPenalty,
        AttributeField::WeaponMaxUnsteadyAccuracyPenalty,
        AttributeField::WeaponInaccuracy,
        AttributeField::LongestRangedWeaponInaccuracy,
        AttributeField::WeaponRotationalAccuracyPenaltyInRadians,
        AttributeField::AttributeCourage,
        AttributeField::AttributeRiding,
        AttributeField::AttributeHorseArchery,
        AttributeField::AttributeShield,
        AttributeField::ArmorHead,
        AttributeField::ArmorTorso,
        AttributeField::ArmorLegs,
        AttributeField::ArmorArms,
        AttributeField::AiShootFreq,
        AttributeField::AiWaitBeforeShootFactor,
        AttributeField::AiRangedError,
    ];
}

impl AttributeBundle {
    /// Read a field by name
    pub fn get(&self, field: AttributeField) -> f32 {
        *self.field_ref(field)
    }

    /// Write a field by name
    pub fn set(&mut self, field: AttributeField, value: f32) {
        *self.field_mut(field) = value;
    }

    /// Iterate over every `(field, value)` pair
    pub fn fields(&self) -> impl Iterator<Item = (AttributeField, f32)> + '_ {
        AttributeField::ALL.iter().map(move |&field| (field, self.get(field)))
    }

    /// Fields whose values differ between `self` and `other`
    pub fn diff(&self, other: &AttributeBundle) -> Vec<AttributeField> {
        AttributeField::ALL
            .iter()
            .copied()
            .filter(|&field| self.get(field) != other.get(field))
            .collect()
    }

    /// Apply a table of changes in order
    pub fn apply_changes(&mut self, changes: &[(AttributeField, AttributeChange)]) {
        for &(field, change) in changes {
            let current = self.get(field);
            self.set(field, change.apply(current));
        }
    }

    fn field_ref(&self, field: AttributeField) -> &f32 {
        match field {
            AttributeField::MaxSpeedMultiplier => &self.max_speed_multiplier,
            AttributeField::CombatMaxSpeedMultiplier => &self.combat_max_speed_multiplier,
            AttributeField::TopSpeedReachDuration => &self.top_speed_reach_duration,
            AttributeField::MountSpeed => &self.mount_speed,
            AttributeField::MountManeuver => &self.mount_maneuver,
            AttributeField::MountChargeDamage => &self.mount_charge_damage,
            AttributeField::MountDashAcceleratorMultiplier => &self.mount_dash_accelerator_multiplier,
            AttributeField::SwingSpeedMultiplier => &self.swing_speed_multiplier,
            AttributeField::HandlingMultiplier => &self.handling_multiplier,
            AttributeField::ThrustOrRangedReadySpeedMultiplier => {
                &self.thrust_or_ranged_ready_speed_multiplier
            }
            AttributeField::ShieldBashStunDurationMultiplier => {
                &self.shield_bash_stun_duration_multiplier
            }
            AttributeField::KickStunDurationMultiplier => &self.kick_stun_duration_multiplier,
            AttributeField::AttributeShieldMissileCollisionBodySizeAdder => {
                &self.attribute_shield_missile_collision_body_size_adder
            }
            AttributeField::BipedalRangedReadySpeedMultiplier => {
                &self.bipedal_ranged_ready_speed_multiplier
            }
            AttributeField::BipedalRangedReloadSpeedMultiplier => {
                &self.bipedal_ranged_reload_speed_multiplier
            }
            AttributeField::ReloadSpeed => &self.reload_speed,
            AttributeField::ReloadMovementPenaltyFactor => &self.reload_movement_penalty_factor,
            AttributeField::WeaponBestAccuracyWaitTime => &self.weapon_best_accuracy_wait_time,
            AttributeField::WeaponMaxMovementAccuracyPenalty => {
                &self.weapon_max_movement_accuracy_penalty
            }
            AttributeField::WeaponMaxUnsteadyAccuracyPenalty => {
                &self.weapon_max_unsteady_accuracy_penalty
            }
            AttributeField::WeaponInaccuracy => &self.weapon_inaccuracy,
            AttributeField::LongestRangedWeaponInaccuracy => &self.longest_ranged_weapon_inaccuracy,
            AttributeField::WeaponRotationalAccuracyPenaltyInRadians => {
                &self.weapon_rotational_accuracy_penalty_in_radians
            }
            AttributeField::AttributeCourage => &self.attribute_courage,
            AttributeField::AttributeRiding => &self.attribute_riding,
            AttributeField::AttributeHorseArchery => &self.attribute_horse_archery,
            AttributeField::AttributeShield => &self.attribute_shield,
            AttributeField::ArmorHead => &self.armor_head,
            AttributeField::ArmorTorso => &self.armor_torso,
            AttributeField::ArmorLegs => &self.armor_legs,
            AttributeField::ArmorArms => &self.armor_arms,
            AttributeField::AiShootFreq => &self.ai_shoot_freq,
            AttributeField::AiWaitBeforeShootFactor => &self.ai_wait_before_shoot_factor,
            AttributeField::AiRangedError => &self.ai_ranged_error,
        }
    }

    fn field_mut(&mut self, field: AttributeField) -> &mut f32 {
        match field {
            AttributeField::MaxSpeedMultiplier => &mut self.max_speed_multiplier,
            AttributeField::CombatMaxSpeedMultiplier => &mut self.combat_max_speed_multiplier,
            AttributeField::TopSpeedReachDuration => &mut self.top_speed_reach_duration,
            AttributeField::MountSpeed => &mut self.mount_speed,
            AttributeField::MountManeuver => &mut self.mount_maneuver,
            AttributeField::MountChargeDamage => &mut self.mount_charge_damage,
            AttributeField::MountDashAcceleratorMultiplier => {
                &mut self.mount_dash_accelerator_multiplier
            }
            AttributeField::SwingSpeedMultiplier => &mut self.swing_speed_multiplier,
            AttributeField::HandlingMultiplier => &mut self.handling_multiplier,
            AttributeField::ThrustOrRangedReadySpeedMultiplier => {
                &mut self.thrust_or_ranged_ready_speed_multiplier
            }
            AttributeField::ShieldBashStunDurationMultiplier => {
                &mut self.shield_bash_stun_duration_multiplier
            }
            AttributeField::KickStunDurationMultiplier => &mut self.kick_stun_duration_multiplier,
            AttributeField::AttributeShieldMissileCollisionBodySizeAdder => {
                &mut self.attribute_shield_missile_collision_body_size_adder
            }
            AttributeField::BipedalRangedReadySpeedMultiplier => {
                &mut self.bipedal_ranged_ready_speed_multiplier
            }
            AttributeField::BipedalRangedReloadSpeedMultiplier => {
                &mut self.bipedal_ranged_reload_speed_multiplier
            }
            AttributeField::ReloadSpeed => &mut self.reload_speed,
            AttributeField::ReloadMovementPenaltyFactor => &mut self.reload_movement_penalty_factor,
            AttributeField::WeaponBestAccuracyWaitTime => &mut self.weapon_best_accuracy_wait_time,
            AttributeField::WeaponMaxMovementAccuracyPenalty => {
                &mut self.weapon_max_movement_accuracy_penalty
            }
            AttributeField::WeaponMaxUnsteadyAccuracyPenalty => {
                &mut self.weapon_max_unsteady_accuracy_penalty
            }
            AttributeField::WeaponInaccuracy => &mut self.weapon_inaccuracy,
            AttributeField::LongestRangedWeaponInaccuracy => {
                &mut self.longest_ranged_weapon_inaccuracy
            }
            AttributeField::WeaponRotationalAccuracyPenaltyInRadians => {
                &mut self.weapon_rotational_accuracy_penalty_in_radians
            }
            AttributeField::AttributeCourage => &mut self.attribute_courage,
            AttributeField::AttributeRiding => &mut self.attribute_riding,
            AttributeField::AttributeHorseArchery => &mut self.attribute_horse_archery,
            AttributeField::AttributeShield => &mut self.attribute_shield,
            AttributeField::ArmorHead => &mut self.armor_head,
            AttributeField::ArmorTorso => &mut self.armor_torso,
            AttributeField::ArmorLegs => &mut self.armor_legs,
            AttributeField::ArmorArms => &mut self.armor_arms,
            AttributeField::AiShootFreq => &mut self.ai_shoot_freq,
            AttributeField::AiWaitBeforeShootFactor => &mut self.ai_wait_before_shoot_factor,
            AttributeField::AiRangedError => &mut self.ai_ranged_error,
        }
    }
}

/// How a single field is changed by an effect
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeChange {
    /// Multiply the current value
    Scale(f32),
    /// Overwrite the current value
    Set(f32),
}

impl AttributeChange {
    pub fn apply(self, current: f32) -> f32 {
        match self {
            AttributeChange::Scale(factor) => current * factor,
            AttributeChange::Set(value) => value,
        }
    }
}

/// Attribute changes applied to every enraged combatant.
///
/// Morale is not part of the bundle; the controller raises it separately.
pub const RAGE_ATTRIBUTE_CHANGES: [(AttributeField, AttributeChange); 27] = [
    (AttributeField::MaxSpeedMultiplier, AttributeChange::Scale(1.2)),
    // Mount
    (AttributeField::MountSpeed, AttributeChange::Scale(1.2)),
    (AttributeField::MountChargeDamage, AttributeChange::Scale(2.0)),
    (AttributeField::MountManeuver, AttributeChange::Scale(2.0)),
    // Melee
    (AttributeField::CombatMaxSpeedMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::SwingSpeedMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::HandlingMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::ThrustOrRangedReadySpeedMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::ShieldBashStunDurationMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::KickStunDurationMultiplier, AttributeChange::Scale(2.0)),
    (AttributeField::AttributeShieldMissileCollisionBodySizeAdder, AttributeChange::Scale(2.0)),
    // Ranged
    (AttributeField::BipedalRangedReadySpeedMultiplier, AttributeChange::Scale(3.0)),
    (AttributeField::BipedalRangedReloadSpeedMultiplier, AttributeChange::Scale(3.0)),
    (AttributeField::ReloadSpeed, AttributeChange::Scale(3.0)),
    (AttributeField::WeaponBestAccuracyWaitTime, AttributeChange::Set(0.0)),
    (AttributeField::WeaponMaxMovementAccuracyPenalty, AttributeChange::Set(0.0)),
    (AttributeField::WeaponMaxUnsteadyAccuracyPenalty, AttributeChange::Set(0.0)),
    (AttributeField::WeaponInaccuracy, AttributeChange::Set(0.0)),
    (AttributeField::LongestRangedWeaponInaccuracy, AttributeChange::Set(0.0)),
    (AttributeField::ReloadMovementPenaltyFactor, AttributeChange::Set(0.0)),
    (AttributeField::WeaponRotationalAccuracyPenaltyInRadians, AttributeChange::Set(0.0)),
    // Character attributes
    (AttributeField::AttributeCourage, AttributeChange::Scale(2.0)),
    (AttributeField::AttributeRiding, AttributeChange::Scale(2.0)),
    (AttributeField::AttributeHorseArchery, AttributeChange::Scale(2.0)),
    (AttributeField::AttributeShield, AttributeChange::Scale(2.0)),
    // AI
    (AttributeField::AiShootFreq, AttributeChange::Scale(2.0)),
    (AttributeField::AiWaitBeforeShootFactor, AttributeChange::Set(0.0)),
];
