//! Rage systems
//!
//! Bevy systems that feed battle callbacks into the [`RageController`], plus
//! [`EcsBattle`], the `Battle` implementation over combatant queries.
//!
//! Each frame runs, in order:
//! 1. clock update and key input
//! 2. simulated attribute rebuilds (wielded item / mount changes)
//! 3. reset routing, activation requests, hit modifiers
//! 4. the controller tick (self-heal, countdown, expiry)

use bevy::prelude::*;

use super::attributes::AttributeBundle;
use super::battle::{Battle, Campaign};
use super::components::*;
use super::controller::RageController;
use super::events::*;
use super::log::RageLog;
use crate::keybindings::{Keybindings, RageAction};
use crate::settings::RageMode;

/// The battle's rage controller
#[derive(Resource, Deref, DerefMut)]
pub struct Rage(pub RageController<Entity>);

/// Components the `Battle` adapter works on
pub type CombatantData = (
    Entity,
    &'static mut Combatant,
    &'static mut DrivenAttributes,
    &'static Transform,
    Option<&'static mut OffHandItem>,
);

/// `Battle` view over the combatant query of a running system
///
/// Battle cries are buffered and sent as [`RageYell`] events by [`EcsBattle::send_yells`].
pub struct EcsBattle<'a, 'w, 's> {
    combatants: &'a mut Query<'w, 's, CombatantData>,
    yells: Vec<Entity>,
}

impl<'a, 'w, 's> EcsBattle<'a, 'w, 's> {
    pub fn new(combatants: &'a mut Query<'w, 's, CombatantData>) -> Self {
        Self {
            combatants,
            yells: Vec::new(),
        }
    }

    pub fn send_yells(self, writer: &mut EventWriter<RageYell>) {
        for combatant in self.yells {
            writer.send(RageYell { combatant });
        }
    }
}

fn ground_position(transform: &Transform) -> Vec2 {
    Vec2::new(transform.translation.x, transform.translation.z)
}

impl Battle for EcsBattle<'_, '_, '_> {
    type Id = Entity;

    fn is_active(&self, id: Entity) -> bool {
        self.combatants
            .get(id)
            .is_ok_and(|(_, combatant, ..)| combatant.is_alive())
    }

    fn position(&self, id: Entity) -> Option<Vec2> {
        self.combatants
            .get(id)
            .ok()
            .map(|(_, _, _, transform, _)| ground_position(transform))
    }

    fn team(&self, id: Entity) -> Option<u8> {
        self.combatants.get(id).ok().map(|(_, c, ..)| c.team)
    }

    fn nearby_allies(&self, center: Vec2, radius: f32, team: u8) -> Vec<Entity> {
        self.combatants
            .iter()
            .filter(|(_, combatant, _, transform, _)| {
                combatant.team == team
                    && combatant.is_alive()
                    && ground_position(transform).distance(center) <= radius
            })
            .map(|(entity, ..)| entity)
            .collect()
    }

    fn attributes(&self, id: Entity) -> Option<&AttributeBundle> {
        self.combatants
            .get(id)
            .ok()
            .map(|(_, _, attributes, _, _)| &attributes.0)
    }

    fn attributes_mut(&mut self, id: Entity) -> Option<&mut AttributeBundle> {
        self.combatants
            .get_mut(id)
            .ok()
            .map(|(_, _, attributes, _, _)| &mut attributes.into_inner().0)
    }

    fn update_driven_attributes(&mut self, id: Entity) {
        if let Ok((_, mut combatant, ..)) = self.combatants.get_mut(id) {
            combatant.attribute_updates += 1;
        }
    }

    fn morale(&self, id: Entity) -> Option<f32> {
        self.combatants.get(id).ok().map(|(_, c, ..)| c.morale)
    }

    fn set_morale(&mut self, id: Entity, morale: f32) {
        if let Ok((_, mut combatant, ..)) = self.combatants.get_mut(id) {
            combatant.morale = morale;
        }
    }

    fn health(&self, id: Entity) -> Option<f32> {
        self.combatants.get(id).ok().map(|(_, c, ..)| c.current_health)
    }

    fn set_health(&mut self, id: Entity, health: f32) {
        if let Ok((_, mut combatant, ..)) = self.combatants.get_mut(id) {
            combatant.current_health = health.min(combatant.max_health);
        }
    }

    fn offhand_hit_points(&self, id: Entity) -> Option<i16> {
        self.combatants
            .get(id)
            .ok()
            .and_then(|(_, _, _, _, offhand)| offhand.map(|item| item.hit_points))
    }

    fn set_offhand_hit_points(&mut self, id: Entity, hit_points: i16) {
        if let Ok((_, _, _, _, Some(mut offhand))) = self.combatants.get_mut(id) {
            offhand.hit_points = hit_points;
        }
    }

    fn watch_attribute_resets(&mut self, id: Entity) {
        if let Ok((_, mut combatant, ..)) = self.combatants.get_mut(id) {
            combatant.resets_watched = true;
        }
    }

    fn unwatch_attribute_resets(&mut self, id: Entity) {
        if let Ok((_, mut combatant, ..)) = self.combatants.get_mut(id) {
            combatant.resets_watched = false;
        }
    }

    fn yell(&mut self, id: Entity) {
        self.yells.push(id);
    }
}

/// Keep the status log stamped with mission time
pub fn update_rage_clock(time: Res<Time>, mut log: ResMut<RageLog>) {
    log.match_time = time.elapsed_secs();
}

/// Turn the activation key release into a rage request.
///
/// The super-mode modifier is sampled at the same instant.
pub fn read_rage_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    keybindings: Res<Keybindings>,
    mut requests: EventWriter<RageRequested>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    if keybindings.action_just_released(RageAction::ActivateRage, &keyboard) {
        let super_rage = keybindings.action_pressed(RageAction::SuperRageModifier, &keyboard);
        debug!(
            "{} key released (super: {})",
            RageAction::ActivateRage.description(),
            super_rage
        );
        requests.send(RageRequested { super_rage });
    }
}

/// Simulation side: rebuild driven attributes from base on weapon and mount
/// changes, and signal watched combatants.
pub fn rebuild_driven_attributes(
    mut item_changes: EventReader<WieldedItemChanged>,
    mut mount_changes: EventReader<MountStateChanged>,
    mut combatants: Query<(&mut Combatant, &mut DrivenAttributes, &BaseAttributes)>,
    mut resets: EventWriter<AttributesReset>,
) {
    let changes = item_changes
        .read()
        .map(|e| (e.combatant, ResetCause::WieldedItemChange, None))
        .chain(
            mount_changes
                .read()
                .map(|e| (e.combatant, ResetCause::MountStateChange, Some(e.mounted))),
        );

    for (entity, cause, mounted) in changes {
        let Ok((mut combatant, mut driven, base)) = combatants.get_mut(entity) else {
            continue;
        };
        if let Some(mounted) = mounted {
            combatant.mounted = mounted;
        }
        driven.0 = base.0;
        if combatant.resets_watched {
            resets.send(AttributesReset {
                combatant: entity,
                cause,
            });
        }
    }
}

/// Deliver reset signals to the controller
pub fn route_attribute_resets(mut resets: EventReader<AttributesReset>, mut rage: ResMut<Rage>) {
    for reset in resets.read() {
        if rage.on_attribute_reset(reset.combatant) {
            debug!("{:?} reset for {:?}, repair scheduled", reset.cause, reset.combatant);
        }
    }
}

/// Run activation requests against the controller
#[allow(clippy::too_many_arguments)]
pub fn handle_rage_requests(
    time: Res<Time>,
    mut requests: EventReader<RageRequested>,
    mut rage: ResMut<Rage>,
    leaders: Query<Entity, With<RageLeader>>,
    mut combatants: Query<CombatantData>,
    mut campaign: Option<ResMut<CampaignParty>>,
    mut log: ResMut<RageLog>,
    mut yells: EventWriter<RageYell>,
) {
    let now = time.elapsed_secs();
    for request in requests.read() {
        let Ok(leader) = leaders.get_single() else {
            warn!("Rage requested but there is no single rage leader");
            continue;
        };
        let mode = if request.super_rage {
            RageMode::Super
        } else {
            RageMode::Normal
        };

        let mut battle = EcsBattle::new(&mut combatants);
        let party = campaign.as_deref_mut().map(|p| p as &mut dyn Campaign);
        if let Err(e) = rage.request_activation(now, leader, mode, &mut battle, party, &mut *log) {
            debug!("Rage request rejected: {}", e);
        }
        battle.send_yells(&mut yells);
    }
}

/// Apply hit damage, then the rage damage modifiers
pub fn apply_agent_hits(
    mut hits: EventReader<AgentHit>,
    rage: Res<Rage>,
    mut combatants: Query<CombatantData>,
) {
    for hit in hits.read() {
        let mut battle = EcsBattle::new(&mut combatants);
        let Some(health) = battle.health(hit.victim) else {
            continue;
        };
        battle.set_health(hit.victim, health - hit.damage as f32);

        let effective = rage.on_agent_hit(&mut battle, hit.victim, hit.attacker, hit.damage);
        if effective != hit.damage {
            debug!(
                "Rage reduced damage to {:?} from {} to {}",
                hit.victim, hit.damage, effective
            );
        }
    }
}

/// Apply the rage shield modifier to scored hits
pub fn apply_score_hits(
    mut hits: EventReader<ScoreHit>,
    rage: Res<Rage>,
    mut combatants: Query<CombatantData>,
) {
    for hit in hits.read() {
        let mut battle = EcsBattle::new(&mut combatants);
        rage.on_score_hit(&mut battle, hit.victim, hit.attacker, hit.damage, hit.body_part);
    }
}

/// Per-tick controller update
pub fn tick_rage(
    time: Res<Time>,
    mut rage: ResMut<Rage>,
    mut combatants: Query<CombatantData>,
    mut log: ResMut<RageLog>,
    mut rng: ResMut<GameRng>,
    mut yells: EventWriter<RageYell>,
) {
    let now = time.elapsed_secs();
    let mut battle = EcsBattle::new(&mut combatants);
    rage.tick(now, &mut battle, &mut *log, rng.rng());
    battle.send_yells(&mut yells);
}

/// Count battle cries per combatant
pub fn count_rage_yells(mut yells: EventReader<RageYell>, mut combatants: Query<&mut Combatant>) {
    for yell in yells.read() {
        if let Ok(mut combatant) = combatants.get_mut(yell.combatant) {
            combatant.yells += 1;
        }
    }
}
