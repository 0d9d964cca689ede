//! In-memory battle shared by the integration tests

#![allow(dead_code)]

use bevy::math::Vec2;
use ragesim::combat::attributes::AttributeBundle;
use ragesim::settings::RageSettings;
use ragesim::{Battle, Campaign};

#[derive(Debug, Clone)]
pub struct TestCombatant {
    pub team: u8,
    pub position: Vec2,
    pub alive: bool,
    pub health: f32,
    pub max_health: f32,
    pub morale: f32,
    pub shield: Option<i16>,
    pub attributes: AttributeBundle,
    /// Simulation's own idea of the attributes, restored on a reset
    pub base: AttributeBundle,
    pub watched: bool,
    pub updates: u32,
    pub yells: u32,
}

/// Combatants are addressed by their index in `combatants`
#[derive(Debug, Default)]
pub struct TestBattle {
    pub combatants: Vec<Option<TestCombatant>>,
}

impl TestBattle {
    pub fn spawn(&mut self, team: u8, x: f32, y: f32) -> usize {
        self.combatants.push(Some(TestCombatant {
            team,
            position: Vec2::new(x, y),
            alive: true,
            health: 100.0,
            max_health: 100.0,
            morale: 50.0,
            shield: None,
            attributes: AttributeBundle::default(),
            base: AttributeBundle::default(),
            watched: false,
            updates: 0,
            yells: 0,
        }));
        self.combatants.len() - 1
    }

    pub fn get(&self, id: usize) -> &TestCombatant {
        self.combatants[id].as_ref().expect("combatant was removed")
    }

    pub fn get_mut(&mut self, id: usize) -> &mut TestCombatant {
        self.combatants[id].as_mut().expect("combatant was removed")
    }

    pub fn remove(&mut self, id: usize) {
        self.combatants[id] = None;
    }

    /// Simulate a weapon swap: driven attributes rebuilt from base.
    ///
    /// Returns whether the reset signal would be delivered.
    pub fn rebuild(&mut self, id: usize) -> bool {
        let combatant = self.get_mut(id);
        combatant.attributes = combatant.base;
        combatant.watched
    }

    fn find(&self, id: usize) -> Option<&TestCombatant> {
        self.combatants.get(id).and_then(Option::as_ref)
    }

    fn find_mut(&mut self, id: usize) -> Option<&mut TestCombatant> {
        self.combatants.get_mut(id).and_then(Option::as_mut)
    }
}

impl Battle for TestBattle {
    type Id = usize;

    fn is_active(&self, id: usize) -> bool {
        self.find(id).is_some_and(|c| c.alive)
    }

    fn position(&self, id: usize) -> Option<Vec2> {
        self.find(id).map(|c| c.position)
    }

    fn team(&self, id: usize) -> Option<u8> {
        self.find(id).map(|c| c.team)
    }

    fn nearby_allies(&self, center: Vec2, radius: f32, team: u8) -> Vec<usize> {
        self.combatants
            .iter()
            .enumerate()
            .filter_map(|(id, c)| c.as_ref().map(|c| (id, c)))
            .filter(|(_, c)| c.alive && c.team == team && c.position.distance(center) <= radius)
            .map(|(id, _)| id)
            .collect()
    }

    fn attributes(&self, id: usize) -> Option<&AttributeBundle> {
        self.find(id).map(|c| &c.attributes)
    }

    fn attributes_mut(&mut self, id: usize) -> Option<&mut AttributeBundle> {
        self.find_mut(id).map(|c| &mut c.attributes)
    }

    fn update_driven_attributes(&mut self, id: usize) {
        if let Some(c) = self.find_mut(id) {
            c.updates += 1;
        }
    }

    fn morale(&self, id: usize) -> Option<f32> {
        self.find(id).map(|c| c.morale)
    }

    fn set_morale(&mut self, id: usize, morale: f32) {
        if let Some(c) = self.find_mut(id) {
            c.morale = morale;
        }
    }

    fn health(&self, id: usize) -> Option<f32> {
        self.find(id).map(|c| c.health)
    }

    fn set_health(&mut self, id: usize, health: f32) {
        if let Some(c) = self.find_mut(id) {
            c.health = health.min(c.max_health);
        }
    }

    fn offhand_hit_points(&self, id: usize) -> Option<i16> {
        self.find(id).and_then(|c| c.shield)
    }

    fn set_offhand_hit_points(&mut self, id: usize, hit_points: i16) {
        if let Some(c) = self.find_mut(id) {
            if c.shield.is_some() {
                c.shield = Some(hit_points);
            }
        }
    }

    fn watch_attribute_resets(&mut self, id: usize) {
        if let Some(c) = self.find_mut(id) {
            c.watched = true;
        }
    }

    fn unwatch_attribute_resets(&mut self, id: usize) {
        if let Some(c) = self.find_mut(id) {
            c.watched = false;
        }
    }

    fn yell(&mut self, id: usize) {
        if let Some(c) = self.find_mut(id) {
            c.yells += 1;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestParty {
    pub influence: f32,
    pub leadership: f32,
}

impl Campaign for TestParty {
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

/// 10s rage, 5s base cooldown, costs 10 influence, super is 3x
pub fn test_settings() -> RageSettings {
    RageSettings {
        default_rage_duration: 10.0,
        default_rage_cooldown: 5.0,
        rage_influence_cost: 10,
        super_rage_multiplier: 3,
        default_rage_radius: 15,
        rage_radius_multiplier: 0.5,
    }
}
