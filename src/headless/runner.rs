//! Headless scenario execution
//!
//! Runs a scripted battle without any graphical output, stepping the Bevy
//! app at a fixed 60 Hz so results are reproducible.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::combat::attributes::AttributeBundle;
use crate::combat::components::*;
use crate::combat::events::*;
use crate::combat::log::RageLog;
use crate::combat::systems::Rage;
use crate::combat::{RagePlugin, RageSystems};
use crate::settings::RageSettings;

use super::config::{ScenarioConfig, ScriptedAction, ScriptedEvent};

/// Fixed simulation step
pub const TICK: f64 = 1.0 / 60.0;

/// Result of a completed headless scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Simulated time at the end of the run
    pub elapsed: f32,
    /// Every status line, in order
    pub messages: Vec<String>,
    /// Influence left in the campaign party (None in custom battles)
    pub final_influence: Option<f32>,
    /// Sessions still open when the run stopped
    pub active_sessions: usize,
    /// Final state of every combatant, in scenario order
    pub combatants: Vec<CombatantResult>,
}

/// Final state of a single combatant
#[derive(Debug, Clone)]
pub struct CombatantResult {
    pub name: String,
    pub team: u8,
    pub health: f32,
    pub morale: f32,
    pub shield_hit_points: Option<i16>,
    pub attributes: AttributeBundle,
    pub enraged: bool,
    pub yells: u32,
}

/// Scenario entities, indexed like `ScenarioConfig::combatants`
#[derive(Resource, Default)]
pub struct ScenarioEntities(pub Vec<Entity>);

/// Pending script events, sorted by time
#[derive(Resource, Default)]
pub struct ScenarioScript {
    events: Vec<ScriptedEvent>,
    next: usize,
}

impl ScenarioScript {
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, next: 0 }
    }

    /// Events due at or before `now`, each returned once
    fn due(&mut self, now: f32) -> &[ScriptedEvent] {
        let start = self.next;
        while self.next < self.events.len() && self.events[self.next].at <= now {
            self.next += 1;
        }
        &self.events[start..self.next]
    }
}

/// Simulated-time budget of the run
#[derive(Resource)]
pub struct ScenarioClock {
    pub max_duration: f32,
}

/// Build a ready-to-step app for `config`.
///
/// `settings` overrides the scenario's inline settings.
pub fn build_scenario_app(config: &ScenarioConfig, settings: Option<RageSettings>) -> Result<App, String> {
    config.validate()?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(RagePlugin {
            settings: settings.or_else(|| config.settings.clone()),
        })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(TICK)))
        .insert_resource(ScenarioScript::new(config.script.clone()))
        .insert_resource(ScenarioClock {
            max_duration: config.max_duration_secs,
        })
        .insert_resource(match config.random_seed {
            Some(seed) => GameRng::from_seed(seed),
            None => GameRng::from_entropy(),
        });

    if let Some(campaign) = config.campaign {
        app.insert_resource(CampaignParty {
            influence: campaign.influence,
            leadership: campaign.leadership,
        });
    }

    let mut entities = Vec::with_capacity(config.combatants.len());
    for (i, combatant_config) in config.combatants.iter().enumerate() {
        let mut combatant = Combatant::new(
            format!("Team {} #{}", combatant_config.team, i),
            combatant_config.team,
            combatant_config.health,
            combatant_config.morale,
        );
        combatant.mounted = combatant_config.mounted;

        let mut entity = app.world_mut().spawn((
            combatant,
            DrivenAttributes(combatant_config.attributes),
            BaseAttributes(combatant_config.attributes),
            Transform::from_xyz(combatant_config.position[0], 0.0, combatant_config.position[1]),
        ));
        if let Some(hit_points) = combatant_config.shield_hit_points {
            entity.insert(OffHandItem { hit_points });
        }
        if combatant_config.leader {
            entity.insert(RageLeader);
        }
        entities.push(entity.id());
    }
    app.insert_resource(ScenarioEntities(entities));

    app.add_systems(Update, run_scenario_script.before(RageSystems));

    info!(
        "Headless scenario ready: {} combatants, {} scripted events, campaign: {}",
        config.combatants.len(),
        config.script.len(),
        config.campaign.is_some()
    );
    Ok(app)
}

/// Fire script events whose time has come
fn run_scenario_script(
    time: Res<Time>,
    mut script: ResMut<ScenarioScript>,
    entities: Res<ScenarioEntities>,
    combatants: Query<&Combatant>,
    mut requests: EventWriter<RageRequested>,
    mut item_changes: EventWriter<WieldedItemChanged>,
    mut mount_changes: EventWriter<MountStateChanged>,
    mut hits: EventWriter<AgentHit>,
    mut score_hits: EventWriter<ScoreHit>,
) {
    let now = time.elapsed_secs();
    let entity = |index: usize| entities.0[index];

    for event in script.due(now) {
        match event.action {
            ScriptedAction::Activate { super_rage } => {
                requests.send(RageRequested { super_rage });
            }
            ScriptedAction::ChangeEquipment { combatant } => {
                item_changes.send(WieldedItemChanged {
                    combatant: entity(combatant),
                });
            }
            ScriptedAction::ToggleMount { combatant } => {
                let mounted = combatants
                    .get(entity(combatant))
                    .is_ok_and(|c| !c.mounted);
                mount_changes.send(MountStateChanged {
                    combatant: entity(combatant),
                    mounted,
                });
            }
            ScriptedAction::Hit {
                attacker,
                victim,
                damage,
            } => {
                hits.send(AgentHit {
                    attacker: attacker.map(entity),
                    victim: entity(victim),
                    damage,
                });
            }
            ScriptedAction::ShieldHit {
                attacker,
                victim,
                damage,
                body_part,
            } => {
                score_hits.send(ScoreHit {
                    attacker: attacker.map(entity),
                    victim: entity(victim),
                    damage,
                    body_part,
                });
            }
        }
    }
}

/// Step the app until the scenario's time budget is spent
pub fn run_scenario(app: &mut App) -> ScenarioResult {
    app.finish();
    app.cleanup();

    let max_duration = app.world().resource::<ScenarioClock>().max_duration;
    loop {
        app.update();
        if app.world().resource::<Time>().elapsed_secs() >= max_duration {
            break;
        }
    }

    collect_result(app.world_mut())
}

fn collect_result(world: &mut World) -> ScenarioResult {
    let entities = world.resource::<ScenarioEntities>().0.clone();
    let rage = world.resource::<Rage>();
    let enraged: Vec<bool> = entities.iter().map(|&e| rage.is_enraged(e)).collect();
    let active_sessions = rage.sessions().len();

    let mut query = world.query::<(&Combatant, &DrivenAttributes, Option<&OffHandItem>)>();
    let combatants = entities
        .iter()
        .zip(enraged)
        .filter_map(|(&entity, enraged)| {
            let (combatant, attributes, offhand) = query.get(world, entity).ok()?;
            Some(CombatantResult {
                name: combatant.name.clone(),
                team: combatant.team,
                health: combatant.current_health,
                morale: combatant.morale,
                shield_hit_points: offhand.map(|o| o.hit_points),
                attributes: attributes.0,
                enraged,
                yells: combatant.yells,
            })
        })
        .collect();

    ScenarioResult {
        elapsed: world.resource::<Time>().elapsed_secs(),
        messages: world.resource::<RageLog>().lines(),
        final_influence: world.get_resource::<CampaignParty>().map(|p| p.influence),
        active_sessions,
        combatants,
    }
}
