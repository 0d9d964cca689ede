//! JSON configuration parsing for headless mode
//!
//! A scenario describes the combatants on the field, the optional campaign
//! party paying for rage, and a timed script of battle events.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::attributes::AttributeBundle;
use crate::combat::modifiers::BodyPart;
use crate::settings::RageSettings;

/// Headless scenario loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Inline rage settings (overridden by `--settings`)
    #[serde(default)]
    pub settings: Option<RageSettings>,
    /// Campaign party state. Absent means a custom battle, where rage is free.
    #[serde(default)]
    pub campaign: Option<CampaignConfig>,
    pub combatants: Vec<CombatantConfig>,
    /// Timed battle events, in any order
    #[serde(default)]
    pub script: Vec<ScriptedEvent>,
    /// Simulated time in seconds (default: 60)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for reproducible battle cries
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Where to save the status log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

/// Campaign party paying for rage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub influence: f32,
    pub leadership: f32,
}

/// One combatant on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub team: u8,
    /// Ground-plane position (x, z)
    pub position: [f32; 2],
    /// Whether this combatant's key press activates rage (exactly one)
    #[serde(default)]
    pub leader: bool,
    #[serde(default = "default_health")]
    pub health: f32,
    #[serde(default = "default_morale")]
    pub morale: f32,
    #[serde(default)]
    pub mounted: bool,
    /// Shield durability; no shield when absent
    #[serde(default)]
    pub shield_hit_points: Option<i16>,
    #[serde(default)]
    pub attributes: AttributeBundle,
}

/// A battle event fired once simulated time reaches `at`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub at: f32,
    pub action: ScriptedAction,
}

/// Combatants are referred to by their index in `combatants`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptedAction {
    /// Press and release the rage key
    Activate {
        #[serde(default)]
        super_rage: bool,
    },
    /// Swap the wielded weapon (rebuilds driven attributes)
    ChangeEquipment { combatant: usize },
    /// Mount or dismount (rebuilds driven attributes)
    ToggleMount { combatant: usize },
    Hit {
        #[serde(default)]
        attacker: Option<usize>,
        victim: usize,
        damage: i32,
    },
    /// Hit scored against a body region (`None` is a shield block)
    ShieldHit {
        #[serde(default)]
        attacker: Option<usize>,
        victim: usize,
        damage: f32,
        #[serde(default = "default_body_part")]
        body_part: BodyPart,
    },
}

fn default_max_duration() -> f32 {
    60.0
}

fn default_health() -> f32 {
    100.0
}

fn default_morale() -> f32 {
    50.0
}

fn default_body_part() -> BodyPart {
    BodyPart::None
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario file: {}", e))?;

        let config: ScenarioConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the scenario
    pub fn validate(&self) -> Result<(), String> {
        if self.combatants.is_empty() {
            return Err("scenario must have at least one combatant".to_string());
        }

        let leaders = self.combatants.iter().filter(|c| c.leader).count();
        if leaders != 1 {
            return Err(format!(
                "scenario must have exactly one leader, found {}",
                leaders
            ));
        }

        let count = self.combatants.len();
        let check = |index: usize, what: &str| {
            if index >= count {
                Err(format!(
                    "{} index {} is out of range ({} combatants)",
                    what, index, count
                ))
            } else {
                Ok(())
            }
        };

        for event in &self.script {
            if !(event.at.is_finite() && event.at >= 0.0) {
                return Err(format!(
                    "script event time {}s must be finite and non-negative",
                    event.at
                ));
            }
            match &event.action {
                ScriptedAction::Activate { .. } => {}
                ScriptedAction::ChangeEquipment { combatant }
                | ScriptedAction::ToggleMount { combatant } => check(*combatant, "combatant")?,
                ScriptedAction::Hit {
                    attacker, victim, ..
                }
                | ScriptedAction::ShieldHit {
                    attacker, victim, ..
                } => {
                    check(*victim, "victim")?;
                    if let Some(attacker) = attacker {
                        check(*attacker, "attacker")?;
                    }
                }
            }
        }

        if !(self.max_duration_secs.is_finite() && self.max_duration_secs > 0.0) {
            return Err(format!(
                "max_duration_secs must be finite and positive, got {}",
                self.max_duration_secs
            ));
        }

        Ok(())
    }
}
