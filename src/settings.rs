//! Rage tunables
//!
//! Six numbers loaded once per mission from `RageSettings.ron`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::combat::log::{StatusDisplay, StatusMessage};
use crate::error::RageError;

/// Activation flavour selected by the modifier key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RageMode {
    #[default]
    Normal,
    /// Costs, lasts and cools down `super_rage_multiplier` times longer
    Super,
}

/// User-tunable rage settings
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RageSettings {
    /// Effect duration in seconds
    pub default_rage_duration: f32,
    /// Cooldown in seconds, counted from the end of a normal rage
    pub default_rage_cooldown: f32,
    /// Influence spent per normal activation
    pub rage_influence_cost: i32,
    /// Scale applied to cost, duration and cooldown in super mode
    pub super_rage_multiplier: i32,
    /// Radius used in custom battles
    pub default_rage_radius: i32,
    /// Radius per leadership skill point in campaign battles
    pub rage_radius_multiplier: f32,
}

/// Duration and cooldown of one activation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RageTimings {
    pub duration: f32,
    pub cooldown: f32,
}

impl RageSettings {
    pub const FILE_NAME: &'static str = "RageSettings.ron";

    /// Load settings from a RON file. Missing or malformed files are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, RageError> {
        let contents = fs::read_to_string(path).map_err(|source| RageError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = ron::from_str(&contents).map_err(|source| RageError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded rage settings from {:?}", path);
        Ok(settings)
    }

    /// Substitute zeroed settings when none were provided
    pub fn resolve(settings: Option<Self>, display: &mut impl StatusDisplay) -> Self {
        match settings {
            Some(settings) => settings,
            None => {
                warn!("No rage settings available, every effect magnitude is zero");
                display.show(StatusMessage::SettingsMissing);
                Self::default()
            }
        }
    }

    fn mode_multiplier(&self, mode: RageMode) -> i32 {
        match mode {
            RageMode::Normal => 1,
            RageMode::Super => self.super_rage_multiplier,
        }
    }

    /// Influence cost of an activation
    pub fn cost(&self, mode: RageMode) -> f32 {
        self.rage_influence_cost as f32 * self.mode_multiplier(mode) as f32
    }

    /// Duration and cooldown of an activation.
    ///
    /// A normal cooldown starts when the rage ends, so it includes the duration.
    pub fn timings(&self, mode: RageMode) -> RageTimings {
        match mode {
            RageMode::Normal => RageTimings {
                duration: self.default_rage_duration,
                cooldown: self.default_rage_cooldown + self.default_rage_duration,
            },
            RageMode::Super => {
                let multiplier = self.super_rage_multiplier as f32;
                RageTimings {
                    duration: self.default_rage_duration * multiplier,
                    cooldown: self.default_rage_cooldown * multiplier,
                }
            }
        }
    }

    /// Effect radius. Custom battles use the fixed default radius.
    pub fn radius(&self, leadership: Option<f32>) -> f32 {
        match leadership {
            Some(skill) => (skill * self.rage_radius_multiplier).trunc(),
            None => self.default_rage_radius as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RageSettings {
        RageSettings {
            default_rage_duration: 10.0,
            default_rage_cooldown: 5.0,
            rage_influence_cost: 10,
            super_rage_multiplier: 3,
            default_rage_radius: 40,
            rage_radius_multiplier: 0.25,
        }
    }

    #[test]
    fn test_normal_cooldown_counts_from_end_of_rage() {
        let timings = sample().timings(RageMode::Normal);
        assert_eq!(timings.duration, 10.0);
        assert_eq!(timings.cooldown, 15.0);
    }

    #[test]
    fn test_super_mode_scales_duration_and_cooldown() {
        let timings = sample().timings(RageMode::Super);
        assert_eq!(timings.duration, 30.0);
        assert_eq!(timings.cooldown, 15.0);
    }

    #[test]
    fn test_cost_scales_in_super_mode() {
        let settings = sample();
        assert_eq!(settings.cost(RageMode::Normal), 10.0);
        assert_eq!(settings.cost(RageMode::Super), 30.0);
    }

    #[test]
    fn test_huge_cost_does_not_overflow() {
        let settings = RageSettings {
            rage_influence_cost: 1_000_000_000,
            ..sample()
        };
        assert_eq!(settings.cost(RageMode::Super), 3_000_000_000.0);
        assert!(settings.cost(RageMode::Super) > settings.cost(RageMode::Normal));
    }

    #[test]
    fn test_radius_from_leadership_is_truncated() {
        let settings = sample();
        assert_eq!(settings.radius(Some(75.0)), 18.0);
        assert_eq!(settings.radius(None), 40.0);
    }

    #[test]
    fn test_missing_settings_are_zeroed_and_reported() {
        let mut shown: Vec<StatusMessage> = Vec::new();
        let settings = RageSettings::resolve(None, &mut shown);
        assert_eq!(settings, RageSettings::default());
        assert_eq!(shown, vec![StatusMessage::SettingsMissing]);

        let mut shown: Vec<StatusMessage> = Vec::new();
        let settings = RageSettings::resolve(Some(sample()), &mut shown);
        assert_eq!(settings, sample());
        assert!(shown.is_empty());
    }

    #[test]
    fn test_parse_ron() {
        let text = "(
            default_rage_duration: 20.0,
            default_rage_cooldown: 60.0,
            rage_influence_cost: 10,
            super_rage_multiplier: 3,
            default_rage_radius: 30,
            rage_radius_multiplier: 0.5,
        )";
        let settings: RageSettings = ron::from_str(text).unwrap();
        assert_eq!(settings.default_rage_duration, 20.0);
        assert_eq!(settings.default_rage_radius, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = RageSettings::load_from_file(Path::new("definitely/not/here.ron"));
        assert!(matches!(result, Err(RageError::SettingsIo { .. })));
    }
}
