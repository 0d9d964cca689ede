//! Error taxonomy for the rage effect
//!
//! Every guard that can reject an activation is checked before any state is
//! touched, so an `Err` from the controller always means "nothing changed".

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading settings or driving the rage controller
#[derive(Debug, Error)]
pub enum RageError {
    /// The settings file could not be read
    #[error("failed to read rage settings from {}: {source}", .path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid RON for `RageSettings`
    #[error("failed to parse rage settings from {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Activation requested before the cooldown elapsed
    #[error("rage is on cooldown ({remaining} seconds remaining)")]
    CooldownActive { remaining: i32 },

    /// The campaign party cannot pay for the activation
    #[error("insufficient influence to activate rage ({required} required, actual {actual})")]
    InsufficientInfluence { required: f32, actual: f32 },

    /// The requesting combatant is dead, missing, or otherwise inactive
    #[error("rage leader is not active")]
    LeaderUnavailable,

    /// A session's combatant no longer exists in the battle
    #[error("combatant {0} is no longer part of the battle")]
    StaleCombatant(String),
}
