//! Rage status log
//!
//! Records every player-facing status line the rage effect produces, for
//! on-screen display and post-match review.

use bevy::prelude::*;
use std::fmt;
use std::path::Path;

/// A one-line, human-readable status notification
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    /// Settings object was absent and zero values were substituted
    SettingsMissing,
    /// Activation blocked by the influence cost
    InsufficientInfluence { required: f32, actual: f32 },
    /// Activation blocked by the cooldown
    CooldownRemaining { seconds: i32 },
    /// Activation succeeded
    Activated { affected: usize, radius: f32, duration: f32 },
    /// Periodic countdown while the effect is active
    Countdown { remaining: i32 },
    /// The effect expired and every combatant was restored
    Finished,
}

/// Broad category of a status message, for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Error,
    Info,
}

impl StatusMessage {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusMessage::SettingsMissing | StatusMessage::InsufficientInfluence { .. } => {
                StatusKind::Error
            }
            _ => StatusKind::Info,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::SettingsMissing => write!(f, "Rage settings are missing"),
            StatusMessage::InsufficientInfluence { required, actual } => write!(
                f,
                "Insufficient influence to activate rage ({} required, actual {})",
                required, actual
            ),
            StatusMessage::CooldownRemaining { seconds } => {
                write!(f, "{} seconds to wait to activate rage", seconds)
            }
            StatusMessage::Activated {
                affected,
                radius,
                duration,
            } => write!(
                f,
                "Rage activated for {} agents (radius {}) for {} seconds!",
                affected, radius, duration
            ),
            StatusMessage::Countdown { remaining } => {
                write!(f, "{} seconds of rage remaining", remaining)
            }
            StatusMessage::Finished => write!(f, "Rage finished"),
        }
    }
}

/// Anything that can show status lines to the player
pub trait StatusDisplay {
    fn show(&mut self, message: StatusMessage);
}

impl StatusDisplay for Vec<StatusMessage> {
    fn show(&mut self, message: StatusMessage) {
        self.push(message);
    }
}

/// A single entry in the status log
#[derive(Debug, Clone)]
pub struct RageLogEntry {
    /// Mission time in seconds
    pub timestamp: f32,
    pub message: StatusMessage,
}

/// The status log resource
#[derive(Resource, Default)]
pub struct RageLog {
    /// All entries in chronological order
    pub entries: Vec<RageLogEntry>,
    /// Current mission time, stamped onto new entries
    pub match_time: f32,
}

impl RageLog {
    pub fn log(&mut self, message: StatusMessage) {
        info!("[{:.2}] {}", self.match_time, message);
        self.entries.push(RageLogEntry {
            timestamp: self.match_time,
            message,
        });
    }

    /// Rendered text of every entry
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.to_string()).collect()
    }

    pub fn filter_by_kind(&self, kind: StatusKind) -> Vec<&RageLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.message.kind() == kind)
            .collect()
    }

    /// Write the log as timestamped text lines
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let contents: String = self
            .entries
            .iter()
            .map(|e| format!("[{:>7.2}] {}\n", e.timestamp, e.message))
            .collect();
        std::fs::write(path, contents)
    }
}

impl StatusDisplay for RageLog {
    fn show(&mut self, message: StatusMessage) {
        self.log(message);
    }
}
