//! RageSim - timed area-of-effect rage buff
//!
//! A leader spends influence to enrage nearby allies for a limited time:
//! their combat attributes are overridden, repaired whenever the simulation
//! rebuilds them, and restored exactly when the rage ends.
//!
//! This library exposes the core modules for testing and reuse.

pub mod cli;
pub mod combat;
pub mod error;
pub mod headless;
pub mod keybindings;
pub mod settings;

// Re-export commonly used types
pub use combat::battle::{Battle, Campaign};
pub use combat::controller::{RageController, RagePhase};
pub use combat::log::{RageLog, StatusMessage};
pub use combat::session::{OverrideSession, PendingOverride};
pub use combat::RagePlugin;
pub use error::RageError;
pub use headless::ScenarioConfig;
pub use settings::{RageMode, RageSettings};
