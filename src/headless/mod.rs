//! Headless mode for scripted rage scenarios
//!
//! Runs a battle without any graphical output, suitable for automated testing
//! and balance checks of the rage settings.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- assets/scenarios/campaign_battle.json --output rage.log
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "campaign": { "influence": 10.0, "leadership": 40.0 },
//!   "combatants": [
//!     { "team": 1, "position": [0.0, 0.0], "leader": true },
//!     { "team": 1, "position": [4.0, 2.0] }
//!   ],
//!   "script": [
//!     { "at": 1.0, "action": { "type": "Activate" } }
//!   ],
//!   "max_duration_secs": 30
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::ScenarioConfig;
pub use runner::{build_scenario_app, run_scenario, ScenarioResult};
