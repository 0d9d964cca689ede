//! RageSim - headless rage scenario runner

use bevy::log::LogPlugin;
use std::path::Path;

use ragesim::cli;
use ragesim::combat::log::{RageLog, StatusKind};
use ragesim::headless::{build_scenario_app, run_scenario, ScenarioConfig, ScenarioResult};
use ragesim::settings::RageSettings;

fn main() {
    let args = cli::parse_args();

    // A settings file that was asked for but can't be loaded is fatal
    let settings = match &args.settings {
        Some(path) => match RageSettings::load_from_file(path) {
            Ok(settings) => Some(settings),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let mut config = match ScenarioConfig::load_from_file(&args.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading scenario: {}", e);
            std::process::exit(1);
        }
    };

    // Command line overrides
    if let Some(output) = args.output {
        config.output_path = Some(output.to_string_lossy().to_string());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }

    if let Err(e) = run(&config, settings) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the scenario with logging, save the status log and print a summary
fn run(config: &ScenarioConfig, settings: Option<RageSettings>) -> Result<(), String> {
    println!("Starting headless rage scenario...");
    println!("  Combatants: {}", config.combatants.len());
    println!("  Scripted events: {}", config.script.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let mut app = build_scenario_app(config, settings)?;
    app.add_plugins(LogPlugin::default());
    let result = run_scenario(&mut app);

    let log = app.world().resource::<RageLog>();
    if let Some(path) = &config.output_path {
        log.save_to_file(Path::new(path))
            .map_err(|e| format!("Failed to save status log: {}", e))?;
        println!("Status log saved to: {}", path);
    }

    print_summary(&result, log);
    Ok(())
}

fn print_summary(result: &ScenarioResult, log: &RageLog) {
    println!("\nScenario finished after {:.1}s", result.elapsed);
    for entry in &log.entries {
        println!("  [{:>6.2}] {}", entry.timestamp, entry.message);
    }

    let errors = log.filter_by_kind(StatusKind::Error).len();
    if errors > 0 {
        println!("{} error message(s) shown", errors);
    }
    if let Some(influence) = result.final_influence {
        println!("Influence remaining: {:.1}", influence);
    }
    for combatant in &result.combatants {
        println!(
            "  {:<12} health {:>6.1}  morale {:>5.1}  yells {:>3}{}",
            combatant.name,
            combatant.health,
            combatant.morale,
            combatant.yells,
            if combatant.enraged { "  (enraged)" } else { "" }
        );
    }
}
