//! Integration tests for the rage controller state machine
//!
//! These tests verify that:
//! - Cooldown, cost and leader guards reject without side effects
//! - Activation enrages exactly the allies inside the radius
//! - The countdown is reported on multiples of five seconds
//! - Expiry restores every enraged combatant

mod common;

use common::{test_settings, TestBattle, TestParty};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use ragesim::combat::attributes::AttributeField;
use ragesim::combat::controller::RAGE_MORALE_BONUS;
use ragesim::{Campaign, RageController, RageError, RageMode, RagePhase, RageSettings, StatusMessage};

const STEP: f32 = 0.25;

struct Fixture {
    battle: TestBattle,
    controller: RageController<usize>,
    messages: Vec<StatusMessage>,
    rng: StdRng,
    leader: usize,
}

impl Fixture {
    /// Leader at the origin, two allies in range, one ally far away, one enemy
    fn new(settings: RageSettings) -> Self {
        let mut battle = TestBattle::default();
        let leader = battle.spawn(1, 0.0, 0.0);
        battle.spawn(1, 3.0, 4.0);
        battle.spawn(1, -10.0, 0.0);
        battle.spawn(1, 80.0, 0.0);
        battle.spawn(2, 1.0, 1.0);
        Self {
            battle,
            controller: RageController::new(settings),
            messages: Vec::new(),
            rng: StdRng::seed_from_u64(42),
            leader,
        }
    }

    fn activate(
        &mut self,
        now: f32,
        mode: RageMode,
        party: Option<&mut TestParty>,
    ) -> Result<ragesim::combat::controller::Activation, RageError> {
        self.controller.request_activation(
            now,
            self.leader,
            mode,
            &mut self.battle,
            party.map(|p| p as &mut dyn Campaign),
            &mut self.messages,
        )
    }

    /// Tick from `from` up to and including `to`
    fn run(&mut self, from: f32, to: f32) {
        let mut now = from;
        while now <= to {
            self.controller
                .tick(now, &mut self.battle, &mut self.messages, &mut self.rng);
            now += STEP;
        }
    }

    fn lines(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.to_string()).collect()
    }
}

fn party(influence: f32) -> TestParty {
    TestParty {
        influence,
        leadership: 40.0,
    }
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn test_campaign_activation_runs_to_completion() {
    let mut fixture = Fixture::new(test_settings());
    let mut party = party(10.0);

    let activation = fixture
        .activate(1.0, RageMode::Normal, Some(&mut party))
        .unwrap();

    // leadership 40 * 0.5
    assert_eq!(activation.radius, 20.0);
    assert_eq!(activation.affected, 3);
    assert_eq!(activation.cost, 10.0);
    assert_eq!(party.influence, 0.0);
    assert_eq!(fixture.controller.phase(), RagePhase::Active);
    assert_eq!(
        fixture.lines()[0],
        "Rage activated for 3 agents (radius 20) for 10 seconds!"
    );

    fixture.run(1.0, 12.0);

    assert_eq!(fixture.controller.phase(), RagePhase::Idle);
    assert!(fixture.controller.sessions().is_empty());
    assert_eq!(fixture.lines().last().map(String::as_str), Some("Rage finished"));
}

#[test]
fn test_custom_battle_is_free_and_uses_default_radius() {
    let mut fixture = Fixture::new(test_settings());

    let activation = fixture.activate(0.0, RageMode::Normal, None).unwrap();

    assert_eq!(activation.cost, 0.0);
    assert_eq!(activation.radius, 15.0);
    assert!(fixture.controller.is_enraged(0));
    assert!(fixture.controller.is_enraged(1));
    assert!(fixture.controller.is_enraged(2));
    assert!(!fixture.controller.is_enraged(3), "ally out of range");
    assert!(!fixture.controller.is_enraged(4), "enemy");
}

#[test]
fn test_activation_buffs_morale_and_attributes() {
    let mut fixture = Fixture::new(test_settings());
    let before = fixture.battle.get(1).attributes;

    fixture.activate(0.0, RageMode::Normal, None).unwrap();

    let ally = fixture.battle.get(1);
    assert_eq!(ally.morale, 50.0 + RAGE_MORALE_BONUS);
    assert!(ally.watched);
    assert_eq!(
        ally.attributes.get(AttributeField::SwingSpeedMultiplier),
        before.get(AttributeField::SwingSpeedMultiplier) * 2.0
    );
    assert_eq!(ally.attributes.get(AttributeField::WeaponInaccuracy), 0.0);
    assert_eq!(ally.attributes.armor_torso, before.armor_torso);

    // Leader yells once for the activation and once for its own rage
    assert_eq!(fixture.battle.get(0).yells, 2);
    assert_eq!(fixture.battle.get(4).morale, 50.0);
}

#[test]
fn test_insufficient_influence_changes_nothing() {
    let mut fixture = Fixture::new(test_settings());
    let mut party = party(5.0);
    let before = fixture.battle.get(1).attributes;

    let result = fixture.activate(1.0, RageMode::Normal, Some(&mut party));

    assert!(matches!(
        result,
        Err(RageError::InsufficientInfluence { required, actual }) if required == 10.0 && actual == 5.0
    ));
    assert_eq!(
        fixture.lines(),
        vec!["Insufficient influence to activate rage (10 required, actual 5)"]
    );
    assert_eq!(party.influence, 5.0);
    assert_eq!(fixture.controller.phase(), RagePhase::Idle);
    assert!(fixture.controller.activated_at().is_none());
    assert_eq!(fixture.battle.get(1).attributes, before);
    assert_eq!(fixture.battle.get(0).yells, 0);
}

#[test]
fn test_super_rage_scales_cost_and_timings() {
    let mut fixture = Fixture::new(test_settings());
    let mut party = party(30.0);

    let activation = fixture
        .activate(0.0, RageMode::Super, Some(&mut party))
        .unwrap();

    assert_eq!(activation.cost, 30.0);
    assert_eq!(activation.duration, 30.0);
    assert_eq!(activation.cooldown, 15.0);
    assert_eq!(party.influence, 0.0);

    fixture.run(0.0, 29.0);
    assert!(fixture.controller.is_active());
    fixture.run(29.25, 30.0);
    assert!(!fixture.controller.is_active());
}

#[test]
fn test_inactive_leader_shows_time_remaining() {
    let mut fixture = Fixture::new(test_settings());
    fixture.battle.get_mut(0).alive = false;

    let result = fixture.activate(0.0, RageMode::Normal, None);

    assert!(matches!(result, Err(RageError::LeaderUnavailable)));
    assert_eq!(fixture.lines(), vec!["0 seconds to wait to activate rage"]);
    assert_eq!(fixture.controller.phase(), RagePhase::Idle);
    assert!(fixture.controller.sessions().is_empty());
}

#[test]
fn test_vanished_leader_after_rage_shows_elapsed_cooldown() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    fixture.run(0.0, 10.0);
    fixture.messages.clear();
    fixture.battle.remove(0);

    // 15s cooldown, 20s since activation
    let result = fixture.activate(20.0, RageMode::Normal, None);

    assert!(matches!(result, Err(RageError::LeaderUnavailable)));
    assert_eq!(fixture.lines(), vec!["-5 seconds to wait to activate rage"]);
    assert!(!fixture.controller.is_active());
}

// =============================================================================
// Cooldown
// =============================================================================

#[test]
fn test_cooldown_blocks_reactivation() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(1.0, RageMode::Normal, None).unwrap();
    fixture.run(1.0, 12.0);
    fixture.messages.clear();

    // Normal cooldown is 5 + 10 = 15s from activation
    let result = fixture.activate(12.0, RageMode::Normal, None);
    assert!(matches!(result, Err(RageError::CooldownActive { remaining: 4 })));
    assert_eq!(fixture.lines(), vec!["4 seconds to wait to activate rage"]);

    assert!(fixture.activate(16.5, RageMode::Normal, None).is_ok());
}

#[test]
fn test_cooldown_boundary_is_inclusive() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    fixture.run(0.0, 11.0);

    assert!(fixture.activate(15.0, RageMode::Normal, None).is_err());
    assert!(fixture.activate(15.25, RageMode::Normal, None).is_ok());
}

#[test]
fn test_active_super_rage_rejects_after_cooldown() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(1.0, RageMode::Super, None).unwrap();
    fixture.run(1.0, 20.0);
    fixture.messages.clear();

    // 15s cooldown elapsed but 30s duration has not
    let result = fixture.activate(20.0, RageMode::Normal, None);

    assert!(matches!(result, Err(RageError::CooldownActive { remaining: 11 })));
    assert_eq!(fixture.lines(), vec!["11 seconds to wait to activate rage"]);
    assert!(fixture.controller.is_active());
}

// =============================================================================
// Countdown, expiry and self-heal
// =============================================================================

#[test]
fn test_countdown_reports_multiples_of_five() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Super, None).unwrap();
    fixture.run(0.0, 31.0);

    let countdown = Regex::new(r"^(\d+) seconds of rage remaining$").unwrap();
    let reported: Vec<i32> = fixture
        .lines()
        .iter()
        .filter_map(|line| countdown.captures(line))
        .map(|caps| caps[1].parse().unwrap())
        .collect();

    assert_eq!(reported, vec![25, 20, 15, 10, 5]);
    assert_eq!(
        fixture.lines().iter().filter(|l| *l == "Rage finished").count(),
        1
    );
}

#[test]
fn test_expiry_restores_every_combatant() {
    let mut fixture = Fixture::new(test_settings());
    let before: Vec<_> = (0..5).map(|id| fixture.battle.get(id).attributes).collect();

    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    fixture.run(0.0, 10.0);

    for (id, attributes) in before.iter().enumerate() {
        assert_eq!(&fixture.battle.get(id).attributes, attributes, "combatant {}", id);
        assert!(!fixture.battle.get(id).watched);
    }
}

#[test]
fn test_reset_during_rage_is_repaired_on_tick() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    let buffed = fixture.battle.get(1).attributes;

    assert!(fixture.battle.rebuild(1));
    assert!(fixture.controller.on_attribute_reset(1));
    assert!(!fixture.controller.on_attribute_reset(3));
    assert_ne!(fixture.battle.get(1).attributes, buffed);

    fixture.run(1.0, 1.0);
    assert_eq!(fixture.battle.get(1).attributes, buffed);
}

#[test]
fn test_vanished_combatant_session_is_dropped() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    assert_eq!(fixture.controller.sessions().len(), 3);

    fixture.battle.remove(2);
    fixture.controller.on_attribute_reset(2);
    fixture.run(1.0, 1.0);

    assert_eq!(fixture.controller.sessions().len(), 2);
    assert!(!fixture.controller.is_enraged(2));

    fixture.run(1.25, 10.0);
    assert_eq!(fixture.lines().last().map(String::as_str), Some("Rage finished"));
}

#[test]
fn test_sessions_stay_exclusive_across_activations() {
    let mut fixture = Fixture::new(test_settings());
    fixture.activate(0.0, RageMode::Normal, None).unwrap();
    fixture.run(0.0, 16.0);
    fixture.activate(16.0, RageMode::Normal, None).unwrap();

    let mut ids: Vec<usize> = fixture
        .controller
        .sessions()
        .iter()
        .map(|s| s.combatant())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), fixture.controller.sessions().len());
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_missing_settings_rage_ends_immediately() {
    let mut fixture = Fixture::new(RageSettings::default());

    let activation = fixture.activate(0.0, RageMode::Normal, None).unwrap();
    assert_eq!(activation.duration, 0.0);
    assert_eq!(activation.affected, 1, "only the leader stands at radius 0");

    fixture.run(0.0, 0.0);
    assert!(!fixture.controller.is_active());
    assert_eq!(fixture.battle.get(0).attributes, fixture.battle.get(0).base);
}
