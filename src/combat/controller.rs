//! Rage controller
//!
//! Per-battle state machine with two observable phases, Idle and Active.
//! Cooldown is not a phase of its own: it is the guard
//! `now - activated_at > cooldown` evaluated on every activation request.
//!
//! The controller is driven by the battle: [`RageController::request_activation`]
//! on the activation key, [`RageController::tick`] once per simulation tick,
//! [`RageController::on_attribute_reset`] when a watched combatant's driven
//! attributes are rebuilt, and the hit callbacks in `modifiers`.

use bevy::prelude::*;
use rand::Rng;

use super::attributes::RAGE_ATTRIBUTE_CHANGES;
use super::battle::{Battle, Campaign};
use super::log::{StatusDisplay, StatusMessage};
use super::session::OverrideSession;
use crate::error::RageError;
use crate::settings::{RageMode, RageSettings};

/// Morale granted once to every enraged combatant
pub const RAGE_MORALE_BONUS: f32 = 50.0;

/// An enraged combatant yells on average once every this many ticks
pub const RAGE_YELL_ONE_IN: u32 = 600;

/// Countdown messages are shown on multiples of this many seconds
pub const COUNTDOWN_STEP: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RagePhase {
    Idle,
    Active,
}

/// Summary of a successful activation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activation {
    pub mode: RageMode,
    pub affected: usize,
    pub radius: f32,
    pub duration: f32,
    pub cooldown: f32,
    /// Influence spent (zero in custom battles)
    pub cost: f32,
}

/// The rage state machine
#[derive(Debug)]
pub struct RageController<Id> {
    settings: RageSettings,
    phase: RagePhase,
    /// Mission time of the last successful activation
    activated_at: Option<f32>,
    duration: f32,
    cooldown: f32,
    sessions: Vec<OverrideSession<Id>>,
    last_displayed_countdown: i32,
}

impl<Id: Copy + Eq + std::hash::Hash + std::fmt::Debug> RageController<Id> {
    pub fn new(settings: RageSettings) -> Self {
        Self {
            settings,
            phase: RagePhase::Idle,
            activated_at: None,
            duration: 0.0,
            cooldown: 0.0,
            sessions: Vec::new(),
            last_displayed_countdown: 0,
        }
    }

    pub fn settings(&self) -> &RageSettings {
        &self.settings
    }

    pub fn phase(&self) -> RagePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RagePhase::Active
    }

    pub fn activated_at(&self) -> Option<f32> {
        self.activated_at
    }

    /// Duration of the current (or last) activation
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Cooldown of the current (or last) activation
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn sessions(&self) -> &[OverrideSession<Id>] {
        &self.sessions
    }

    pub fn session(&self, combatant: Id) -> Option<&OverrideSession<Id>> {
        self.sessions.iter().find(|s| s.combatant() == combatant)
    }

    /// Whether `combatant` is currently enraged
    pub fn is_enraged(&self, combatant: Id) -> bool {
        self.session(combatant).is_some()
    }

    /// Seconds until the cooldown elapses, if it has not yet
    pub fn cooldown_remaining(&self, now: f32) -> Option<f32> {
        let since = now - self.activated_at?;
        (since <= self.cooldown).then(|| self.cooldown - since)
    }

    /// Whole seconds left on the cooldown, zero before the first activation.
    /// Negative once the cooldown has elapsed.
    fn seconds_to_wait(&self, now: f32) -> i32 {
        self.activated_at
            .map_or(0, |t| (self.cooldown - (now - t)) as i32)
    }

    /// Try to enrage every ally around `leader`.
    ///
    /// `campaign` is `None` in custom battles: the activation is free and uses
    /// the default radius. All guards run before anything is mutated.
    pub fn request_activation<B>(
        &mut self,
        now: f32,
        leader: Id,
        mode: RageMode,
        battle: &mut B,
        campaign: Option<&mut dyn Campaign>,
        display: &mut impl StatusDisplay,
    ) -> Result<Activation, RageError>
    where
        B: Battle<Id = Id>,
    {
        if let Some(remaining) = self.cooldown_remaining(now) {
            let seconds = remaining as i32;
            display.show(StatusMessage::CooldownRemaining { seconds });
            return Err(RageError::CooldownActive { remaining: seconds });
        }
        if self.is_active() {
            // super rage can cool down faster than it lasts
            let seconds = (self.duration - (now - self.activated_at.unwrap_or(now))) as i32;
            display.show(StatusMessage::CooldownRemaining { seconds });
            return Err(RageError::CooldownActive { remaining: seconds });
        }

        let (Some(center), Some(team)) = (battle.position(leader), battle.team(leader)) else {
            warn!("Rage requested by {:?}, which is not in the battle", leader);
            display.show(StatusMessage::CooldownRemaining {
                seconds: self.seconds_to_wait(now),
            });
            return Err(RageError::LeaderUnavailable);
        };
        if !battle.is_active(leader) {
            warn!("Rage requested by inactive combatant {:?}", leader);
            display.show(StatusMessage::CooldownRemaining {
                seconds: self.seconds_to_wait(now),
            });
            return Err(RageError::LeaderUnavailable);
        }

        let mut cost = 0.0;
        let mut leadership = None;
        if let Some(campaign) = campaign {
            let required = self.settings.cost(mode);
            let actual = campaign.influence();
            if actual < required {
                display.show(StatusMessage::InsufficientInfluence { required, actual });
                return Err(RageError::InsufficientInfluence { required, actual });
            }
            campaign.spend_influence(required);
            cost = required;
            leadership = Some(campaign.leadership());
        }

        let timings = self.settings.timings(mode);
        self.duration = timings.duration;
        self.cooldown = timings.cooldown;

        battle.yell(leader);
        self.activated_at = Some(now);
        self.phase = RagePhase::Active;
        self.last_displayed_countdown = timings.duration.ceil() as i32;

        let radius = self.settings.radius(leadership);
        for ally in battle.nearby_allies(center, radius, team) {
            if self.is_enraged(ally) {
                continue;
            }
            match self.enrage(ally, battle) {
                Ok(session) => self.sessions.push(session),
                Err(e) => warn!("Skipping {:?}: {}", ally, e),
            }
        }

        let affected = self.sessions.len();
        display.show(StatusMessage::Activated {
            affected,
            radius,
            duration: self.duration,
        });
        info!(
            "Rage ({:?}) activated at {:.2}s: {} combatants, radius {}, {}s duration, {}s cooldown, cost {}",
            mode, now, affected, radius, self.duration, self.cooldown, cost
        );

        Ok(Activation {
            mode,
            affected,
            radius,
            duration: self.duration,
            cooldown: self.cooldown,
            cost,
        })
    }

    fn enrage<B>(&self, combatant: Id, battle: &mut B) -> Result<OverrideSession<Id>, RageError>
    where
        B: Battle<Id = Id>,
    {
        let pending = OverrideSession::capture(battle, combatant)?;

        if let Some(attributes) = battle.attributes_mut(combatant) {
            attributes.apply_changes(&RAGE_ATTRIBUTE_CHANGES);
        }
        battle.add_morale(combatant, RAGE_MORALE_BONUS);
        battle.update_driven_attributes(combatant);

        let session = pending.commit(battle)?;
        battle.yell(combatant);
        Ok(session)
    }

    /// Reset signal from the battle. Marks the combatant's session for repair.
    ///
    /// Returns whether the combatant had a session.
    pub fn on_attribute_reset(&mut self, combatant: Id) -> bool {
        match self.sessions.iter_mut().find(|s| s.combatant() == combatant) {
            Some(session) => {
                debug!("Driven attributes of {:?} were reset during rage", combatant);
                session.mark_corrupted();
                true
            }
            None => false,
        }
    }

    /// Per-tick update: repair corrupted sessions, run the countdown, expire.
    pub fn tick<B, R>(&mut self, now: f32, battle: &mut B, display: &mut impl StatusDisplay, rng: &mut R)
    where
        B: Battle<Id = Id>,
        R: Rng,
    {
        if !self.is_active() {
            return;
        }
        let Some(activated_at) = self.activated_at else {
            return;
        };

        self.sessions.retain_mut(|session| match session.poll(battle) {
            Ok(_) => true,
            Err(e) => {
                warn!("Dropping rage session: {}", e);
                false
            }
        });
        for session in &self.sessions {
            if rng.gen_range(0..RAGE_YELL_ONE_IN) == 0 {
                battle.yell(session.combatant());
            }
        }

        let remaining = (self.duration - (now - activated_at)).ceil() as i32;
        if remaining <= 0 {
            self.finish(battle, display);
            return;
        }
        if remaining != self.last_displayed_countdown {
            if remaining % COUNTDOWN_STEP == 0 {
                display.show(StatusMessage::Countdown { remaining });
            }
            self.last_displayed_countdown = remaining;
        }
    }

    /// Restore every enraged combatant and go back to Idle
    fn finish<B>(&mut self, battle: &mut B, display: &mut impl StatusDisplay)
    where
        B: Battle<Id = Id>,
    {
        let restored = self.sessions.len();
        for session in self.sessions.drain(..) {
            if let Err(e) = session.release(battle) {
                warn!("Could not restore attributes: {}", e);
            }
        }
        self.phase = RagePhase::Idle;
        self.last_displayed_countdown = 0;
        display.show(StatusMessage::Finished);
        info!("Rage finished, {} combatants restored", restored);
    }
}
