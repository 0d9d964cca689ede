//! Attribute override sessions
//!
//! A session keeps an enraged combatant's attributes enraged for as long as
//! the effect lasts, even though the simulation rebuilds driven attributes
//! whenever the combatant changes weapon or mounts/dismounts.
//!
//! Lifecycle:
//! 1. [`OverrideSession::capture`] snapshots the pristine attributes.
//! 2. The controller buffs the live bundle.
//! 3. [`PendingOverride::commit`] snapshots the buffed bundle and subscribes
//!    to reset signals.
//! 4. Reset signals only mark the session corrupted; [`OverrideSession::poll`]
//!    writes the buffed snapshot back on the next tick.
//! 5. [`OverrideSession::release`] restores the pristine snapshot.
//!
//! The combatant must stay in the battle for the life of its session. If it
//! disappears, `poll` and `release` report [`RageError::StaleCombatant`] and
//! write nothing.

use bevy::log::debug;

use super::attributes::AttributeBundle;
use super::battle::Battle;
use crate::error::RageError;

fn stale<Id: std::fmt::Debug>(id: Id) -> RageError {
    RageError::StaleCombatant(format!("{:?}", id))
}

/// Pristine snapshot taken, override not yet committed
#[derive(Debug, Clone)]
pub struct PendingOverride<Id> {
    combatant: Id,
    pristine: AttributeBundle,
}

/// Active override of one combatant's driven attributes
#[derive(Debug, Clone)]
pub struct OverrideSession<Id> {
    combatant: Id,
    pristine: AttributeBundle,
    overridden: AttributeBundle,
    corrupted: bool,
}

impl<Id: Copy + Eq + std::hash::Hash + std::fmt::Debug> OverrideSession<Id> {
    /// Copy the combatant's live attributes. Does not touch the combatant.
    pub fn capture<B>(battle: &B, combatant: Id) -> Result<PendingOverride<Id>, RageError>
    where
        B: Battle<Id = Id>,
    {
        let pristine = *battle.attributes(combatant).ok_or_else(|| stale(combatant))?;
        Ok(PendingOverride {
            combatant,
            pristine,
        })
    }

    pub fn combatant(&self) -> Id {
        self.combatant
    }

    pub fn pristine(&self) -> &AttributeBundle {
        &self.pristine
    }

    pub fn overridden(&self) -> &AttributeBundle {
        &self.overridden
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    /// Reset-signal callback.
    ///
    /// Must not write to the live bundle: the signal can fire while the
    /// simulation is halfway through rebuilding it.
    pub fn mark_corrupted(&mut self) {
        self.corrupted = true;
    }

    /// Repair the live bundle if a reset happened since the last poll.
    ///
    /// Returns whether a repair write happened.
    pub fn poll<B>(&mut self, battle: &mut B) -> Result<bool, RageError>
    where
        B: Battle<Id = Id>,
    {
        if !self.corrupted {
            return Ok(false);
        }

        let live = battle
            .attributes_mut(self.combatant)
            .ok_or_else(|| stale(self.combatant))?;
        let diverged = live.diff(&self.overridden).len();
        *live = self.overridden;
        battle.update_driven_attributes(self.combatant);
        self.corrupted = false;

        debug!(
            "Repaired rage attributes of {:?} ({} fields diverged)",
            self.combatant, diverged
        );
        Ok(true)
    }

    /// Restore the pristine snapshot and stop listening for resets
    pub fn release<B>(self, battle: &mut B) -> Result<(), RageError>
    where
        B: Battle<Id = Id>,
    {
        battle.unwatch_attribute_resets(self.combatant);
        let live = battle
            .attributes_mut(self.combatant)
            .ok_or_else(|| stale(self.combatant))?;
        *live = self.pristine;
        battle.update_driven_attributes(self.combatant);
        Ok(())
    }
}

impl<Id: Copy + Eq + std::hash::Hash + std::fmt::Debug> PendingOverride<Id> {
    pub fn combatant(&self) -> Id {
        self.combatant
    }

    pub fn pristine(&self) -> &AttributeBundle {
        &self.pristine
    }

    /// Snapshot the (now buffed) live attributes and subscribe to resets
    pub fn commit<B>(self, battle: &mut B) -> Result<OverrideSession<Id>, RageError>
    where
        B: Battle<Id = Id>,
    {
        let overridden = *battle
            .attributes(self.combatant)
            .ok_or_else(|| stale(self.combatant))?;
        battle.watch_attribute_resets(self.combatant);

        Ok(OverrideSession {
            combatant: self.combatant,
            pristine: self.pristine,
            overridden,
            corrupted: false,
        })
    }
}
