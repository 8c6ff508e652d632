//! Health bookkeeping shared by the player and hostile units.

use std::num::NonZeroU32;

/// Health pool that can be damaged, healed and reset.
///
/// Health never leaves `0..=max_health`. Once it reaches zero the combatant is
/// dead and every mutation except [`Combatant::reset`] is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combatant {
    health: u32,
    max_health: u32,
}

impl Combatant {
    /// Creates a combatant at full health.
    #[must_use]
    pub const fn new(max_health: NonZeroU32) -> Self {
        Self {
            health: max_health.get(),
            max_health: max_health.get(),
        }
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Health restored by [`Combatant::reset`].
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Reports whether any health remains.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Removes `amount` health, saturating at zero.
    ///
    /// Returns `true` only when this call brought the combatant from alive to
    /// dead, so callers observe the death edge exactly once.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        !self.is_alive()
    }

    /// Restores `amount` health, saturating at the maximum. Dead combatants
    /// stay dead.
    pub fn heal(&mut self, amount: u32) {
        if !self.is_alive() {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Restores full health, reviving a dead combatant.
    pub fn reset(&mut self) {
        self.health = self.max_health;
    }
}

/// The player: a combatant with a kill counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    combatant: Combatant,
    kills: u32,
}

impl Player {
    /// Creates a player at full health with no kills.
    #[must_use]
    pub const fn new(max_health: NonZeroU32) -> Self {
        Self {
            combatant: Combatant::new(max_health),
            kills: 0,
        }
    }

    /// Health pool backing the player.
    #[must_use]
    pub const fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.combatant.health()
    }

    /// Reports whether the player is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    /// Number of confirmed hostile deaths credited to the player.
    #[must_use]
    pub const fn kills(&self) -> u32 {
        self.kills
    }

    /// Applies damage; returns `true` when this call killed the player.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.combatant.take_damage(amount)
    }

    /// Restores health up to the maximum while alive.
    pub fn heal(&mut self, amount: u32) {
        self.combatant.heal(amount);
    }

    /// Credits one confirmed kill.
    pub fn add_kill(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    /// Restores full health and clears the kill counter.
    pub fn reset(&mut self) {
        self.combatant.reset();
        self.kills = 0;
    }
}
