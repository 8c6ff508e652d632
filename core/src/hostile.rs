//! Hostile unit state.

use std::{num::NonZeroU32, time::Duration};

use crate::{Combatant, HostileId, HostileSnapshot, Position};

/// A combatant with a position, a movement speed and an attack cooldown that
/// is tracked independently of the player's weapon.
#[derive(Clone, Debug, PartialEq)]
pub struct HostileUnit {
    id: HostileId,
    combatant: Combatant,
    position: Position,
    speed: f32,
    last_attack: Option<Duration>,
}

impl HostileUnit {
    /// Creates a unit at full health that has never attacked.
    #[must_use]
    pub fn new(id: HostileId, position: Position, speed: f32, max_health: NonZeroU32) -> Self {
        Self {
            id,
            combatant: Combatant::new(max_health),
            position,
            speed,
            last_attack: None,
        }
    }

    /// Handle issued when the unit spawned.
    #[must_use]
    pub const fn id(&self) -> HostileId {
        self.id
    }

    /// Health pool backing the unit.
    #[must_use]
    pub const fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.combatant.health()
    }

    /// Reports whether the unit is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    /// Last position written for the unit.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Overwrites the unit's position.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Movement speed in world units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Applies damage; returns `true` when this call killed the unit.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.combatant.take_damage(amount)
    }

    /// Reports whether `cooldown` elapsed since the unit's previous attack.
    #[must_use]
    pub fn can_attack(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_attack
            .map_or(true, |last| now.saturating_sub(last) >= cooldown)
    }

    /// Records an attack at `now`.
    pub fn perform_attack(&mut self, now: Duration) {
        self.last_attack = Some(now);
    }

    /// Captures the unit's current state.
    #[must_use]
    pub fn snapshot(&self) -> HostileSnapshot {
        HostileSnapshot {
            id: self.id,
            position: self.position,
            speed: self.speed,
            health: self.combatant.health(),
            max_health: self.combatant.max_health(),
        }
    }
}
