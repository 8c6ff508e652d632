//! Fire-rate gated damage source wielded by the player.

use std::time::Duration;

/// Rate limiter plus damage and range constants. Holds no ammunition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weapon {
    fire_rate: Duration,
    damage: u32,
    range: f32,
    last_fired: Option<Duration>,
}

impl Weapon {
    /// Creates a weapon that has never fired.
    #[must_use]
    pub const fn new(fire_rate: Duration, damage: u32, range: f32) -> Self {
        Self {
            fire_rate,
            damage,
            range,
            last_fired: None,
        }
    }

    /// Minimum time between two shots.
    #[must_use]
    pub const fn fire_rate(&self) -> Duration {
        self.fire_rate
    }

    /// Damage dealt by a single hit.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Maximum distance at which the host should register hits.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Clock reading of the most recent shot, if any.
    #[must_use]
    pub const fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    /// Reports whether enough time passed since the previous shot.
    #[must_use]
    pub fn can_fire(&self, now: Duration) -> bool {
        self.last_fired
            .map_or(true, |last| now.saturating_sub(last) >= self.fire_rate)
    }

    /// Records a shot at `now`. Does not check [`Weapon::can_fire`].
    pub fn fire(&mut self, now: Duration) {
        self.last_fired = Some(now);
    }

    /// Forgets the previous shot so the next one is permitted immediately.
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}
