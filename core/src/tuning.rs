//! Tuning constants for a game session.
//!
//! Every section deserializes with defaults so hosts may override only the
//! values they care about. Durations are stored as fractional seconds to keep
//! configuration files readable and are exposed as [`Duration`] accessors.

use std::{num::NonZeroU32, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => panic!("tuning constant must be non-zero"),
    }
}

const DEFAULT_PLAYER_HEALTH: NonZeroU32 = non_zero(100);
const DEFAULT_HOSTILE_HEALTH: NonZeroU32 = non_zero(100);

/// Reasons a [`GameTuning`] value is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TuningError {
    /// A floating point setting is NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NonFinite {
        /// Dotted path of the offending setting.
        field: &'static str,
    },
    /// A setting that may not be negative is negative.
    #[error("`{field}` must not be negative (got {value})")]
    Negative {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A setting that must be strictly positive is zero or negative.
    #[error("`{field}` must be greater than zero (got {value})")]
    NotPositive {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The spawn generator was given no placement attempts.
    #[error("`spawn.max_attempts` must be at least 1")]
    NoSpawnAttempts,
}

/// Complete set of tuning constants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Player settings.
    pub player: PlayerTuning,
    /// Weapon settings.
    pub weapon: WeaponTuning,
    /// Hostile unit settings.
    pub hostile: HostileTuning,
    /// Wave progression and countdown settings.
    pub waves: WaveTuning,
    /// Spawn placement settings.
    pub spawn: SpawnTuning,
}

impl GameTuning {
    /// Checks every setting, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), TuningError> {
        non_negative("weapon.fire_rate_secs", self.weapon.fire_rate_secs)?;
        non_negative("weapon.range", self.weapon.range)?;
        non_negative(
            "hostile.attack_cooldown_secs",
            self.hostile.attack_cooldown_secs,
        )?;
        non_negative("hostile.contact_distance", self.hostile.contact_distance)?;
        non_negative("hostile.detection_range", self.hostile.detection_range)?;
        non_negative("waves.base_speed", self.waves.base_speed)?;
        non_negative("waves.speed_increment", self.waves.speed_increment)?;
        non_negative("waves.start_delay_secs", self.waves.start_delay_secs)?;
        non_negative("waves.clear_delay_secs", self.waves.clear_delay_secs)?;
        positive("spawn.arena_size", self.spawn.arena_size)?;
        non_negative("spawn.margin", self.spawn.margin)?;
        non_negative("spawn.min_player_distance", self.spawn.min_player_distance)?;
        if self.spawn.max_attempts == 0 {
            return Err(TuningError::NoSpawnAttempts);
        }
        Ok(())
    }
}

/// Player settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Health the player starts every game with.
    pub max_health: NonZeroU32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_PLAYER_HEALTH,
        }
    }
}

/// Weapon settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Minimum seconds between two shots.
    pub fire_rate_secs: f32,
    /// Damage dealt per hit.
    pub damage: u32,
    /// Maximum hit distance, enforced by the host.
    pub range: f32,
}

impl WeaponTuning {
    /// Minimum time between two shots.
    #[must_use]
    pub fn fire_rate(&self) -> Duration {
        seconds(self.fire_rate_secs)
    }
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_rate_secs: 0.15,
            damage: 10,
            range: 100.0,
        }
    }
}

/// Hostile unit settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTuning {
    /// Health every hostile spawns with.
    pub max_health: NonZeroU32,
    /// Damage dealt to the player by one contact attack.
    pub damage: u32,
    /// Minimum seconds between two attacks of the same unit.
    pub attack_cooldown_secs: f32,
    /// Distance at which a chasing unit stops and attacks. Read by hosts that
    /// move hostiles; the engine leaves range checks to them.
    pub contact_distance: f32,
    /// Distance within which a unit notices the player and starts chasing.
    pub detection_range: f32,
}

impl HostileTuning {
    /// Minimum time between two attacks of the same unit.
    #[must_use]
    pub fn attack_cooldown(&self) -> Duration {
        seconds(self.attack_cooldown_secs)
    }
}

impl Default for HostileTuning {
    fn default() -> Self {
        Self {
            max_health: DEFAULT_HOSTILE_HEALTH,
            damage: 20,
            attack_cooldown_secs: 1.0,
            contact_distance: 2.0,
            detection_range: 40.0,
        }
    }
}

/// Wave progression and countdown settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Hostile count of the first wave.
    pub base_count: u32,
    /// Additional hostiles per subsequent wave.
    pub count_increment: u32,
    /// Hostile speed during the first wave.
    pub base_speed: f32,
    /// Additional hostile speed per subsequent wave.
    pub speed_increment: f32,
    /// Seconds between starting a game and the first wave.
    pub start_delay_secs: f32,
    /// Seconds between clearing a wave and the next one.
    pub clear_delay_secs: f32,
}

impl WaveTuning {
    /// Delay between starting a game and the first wave.
    #[must_use]
    pub fn start_delay(&self) -> Duration {
        seconds(self.start_delay_secs)
    }

    /// Delay between clearing a wave and the next one.
    #[must_use]
    pub fn clear_delay(&self) -> Duration {
        seconds(self.clear_delay_secs)
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_count: 5,
            count_increment: 3,
            base_speed: 5.0,
            speed_increment: 0.5,
            start_delay_secs: 2.0,
            clear_delay_secs: 3.0,
        }
    }
}

/// Spawn placement settings for the arena-bounded generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Side length of the square arena centred on the origin.
    pub arena_size: f32,
    /// Distance kept between spawns and the arena walls.
    pub margin: f32,
    /// Preferred minimum horizontal distance between a spawn and the player.
    pub min_player_distance: f32,
    /// Samples drawn before the last one is accepted regardless of distance.
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            arena_size: 64.0,
            margin: 2.0,
            min_player_distance: 8.0,
            max_attempts: 10,
        }
    }
}

fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(TuningError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(TuningError::NotPositive { field, value });
    }
    Ok(())
}
