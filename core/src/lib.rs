#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Arena engine.
//!
//! This crate defines the entity state model (combatants, the player's
//! weapon, hostile units), the identifiers and notifications that connect the
//! orchestration engine with its host, the monotonic [`Clock`] abstraction and
//! the [`GameTuning`] configuration. It performs no orchestration itself: the
//! engine owns every mutable entity and the wave progression system only
//! produces new hostile units in batches.

mod clock;
mod combatant;
mod hostile;
mod tuning;
mod weapon;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use combatant::{Combatant, Player};
pub use hostile::HostileUnit;
pub use tuning::{
    GameTuning, HostileTuning, PlayerTuning, SpawnTuning, TuningError, WaveTuning, WeaponTuning,
};
pub use weapon::Weapon;

/// Abstract 3-D coordinate. The core stores and copies positions but never
/// resolves them against geometry.
pub type Position = glam::Vec3;

/// Lifecycle phase of the orchestration engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No game has been started yet.
    Idle,
    /// The game started and the first wave is counting down.
    PreWaveCountdown,
    /// A wave is in progress and hostiles remain in the roster.
    WaveActive,
    /// The previous wave was cleared and the next one is counting down.
    WaveClearedCountdown,
    /// The player died; only a restart leaves this phase.
    GameOver,
}

impl Phase {
    /// Reports whether phase timers advance while in this phase.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(
            self,
            Self::PreWaveCountdown | Self::WaveActive | Self::WaveClearedCountdown
        )
    }
}

/// Notifications emitted by the engine towards its host.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new wave began. Always precedes the spawn notifications of that wave.
    WaveStarted {
        /// One-based number of the wave that started.
        wave: WaveNumber,
    },
    /// A hostile unit joined the roster.
    HostileSpawned {
        /// State of the unit at spawn time.
        hostile: HostileSnapshot,
    },
    /// A hostile unit was hit. Precedes [`Event::HostileDied`] when the hit
    /// was lethal.
    HostileDamaged {
        /// State of the unit after the damage was applied.
        hostile: HostileSnapshot,
    },
    /// A hostile unit died and left the roster.
    HostileDied {
        /// Final state of the unit.
        hostile: HostileSnapshot,
    },
    /// The player's health reached zero.
    PlayerDied,
    /// One second tick of the final two seconds of a countdown.
    CountdownBeep,
}

/// Opaque handle issued by the engine when a hostile unit spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a new hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Issues monotonically increasing [`HostileId`] values.
#[derive(Clone, Debug, Default)]
pub struct HostileIdAllocator {
    next: u32,
}

impl HostileIdAllocator {
    /// Creates an allocator whose first identifier is zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh identifier that has never been issued by this allocator.
    pub fn allocate(&mut self) -> HostileId {
        let id = HostileId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// One-based wave number; zero means no wave has started yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Wave number reported before the first wave starts.
    pub const NONE: Self = Self(0);

    /// Creates a new wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying wave index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether this number refers to an actual wave.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.0 > 0
    }
}

/// Immutable representation of a hostile unit handed to notification hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostileSnapshot {
    /// Handle assigned to the unit at spawn time.
    pub id: HostileId,
    /// Last position written for the unit.
    pub position: Position,
    /// Movement speed assigned by the wave that spawned the unit.
    pub speed: f32,
    /// Remaining health.
    pub health: u32,
    /// Health the unit spawned with.
    pub max_health: u32,
}
