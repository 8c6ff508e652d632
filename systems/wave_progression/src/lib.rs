#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave progression policy: how many hostiles a wave holds, how fast they
//! move, and where they appear.
//!
//! The system owns no entities. [`WaveProgression::spawn_wave`] builds a batch
//! of [`HostileUnit`] values and hands it back to the caller, which decides
//! how to merge it into its roster.

use std::num::NonZeroU32;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use wave_arena_core::{
    GameTuning, HostileIdAllocator, HostileUnit, Position, SpawnTuning, WaveNumber, WaveTuning,
};

const RNG_STREAM_SPAWN: &str = "spawn-positions";

/// Configuration parameters required to construct the progression system.
#[derive(Clone, Debug)]
pub struct Config {
    waves: WaveTuning,
    spawn: SpawnTuning,
    hostile_health: NonZeroU32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from the session tuning and a spawn seed.
    #[must_use]
    pub fn new(tuning: &GameTuning, rng_seed: u64) -> Self {
        Self {
            waves: tuning.waves.clone(),
            spawn: tuning.spawn.clone(),
            hostile_health: tuning.hostile.max_health,
            rng_seed,
        }
    }
}

/// Linear wave progression with arena-bounded spawn placement.
#[derive(Debug)]
pub struct WaveProgression {
    waves: WaveTuning,
    spawn: SpawnTuning,
    hostile_health: NonZeroU32,
    rng_seed: u64,
    current_wave: WaveNumber,
}

impl WaveProgression {
    /// Creates a progression that has not started any wave.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            waves: config.waves,
            spawn: config.spawn,
            hostile_health: config.hostile_health,
            rng_seed: config.rng_seed,
            current_wave: WaveNumber::NONE,
        }
    }

    /// Number of the most recently started wave.
    #[must_use]
    pub const fn current_wave(&self) -> WaveNumber {
        self.current_wave
    }

    /// Hostile count for the one-based `wave`: `base + (wave - 1) * increment`.
    ///
    /// [`WaveNumber::NONE`] is treated like the first wave.
    #[must_use]
    pub fn enemy_count_for_wave(&self, wave: WaveNumber) -> u32 {
        let extra_waves = wave.get().saturating_sub(1);
        self.waves
            .base_count
            .saturating_add(extra_waves.saturating_mul(self.waves.count_increment))
    }

    /// Hostile speed for the one-based `wave`: `base + (wave - 1) * increment`.
    #[must_use]
    pub fn enemy_speed_for_wave(&self, wave: WaveNumber) -> f32 {
        let extra_waves = wave.get().saturating_sub(1);
        self.waves.base_speed + extra_waves as f32 * self.waves.speed_increment
    }

    /// Moves to the next wave and returns its number.
    pub fn advance_to_next_wave(&mut self) -> WaveNumber {
        self.current_wave = WaveNumber::new(self.current_wave.get().saturating_add(1));
        self.current_wave
    }

    /// Rewinds to "no wave yet".
    pub fn reset(&mut self) {
        self.current_wave = WaveNumber::NONE;
    }

    /// Builds the hostiles of `wave`, keeping spawns away from `player_position`.
    ///
    /// Placement is deterministic for a given seed and wave number, regardless
    /// of how many waves were generated before.
    #[must_use]
    pub fn spawn_wave(
        &self,
        wave: WaveNumber,
        player_position: Position,
        ids: &mut HostileIdAllocator,
    ) -> Vec<HostileUnit> {
        let count = self.enemy_count_for_wave(wave);
        let speed = self.enemy_speed_for_wave(wave);
        let mut rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.rng_seed, wave));

        let batch: Vec<HostileUnit> = (0..count)
            .map(|_| {
                let position = generate_spawn_position(&mut rng, &self.spawn, player_position);
                HostileUnit::new(ids.allocate(), position, speed, self.hostile_health)
            })
            .collect();

        log::debug!(
            "wave {}: generated {} hostiles at speed {:.2}",
            wave.get(),
            batch.len(),
            speed
        );
        batch
    }
}

/// Samples a position inside the margin-shrunk arena, preferring samples at
/// least `min_player_distance` away from `player` on the horizontal plane.
///
/// After `max_attempts` rejected samples the last one is returned anyway.
pub fn generate_spawn_position<R: Rng>(
    rng: &mut R,
    spawn: &SpawnTuning,
    player: Position,
) -> Position {
    let half_extent = (spawn.arena_size / 2.0 - spawn.margin).max(0.0);
    let attempts = spawn.max_attempts.max(1);

    let mut candidate = sample_floor_point(rng, half_extent);
    for _ in 1..attempts {
        if horizontal_distance(candidate, player) >= spawn.min_player_distance {
            return candidate;
        }
        candidate = sample_floor_point(rng, half_extent);
    }

    if horizontal_distance(candidate, player) < spawn.min_player_distance {
        log::debug!(
            "spawn placement exhausted {attempts} attempts; accepting ({:.1}, {:.1})",
            candidate.x,
            candidate.z
        );
    }
    candidate
}

fn sample_floor_point<R: Rng>(rng: &mut R, half_extent: f32) -> Position {
    if half_extent <= 0.0 {
        return Position::ZERO;
    }
    let x = rng.gen_range(-half_extent..=half_extent);
    let z = rng.gen_range(-half_extent..=half_extent);
    Position::new(x, 0.0, z)
}

fn horizontal_distance(a: Position, b: Position) -> f32 {
    (a.x - b.x).hypot(a.z - b.z)
}

fn derive_wave_seed(global_seed: u64, wave: WaveNumber) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(wave.get().to_le_bytes());
    hasher.update(RNG_STREAM_SPAWN.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progression() -> WaveProgression {
        WaveProgression::new(Config::new(&GameTuning::default(), 0x5eed))
    }

    #[test]
    fn first_wave_uses_base_values() {
        let system = progression();
        assert_eq!(system.enemy_count_for_wave(WaveNumber::new(1)), 5);
        assert!((system.enemy_speed_for_wave(WaveNumber::new(1)) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn later_waves_grow_linearly() {
        let system = progression();
        for n in 1..50 {
            let current = system.enemy_count_for_wave(WaveNumber::new(n));
            let next = system.enemy_count_for_wave(WaveNumber::new(n + 1));
            assert_eq!(next - current, 3);
        }
        assert!((system.enemy_speed_for_wave(WaveNumber::new(3)) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn advance_and_reset_move_the_cursor() {
        let mut system = progression();
        assert_eq!(system.current_wave(), WaveNumber::NONE);
        assert_eq!(system.advance_to_next_wave(), WaveNumber::new(1));
        assert_eq!(system.advance_to_next_wave(), WaveNumber::new(2));
        system.reset();
        assert_eq!(system.current_wave(), WaveNumber::NONE);
    }

    #[test]
    fn unreachable_distance_falls_back_to_last_sample() {
        let spawn = SpawnTuning {
            arena_size: 10.0,
            margin: 1.0,
            min_player_distance: 1_000.0,
            max_attempts: 10,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let position = generate_spawn_position(&mut rng, &spawn, Position::ZERO);
        assert!(position.x.abs() <= 4.0);
        assert!(position.z.abs() <= 4.0);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn collapsed_arena_spawns_at_origin() {
        let spawn = SpawnTuning {
            arena_size: 2.0,
            margin: 5.0,
            min_player_distance: 0.0,
            max_attempts: 3,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let position = generate_spawn_position(&mut rng, &spawn, Position::new(3.0, 0.0, 3.0));
        assert_eq!(position, Position::ZERO);
    }

    #[test]
    fn wave_seeds_differ_per_wave() {
        assert_ne!(
            derive_wave_seed(7, WaveNumber::new(1)),
            derive_wave_seed(7, WaveNumber::new(2))
        );
    }
}
