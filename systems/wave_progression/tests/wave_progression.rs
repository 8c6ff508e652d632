use std::collections::HashSet;

use wave_arena_core::{GameTuning, HostileIdAllocator, Position, WaveNumber};
use wave_arena_system_wave_progression::{Config, WaveProgression};

const SEED: u64 = 0x4d59_5df4_d0f3_3173;

#[test]
fn spawn_wave_builds_configured_batch() {
    let tuning = GameTuning::default();
    let system = WaveProgression::new(Config::new(&tuning, SEED));
    let mut ids = HostileIdAllocator::new();

    let wave = WaveNumber::new(3);
    let batch = system.spawn_wave(wave, Position::ZERO, &mut ids);

    assert_eq!(batch.len(), 11, "5 + 2 * 3 hostiles expected on wave 3");
    for hostile in &batch {
        assert!(hostile.is_alive());
        assert_eq!(hostile.health(), tuning.hostile.max_health.get());
        assert!((hostile.speed() - 6.0).abs() < 1e-6);
    }

    let unique: HashSet<_> = batch.iter().map(|hostile| hostile.id()).collect();
    assert_eq!(unique.len(), batch.len(), "handles must be unique");
}

#[test]
fn spawns_stay_inside_arena_and_away_from_player() {
    let tuning = GameTuning::default();
    let system = WaveProgression::new(Config::new(&tuning, SEED));
    let mut ids = HostileIdAllocator::new();
    let player = Position::new(10.0, 1.5, -6.0);
    let half_extent = tuning.spawn.arena_size / 2.0 - tuning.spawn.margin;

    for wave in 1..=8 {
        for hostile in system.spawn_wave(WaveNumber::new(wave), player, &mut ids) {
            let position = hostile.position();
            assert!(position.x.abs() <= half_extent, "x out of arena: {position:?}");
            assert!(position.z.abs() <= half_extent, "z out of arena: {position:?}");
            assert_eq!(position.y, 0.0);

            let distance = (position.x - player.x).hypot(position.z - player.z);
            assert!(
                distance >= tuning.spawn.min_player_distance,
                "spawn {position:?} too close to player"
            );
        }
    }
}

#[test]
fn identical_seeds_replay_identical_waves() {
    let tuning = GameTuning::default();
    let first = WaveProgression::new(Config::new(&tuning, SEED));
    let second = WaveProgression::new(Config::new(&tuning, SEED));

    let mut first_ids = HostileIdAllocator::new();
    let mut second_ids = HostileIdAllocator::new();

    // Generating wave 1 first must not perturb wave 2.
    let _ = first.spawn_wave(WaveNumber::new(1), Position::ZERO, &mut first_ids);
    let from_first = first.spawn_wave(WaveNumber::new(2), Position::ZERO, &mut first_ids);
    let from_second = second.spawn_wave(WaveNumber::new(2), Position::ZERO, &mut second_ids);

    let first_positions: Vec<_> = from_first.iter().map(|hostile| hostile.position()).collect();
    let second_positions: Vec<_> = from_second
        .iter()
        .map(|hostile| hostile.position())
        .collect();
    assert_eq!(first_positions, second_positions);
}

#[test]
fn different_seeds_place_hostiles_differently() {
    let tuning = GameTuning::default();
    let first = WaveProgression::new(Config::new(&tuning, 1));
    let second = WaveProgression::new(Config::new(&tuning, 2));
    let mut ids = HostileIdAllocator::new();

    let a = first.spawn_wave(WaveNumber::new(1), Position::ZERO, &mut ids);
    let b = second.spawn_wave(WaveNumber::new(1), Position::ZERO, &mut ids);
    assert_ne!(a[0].position(), b[0].position());
}

#[test]
fn empty_base_count_yields_empty_first_wave() {
    let mut tuning = GameTuning::default();
    tuning.waves.base_count = 0;
    let system = WaveProgression::new(Config::new(&tuning, SEED));
    let mut ids = HostileIdAllocator::new();

    assert!(system
        .spawn_wave(WaveNumber::new(1), Position::ZERO, &mut ids)
        .is_empty());
    assert_eq!(system.enemy_count_for_wave(WaveNumber::new(2)), 3);
}
