#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestration engine for Wave Arena.
//!
//! The [`Engine`] owns the player, the weapon and the roster of live hostile
//! units, and sequences the game through its phases: a countdown before the
//! first wave, active waves, a countdown after each cleared wave, and game
//! over. Hosts drive it by calling [`Engine::update`] once per frame and the
//! combat methods whenever their own collision or input code detects an
//! event. Notifications flow back through the [`Hooks`] supplied at
//! construction; read access goes through the [`query`] module.

mod countdown;
mod hooks;

pub use hooks::Hooks;

use std::time::Duration;

use countdown::CountdownBeeper;
use wave_arena_core::{
    Clock, Event, GameTuning, HostileId, HostileIdAllocator, HostileUnit, Player, Position,
    TuningError, Weapon,
};
use wave_arena_system_wave_progression::{self as progression, WaveProgression};

/// Accessor for the player's current position, consulted when a wave spawns.
pub trait PlayerPosition {
    /// Where the player stands right now.
    fn current(&self) -> Position;
}

impl<F> PlayerPosition for F
where
    F: Fn() -> Position,
{
    fn current(&self) -> Position {
        self()
    }
}

/// Configuration parameters required to construct the engine.
#[derive(Clone, Debug, Default)]
pub struct Config {
    tuning: GameTuning,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from session tuning and a spawn seed.
    #[must_use]
    pub fn new(tuning: GameTuning, rng_seed: u64) -> Self {
        Self { tuning, rng_seed }
    }
}

/// Internal lifecycle state; each countdown carries its own start time so
/// exactly one phase timer can exist at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Idle,
    PreWaveCountdown { since: Duration },
    WaveActive,
    WaveClearedCountdown { since: Duration },
    GameOver,
}

/// Wave-based combat state machine.
pub struct Engine<C, P> {
    clock: C,
    player_position: P,
    hooks: Hooks,
    progression: WaveProgression,
    player: Player,
    weapon: Weapon,
    roster: Vec<HostileUnit>,
    ids: HostileIdAllocator,
    stage: Stage,
    beeper: CountdownBeeper,
    start_delay: Duration,
    clear_delay: Duration,
    hostile_damage: u32,
    hostile_attack_cooldown: Duration,
}

impl<C, P> Engine<C, P>
where
    C: Clock,
    P: PlayerPosition,
{
    /// Creates an idle engine after validating the configured tuning.
    pub fn new(
        config: Config,
        clock: C,
        player_position: P,
        hooks: Hooks,
    ) -> Result<Self, TuningError> {
        let tuning = config.tuning;
        tuning.validate()?;

        Ok(Self {
            clock,
            player_position,
            hooks,
            progression: WaveProgression::new(progression::Config::new(&tuning, config.rng_seed)),
            player: Player::new(tuning.player.max_health),
            weapon: Weapon::new(
                tuning.weapon.fire_rate(),
                tuning.weapon.damage,
                tuning.weapon.range,
            ),
            roster: Vec::new(),
            ids: HostileIdAllocator::new(),
            stage: Stage::Idle,
            beeper: CountdownBeeper::default(),
            start_delay: tuning.waves.start_delay(),
            clear_delay: tuning.waves.clear_delay(),
            hostile_damage: tuning.hostile.damage,
            hostile_attack_cooldown: tuning.hostile.attack_cooldown(),
        })
    }

    /// Starts a fresh game from any phase.
    ///
    /// Restores the player, clears the roster, the weapon cooldown, the wave
    /// counter and every countdown, then begins the pre-wave countdown.
    /// Hostile handles are never reused across games.
    pub fn start_game(&mut self) {
        let now = self.clock.now();
        if !self.roster.is_empty() {
            log::debug!("discarding {} hostiles from the previous game", self.roster.len());
        }
        self.player.reset();
        self.weapon.reset();
        self.roster.clear();
        self.progression.reset();
        self.beeper.clear();
        self.stage = Stage::PreWaveCountdown { since: now };
        log::info!("game started; first wave in {:.1}s", self.start_delay.as_secs_f32());
    }

    /// Advances phase timers using the injected clock.
    pub fn update(&mut self) {
        let now = self.clock.now();

        if let Stage::PreWaveCountdown { since } = self.stage {
            let elapsed = now.saturating_sub(since);
            if self.beeper.observe(self.start_delay, elapsed) {
                self.notify(Event::CountdownBeep);
            }
            if elapsed >= self.start_delay {
                self.start_next_wave();
            }
            return;
        }

        if self.stage == Stage::WaveActive && self.roster.is_empty() {
            log::info!(
                "wave {} cleared; next wave in {:.1}s",
                self.progression.current_wave().get(),
                self.clear_delay.as_secs_f32()
            );
            self.stage = Stage::WaveClearedCountdown { since: now };
            self.beeper.clear();
        }

        if let Stage::WaveClearedCountdown { since } = self.stage {
            let elapsed = now.saturating_sub(since);
            if self.beeper.observe(self.clear_delay, elapsed) {
                self.notify(Event::CountdownBeep);
            }
            if elapsed >= self.clear_delay {
                self.start_next_wave();
            }
        }
    }

    /// Fires the weapon if the player is alive and the weapon is ready.
    ///
    /// Hit detection belongs to the host; a successful shot applies no damage.
    pub fn attempt_shoot(&mut self) -> bool {
        if !self.player.is_alive() {
            return false;
        }
        let now = self.clock.now();
        if !self.weapon.can_fire(now) {
            return false;
        }
        self.weapon.fire(now);
        true
    }

    /// Applies `damage` to the hostile behind `id`.
    ///
    /// Every hit notifies the host with the unit's new state. Returns `true`
    /// when the hit killed the unit, which then leaves the roster, credits the
    /// player with one kill and triggers the death notification. Unknown or
    /// already dead handles are ignored, so duplicate hit reports are harmless.
    pub fn resolve_hit(&mut self, id: HostileId, damage: u32) -> bool {
        let Some(index) = self.roster.iter().position(|hostile| hostile.id() == id) else {
            return false;
        };

        let killed = self.roster[index].take_damage(damage);
        let hostile = self.roster[index].snapshot();
        log::debug!("hostile {} hit, {} health left", id.get(), hostile.health);
        self.notify(Event::HostileDamaged { hostile });
        if !killed {
            return false;
        }

        let _ = self.roster.remove(index);
        self.player.add_kill();
        log::debug!(
            "hostile {} died; {} remain, {} kills",
            id.get(),
            self.roster.len(),
            self.player.kills()
        );
        self.notify(Event::HostileDied { hostile });
        true
    }

    /// [`Engine::resolve_hit`] with the weapon's configured damage.
    pub fn resolve_weapon_hit(&mut self, id: HostileId) -> bool {
        self.resolve_hit(id, self.weapon.damage())
    }

    /// Applies incoming damage to the player. The killing blow ends the game
    /// and notifies the host once; later calls are ignored.
    pub fn resolve_player_damage(&mut self, amount: u32) {
        if !self.player.take_damage(amount) {
            return;
        }
        self.stage = Stage::GameOver;
        self.beeper.clear();
        log::info!(
            "player died on wave {} with {} kills",
            self.progression.current_wave().get(),
            self.player.kills()
        );
        self.notify(Event::PlayerDied);
    }

    /// Lets the hostile behind `id` strike the player if its attack cooldown
    /// elapsed. The host decides when a unit is in contact range.
    ///
    /// Returns `true` when the attack happened.
    pub fn hostile_attack(&mut self, id: HostileId) -> bool {
        if !query::phase(self).is_running() || !self.player.is_alive() {
            return false;
        }
        let now = self.clock.now();
        let cooldown = self.hostile_attack_cooldown;
        let Some(hostile) = self.roster.iter_mut().find(|hostile| hostile.id() == id) else {
            return false;
        };
        if !hostile.can_attack(now, cooldown) {
            return false;
        }
        hostile.perform_attack(now);
        log::debug!("hostile {} attacks for {}", id.get(), self.hostile_damage);
        self.resolve_player_damage(self.hostile_damage);
        true
    }

    /// Records the position the host moved a hostile to. Returns `false` for
    /// handles that are not in the roster.
    pub fn move_hostile(&mut self, id: HostileId, position: Position) -> bool {
        match self.roster.iter_mut().find(|hostile| hostile.id() == id) {
            Some(hostile) => {
                hostile.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Restores player health, capped at the maximum. Has no effect once the
    /// player is dead.
    pub fn heal_player(&mut self, amount: u32) {
        self.player.heal(amount);
    }

    fn start_next_wave(&mut self) {
        self.beeper.clear();
        let wave = self.progression.advance_to_next_wave();
        let player_position = self.player_position.current();
        let batch = self
            .progression
            .spawn_wave(wave, player_position, &mut self.ids);
        let spawned: Vec<_> = batch.iter().map(HostileUnit::snapshot).collect();

        self.roster.extend(batch);
        self.stage = Stage::WaveActive;
        log::info!("wave {} started with {} hostiles", wave.get(), spawned.len());

        self.notify(Event::WaveStarted { wave });
        for hostile in spawned {
            self.notify(Event::HostileSpawned { hostile });
        }
    }

    fn notify(&mut self, event: Event) {
        log::trace!("notify {event:?}");
        self.hooks.dispatch(&event);
    }
}

/// Query functions that provide read-only access to the engine state.
pub mod query {
    use super::{Engine, Stage};
    use wave_arena_core::{HostileId, HostileUnit, Phase, WaveNumber, Weapon};

    /// Hostile units still alive in the current wave, in spawn order.
    #[must_use]
    pub fn alive_hostiles<C, P>(engine: &Engine<C, P>) -> &[HostileUnit] {
        &engine.roster
    }

    /// Looks up a live hostile by handle.
    #[must_use]
    pub fn hostile<C, P>(engine: &Engine<C, P>, id: HostileId) -> Option<&HostileUnit> {
        engine.roster.iter().find(|hostile| hostile.id() == id)
    }

    /// Current player health.
    #[must_use]
    pub fn player_health<C, P>(engine: &Engine<C, P>) -> u32 {
        engine.player.health()
    }

    /// Player health after a restart.
    #[must_use]
    pub fn player_max_health<C, P>(engine: &Engine<C, P>) -> u32 {
        engine.player.combatant().max_health()
    }

    /// Hostile deaths credited to the player this game.
    #[must_use]
    pub fn player_kills<C, P>(engine: &Engine<C, P>) -> u32 {
        engine.player.kills()
    }

    /// Number of the most recently started wave, or [`WaveNumber::NONE`].
    #[must_use]
    pub fn current_wave<C, P>(engine: &Engine<C, P>) -> WaveNumber {
        engine.progression.current_wave()
    }

    /// Lifecycle phase the engine is in.
    #[must_use]
    pub fn phase<C, P>(engine: &Engine<C, P>) -> Phase {
        match engine.stage {
            Stage::Idle => Phase::Idle,
            Stage::PreWaveCountdown { .. } => Phase::PreWaveCountdown,
            Stage::WaveActive => Phase::WaveActive,
            Stage::WaveClearedCountdown { .. } => Phase::WaveClearedCountdown,
            Stage::GameOver => Phase::GameOver,
        }
    }

    /// The player's weapon, for cooldown and range display.
    #[must_use]
    pub fn weapon<C, P>(engine: &Engine<C, P>) -> &Weapon {
        &engine.weapon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_arena_core::{ManualClock, Phase};

    fn engine(tuning: GameTuning) -> (Engine<ManualClock, fn() -> Position>, ManualClock) {
        let clock = ManualClock::new();
        let origin: fn() -> Position = || Position::ZERO;
        let engine = Engine::new(Config::new(tuning, 11), clock.clone(), origin, Hooks::new())
            .expect("valid tuning");
        (engine, clock)
    }

    #[test]
    fn invalid_tuning_is_rejected_at_construction() {
        let mut tuning = GameTuning::default();
        tuning.spawn.max_attempts = 0;
        let clock = ManualClock::new();
        let result = Engine::new(
            Config::new(tuning, 0),
            clock,
            || Position::ZERO,
            Hooks::new(),
        );
        assert!(matches!(result, Err(TuningError::NoSpawnAttempts)));
    }

    #[test]
    fn update_is_inert_while_idle() {
        let (mut engine, clock) = engine(GameTuning::default());
        clock.advance(Duration::from_secs(60));
        engine.update();
        assert_eq!(query::phase(&engine), Phase::Idle);
        assert!(query::alive_hostiles(&engine).is_empty());
    }

    #[test]
    fn wave_clear_transitions_within_the_same_update() {
        let mut tuning = GameTuning::default();
        tuning.waves.base_count = 1;
        let (mut engine, clock) = engine(tuning);
        engine.start_game();
        clock.advance(Duration::from_secs(2));
        engine.update();
        assert_eq!(query::phase(&engine), Phase::WaveActive);

        let id = query::alive_hostiles(&engine)[0].id();
        assert!(engine.resolve_hit(id, 1_000));
        engine.update();
        assert_eq!(query::phase(&engine), Phase::WaveClearedCountdown);
        assert_eq!(engine.stage, Stage::WaveClearedCountdown { since: clock.now() });
    }

    #[test]
    fn hostile_attacks_respect_cooldown() {
        let mut tuning = GameTuning::default();
        tuning.waves.base_count = 1;
        let (mut engine, clock) = engine(tuning);
        engine.start_game();
        clock.advance(Duration::from_secs(2));
        engine.update();

        let id = query::alive_hostiles(&engine)[0].id();
        assert!(engine.hostile_attack(id));
        assert_eq!(query::player_health(&engine), 80);
        assert!(!engine.hostile_attack(id));

        clock.advance(Duration::from_secs(1));
        assert!(engine.hostile_attack(id));
        assert_eq!(query::player_health(&engine), 60);
        assert!(!engine.hostile_attack(HostileId::new(9_999)));
    }

    #[test]
    fn shooting_is_rate_limited_and_disabled_when_dead() {
        let (mut engine, clock) = engine(GameTuning::default());
        engine.start_game();
        assert!(engine.attempt_shoot());
        assert!(!engine.attempt_shoot());
        clock.advance(Duration::from_millis(200));
        assert!(engine.attempt_shoot());

        engine.resolve_player_damage(1_000);
        clock.advance(Duration::from_secs(1));
        assert!(!engine.attempt_shoot());
    }

    #[test]
    fn move_and_heal_update_state() {
        let mut tuning = GameTuning::default();
        tuning.waves.base_count = 1;
        let (mut engine, clock) = engine(tuning);
        engine.start_game();
        clock.advance(Duration::from_secs(2));
        engine.update();

        let id = query::alive_hostiles(&engine)[0].id();
        let target = Position::new(1.0, 0.0, 1.0);
        assert!(engine.move_hostile(id, target));
        assert_eq!(
            query::hostile(&engine, id).map(HostileUnit::position),
            Some(target)
        );
        assert!(!engine.move_hostile(HostileId::new(4_242), target));

        engine.resolve_player_damage(30);
        engine.heal_player(500);
        assert_eq!(query::player_health(&engine), query::player_max_health(&engine));
    }
}
