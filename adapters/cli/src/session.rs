//! Headless host that plays a session against the engine.
//!
//! Stands in for the renderer and input layers: the player stays at the
//! arena centre, hostiles that detect the player walk straight at them and
//! strike on contact, and the weapon automatically fires at the closest
//! hostile in range.

use std::{cell::Cell, rc::Rc, time::Duration};

use wave_arena_core::{
    GameTuning, HostileId, HostileTuning, ManualClock, Phase, Position, TuningError,
};
use wave_arena_engine::{query, Config, Engine, Hooks};

/// Slack below which a hostile counts as touching the contact radius.
const CONTACT_TOLERANCE: f32 = 0.01;
const PLAYER_POSITION: Position = Position::ZERO;

/// Parameters of a headless session.
#[derive(Clone, Debug)]
pub(crate) struct SessionConfig {
    pub(crate) seed: u64,
    pub(crate) tick: Duration,
    pub(crate) time_limit: Duration,
    pub(crate) max_waves: u32,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The player cleared the requested number of waves.
    Survived,
    /// The player died.
    Died,
    /// The time limit elapsed first.
    TimeLimit,
}

/// Final statistics of a session.
#[derive(Clone, Debug)]
pub(crate) struct Summary {
    pub(crate) outcome: Outcome,
    pub(crate) wave: u32,
    pub(crate) kills: u32,
    pub(crate) shots: u32,
    pub(crate) beeps: u32,
    pub(crate) player_health: u32,
    pub(crate) elapsed: Duration,
}

/// Plays one game until the player dies, enough waves are cleared or the
/// time limit passes.
pub(crate) fn run(tuning: GameTuning, config: &SessionConfig) -> Result<Summary, TuningError> {
    let pursuit = Pursuit::new(&tuning.hostile);
    let clock = ManualClock::new();
    let beeps = Rc::new(Cell::new(0u32));
    let beep_counter = Rc::clone(&beeps);

    let hooks = Hooks::new()
        .on_wave_start(|wave| log::info!("wave {} incoming", wave.get()))
        .on_hostile_spawn(|hostile| {
            log::debug!(
                "hostile {} spawned at ({:.1}, {:.1})",
                hostile.id.get(),
                hostile.position.x,
                hostile.position.z
            )
        })
        .on_hostile_damaged(|hostile| {
            log::debug!(
                "hostile {} at {}/{} health",
                hostile.id.get(),
                hostile.health,
                hostile.max_health
            )
        })
        .on_hostile_death(|hostile| log::info!("hostile {} destroyed", hostile.id.get()))
        .on_player_death(|| log::warn!("player down"))
        .on_countdown_beep(move || {
            beep_counter.set(beep_counter.get() + 1);
            log::info!("beep");
        });

    let mut engine = Engine::new(
        Config::new(tuning, config.seed),
        clock.clone(),
        || PLAYER_POSITION,
        hooks,
    )?;

    engine.start_game();
    let mut shots = 0u32;
    let mut elapsed = Duration::ZERO;

    let outcome = loop {
        if elapsed >= config.time_limit {
            break Outcome::TimeLimit;
        }
        clock.advance(config.tick);
        elapsed += config.tick;
        engine.update();

        match query::phase(&engine) {
            Phase::GameOver => break Outcome::Died,
            Phase::WaveClearedCountdown
                if query::current_wave(&engine).get() >= config.max_waves =>
            {
                break Outcome::Survived;
            }
            _ => {}
        }

        pursuit.advance(&mut engine, config.tick);
        if query::phase(&engine) == Phase::GameOver {
            break Outcome::Died;
        }

        if let Some(target) = closest_in_range(&engine) {
            if engine.attempt_shoot() {
                shots += 1;
                let _ = engine.resolve_weapon_hit(target);
            }
        }
    };

    Ok(Summary {
        outcome,
        wave: query::current_wave(&engine).get(),
        kills: query::player_kills(&engine),
        shots,
        beeps: beeps.get(),
        player_health: query::player_health(&engine),
        elapsed,
    })
}

/// Chase behaviour of hostiles towards the player.
#[derive(Clone, Copy, Debug)]
struct Pursuit {
    contact_distance: f32,
    detection_range: f32,
}

impl Pursuit {
    fn new(tuning: &HostileTuning) -> Self {
        Self {
            contact_distance: tuning.contact_distance,
            detection_range: tuning.detection_range,
        }
    }

    /// Moves every hostile that sees the player one tick closer, or lets it
    /// attack once it is in contact.
    fn advance<C, P>(self, engine: &mut Engine<C, P>, tick: Duration)
    where
        C: wave_arena_core::Clock,
        P: wave_arena_engine::PlayerPosition,
    {
        let movers: Vec<(HostileId, Position, f32)> = query::alive_hostiles(engine)
            .iter()
            .map(|hostile| (hostile.id(), hostile.position(), hostile.speed()))
            .collect();

        for (id, position, speed) in movers {
            let offset = Position::new(
                PLAYER_POSITION.x - position.x,
                0.0,
                PLAYER_POSITION.z - position.z,
            );
            let distance = offset.length();
            if distance > self.detection_range {
                continue;
            }
            let gap = distance - self.contact_distance;
            if gap > CONTACT_TOLERANCE {
                let step = (speed * tick.as_secs_f32()).min(gap);
                let _ = engine.move_hostile(id, position + offset / distance * step);
            } else {
                let _ = engine.hostile_attack(id);
            }
        }
    }
}

fn closest_in_range<C, P>(engine: &Engine<C, P>) -> Option<HostileId> {
    let range = query::weapon(engine).range();
    query::alive_hostiles(engine)
        .iter()
        .map(|hostile| (hostile.id(), hostile.position().distance(PLAYER_POSITION)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
