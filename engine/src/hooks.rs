//! Host notification handlers.

use std::fmt;

use wave_arena_core::{Event, HostileSnapshot, WaveNumber};

type HostileHandler = Box<dyn FnMut(&HostileSnapshot)>;
type WaveHandler = Box<dyn FnMut(WaveNumber)>;
type SignalHandler = Box<dyn FnMut()>;

/// Set of optional notification handlers, at most one per notification.
///
/// Handlers run synchronously inside the engine call that triggered them.
/// They are owned by the engine and cannot reach back into it; hosts that
/// need to react with further engine calls should queue that work and perform
/// it after the triggering call returns.
#[derive(Default)]
pub struct Hooks {
    hostile_spawned: Option<HostileHandler>,
    hostile_damaged: Option<HostileHandler>,
    hostile_died: Option<HostileHandler>,
    wave_started: Option<WaveHandler>,
    player_died: Option<SignalHandler>,
    countdown_beep: Option<SignalHandler>,
}

impl Hooks {
    /// Creates a handler set with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler invoked once per hostile joining the roster.
    #[must_use]
    pub fn on_hostile_spawn(mut self, handler: impl FnMut(&HostileSnapshot) + 'static) -> Self {
        self.hostile_spawned = Some(Box::new(handler));
        self
    }

    /// Registers the handler invoked for every hit on a hostile, lethal or
    /// not. A lethal hit reaches this handler before the death handler.
    #[must_use]
    pub fn on_hostile_damaged(mut self, handler: impl FnMut(&HostileSnapshot) + 'static) -> Self {
        self.hostile_damaged = Some(Box::new(handler));
        self
    }

    /// Registers the handler invoked when a hostile dies.
    #[must_use]
    pub fn on_hostile_death(mut self, handler: impl FnMut(&HostileSnapshot) + 'static) -> Self {
        self.hostile_died = Some(Box::new(handler));
        self
    }

    /// Registers the handler invoked when a wave starts.
    #[must_use]
    pub fn on_wave_start(mut self, handler: impl FnMut(WaveNumber) + 'static) -> Self {
        self.wave_started = Some(Box::new(handler));
        self
    }

    /// Registers the handler invoked once when the player dies.
    #[must_use]
    pub fn on_player_death(mut self, handler: impl FnMut() + 'static) -> Self {
        self.player_died = Some(Box::new(handler));
        self
    }

    /// Registers the handler invoked for each countdown beep.
    #[must_use]
    pub fn on_countdown_beep(mut self, handler: impl FnMut() + 'static) -> Self {
        self.countdown_beep = Some(Box::new(handler));
        self
    }

    pub(crate) fn dispatch(&mut self, event: &Event) {
        match event {
            Event::WaveStarted { wave } => {
                if let Some(handler) = self.wave_started.as_mut() {
                    handler(*wave);
                }
            }
            Event::HostileSpawned { hostile } => {
                if let Some(handler) = self.hostile_spawned.as_mut() {
                    handler(hostile);
                }
            }
            Event::HostileDamaged { hostile } => {
                if let Some(handler) = self.hostile_damaged.as_mut() {
                    handler(hostile);
                }
            }
            Event::HostileDied { hostile } => {
                if let Some(handler) = self.hostile_died.as_mut() {
                    handler(hostile);
                }
            }
            Event::PlayerDied => {
                if let Some(handler) = self.player_died.as_mut() {
                    handler();
                }
            }
            Event::CountdownBeep => {
                if let Some(handler) = self.countdown_beep.as_mut() {
                    handler();
                }
            }
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("hostile_spawned", &self.hostile_spawned.is_some())
            .field("hostile_damaged", &self.hostile_damaged.is_some())
            .field("hostile_died", &self.hostile_died.is_some())
            .field("wave_started", &self.wave_started.is_some())
            .field("player_died", &self.player_died.is_some())
            .field("countdown_beep", &self.countdown_beep.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Hooks;
    use std::{cell::RefCell, rc::Rc};
    use wave_arena_core::{Event, WaveNumber};

    #[test]
    fn dispatch_reaches_only_the_matching_handler() {
        let waves = Rc::new(RefCell::new(Vec::new()));
        let beeps = Rc::new(RefCell::new(0u32));

        let wave_log = Rc::clone(&waves);
        let beep_count = Rc::clone(&beeps);
        let mut hooks = Hooks::new()
            .on_wave_start(move |wave| wave_log.borrow_mut().push(wave))
            .on_countdown_beep(move || *beep_count.borrow_mut() += 1);

        hooks.dispatch(&Event::WaveStarted {
            wave: WaveNumber::new(4),
        });
        hooks.dispatch(&Event::CountdownBeep);
        hooks.dispatch(&Event::PlayerDied);

        assert_eq!(*waves.borrow(), vec![WaveNumber::new(4)]);
        assert_eq!(*beeps.borrow(), 1);
    }

    #[test]
    fn debug_lists_registered_handlers() {
        let hooks = Hooks::new().on_player_death(|| {});
        let rendered = format!("{hooks:?}");
        assert!(rendered.contains("player_died: true"));
        assert!(rendered.contains("countdown_beep: false"));
    }
}
