//! Host-facing game facade
//!
//! Owns the simulation, the settings and the store the session is persisted
//! through. Hosts call [`ClawGame::frame`] (or [`ClawGame::advance`]) once per
//! rendered frame and draw from [`ClawGame::snapshot`].

use crate::consts::MAX_FRAME_DT;
use crate::persistence::KeyValueStore;
use crate::platform::FrameClock;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{self, Bounds, SimEvent, SimState, TickInput};
use crate::snapshot::RenderSnapshot;

pub struct ClawGame<S: KeyValueStore> {
    state: SimState,
    settings: Settings,
    store: S,
    clock: FrameClock,
}

impl<S: KeyValueStore> ClawGame<S> {
    /// Load settings and session from `store` and stock a fresh pit
    pub fn new(store: S, bounds: Bounds, seed: u64) -> Self {
        let settings = Settings::load(&store);
        Self::with_settings(store, bounds, seed, settings)
    }

    /// Like [`ClawGame::new`] with explicit settings (the stored ones are ignored)
    pub fn with_settings(store: S, bounds: Bounds, seed: u64, settings: Settings) -> Self {
        let session = Session::load(&store);
        let state = SimState::new(seed, bounds, session, settings.spawn_count);
        log::info!(
            "Claw machine ready: {} prizes, score {}",
            state.prizes.len(),
            state.session.score
        );
        Self {
            state,
            settings,
            store,
            clock: FrameClock::new(),
        }
    }

    /// Advance one frame by `dt` nominal frames. Returns the events raised.
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> &[SimEvent] {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        sim::tick(&mut self.state, input, dt, &self.settings);

        if self
            .state
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::Collected { .. }))
        {
            self.state.session.save(&mut self.store);
        }
        &self.state.events
    }

    /// Advance using a host timestamp in milliseconds
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> &[SimEvent] {
        let dt = self.clock.delta(timestamp_ms);
        self.advance(dt, input)
    }

    /// Ask for a drop. Ignored unless the claw is idle.
    pub fn request_drop(&mut self) -> bool {
        sim::request_drop(&mut self.state)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Zero the score, empty the collection and delete the stored record
    pub fn reset(&mut self) {
        self.state.session.reset(&mut self.store);
    }

    /// Rebuild the pit and claw for new cabinet bounds. The session survives;
    /// a prize in the claw is lost.
    pub fn resize(&mut self, bounds: Bounds) {
        let session = std::mem::take(&mut self.state.session);
        let seed = self.state.seed.wrapping_add(self.state.time_ticks);
        self.state = SimState::new(seed, bounds, session, self.settings.spawn_count);
        self.clock.reset();
        log::info!(
            "Resized cabinet to {:.0}x{:.0}",
            bounds.right - bounds.left,
            bounds.bottom - bounds.top
        );
    }

    /// Replace settings and persist them
    pub fn set_settings(&mut self, settings: Settings) {
        if let Err(err) = settings.validate() {
            log::warn!("Rejected settings: {err}");
            return;
        }
        settings.save(&mut self.store);
        self.settings = settings;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Mutable access to the simulation (tests and tooling)
    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::ClawPhase;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 400.0, 0.0, 600.0)
    }

    #[test]
    fn test_new_spawns_configured_pit() {
        let game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        assert_eq!(game.state().prizes.len(), Settings::default().spawn_count);
        assert!(game.session().is_empty());
        assert!(game.snapshot().can_drop);
    }

    #[test]
    fn test_advance_clamps_dt() {
        let mut game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x = game.state().claw.x;
        game.advance(100.0, &right);
        assert_eq!(game.state().claw.x, x + 3.5 * MAX_FRAME_DT);

        let x = game.state().claw.x;
        game.advance(f32::NAN, &right);
        game.advance(-2.0, &right);
        assert_eq!(game.state().claw.x, x);
    }

    #[test]
    fn test_frame_uses_host_clock() {
        let mut game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x = game.state().claw.x;
        // First frame has no previous timestamp
        game.frame(1000.0, &right);
        assert_eq!(game.state().claw.x, x);
        game.frame(1000.0 + crate::consts::FRAME_MS, &right);
        assert!((game.state().claw.x - (x + 3.5)).abs() < 1e-3);
    }

    #[test]
    fn test_request_drop_only_when_idle() {
        let mut game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        assert!(game.request_drop());
        assert!(!game.request_drop());
        game.advance(1.0, &TickInput::default());
        assert_eq!(game.state().claw.phase, ClawPhase::Dropping);
        assert!(!game.request_drop());
    }

    #[test]
    fn test_resize_keeps_session() {
        let mut game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        game.state_mut().session.record(crate::sim::PrizeKind::Duck);
        game.resize(Bounds::for_canvas(800.0, 500.0));
        assert_eq!(game.session().score, 20);
        assert_eq!(game.state().bounds, Bounds::for_canvas(800.0, 500.0));
        assert_eq!(game.state().claw.x, game.state().bounds.center_x());
    }

    #[test]
    fn test_set_settings_persists_valid_only() {
        let mut game = ClawGame::new(MemoryStore::new(), bounds(), 7);
        let bad = Settings {
            low_water_mark: 100,
            ..Settings::default()
        };
        game.set_settings(bad);
        assert_eq!(game.settings(), &Settings::default());
        assert!(game.store().get(Settings::STORAGE_KEY).is_none());

        let good = Settings {
            particles: false,
            ..Settings::default()
        };
        game.set_settings(good.clone());
        assert_eq!(game.settings(), &good);
        assert!(game.store().get(Settings::STORAGE_KEY).is_some());
    }
}
