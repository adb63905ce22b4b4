//! Per-frame simulation tick
//!
//! Order within a tick: input → claw → prize physics → effects → restock.

use glam::Vec2;

use super::claw::{self, request_drop};
use super::collision::ClawContact;
use super::state::{ClawPhase, SimEvent, SimState};
use super::{effects, physics};
use crate::consts::CLAW_SPEED;
use crate::settings::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer left held
    pub left: bool,
    /// Steer right held
    pub right: bool,
    /// Drop requested this tick (edge, not level)
    pub drop: bool,
    /// Idle/demo mode - autopilot plays the machine
    pub idle_mode: bool,
}

impl TickInput {
    /// Steering axis: -1, 0 or 1. Both directions cancel out.
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the simulation by one frame. `dt` is in 60 Hz frame units.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32, settings: &Settings) {
    state.time_ticks += 1;
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input, dt);
    }

    if input.drop {
        request_drop(state);
    }

    claw::update(state, input.axis(), dt, settings);

    let contact = state.claw.is_sweeping().then(|| ClawContact {
        tip: state.claw.tip(&state.bounds),
        vel: Vec2::new(0.0, state.claw.vel_y),
    });
    physics::step(state.prizes.as_mut_slice(), &state.bounds, contact);

    effects::emit_for_events(
        &state.events,
        &mut state.particles,
        &mut state.shake,
        &mut state.rng,
        settings,
    );
    effects::update_particles(&mut state.particles, &mut state.rng, dt);
    state.shake.decay(dt);
    state.tick_message(dt);

    let bounds = state.bounds;
    let added = state.prizes.replenish(
        &bounds,
        settings.low_water_mark,
        settings.spawn_count,
        &mut state.rng,
    );
    if added > 0 {
        state.events.push(SimEvent::Replenished { count: added });
    }
}

/// Steer toward the settled prize closest to the claw and drop over it
fn autopilot(state: &SimState, input: &mut TickInput, dt: f32) {
    if state.claw.phase != ClawPhase::Idle {
        return;
    }
    let (min_x, max_x) = (state.bounds.rail_min_x(), state.bounds.rail_max_x());
    let claw_x = state.claw.x;
    let target = state
        .prizes
        .iter()
        .filter(|p| p.grounded && !p.grabbed)
        .map(|p| p.pos.x.max(min_x).min(max_x))
        .min_by(|a, b| {
            (a - claw_x)
                .abs()
                .partial_cmp(&(b - claw_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target_x) = target else {
        return;
    };
    let dx = target_x - claw_x;
    input.left = false;
    input.right = false;
    if dx.abs() <= CLAW_SPEED * dt.max(1.0) {
        input.drop = true;
    } else if dx < 0.0 {
        input.left = true;
    } else {
        input.right = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::sim::state::{Bounds, Prize, PrizeKind};

    fn quiet_settings() -> Settings {
        Settings {
            low_water_mark: 0,
            ..Settings::default()
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(0.0, 400.0, 0.0, 600.0)
    }

    #[test]
    fn test_axis() {
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.axis(), 0.0);
        assert_eq!(TickInput { left: true, ..Default::default() }.axis(), -1.0);
        assert_eq!(TickInput { right: true, ..Default::default() }.axis(), 1.0);
        assert_eq!(TickInput::default().axis(), 0.0);
    }

    #[test]
    fn test_tick_counts_and_clears_events() {
        let mut state = SimState::empty(1, bounds(), Session::default());
        let settings = quiet_settings();
        let drop = TickInput {
            drop: true,
            ..Default::default()
        };
        tick(&mut state, &drop, 1.0, &settings);
        assert_eq!(state.time_ticks, 1);
        assert!(state.events.contains(&SimEvent::DropStarted));

        tick(&mut state, &TickInput::default(), 1.0, &settings);
        assert!(!state.events.contains(&SimEvent::DropStarted));
    }

    #[test]
    fn test_restock_when_pit_runs_low() {
        let mut state = SimState::empty(1, bounds(), Session::default());
        let settings = Settings::default();
        tick(&mut state, &TickInput::default(), 1.0, &settings);
        assert_eq!(state.prizes.len(), settings.spawn_count);
        assert_eq!(
            state.events,
            vec![SimEvent::Replenished {
                count: settings.spawn_count
            }]
        );

        tick(&mut state, &TickInput::default(), 1.0, &settings);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_autopilot_steers_then_drops() {
        let mut state = SimState::empty(1, bounds(), Session::default());
        let rest_y = state.bounds.rest_y();
        let mut prize = Prize::new(0, PrizeKind::Duck, Vec2::new(300.0, rest_y));
        prize.grounded = true;
        state.prizes.insert(prize);

        let settings = quiet_settings();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut dropped_at = None;
        for _ in 0..120 {
            tick(&mut state, &input, 1.0, &settings);
            if state.events.contains(&SimEvent::DropStarted) {
                dropped_at = Some(state.claw.x);
                break;
            }
        }
        let x = dropped_at.expect("autopilot never dropped");
        assert!((x - 300.0).abs() <= 3.5, "dropped at {x}");
    }

    /// Claw parked at full depth with a resting prize overlapping its tip (not coincident)
    fn claw_over_resting_prize(phase: ClawPhase) -> (SimState, u32) {
        let mut state = SimState::empty(1, bounds(), Session::default());
        state.claw.y = state.bounds.drop_y();
        state.claw.phase = phase;
        state.claw.closing_timer = crate::consts::CLAW_CLOSE_TIME;
        let tip = state.claw.tip(&state.bounds);
        let mut prize = Prize::new(0, PrizeKind::Duck, tip + Vec2::new(10.0, 0.0));
        prize.grounded = true;
        let id = state.prizes.insert(prize);
        (state, id)
    }

    #[test]
    fn test_parked_claw_does_not_push_prizes() {
        for phase in [ClawPhase::Idle, ClawPhase::Closing] {
            let (mut state, id) = claw_over_resting_prize(phase);
            let before = state.prizes.get(id).unwrap().pos;
            tick(&mut state, &TickInput::default(), 1.0, &quiet_settings());

            let prize = state.prizes.get(id).unwrap();
            assert_eq!(prize.pos, before, "{phase:?}");
            assert_eq!(prize.vel, Vec2::ZERO, "{phase:?}");
            assert!(prize.grounded, "{phase:?}");
        }
    }

    #[test]
    fn test_moving_claw_shoves_prizes_aside() {
        for phase in [ClawPhase::Dropping, ClawPhase::Returning] {
            let (mut state, id) = claw_over_resting_prize(phase);
            if phase == ClawPhase::Dropping {
                // Still above full depth so this tick does not land
                state.claw.y -= 1.0;
            }
            let before = state.prizes.get(id).unwrap().pos;
            tick(&mut state, &TickInput::default(), 1.0, &quiet_settings());

            assert_eq!(state.claw.phase, phase);
            let prize = state.prizes.get(id).unwrap();
            assert!(prize.pos.x > before.x, "{phase:?}: {:?}", prize.pos);
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let settings = Settings::default();
        let mut a = SimState::new(99999, bounds(), Session::default(), 14);
        let mut b = SimState::new(99999, bounds(), Session::default(), 14);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                drop: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..400 {
            let input = &inputs[(i / 20).min(2)];
            tick(&mut a, input, 1.0, &settings);
            tick(&mut b, input, 1.0, &settings);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.claw.x, b.claw.x);
        assert_eq!(a.session, b.session);
        assert_eq!(a.prizes.len(), b.prizes.len());
        for (pa, pb) in a.prizes.iter().zip(b.prizes.iter()) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }
}
