//! Claw state machine
//!
//! Idle → Dropping → Closing → Returning → Idle, forever. The grab is decided
//! once, when the closing timer runs out.

use glam::Vec2;
use rand::Rng;

use super::physics::apply_impact_impulse;
use super::state::{Claw, ClawPhase, Prize, SimEvent, SimState};
use crate::consts::*;
use crate::settings::{GrabPolicy, Settings};

pub const MISS_MESSAGE: &str = "Nothing grabbed... try again!";

/// Start a drop. Only legal from Idle; returns false (and does nothing) otherwise.
pub fn request_drop(state: &mut SimState) -> bool {
    let claw = &mut state.claw;
    if claw.phase != ClawPhase::Idle {
        return false;
    }
    claw.phase = ClawPhase::Dropping;
    claw.open = true;
    claw.open_amount = 1.0;
    claw.drop_speed = 0.0;
    claw.closing_timer = 0.0;
    state.events.push(SimEvent::DropStarted);
    log::debug!("Drop requested at x={:.1}", claw.x);
    true
}

impl Claw {
    /// Steer along the rail (Idle only). `axis` is -1, 0 or 1.
    pub fn steer(&mut self, axis: f32, dt: f32, min_x: f32, max_x: f32) {
        if self.phase != ClawPhase::Idle || axis == 0.0 {
            return;
        }
        // Unlike clamp, never panics on NaN rail bounds
        self.x = (self.x + axis * CLAW_SPEED * dt).max(min_x).min(max_x);
        self.swing_speed += axis * SWING_FORCE;
    }

    /// Pendulum update for the cable, once per tick
    pub fn update_swing(&mut self) {
        self.swing_angle += self.swing_speed;
        self.swing_speed *= SWING_DAMPING;
        self.swing_speed -= self.swing_angle * SWING_SPRING;
        self.swing_angle = self.swing_angle.clamp(-SWING_MAX, SWING_MAX);
    }

    /// Ease the arms toward open or closed
    pub fn animate_arms(&mut self) {
        let target = if self.open { 1.0 } else { 0.0 };
        self.open_amount += (target - self.open_amount) * ARM_EASING;
    }

    /// Accelerate downward. Returns true on the tick the claw reaches full depth.
    pub fn descend(&mut self, dt: f32) -> bool {
        self.drop_speed = (self.drop_speed + DROP_ACCEL * dt).min(DROP_MAX_SPEED);
        self.y += self.drop_speed * dt;
        if self.y >= self.drop_y {
            self.y = self.drop_y;
            self.phase = ClawPhase::Closing;
            self.open = false;
            self.closing_timer = CLAW_CLOSE_TIME;
            return true;
        }
        false
    }

    /// Rise at constant speed. Returns true once parked at rail height.
    pub fn ascend(&mut self, dt: f32, rail_y: f32) -> bool {
        self.y -= RETURN_SPEED * dt;
        if self.y <= rail_y {
            self.y = rail_y;
            return true;
        }
        false
    }

    /// Move toward `target_x` without overshooting. Returns true once within tolerance.
    pub fn travel_to(&mut self, target_x: f32, dt: f32) -> bool {
        let dx = target_x - self.x;
        if dx.abs() <= CHUTE_TOLERANCE {
            return true;
        }
        self.x += dx.signum() * (CLAW_SPEED * dt).min(dx.abs());
        false
    }

    /// Back to Idle: arms open, recentred on the rail
    fn finish_cycle(&mut self, center_x: f32) {
        self.phase = ClawPhase::Idle;
        self.open = true;
        self.closing_timer = 0.0;
        self.drop_speed = 0.0;
        self.x = center_x;
    }
}

/// Nearest loose prize to `tip` strictly inside the grab radius.
/// Ties keep the first prize encountered.
pub fn find_grab_candidate(prizes: &[Prize], tip: Vec2) -> Option<u32> {
    let mut best: Option<(u32, f32)> = None;
    for prize in prizes.iter().filter(|p| !p.grabbed) {
        let dist = prize.pos.distance(tip);
        if dist < GRAB_RADIUS && best.is_none_or(|(_, d)| dist < d) {
            best = Some((prize.id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Advance the claw by one tick, raising events at phase transitions
pub fn update(state: &mut SimState, axis: f32, dt: f32, settings: &Settings) {
    let bounds = state.bounds;
    let y_before = state.claw.y;

    let (min_x, max_x) = (bounds.rail_min_x(), bounds.rail_max_x());
    state.claw.steer(axis, dt, min_x, max_x);
    state.claw.update_swing();
    state.claw.animate_arms();

    match state.claw.phase {
        ClawPhase::Idle => {}
        ClawPhase::Dropping => {
            if state.claw.descend(dt) {
                let tip = state.claw.tip(&bounds);
                state.events.push(SimEvent::Impact { pos: tip });
                let disturbed =
                    apply_impact_impulse(state.prizes.as_mut_slice(), tip, &mut state.rng);
                log::debug!("Claw landed at {:?}, disturbed {} prizes", tip, disturbed);
            }
        }
        ClawPhase::Closing => {
            state.claw.closing_timer -= dt;
            if state.claw.closing_timer <= 0.0 {
                state.claw.closing_timer = 0.0;
                grab(state, settings.grab_policy);
                state.claw.phase = ClawPhase::Returning;
                state.claw.drop_speed = 0.0;
            }
        }
        ClawPhase::Returning => {
            if state.claw.ascend(dt, bounds.rail_y()) {
                if state.claw.held.is_some() {
                    if state.claw.travel_to(bounds.chute_x(), dt) {
                        collect(state, settings);
                    }
                } else {
                    state.show_message(MISS_MESSAGE, settings.message_frames);
                    state.claw.finish_cycle(bounds.center_x());
                }
            }
        }
    }

    // Held prize rides along under the claw
    let tip = state.claw.tip(&bounds);
    if let Some(prize) = &mut state.claw.held {
        prize.pos = tip;
    }
    state.claw.vel_y = state.claw.y - y_before;
}

/// Grab decision at the end of Closing
fn grab(state: &mut SimState, policy: GrabPolicy) {
    let tip = state.claw.tip(&state.bounds);
    let Some(id) = find_grab_candidate(state.prizes.as_slice(), tip) else {
        log::debug!("Grab missed at {:?}", tip);
        state.events.push(SimEvent::Missed);
        return;
    };

    if let GrabPolicy::Chance { probability } = policy {
        if state.rng.random::<f32>() >= probability {
            log::debug!("Grab slipped (chance {:.2})", probability);
            state.events.push(SimEvent::Missed);
            return;
        }
    }

    if let Some(mut prize) = state.prizes.take(id) {
        prize.grabbed = true;
        prize.grounded = false;
        prize.freeze();
        log::debug!("Grabbed {:?} #{}", prize.kind, prize.id);
        state.events.push(SimEvent::Grabbed {
            prize_id: prize.id,
            kind: prize.kind,
            pos: prize.pos,
        });
        state.claw.held = Some(prize);
    }
}

/// Deliver the held prize to the chute and score it
fn collect(state: &mut SimState, settings: &Settings) {
    let Some(prize) = state.claw.held.take() else {
        return;
    };
    let points = state.session.record(prize.kind);
    log::info!(
        "Collected {} for {} points (score {})",
        prize.kind.label(),
        points,
        state.session.score
    );

    let pos = Vec2::new(state.claw.x, state.claw.y + TIP_OFFSET + 2.0);
    state.events.push(SimEvent::Collected {
        kind: prize.kind,
        points,
        pos,
    });
    state.show_message(
        format!("+{} {} {}!", points, prize.kind.emoji(), prize.kind.label()),
        settings.message_frames,
    );
    state.claw.finish_cycle(state.bounds.center_x());
}
