//! Sub-stepped prize physics
//!
//! One call to [`step`] advances every loose prize by one frame using
//! `PHYSICS_SUBSTEPS` sub-iterations. Per substep: integrate each awake
//! prize, clamp it to the cabinet, resolve prize-prize contacts, let the
//! sweeping claw shove prizes aside, then put resting prizes to sleep.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{ClawContact, resolve_claw_prize, resolve_prize_pairs};
use super::state::{Bounds, Prize};
use crate::consts::*;

/// Advance all loose prizes by one frame
pub fn step(prizes: &mut [Prize], bounds: &Bounds, claw: Option<ClawContact>) {
    for _ in 0..PHYSICS_SUBSTEPS {
        substep(prizes, bounds, claw);
    }
}

/// One physics sub-iteration
pub fn substep(prizes: &mut [Prize], bounds: &Bounds, claw: Option<ClawContact>) {
    for prize in prizes.iter_mut() {
        if !prize.grabbed {
            integrate(prize, bounds);
        }
    }

    resolve_prize_pairs(prizes);

    if let Some(claw) = claw {
        for prize in prizes.iter_mut() {
            if !prize.grabbed && resolve_claw_prize(claw, prize) {
                apply_boundaries(prize, bounds);
            }
        }
    }

    for prize in prizes.iter_mut() {
        if !prize.grabbed {
            settle(prize);
        }
    }
}

/// Gravity, damping and position integration for a single prize
pub fn integrate(prize: &mut Prize, bounds: &Bounds) {
    if prize.grounded {
        if prize.vel.length() > WAKE_THRESHOLD {
            prize.grounded = false;
        } else {
            prize.freeze();
            // Neighbours may have nudged it; keep it inside the cabinet
            apply_boundaries(prize, bounds);
            return;
        }
    }

    prize.vel.y += GRAVITY / PHYSICS_SUBSTEPS as f32;

    // Per-substep damping
    prize.vel.x *= LINEAR_DAMPING_X;
    prize.vel.y *= LINEAR_DAMPING_Y;
    prize.angular_vel *= ANGULAR_DAMPING;

    if prize.vel.x.abs() < VELOCITY_SLEEP_THRESHOLD {
        prize.vel.x = 0.0;
    }
    // Clamp upward creep only; slow falls continue
    if prize.vel.y < 0.0 && prize.vel.y.abs() < VELOCITY_SLEEP_THRESHOLD {
        prize.vel.y = 0.0;
    }
    if prize.angular_vel.abs() < ANGULAR_SLEEP_THRESHOLD {
        prize.angular_vel = 0.0;
    }

    let substeps = PHYSICS_SUBSTEPS as f32;
    prize.pos += prize.vel / substeps;
    prize.rotation += prize.angular_vel / substeps;
    prize.angular_vel *= ANGULAR_DRAG;

    apply_boundaries(prize, bounds);
}

/// Floor and side walls. Prizes never bounce: the floor eats vertical speed.
pub fn apply_boundaries(prize: &mut Prize, bounds: &Bounds) {
    let rest_y = bounds.rest_y();
    if prize.pos.y > rest_y {
        prize.pos.y = rest_y;
        if prize.vel.y > 0.0 {
            prize.vel.y = 0.0;
            prize.vel.x *= 0.3;
            prize.angular_vel *= 0.3;
            prize.grounded = true;
            if prize.vel.x.abs() < 1.0 {
                prize.vel.x = 0.0;
                prize.angular_vel = 0.0;
            }
        }
    }

    if prize.pos.x < bounds.left_wall() {
        prize.pos.x = bounds.left_wall();
        prize.vel.x = 0.0;
        prize.angular_vel *= 0.3;
    }
    if prize.pos.x > bounds.right_wall() {
        prize.pos.x = bounds.right_wall();
        prize.vel.x = 0.0;
        prize.angular_vel *= 0.3;
    }
}

/// Resting prizes either wake (hit hard enough) or hold perfectly still
pub fn settle(prize: &mut Prize) {
    if !prize.grounded {
        return;
    }
    if prize.vel.length() > WAKE_THRESHOLD {
        prize.grounded = false;
    } else {
        prize.freeze();
    }
}

/// Landing shove: prizes near the claw tip are pushed outward, stronger when closer.
/// Returns how many prizes were disturbed.
pub fn apply_impact_impulse(prizes: &mut [Prize], origin: Vec2, rng: &mut Pcg32) -> usize {
    let radius = PRIZE_RADIUS * IMPACT_RADIUS_FACTOR;
    let mut disturbed = 0;
    for prize in prizes.iter_mut().filter(|p| !p.grabbed) {
        let delta = prize.pos - origin;
        let dist = delta.length();
        if dist >= radius || dist == 0.0 {
            continue;
        }
        let dir = delta / dist;
        let force = (1.0 - dist / radius) * IMPACT_FORCE;
        prize.vel.x += dir.x * force;
        prize.vel.y += dir.y * force * 0.5;
        prize.angular_vel += (rng.random::<f32>() - 0.5) * 0.05;
        prize.grounded = false;
        disturbed += 1;
    }
    disturbed
}
