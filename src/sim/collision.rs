//! Collision response between prize bodies and against the claw tip
//!
//! Prizes are equal-radius discs. Contacts are resolved with a split
//! approach: positional correction first (slop + bias, weighted by inverse
//! mass), then a normal impulse, heavy contact damping and a tangential
//! friction impulse that adds a little spin.

use glam::Vec2;

use super::state::Prize;
use crate::consts::*;

/// Kinematic claw tip as seen by the physics step (infinite mass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClawContact {
    pub tip: Vec2,
    pub vel: Vec2,
}

/// Resolve overlap between two loose prizes. Returns true if they were touching.
pub fn resolve_prize_pair(a: &mut Prize, b: &mut Prize) -> bool {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let min_dist = PRIZE_RADIUS * 2.0;
    // Coincident centres have no usable normal
    if dist_sq >= min_dist * min_dist || dist_sq == 0.0 {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;

    // Positional correction, split by inverse mass
    let overlap = min_dist - dist;
    let correction = (overlap - COLLISION_SLOP).max(0.0) * COLLISION_BIAS;
    a.pos -= normal * correction * (inv_a / inv_sum);
    b.pos += normal * correction * (inv_b / inv_sum);

    // Positive when a moves toward b
    let rel_vel = a.vel - b.vel;
    let closing = rel_vel.dot(normal);
    if closing <= 0.0 {
        return true;
    }

    let restitution = a.restitution.min(b.restitution);
    let jn = (1.0 + restitution) * closing / inv_sum;
    a.vel -= normal * (jn * inv_a);
    b.vel += normal * (jn * inv_b);

    // Contacts soak up most of the energy
    a.vel *= CONTACT_DAMPING;
    b.vel *= CONTACT_DAMPING;

    let tangent = normal.perp();
    let jt = rel_vel.dot(tangent) * CONTACT_FRICTION / inv_sum;
    a.vel -= tangent * (jt * inv_a);
    b.vel += tangent * (jt * inv_b);

    a.angular_vel += jt / (a.mass * PRIZE_RADIUS) * CONTACT_SPIN;
    b.angular_vel -= jt / (b.mass * PRIZE_RADIUS) * CONTACT_SPIN;
    true
}

/// Resolve every unordered pair of loose prizes once, in index order
pub fn resolve_prize_pairs(prizes: &mut [Prize]) -> usize {
    let mut contacts = 0;
    for i in 0..prizes.len() {
        let (head, tail) = prizes.split_at_mut(i + 1);
        let a = &mut head[i];
        if a.grabbed {
            continue;
        }
        for b in tail.iter_mut() {
            if b.grabbed {
                continue;
            }
            if resolve_prize_pair(a, b) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Push a prize out of the claw tip. Returns true if the prize was moved.
pub fn resolve_claw_prize(claw: ClawContact, prize: &mut Prize) -> bool {
    let delta = prize.pos - claw.tip;
    let dist_sq = delta.length_squared();
    let min_dist = PRIZE_RADIUS + CLAW_BODY_RADIUS;
    if dist_sq >= min_dist * min_dist || dist_sq == 0.0 {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    prize.pos += normal * (min_dist - dist);
    prize.grounded = false;

    let closing = (claw.vel - prize.vel).dot(normal);
    if closing > 0.0 {
        // Capped nudge
        let impulse = (closing * CLAW_PUSH_FORCE).min(CLAW_MAX_PUSH);
        prize.vel += normal * impulse;
        prize.angular_vel += (normal.x * 0.5 - normal.y * 0.3) * impulse * 0.02;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PrizeKind;

    fn prize_at(x: f32, y: f32) -> Prize {
        Prize::new(0, PrizeKind::Duck, Vec2::new(x, y))
    }

    #[test]
    fn test_separated_prizes_untouched() {
        let mut a = prize_at(0.0, 0.0);
        let mut b = prize_at(40.0, 0.0);
        assert!(!resolve_prize_pair(&mut a, &mut b));
        assert_eq!(a.pos, Vec2::ZERO);
    }

    #[test]
    fn test_coincident_prizes_skipped() {
        let mut a = prize_at(10.0, 10.0);
        let mut b = prize_at(10.0, 10.0);
        assert!(!resolve_prize_pair(&mut a, &mut b));
        assert!(a.pos.is_finite() && b.pos.is_finite());
    }

    #[test]
    fn test_overlap_pushes_apart_by_inverse_mass() {
        let mut a = prize_at(0.0, 0.0);
        let mut b = prize_at(20.0, 0.0);
        b.mass = 3.0;
        resolve_prize_pair(&mut a, &mut b);

        let moved_a = -a.pos.x;
        let moved_b = b.pos.x - 20.0;
        assert!(moved_a > 0.0 && moved_b > 0.0);
        // Lighter body takes the larger share
        assert!((moved_a - 3.0 * moved_b).abs() < 1e-4);
        let dist = b.pos.x - a.pos.x;
        assert!(dist > 20.0 && dist <= PRIZE_RADIUS * 2.0);
    }

    #[test]
    fn test_approaching_prizes_lose_energy() {
        let mut a = prize_at(0.0, 0.0);
        let mut b = prize_at(30.0, 0.0);
        a.vel = Vec2::new(2.0, 0.0);
        resolve_prize_pair(&mut a, &mut b);

        // Perfectly inelastic exchange then halved
        assert!((a.vel.x - 0.5).abs() < 1e-5);
        assert!((b.vel.x - 0.5).abs() < 1e-5);
        assert!(a.vel.length() + b.vel.length() < 2.0);
    }

    #[test]
    fn test_separating_prizes_keep_velocity() {
        let mut a = prize_at(0.0, 0.0);
        let mut b = prize_at(30.0, 0.0);
        a.vel = Vec2::new(-1.0, 0.0);
        resolve_prize_pair(&mut a, &mut b);
        assert_eq!(a.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_glancing_contact_adds_spin() {
        let mut a = prize_at(0.0, 0.0);
        let mut b = prize_at(30.0, 0.0);
        a.vel = Vec2::new(1.0, 1.0);
        resolve_prize_pair(&mut a, &mut b);
        assert!(a.angular_vel != 0.0);
        assert!(b.angular_vel != 0.0);
    }

    #[test]
    fn test_claw_pushes_prize_out_and_wakes_it() {
        let claw = ClawContact {
            tip: Vec2::new(0.0, 0.0),
            vel: Vec2::new(0.0, 5.0),
        };
        let mut prize = prize_at(0.0, 10.0);
        prize.grounded = true;
        assert!(resolve_claw_prize(claw, &mut prize));

        assert!((prize.pos.y - (PRIZE_RADIUS + CLAW_BODY_RADIUS)).abs() < 1e-4);
        assert!(!prize.grounded);
        assert!(prize.vel.y > 0.0 && prize.vel.y <= CLAW_MAX_PUSH);
    }

    #[test]
    fn test_claw_push_is_capped() {
        let claw = ClawContact {
            tip: Vec2::ZERO,
            vel: Vec2::new(0.0, 100.0),
        };
        let mut prize = prize_at(0.0, 5.0);
        resolve_claw_prize(claw, &mut prize);
        assert_eq!(prize.vel.y, CLAW_MAX_PUSH);
    }
}
