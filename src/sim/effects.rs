//! Particle emitter and particle motion
//!
//! Purely cosmetic. Emitters append to the live particle list; the tick
//! integrates and culls them.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Particle, ParticleKind, ScreenShake, SimEvent};
use crate::consts::{COLLECT_SHAKE, IMPACT_SHAKE};
use crate::settings::Settings;

/// Bubble tint
pub const BUBBLE_COLOR: u32 = 0x14b8a6;
/// Gold used in the collection burst
pub const GOLD_COLOR: u32 = 0xfbbf24;

/// Radial burst of sparkles and stars (grab/collection celebrations)
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
    cap: usize,
) {
    for i in 0..count {
        if particles.len() >= cap {
            break;
        }
        let angle = std::f32::consts::TAU * i as f32 / count as f32
            + (rng.random::<f32>() - 0.5) * 0.5;
        let speed = 1.5 + rng.random::<f32>() * 3.0;
        let life = 40.0 + rng.random::<f32>() * 30.0;
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.5),
            life,
            max_life: life,
            size: 2.0 + rng.random::<f32>() * 4.0,
            color,
            alpha: 1.0,
            kind: if rng.random_bool(0.5) {
                ParticleKind::Sparkle
            } else {
                ParticleKind::Star
            },
        });
    }
}

/// Rising bubbles from the claw landing
pub fn spawn_bubbles(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    count: usize,
    cap: usize,
) {
    for _ in 0..count {
        if particles.len() >= cap {
            break;
        }
        let life = 60.0 + rng.random::<f32>() * 40.0;
        particles.push(Particle {
            pos: Vec2::new(pos.x + (rng.random::<f32>() - 0.5) * 20.0, pos.y),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 0.5,
                -(0.5 + rng.random::<f32>() * 1.5),
            ),
            life,
            max_life: life,
            size: 2.0 + rng.random::<f32>() * 3.0,
            color: BUBBLE_COLOR,
            alpha: 0.6,
            kind: ParticleKind::Bubble,
        });
    }
}

/// React to the events raised this tick: particles and screen shake
pub fn emit_for_events(
    events: &[SimEvent],
    particles: &mut Vec<Particle>,
    shake: &mut ScreenShake,
    rng: &mut Pcg32,
    settings: &Settings,
) {
    let cap = settings.max_particles();
    for event in events {
        match *event {
            SimEvent::Impact { pos } => {
                spawn_bubbles(particles, rng, pos - Vec2::new(0.0, 3.0), 6, cap);
                if settings.effective_screen_shake() {
                    shake.trigger(IMPACT_SHAKE);
                }
            }
            SimEvent::Grabbed { kind, pos, .. } => {
                spawn_burst(particles, rng, pos, kind.color(), 16, cap);
            }
            SimEvent::Collected { kind, pos, .. } => {
                spawn_burst(particles, rng, pos, kind.color(), 24, cap);
                spawn_burst(particles, rng, pos, GOLD_COLOR, 12, cap);
                if settings.effective_screen_shake() {
                    shake.trigger(COLLECT_SHAKE);
                }
            }
            SimEvent::DropStarted | SimEvent::Missed | SimEvent::Replenished { .. } => {}
        }
    }
}

/// Integrate particles and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, rng: &mut Pcg32, dt: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= dt;
        match p.kind {
            ParticleKind::Bubble => {
                p.vel.x += (rng.random::<f32>() - 0.5) * 0.1;
                p.vel.y *= 0.99;
            }
            ParticleKind::Sparkle | ParticleKind::Star => {
                p.vel.y += 0.02;
            }
        }
        if p.max_life > 0.0 {
            p.alpha = p.alpha.min((p.life / p.max_life).max(0.0));
        }
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PrizeKind;
    use rand::SeedableRng;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xffffff, 24, 10);
        assert_eq!(particles.len(), 10);
        assert!(particles.iter().all(|p| p.kind != ParticleKind::Bubble));
    }

    #[test]
    fn test_bubbles_rise() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_bubbles(&mut particles, &mut rng, Vec2::new(50.0, 50.0), 6, 100);
        assert_eq!(particles.len(), 6);
        assert!(particles.iter().all(|p| p.vel.y < 0.0));
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 0xffffff, 8, 100);
        for _ in 0..69 {
            update_particles(&mut particles, &mut rng, 1.0);
        }
        assert!(particles.iter().all(|p| p.life > 0.0));
        for _ in 0..2 {
            update_particles(&mut particles, &mut rng, 1.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_collection_emits_two_bursts_and_shakes() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        let mut shake = ScreenShake::default();
        let events = [SimEvent::Collected {
            kind: PrizeKind::Pearl,
            points: 60,
            pos: Vec2::ZERO,
        }];
        emit_for_events(&events, &mut particles, &mut shake, &mut rng, &Settings::default());
        assert_eq!(particles.len(), 36);
        assert_eq!(particles.iter().filter(|p| p.color == GOLD_COLOR).count(), 12);
        assert_eq!(shake.frames, COLLECT_SHAKE.0);
    }

    #[test]
    fn test_reduced_motion_suppresses_shake() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        let mut shake = ScreenShake::default();
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let events = [SimEvent::Impact { pos: Vec2::ZERO }];
        emit_for_events(&events, &mut particles, &mut shake, &mut rng, &settings);
        assert_eq!(particles.len(), 6);
        assert_eq!(shake.frames, 0.0);
    }
}
