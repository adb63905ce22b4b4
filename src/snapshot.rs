//! Read-only view of the simulation for the drawing layer
//!
//! Built once per frame from [`SimState`]. Owns its data so it can be handed
//! across the wasm boundary as JSON.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Bounds, ClawPhase, Particle, ParticleKind, Prize, PrizeKind, SimState};

/// A prize as drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeView {
    pub id: u32,
    pub kind: PrizeKind,
    pub emoji: &'static str,
    pub color: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub glow_phase: f32,
}

impl From<&Prize> for PrizeView {
    fn from(prize: &Prize) -> Self {
        Self {
            id: prize.id,
            kind: prize.kind,
            emoji: prize.kind.emoji(),
            color: prize.kind.color(),
            pos: prize.pos,
            rotation: prize.rotation,
            glow_phase: prize.glow_phase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClawView {
    pub x: f32,
    pub y: f32,
    /// Cable attachment point on the rail
    pub anchor: Vec2,
    pub tip: Vec2,
    pub swing_angle: f32,
    pub open_amount: f32,
    pub phase: ClawPhase,
    pub held: Option<PrizeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
    pub kind: ParticleKind,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            color: p.color,
            alpha: p.alpha,
            kind: p.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub text: String,
    pub alpha: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub bounds: Bounds,
    pub claw: ClawView,
    /// Loose prizes only; the held prize rides on the claw
    pub prizes: Vec<PrizeView>,
    pub particles: Vec<ParticleView>,
    pub score: u64,
    pub collection: Vec<PrizeKind>,
    pub message: Option<MessageView>,
    /// Camera offset magnitude for this frame (0 when calm)
    pub shake: f32,
    pub can_drop: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &SimState) -> Self {
        let bounds = state.bounds;
        let claw = &state.claw;
        Self {
            bounds,
            claw: ClawView {
                x: claw.x,
                y: claw.y,
                anchor: Vec2::new(claw.x, bounds.cable_anchor_y()),
                tip: claw.tip(&bounds),
                swing_angle: claw.swing_angle,
                open_amount: claw.open_amount,
                phase: claw.phase,
                held: claw.held.as_ref().map(PrizeView::from),
            },
            prizes: state
                .prizes
                .iter()
                .filter(|p| !p.grabbed)
                .map(PrizeView::from)
                .collect(),
            particles: state.particles.iter().map(ParticleView::from).collect(),
            score: state.session.score,
            collection: state.session.collection.clone(),
            message: state.message.as_ref().map(|m| MessageView {
                text: m.text.clone(),
                alpha: m.alpha(),
            }),
            shake: if state.shake.frames > 0.0 {
                state.shake.intensity
            } else {
                0.0
            },
            can_drop: claw.phase == ClawPhase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_capture_hides_held_prize_from_pit() {
        let bounds = Bounds::new(0.0, 400.0, 0.0, 600.0);
        let mut state = SimState::new(3, bounds, Session::default(), 4);
        let held = state.prizes.as_slice()[0].id;
        let mut prize = state.prizes.take(held).unwrap();
        prize.grabbed = true;
        state.claw.held = Some(prize);

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.prizes.len(), 3);
        assert!(snap.prizes.iter().all(|p| p.id != held));
        assert_eq!(snap.claw.held.as_ref().map(|p| p.id), Some(held));
        assert!(snap.can_drop);
    }

    #[test]
    fn test_capture_serializes() {
        let bounds = Bounds::new(0.0, 400.0, 0.0, 600.0);
        let mut state = SimState::empty(3, bounds, Session::default());
        state.show_message("hello", 10.0);
        let json = serde_json::to_string(&RenderSnapshot::capture(&state)).unwrap();
        assert!(json.contains(r#""text":"hello""#));
        assert!(json.contains(r#""phase":"Idle""#));
    }
}
