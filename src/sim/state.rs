//! Simulation state and core types
//!
//! Everything the per-frame tick mutates lives in [`SimState`]. The host owns
//! exactly one instance and hands it to each subsystem by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::registry::PrizeRegistry;
use crate::consts::*;
use crate::session::Session;

/// Prize categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeKind {
    Lobster,
    Treasure,
    Duck,
    Starfish,
    Pearl,
}

impl PrizeKind {
    pub const ALL: [PrizeKind; 5] = [
        PrizeKind::Lobster,
        PrizeKind::Treasure,
        PrizeKind::Duck,
        PrizeKind::Starfish,
        PrizeKind::Pearl,
    ];

    /// Points awarded when this prize reaches the chute
    pub fn points(self) -> u64 {
        match self {
            PrizeKind::Lobster => 50,
            PrizeKind::Treasure => 40,
            PrizeKind::Duck => 20,
            PrizeKind::Starfish => 30,
            PrizeKind::Pearl => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrizeKind::Lobster => "Lobster",
            PrizeKind::Treasure => "Treasure",
            PrizeKind::Duck => "Duck",
            PrizeKind::Starfish => "Starfish",
            PrizeKind::Pearl => "Pearl",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PrizeKind::Lobster => "🦞",
            PrizeKind::Treasure => "🧰",
            PrizeKind::Duck => "🦆",
            PrizeKind::Starfish => "⭐",
            PrizeKind::Pearl => "🫧",
        }
    }

    /// Glow/particle colour as 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            PrizeKind::Lobster => 0xff6b6b,
            PrizeKind::Treasure => 0xffd93d,
            PrizeKind::Duck => 0x6bcb77,
            PrizeKind::Starfish => 0xff9a3c,
            PrizeKind::Pearl => 0xa78bfa,
        }
    }
}

/// A loose (or held) prize body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prize {
    pub id: u32,
    pub kind: PrizeKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub angular_vel: f32,
    pub mass: f32,
    pub restitution: f32,
    /// Held by the claw; never simulated while set
    pub grabbed: bool,
    /// Resting on the floor; skipped by integration until disturbed
    pub grounded: bool,
    /// Render-only glow animation offset
    pub glow_phase: f32,
}

impl Prize {
    pub fn new(id: u32, kind: PrizeKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            mass: 1.0,
            restitution: 0.0,
            grabbed: false,
            grounded: false,
            glow_phase: 0.0,
        }
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Drop all motion (used for sleeping and for the held prize)
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
    }
}

/// Cabinet edges in screen space (y grows downward) plus the derived layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Cabinet layout for a canvas of the given size
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let pad = (width * 0.04).min(30.0);
        Self::new(pad + 10.0, width - pad - 10.0, 55.0, height - 75.0)
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Height of the claw when parked on the rail
    pub fn rail_y(&self) -> f32 {
        self.top + RAIL_DROP
    }

    /// Where the cable leaves the trolley (pivot of the swing)
    pub fn cable_anchor_y(&self) -> f32 {
        self.top + CABLE_TOP
    }

    /// Left end of the rail. The rail always spans the centre, so on cabinets
    /// too narrow for both insets it shrinks toward the centre point.
    pub fn rail_min_x(&self) -> f32 {
        (self.left + RAIL_INSET_LEFT).min(self.center_x())
    }

    pub fn rail_max_x(&self) -> f32 {
        (self.right - RAIL_INSET_RIGHT).max(self.center_x())
    }

    pub fn chute_x(&self) -> f32 {
        self.right - CHUTE_INSET
    }

    pub fn floor_y(&self) -> f32 {
        self.bottom - FLOOR_INSET
    }

    /// Centre height of a prize lying on the floor
    pub fn rest_y(&self) -> f32 {
        self.floor_y() - PRIZE_RADIUS
    }

    pub fn left_wall(&self) -> f32 {
        self.left + PRIZE_RADIUS + WALL_INSET
    }

    pub fn right_wall(&self) -> f32 {
        self.right - PRIZE_RADIUS - WALL_INSET
    }

    /// Claw depth at the bottom of a drop: the tip lands on resting prize centres
    pub fn drop_y(&self) -> f32 {
        self.rest_y() - TIP_OFFSET
    }
}

/// Claw cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClawPhase {
    /// Parked on the rail, steerable, arms open
    #[default]
    Idle,
    /// Accelerating down into the pit
    Dropping,
    /// At full depth, arms closing
    Closing,
    /// Rising (and, when holding a prize, travelling to the chute)
    Returning,
}

/// The claw and its cable
#[derive(Debug, Clone)]
pub struct Claw {
    pub x: f32,
    pub y: f32,
    pub swing_angle: f32,
    pub swing_speed: f32,
    /// Arm target: open or closed
    pub open: bool,
    /// Animated arm opening in [0, 1]
    pub open_amount: f32,
    pub phase: ClawPhase,
    /// The prize currently held; the claw owns it exclusively
    pub held: Option<Prize>,
    pub drop_y: f32,
    pub drop_speed: f32,
    /// Frames left before the grab is decided
    pub closing_timer: f32,
    /// Vertical motion during the last tick (for pushing prizes)
    pub vel_y: f32,
}

impl Claw {
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            x: bounds.center_x(),
            y: bounds.rail_y(),
            swing_angle: 0.0,
            swing_speed: 0.0,
            open: true,
            open_amount: 1.0,
            phase: ClawPhase::Idle,
            held: None,
            drop_y: bounds.drop_y(),
            drop_speed: 0.0,
            closing_timer: 0.0,
            vel_y: 0.0,
        }
    }

    /// Horizontal offset of the tip caused by the cable swing
    pub fn swing_offset(&self, bounds: &Bounds) -> f32 {
        self.swing_angle.sin() * (self.y - bounds.cable_anchor_y()) * SWING_TIP_FACTOR
    }

    /// Grabbing point below the claw body
    pub fn tip(&self, bounds: &Bounds) -> Vec2 {
        Vec2::new(self.x + self.swing_offset(bounds), self.y + TIP_OFFSET)
    }

    /// True while the claw sweeps through the pit and can shove prizes
    pub fn is_sweeping(&self) -> bool {
        matches!(self.phase, ClawPhase::Dropping | ClawPhase::Returning)
    }
}

/// Particle look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Sparkle,
    Bubble,
    Star,
}

/// A decorative particle (no gameplay effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
    pub kind: ParticleKind,
}

/// Things that happened during a tick; consumed by the effect emitter and the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A drop was accepted
    DropStarted,
    /// Claw hit full depth
    Impact { pos: Vec2 },
    /// Grab decision captured a prize
    Grabbed { prize_id: u32, kind: PrizeKind, pos: Vec2 },
    /// Grab decision came up empty
    Missed,
    /// Held prize delivered to the chute
    Collected { kind: PrizeKind, points: u64, pos: Vec2 },
    /// Fresh prizes were added to the pit
    Replenished { count: usize },
}

/// Transient UI text with an expiry countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// Frames until the message disappears
    pub remaining: f32,
}

impl Message {
    /// Fade over the last 20 frames
    pub fn alpha(&self) -> f32 {
        (self.remaining / 20.0).clamp(0.0, 1.0)
    }
}

/// Camera shake driven by impacts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub frames: f32,
    pub intensity: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, (frames, intensity): (f32, f32)) {
        self.frames = frames;
        self.intensity = intensity;
    }

    pub fn decay(&mut self, dt: f32) {
        if self.frames > 0.0 {
            self.frames = (self.frames - dt).max(0.0);
            self.intensity *= SHAKE_DECAY;
        }
        if self.frames == 0.0 {
            self.intensity = 0.0;
        }
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct SimState {
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: Bounds,
    pub claw: Claw,
    pub prizes: PrizeRegistry,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Score and collection; persisted by the host after each collection
    pub session: Session,
    pub message: Option<Message>,
    pub shake: ScreenShake,
    /// Events raised during the most recent tick
    pub events: Vec<SimEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    /// Create a state with an empty pit
    pub fn empty(seed: u64, bounds: Bounds, session: Session) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            claw: Claw::new(&bounds),
            prizes: PrizeRegistry::new(),
            particles: Vec::new(),
            session,
            message: None,
            shake: ScreenShake::default(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Create a state with `prize_count` freshly spawned prizes
    pub fn new(seed: u64, bounds: Bounds, session: Session, prize_count: usize) -> Self {
        let mut state = Self::empty(seed, bounds, session);
        state.prizes.spawn(prize_count, &bounds, &mut state.rng);
        state
    }

    pub fn show_message(&mut self, text: impl Into<String>, frames: f32) {
        self.message = Some(Message {
            text: text.into(),
            remaining: frames,
        });
    }

    /// Count down the message and drop it once expired
    pub fn tick_message(&mut self, dt: f32) {
        if let Some(message) = &mut self.message {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.message = None;
            }
        }
    }

    /// Number of prizes currently marked grabbed anywhere in the state
    pub fn grabbed_count(&self) -> usize {
        let loose = self.prizes.iter().filter(|p| p.grabbed).count();
        loose + self.claw.held.iter().filter(|p| p.grabbed).count()
    }
}
