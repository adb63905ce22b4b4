//! Claw Machine - an arcade claw crane mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (claw state machine, prize physics, particles)
//! - `game`: Host-facing facade (frame loop, persistence of the session record)
//! - `persistence`: Key-value stores for the session and settings records
//! - `platform`: Browser/native platform abstraction (frame clock, wasm bindings)
//! - `session`: Score and prize collection
//! - `settings`: Gameplay and effect preferences
//! - `snapshot`: Read-only render view handed to the drawing layer

pub mod game;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::ClawGame;
pub use session::Session;
pub use settings::{GrabPolicy, QualityPreset, Settings};
pub use snapshot::RenderSnapshot;

/// Game configuration constants.
///
/// Distances are in pixels, velocities in pixels per nominal 60 Hz frame.
pub mod consts {
    /// Milliseconds in one nominal frame (60 updates per second)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest delta-time accepted per frame, in frames
    pub const MAX_FRAME_DT: f32 = 3.0;

    /// Physics sub-iterations per frame
    pub const PHYSICS_SUBSTEPS: u32 = 4;
    pub const GRAVITY: f32 = 0.35;
    /// Per-substep velocity damping (x, y) and angular damping
    pub const LINEAR_DAMPING_X: f32 = 0.94;
    pub const LINEAR_DAMPING_Y: f32 = 0.98;
    pub const ANGULAR_DAMPING: f32 = 0.9;
    /// Extra spin drag applied after rotation integrates
    pub const ANGULAR_DRAG: f32 = 0.98;
    /// Linear speeds below this are zeroed (anti-jitter)
    pub const VELOCITY_SLEEP_THRESHOLD: f32 = 0.3;
    pub const ANGULAR_SLEEP_THRESHOLD: f32 = 0.03;
    /// Speed a resting prize must exceed to wake up
    pub const WAKE_THRESHOLD: f32 = 3.0;
    /// Overlap tolerated before positional correction kicks in
    pub const COLLISION_SLOP: f32 = 0.5;
    /// Fraction of the remaining overlap corrected per substep
    pub const COLLISION_BIAS: f32 = 0.8;
    /// Velocity kept after a prize-prize impulse
    pub const CONTACT_DAMPING: f32 = 0.5;
    pub const CONTACT_FRICTION: f32 = 0.5;
    /// Scale of the spin picked up from tangential impulses
    pub const CONTACT_SPIN: f32 = 0.05;

    /// Prize body
    pub const PRIZE_RADIUS: f32 = 16.0;
    pub const PRIZE_MASS_MIN: f32 = 0.8;
    pub const PRIZE_MASS_MAX: f32 = 1.2;

    /// Claw rail motion
    pub const CLAW_SPEED: f32 = 3.5;
    pub const SWING_FORCE: f32 = 0.025;
    pub const SWING_DAMPING: f32 = 0.97;
    pub const SWING_SPRING: f32 = 0.015;
    pub const SWING_MAX: f32 = 0.5;
    /// How much of the swing angle shows up as tip offset per pixel of cable
    pub const SWING_TIP_FACTOR: f32 = 0.06;
    /// Arms ease toward their target by this fraction per tick
    pub const ARM_EASING: f32 = 0.15;

    /// Claw drop/return
    pub const DROP_ACCEL: f32 = 0.25;
    pub const DROP_MAX_SPEED: f32 = 6.0;
    pub const RETURN_SPEED: f32 = 2.5;
    /// Frames the arms take to close before the grab is decided
    pub const CLAW_CLOSE_TIME: f32 = 18.0;
    /// Vertical distance from claw body to its grabbing tip
    pub const TIP_OFFSET: f32 = 28.0;
    pub const GRAB_RADIUS: f32 = 30.0;
    /// Collision radius of the claw tip while it moves through the pit
    pub const CLAW_BODY_RADIUS: f32 = 10.0;
    pub const CLAW_PUSH_FORCE: f32 = 0.3;
    pub const CLAW_MAX_PUSH: f32 = 2.0;
    /// Landing shove: radius (in prize radii) and peak strength
    pub const IMPACT_RADIUS_FACTOR: f32 = 2.5;
    pub const IMPACT_FORCE: f32 = 1.2;
    /// How close to the chute the claw must be to release
    pub const CHUTE_TOLERANCE: f32 = 4.0;

    /// Machine layout offsets relative to the cabinet edges
    pub const RAIL_DROP: f32 = 45.0;
    pub const CABLE_TOP: f32 = 30.0;
    pub const FLOOR_INSET: f32 = 12.0;
    pub const WALL_INSET: f32 = 5.0;
    pub const RAIL_INSET_LEFT: f32 = 30.0;
    pub const RAIL_INSET_RIGHT: f32 = 50.0;
    pub const CHUTE_INSET: f32 = 32.0;
    pub const SPAWN_INSET: f32 = 40.0;

    /// Screen shake (frames, intensity)
    pub const IMPACT_SHAKE: (f32, f32) = (8.0, 3.0);
    pub const COLLECT_SHAKE: (f32, f32) = (6.0, 2.0);
    pub const SHAKE_DECAY: f32 = 0.85;
}
