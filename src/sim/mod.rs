//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod claw;
pub mod collision;
pub mod effects;
pub mod physics;
pub mod registry;
pub mod state;
pub mod tick;

pub use claw::{MISS_MESSAGE, find_grab_candidate, request_drop};
pub use collision::ClawContact;
pub use registry::PrizeRegistry;
pub use state::{
    Bounds, Claw, ClawPhase, Message, Particle, ParticleKind, Prize, PrizeKind, ScreenShake,
    SimEvent, SimState,
};
pub use tick::{TickInput, tick};
