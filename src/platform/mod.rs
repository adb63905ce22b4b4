//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (host timestamps to normalized frame deltas)
//! - Browser bindings (wasm32 only)

pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use time::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use web::WebClawGame;
