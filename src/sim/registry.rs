//! Prize registry: owns the loose prize bodies and keeps the pit stocked

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Bounds, Prize, PrizeKind};
use crate::consts::*;

/// Loose prizes in the pit, in spawn order (stable iteration for determinism)
#[derive(Debug, Clone)]
pub struct PrizeRegistry {
    prizes: Vec<Prize>,
    next_id: u32,
}

impl Default for PrizeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PrizeRegistry {
    pub fn new() -> Self {
        Self {
            prizes: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new prize ID
    fn next_prize_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scatter `count` new prizes across the upper part of the pit so they fall and settle
    pub fn spawn(&mut self, count: usize, bounds: &Bounds, rng: &mut Pcg32) {
        let span = (bounds.right - bounds.left - 2.0 * SPAWN_INSET).max(0.0);
        for _ in 0..count {
            let kind = PrizeKind::ALL[rng.random_range(0..PrizeKind::ALL.len())];
            let x = bounds.left + SPAWN_INSET + rng.random::<f32>() * span;
            let y = bounds.bottom - 100.0 - rng.random::<f32>() * 80.0;

            let id = self.next_prize_id();
            let mut prize = Prize::new(id, kind, Vec2::new(x, y));
            prize.vel = Vec2::new((rng.random::<f32>() - 0.5) * 0.5, rng.random::<f32>() * 0.5);
            prize.rotation = (rng.random::<f32>() - 0.5) * std::f32::consts::TAU;
            prize.angular_vel = (rng.random::<f32>() - 0.5) * 0.03;
            prize.mass = PRIZE_MASS_MIN + rng.random::<f32>() * (PRIZE_MASS_MAX - PRIZE_MASS_MIN);
            prize.glow_phase = rng.random::<f32>() * std::f32::consts::TAU;
            self.prizes.push(prize);
        }
    }

    /// Add a fresh batch when fewer than `low_water_mark` loose prizes remain.
    /// Returns how many were spawned.
    pub fn replenish(
        &mut self,
        bounds: &Bounds,
        low_water_mark: usize,
        batch: usize,
        rng: &mut Pcg32,
    ) -> usize {
        if self.prizes.len() >= low_water_mark {
            return 0;
        }
        self.spawn(batch, bounds, rng);
        log::info!("Replenished pit with {} prizes ({} total)", batch, self.prizes.len());
        batch
    }

    /// Insert an already-built prize, assigning it a fresh ID
    pub fn insert(&mut self, mut prize: Prize) -> u32 {
        prize.id = self.next_prize_id();
        let id = prize.id;
        self.prizes.push(prize);
        id
    }

    /// Remove a prize from the pit, handing ownership to the caller
    pub fn take(&mut self, id: u32) -> Option<Prize> {
        let idx = self.prizes.iter().position(|p| p.id == id)?;
        Some(self.prizes.remove(idx))
    }

    pub fn get(&self, id: u32) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    pub fn clear(&mut self) {
        self.prizes.clear();
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prize> {
        self.prizes.iter()
    }

    pub fn as_slice(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Prize] {
        &mut self.prizes
    }
}
