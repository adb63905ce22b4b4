//! Game settings and preferences
//!
//! Persisted separately from the session record, through the same key-value store.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 400,
            QualityPreset::High => 1200,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(format!("unknown quality preset: {other}")),
        }
    }
}

/// How the claw decides whether a closing grab holds on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrabPolicy {
    /// Nearest prize inside the grab radius is always captured
    #[default]
    Nearest,
    /// Nearest prize is captured only if a seeded roll comes in under `probability`
    Chance { probability: f32 },
}

impl GrabPolicy {
    /// Classic arcade odds
    pub fn classic() -> Self {
        GrabPolicy::Chance { probability: 0.4 }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (bubbles, sparkles)
    pub particles: bool,
    /// Screen shake on impacts/collections
    pub screen_shake: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,

    // === Gameplay ===
    pub grab_policy: GrabPolicy,
    /// Restock the pit when fewer loose prizes than this remain
    pub low_water_mark: usize,
    /// Prizes added per restock (and at startup)
    pub spawn_count: usize,
    /// Frames a UI message stays up
    pub message_frames: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            screen_shake: true,
            reduced_motion: false,

            grab_policy: GrabPolicy::Nearest,
            low_water_mark: 5,
            spawn_count: 14,
            // 2.5 seconds at 60 Hz
            message_frames: 150.0,
        }
    }
}

impl Settings {
    /// LocalStorage / store key
    pub const STORAGE_KEY: &'static str = "claw_machine_settings";

    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        match preset {
            // Low keeps a small particle budget but drops the camera shake
            QualityPreset::Low => {
                self.screen_shake = false;
            }
            QualityPreset::Medium | QualityPreset::High => {
                self.particles = true;
                self.screen_shake = true;
            }
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let GrabPolicy::Chance { probability } = self.grab_policy {
            if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
                return Err("grab probability must be within [0, 1]".to_string());
            }
        }
        if self.low_water_mark > self.spawn_count {
            return Err("low_water_mark must not exceed spawn_count".to_string());
        }
        if !self.message_frames.is_finite() || self.message_frames < 0.0 {
            return Err("message_frames must be finite and >= 0".to_string());
        }
        Ok(())
    }

    /// Load settings from the store, falling back to defaults on absence or bad data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings ({} quality)", settings.quality.as_str());
                    settings
                }
                Err(err) => {
                    log::warn!("Stored settings rejected ({err}), using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Stored settings unreadable ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(err) => log::warn!("Could not save settings: {err}"),
            },
            Err(err) => log::warn!("Could not encode settings: {err}"),
        }
    }
}
