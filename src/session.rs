//! Score and prize collection
//!
//! Persisted as a single JSON record `{ score, collection }`. Loaded once at
//! startup, written after every collection, deleted on reset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::sim::PrizeKind;

/// Persisted player progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    /// Cumulative score
    #[serde(default)]
    pub score: u64,
    /// Collected prizes, oldest first
    #[serde(default)]
    pub collection: Vec<PrizeKind>,
}

impl Session {
    /// Store key for the record
    pub const STORAGE_KEY: &'static str = "claw-machine-state";

    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a delivered prize. Returns the points awarded.
    pub fn record(&mut self, kind: PrizeKind) -> u64 {
        let points = kind.points();
        self.score = self.score.saturating_add(points);
        self.collection.push(kind);
        points
    }

    /// How many of each category has been collected
    pub fn counts(&self) -> BTreeMap<PrizeKind, usize> {
        let mut counts = BTreeMap::new();
        for kind in &self.collection {
            *counts.entry(*kind).or_insert(0) += 1;
        }
        counts
    }

    /// True when nothing has been won yet
    pub fn is_empty(&self) -> bool {
        self.score == 0 && self.collection.is_empty()
    }

    /// Load the session; a missing or unreadable record yields an empty session
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("No saved session, starting fresh");
            return Self::new();
        };
        match serde_json::from_str::<Session>(&json) {
            Ok(session) => {
                log::info!(
                    "Loaded session: score {}, {} prizes",
                    session.score,
                    session.collection.len()
                );
                session
            }
            Err(err) => {
                log::warn!("Saved session unreadable ({err}), starting fresh");
                Self::new()
            }
        }
    }

    /// Write the session record
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::debug!("Session saved (score {})", self.score),
                Err(err) => log::warn!("Could not save session: {err}"),
            },
            Err(err) => log::warn!("Could not encode session: {err}"),
        }
    }

    /// Back to zero and forget the stored record
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) {
        self.score = 0;
        self.collection.clear();
        if let Err(err) = store.remove(Self::STORAGE_KEY) {
            log::warn!("Could not clear saved session: {err}");
        }
        log::info!("Session reset");
    }
}
