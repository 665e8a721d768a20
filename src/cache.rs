use std::collections::HashMap;

use crate::model::method::{PearsonMapping, ScoreMethod};
use crate::model::zone::Zone;
use crate::pipeline::score::ScoreOutcome;

/// Identity of one comparison. Two keys are equal exactly when the engine
/// would compute the same result, so stale entries cannot be read back:
/// changing the baseline, the sample, the zone configuration, or the method
/// changes the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    pub baseline_id: String,
    pub sample_id: String,
    pub zones_fingerprint: u64,
    pub method: ScoreMethod,
    pub mapping: PearsonMapping,
}

/// Optional memoization layer over the pure scoring functions. Purely a
/// latency shortcut: results must be identical with the cache removed.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: HashMap<ScoreKey, ScoreOutcome>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ScoreKey) -> Option<ScoreOutcome> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: ScoreKey, outcome: ScoreOutcome) {
        self.entries.insert(key, outcome);
    }

    pub fn get_or_compute(
        &mut self,
        key: ScoreKey,
        compute: impl FnOnce() -> ScoreOutcome,
    ) -> ScoreOutcome {
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let outcome = compute();
        self.entries.insert(key, outcome.clone());
        outcome
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// FNV-64 fingerprint of a zone configuration. Label text is excluded: it
/// is presentation-only and cannot affect weights.
pub fn zones_fingerprint(zones: &[Zone]) -> u64 {
    let mut hasher = Fnv64::new();
    for zone in zones {
        hasher.update(&zone.min_wavelength.to_le_bytes());
        hasher.update(&zone.max_wavelength.to_le_bytes());
        hasher.update(&zone.weight_percent.to_le_bytes());
        hasher.update(zone.key.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finish()
}

struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    fn new() -> Self {
        Self {
            hash: 0xcbf29ce484222325,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let mut h = self.hash;
        for &b in data {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}
