//! Engine configuration
//!
//! Defaults come from the constants in `types`; `from_env` lets the host
//! override them with `MATCH3_*` environment variables. Malformed values fall
//! back to the default rather than failing.

use crate::types::{
    DROP_MS, EXPLOSION_MS, INITIAL_REPAIR_TRIES, INVALID_SWAP_MS, SPECIAL_CHANCE_PERCENT,
    SWAP_CUE_MS, SWAP_MS,
};

/// Pacing windows in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timings {
    pub swap_cue_ms: u32,
    pub swap_ms: u32,
    pub invalid_swap_ms: u32,
    pub explosion_ms: u32,
    pub drop_ms: u32,
}

impl Timings {
    /// Every window zero: a swap resolves completely within one tick.
    pub const INSTANT: Timings = Timings {
        swap_cue_ms: 0,
        swap_ms: 0,
        invalid_swap_ms: 0,
        explosion_ms: 0,
        drop_ms: 0,
    };

    /// Scale every window by `percent` / 100.
    pub fn scaled(self, percent: u32) -> Self {
        let s = |ms: u32| ((ms as u64 * percent as u64) / 100).min(u32::MAX as u64) as u32;
        Self {
            swap_cue_ms: s(self.swap_cue_ms),
            swap_ms: s(self.swap_ms),
            invalid_swap_ms: s(self.invalid_swap_ms),
            explosion_ms: s(self.explosion_ms),
            drop_ms: s(self.drop_ms),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            swap_cue_ms: SWAP_CUE_MS,
            swap_ms: SWAP_MS,
            invalid_swap_ms: INVALID_SWAP_MS,
            explosion_ms: EXPLOSION_MS,
            drop_ms: DROP_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    pub seed: u32,
    /// Keep swaps that produce no match instead of reverting them.
    pub free_swap: bool,
    /// Percent chance that a refill spawn is special.
    pub special_chance: u32,
    pub repair_tries: u32,
    pub timings: Timings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            free_swap: false,
            special_chance: SPECIAL_CHANCE_PERCENT,
            repair_tries: INITIAL_REPAIR_TRIES,
            timings: Timings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` is this over the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(seed) = lookup("MATCH3_SEED").and_then(|v| v.trim().parse::<u32>().ok()) {
            cfg.seed = seed;
        }
        if let Some(v) = lookup("MATCH3_FREE_SWAP") {
            cfg.free_swap = parse_flag(&v);
        }
        if let Some(chance) = lookup("MATCH3_SPECIAL_CHANCE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|c| *c <= 100)
        {
            cfg.special_chance = chance;
        }
        if let Some(speed) =
            lookup("MATCH3_ANIM_SPEED").and_then(|v| v.trim().parse::<u32>().ok())
        {
            cfg.timings = cfg.timings.scaled(speed);
        }
        if let Some(tries) =
            lookup("MATCH3_REPAIR_TRIES").and_then(|v| v.trim().parse::<u32>().ok())
        {
            cfg.repair_tries = tries;
        }

        cfg
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_free_swap(mut self, free_swap: bool) -> Self {
        self.free_swap = free_swap;
        self
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 1);
        assert!(!cfg.free_swap);
        assert_eq!(cfg.special_chance, 8);
        assert_eq!(cfg.repair_tries, 24);
        assert_eq!(cfg.timings.swap_ms, 90);
        assert_eq!(cfg.timings.explosion_ms, 300);
    }

    #[test]
    fn lookup_overrides() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("MATCH3_SEED", "42"),
            ("MATCH3_FREE_SWAP", "true"),
            ("MATCH3_SPECIAL_CHANCE", "25"),
            ("MATCH3_ANIM_SPEED", "50"),
            ("MATCH3_REPAIR_TRIES", "3"),
        ]));
        assert_eq!(cfg.seed, 42);
        assert!(cfg.free_swap);
        assert_eq!(cfg.special_chance, 25);
        assert_eq!(cfg.repair_tries, 3);
        assert_eq!(cfg.timings.explosion_ms, 150);
        assert_eq!(cfg.timings.drop_ms, 105);
    }

    #[test]
    fn malformed_values_fall_back() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("MATCH3_SEED", "abc"),
            ("MATCH3_SPECIAL_CHANCE", "250"),
            ("MATCH3_ANIM_SPEED", "-1"),
        ]));
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn zero_speed_is_instant() {
        assert_eq!(Timings::default().scaled(0), Timings::INSTANT);
    }
}
