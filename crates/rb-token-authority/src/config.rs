//! # Authority Configuration
//!
//! Plain defaults, overridable from the environment:
//!
//! | Variable | Field | Values |
//! |----------|-------|--------|
//! | `RB_POPULARITY_MAX` | `popularity_max` | `0..=100` |
//! | `RB_POPULARITY_SEED` | `popularity_seed` | any `u64` |
//! | `RB_UNMINTED_SLOTS` | `unminted_slots` | `zero-record`, `reject` |
//! | `RB_VERIFY_INVARIANTS` | `verify_invariants` | `true`, `false` |
//! | `RB_RECORD_EVENTS` | `record_events` | `true`, `false` |

use crate::domain::validator::UnmintedSlotPolicy;
use crate::domain::value_objects::Popularity;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `popularity_max` above the contractual bound.
    #[error("popularity_max {0} exceeds {}", Popularity::MAX)]
    PopularityOutOfRange(u8),

    /// Unrecognised unminted-slot policy.
    #[error("unknown unminted slot policy: {0}")]
    UnknownPolicy(String),
}

impl FromStr for UnmintedSlotPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero-record" | "zero_record" => Ok(Self::ZeroRecord),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Token authority configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityConfig {
    /// Upper bound for `fan_count` / `buzz_points` draws.
    pub popularity_max: u8,
    /// Seed for popularity draws. `None` seeds from OS entropy.
    pub popularity_seed: Option<u64>,
    /// How slots naming unminted ids are judged.
    pub unminted_slots: UnmintedSlotPolicy,
    /// Run the escrow invariant check after every commit.
    pub verify_invariants: bool,
    /// Keep an in-memory log of committed events.
    pub record_events: bool,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            popularity_max: Popularity::MAX,
            popularity_seed: None,
            unminted_slots: UnmintedSlotPolicy::ZeroRecord,
            verify_invariants: false,
            record_events: true,
        }
    }
}

impl AuthorityConfig {
    /// Defaults overridden by `RB_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `RB_*` key.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("RB_POPULARITY_MAX") {
            match raw.parse::<u8>() {
                Ok(max) if max <= Popularity::MAX => config.popularity_max = max,
                _ => warn!(value = %raw, "RB_POPULARITY_MAX must be an integer in 0..=100"),
            }
        }
        if let Some(raw) = lookup("RB_POPULARITY_SEED") {
            match raw.parse() {
                Ok(seed) => {
                    config.popularity_seed = Some(seed);
                    info!(seed, "Loaded popularity seed from environment");
                }
                Err(_) => warn!(value = %raw, "RB_POPULARITY_SEED must be a u64"),
            }
        }
        if let Some(raw) = lookup("RB_UNMINTED_SLOTS") {
            match raw.parse() {
                Ok(policy) => config.unminted_slots = policy,
                Err(err) => warn!(error = %err, "Ignoring RB_UNMINTED_SLOTS"),
            }
        }
        if let Some(raw) = lookup("RB_VERIFY_INVARIANTS") {
            match raw.parse() {
                Ok(flag) => config.verify_invariants = flag,
                Err(_) => warn!(value = %raw, "RB_VERIFY_INVARIANTS must be true or false"),
            }
        }
        if let Some(raw) = lookup("RB_RECORD_EVENTS") {
            match raw.parse() {
                Ok(flag) => config.record_events = flag,
                Err(_) => warn!(value = %raw, "RB_RECORD_EVENTS must be true or false"),
            }
        }

        config
    }

    /// Check field ranges.
    ///
    /// # Errors
    ///
    /// `PopularityOutOfRange` if `popularity_max > 100`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.popularity_max > Popularity::MAX {
            return Err(ConfigError::PopularityOutOfRange(self.popularity_max));
        }
        Ok(())
    }
}
