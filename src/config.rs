//! Server configuration read from environment variables.
//!
//! Every value has a default; an unparsable value is logged and replaced by its default.

use crate::logic::SlotPolicy;
use chrono::{Duration, NaiveTime};
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INACTIVITY_TIMEOUT_HOURS: u64 = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// SHUFFLE_SEED: when set, every shuffle without an explicit seed uses it (reproducible groups).
    pub shuffle_seed: Option<u64>,
    /// INACTIVITY_TIMEOUT_HOURS: tournaments untouched for this long are dropped from memory.
    /// Values too large to express in seconds are capped.
    pub inactivity_timeout_hours: u64,
    /// FIRST_KICKOFF, SLOT_MINUTES, DAY_CUTOFF
    pub slots: SlotPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shuffle_seed: None,
            inactivity_timeout_hours: DEFAULT_INACTIVITY_TIMEOUT_HOURS,
            slots: SlotPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut slots = SlotPolicy {
            first_kickoff: parse_time_or(&lookup, "FIRST_KICKOFF", defaults.slots.first_kickoff),
            slot_length: Duration::try_minutes(parse_or(
                &lookup,
                "SLOT_MINUTES",
                defaults.slots.slot_length.num_minutes(),
            ))
            .unwrap_or(defaults.slots.slot_length),
            day_cutoff: parse_time_or(&lookup, "DAY_CUTOFF", defaults.slots.day_cutoff),
        };
        if !slots.is_valid() {
            log::warn!(
                "Ignoring slot settings (kickoff {}, {} min, cutoff {}); using defaults",
                slots.first_kickoff,
                slots.slot_length.num_minutes(),
                slots.day_cutoff
            );
            slots = defaults.slots;
        }

        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            shuffle_seed: lookup("SHUFFLE_SEED").and_then(|raw| match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    log::warn!("Ignoring invalid SHUFFLE_SEED {:?}", raw);
                    None
                }
            }),
            inactivity_timeout_hours: parse_or(
                &lookup,
                "INACTIVITY_TIMEOUT_HOURS",
                defaults.inactivity_timeout_hours,
            ),
            slots,
        }
    }

    pub fn inactivity_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.inactivity_timeout_hours.saturating_mul(3600))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} {:?}", key, raw);
            default
        }),
        None => default,
    }
}

/// Times are written "HH:MM".
fn parse_time_or<F>(lookup: &F, key: &str, default: NaiveTime) -> NaiveTime
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M").unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} {:?}", key, raw);
            default
        }),
        None => default,
    }
}
