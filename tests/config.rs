//! Integration tests for environment configuration.

use chrono::{Duration, NaiveTime};
use group_stage_tournament::{AppConfig, SlotPolicy};
use std::collections::HashMap;

fn config(vars: &[(&str, &str)]) -> AppConfig {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let c = config(&[]);
    assert_eq!(c, AppConfig::default());
    assert_eq!(c.host, "0.0.0.0");
    assert_eq!(c.port, 8080);
    assert_eq!(c.shuffle_seed, None);
    assert_eq!(c.slots, SlotPolicy::default());
    assert_eq!(c.inactivity_timeout(), std::time::Duration::from_secs(12 * 3600));
}

#[test]
fn values_are_read_from_the_environment() {
    let c = config(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("SHUFFLE_SEED", "42"),
        ("INACTIVITY_TIMEOUT_HOURS", "2"),
        ("FIRST_KICKOFF", "09:00"),
        ("SLOT_MINUTES", "120"),
        ("DAY_CUTOFF", "21:00"),
    ]);
    assert_eq!(c.host, "127.0.0.1");
    assert_eq!(c.port, 9000);
    assert_eq!(c.shuffle_seed, Some(42));
    assert_eq!(c.inactivity_timeout_hours, 2);
    assert_eq!(c.slots.first_kickoff, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(c.slots.slot_length, Duration::minutes(120));
    assert_eq!(c.slots.day_cutoff, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let c = config(&[("PORT", "eighty"), ("SHUFFLE_SEED", "-3"), ("FIRST_KICKOFF", "ten")]);
    assert_eq!(c.port, 8080);
    assert_eq!(c.shuffle_seed, None);
    assert_eq!(c.slots, SlotPolicy::default());
}

#[test]
fn unusable_slot_policy_is_replaced() {
    let c = config(&[("FIRST_KICKOFF", "21:00"), ("DAY_CUTOFF", "20:00")]);
    assert_eq!(c.slots, SlotPolicy::default());
    let c = config(&[("SLOT_MINUTES", "0")]);
    assert_eq!(c.slots, SlotPolicy::default());
}

#[test]
fn huge_inactivity_timeout_is_capped() {
    let hours = u64::MAX.to_string();
    let c = config(&[("INACTIVITY_TIMEOUT_HOURS", hours.as_str())]);
    assert_eq!(c.inactivity_timeout_hours, u64::MAX);
    assert_eq!(c.inactivity_timeout(), std::time::Duration::from_secs(u64::MAX));
}
