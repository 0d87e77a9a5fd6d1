//! Field fallback tables for inbound alert documents.
//!
//! The alerting platform emits the same logical field in different
//! shapes depending on the alert-template version: sometimes top-level,
//! sometimes nested under `params.entryVersion` or `extras.autoTrail`.
//! Each table is an ordered list of source paths, evaluated
//! first-match-wins, so the resolution order is data rather than
//! inline conditionals.

use serde_json::{Number, Value};

/// Ordered source paths for one logical field.
pub type FieldSources = &'static [&'static [&'static str]];

/// Reference price for entry orders.
pub const PRICE: FieldSources = &[
    &["price"],
    &["params", "entryVersion", "price"],
    &["close"],
];

/// Reference price backfilled onto exit pass-throughs. The last close
/// is preferred here: an exit alert rarely carries an explicit price.
pub const EXIT_PRICE: FieldSources = &[&["close"], &["params", "entryVersion", "price"]];

pub const ORDER_TYPE: FieldSources = &[&["orderType"], &["params", "entryVersion", "orderType"]];

pub const TIME_IN_FORCE: FieldSources = &[
    &["timeInForce"],
    &["params", "entryVersion", "timeInForce"],
];

/// Initial stop distance for the trailing-stop block.
pub const STOP_AMOUNT: FieldSources = &[&["stopLoss", "amount"], &["stopLoss", "stopPrice"]];

pub const TRAIL_AMOUNT: FieldSources = &[&["trailAmount"], &["extras", "autoTrail", "stopLoss"]];

pub const TRIGGER_DISTANCE: FieldSources =
    &[&["triggerDistance"], &["extras", "autoTrail", "trigger"]];

fn lookup<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(document, |value, key| value.get(key))
}

/// Resolve a numeric field through its source chain.
///
/// A source counts as unset when absent, non-numeric, or zero: the
/// alert templates emit 0 for omitted levels, and a zero price or
/// distance is never meaningful downstream.
pub fn resolve_number(document: &Value, sources: FieldSources) -> Option<Number> {
    sources
        .iter()
        .filter_map(|path| lookup(document, path))
        .find_map(|value| {
            let number = value.as_number()?;
            if number.as_f64()? == 0.0 {
                return None;
            }
            Some(number.clone())
        })
}

/// Resolve a string field through its source chain. Empty strings are
/// treated as unset.
pub fn resolve_str<'a>(document: &'a Value, sources: FieldSources) -> Option<&'a str> {
    sources
        .iter()
        .filter_map(|path| lookup(document, path))
        .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
}
