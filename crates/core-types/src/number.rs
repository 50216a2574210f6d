//! Conversions between `Decimal` and the JSON numbers clients exchange.
//!
//! Incoming figures are read as `f64` and must fit comfortably inside the
//! `Decimal` range. Outgoing values are rendered as the `f64` nearest to the
//! decimal, so every surface (JSON, bullets, prompt, CLI) shows the same number.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Largest accepted magnitude. Differences of two in-range figures still fit a `Decimal`.
pub const MAX_MAGNITUDE: f64 = 1e28;

/// Smallest accepted non-zero magnitude, the finest step a `Decimal` can hold.
pub const MIN_MAGNITUDE: f64 = 1e-28;

/// The `f64` nearest to `value`.
pub fn to_f64(value: Decimal) -> f64 {
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or(f64::NAN)
}

/// Converts a client-supplied number, rejecting what a `Decimal` cannot hold faithfully.
pub fn from_f64(value: f64) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(format!("{value} is not a finite number"));
    }
    let magnitude = value.abs();
    if magnitude > MAX_MAGNITUDE {
        return Err(format!("{value:e} exceeds the supported magnitude of {MAX_MAGNITUDE:e}"));
    }
    if value != 0.0 && magnitude < MIN_MAGNITUDE {
        return Err(format!("{value:e} is below the supported precision of {MIN_MAGNITUDE:e}"));
    }
    Decimal::from_str(&value.to_string()).map_err(|e| format!("{value:e} is not representable: {e}"))
}

/// `serde(with)` adapter for required figures.
pub mod amount {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_f64(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = f64::deserialize(deserializer)?;
        from_f64(value).map_err(serde::de::Error::custom)
    }
}

/// `serde(with)` adapter for optional figures: absent is `None`, an explicit `null` is an error.
pub mod optional_amount {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&to_f64(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        amount::deserialize(deserializer).map(Some)
    }
}
