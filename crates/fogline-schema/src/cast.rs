//! Checked narrowing casts into the storage schema.
//!
//! Each helper names its column so a failure is attributable from batch
//! logs alone. Timestamps narrow from `f64` to `f32` without a range
//! check — the window tops out at hours, far inside exact `f32`
//! territory — but non-finite values are still rejected.

use crate::error::CastError;

fn out_of_range<T: std::fmt::Display>(
    column: &'static str,
    value: T,
    target: &'static str,
) -> CastError {
    CastError {
        column,
        value: value.to_string(),
        target,
    }
}

/// Narrow a player ID to `u8`.
pub fn to_u8(column: &'static str, value: u32) -> Result<u8, CastError> {
    u8::try_from(value).map_err(|_| out_of_range(column, value, "UInt8"))
}

/// Narrow a bounded counter to `u16`.
pub fn to_u16(column: &'static str, value: u32) -> Result<u16, CastError> {
    u16::try_from(value).map_err(|_| out_of_range(column, value, "UInt16"))
}

/// Narrow a resource-remaining value (with its `-1` sentinel) to `i16`.
pub fn to_i16(column: &'static str, value: i32) -> Result<i16, CastError> {
    i16::try_from(value).map_err(|_| out_of_range(column, value, "Int16"))
}

/// Narrow a timestamp or continuous value to `f32`, rejecting NaN/±inf.
pub fn to_f32(column: &'static str, value: f64) -> Result<f32, CastError> {
    if !value.is_finite() {
        return Err(out_of_range(column, value, "Float32"));
    }
    Ok(value as f32)
}

/// Narrow a doubled supply value to `u16`, requiring integrality.
///
/// Doubling eliminates half-supply; anything still fractional after
/// doubling is an engine anomaly, not a representable supply count.
pub fn supply_to_u16(column: &'static str, value: f32) -> Result<u16, CastError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(out_of_range(column, value, "UInt16"));
    }
    if !(0.0..=f32::from(u16::MAX)).contains(&value) {
        return Err(out_of_range(column, value, "UInt16"));
    }
    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_fits_u8() {
        assert_eq!(to_u8("player_id", 2).unwrap(), 2);
        let err = to_u8("player_id", 300).unwrap_err();
        assert_eq!(err.column, "player_id");
        assert_eq!(err.target, "UInt8");
    }

    #[test]
    fn sentinel_round_trips_i16() {
        assert_eq!(to_i16("resource_remaining", -1).unwrap(), -1);
        assert_eq!(to_i16("resource_remaining", 2250).unwrap(), 2250);
        assert!(to_i16("resource_remaining", 40_000).is_err());
    }

    #[test]
    fn doubled_supply_requires_integrality() {
        assert_eq!(supply_to_u16("p1_supply_used", 25.0).unwrap(), 25);
        // 12.5 raw supply was never doubled — reject rather than round.
        assert!(supply_to_u16("p1_supply_used", 12.5_f32).is_err());
        assert!(supply_to_u16("p1_supply_used", -2.0).is_err());
        assert!(supply_to_u16("p1_supply_used", 70_000.0).is_err());
    }

    #[test]
    fn non_finite_timestamp_rejected() {
        assert!(to_f32("timestamp", f64::NAN).is_err());
        assert_eq!(to_f32("timestamp", 843.5).unwrap(), 843.5);
    }
}
