//! Pure fixed-point functions - no I/O, no async
//! All functions here must be deterministic and side-effect free
//!
//! Two scales are in play: the deposited asset (e6) and vault shares (e18).
//! Amounts are carried as `Nat` so uint256 ledger values never truncate.

use candid::Nat;
use num_bigint::BigUint;
use num_traits::Zero;
use crate::infrastructure::constants::DISPLAY_FRACTION_DIGITS;
use crate::infrastructure::errors::AmountError;

/// 10^exp as an arbitrary precision integer
fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Parse a user-entered decimal string into integer base units
///
/// Over-precision input is rejected rather than truncated, a truncated
/// amount would misstate what gets transacted.
///
/// # Examples
/// - `to_base_units("100", 6)` → `100_000_000`
/// - `to_base_units(".5", 6)` → `500_000`
/// - `to_base_units("1.0000001", 6)` → `TooManyDecimals`
pub fn to_base_units(input: &str, decimals: u32) -> Result<Nat, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    if trimmed.starts_with('-') {
        return Err(AmountError::Negative { input: trimmed.to_string() });
    }

    let not_numeric = || AmountError::NotNumeric { input: trimmed.to_string() };

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(not_numeric());
    }

    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            input: trimmed.to_string(),
            decimals,
        });
    }

    let whole_units = if whole.is_empty() {
        BigUint::zero()
    } else {
        whole.parse::<BigUint>().map_err(|_| not_numeric())?
    };

    // Right-pad the fraction to exactly `decimals` digits
    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction_units = if padded.is_empty() {
        BigUint::zero()
    } else {
        padded.parse::<BigUint>().map_err(|_| not_numeric())?
    };

    Ok(Nat::from(whole_units * pow10(decimals) + fraction_units))
}

/// Render base units with a fixed number of fraction digits (half-up)
///
/// Never fails. Absent or zero values render as zero, e.g. `"0.00"`.
pub fn to_display_string(value: Option<&Nat>, decimals: u32, fraction_digits: u32) -> String {
    let raw = match value {
        Some(v) if !v.0.is_zero() => &v.0,
        _ => return zero_string(fraction_digits),
    };

    let scale = pow10(decimals);
    let scaled = raw * pow10(fraction_digits);
    let mut rounded = &scaled / &scale;
    let remainder = &scaled % &scale;
    if remainder * 2u32 >= scale {
        rounded += 1u32;
    }

    let unit = pow10(fraction_digits);
    let whole = &rounded / &unit;
    if fraction_digits == 0 {
        return whole.to_string();
    }

    let fraction = &rounded % &unit;
    format!("{}.{:0>width$}", whole, fraction.to_string(), width = fraction_digits as usize)
}

/// Dashboard rendering with the default two fraction digits
pub fn display_amount(value: Option<&Nat>, decimals: u32) -> String {
    to_display_string(value, decimals, DISPLAY_FRACTION_DIGITS)
}

/// Full-precision decimal string with trailing zeros trimmed
///
/// Output is always accepted back by `to_base_units` at the same scale.
pub fn format_units(value: &Nat, decimals: u32) -> String {
    let scale = pow10(decimals);
    let whole = &value.0 / &scale;
    let fraction = &value.0 % &scale;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let digits = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// (a × b) ÷ c with arbitrary precision; `None` when c is zero
pub fn multiply_and_divide(a: &BigUint, b: &BigUint, c: &BigUint) -> Option<BigUint> {
    if c.is_zero() {
        return None;
    }
    Some((a * b) / c)
}

fn zero_string(fraction_digits: u32) -> String {
    if fraction_digits == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(fraction_digits as usize))
    }
}

// ===== Tests =====
