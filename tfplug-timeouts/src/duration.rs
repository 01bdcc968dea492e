//! Duration grammar used by timeout attributes
//!
//! A duration is an optional sign followed by one or more groups of a decimal
//! number (with optional fraction) and a unit suffix, e.g. `"300ms"`,
//! `"-1.5h"` or `"2h45m"`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`,
//! `m` and `h`. Values are held as signed 64-bit nanoseconds.

use crate::error::ParseDurationError;
use chrono::TimeDelta;
use std::time::Duration;

/// 2^63, one past the largest positive nanosecond count
const OVERFLOW_LIMIT: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        // micro sign (U+00B5) and greek mu (U+03BC)
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Consume leading digits. `None` when the integer exceeds 2^63.
fn leading_int(s: &[u8]) -> Option<(u64, &[u8])> {
    let mut x: u64 = 0;
    let mut i = 0;
    while let Some(c) = s.get(i).filter(|c| c.is_ascii_digit()) {
        if x > OVERFLOW_LIMIT / 10 {
            return None;
        }
        x = x * 10 + u64::from(c - b'0');
        if x > OVERFLOW_LIMIT {
            return None;
        }
        i += 1;
    }
    Some((x, &s[i..]))
}

/// Consume fraction digits after the decimal point. Digits past the point of
/// overflow are consumed but ignored.
fn leading_fraction(s: &[u8]) -> (u64, f64, &[u8]) {
    let mut x: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    let mut i = 0;
    while let Some(c) = s.get(i).filter(|c| c.is_ascii_digit()) {
        i += 1;
        if overflow {
            continue;
        }
        if x > (OVERFLOW_LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let y = x * 10 + u64::from(c - b'0');
        if y > OVERFLOW_LIMIT {
            overflow = true;
            continue;
        }
        x = y;
        scale *= 10.0;
    }
    (x, scale, &s[i..])
}

/// Parse a duration string such as `"30s"` or `"2h45m"`.
pub fn parse_duration(input: &str) -> Result<TimeDelta, ParseDurationError> {
    let mut s = input.as_bytes();
    let mut negative = false;

    if let Some((&sign, rest)) = s.split_first() {
        if sign == b'-' || sign == b'+' {
            negative = sign == b'-';
            s = rest;
        }
    }

    // Special case: a bare zero needs no unit
    if s == b"0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(ParseDurationError::invalid(input));
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !(s[0] == b'.' || s[0].is_ascii_digit()) {
            return Err(ParseDurationError::invalid(input));
        }

        let before = s.len();
        let (mut value, rest) =
            leading_int(s).ok_or_else(|| ParseDurationError::invalid(input))?;
        s = rest;
        let has_int = before != s.len();

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some((&b'.', rest)) = s.split_first() {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            fraction = f;
            scale = sc;
            has_fraction = before != rest.len();
            s = rest;
        }

        // "." alone is not a number
        if !has_int && !has_fraction {
            return Err(ParseDurationError::invalid(input));
        }

        let unit_len = s
            .iter()
            .position(|c| *c == b'.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit {
                input: input.to_string(),
            });
        }

        // Both ends of the unit sit on ASCII bytes or the end of input, so
        // slicing the original str stays on char boundaries.
        let offset = input.len() - s.len();
        let unit = &input[offset..offset + unit_len];
        s = &s[unit_len..];

        let nanos = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if value > OVERFLOW_LIMIT / nanos {
            return Err(ParseDurationError::invalid(input));
        }
        value *= nanos;

        if fraction > 0 {
            value += (fraction as f64 * (nanos as f64 / scale)) as u64;
            if value > OVERFLOW_LIMIT {
                return Err(ParseDurationError::invalid(input));
            }
        }

        total = total
            .checked_add(value)
            .filter(|total| *total <= OVERFLOW_LIMIT)
            .ok_or_else(|| ParseDurationError::invalid(input))?;
    }

    if negative {
        // 2^63 wraps to i64::MIN, which is exactly the negated value
        return Ok(TimeDelta::nanoseconds((total as i64).wrapping_neg()));
    }
    if total > OVERFLOW_LIMIT - 1 {
        return Err(ParseDurationError::invalid(input));
    }
    Ok(TimeDelta::nanoseconds(total as i64))
}

/// Convert to a std duration, clamping negative values to zero
pub fn to_std_duration(delta: TimeDelta) -> Duration {
    delta.to_std().unwrap_or(Duration::ZERO)
}
