//! Parser for duration strings such as `"300ms"`, `"-1.5h"` or `"2h45m"`.
//!
//! A duration is an optionally signed sequence of decimal numbers, each
//! with an optional fraction and a mandatory unit suffix; the components
//! sum. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.

use chrono::TimeDelta;
use thiserror::Error;

/// Errors produced while parsing a duration string.
///
/// These never escape a getter; [`Env::get_duration`](crate::Env::get_duration)
/// maps any parse failure to the caller-supplied default.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("empty duration string")]
    Empty,

    #[error("missing unit in duration at byte {0}")]
    MissingUnit(usize),

    #[error("unknown unit {unit:?} in duration")]
    UnknownUnit { unit: String },

    #[error("malformed duration syntax at byte {0}")]
    Malformed(usize),

    #[error("duration value overflows the nanosecond range")]
    Overflow,
}

/// Nanoseconds per unit suffix. `µs`/`μs` are aliases for `us`.
fn unit_nanos(unit: &str) -> Option<i128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Parses a signed sequence of `<number><unit>` components into a
/// [`TimeDelta`] with nanosecond precision.
///
/// `"0"` (with an optional sign) is the only input accepted without a
/// unit. Fractions are truncated toward zero at the nanosecond.
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationParseError> {
    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let mut total: i128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let pos = input.len() - rest.len();

        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tail.len());
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(DurationParseError::Malformed(pos));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(
                input.len() - after_number.len(),
            ));
        }
        let (unit, tail) = after_number.split_at(unit_len);
        let scale = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
        })?;

        if !int_digits.is_empty() {
            let whole: i128 = int_digits
                .parse()
                .map_err(|_| DurationParseError::Overflow)?;
            total = whole
                .checked_mul(scale)
                .and_then(|nanos| total.checked_add(nanos))
                .ok_or(DurationParseError::Overflow)?;
        }

        if !frac_digits.is_empty() {
            // Digits beyond nanosecond precision cannot change the result.
            let mut frac: i128 = 0;
            let mut denom: i128 = 1;
            for digit in frac_digits.bytes() {
                if denom >= 1_000_000_000_000_000_000 {
                    break;
                }
                frac = frac * 10 + i128::from(digit - b'0');
                denom *= 10;
            }
            total = total
                .checked_add(frac * scale / denom)
                .ok_or(DurationParseError::Overflow)?;
        }

        rest = tail;
    }

    if negative {
        total = -total;
    }
    let nanos = i64::try_from(total).map_err(|_| DurationParseError::Overflow)?;
    Ok(TimeDelta::nanoseconds(nanos))
}
