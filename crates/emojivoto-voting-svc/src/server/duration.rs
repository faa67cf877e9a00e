//! Parsing for duration strings such as `250ms`, `1.5s` or `1h30m`.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. Valid units are `ns`, `us` (or `µs`),
//! `ms`, `s`, `m` and `h`. The bare string `0` is also accepted. Negative
//! durations are rejected.

use core::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("negative duration")]
    Negative,
    #[error("invalid number in duration")]
    InvalidNumber,
    #[error("missing unit in duration")]
    MissingUnit,
    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),
    #[error("duration out of range")]
    Overflow,
}

pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    if s.starts_with('-') {
        return Err(DurationError::Negative);
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(DurationError::InvalidNumber);
    }

    let mut total: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let (int_part, tail) = split_digits(rest);
        let (frac_part, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", tail),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DurationError::InvalidNumber);
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_end);
        let unit_nanos = unit_nanos(unit)?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| DurationError::Overflow)?
        };
        let whole = whole
            .checked_mul(unit_nanos)
            .ok_or(DurationError::Overflow)?;

        // Digits past nanosecond precision of the largest unit cannot matter.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        let fraction = if frac_digits.is_empty() {
            0
        } else {
            let value: u128 = frac_digits
                .parse()
                .map_err(|_| DurationError::InvalidNumber)?;
            value * unit_nanos / 10u128.pow(frac_digits.len() as u32)
        };

        total = total
            .checked_add(whole)
            .and_then(|t| t.checked_add(fraction))
            .ok_or(DurationError::Overflow)?;
        rest = next;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Result<u128, DurationError> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60 * NANOS_PER_SEC),
        "h" => Ok(60 * 60 * NANOS_PER_SEC),
        "" => Err(DurationError::MissingUnit),
        other => Err(DurationError::UnknownUnit(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("0ms"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("15ns"), Ok(Duration::from_nanos(15)));
        assert_eq!(parse_duration("7us"), Ok(Duration::from_micros(7)));
        assert_eq!(parse_duration("7µs"), Ok(Duration::from_micros(7)));
        assert_eq!(parse_duration("250ms"), Ok(ms(250)));
        assert_eq!(parse_duration("2s"), Ok(ms(2_000)));
        assert_eq!(parse_duration("3m"), Ok(Duration::from_secs(180)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3_600)));
    }

    #[test]
    fn parses_fractions_and_sequences() {
        assert_eq!(parse_duration("1.5s"), Ok(ms(1_500)));
        assert_eq!(parse_duration(".5s"), Ok(ms(500)));
        assert_eq!(parse_duration("1.s"), Ok(ms(1_000)));
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5_400)));
        assert_eq!(parse_duration("1m0.25s"), Ok(ms(60_250)));
        assert_eq!(parse_duration("+10ms"), Ok(ms(10)));
        assert_eq!(parse_duration(" 10ms "), Ok(ms(10)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert_eq!(parse_duration("-1s"), Err(DurationError::Negative));
        assert_eq!(parse_duration("10"), Err(DurationError::MissingUnit));
        assert_eq!(parse_duration("ms"), Err(DurationError::InvalidNumber));
        assert_eq!(parse_duration("."), Err(DurationError::InvalidNumber));
        assert_eq!(parse_duration("+"), Err(DurationError::InvalidNumber));
        assert_eq!(
            parse_duration("10parsecs"),
            Err(DurationError::UnknownUnit("parsecs".to_owned()))
        );
        assert_eq!(parse_duration("1s2"), Err(DurationError::MissingUnit));
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            parse_duration("99999999999999999999h"),
            Err(DurationError::Overflow)
        );
        assert_eq!(
            parse_duration("9999999999999999999999999999999999999999s"),
            Err(DurationError::Overflow)
        );
    }
}
