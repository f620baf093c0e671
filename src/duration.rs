//! Parsing of `[[[D:]H:]M:]S` timer lengths.

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Converts a colon-delimited length into seconds.
///
/// The rightmost field is (fractional) seconds, then whole minutes, hours
/// and days; any field past days counts as another factor of 24. Empty
/// fields are skipped and anything that does not start with a number
/// counts as zero.
pub fn parse_duration(raw: &str) -> f64 {
    let mut multiplier = 1.0;
    let mut total = 0.0;

    for (position, field) in raw.split(':').filter(|f| !f.is_empty()).rev().enumerate() {
        if position == 0 {
            total += leading_float(field);
        } else {
            total += leading_integer(field) as f64 * multiplier;
        }

        multiplier = if multiplier < SECONDS_PER_HOUR {
            multiplier * SECONDS_PER_MINUTE
        } else {
            multiplier * 24.0
        };
    }

    total
}

/// Longest prefix of `field` (after leading whitespace) that reads as a
/// decimal number, or 0.
fn leading_float(field: &str) -> f64 {
    let field = field.trim_start();
    let bytes = field.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        if has_digits || fraction_end > fraction_start {
            has_digits = true;
            end = fraction_end;
        }
    }

    if !has_digits {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }
    field[..end].parse().unwrap_or(0.0)
}

fn leading_integer(field: &str) -> i64 {
    let field = field.trim_start();
    let bytes = field.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        return 0;
    }
    field[..end].parse().unwrap_or(0)
}
