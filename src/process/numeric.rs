// src/process/numeric.rs
//! Locale-tolerant number parsing shared by the trim engine and the writer.

/// Canonical point-decimal text for `raw`, or `None` if the cell is not a
/// finite number.
///
/// When both `.` and `,` occur, whichever comes last is the decimal mark and
/// the other one is a thousands separator. A lone comma is a decimal mark.
pub fn normalize_number_text(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("none") {
        return None;
    }

    let normalized = match (s.rfind('.'), s.rfind(',')) {
        (Some(point), Some(comma)) if comma > point => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        _ => s.replace(',', "."),
    };

    // f64::from_str also takes "inf" and "NaN" spellings; those are not data
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(normalized),
        _ => None,
    }
}

/// Numeric value of a cell, `None` when it is empty or not a number.
pub fn parse_number(raw: &str) -> Option<f64> {
    normalize_number_text(raw).and_then(|s| s.parse().ok())
}

/// `true` when the cell parses to a number other than zero.
pub fn is_nonzero(raw: &str) -> bool {
    matches!(parse_number(raw), Some(v) if v != 0.0)
}

/// Digits after the decimal marker in the cell's normalized form, taking an
/// exponent into account (`1.5e-3` has 4).
pub fn decimal_places(raw: &str) -> Option<usize> {
    let text = normalize_number_text(raw)?;
    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&text[..pos], exponent_value(&text[pos + 1..])),
        None => (text.as_str(), 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map(|(_, f)| f.len() as i64)
        .unwrap_or(0);
    Some(fraction.saturating_sub(exponent).max(0) as usize)
}

/// Exponent digits as a number, saturating at the `i32` range. The text has
/// already been accepted by the float parser, so only overflow can fail.
fn exponent_value(digits: &str) -> i64 {
    match digits.parse::<i32>() {
        Ok(e) => i64::from(e),
        Err(_) if digits.starts_with('-') => i64::from(i32::MIN),
        Err(_) => i64::from(i32::MAX),
    }
}

/// Column view: one optional number per cell.
pub fn numeric_view<'a>(cells: impl Iterator<Item = &'a str>) -> Vec<Option<f64>> {
    cells.map(parse_number).collect()
}
