/// Strips byte-order marks and zero-width spaces, then trims.
pub(crate) fn normalize_id(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Parses a decimal that may use a comma as the decimal separator (`4,5`).
pub(crate) fn parse_decimal(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Parses a non-negative count. A zero fractional part (`120,0`) is accepted.
pub(crate) fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<i64>() {
        return Some(count);
    }
    let decimal = parse_decimal(trimmed)?;
    if decimal.fract() == 0.0 && decimal.is_finite() && decimal.abs() <= i64::MAX as f64 {
        return Some(decimal as i64);
    }
    None
}
