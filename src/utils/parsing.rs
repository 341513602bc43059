use crate::utils::constants::ABSENT_TOKENS;

/// Trim a raw cell and map empty strings and absent tokens to `None`
fn present(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    if trimmed.is_empty()
        || ABSENT_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return None;
    }
    Some(trimmed)
}

/// Tolerant decimal parse of a raw cell.
///
/// Empty cells and the tokens `nan`, `none` and `null` (any case) are absent.
/// Anything that does not parse as a number is absent as well; this never fails.
///
/// # Examples
/// ```
/// use member_heatmap::utils::parse_float;
///
/// assert_eq!(parse_float(Some(" 40.7128 ")), Some(40.7128));
/// assert_eq!(parse_float(Some("NULL")), None);
/// assert_eq!(parse_float(Some("abc")), None);
/// ```
pub fn parse_float(raw: Option<&str>) -> Option<f64> {
    present(raw)?.parse::<f64>().ok()
}

/// Tolerant integer parse of a raw cell.
///
/// Goes through [`parse_float`] so `"12.0"` and `"1e3"` succeed; the result
/// is truncated toward zero. Non-finite values are absent.
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    let value = parse_float(raw)?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}
