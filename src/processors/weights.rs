use crate::utils::constants::{BASELINE_ENGAGEMENT_WEIGHT, MAX_ENGAGEMENT_WEIGHT};
use crate::utils::parsing::parse_float;

/// Engagement weight for a member from their raw `events_attended` cell.
///
/// Absent or unparseable counts get the baseline weight of 1.0. Otherwise the
/// count is floored at zero, log-damped and capped:
/// `min(10, 1 + ln(1 + events))`.
pub fn engagement_weight(events_attended: Option<&str>) -> f64 {
    match parse_float(events_attended) {
        None => BASELINE_ENGAGEMENT_WEIGHT,
        // f64::max returns 0.0 for a NaN count
        Some(events) => MAX_ENGAGEMENT_WEIGHT.min(1.0 + events.max(0.0).ln_1p()),
    }
}

/// Scale a `last_access_time` value into [0, 1] against the run's maximum.
///
/// Returns 0.0 when the value is absent or no positive maximum was seen.
pub fn normalize_recency(last_access: Option<i64>, max_last_access: i64) -> f64 {
    match last_access {
        Some(value) if max_last_access > 0 => {
            let value = value.max(0) as f64;
            (value / max_last_access as f64).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}
