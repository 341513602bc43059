use crate::utils::constants::{MAX_EFFECTIVE_DECIMALS, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Check that a latitude/longitude pair is present, not NaN and inside the
/// inclusive WGS84 ranges.
pub fn is_valid_lat_lon(latitude: Option<f64>, longitude: Option<f64>) -> bool {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            !lat.is_nan()
                && !lon.is_nan()
                && (MIN_LAT..=MAX_LAT).contains(&lat)
                && (MIN_LON..=MAX_LON).contains(&lon)
        }
        _ => false,
    }
}

/// Round a coordinate to `decimals` places, half away from zero.
///
/// Negative `decimals` round to tens, hundreds, ... A rounded negative zero
/// is returned as `0.0`.
///
/// # Examples
/// ```
/// use member_heatmap::utils::round_to_decimals;
///
/// assert_eq!(round_to_decimals(40.71279, 3), 40.713);
/// assert_eq!(round_to_decimals(-74.00601, 3), -74.006);
/// ```
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    if decimals >= MAX_EFFECTIVE_DECIMALS || !value.is_finite() {
        return value;
    }

    let rounded = if decimals >= 0 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-decimals);
        (value / factor).round() * factor
    };

    // -0.0 and 0.0 must produce the same aggregation key
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
