use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// One input row as read from the CSV export: header name to raw cell text
pub type RawRow = HashMap<String, String>;

/// A row that passed coordinate validation, reduced to the fields the
/// pipeline needs. No identifying column survives into this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParsedRow {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    #[validate(range(min = 1.0, max = 10.0))]
    pub engagement_weight: f64,

    pub last_access: Option<i64>,
}

impl ParsedRow {
    pub fn new(lat: f64, lon: f64, engagement_weight: f64, last_access: Option<i64>) -> Self {
        Self {
            lat,
            lon,
            engagement_weight,
            last_access,
        }
    }
}
