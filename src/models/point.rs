use serde::{Deserialize, Serialize};

/// An output map point.
///
/// `count` is only present for aggregated points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,

    pub lon: f64,

    #[serde(rename = "w_presence")]
    pub presence_weight: f64,

    #[serde(rename = "w_engagement")]
    pub engagement_weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    pub recency: f64,
}

impl Point {
    /// A point standing for a single member row
    pub fn single(lat: f64, lon: f64, engagement_weight: f64, recency: f64) -> Self {
        Self {
            lat,
            lon,
            presence_weight: 1.0,
            engagement_weight,
            count: None,
            recency,
        }
    }
}

/// A `[lat, lon, weight]` triple as consumed by heatmap layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatEntry(pub f64, pub f64, pub f64);

impl HeatEntry {
    pub fn presence(point: &Point) -> Self {
        Self(point.lat, point.lon, point.presence_weight)
    }

    pub fn engagement(point: &Point) -> Self {
        Self(point.lat, point.lon, point.engagement_weight)
    }
}
