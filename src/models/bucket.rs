use crate::models::Point;
use crate::utils::coordinates::round_to_decimals;
use std::hash::{Hash, Hasher};

/// Rounded coordinate pair identifying one aggregated output point.
///
/// Equality and hashing use the bit pattern of the rounded values, so two
/// rows group together exactly when they round to the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct AggregateKey {
    pub lat: f64,
    pub lon: f64,
}

impl AggregateKey {
    pub fn new(lat: f64, lon: f64, precision_decimals: i32) -> Self {
        Self {
            lat: round_to_decimals(lat, precision_decimals),
            lon: round_to_decimals(lon, precision_decimals),
        }
    }
}

impl PartialEq for AggregateKey {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for AggregateKey {}

impl Hash for AggregateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

/// Accumulator for all rows sharing an [`AggregateKey`]
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBucket {
    pub lat: f64,
    pub lon: f64,
    pub presence_weight: f64,
    pub engagement_weight: f64,
    pub recency_max: f64,
    pub count: u64,
}

impl AggregateBucket {
    pub fn new(key: AggregateKey) -> Self {
        Self {
            lat: key.lat,
            lon: key.lon,
            presence_weight: 0.0,
            engagement_weight: 0.0,
            recency_max: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, engagement_weight: f64, recency: f64) {
        self.presence_weight += 1.0;
        self.engagement_weight += engagement_weight;
        self.recency_max = self.recency_max.max(recency);
        self.count += 1;
    }

    /// Fold another partial bucket for the same key into this one
    pub fn merge(&mut self, other: &AggregateBucket) {
        self.presence_weight += other.presence_weight;
        self.engagement_weight += other.engagement_weight;
        self.recency_max = self.recency_max.max(other.recency_max);
        self.count += other.count;
    }

    pub fn into_point(self) -> Point {
        Point {
            lat: self.lat,
            lon: self.lon,
            presence_weight: self.presence_weight,
            engagement_weight: self.engagement_weight,
            count: Some(self.count),
            recency: self.recency_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_equal_after_rounding() {
        let a = AggregateKey::new(40.7128, -74.0060, 3);
        let b = AggregateKey::new(40.71279, -74.00601, 3);
        let c = AggregateKey::new(40.7138, -74.0060, 3);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let keys: HashSet<AggregateKey> = [a, b, c].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_keys_straddling_zero_group_together() {
        let a = AggregateKey::new(-0.0001, 10.0, 3);
        let b = AggregateKey::new(0.0001, 10.0, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bucket_accumulates() {
        let key = AggregateKey::new(51.5074, -0.1278, 2);
        let mut bucket = AggregateBucket::new(key);
        bucket.add(2.0, 0.25);
        bucket.add(1.0, 0.75);
        bucket.add(1.5, 0.5);

        let point = bucket.into_point();
        assert_eq!(point.lat, 51.51);
        assert_eq!(point.lon, -0.13);
        assert_eq!(point.presence_weight, 3.0);
        assert_eq!(point.engagement_weight, 4.5);
        assert_eq!(point.count, Some(3));
        assert_eq!(point.recency, 0.75);
    }

    #[test]
    fn test_bucket_merge() {
        let key = AggregateKey::new(10.0, 20.0, 3);
        let mut left = AggregateBucket::new(key);
        left.add(1.0, 0.2);
        let mut right = AggregateBucket::new(key);
        right.add(3.0, 0.9);
        right.add(1.0, 0.1);

        left.merge(&right);

        assert_eq!(left.count, 3);
        assert_eq!(left.presence_weight, 3.0);
        assert_eq!(left.engagement_weight, 5.0);
        assert_eq!(left.recency_max, 0.9);
    }
}
