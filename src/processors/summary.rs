/// Row accounting for one conversion run. Counts only; no row content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped_invalid_coordinates: usize,
    pub rows_baseline_engagement: usize,
    pub rows_without_last_access: usize,
    pub points_output: usize,
}

impl ConversionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the counts of another shard into this one
    pub fn merge(&mut self, other: &ConversionSummary) {
        self.rows_read += other.rows_read;
        self.rows_kept += other.rows_kept;
        self.rows_dropped_invalid_coordinates += other.rows_dropped_invalid_coordinates;
        self.rows_baseline_engagement += other.rows_baseline_engagement;
        self.rows_without_last_access += other.rows_without_last_access;
        self.points_output += other.points_output;
    }

    fn percent_of_read(&self, count: usize) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.rows_read as f64
        }
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Conversion Report ===\n");
        summary.push_str(&format!("Rows Read: {}\n", self.rows_read));
        summary.push_str(&format!(
            "Rows Kept: {} ({:.1}%)\n",
            self.rows_kept,
            self.percent_of_read(self.rows_kept)
        ));
        summary.push_str(&format!(
            "Rows Dropped (invalid lat/lon): {} ({:.1}%)\n",
            self.rows_dropped_invalid_coordinates,
            self.percent_of_read(self.rows_dropped_invalid_coordinates)
        ));
        summary.push_str(&format!(
            "Baseline Engagement (no events_attended): {}\n",
            self.rows_baseline_engagement
        ));
        summary.push_str(&format!(
            "No last_access_time: {}\n",
            self.rows_without_last_access
        ));
        summary.push_str(&format!("Points Output: {}\n", self.points_output));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_counts() {
        let mut left = ConversionSummary {
            rows_read: 10,
            rows_kept: 8,
            rows_dropped_invalid_coordinates: 2,
            rows_baseline_engagement: 3,
            rows_without_last_access: 1,
            points_output: 0,
        };
        let right = ConversionSummary {
            rows_read: 5,
            rows_kept: 5,
            rows_dropped_invalid_coordinates: 0,
            rows_baseline_engagement: 1,
            rows_without_last_access: 5,
            points_output: 0,
        };

        left.merge(&right);

        assert_eq!(left.rows_read, 15);
        assert_eq!(left.rows_kept, 13);
        assert_eq!(left.rows_dropped_invalid_coordinates, 2);
        assert_eq!(left.rows_baseline_engagement, 4);
        assert_eq!(left.rows_without_last_access, 6);
    }

    #[test]
    fn test_generate_summary_handles_empty_run() {
        let report = ConversionSummary::new().generate_summary();
        assert!(report.contains("Rows Read: 0"));
        assert!(report.contains("Rows Kept: 0 (0.0%)"));
    }

    #[test]
    fn test_generate_summary_percentages() {
        let summary = ConversionSummary {
            rows_read: 4,
            rows_kept: 3,
            rows_dropped_invalid_coordinates: 1,
            ..Default::default()
        };
        let report = summary.generate_summary();
        assert!(report.contains("Rows Kept: 3 (75.0%)"));
        assert!(report.contains("Rows Dropped (invalid lat/lon): 1 (25.0%)"));
    }
}
