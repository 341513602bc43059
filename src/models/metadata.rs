use crate::utils::constants::PRIVACY_NOTE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where each JSON artifact of a run was written
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputPaths {
    pub points: PathBuf,
    pub heat_presence: PathBuf,
    pub heat_engagement: PathBuf,
}

/// Summary of one conversion run, written as `members_meta.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input_csv: String,
    pub total_points_output: usize,
    pub aggregate: bool,
    pub aggregate_precision_decimals: i32,
    pub max_last_access_time_seen: i64,
    pub outputs: OutputPaths,
    pub privacy_note: String,
}

impl RunMetadata {
    pub fn new(
        input_csv: impl Into<String>,
        total_points_output: usize,
        aggregate: bool,
        aggregate_precision_decimals: i32,
        max_last_access_time_seen: i64,
        outputs: OutputPaths,
    ) -> Self {
        Self {
            input_csv: input_csv.into(),
            total_points_output,
            aggregate,
            aggregate_precision_decimals,
            max_last_access_time_seen,
            outputs,
            privacy_note: PRIVACY_NOTE.to_string(),
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Conversion Metadata ===\n");
        summary.push_str(&format!("Input: {}\n", self.input_csv));
        summary.push_str(&format!("Points: {}\n", self.total_points_output));
        if self.aggregate {
            summary.push_str(&format!(
                "Aggregation: on ({} decimals)\n",
                self.aggregate_precision_decimals
            ));
        } else {
            summary.push_str("Aggregation: off\n");
        }
        summary.push_str(&format!(
            "Max last access time: {}\n",
            self.max_last_access_time_seen
        ));
        summary.push_str(&format!("Points file: {}\n", self.outputs.points.display()));
        summary.push_str(&format!(
            "Presence heat file: {}\n",
            self.outputs.heat_presence.display()
        ));
        summary.push_str(&format!(
            "Engagement heat file: {}\n",
            self.outputs.heat_engagement.display()
        ));

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> RunMetadata {
        RunMetadata::new(
            "members.csv",
            12,
            true,
            3,
            1_700_000_000,
            OutputPaths {
                points: PathBuf::from("out/members_points.json"),
                heat_presence: PathBuf::from("out/members_heat_presence.json"),
                heat_engagement: PathBuf::from("out/members_heat_engagement.json"),
            },
        )
    }

    #[test]
    fn test_metadata_field_order() {
        let json = serde_json::to_string(&sample_metadata()).unwrap();

        let keys = [
            "\"input_csv\"",
            "\"total_points_output\"",
            "\"aggregate\"",
            "\"aggregate_precision_decimals\"",
            "\"max_last_access_time_seen\"",
            "\"outputs\"",
            "\"privacy_note\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_metadata_outputs_mapping() {
        let json = serde_json::to_value(sample_metadata()).unwrap();

        assert_eq!(json["outputs"]["points"], "out/members_points.json");
        assert_eq!(json["outputs"]["heat_presence"], "out/members_heat_presence.json");
        assert_eq!(
            json["outputs"]["heat_engagement"],
            "out/members_heat_engagement.json"
        );
        assert_eq!(json["privacy_note"], PRIVACY_NOTE);
    }

    #[test]
    fn test_summary_mentions_aggregation() {
        let summary = sample_metadata().summary();
        assert!(summary.contains("Points: 12"));
        assert!(summary.contains("Aggregation: on (3 decimals)"));
    }
}
