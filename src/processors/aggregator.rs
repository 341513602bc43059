use crate::error::Result;
use crate::models::{
    AggregateBucket, AggregateKey, HeatEntry, OutputPaths, ParsedRow, Point, RawRow, RunMetadata,
};
use crate::processors::summary::ConversionSummary;
use crate::processors::weights::{engagement_weight, normalize_recency};
use crate::utils::constants::{
    DEFAULT_PRECISION_DECIMALS, FIELD_EVENTS_ATTENDED, FIELD_LAST_ACCESS_TIME, FIELD_LAT,
    FIELD_LON,
};
use crate::utils::coordinates::is_valid_lat_lon;
use crate::utils::parsing::{parse_float, parse_int};
use crate::utils::progress::ProgressReporter;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

/// How often the progress spinner is advanced while streaming rows
const PROGRESS_STRIDE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Group rows by rounded coordinate
    pub aggregate: bool,
    /// Decimal places used to round coordinates for grouping
    pub precision_decimals: i32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            aggregate: true,
            precision_decimals: DEFAULT_PRECISION_DECIMALS,
        }
    }
}

/// Turn one raw row into a [`ParsedRow`], or `None` when its coordinates are
/// missing or out of range.
pub fn parse_row(row: &RawRow) -> Option<ParsedRow> {
    let lat = parse_float(row.get(FIELD_LAT).map(String::as_str));
    let lon = parse_float(row.get(FIELD_LON).map(String::as_str));

    if !is_valid_lat_lon(lat, lon) {
        return None;
    }

    Some(ParsedRow::new(
        lat?,
        lon?,
        engagement_weight(row.get(FIELD_EVENTS_ATTENDED).map(String::as_str)),
        parse_int(row.get(FIELD_LAST_ACCESS_TIME).map(String::as_str)),
    ))
}

/// Result of the first pass: validated rows in input order, the largest
/// `last_access_time` seen and the row accounting.
#[derive(Debug, Clone, Default)]
pub struct FirstPass {
    pub rows: Vec<ParsedRow>,
    pub max_last_access: i64,
    pub summary: ConversionSummary,
}

impl FirstPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: &RawRow) {
        self.summary.rows_read += 1;

        let Some(parsed) = parse_row(row) else {
            self.summary.rows_dropped_invalid_coordinates += 1;
            return;
        };

        self.summary.rows_kept += 1;
        if parse_float(row.get(FIELD_EVENTS_ATTENDED).map(String::as_str)).is_none() {
            self.summary.rows_baseline_engagement += 1;
        }
        match parsed.last_access {
            Some(value) => self.max_last_access = self.max_last_access.max(value),
            None => self.summary.rows_without_last_access += 1,
        }

        self.rows.push(parsed);
    }

    /// Append a later shard. Row order is `self` followed by `other`.
    pub fn merge(&mut self, other: FirstPass) {
        self.rows.extend(other.rows);
        self.max_last_access = self.max_last_access.max(other.max_last_access);
        self.summary.merge(&other.summary);
    }
}

/// Insertion-ordered map of aggregation buckets.
///
/// Iteration order is the order in which keys were first encountered.
#[derive(Debug, Clone)]
pub struct BucketMap {
    precision_decimals: i32,
    buckets: IndexMap<AggregateKey, AggregateBucket>,
}

impl BucketMap {
    pub fn new(precision_decimals: i32) -> Self {
        Self {
            precision_decimals,
            buckets: IndexMap::new(),
        }
    }

    pub fn add(&mut self, row: &ParsedRow, recency: f64) {
        let key = AggregateKey::new(row.lat, row.lon, self.precision_decimals);
        self.buckets
            .entry(key)
            .or_insert_with(|| AggregateBucket::new(key))
            .add(row.engagement_weight, recency);
    }

    /// Merge a partial map built from rows that come after this map's rows
    pub fn merge(&mut self, other: BucketMap) {
        for (key, bucket) in other.buckets {
            self.buckets
                .entry(key)
                .and_modify(|existing| existing.merge(&bucket))
                .or_insert(bucket);
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.buckets
            .into_values()
            .map(AggregateBucket::into_point)
            .collect()
    }
}

/// In-memory artifacts of one conversion run
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub points: Vec<Point>,
    pub heat_presence: Vec<HeatEntry>,
    pub heat_engagement: Vec<HeatEntry>,
    pub max_last_access: i64,
    pub config: ConversionConfig,
    pub summary: ConversionSummary,
}

impl ConversionOutput {
    pub fn metadata(&self, input_csv: impl Into<String>, outputs: OutputPaths) -> RunMetadata {
        RunMetadata::new(
            input_csv,
            self.points.len(),
            self.config.aggregate,
            self.config.precision_decimals,
            self.max_last_access,
            outputs,
        )
    }
}

/// The conversion pipeline: validate, weight, normalize recency, group
pub struct Aggregator {
    config: ConversionConfig,
}

impl Aggregator {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline over a fallible row source.
    ///
    /// Row defects never fail the run; an error from the source itself does,
    /// and nothing is produced in that case.
    pub fn process<I>(
        &self,
        rows: I,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionOutput>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        if let Some(p) = progress {
            p.set_message("Reading member rows...");
        }

        let mut first_pass = FirstPass::new();
        for row in rows {
            first_pass.push(&row?);

            if first_pass.summary.rows_read % PROGRESS_STRIDE == 0 {
                if let Some(p) = progress {
                    p.increment(PROGRESS_STRIDE as u64);
                }
            }
        }

        if let Some(p) = progress {
            p.increment((first_pass.summary.rows_read % PROGRESS_STRIDE) as u64);
            p.set_message("Aggregating points...");
        }

        Ok(self.finish(first_pass))
    }

    /// Run the pipeline over rows already in memory
    pub fn process_rows<I>(&self, rows: I) -> ConversionOutput
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut first_pass = FirstPass::new();
        for row in rows {
            first_pass.push(&row);
        }
        self.finish(first_pass)
    }

    /// Second pass: normalize recency against the run maximum, then group or
    /// pass rows through.
    pub fn finish(&self, first_pass: FirstPass) -> ConversionOutput {
        let FirstPass {
            rows,
            max_last_access,
            summary,
        } = first_pass;

        debug!(
            rows = rows.len(),
            max_last_access, "First pass complete, normalizing recency"
        );

        let points = if self.config.aggregate {
            let mut buckets = BucketMap::new(self.config.precision_decimals);
            for row in &rows {
                buckets.add(row, normalize_recency(row.last_access, max_last_access));
            }
            debug!(buckets = buckets.len(), "Grouped rows by rounded coordinate");
            buckets.into_points()
        } else {
            rows.iter()
                .map(|row| {
                    Point::single(
                        row.lat,
                        row.lon,
                        row.engagement_weight,
                        normalize_recency(row.last_access, max_last_access),
                    )
                })
                .collect()
        };

        self.assemble(points, max_last_access, summary)
    }

    /// Derive heat arrays from the final points and close out the summary
    pub(crate) fn assemble(
        &self,
        points: Vec<Point>,
        max_last_access: i64,
        mut summary: ConversionSummary,
    ) -> ConversionOutput {
        let heat_presence = points.iter().map(HeatEntry::presence).collect();
        let heat_engagement = points.iter().map(HeatEntry::engagement).collect();

        summary.points_output = points.len();

        if summary.rows_read > 0 && summary.rows_kept == 0 {
            warn!(
                rows_read = summary.rows_read,
                "No row had a valid lat/lon; outputs will be empty"
            );
        }
        info!(
            rows_read = summary.rows_read,
            rows_kept = summary.rows_kept,
            rows_dropped = summary.rows_dropped_invalid_coordinates,
            points = summary.points_output,
            aggregate = self.config.aggregate,
            "Conversion complete"
        );

        ConversionOutput {
            points,
            heat_presence,
            heat_engagement,
            max_last_access,
            config: self.config,
            summary,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
