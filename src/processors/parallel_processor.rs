use crate::error::{ProcessingError, Result};
use crate::models::RawRow;
use crate::processors::aggregator::{
    Aggregator, BucketMap, ConversionConfig, ConversionOutput, FirstPass,
};
use crate::processors::summary::ConversionSummary;
use crate::processors::weights::normalize_recency;
use crate::utils::constants::DEFAULT_CHUNK_SIZE;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use tracing::debug;

/// Runs the conversion pipeline with the first pass split across a rayon
/// pool. Chunks are contiguous and merged in chunk order, so results match
/// the sequential [`Aggregator`] row for row.
pub struct ParallelProcessor {
    max_workers: usize,
    chunk_size: usize,
    config: ConversionConfig,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            chunk_size: DEFAULT_CHUNK_SIZE,
            config: ConversionConfig::default(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// Process a row source, buffering it first when the parallel path applies
    pub fn process_source<I>(
        &self,
        rows: I,
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionOutput>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        if self.max_workers <= 1 {
            return Aggregator::new(self.config).process(rows, progress);
        }

        if let Some(p) = progress {
            p.set_message("Buffering member rows...");
        }
        let rows = rows.into_iter().collect::<Result<Vec<RawRow>>>()?;
        self.process_all(&rows, progress)
    }

    /// Process rows already in memory
    pub fn process_all(
        &self,
        rows: &[RawRow],
        progress: Option<&ProgressReporter>,
    ) -> Result<ConversionOutput> {
        let aggregator = Aggregator::new(self.config);

        if self.max_workers <= 1 || rows.len() <= self.chunk_size {
            let output = aggregator.process_rows(rows.iter().cloned());
            if let Some(p) = progress {
                p.increment(rows.len() as u64);
            }
            return Ok(output);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        if let Some(p) = progress {
            p.set_message(&format!(
                "Parsing {} rows on {} workers...",
                rows.len(),
                self.max_workers
            ));
        }

        let shards: Vec<FirstPass> = pool.install(|| {
            rows.par_chunks(self.chunk_size)
                .map(|chunk| {
                    let mut pass = FirstPass::new();
                    for row in chunk {
                        pass.push(row);
                    }
                    if let Some(p) = progress {
                        p.increment(chunk.len() as u64);
                    }
                    pass
                })
                .collect()
        });

        debug!(shards = shards.len(), "Parallel first pass complete");

        if let Some(p) = progress {
            p.set_message("Aggregating points...");
        }

        if !self.config.aggregate {
            let merged = shards.into_iter().fold(FirstPass::new(), |mut acc, shard| {
                acc.merge(shard);
                acc
            });
            return Ok(aggregator.finish(merged));
        }

        let max_last_access = shards
            .iter()
            .map(|shard| shard.max_last_access)
            .max()
            .unwrap_or(0);

        let precision_decimals = self.config.precision_decimals;
        let partials: Vec<BucketMap> = pool.install(|| {
            shards
                .par_iter()
                .map(|shard| {
                    let mut buckets = BucketMap::new(precision_decimals);
                    for row in &shard.rows {
                        buckets.add(row, normalize_recency(row.last_access, max_last_access));
                    }
                    buckets
                })
                .collect()
        });

        let mut summary = ConversionSummary::new();
        for shard in &shards {
            summary.merge(&shard.summary);
        }

        let mut partials = partials.into_iter();
        let mut buckets = partials
            .next()
            .unwrap_or_else(|| BucketMap::new(precision_decimals));
        for partial in partials {
            buckets.merge(partial);
        }

        debug!(buckets = buckets.len(), "Merged partial aggregations");

        Ok(aggregator.assemble(buckets.into_points(), max_last_access, summary))
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn synthetic_rows(count: usize) -> Vec<RawRow> {
        (0..count)
            .map(|i| {
                let mut row = RawRow::new();
                // a handful of clusters, plus every 7th row invalid
                let lat = if i % 7 == 0 { 120.0 } else { 40.0 + (i % 13) as f64 * 0.01 };
                row.insert("lat".to_string(), format!("{}", lat + (i % 3) as f64 * 0.0001));
                row.insert("lon".to_string(), format!("{}", -74.0 - (i % 5) as f64 * 0.01));
                row.insert("events_attended".to_string(), format!("{}", i % 11));
                if i % 4 != 0 {
                    row.insert("last_access_time".to_string(), format!("{}", i * 10));
                }
                row
            })
            .collect()
    }

    fn assert_outputs_match(parallel: &ConversionOutput, sequential: &ConversionOutput) {
        assert_eq!(parallel.points.len(), sequential.points.len());
        assert_eq!(parallel.max_last_access, sequential.max_last_access);
        assert_eq!(parallel.summary, sequential.summary);
        for (p, s) in parallel.points.iter().zip(&sequential.points) {
            assert_eq!(p.lat, s.lat);
            assert_eq!(p.lon, s.lon);
            assert_eq!(p.count, s.count);
            assert_eq!(p.presence_weight, s.presence_weight);
            assert!((p.engagement_weight - s.engagement_weight).abs() < 1e-9);
            assert_eq!(p.recency, s.recency);
        }
    }

    #[test]
    fn test_parallel_aggregation_matches_sequential() {
        let rows = synthetic_rows(5_000);
        let config = ConversionConfig {
            aggregate: true,
            precision_decimals: 3,
        };

        let parallel = ParallelProcessor::new(4)
            .with_chunk_size(256)
            .with_config(config)
            .process_all(&rows, None)
            .unwrap();
        let sequential = Aggregator::new(config).process_rows(rows);

        assert_outputs_match(&parallel, &sequential);
    }

    #[test]
    fn test_parallel_pass_through_matches_sequential() {
        let rows = synthetic_rows(3_000);
        let config = ConversionConfig {
            aggregate: false,
            precision_decimals: 3,
        };

        let parallel = ParallelProcessor::new(3)
            .with_chunk_size(100)
            .with_config(config)
            .process_all(&rows, None)
            .unwrap();
        let sequential = Aggregator::new(config).process_rows(rows);

        assert_outputs_match(&parallel, &sequential);
    }

    #[test]
    fn test_small_input_takes_sequential_path() {
        let rows = synthetic_rows(50);

        let output = ParallelProcessor::new(8)
            .with_chunk_size(1_000)
            .process_all(&rows, None)
            .unwrap();

        assert_eq!(output.summary.rows_read, 50);
    }

    #[test]
    fn test_process_source_propagates_source_errors() {
        let rows: Vec<Result<RawRow>> = vec![
            Ok(RawRow::new()),
            Err(truncated_record()),
        ];

        for workers in [1, 4] {
            let result = ParallelProcessor::new(workers).process_source(rows_clone(&rows), None);
            assert!(matches!(result, Err(ProcessingError::Io(_))));
        }
    }

    fn truncated_record() -> ProcessingError {
        io::Error::new(io::ErrorKind::UnexpectedEof, "truncated record").into()
    }

    fn rows_clone(rows: &[Result<RawRow>]) -> Vec<Result<RawRow>> {
        rows.iter()
            .map(|r| match r {
                Ok(row) => Ok(row.clone()),
                Err(_) => Err(truncated_record()),
            })
            .collect()
    }
}
