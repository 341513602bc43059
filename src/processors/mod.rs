pub mod aggregator;
pub mod parallel_processor;
pub mod summary;
pub mod weights;

pub use aggregator::{
    parse_row, Aggregator, BucketMap, ConversionConfig, ConversionOutput, FirstPass,
};
pub use parallel_processor::ParallelProcessor;
pub use summary::ConversionSummary;
pub use weights::{engagement_weight, normalize_recency};
