pub mod bucket;
pub mod member;
pub mod metadata;
pub mod point;

pub use bucket::{AggregateBucket, AggregateKey};
pub use member::{ParsedRow, RawRow};
pub use metadata::{OutputPaths, RunMetadata};
pub use point::{HeatEntry, Point};
