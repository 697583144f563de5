//! Run statistics derived from per-interval rate samples.

pub mod summary;

pub use summary::{
    add_stats, average, median, percentile, std_dev, sum, SampleSeries, Summary,
};
