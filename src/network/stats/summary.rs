//! Descriptive statistics over per-interval rate samples.
//!
//! All helpers take a slice of samples in the order they were recorded.
//! On an empty slice they return `NaN` (or `0.0` for [`sum`]) instead of
//! panicking, and [`std_dev`] is `NaN` for a single sample since the
//! Bessel-corrected divisor is zero.

/// Arithmetic mean of the samples.
pub fn average(data: &[f64]) -> f64 {
    sum(data) / data.len() as f64
}

/// Nearest-rank percentile.
///
/// Sorts a copy of `data` ascending and returns the element at 1-based rank
/// `ceil(n * p / 100)`. No interpolation between neighbours is performed.
///
/// # Example
///
/// ```
/// use pktmeter::network::stats::percentile;
/// assert_eq!(percentile(&[5.0, 1.0, 4.0, 2.0, 3.0], 50.0), 3.0);
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.0);
/// ```
pub fn percentile(data: &[f64], p: f64) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (sorted.len() as f64 * p / 100.0).ceil() as usize;
    let index = rank.clamp(1, sorted.len()) - 1;
    sorted[index]
}

/// Median as the 50th nearest-rank percentile.
pub fn median(data: &[f64]) -> f64 {
    percentile(data, 50.0)
}

/// Sample standard deviation (divides by `n - 1`).
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }

    let avg = average(data);
    let squares: f64 = data.iter().map(|x| (x - avg).powi(2)).sum();
    (squares / (data.len() - 1) as f64).sqrt()
}

/// Sum of the samples.
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Summary fields attached to a [`SampleSeries`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub avg: f64,
    pub std_dev: f64,
    pub median: f64,
    pub sum: f64,
}

impl Summary {
    /// Computes all four statistics over `data`.
    pub fn of(data: &[f64]) -> Self {
        Self {
            avg: average(data),
            std_dev: std_dev(data),
            median: median(data),
            sum: sum(data),
        }
    }
}

/// An ordered sequence of per-interval samples with optional summary fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    values: Vec<f64>,
    summary: Option<Summary>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample. Any previously attached summary is now stale and is dropped.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
        self.summary = None;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Summary attached by the last [`add_stats`] call, if any.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }
}

impl From<Vec<f64>> for SampleSeries {
    fn from(values: Vec<f64>) -> Self {
        Self {
            values,
            summary: None,
        }
    }
}

/// Computes the summary of `series` and attaches it in place.
///
/// With `drop_ends` set the first and the last sample are ignored: the first
/// interval is usually partial and the last one is the drain sample taken at
/// shutdown. A series of two or fewer samples trims to nothing, which yields
/// a `NaN` summary with a zero sum. Three samples trim to one, which leaves
/// `std_dev` as `NaN`.
pub fn add_stats(series: &mut SampleSeries, drop_ends: bool) -> Summary {
    let data = if drop_ends {
        let n = series.values.len();
        if n > 2 {
            &series.values[1..n - 1]
        } else {
            &[][..]
        }
    } else {
        &series.values[..]
    };

    let summary = Summary::of(data);
    series.summary = Some(summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn test_basic_statistics() {
        assert_eq!(average(&SAMPLE), 3.0);
        assert_eq!(median(&SAMPLE), 3.0);
        assert_eq!(sum(&SAMPLE), 15.0);
        assert!((std_dev(&SAMPLE) - 1.5811).abs() < 1e-4);
    }

    #[test]
    fn test_average_matches_sum_over_len() {
        let data = [0.25, 9.5, 3.0, 7.125, 1.0, 1.0];
        assert_eq!(sum(&data) / data.len() as f64, average(&data));
    }

    #[test]
    fn test_median_is_fiftieth_percentile() {
        let data = [9.0, 4.0, 7.0, 1.0];
        assert_eq!(percentile(&data, 50.0), median(&data));
        assert_eq!(median(&data), 4.0);
    }

    #[test]
    fn test_percentile_is_nearest_rank() {
        let data = [15.0, 20.0, 35.0, 40.0, 50.0];
        assert_eq!(percentile(&data, 5.0), 15.0);
        assert_eq!(percentile(&data, 30.0), 20.0);
        assert_eq!(percentile(&data, 40.0), 20.0);
        assert_eq!(percentile(&data, 50.0), 35.0);
        assert_eq!(percentile(&data, 100.0), 50.0);
        assert_eq!(percentile(&data, 0.0), 15.0);
    }

    #[test]
    fn test_percentile_does_not_reorder_input() {
        let data = vec![3.0, 1.0, 2.0];
        percentile(&data, 50.0);
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_add_stats_drops_ends() {
        let mut series = SampleSeries::from(vec![10.0, 1.0, 2.0, 3.0, 10.0]);
        let summary = add_stats(&mut series, true);

        assert_eq!(summary.avg, 2.0);
        assert_eq!(summary.sum, 6.0);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.std_dev, 1.0);
        assert_eq!(series.summary(), Some(&summary));
        assert_eq!(series.len(), 5);
    }

    #[test]
    fn test_add_stats_full_series() {
        let mut series = SampleSeries::from(SAMPLE.to_vec());
        let summary = add_stats(&mut series, false);
        assert_eq!(summary.avg, 3.0);
        assert_eq!(summary.sum, 15.0);
    }

    #[test]
    fn test_single_trimmed_sample_has_nan_std_dev() {
        let mut series = SampleSeries::from(vec![0.0, 4.0, 1.0]);
        let summary = add_stats(&mut series, true);
        assert_eq!(summary.avg, 4.0);
        assert_eq!(summary.median, 4.0);
        assert!(summary.std_dev.is_nan());
    }

    #[test]
    fn test_too_short_series_is_nan_not_panic() {
        let mut series = SampleSeries::from(vec![1.0, 2.0]);
        let summary = add_stats(&mut series, true);
        assert!(summary.avg.is_nan());
        assert!(summary.median.is_nan());
        assert_eq!(summary.sum, 0.0);
    }

    #[test]
    fn test_push_invalidates_summary() {
        let mut series = SampleSeries::from(SAMPLE.to_vec());
        add_stats(&mut series, false);
        series.push(6.0);
        assert!(series.summary().is_none());
        assert_eq!(series.last(), Some(6.0));
    }
}
