// src/simulation/summary.rs

//! Metric Reducer: per-trial series to reportable statistics.

use crate::simulation::engine::TrialOutcomeSeries;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Summary of one scenario's outcomes.
///
/// Moments use the population standard deviation. Percentiles pick the
/// sorted value at index `round(p/100 * (n - 1))`. An empty series reports
/// zeros and no histogram bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub scenario: String,
    pub count: usize,
    pub undefined_trials: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    #[serde(skip)]
    pub histogram: Vec<HistogramBin>,
}

/// One histogram bar, flattened for CSV output.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramRecord {
    pub scenario: String,
    pub bin: usize,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl OutcomeSummary {
    pub fn histogram_records(&self) -> Vec<HistogramRecord> {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, bin)| HistogramRecord {
                scenario: self.scenario.clone(),
                bin: i,
                lower: bin.lower,
                upper: bin.upper,
                count: bin.count,
            })
            .collect()
    }
}

pub fn summarize(series: &TrialOutcomeSeries, bins: usize) -> OutcomeSummary {
    let mut sorted = series.values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let (mean, std_dev) = if count == 0 {
        (0.0, 0.0)
    } else {
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        (mean, variance.sqrt())
    };

    let percentile = |p: f64| {
        if sorted.is_empty() {
            return 0.0;
        }
        let index = ((p / 100.0) * (count as f64 - 1.0)).round() as usize;
        sorted[index.min(count - 1)]
    };

    OutcomeSummary {
        scenario: series.scenario.clone(),
        count,
        undefined_trials: series.undefined_trials,
        mean,
        std_dev,
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        percentile_10: percentile(10.0),
        percentile_25: percentile(25.0),
        percentile_50: percentile(50.0),
        percentile_75: percentile(75.0),
        percentile_90: percentile(90.0),
        histogram: histogram(&sorted, bins),
    }
}

pub fn summarize_all(series: &[TrialOutcomeSeries], bins: usize) -> Vec<OutcomeSummary> {
    series.iter().map(|s| summarize(s, bins)).collect()
}

/// Equal-width bins over [min, max]; the last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    if bins <= 1 || max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in values {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> TrialOutcomeSeries {
        let mut s = TrialOutcomeSeries::new("test");
        for v in values {
            s.push(Some(*v));
        }
        s
    }

    #[test]
    fn moments_and_percentiles() {
        let values: Vec<f64> = (1..=11).map(f64::from).collect();
        let summary = summarize(&series(&values), 5);

        assert_eq!(summary.count, 11);
        assert_eq!(summary.mean, 6.0);
        assert!((summary.std_dev - 10.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 11.0);
        assert_eq!(summary.percentile_10, 2.0);
        assert_eq!(summary.percentile_50, 6.0);
        assert_eq!(summary.percentile_90, 10.0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..300).map(|i| (i % 17) as f64 * 0.37).collect();
        let bins = histogram(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 300);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[29].upper, 16.0 * 0.37);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn constant_series_gets_one_bin() {
        let summary = summarize(&series(&[0.5; 10]), 30);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(
            summary.histogram,
            vec![HistogramBin { lower: 0.5, upper: 0.5, count: 10 }]
        );
    }

    #[test]
    fn empty_series_reports_zeros() {
        let mut s = TrialOutcomeSeries::new("empty");
        s.push(None);
        let summary = summarize(&s, 30);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.undefined_trials, 1);
        assert_eq!(summary.mean, 0.0);
        assert!(summary.histogram.is_empty());
    }
}
