//! Descriptive-statistics primitives shared by profiling and demographics.
//!
//! Semantics follow the usual dataframe conventions: sample standard
//! deviation (n-1 denominator) and linear-interpolation quantiles.

use std::collections::HashMap;

/// Summary statistics for one numeric series (non-missing values only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; None when fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Linear-interpolation quantile over a pre-sorted slice, `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if lo + 1 < sorted.len() {
        Some(sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac)
    } else {
        Some(sorted[lo])
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, 0.5)
}

/// Full describe over a series of non-missing values.
pub fn describe(values: &[f64]) -> Option<Describe> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let count = sorted.len();
    Some(Describe {
        count,
        mean: mean(&sorted)?,
        std: sample_std(&sorted),
        min: *sorted.first()?,
        q25: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q75: quantile_sorted(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

/// One bin of an equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Interval label in `(lo, hi]` form.
    pub label: String,
    pub count: usize,
}

/// Equal-width histogram over non-missing values.
///
/// Bin edges span [min, max] with the lowest edge stretched 0.1% below the
/// minimum so the smallest value lands in the first bin. Bins are returned
/// sorted by count descending, ties in bin order.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let stretch = if range > 0.0 { range * 0.001 } else { 0.001 };
    let mut edges = Vec::with_capacity(bins + 1);
    for i in 0..=bins {
        let edge = if range > 0.0 {
            min + range * i as f64 / bins as f64
        } else {
            // Degenerate series: synthesize a unit-ish span around the value.
            min + i as f64 * 0.001
        };
        edges.push(edge);
    }
    edges[0] = min - stretch;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let mut placed = false;
        for i in 0..bins {
            if value > edges[i] && value <= edges[i + 1] {
                counts[i] += 1;
                placed = true;
                break;
            }
        }
        if !placed {
            // Floating-point edge case: clamp to the last bin.
            counts[bins - 1] += 1;
        }
    }
    let mut result: Vec<(usize, HistogramBin)> = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            (
                i,
                HistogramBin {
                    label: format!("({:.3}, {:.3}]", edges[i], edges[i + 1]),
                    count,
                },
            )
        })
        .collect();
    result.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    result.into_iter().map(|(_, bin)| bin).collect()
}

/// Count occurrences, returned sorted by count descending; ties keep
/// first-seen order.
pub fn value_counts<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for value in values {
        let entry = counts.entry(value.clone()).or_insert(0);
        if *entry == 0 {
            order.push(value);
        }
        *entry += 1;
    }
    let mut result: Vec<(usize, String, usize)> = order
        .into_iter()
        .enumerate()
        .map(|(seen, value)| {
            let count = counts[&value];
            (seen, value, count)
        })
        .collect();
    result.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    result
        .into_iter()
        .map(|(_, value, count)| (value, count))
        .collect()
}
