//! Equal-width histogram binning for the score distribution plot.
//!
//! Bins span `[min, max]` of the finite input values. Every bin is
//! half-open `[lower, upper)` except the last, which is closed so that the
//! maximum lands in it. When all values are equal the range widens to
//! `[v - 0.5, v + 0.5]`.

use serde::Serialize;

/// Number of bins in the score distribution histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bin `values` into `bins` equal-width buckets.
///
/// Non-finite values are ignored. Returns an empty vector when there is
/// nothing to bin or `bins` is zero.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in finite {
        let slot = ((value - min) / width).floor() as usize;
        result[slot.min(bins - 1)].count += 1;
    }

    result
}
