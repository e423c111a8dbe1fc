//! Equal-width bins over the expression axis

use std::fmt;

use serde::Serialize;

/// Exported bin index for genes that fall outside every bin
pub const UNBINNED: i64 = -1;

/// Half-open interval `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
}

impl Bin {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether `low <= value < high`
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value < self.high
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

/// Parameters for one run of contiguous equal-width bins
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinGroup {
    pub lower_bound: f64,
    pub width: f64,
    pub quantity: usize,
}

impl BinGroup {
    pub fn new(lower_bound: f64, width: f64, quantity: usize) -> Self {
        Self {
            lower_bound,
            width,
            quantity,
        }
    }

    pub fn bins(&self) -> Vec<Bin> {
        create_bins(self.lower_bound, self.width, self.quantity)
    }
}

/// Equal-width partitioning starting at `lower_bound`.
///
/// Bin lows run from `lower_bound` to `lower_bound + quantity * width`
/// inclusive, so `quantity + 1` bins are produced and together they cover
/// `[lower_bound, lower_bound + (quantity + 1) * width)`.
///
/// `create_bins(0.0, 20.0, 2)` gives `[0, 20), [20, 40), [40, 60)`.
pub fn create_bins(lower_bound: f64, width: f64, quantity: usize) -> Vec<Bin> {
    (0..=quantity)
        .map(|i| {
            // multiply rather than accumulate so edges stay exact
            let low = lower_bound + i as f64 * width;
            Bin::new(low, low + width)
        })
        .collect()
}

/// Smallest index `i` with `bins[i].low <= value < bins[i].high`.
///
/// Returns `None` when the value is below the first bin, at or above the
/// last bin's upper edge, in a gap between bin groups, or NaN.
pub fn find_bin(value: f64, bins: &[Bin]) -> Option<usize> {
    bins.iter().position(|bin| bin.contains(value))
}

/// Map a bin assignment to the exported integer index
pub fn index_or_sentinel(bin: Option<usize>) -> i64 {
    bin.map_or(UNBINNED, |i| i as i64)
}

/// The ordered list of bins used for local normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinLayout {
    bins: Vec<Bin>,
}

impl BinLayout {
    /// Concatenate the bins of each group in order
    pub fn from_groups(groups: &[BinGroup]) -> Self {
        let bins = groups.iter().flat_map(|g| g.bins()).collect();
        Self { bins }
    }

    pub fn from_bins(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bin> {
        self.bins.get(index)
    }

    /// Bin index for a value, see [`find_bin`]
    pub fn find(&self, value: f64) -> Option<usize> {
        find_bin(value, &self.bins)
    }

    /// First pair of bins whose intervals intersect, if any
    pub fn first_overlap(&self) -> Option<(usize, usize)> {
        for i in 0..self.bins.len() {
            for j in (i + 1)..self.bins.len() {
                let (a, b) = (&self.bins[i], &self.bins[j]);
                if a.low < b.high && b.low < a.high {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl fmt::Display for BinLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.bins.iter().map(|b| b.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}
