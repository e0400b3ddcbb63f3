//! Half-open interval tables for tiered lookups.

use serde::{Deserialize, Serialize};

/// A `[min, max)` interval mapped to a representative value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band<T> {
    pub min: i64,
    pub max: i64,
    pub value: T,
}

impl<T> Band<T> {
    pub const fn new(min: i64, max: i64, value: T) -> Self {
        Self { min, max, value }
    }

    /// `min <= x < max`
    pub fn contains(&self, x: i64) -> bool {
        x >= self.min && x < self.max
    }
}

/// Where a value falls relative to a band table.
#[derive(Debug, PartialEq)]
pub enum BandMatch<'a, T> {
    /// Inside a band.
    Within(&'a Band<T>),
    /// Below every band's `min`.
    Below,
    /// At or above every band's `max`.
    Above,
    /// In the gap between two adjacent bands.
    Between(&'a Band<T>, &'a Band<T>),
    /// No relationship could be established (e.g. empty table).
    Unplaced,
}

/// Ordered list of bands. Gaps between bands are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BandTable<T> {
    bands: Vec<Band<T>>,
}

impl<T> BandTable<T> {
    pub fn new(bands: Vec<Band<T>>) -> Self {
        Self { bands }
    }

    /// Place `x` against the table.
    ///
    /// A containing band wins (first in declared order). Otherwise `x` is
    /// below the lowest `min`, at/above the highest `max`, or in a gap
    /// between two bands adjacent in `min` order.
    pub fn locate(&self, x: i64) -> BandMatch<'_, T> {
        if let Some(band) = self.bands.iter().find(|b| b.contains(x)) {
            return BandMatch::Within(band);
        }

        let lowest = self.bands.iter().map(|b| b.min).min();
        let highest = self.bands.iter().map(|b| b.max).max();
        let (Some(lowest), Some(highest)) = (lowest, highest) else {
            return BandMatch::Unplaced;
        };

        if x < lowest {
            return BandMatch::Below;
        }
        if x >= highest {
            return BandMatch::Above;
        }

        let mut sorted: Vec<&Band<T>> = self.bands.iter().collect();
        sorted.sort_by_key(|b| b.min);

        sorted
            .windows(2)
            .find(|pair| x >= pair[0].max && x < pair[1].min)
            .map(|pair| BandMatch::Between(pair[0], pair[1]))
            .unwrap_or(BandMatch::Unplaced)
    }
}
