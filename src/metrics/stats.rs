use std::collections::BTreeMap;
use std::time::Duration;

/// Cut points of the latency percentile table.
pub const PERCENTILE_CUTS: [u8; 9] = [50, 66, 75, 80, 90, 95, 98, 99, 100];

const PERCENT: usize = 100;

/// Index of cut point `percent` in a sorted sequence of `len` values:
/// `floor(len * percent / 100)`.
///
/// The result equals `len` for the 100th percentile, which is out of range.
#[must_use]
pub const fn percentile_index(len: usize, percent: u8) -> usize {
    let scaled = len.saturating_mul(percent as usize);
    match scaled.checked_div(PERCENT) {
        Some(index) => index,
        None => 0,
    }
}

/// Element at `floor(len / 2)` of an ascending slice; for even lengths this
/// is the upper of the two middle values.
#[must_use]
pub fn median<T: Copy>(sorted: &[T]) -> Option<T> {
    sorted.get(sorted.len().checked_div(2)?).copied()
}

/// Percentile table over an ascending slice.
///
/// A cut point whose index falls past the last element is left out. That is
/// always the case for the 100th percentile (index == len); every lower cut
/// point of a non-empty slice is present.
#[must_use]
pub fn percentile_table<T: Copy>(sorted: &[T]) -> BTreeMap<u8, T> {
    PERCENTILE_CUTS
        .iter()
        .filter_map(|&percent| {
            sorted
                .get(percentile_index(sorted.len(), percent))
                .map(|value| (percent, *value))
        })
        .collect()
}

/// Arithmetic mean with nanosecond resolution; zero for an empty slice.
#[must_use]
pub fn mean_duration(values: &[Duration]) -> Duration {
    let count = u128::try_from(values.len()).unwrap_or(u128::MAX);
    let sum: u128 = values
        .iter()
        .fold(0u128, |acc, value| acc.saturating_add(value.as_nanos()));
    let mean = sum.checked_div(count).unwrap_or(0);
    Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX))
}
