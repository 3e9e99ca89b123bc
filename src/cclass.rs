//! Character classes: sets of input values held as disjoint half-open intervals.

use bincode::{Decode, Encode};
use std::fmt;

/// A set of `u32` input values stored as sorted, disjoint, non-adjacent
/// half-open intervals `[lo, hi)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Encode, Decode)]
pub struct CharClass {
    intervals: Vec<(u32, u32)>,
}

impl CharClass {
    /// Create an empty class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a class holding the single interval `[lo, hi)`.
    pub fn from_range(lo: u32, hi: u32) -> Self {
        let mut class = Self::new();
        class.add(lo, hi);
        class
    }

    /// Extend the class by `[lo, hi)`.
    ///
    /// Overlapping and touching intervals are coalesced, so two classes
    /// holding the same values always compare equal. An empty range is a
    /// no-op.
    pub fn add(&mut self, lo: u32, hi: u32) {
        if lo >= hi {
            return;
        }
        let start = self.intervals.partition_point(|&(_, h)| h < lo);
        let end = self.intervals.partition_point(|&(l, _)| l <= hi);
        if start == end {
            self.intervals.insert(start, (lo, hi));
            return;
        }
        let merged = (
            lo.min(self.intervals[start].0),
            hi.max(self.intervals[end - 1].1),
        );
        self.intervals.splice(start..end, std::iter::once(merged));
    }

    /// Test whether `ch` lies in any interval of the class.
    pub fn contains(&self, ch: u32) -> bool {
        let idx = self.intervals.partition_point(|&(_, h)| h <= ch);
        idx < self.intervals.len() && self.intervals[idx].0 <= ch
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Bounds of the `i`-th interval.
    pub fn interval(&self, i: usize) -> (u32, u32) {
        self.intervals[i]
    }

    /// Iterate over the interval bounds in ascending order.
    pub fn intervals(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.intervals.iter().copied()
    }

    /// Whether the intervals are non-empty, sorted, and neither overlap nor
    /// touch. Every class built through [`CharClass::add`] is.
    pub fn is_canonical(&self) -> bool {
        self.intervals.iter().all(|&(lo, hi)| lo < hi)
            && self.intervals.windows(2).all(|w| w[0].1 < w[1].0)
    }

    /// Whether the two classes share at least one value.
    pub fn overlaps(&self, other: &CharClass) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let (alo, ahi) = self.intervals[i];
            let (blo, bhi) = other.intervals[j];
            if alo < bhi && blo < ahi {
                return true;
            }
            if ahi <= bhi {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, value: u32) -> fmt::Result {
    match char::from_u32(value) {
        Some(c) if c.is_ascii_graphic() => write!(f, "'{}'", c),
        _ => write!(f, "{:#x}", value),
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (lo, hi) in self.intervals() {
            write!(f, "[")?;
            fmt_bound(f, lo)?;
            write!(f, "-")?;
            fmt_bound(f, hi)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}
