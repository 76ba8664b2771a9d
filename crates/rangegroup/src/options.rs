// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Options for set operations and searches.

use crate::err::FilterError;
use std::ops::BitOr;

/// Remaining range count above which the diff sweep stops stepping one range
/// at a time and searches for the next intersection instead.
pub const DEFAULT_INTERPOLATION_CUTOFF: usize = 12;

/// Which regions of a diff end up in the result.
///
/// A diff between `A` and `B` splits the covered values into three regions:
/// `a` (only in `A`), `b` (only in `B`) and `ab` (in both). Every classic set
/// operation is a selection of regions.
///
/// # Examples
///
/// ```
/// use rangegroup::options::Filter;
///
/// assert_eq!(Filter::A | Filter::B | Filter::AB, Filter::UNION);
/// assert_eq!(Filter::from_bits(0b011).unwrap(), Filter::SYMMETRIC_DIFFERENCE);
/// assert!(Filter::from_bits(0).is_err());
/// assert!(Filter::from_bits(0b1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filter(u8);

impl Filter {
    pub const A: Filter = Filter(0b001);
    pub const B: Filter = Filter(0b010);
    pub const AB: Filter = Filter(0b100);
    pub const ALL: Filter = Filter(0b111);

    pub const UNION: Filter = Filter::ALL;
    pub const INTERSECTION: Filter = Filter::AB;
    pub const DIFFERENCE: Filter = Filter::A;
    pub const SYMMETRIC_DIFFERENCE: Filter = Filter(0b011);

    /// Builds a filter from its bitmask: `0b001` is `a`, `0b010` is `b` and
    /// `0b100` is `ab`.
    pub const fn from_bits(bits: u8) -> Result<Self, FilterError> {
        if bits & !Self::ALL.0 != 0 {
            return Err(FilterError::OutOfRange(bits));
        }
        if bits == 0 {
            return Err(FilterError::Empty);
        }
        Ok(Filter(bits))
    }

    /// Builds a filter from named regions.
    pub const fn new(a: bool, b: bool, ab: bool) -> Result<Self, FilterError> {
        Self::from_bits((a as u8) | ((b as u8) << 1) | ((ab as u8) << 2))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every region of `other` is selected.
    #[inline]
    pub const fn contains(self, other: Filter) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::ALL
    }
}

impl BitOr for Filter {
    type Output = Filter;

    #[inline]
    fn bitor(self, rhs: Filter) -> Filter {
        Filter(self.0 | rhs.0)
    }
}

/// How a diff combines two groups.
///
/// `self_union` merges touching output pieces into single ranges, keeping the
/// result normalized. `track_sources` records on every output range which
/// operand ranges it came from. The two are mutually exclusive, since merging
/// erases provenance; enabling one disables the other.
///
/// # Examples
///
/// ```
/// use rangegroup::options::{DiffOptions, Filter};
///
/// let opts = DiffOptions::new(Filter::AB).track_sources(true);
/// assert!(opts.is_tracking_sources());
/// assert!(!opts.is_self_union());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub(crate) filter: Filter,
    pub(crate) track_sources: bool,
    pub(crate) self_union: bool,
    pub(crate) interpolation_cutoff: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            filter: Filter::ALL,
            track_sources: false,
            self_union: true,
            interpolation_cutoff: DEFAULT_INTERPOLATION_CUTOFF,
        }
    }
}

impl DiffOptions {
    #[inline]
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[inline]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    #[inline]
    pub fn track_sources(mut self, on: bool) -> Self {
        self.track_sources = on;
        if on {
            self.self_union = false;
        }
        self
    }

    #[inline]
    pub fn self_union(mut self, on: bool) -> Self {
        self.self_union = on;
        if on {
            self.track_sources = false;
        }
        self
    }

    #[inline]
    pub fn interpolation_cutoff(mut self, cutoff: usize) -> Self {
        self.interpolation_cutoff = cutoff;
        self
    }

    #[inline]
    pub fn selected(&self) -> Filter {
        self.filter
    }

    #[inline]
    pub fn is_tracking_sources(&self) -> bool {
        self.track_sources
    }

    #[inline]
    pub fn is_self_union(&self) -> bool {
        self.self_union
    }

    #[inline]
    pub fn cutoff(&self) -> usize {
        self.interpolation_cutoff
    }
}

/// How to interpret the value passed to a search, and which slice of the
/// group to look at.
///
/// With `excl` set the value is treated as an exclusive range bound, a start
/// bound unless `end` is also set. `first` and `last` are inclusive indices;
/// `last` defaults to the final range and is clamped to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub(crate) excl: bool,
    pub(crate) end: bool,
    pub(crate) first: usize,
    pub(crate) last: Option<usize>,
}

impl SearchOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn excl(mut self, excl: bool) -> Self {
        self.excl = excl;
        self
    }

    #[inline]
    pub fn end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }

    #[inline]
    pub fn first(mut self, first: usize) -> Self {
        self.first = first;
        self
    }

    #[inline]
    pub fn last(mut self, last: usize) -> Self {
        self.last = Some(last);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_presets() {
        assert_eq!(Filter::UNION.bits(), 0b111);
        assert_eq!(Filter::INTERSECTION.bits(), 0b100);
        assert_eq!(Filter::DIFFERENCE.bits(), 0b001);
        assert_eq!(Filter::SYMMETRIC_DIFFERENCE, Filter::A | Filter::B);
        assert_eq!(Filter::default(), Filter::ALL);
    }

    #[test]
    fn test_filter_new_from_named_regions() {
        assert_eq!(Filter::new(true, false, true), Ok(Filter::A | Filter::AB));
        assert_eq!(Filter::new(false, false, false), Err(FilterError::Empty));
    }

    #[test]
    fn test_filter_from_bits_rejects_out_of_range() {
        assert_eq!(Filter::from_bits(0b1111), Err(FilterError::OutOfRange(0b1111)));
        assert_eq!(Filter::from_bits(0), Err(FilterError::Empty));
        assert_eq!(Filter::from_bits(0b010), Ok(Filter::B));
    }

    #[test]
    fn test_filter_contains() {
        assert!(Filter::ALL.contains(Filter::A | Filter::B));
        assert!(!Filter::SYMMETRIC_DIFFERENCE.contains(Filter::AB));
    }

    #[test]
    fn test_diff_options_defaults() {
        let opts = DiffOptions::default();
        assert_eq!(opts.selected(), Filter::ALL);
        assert!(opts.is_self_union());
        assert!(!opts.is_tracking_sources());
        assert_eq!(opts.cutoff(), DEFAULT_INTERPOLATION_CUTOFF);
    }

    #[test]
    fn test_diff_options_exclusive_flags() {
        let opts = DiffOptions::default().track_sources(true);
        assert!(!opts.is_self_union());
        let opts = opts.self_union(true);
        assert!(!opts.is_tracking_sources());
        let opts = DiffOptions::new(Filter::A).self_union(false).interpolation_cutoff(0);
        assert!(!opts.is_self_union() && !opts.is_tracking_sources());
        assert_eq!(opts.cutoff(), 0);
    }

    #[test]
    fn test_search_options_builder() {
        let opts = SearchOptions::new().excl(true).end(true).first(2).last(5);
        assert_eq!(
            opts,
            SearchOptions {
                excl: true,
                end: true,
                first: 2,
                last: Some(5),
            }
        );
    }
}
