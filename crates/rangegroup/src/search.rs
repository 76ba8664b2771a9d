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

//! Lower-bound search over a sorted slice of ranges.
//!
//! The search first brackets the value between the starts of two ranges,
//! then narrows the bracket by interpolation: assuming evenly spread ranges,
//! the comparison distances to both ends of the bracket estimate where the
//! value falls. Domains that report non-finite or identical distances get a
//! plain bisection instead.

use crate::options::SearchOptions;
use rangegroup_core::{
    compare::{CompareMode, Comparison},
    domain::Domain,
    primitives::Range,
};
use std::cmp::Ordering;

/// Outcome of a search.
///
/// `index` is the lower bound: the first range that does not lie entirely
/// before the value. `start` and `end` are the comparisons that decided it,
/// always with the searched value on the left:
///
/// - `start` compares against the start of the range at `index`. It is `None`
///   when the search bounds were empty, or `index` lies past them.
/// - `end` compares against the end of the range at `index` when `has` is
///   set, and against the end of the range before `index` otherwise. It is
///   `None` when the value equals a range start, or when that range lies
///   outside the search bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    index: usize,
    has: bool,
    start: Option<Comparison>,
    end: Option<Comparison>,
}

impl SearchResult {
    #[inline]
    pub(crate) const fn new(
        index: usize,
        has: bool,
        start: Option<Comparison>,
        end: Option<Comparison>,
    ) -> Self {
        Self {
            index,
            has,
            start,
            end,
        }
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the range at [`index`](Self::index) contains the value.
    #[inline]
    pub const fn has(&self) -> bool {
        self.has
    }

    #[inline]
    pub const fn start(&self) -> Option<Comparison> {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Option<Comparison> {
        self.end
    }
}

/// Picks the next probe strictly inside `(first, last)`.
#[inline]
fn interpolate(first: usize, last: usize, fcompare: &Comparison, lcompare: &Comparison) -> usize {
    debug_assert!(first + 1 < last);
    if lcompare.distance() == 0.0 {
        return last - 1;
    }
    let width = fcompare.distance() - lcompare.distance();
    if width != 0.0 && width.is_finite() {
        let t = fcompare.distance() / width;
        if t.is_finite() {
            let step = (t * (last - first) as f64).floor();
            let step = if step >= 1.0 { step as usize } else { 1 };
            return first.saturating_add(step).min(last - 1);
        }
    }
    first + (last - first) / 2
}

/// Locates `value` among `ranges`, which must be sorted and disjoint.
pub(crate) fn search_ranges<D: Domain + ?Sized>(
    domain: &D,
    ranges: &[Range<D::Value>],
    value: &D::Value,
    options: &SearchOptions,
) -> SearchResult {
    let Some(max) = ranges.len().checked_sub(1) else {
        return SearchResult::new(0, false, None, None);
    };
    let mut first = options.first;
    let mut last = options.last.map_or(max, |l| l.min(max));
    if first > last {
        return SearchResult::new(last + 1, false, None, None);
    }

    let start_mode = CompareMode::from_ends(options.end, false);
    let end_mode = CompareMode::from_ends(options.end, true);
    let compare_start = |r: &Range<D::Value>| {
        domain.compare(start_mode, value, r.start(), options.excl, r.is_start_exclusive())
    };

    let mut fcompare = compare_start(&ranges[first]);
    if fcompare.side() == Ordering::Less {
        return SearchResult::new(first, false, Some(fcompare), None);
    }
    let mut lcompare = None;

    // narrow down to first.start <= value < last.start
    'bracket: {
        if first == last {
            last += 1;
            break 'bracket;
        }
        if fcompare.side() == Ordering::Equal {
            break 'bracket;
        }
        let mut lc = compare_start(&ranges[last]);
        if lc.side() != Ordering::Less {
            first = last;
            last += 1;
            fcompare = lc;
            break 'bracket;
        }
        while first + 1 < last {
            let middle = interpolate(first, last, &fcompare, &lc);
            let mc = compare_start(&ranges[middle]);
            if mc.side() == Ordering::Less {
                last = middle;
                lc = mc;
            } else {
                first = middle;
                fcompare = mc;
                if mc.side() == Ordering::Equal {
                    break;
                }
            }
        }
        lcompare = Some(lc);
    }

    if fcompare.side() == Ordering::Equal {
        return SearchResult::new(first, true, Some(fcompare), None);
    }
    let candidate = &ranges[first];
    let ecompare = domain.compare(
        end_mode,
        value,
        candidate.end(),
        options.excl,
        candidate.is_end_exclusive(),
    );
    if ecompare.side() == Ordering::Greater {
        return SearchResult::new(last, false, lcompare, Some(ecompare));
    }
    SearchResult::new(first, true, Some(fcompare), Some(ecompare))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangegroup_core::domains::{BinarySearch, IntDomain, RealDomain};

    const INT: IntDomain<i64> = IntDomain::new();

    fn ranges() -> Vec<Range<i64>> {
        vec![
            Range::closed(5, 10),
            Range::closed(15, 20),
            Range::closed(25, 30),
            Range::closed(35, 40),
        ]
    }

    fn cmp(distance: f64, side: Ordering) -> Option<Comparison> {
        Some(Comparison::new(distance, side))
    }

    #[test]
    fn test_search_between_ranges() {
        let r = search_ranges(&INT, &ranges(), &22, &SearchOptions::new());
        assert_eq!(
            r,
            SearchResult::new(2, false, cmp(-2.0, Ordering::Less), cmp(1.0, Ordering::Greater))
        );
    }

    #[test]
    fn test_search_inside_range() {
        let r = search_ranges(&INT, &ranges(), &17, &SearchOptions::new());
        assert_eq!(r.index(), 1);
        assert!(r.has());
        assert_eq!(r.start(), cmp(1.0, Ordering::Greater));
        assert_eq!(r.end(), cmp(-2.0, Ordering::Less));
    }

    #[test]
    fn test_search_on_range_start_skips_end_comparison() {
        let r = search_ranges(&INT, &ranges(), &35, &SearchOptions::new());
        assert_eq!(r, SearchResult::new(3, true, cmp(0.0, Ordering::Equal), None));
    }

    #[test]
    fn test_search_before_and_after_all() {
        let r = search_ranges(&INT, &ranges(), &0, &SearchOptions::new());
        assert_eq!(r, SearchResult::new(0, false, cmp(-4.0, Ordering::Less), None));
        let r = search_ranges(&INT, &ranges(), &50, &SearchOptions::new());
        assert_eq!(r, SearchResult::new(4, false, None, cmp(9.0, Ordering::Greater)));
    }

    #[test]
    fn test_search_with_bounds() {
        let opts = SearchOptions::new().first(0).last(1);
        let r = search_ranges(&INT, &ranges(), &33, &opts);
        assert_eq!(r, SearchResult::new(2, false, None, cmp(12.0, Ordering::Greater)));

        let opts = SearchOptions::new().first(2).last(3);
        let r = search_ranges(&INT, &ranges(), &2, &opts);
        assert_eq!(r, SearchResult::new(2, false, cmp(-22.0, Ordering::Less), None));

        let opts = SearchOptions::new().first(3).last(1);
        let r = search_ranges(&INT, &ranges(), &2, &opts);
        assert_eq!(r, SearchResult::new(2, false, None, None));

        let opts = SearchOptions::new().last(99);
        let r = search_ranges(&INT, &ranges(), &38, &opts);
        assert_eq!(r.index(), 3);
        assert!(r.has());
    }

    #[test]
    fn test_search_empty_slice() {
        let r = search_ranges(&INT, &[], &3, &SearchOptions::new());
        assert_eq!(r, SearchResult::new(0, false, None, None));
    }

    #[test]
    fn test_search_with_binary_fallback() {
        let d = BinarySearch(IntDomain::<i64>::new());
        let r = search_ranges(&d, &ranges(), &11, &SearchOptions::new());
        assert_eq!(
            r,
            SearchResult::new(1, false, cmp(-1.0, Ordering::Less), cmp(0.0, Ordering::Greater))
        );
        let r = search_ranges(&d, &ranges(), &12, &SearchOptions::new());
        assert_eq!(
            r,
            SearchResult::new(1, false, cmp(-1.0, Ordering::Less), cmp(1.0, Ordering::Greater))
        );
    }

    #[test]
    fn test_search_exclusive_bounds_agree_with_membership() {
        let rs = ranges();
        for v in 0..45 {
            let plain = search_ranges(&INT, &rs, &v, &SearchOptions::new());
            let as_start = search_ranges(&INT, &rs, &(v - 1), &SearchOptions::new().excl(true));
            let as_end =
                search_ranges(&INT, &rs, &(v + 1), &SearchOptions::new().excl(true).end(true));
            assert_eq!(plain.index(), as_start.index(), "value {}", v);
            assert_eq!(plain.has(), as_start.has(), "value {}", v);
            assert_eq!(plain.index(), as_end.index(), "value {}", v);
            assert_eq!(plain.has(), as_end.has(), "value {}", v);
        }
    }

    #[test]
    fn test_search_many_ranges_matches_linear_scan() {
        let rs: Vec<Range<f64>> = (0..200)
            .map(|i| {
                let base = f64::from(i) * 3.0 + f64::from(i % 7) * 0.1;
                Range::closed(base, base + 1.5)
            })
            .collect();
        for k in 0..700 {
            let v = f64::from(k) * 0.87;
            let r = search_ranges(&RealDomain, &rs, &v, &SearchOptions::new());
            let expected = rs.iter().position(|x| *x.end() >= v).unwrap_or(rs.len());
            let has = rs.get(expected).is_some_and(|x| *x.start() <= v);
            assert_eq!(r.index(), expected, "value {}", v);
            assert_eq!(r.has(), has, "value {}", v);
        }
    }
}
