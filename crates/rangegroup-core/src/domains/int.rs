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

//! Integer domains.
//!
//! Exclusive bounds are equivalent to the neighbouring inclusive integer, so
//! `[0, 5)` holds the same values as `[0, 4]`. The distance between two
//! integers is the signed count of integers strictly between them, which makes
//! `4` and `5` adjacent (distance zero).
//!
//! The arithmetic is shared with the other discrete domains built on top of
//! integers (dates and unicode code points) through the `i128` helpers below.

use crate::{
    compare::{CompareMode, Comparison},
    domain::{DiscreteDomain, Domain, SampleDomain},
    primitives::Range,
};
use num_traits::PrimInt;
use std::{iter::FusedIterator, marker::PhantomData};

#[inline]
pub(crate) fn widen<T: PrimInt>(value: T) -> i128 {
    value.to_i128().unwrap_or(i128::MAX)
}

#[inline]
pub(crate) fn narrow<T: PrimInt>(value: i128) -> Option<T> {
    T::from(value)
}

/// The inclusive value equivalent to a possibly exclusive bound.
#[inline]
pub(crate) fn inclusive(value: i128, excl: bool, is_end: bool) -> i128 {
    match (excl, is_end) {
        (false, _) => value,
        (true, false) => value.saturating_add(1),
        (true, true) => value.saturating_sub(1),
    }
}

#[inline]
pub(crate) fn compare_discrete(
    mode: CompareMode,
    a: i128,
    b: i128,
    a_excl: bool,
    b_excl: bool,
) -> Comparison {
    let a = inclusive(a, a_excl, mode.a_is_end());
    let b = inclusive(b, b_excl, mode.b_is_end());
    let diff = a.saturating_sub(b);
    let side = diff.cmp(&0);
    Comparison::new((diff - side as i128) as f64, side)
}

#[inline]
pub(crate) fn size_discrete(start: i128, end: i128, start_excl: bool, end_excl: bool) -> f64 {
    let first = inclusive(start, start_excl, false);
    let last = inclusive(end, end_excl, true);
    (last - first + 1) as f64
}

/// Offset of the value at `percentile` within a discrete range.
#[inline]
pub(crate) fn sample_discrete(
    start: i128,
    end: i128,
    start_excl: bool,
    end_excl: bool,
    percentile: f64,
) -> i128 {
    let first = inclusive(start, start_excl, false);
    let last = inclusive(end, end_excl, true);
    let size = size_discrete(start, end, start_excl, end_excl);
    let offset = (size * percentile).floor() as i128;
    first.saturating_add(offset).clamp(first, last.max(first))
}

/// Every integer of an inclusive span, in either direction.
#[derive(Clone, Debug)]
pub(crate) struct Steps {
    next: i128,
    last: i128,
    reverse: bool,
    done: bool,
}

impl Steps {
    pub(crate) fn new(start: i128, end: i128, start_excl: bool, end_excl: bool, reverse: bool) -> Self {
        let first = inclusive(start, start_excl, false);
        let last = inclusive(end, end_excl, true);
        let (next, last) = if reverse { (last, first) } else { (first, last) };
        let done = if reverse { next < last } else { next > last };
        Self {
            next,
            last,
            reverse,
            done,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        usize::try_from(self.next.abs_diff(self.last)).map_or(usize::MAX, |d| d.saturating_add(1))
    }
}

impl Iterator for Steps {
    type Item = i128;

    fn next(&mut self) -> Option<i128> {
        if self.done {
            return None;
        }
        let out = self.next;
        if out == self.last {
            self.done = true;
        } else if self.reverse {
            self.next -= 1;
        } else {
            self.next += 1;
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl FusedIterator for Steps {}

/// Integer domain over any primitive integer type.
///
/// With `NORMALIZE` set, exclusive bounds are rewritten to inclusive ones on
/// construction; otherwise the flags are kept and only honoured by
/// comparisons. Values of `u128` beyond `i128::MAX` are not supported.
///
/// # Examples
///
/// ```
/// use rangegroup_core::domain::Domain;
/// use rangegroup_core::domains::{IntDomain, IntNormDomain};
///
/// let r = IntDomain::<i32>::new().create(0, 5, false, true);
/// assert!(r.is_end_exclusive());
/// assert_eq!(IntDomain::<i32>::new().size(&r), 5.0);
///
/// let r = IntNormDomain::<i32>::new().create(0, 5, false, true);
/// assert_eq!(*r.end(), 4);
/// assert!(!r.is_end_exclusive());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerDomain<T, const NORMALIZE: bool> {
    _marker: PhantomData<fn() -> T>,
}

/// Integers keeping exclusive bounds as flags.
pub type IntDomain<T> = IntegerDomain<T, false>;

/// Integers with exclusive bounds normalized to inclusive ones.
pub type IntNormDomain<T> = IntegerDomain<T, true>;

impl<T, const NORMALIZE: bool> IntegerDomain<T, NORMALIZE> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: PrimInt, const NORMALIZE: bool> Domain for IntegerDomain<T, NORMALIZE> {
    type Value = T;

    #[inline]
    fn start_bound(&self, value: T, excl: bool) -> (T, bool) {
        if NORMALIZE && excl {
            if let Some(v) = value.checked_add(&T::one()) {
                return (v, false);
            }
        }
        (value, excl)
    }

    #[inline]
    fn end_bound(&self, value: T, excl: bool) -> (T, bool) {
        if NORMALIZE && excl {
            if let Some(v) = value.checked_sub(&T::one()) {
                return (v, false);
            }
        }
        (value, excl)
    }

    #[inline]
    fn compare(&self, mode: CompareMode, a: &T, b: &T, a_excl: bool, b_excl: bool) -> Comparison {
        compare_discrete(mode, widen(*a), widen(*b), a_excl, b_excl)
    }

    #[inline]
    fn size(&self, range: &Range<T>) -> f64 {
        size_discrete(
            widen(*range.start()),
            widen(*range.end()),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
        )
    }
}

/// Iterator over the integers of a range.
#[derive(Clone, Debug)]
pub struct IntIter<T> {
    steps: Steps,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PrimInt> Iterator for IntIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.steps.next().and_then(narrow)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl<T: PrimInt> FusedIterator for IntIter<T> {}

impl<T: PrimInt, const NORMALIZE: bool> DiscreteDomain for IntegerDomain<T, NORMALIZE> {
    type Iter = IntIter<T>;

    fn iterate(&self, range: &Range<T>, reverse: bool) -> IntIter<T> {
        IntIter {
            steps: Steps::new(
                widen(*range.start()),
                widen(*range.end()),
                range.is_start_exclusive(),
                range.is_end_exclusive(),
                reverse,
            ),
            _marker: PhantomData,
        }
    }
}

impl<T: PrimInt, const NORMALIZE: bool> SampleDomain for IntegerDomain<T, NORMALIZE> {
    fn sample(&self, range: &Range<T>, percentile: f64) -> T {
        let v = sample_discrete(
            widen(*range.start()),
            widen(*range.end()),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
            percentile,
        );
        narrow(v).unwrap_or(*range.start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Gap;
    use std::cmp::Ordering;

    const INT: IntDomain<i64> = IntDomain::new();
    const NORM: IntNormDomain<i64> = IntNormDomain::new();

    #[test]
    fn test_compare_counts_values_between() {
        let c = INT.compare(CompareMode::Start, &22, &25, false, false);
        assert_eq!(c, Comparison::new(-2.0, Ordering::Less));
        let c = INT.compare(CompareMode::StartEnd, &22, &20, false, false);
        assert_eq!(c, Comparison::new(1.0, Ordering::Greater));
        let c = INT.compare(CompareMode::Start, &7, &7, false, false);
        assert_eq!(c, Comparison::new(0.0, Ordering::Equal));
    }

    #[test]
    fn test_compare_honours_exclusive_bounds() {
        // exclusive start 5 is 6, exclusive end 6 is 5
        let c = INT.compare(CompareMode::Start, &5, &6, true, false);
        assert_eq!(c.side(), Ordering::Equal);
        let c = INT.compare(CompareMode::End, &6, &5, true, false);
        assert_eq!(c.side(), Ordering::Equal);
    }

    #[test]
    fn test_gap_between_neighbours_is_adjacent() {
        assert_eq!(INT.gap(&5, false, &6, false), Gap::Adjacent);
        assert_eq!(INT.gap(&5, false, &7, false), Gap::Separate);
        assert_eq!(INT.gap(&5, false, &5, false), Gap::Overlapping);
        assert_eq!(INT.gap(&6, true, &6, false), Gap::Adjacent);
        assert_eq!(INT.gap(&6, true, &5, true), Gap::Adjacent);
    }

    #[test]
    fn test_size() {
        assert_eq!(INT.size(&Range::closed(5, 10)), 6.0);
        assert_eq!(INT.size(&Range::new(5, 10, true, true)), 4.0);
        assert_eq!(INT.size(&Range::new(5, 6, true, true)), 0.0);
    }

    #[test]
    fn test_norm_rewrites_exclusive_bounds() {
        let r = NORM.create(0, 10, true, true);
        assert_eq!(r, Range::closed(1, 9));
        let r = IntNormDomain::<u8>::new().create(255, 0, true, true);
        assert_eq!(r, Range::new(255, 0, true, true));
    }

    #[test]
    fn test_iterate_forward_and_reverse() {
        let r = Range::new(0, 5, true, false);
        let fwd: Vec<i64> = INT.iterate(&r, false).collect();
        assert_eq!(fwd, vec![1, 2, 3, 4, 5]);
        let rev: Vec<i64> = INT.iterate(&r, true).collect();
        assert_eq!(rev, vec![5, 4, 3, 2, 1]);
        assert_eq!(INT.iterate(&r, false).size_hint(), (5, Some(5)));
        assert_eq!(INT.iterate(&Range::closed(3, 2), false).count(), 0);
    }

    #[test]
    fn test_iterate_at_type_limits() {
        let d = IntDomain::<u8>::new();
        let all: Vec<u8> = d.iterate(&Range::closed(253, 255), false).collect();
        assert_eq!(all, vec![253, 254, 255]);
    }

    #[test]
    fn test_sample() {
        let r = Range::new(10, 15, true, false);
        assert_eq!(INT.sample(&r, 0.0), 11);
        assert_eq!(INT.sample(&r, 0.5), 13);
        assert_eq!(INT.sample(&r, 1.0 - f64::EPSILON), 15);
    }
}
