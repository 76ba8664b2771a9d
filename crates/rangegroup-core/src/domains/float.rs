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

//! Floating point numbers treated as a discrete set of representable values.

use crate::{
    compare::{CompareMode, Comparison},
    domain::{DiscreteDomain, Domain, SampleDomain},
    primitives::Range,
};
use std::{cmp::Ordering, iter::FusedIterator};

/// The representable `f64` next to `x` in the direction of `toward`.
///
/// # Examples
///
/// ```
/// use rangegroup_core::domains::next_toward;
///
/// assert_eq!(next_toward(1.0, 2.0), 1.0 + f64::EPSILON);
/// assert_eq!(next_toward(0.0, -1.0), -f64::from_bits(1));
/// assert_eq!(next_toward(3.0, 3.0), 3.0);
/// ```
pub fn next_toward(x: f64, toward: f64) -> f64 {
    if x.is_nan() || toward.is_nan() {
        return x + toward;
    }
    if x == toward {
        return toward;
    }
    if x == 0.0 {
        let tiny = f64::from_bits(1);
        return if toward > 0.0 { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    // magnitude grows when moving away from zero
    if (toward > x) == (x > 0.0) {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

#[inline]
fn inclusive(value: f64, excl: bool, is_end: bool) -> f64 {
    match (excl, is_end) {
        (false, _) => value,
        (true, false) => next_toward(value, f64::INFINITY),
        (true, true) => next_toward(value, f64::NEG_INFINITY),
    }
}

/// `f64` values where neighbouring doubles are adjacent.
///
/// Exclusive bounds are replaced with the next representable value inward on
/// construction, so stored ranges are always inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatNormDomain;

impl Domain for FloatNormDomain {
    type Value = f64;

    #[inline]
    fn start_bound(&self, value: f64, excl: bool) -> (f64, bool) {
        (inclusive(value, excl, false), false)
    }

    #[inline]
    fn end_bound(&self, value: f64, excl: bool) -> (f64, bool) {
        (inclusive(value, excl, true), false)
    }

    fn compare(&self, mode: CompareMode, a: &f64, b: &f64, a_excl: bool, b_excl: bool) -> Comparison {
        let a = inclusive(*a, a_excl, mode.a_is_end());
        let b = inclusive(*b, b_excl, mode.b_is_end());
        let distance = a - b;
        let side = distance.partial_cmp(&0.0).unwrap_or(Ordering::Equal);
        let toward = match side {
            Ordering::Less => f64::INFINITY,
            Ordering::Greater => f64::NEG_INFINITY,
            Ordering::Equal => return Comparison::new(distance, side),
        };
        if next_toward(a, toward) == b {
            return Comparison::new(0.0, side);
        }
        Comparison::new(distance, side)
    }

    #[inline]
    fn size(&self, range: &Range<f64>) -> f64 {
        range.end() - range.start()
    }
}

/// Iterator over every representable double of a range.
#[derive(Clone, Debug)]
pub struct FloatIter {
    next: Option<f64>,
    last: f64,
}

impl Iterator for FloatIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let out = self.next?;
        self.next = (out != self.last).then(|| next_toward(out, self.last));
        Some(out)
    }
}

impl FusedIterator for FloatIter {}

impl DiscreteDomain for FloatNormDomain {
    type Iter = FloatIter;

    fn iterate(&self, range: &Range<f64>, reverse: bool) -> FloatIter {
        let first = inclusive(*range.start(), range.is_start_exclusive(), false);
        let last = inclusive(*range.end(), range.is_end_exclusive(), true);
        let empty = !(first <= last);
        let (next, last) = if reverse { (last, first) } else { (first, last) };
        FloatIter {
            next: (!empty).then_some(next),
            last,
        }
    }
}

impl SampleDomain for FloatNormDomain {
    #[inline]
    fn sample(&self, range: &Range<f64>, percentile: f64) -> f64 {
        range.start() + percentile * self.size(range)
    }
}
