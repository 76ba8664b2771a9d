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

//! Continuous real numbers.

use crate::{
    compare::{CompareMode, Comparison, Gap},
    domain::{Domain, SampleDomain},
    primitives::Range,
};
use std::cmp::Ordering;

/// Real line over `f64`.
///
/// Every gap between distinct values holds infinitely many reals, so two
/// ranges are only adjacent when they meet at the same value and at most one
/// side excludes it. Exclusivity never changes the distance, it only breaks
/// ties between equal values.
///
/// # Examples
///
/// ```
/// use rangegroup_core::compare::Gap;
/// use rangegroup_core::domain::Domain;
/// use rangegroup_core::domains::RealDomain;
///
/// // [0, 5) and [5, 7] touch
/// assert_eq!(RealDomain.gap(&5.0, true, &5.0, false), Gap::Adjacent);
/// // [0, 5) and (5, 7] leave 5 out
/// assert_eq!(RealDomain.gap(&5.0, true, &5.0, true), Gap::Separate);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealDomain;

/// Tie-break weight of a bound: exclusive starts sit just above their value,
/// exclusive ends just below.
#[inline]
fn nudge(excl: bool, is_end: bool) -> i8 {
    match (excl, is_end) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => -1,
    }
}

impl Domain for RealDomain {
    type Value = f64;

    fn compare(&self, mode: CompareMode, a: &f64, b: &f64, a_excl: bool, b_excl: bool) -> Comparison {
        let distance = a - b;
        let side = match distance.partial_cmp(&0.0) {
            Some(Ordering::Less) => Ordering::Less,
            Some(Ordering::Greater) => Ordering::Greater,
            _ => nudge(a_excl, mode.a_is_end()).cmp(&nudge(b_excl, mode.b_is_end())),
        };
        Comparison::new(distance, side)
    }

    fn gap(&self, end: &f64, end_excl: bool, start: &f64, start_excl: bool) -> Gap {
        if end_excl && start_excl && end == start {
            return Gap::Separate;
        }
        Gap::from(self.compare(CompareMode::EndStart, end, start, end_excl, start_excl))
    }

    #[inline]
    fn size(&self, range: &Range<f64>) -> f64 {
        range.end() - range.start()
    }
}

impl SampleDomain for RealDomain {
    #[inline]
    fn sample(&self, range: &Range<f64>, percentile: f64) -> f64 {
        range.start() + percentile * self.size(range)
    }
}
