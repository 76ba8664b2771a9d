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

//! Domain wrappers that adjust how an inner domain reports distances.

use crate::{
    compare::{CompareMode, Comparison, Gap},
    domain::{DiscreteDomain, Domain, SampleDomain},
    primitives::Range,
};

/// Treats distances within `epsilon` of zero as zero.
///
/// Useful for floating point data where values that should touch come out a
/// rounding error apart. Such ranges become adjacent and merge.
///
/// # Examples
///
/// ```
/// use rangegroup_core::compare::Gap;
/// use rangegroup_core::domain::Domain;
/// use rangegroup_core::domains::{Epsilon, RealDomain};
///
/// let d = Epsilon::new(RealDomain, 1e-9);
/// assert_eq!(d.gap(&0.3, false, &(0.1 + 0.2), false), Gap::Adjacent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epsilon<D> {
    inner: D,
    epsilon: f64,
}

impl<D> Epsilon<D> {
    #[inline]
    pub const fn new(inner: D, epsilon: f64) -> Self {
        Self { inner, epsilon }
    }

    #[inline]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Domain> Domain for Epsilon<D> {
    type Value = D::Value;

    #[inline]
    fn start_bound(&self, value: D::Value, excl: bool) -> (D::Value, bool) {
        self.inner.start_bound(value, excl)
    }

    #[inline]
    fn end_bound(&self, value: D::Value, excl: bool) -> (D::Value, bool) {
        self.inner.end_bound(value, excl)
    }

    fn compare(
        &self,
        mode: CompareMode,
        a: &D::Value,
        b: &D::Value,
        a_excl: bool,
        b_excl: bool,
    ) -> Comparison {
        let c = self.inner.compare(mode, a, b, a_excl, b_excl);
        if c.distance().abs() <= self.epsilon {
            Comparison::new(0.0, c.side())
        } else {
            c
        }
    }

    fn gap(&self, end: &D::Value, end_excl: bool, start: &D::Value, start_excl: bool) -> Gap {
        // a zero-distance separation decided by the inner domain is exact
        let exact = self.inner.gap(end, end_excl, start, start_excl);
        let c = self.inner.compare(CompareMode::EndStart, end, start, end_excl, start_excl);
        if exact == Gap::Separate && c.distance() == 0.0 {
            return Gap::Separate;
        }
        Gap::from(self.compare(CompareMode::EndStart, end, start, end_excl, start_excl))
    }

    #[inline]
    fn size(&self, range: &Range<D::Value>) -> f64 {
        self.inner.size(range)
    }

    #[inline]
    fn copy(&self, range: &Range<D::Value>) -> Range<D::Value> {
        self.inner.copy(range)
    }
}

impl<D: DiscreteDomain> DiscreteDomain for Epsilon<D> {
    type Iter = D::Iter;

    #[inline]
    fn iterate(&self, range: &Range<D::Value>, reverse: bool) -> D::Iter {
        self.inner.iterate(range, reverse)
    }
}

impl<D: SampleDomain> SampleDomain for Epsilon<D> {
    #[inline]
    fn sample(&self, range: &Range<D::Value>, percentile: f64) -> D::Value {
        self.inner.sample(range, percentile)
    }
}

/// Collapses every non-zero distance to `±1`.
///
/// Interpolation then always lands on the midpoint, so searches degrade to
/// plain bisection. Zero distances are kept, so adjacency is unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinarySearch<D>(pub D);

impl<D: Domain> Domain for BinarySearch<D> {
    type Value = D::Value;

    #[inline]
    fn start_bound(&self, value: D::Value, excl: bool) -> (D::Value, bool) {
        self.0.start_bound(value, excl)
    }

    #[inline]
    fn end_bound(&self, value: D::Value, excl: bool) -> (D::Value, bool) {
        self.0.end_bound(value, excl)
    }

    fn compare(
        &self,
        mode: CompareMode,
        a: &D::Value,
        b: &D::Value,
        a_excl: bool,
        b_excl: bool,
    ) -> Comparison {
        let c = self.0.compare(mode, a, b, a_excl, b_excl);
        if c.distance() == 0.0 {
            c
        } else {
            Comparison::new(f64::from(c.side() as i8), c.side())
        }
    }

    #[inline]
    fn gap(&self, end: &D::Value, end_excl: bool, start: &D::Value, start_excl: bool) -> Gap {
        self.0.gap(end, end_excl, start, start_excl)
    }

    #[inline]
    fn size(&self, range: &Range<D::Value>) -> f64 {
        self.0.size(range)
    }

    #[inline]
    fn copy(&self, range: &Range<D::Value>) -> Range<D::Value> {
        self.0.copy(range)
    }
}

impl<D: DiscreteDomain> DiscreteDomain for BinarySearch<D> {
    type Iter = D::Iter;

    #[inline]
    fn iterate(&self, range: &Range<D::Value>, reverse: bool) -> D::Iter {
        self.0.iterate(range, reverse)
    }
}

impl<D: SampleDomain> SampleDomain for BinarySearch<D> {
    #[inline]
    fn sample(&self, range: &Range<D::Value>, percentile: f64) -> D::Value {
        self.0.sample(range, percentile)
    }
}
