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

//! # Domain Contract
//!
//! A [`Domain`] gives meaning to the values stored in a [`Range`]: how two
//! bounds order, whether a gap between two ranges holds any values, and how
//! large a range is. Range groups never look at values themselves, so adding
//! support for a new value type is a matter of implementing this trait.
//!
//! Domains are shared read-only. Any `&D`, `Rc<D>`, `Arc<D>` or `Box<D>` is a
//! domain too, so many groups can point at the same instance.

use crate::{
    compare::{CompareMode, Comparison, Gap},
    primitives::Range,
};
use std::{cmp::Ordering, rc::Rc, sync::Arc};

/// Ordering, construction and sizing of range bounds over one value type.
pub trait Domain {
    type Value: Clone;

    /// Normalizes a start bound. Discrete domains may turn an exclusive bound
    /// into the next inclusive value.
    #[inline]
    fn start_bound(&self, value: Self::Value, excl: bool) -> (Self::Value, bool) {
        (value, excl)
    }

    /// Normalizes an end bound.
    #[inline]
    fn end_bound(&self, value: Self::Value, excl: bool) -> (Self::Value, bool) {
        (value, excl)
    }

    /// Compares bound `a` against bound `b`; `mode` says which of the two are
    /// range ends.
    fn compare(
        &self,
        mode: CompareMode,
        a: &Self::Value,
        b: &Self::Value,
        a_excl: bool,
        b_excl: bool,
    ) -> Comparison;

    /// Number of values in the range, or its length for continuous domains.
    fn size(&self, range: &Range<Self::Value>) -> f64;

    /// Classifies the space between the end of one range and the start of a
    /// later one.
    #[inline]
    fn gap(
        &self,
        end: &Self::Value,
        end_excl: bool,
        start: &Self::Value,
        start_excl: bool,
    ) -> Gap {
        Gap::from(self.compare(CompareMode::EndStart, end, start, end_excl, start_excl))
    }

    #[inline]
    fn create(
        &self,
        start: Self::Value,
        end: Self::Value,
        start_excl: bool,
        end_excl: bool,
    ) -> Range<Self::Value> {
        let (start, start_excl) = self.start_bound(start, start_excl);
        let (end, end_excl) = self.end_bound(end, end_excl);
        Range::new(start, end, start_excl, end_excl)
    }

    /// An independent copy of `range`.
    #[inline]
    fn copy(&self, range: &Range<Self::Value>) -> Range<Self::Value> {
        range.clone()
    }

    #[inline]
    fn set_start(&self, range: &mut Range<Self::Value>, value: Self::Value, excl: bool) {
        let (value, excl) = self.start_bound(value, excl);
        range.replace_start(value, excl);
    }

    #[inline]
    fn set_end(&self, range: &mut Range<Self::Value>, value: Self::Value, excl: bool) {
        let (value, excl) = self.end_bound(value, excl);
        range.replace_end(value, excl);
    }

    /// Whether the range holds no values, i.e. its start lies after its end.
    #[inline]
    fn is_empty(&self, range: &Range<Self::Value>) -> bool {
        self.compare(
            CompareMode::StartEnd,
            range.start(),
            range.end(),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
        )
        .side()
            == Ordering::Greater
    }
}

/// A domain whose ranges can be enumerated value by value.
pub trait DiscreteDomain: Domain {
    type Iter: Iterator<Item = Self::Value>;

    /// Yields every value of `range`, last to first when `reverse` is set.
    fn iterate(&self, range: &Range<Self::Value>, reverse: bool) -> Self::Iter;
}

/// A domain that can pick a value at a relative position inside a range.
pub trait SampleDomain: Domain {
    /// Returns the value at `percentile` in `[0, 1)` of the range.
    fn sample(&self, range: &Range<Self::Value>, percentile: f64) -> Self::Value;
}

macro_rules! forward_domain {
    ($($ptr:ty),* $(,)?) => {$(
        impl<D: Domain + ?Sized> Domain for $ptr {
            type Value = D::Value;

            #[inline]
            fn start_bound(&self, value: Self::Value, excl: bool) -> (Self::Value, bool) {
                (**self).start_bound(value, excl)
            }

            #[inline]
            fn end_bound(&self, value: Self::Value, excl: bool) -> (Self::Value, bool) {
                (**self).end_bound(value, excl)
            }

            #[inline]
            fn compare(
                &self,
                mode: CompareMode,
                a: &Self::Value,
                b: &Self::Value,
                a_excl: bool,
                b_excl: bool,
            ) -> Comparison {
                (**self).compare(mode, a, b, a_excl, b_excl)
            }

            #[inline]
            fn size(&self, range: &Range<Self::Value>) -> f64 {
                (**self).size(range)
            }

            #[inline]
            fn gap(
                &self,
                end: &Self::Value,
                end_excl: bool,
                start: &Self::Value,
                start_excl: bool,
            ) -> Gap {
                (**self).gap(end, end_excl, start, start_excl)
            }

            #[inline]
            fn copy(&self, range: &Range<Self::Value>) -> Range<Self::Value> {
                (**self).copy(range)
            }
        }

        impl<D: DiscreteDomain + ?Sized> DiscreteDomain for $ptr {
            type Iter = D::Iter;

            #[inline]
            fn iterate(&self, range: &Range<Self::Value>, reverse: bool) -> Self::Iter {
                (**self).iterate(range, reverse)
            }
        }

        impl<D: SampleDomain + ?Sized> SampleDomain for $ptr {
            #[inline]
            fn sample(&self, range: &Range<Self::Value>, percentile: f64) -> Self::Value {
                (**self).sample(range, percentile)
            }
        }
    )*};
}

forward_domain!(&D, Box<D>, Rc<D>, Arc<D>);
