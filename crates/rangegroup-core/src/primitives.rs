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

//! # Core Primitives
//!
//! The value objects every range group is built from: a single contiguous
//! [`Range`] with optionally exclusive bounds, and the [`Sources`] record that
//! remembers which operand ranges a computed range was derived from.
//!
//! A `Range` never compares its own bounds. Ordering, adjacency and size are
//! decided by a [`Domain`](crate::domain::Domain); the range is only storage.

use std::fmt;

/// Indices of the operand ranges a result range was derived from.
///
/// `a` is the index inside the receiver of a set operation, `b` the index
/// inside the argument. `None` means the range was not present in that
/// operand.
///
/// # Examples
///
/// ```
/// use rangegroup_core::primitives::Sources;
///
/// let s = Sources::both(3, 7);
/// assert_eq!(s.a(), Some(3));
/// assert_eq!(s.b(), Some(7));
/// assert_eq!(Sources::only_a(1).b(), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sources {
    a: Option<usize>,
    b: Option<usize>,
}

impl Sources {
    #[inline]
    pub const fn new(a: Option<usize>, b: Option<usize>) -> Self {
        Self { a, b }
    }

    #[inline]
    pub const fn only_a(index: usize) -> Self {
        Self::new(Some(index), None)
    }

    #[inline]
    pub const fn only_b(index: usize) -> Self {
        Self::new(None, Some(index))
    }

    #[inline]
    pub const fn both(a: usize, b: usize) -> Self {
        Self::new(Some(a), Some(b))
    }

    /// Index of the originating range in operand A, if any.
    #[inline]
    pub const fn a(&self) -> Option<usize> {
        self.a
    }

    /// Index of the originating range in operand B, if any.
    #[inline]
    pub const fn b(&self) -> Option<usize> {
        self.b
    }
}

/// A contiguous range `start..end` over some domain value `T`.
///
/// Both bounds are inclusive unless flagged exclusive. Ranges are usually
/// created through a [`Domain`](crate::domain::Domain), which may rewrite
/// exclusive bounds into inclusive ones for discrete domains.
///
/// # Examples
///
/// ```
/// use rangegroup_core::primitives::Range;
///
/// let r = Range::new(0, 6, false, true);
/// assert_eq!(*r.start(), 0);
/// assert_eq!(*r.end(), 6);
/// assert!(!r.is_start_exclusive());
/// assert!(r.is_end_exclusive());
/// assert_eq!(r.to_string(), "[0, 6)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range<T> {
    start: T,
    end: T,
    start_excl: bool,
    end_excl: bool,
    sources: Option<Sources>,
}

impl<T> Range<T> {
    /// Creates a range exactly as given, without any domain normalization.
    #[inline]
    pub const fn new(start: T, end: T, start_excl: bool, end_excl: bool) -> Self {
        Self {
            start,
            end,
            start_excl,
            end_excl,
            sources: None,
        }
    }

    /// Creates a range with both bounds inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangegroup_core::primitives::Range;
    ///
    /// let r = Range::closed(1, 5);
    /// assert_eq!(r.to_string(), "[1, 5]");
    /// ```
    #[inline]
    pub const fn closed(start: T, end: T) -> Self {
        Self::new(start, end, false, false)
    }

    #[inline]
    pub const fn start(&self) -> &T {
        &self.start
    }

    #[inline]
    pub const fn end(&self) -> &T {
        &self.end
    }

    #[inline]
    pub const fn is_start_exclusive(&self) -> bool {
        self.start_excl
    }

    #[inline]
    pub const fn is_end_exclusive(&self) -> bool {
        self.end_excl
    }

    /// Provenance recorded by a set operation run with source tracking.
    #[inline]
    pub const fn sources(&self) -> Option<Sources> {
        self.sources
    }

    #[inline]
    pub fn set_sources(&mut self, sources: Option<Sources>) {
        self.sources = sources;
    }

    /// Returns the range with its provenance replaced.
    #[inline]
    pub fn with_sources(mut self, sources: Option<Sources>) -> Self {
        self.sources = sources;
        self
    }

    /// Overwrites the start bound verbatim.
    ///
    /// Prefer [`Domain::set_start`](crate::domain::Domain::set_start), which
    /// applies the domain's bound normalization.
    #[inline]
    pub fn replace_start(&mut self, value: T, excl: bool) {
        self.start = value;
        self.start_excl = excl;
    }

    /// Overwrites the end bound verbatim.
    #[inline]
    pub fn replace_end(&mut self, value: T, excl: bool) {
        self.end = value;
        self.end_excl = excl;
    }

    /// Splits the range into `(start, end, start_excl, end_excl)`.
    #[inline]
    pub fn into_bounds(self) -> (T, T, bool, bool) {
        (self.start, self.end, self.start_excl, self.end_excl)
    }
}

impl<T> From<(T, T)> for Range<T> {
    #[inline]
    fn from((start, end): (T, T)) -> Self {
        Self::closed(start, end)
    }
}

impl<T> From<(T, T, bool, bool)> for Range<T> {
    #[inline]
    fn from((start, end, start_excl, end_excl): (T, T, bool, bool)) -> Self {
        Self::new(start, end, start_excl, end_excl)
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.start_excl { '(' } else { '[' };
        let close = if self.end_excl { ')' } else { ']' };
        write!(f, "{}{}, {}{}", open, self.start, self.end, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new_keeps_bounds_verbatim() {
        let r = Range::new(5, 1, true, false);
        assert_eq!(*r.start(), 5);
        assert_eq!(*r.end(), 1);
        assert!(r.is_start_exclusive());
        assert!(!r.is_end_exclusive());
        assert_eq!(r.sources(), None);
    }

    #[test]
    fn test_range_from_tuples() {
        let r: Range<i32> = (1, 2).into();
        assert_eq!(r, Range::closed(1, 2));
        let r: Range<i32> = (1, 2, true, true).into();
        assert_eq!(r.to_string(), "(1, 2)");
    }

    #[test]
    fn test_range_sources_roundtrip() {
        let mut r = Range::closed(0, 1);
        r.set_sources(Some(Sources::only_b(4)));
        assert_eq!(r.sources(), Some(Sources::new(None, Some(4))));
        let r = r.with_sources(None);
        assert_eq!(r.sources(), None);
    }

    #[test]
    fn test_range_replace_bounds() {
        let mut r = Range::closed(0, 10);
        r.replace_start(3, true);
        r.replace_end(7, true);
        assert_eq!(r.into_bounds(), (3, 7, true, true));
    }

    #[test]
    fn test_sources_default_is_untracked() {
        let s = Sources::default();
        assert_eq!(s.a(), None);
        assert_eq!(s.b(), None);
        assert_eq!(Sources::only_a(2), Sources::new(Some(2), None));
    }
}
