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

//! # Range Groups
//!
//! A [`RangeGroup`] is an ordered sequence of [`Range`]s together with the
//! [`Domain`] that interprets them. Most operations expect the group to be
//! **normalized**:
//!
//! 1. ranges are sorted by start,
//! 2. no range is empty,
//! 3. no two ranges overlap or touch without a value between them.
//!
//! Only [`sort`](RangeGroup::sort), [`self_union`](RangeGroup::self_union) and
//! [`normalize`](RangeGroup::normalize) accept arbitrary input. Set operations
//! on non-normalized groups give unspecified (but memory-safe) results.
//!
//! Every operation comes in up to three flavours: an in-place one that
//! rewrites the receiver (`union`), a `to_` one that returns a fresh group
//! (`to_union`), and a `has_` one that only answers whether the result would
//! be non-empty (`has_union`).

use crate::{
    diff::{self, are_invariants_held},
    err::RangeGroupError,
    options::{DiffOptions, Filter, SearchOptions},
    search::{SearchResult, search_ranges},
};
use rangegroup_core::{
    compare::{CompareMode, Gap},
    domain::{DiscreteDomain, Domain},
    primitives::{Range, Sources},
};
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    ops::{BitAnd, BitOr, BitXor, Sub},
};
use tracing::instrument;

/// Ranges to build a group from.
///
/// Converts from a single [`Range`], a `(start, end)` or
/// `(start, end, start_excl, end_excl)` tuple, or a `Vec` or array of any of
/// these.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition<V>(Vec<Range<V>>);

impl<V> Definition<V> {
    #[inline]
    pub fn into_ranges(self) -> Vec<Range<V>> {
        self.0
    }
}

impl<V> Default for Definition<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> From<Range<V>> for Definition<V> {
    #[inline]
    fn from(range: Range<V>) -> Self {
        Self(vec![range])
    }
}

impl<V> From<(V, V)> for Definition<V> {
    #[inline]
    fn from(bounds: (V, V)) -> Self {
        Self(vec![bounds.into()])
    }
}

impl<V> From<(V, V, bool, bool)> for Definition<V> {
    #[inline]
    fn from(bounds: (V, V, bool, bool)) -> Self {
        Self(vec![bounds.into()])
    }
}

impl<V, R: Into<Range<V>>> From<Vec<R>> for Definition<V> {
    #[inline]
    fn from(items: Vec<R>) -> Self {
        Self(items.into_iter().map(Into::into).collect())
    }
}

impl<V, R: Into<Range<V>>, const N: usize> From<[R; N]> for Definition<V> {
    #[inline]
    fn from(items: [R; N]) -> Self {
        Self(items.into_iter().map(Into::into).collect())
    }
}

/// An ordered set of ranges over one domain.
///
/// # Examples
///
/// ```
/// use rangegroup::group::RangeGroup;
/// use rangegroup_core::domains::IntDomain;
///
/// let domain = IntDomain::<i32>::new();
/// let a = RangeGroup::new(domain, vec![(0, 10), (20, 30)]);
/// let b = RangeGroup::new(domain, vec![(6, 12), (17, 24)]);
///
/// assert_eq!((&a | &b).to_string(), "[0, 12] ∪ [17, 30]");
/// assert_eq!((&a & &b).to_string(), "[6, 10] ∪ [20, 24]");
/// assert_eq!((&a - &b).to_string(), "[0, 6) ∪ (24, 30]");
/// ```
pub struct RangeGroup<D: Domain> {
    domain: D,
    ranges: Vec<Range<D::Value>>,
}

impl<D: Domain + Clone> Clone for RangeGroup<D> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            ranges: self.ranges.iter().map(|r| self.domain.copy(r)).collect(),
        }
    }
}

impl<D> Debug for RangeGroup<D>
where
    D: Domain + Debug,
    D::Value: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeGroup")
            .field("domain", &self.domain)
            .field("ranges", &self.ranges)
            .finish()
    }
}

impl<D: Domain> RangeGroup<D> {
    /// Builds a group from `definition` as given, without normalizing it.
    /// Bounds pass through the domain, so normalizing domains rewrite
    /// exclusive ones.
    pub fn new(domain: D, definition: impl Into<Definition<D::Value>>) -> Self {
        let ranges = definition
            .into()
            .into_ranges()
            .into_iter()
            .map(|r| {
                let sources = r.sources();
                let (start, end, start_excl, end_excl) = r.into_bounds();
                domain
                    .create(start, end, start_excl, end_excl)
                    .with_sources(sources)
            })
            .collect();
        Self { domain, ranges }
    }

    /// Builds a group from `definition` and normalizes it.
    #[inline]
    pub fn normalized(domain: D, definition: impl Into<Definition<D::Value>>) -> Self {
        let mut group = Self::new(domain, definition);
        group.normalize();
        group
    }

    #[inline]
    pub fn empty(domain: D) -> Self {
        Self {
            domain,
            ranges: Vec::new(),
        }
    }

    #[inline]
    pub fn builder() -> RangeGroupBuilder<D> {
        RangeGroupBuilder::new()
    }

    #[inline]
    pub fn domain(&self) -> &D {
        &self.domain
    }

    #[inline]
    pub fn ranges(&self) -> &[Range<D::Value>] {
        &self.ranges
    }

    #[inline]
    pub fn into_ranges(self) -> Vec<Range<D::Value>> {
        self.ranges
    }

    /// Number of ranges, not values.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total size of all ranges as measured by the domain.
    pub fn size(&self) -> f64 {
        self.ranges.iter().map(|r| self.domain.size(r)).sum()
    }

    /// Whether the group is sorted, free of empty ranges and has a gap
    /// between every two neighbours.
    pub fn is_normalized(&self) -> bool {
        are_invariants_held(&self.domain, &self.ranges)
            && self.ranges.windows(2).all(|w| {
                self.domain.gap(
                    w[0].end(),
                    w[0].is_end_exclusive(),
                    w[1].start(),
                    w[1].is_start_exclusive(),
                ) == Gap::Separate
            })
    }

    /// Stable sort by start bound.
    pub fn sort(&mut self) -> &mut Self {
        let domain = &self.domain;
        self.ranges.sort_by(|a, b| {
            domain
                .compare(
                    CompareMode::Start,
                    a.start(),
                    b.start(),
                    a.is_start_exclusive(),
                    b.is_start_exclusive(),
                )
                .side()
        });
        self
    }

    /// Merges overlapping and touching ranges and drops empty ones. The group
    /// must be sorted.
    #[instrument(level = "trace", skip_all, fields(len = self.ranges.len()))]
    pub fn self_union(&mut self) -> &mut Self {
        self.retain_merged(|_| true);
        self
    }

    pub fn to_self_union(&self) -> Self
    where
        D: Clone,
    {
        self.with_ranges(self.merged(|_| true))
    }

    /// Sorts, then merges.
    #[instrument(level = "trace", skip_all, fields(len = self.ranges.len()))]
    pub fn normalize(&mut self) -> &mut Self {
        self.sort();
        self.retain_merged(|_| true);
        self
    }

    pub fn to_normalized(&self) -> Self
    where
        D: Clone,
    {
        let mut group = self.clone();
        group.normalize();
        group
    }

    /// Keeps the ranges matching `keep`, merging them as
    /// [`self_union`](Self::self_union) does.
    pub fn filter<F>(&mut self, keep: F) -> &mut Self
    where
        F: FnMut(&Range<D::Value>) -> bool,
    {
        self.retain_merged(keep);
        self
    }

    pub fn to_filtered<F>(&self, keep: F) -> Self
    where
        D: Clone,
        F: FnMut(&Range<D::Value>) -> bool,
    {
        self.with_ranges(self.merged(keep))
    }

    /// Whether any non-empty range matches `keep`.
    pub fn has_filter<F>(&self, mut keep: F) -> bool
    where
        F: FnMut(&Range<D::Value>) -> bool,
    {
        self.ranges
            .iter()
            .any(|r| keep(r) && !self.domain.is_empty(r))
    }

    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.ranges.clear();
        self
    }

    #[inline]
    pub fn to_cleared(&self) -> Self
    where
        D: Clone,
    {
        Self::empty(self.domain.clone())
    }

    /// Locates `value`; see [`SearchResult`] for what is reported.
    #[inline]
    pub fn search(&self, value: &D::Value, options: &SearchOptions) -> SearchResult {
        search_ranges(&self.domain, &self.ranges, value, options)
    }

    /// Whether `value` lies in one of the ranges.
    #[inline]
    pub fn has(&self, value: &D::Value) -> bool {
        self.search(value, &SearchOptions::new()).has()
    }

    /// Whether every value of `range` lies in a single range of the group.
    pub fn contains(&self, range: &Range<D::Value>) -> bool {
        if self.domain.is_empty(range) {
            return true;
        }
        let hit = self.search(
            range.start(),
            &SearchOptions::new().excl(range.is_start_exclusive()),
        );
        if !hit.has() {
            return false;
        }
        let holder = &self.ranges[hit.index()];
        self.domain
            .compare(
                CompareMode::End,
                range.end(),
                holder.end(),
                range.is_end_exclusive(),
                holder.is_end_exclusive(),
            )
            .side()
            != Ordering::Greater
    }

    /// Rewrites the group as the diff of itself against `other`.
    #[instrument(level = "trace", skip_all, fields(a = self.ranges.len(), b = other.ranges.len()))]
    pub fn diff(&mut self, other: &Self, options: &DiffOptions) -> &mut Self {
        let edits = diff::diff_to_edits(&self.domain, &self.ranges, &other.ranges, options);
        edits.apply(&mut self.ranges);
        self
    }

    #[instrument(level = "trace", skip_all, fields(a = self.ranges.len(), b = other.ranges.len()))]
    pub fn to_diff(&self, other: &Self, options: &DiffOptions) -> Self
    where
        D: Clone,
    {
        let ranges = if std::ptr::eq(self, other) {
            self.self_diff(options)
        } else {
            diff::diff_to_vec(&self.domain, &self.ranges, &other.ranges, options)
        };
        self.with_ranges(ranges)
    }

    /// Whether the diff against `other` would select anything.
    #[instrument(level = "trace", skip_all, fields(a = self.ranges.len(), b = other.ranges.len()))]
    pub fn has_diff(&self, other: &Self, options: &DiffOptions) -> bool {
        if std::ptr::eq(self, other) {
            return !self.is_empty() && options.filter.contains(Filter::AB);
        }
        diff::diff_is_nonempty(&self.domain, &self.ranges, &other.ranges, options)
    }

    #[inline]
    pub fn union(&mut self, other: &Self) -> &mut Self {
        self.diff(other, &DiffOptions::new(Filter::UNION))
    }

    #[inline]
    pub fn to_union(&self, other: &Self) -> Self
    where
        D: Clone,
    {
        self.to_diff(other, &DiffOptions::new(Filter::UNION))
    }

    #[inline]
    pub fn has_union(&self, other: &Self) -> bool {
        !self.is_empty() || !other.is_empty()
    }

    #[inline]
    pub fn intersect(&mut self, other: &Self) -> &mut Self {
        self.diff(other, &DiffOptions::new(Filter::INTERSECTION))
    }

    #[inline]
    pub fn to_intersect(&self, other: &Self) -> Self
    where
        D: Clone,
    {
        self.to_diff(other, &DiffOptions::new(Filter::INTERSECTION))
    }

    #[inline]
    pub fn has_intersection(&self, other: &Self) -> bool {
        self.has_diff(other, &DiffOptions::new(Filter::INTERSECTION))
    }

    #[inline]
    pub fn difference(&mut self, other: &Self) -> &mut Self {
        self.diff(other, &DiffOptions::new(Filter::DIFFERENCE))
    }

    #[inline]
    pub fn to_difference(&self, other: &Self) -> Self
    where
        D: Clone,
    {
        self.to_diff(other, &DiffOptions::new(Filter::DIFFERENCE))
    }

    #[inline]
    pub fn has_difference(&self, other: &Self) -> bool {
        self.has_diff(other, &DiffOptions::new(Filter::DIFFERENCE))
    }

    #[inline]
    pub fn symmetric_difference(&mut self, other: &Self) -> &mut Self {
        self.diff(other, &DiffOptions::new(Filter::SYMMETRIC_DIFFERENCE))
    }

    #[inline]
    pub fn to_symmetric_difference(&self, other: &Self) -> Self
    where
        D: Clone,
    {
        self.to_diff(other, &DiffOptions::new(Filter::SYMMETRIC_DIFFERENCE))
    }

    /// Groups of equal length are compared range by range instead of swept.
    pub fn has_symmetric_difference(&self, other: &Self) -> bool {
        if self.len() == other.len() {
            let same = |a: &Range<D::Value>, b: &Range<D::Value>| {
                self.domain
                    .compare(
                        CompareMode::Start,
                        a.start(),
                        b.start(),
                        a.is_start_exclusive(),
                        b.is_start_exclusive(),
                    )
                    .side()
                    == Ordering::Equal
                    && self
                        .domain
                        .compare(
                            CompareMode::End,
                            a.end(),
                            b.end(),
                            a.is_end_exclusive(),
                            b.is_end_exclusive(),
                        )
                        .side()
                        == Ordering::Equal
            };
            return !self.ranges.iter().zip(&other.ranges).all(|(a, b)| same(a, b));
        }
        self.has_diff(other, &DiffOptions::new(Filter::SYMMETRIC_DIFFERENCE))
    }

    #[inline]
    pub fn is_equal(&self, other: &Self) -> bool {
        !self.has_symmetric_difference(other)
    }

    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        !self.has_difference(other)
    }

    #[inline]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// A subset of `other` that leaves part of `other` uncovered.
    #[inline]
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        !self.has_difference(other) && other.has_difference(self)
    }

    #[inline]
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Every value of every range, in order or in reverse.
    #[inline]
    pub fn iterate(&self, reverse: bool) -> Values<'_, D>
    where
        D: DiscreteDomain,
    {
        Values {
            domain: &self.domain,
            ranges: self.ranges.iter(),
            reverse,
            current: None,
        }
    }

    #[inline]
    fn with_ranges(&self, ranges: Vec<Range<D::Value>>) -> Self
    where
        D: Clone,
    {
        Self {
            domain: self.domain.clone(),
            ranges,
        }
    }

    fn self_diff(&self, options: &DiffOptions) -> Vec<Range<D::Value>> {
        if !options.filter.contains(Filter::AB) {
            return Vec::new();
        }
        let tracking = options.track_sources && !options.self_union;
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut copy = self.domain.copy(r);
                if tracking {
                    copy.set_sources(Some(Sources::both(i, i)));
                }
                copy
            })
            .collect()
    }

    /// Compacts the kept, non-empty ranges to the front, merging each into
    /// its predecessor where they overlap or touch.
    fn retain_merged<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Range<D::Value>) -> bool,
    {
        let domain = &self.domain;
        let ranges = &mut self.ranges;
        let mut len = 0usize;
        for i in 0..ranges.len() {
            if !keep(&ranges[i]) || domain.is_empty(&ranges[i]) {
                continue;
            }
            if len > 0 {
                let (head, tail) = ranges.split_at_mut(i);
                if absorb(domain, &mut head[len - 1], &tail[0]) {
                    continue;
                }
            }
            ranges.swap(len, i);
            len += 1;
        }
        ranges.truncate(len);
    }

    fn merged<F>(&self, mut keep: F) -> Vec<Range<D::Value>>
    where
        F: FnMut(&Range<D::Value>) -> bool,
    {
        let mut out: Vec<Range<D::Value>> = Vec::with_capacity(self.ranges.len());
        for r in &self.ranges {
            if !keep(r) || self.domain.is_empty(r) {
                continue;
            }
            if let Some(last) = out.last_mut() {
                if absorb(&self.domain, last, r) {
                    continue;
                }
            }
            out.push(self.domain.copy(r));
        }
        out
    }
}

/// Extends `last` over `next` when the two overlap or touch.
#[inline]
fn absorb<D: Domain>(domain: &D, last: &mut Range<D::Value>, next: &Range<D::Value>) -> bool {
    let gap = domain.gap(
        last.end(),
        last.is_end_exclusive(),
        next.start(),
        next.is_start_exclusive(),
    );
    if gap == Gap::Separate {
        return false;
    }
    let ends = domain.compare(
        CompareMode::End,
        last.end(),
        next.end(),
        last.is_end_exclusive(),
        next.is_end_exclusive(),
    );
    if ends.side() == Ordering::Less {
        domain.set_end(last, next.end().clone(), next.is_end_exclusive());
    }
    true
}

/// Iterator over the values of a group, see [`RangeGroup::iterate`].
pub struct Values<'g, D: DiscreteDomain> {
    domain: &'g D,
    ranges: std::slice::Iter<'g, Range<D::Value>>,
    reverse: bool,
    current: Option<D::Iter>,
}

impl<D: DiscreteDomain> Iterator for Values<'_, D> {
    type Item = D::Value;

    fn next(&mut self) -> Option<D::Value> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                return Some(value);
            }
            let next = if self.reverse {
                self.ranges.next_back()
            } else {
                self.ranges.next()
            };
            let range = next?;
            self.current = Some(self.domain.iterate(range, self.reverse));
        }
    }
}

impl<D> Display for RangeGroup<D>
where
    D: Domain,
    D::Value: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranges.is_empty() {
            return write!(f, "∅");
        }
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, " ∪ ")?;
            }
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

impl<D: Domain + Clone> BitOr for &RangeGroup<D> {
    type Output = RangeGroup<D>;

    #[inline]
    fn bitor(self, rhs: Self) -> RangeGroup<D> {
        self.to_union(rhs)
    }
}

impl<D: Domain + Clone> BitAnd for &RangeGroup<D> {
    type Output = RangeGroup<D>;

    #[inline]
    fn bitand(self, rhs: Self) -> RangeGroup<D> {
        self.to_intersect(rhs)
    }
}

impl<D: Domain + Clone> Sub for &RangeGroup<D> {
    type Output = RangeGroup<D>;

    #[inline]
    fn sub(self, rhs: Self) -> RangeGroup<D> {
        self.to_difference(rhs)
    }
}

impl<D: Domain + Clone> BitXor for &RangeGroup<D> {
    type Output = RangeGroup<D>;

    #[inline]
    fn bitxor(self, rhs: Self) -> RangeGroup<D> {
        self.to_symmetric_difference(rhs)
    }
}

/// Step-by-step construction of a [`RangeGroup`].
///
/// # Examples
///
/// ```
/// use rangegroup::group::RangeGroup;
/// use rangegroup_core::domains::IntDomain;
///
/// let group = RangeGroup::builder()
///     .domain(IntDomain::<i64>::new())
///     .ranges(vec![(5, 9), (0, 4)])
///     .normalize(true)
///     .build()
///     .unwrap();
/// assert_eq!(group.to_string(), "[0, 9]");
/// ```
pub struct RangeGroupBuilder<D: Domain> {
    domain: Option<D>,
    ranges: Vec<Range<D::Value>>,
    normalize: bool,
}

impl<D: Domain> Default for RangeGroupBuilder<D> {
    fn default() -> Self {
        Self {
            domain: None,
            ranges: Vec::new(),
            normalize: false,
        }
    }
}

impl<D: Domain> RangeGroupBuilder<D> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn domain(mut self, domain: D) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Adds ranges; may be called repeatedly.
    #[inline]
    pub fn ranges(mut self, definition: impl Into<Definition<D::Value>>) -> Self {
        self.ranges.extend(definition.into().into_ranges());
        self
    }

    #[inline]
    pub fn normalize(mut self, on: bool) -> Self {
        self.normalize = on;
        self
    }

    pub fn build(self) -> Result<RangeGroup<D>, RangeGroupError> {
        let domain = self.domain.ok_or(RangeGroupError::MissingDomain)?;
        let mut group = RangeGroup::new(domain, self.ranges);
        if self.normalize {
            group.normalize();
        }
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use chrono::{DateTime, TimeZone, Utc};
    use rangegroup_core::domains::{
        DateDomain, IntDomain, IntNormDomain, RealDomain, TimeUnit, UnicodeDomain,
    };

    type Ints = RangeGroup<IntDomain<i32>>;

    fn ints(pairs: &[(i32, i32)]) -> Ints {
        RangeGroup::new(IntDomain::new(), pairs.to_vec())
    }

    fn scenario() -> (Ints, Ints) {
        (ints(&[(0, 10), (20, 30)]), ints(&[(6, 12), (17, 24)]))
    }

    fn random_ints(rng: &mut ChaCha8Rng) -> Ints {
        let count = rng.random_range(0..12);
        let pairs: Vec<_> = (0..count)
            .map(|_| {
                let start = rng.random_range(-5..60);
                (start, start + rng.random_range(-2..8))
            })
            .collect();
        RangeGroup::normalized(IntDomain::new(), pairs)
    }

    fn values(group: &Ints) -> Vec<i32> {
        group.iterate(false).collect()
    }

    #[test]
    fn test_set_operations() {
        let (a, b) = scenario();
        assert_eq!(a.to_union(&b).ranges(), ints(&[(0, 12), (17, 30)]).ranges());
        assert_eq!(a.to_intersect(&b).ranges(), ints(&[(6, 10), (20, 24)]).ranges());
        assert_eq!(
            a.to_difference(&b).ranges(),
            &[Range::new(0, 6, false, true), Range::new(24, 30, true, false)]
        );
        assert_eq!(
            a.to_symmetric_difference(&b).ranges(),
            &[
                Range::new(0, 6, false, true),
                Range::new(10, 12, true, false),
                Range::new(17, 20, false, true),
                Range::new(24, 30, true, false),
            ]
        );
    }

    #[test]
    fn test_in_place_matches_copy() {
        let (a, b) = scenario();
        let before = b.clone();

        let mut c = a.clone();
        c.union(&b);
        assert_eq!(c.ranges(), a.to_union(&b).ranges());

        let mut c = a.clone();
        c.intersect(&b);
        assert_eq!(c.ranges(), a.to_intersect(&b).ranges());

        let mut c = a.clone();
        c.difference(&b);
        assert_eq!(c.ranges(), a.to_difference(&b).ranges());

        let mut c = a.clone();
        c.symmetric_difference(&b);
        assert_eq!(c.ranges(), a.to_symmetric_difference(&b).ranges());

        assert_eq!(b.ranges(), before.ranges());
    }

    #[test]
    fn test_operators() {
        let (a, b) = scenario();
        assert_eq!((&a | &b).ranges(), a.to_union(&b).ranges());
        assert_eq!((&a & &b).ranges(), a.to_intersect(&b).ranges());
        assert_eq!((&a - &b).ranges(), a.to_difference(&b).ranges());
        assert_eq!((&a ^ &b).ranges(), a.to_symmetric_difference(&b).ranges());
    }

    #[test]
    fn test_adjacent_integers_union() {
        let a = ints(&[(0, 5)]);
        let b = ints(&[(6, 10)]);
        assert!(a.has_union(&b));
        assert_eq!(a.to_union(&b).ranges(), &[Range::closed(0, 10)]);
    }

    #[test]
    fn test_self_union_collapses() {
        let mut g = ints(&[
            (0, 5),
            (0, 0),
            (0, -2),
            (0, 3),
            (1, 2),
            (2, 5),
            (5, 5),
            (6, 5),
        ]);
        g.self_union();
        assert_eq!(g.ranges(), &[Range::closed(0, 5)]);
    }

    #[test]
    fn test_normalize_sorts_first() {
        let g = ints(&[(20, 25), (0, 3), (4, 8), (26, 26)]);
        assert!(!g.is_normalized());
        let n = g.to_normalized();
        assert_eq!(n.ranges(), ints(&[(0, 8), (20, 26)]).ranges());
        assert!(n.is_normalized());
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_size() {
        let g = ints(&[(5, 10), (15, 20), (25, 30), (35, 40)]);
        assert_eq!(g.size(), 24.0);
        let g = RangeGroup::new(RealDomain, vec![(0.0, 1.5), (2.0, 3.0)]);
        assert_eq!(g.size(), 2.5);
    }

    #[test]
    fn test_subsets() {
        let a = RangeGroup::new(
            IntDomain::<i32>::new(),
            vec![
                Range::new(0, 5, true, false),
                Range::new(10, 15, false, true),
                Range::closed(20, 30),
            ],
        );
        let b = ints(&[(1, 5), (10, 14), (20, 30)]);
        let c = ints(&[(1, 4), (10, 14), (20, 30)]);

        assert!(b.is_subset(&a));
        assert!(b.is_equal(&a));
        assert!(!b.is_proper_subset(&a));
        assert!(c.is_subset(&a));
        assert!(c.is_proper_subset(&a));
        assert!(a.is_proper_superset(&c));
        assert!(a.is_superset(&b));
        assert!(!a.is_subset(&c));
    }

    #[test]
    fn test_self_diff() {
        let (a, _) = scenario();
        assert_eq!(a.to_union(&a).ranges(), a.ranges());
        assert!(a.to_difference(&a).is_empty());
        assert!(!a.has_difference(&a));
        assert!(a.has_intersection(&a));
        let tracked = a.to_diff(&a, &DiffOptions::new(Filter::AB).track_sources(true));
        assert_eq!(tracked.ranges()[1].sources(), Some(Sources::both(1, 1)));
    }

    #[test]
    fn test_search_skip_to_empty_intersection() {
        let a = RangeGroup::new(
            IntDomain::<i32>::new(),
            (0..20).map(|i| (3 * i, 3 * i)).collect::<Vec<_>>(),
        );
        let b = ints(&[(100, 100)]);
        assert!(a.to_intersect(&b).is_empty());
        assert!(!a.has_intersection(&b));
    }

    #[test]
    fn test_membership() {
        let (a, _) = scenario();
        assert!(a.has(&0));
        assert!(a.has(&25));
        assert!(!a.has(&15));
        assert!(a.contains(&Range::closed(21, 29)));
        assert!(!a.contains(&Range::closed(9, 21)));
        assert!(!a.contains(&Range::new(10, 20, true, true)));
        assert!(a.contains(&Range::new(30, 30, true, false)));

        let empty = ints(&[]);
        let hit = empty.search(&3, &SearchOptions::new());
        assert_eq!((hit.index(), hit.has()), (0, false));
        assert_eq!(hit.start(), None);
        assert_eq!(hit.end(), None);
    }

    #[test]
    fn test_filter() {
        let mut g = ints(&[(0, 2), (4, 9), (12, 13)]);
        let wide = |r: &Range<i32>| r.end() - r.start() > 2;
        assert!(g.has_filter(wide));
        assert_eq!(g.to_filtered(wide).ranges(), &[Range::closed(4, 9)]);
        g.filter(|r| *r.start() > 100);
        assert!(g.is_empty());
        assert!(!g.has_filter(|_| true));
    }

    #[test]
    fn test_iterate_both_ways() {
        let g = ints(&[(0, 2), (5, 6)]);
        assert_eq!(values(&g), vec![0, 1, 2, 5, 6]);
        assert_eq!(g.iterate(true).collect::<Vec<_>>(), vec![6, 5, 2, 1, 0]);
        assert_eq!(values(&g), values(&g));
    }

    #[test]
    fn test_display_and_clear() {
        let (a, b) = scenario();
        assert_eq!((&a - &b).to_string(), "[0, 6) ∪ (24, 30]");
        assert_eq!(a.to_cleared().to_string(), "∅");
        let mut c = a.clone();
        c.clear();
        assert!(c.is_empty());
        assert!(!a.is_empty());
    }

    #[test]
    fn test_normalizing_domain_construction() {
        let g = RangeGroup::new(IntNormDomain::<i32>::new(), (0, 10, true, true));
        assert_eq!(g.ranges(), &[Range::closed(1, 9)]);
    }

    #[test]
    fn test_builder() {
        let built = RangeGroupBuilder::<IntDomain<i32>>::new()
            .ranges((0, 1))
            .build();
        assert_eq!(built.err(), Some(RangeGroupError::MissingDomain));

        let g = RangeGroup::builder()
            .domain(IntDomain::<i32>::new())
            .ranges([(8, 9), (1, 3)])
            .ranges(Range::closed(2, 6))
            .normalize(true)
            .build()
            .unwrap();
        assert_eq!(g.ranges(), ints(&[(1, 6), (8, 9)]).ranges());
    }

    #[test]
    fn test_shared_domain() {
        let domain = std::sync::Arc::new(IntDomain::<i32>::new());
        let a = RangeGroup::new(domain.clone(), vec![(0, 4)]);
        let b = RangeGroup::new(domain, vec![(3, 8)]);
        assert_eq!((&a | &b).ranges(), &[Range::closed(0, 8)]);
    }

    #[test]
    fn test_random_laws() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let a = random_ints(&mut rng);
            let b = random_ints(&mut rng);
            assert!(a.is_normalized());
            assert_eq!(a.to_normalized().ranges(), a.ranges());

            let union = a.to_union(&b);
            assert!(union.is_normalized());
            let mut want: Vec<i32> = values(&a).into_iter().chain(values(&b)).collect();
            want.sort_unstable();
            want.dedup();
            assert_eq!(values(&union), want);

            assert!(a.is_subset(&union));
            assert!(b.is_subset(&union));
            assert!(a.is_equal(&a));
            assert_eq!(a.is_equal(&b), values(&a) == values(&b));

            for v in -8..70 {
                let member = values(&a).contains(&v);
                assert_eq!(a.has(&v), member, "{a} at {v}");
                let plain = a.search(&v, &SearchOptions::new());
                let before = a.search(&(v - 1), &SearchOptions::new().excl(true));
                let after = a.search(&(v + 1), &SearchOptions::new().end(true).excl(true));
                assert_eq!((before.index(), before.has()), (plain.index(), plain.has()));
                assert_eq!((after.index(), after.has()), (plain.index(), plain.has()));
            }
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_date_days_merge() {
        let domain = DateDomain::new(TimeUnit::Day);
        let a = RangeGroup::new(domain, vec![(day(1), day(3)), (day(10), day(12))]);
        let b = RangeGroup::new(domain, (day(4), day(6)));
        let u = a.to_union(&b);
        assert_eq!(u.len(), 2);
        // bounds are floored to the day
        assert_eq!(
            *u.ranges()[0].end(),
            Utc.with_ymd_and_hms(2025, 3, 6, 0, 0, 0).unwrap()
        );
        assert_eq!(u.size(), 9.0);
        assert!(u.has(&Utc.with_ymd_and_hms(2025, 3, 5, 23, 59, 0).unwrap()));
    }

    #[test]
    fn test_unicode_ranges() {
        let domain = UnicodeDomain::new();
        let a = RangeGroup::new(
            domain,
            vec![("ka".to_string(), "kc".to_string()), ("kx".into(), "kz".into())],
        );
        let b = RangeGroup::new(domain, ("kd".to_string(), "kf".to_string()));
        let u = a.to_union(&b);
        let all: Vec<String> = u.iterate(false).collect();
        assert_eq!(all, ["ka", "kb", "kc", "kd", "ke", "kf", "kx", "ky", "kz"]);
        assert!(a.to_intersect(&b).is_empty());
    }
}
