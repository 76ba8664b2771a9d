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

//! The diff sweep behind every set operation.
//!
//! Both operands are walked once, front to back, with a cursor each. At every
//! step the range that starts first leads:
//!
//! - If it ends before the other operand's range begins, it belongs wholly to
//!   its own region (`a` or `b`) and is passed through or dropped.
//! - If it merely touches the other range and both `a` and `b` are selected,
//!   the two are fused into one output range.
//! - Otherwise the two ranges overlap and split into an `x` piece before the
//!   overlap, the shared `y` piece and a `z` piece after it. The `z` piece may
//!   still overlap later ranges of the other operand, so it stays pending
//!   until its end is known.
//!
//! When one operand has many more ranges left than the cutoff, the sweep
//! searches that operand for the next range that can intersect instead of
//! stepping to it, and passes or drops the skipped run as a block.
//!
//! Where results go is decided by an [`Output`]: a probe that only asks
//! whether anything is selected, a fresh vector, or an edit batch that is
//! applied to operand A afterwards.

use crate::{
    edit::EditBatch,
    options::{DiffOptions, Filter, SearchOptions},
    search::search_ranges,
};
use rangegroup_core::{
    compare::{CompareMode, Gap},
    domain::Domain,
    primitives::{Range, Sources},
};
use std::{cmp::Ordering, ops::Range as Span};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    A,
    B,
}

impl Side {
    #[inline]
    fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    #[inline]
    fn region(self) -> Filter {
        match self {
            Side::A => Filter::A,
            Side::B => Filter::B,
        }
    }

    #[inline]
    fn sources_at(self, index: usize) -> Sources {
        match self {
            Side::A => Sources::only_a(index),
            Side::B => Sources::only_b(index),
        }
    }
}

/// Operands an output range is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Only(Side),
    Both,
}

impl Origin {
    /// The operand whose current range provides the end bound.
    #[inline]
    fn side(self) -> Side {
        match self {
            Origin::Only(side) => side,
            Origin::Both => Side::A,
        }
    }
}

/// Pieces of an overlap that are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segments(u8);

impl Segments {
    const NONE: Segments = Segments(0);
    const X: Segments = Segments(0b001);
    const Y: Segments = Segments(0b010);
    const Z: Segments = Segments(0b100);

    #[inline]
    fn contains(self, other: Segments) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    fn insert(&mut self, other: Segments) {
        self.0 |= other.0;
    }

    #[inline]
    fn next(self) -> Segments {
        Segments(self.0 << 1)
    }
}

/// Receives the ranges a sweep produces.
pub(crate) trait Output<T: Clone> {
    /// Set for outputs that only care whether anything is selected; the sweep
    /// then stops at the first selected value.
    const PROBE: bool = false;

    /// Takes a newly built range.
    fn push(&mut self, range: Range<T>);

    /// Takes an existing operand range, overwriting its provenance when
    /// `sources` is given.
    fn pass<D>(
        &mut self,
        domain: &D,
        side: Side,
        index: usize,
        range: &Range<T>,
        sources: Option<Sources>,
    ) where
        D: Domain<Value = T> + ?Sized;

    /// Takes a run of existing operand ranges.
    fn pass_run<D>(
        &mut self,
        domain: &D,
        side: Side,
        ranges: &[Range<T>],
        span: Span<usize>,
        track_sources: bool,
    ) where
        D: Domain<Value = T> + ?Sized,
    {
        pass_each(self, domain, side, ranges, span, track_sources);
    }
}

#[inline]
fn pass_each<T, O, D>(
    out: &mut O,
    domain: &D,
    side: Side,
    ranges: &[Range<T>],
    span: Span<usize>,
    track_sources: bool,
) where
    T: Clone,
    O: Output<T> + ?Sized,
    D: Domain<Value = T> + ?Sized,
{
    for index in span {
        let sources = track_sources.then(|| side.sources_at(index));
        out.pass(domain, side, index, &ranges[index], sources);
    }
}

#[inline]
fn copied<D>(domain: &D, range: &Range<D::Value>, sources: Option<Sources>) -> Range<D::Value>
where
    D: Domain + ?Sized,
{
    let mut copy = domain.copy(range);
    if sources.is_some() {
        copy.set_sources(sources);
    }
    copy
}

/// Output of a boolean-only sweep.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Probe;

impl<T: Clone> Output<T> for Probe {
    const PROBE: bool = true;

    #[inline]
    fn push(&mut self, _: Range<T>) {}

    #[inline]
    fn pass<D>(&mut self, _: &D, _: Side, _: usize, _: &Range<T>, _: Option<Sources>)
    where
        D: Domain<Value = T> + ?Sized,
    {
    }

    #[inline]
    fn pass_run<D>(&mut self, _: &D, _: Side, _: &[Range<T>], _: Span<usize>, _: bool)
    where
        D: Domain<Value = T> + ?Sized,
    {
    }
}

impl<T: Clone> Output<T> for Vec<Range<T>> {
    #[inline]
    fn push(&mut self, range: Range<T>) {
        Vec::push(self, range);
    }

    #[inline]
    fn pass<D>(&mut self, domain: &D, _: Side, _: usize, range: &Range<T>, sources: Option<Sources>)
    where
        D: Domain<Value = T> + ?Sized,
    {
        Vec::push(self, copied(domain, range, sources));
    }
}

impl<T: Clone> Output<T> for EditBatch<T> {
    #[inline]
    fn push(&mut self, range: Range<T>) {
        self.insert(range);
    }

    #[inline]
    fn pass<D>(&mut self, domain: &D, side: Side, index: usize, range: &Range<T>, sources: Option<Sources>)
    where
        D: Domain<Value = T> + ?Sized,
    {
        match side {
            Side::A => self.keep(index, sources),
            Side::B => self.insert(copied(domain, range, sources)),
        }
    }

    fn pass_run<D>(
        &mut self,
        domain: &D,
        side: Side,
        ranges: &[Range<T>],
        span: Span<usize>,
        track_sources: bool,
    ) where
        D: Domain<Value = T> + ?Sized,
    {
        if side == Side::A && !track_sources {
            self.keep_run(span);
        } else {
            pass_each(self, domain, side, ranges, span, track_sources);
        }
    }
}

struct Cursor<'g, T> {
    ranges: &'g [Range<T>],
    idx: usize,
}

impl<'g, T> Cursor<'g, T> {
    #[inline]
    fn new(ranges: &'g [Range<T>]) -> Self {
        Self { ranges, idx: 0 }
    }

    #[inline]
    fn current(&self) -> &'g Range<T> {
        &self.ranges[self.idx]
    }

    #[inline]
    fn has_current(&self) -> bool {
        self.idx < self.ranges.len()
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.ranges.len().saturating_sub(self.idx)
    }

    /// Moves forward `n` ranges; returns whether any are left.
    #[inline]
    fn advance(&mut self, n: usize) -> bool {
        self.idx = self.idx.saturating_add(n).min(self.ranges.len());
        self.has_current()
    }
}

/// A range whose start is known and whose end is still being extended.
#[derive(Debug, Clone)]
struct Pending<T> {
    start: T,
    start_excl: bool,
}

/// How the leading range relates to the other operand's current range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Disjoint { adjacent: bool },
    Overlap,
}

enum Located {
    /// A probe found a selected value.
    Selected,
    Exhausted,
    At {
        lead: Side,
        starts_differ: bool,
        step: Step,
    },
}

enum Next {
    Selected,
    Exhausted,
    Continue(Option<Side>),
}

struct Sweep<'g, D: Domain + ?Sized, O> {
    domain: &'g D,
    a: Cursor<'g, D::Value>,
    b: Cursor<'g, D::Value>,
    filter: Filter,
    track_sources: bool,
    self_union: bool,
    cutoff: usize,
    pending: Option<Pending<D::Value>>,
    out: O,
}

impl<'g, D, O> Sweep<'g, D, O>
where
    D: Domain + ?Sized,
    O: Output<D::Value>,
{
    fn new(
        domain: &'g D,
        a: &'g [Range<D::Value>],
        b: &'g [Range<D::Value>],
        options: &DiffOptions,
        out: O,
    ) -> Self {
        Self {
            domain,
            a: Cursor::new(a),
            b: Cursor::new(b),
            filter: options.filter,
            track_sources: options.track_sources && !options.self_union,
            self_union: options.self_union,
            cutoff: options.interpolation_cutoff,
            pending: None,
            out,
        }
    }

    fn run(mut self) -> (bool, O) {
        let found = self.sweep();
        debug_assert!(self.pending.is_none());
        (found, self.out)
    }

    #[inline]
    fn cursor(&self, side: Side) -> &Cursor<'g, D::Value> {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    #[inline]
    fn cursor_mut(&mut self, side: Side) -> &mut Cursor<'g, D::Value> {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    #[inline]
    fn sources(&self, origin: Origin) -> Option<Sources> {
        if !self.track_sources {
            return None;
        }
        Some(match origin {
            Origin::Only(side) => side.sources_at(self.cursor(side).idx),
            Origin::Both => Sources::both(self.a.idx, self.b.idx),
        })
    }

    #[inline]
    fn open(&self, value: &D::Value, excl: bool) -> Pending<D::Value> {
        let (start, start_excl) = self.domain.start_bound(value.clone(), excl);
        Pending { start, start_excl }
    }

    fn close_with(&mut self, pending: Pending<D::Value>, end: &D::Value, end_excl: bool, origin: Origin) {
        let (end, end_excl) = self.domain.end_bound(end.clone(), end_excl);
        let range = Range::new(pending.start, end, pending.start_excl, end_excl)
            .with_sources(self.sources(origin));
        self.out.push(range);
    }

    /// Ends the current range of `origin`'s side: closes the pending range at
    /// its end, or passes it through untouched.
    fn close_range(&mut self, origin: Origin) {
        let side = origin.side();
        let current = self.cursor(side).current();
        match self.pending.take() {
            Some(pending) => {
                self.close_with(pending, current.end(), current.is_end_exclusive(), origin);
            }
            None => {
                let sources = self.sources(origin);
                let index = self.cursor(side).idx;
                self.out.pass(self.domain, side, index, current, sources);
            }
        }
    }

    /// Passes `count` ranges of `side` through; returns whether any are left.
    fn pass_run(&mut self, side: Side, count: usize) -> bool {
        let cursor = self.cursor(side);
        let (ranges, from) = (cursor.ranges, cursor.idx);
        let to = from.saturating_add(count).min(ranges.len());
        self.out
            .pass_run(self.domain, side, ranges, from..to, self.track_sources);
        self.cursor_mut(side).advance(to - from)
    }

    fn check_gap(&self, lead: Side) -> Step {
        let first = self.cursor(lead).current();
        let next = self.cursor(lead.other()).current();
        match self.domain.gap(
            first.end(),
            first.is_end_exclusive(),
            next.start(),
            next.is_start_exclusive(),
        ) {
            Gap::Overlapping => Step::Overlap,
            Gap::Adjacent => Step::Disjoint { adjacent: true },
            Gap::Separate => Step::Disjoint { adjacent: false },
        }
    }

    /// Works out which current range starts first and how it relates to the
    /// other one, skipping runs that cannot intersect.
    fn locate(&mut self, merge_adjacent: bool) -> Located {
        let long = if self.b.remaining() >= self.a.remaining() {
            Side::B
        } else {
            Side::A
        };
        if self.cursor(long).remaining() <= self.cutoff {
            let (a, b) = (self.a.current(), self.b.current());
            let side = self
                .domain
                .compare(
                    CompareMode::Start,
                    a.start(),
                    b.start(),
                    a.is_start_exclusive(),
                    b.is_start_exclusive(),
                )
                .side();
            let lead = if side == Ordering::Greater {
                Side::B
            } else {
                Side::A
            };
            if side == Ordering::Equal {
                return Located::At {
                    lead,
                    starts_differ: false,
                    step: Step::Overlap,
                };
            }
            return Located::At {
                lead,
                starts_differ: true,
                step: self.check_gap(lead),
            };
        }

        let probe = self.cursor(long.other()).current();
        let cursor = self.cursor(long);
        let (ranges, from) = (cursor.ranges, cursor.idx);
        let options = SearchOptions::new()
            .excl(probe.is_start_exclusive())
            .first(from);
        let hit = search_ranges(self.domain, ranges, probe.start(), &options);
        let adjacent = merge_adjacent && !hit.has() && hit.index() > from && {
            let before = &ranges[hit.index() - 1];
            self.domain.gap(
                before.end(),
                before.is_end_exclusive(),
                probe.start(),
                probe.is_start_exclusive(),
            ) == Gap::Adjacent
        };

        let trim_to = hit.index() - usize::from(adjacent);
        if trim_to != from {
            let count = trim_to - from;
            trace!(count, side = ?long, "skipping ranges found by search");
            let more = if self.filter.contains(long.region()) {
                if O::PROBE {
                    return Located::Selected;
                }
                self.pass_run(long, count)
            } else {
                self.cursor_mut(long).advance(count)
            };
            if !more {
                return Located::Exhausted;
            }
        }
        if adjacent {
            return Located::At {
                lead: long,
                starts_differ: true,
                step: Step::Disjoint { adjacent: true },
            };
        }

        let Some(start) = hit.start() else {
            return Located::Exhausted;
        };
        // orient as A relative to B
        let side = match long {
            Side::B => start.side(),
            Side::A => start.side().reverse(),
        };
        let lead = if side == Ordering::Greater {
            Side::B
        } else {
            Side::A
        };
        let step = if hit.has() {
            Step::Overlap
        } else {
            self.check_gap(lead)
        };
        Located::At {
            lead,
            starts_differ: side != Ordering::Equal,
            step,
        }
    }

    /// Takes the start of a selected overlap segment: the pending range when
    /// there is one, otherwise the segment's own start bound. Returns `None`
    /// when the segment is not selected, or when it fuses with the next one.
    fn segment_start(
        &mut self,
        segment: Segments,
        lead: Side,
        selected: Segments,
    ) -> Option<Pending<D::Value>> {
        if !selected.contains(segment) {
            return None;
        }
        let merge_next = self.self_union && selected.contains(segment.next());
        let base = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let from = if segment == Segments::X {
                    lead
                } else {
                    lead.other()
                };
                let r = self.cursor(from).current();
                self.open(r.start(), r.is_start_exclusive())
            }
        };
        if merge_next {
            self.pending = Some(base);
            None
        } else {
            Some(base)
        }
    }

    fn overlap(&mut self, lead: Side, starts_differ: bool) -> Next {
        let ab = self.filter.contains(Filter::AB);
        if O::PROBE && ab {
            return Next::Selected;
        }
        // the result is A's range unchanged
        let mut pass_through = ab;
        let mut selected = if ab { Segments::Y } else { Segments::NONE };

        if starts_differ {
            if self.filter.contains(lead.region()) {
                if O::PROBE {
                    return Next::Selected;
                }
                selected.insert(Segments::X);
                if !self.self_union || lead == Side::B {
                    pass_through = false;
                }
            } else if lead == Side::A {
                pass_through = false;
            }
        }

        let (a, b) = (self.a.current(), self.b.current());
        let ends = self
            .domain
            .compare(
                CompareMode::End,
                a.end(),
                b.end(),
                a.is_end_exclusive(),
                b.is_end_exclusive(),
            )
            .side();
        let trail = if ends == Ordering::Less {
            Side::B
        } else {
            Side::A
        };
        if ends != Ordering::Equal {
            if self.filter.contains(trail.region()) {
                if O::PROBE {
                    return Next::Selected;
                }
                selected.insert(Segments::Z);
                if !self.self_union || trail == Side::B {
                    pass_through = false;
                }
            } else if trail == Side::A {
                pass_through = false;
            }
        }

        if !pass_through {
            if let Some(base) = self.segment_start(Segments::X, lead, selected) {
                let end = self.cursor(lead.other()).current();
                self.close_with(base, end.start(), !end.is_start_exclusive(), Origin::Only(lead));
            }
            if let Some(base) = self.segment_start(Segments::Y, lead, selected) {
                let end = self.cursor(trail.other()).current();
                self.close_with(base, end.end(), end.is_end_exclusive(), Origin::Both);
            }
            if selected.contains(Segments::Z) && self.pending.is_none() {
                let start = self.cursor(trail.other()).current();
                self.pending = Some(self.open(start.end(), !start.is_end_exclusive()));
            }
        } else if ends != Ordering::Greater {
            let origin = if self.self_union {
                Origin::Only(Side::A)
            } else {
                Origin::Both
            };
            self.close_range(origin);
        }

        if ends != Ordering::Equal {
            if !self.cursor_mut(trail.other()).advance(1) {
                return Next::Exhausted;
            }
            return Next::Continue(Some(trail));
        }
        let a_more = self.a.advance(1);
        let b_more = self.b.advance(1);
        if a_more && b_more {
            Next::Continue(None)
        } else {
            Next::Exhausted
        }
    }

    /// Returns whether a probe found anything selected.
    fn sweep(&mut self) -> bool {
        if self.a.has_current() && self.b.has_current() {
            let merge_adjacent = self.self_union && self.filter.contains(Filter::A | Filter::B);
            let mut lead: Option<Side> = None;
            let mut starts_differ = false;
            loop {
                let (first, step) = match lead {
                    Some(side) => (side, self.check_gap(side)),
                    None => match self.locate(merge_adjacent) {
                        Located::Selected => return true,
                        Located::Exhausted => break,
                        Located::At {
                            lead,
                            starts_differ: differ,
                            step,
                        } => {
                            starts_differ = differ;
                            (lead, step)
                        }
                    },
                };

                match step {
                    Step::Disjoint { adjacent } => {
                        if adjacent && merge_adjacent {
                            if O::PROBE {
                                return true;
                            }
                            if self.pending.is_none() {
                                let r = self.cursor(first).current();
                                self.pending = Some(self.open(r.start(), r.is_start_exclusive()));
                            }
                        } else if self.filter.contains(first.region()) {
                            if O::PROBE {
                                return true;
                            }
                            self.close_range(Origin::Only(first));
                        }
                        if !self.cursor_mut(first).advance(1) {
                            break;
                        }
                        // the next range of `first` starts after the other's
                        lead = adjacent.then(|| first.other());
                        starts_differ = true;
                    }
                    Step::Overlap => match self.overlap(first, starts_differ) {
                        Next::Selected => return true,
                        Next::Exhausted => break,
                        Next::Continue(next) => {
                            lead = next;
                            starts_differ = true;
                        }
                    },
                }
            }
        }

        let side = if self.b.has_current() {
            Side::B
        } else if self.a.has_current() {
            Side::A
        } else {
            return false;
        };
        let include = self.filter.contains(side.region());
        if O::PROBE {
            return include;
        }
        if include {
            if self.pending.is_some() {
                self.close_range(Origin::Only(side));
                if !self.cursor_mut(side).advance(1) {
                    return false;
                }
            }
            let rest = self.cursor(side).remaining();
            self.pass_run(side, rest);
        }
        false
    }
}

/// Whether `ranges` are sorted, non-empty and free of overlaps.
pub(crate) fn are_invariants_held<D>(domain: &D, ranges: &[Range<D::Value>]) -> bool
where
    D: Domain + ?Sized,
{
    ranges.iter().all(|r| !domain.is_empty(r))
        && ranges.windows(2).all(|w| {
            domain.gap(
                w[0].end(),
                w[0].is_end_exclusive(),
                w[1].start(),
                w[1].is_start_exclusive(),
            ) != Gap::Overlapping
        })
}

/// Diffs `a` against `b` into a new vector.
pub(crate) fn diff_to_vec<D>(
    domain: &D,
    a: &[Range<D::Value>],
    b: &[Range<D::Value>],
    options: &DiffOptions,
) -> Vec<Range<D::Value>>
where
    D: Domain + ?Sized,
{
    debug_assert!(are_invariants_held(domain, a) && are_invariants_held(domain, b));
    let out = Vec::with_capacity(a.len().max(b.len()));
    Sweep::new(domain, a, b, options, out).run().1
}

/// Diffs `a` against `b` as a batch of edits to apply to `a`.
pub(crate) fn diff_to_edits<D>(
    domain: &D,
    a: &[Range<D::Value>],
    b: &[Range<D::Value>],
    options: &DiffOptions,
) -> EditBatch<D::Value>
where
    D: Domain + ?Sized,
{
    debug_assert!(are_invariants_held(domain, a) && are_invariants_held(domain, b));
    Sweep::new(domain, a, b, options, EditBatch::new()).run().1
}

/// Whether diffing `a` against `b` would select anything.
pub(crate) fn diff_is_nonempty<D>(
    domain: &D,
    a: &[Range<D::Value>],
    b: &[Range<D::Value>],
    options: &DiffOptions,
) -> bool
where
    D: Domain + ?Sized,
{
    debug_assert!(are_invariants_held(domain, a) && are_invariants_held(domain, b));
    Sweep::new(domain, a, b, options, Probe).run().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use crate::options::DEFAULT_INTERPOLATION_CUTOFF;
    use rangegroup_core::domains::{Epsilon, IntDomain, IntNormDomain, RealDomain};

    const UNIVERSE: i32 = 200;

    fn closed(pairs: &[(i32, i32)]) -> Vec<Range<i32>> {
        pairs.iter().map(|&(s, e)| Range::closed(s, e)).collect()
    }

    fn holds(r: &Range<i32>, v: i32) -> bool {
        let lo = if r.is_start_exclusive() { *r.start() + 1 } else { *r.start() };
        let hi = if r.is_end_exclusive() { *r.end() - 1 } else { *r.end() };
        lo <= v && v <= hi
    }

    fn contains(ranges: &[Range<i32>], v: i32) -> bool {
        ranges.iter().any(|r| holds(r, v))
    }

    fn random_group(rng: &mut ChaCha8Rng) -> Vec<Range<i32>> {
        let domain = IntDomain::<i32>::new();
        let mut out = Vec::new();
        let mut cursor = rng.random_range(0..6);
        let count = rng.random_range(0..16);
        for _ in 0..count {
            let start = cursor;
            let end = start + rng.random_range(0..5);
            let range = Range::new(start, end, rng.random_bool(0.3), rng.random_bool(0.3));
            let range = if domain.is_empty(&range) {
                Range::closed(start, end)
            } else {
                range
            };
            out.push(range);
            cursor = end + rng.random_range(2..6);
        }
        out
    }

    fn expected(a: &[Range<i32>], b: &[Range<i32>], filter: Filter) -> Vec<i32> {
        (-2..UNIVERSE)
            .filter(|&v| {
                let region = match (contains(a, v), contains(b, v)) {
                    (true, false) => Filter::A,
                    (false, true) => Filter::B,
                    (true, true) => Filter::AB,
                    (false, false) => return false,
                };
                filter.contains(region)
            })
            .collect()
    }

    fn is_canonical<D: Domain>(domain: &D, ranges: &[Range<D::Value>]) -> bool {
        ranges.windows(2).all(|w| {
            domain.gap(
                w[0].end(),
                w[0].is_end_exclusive(),
                w[1].start(),
                w[1].is_start_exclusive(),
            ) == Gap::Separate
        })
    }

    fn members(ranges: &[Range<i32>]) -> Vec<i32> {
        (-2..UNIVERSE).filter(|&v| contains(ranges, v)).collect()
    }

    fn check_provenance(a: &[Range<i32>], b: &[Range<i32>], out: &[Range<i32>]) {
        for r in out {
            let sources = r.sources().unwrap_or_default();
            for v in (-2..UNIVERSE).filter(|&v| holds(r, v)) {
                assert_eq!(sources.a().is_some(), contains(a, v), "{r} at {v}");
                assert_eq!(sources.b().is_some(), contains(b, v), "{r} at {v}");
                if let Some(i) = sources.a() {
                    assert!(holds(&a[i], v));
                }
                if let Some(j) = sources.b() {
                    assert!(holds(&b[j], v));
                }
            }
        }
    }

    #[test]
    fn test_sweep_matches_membership_model() {
        let domain = IntDomain::<i32>::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..150 {
            let a = random_group(&mut rng);
            let b = random_group(&mut rng);
            for bits in 1..=7u8 {
                let filter = Filter::from_bits(bits).unwrap();
                let want = expected(&a, &b, filter);
                for cutoff in [0, DEFAULT_INTERPOLATION_CUTOFF] {
                    for (tracking, merging) in [(false, true), (false, false), (true, false)] {
                        let opts = DiffOptions::new(filter)
                            .interpolation_cutoff(cutoff)
                            .track_sources(tracking)
                            .self_union(merging);

                        let copy = diff_to_vec(&domain, &a, &b, &opts);
                        assert_eq!(members(&copy), want, "a={a:?} b={b:?} filter={bits:03b}");
                        assert!(are_invariants_held(&domain, &copy));
                        if tracking {
                            check_provenance(&a, &b, &copy);
                        } else if merging {
                            assert!(is_canonical(&domain, &copy));
                        }

                        let mut edited = a.clone();
                        diff_to_edits(&domain, &a, &b, &opts).apply(&mut edited);
                        assert_eq!(edited, copy);

                        assert_eq!(diff_is_nonempty(&domain, &a, &b, &opts), !want.is_empty());
                    }
                }
            }
        }
    }

    fn real(pairs: &[(f64, f64)]) -> Vec<Range<f64>> {
        pairs.iter().map(|&(s, e)| Range::closed(s, e)).collect()
    }

    #[test]
    fn test_real_operations() {
        let domain = RealDomain;
        let a = real(&[(0.0, 10.0), (20.0, 30.0)]);
        let b = real(&[(6.0, 12.0), (17.0, 24.0)]);
        let run = |filter| diff_to_vec(&domain, &a, &b, &DiffOptions::new(filter));

        assert_eq!(run(Filter::UNION), real(&[(0.0, 12.0), (17.0, 30.0)]));
        assert_eq!(run(Filter::INTERSECTION), real(&[(6.0, 10.0), (20.0, 24.0)]));
        assert_eq!(
            run(Filter::DIFFERENCE),
            vec![
                Range::new(0.0, 6.0, false, true),
                Range::new(24.0, 30.0, true, false),
            ]
        );
        assert_eq!(
            run(Filter::SYMMETRIC_DIFFERENCE),
            vec![
                Range::new(0.0, 6.0, false, true),
                Range::new(10.0, 12.0, true, false),
                Range::new(17.0, 20.0, false, true),
                Range::new(24.0, 30.0, true, false),
            ]
        );
    }

    #[test]
    fn test_real_touching_bounds() {
        let domain = RealDomain;
        let opts = DiffOptions::new(Filter::UNION);

        let a = vec![Range::closed(0.0, 5.0)];
        let b = vec![Range::new(5.0, 8.0, true, false)];
        assert_eq!(diff_to_vec(&domain, &a, &b, &opts), real(&[(0.0, 8.0)]));

        // both sides exclude 5.0, so it stays out
        let a = vec![Range::new(0.0, 5.0, false, true)];
        let out = diff_to_vec(&domain, &a, &b, &opts);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_epsilon_real_touching_bounds() {
        let domain = Epsilon::new(RealDomain, 1e-9);
        let opts = DiffOptions::new(Filter::UNION);

        let a = vec![Range::new(0.0, 5.0, false, true)];
        let b = vec![Range::new(5.0, 8.0, true, false)];
        assert_eq!(diff_to_vec(&domain, &a, &b, &opts), [a[0].clone(), b[0].clone()]);

        // a rounding error apart still merges
        let b = vec![Range::closed(5.0 + 1e-12, 8.0)];
        let out = diff_to_vec(&domain, &[Range::closed(0.0, 5.0)], &b, &opts);
        assert_eq!(out.len(), 1);
        assert_eq!(*out[0].end(), 8.0);
    }

    #[test]
    fn test_adjacent_integers_merge() {
        let domain = IntDomain::<i32>::new();
        let out = diff_to_vec(
            &domain,
            &closed(&[(0, 5)]),
            &closed(&[(6, 10)]),
            &DiffOptions::new(Filter::UNION),
        );
        assert_eq!(out, closed(&[(0, 10)]));
    }

    #[test]
    fn test_normalizing_domain_builds_inclusive_bounds() {
        let domain = IntNormDomain::<i32>::new();
        let out = diff_to_vec(
            &domain,
            &closed(&[(0, 10)]),
            &closed(&[(4, 6)]),
            &DiffOptions::new(Filter::DIFFERENCE),
        );
        assert_eq!(out, closed(&[(0, 3), (7, 10)]));
    }

    #[test]
    fn test_search_skips_long_runs() {
        let domain = IntDomain::<i32>::new();
        let a: Vec<_> = (0..20).map(|i| Range::closed(3 * i, 3 * i)).collect();
        let b = closed(&[(100, 100)]);

        let opts = DiffOptions::new(Filter::INTERSECTION).interpolation_cutoff(2);
        assert!(diff_to_vec(&domain, &a, &b, &opts).is_empty());
        assert!(!diff_is_nonempty(&domain, &a, &b, &opts));

        let opts = DiffOptions::new(Filter::DIFFERENCE).interpolation_cutoff(2);
        assert_eq!(diff_to_vec(&domain, &a, &b, &opts), a);
        let mut edited = a.clone();
        diff_to_edits(&domain, &a, &b, &opts).apply(&mut edited);
        assert_eq!(edited, a);
    }

    #[test]
    fn test_tracked_intersection_points_at_operands() {
        let domain = IntDomain::<i32>::new();
        let a = closed(&[(0, 10), (20, 30)]);
        let b = closed(&[(6, 12), (17, 24)]);
        let opts = DiffOptions::new(Filter::INTERSECTION).track_sources(true);
        let out = diff_to_vec(&domain, &a, &b, &opts);
        let sources: Vec<_> = out.iter().map(|r| r.sources()).collect();
        assert_eq!(
            sources,
            vec![Some(Sources::both(0, 0)), Some(Sources::both(1, 1))]
        );
    }

    #[test]
    fn test_empty_operands() {
        let domain = IntDomain::<i32>::new();
        let a = closed(&[(0, 4)]);
        let none: Vec<Range<i32>> = Vec::new();
        assert_eq!(diff_to_vec(&domain, &a, &none, &DiffOptions::default()), a);
        assert_eq!(diff_to_vec(&domain, &none, &a, &DiffOptions::default()), a);
        assert!(diff_to_vec(&domain, &none, &a, &DiffOptions::new(Filter::A)).is_empty());
        assert!(!diff_is_nonempty(&domain, &none, &none, &DiffOptions::default()));
    }
}
