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

//! Batched edits against a group's own range vector.
//!
//! An in-place diff reads the receiver's ranges while it decides what the
//! result looks like, so it cannot restructure the vector as it goes.
//! Instead it records which existing ranges survive and where new ranges go,
//! and applies the whole batch once the sweep is done. Surviving ranges are
//! moved into the result, never cloned. Any range the batch does not mention
//! is dropped.

use rangegroup_core::primitives::{Range, Sources};
use std::ops::Range as Span;

#[derive(Debug, Clone, PartialEq)]
enum Edit<T> {
    /// A run of consecutive existing ranges, kept as they are.
    Keep(Span<usize>),
    /// One existing range, kept with new provenance.
    Tag(usize, Sources),
    /// A newly built range.
    Insert(Range<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EditBatch<T> {
    edits: Vec<Edit<T>>,
    /// Index after the last existing range referenced so far.
    cursor: usize,
}

impl<T> Default for EditBatch<T> {
    fn default() -> Self {
        Self {
            edits: Vec::new(),
            cursor: 0,
        }
    }
}

impl<T> EditBatch<T> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Keeps the existing range at `index`, overwriting its provenance when
    /// `sources` is given.
    pub(crate) fn keep(&mut self, index: usize, sources: Option<Sources>) {
        match sources {
            Some(s) => {
                debug_assert!(index >= self.cursor);
                self.edits.push(Edit::Tag(index, s));
                self.cursor = index + 1;
            }
            None => self.keep_run(index..index + 1),
        }
    }

    /// Keeps a run of existing ranges.
    pub(crate) fn keep_run(&mut self, run: Span<usize>) {
        if run.is_empty() {
            return;
        }
        debug_assert!(run.start >= self.cursor);
        self.cursor = run.end;
        if let Some(Edit::Keep(last)) = self.edits.last_mut() {
            if last.end == run.start {
                last.end = run.end;
                return;
            }
        }
        self.edits.push(Edit::Keep(run));
    }

    #[inline]
    pub(crate) fn insert(&mut self, range: Range<T>) {
        self.edits.push(Edit::Insert(range));
    }

    /// Rebuilds `ranges` from the batch.
    pub(crate) fn apply(self, ranges: &mut Vec<Range<T>>) {
        let capacity = self
            .edits
            .iter()
            .map(|e| match e {
                Edit::Keep(run) => run.len(),
                _ => 1,
            })
            .sum();
        let mut out = Vec::with_capacity(capacity);
        let mut old = std::mem::take(ranges).into_iter();
        let mut position = 0usize;
        for edit in self.edits {
            match edit {
                Edit::Keep(run) => {
                    skip(&mut old, run.start - position);
                    out.extend(old.by_ref().take(run.len()));
                    position = run.end;
                }
                Edit::Tag(index, sources) => {
                    skip(&mut old, index - position);
                    if let Some(mut r) = old.next() {
                        r.set_sources(Some(sources));
                        out.push(r);
                    }
                    position = index + 1;
                }
                Edit::Insert(r) => out.push(r),
            }
        }
        *ranges = out;
    }
}

#[inline]
fn skip<I: Iterator>(iter: &mut I, n: usize) {
    if n > 0 {
        iter.nth(n - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> Vec<Range<i32>> {
        (0..6).map(|i| Range::closed(i * 10, i * 10 + 5)).collect()
    }

    #[test]
    fn test_empty_batch_clears() {
        let mut rs = ranges();
        EditBatch::new().apply(&mut rs);
        assert!(rs.is_empty());
    }

    #[test]
    fn test_keep_runs_coalesce() {
        let mut batch = EditBatch::<i32>::new();
        batch.keep(1, None);
        batch.keep(2, None);
        batch.keep_run(3..5);
        assert_eq!(batch.edits, vec![Edit::Keep(1..5)]);
        let mut rs = ranges();
        batch.apply(&mut rs);
        assert_eq!(rs, ranges()[1..5].to_vec());
    }

    #[test]
    fn test_interleaved_inserts_and_drops() {
        let mut batch = EditBatch::new();
        batch.insert(Range::closed(-5, -1));
        batch.keep(0, None);
        // 1 and 2 dropped
        batch.insert(Range::closed(21, 22));
        batch.keep(3, Some(Sources::both(3, 0)));
        batch.keep_run(5..6);
        let mut rs = ranges();
        batch.apply(&mut rs);
        let expected = vec![
            Range::closed(-5, -1),
            Range::closed(0, 5),
            Range::closed(21, 22),
            Range::closed(30, 35).with_sources(Some(Sources::both(3, 0))),
            Range::closed(50, 55),
        ];
        assert_eq!(rs, expected);
    }

    #[test]
    fn test_empty_run_is_ignored() {
        let mut batch = EditBatch::<i32>::new();
        batch.keep_run(2..2);
        assert!(batch.edits.is_empty());
    }
}
