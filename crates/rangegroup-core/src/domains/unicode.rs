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

//! Unicode string ranges.
//!
//! A range such as `"ab".."ae"` holds every string made of the shared prefix
//! `"a"` followed by one code point between `'b'` and `'e'`. Strings of
//! different lengths, or with different prefixes, live on separate number
//! lines: they still order consistently, but their distance is infinite.

use super::int::{Steps, compare_discrete, sample_discrete, size_discrete};
use crate::{
    compare::{CompareMode, Comparison},
    domain::{DiscreteDomain, Domain, SampleDomain},
    err::UnicodeRangeError,
    primitives::Range,
};
use std::{cmp::Ordering, iter::FusedIterator};

/// Splits off the final code point.
#[inline]
fn split_last(s: &str) -> (&str, Option<char>) {
    match s.chars().next_back() {
        Some(c) => (&s[..s.len() - c.len_utf8()], Some(c)),
        None => (s, None),
    }
}

#[inline]
fn code(c: Option<char>) -> i128 {
    c.map_or(0, |c| i128::from(u32::from(c)))
}

/// String domain over the last code point of equal-length, equal-prefix
/// strings.
///
/// With `NORMALIZE` set, exclusive bounds step to the neighbouring code point
/// where one exists.
///
/// # Examples
///
/// ```
/// use rangegroup_core::domain::{DiscreteDomain, Domain};
/// use rangegroup_core::domains::UnicodeDomain;
///
/// let d = UnicodeDomain::new();
/// let r = d.create("xa".to_string(), "xd".to_string(), false, true);
/// let all: Vec<String> = d.iterate(&r, false).collect();
/// assert_eq!(all, ["xa", "xb", "xc"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringDomain<const NORMALIZE: bool>;

/// Strings keeping exclusive bounds as flags.
pub type UnicodeDomain = StringDomain<false>;

/// Strings with exclusive bounds normalized to inclusive ones.
pub type UnicodeNormDomain = StringDomain<true>;

impl<const NORMALIZE: bool> StringDomain<NORMALIZE> {
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that both bounds share their length and prefix.
    pub fn validate(&self, range: &Range<String>) -> Result<(), UnicodeRangeError> {
        let start_len = range.start().chars().count();
        let end_len = range.end().chars().count();
        if start_len != end_len {
            return Err(UnicodeRangeError::LengthMismatch {
                start: start_len,
                end: end_len,
            });
        }
        let (start_prefix, _) = split_last(range.start());
        let (end_prefix, _) = split_last(range.end());
        if start_prefix != end_prefix {
            return Err(UnicodeRangeError::PrefixMismatch);
        }
        Ok(())
    }

    fn bound(&self, value: String, excl: bool, is_end: bool) -> (String, bool) {
        if !NORMALIZE || !excl {
            return (value, excl);
        }
        let (prefix, last) = split_last(&value);
        let stepped = last.and_then(|c| {
            let c = u32::from(c);
            let next = if is_end { c.checked_sub(1) } else { c.checked_add(1) };
            next.and_then(char::from_u32)
        });
        match stepped {
            Some(c) => {
                let mut out = String::with_capacity(value.len());
                out.push_str(prefix);
                out.push(c);
                (out, false)
            }
            None => (value, excl),
        }
    }
}

impl<const NORMALIZE: bool> Domain for StringDomain<NORMALIZE> {
    type Value = String;

    #[inline]
    fn start_bound(&self, value: String, excl: bool) -> (String, bool) {
        self.bound(value, excl, false)
    }

    #[inline]
    fn end_bound(&self, value: String, excl: bool) -> (String, bool) {
        self.bound(value, excl, true)
    }

    fn compare(
        &self,
        mode: CompareMode,
        a: &String,
        b: &String,
        a_excl: bool,
        b_excl: bool,
    ) -> Comparison {
        let side = a.chars().count().cmp(&b.chars().count());
        let side = if side != Ordering::Equal {
            side
        } else {
            let (a_prefix, a_last) = split_last(a);
            let (b_prefix, b_last) = split_last(b);
            match a_prefix.cmp(b_prefix) {
                Ordering::Equal => {
                    return compare_discrete(mode, code(a_last), code(b_last), a_excl, b_excl);
                }
                side => side,
            }
        };
        let distance = match side {
            Ordering::Less => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        };
        Comparison::new(distance, side)
    }

    fn size(&self, range: &Range<String>) -> f64 {
        size_discrete(
            code(split_last(range.start()).1),
            code(split_last(range.end()).1),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
        )
    }
}

/// Iterator over the strings of a unicode range.
#[derive(Clone, Debug)]
pub struct StringIter {
    prefix: String,
    steps: Steps,
}

impl Iterator for StringIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let code = self.steps.next()?;
            // surrogate code points have no char
            if let Some(c) = u32::try_from(code).ok().and_then(char::from_u32) {
                let mut out = String::with_capacity(self.prefix.len() + c.len_utf8());
                out.push_str(&self.prefix);
                out.push(c);
                return Some(out);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.steps.size_hint().1)
    }
}

impl FusedIterator for StringIter {}

impl<const NORMALIZE: bool> DiscreteDomain for StringDomain<NORMALIZE> {
    type Iter = StringIter;

    fn iterate(&self, range: &Range<String>, reverse: bool) -> StringIter {
        let (prefix, first) = split_last(range.start());
        let (_, last) = split_last(range.end());
        StringIter {
            prefix: prefix.to_owned(),
            steps: Steps::new(
                code(first),
                code(last),
                range.is_start_exclusive(),
                range.is_end_exclusive(),
                reverse,
            ),
        }
    }
}

impl<const NORMALIZE: bool> SampleDomain for StringDomain<NORMALIZE> {
    fn sample(&self, range: &Range<String>, percentile: f64) -> String {
        let (prefix, first) = split_last(range.start());
        let (_, last) = split_last(range.end());
        let picked = sample_discrete(
            code(first),
            code(last),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
            percentile,
        );
        match u32::try_from(picked).ok().and_then(char::from_u32) {
            Some(c) => {
                let mut out = prefix.to_owned();
                out.push(c);
                out
            }
            None => range.start().clone(),
        }
    }
}
