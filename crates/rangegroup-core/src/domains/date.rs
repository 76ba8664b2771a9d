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

//! Calendar instants floored to a fixed unit.

use super::int::{Steps, compare_discrete, inclusive, sample_discrete, size_discrete};
use crate::{
    compare::{CompareMode, Comparison},
    domain::{DiscreteDomain, Domain, SampleDomain},
    primitives::Range,
};
use chrono::{DateTime, Utc};
use std::iter::FusedIterator;

/// Granularity of a [`DateDomain`].
///
/// Days are fixed 24 hour UTC days; no calendar or time zone adjustments
/// are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    #[inline]
    pub const fn millis(self) -> i64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second => 1_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Hour => 3_600_000,
            TimeUnit::Day => 86_400_000,
        }
    }
}

/// UTC instants counted in whole units.
///
/// Each value is floored to its unit, then handled like an integer: two
/// instants in the same unit are equal, and consecutive units are adjacent.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rangegroup_core::domain::Domain;
/// use rangegroup_core::domains::{DateDomain, TimeUnit};
///
/// let days = DateDomain::new(TimeUnit::Day);
/// let start = Utc.with_ymd_and_hms(2024, 3, 1, 17, 30, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2024, 3, 7, 8, 0, 0).unwrap();
/// let r = days.create(start, end, false, false);
/// assert_eq!(days.size(&r), 7.0);
/// assert_eq!(*r.start(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDomain {
    unit: TimeUnit,
    normalize: bool,
}

impl DateDomain {
    /// Keeps exclusive bounds as flags.
    #[inline]
    pub const fn new(unit: TimeUnit) -> Self {
        Self {
            unit,
            normalize: false,
        }
    }

    /// Rewrites exclusive bounds to the neighbouring unit.
    #[inline]
    pub const fn normalized(unit: TimeUnit) -> Self {
        Self {
            unit,
            normalize: true,
        }
    }

    #[inline]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    #[inline]
    fn to_base(&self, value: &DateTime<Utc>) -> i128 {
        i128::from(value.timestamp_millis().div_euclid(self.unit.millis()))
    }

    #[inline]
    fn from_base(&self, base: i128) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(base).ok()?.checked_mul(self.unit.millis())?;
        DateTime::from_timestamp_millis(millis)
    }

    fn bound(&self, value: DateTime<Utc>, excl: bool, is_end: bool) -> (DateTime<Utc>, bool) {
        let base = self.to_base(&value);
        let (base, excl) = if self.normalize && excl {
            (inclusive(base, true, is_end), false)
        } else {
            (base, excl)
        };
        match self.from_base(base) {
            Some(floored) => (floored, excl),
            None => (value, excl),
        }
    }
}

impl Domain for DateDomain {
    type Value = DateTime<Utc>;

    #[inline]
    fn start_bound(&self, value: DateTime<Utc>, excl: bool) -> (DateTime<Utc>, bool) {
        self.bound(value, excl, false)
    }

    #[inline]
    fn end_bound(&self, value: DateTime<Utc>, excl: bool) -> (DateTime<Utc>, bool) {
        self.bound(value, excl, true)
    }

    #[inline]
    fn compare(
        &self,
        mode: CompareMode,
        a: &DateTime<Utc>,
        b: &DateTime<Utc>,
        a_excl: bool,
        b_excl: bool,
    ) -> Comparison {
        compare_discrete(mode, self.to_base(a), self.to_base(b), a_excl, b_excl)
    }

    #[inline]
    fn size(&self, range: &Range<DateTime<Utc>>) -> f64 {
        size_discrete(
            self.to_base(range.start()),
            self.to_base(range.end()),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
        )
    }
}

/// Iterator over every unit of a date range.
#[derive(Clone, Debug)]
pub struct DateIter {
    domain: DateDomain,
    steps: Steps,
}

impl Iterator for DateIter {
    type Item = DateTime<Utc>;

    #[inline]
    fn next(&mut self) -> Option<DateTime<Utc>> {
        let base = self.steps.next()?;
        self.domain.from_base(base)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl FusedIterator for DateIter {}

impl DiscreteDomain for DateDomain {
    type Iter = DateIter;

    fn iterate(&self, range: &Range<DateTime<Utc>>, reverse: bool) -> DateIter {
        DateIter {
            domain: *self,
            steps: Steps::new(
                self.to_base(range.start()),
                self.to_base(range.end()),
                range.is_start_exclusive(),
                range.is_end_exclusive(),
                reverse,
            ),
        }
    }
}

impl SampleDomain for DateDomain {
    fn sample(&self, range: &Range<DateTime<Utc>>, percentile: f64) -> DateTime<Utc> {
        let base = sample_discrete(
            self.to_base(range.start()),
            self.to_base(range.end()),
            range.is_start_exclusive(),
            range.is_end_exclusive(),
            percentile,
        );
        self.from_base(base).unwrap_or(*range.start())
    }
}
