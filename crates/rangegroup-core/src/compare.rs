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

//! Comparison vocabulary shared by every domain.

use std::cmp::Ordering;

/// Which pair of bounds a comparison looks at.
///
/// The first letter names the bound of the left value, the second the bound
/// of the right value. `EndStart` compares the end of one range with the start
/// of another and is the gap comparison used to detect adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareMode {
    Start,
    End,
    StartEnd,
    EndStart,
}

impl CompareMode {
    /// Builds the mode from whether each side is an end bound.
    #[inline]
    pub const fn from_ends(a_is_end: bool, b_is_end: bool) -> Self {
        match (a_is_end, b_is_end) {
            (false, false) => CompareMode::Start,
            (true, true) => CompareMode::End,
            (false, true) => CompareMode::StartEnd,
            (true, false) => CompareMode::EndStart,
        }
    }

    #[inline]
    pub const fn a_is_end(self) -> bool {
        matches!(self, CompareMode::End | CompareMode::EndStart)
    }

    #[inline]
    pub const fn b_is_end(self) -> bool {
        matches!(self, CompareMode::End | CompareMode::StartEnd)
    }

    /// The same comparison with the operands swapped.
    #[inline]
    pub const fn swapped(self) -> Self {
        Self::from_ends(self.b_is_end(), self.a_is_end())
    }
}

/// The outcome of comparing two bounds.
///
/// `side` is the ordering of `a` relative to `b`. `distance` is a signed
/// magnitude that drives interpolation search. For gap comparisons a zero
/// distance with a `Less` side means the two ranges touch with nothing in
/// between. A non-finite distance disables interpolation.
///
/// # Examples
///
/// ```
/// use rangegroup_core::compare::{Comparison, Gap};
/// use std::cmp::Ordering;
///
/// let c = Comparison::new(0.0, Ordering::Less);
/// assert_eq!(Gap::from(c), Gap::Adjacent);
/// assert_eq!(Gap::from(Comparison::new(-3.0, Ordering::Less)), Gap::Separate);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    distance: f64,
    side: Ordering,
}

impl Comparison {
    #[inline]
    pub const fn new(distance: f64, side: Ordering) -> Self {
        Self { distance, side }
    }

    /// A comparison whose side is the sign of `distance`.
    #[inline]
    pub fn from_distance(distance: f64) -> Self {
        let side = distance.partial_cmp(&0.0).unwrap_or(Ordering::Equal);
        Self { distance, side }
    }

    #[inline]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub const fn side(&self) -> Ordering {
        self.side
    }

    /// The comparison seen from the other operand.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            distance: -self.distance,
            side: self.side.reverse(),
        }
    }
}

/// What lies between the end of one range and the start of the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gap {
    /// At least one value lies between the two ranges.
    Separate,
    /// No value lies between the ranges; they merge into one.
    Adjacent,
    /// The ranges share at least one value.
    Overlapping,
}

impl Gap {
    #[inline]
    pub const fn is_separate(self) -> bool {
        matches!(self, Gap::Separate)
    }
}

impl From<Comparison> for Gap {
    /// Interprets an end-versus-start comparison.
    #[inline]
    fn from(c: Comparison) -> Self {
        if c.side != Ordering::Less {
            Gap::Overlapping
        } else if c.distance == 0.0 {
            Gap::Adjacent
        } else {
            Gap::Separate
        }
    }
}
