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

use std::fmt::Display;

/// A filter bitmask that selects no region, or bits beyond `a`, `b` and `ab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterError {
    Empty,
    OutOfRange(u8),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::Empty => write!(f, "Filter selects none of the a, b and ab regions"),
            FilterError::OutOfRange(bits) => {
                write!(f, "Filter bits {:#05b} out of range; only 0b111 is valid", bits)
            }
        }
    }
}

impl std::error::Error for FilterError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeGroupError {
    MissingDomain,
}

impl Display for RangeGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeGroupError::MissingDomain => {
                write!(f, "No domain was supplied to the range group builder")
            }
        }
    }
}

impl std::error::Error for RangeGroupError {}

/// The group handed to a [`Sampler`](crate::sampler::Sampler) cannot be
/// sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplerError {
    EmptyGroup,
    NonPositiveSize { index: usize, size: f64 },
}

impl Display for SamplerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplerError::EmptyGroup => write!(f, "Group must not be empty"),
            SamplerError::NonPositiveSize { index, size } => write!(
                f,
                "Range {} has size {}, which is not > 0; group must be normalized",
                index, size
            ),
        }
    }
}

impl std::error::Error for SamplerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        assert_eq!(
            FilterError::OutOfRange(0b1001).to_string(),
            "Filter bits 0b1001 out of range; only 0b111 is valid"
        );
        assert!(FilterError::Empty.to_string().contains("none"));
    }

    #[test]
    fn test_range_group_error_display() {
        assert_eq!(
            RangeGroupError::MissingDomain.to_string(),
            "No domain was supplied to the range group builder"
        );
    }

    #[test]
    fn test_sampler_error_display() {
        let e = SamplerError::NonPositiveSize { index: 2, size: 0.0 };
        assert_eq!(
            e.to_string(),
            "Range 2 has size 0, which is not > 0; group must be normalized"
        );
        assert_eq!(SamplerError::EmptyGroup.to_string(), "Group must not be empty");
    }
}
