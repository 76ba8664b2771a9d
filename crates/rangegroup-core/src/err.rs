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

/// A unicode range whose bounds do not live on the same number line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnicodeRangeError {
    LengthMismatch { start: usize, end: usize },
    PrefixMismatch,
}

impl Display for UnicodeRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnicodeRangeError::LengthMismatch { start, end } => write!(
                f,
                "Unicode range bounds differ in length: start has {} code points, end has {}",
                start, end
            ),
            UnicodeRangeError::PrefixMismatch => {
                write!(f, "Unicode range bounds differ before their last code point")
            }
        }
    }
}

impl std::error::Error for UnicodeRangeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = UnicodeRangeError::LengthMismatch { start: 1, end: 3 };
        assert_eq!(
            e.to_string(),
            "Unicode range bounds differ in length: start has 1 code points, end has 3"
        );
        assert!(UnicodeRangeError::PrefixMismatch.to_string().contains("last code point"));
    }
}
