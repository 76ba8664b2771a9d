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

//! Weighted sampling over a normalized group.
//!
//! Every range gets a block holding its size and the accumulated size of all
//! ranges before it. A percentile is scaled to the total size, the block
//! containing it is found by binary search, and the remainder is handed to
//! the domain to pick a value within that range. Larger ranges are thus
//! picked proportionally more often.

use crate::{err::SamplerError, group::RangeGroup};
use rand::Rng;
use rangegroup_core::domain::SampleDomain;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Block {
    accum: f64,
    size: f64,
}

/// Draws values from a [`RangeGroup`] in proportion to range sizes.
///
/// # Examples
///
/// ```
/// use rangegroup::{group::RangeGroup, sampler::Sampler};
/// use rangegroup_core::domains::IntDomain;
///
/// let group = RangeGroup::new(IntDomain::<i32>::new(), vec![(0, 9), (20, 29)]);
/// let sampler = Sampler::new(&group).unwrap();
/// assert_eq!(sampler.sample_at(0.25), 5);
/// assert_eq!(sampler.sample_at(0.5), 20);
/// ```
pub struct Sampler<'g, D: SampleDomain> {
    group: &'g RangeGroup<D>,
    blocks: Vec<Block>,
    total: f64,
}

impl<'g, D: SampleDomain> Sampler<'g, D> {
    /// Precomputes the blocks of `group`, which must be normalized and
    /// non-empty.
    pub fn new(group: &'g RangeGroup<D>) -> Result<Self, SamplerError> {
        if group.is_empty() {
            return Err(SamplerError::EmptyGroup);
        }
        let mut blocks = Vec::with_capacity(group.len());
        let mut accum = 0.0;
        for (index, range) in group.ranges().iter().enumerate() {
            let size = group.domain().size(range);
            if size.is_nan() || size <= 0.0 {
                return Err(SamplerError::NonPositiveSize { index, size });
            }
            blocks.push(Block { accum, size });
            accum += size;
        }
        Ok(Self {
            group,
            blocks,
            total: accum,
        })
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// The value at `percentile` of the group. Percentiles outside `(0, 1)`
    /// clamp to the first or last value.
    pub fn sample_at(&self, percentile: f64) -> D::Value {
        let domain = self.group.domain();
        let ranges = self.group.ranges();
        if percentile.is_nan() || percentile <= 0.0 {
            return domain.sample(&ranges[0], 0.0);
        }
        if percentile >= 1.0 {
            return domain.sample(&ranges[ranges.len() - 1], 1.0 - f64::EPSILON);
        }
        if ranges.len() == 1 {
            return domain.sample(&ranges[0], percentile);
        }
        let scaled = percentile * self.total;
        let index = self
            .blocks
            .partition_point(|b| b.accum <= scaled)
            .saturating_sub(1);
        let block = &self.blocks[index];
        let local = ((scaled - block.accum) / block.size).min(1.0 - f64::EPSILON);
        domain.sample(&ranges[index], local)
    }

    /// A uniformly random value of the group.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> D::Value {
        self.sample_at(rng.random::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rangegroup_core::domains::{IntDomain, RealDomain};

    #[test]
    fn test_empty_group_is_rejected() {
        let group = RangeGroup::empty(IntDomain::<i32>::new());
        assert_eq!(Sampler::new(&group).err(), Some(SamplerError::EmptyGroup));
    }

    #[test]
    fn test_unnormalized_group_is_rejected() {
        let group = RangeGroup::new(RealDomain, vec![(0.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            Sampler::new(&group).err(),
            Some(SamplerError::NonPositiveSize {
                index: 1,
                size: 0.0
            })
        );
    }

    #[test]
    fn test_percentiles_clamp() {
        let group = RangeGroup::new(IntDomain::<i32>::new(), vec![(0, 9), (20, 29)]);
        let sampler = Sampler::new(&group).unwrap();
        assert_eq!(sampler.total(), 20.0);
        assert_eq!(sampler.sample_at(-1.0), 0);
        assert_eq!(sampler.sample_at(0.0), 0);
        assert_eq!(sampler.sample_at(f64::NAN), 0);
        assert_eq!(sampler.sample_at(0.4), 8);
        assert_eq!(sampler.sample_at(0.999), 29);
        assert_eq!(sampler.sample_at(1.0), 29);
        assert_eq!(sampler.sample_at(7.0), 29);
    }

    #[test]
    fn test_single_range() {
        let group = RangeGroup::new(RealDomain, vec![(10.0, 20.0)]);
        let sampler = Sampler::new(&group).unwrap();
        assert_eq!(sampler.sample_at(0.5), 15.0);
    }

    #[test]
    fn test_random_draws_stay_inside() {
        let group = RangeGroup::new(RealDomain, vec![(0.0, 1.0), (5.0, 9.0)]);
        let sampler = Sampler::new(&group).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut right = 0;
        for _ in 0..1000 {
            let v = sampler.sample(&mut rng);
            assert!(group.has(&v), "{v}");
            if v >= 5.0 {
                right += 1;
            }
        }
        // four fifths of the weight sits in the second range
        assert!((700..900).contains(&right), "{right}");
    }
}
