//! Partitions of the set `{0, .., n-1}` into blocks, spelled as restricted growth strings.
//!
//!Entry `i` of a restricted growth string is the block holding element `i`, with blocks
//!numbered in order of their smallest element. So the first entry is `0` and every entry is at
//!most one more than the largest entry before it.
use std::{marker::PhantomData, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{
    cursor::Iter,
    element::{Element, cast, check_fits, index, uncast},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

///The largest `n` with fewer than `2^64` set partitions.
const LARGEST: usize = 25;

///How a family of set partitions is written out: `n` alone, or `[n, fewest, most]`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Parameters {
    Whole(usize),
    Bounded(usize, usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Parameters", into = "Parameters", bound = "T: Element")]
///The `Bell(n)` restricted growth strings of length `n`, in lexicographic order, optionally
///restricted to a range of block counts.
///
///```
///# use combinatoria::{Enumeration, SetPartitions};
///let family = SetPartitions::<u8>::new(3)?;
///let all: Vec<_> = family.iter().collect();
///assert_eq!(all, [[0, 0, 0], [0, 0, 1], [0, 1, 0], [0, 1, 1], [0, 1, 2]]);
///assert_eq!(family.blocks(&[0, 1, 0])?, [vec![0, 2], vec![1]]);
///
///let halves = SetPartitions::<u8>::with_blocks(3, 2, 2)?;
///assert_eq!(halves.iter().collect::<Vec<_>>(), [[0, 0, 1], [0, 1, 0], [0, 1, 1]]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct SetPartitions<T = u32> {
    n: usize,
    blocks: Blocks,
    len: u64,
    ///`completions[rest * n + max]` counts the ways to fill `rest` more entries after a prefix
    ///whose largest entry is `max`, ending with an allowed number of blocks.
    completions: Vec<u64>,
    element: PhantomData<T>,
}

impl<T: Element> SetPartitions<T> {
    ///Partitions of an `n`-element set.
    ///
    ///# Errors
    ///Returns [`RangeError::ElementOverflow`] if `T` cannot hold `n - 1` and
    ///[`RangeError::CountOverflow`] if `n > 25`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        SetPartitions::build(
            n,
            Blocks {
                fewest: n.min(1),
                most: n,
            },
        )
    }

    ///Partitions of an `n`-element set into at least `fewest` and at most `most` blocks, in the
    ///same order. Exactly `k` blocks give the Stirling number `S(n, k)` of partitions.
    ///
    ///```
    ///# use combinatoria::{Enumeration, SetPartitions};
    ///let family = SetPartitions::<u8>::with_blocks(5, 2, 2)?;
    ///assert_eq!(family.len(), 15);
    ///assert_eq!(family.nth(0)?, [0, 0, 0, 0, 1]);
    ///# Ok::<(), anyhow::Error>(())
    ///```
    ///
    ///# Errors
    ///Returns [`RangeError::PartCounts`] unless `1 <= fewest <= most <= n`, and otherwise the
    ///errors of [`SetPartitions::new`].
    pub fn with_blocks(n: usize, fewest: usize, most: usize) -> Result<Self, RangeError> {
        if fewest == 0 || fewest > most || most > n {
            tracing::debug!(n, fewest, most, "rejected block counts");
            return Err(RangeError::PartCounts { n, fewest, most });
        }
        SetPartitions::build(n, Blocks { fewest, most })
    }

    fn build(n: usize, blocks: Blocks) -> Result<Self, RangeError> {
        if n > LARGEST {
            tracing::debug!(n, "set partition count overflows");
            return Err(RangeError::CountOverflow);
        }
        check_fits::<T>(n.saturating_sub(1))?;
        let mut completions = vec![0; n * n];
        for rest in 0..n {
            for max in 0..n - rest {
                completions[rest * n + max] = if rest == 0 {
                    u64::from(blocks.allows(max + 1))
                } else {
                    (max as u64 + 1) * completions[(rest - 1) * n + max]
                        + completions[(rest - 1) * n + max + 1]
                };
            }
        }
        let len = if n == 0 {
            u64::from(blocks.allows(0))
        } else {
            completions[(n - 1) * n]
        };
        Ok(SetPartitions {
            n,
            blocks,
            len,
            completions,
            element: PhantomData,
        })
    }

    ///Size of the set being partitioned.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    ///The allowed numbers of blocks.
    #[must_use]
    pub fn block_counts(&self) -> RangeInclusive<usize> {
        self.blocks.fewest..=self.blocks.most
    }

    ///The blocks spelled by `object`, each listing its elements in increasing order.
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` is not a member of this family.
    pub fn blocks(&self, object: &[T]) -> Result<Vec<Vec<usize>>, RangeError> {
        let labels = self.labels(object)?;
        let mut blocks: Vec<Vec<usize>> = vec![];
        for (element, label) in labels.into_iter().enumerate() {
            if label == blocks.len() {
                blocks.push(vec![]);
            }
            blocks[label].push(element);
        }
        Ok(blocks)
    }

    fn completions(&self, rest: usize, max: usize) -> u64 {
        self.completions[rest * self.n + max]
    }

    fn labels(&self, object: &[T]) -> Result<Vec<usize>, RangeError> {
        if object.len() != self.n {
            return Err(RangeError::NotAMember);
        }
        let mut labels = Vec::with_capacity(self.n);
        let mut next_block = 0;
        for &x in object {
            let label = index(x)
                .filter(|&label| label <= next_block)
                .ok_or(RangeError::NotAMember)?;
            if label == next_block {
                next_block += 1;
            }
            labels.push(label);
        }
        if !self.blocks.allows(next_block) {
            return Err(RangeError::NotAMember);
        }
        Ok(labels)
    }

    fn state(&self, labels: Vec<usize>) -> SetPartitionState<T> {
        let maxima = labels
            .iter()
            .scan(0, |max, &label| {
                *max = label.max(*max);
                Some(*max)
            })
            .collect();
        SetPartitionState {
            labels: labels.into_iter().map(cast).collect(),
            maxima,
            blocks: self.blocks,
        }
    }
}

impl<T: Element> TryFrom<usize> for SetPartitions<T> {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        SetPartitions::new(n)
    }
}

impl<T: Element> TryFrom<Parameters> for SetPartitions<T> {
    type Error = RangeError;

    fn try_from(value: Parameters) -> Result<Self, Self::Error> {
        match value {
            Parameters::Whole(n) => SetPartitions::new(n),
            Parameters::Bounded(n, fewest, most) => SetPartitions::with_blocks(n, fewest, most),
        }
    }
}

impl<T> From<SetPartitions<T>> for Parameters {
    fn from(value: SetPartitions<T>) -> Self {
        let Blocks { fewest, most } = value.blocks;
        if fewest <= 1 && most >= value.n {
            Parameters::Whole(value.n)
        } else {
            Parameters::Bounded(value.n, fewest, most)
        }
    }
}

///The allowed range for the number of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Blocks {
    fewest: usize,
    most: usize,
}

impl Blocks {
    fn allows(self, blocks: usize) -> bool {
        self.fewest <= blocks && blocks <= self.most
    }

    ///Whether a prefix whose largest label is `max` can end in range after `rest` more entries,
    ///each of which opens at most one block.
    fn reachable(self, max: usize, rest: usize) -> bool {
        max < self.most && max + 1 + rest >= self.fewest
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A restricted growth string being walked through by [`SetPartitions`].
pub struct SetPartitionState<T> {
    labels: Vec<T>,
    ///`maxima[i]` is the largest of `labels[..=i]`.
    maxima: Vec<usize>,
    blocks: Blocks,
}

impl<T: Element> SetPartitionState<T> {
    ///Rewrites every entry after `i` with the smallest finish: zeros, then just enough new
    ///blocks at the very end.
    fn smallest_finish(&mut self, i: usize) {
        let rest = self.labels.len() - 1 - i;
        let max = self.maxima[i];
        let opened = self.blocks.fewest.saturating_sub(max + 1);
        for (offset, j) in (i + 1..self.labels.len()).enumerate() {
            let label = if offset + opened < rest {
                0
            } else {
                max + 1 + offset + opened - rest
            };
            self.labels[j] = cast(label);
            self.maxima[j] = label.max(self.maxima[j - 1]);
        }
    }

    ///Rewrites every entry after `i` with the largest finish: as many new blocks as allowed, then
    ///the last block repeated.
    fn largest_finish(&mut self, i: usize) {
        for j in i + 1..self.labels.len() {
            let label = (self.maxima[j - 1] + 1).min(self.blocks.most - 1);
            self.labels[j] = cast(label);
            self.maxima[j] = label.max(self.maxima[j - 1]);
        }
    }
}

impl<T: Element> Transition for SetPartitionState<T> {
    type Item = T;

    fn as_slice(&self) -> &[T] {
        &self.labels
    }

    fn to_successor(&mut self) -> bool {
        let len = self.labels.len();
        for i in (1..len).rev() {
            let (label, max) = (uncast(self.labels[i]), self.maxima[i - 1]);
            let rest = len - 1 - i;
            let raised = if label < max && self.blocks.reachable(max, rest) {
                label + 1
            } else if label <= max && self.blocks.reachable(max + 1, rest) {
                max + 1
            } else {
                continue;
            };
            self.labels[i] = cast(raised);
            self.maxima[i] = raised.max(max);
            self.smallest_finish(i);
            return true;
        }
        false
    }

    fn to_predecessor(&mut self) -> bool {
        let len = self.labels.len();
        let Some(i) = (1..len).rfind(|&i| {
            self.labels[i] > T::zero() && self.blocks.reachable(self.maxima[i - 1], len - 1 - i)
        }) else {
            return false;
        };
        let label = uncast(self.labels[i]) - 1;
        self.labels[i] = cast(label);
        self.maxima[i] = label.max(self.maxima[i - 1]);
        self.largest_finish(i);
        true
    }
}

impl<T: Element> Enumeration for SetPartitions<T> {
    type Item = T;
    type State = SetPartitionState<T>;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        let mut state = self.state(vec![0; self.n]);
        if self.n > 0 {
            state.smallest_finish(0);
        }
        state
    }

    fn last(&self) -> Self::State {
        let mut state = self.state(vec![0; self.n]);
        if self.n > 0 {
            state.largest_finish(0);
        }
        state
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        let mut rank = rank;
        let mut labels = Vec::with_capacity(self.n);
        let mut max = 0;
        if self.n > 0 {
            labels.push(0);
        }
        for i in 1..self.n {
            let rest = self.n - 1 - i;
            // Each existing block leads to the same number of completions, a new one to its own.
            let per_label = self.completions(rest, max);
            let existing = (max as u64 + 1) * per_label;
            let label = if rank < existing {
                (rank / per_label) as usize
            } else {
                max + 1
            };
            rank -= label as u64 * per_label;
            max = max.max(label);
            labels.push(label);
        }
        Ok(self.state(labels))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        let labels = self.labels(object)?;
        let mut rank = 0;
        let mut max = 0;
        for (i, &label) in labels.iter().enumerate().skip(1) {
            rank += label as u64 * self.completions(self.n - 1 - i, max);
            max = max.max(label);
        }
        Ok(rank)
    }
}

impl<'a, T: Element> IntoIterator for &'a SetPartitions<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<SetPartitionState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
