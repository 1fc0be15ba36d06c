//! Integer partitions of `n`, spelled as non-increasing tuples of positive parts.
use std::{
    marker::PhantomData,
    ops::{Range, RangeInclusive},
};

use serde::{Deserialize, Serialize};

use crate::{
    cursor::Iter,
    element::{Element, cast, check_fits, index, uncast},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

///The largest `n` with fewer than `2^64` partitions.
const LARGEST: usize = 416;

///The bounds a partition of `n` must respect on its number of parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Shape {
    n: usize,
    fewest: usize,
    most: usize,
}

impl Shape {
    fn allows(self, parts: usize) -> bool {
        self.fewest <= parts && parts <= self.most
    }

    fn is_whole(self) -> bool {
        self.fewest <= 1 && self.most >= self.n
    }

    ///Whether `rest` splits into parts no larger than `cap` so that, counting the `used` parts
    ///already placed, the total number of parts is allowed.
    fn can_finish(self, rest: usize, cap: usize, used: usize) -> bool {
        if rest == 0 {
            return self.allows(used);
        }
        if cap == 0 || used >= self.most {
            return false;
        }
        let fewest_more = rest.div_ceil(cap).max(self.fewest.saturating_sub(used));
        let most_more = rest.min(self.most - used);
        fewest_more <= most_more
    }

    ///Appends the lexicographically largest way to finish `parts` with `rest` more.
    fn largest_finish(self, parts: &mut Vec<usize>, mut rest: usize, mut cap: usize) {
        while rest > 0 {
            let used = parts.len() + 1;
            let part = (1..=cap.min(rest))
                .rev()
                .find(|&part| self.can_finish(rest - part, part, used))
                .expect("callers only extend prefixes that can be finished");
            parts.push(part);
            rest -= part;
            cap = part;
        }
    }

    ///Appends the lexicographically smallest way to finish `parts` with `rest` more.
    fn smallest_finish(self, parts: &mut Vec<usize>, mut rest: usize, mut cap: usize) {
        while rest > 0 {
            let used = parts.len() + 1;
            let part = (1..=cap.min(rest))
                .find(|&part| self.can_finish(rest - part, part, used))
                .expect("callers only extend prefixes that can be finished");
            parts.push(part);
            rest -= part;
            cap = part;
        }
    }
}

///How a family of partitions is written out: `n` alone, or `[n, fewest, most]`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Parameters {
    Whole(usize),
    Bounded(usize, usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Parameters", into = "Parameters", bound = "T: Element")]
///The partitions of `n` in reverse lexicographic order, from `{n}` down to `1^n`, optionally
///restricted to a range of part counts.
///
///```
///# use combinatoria::{Enumeration, Partitions};
///let family = Partitions::<u8>::new(4)?;
///let all: Vec<_> = family.iter().collect();
///assert_eq!(all, [vec![4], vec![3, 1], vec![2, 2], vec![2, 1, 1], vec![1, 1, 1, 1]]);
///
///let pairs = Partitions::<u8>::with_parts(6, 2, 2)?;
///assert_eq!(pairs.iter().collect::<Vec<_>>(), [[5, 1], [4, 2], [3, 3]]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Partitions<T = u32> {
    shape: Shape,
    ///Start of each `(m, largest)` row of `completions`, for `1 <= largest <= m <= n`.
    rows: Vec<usize>,
    ///Row `(m, largest)` holds, for each number `used` of parts already placed, how many
    ///partitions of `m` into parts no larger than `largest` bring the part count into range.
    ///Rows stop where `used` parts of at least `largest` would exceed `n - m`.
    completions: Vec<u64>,
    element: PhantomData<T>,
}

impl<T: Element> Partitions<T> {
    ///Partitions of `n`.
    ///
    ///# Errors
    ///Returns [`RangeError::ElementOverflow`] if `T` cannot hold `n` and
    ///[`RangeError::CountOverflow`] if `n > 416`, past which the number of partitions does not
    ///fit in a `u64`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        Partitions::build(Shape {
            n,
            fewest: n.min(1),
            most: n,
        })
    }

    ///Partitions of `n` into at least `fewest` and at most `most` parts, in the same order.
    ///
    ///```
    ///# use combinatoria::{Enumeration, Partitions};
    ///let family = Partitions::<u8>::with_parts(7, 2, 3)?;
    ///assert_eq!(family.len(), 7);
    ///assert_eq!(family.nth(2)?, [5, 1, 1]);
    ///# Ok::<(), anyhow::Error>(())
    ///```
    ///
    ///# Errors
    ///Returns [`RangeError::PartCounts`] unless `1 <= fewest <= most <= n`, and otherwise the
    ///errors of [`Partitions::new`].
    pub fn with_parts(n: usize, fewest: usize, most: usize) -> Result<Self, RangeError> {
        if fewest == 0 || fewest > most || most > n {
            tracing::debug!(n, fewest, most, "rejected part counts");
            return Err(RangeError::PartCounts { n, fewest, most });
        }
        Partitions::build(Shape { n, fewest, most })
    }

    fn build(shape: Shape) -> Result<Self, RangeError> {
        let n = shape.n;
        if n > LARGEST {
            tracing::debug!(n, "partition count overflows");
            return Err(RangeError::CountOverflow);
        }
        check_fits::<T>(n)?;
        let mut rows = Vec::with_capacity(n * (n + 1) / 2 + 1);
        rows.push(0);
        for m in 1..=n {
            for largest in 1..=m {
                let end = rows[rows.len() - 1] + (n - m) / largest + 1;
                rows.push(end);
            }
        }
        let mut family = Partitions {
            shape,
            completions: vec![0; rows[rows.len() - 1]],
            rows,
            element: PhantomData,
        };
        for m in 1..=n {
            for largest in 1..=m {
                let row = family.row(m, largest);
                for used in 0..row.len() {
                    // Either no part equals `largest`, or one does and is set aside.
                    let without = family.completions(m, largest - 1, used);
                    let with = family.completions(m - largest, largest, used + 1);
                    family.completions[row.start + used] = without + with;
                }
            }
        }
        Ok(family)
    }

    ///The integer being partitioned.
    #[must_use]
    pub fn n(&self) -> usize {
        self.shape.n
    }

    ///The allowed numbers of parts.
    #[must_use]
    pub fn part_counts(&self) -> RangeInclusive<usize> {
        self.shape.fewest..=self.shape.most
    }

    ///The conjugate partition, whose `i`-th part counts the parts of `object` larger than `i`.
    ///Its number of parts is the largest part of `object`, so it need not belong to a family
    ///with bounded part counts.
    ///
    ///```
    ///# use combinatoria::Partitions;
    ///let family = Partitions::<u32>::new(6)?;
    ///assert_eq!(family.conjugate(&[3, 2, 1])?, [3, 2, 1]);
    ///assert_eq!(family.conjugate(&[4, 1, 1])?, [3, 1, 1, 1]);
    ///# Ok::<(), anyhow::Error>(())
    ///```
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` is not a member of this family.
    pub fn conjugate(&self, object: &[T]) -> Result<Vec<T>, RangeError> {
        let parts = self.parts(object)?;
        let widest = parts.first().copied().unwrap_or(0);
        Ok((0..widest)
            .map(|i| cast(parts.iter().take_while(|&&part| part > i).count()))
            .collect())
    }

    fn row(&self, m: usize, largest: usize) -> Range<usize> {
        let at = m * (m - 1) / 2 + largest - 1;
        self.rows[at]..self.rows[at + 1]
    }

    ///Partitions of `m` into parts no larger than `largest` that finish a prefix of `used` parts.
    fn completions(&self, m: usize, largest: usize, used: usize) -> u64 {
        if m == 0 {
            return u64::from(self.shape.allows(used));
        }
        let largest = largest.min(m);
        if largest == 0 {
            return 0;
        }
        self.completions[self.row(m, largest)]
            .get(used)
            .copied()
            .unwrap_or(0)
    }

    fn parts(&self, object: &[T]) -> Result<Vec<usize>, RangeError> {
        let parts = object
            .iter()
            .map(|&x| index(x).filter(|&x| x > 0))
            .collect::<Option<Vec<_>>>()
            .ok_or(RangeError::NotAMember)?;
        let non_increasing = parts.windows(2).all(|w| w[0] >= w[1]);
        if !non_increasing
            || parts.iter().sum::<usize>() != self.shape.n
            || !self.shape.allows(parts.len())
        {
            return Err(RangeError::NotAMember);
        }
        Ok(parts)
    }

    fn state(&self, parts: Vec<usize>) -> PartitionState<T> {
        PartitionState::new(parts, self.shape)
    }
}

impl<T: Element> TryFrom<usize> for Partitions<T> {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Partitions::new(n)
    }
}

impl<T: Element> TryFrom<Parameters> for Partitions<T> {
    type Error = RangeError;

    fn try_from(value: Parameters) -> Result<Self, Self::Error> {
        match value {
            Parameters::Whole(n) => Partitions::new(n),
            Parameters::Bounded(n, fewest, most) => Partitions::with_parts(n, fewest, most),
        }
    }
}

impl<T> From<Partitions<T>> for Parameters {
    fn from(value: Partitions<T>) -> Self {
        let Shape { n, fewest, most } = value.shape;
        if value.shape.is_whole() {
            Parameters::Whole(n)
        } else {
            Parameters::Bounded(n, fewest, most)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A partition being walked through by [`Partitions`].
pub struct PartitionState<T> {
    data: Vec<T>,
    ///Index of the rightmost part larger than one.
    last_big: Option<usize>,
    shape: Shape,
}

impl<T: Element> PartitionState<T> {
    fn new(parts: Vec<usize>, shape: Shape) -> Self {
        let last_big = parts.iter().rposition(|&part| part > 1);
        PartitionState {
            data: parts.into_iter().map(cast).collect(),
            last_big,
            shape,
        }
    }

    fn parts(&self) -> Vec<usize> {
        self.data.iter().map(|&x| uncast(x)).collect()
    }

    fn split_last_big(&mut self) -> bool {
        let Some(h) = self.last_big else {
            return false;
        };
        let reduced = uncast(self.data[h]) - 1;
        // The trailing ones plus the unit taken from the part at h.
        let mut spare = self.data.len() - h;
        self.data.truncate(h);
        self.data.push(cast(reduced));
        while spare > reduced {
            self.data.push(cast(reduced));
            spare -= reduced;
        }
        self.data.push(cast(spare));
        self.last_big = if reduced == 1 {
            h.checked_sub(1)
        } else if spare > 1 {
            Some(self.data.len() - 1)
        } else {
            Some(self.data.len() - 2)
        };
        true
    }

    fn absorb_tail(&mut self) -> bool {
        let data = &self.data;
        let Some(j) = (0..data.len().saturating_sub(1))
            .rev()
            .find(|&j| j == 0 || data[j] < data[j - 1])
        else {
            return false;
        };
        let tail: usize = self.data[j + 1..].iter().map(|&x| uncast(x)).sum();
        self.data[j] = self.data[j] + T::one();
        self.data.truncate(j + 1);
        self.data.resize(j + tail, T::one());
        self.last_big = Some(j);
        true
    }

    // Lowers the rightmost part that can shrink while the part count stays reachable, then
    // writes the largest finish.
    fn lower_bounded(&mut self) -> bool {
        let mut parts = self.parts();
        let mut rest = 0;
        for i in (0..parts.len()).rev() {
            let current = parts[i];
            rest += current;
            let lowered = (1..current)
                .rev()
                .find(|&part| self.shape.can_finish(rest - part, part, i + 1));
            if let Some(part) = lowered {
                parts.truncate(i);
                parts.push(part);
                self.shape.largest_finish(&mut parts, rest - part, part);
                *self = PartitionState::new(parts, self.shape);
                return true;
            }
        }
        false
    }

    fn raise_bounded(&mut self) -> bool {
        let mut parts = self.parts();
        let mut rest = 0;
        for i in (0..parts.len()).rev() {
            let current = parts[i];
            rest += current;
            let cap = if i == 0 { self.shape.n } else { parts[i - 1] }.min(rest);
            let raised = (current + 1..=cap)
                .find(|&part| self.shape.can_finish(rest - part, part, i + 1));
            if let Some(part) = raised {
                parts.truncate(i);
                parts.push(part);
                self.shape.smallest_finish(&mut parts, rest - part, part);
                *self = PartitionState::new(parts, self.shape);
                return true;
            }
        }
        false
    }
}

impl<T: Element> Transition for PartitionState<T> {
    type Item = T;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn to_successor(&mut self) -> bool {
        if self.shape.is_whole() {
            self.split_last_big()
        } else {
            self.lower_bounded()
        }
    }

    fn to_predecessor(&mut self) -> bool {
        if self.shape.is_whole() {
            self.absorb_tail()
        } else {
            self.raise_bounded()
        }
    }
}

impl<T: Element> Enumeration for Partitions<T> {
    type Item = T;
    type State = PartitionState<T>;

    fn len(&self) -> u64 {
        self.completions(self.shape.n, self.shape.n, 0)
    }

    fn first(&self) -> Self::State {
        let mut parts = vec![];
        self.shape
            .largest_finish(&mut parts, self.shape.n, self.shape.n);
        self.state(parts)
    }

    fn last(&self) -> Self::State {
        let mut parts = vec![];
        self.shape
            .smallest_finish(&mut parts, self.shape.n, self.shape.n);
        self.state(parts)
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len())?;
        let mut rank = rank;
        let (mut remaining, mut bound) = (self.shape.n, self.shape.n);
        let mut parts = vec![];
        while remaining > 0 {
            let used = parts.len() + 1;
            let mut part = bound.min(remaining);
            loop {
                let starting_here = self.completions(remaining - part, part, used);
                if rank < starting_here {
                    break;
                }
                rank -= starting_here;
                part -= 1;
            }
            parts.push(part);
            remaining -= part;
            bound = part;
        }
        Ok(self.state(parts))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        let parts = self.parts(object)?;
        let (mut remaining, mut bound) = (self.shape.n, self.shape.n);
        let mut rank = 0;
        // Everything with the same prefix and a larger part here comes first.
        for (i, part) in parts.into_iter().enumerate() {
            for larger in part + 1..=bound.min(remaining) {
                rank += self.completions(remaining - larger, larger, i + 1);
            }
            remaining -= part;
            bound = part;
        }
        Ok(rank)
    }
}

impl<'a, T: Element> IntoIterator for &'a Partitions<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<PartitionState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
