//! Arrangements of `{0, .., n-1}` in lexicographic order.
use std::marker::PhantomData;

#[cfg(feature = "sampling")]
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    count::factorial,
    cursor::Iter,
    element::{Element, cast, check_fits, index},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize", bound = "T: Element")]
///Every ordering of the first `n` naturals, from the identity to its reverse.
///
///```
///# use combinatoria::{Enumeration, Permutations};
///let family = Permutations::<u8>::new(3)?;
///assert_eq!(family.len(), 6);
///assert_eq!(family.nth(3)?, [1, 2, 0]);
///assert_eq!(family.rank(&[2, 0, 1])?, 4);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Permutations<T = u32> {
    n: usize,
    len: u64,
    element: PhantomData<T>,
}

impl<T: Element> Permutations<T> {
    ///Arrangements of `n` elements.
    ///
    ///# Errors
    ///Returns [`RangeError::ElementOverflow`] if `T` cannot hold `n - 1` and
    ///[`RangeError::CountOverflow`] if `n > 20`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        check_fits::<T>(n.saturating_sub(1))?;
        let len = factorial(n as u64)
            .ok_or(RangeError::CountOverflow)
            .inspect_err(|_| tracing::debug!(n, "permutation count overflows"))?;
        Ok(Permutations {
            n,
            len,
            element: PhantomData,
        })
    }

    ///Number of elements being arranged.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    ///The identity arrangement `0, 1, .., n-1`.
    #[must_use]
    pub fn identity(&self) -> Vec<T> {
        (0..self.n).map(cast).collect()
    }

    ///A uniformly random arrangement, drawn by shuffling rather than unranking.
    #[cfg(feature = "sampling")]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T> {
        let mut arrangement = self.identity();
        arrangement.shuffle(rng);
        arrangement
    }

    fn state(&self, values: impl IntoIterator<Item = usize>) -> PermutationState<T> {
        PermutationState {
            data: values.into_iter().map(cast).collect(),
        }
    }
}

impl<T: Element> TryFrom<usize> for Permutations<T> {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Permutations::new(n)
    }
}

impl<T> From<Permutations<T>> for usize {
    fn from(value: Permutations<T>) -> Self {
        value.n
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A permutation being walked through by [`Permutations`].
pub struct PermutationState<T> {
    data: Vec<T>,
}

impl<T: Element> Transition for PermutationState<T> {
    type Item = T;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn to_successor(&mut self) -> bool {
        let data = &mut self.data;
        // The pivot sits just before the longest non-increasing suffix.
        let Some(pivot) = (1..data.len()).rev().find(|&i| data[i - 1] < data[i]) else {
            return false;
        };
        let pivot = pivot - 1;
        let swap = (pivot + 1..data.len())
            .rev()
            .find(|&i| data[i] > data[pivot])
            .expect("the suffix holds something larger than the pivot");
        data.swap(pivot, swap);
        data[pivot + 1..].reverse();
        true
    }

    fn to_predecessor(&mut self) -> bool {
        let data = &mut self.data;
        let Some(pivot) = (1..data.len()).rev().find(|&i| data[i - 1] > data[i]) else {
            return false;
        };
        let pivot = pivot - 1;
        let swap = (pivot + 1..data.len())
            .rev()
            .find(|&i| data[i] < data[pivot])
            .expect("the suffix holds something smaller than the pivot");
        data.swap(pivot, swap);
        data[pivot + 1..].reverse();
        true
    }
}

impl<T: Element> Enumeration for Permutations<T> {
    type Item = T;
    type State = PermutationState<T>;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        self.state(0..self.n)
    }

    fn last(&self) -> Self::State {
        self.state((0..self.n).rev())
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        let mut unused: Vec<usize> = (0..self.n).collect();
        let mut values = Vec::with_capacity(self.n);
        let mut rank = rank;
        // Lehmer code: digit i counts the unused values below the one placed at i.
        for remaining in (0..self.n).rev() {
            let radix = factorial(remaining as u64).expect("bounded by the family count");
            let digit = (rank / radix) as usize;
            rank %= radix;
            values.push(unused.remove(digit));
        }
        Ok(self.state(values))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        if object.len() != self.n {
            return Err(RangeError::NotAMember);
        }
        let mut seen = vec![false; self.n];
        let mut rank = 0;
        for (i, &x) in object.iter().enumerate() {
            let value = index(x)
                .filter(|&value| value < self.n && !seen[value])
                .ok_or(RangeError::NotAMember)?;
            seen[value] = true;
            let smaller_unused = seen[..value].iter().filter(|&&used| !used).count();
            let radix = factorial((self.n - 1 - i) as u64).expect("bounded by the family count");
            rank += smaller_unused as u64 * radix;
        }
        Ok(rank)
    }

    #[cfg(feature = "sampling")]
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<T> {
        self.shuffled(rng)
    }
}

impl<'a, T: Element> IntoIterator for &'a Permutations<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<PermutationState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
