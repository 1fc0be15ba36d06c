//! Selections of `k` items from `n` symbol classes with repetition, spelled as non-decreasing
//! tuples.
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{
    combinations::{lex_rank, lex_unrank},
    count::binomial,
    cursor::Iter,
    element::{Element, cast, check_fits, index, uncast},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "(usize, usize)",
    into = "(usize, usize)",
    bound = "T: Element"
)]
///Every non-decreasing `k`-tuple over `{0, .., n-1}`, in lexicographic order.
///
///`k` may exceed `n` since symbols repeat.
///
///```
///# use combinatoria::{Enumeration, Multisets};
///let family = Multisets::<u8>::new(2, 3)?;
///let all: Vec<_> = family.iter().collect();
///assert_eq!(all, [[0, 0, 0], [0, 0, 1], [0, 1, 1], [1, 1, 1]]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Multisets<T = u32> {
    n: usize,
    k: usize,
    len: u64,
    element: PhantomData<T>,
}

impl<T: Element> Multisets<T> {
    ///Draws `k` items from `n` classes.
    ///
    ///# Errors
    ///Returns [`RangeError::NoSymbols`] if `n == 0 < k`, [`RangeError::ElementOverflow`] if `T`
    ///cannot hold `n - 1` and [`RangeError::CountOverflow`] if `C(n+k-1, k)` does not fit in a
    ///`u64`.
    pub fn new(n: usize, k: usize) -> Result<Self, RangeError> {
        if n == 0 && k > 0 {
            tracing::debug!(n, k, "rejected multisets");
            return Err(RangeError::NoSymbols { k });
        }
        check_fits::<T>(n.saturating_sub(1))?;
        // With n = 0 only the empty selection exists, and C(k-1, k) would read as zero.
        let len = if n == 0 {
            Some(1)
        } else {
            (n - 1)
                .checked_add(k)
                .and_then(|top| binomial(top as u64, k as u64))
        }
        .ok_or(RangeError::CountOverflow)
        .inspect_err(|_| tracing::debug!(n, k, "multiset count overflows"))?;
        Ok(Multisets {
            n,
            k,
            len,
            element: PhantomData,
        })
    }

    ///Number of symbol classes.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    ///Number of items drawn.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    ///How many copies of each symbol `object` holds.
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` is not one of this family's tuples.
    pub fn multiplicities(&self, object: &[T]) -> Result<Vec<usize>, RangeError> {
        self.rank(object)?;
        let mut counts = vec![0; self.n];
        for &x in object {
            counts[uncast(x)] += 1;
        }
        Ok(counts)
    }

    // The shift `data[i] + i` is a bijection onto the k-combinations of n+k-1. Only called
    // with n > 0, and the constructor checked the sum.
    fn spread(&self) -> usize {
        self.n - 1 + self.k
    }

    fn state(&self, values: impl IntoIterator<Item = usize>) -> MultisetState<T> {
        MultisetState {
            data: values.into_iter().map(cast).collect(),
            n: self.n,
        }
    }
}

impl<T: Element> TryFrom<(usize, usize)> for Multisets<T> {
    type Error = RangeError;

    fn try_from((n, k): (usize, usize)) -> Result<Self, Self::Error> {
        Multisets::new(n, k)
    }
}

impl<T> From<Multisets<T>> for (usize, usize) {
    fn from(value: Multisets<T>) -> Self {
        (value.n, value.k)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A multiset being walked through by [`Multisets`].
pub struct MultisetState<T> {
    data: Vec<T>,
    n: usize,
}

impl<T: Element> Transition for MultisetState<T> {
    type Item = T;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn to_successor(&mut self) -> bool {
        let top = self.n.saturating_sub(1);
        let Some(i) = self.data.iter().rposition(|&x| uncast(x) < top) else {
            return false;
        };
        let raised = self.data[i] + T::one();
        self.data[i..].fill(raised);
        true
    }

    fn to_predecessor(&mut self) -> bool {
        let data = &self.data;
        let Some(i) = (0..data.len())
            .rev()
            .find(|&i| data[i] > T::zero() && (i == 0 || data[i - 1] < data[i]))
        else {
            return false;
        };
        self.data[i] = self.data[i] - T::one();
        self.data[i + 1..].fill(cast(self.n - 1));
        true
    }
}

impl<T: Element> Enumeration for Multisets<T> {
    type Item = T;
    type State = MultisetState<T>;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        self.state(std::iter::repeat_n(0, self.k))
    }

    fn last(&self) -> Self::State {
        self.state(std::iter::repeat_n(self.n.saturating_sub(1), self.k))
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        if self.k == 0 {
            return Ok(self.first());
        }
        let spread = lex_unrank(self.spread(), self.k, rank);
        Ok(self.state(spread.into_iter().enumerate().map(|(i, x)| x - i)))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        if object.len() != self.k {
            return Err(RangeError::NotAMember);
        }
        if self.k == 0 {
            return Ok(0);
        }
        let values = object
            .iter()
            .map(|&x| index(x).filter(|&x| x < self.n))
            .collect::<Option<Vec<_>>>()
            .ok_or(RangeError::NotAMember)?;
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(RangeError::NotAMember);
        }
        let spread: Vec<_> = values.iter().enumerate().map(|(i, x)| x + i).collect();
        Ok(lex_rank(self.spread(), &spread))
    }
}

impl<'a, T: Element> IntoIterator for &'a Multisets<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<MultisetState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts() -> anyhow::Result<()> {
        for n in 1..6 {
            for k in 0..6 {
                let family = Multisets::<u8>::new(n, k)?;
                let expected = binomial((n + k - 1) as u64, k as u64).unwrap();
                assert_eq!(family.len(), expected);
                assert_eq!(family.iter().count() as u64, expected);
            }
        }
        Ok(())
    }

    #[test]
    fn order_and_ranks() -> anyhow::Result<()> {
        let family = Multisets::<u32>::new(3, 2)?;
        let all: Vec<_> = family.iter().collect();
        assert_eq!(
            all,
            [[0, 0], [0, 1], [0, 2], [1, 1], [1, 2], [2, 2]]
        );
        for (position, multiset) in all.iter().enumerate() {
            assert_eq!(family.rank(multiset)?, position as u64);
            assert_eq!(&family.nth(position as u64)?, multiset);
        }
        assert_eq!(family.rank(&[1, 0]), Err(RangeError::NotAMember));
        assert_eq!(family.rank(&[0, 3]), Err(RangeError::NotAMember));
        assert_eq!(family.multiplicities(&[0, 2])?, [1, 0, 1]);
        Ok(())
    }

    #[test]
    fn degenerate_sizes() -> anyhow::Result<()> {
        let empty = Multisets::<u32>::new(0, 0)?;
        assert_eq!(empty.iter().collect::<Vec<_>>(), [Vec::<u32>::new()]);

        let single_class = Multisets::<u32>::new(1, 4)?;
        assert_eq!(single_class.iter().collect::<Vec<_>>(), [[0, 0, 0, 0]]);

        assert_eq!(
            Multisets::<u32>::new(0, 2),
            Err(RangeError::NoSymbols { k: 2 })
        );
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_symbol_sets() -> anyhow::Result<()> {
        let family = Multisets::<u64>::new(usize::MAX, 1)?;
        assert_eq!(family.len(), u64::MAX);
        assert_eq!(family.nth(family.len() - 1)?, [u64::MAX - 1]);
        assert_eq!(family.last().as_slice(), [u64::MAX - 1]);
        assert_eq!(family.rank(&[7])?, 7);
        assert_eq!(family.nth(1 << 40)?, [1 << 40]);

        assert_eq!(
            Multisets::<u64>::new(usize::MAX, 2),
            Err(RangeError::CountOverflow)
        );
        assert_eq!(Multisets::<u64>::new(usize::MAX, 0)?.len(), 1);
        Ok(())
    }

    #[test]
    fn walks_backwards() -> anyhow::Result<()> {
        let family = Multisets::<u16>::new(4, 5)?;
        let forwards: Vec<_> = family.iter().collect();
        let mut backwards: Vec<_> = family.iter().rev().collect();
        backwards.reverse();
        assert_eq!(forwards, backwards);
        Ok(())
    }
}
