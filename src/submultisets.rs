//! Sub-multisets of a multiset given by its multiplicities.
use std::{marker::PhantomData, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    cursor::Iter,
    element::{Element, cast, check_fits, index, uncast},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>", bound = "T: Element")]
///Every vector `s` with `0 <= s[i] <= multiplicities[i]`, counted in mixed radix with index `0`
///as the least significant digit.
///
///```
///# use combinatoria::{Enumeration, SubMultisets};
///let family = SubMultisets::<u8>::new(&[1, 2])?;
///assert_eq!(family.len(), 6);
///let all: Vec<_> = family.iter().collect();
///assert_eq!(all, [[0, 0], [1, 0], [0, 1], [1, 1], [0, 2], [1, 2]]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct SubMultisets<T = u32> {
    bounds: Arc<[usize]>,
    len: u64,
    element: PhantomData<T>,
}

impl<T: Element> SubMultisets<T> {
    ///Sub-multisets of the multiset holding `multiplicities[i]` copies of symbol `i`.
    ///
    ///# Errors
    ///Returns [`RangeError::ElementOverflow`] if `T` cannot hold the largest multiplicity and
    ///[`RangeError::CountOverflow`] if the product of `multiplicities[i] + 1` does not fit in a
    ///`u64`.
    pub fn new(multiplicities: &[usize]) -> Result<Self, RangeError> {
        check_fits::<T>(multiplicities.iter().copied().max().unwrap_or(0))?;
        let len = multiplicities
            .iter()
            .try_fold(1u64, |len, &m| {
                (m as u64)
                    .checked_add(1)
                    .and_then(|radix| len.checked_mul(radix))
            })
            .ok_or(RangeError::CountOverflow)
            .inspect_err(|_| tracing::debug!(?multiplicities, "sub-multiset count overflows"))?;
        Ok(SubMultisets {
            bounds: multiplicities.into(),
            len,
            element: PhantomData,
        })
    }

    ///How many copies of each symbol the full multiset holds.
    #[must_use]
    pub fn multiplicities(&self) -> &[usize] {
        &self.bounds
    }

    fn state(&self, values: impl IntoIterator<Item = usize>) -> SubMultisetState<T> {
        SubMultisetState {
            data: values.into_iter().map(cast).collect(),
            bounds: Arc::clone(&self.bounds),
        }
    }
}

impl<T: Element> TryFrom<Vec<usize>> for SubMultisets<T> {
    type Error = RangeError;

    fn try_from(multiplicities: Vec<usize>) -> Result<Self, Self::Error> {
        SubMultisets::new(&multiplicities)
    }
}

impl<T> From<SubMultisets<T>> for Vec<usize> {
    fn from(value: SubMultisets<T>) -> Self {
        value.bounds.to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A sub-multiset being walked through by [`SubMultisets`].
pub struct SubMultisetState<T> {
    data: Vec<T>,
    bounds: Arc<[usize]>,
}

impl<T: Element> Transition for SubMultisetState<T> {
    type Item = T;

    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn to_successor(&mut self) -> bool {
        let Some(i) = (0..self.data.len()).find(|&i| uncast(self.data[i]) < self.bounds[i]) else {
            return false;
        };
        self.data[i] = self.data[i] + T::one();
        self.data[..i].fill(T::zero());
        true
    }

    fn to_predecessor(&mut self) -> bool {
        let Some(i) = self.data.iter().position(|&x| x > T::zero()) else {
            return false;
        };
        self.data[i] = self.data[i] - T::one();
        for (digit, &bound) in self.data[..i].iter_mut().zip(self.bounds.iter()) {
            *digit = cast(bound);
        }
        true
    }
}

impl<T: Element> Enumeration for SubMultisets<T> {
    type Item = T;
    type State = SubMultisetState<T>;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        self.state(std::iter::repeat_n(0, self.bounds.len()))
    }

    fn last(&self) -> Self::State {
        self.state(self.bounds.iter().copied())
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        let mut rank = rank;
        let digits: Vec<_> = self
            .bounds
            .iter()
            .map(|&bound| {
                // Every radix divides len, so it fits.
                let radix = bound as u64 + 1;
                let digit = rank % radix;
                rank /= radix;
                digit as usize
            })
            .collect();
        Ok(self.state(digits))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        if object.len() != self.bounds.len() {
            return Err(RangeError::NotAMember);
        }
        let mut rank = 0;
        let mut weight = 1;
        for (&x, &bound) in object.iter().zip(self.bounds.iter()) {
            let digit = index(x)
                .filter(|&digit| digit <= bound)
                .ok_or(RangeError::NotAMember)?;
            rank += digit as u64 * weight;
            // The last weight can reach len itself.
            weight = weight.saturating_mul(bound as u64 + 1);
        }
        Ok(rank)
    }
}

impl<'a, T: Element> IntoIterator for &'a SubMultisets<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<SubMultisetState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mixed_radix() -> anyhow::Result<()> {
        let family = SubMultisets::<u32>::new(&[2, 0, 3])?;
        assert_eq!(family.len(), 12);
        let all: Vec<_> = family.iter().collect();
        assert_eq!(all[0], [0, 0, 0]);
        assert_eq!(all[1], [1, 0, 0]);
        assert_eq!(all[3], [0, 0, 1]);
        assert_eq!(all[11], [2, 0, 3]);
        for (position, object) in all.iter().enumerate() {
            assert_eq!(family.rank(object)?, position as u64);
            assert_eq!(&family.nth(position as u64)?, object);
        }
        assert_eq!(family.rank(&[0, 1, 0]), Err(RangeError::NotAMember));
        Ok(())
    }

    #[test]
    fn backwards_matches_forwards() -> anyhow::Result<()> {
        let family = SubMultisets::<u8>::new(&[3, 1, 2, 4])?;
        let mut backwards: Vec<_> = family.iter().rev().collect();
        backwards.reverse();
        assert_eq!(backwards, family.iter().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn edge_cases() -> anyhow::Result<()> {
        let nothing = SubMultisets::<u32>::new(&[])?;
        assert_eq!(nothing.iter().collect::<Vec<_>>(), [Vec::<u32>::new()]);

        assert!(SubMultisets::<u8>::new(&[256]).is_err());
        assert_eq!(
            SubMultisets::<u64>::new(&[u32::MAX as usize; 3]),
            Err(RangeError::CountOverflow)
        );

        let family = SubMultisets::<u16>::new(&[4, 4])?;
        let json = serde_json::to_string(&family)?;
        assert_eq!(json, "[4,4]");
        assert_eq!(serde_json::from_str::<SubMultisets<u16>>(&json)?, family);
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn widest_multiplicity() -> anyhow::Result<()> {
        assert_eq!(
            SubMultisets::<u64>::new(&[usize::MAX]),
            Err(RangeError::CountOverflow)
        );
        assert_eq!(
            SubMultisets::<u64>::new(&[usize::MAX, 0]),
            Err(RangeError::CountOverflow)
        );

        let family = SubMultisets::<u64>::new(&[usize::MAX - 1])?;
        assert_eq!(family.len(), u64::MAX);
        assert_eq!(family.nth(u64::MAX - 1)?, [u64::MAX - 1]);
        assert_eq!(family.rank(&[u64::MAX - 1])?, u64::MAX - 1);
        assert_eq!(family.rank(&[u64::MAX]), Err(RangeError::NotAMember));
        Ok(())
    }
}
