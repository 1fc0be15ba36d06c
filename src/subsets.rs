//! Every subset of an `n`-element set, spelled as a membership vector.
use serde::{Deserialize, Serialize};

use crate::{
    cursor::Iter,
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
///The `2^n` membership vectors of length `n`, in binary counting order.
///
///The last entry is the least significant bit, so read left to right each vector is the binary
///spelling of its rank.
///
///```
///# use combinatoria::{Enumeration, Subsets};
///let family = Subsets::new(2)?;
///let all: Vec<_> = family.iter().collect();
///assert_eq!(
///    all,
///    [[false, false], [false, true], [true, false], [true, true]]
///);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Subsets {
    n: usize,
    len: u64,
}

impl Subsets {
    ///Subsets of an `n`-element set.
    ///
    ///# Errors
    ///Returns [`RangeError::CountOverflow`] if `n > 63`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        if n >= u64::BITS as usize {
            tracing::debug!(n, "subset count overflows");
            return Err(RangeError::CountOverflow);
        }
        Ok(Subsets { n, len: 1 << n })
    }

    ///Size of the ground set.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    ///The bitmask spelled by `object`, which is also its rank.
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` has the wrong length.
    pub fn to_mask(&self, object: &[bool]) -> Result<u64, RangeError> {
        self.rank(object)
    }

    ///The membership vector spelling `mask`.
    ///
    ///# Errors
    ///Returns [`RangeError::RankOutOfRange`] if `mask` has bits at or above `n`.
    pub fn from_mask(&self, mask: u64) -> Result<Vec<bool>, RangeError> {
        self.nth(mask)
    }

    ///The indices of the elements `object` contains, in increasing order.
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` has the wrong length.
    pub fn members(&self, object: &[bool]) -> Result<Vec<usize>, RangeError> {
        if object.len() != self.n {
            return Err(RangeError::NotAMember);
        }
        Ok(object
            .iter()
            .enumerate()
            .filter_map(|(i, &member)| member.then_some(i))
            .collect())
    }
}

impl TryFrom<usize> for Subsets {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Subsets::new(n)
    }
}

impl From<Subsets> for usize {
    fn from(value: Subsets) -> Self {
        value.n
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A subset being walked through by [`Subsets`].
pub struct SubsetState {
    data: Vec<bool>,
    ones: usize,
}

impl SubsetState {
    fn from_mask(n: usize, mask: u64) -> Self {
        let data: Vec<bool> = (0..n).rev().map(|bit| (mask >> bit) & 1 == 1).collect();
        let ones = mask.count_ones() as usize;
        SubsetState { data, ones }
    }
}

impl Transition for SubsetState {
    type Item = bool;

    fn as_slice(&self) -> &[bool] {
        &self.data
    }

    fn to_successor(&mut self) -> bool {
        if self.ones == self.data.len() {
            return false;
        }
        for bit in self.data.iter_mut().rev() {
            if *bit {
                *bit = false;
                self.ones -= 1;
            } else {
                *bit = true;
                self.ones += 1;
                break;
            }
        }
        true
    }

    fn to_predecessor(&mut self) -> bool {
        if self.ones == 0 {
            return false;
        }
        for bit in self.data.iter_mut().rev() {
            if *bit {
                *bit = false;
                self.ones -= 1;
                break;
            }
            *bit = true;
            self.ones += 1;
        }
        true
    }
}

impl Enumeration for Subsets {
    type Item = bool;
    type State = SubsetState;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        SubsetState::from_mask(self.n, 0)
    }

    fn last(&self) -> Self::State {
        SubsetState::from_mask(self.n, self.len - 1)
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        Ok(SubsetState::from_mask(self.n, rank))
    }

    fn rank(&self, object: &[bool]) -> Result<u64, RangeError> {
        if object.len() != self.n {
            return Err(RangeError::NotAMember);
        }
        Ok(object
            .iter()
            .fold(0, |mask, &bit| (mask << 1) | u64::from(bit)))
    }
}

impl<'a> IntoIterator for &'a Subsets {
    type Item = Vec<bool>;
    type IntoIter = Iter<SubsetState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn binary_counting() -> anyhow::Result<()> {
        let family = Subsets::new(4)?;
        assert_eq!(family.len(), 16);
        for (mask, subset) in family.iter().enumerate() {
            assert_eq!(family.to_mask(&subset)?, mask as u64);
            assert_eq!(family.from_mask(mask as u64)?, subset);
        }
        assert_eq!(family.nth(5)?, [false, true, false, true]);
        assert_eq!(family.members(&[false, true, false, true])?, [1, 3]);
        Ok(())
    }

    #[test]
    fn ones_are_tracked() -> anyhow::Result<()> {
        let family = Subsets::new(5)?;
        let mut state = family.first();
        while state.to_successor() {
            assert_eq!(
                state.ones,
                state.as_slice().iter().filter(|&&bit| bit).count()
            );
        }
        assert_eq!(state, family.last());
        while state.to_predecessor() {
            assert_eq!(
                state.ones,
                state.as_slice().iter().filter(|&&bit| bit).count()
            );
        }
        assert_eq!(state, family.first());
        Ok(())
    }

    #[test]
    fn limits() -> anyhow::Result<()> {
        let empty = Subsets::new(0)?;
        assert_eq!(empty.iter().collect::<Vec<_>>(), [Vec::<bool>::new()]);

        let widest = Subsets::new(63)?;
        assert_eq!(widest.len(), 1 << 63);
        let last = widest.nth(widest.len() - 1)?;
        assert!(last.iter().all(|&bit| bit));

        assert_eq!(Subsets::new(64), Err(RangeError::CountOverflow));
        assert_eq!(
            Subsets::new(3)?.rank(&[true, false]),
            Err(RangeError::NotAMember)
        );
        Ok(())
    }
}
