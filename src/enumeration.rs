//! The contract every family implements.
use std::fmt::Debug;

#[cfg(feature = "sampling")]
use rand::Rng;

use crate::{
    cursor::{Cursor, Direction, Iter},
    error::RangeError,
};

///One object of a family together with whatever bookkeeping its successor rule needs.
///
///Both transitions work in place and are atomic: when the state is already at the maximum
///(for [`Transition::to_successor`]) or the minimum (for [`Transition::to_predecessor`]) they
///return `false` and leave the object untouched.
pub trait Transition: Clone + Debug {
    ///The symbol the object is spelled with.
    type Item: Copy + Debug + PartialEq;

    ///The current object.
    fn as_slice(&self) -> &[Self::Item];

    ///Moves to the next object in the canonical order.
    fn to_successor(&mut self) -> bool;

    ///Moves to the previous object in the canonical order.
    fn to_predecessor(&mut self) -> bool;
}

///A combinatorial family with a canonical total order over its objects.
///
///A family always has at least one object: parameters that would make it empty are rejected
///by the constructor.
pub trait Enumeration: Sized {
    ///The symbol objects are spelled with.
    type Item: Copy + Debug + PartialEq;
    ///The in-place representation of one object.
    type State: Transition<Item = Self::Item>;

    ///The number of objects.
    fn len(&self) -> u64;

    ///The minimum of the order.
    fn first(&self) -> Self::State;

    ///The maximum of the order.
    fn last(&self) -> Self::State;

    ///The object at position `rank` of the order.
    ///
    ///# Errors
    ///Returns [`RangeError::RankOutOfRange`] if `rank >= self.len()`.
    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError>;

    ///The position of `object` in the order.
    ///
    ///# Errors
    ///Returns [`RangeError::NotAMember`] if `object` is not an object of this family.
    fn rank(&self, object: &[Self::Item]) -> Result<u64, RangeError>;

    ///A copy of the object at position `rank`.
    ///
    ///# Errors
    ///Returns [`RangeError::RankOutOfRange`] if `rank >= self.len()`.
    fn nth(&self, rank: u64) -> Result<Vec<Self::Item>, RangeError> {
        Ok(self.unrank(rank)?.as_slice().to_vec())
    }

    ///A forward cursor on the minimum.
    fn begin(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.first(), 0, Direction::Forward)
    }

    ///A forward cursor one past the maximum. Retreating it lands on the maximum.
    fn end(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.last(), self.len(), Direction::Forward)
    }

    ///A reverse cursor on the maximum.
    fn rbegin(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.last(), 0, Direction::Reverse)
    }

    ///A reverse cursor one past the minimum. Retreating it lands on the minimum.
    fn rend(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.first(), self.len(), Direction::Reverse)
    }

    ///A forward cursor on the object at position `rank`.
    ///
    ///# Errors
    ///Returns [`RangeError::RankOutOfRange`] if `rank >= self.len()`.
    fn cursor_at(&self, rank: u64) -> Result<Cursor<'_, Self>, RangeError> {
        Ok(Cursor::new(self, self.unrank(rank)?, rank, Direction::Forward))
    }

    ///Iterates over owned copies of every object, in order.
    fn iter(&self) -> Iter<Self::State> {
        Iter::new(self.first(), self.last(), self.len())
    }

    ///Calls `f` on every object in order without allocating per object.
    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&[Self::Item]),
    {
        let mut state = self.first();
        loop {
            f(state.as_slice());
            if !state.to_successor() {
                break;
            }
        }
    }

    ///A uniformly random object.
    #[cfg(feature = "sampling")]
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Self::Item> {
        let rank = rng.random_range(0..self.len());
        self.nth(rank)
            .expect("a rank drawn below len is always in range")
    }
}
