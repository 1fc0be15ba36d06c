//! Bidirectional handles over a family.
//!
//!A [`Cursor`] borrows its family and owns its own copy of the current object, so cloning a
//!cursor deep-copies the object and two cursors never disturb each other. Every cursor is either
//!on an object or on its end sentinel (one past the last object in its direction). The checks
//!below are made in every build profile: misuse is reported as a [`CursorError`] rather than
//!being undefined.
use std::{cmp::Ordering, fmt::Debug, iter::FusedIterator};

use crate::{
    enumeration::{Enumeration, Transition},
    error::{CursorError, RangeError},
};

///Jumps shorter than this are walked one transition at a time, longer ones are unranked.
const STEP_THRESHOLD: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
///Which way a cursor walks the order.
pub enum Direction {
    ///From the minimum towards the maximum.
    Forward,
    ///From the maximum towards the minimum.
    Reverse,
}

///A position in a family's order, seen from one [`Direction`].
///
///```
///# use combinatoria::{Combinations, Enumeration};
///let family = Combinations::<u8>::new(4, 2)?;
///let mut cursor = family.begin();
///cursor.advance()?;
///assert_eq!(cursor.current()?, &[0, 2]);
///
///let mut back = family.end();
///back.retreat()?;
///assert_eq!(back.current()?, &[2, 3]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Cursor<'a, E: Enumeration> {
    family: &'a E,
    state: E::State,
    position: u64,
    direction: Direction,
}

impl<'a, E: Enumeration> Cursor<'a, E> {
    pub(crate) fn new(family: &'a E, state: E::State, position: u64, direction: Direction) -> Self {
        Cursor {
            family,
            state,
            position,
            direction,
        }
    }

    ///The family this cursor walks.
    #[must_use]
    pub fn family(&self) -> &'a E {
        self.family
    }

    ///Which way this cursor walks.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    ///Number of advances from the first position in this cursor's direction.
    ///The end sentinel sits at `family.len()`.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    ///Whether the cursor sits on its end sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position >= self.family.len()
    }

    ///The rank of the current object in the family's order, `None` at the end sentinel.
    #[must_use]
    pub fn rank(&self) -> Option<u64> {
        if self.is_end() {
            return None;
        }
        Some(self.rank_of(self.position))
    }

    ///The current object, `None` at the end sentinel.
    #[must_use]
    pub fn get(&self) -> Option<&[E::Item]> {
        (!self.is_end()).then(|| self.state.as_slice())
    }

    ///The current object.
    ///
    ///# Errors
    ///Returns [`CursorError::PastEnd`] at the end sentinel.
    pub fn current(&self) -> Result<&[E::Item], CursorError> {
        self.get().ok_or_else(|| {
            tracing::trace!("dereferenced a cursor at its end sentinel");
            CursorError::PastEnd
        })
    }

    ///Moves one object further in this cursor's direction. Advancing from the last object reaches
    ///the end sentinel.
    ///
    ///# Errors
    ///Returns [`CursorError::PastEnd`] if the cursor is already at the end sentinel.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        let len = self.family.len();
        if self.position >= len {
            tracing::trace!("advanced a cursor past its end sentinel");
            return Err(CursorError::PastEnd);
        }
        // The end sentinel keeps the boundary object.
        if self.position + 1 < len {
            let moved = self.step_ahead();
            debug_assert!(moved, "a non-final object must have a neighbour");
        }
        self.position += 1;
        Ok(())
    }

    ///Moves one object back against this cursor's direction. Retreating from the end sentinel
    ///lands on the last object.
    ///
    ///# Errors
    ///Returns [`CursorError::BeforeBegin`] if the cursor is on its first object.
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        if self.position == 0 {
            tracing::trace!("retreated a cursor before its first object");
            return Err(CursorError::BeforeBegin);
        }
        if self.position < self.family.len() {
            let moved = self.step_behind();
            debug_assert!(moved, "a non-initial object must have a neighbour");
        }
        self.position -= 1;
        Ok(())
    }

    ///Advances by `steps` at once. Large jumps unrank instead of walking.
    ///
    ///# Errors
    ///Returns [`CursorError::PastEnd`] if the jump would pass the end sentinel. The cursor is
    ///left unchanged.
    pub fn advance_by(&mut self, steps: u64) -> Result<(), CursorError> {
        let len = self.family.len();
        let target = self
            .position
            .checked_add(steps)
            .filter(|&target| target <= len)
            .ok_or(CursorError::PastEnd)?;
        self.jump(target);
        Ok(())
    }

    ///Retreats by `steps` at once. Large jumps unrank instead of walking.
    ///
    ///# Errors
    ///Returns [`CursorError::BeforeBegin`] if the jump would pass the first object. The cursor is
    ///left unchanged.
    pub fn retreat_by(&mut self, steps: u64) -> Result<(), CursorError> {
        let target = self
            .position
            .checked_sub(steps)
            .ok_or(CursorError::BeforeBegin)?;
        self.jump(target);
        Ok(())
    }

    ///Moves the cursor onto the object of rank `rank`, whatever its current position.
    ///
    ///# Errors
    ///Returns [`RangeError::RankOutOfRange`] if `rank >= family.len()`.
    pub fn seek(&mut self, rank: u64) -> Result<(), RangeError> {
        self.state = self.family.unrank(rank)?;
        self.position = self.rank_of(rank);
        Ok(())
    }

    ///Moves the cursor back to its first object.
    pub fn reset(&mut self) {
        self.state = self.boundary_behind();
        self.position = 0;
    }

    ///Signed number of advances from `self` to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> i128 {
        i128::from(other.position) - i128::from(self.position)
    }

    fn jump(&mut self, target: u64) {
        let len = self.family.len();
        let distance = target.abs_diff(self.position);
        if distance < STEP_THRESHOLD {
            while self.position < target {
                let stepped = self.advance();
                debug_assert_eq!(stepped, Ok(()), "jump targets are checked against len");
            }
            while self.position > target {
                let stepped = self.retreat();
                debug_assert_eq!(stepped, Ok(()), "jump targets are checked against zero");
            }
            return;
        }
        if target == len {
            self.state = self.boundary_ahead();
        } else {
            let unranked = self.family.unrank(self.rank_of(target));
            debug_assert!(unranked.is_ok(), "jump targets below len always unrank");
            if let Ok(state) = unranked {
                self.state = state;
            }
        }
        self.position = target;
    }

    // Both maps are involutions between positions and ranks, valid for position < len.
    fn rank_of(&self, position: u64) -> u64 {
        match self.direction {
            Direction::Forward => position,
            Direction::Reverse => self.family.len() - 1 - position,
        }
    }

    fn step_ahead(&mut self) -> bool {
        match self.direction {
            Direction::Forward => self.state.to_successor(),
            Direction::Reverse => self.state.to_predecessor(),
        }
    }

    fn step_behind(&mut self) -> bool {
        match self.direction {
            Direction::Forward => self.state.to_predecessor(),
            Direction::Reverse => self.state.to_successor(),
        }
    }

    fn boundary_ahead(&self) -> E::State {
        match self.direction {
            Direction::Forward => self.family.last(),
            Direction::Reverse => self.family.first(),
        }
    }

    fn boundary_behind(&self) -> E::State {
        match self.direction {
            Direction::Forward => self.family.first(),
            Direction::Reverse => self.family.last(),
        }
    }
}

impl<E: Enumeration> Clone for Cursor<'_, E> {
    fn clone(&self) -> Self {
        Cursor {
            family: self.family,
            state: self.state.clone(),
            position: self.position,
            direction: self.direction,
        }
    }
}

impl<E: Enumeration> Debug for Cursor<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("state", &self.state)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

///Cursors compare by position only. Comparing cursors of two different families is meaningless.
impl<E: Enumeration> PartialEq for Cursor<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(std::ptr::eq(self.family, other.family));
        self.direction == other.direction && self.position == other.position
    }
}

impl<E: Enumeration> Eq for Cursor<'_, E> {}

///Cursors walking in opposite directions are unordered.
impl<E: Enumeration> PartialOrd for Cursor<'_, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        debug_assert!(std::ptr::eq(self.family, other.family));
        (self.direction == other.direction).then(|| self.position.cmp(&other.position))
    }
}

///Owned copies of every object between two positions, produced by [`Enumeration::iter`].
///
///Walks from both ends, so it is a [`DoubleEndedIterator`].
#[derive(Debug, Clone)]
pub struct Iter<S> {
    front: S,
    back: S,
    remaining: u64,
}

impl<S: Transition> Iter<S> {
    pub(crate) fn new(front: S, back: S, remaining: u64) -> Self {
        Iter {
            front,
            back,
            remaining,
        }
    }
}

impl<S: Transition> Iterator for Iter<S> {
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.front.as_slice().to_vec();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front.to_successor();
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<S: Transition> DoubleEndedIterator for Iter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.back.as_slice().to_vec();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back.to_predecessor();
        }
        Some(item)
    }
}

impl<S: Transition> ExactSizeIterator for Iter<S> {}

impl<S: Transition> FusedIterator for Iter<S> {}
